//! Error messages for broken rules.
//!
//! A [`MessageCatalog`] maps every constraint to a [`MessageTemplate`].
//! Templates use `{}` placeholders, filled in order with the field label and,
//! for parameterised rules, the rule parameter. The number of placeholders is
//! checked when a template enters a catalog, so formatting never runs out of
//! values.

use std::collections::HashMap;

use crate::error::{FieldsetError, Result};
use crate::fields::Field;
use crate::rules::{ConstraintKind, RuleDialect, ServerDialect};

const PLACEHOLDER: &str = "{}";

/// Built-in English templates.
const DEFAULT_TEMPLATES: [(ConstraintKind, &str); 24] = [
    (ConstraintKind::Required, "The {} field is required"),
    (ConstraintKind::Alpha, "The {} field may only contain alpha characters (a-z)"),
    (ConstraintKind::AlphaNumeric, "The {} field may only contain alpha-numeric characters"),
    (ConstraintKind::AlphaDash, "The {} field may only contain alpha characters and dashes"),
    (ConstraintKind::Numeric, "The {} field may only contain numeric characters"),
    (ConstraintKind::Integer, "The {} field may only contain a whole number"),
    (ConstraintKind::Boolean, "The {} field may only contain a true or false value"),
    (ConstraintKind::Float, "The {} field may only contain a decimal number"),
    (ConstraintKind::ValidEmail, "The {} field is required to be a valid email address"),
    (ConstraintKind::ValidEmails, "The {} field must contain valid email addresses"),
    (ConstraintKind::IsNatural, "The {} field must contain only positive numbers"),
    (ConstraintKind::IsNaturalNoZero, "The {} field must contain a number greater than zero"),
    (ConstraintKind::ValidIp, "The {} field needs to contain a valid IP address"),
    (ConstraintKind::ValidBase64, "The {} field must contain a base64 string"),
    (ConstraintKind::ValidCc, "The {} field needs to contain a valid credit card number"),
    (ConstraintKind::ValidUrl, "The {} field is required to be a valid URL"),
    (ConstraintKind::ValidName, "The {} field needs to contain a valid human name"),
    (ConstraintKind::UrlExists, "The {} URL does not exist"),
    (ConstraintKind::MinLength, "The {} field needs to be {} characters or longer"),
    (ConstraintKind::MaxLength, "The {} field needs to be {} characters or shorter"),
    (ConstraintKind::ExactLength, "The {} field needs to be exactly {} characters long"),
    (ConstraintKind::GreaterThan, "The {} field must contain a number greater than {}"),
    (ConstraintKind::LessThan, "The {} field must contain a number less than {}"),
    (ConstraintKind::Matches, "The {} field does not match the {} field"),
];

/// Template used for broken rules outside the catalog.
const FALLBACK_TEMPLATE: &str = "The {} field is invalid";

/// A message template with a counted number of placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplate {
    text: String,
    placeholders: usize,
}

impl MessageTemplate {
    /// Creates a template, counting its `{}` placeholders.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let placeholders = text.matches(PLACEHOLDER).count();
        Self { text, placeholders }
    }

    /// Returns the template text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the number of placeholders.
    #[must_use]
    pub const fn placeholders(&self) -> usize {
        self.placeholders
    }

    /// Fills the placeholders with `values`, in order.
    ///
    /// Placeholders beyond the supplied values stay as written.
    /// [`MessageCatalog::format`] never fills a template that way.
    #[must_use]
    pub fn fill(&self, values: &[&str]) -> String {
        let mut out = String::with_capacity(self.text.len());
        let mut rest = self.text.as_str();
        for value in values.iter().take(self.placeholders) {
            let Some(pos) = rest.find(PLACEHOLDER) else {
                break;
            };
            out.push_str(&rest[..pos]);
            out.push_str(value);
            rest = &rest[pos + PLACEHOLDER.len()..];
        }
        out.push_str(rest);
        out
    }
}

/// Number of values substitution provides for a constraint.
const fn substitutions(kind: ConstraintKind) -> usize {
    if kind.takes_param() {
        2
    } else {
        1
    }
}

/// One failed field of a validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    /// Name of the failing field.
    pub field: String,
    /// Broken-rule identifier as reported.
    pub rule: String,
    /// The constraint the identifier refers to, if it is in the catalog.
    pub kind: Option<ConstraintKind>,
    /// Parameter of the broken constraint.
    pub param: Option<String>,
    /// Human-readable message.
    pub message: String,
}

/// Immutable constraint → message template table.
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    templates: HashMap<ConstraintKind, MessageTemplate>,
    fallback: MessageTemplate,
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self {
            templates: DEFAULT_TEMPLATES
                .iter()
                .map(|(kind, text)| (*kind, MessageTemplate::new(*text)))
                .collect(),
            fallback: MessageTemplate::new(FALLBACK_TEMPLATE),
        }
    }
}

impl MessageCatalog {
    /// Builds a catalog from a complete set of templates.
    ///
    /// # Errors
    ///
    /// Returns [`FieldsetError::MissingTemplate`] if a constraint has no
    /// template and [`FieldsetError::InvalidTemplate`] if a template has more
    /// placeholders than its constraint can fill.
    pub fn new<T: Into<String>>(
        templates: impl IntoIterator<Item = (ConstraintKind, T)>,
    ) -> Result<Self> {
        let mut map = HashMap::new();
        for (kind, text) in templates {
            map.insert(kind, checked(kind, MessageTemplate::new(text))?);
        }
        if let Some(missing) = ConstraintKind::ALL.into_iter().find(|k| !map.contains_key(k)) {
            return Err(FieldsetError::MissingTemplate(
                ServerDialect.rule_name(missing).to_string(),
            ));
        }
        Ok(Self {
            templates: map,
            fallback: MessageTemplate::new(FALLBACK_TEMPLATE),
        })
    }

    /// Loads template overrides from a JSON object of rule name → template,
    /// on top of the built-in templates.
    ///
    /// Rule names may use either dialect's spelling.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed JSON, unknown rule names, and
    /// templates with too many placeholders.
    pub fn from_json(json: &str) -> Result<Self> {
        let overrides: HashMap<String, String> = serde_json::from_str(json)?;
        let mut catalog = Self::default();
        for (name, text) in overrides {
            let kind = ConstraintKind::from_name(&name)
                .ok_or(FieldsetError::UnknownTemplateRule(name))?;
            catalog
                .templates
                .insert(kind, checked(kind, MessageTemplate::new(text))?);
        }
        Ok(catalog)
    }

    /// Returns the template for a constraint.
    #[must_use]
    pub fn template(&self, kind: ConstraintKind) -> &MessageTemplate {
        self.templates.get(&kind).unwrap_or(&self.fallback)
    }

    /// Formats the error record for a field and a broken-rule identifier.
    ///
    /// The parameter is taken from the first constraint of the field whose
    /// kind matches the identifier. A template that would be left with
    /// unfilled placeholders is replaced by the fallback template.
    #[must_use]
    pub fn format(&self, field: &Field, rule: &str) -> ErrorRecord {
        let kind = ConstraintKind::from_name(ServerDialect::strip_broken_rule(rule));
        let param = kind
            .and_then(|k| field.rules().find(k))
            .and_then(|c| c.param.clone());
        let message = self.message(kind, field.label(), param.as_deref());

        ErrorRecord {
            field: field.name().to_string(),
            rule: rule.to_string(),
            kind,
            param,
            message,
        }
    }

    /// Formats the record for a field whose value differs from `target`'s.
    ///
    /// The message names the target by its label.
    #[must_use]
    pub fn format_mismatch(&self, field: &Field, target: &Field) -> ErrorRecord {
        let kind = ConstraintKind::Matches;
        ErrorRecord {
            field: field.name().to_string(),
            rule: ServerDialect::broken_rule(kind),
            kind: Some(kind),
            param: Some(target.name().to_string()),
            message: self.message(Some(kind), field.label(), Some(target.label())),
        }
    }

    fn message(&self, kind: Option<ConstraintKind>, label: &str, param: Option<&str>) -> String {
        let mut values = vec![label];
        values.extend(param);
        let template = match kind.map(|k| self.template(k)) {
            Some(template) if template.placeholders() <= values.len() => template,
            _ => &self.fallback,
        };
        template.fill(&values)
    }
}

fn checked(kind: ConstraintKind, template: MessageTemplate) -> Result<MessageTemplate> {
    let expected = substitutions(kind);
    if template.placeholders() > expected {
        return Err(FieldsetError::InvalidTemplate {
            rule: ServerDialect.rule_name(kind).to_string(),
            expected,
            found: template.placeholders(),
        });
    }
    Ok(template)
}
