//! Form fields.
//!
//! Every field shares one record ([`Field`]) holding its identity, bound
//! value, rules and options. The [`FieldKind`] tag selects the element body
//! produced by [`Field::render`].

mod kind;

pub use kind::FieldKind;

use tracing::warn;

use crate::engine::RuleEngine;
use crate::error::Result;
use crate::rules::{ConstraintKind, RuleSet};
use crate::widgets::{markup, BaseAttrs};

/// Result of validating one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// All rules hold.
    Pass,
    /// A rule is broken.
    Fail {
        /// The broken-rule identifier.
        rule: String,
    },
}

impl ValidationOutcome {
    /// Returns whether the field passed.
    #[must_use]
    pub const fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }
}

/// A registered form field.
#[derive(Debug, Clone)]
pub struct Field {
    name: String,
    label: String,
    kind: FieldKind,
    rules: RuleSet,
    sanitize: Option<String>,
    options: Vec<(String, String)>,
    value: Option<String>,
}

impl Field {
    /// Creates a field, parsing its raw rule specification.
    ///
    /// # Errors
    ///
    /// Returns [`FieldsetError::UnrecognizedRule`](crate::FieldsetError::UnrecognizedRule)
    /// if the specification contains a token outside the rule catalog.
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        kind: FieldKind,
        rules: &str,
    ) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            label: label.into(),
            kind,
            rules: RuleSet::parse(rules)?,
            sanitize: None,
            options: Vec::new(),
            value: None,
        })
    }

    /// Sets the sanitize filter specification. Blank specifications are ignored.
    #[must_use]
    pub fn sanitize(mut self, filters: impl Into<String>) -> Self {
        let filters = filters.into();
        self.sanitize = (!filters.trim().is_empty()).then_some(filters);
        self
    }

    /// Sets the options of a choice field.
    #[must_use]
    pub fn options<K, V>(mut self, options: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let options: Vec<(String, String)> = options
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        if !options.is_empty() && !self.kind.has_options() {
            warn!(field = %self.name, kind = ?self.kind, "ignoring options for a field without choices");
            return self;
        }
        self.options = options;
        self
    }

    /// Returns the field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the display label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the field kind.
    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Returns the parsed rules.
    #[must_use]
    pub const fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Returns the sanitize filter specification, if any.
    #[must_use]
    pub fn sanitize_spec(&self) -> Option<&str> {
        self.sanitize.as_deref()
    }

    /// Returns the choice options in order.
    #[must_use]
    pub fn choices(&self) -> &[(String, String)] {
        &self.options
    }

    /// Returns the bound value, if one was passed.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Binds a value, replacing any previous one.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = Some(value.into());
    }

    /// Returns whether the bound value counts as "on" for a checkbox.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        self.value.as_deref().is_some_and(|v| {
            let v = v.trim();
            !v.is_empty()
                && !["0", "false", "off", "no"]
                    .iter()
                    .any(|falsy| v.eq_ignore_ascii_case(falsy))
        })
    }

    /// Renders the field element.
    ///
    /// `classes` becomes the `class` attribute; `attrs` are appended after
    /// the base attributes in the given order.
    #[must_use]
    pub fn render(&self, classes: Option<&str>, attrs: &[(&str, &str)]) -> String {
        let base = BaseAttrs::new(&self.name)
            .class(classes)
            .extend(attrs.iter().copied());
        let value = self.value();

        match self.kind {
            FieldKind::Text => markup::input("text", &base, value),
            FieldKind::Password => markup::input("password", &base, value),
            FieldKind::Checkbox => markup::checkbox(&base, self.is_truthy()),
            FieldKind::SelectMenu => markup::select(&base, &self.options, value),
            FieldKind::RadioSeries => markup::radio_series(&base, &self.options, value),
            FieldKind::Textarea => markup::textarea(&base, value),
            FieldKind::FileUpload => markup::file_upload(&base),
        }
    }

    /// Validates the bound value with the rule engine.
    ///
    /// Fields without single-field rules pass without consulting the engine.
    /// Cross-field rules are not checked here; see [`Field::match_targets`].
    #[must_use]
    pub fn validate(&self, engine: &dyn RuleEngine) -> ValidationOutcome {
        let rules = self.rules.evaluator_rules();
        if rules.is_empty() {
            return ValidationOutcome::Pass;
        }

        let broken = engine.evaluate(self.value().unwrap_or_default(), &rules);
        match broken.into_iter().next() {
            Some(first) => ValidationOutcome::Fail { rule: first.rule },
            None => ValidationOutcome::Pass,
        }
    }

    /// Returns the names of the fields this field's value must equal.
    #[must_use]
    pub fn match_targets(&self) -> impl Iterator<Item = &str> {
        self.rules
            .iter()
            .filter(|c| c.kind == ConstraintKind::Matches)
            .filter_map(|c| c.param.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::collections::HashMap;

    use super::*;
    use crate::engine::BrokenRule;

    /// Engine that fails every call with a fixed rule and counts calls.
    struct Rejecting {
        calls: Cell<usize>,
    }

    impl RuleEngine for Rejecting {
        fn sanitize(
            &self,
            values: &HashMap<String, String>,
            _filters: &HashMap<String, String>,
        ) -> HashMap<String, String> {
            values.clone()
        }

        fn evaluate(&self, _value: &str, _rules: &str) -> Vec<BrokenRule> {
            self.calls.set(self.calls.get() + 1);
            vec![BrokenRule::new("validate_required")]
        }
    }

    fn rejecting() -> Rejecting {
        Rejecting {
            calls: Cell::new(0),
        }
    }

    #[test]
    fn test_no_rules_skips_engine() {
        let field = Field::new("nickname", "Nickname", FieldKind::Text, "").unwrap();
        let engine = rejecting();
        assert!(field.validate(&engine).is_pass());
        assert_eq!(engine.calls.get(), 0);
    }

    #[test]
    fn test_only_cross_field_rules_skips_engine() {
        let field = Field::new("confirm", "Confirm", FieldKind::Password, "matches[pw]").unwrap();
        let engine = rejecting();
        assert!(field.validate(&engine).is_pass());
        assert_eq!(engine.calls.get(), 0);
        assert_eq!(field.match_targets().collect::<Vec<_>>(), vec!["pw"]);
    }

    #[test]
    fn test_engine_failure_reported() {
        let field = Field::new("name", "Name", FieldKind::Text, "required").unwrap();
        let engine = rejecting();
        assert_eq!(
            field.validate(&engine),
            ValidationOutcome::Fail {
                rule: "validate_required".to_string()
            }
        );
        assert_eq!(engine.calls.get(), 1);
    }

    #[test]
    fn test_last_write_wins() {
        let mut field = Field::new("name", "Name", FieldKind::Text, "").unwrap();
        assert_eq!(field.value(), None);
        field.set_value("first");
        field.set_value("second");
        assert_eq!(field.value(), Some("second"));
    }

    #[test]
    fn test_checkbox_truthiness() {
        let mut field = Field::new("agree", "Agree", FieldKind::Checkbox, "").unwrap();
        assert!(!field.is_truthy());
        for (value, truthy) in [("1", true), ("on", true), ("yes", true), ("0", false), ("False", false), ("", false)] {
            field.set_value(value);
            assert_eq!(field.is_truthy(), truthy, "{value}");
        }
    }

    #[test]
    fn test_options_dropped_for_plain_kinds() {
        let field = Field::new("name", "Name", FieldKind::Text, "")
            .unwrap()
            .options([("a", "A")]);
        assert!(field.choices().is_empty());
    }

    #[test]
    fn test_render_text_with_attrs() {
        let mut field = Field::new("city", "City", FieldKind::Text, "").unwrap();
        field.set_value("Gent");
        assert_eq!(
            field.render(Some("wide"), &[("maxlength", "40")]),
            r#"<input type="text" id="city" name="city" class="wide" maxlength="40" value="Gent">"#
        );
    }

    #[test]
    fn test_render_file_upload_hides_value() {
        let mut field = Field::new("cv", "CV", FieldKind::FileUpload, "").unwrap();
        field.set_value("secret.pdf");
        assert!(!field.render(None, &[]).contains("secret.pdf"));
    }
}
