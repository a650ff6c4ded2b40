//! The field registry.
//!
//! A [`FieldRegistry`] owns the fields of one form for the lifetime of a
//! request: it resolves type tokens at registration, distributes submitted
//! values, drives a validation pass through a [`RuleEngine`], and keeps the
//! resulting error log.

use std::collections::{HashMap, HashSet};

use ironhtml::html;
use ironhtml::typed::Element;
use ironhtml_elements::{Li, Ul};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::engine::RuleEngine;
use crate::error::{FieldsetError, Result};
use crate::fields::{Field, FieldKind, ValidationOutcome};
use crate::messages::{ErrorRecord, MessageCatalog};

/// Default CSS class of the aggregate error block.
pub const DEFAULT_ERROR_CLASS: &str = "form-errors";

/// One registration entry.
///
/// Only `name`, `label` and `type` are required when deserializing; the
/// trailing fields default to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FieldSpec {
    /// Unique field name.
    pub name: String,
    /// Display label.
    pub label: String,
    /// Field type token, resolved with [`FieldKind::resolve`].
    #[serde(rename = "type")]
    pub type_token: String,
    /// Raw rule specification.
    #[serde(default)]
    pub rules: String,
    /// Raw sanitize filter specification.
    #[serde(default)]
    pub sanitize: String,
    /// Ordered value → label options for choice fields.
    #[serde(default)]
    pub options: Vec<(String, String)>,
}

impl FieldSpec {
    /// Creates an entry with no rules, filters or options.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        type_token: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            type_token: type_token.into(),
            ..Default::default()
        }
    }

    /// Sets the rule specification.
    #[must_use]
    pub fn rules(mut self, rules: impl Into<String>) -> Self {
        self.rules = rules.into();
        self
    }

    /// Sets the sanitize filter specification.
    #[must_use]
    pub fn sanitize(mut self, filters: impl Into<String>) -> Self {
        self.sanitize = filters.into();
        self
    }

    /// Adds a choice option.
    #[must_use]
    pub fn option(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
        self.options.push((value.into(), label.into()));
        self
    }

    /// Builds the field this entry describes.
    ///
    /// # Errors
    ///
    /// Returns an error if the type token is unresolved or the rules contain
    /// an unrecognized token. No field is constructed in either case.
    pub fn build(self) -> Result<Field> {
        let kind = FieldKind::resolve(&self.type_token)?;
        Ok(Field::new(self.name, self.label, kind, &self.rules)?
            .sanitize(self.sanitize)
            .options(self.options))
    }
}

/// Client-side validation entry for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptRule {
    /// Field name.
    pub name: String,
    /// Display label.
    pub display: String,
    /// Rules in the client-script dialect.
    pub rules: String,
}

/// Whether a validation pass has run.
#[derive(Debug, Clone, Default)]
enum ValidationState {
    #[default]
    Unvalidated,
    Validated(Vec<ErrorRecord>),
}

/// Registry of form fields.
#[derive(Debug, Default)]
pub struct FieldRegistry {
    fields: Vec<Field>,
    index: HashMap<String, usize>,
    messages: MessageCatalog,
    error_class: Option<String>,
    state: ValidationState,
}

impl FieldRegistry {
    /// Creates an empty registry with the built-in messages.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a builder for a customised registry.
    #[must_use]
    pub fn builder() -> FieldRegistryBuilder {
        FieldRegistryBuilder::default()
    }

    /// Registers a field.
    ///
    /// Registering after a validation pass discards that pass's error log.
    ///
    /// # Errors
    ///
    /// Returns [`FieldsetError::UnresolvedFieldType`],
    /// [`FieldsetError::UnrecognizedRule`] or [`FieldsetError::DuplicateField`];
    /// the registry is unchanged in every case.
    pub fn register(&mut self, spec: FieldSpec) -> Result<&Field> {
        if self.index.contains_key(&spec.name) {
            return Err(FieldsetError::DuplicateField(spec.name));
        }
        let field = spec.build()?;
        Ok(self.insert(field))
    }

    /// Registers several fields at once.
    ///
    /// Either all fields are registered or, on the first error, none are.
    ///
    /// # Errors
    ///
    /// Same as [`FieldRegistry::register`], also for names repeated within
    /// `specs`.
    pub fn register_bulk(&mut self, specs: impl IntoIterator<Item = FieldSpec>) -> Result<()> {
        let mut seen = HashSet::new();
        let mut built = Vec::new();
        for spec in specs {
            if self.index.contains_key(&spec.name) || !seen.insert(spec.name.clone()) {
                return Err(FieldsetError::DuplicateField(spec.name));
            }
            built.push(spec.build()?);
        }
        for field in built {
            self.insert(field);
        }
        Ok(())
    }

    /// Registers fields from a JSON array of [`FieldSpec`] objects.
    ///
    /// # Errors
    ///
    /// Returns [`FieldsetError::Json`] for malformed input, otherwise the
    /// errors of [`FieldRegistry::register_bulk`].
    pub fn register_json(&mut self, json: &str) -> Result<()> {
        let specs: Vec<FieldSpec> = serde_json::from_str(json)?;
        self.register_bulk(specs)
    }

    fn insert(&mut self, field: Field) -> &Field {
        debug!(
            field = field.name(),
            kind = ?field.kind(),
            rules = %field.rules().server_rules(),
            "registered field"
        );
        let idx = self.fields.len();
        self.index.insert(field.name().to_string(), idx);
        self.fields.push(field);
        self.state = ValidationState::Unvalidated;
        &self.fields[idx]
    }

    /// Returns the field with the given name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Field> {
        self.index.get(name).map(|&idx| &self.fields[idx])
    }

    /// Returns all fields in registration order.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Returns the number of registered fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns whether no field is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Binds a value to a field. Unknown names are ignored.
    pub fn pass_value(&mut self, name: &str, value: impl Into<String>) {
        match self.index.get(name) {
            Some(&idx) => self.fields[idx].set_value(value),
            None => debug!(field = name, "ignoring value for unknown field"),
        }
    }

    /// Binds values to fields by name. Unknown names are ignored.
    pub fn pass_values<K, V>(&mut self, values: impl IntoIterator<Item = (K, V)>)
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        for (name, value) in values {
            self.pass_value(name.as_ref(), value);
        }
    }

    /// Returns the bound value of a field.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Field::value)
    }

    /// Returns all bound values keyed by field name.
    #[must_use]
    pub fn values(&self) -> HashMap<String, String> {
        self.fields
            .iter()
            .filter_map(|f| f.value().map(|v| (f.name().to_string(), v.to_string())))
            .collect()
    }

    /// Runs a validation pass.
    ///
    /// Fields declaring a sanitize specification are sanitized in one batch
    /// and the results written back; then every field is validated in
    /// registration order. The previous error log is replaced. Returns
    /// whether every field passed.
    ///
    /// # Errors
    ///
    /// Returns [`FieldsetError::UnknownMatchTarget`] if a `matches` rule
    /// names an unregistered field. The registry is then left unvalidated.
    pub fn validate(&mut self, engine: &dyn RuleEngine) -> Result<bool> {
        self.state = ValidationState::Unvalidated;
        self.sanitize(engine);

        let mut records = Vec::new();
        for field in &self.fields {
            let record = match field.validate(engine) {
                ValidationOutcome::Fail { rule } => Some(self.messages.format(field, &rule)),
                ValidationOutcome::Pass => self
                    .mismatched_target(field)?
                    .map(|target| self.messages.format_mismatch(field, target)),
            };
            if let Some(record) = record {
                debug!(field = field.name(), rule = %record.rule, "field failed validation");
                records.push(record);
            }
        }

        info!(
            fields = self.fields.len(),
            errors = records.len(),
            "validation pass complete"
        );
        let passed = records.is_empty();
        self.state = ValidationState::Validated(records);
        Ok(passed)
    }

    fn sanitize(&mut self, engine: &dyn RuleEngine) {
        let filters: HashMap<String, String> = self
            .fields
            .iter()
            .filter_map(|f| f.sanitize_spec().map(|s| (f.name().to_string(), s.to_string())))
            .collect();
        if filters.is_empty() {
            return;
        }

        let values: HashMap<String, String> = self
            .fields
            .iter()
            .filter(|f| filters.contains_key(f.name()))
            .map(|f| (f.name().to_string(), f.value().unwrap_or_default().to_string()))
            .collect();

        for (name, value) in engine.sanitize(&values, &filters) {
            let Some(&idx) = self.index.get(&name) else {
                continue;
            };
            let field = &mut self.fields[idx];
            // Unset values stay unset unless the filters produced something.
            if filters.contains_key(&name) && (field.value().is_some() || !value.is_empty()) {
                field.set_value(value);
            }
        }
    }

    /// Returns the first `matches` target whose value differs from `field`'s.
    fn mismatched_target(&self, field: &Field) -> Result<Option<&Field>> {
        for target in field.match_targets() {
            let other = self
                .get(target)
                .ok_or_else(|| FieldsetError::UnknownMatchTarget {
                    field: field.name().to_string(),
                    target: target.to_string(),
                })?;
            if field.value().unwrap_or_default() != other.value().unwrap_or_default() {
                return Ok(Some(other));
            }
        }
        Ok(None)
    }

    /// Returns the error log of the last validation pass.
    ///
    /// # Errors
    ///
    /// Returns [`FieldsetError::NotValidated`] if no pass has run.
    pub fn errors(&self) -> Result<&[ErrorRecord]> {
        match &self.state {
            ValidationState::Validated(records) => Ok(records),
            ValidationState::Unvalidated => Err(FieldsetError::NotValidated),
        }
    }

    /// Returns whether the last validation pass found errors.
    ///
    /// # Errors
    ///
    /// Returns [`FieldsetError::NotValidated`] if no pass has run.
    pub fn has_errors(&self) -> Result<bool> {
        Ok(!self.errors()?.is_empty())
    }

    /// Returns the error recorded for a field in the last pass.
    ///
    /// # Errors
    ///
    /// Returns [`FieldsetError::NotValidated`] if no pass has run.
    pub fn error_for(&self, name: &str) -> Result<Option<&ErrorRecord>> {
        Ok(self.errors()?.iter().find(|r| r.field == name))
    }

    /// Renders a field by name.
    ///
    /// # Errors
    ///
    /// Returns [`FieldsetError::FieldNotFound`] for unknown names.
    pub fn render(&self, name: &str, classes: Option<&str>, attrs: &[(&str, &str)]) -> Result<String> {
        self.get(name)
            .map(|field| field.render(classes, attrs))
            .ok_or_else(|| FieldsetError::FieldNotFound(name.to_string()))
    }

    /// Renders the error log as a list inside the error container.
    ///
    /// Returns an empty string when the last pass found no errors.
    ///
    /// # Errors
    ///
    /// Returns [`FieldsetError::NotValidated`] if no pass has run.
    pub fn render_errors(&self) -> Result<String> {
        let records = self.errors()?;
        if records.is_empty() {
            return Ok(String::new());
        }

        let class = self.error_class.as_deref().unwrap_or(DEFAULT_ERROR_CLASS);
        Ok(html! { div.class(#class) }
            .child::<Ul, _>(|ul| {
                ul.children(records.iter(), |record, li: Element<Li>| {
                    li.text(&record.message)
                })
            })
            .render())
    }

    /// Returns the client-script validation entries, one per field.
    #[must_use]
    pub fn validation_script_data(&self) -> Vec<ScriptRule> {
        self.fields
            .iter()
            .map(|f| ScriptRule {
                name: f.name().to_string(),
                display: f.label().to_string(),
                rules: f.rules().client_rules(),
            })
            .collect()
    }

    /// Returns [`FieldRegistry::validation_script_data`] as a JSON array.
    ///
    /// # Errors
    ///
    /// Returns [`FieldsetError::Json`] if serialization fails.
    pub fn validation_script_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.validation_script_data())?)
    }
}

/// Builder for a [`FieldRegistry`].
#[derive(Debug, Default)]
pub struct FieldRegistryBuilder {
    messages: Option<MessageCatalog>,
    error_class: Option<String>,
}

impl FieldRegistryBuilder {
    /// Uses a custom message catalog.
    #[must_use]
    pub fn messages(mut self, catalog: MessageCatalog) -> Self {
        self.messages = Some(catalog);
        self
    }

    /// Sets the CSS class of the error block container.
    #[must_use]
    pub fn error_class(mut self, class: impl Into<String>) -> Self {
        self.error_class = Some(class.into());
        self
    }

    /// Builds the registry.
    #[must_use]
    pub fn build(self) -> FieldRegistry {
        FieldRegistry {
            messages: self.messages.unwrap_or_default(),
            error_class: self.error_class,
            ..FieldRegistry::default()
        }
    }
}
