//! Error types for field registration, validation and message loading.

use thiserror::Error;

/// Fieldset-specific errors.
///
/// Every variant is a fatal condition for the step that produced it. Failed
/// field validation is not an error; it is reported through
/// [`ErrorRecord`](crate::ErrorRecord)s.
#[derive(Debug, Error)]
pub enum FieldsetError {
    /// A rule token matched no catalog entry.
    #[error("unrecognized rule: '{token}'")]
    UnrecognizedRule {
        /// The offending token, as written by the caller.
        token: String,
    },

    /// A field type token resolved to no field kind.
    #[error("unresolved field type: '{0}'")]
    UnresolvedFieldType(String),

    /// A field with the same name is already registered.
    #[error("duplicate field: {0}")]
    DuplicateField(String),

    /// No field is registered under this name.
    #[error("field not found: {0}")]
    FieldNotFound(String),

    /// The error log was read before any validation pass ran.
    #[error("errors are not available before the form has been validated")]
    NotValidated,

    /// A `matches` rule names a field that is not registered.
    #[error("field {field} must match unknown field {target}")]
    UnknownMatchTarget {
        /// The field carrying the rule.
        field: String,
        /// The missing field it refers to.
        target: String,
    },

    /// A message catalog lacks a template for a rule.
    #[error("missing message template for rule {0}")]
    MissingTemplate(String),

    /// A template declares more placeholders than its rule can fill.
    #[error("template for rule {rule} has {found} placeholders, at most {expected} allowed")]
    InvalidTemplate {
        /// The rule the template belongs to.
        rule: String,
        /// Number of values substitution provides.
        expected: usize,
        /// Number of placeholders in the template.
        found: usize,
    },

    /// A message override names a rule outside the catalog.
    #[error("message template for unknown rule: {0}")]
    UnknownTemplateRule(String),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for fieldset operations.
pub type Result<T> = std::result::Result<T, FieldsetError>;
