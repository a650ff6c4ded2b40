//! The rule engine seam.
//!
//! Sanitizing values and checking a value against a rule string are done by
//! an external engine. The registry talks to it through [`RuleEngine`] and
//! only ever hands it rules in the server dialect.

use std::collections::HashMap;

/// A rule reported as broken by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokenRule {
    /// Broken-rule identifier, conventionally `validate_<rule name>`.
    pub rule: String,
}

impl BrokenRule {
    /// Creates a broken rule report.
    #[must_use]
    pub fn new(rule: impl Into<String>) -> Self {
        Self { rule: rule.into() }
    }
}

/// Trait for the engine that sanitizes and evaluates field values.
pub trait RuleEngine {
    /// Applies filter specifications to values in one batch.
    ///
    /// Both maps are keyed by field name. Names missing from the result keep
    /// their previous value.
    fn sanitize(
        &self,
        values: &HashMap<String, String>,
        filters: &HashMap<String, String>,
    ) -> HashMap<String, String>;

    /// Checks one value against a server-dialect rule string.
    ///
    /// An empty result means the value passed.
    fn evaluate(&self, value: &str, rules: &str) -> Vec<BrokenRule>;
}
