//! Rule dialects.
//!
//! The server evaluator and client scripts spell some rules differently and
//! use different parameter syntax. This module provides a trait for the
//! dialect-specific parts of rendering a rule string.

use super::{Constraint, ConstraintKind};

/// Trait for rule dialect-specific behavior.
pub trait RuleDialect {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns the canonical spelling of a constraint.
    fn rule_name(&self, kind: ConstraintKind) -> &'static str;

    /// Formats a rule name together with its parameter.
    fn with_param(&self, name: &str, param: &str) -> String;

    /// Returns the separator placed between rules.
    fn separator(&self) -> &'static str {
        "|"
    }

    /// Returns the rule string meaning "no constraints".
    fn empty(&self) -> &'static str {
        ""
    }

    /// Formats a single constraint.
    fn format(&self, constraint: &Constraint) -> String {
        let name = self.rule_name(constraint.kind);
        match &constraint.param {
            Some(param) => self.with_param(name, param),
            None => name.to_string(),
        }
    }

    /// Renders constraints as a rule string.
    fn render<'a, I>(&self, constraints: I) -> String
    where
        I: IntoIterator<Item = &'a Constraint>,
        Self: Sized,
    {
        let parts: Vec<String> = constraints.into_iter().map(|c| self.format(c)).collect();
        if parts.is_empty() {
            self.empty().to_string()
        } else {
            parts.join(self.separator())
        }
    }
}

/// The server-side evaluator dialect (`min_len,5`).
#[derive(Debug, Default, Clone, Copy)]
pub struct ServerDialect;

impl ServerDialect {
    /// Prefix the evaluator puts in front of broken-rule identifiers.
    pub const BROKEN_RULE_PREFIX: &'static str = "validate_";

    /// Reduces an evaluator broken-rule identifier to a bare rule name.
    ///
    /// Identifiers without the prefix are returned unchanged.
    #[must_use]
    pub fn strip_broken_rule(identifier: &str) -> &str {
        identifier
            .strip_prefix(Self::BROKEN_RULE_PREFIX)
            .unwrap_or(identifier)
    }

    /// Builds the broken-rule identifier for a constraint.
    #[must_use]
    pub fn broken_rule(kind: ConstraintKind) -> String {
        format!("{}{}", Self::BROKEN_RULE_PREFIX, Self.rule_name(kind))
    }
}

impl RuleDialect for ServerDialect {
    fn name(&self) -> &'static str {
        "server"
    }

    fn rule_name(&self, kind: ConstraintKind) -> &'static str {
        match kind {
            ConstraintKind::Float => "float",
            ConstraintKind::MinLength => "min_len",
            ConstraintKind::MaxLength => "max_len",
            ConstraintKind::ExactLength => "exact_len",
            other => shared_name(other),
        }
    }

    fn with_param(&self, name: &str, param: &str) -> String {
        format!("{name},{param}")
    }
}

/// The client-script dialect (`min_length[5]`).
#[derive(Debug, Default, Clone, Copy)]
pub struct ClientDialect;

impl RuleDialect for ClientDialect {
    fn name(&self) -> &'static str {
        "client"
    }

    fn rule_name(&self, kind: ConstraintKind) -> &'static str {
        match kind {
            ConstraintKind::Float => "decimal",
            ConstraintKind::MinLength => "min_length",
            ConstraintKind::MaxLength => "max_length",
            ConstraintKind::ExactLength => "exact_length",
            other => shared_name(other),
        }
    }

    fn with_param(&self, name: &str, param: &str) -> String {
        format!("{name}[{param}]")
    }
}

/// Spelling of the rules both dialects agree on.
const fn shared_name(kind: ConstraintKind) -> &'static str {
    match kind {
        ConstraintKind::Required => "required",
        ConstraintKind::Alpha => "alpha",
        ConstraintKind::AlphaNumeric => "alpha_numeric",
        ConstraintKind::AlphaDash => "alpha_dash",
        ConstraintKind::Numeric => "numeric",
        ConstraintKind::Integer => "integer",
        ConstraintKind::Boolean => "boolean",
        ConstraintKind::ValidEmail => "valid_email",
        ConstraintKind::ValidEmails => "valid_emails",
        ConstraintKind::IsNatural => "is_natural",
        ConstraintKind::IsNaturalNoZero => "is_natural_no_zero",
        ConstraintKind::ValidIp => "valid_ip",
        ConstraintKind::ValidBase64 => "valid_base64",
        ConstraintKind::ValidCc => "valid_cc",
        ConstraintKind::ValidUrl => "valid_url",
        ConstraintKind::ValidName => "valid_name",
        ConstraintKind::UrlExists => "url_exists",
        ConstraintKind::GreaterThan => "greater_than",
        ConstraintKind::LessThan => "less_than",
        ConstraintKind::Matches => "matches",
        // Dialect-specific names are resolved by each dialect first.
        ConstraintKind::Float => "float",
        ConstraintKind::MinLength => "min_len",
        ConstraintKind::MaxLength => "max_len",
        ConstraintKind::ExactLength => "exact_len",
    }
}
