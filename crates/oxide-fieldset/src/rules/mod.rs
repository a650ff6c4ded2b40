//! Validation rules.
//!
//! A raw rule specification such as `"required|min_len,5"` is parsed once into
//! a [`RuleSet`]: an ordered list of typed [`Constraint`]s. The two textual
//! forms consumers need (the server-side evaluator dialect and the
//! client-script dialect) are rendered from that list on demand through
//! [`RuleDialect`] implementations, so both always carry the same
//! constraints in the same order.

mod dialect;
mod parse;

pub use dialect::{ClientDialect, RuleDialect, ServerDialect};

use crate::error::Result;

/// The closed catalog of constraints understood by both dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    Required,
    Alpha,
    AlphaNumeric,
    AlphaDash,
    Numeric,
    Integer,
    Boolean,
    /// `float` on the server, `decimal` in client scripts.
    Float,
    ValidEmail,
    ValidEmails,
    IsNatural,
    IsNaturalNoZero,
    ValidIp,
    ValidBase64,
    ValidCc,
    ValidUrl,
    ValidName,
    UrlExists,
    MinLength,
    MaxLength,
    ExactLength,
    GreaterThan,
    LessThan,
    /// Equality with another field's value.
    Matches,
}

/// Shape of the parameter a constraint takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// No parameter.
    None,
    /// A non-negative integer (lengths).
    Count,
    /// An optionally signed decimal number.
    Number,
    /// The name of another field.
    FieldName,
}

impl ConstraintKind {
    /// Every constraint in the catalog.
    pub const ALL: [Self; 24] = [
        Self::Required,
        Self::Alpha,
        Self::AlphaNumeric,
        Self::AlphaDash,
        Self::Numeric,
        Self::Integer,
        Self::Boolean,
        Self::Float,
        Self::ValidEmail,
        Self::ValidEmails,
        Self::IsNatural,
        Self::IsNaturalNoZero,
        Self::ValidIp,
        Self::ValidBase64,
        Self::ValidCc,
        Self::ValidUrl,
        Self::ValidName,
        Self::UrlExists,
        Self::MinLength,
        Self::MaxLength,
        Self::ExactLength,
        Self::GreaterThan,
        Self::LessThan,
        Self::Matches,
    ];

    /// Looks up a constraint by either dialect's spelling.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| {
            ServerDialect.rule_name(*kind) == name || ClientDialect.rule_name(*kind) == name
        })
    }

    /// Returns the parameter shape for this constraint.
    #[must_use]
    pub const fn param_kind(self) -> ParamKind {
        match self {
            Self::MinLength | Self::MaxLength | Self::ExactLength => ParamKind::Count,
            Self::GreaterThan | Self::LessThan => ParamKind::Number,
            Self::Matches => ParamKind::FieldName,
            _ => ParamKind::None,
        }
    }

    /// Returns whether the constraint takes a parameter.
    #[must_use]
    pub const fn takes_param(self) -> bool {
        !matches!(self.param_kind(), ParamKind::None)
    }

    /// Returns whether the constraint needs another field's value and so
    /// cannot be handed to a single-field evaluator.
    #[must_use]
    pub const fn is_cross_field(self) -> bool {
        matches!(self, Self::Matches)
    }
}

/// One entry of a rule set: a constraint and its parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    /// The constraint.
    pub kind: ConstraintKind,
    /// The parameter exactly as the caller wrote it.
    pub param: Option<String>,
}

impl Constraint {
    /// Creates a constraint without parameter.
    #[must_use]
    pub const fn bare(kind: ConstraintKind) -> Self {
        Self { kind, param: None }
    }

    /// Creates a constraint with a parameter.
    #[must_use]
    pub fn with_param(kind: ConstraintKind, param: impl Into<String>) -> Self {
        Self {
            kind,
            param: Some(param.into()),
        }
    }
}

/// The ordered, immutable constraints of one field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    constraints: Vec<Constraint>,
}

impl RuleSet {
    /// Parses a raw `|`-separated rule specification.
    ///
    /// Tokens may use either dialect's spelling and parameter syntax
    /// (`min_len,5` or `min_length[5]`). An empty specification yields an
    /// empty rule set.
    ///
    /// # Errors
    ///
    /// Returns [`FieldsetError::UnrecognizedRule`](crate::FieldsetError::UnrecognizedRule)
    /// for the first token outside the catalog.
    pub fn parse(raw: &str) -> Result<Self> {
        let constraints = raw
            .split(ServerDialect.separator())
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(parse::parse_token)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { constraints })
    }

    /// Returns the constraints in specification order.
    #[must_use]
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Iterates over the constraints.
    #[must_use]
    pub fn iter(&self) -> std::slice::Iter<'_, Constraint> {
        self.constraints.iter()
    }

    /// Returns the number of constraints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    /// Returns whether there are no constraints.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Returns the first constraint of the given kind.
    #[must_use]
    pub fn find(&self, kind: ConstraintKind) -> Option<&Constraint> {
        self.constraints.iter().find(|c| c.kind == kind)
    }

    /// Renders the full rule set in the server dialect.
    #[must_use]
    pub fn server_rules(&self) -> String {
        ServerDialect.render(self.iter())
    }

    /// Renders the full rule set in the client-script dialect.
    #[must_use]
    pub fn client_rules(&self) -> String {
        ClientDialect.render(self.iter())
    }

    /// Renders the constraints a single-field evaluator can check, in the
    /// server dialect.
    #[must_use]
    pub fn evaluator_rules(&self) -> String {
        ServerDialect.render(self.iter().filter(|c| !c.kind.is_cross_field()))
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Constraint;
    type IntoIter = std::slice::Iter<'a, Constraint>;

    fn into_iter(self) -> Self::IntoIter {
        self.constraints.iter()
    }
}
