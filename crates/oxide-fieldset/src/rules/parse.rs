//! Rule token parser.

use std::sync::LazyLock;

use regex::Regex;

use super::{Constraint, ConstraintKind, ParamKind};
use crate::error::{FieldsetError, Result};

/// `name`, `name,param` or `name[param]`.
static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<name>[a-z_]+)(?:,(?P<comma>.+)|\[(?P<bracket>[^\[\]]+)\])?$")
        .expect("rule token pattern is valid")
});

static COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("count pattern is valid"));

static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d+(?:\.\d+)?$").expect("number pattern is valid"));

static FIELD_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.\-]+$").expect("field name pattern is valid"));

/// Parses one trimmed, non-empty rule token.
pub(super) fn parse_token(token: &str) -> Result<Constraint> {
    let unrecognized = || FieldsetError::UnrecognizedRule {
        token: token.to_string(),
    };

    let caps = TOKEN.captures(token).ok_or_else(unrecognized)?;
    let kind = ConstraintKind::from_name(&caps["name"]).ok_or_else(unrecognized)?;
    let param = caps
        .name("comma")
        .or_else(|| caps.name("bracket"))
        .map(|m| m.as_str().trim());

    let accepted = match (kind.param_kind(), param) {
        (ParamKind::None, None) => true,
        (ParamKind::Count, Some(p)) => COUNT.is_match(p),
        (ParamKind::Number, Some(p)) => NUMBER.is_match(p),
        (ParamKind::FieldName, Some(p)) => FIELD_NAME.is_match(p),
        _ => false,
    };
    if !accepted {
        return Err(unrecognized());
    }

    Ok(Constraint {
        kind,
        param: param.map(str::to_string),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unrecognized(token: &str) -> bool {
        matches!(
            parse_token(token),
            Err(FieldsetError::UnrecognizedRule { token: t }) if t == token
        )
    }

    #[test]
    fn test_bare_tokens() {
        assert_eq!(
            parse_token("valid_email").unwrap(),
            Constraint::bare(ConstraintKind::ValidEmail)
        );
        assert_eq!(
            parse_token("is_natural_no_zero").unwrap(),
            Constraint::bare(ConstraintKind::IsNaturalNoZero)
        );
    }

    #[test]
    fn test_both_parameter_syntaxes() {
        let expected = Constraint::with_param(ConstraintKind::MaxLength, "10");
        assert_eq!(parse_token("max_len,10").unwrap(), expected);
        assert_eq!(parse_token("max_length[10]").unwrap(), expected);
        assert_eq!(parse_token("max_len[10]").unwrap(), expected);
        assert_eq!(parse_token("max_length,10").unwrap(), expected);
    }

    #[test]
    fn test_numeric_comparisons() {
        assert_eq!(
            parse_token("greater_than,-2.5").unwrap(),
            Constraint::with_param(ConstraintKind::GreaterThan, "-2.5")
        );
        assert_eq!(
            parse_token("less_than[100]").unwrap(),
            Constraint::with_param(ConstraintKind::LessThan, "100")
        );
    }

    #[test]
    fn test_matches_takes_field_name() {
        assert_eq!(
            parse_token("matches[password]").unwrap(),
            Constraint::with_param(ConstraintKind::Matches, "password")
        );
        assert!(unrecognized("matches"));
    }

    #[test]
    fn test_rejections() {
        assert!(unrecognized("bogus_rule"));
        assert!(unrecognized("Required"));
        assert!(unrecognized("required,5"));
        assert!(unrecognized("min_len"));
        assert!(unrecognized("min_len,abc"));
        assert!(unrecognized("min_len,-1"));
        assert!(unrecognized("min_length[5"));
        assert!(unrecognized("greater_than[1e3]"));
    }
}
