//! Signup Form Example
//!
//! Registers a small signup form, validates a submission with a toy rule
//! engine and prints the markup, the errors and the client-script rules.
//! Run with: cargo run --example signup_form

use std::collections::HashMap;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use oxide_fieldset::{BrokenRule, FieldRegistry, RuleEngine};

/// Engine that understands `required` and `min_len` and the `trim` filter.
struct ToyEngine;

impl RuleEngine for ToyEngine {
    fn sanitize(
        &self,
        values: &HashMap<String, String>,
        filters: &HashMap<String, String>,
    ) -> HashMap<String, String> {
        values
            .iter()
            .map(|(name, value)| {
                let trim = filters.get(name).is_some_and(|f| f.split('|').any(|f| f == "trim"));
                let value = if trim { value.trim() } else { value.as_str() };
                (name.clone(), value.to_string())
            })
            .collect()
    }

    fn evaluate(&self, value: &str, rules: &str) -> Vec<BrokenRule> {
        rules
            .split('|')
            .filter(|rule| match rule.split_once(',') {
                Some(("min_len", n)) => n.parse().is_ok_and(|n: usize| value.chars().count() < n),
                _ => *rule == "required" && value.is_empty(),
            })
            .map(|rule| {
                let name = rule.split(',').next().unwrap_or(rule);
                BrokenRule::new(format!("validate_{name}"))
            })
            .collect()
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut registry = FieldRegistry::new();
    registry.register_json(
        r#"[
            {"name": "username", "label": "Username", "type": "text",
             "rules": "required|min_len,5|alpha_dash", "sanitize": "trim"},
            {"name": "password", "label": "Password", "type": "password",
             "rules": "required|min_length[8]"},
            {"name": "confirm", "label": "Confirm password", "type": "password",
             "rules": "required|matches[password]"},
            {"name": "plan", "label": "Plan", "type": "dropmenu", "rules": "required",
             "options": [["free", "Free"], ["pro", "Pro"]]},
            {"name": "newsletter", "label": "Newsletter", "type": "checkbox"}
        ]"#,
    )?;

    registry.pass_values([
        ("username", "  ada "),
        ("password", "analytical"),
        ("confirm", "analytic"),
        ("plan", "pro"),
        ("newsletter", "1"),
    ]);

    let passed = registry.validate(&ToyEngine)?;
    info!(passed, "submission checked");

    for field in registry.fields() {
        println!("{}", registry.render(field.name(), Some("form-control"), &[])?);
    }
    println!("{}", registry.render_errors()?);
    println!("{}", registry.validation_script_json()?);

    Ok(())
}
