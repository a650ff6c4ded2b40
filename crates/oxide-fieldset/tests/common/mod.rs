#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;

use regex::Regex;

use oxide_fieldset::{BrokenRule, FieldRegistry, FieldSpec, RuleEngine};

/// A small deterministic rule engine.
///
/// Understands a subset of the server dialect and records every call so
/// tests can assert on what the registry handed over.
#[derive(Default)]
pub struct FakeEngine {
    pub evaluated: RefCell<Vec<(String, String)>>,
    pub sanitized: RefCell<Vec<HashMap<String, String>>>,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn evaluate_calls(&self) -> usize {
        self.evaluated.borrow().len()
    }

    pub fn sanitize_calls(&self) -> usize {
        self.sanitized.borrow().len()
    }

    fn holds(name: &str, param: Option<&str>, value: &str) -> bool {
        if name == "required" {
            return !value.trim().is_empty();
        }
        if value.is_empty() {
            return true;
        }
        let len = value.chars().count();
        let count = || param.and_then(|p| p.parse::<usize>().ok()).unwrap_or(0);
        let number = || param.and_then(|p| p.parse::<f64>().ok()).unwrap_or(0.0);
        match name {
            "min_len" => len >= count(),
            "max_len" => len <= count(),
            "exact_len" => len == count(),
            "alpha" => Regex::new(r"^[A-Za-z]+$").unwrap().is_match(value),
            "numeric" => Regex::new(r"^-?\d+(\.\d+)?$").unwrap().is_match(value),
            "valid_email" => Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
                .unwrap()
                .is_match(value),
            "greater_than" => value.parse::<f64>().is_ok_and(|v| v > number()),
            "less_than" => value.parse::<f64>().is_ok_and(|v| v < number()),
            _ => true,
        }
    }
}

impl RuleEngine for FakeEngine {
    fn sanitize(
        &self,
        values: &HashMap<String, String>,
        filters: &HashMap<String, String>,
    ) -> HashMap<String, String> {
        self.sanitized.borrow_mut().push(values.clone());
        values
            .iter()
            .map(|(name, value)| {
                let mut value = value.clone();
                for filter in filters.get(name).map_or("", String::as_str).split('|') {
                    value = match filter {
                        "trim" => value.trim().to_string(),
                        "lower" => value.to_lowercase(),
                        _ => value,
                    };
                }
                (name.clone(), value)
            })
            .collect()
    }

    fn evaluate(&self, value: &str, rules: &str) -> Vec<BrokenRule> {
        self.evaluated
            .borrow_mut()
            .push((value.to_string(), rules.to_string()));
        rules
            .split('|')
            .filter_map(|rule| {
                let (name, param) = match rule.split_once(',') {
                    Some((name, param)) => (name, Some(param)),
                    None => (rule, None),
                };
                (!Self::holds(name, param, value)).then(|| BrokenRule::new(format!("validate_{name}")))
            })
            .collect()
    }
}

/// An engine that reports the same broken rule for every value.
pub struct StubbornEngine(pub &'static str);

impl RuleEngine for StubbornEngine {
    fn sanitize(
        &self,
        values: &HashMap<String, String>,
        _filters: &HashMap<String, String>,
    ) -> HashMap<String, String> {
        values.clone()
    }

    fn evaluate(&self, _value: &str, _rules: &str) -> Vec<BrokenRule> {
        vec![BrokenRule::new(self.0)]
    }
}

/// A registry with a typical signup form.
pub fn signup_registry() -> FieldRegistry {
    let mut registry = FieldRegistry::new();
    registry
        .register_bulk(vec![
            FieldSpec::new("username", "Username", "text")
                .rules("required|min_len,5|max_length[20]")
                .sanitize("trim"),
            FieldSpec::new("email", "Email", "text-field")
                .rules("required|valid_email")
                .sanitize("trim|lower"),
            FieldSpec::new("password", "Password", "password").rules("required|min_length[8]"),
            FieldSpec::new("confirm", "Confirm password", "password")
                .rules("required|matches[password]"),
            FieldSpec::new("plan", "Plan", "dropmenu")
                .rules("required")
                .option("free", "Free")
                .option("pro", "Pro"),
            FieldSpec::new("terms", "Terms", "checkbox"),
        ])
        .unwrap_or_else(|e| panic!("signup form failed to register: {e}"));
    registry
}

/// Valid values for [`signup_registry`].
pub fn valid_signup() -> Vec<(&'static str, &'static str)> {
    vec![
        ("username", "  grace  "),
        ("email", " Grace@Example.com "),
        ("password", "hopper1906"),
        ("confirm", "hopper1906"),
        ("plan", "pro"),
        ("terms", "1"),
    ]
}
