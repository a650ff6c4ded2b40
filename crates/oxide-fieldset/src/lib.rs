//! # oxide-fieldset
//!
//! Form field registry with dual-dialect rule translation and HTML widgets.
//!
//! This crate provides:
//! - A rule translator turning one rule specification into matching
//!   server-evaluator and client-script rule strings
//! - Seven field kinds sharing one field record and render contract
//! - A registry driving sanitization and validation through a pluggable
//!   [`RuleEngine`]
//! - Message templates for broken rules
//!
//! ## Quick Start
//!
//! ```rust
//! use oxide_fieldset::{FieldRegistry, FieldSpec};
//!
//! let mut registry = FieldRegistry::new();
//! registry
//!     .register(
//!         FieldSpec::new("username", "Username", "text")
//!             .rules("required|min_len,5"),
//!     )
//!     .unwrap();
//!
//! let field = registry.get("username").unwrap();
//! assert_eq!(field.rules().server_rules(), "required|min_len,5");
//! assert_eq!(field.rules().client_rules(), "required|min_length[5]");
//! ```
//!
//! ## Rule Translation
//!
//! Parameterised rules may be written in either dialect; the output is the
//! same.
//!
//! ```rust
//! use oxide_fieldset::RuleSet;
//!
//! let a = RuleSet::parse("required|max_len,20|float").unwrap();
//! let b = RuleSet::parse("required|max_length[20]|decimal").unwrap();
//! assert_eq!(a, b);
//! assert_eq!(b.server_rules(), "required|max_len,20|float");
//! assert_eq!(a.client_rules(), "required|max_length[20]|decimal");
//!
//! assert!(RuleSet::parse("required|bogus_rule").is_err());
//! ```
//!
//! ## Validation
//!
//! ```rust
//! use std::collections::HashMap;
//! use oxide_fieldset::{BrokenRule, FieldRegistry, FieldSpec, RuleEngine};
//!
//! /// Engine that only knows `required`.
//! struct RequiredOnly;
//!
//! impl RuleEngine for RequiredOnly {
//!     fn sanitize(
//!         &self,
//!         values: &HashMap<String, String>,
//!         _filters: &HashMap<String, String>,
//!     ) -> HashMap<String, String> {
//!         values.clone()
//!     }
//!
//!     fn evaluate(&self, value: &str, rules: &str) -> Vec<BrokenRule> {
//!         if rules.split('|').any(|r| r == "required") && value.is_empty() {
//!             vec![BrokenRule::new("validate_required")]
//!         } else {
//!             Vec::new()
//!         }
//!     }
//! }
//!
//! let mut registry = FieldRegistry::new();
//! registry
//!     .register(FieldSpec::new("email", "Email", "text").rules("required|valid_email"))
//!     .unwrap();
//!
//! assert!(registry.errors().is_err()); // not validated yet
//! assert!(!registry.validate(&RequiredOnly).unwrap());
//! let errors = registry.errors().unwrap();
//! assert_eq!(errors[0].message, "The Email field is required");
//! ```
//!
//! ## Field Kinds
//!
//! | Kind          | Type tokens                                    |
//! |---------------|------------------------------------------------|
//! | `Text`        | `text`, `text_field`, `fields::text_field`     |
//! | `Password`    | `password`, `password_field`                   |
//! | `Checkbox`    | `checkbox`                                     |
//! | `SelectMenu`  | `select`, `dropmenu`, `select_menu`            |
//! | `RadioSeries` | `radio`, `radio_series`                        |
//! | `Textarea`    | `textarea`                                     |
//! | `FileUpload`  | `upload`, `file`, `file_upload`                |

mod engine;
mod error;
pub mod fields;
pub mod messages;
mod registry;
pub mod rules;
pub mod widgets;

pub use engine::{BrokenRule, RuleEngine};
pub use error::{FieldsetError, Result};
pub use fields::{Field, FieldKind, ValidationOutcome};
pub use messages::{ErrorRecord, MessageCatalog, MessageTemplate};
pub use registry::{FieldRegistry, FieldRegistryBuilder, FieldSpec, ScriptRule, DEFAULT_ERROR_CLASS};
pub use rules::{ClientDialect, Constraint, ConstraintKind, RuleDialect, RuleSet, ServerDialect};
