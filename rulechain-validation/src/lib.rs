//! Rule-chain validation engine
//!
//! Validates one record against per-field rule chains such as
//! `"required|numeric|min:10"` and returns field-keyed error messages.
//!
//! # Examples
//!
//! ## Hand-written record
//!
//! ```
//! use rulechain_validation::{FieldAccess, FieldSpec, FieldValue, Record, Validate};
//!
//! struct Signup {
//!     email: String,
//!     age: String,
//! }
//!
//! impl FieldAccess for Signup {
//!     fn field(&self, key: &str) -> Option<FieldValue> {
//!         match key {
//!             "email" => Some(self.email.as_str().into()),
//!             "age" => Some(self.age.as_str().into()),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! impl Record for Signup {
//!     fn field_specs(&self) -> Vec<FieldSpec<'_>> {
//!         vec![
//!             FieldSpec::new("email", "email", "required|email"),
//!             FieldSpec::new("age", "age", "numeric|min:18"),
//!         ]
//!     }
//! }
//!
//! let input = Signup {
//!     email: "john@example.com".to_string(),
//!     age: "16".to_string(),
//! };
//!
//! let result = input.validate();
//! let errors = result.errors().unwrap();
//! assert_eq!(errors.messages("age"), vec!["The age must be at least 18."]);
//! ```
//!
//! ## Runtime schema
//!
//! ```
//! use rulechain_validation::{Schema, SchemaField, Validator, ValidatorConfig};
//!
//! let schema = Schema::new()
//!     .field(SchemaField::new("username", "required|alpha_dash|between:3,12"))
//!     .field(SchemaField::new("password", "required|string|min:8"));
//!
//! let record = schema.bind(&serde_json::json!({"username": "jo", "password": ""}));
//! let result = Validator::with_config(ValidatorConfig::fail_fast()).validate(&record);
//!
//! assert_eq!(
//!     result.to_json(),
//!     serde_json::json!({
//!         "valid": false,
//!         "errors": {
//!             "username": "The username must be between 3 and 12 characters.",
//!             "password": "The password field is required."
//!         }
//!     })
//! );
//! ```
//!
//! ## Parsing chains
//!
//! ```
//! use rulechain_validation::RuleChain;
//!
//! let chain = RuleChain::parse("required_if:type,admin|email");
//! assert_eq!(chain.directives()[0].params(), ["type", "admin"]);
//! assert_eq!(chain.to_string(), "required_if:type,admin|email");
//! ```

mod config;
mod errors;
mod evaluator;
pub mod humanize;
mod parser;
pub mod predicates;
mod record;
pub mod rules;
mod schema;
mod validator;
mod value;

pub use config::*;
pub use errors::*;
pub use evaluator::*;
pub use parser::*;
pub use record::*;
pub use rules::{RuleContext, RuleHandler, RuleRegistry, ValueClass, Verdict};
pub use schema::*;
pub use validator::*;
pub use value::*;
