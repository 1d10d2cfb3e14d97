// Validation results

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Messages collected for one field.
///
/// Fail-fast evaluation yields `Single`; accumulate mode yields `Many`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldErrors {
    Single(String),
    Many(Vec<String>),
}

impl FieldErrors {
    /// All messages in order
    pub fn messages(&self) -> Vec<&str> {
        match self {
            FieldErrors::Single(message) => vec![message.as_str()],
            FieldErrors::Many(messages) => messages.iter().map(String::as_str).collect(),
        }
    }

    /// First message
    pub fn first(&self) -> Option<&str> {
        match self {
            FieldErrors::Single(message) => Some(message.as_str()),
            FieldErrors::Many(messages) => messages.first().map(String::as_str),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            FieldErrors::Single(_) => 1,
            FieldErrors::Many(messages) => messages.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append another field's messages, promoting to `Many`.
    pub fn merge(&mut self, other: FieldErrors) {
        let mut merged: Vec<String> = match std::mem::replace(self, FieldErrors::Many(Vec::new())) {
            FieldErrors::Single(message) => vec![message],
            FieldErrors::Many(messages) => messages,
        };
        match other {
            FieldErrors::Single(message) => merged.push(message),
            FieldErrors::Many(mut messages) => merged.append(&mut messages),
        }
        *self = FieldErrors::Many(merged);
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages().join(" "))
    }
}

/// Field-keyed errors for one record. Only failing fields appear.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    fields: BTreeMap<String, FieldErrors>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record errors under `key`, merging with any already present.
    pub fn add(&mut self, key: impl Into<String>, errors: FieldErrors) {
        let key = key.into();
        match self.fields.get_mut(&key) {
            Some(existing) => existing.merge(errors),
            None => {
                self.fields.insert(key, errors);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of failing fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Errors for one external key
    pub fn get(&self, key: &str) -> Option<&FieldErrors> {
        self.fields.get(key)
    }

    /// Messages for one external key; empty if the field passed
    pub fn messages(&self, key: &str) -> Vec<&str> {
        self.fields
            .get(key)
            .map(FieldErrors::messages)
            .unwrap_or_default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldErrors)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Convert to JSON representation
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({ "errors": self })
    }

    pub fn into_inner(self) -> BTreeMap<String, FieldErrors> {
        self.fields
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, errors) in &self.fields {
            for message in errors.messages() {
                writeln!(f, "{}: {}", key, message)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl From<BTreeMap<String, FieldErrors>> for ValidationErrors {
    fn from(fields: BTreeMap<String, FieldErrors>) -> Self {
        Self { fields }
    }
}

/// Outcome of validating one record.
///
/// `Valid` is distinct from an empty error map so callers can tell
/// "validated, no problems" apart from "not validated yet".
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum ValidationResult {
    Valid,
    Invalid(ValidationErrors),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    pub fn is_invalid(&self) -> bool {
        !self.is_valid()
    }

    pub fn errors(&self) -> Option<&ValidationErrors> {
        match self {
            ValidationResult::Valid => None,
            ValidationResult::Invalid(errors) => Some(errors),
        }
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        match self {
            ValidationResult::Valid => Ok(()),
            ValidationResult::Invalid(errors) => Err(errors),
        }
    }

    /// `{"valid": true}` or `{"valid": false, "errors": {...}}`
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            ValidationResult::Valid => serde_json::json!({ "valid": true }),
            ValidationResult::Invalid(errors) => {
                serde_json::json!({ "valid": false, "errors": errors })
            }
        }
    }
}

impl From<ValidationErrors> for ValidationResult {
    fn from(errors: ValidationErrors) -> Self {
        if errors.is_empty() {
            ValidationResult::Valid
        } else {
            ValidationResult::Invalid(errors)
        }
    }
}
