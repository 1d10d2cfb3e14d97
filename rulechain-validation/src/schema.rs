// Runtime field declarations

use crate::{FieldAccess, FieldSpec, FieldValue, Record};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One field of a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaField {
    /// Internal key
    pub name: String,
    /// External key; defaults to `name`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Rule-chain encoding
    #[serde(default)]
    pub rules: String,
}

impl SchemaField {
    pub fn new(name: impl Into<String>, rules: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
            rules: rules.into(),
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// External key
    pub fn key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

/// Side table of field declarations, for records that are not Rust structs.
///
/// ```toml
/// [[fields]]
/// name = "email"
/// rules = "required|email"
///
/// [[fields]]
/// name = "password_confirmation"
/// alias = "passwordConfirmation"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default)]
    pub fields: Vec<SchemaField>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, field: SchemaField) -> Self {
        self.fields.push(field);
        self
    }

    /// Bind values from a JSON object, looked up by external key and then
    /// by internal name. Missing keys (or non-object input) become null.
    pub fn bind(&self, data: &serde_json::Value) -> DynamicRecord {
        let object = data.as_object();
        let mut builder = DynamicRecord::builder();

        for field in &self.fields {
            let value = object
                .and_then(|o| o.get(field.key()).or_else(|| o.get(&field.name)))
                .map(FieldValue::from)
                .unwrap_or_default();

            builder = builder.declare(field.clone()).value(&field.name, value);
        }

        builder.build()
    }
}

/// A record assembled at runtime from a schema and values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DynamicRecord {
    fields: Vec<SchemaField>,
    values: HashMap<String, FieldValue>,
}

impl DynamicRecord {
    pub fn builder() -> DynamicRecordBuilder {
        DynamicRecordBuilder::default()
    }

    pub fn fields(&self) -> &[SchemaField] {
        &self.fields
    }

    /// Replace a field's value
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.values.insert(name.into(), value.into());
    }
}

impl FieldAccess for DynamicRecord {
    fn field(&self, key: &str) -> Option<FieldValue> {
        if let Some(value) = self.values.get(key) {
            return Some(value.clone());
        }
        // Declared but never assigned
        self.fields
            .iter()
            .any(|f| f.name == key)
            .then_some(FieldValue::Null)
    }
}

impl Record for DynamicRecord {
    fn field_specs(&self) -> Vec<FieldSpec<'_>> {
        self.fields
            .iter()
            .map(|f| FieldSpec::new(&f.name, f.key(), &f.rules))
            .collect()
    }
}

/// Builder for [`DynamicRecord`]
#[derive(Debug, Default)]
pub struct DynamicRecordBuilder {
    record: DynamicRecord,
}

impl DynamicRecordBuilder {
    /// Declare a field with its rules; the external key is the name.
    pub fn field(self, name: impl Into<String>, rules: impl Into<String>) -> Self {
        self.declare(SchemaField::new(name, rules))
    }

    /// Declare a field with an explicit external key.
    pub fn aliased(
        self,
        name: impl Into<String>,
        alias: impl Into<String>,
        rules: impl Into<String>,
    ) -> Self {
        self.declare(SchemaField::new(name, rules).with_alias(alias))
    }

    pub fn declare(mut self, field: SchemaField) -> Self {
        self.record.fields.push(field);
        self
    }

    /// Set a value by internal key. Values for undeclared keys are still
    /// visible to cross-field rules.
    pub fn value(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.record.set(name, value);
        self
    }

    pub fn build(self) -> DynamicRecord {
        self.record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Validate, ValidationResult};

    #[test]
    fn test_schema_from_toml_shape() {
        let schema: Schema = serde_json::from_value(serde_json::json!({
            "fields": [
                {"name": "email", "rules": "required|email"},
                {"name": "password_confirmation", "alias": "passwordConfirmation"}
            ]
        }))
        .unwrap();

        assert_eq!(schema.fields.len(), 2);
        assert_eq!(schema.fields[0].key(), "email");
        assert_eq!(schema.fields[1].key(), "passwordConfirmation");
        assert_eq!(schema.fields[1].rules, "");
    }

    #[test]
    fn test_bind_by_alias_then_name() {
        let schema = Schema::new()
            .field(SchemaField::new("first_name", "required").with_alias("firstName"))
            .field(SchemaField::new("age", "numeric"));

        let record = schema.bind(&serde_json::json!({"firstName": "Ada", "age": 36}));
        assert_eq!(record.field("first_name"), Some(FieldValue::from("Ada")));
        assert_eq!(record.field("age"), Some(FieldValue::Int(36)));

        let record = schema.bind(&serde_json::json!({"first_name": "Ada"}));
        assert_eq!(record.field("first_name"), Some(FieldValue::from("Ada")));
        assert_eq!(record.field("age"), Some(FieldValue::Null));
    }

    #[test]
    fn test_bind_non_object() {
        let schema = Schema::new().field(SchemaField::new("name", "required"));
        let record = schema.bind(&serde_json::json!([1, 2]));

        let result = record.validate();
        assert_eq!(
            result.errors().unwrap().messages("name"),
            vec!["The name field is required."]
        );
    }

    #[test]
    fn test_builder_and_cross_field() {
        let record = DynamicRecord::builder()
            .field("role", "")
            .aliased("admin_code", "adminCode", "required_if:role,admin")
            .value("role", "admin")
            .build();

        let errors = record.validate().into_result().unwrap_err();
        assert_eq!(
            errors.messages("adminCode"),
            vec!["The admin code field is required when role is admin."]
        );

        let record = DynamicRecord::builder()
            .field("role", "")
            .aliased("admin_code", "adminCode", "required_if:role,admin")
            .value("role", "user")
            .build();
        assert_eq!(record.validate(), ValidationResult::Valid);
    }

    #[test]
    fn test_unknown_key_is_none() {
        let record = DynamicRecord::builder().field("a", "").build();
        assert_eq!(record.field("a"), Some(FieldValue::Null));
        assert_eq!(record.field("b"), None);
    }
}
