// Record access traits

use crate::FieldValue;
use std::collections::{BTreeMap, HashMap};

/// Read access to a record's fields by internal key.
///
/// Cross-field rules only ever see a record through this trait, so any
/// key → value source (a derived struct, a map, a test stub) can stand in.
pub trait FieldAccess {
    /// Current value of the field with this internal key, or `None` if the
    /// record has no such field.
    fn field(&self, key: &str) -> Option<FieldValue>;
}

/// Declaration of one validated field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec<'a> {
    /// Internal key, used for cross-field lookup
    pub name: &'a str,
    /// External key, used as the error-mapping key
    pub key: &'a str,
    /// Rule-chain encoding
    pub rules: &'a str,
}

impl<'a> FieldSpec<'a> {
    pub const fn new(name: &'a str, key: &'a str, rules: &'a str) -> Self {
        Self { name, key, rules }
    }
}

/// A record the validator can walk: ordered field declarations plus values.
///
/// Usually implemented with `#[derive(Record)]`.
pub trait Record: FieldAccess {
    /// Field declarations in declared order
    fn field_specs(&self) -> Vec<FieldSpec<'_>>;
}

impl<T: FieldAccess + ?Sized> FieldAccess for &T {
    fn field(&self, key: &str) -> Option<FieldValue> {
        (**self).field(key)
    }
}

impl FieldAccess for HashMap<String, FieldValue> {
    fn field(&self, key: &str) -> Option<FieldValue> {
        self.get(key).cloned()
    }
}

impl FieldAccess for BTreeMap<String, FieldValue> {
    fn field(&self, key: &str) -> Option<FieldValue> {
        self.get(key).cloned()
    }
}

impl FieldAccess for serde_json::Map<String, serde_json::Value> {
    fn field(&self, key: &str) -> Option<FieldValue> {
        self.get(key).map(FieldValue::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_access() {
        let mut map = HashMap::new();
        map.insert("name".to_string(), FieldValue::from("john"));

        assert_eq!(map.field("name"), Some(FieldValue::from("john")));
        assert_eq!(map.field("missing"), None);
    }

    #[test]
    fn test_json_object_access() {
        let value = serde_json::json!({"age": 30});
        let object = value.as_object().unwrap();

        assert_eq!(object.field("age"), Some(FieldValue::Int(30)));
        assert_eq!(object.field("name"), None);
    }
}
