//! Store value types for keyscope.
//!
//! A key's type is discovered per call from the store's `TYPE` reply and is
//! never cached. [`Value`] is the materialized form of a key, and
//! [`Value::display`] produces the canonical text shown to operators:
//! scalars verbatim, composites as JSON.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Type tag reported by the store for a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueType {
    String,
    List,
    Set,
    Hash,
    /// The key does not exist.
    None,
    /// Any tag this console does not render (e.g. `zset`, `stream`).
    Other(String),
}

impl ValueType {
    /// Parse a raw `TYPE` reply.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "string" => ValueType::String,
            "list" => ValueType::List,
            "set" => ValueType::Set,
            "hash" => ValueType::Hash,
            "none" => ValueType::None,
            other => ValueType::Other(other.to_string()),
        }
    }

    pub fn as_tag(&self) -> &str {
        match self {
            ValueType::String => "string",
            ValueType::List => "list",
            ValueType::Set => "set",
            ValueType::Hash => "hash",
            ValueType::None => "none",
            ValueType::Other(tag) => tag,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// A key's value, fetched in full.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Scalar(String),
    List(Vec<String>),
    /// Members in store order (unordered by contract).
    Set(Vec<String>),
    /// Field/value pairs in store order.
    Mapping(Vec<(String, String)>),
    /// Best-effort placeholder for a type the console cannot render.
    Unsupported(String),
}

impl Value {
    /// Structured JSON form of the value.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Scalar(s) => serde_json::Value::String(s.clone()),
            Value::List(items) | Value::Set(items) => serde_json::Value::Array(
                items
                    .iter()
                    .map(|item| serde_json::Value::String(item.clone()))
                    .collect(),
            ),
            Value::Mapping(fields) => serde_json::Value::Object(
                fields
                    .iter()
                    .map(|(field, value)| (field.clone(), serde_json::Value::String(value.clone())))
                    .collect(),
            ),
            Value::Unsupported(_) => serde_json::Value::String(self.display()),
        }
    }

    /// Display text: scalars verbatim, composites as serialized JSON.
    pub fn display(&self) -> String {
        match self {
            Value::Scalar(s) => s.clone(),
            Value::Unsupported(tag) => format!("Unsupported type: {tag}"),
            composite => composite.to_json().to_string(),
        }
    }
}

/// One `SCAN` reply: the next cursor and the keys in this batch.
///
/// A cursor of `0` means the iteration is complete.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanPage {
    pub cursor: u64,
    pub keys: Vec<String>,
}

impl ScanPage {
    pub fn is_last(&self) -> bool {
        self.cursor == 0
    }
}

/// A key paired with its display value, as shown in the console listing.
///
/// `value` is `None` when the key could not be materialized (it vanished or
/// the store failed for that key).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEntry {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_type_from_tag() {
        assert_eq!(ValueType::from_tag("string"), ValueType::String);
        assert_eq!(ValueType::from_tag("hash"), ValueType::Hash);
        assert_eq!(ValueType::from_tag("none"), ValueType::None);
        assert_eq!(
            ValueType::from_tag("zset"),
            ValueType::Other("zset".to_string())
        );
    }

    #[test]
    fn test_value_type_display_roundtrips_tag() {
        for tag in ["string", "list", "set", "hash", "none", "stream"] {
            assert_eq!(ValueType::from_tag(tag).to_string(), tag);
        }
    }

    #[test]
    fn test_scalar_display_is_verbatim() {
        let v = Value::Scalar("{\"not\": \"parsed\"}".to_string());
        assert_eq!(v.display(), "{\"not\": \"parsed\"}");
    }

    #[test]
    fn test_list_display_is_json_array() {
        let v = Value::List(vec!["a".to_string(), "b\"c".to_string()]);
        assert_eq!(v.display(), r#"["a","b\"c"]"#);
    }

    #[test]
    fn test_mapping_display_is_json_object() {
        let v = Value::Mapping(vec![
            ("b".to_string(), "2".to_string()),
            ("a".to_string(), "1".to_string()),
        ]);
        let parsed: serde_json::Value = serde_json::from_str(&v.display()).unwrap();
        assert_eq!(parsed, serde_json::json!({"a": "1", "b": "2"}));
    }

    #[test]
    fn test_unsupported_display_names_type() {
        let v = Value::Unsupported("zset".to_string());
        assert_eq!(v.display(), "Unsupported type: zset");
        assert_eq!(v.to_json(), serde_json::json!("Unsupported type: zset"));
    }

    #[test]
    fn test_empty_list_display() {
        assert_eq!(Value::List(Vec::new()).display(), "[]");
        assert_eq!(Value::Mapping(Vec::new()).display(), "{}");
    }

    #[test]
    fn test_key_entry_skips_missing_value() {
        let entry = KeyEntry {
            key: "gone".to_string(),
            value: None,
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"key":"gone"}"#);
    }
}
