//! Host-side representation of values crossing the script boundary.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// A value that can be passed into or returned from a widget script.
///
/// This is the only shape the host accepts from or hands to guest code. JSON
/// is its interchange format, so numbers keep the JSON distinction between
/// integers and floats, and mappings are keyed by strings and ordered by key.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum GuestValue {
    /// JSON `null`; `()` inside a script.
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// An integer or finite float.
    Number(Number),
    /// A UTF-8 string.
    String(String),
    /// An ordered list.
    Sequence(Vec<GuestValue>),
    /// String-keyed object.
    Mapping(BTreeMap<String, GuestValue>),
}

impl GuestValue {
    /// Name of the variant, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            GuestValue::Null => "null",
            GuestValue::Bool(_) => "bool",
            GuestValue::Number(_) => "number",
            GuestValue::String(_) => "string",
            GuestValue::Sequence(_) => "sequence",
            GuestValue::Mapping(_) => "mapping",
        }
    }
}

impl From<Value> for GuestValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => GuestValue::Null,
            Value::Bool(b) => GuestValue::Bool(b),
            Value::Number(n) => GuestValue::Number(n),
            Value::String(s) => GuestValue::String(s),
            Value::Array(items) => {
                GuestValue::Sequence(items.into_iter().map(Into::into).collect())
            }
            Value::Object(map) => {
                GuestValue::Mapping(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

impl From<GuestValue> for Value {
    fn from(value: GuestValue) -> Self {
        match value {
            GuestValue::Null => Value::Null,
            GuestValue::Bool(b) => Value::Bool(b),
            GuestValue::Number(n) => Value::Number(n),
            GuestValue::String(s) => Value::String(s),
            GuestValue::Sequence(items) => {
                Value::Array(items.into_iter().map(Into::into).collect())
            }
            GuestValue::Mapping(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

impl From<bool> for GuestValue {
    fn from(value: bool) -> Self {
        GuestValue::Bool(value)
    }
}

impl From<i64> for GuestValue {
    fn from(value: i64) -> Self {
        GuestValue::Number(value.into())
    }
}

impl From<&str> for GuestValue {
    fn from(value: &str) -> Self {
        GuestValue::String(value.to_string())
    }
}

impl From<String> for GuestValue {
    fn from(value: String) -> Self {
        GuestValue::String(value)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_from_json_builds_nested_variants() {
        let value = GuestValue::from(json!({"a": [1, 2.5, "x"], "b": null, "c": true}));

        let GuestValue::Mapping(map) = value else { panic!("expected mapping") };
        assert_eq!(
            map["a"],
            GuestValue::Sequence(vec![
                GuestValue::from(1_i64),
                GuestValue::Number(Number::from_f64(2.5).unwrap()),
                GuestValue::from("x"),
            ])
        );
        assert_eq!(map["b"], GuestValue::Null);
        assert_eq!(map["c"], GuestValue::Bool(true));
    }

    #[test]
    fn test_serializes_as_plain_json() {
        let value = GuestValue::from(json!({"items": [1, 2, 3], "name": "clock"}));
        assert_eq!(serde_json::to_string(&value).unwrap(), r#"{"items":[1,2,3],"name":"clock"}"#);
    }

    #[test]
    fn test_deserializes_from_plain_json() {
        let value: GuestValue = serde_json::from_str(r#"[null, false, "s"]"#).unwrap();
        assert_eq!(
            value,
            GuestValue::Sequence(vec![GuestValue::Null, GuestValue::Bool(false), "s".into()])
        );
    }

    #[test]
    fn test_kind_names_variant() {
        assert_eq!(GuestValue::Null.kind(), "null");
        assert_eq!(GuestValue::from(json!({})).kind(), "mapping");
        assert_eq!(GuestValue::from(json!([])).kind(), "sequence");
    }
}
