//! Raw response records

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// An immutable, ordered JSON object as returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Wrap a payload, rejecting anything that is not a JSON object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(Error::Transport(anyhow::anyhow!(
                "expected a JSON object, got {}",
                other
            ))),
        }
    }

    /// Copy an object element out of a response, naming `field` on failure.
    pub(crate) fn object(value: &Value, field: &str) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map.clone())),
            _ => Err(Error::missing(field)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn bool_field(&self, key: &str) -> Option<bool> {
        self.0.get(key).and_then(Value::as_bool)
    }

    /// A nested object re-wrapped as a fresh record on every call.
    pub fn nested(&self, key: &str) -> Option<Record> {
        match self.0.get(key) {
            Some(Value::Object(map)) => Some(Record(map.clone())),
            _ => None,
        }
    }

    pub fn array(&self, key: &str) -> Option<&Vec<Value>> {
        self.0.get(key).and_then(Value::as_array)
    }

    /// Like [`Record::array`] but a missing array is an error.
    pub fn require_array(&self, key: &str) -> Result<&Vec<Value>> {
        self.array(key).ok_or_else(|| Error::missing(key))
    }

    pub fn require_str(&self, key: &str) -> Result<&str> {
        self.str_field(key).ok_or_else(|| Error::missing(key))
    }

    pub fn require_nested(&self, key: &str) -> Result<Record> {
        self.nested(key).ok_or_else(|| Error::missing(key))
    }

    /// Whether the response reports success.
    pub fn is_ok(&self) -> bool {
        self.0.get("ok").is_some_and(truthy)
    }

    /// The `error` field of a failed response, empty when absent.
    pub fn error(&self) -> String {
        match self.0.get("error") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Loose truthiness: `false`, `0`, `""`, empty containers and `null` are falsy.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        Record::from_value(value).unwrap()
    }

    #[test]
    fn test_nested_is_rewrapped() {
        let rec = record(json!({"id": "C1", "topic": {"value": "hi"}}));
        let topic = rec.nested("topic").unwrap();
        assert_eq!(topic.str_field("value"), Some("hi"));
        assert!(rec.nested("id").is_none());
        assert_eq!(rec.nested("topic"), Some(topic));
    }

    #[test]
    fn test_ok_truthiness() {
        assert!(record(json!({"ok": true})).is_ok());
        assert!(record(json!({"ok": 1})).is_ok());
        assert!(!record(json!({"ok": false})).is_ok());
        assert!(!record(json!({"ok": 0})).is_ok());
        assert!(!record(json!({})).is_ok());
        assert!(!truthy(&json!("")));
        assert!(truthy(&json!("x")));
    }

    #[test]
    fn test_error_field() {
        assert_eq!(
            record(json!({"ok": false, "error": "not_authed"})).error(),
            "not_authed"
        );
        assert_eq!(record(json!({"ok": false})).error(), "");
    }

    #[test]
    fn test_rejects_non_object() {
        assert!(Record::from_value(json!([1, 2])).is_err());
    }

    #[test]
    fn test_key_order_preserved() {
        let rec = record(json!({"z": 1, "a": 2, "m": 3}));
        let keys: Vec<&String> = rec.keys().collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }
}
