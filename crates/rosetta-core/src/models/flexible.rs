//! Tolerant handling of collection fields.
//!
//! Several Rosetta endpoints return a bare string, a single object, or an
//! array for what is nominally a list. Everything is normalized into a
//! `Vec` here before the typed model sees it.

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

use crate::api::{Result, RosettaError};

/// Normalize a JSON value into an ordered collection.
///
/// - string: one element, or none when blank
/// - object: one element
/// - array: its elements in order
/// - null: empty
pub fn normalize_collection(value: Value) -> Result<Vec<Value>> {
    normalize(value).map_err(RosettaError::Format)
}

/// Normalize and then convert each element into `T`.
pub fn collect_records<T: DeserializeOwned>(value: Value) -> Result<Vec<T>> {
    normalize_collection(value)?
        .into_iter()
        .map(|item| serde_json::from_value(item).map_err(RosettaError::from))
        .collect()
}

/// `deserialize_with` adapter for tolerant collection fields.
pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    normalize(value).map_err(de::Error::custom)
}

fn normalize(value: Value) -> std::result::Result<Vec<Value>, String> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::String(s) if s.trim().is_empty() => Ok(Vec::new()),
        Value::String(s) => Ok(vec![Value::String(s)]),
        Value::Object(_) => Ok(vec![value]),
        Value::Array(items) => Ok(items),
        Value::Bool(_) => Err("expected array, object, or string, got boolean".to_string()),
        Value::Number(_) => Err("expected array, object, or string, got number".to_string()),
    }
}
