//! Forgiving field decoders.
//!
//! Backend payloads are produced by an editor that has written numbers as
//! strings, ids as integers and editor lists as JSON text over time. Every
//! helper here decodes what it can and yields `None`/empty for the rest.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub(crate) fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(as_number))
}

pub(crate) fn integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(as_number)
        .map(|n| n.trunc() as i64))
}

pub(crate) fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(as_text))
}

pub(crate) fn object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| decode(v, std::any::type_name::<T>())))
}

/// Like [`object`], but also accepts the object serialized into a string.
pub(crate) fn embedded_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .and_then(unwrap_json_string)
        .and_then(|v| decode(v, std::any::type_name::<T>())))
}

/// Decode a list element by element, dropping entries that do not decode.
pub(crate) fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let items = match value.and_then(unwrap_json_string) {
        Some(Value::Array(items)) => items,
        _ => return Ok(Vec::new()),
    };
    Ok(items
        .into_iter()
        .filter_map(|v| decode(v, std::any::type_name::<T>()))
        .collect())
}

/// A list of strings given either as a JSON array or as a string holding one.
pub(crate) fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value.and_then(unwrap_json_string) {
        Some(Value::Array(items)) => items.into_iter().filter_map(as_text).collect(),
        Some(Value::String(single)) if !single.trim().is_empty() => vec![single],
        _ => Vec::new(),
    })
}

pub(crate) fn as_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let s = s.trim();
            let s = s
                .strip_suffix("px")
                .or_else(|| s.strip_suffix('%'))
                .unwrap_or(s);
            s.trim().parse::<f64>().ok()
        }
        _ => None,
    };
    n.filter(|n| n.is_finite())
}

fn as_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Strings that look like JSON containers are parsed; anything else is kept.
fn unwrap_json_string(value: Value) -> Option<Value> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.starts_with('[') || trimmed.starts_with('{') {
                match serde_json::from_str(trimmed) {
                    Ok(parsed) => Some(parsed),
                    Err(e) => {
                        tracing::warn!("Ignoring unparsable embedded JSON: {}", e);
                        None
                    }
                }
            } else {
                Some(Value::String(s))
            }
        }
        Value::Null => None,
        other => Some(other),
    }
}

fn decode<T: DeserializeOwned>(value: Value, what: &str) -> Option<T> {
    match serde_json::from_value(value) {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            tracing::debug!("Dropping malformed {}: {}", what, e);
            None
        }
    }
}
