//! Tolerant field deserializers for management API payloads.
//!
//! The management server is loose about field types (numeric indexes,
//! `null` strings). These helpers map whatever arrives to the field's type,
//! falling back to the type's default instead of failing the whole payload.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Reads a string; numbers and booleans become their text, anything else "".
pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_to_string(&Value::deserialize(deserializer)?).unwrap_or_default())
}

/// Reads an optional string; `null` and non-scalar values become `None`.
pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_to_string(&Value::deserialize(deserializer)?))
}

/// Reads a boolean; `"true"` counts as true, anything unrecognised as false.
pub fn boolean<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => b,
        Value::String(s) => s.eq_ignore_ascii_case("true"),
        _ => false,
    })
}

/// Reads an HTTP status code; missing or malformed values become 0.
pub fn status_code<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let code = match &value {
        Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    Ok(code.unwrap_or_default())
}

/// Scalar JSON value as text.
pub fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
