//! Tolerant lookups over loosely shaped JSON.
//!
//! Upstream bodies mix snake_case and camelCase keys and sometimes nest
//! values one level down. Callers list candidate paths in preference order
//! and take the first one that is present and not null.

use serde_json::Value;

/// A path of object keys from some root value.
pub type KeyPath<'a> = &'a [&'a str];

/// Follows `path` from `root`. Null values count as absent.
pub fn at_path<'v>(root: &'v Value, path: KeyPath<'_>) -> Option<&'v Value> {
    path.iter()
        .try_fold(root, |value, key| value.get(*key))
        .filter(|value| !value.is_null())
}

/// Returns the value at the first candidate path that is present.
pub fn first_present<'v>(root: &'v Value, candidates: &[KeyPath<'_>]) -> Option<&'v Value> {
    candidates.iter().find_map(|path| at_path(root, path))
}

/// Reads a finite number, accepting numeric strings.
pub fn as_f64(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

/// Reads an integer, truncating floats and accepting numeric strings.
#[allow(clippy::cast_possible_truncation)]
pub fn as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f as i64))
        }
        _ => None,
    }
}

/// Reads a boolean, accepting `"true"`/`"false"` strings.
pub fn as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => s.trim().parse::<bool>().ok(),
        _ => None,
    }
}

/// Reads a non-empty string.
pub fn as_non_empty_str(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.is_empty())
}

/// Returns the value if it is a non-empty object.
pub fn non_empty_object(value: &Value) -> Option<&serde_json::Map<String, Value>> {
    value.as_object().filter(|map| !map.is_empty())
}
