//! Antigravity `fetchAvailableModels` body parser.

use serde_json::{Map, Value};

use crate::error::QuotaError;
use crate::lookup::{as_f64, as_non_empty_str, first_present, non_empty_object, KeyPath};

const REMAINING_FRACTION: &[KeyPath<'static>] = &[
    &["quotaInfo", "remainingFraction"],
    &["quotaInfo", "remaining_fraction"],
    &["quota_info", "remainingFraction"],
    &["quota_info", "remaining_fraction"],
    &["remainingFraction"],
    &["remaining_fraction"],
];

const RESET_TIME: &[KeyPath<'static>] = &[
    &["quotaInfo", "resetTime"],
    &["quotaInfo", "reset_time"],
    &["quota_info", "resetTime"],
    &["quota_info", "reset_time"],
    &["resetTime"],
    &["reset_time"],
];

/// Quota fields of one model entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelQuotaEntry {
    /// Remaining fraction in [0, 1].
    pub remaining_fraction: Option<f64>,
    /// ISO-8601 reset timestamp.
    pub reset_time: Option<String>,
}

impl ModelQuotaEntry {
    /// Reads an entry, or `None` if it is not an object.
    ///
    /// The nested quota object is preferred over top-level fields, and
    /// camelCase keys over snake_case ones.
    pub fn from_value(info: &Value) -> Option<Self> {
        if !info.is_object() {
            return None;
        }

        Some(Self {
            remaining_fraction: first_present(info, REMAINING_FRACTION).and_then(as_f64),
            reset_time: first_present(info, RESET_TIME)
                .and_then(as_non_empty_str)
                .map(str::to_string),
        })
    }
}

/// Extracts the non-empty `models` mapping of a decoded body.
///
/// # Errors
///
/// Returns `QuotaError::NoModels` if `models` is missing, empty or not an
/// object.
pub fn models_of(body: &Value) -> Result<&Map<String, Value>, QuotaError> {
    body.get("models")
        .and_then(non_empty_object)
        .ok_or(QuotaError::NoModels)
}
