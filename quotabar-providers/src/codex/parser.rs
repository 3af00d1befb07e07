//! Codex usage body parser.

use quotabar_core::{CodexUsage, CodexWindow};
use serde_json::Value;
use tracing::debug;

use crate::error::QuotaError;
use crate::lookup::{as_bool, as_f64, as_i64, as_non_empty_str, at_path, non_empty_object};

/// Parsed `wham/usage` body.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedUsage {
    /// Plan tier reported upstream, if any.
    pub plan_type: Option<String>,
    /// Windows and limit flag.
    pub usage: CodexUsage,
}

/// Parses a decoded `wham/usage` body.
///
/// ```json
/// {"plan_type": "plus", "rate_limit": {"limit_reached": false,
///   "primary_window": {"used_percent": 30, "reset_after_seconds": 1800},
///   "secondary_window": {...}}}
/// ```
///
/// A window that is absent or empty stays `None`.
///
/// # Errors
///
/// Returns `QuotaError::InvalidJson` if the body is not an object.
pub fn parse_usage_body(body: &Value) -> Result<ParsedUsage, QuotaError> {
    if !body.is_object() {
        return Err(QuotaError::InvalidJson(
            "usage body is not an object".to_string(),
        ));
    }

    let plan_type = at_path(body, &["plan_type"])
        .and_then(as_non_empty_str)
        .map(str::to_string);

    let limit_reached = at_path(body, &["rate_limit", "limit_reached"])
        .and_then(as_bool)
        .unwrap_or(false);

    let usage = CodexUsage {
        primary: parse_window(body, "primary_window"),
        secondary: parse_window(body, "secondary_window"),
        limit_reached,
    };

    debug!(
        plan = ?plan_type,
        primary = usage.primary.is_some(),
        secondary = usage.secondary.is_some(),
        limit_reached,
        "Parsed Codex usage"
    );

    Ok(ParsedUsage { plan_type, usage })
}

fn parse_window(body: &Value, key: &str) -> Option<CodexWindow> {
    let window = at_path(body, &["rate_limit", key])?;
    non_empty_object(window)?;

    Some(CodexWindow {
        used_percent: at_path(window, &["used_percent"]).and_then(as_f64),
        reset_after_seconds: at_path(window, &["reset_after_seconds"]).and_then(as_i64),
    })
}
