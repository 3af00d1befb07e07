//! JSON output formatting.

use anyhow::Result;
use quotabar_core::{
    AntigravityQuota, CodexQuota, CodexWindow, ModelGroupQuota, Quota, QuotaReport,
};
use serde::Serialize;

// ============================================================================
// Output Types
// ============================================================================

/// JSON output for a whole poll.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportOutput {
    pub codex: Vec<CodexOutput>,
    pub antigravity: Vec<AntigravityOutput>,
}

/// One Codex account.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodexOutput {
    pub email: String,
    pub plan_type: String,
    pub limit_reached: bool,
    pub primary: Option<WindowOutput>,
    pub secondary: Option<WindowOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One Codex usage window.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowOutput {
    pub used_percent: Option<f64>,
    pub remaining_percent: Option<f64>,
    pub reset_after_seconds: Option<i64>,
}

/// One Antigravity account.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AntigravityOutput {
    pub email: String,
    pub groups: Vec<GroupOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One model group.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupOutput {
    pub id: String,
    pub label: String,
    pub models: Vec<String>,
    pub remaining_fraction: Option<f64>,
    pub remaining_percent: Option<i64>,
    pub reset_time: Option<String>,
}

/// Error-only output.
#[derive(Debug, Serialize)]
pub struct ErrorOutput<'a> {
    pub error: &'a str,
}

// ============================================================================
// Conversions
// ============================================================================

impl From<&CodexWindow> for WindowOutput {
    fn from(window: &CodexWindow) -> Self {
        Self {
            used_percent: window.used_percent,
            remaining_percent: window.remaining_percent(),
            reset_after_seconds: window.reset_after_seconds,
        }
    }
}

impl From<&CodexQuota> for CodexOutput {
    fn from(quota: &CodexQuota) -> Self {
        let usage = quota.usage();
        Self {
            email: quota.email.clone(),
            plan_type: quota.plan_type.clone(),
            limit_reached: quota.limit_reached(),
            primary: usage.and_then(|u| u.primary.as_ref()).map(WindowOutput::from),
            secondary: usage.and_then(|u| u.secondary.as_ref()).map(WindowOutput::from),
            error: quota.error().map(str::to_string),
        }
    }
}

impl From<&ModelGroupQuota> for GroupOutput {
    fn from(group: &ModelGroupQuota) -> Self {
        Self {
            id: group.group_id.clone(),
            label: group.label.clone(),
            models: group.models.clone(),
            remaining_fraction: group.remaining_fraction,
            remaining_percent: group.remaining_percent(),
            reset_time: group.reset_time.clone(),
        }
    }
}

impl From<&AntigravityQuota> for AntigravityOutput {
    fn from(quota: &AntigravityQuota) -> Self {
        Self {
            email: quota.email.clone(),
            groups: quota.groups().iter().map(GroupOutput::from).collect(),
            error: quota.error().map(str::to_string),
        }
    }
}

impl From<&QuotaReport> for ReportOutput {
    fn from(report: &QuotaReport) -> Self {
        Self {
            codex: report.codex.iter().map(CodexOutput::from).collect(),
            antigravity: report.antigravity.iter().map(AntigravityOutput::from).collect(),
        }
    }
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn to_string<T: Serialize>(&self, value: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(json)
    }

    /// Formats a poll result.
    pub fn format_report(&self, report: &QuotaReport) -> Result<String> {
        self.to_string(&ReportOutput::from(report))
    }

    /// Formats a poll-wide error.
    pub fn format_error(&self, message: &str) -> Result<String> {
        self.to_string(&ErrorOutput { error: message })
    }
}
