//! Quota result types.
//!
//! Each account fetch yields either provider data or an error string, never
//! both. The types here model that as a `Result` in an `outcome` field:
//! - [`CodexQuota`] - usage windows for one Codex account
//! - [`AntigravityQuota`] - model groups for one Antigravity account
//! - [`ModelGroupQuota`] - one logical model group, reduced to its worst member
//! - [`AccountQuota`] - either of the above
//! - [`QuotaReport`] - all accounts of one poll, split by provider

use serde::{Deserialize, Serialize};

use super::provider::ProviderKind;
use crate::error::CoreError;

// ============================================================================
// Codex
// ============================================================================

/// One Codex usage window.
///
/// Both fields are optional: the upstream may send a window object that
/// lacks either value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodexWindow {
    /// Percentage of the window already used (0-100).
    pub used_percent: Option<f64>,
    /// Seconds until the window resets.
    pub reset_after_seconds: Option<i64>,
}

impl CodexWindow {
    /// Creates a window with both values set.
    pub fn new(used_percent: f64, reset_after_seconds: i64) -> Self {
        Self {
            used_percent: Some(used_percent),
            reset_after_seconds: Some(reset_after_seconds),
        }
    }

    /// Returns the remaining percentage (`100 - used`), if known.
    pub fn remaining_percent(&self) -> Option<f64> {
        self.used_percent.map(|used| 100.0 - used)
    }
}

/// Usage data of a successfully fetched Codex account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodexUsage {
    /// Short (5 hour) window. `None` means the upstream sent no such window.
    pub primary: Option<CodexWindow>,
    /// Long (weekly) window.
    pub secondary: Option<CodexWindow>,
    /// Hard limit reached on any window.
    pub limit_reached: bool,
}

/// Quota result for one Codex account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodexQuota {
    /// Account email.
    pub email: String,
    /// Plan tier: upstream value when available, else the credential's.
    pub plan_type: String,
    /// Usage data, or the reason it could not be obtained.
    pub outcome: Result<CodexUsage, String>,
}

impl CodexQuota {
    /// Creates a successful result.
    pub fn ok(email: impl Into<String>, plan_type: impl Into<String>, usage: CodexUsage) -> Self {
        Self {
            email: email.into(),
            plan_type: plan_type.into(),
            outcome: Ok(usage),
        }
    }

    /// Creates a failed result.
    pub fn failed(
        email: impl Into<String>,
        plan_type: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            plan_type: plan_type.into(),
            outcome: Err(error.into()),
        }
    }

    /// Returns the usage data if the fetch succeeded.
    pub fn usage(&self) -> Option<&CodexUsage> {
        self.outcome.as_ref().ok()
    }

    /// Returns the primary window's remaining percentage, if known.
    pub fn primary_remaining_percent(&self) -> Option<f64> {
        self.usage()
            .and_then(|u| u.primary.as_ref())
            .and_then(CodexWindow::remaining_percent)
    }

    /// Returns true if the upstream reported a reached limit.
    pub fn limit_reached(&self) -> bool {
        self.usage().is_some_and(|u| u.limit_reached)
    }
}

// ============================================================================
// Antigravity
// ============================================================================

/// Quota of one logical model group.
///
/// `remaining_fraction` is the lowest fraction seen among `models`, and
/// `reset_time` belongs to the member that supplied it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelGroupQuota {
    /// Stable group id (e.g. "gemini-3-pro").
    pub group_id: String,
    /// Display label (e.g. "Gemini 3 Pro").
    pub label: String,
    /// Member model ids observed for this account, in input order.
    pub models: Vec<String>,
    /// Worst remaining fraction in [0, 1], if any member reported one.
    pub remaining_fraction: Option<f64>,
    /// ISO-8601 reset timestamp of the worst member.
    pub reset_time: Option<String>,
}

impl ModelGroupQuota {
    /// Creates an empty group.
    pub fn new(group_id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            label: label.into(),
            models: Vec::new(),
            remaining_fraction: None,
            reset_time: None,
        }
    }

    /// Records one member model.
    ///
    /// The group keeps the strictly lowest fraction; on a tie the earlier
    /// member's reset time stays.
    pub fn observe(
        &mut self,
        model_id: impl Into<String>,
        remaining_fraction: Option<f64>,
        reset_time: Option<String>,
    ) {
        self.models.push(model_id.into());

        let Some(fraction) = remaining_fraction else {
            return;
        };
        if self.remaining_fraction.is_none_or(|current| fraction < current) {
            self.remaining_fraction = Some(fraction);
            self.reset_time = reset_time;
        }
    }

    /// Returns the remaining percentage, rounded half-to-even.
    pub fn remaining_percent(&self) -> Option<i64> {
        self.remaining_fraction.map(fraction_to_percent)
    }

    /// Checks that the fraction lies in [0, 1].
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidData` for out-of-range or non-finite values.
    pub fn validate(&self) -> Result<(), CoreError> {
        match self.remaining_fraction {
            Some(f) if !f.is_finite() || !(0.0..=1.0).contains(&f) => Err(CoreError::InvalidData(
                format!("{}: remaining fraction {f} out of range [0, 1]", self.group_id),
            )),
            _ => Ok(()),
        }
    }
}

/// Converts a fraction to a whole percentage the way the menu shows it.
#[allow(clippy::cast_possible_truncation)]
pub fn fraction_to_percent(fraction: f64) -> i64 {
    (fraction * 100.0).round_ties_even() as i64
}

/// Quota result for one Antigravity account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AntigravityQuota {
    /// Account email.
    pub email: String,
    /// Model groups sorted by label, or the reason they could not be fetched.
    pub outcome: Result<Vec<ModelGroupQuota>, String>,
}

impl AntigravityQuota {
    /// Creates a successful result.
    pub fn ok(email: impl Into<String>, groups: Vec<ModelGroupQuota>) -> Self {
        Self {
            email: email.into(),
            outcome: Ok(groups),
        }
    }

    /// Creates a failed result.
    pub fn failed(email: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            outcome: Err(error.into()),
        }
    }

    /// Returns the groups; empty when the fetch failed.
    pub fn groups(&self) -> &[ModelGroupQuota] {
        self.outcome.as_deref().unwrap_or_default()
    }

    /// Returns the lowest remaining percentage across all groups.
    pub fn lowest_remaining_percent(&self) -> Option<i64> {
        self.groups()
            .iter()
            .filter_map(|g| g.remaining_fraction)
            .reduce(f64::min)
            .map(fraction_to_percent)
    }
}

// ============================================================================
// Account Quota & Report
// ============================================================================

/// Quota result of one account, by provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "provider", rename_all = "lowercase")]
pub enum AccountQuota {
    /// Codex account result.
    Codex(CodexQuota),
    /// Antigravity account result.
    Antigravity(AntigravityQuota),
}

impl AccountQuota {
    /// Returns the provider kind of this result.
    pub fn kind(&self) -> ProviderKind {
        match self {
            Self::Codex(_) => ProviderKind::Codex,
            Self::Antigravity(_) => ProviderKind::Antigravity,
        }
    }
}

/// All account results of one poll, split by provider in listing order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotaReport {
    /// Codex accounts.
    pub codex: Vec<CodexQuota>,
    /// Antigravity accounts.
    pub antigravity: Vec<AntigravityQuota>,
}

impl QuotaReport {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one account result to its provider's list.
    pub fn push(&mut self, quota: AccountQuota) {
        match quota {
            AccountQuota::Codex(q) => self.codex.push(q),
            AccountQuota::Antigravity(q) => self.antigravity.push(q),
        }
    }

    /// Returns the total number of accounts.
    pub fn account_count(&self) -> usize {
        self.codex.len() + self.antigravity.len()
    }

    /// Returns true if the report holds no accounts.
    pub fn is_empty(&self) -> bool {
        self.account_count() == 0
    }
}

impl FromIterator<AccountQuota> for QuotaReport {
    fn from_iter<I: IntoIterator<Item = AccountQuota>>(iter: I) -> Self {
        let mut report = Self::new();
        for quota in iter {
            report.push(quota);
        }
        report
    }
}
