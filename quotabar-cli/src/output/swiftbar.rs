//! SwiftBar menu output.
//!
//! One directive per line. The first line is the status-bar title; lines
//! after the first `---` form the dropdown, `--` prefixes nest items, and
//! everything after ` | ` is a rendering hint for SwiftBar.

use chrono::{DateTime, Duration, TimeZone};
use quotabar_core::{
    AntigravityQuota, CodexQuota, CodexWindow, ModelGroupQuota, ProviderKind, Quota, QuotaReport,
};

const SEPARATOR: &str = "---";
const ABSOLUTE_FORMAT: &str = "%-m月%-d日 %H:%M";

const GREEN: &str = "#4caf50";
const ORANGE: &str = "#ff9800";
const RED: &str = "#f44336";
const GREY: &str = "#888888";

// ============================================================================
// SwiftBar Formatter
// ============================================================================

/// Renders quota results relative to a fixed current time.
#[derive(Debug, Clone)]
pub struct SwiftBarFormatter<Tz: TimeZone> {
    now: DateTime<Tz>,
}

impl<Tz> SwiftBarFormatter<Tz>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    /// Creates a formatter. Absolute times are shown in `now`'s time zone.
    pub fn new(now: DateTime<Tz>) -> Self {
        Self { now }
    }

    // ------------------------------------------------------------------------
    // Reset times
    // ------------------------------------------------------------------------

    /// Formats a reset delay as the absolute time it ends.
    ///
    /// Absent or non-positive delays read "now".
    pub fn format_reset_after(&self, seconds: Option<i64>) -> String {
        match seconds {
            Some(secs) if secs > 0 => {
                let at = Duration::try_seconds(secs)
                    .and_then(|delay| self.now.clone().checked_add_signed(delay));
                match at {
                    Some(at) => at.format(ABSOLUTE_FORMAT).to_string(),
                    None => String::new(),
                }
            }
            _ => "now".to_string(),
        }
    }

    /// Formats an ISO-8601 reset timestamp.
    ///
    /// Past timestamps read "resetting"; empty or unparsable ones are
    /// omitted.
    pub fn format_reset_time(&self, reset_time: Option<&str>) -> String {
        let Some(raw) = reset_time.filter(|s| !s.is_empty()) else {
            return String::new();
        };
        let Ok(at) = DateTime::parse_from_rfc3339(raw) else {
            return String::new();
        };

        let at = at.with_timezone(&self.now.timezone());
        if at <= self.now {
            return "resetting".to_string();
        }
        at.format(ABSOLUTE_FORMAT).to_string()
    }

    // ------------------------------------------------------------------------
    // Title
    // ------------------------------------------------------------------------

    /// Returns the status-bar title from the first account of each provider.
    pub fn title(&self, report: &QuotaReport) -> String {
        let mut parts = Vec::new();

        if let Some(quota) = report.codex.first() {
            let codex = ProviderKind::Codex.icon();
            parts.push(match quota.primary_remaining_percent() {
                Some(remaining) => {
                    let icon = if quota.limit_reached() { "🔴" } else { codex };
                    format!("{icon}C:{}%", format_percent(remaining))
                }
                None => format!("{codex}C:?"),
            });
        }

        if let Some(quota) = report.antigravity.first() {
            let icon = ProviderKind::Antigravity.icon();
            parts.push(match quota.lowest_remaining_percent() {
                Some(lowest) => format!("{icon}A:{lowest}%"),
                None if quota.has_data() => format!("{icon}A:?"),
                None => format!("{icon}A:⚠️"),
            });
        }

        let title = if parts.is_empty() {
            "📊 Quota".to_string()
        } else {
            parts.join(" ")
        };
        format!("{title} | size=13")
    }

    // ------------------------------------------------------------------------
    // Sections
    // ------------------------------------------------------------------------

    /// Renders the Codex section.
    pub fn codex_section(&self, quotas: &[CodexQuota]) -> Vec<String> {
        let mut lines = vec![section_header(ProviderKind::Codex, quotas.len())];

        for quota in quotas {
            let Some(usage) = quota.usage() else {
                lines.push(error_line(quota));
                continue;
            };

            let status = if usage.limit_reached { "🔴" } else { "🟢" };
            let plan = if quota.plan_type.is_empty() {
                "?".to_string()
            } else {
                quota.plan_type.to_uppercase()
            };
            lines.push(format!(
                "--  {status} {} [{plan}] | font=Menlo size=12",
                quota.email
            ));

            if let Some(line) = self.window_line("5h window", usage.primary.as_ref()) {
                lines.push(line);
            }
            if let Some(line) = self.window_line("Weekly", usage.secondary.as_ref()) {
                lines.push(line);
            }
        }

        lines
    }

    fn window_line(&self, name: &str, window: Option<&CodexWindow>) -> Option<String> {
        let window = window?;
        let remaining = format_percent(window.remaining_percent()?);
        let reset = with_reset_marker(&self.format_reset_after(window.reset_after_seconds));
        Some(format!(
            "----  {name}: {remaining}%{reset} | font=Menlo size=11"
        ))
    }

    /// Renders the Antigravity section.
    pub fn antigravity_section(&self, quotas: &[AntigravityQuota]) -> Vec<String> {
        let mut lines = vec![section_header(ProviderKind::Antigravity, quotas.len())];

        for quota in quotas {
            if !quota.has_data() {
                lines.push(error_line(quota));
                continue;
            }
            let groups = quota.groups();

            lines.push(format!(
                "--  🟢 {} | font=Menlo size=12",
                quota.display_name()
            ));

            if groups.is_empty() {
                lines.push(format!("----  No model data | font=Menlo size=11 color={GREY}"));
                continue;
            }
            lines.extend(groups.iter().map(|group| self.group_line(group)));
        }

        lines
    }

    fn group_line(&self, group: &ModelGroupQuota) -> String {
        match group.remaining_percent() {
            Some(pct) => {
                let reset = with_reset_marker(&self.format_reset_time(group.reset_time.as_deref()));
                format!(
                    "----  {}: {pct}%{reset} | font=Menlo size=11 color={}",
                    group.label,
                    band_color(pct)
                )
            }
            None => format!(
                "----  {}: N/A | font=Menlo size=11 color={GREY}",
                group.label
            ),
        }
    }

    // ------------------------------------------------------------------------
    // Whole screens
    // ------------------------------------------------------------------------

    /// Renders the full menu for a successful poll.
    pub fn render_report(&self, report: &QuotaReport, base_url: &str) -> Vec<String> {
        let mut lines = vec![self.title(report), SEPARATOR.to_string()];

        if !report.codex.is_empty() {
            lines.extend(self.codex_section(&report.codex));
        }
        if !report.antigravity.is_empty() {
            lines.extend(self.antigravity_section(&report.antigravity));
        }

        lines.extend([
            SEPARATOR.to_string(),
            format!(
                "🕐 Updated: {} | size=11 color={GREY}",
                self.now.format("%H:%M:%S")
            ),
            SEPARATOR.to_string(),
            "🔄 Refresh | refresh=true".to_string(),
            format!("⚙️ Management Center | href={base_url} size=12"),
        ]);
        lines
    }
}

/// Renders the screen shown when no supported account exists.
pub fn render_no_accounts(base_url: &str) -> Vec<String> {
    vec![
        "📊 No accounts | size=13".to_string(),
        SEPARATOR.to_string(),
        format!("No Codex or Antigravity accounts found | color={GREY}"),
        SEPARATOR.to_string(),
        format!("⚙️ Management Center | href={base_url}"),
    ]
}

/// Renders the screen shown when the poll failed as a whole.
pub fn render_error(message: &str) -> Vec<String> {
    vec![
        "⚠️ Quota | color=red".to_string(),
        SEPARATOR.to_string(),
        format!("Error: {message} | color=red"),
        SEPARATOR.to_string(),
        "🔄 Retry | refresh=true".to_string(),
    ]
}

// ============================================================================
// Helpers
// ============================================================================

/// Color band for a remaining percentage.
pub fn band_color(pct: i64) -> &'static str {
    if pct > 50 {
        GREEN
    } else if pct > 20 {
        ORANGE
    } else {
        RED
    }
}

/// Formats a Codex percentage with at most one decimal place.
///
/// Whole values print without a fraction (`70`, `87.5`, `66.7`).
pub fn format_percent(pct: f64) -> String {
    let rounded = (pct * 10.0).round() / 10.0;
    // -0.0 would print as "-0"
    format!("{}", rounded + 0.0)
}

fn section_header(kind: ProviderKind, accounts: usize) -> String {
    format!(
        "{} {} ({accounts} accounts) | size=14 color=#ffffff",
        kind.icon(),
        kind.display_name()
    )
}

fn error_line(quota: &impl Quota) -> String {
    format!(
        "--  ❌ {} — {} | font=Menlo size=12",
        quota.display_name(),
        quota.error().unwrap_or_default()
    )
}

fn with_reset_marker(reset: &str) -> String {
    if reset.is_empty() {
        String::new()
    } else {
        format!(" 🔄{reset}")
    }
}
