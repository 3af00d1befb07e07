//! Quota command - poll the management API and print the menu.

use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, Local, TimeZone};
use quotabar_core::{ProviderKind, QuotaReport};
use quotabar_fetch::{FetchError, ManagementApi, ManagementClient, ManagementConfig};
use quotabar_providers::{filter_records, ProviderRegistry};
use tracing::{debug, info, instrument, warn};

use crate::output::{render_error, render_no_accounts, JsonFormatter, SwiftBarFormatter};
use crate::{Cli, OutputFormat};

// ============================================================================
// Poll Outcome
// ============================================================================

/// Result of one poll, ready to render.
#[derive(Debug)]
pub enum PollOutcome {
    /// At least one account was fetched.
    Report {
        /// Per-account results.
        report: QuotaReport,
        /// Management base URL, linked from the menu.
        base_url: String,
    },
    /// The directory held no supported account.
    NoAccounts {
        /// Management base URL.
        base_url: String,
    },
    /// The poll could not run.
    Failed(String),
}

// ============================================================================
// Command
// ============================================================================

/// Runs one poll and writes the rendered output to stdout.
pub async fn run(cli: &Cli) -> Result<()> {
    let outcome = poll(cli).await;
    let output = render(&outcome, cli.format, cli.pretty, Local::now())?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{output}")?;
    stdout.flush()?;
    Ok(())
}

async fn poll(cli: &Cli) -> PollOutcome {
    let config = match ManagementConfig::load(cli.env_file.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %e, "Configuration incomplete");
            return PollOutcome::Failed(e.to_string());
        }
    };
    debug!(config = ?config, "Loaded configuration");

    let client = match ManagementClient::new(&config) {
        Ok(client) => client,
        Err(e) => return PollOutcome::Failed(format!("Unexpected: {e}")),
    };

    poll_with(
        &client,
        &ProviderRegistry::new(),
        &cli.provider_kinds(),
        config.base_url(),
    )
    .await
}

/// Lists credentials, keeps the requested kinds and fetches each account.
///
/// Only the listing can fail the poll; account failures stay inside the
/// report.
#[instrument(skip(api, registry))]
pub async fn poll_with(
    api: &dyn ManagementApi,
    registry: &ProviderRegistry,
    kinds: &[ProviderKind],
    base_url: &str,
) -> PollOutcome {
    let records = match api.list_credentials().await {
        Ok(records) => records,
        Err(e) => {
            warn!(error = %e, "Listing credentials failed");
            return PollOutcome::Failed(listing_error_message(&e));
        }
    };

    let records = filter_records(records, kinds);
    if records.is_empty() {
        info!("No supported accounts");
        return PollOutcome::NoAccounts {
            base_url: base_url.to_string(),
        };
    }

    let report = registry.collect(api, &records).await;
    PollOutcome::Report {
        report,
        base_url: base_url.to_string(),
    }
}

/// Message shown when the credential listing fails.
///
/// Transport failures are shown as is; anything else is unexpected.
pub fn listing_error_message(err: &FetchError) -> String {
    if err.is_transport() {
        err.to_string()
    } else {
        format!("Unexpected: {err}")
    }
}

/// Renders an outcome in the requested format.
pub fn render<Tz>(
    outcome: &PollOutcome,
    format: OutputFormat,
    pretty: bool,
    now: DateTime<Tz>,
) -> Result<String>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    match format {
        OutputFormat::Swiftbar => {
            let lines = match outcome {
                PollOutcome::Report { report, base_url } => {
                    SwiftBarFormatter::new(now).render_report(report, base_url)
                }
                PollOutcome::NoAccounts { base_url } => render_no_accounts(base_url),
                PollOutcome::Failed(message) => render_error(message),
            };
            Ok(lines.join("\n"))
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(pretty);
            match outcome {
                PollOutcome::Report { report, .. } => formatter.format_report(report),
                PollOutcome::NoAccounts { .. } => formatter.format_report(&QuotaReport::new()),
                PollOutcome::Failed(message) => formatter.format_error(message),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use quotabar_core::{AntigravityAccount, CodexAccount, CredentialRecord, ProviderAccount};
    use quotabar_fetch::{ApiCallRequest, ApiCallResponse};
    use serde_json::json;
    use std::sync::Mutex;

    /// Directory plus canned upstream replies keyed by URL.
    struct FakeApi {
        listing: Result<Vec<CredentialRecord>, fn() -> FetchError>,
        replies: Vec<(&'static str, String)>,
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ManagementApi for FakeApi {
        async fn list_credentials(&self) -> Result<Vec<CredentialRecord>, FetchError> {
            self.listing.clone().map_err(|make| make())
        }

        async fn api_call(&self, request: &ApiCallRequest) -> Result<ApiCallResponse, FetchError> {
            self.calls.lock().unwrap().push(request.url.clone());
            let body = self
                .replies
                .iter()
                .find(|(url, _)| *url == request.url)
                .map(|(_, body)| body.clone());
            Ok(match body {
                Some(body) => ApiCallResponse::new(200, body),
                None => ApiCallResponse::new(404, ""),
            })
        }
    }

    fn fake(records: Vec<CredentialRecord>, replies: Vec<(&'static str, String)>) -> FakeApi {
        FakeApi {
            listing: Ok(records),
            replies,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn scenario_records() -> Vec<CredentialRecord> {
        vec![
            CredentialRecord::new(
                "codex.json",
                ProviderAccount::Codex(CodexAccount {
                    chatgpt_account_id: "acct1".to_string(),
                    plan_type: "plus".to_string(),
                }),
            )
            .with_auth_index("a1")
            .with_email("u@x.com"),
            CredentialRecord::new(
                "antigravity.json",
                ProviderAccount::Antigravity(AntigravityAccount::default()),
            )
            .with_auth_index("a2")
            .with_email("v@y.com"),
        ]
    }

    fn scenario_api() -> FakeApi {
        fake(
            scenario_records(),
            vec![
                (
                    quotabar_providers::codex::CODEX_USAGE_URL,
                    json!({"rate_limit": {"primary_window": {"used_percent": 25, "reset_after_seconds": 1800}}})
                        .to_string(),
                ),
                (
                    quotabar_providers::antigravity::ANTIGRAVITY_QUOTA_URLS[0],
                    json!({"models": {"gemini-2.5-pro": {"quotaInfo": {
                        "remainingFraction": 0.4,
                        "resetTime": "2030-06-01T12:00:00Z"
                    }}}})
                    .to_string(),
                ),
            ],
        )
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 5, 31, 8, 15, 0).unwrap()
    }

    #[tokio::test]
    async fn test_end_to_end_swiftbar() {
        let api = scenario_api();
        let outcome = poll_with(&api, &ProviderRegistry::new(), &[], "http://cpa:8317").await;
        let output = render(&outcome, OutputFormat::Swiftbar, false, now()).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "🤖C:75% 🌀A:40% | size=13");
        assert!(lines.contains(&"🤖 Codex (1 accounts) | size=14 color=#ffffff"));
        assert!(lines.contains(&"--  🟢 u@x.com [PLUS] | font=Menlo size=12"));
        assert!(lines.contains(&"----  5h window: 75% 🔄5月31日 08:45 | font=Menlo size=11"));
        assert!(lines.contains(&"--  🟢 v@y.com | font=Menlo size=12"));
        assert!(lines.contains(
            &"----  Gemini 2.5 Pro: 40% 🔄6月1日 12:00 | font=Menlo size=11 color=#ff9800"
        ));
        assert!(lines.contains(&"🕐 Updated: 08:15:00 | size=11 color=#888888"));
        assert_eq!(
            lines.last().copied(),
            Some("⚙️ Management Center | href=http://cpa:8317 size=12")
        );

        // One Codex call and one Antigravity call: the first endpoint succeeded.
        assert_eq!(api.calls.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_provider_filter() {
        let api = scenario_api();
        let outcome = poll_with(
            &api,
            &ProviderRegistry::new(),
            &[ProviderKind::Antigravity],
            "http://cpa",
        )
        .await;

        let PollOutcome::Report { report, .. } = outcome else {
            panic!("expected a report");
        };
        assert!(report.codex.is_empty());
        assert_eq!(report.antigravity.len(), 1);
    }

    #[tokio::test]
    async fn test_no_accounts() {
        let api = fake(Vec::new(), Vec::new());
        let outcome = poll_with(&api, &ProviderRegistry::new(), &[], "http://cpa").await;
        let output = render(&outcome, OutputFormat::Swiftbar, false, now()).unwrap();

        assert_eq!(
            output,
            "📊 No accounts | size=13\n---\nNo Codex or Antigravity accounts found | color=#888888\n---\n⚙️ Management Center | href=http://cpa"
        );
    }

    #[tokio::test]
    async fn test_listing_transport_failure_renders_error() {
        let api = FakeApi {
            listing: Err(|| FetchError::Status {
                code: 401,
                body: "unauthorized".to_string(),
            }),
            replies: Vec::new(),
            calls: Mutex::new(Vec::new()),
        };
        let outcome = poll_with(&api, &ProviderRegistry::new(), &[], "http://cpa").await;
        let output = render(&outcome, OutputFormat::Swiftbar, false, now()).unwrap();

        assert_eq!(
            output,
            "⚠️ Quota | color=red\n---\nError: HTTP 401: unauthorized | color=red\n---\n🔄 Retry | refresh=true"
        );
        assert!(api.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_listing_decode_failure_is_unexpected() {
        let err = FetchError::InvalidResponse("auth-files response is not an object".to_string());
        assert_eq!(
            listing_error_message(&err),
            "Unexpected: Invalid response: auth-files response is not an object"
        );
        assert_eq!(listing_error_message(&FetchError::Timeout), "Request timed out");
    }

    #[tokio::test]
    async fn test_json_output() {
        let api = scenario_api();
        let outcome = poll_with(&api, &ProviderRegistry::new(), &[], "http://cpa").await;
        let output = render(&outcome, OutputFormat::Json, false, now()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["codex"][0]["email"], "u@x.com");
        assert_eq!(value["codex"][0]["primary"]["remainingPercent"], 75.0);
        assert_eq!(value["codex"][0]["secondary"], serde_json::Value::Null);
        assert_eq!(value["antigravity"][0]["groups"][0]["remainingPercent"], 40);
        assert!(value["antigravity"][0].get("error").is_none());
    }

    #[test]
    fn test_json_error_output() {
        let outcome = PollOutcome::Failed("CPA_MANAGEMENT_KEY not set".to_string());
        let output = render(&outcome, OutputFormat::Json, false, now()).unwrap();
        assert_eq!(output, r#"{"error":"CPA_MANAGEMENT_KEY not set"}"#);
    }
}
