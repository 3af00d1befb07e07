//! Codex quota fetcher.
//!
//! One relayed GET to the ChatGPT usage endpoint per account. Every failure
//! ends up as the account's error string; nothing is propagated.

use quotabar_core::{CodexAccount, CodexQuota, CredentialRecord};
use quotabar_fetch::{ApiCallRequest, ManagementApi};
use tracing::{debug, instrument, warn};

use super::parser::{parse_usage_body, ParsedUsage};
use crate::error::QuotaError;

/// ChatGPT usage endpoint.
pub const CODEX_USAGE_URL: &str = "https://chatgpt.com/backend-api/wham/usage";

/// Header template for the usage request. `$TOKEN$` is filled in by the
/// management server.
pub const CODEX_REQUEST_HEADERS: &[(&str, &str)] = &[
    ("Authorization", "Bearer $TOKEN$"),
    ("Content-Type", "application/json"),
    (
        "User-Agent",
        "codex_cli_rs/0.76.0 (Debian 13.0.0; x86_64) WindowsTerminal",
    ),
];

const ACCOUNT_ID_HEADER: &str = "Chatgpt-Account-Id";

// ============================================================================
// Fetcher
// ============================================================================

/// Fetches Codex usage through the management API.
#[derive(Debug, Clone)]
pub struct CodexQuotaFetcher {
    usage_url: String,
}

impl Default for CodexQuotaFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl CodexQuotaFetcher {
    /// Creates a fetcher for the standard usage endpoint.
    pub fn new() -> Self {
        Self {
            usage_url: CODEX_USAGE_URL.to_string(),
        }
    }

    /// Overrides the usage endpoint.
    #[must_use]
    pub fn with_usage_url(mut self, url: impl Into<String>) -> Self {
        self.usage_url = url.into();
        self
    }

    /// Builds the relayed request for an account.
    pub fn build_request(&self, auth_index: &str, account_id: &str) -> ApiCallRequest {
        ApiCallRequest::get(auth_index, &self.usage_url)
            .with_headers(CODEX_REQUEST_HEADERS.iter().copied())
            .with_header(ACCOUNT_ID_HEADER, account_id)
    }

    /// Fetches quota for one Codex credential.
    #[instrument(skip_all, fields(email = %record.email))]
    pub async fn fetch(
        &self,
        api: &dyn ManagementApi,
        record: &CredentialRecord,
        account: &CodexAccount,
    ) -> CodexQuota {
        match self.try_fetch(api, record, account).await {
            Ok(parsed) => {
                let plan = parsed
                    .plan_type
                    .unwrap_or_else(|| account.plan_type.clone());
                CodexQuota::ok(&record.email, plan, parsed.usage)
            }
            Err(e) => {
                warn!(error = %e, "Codex quota fetch failed");
                CodexQuota::failed(&record.email, &account.plan_type, e.to_string())
            }
        }
    }

    async fn try_fetch(
        &self,
        api: &dyn ManagementApi,
        record: &CredentialRecord,
        account: &CodexAccount,
    ) -> Result<ParsedUsage, QuotaError> {
        if record.auth_index.is_empty() {
            return Err(QuotaError::MissingAuthIndex);
        }
        if account.chatgpt_account_id.is_empty() {
            return Err(QuotaError::MissingAccountId);
        }

        let request = self.build_request(&record.auth_index, &account.chatgpt_account_id);
        let response = api.api_call(&request).await?;
        debug!(status = response.status_code, "Codex usage response");

        if !response.is_success() {
            return Err(QuotaError::UpstreamStatus(response.status_code));
        }

        let body = response.body_json()?.ok_or(QuotaError::EmptyResponse)?;
        parse_usage_body(&body)
    }
}
