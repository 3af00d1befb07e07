//! Antigravity quota fetcher.
//!
//! Tries the Cloud Code endpoints in order and stops at the first one that
//! returns a non-empty `models` mapping. Every failure along the way is
//! recorded; the reported error is chosen by the configured [`ErrorPolicy`].

use quotabar_core::{AntigravityAccount, AntigravityQuota, CredentialRecord, ModelGroupQuota};
use quotabar_fetch::{ApiCallRequest, ErrorPolicy, FallbackRun, ManagementApi};
use serde_json::json;
use tracing::{debug, info, instrument, warn};

use super::groups::{aggregate, UnmappedModels};
use super::parser::models_of;
use crate::error::QuotaError;

/// Quota endpoints, in the order they are tried.
pub const ANTIGRAVITY_QUOTA_URLS: &[&str] = &[
    "https://daily-cloudcode-pa.googleapis.com/v1internal:fetchAvailableModels",
    "https://daily-cloudcode-pa.sandbox.googleapis.com/v1internal:fetchAvailableModels",
    "https://cloudcode-pa.googleapis.com/v1internal:fetchAvailableModels",
];

/// Header template for quota requests.
pub const ANTIGRAVITY_REQUEST_HEADERS: &[(&str, &str)] = &[
    ("Authorization", "Bearer $TOKEN$"),
    ("Content-Type", "application/json"),
    ("User-Agent", "antigravity/1.11.5 windows/amd64"),
];

/// Project used when the credential carries none.
pub const DEFAULT_PROJECT_ID: &str = "bamboo-precept-lgxtn";

// ============================================================================
// Fetcher
// ============================================================================

/// Fetches Antigravity model quotas through the management API.
#[derive(Debug, Clone)]
pub struct AntigravityQuotaFetcher {
    endpoints: Vec<String>,
    error_policy: ErrorPolicy,
    unmapped: UnmappedModels,
}

impl Default for AntigravityQuotaFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl AntigravityQuotaFetcher {
    /// Creates a fetcher for the standard endpoints.
    pub fn new() -> Self {
        Self {
            endpoints: ANTIGRAVITY_QUOTA_URLS.iter().map(ToString::to_string).collect(),
            error_policy: ErrorPolicy::default(),
            unmapped: UnmappedModels::default(),
        }
    }

    /// Replaces the endpoint list.
    #[must_use]
    pub fn with_endpoints<I, S>(mut self, endpoints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.endpoints = endpoints.into_iter().map(Into::into).collect();
        self
    }

    /// Sets which error a fully failed loop reports.
    #[must_use]
    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    /// Sets how models outside the group table are handled.
    #[must_use]
    pub fn with_unmapped_models(mut self, unmapped: UnmappedModels) -> Self {
        self.unmapped = unmapped;
        self
    }

    /// Returns the endpoints in try order.
    pub fn endpoints(&self) -> &[String] {
        &self.endpoints
    }

    /// Builds the relayed request for one endpoint.
    pub fn build_request(&self, auth_index: &str, url: &str, project_id: &str) -> ApiCallRequest {
        let body = json!({ "project": project_id }).to_string();
        ApiCallRequest::post(auth_index, url, body)
            .with_headers(ANTIGRAVITY_REQUEST_HEADERS.iter().copied())
    }

    /// Fetches quota for one Antigravity credential.
    #[instrument(skip_all, fields(email = %record.email))]
    pub async fn fetch(
        &self,
        api: &dyn ManagementApi,
        record: &CredentialRecord,
        account: &AntigravityAccount,
    ) -> AntigravityQuota {
        if record.auth_index.is_empty() {
            return AntigravityQuota::failed(&record.email, QuotaError::MissingAuthIndex.to_string());
        }

        let project_id = if account.project_id.is_empty() {
            DEFAULT_PROJECT_ID
        } else {
            account.project_id.as_str()
        };
        debug!(project = %project_id, "Resolved project");

        let mut run = FallbackRun::new();
        for url in &self.endpoints {
            run.begin(url.as_str());
            let request = self.build_request(&record.auth_index, url, project_id);

            match self.try_endpoint(api, &request).await {
                Ok(groups) => {
                    run.succeed();
                    info!(
                        groups = groups.len(),
                        attempts = run.attempts().len(),
                        "Fetched Antigravity quota"
                    );
                    return AntigravityQuota::ok(&record.email, groups);
                }
                Err(e) => run.fail(e.to_string()),
            }
        }

        let message = if run.attempts().is_empty() {
            QuotaError::AllEndpointsFailed.to_string()
        } else {
            run.failure_message(self.error_policy)
        };
        warn!(
            error = %message,
            attempts = run.attempts().len(),
            elapsed = ?run.elapsed(),
            "All Antigravity endpoints failed"
        );
        AntigravityQuota::failed(&record.email, message)
    }

    async fn try_endpoint(
        &self,
        api: &dyn ManagementApi,
        request: &ApiCallRequest,
    ) -> Result<Vec<ModelGroupQuota>, QuotaError> {
        let response = api.api_call(request).await?;
        if !response.is_success() {
            return Err(QuotaError::UpstreamStatus(response.status_code));
        }

        let body = response.body_json()?.ok_or(QuotaError::EmptyResponse)?;
        let models = models_of(&body)?;
        Ok(aggregate(models, self.unmapped))
    }
}
