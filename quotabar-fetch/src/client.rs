//! HTTP client for the management API.

use async_trait::async_trait;
use quotabar_core::CredentialRecord;
use reqwest::{header, header::HeaderMap, header::HeaderValue, Client, Response};
use tracing::{debug, instrument};

use crate::api::{ApiCallRequest, ApiCallResponse, ManagementApi};
use crate::config::ManagementConfig;
use crate::directory::parse_auth_files;
use crate::error::FetchError;

/// Browser-like user agent sent to the management API.
pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

const AUTH_FILES_ENDPOINT: &str = "auth-files";
const API_CALL_ENDPOINT: &str = "api-call";

// ============================================================================
// Management Client
// ============================================================================

/// Management API client bound to one server and key.
#[derive(Debug, Clone)]
pub struct ManagementClient {
    inner: Client,
    config: ManagementConfig,
}

impl ManagementClient {
    /// Creates a client from a resolved config.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::InvalidHeader` if the key cannot be sent as a
    /// header, or `FetchError::Connection` if the client cannot be built.
    pub fn new(config: &ManagementConfig) -> Result<Self, FetchError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.management_key()))
            .map_err(|e| FetchError::InvalidHeader(e.to_string()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        let inner = Client::builder()
            .timeout(config.timeout())
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            inner,
            config: config.clone(),
        })
    }

    /// Reads a response, mapping non-2xx statuses to `FetchError::Status`.
    async fn read_body(response: Response) -> Result<String, FetchError> {
        let status = response.status();
        debug!(status = %status, "Response received");

        let body = response.text().await?;
        if status.is_success() {
            Ok(body)
        } else {
            Err(FetchError::Status {
                code: status.as_u16(),
                body,
            })
        }
    }
}

#[async_trait]
impl ManagementApi for ManagementClient {
    #[instrument(skip(self), fields(base = %self.config.base_url()))]
    async fn list_credentials(&self) -> Result<Vec<CredentialRecord>, FetchError> {
        let url = self.config.management_url(AUTH_FILES_ENDPOINT);
        debug!(url = %url, "Listing auth files");

        let response = self.inner.get(&url).send().await?;
        let body = Self::read_body(response).await?;
        parse_auth_files(&body)
    }

    #[instrument(skip_all, fields(method = ?request.method, url = %request.url))]
    async fn api_call(&self, request: &ApiCallRequest) -> Result<ApiCallResponse, FetchError> {
        let url = self.config.management_url(API_CALL_ENDPOINT);
        debug!("Relaying request");

        let response = self.inner.post(&url).json(request).send().await?;
        let body = Self::read_body(response).await?;
        let parsed: ApiCallResponse = serde_json::from_str(&body)?;

        debug!(status_code = parsed.status_code, "Relayed response");
        Ok(parsed)
    }
}
