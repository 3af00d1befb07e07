//! The management API seam and its `api-call` wire types.
//!
//! The management server exposes two primitives the quota fetchers need:
//! listing stored credentials, and relaying an outbound request on behalf of
//! one of them (`POST /v0/management/api-call`). [`ManagementApi`] abstracts
//! both so fetchers can run against the real client or an in-memory double.

use std::collections::BTreeMap;

use async_trait::async_trait;
use quotabar_core::CredentialRecord;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::FetchError;

// ============================================================================
// Trait
// ============================================================================

/// Access to the management API.
#[async_trait]
pub trait ManagementApi: Send + Sync {
    /// Lists credentials of supported providers, in listing order.
    async fn list_credentials(&self) -> Result<Vec<CredentialRecord>, FetchError>;

    /// Relays one request upstream using the credential named in `request`.
    async fn api_call(&self, request: &ApiCallRequest) -> Result<ApiCallResponse, FetchError>;
}

// ============================================================================
// Request
// ============================================================================

/// HTTP method of a relayed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProxyMethod {
    /// GET
    Get,
    /// POST
    Post,
}

/// Payload of `POST /v0/management/api-call`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCallRequest {
    /// Credential to relay with.
    pub auth_index: String,
    /// Upstream method.
    pub method: ProxyMethod,
    /// Upstream URL.
    pub url: String,
    /// Upstream headers; `$TOKEN$` is substituted by the server.
    pub header: BTreeMap<String, String>,
    /// Upstream body as text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl ApiCallRequest {
    /// Creates a GET request.
    pub fn get(auth_index: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            auth_index: auth_index.into(),
            method: ProxyMethod::Get,
            url: url.into(),
            header: BTreeMap::new(),
            data: None,
        }
    }

    /// Creates a POST request with a text body.
    pub fn post(
        auth_index: impl Into<String>,
        url: impl Into<String>,
        data: impl Into<String>,
    ) -> Self {
        Self {
            method: ProxyMethod::Post,
            data: Some(data.into()),
            ..Self::get(auth_index, url)
        }
    }

    /// Adds headers from a `(name, value)` template.
    #[must_use]
    pub fn with_headers<'a, I>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        self.header
            .extend(headers.into_iter().map(|(k, v)| (k.to_string(), v.to_string())));
        self
    }

    /// Adds one header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.header.insert(name.into(), value.into());
        self
    }
}

// ============================================================================
// Response
// ============================================================================

/// Response of `POST /v0/management/api-call`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiCallResponse {
    /// Upstream status code; 0 when the server omitted it.
    #[serde(default, deserialize_with = "crate::lenient::status_code")]
    pub status_code: u16,
    /// Upstream headers, as sent by the server.
    #[serde(default)]
    pub header: Value,
    /// Upstream body: usually JSON text, sometimes already structured.
    #[serde(default)]
    pub body: Value,
}

impl ApiCallResponse {
    /// Creates a response with a text body.
    pub fn new(status_code: u16, body: impl Into<String>) -> Self {
        Self {
            status_code,
            header: Value::Null,
            body: Value::String(body.into()),
        }
    }

    /// Returns true for a 2xx upstream status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Decodes the upstream body.
    ///
    /// Returns `Ok(None)` for a missing or empty body. Text bodies are parsed
    /// as JSON; structured bodies are returned as is.
    ///
    /// # Errors
    ///
    /// Returns the JSON error if a text body is not valid JSON.
    pub fn body_json(&self) -> Result<Option<Value>, serde_json::Error> {
        match &self.body {
            Value::Null => Ok(None),
            Value::String(text) if text.trim().is_empty() => Ok(None),
            Value::String(text) => serde_json::from_str(text).map(Some),
            other => Ok(Some(other.clone())),
        }
    }
}
