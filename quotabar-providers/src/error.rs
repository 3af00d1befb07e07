//! Per-account quota errors.

use quotabar_fetch::FetchError;
use thiserror::Error;

/// Reasons a single account's quota could not be obtained.
///
/// The `Display` text is what the account shows as its error.
#[derive(Debug, Error)]
pub enum QuotaError {
    /// Credential has no proxy-routing index.
    #[error("missing auth_index")]
    MissingAuthIndex,

    /// Codex credential has no ChatGPT account id.
    #[error("missing chatgpt_account_id")]
    MissingAccountId,

    /// Relayed request returned a non-2xx status.
    #[error("HTTP {0}")]
    UpstreamStatus(u16),

    /// Relayed request returned no body.
    #[error("empty response")]
    EmptyResponse,

    /// Antigravity body had no usable `models` mapping.
    #[error("no models in response")]
    NoModels,

    /// Fallback list was empty.
    #[error("all endpoints failed")]
    AllEndpointsFailed,

    /// Relayed body was not the expected JSON.
    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    /// The management API call itself failed.
    #[error(transparent)]
    Transport(#[from] FetchError),
}

impl From<serde_json::Error> for QuotaError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidJson(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_strings() {
        assert_eq!(QuotaError::MissingAuthIndex.to_string(), "missing auth_index");
        assert_eq!(
            QuotaError::MissingAccountId.to_string(),
            "missing chatgpt_account_id"
        );
        assert_eq!(QuotaError::UpstreamStatus(429).to_string(), "HTTP 429");
        assert_eq!(QuotaError::EmptyResponse.to_string(), "empty response");
        assert_eq!(QuotaError::NoModels.to_string(), "no models in response");
    }

    #[test]
    fn test_transport_is_transparent() {
        let err = QuotaError::from(FetchError::Status {
            code: 502,
            body: "bad gateway".to_string(),
        });
        assert_eq!(err.to_string(), "HTTP 502: bad gateway");
    }
}
