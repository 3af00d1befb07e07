//! Fetch error types.

use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// Main Fetch Error
// ============================================================================

/// Error type for management API calls.
///
/// The first three variants are transport failures; the rest mean a
/// response arrived but could not be used.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level failure (DNS, connect, TLS, reset).
    #[error("Connection error: {0}")]
    Connection(#[source] reqwest::Error),

    /// Request exceeded the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// Non-2xx status from the management API.
    #[error("HTTP {code}: {body}")]
    Status {
        /// HTTP status code.
        code: u16,
        /// Response body, lossily decoded.
        body: String,
    },

    /// Response body was not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Response was JSON but not the expected structure.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Header value could not be encoded.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),
}

impl FetchError {
    /// Returns true for transport failures (network, timeout, non-2xx).
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Connection(_) | Self::Timeout | Self::Status { .. }
        )
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Connection(err)
        }
    }
}

// ============================================================================
// Config Error
// ============================================================================

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required variable missing or empty.
    #[error("{0} not set")]
    Missing(&'static str),

    /// Base URL does not parse.
    #[error("Invalid base URL {url}: {reason}")]
    InvalidUrl {
        /// The rejected value.
        url: String,
        /// Parser message.
        reason: String,
    },

    /// Explicit env file could not be read.
    #[error("Cannot read env file {}: {reason}", path.display())]
    EnvFile {
        /// Path of the env file.
        path: PathBuf,
        /// Underlying error.
        reason: String,
    },
}
