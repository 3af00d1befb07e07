//! Core error types for `QuotaBar`.

use thiserror::Error;

/// Core error type for `QuotaBar` operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Provider tag outside the supported set.
    #[error("Unsupported provider: {0}")]
    UnsupportedProvider(String),

    /// Invalid data from API response.
    #[error("Invalid data: {0}")]
    InvalidData(String),
}
