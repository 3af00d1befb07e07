//! Domain models for QuotaBar.
//!
//! This module contains the data structures for credential records and the
//! per-provider quota results built from them. All values are created fresh
//! on every poll and dropped after rendering.
//!
//! ## Submodules
//!
//! - [`provider`] - `ProviderKind`
//! - [`credential`] - `CredentialRecord` and its per-provider account fields
//! - [`quota`] - `CodexQuota`, `AntigravityQuota`, `ModelGroupQuota`, `QuotaReport`

mod credential;
mod provider;
mod quota;

// Re-export everything at the models level
pub use credential::{AntigravityAccount, CodexAccount, CredentialRecord, ProviderAccount};
pub use provider::ProviderKind;
pub use quota::{
    fraction_to_percent, AccountQuota, AntigravityQuota, CodexQuota, CodexUsage, CodexWindow,
    ModelGroupQuota, QuotaReport,
};
