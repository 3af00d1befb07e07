// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `QuotaBar` Core
//!
//! Core types, models, and traits for the `QuotaBar` status-bar plugin.
//!
//! This crate provides the foundational abstractions used across all other
//! `QuotaBar` crates:
//!
//! - Domain models (providers, credential records, quota results)
//! - Error types
//! - The [`Quota`] capability shared by all per-account results
//!
//! ## Key Types
//!
//! ### Credentials
//! - [`ProviderKind`] - Closed set of supported providers
//! - [`CredentialRecord`] - One stored account listed by the management API
//! - [`ProviderAccount`] - Provider-specific credential fields
//!
//! ### Quotas
//! - [`CodexQuota`] / [`CodexWindow`] - Codex usage windows
//! - [`AntigravityQuota`] / [`ModelGroupQuota`] - Antigravity model groups
//! - [`AccountQuota`] - Result of one account fetch
//! - [`QuotaReport`] - All results of one poll

pub mod error;
pub mod models;
pub mod traits;

// Re-export error types
pub use error::CoreError;

// Re-export all model types
pub use models::{
    // Credentials
    AntigravityAccount,
    CodexAccount,
    CredentialRecord,
    ProviderAccount,
    ProviderKind,
    // Quotas
    AccountQuota,
    AntigravityQuota,
    CodexQuota,
    CodexUsage,
    CodexWindow,
    ModelGroupQuota,
    QuotaReport,
    fraction_to_percent,
};

// Re-export traits
pub use traits::Quota;
