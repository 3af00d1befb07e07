// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # QuotaBar Providers
//!
//! Quota fetchers for the providers QuotaBar supports.
//!
//! | Provider | Upstream | Requests per account |
//! |----------|----------|----------------------|
//! | Codex | `chatgpt.com/backend-api/wham/usage` | 1 GET |
//! | Antigravity | Cloud Code `fetchAvailableModels` | up to 3 POSTs, first success wins |
//!
//! Every request is relayed through the management API's `api-call`
//! endpoint, so fetchers only ever talk to a [`ManagementApi`].
//!
//! ## Usage
//!
//! ```ignore
//! use quotabar_providers::ProviderRegistry;
//!
//! let records = client.list_credentials().await?;
//! let report = ProviderRegistry::new().collect(&client, &records).await;
//! ```
//!
//! [`ManagementApi`]: quotabar_fetch::ManagementApi

pub mod antigravity;
pub mod codex;
pub mod error;
pub mod lookup;
pub mod registry;

pub use antigravity::{AntigravityQuotaFetcher, UnmappedModels};
pub use codex::CodexQuotaFetcher;
pub use error::QuotaError;
pub use registry::{filter_records, ProviderRegistry};
