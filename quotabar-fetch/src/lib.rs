// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # QuotaBar Fetch
//!
//! Management API access for QuotaBar.
//!
//! - [`config::ManagementConfig`] - Base URL, key and timeout, from env
//! - [`api::ManagementApi`] - The seam quota fetchers call through
//! - [`client::ManagementClient`] - reqwest implementation of that seam
//! - [`directory`] - Parsing of the credential listing
//! - [`fallback::FallbackRun`] - Attempt bookkeeping for fallback loops
//!
//! ## Example
//!
//! ```ignore
//! use quotabar_fetch::{ManagementApi, ManagementClient, ManagementConfig};
//!
//! let config = ManagementConfig::load(None)?;
//! let client = ManagementClient::new(&config)?;
//! let records = client.list_credentials().await?;
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod directory;
pub mod error;
pub mod fallback;
pub mod lenient;

pub use api::{ApiCallRequest, ApiCallResponse, ManagementApi, ProxyMethod};
pub use client::ManagementClient;
pub use config::ManagementConfig;
pub use directory::parse_auth_files;
pub use error::{ConfigError, FetchError};
pub use fallback::{ErrorPolicy, FallbackRun, FetchAttempt, ALL_FAILED};
