//! Antigravity provider.
//!
//! Model quotas come from Cloud Code's `fetchAvailableModels`, relayed
//! through the management API. Several endpoints serve it; they are tried
//! in a fixed order.

mod fetcher;
mod groups;
mod parser;

pub use fetcher::{
    AntigravityQuotaFetcher, ANTIGRAVITY_QUOTA_URLS, ANTIGRAVITY_REQUEST_HEADERS,
    DEFAULT_PROJECT_ID,
};
pub use groups::{aggregate, group_for, GroupDef, UnmappedModels, MODEL_GROUPS};
pub use parser::{models_of, ModelQuotaEntry};
