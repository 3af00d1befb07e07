//! Codex provider.
//!
//! Usage comes from the ChatGPT `wham/usage` endpoint, relayed through the
//! management API with the account's stored token.

mod fetcher;
mod parser;

pub use fetcher::{CodexQuotaFetcher, CODEX_REQUEST_HEADERS, CODEX_USAGE_URL};
pub use parser::{parse_usage_body, ParsedUsage};
