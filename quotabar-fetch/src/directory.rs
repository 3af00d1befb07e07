//! Credential directory parsing.
//!
//! Turns the `GET /v0/management/auth-files` response into
//! [`CredentialRecord`]s: entries of unsupported providers are dropped,
//! missing fields take defaults, and listing order is preserved.

use quotabar_core::{
    AntigravityAccount, CodexAccount, CredentialRecord, ProviderAccount, ProviderKind,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::FetchError;
use crate::lenient;

// ============================================================================
// Wire Types
// ============================================================================

/// One entry of the `files` array.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AuthFileEntry {
    /// Auth file name.
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    /// Provider tag.
    #[serde(deserialize_with = "lenient::string")]
    pub provider: String,
    /// Proxy-routing index (snake_case spelling).
    #[serde(deserialize_with = "lenient::string")]
    pub auth_index: String,
    /// Proxy-routing index (camelCase spelling).
    #[serde(rename = "authIndex", deserialize_with = "lenient::string")]
    pub auth_index_camel: String,
    /// Account email.
    #[serde(deserialize_with = "lenient::string")]
    pub email: String,
    /// Operational status.
    #[serde(deserialize_with = "lenient::opt_string")]
    pub status: Option<String>,
    /// Status detail.
    #[serde(deserialize_with = "lenient::string")]
    pub status_message: String,
    /// Disabled flag.
    #[serde(deserialize_with = "lenient::boolean")]
    pub disabled: bool,
    /// Unavailable flag.
    #[serde(deserialize_with = "lenient::boolean")]
    pub unavailable: bool,
    /// Label.
    #[serde(deserialize_with = "lenient::string")]
    pub label: String,
    /// Account type.
    #[serde(deserialize_with = "lenient::string")]
    pub account_type: String,
    /// Decoded id token claims (Codex).
    #[serde(deserialize_with = "id_token")]
    pub id_token: Option<IdTokenClaims>,
    /// Cloud project id (Antigravity, snake_case spelling).
    #[serde(deserialize_with = "lenient::string")]
    pub project_id: String,
    /// Cloud project id (Antigravity, camelCase spelling).
    #[serde(rename = "projectId", deserialize_with = "lenient::string")]
    pub project_id_camel: String,
}

/// Claims of a Codex `id_token` the directory exposes.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct IdTokenClaims {
    /// ChatGPT account id.
    #[serde(deserialize_with = "lenient::string")]
    pub chatgpt_account_id: String,
    /// Plan tier.
    #[serde(deserialize_with = "lenient::string")]
    pub plan_type: String,
}

/// `id_token` is only useful as an object; anything else is ignored.
fn id_token<'de, D>(deserializer: D) -> Result<Option<IdTokenClaims>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => Ok(IdTokenClaims::deserialize(value).ok()),
        _ => Ok(None),
    }
}

/// Returns `primary` unless it is empty.
fn first_non_empty(primary: String, fallback: String) -> String {
    if primary.is_empty() { fallback } else { primary }
}

impl AuthFileEntry {
    /// Converts the entry into a record.
    ///
    /// Returns `None` if the provider is not supported.
    pub fn into_record(self) -> Option<CredentialRecord> {
        let kind = ProviderKind::from_tag(&self.provider)?;

        let account = match kind {
            ProviderKind::Codex => {
                let claims = self.id_token.unwrap_or_default();
                ProviderAccount::Codex(CodexAccount {
                    chatgpt_account_id: claims.chatgpt_account_id,
                    plan_type: claims.plan_type,
                })
            }
            ProviderKind::Antigravity => ProviderAccount::Antigravity(AntigravityAccount {
                project_id: first_non_empty(self.project_id, self.project_id_camel),
            }),
        };

        Some(CredentialRecord {
            name: self.name,
            auth_index: first_non_empty(self.auth_index, self.auth_index_camel),
            email: self.email,
            status: self.status.unwrap_or_else(|| "unknown".to_string()),
            status_message: self.status_message,
            disabled: self.disabled,
            unavailable: self.unavailable,
            label: self.label,
            account_type: self.account_type,
            account,
        })
    }
}

// ============================================================================
// Parsing
// ============================================================================

/// Parses an `auth-files` body into records of supported providers.
///
/// A body without `files` yields no records. Non-object entries are skipped.
///
/// # Errors
///
/// Returns `FetchError::Json` for invalid JSON and
/// `FetchError::InvalidResponse` if the body is not an object.
pub fn parse_auth_files(body: &str) -> Result<Vec<CredentialRecord>, FetchError> {
    let value: Value = serde_json::from_str(body)?;
    let Value::Object(mut root) = value else {
        return Err(FetchError::InvalidResponse(
            "auth-files response is not an object".to_string(),
        ));
    };

    let files = match root.remove("files") {
        Some(Value::Array(files)) => files,
        Some(Value::Null) | None => Vec::new(),
        Some(_) => {
            return Err(FetchError::InvalidResponse(
                "auth-files `files` is not an array".to_string(),
            ));
        }
    };

    let total = files.len();
    let records: Vec<CredentialRecord> = files
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|entry| match AuthFileEntry::deserialize(entry) {
            Ok(entry) => entry.into_record(),
            Err(e) => {
                warn!(error = %e, "Skipping malformed auth file entry");
                None
            }
        })
        .collect();

    debug!(total, supported = records.len(), "Parsed auth files");
    Ok(records)
}
