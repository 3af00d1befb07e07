//! Credential records listed by the management API.
//!
//! A [`CredentialRecord`] identifies one stored account. The fields every
//! provider shares live on the record itself; provider-specific fields live
//! in [`ProviderAccount`], so the provider of a record is determined by its
//! variant rather than by comparing tag strings.

use serde::{Deserialize, Serialize};

use super::provider::ProviderKind;

// ============================================================================
// Provider Account
// ============================================================================

/// Codex-specific account fields (from the stored `id_token`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodexAccount {
    /// ChatGPT account id, sent upstream as `Chatgpt-Account-Id`.
    pub chatgpt_account_id: String,
    /// Plan tier recorded in the credential (e.g. "plus", "pro").
    pub plan_type: String,
}

/// Antigravity-specific account fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AntigravityAccount {
    /// Cloud project id; empty means "use the default project".
    pub project_id: String,
}

/// Provider-specific half of a credential record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "provider", rename_all = "lowercase")]
pub enum ProviderAccount {
    /// A Codex credential.
    Codex(CodexAccount),
    /// An Antigravity credential.
    Antigravity(AntigravityAccount),
}

impl ProviderAccount {
    /// Returns the provider kind of this account.
    pub fn kind(&self) -> ProviderKind {
        match self {
            Self::Codex(_) => ProviderKind::Codex,
            Self::Antigravity(_) => ProviderKind::Antigravity,
        }
    }
}

// ============================================================================
// Credential Record
// ============================================================================

/// One stored credential ("auth file") belonging to a supported provider.
///
/// Records are created by parsing the directory listing and are not
/// modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRecord {
    /// Auth file name.
    pub name: String,
    /// Opaque index telling the management API which credential to proxy with.
    pub auth_index: String,
    /// Account email shown in the menu.
    pub email: String,
    /// Operational status reported by the management API.
    pub status: String,
    /// Free-form status detail.
    pub status_message: String,
    /// Credential disabled by the operator.
    pub disabled: bool,
    /// Credential currently unavailable upstream.
    pub unavailable: bool,
    /// Optional label.
    pub label: String,
    /// Account type (e.g. "oauth").
    pub account_type: String,
    /// Provider-specific fields.
    #[serde(flatten)]
    pub account: ProviderAccount,
}

impl CredentialRecord {
    /// Creates a record with empty shared fields for the given account.
    pub fn new(name: impl Into<String>, account: ProviderAccount) -> Self {
        Self {
            name: name.into(),
            auth_index: String::new(),
            email: String::new(),
            status: "unknown".to_string(),
            status_message: String::new(),
            disabled: false,
            unavailable: false,
            label: String::new(),
            account_type: String::new(),
            account,
        }
    }

    /// Sets the proxy-routing index.
    #[must_use]
    pub fn with_auth_index(mut self, auth_index: impl Into<String>) -> Self {
        self.auth_index = auth_index.into();
        self
    }

    /// Sets the account email.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Returns the provider kind of this record.
    pub fn provider(&self) -> ProviderKind {
        self.account.kind()
    }

    /// Returns the Codex fields if this is a Codex record.
    pub fn codex(&self) -> Option<&CodexAccount> {
        match &self.account {
            ProviderAccount::Codex(account) => Some(account),
            ProviderAccount::Antigravity(_) => None,
        }
    }

    /// Returns the Antigravity fields if this is an Antigravity record.
    pub fn antigravity(&self) -> Option<&AntigravityAccount> {
        match &self.account {
            ProviderAccount::Antigravity(account) => Some(account),
            ProviderAccount::Codex(_) => None,
        }
    }
}
