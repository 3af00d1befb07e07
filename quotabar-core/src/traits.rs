//! Trait definitions for QuotaBar.
//!
//! [`Quota`] is the capability shared by every per-account result: it either
//! carries data or an error message, and it knows which provider and account
//! it belongs to.

use crate::models::{AccountQuota, AntigravityQuota, CodexQuota, ProviderKind};

/// Shared view over a per-account quota result.
pub trait Quota {
    /// Returns the provider this result belongs to.
    fn kind(&self) -> ProviderKind;

    /// Returns the account email.
    fn email(&self) -> &str;

    /// Returns the failure reason, or `None` if data was obtained.
    fn error(&self) -> Option<&str>;

    /// Returns true if the result carries quota data.
    fn has_data(&self) -> bool {
        self.error().is_none()
    }

    /// Returns the email for display, or "unknown" when empty.
    fn display_name(&self) -> &str {
        match self.email() {
            "" => "unknown",
            email => email,
        }
    }
}

impl Quota for CodexQuota {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Codex
    }

    fn email(&self) -> &str {
        &self.email
    }

    fn error(&self) -> Option<&str> {
        self.outcome.as_ref().err().map(String::as_str)
    }
}

impl Quota for AntigravityQuota {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Antigravity
    }

    fn email(&self) -> &str {
        &self.email
    }

    fn error(&self) -> Option<&str> {
        self.outcome.as_ref().err().map(String::as_str)
    }
}

impl Quota for AccountQuota {
    fn kind(&self) -> ProviderKind {
        AccountQuota::kind(self)
    }

    fn email(&self) -> &str {
        match self {
            Self::Codex(q) => q.email(),
            Self::Antigravity(q) => q.email(),
        }
    }

    fn error(&self) -> Option<&str> {
        match self {
            Self::Codex(q) => q.error(),
            Self::Antigravity(q) => q.error(),
        }
    }
}
