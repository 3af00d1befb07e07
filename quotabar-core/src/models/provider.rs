//! Provider-related types.
//!
//! This module contains [`ProviderKind`], the closed set of credential
//! providers whose quota can be reported.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ============================================================================
// Provider Kind
// ============================================================================

/// Supported credential providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// OpenAI Codex (ChatGPT backend usage windows).
    Codex,
    /// Google Antigravity (per-model remaining fractions).
    Antigravity,
}

impl ProviderKind {
    /// Returns the display name for this provider.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Codex => "Codex",
            Self::Antigravity => "Antigravity",
        }
    }

    /// Returns the provider tag used by the management API.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Codex => "codex",
            Self::Antigravity => "antigravity",
        }
    }

    /// Returns the menu icon for this provider.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Codex => "🤖",
            Self::Antigravity => "🌀",
        }
    }

    /// Returns all supported provider kinds, in display order.
    pub fn all() -> &'static [ProviderKind] {
        &[Self::Codex, Self::Antigravity]
    }

    /// Looks up a provider by its management API tag.
    ///
    /// Returns `None` for tags outside the supported set.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::all().iter().copied().find(|kind| kind.tag() == tag)
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ProviderKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(&s.trim().to_ascii_lowercase())
            .ok_or_else(|| CoreError::UnsupportedProvider(s.to_string()))
    }
}
