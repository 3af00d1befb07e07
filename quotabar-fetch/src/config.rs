//! Management API configuration.
//!
//! [`ManagementConfig`] is resolved once at startup and passed by reference
//! to the client. Each variable is read from the process environment first
//! and from a key=value env file second, so the file never overrides a value
//! that is already set. The file is read without touching the environment.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, warn};
use url::Url;

use crate::error::ConfigError;

/// Variable holding the management API base URL.
pub const BASE_URL_VAR: &str = "CPA_BASE_URL";

/// Variable holding the management bearer key.
pub const MANAGEMENT_KEY_VAR: &str = "CPA_MANAGEMENT_KEY";

/// Optional variable overriding the request timeout (seconds).
pub const TIMEOUT_VAR: &str = "CPA_TIMEOUT_SECS";

/// Default timeout for every management request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Name of the env file looked up in the default locations.
const ENV_FILE_NAME: &str = ".env";

// ============================================================================
// Management Config
// ============================================================================

/// Connection settings for the management API.
#[derive(Clone)]
pub struct ManagementConfig {
    base_url: String,
    management_key: String,
    timeout: Duration,
}

impl std::fmt::Debug for ManagementConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManagementConfig")
            .field("base_url", &self.base_url)
            .field("management_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ManagementConfig {
    /// Creates a config from a base URL and key.
    ///
    /// Trailing slashes are removed from the base URL.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if the base URL does not parse.
    pub fn new(base_url: &str, management_key: impl Into<String>) -> Result<Self, ConfigError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        Url::parse(trimmed).map_err(|e| ConfigError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            base_url: trimmed.to_string(),
            management_key: management_key.into(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolves the config through a variable lookup.
    ///
    /// Empty values count as missing.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` for an absent base URL or key, and
    /// `ConfigError::InvalidUrl` for an unparsable base URL.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let base_url = get(BASE_URL_VAR).ok_or(ConfigError::Missing(BASE_URL_VAR))?;
        let key = get(MANAGEMENT_KEY_VAR).ok_or(ConfigError::Missing(MANAGEMENT_KEY_VAR))?;
        let config = Self::new(&base_url, key)?;

        let timeout = match get(TIMEOUT_VAR) {
            None => DEFAULT_TIMEOUT,
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    warn!(value = %raw, "Ignoring invalid {TIMEOUT_VAR}");
                    DEFAULT_TIMEOUT
                }
            },
        };

        Ok(config.with_timeout(timeout))
    }

    /// Loads the config from the environment, seeded by an env file.
    ///
    /// With `env_file` set, that file must be readable. Otherwise the first
    /// existing default env file is used, if any.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the explicit env file cannot be read or a
    /// required value is missing or invalid.
    pub fn load(env_file: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match env_file {
            Some(path) => EnvFile::read(path)?,
            None => match default_env_file() {
                Some(path) => EnvFile::read(&path).unwrap_or_else(|e| {
                    warn!(error = %e, "Skipping unreadable env file");
                    EnvFile::default()
                }),
                None => EnvFile::default(),
            },
        };

        Self::from_lookup(|name| std::env::var(name).ok().or_else(|| file.get(name)))
    }

    /// Returns the base URL without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the management bearer key.
    pub fn management_key(&self) -> &str {
        &self.management_key
    }

    /// Returns the request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the full URL of a management endpoint.
    pub fn management_url(&self, endpoint: &str) -> String {
        format!(
            "{}/v0/management/{}",
            self.base_url,
            endpoint.trim_start_matches('/')
        )
    }
}

// ============================================================================
// Env File
// ============================================================================

/// Key=value pairs read from an env file.
#[derive(Debug, Default, Clone)]
pub struct EnvFile {
    values: HashMap<String, String>,
}

impl EnvFile {
    /// Reads an env file. Malformed lines are skipped.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::EnvFile` if the file cannot be opened.
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let iter = dotenvy::from_path_iter(path).map_err(|e| ConfigError::EnvFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut values = HashMap::new();
        for item in iter {
            match item {
                Ok((key, value)) => {
                    // First occurrence wins, as with the environment itself.
                    values.entry(key).or_insert(value);
                }
                Err(e) => warn!(path = %path.display(), error = %e, "Skipping env file line"),
            }
        }

        debug!(path = %path.display(), count = values.len(), "Loaded env file");
        Ok(Self { values })
    }

    /// Returns the value for a key.
    pub fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// Returns the first existing default env file.
///
/// Looks beside the executable, then in `<config dir>/quotabar/`.
pub fn default_env_file() -> Option<PathBuf> {
    let beside_exe = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(ENV_FILE_NAME)));
    let in_config = dirs::config_dir().map(|dir| dir.join("quotabar").join(ENV_FILE_NAME));

    [beside_exe, in_config]
        .into_iter()
        .flatten()
        .find(|path| path.is_file())
}
