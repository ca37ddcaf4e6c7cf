//! Application configuration
//!
//! Loaded from an optional TOML file, then overridden from the environment:
//!
//! ```toml
//! seed = "assets/projects.json"
//! remote_url = "https://example.com/projects.json"
//! data_file = "folio-data.json"
//! confirmation_ttl_ms = 3000
//! ```

use crate::error::ConfigError;
use crate::preference::DEFAULT_THEME_KEY;
use folio_store::DEFAULT_PROJECTS_KEY;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding the remote source
pub const ENV_REMOTE_URL: &str = "FOLIO_REMOTE_URL";

/// Environment variable overriding the seed source
pub const ENV_SEED: &str = "FOLIO_SEED";

/// Folio configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    /// Seed source: an http(s) URL or a local file path
    pub seed: String,
    /// Remote source; `None` means remote loading is not configured
    pub remote_url: Option<String>,
    /// Key holding the project list
    pub projects_key: String,
    /// Key holding the theme preference
    pub theme_key: String,
    /// File backing the key/value store
    pub data_file: PathBuf,
    /// How long confirmation messages stay visible
    pub confirmation_ttl_ms: u64,
    /// Timeout for remote fetches
    pub fetch_timeout_ms: u64,
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            seed: "assets/projects.json".to_string(),
            remote_url: None,
            projects_key: DEFAULT_PROJECTS_KEY.to_string(),
            theme_key: DEFAULT_THEME_KEY.to_string(),
            data_file: PathBuf::from("folio-data.json"),
            confirmation_ttl_ms: 3_000,
            fetch_timeout_ms: 10_000,
        }
    }
}

impl FolioConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With seed source
    #[inline]
    #[must_use]
    pub fn with_seed(mut self, seed: impl Into<String>) -> Self {
        self.seed = seed.into();
        self
    }

    /// With remote source
    #[inline]
    #[must_use]
    pub fn with_remote_url(mut self, url: impl Into<String>) -> Self {
        self.remote_url = Some(url.into());
        self
    }

    /// With data file
    #[inline]
    #[must_use]
    pub fn with_data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_file = path.into();
        self
    }

    /// With confirmation lifetime
    #[inline]
    #[must_use]
    pub fn with_confirmation_ttl(mut self, ttl: Duration) -> Self {
        self.confirmation_ttl_ms = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Confirmation lifetime
    #[inline]
    #[must_use]
    pub fn confirmation_ttl(&self) -> Duration {
        Duration::from_millis(self.confirmation_ttl_ms)
    }

    /// Remote fetch timeout
    #[inline]
    #[must_use]
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    /// Parse configuration from TOML
    ///
    /// # Errors
    /// Invalid TOML or field types.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    /// Load configuration: file (if any), then environment, then validation
    ///
    /// # Errors
    /// - `ConfigError::Io` if `path` cannot be read
    /// - `ConfigError::Parse` if it is not valid TOML
    /// - `ConfigError::Invalid` if the result fails validation
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
                Self::from_toml_str(&raw)?
            }
            None => Self::default(),
        };
        config.apply_env(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides through `lookup`
    ///
    /// An empty `FOLIO_REMOTE_URL` unsets the remote source.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_REMOTE_URL) {
            let url = url.trim();
            self.remote_url = (!url.is_empty()).then(|| url.to_string());
        }
        if let Some(seed) = lookup(ENV_SEED).filter(|s| !s.trim().is_empty()) {
            self.seed = seed.trim().to_string();
        }
    }

    /// Check values are usable
    ///
    /// # Errors
    /// `ConfigError::Invalid` describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.seed.trim().is_empty() {
            return Err(ConfigError::Invalid("seed must not be empty".into()));
        }
        if self.projects_key.is_empty() || self.theme_key.is_empty() {
            return Err(ConfigError::Invalid("storage keys must not be empty".into()));
        }
        if self.projects_key == self.theme_key {
            return Err(ConfigError::Invalid(
                "projects_key and theme_key must differ".into(),
            ));
        }
        if self.confirmation_ttl_ms == 0 {
            return Err(ConfigError::Invalid(
                "confirmation_ttl_ms must be positive".into(),
            ));
        }
        if self.fetch_timeout_ms == 0 {
            return Err(ConfigError::Invalid("fetch_timeout_ms must be positive".into()));
        }
        if self
            .remote_url
            .as_deref()
            .is_some_and(|url| url.trim().is_empty())
        {
            return Err(ConfigError::Invalid("remote_url must not be blank".into()));
        }
        Ok(())
    }
}
