//! Error types for the folio application layer
//!
//! - [`FetchError`]: a project source could not deliver a record list
//! - [`ConfigError`]: configuration could not be loaded or is invalid
//! - [`FolioError`]: umbrella for wiring the pieces together

use folio_store::StoreError;
use std::path::PathBuf;

/// Project source failures
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Request could not be sent or the body could not be read
    #[error("request to {url} failed: {message}")]
    Network { url: String, message: String },

    /// Server answered with a non-success status
    #[error("{url} responded with HTTP {status}")]
    Status { url: String, status: u16 },

    /// Body is not a JSON array of project records
    #[error("{location} did not return a project list: {message}")]
    Decode { location: String, message: String },

    /// Local seed file could not be read
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// HTTP client could not be constructed
    #[error("http client error: {0}")]
    Client(String),
}

impl FetchError {
    /// Create network error for url
    pub fn network(url: impl Into<String>, message: impl ToString) -> Self {
        Self::Network {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// Create decode error for a source location
    pub fn decode(location: impl Into<String>, message: impl ToString) -> Self {
        Self::Decode {
            location: location.into(),
            message: message.to_string(),
        }
    }

    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Configuration failures
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("could not read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema
    #[error("invalid config syntax: {0}")]
    Parse(#[from] toml::de::Error),

    /// Values are present but unusable
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Combined folio error
#[derive(Debug, thiserror::Error)]
pub enum FolioError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Result type alias for folio operations
pub type FolioResult<T> = Result<T, FolioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_display() {
        let err = FetchError::Status {
            url: "https://x/projects.json".to_string(),
            status: 503,
        };
        assert_eq!(err.to_string(), "https://x/projects.json responded with HTTP 503");

        let err = FetchError::decode("seed.json", "expected array");
        assert_eq!(
            err.to_string(),
            "seed.json did not return a project list: expected array"
        );
    }

    #[test]
    fn error_conversions() {
        let err: FolioError = ConfigError::Invalid("empty key".to_string()).into();
        assert!(matches!(err, FolioError::Config(ConfigError::Invalid(_))));

        let err: FolioError = FetchError::Client("tls".to_string()).into();
        assert!(matches!(err, FolioError::Fetch(_)));
    }
}
