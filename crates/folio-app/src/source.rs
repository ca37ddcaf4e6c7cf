//! Project sources
//!
//! A [`ProjectSource`] delivers a list of raw project records. The seed and
//! the optional remote endpoint are both sources; which implementation backs
//! them is decided by [`source_from_location`].

use crate::error::FetchError;
use async_trait::async_trait;
use folio_model::RawProjectRecord;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Something that can fetch a list of project records
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectSource: Send + Sync {
    /// Fetch the full record list
    ///
    /// # Errors
    /// The source is unreachable or did not return a JSON array of records.
    async fn fetch(&self) -> Result<Vec<RawProjectRecord>, FetchError>;

    /// Human-readable location, for logs and status lines
    fn describe(&self) -> String;
}

/// Source reading a JSON array over HTTP GET
#[derive(Clone)]
pub struct HttpSource {
    url: String,
    client: reqwest::Client,
}

impl fmt::Debug for HttpSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpSource").field("url", &self.url).finish()
    }
}

impl HttpSource {
    /// Create a source for `url` with a request timeout
    ///
    /// # Errors
    /// `FetchError::Client` if the HTTP client cannot be built.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }

    /// Endpoint URL
    #[inline]
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ProjectSource for HttpSource {
    async fn fetch(&self) -> Result<Vec<RawProjectRecord>, FetchError> {
        debug!(url = %self.url, "fetching projects");
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| FetchError::network(&self.url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        response
            .json::<Vec<RawProjectRecord>>()
            .await
            .map_err(|e| {
                if e.is_decode() {
                    FetchError::decode(&self.url, e)
                } else {
                    FetchError::network(&self.url, e)
                }
            })
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Source reading a JSON array from a local file
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a source for `path`
    #[inline]
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ProjectSource for FileSource {
    async fn fetch(&self) -> Result<Vec<RawProjectRecord>, FetchError> {
        debug!(path = %self.path.display(), "reading projects");
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| FetchError::io_error(&self.path, e))?;
        RawProjectRecord::list_from_json(&raw)
            .map_err(|e| FetchError::decode(self.path.display().to_string(), e))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Check if `location` should be fetched over HTTP
#[must_use]
pub fn is_http_location(location: &str) -> bool {
    let lower = location.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Pick the source implementation for a configured location
///
/// `http://` and `https://` locations use [`HttpSource`]; anything else is a
/// file path.
///
/// # Errors
/// `FetchError::Client` if the HTTP client cannot be built.
pub fn source_from_location(
    location: &str,
    timeout: Duration,
) -> Result<Arc<dyn ProjectSource>, FetchError> {
    let location = location.trim();
    if is_http_location(location) {
        Ok(Arc::new(HttpSource::new(location, timeout)?))
    } else {
        Ok(Arc::new(FileSource::new(location)))
    }
}
