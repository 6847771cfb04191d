//! Fetchers for remote dataset content.

use crate::error::{ProfilerError, Result};
use std::sync::Arc;

/// Downloads the raw bytes behind a dataset URL.
///
/// One attempt per call, no retries. Implementations must be `Send + Sync`.
pub trait DatasetFetcher: Send + Sync {
    /// Fetch the content at `url`.
    ///
    /// # Errors
    ///
    /// Returns [`ProfilerError::FetchFailed`] when the host is unreachable or
    /// answers with a non-success status.
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;

    /// Fetcher name for logging.
    fn name(&self) -> &str;
}

/// Blocking HTTP fetcher.
///
/// Uses the client's default timeout; nothing is configured on top of it.
#[cfg(feature = "http")]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

#[cfg(feature = "http")]
impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
        }
    }
}

#[cfg(feature = "http")]
impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "http")]
impl DatasetFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let failed = |reason: String| ProfilerError::FetchFailed {
            dataset: url.to_string(),
            reason,
        };

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| failed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(failed(format!("HTTP status {}", response.status())));
        }

        let bytes = response.bytes().map_err(|e| failed(e.to_string()))?;
        Ok(bytes.to_vec())
    }

    fn name(&self) -> &str {
        "http"
    }
}

/// A fetcher with no network access. Every fetch fails.
#[derive(Debug, Clone, Default)]
pub struct OfflineFetcher;

impl DatasetFetcher for OfflineFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        Err(ProfilerError::FetchFailed {
            dataset: url.to_string(),
            reason: "network access is disabled".to_string(),
        })
    }

    fn name(&self) -> &str {
        "offline"
    }
}

/// The fetcher used when none is injected.
pub fn default_fetcher() -> Arc<dyn DatasetFetcher> {
    #[cfg(feature = "http")]
    {
        Arc::new(HttpFetcher::new())
    }
    #[cfg(not(feature = "http"))]
    {
        Arc::new(OfflineFetcher)
    }
}
