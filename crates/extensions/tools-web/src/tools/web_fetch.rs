//! Plain HTTP page source.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

use pagelens_protocols::error::ScrapeError;
use pagelens_protocols::source::PageSource;

/// Desktop browser user agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Configuration for [`HttpFetcher`].
#[derive(Debug, Clone)]
pub struct HttpFetcherConfig {
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpFetcherConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Fetches raw page HTML with a single GET request. No JavaScript runs, so
/// client-rendered pages come back mostly empty.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a new HTTP fetcher.
    pub fn new(config: HttpFetcherConfig) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| ScrapeError::DriverUnavailable(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageSource for HttpFetcher {
    fn id(&self) -> &str {
        "http"
    }

    async fn fetch_html(&self, url: &str) -> Result<String, ScrapeError> {
        let parsed = url::Url::parse(url)
            .map_err(|e| ScrapeError::InvalidUrl(format!("{}: {}", url, e)))?;

        debug!("Fetching page over HTTP: {}", url);

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| ScrapeError::failed(url, format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::failed(url, format!("HTTP {}", status.as_u16())));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ScrapeError::failed(url, format!("Failed to read body: {}", e)))?;

        info!("Successfully retrieved page source, length: {}", body.len());
        Ok(body)
    }
}

#[cfg(test)]
#[path = "web_fetch_tests.rs"]
mod tests;
