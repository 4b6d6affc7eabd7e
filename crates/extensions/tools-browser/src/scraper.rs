//! [`PageSource`] backed by headless Chrome.

use async_trait::async_trait;
use tracing::{debug, error, info};
use url::Url;

use pagelens_protocols::{PageSource, ScrapeError};

use crate::manager::{BrowserError, BrowserManager, BrowserManagerConfig};

/// Fetches rendered HTML with a browser that lives for one fetch.
pub struct BrowserScraper {
    config: BrowserManagerConfig,
}

impl BrowserScraper {
    pub fn new(config: BrowserManagerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BrowserManagerConfig {
        &self.config
    }

    async fn drive(manager: &mut BrowserManager, url: &str) -> Result<String, BrowserError> {
        manager.connect().await?;
        manager.fetch_page_html(url).await
    }
}

#[async_trait]
impl PageSource for BrowserScraper {
    fn id(&self) -> &str {
        "browser"
    }

    async fn fetch_html(&self, url: &str) -> Result<String, ScrapeError> {
        Url::parse(url).map_err(|e| ScrapeError::InvalidUrl(format!("{}: {}", url, e)))?;

        info!("Attempting to scrape URL: {}", url);
        let mut manager = BrowserManager::new(self.config.clone());
        let result = Self::drive(&mut manager, url).await;
        if !manager.launched_chrome() {
            debug!("Leaving the existing Chrome on port {} running", self.config.debug_port);
        }
        manager.shutdown().await;

        result.map_err(|e| {
            error!("Error during scraping URL {}: {}", url, e);
            to_scrape_error(url, e)
        })
    }
}

fn to_scrape_error(url: &str, err: BrowserError) -> ScrapeError {
    if err.is_driver_failure() {
        ScrapeError::DriverUnavailable(err.to_string())
    } else {
        ScrapeError::failed(url, err)
    }
}
