//! Page source protocol.
//!
//! A page source turns a URL into the markup a user would see, whether by
//! driving a real browser or by a plain HTTP request.

use async_trait::async_trait;

use crate::error::ScrapeError;

/// Anything that can fetch the HTML of a page.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Short identifier used in logs.
    fn id(&self) -> &str;

    /// Fetch the page and return its full HTML.
    ///
    /// Implementations must release every resource they acquired before
    /// returning, on success and on failure alike.
    async fn fetch_html(&self, url: &str) -> Result<String, ScrapeError>;
}

/// Turns fetched HTML into the plain text handed to the analyzer.
///
/// Extraction never fails; unusable input yields an empty string.
pub trait TextExtractor: Send + Sync {
    fn extract_text(&self, html: &str) -> String;
}
