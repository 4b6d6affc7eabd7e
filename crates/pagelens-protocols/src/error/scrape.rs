//! Page fetching errors.

use thiserror::Error;

/// Failure to obtain the HTML of a page.
///
/// Browser launch, navigation and transport failures all collapse into this
/// one type so callers report a single "scrape failed" condition.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to start page driver: {0}")]
    DriverUnavailable(String),

    #[error("Failed to scrape URL '{url}': {message}")]
    Failed { url: String, message: String },
}

impl ScrapeError {
    pub fn failed(url: impl Into<String>, message: impl ToString) -> Self {
        ScrapeError::Failed {
            url: url.into(),
            message: message.to_string(),
        }
    }
}
