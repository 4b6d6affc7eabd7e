//! Analysis and session errors.
//!
//! Every [`AnalysisError`] renders with the warning marker in front, so code
//! that only handles text can still tell an answer from a failure.

use pagelens_protocols::ScrapeError;
use thiserror::Error;

/// Prefix carried by every analysis failure message.
pub const WARNING_MARKER: &str = "⚠️";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("⚠️ Error: No website content loaded or content is empty.")]
    NoContent,

    #[error("⚠️ Error: Query cannot be empty.")]
    EmptyQuery,

    #[error("⚠️ Error: Content generation blocked by safety settings or API policy. Reason: {0}")]
    Blocked(String),

    #[error("⚠️ API Error: Resource limits exceeded. Please check your API quota. ({0})")]
    QuotaExhausted(String),

    #[error("⚠️ API Error: {0}")]
    Api(String),

    #[error("⚠️ Analysis failed after multiple retries or returned no relevant content.")]
    RetriesExhausted { attempts: u32 },

    #[error("⚠️ Critical Error during analysis: {0}")]
    Internal(String),
}

/// Failures of a session action (load or ask).
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Please enter a URL.")]
    EmptyUrl,

    #[error("Please enter a valid URL starting with http:// or https:// (got '{0}')")]
    InvalidUrl(String),

    #[error("Scraping Error: {0}")]
    Scrape(#[from] ScrapeError),

    #[error("Load a website first.")]
    NotLoaded,

    #[error("Analyzer initialization failed. Check logs and API key setup.")]
    AnalyzerUnavailable,

    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}
