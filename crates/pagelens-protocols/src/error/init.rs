//! Analyzer initialization errors.

use thiserror::Error;

/// Configuration problems detected before any request is attempted.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("DNS resolution failed for {host}: {message}. Check network config")]
    DnsResolution { host: String, message: String },

    #[error("{0} missing in environment or .env")]
    MissingApiKey(String),

    #[error("Model init failed: {0}")]
    Client(String),
}
