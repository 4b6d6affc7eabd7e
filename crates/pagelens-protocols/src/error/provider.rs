//! LLM Provider errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Resource exhausted: {0}")]
    ResourceExhausted(String),

    #[error("Content blocked: {0}")]
    Blocked(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout after {0} seconds")]
    Timeout(u64),
}

impl ProviderError {
    /// Whether the failure may go away if the same request is sent again.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ProviderError::ServiceUnavailable(_)
                | ProviderError::InvalidResponse(_)
                | ProviderError::Network(_)
                | ProviderError::Timeout(_)
        )
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
