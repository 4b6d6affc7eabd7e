//! Gemini API client.

use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use pagelens_protocols::error::{InitError, ProviderError};

use crate::types::*;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini API client.
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GeminiClient {
    /// Create a new Gemini client.
    pub fn new(api_key: String, base_url: impl Into<String>) -> Result<Self, InitError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| InitError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Generate content (non-streaming).
    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
        timeout_secs: u64,
    ) -> Result<GenerateContentResponse, ProviderError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model);

        debug!("Gemini generate_content: model={}", model);

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .timeout(Duration::from_secs(timeout_secs))
            .json(request)
            .send()
            .await
            .map_err(|e| transport_error(e, timeout_secs))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error(e, timeout_secs))?;

        if !status.is_success() {
            let detail = serde_json::from_str::<GeminiError>(&body).ok().map(|e| e.error);
            return Err(classify_api_error(status.as_u16(), detail, &body, timeout_secs));
        }

        serde_json::from_str(&body)
            .map_err(|e| ProviderError::InvalidResponse(format!("Failed to parse response: {}", e)))
    }
}

fn transport_error(error: reqwest::Error, timeout_secs: u64) -> ProviderError {
    if error.is_timeout() {
        ProviderError::Timeout(timeout_secs)
    } else {
        // Drop the URL so request details never reach the logs.
        ProviderError::Network(error.without_url().to_string())
    }
}

/// Map an HTTP error response onto the provider error taxonomy.
///
/// The canonical status string in the body takes precedence; the HTTP
/// status code is used when the body is not a Gemini error document.
pub fn classify_api_error(
    status: u16,
    detail: Option<GeminiErrorDetail>,
    raw_body: &str,
    timeout_secs: u64,
) -> ProviderError {
    let (api_status, message) = match detail {
        Some(d) => (d.status, d.message),
        None => (String::new(), raw_body.to_string()),
    };

    match (api_status.as_str(), status) {
        ("RESOURCE_EXHAUSTED", _) | ("", 429) => ProviderError::ResourceExhausted(message),
        ("UNAVAILABLE", _) | ("", 503) => ProviderError::ServiceUnavailable(message),
        ("DEADLINE_EXCEEDED", _) | ("", 504) => ProviderError::Timeout(timeout_secs),
        ("UNAUTHENTICATED" | "PERMISSION_DENIED", _) | ("", 401 | 403) => {
            ProviderError::AuthenticationFailed(message)
        }
        ("INVALID_ARGUMENT" | "FAILED_PRECONDITION", _) => ProviderError::InvalidRequest(message),
        _ => ProviderError::ApiError { status, message },
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
