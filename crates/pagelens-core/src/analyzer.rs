//! Content analyzer.
//!
//! Answers a question about loaded page text through an [`LlmProvider`],
//! retrying transient failures with exponential backoff. Failures never
//! escape as panics; every outcome is either the answer or an
//! [`AnalysisError`].

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use tracing::{debug, error, info, warn};

use pagelens_config::{AnalyzerConfig, SessionConfig};
use pagelens_protocols::{
    Generation, GenerationParams, GenerationRequest, LlmProvider, ProviderError,
};

use crate::error::AnalysisError;
use crate::prompt::{build_prompt, truncate_content, HISTORY_WINDOW, MAX_CONTENT_CHARS};
use crate::retry::{retry_with_backoff, RetryDecision, RetryFailure, RetryPolicy};

/// Tunables for [`ContentAnalyzer`].
#[derive(Debug, Clone)]
pub struct AnalyzerSettings {
    pub model: String,
    pub retry: RetryPolicy,
    pub max_content_chars: usize,
    pub history_window: usize,
    pub params: GenerationParams,
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self {
            model: "gemini-1.5-flash-latest".to_string(),
            retry: RetryPolicy::default(),
            max_content_chars: MAX_CONTENT_CHARS,
            history_window: HISTORY_WINDOW,
            params: GenerationParams::default(),
        }
    }
}

impl AnalyzerSettings {
    pub fn from_config(analyzer: &AnalyzerConfig, session: &SessionConfig) -> Self {
        Self {
            model: analyzer.model.clone(),
            retry: RetryPolicy::new(
                analyzer.max_retries,
                Duration::from_secs(analyzer.retry_delay_secs),
            ),
            max_content_chars: analyzer.max_content_chars,
            history_window: session.history_window,
            params: GenerationParams {
                temperature: analyzer.temperature,
                top_p: analyzer.top_p,
                candidate_count: 1,
                timeout_seconds: analyzer.request_timeout_secs,
            },
        }
    }
}

/// Analyzes page text against user questions.
pub struct ContentAnalyzer {
    provider: Arc<dyn LlmProvider>,
    settings: AnalyzerSettings,
}

impl ContentAnalyzer {
    pub fn new(provider: Arc<dyn LlmProvider>, settings: AnalyzerSettings) -> Self {
        Self { provider, settings }
    }

    pub fn settings(&self) -> &AnalyzerSettings {
        &self.settings
    }

    pub fn provider_id(&self) -> &str {
        self.provider.id()
    }

    /// Answer `query` from `content`, using `history` (oldest first) as
    /// conversation context.
    pub async fn analyze(
        &self,
        content: &str,
        query: &str,
        history: &[String],
    ) -> Result<String, AnalysisError> {
        Self::check_input(content, query)?;

        match AssertUnwindSafe(self.process(content, query, history))
            .catch_unwind()
            .await
        {
            Ok(result) => result,
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                error!("Critical error during content analysis: {}", message);
                Err(AnalysisError::Internal(message))
            }
        }
    }

    /// Reject input that can never produce an answer, before any request.
    pub fn check_input(content: &str, query: &str) -> Result<(), AnalysisError> {
        if content.is_empty() {
            warn!("analyze called with empty content.");
            return Err(AnalysisError::NoContent);
        }
        if query.trim().is_empty() {
            warn!("analyze called with empty query.");
            return Err(AnalysisError::EmptyQuery);
        }
        Ok(())
    }

    async fn process(
        &self,
        content: &str,
        query: &str,
        history: &[String],
    ) -> Result<String, AnalysisError> {
        let content = truncate_content(content, self.settings.max_content_chars);
        let prompt = build_prompt(content, query, history, self.settings.history_window);
        let request = GenerationRequest::new(&self.settings.model, prompt)
            .with_params(self.settings.params.clone());
        let max_retries = self.settings.retry.max_retries;

        let outcome = retry_with_backoff(&self.settings.retry, |attempt| {
            let request = request.clone();
            let provider = Arc::clone(&self.provider);
            async move {
                info!(
                    "Sending request to {} (Attempt {}/{}). Prompt length (chars): {}",
                    provider.id(),
                    attempt + 1,
                    max_retries,
                    request.prompt.chars().count()
                );
                let result = AssertUnwindSafe(provider.generate(request))
                    .catch_unwind()
                    .await;
                match result {
                    Ok(result) => classify_attempt(result),
                    Err(panic) => {
                        let message = panic_message(panic.as_ref());
                        error!("Unexpected fault during provider call: {}", message);
                        RetryDecision::Retry(format!("unexpected fault: {message}"))
                    }
                }
            }
        })
        .await;

        match outcome {
            Ok(answer) => Ok(answer),
            Err(RetryFailure::Aborted(err)) => Err(err),
            Err(RetryFailure::Exhausted {
                attempts,
                last_reason,
            }) => {
                warn!(
                    "Analysis produced no content after {} attempts: {}",
                    attempts, last_reason
                );
                Err(AnalysisError::RetriesExhausted { attempts })
            }
        }
    }
}

/// Map one provider outcome onto the retry loop.
pub(crate) fn classify_attempt(
    result: Result<Generation, ProviderError>,
) -> RetryDecision<String, AnalysisError> {
    match result {
        Ok(generation) => {
            if let Some(text) = generation.non_empty_text() {
                return RetryDecision::Succeed(text.to_string());
            }
            if let Some(reason) = generation.block_reason {
                error!("Content blocked by API. Reason: {}", reason);
                return RetryDecision::Abort(AnalysisError::Blocked(reason));
            }
            debug!("Empty generation, finish reason: {:?}", generation.finish_reason);
            RetryDecision::Retry("response was empty or invalid".to_string())
        }
        Err(ProviderError::Blocked(reason)) => {
            error!("Content blocked by API. Reason: {}", reason);
            RetryDecision::Abort(AnalysisError::Blocked(reason))
        }
        Err(ProviderError::ResourceExhausted(message)) => {
            error!("API resource exhausted (quota exceeded?): {}", message);
            RetryDecision::Abort(AnalysisError::QuotaExhausted(message))
        }
        Err(err) if err.is_transient() => RetryDecision::Retry(err.to_string()),
        Err(err) => {
            error!("A non-retryable API error occurred: {}", err);
            RetryDecision::Abort(AnalysisError::Api(err.to_string()))
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
#[path = "analyzer_tests.rs"]
mod tests;
