//! # PageLens Core
//!
//! The question-answering pipeline around a loaded page: prompt
//! construction, content truncation, the retry loop around the LLM call,
//! and the interactive session that ties fetching, cleaning and analysis
//! together.

pub mod analyzer;
pub mod error;
pub mod orchestrator;
pub mod prompt;
pub mod retry;
pub mod session;

#[cfg(test)]
pub(crate) mod test_support;

pub use analyzer::{AnalyzerSettings, ContentAnalyzer};
pub use error::{AnalysisError, SessionError, WARNING_MARKER};
pub use orchestrator::{LoadOutcome, Orchestrator};
pub use prompt::{build_prompt, truncate_content, HISTORY_WINDOW, MAX_CONTENT_CHARS};
pub use retry::{retry_with_backoff, RetryDecision, RetryFailure, RetryPolicy};
pub use session::{Session, SessionStatus};
