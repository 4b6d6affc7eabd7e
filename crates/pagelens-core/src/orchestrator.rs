//! Session orchestrator.
//!
//! Owns the [`Session`] and drives each user action to completion:
//! loading a page runs fetch then extraction, asking runs the analyzer.

use std::sync::Arc;

use tracing::{error, info, warn};
use url::Url;

use pagelens_protocols::{ChatMessage, PageSource, TextExtractor};

use crate::analyzer::ContentAnalyzer;
use crate::error::SessionError;
use crate::session::{Session, SessionStatus};

/// Result of a successful load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOutcome {
    pub url: String,
    pub content_chars: usize,
}

impl LoadOutcome {
    /// The page loaded but no text survived cleaning.
    pub fn is_empty(&self) -> bool {
        self.content_chars == 0
    }
}

pub struct Orchestrator {
    source: Arc<dyn PageSource>,
    extractor: Arc<dyn TextExtractor>,
    analyzer: Option<ContentAnalyzer>,
    session: Session,
}

impl Orchestrator {
    /// `analyzer` is `None` when it failed to initialize; pages can still
    /// be loaded and previewed, but queries are refused.
    pub fn new(
        source: Arc<dyn PageSource>,
        extractor: Arc<dyn TextExtractor>,
        analyzer: Option<ContentAnalyzer>,
    ) -> Self {
        Self {
            source,
            extractor,
            analyzer,
            session: Session::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn analyzer_ready(&self) -> bool {
        self.analyzer.is_some()
    }

    /// Fetch `url`, clean it, and make it the session's content.
    ///
    /// An invalid URL leaves the session untouched. Otherwise the previous
    /// page and conversation are discarded before fetching.
    pub async fn load_url(&mut self, url: &str) -> Result<LoadOutcome, SessionError> {
        let url = validate_url(url)?;

        self.session.reset();
        info!("Loading {} via {}", url, self.source.id());

        let html = self.source.fetch_html(&url).await.map_err(|e| {
            error!("Scraping failed for {}: {}", url, e);
            e
        })?;

        let content = self.extractor.extract_text(&html);
        let outcome = LoadOutcome {
            url: url.clone(),
            content_chars: content.chars().count(),
        };

        if outcome.is_empty() {
            warn!(
                "Content loaded from {} but empty after cleaning; the page might be dynamic or lack text.",
                url
            );
        } else {
            info!("Loaded {} ({} chars)", url, outcome.content_chars);
        }

        self.session.set_page(url, content);
        Ok(outcome)
    }

    /// Ask a question about the loaded page.
    ///
    /// A usable question is always recorded; the answer only when analysis
    /// succeeds.
    pub async fn ask(&mut self, query: &str) -> Result<String, SessionError> {
        if !self.session.is_loaded() {
            return Err(SessionError::NotLoaded);
        }
        let Some(analyzer) = self.analyzer.as_ref() else {
            return Err(SessionError::AnalyzerUnavailable);
        };

        ContentAnalyzer::check_input(self.session.content(), query)?;

        let history = self.session.history_texts();
        self.session.push(ChatMessage::user(query));

        let result = analyzer
            .analyze(self.session.content(), query, &history)
            .await;

        match result {
            Ok(answer) => {
                self.session.push(ChatMessage::assistant(answer.clone()));
                Ok(answer)
            }
            Err(err) => {
                warn!("Analysis returned an error: {}", err);
                Err(err.into())
            }
        }
    }

    /// The configured-length preview of the loaded content.
    pub fn preview(&self, limit: usize) -> Option<String> {
        self.session.preview(limit)
    }

    pub fn status(&self) -> SessionStatus {
        self.session.status()
    }
}

fn validate_url(raw: &str) -> Result<String, SessionError> {
    let url = raw.trim();
    if url.is_empty() {
        return Err(SessionError::EmptyUrl);
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(SessionError::InvalidUrl(url.to_string()));
    }
    match Url::parse(url) {
        Ok(parsed) if parsed.host_str().is_some_and(|h| !h.is_empty()) => Ok(url.to_string()),
        _ => Err(SessionError::InvalidUrl(url.to_string())),
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
