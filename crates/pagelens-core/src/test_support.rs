//! Scripted collaborators shared by the unit tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use pagelens_protocols::{
    Generation, GenerationRequest, LlmProvider, PageSource, ProviderError, ScrapeError,
    TextExtractor,
};

/// Provider that replays a fixed list of outcomes and records each prompt.
pub struct ScriptedProvider {
    script: Mutex<VecDeque<Result<Generation, ProviderError>>>,
    requests: Mutex<Vec<GenerationRequest>>,
    calls: AtomicU32,
    panic_on_call: bool,
}

impl ScriptedProvider {
    pub fn new(script: Vec<Result<Generation, ProviderError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
            calls: AtomicU32::new(0),
            panic_on_call: false,
        }
    }

    pub fn answering(text: &str) -> Self {
        Self::new(vec![Ok(Generation::text(text))])
    }

    pub fn panicking() -> Self {
        Self {
            panic_on_call: true,
            ..Self::new(Vec::new())
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.requests.lock().last().map(|r| r.prompt.clone())
    }

    pub fn last_request(&self) -> Option<GenerationRequest> {
        self.requests.lock().last().cloned()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn id(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, request: GenerationRequest) -> Result<Generation, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push(request);
        if self.panic_on_call {
            panic!("provider exploded");
        }
        self.script
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(ProviderError::InvalidResponse("script exhausted".into())))
    }
}

/// Page source that serves the same markup for every URL, or fails.
pub struct StaticSource {
    html: Result<String, String>,
    fetches: AtomicU32,
}

impl StaticSource {
    pub fn serving(html: &str) -> Self {
        Self {
            html: Ok(html.to_string()),
            fetches: AtomicU32::new(0),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            html: Err(message.to_string()),
            fetches: AtomicU32::new(0),
        }
    }

    pub fn fetches(&self) -> u32 {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageSource for StaticSource {
    fn id(&self) -> &str {
        "static"
    }

    async fn fetch_html(&self, url: &str) -> Result<String, ScrapeError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.html
            .clone()
            .map_err(|message| ScrapeError::failed(url, message))
    }
}

/// Extractor that trims the markup and otherwise passes it through.
pub struct PassThrough;

impl TextExtractor for PassThrough {
    fn extract_text(&self, html: &str) -> String {
        html.trim().to_string()
    }
}
