//! In-memory session state.

use pagelens_protocols::ChatMessage;

/// State of one interactive session: the loaded page and the chat so far.
///
/// Created empty, reset on every load, dropped when the session ends.
#[derive(Debug, Clone, Default)]
pub struct Session {
    url: Option<String>,
    content: String,
    history: Vec<ChatMessage>,
}

/// Snapshot for status displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStatus {
    pub url: Option<String>,
    pub content_chars: usize,
    pub messages: usize,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the loaded page and the whole conversation.
    pub fn reset(&mut self) {
        self.url = None;
        self.content.clear();
        self.history.clear();
    }

    /// Record a successfully loaded page.
    pub fn set_page(&mut self, url: impl Into<String>, content: impl Into<String>) {
        self.url = Some(url.into());
        self.content = content.into();
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_loaded(&self) -> bool {
        self.url.is_some()
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Message texts in chronological order, for use as prompt context.
    pub fn history_texts(&self) -> Vec<String> {
        self.history.iter().map(|m| m.text.clone()).collect()
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.history.push(message);
    }

    /// The first `limit` characters of the content, with `...` appended
    /// when anything was cut. `None` if no content is loaded.
    pub fn preview(&self, limit: usize) -> Option<String> {
        if self.content.is_empty() {
            return None;
        }
        match self.content.char_indices().nth(limit) {
            Some((idx, _)) => Some(format!("{}...", &self.content[..idx])),
            None => Some(self.content.clone()),
        }
    }

    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            url: self.url.clone(),
            content_chars: self.content.chars().count(),
            messages: self.history.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded() -> Session {
        let mut session = Session::new();
        session.set_page("https://example.com", "Hello\nWorld");
        session.push(ChatMessage::user("hi"));
        session.push(ChatMessage::assistant("hello"));
        session
    }

    #[test]
    fn test_new_session_is_empty() {
        let session = Session::new();
        assert!(!session.is_loaded());
        assert!(session.content().is_empty());
        assert!(session.history().is_empty());
        assert_eq!(session.preview(10), None);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut session = loaded();
        session.reset();
        assert_eq!(session.url(), None);
        assert!(session.content().is_empty());
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_history_texts_chronological() {
        let session = loaded();
        assert_eq!(session.history_texts(), vec!["hi", "hello"]);
    }

    #[test]
    fn test_preview_truncates_with_ellipsis() {
        let mut session = Session::new();
        session.set_page("https://example.com", "abcdefghij");
        assert_eq!(session.preview(4).as_deref(), Some("abcd..."));
        assert_eq!(session.preview(10).as_deref(), Some("abcdefghij"));
        assert_eq!(session.preview(50).as_deref(), Some("abcdefghij"));
    }

    #[test]
    fn test_status() {
        let session = loaded();
        assert_eq!(
            session.status(),
            SessionStatus {
                url: Some("https://example.com".to_string()),
                content_chars: 11,
                messages: 2,
            }
        );
    }
}
