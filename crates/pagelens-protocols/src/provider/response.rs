//! Generation response types.

use serde::{Deserialize, Serialize};

/// What came back from one request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Generation {
    /// Concatenated text of the first candidate, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Why the prompt or candidate was blocked, if it was.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_reason: Option<String>,

    /// Raw finish reason reported for the candidate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

impl Generation {
    /// A generation carrying text.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// A generation rejected by the provider's content policy.
    pub fn blocked(reason: impl Into<String>) -> Self {
        Self {
            block_reason: Some(reason.into()),
            ..Default::default()
        }
    }

    /// Text with surrounding whitespace removed, or `None` when blank.
    pub fn non_empty_text(&self) -> Option<&str> {
        self.text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty_text_trims() {
        let generation = Generation::text("  answer \n");
        assert_eq!(generation.non_empty_text(), Some("answer"));
    }

    #[test]
    fn test_non_empty_text_blank() {
        assert_eq!(Generation::text("   \n").non_empty_text(), None);
        assert_eq!(Generation::default().non_empty_text(), None);
    }

    #[test]
    fn test_blocked() {
        let generation = Generation::blocked("SAFETY");
        assert_eq!(generation.block_reason.as_deref(), Some("SAFETY"));
        assert!(generation.non_empty_text().is_none());
    }
}
