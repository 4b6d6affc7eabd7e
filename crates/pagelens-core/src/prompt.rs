//! Prompt construction and content truncation.

use tracing::warn;

/// Character budget for page content sent to the model.
pub const MAX_CONTENT_CHARS: usize = 700_000;

/// Number of prior messages included as conversation context.
pub const HISTORY_WINDOW: usize = 4;

/// Cut `content` to its first `max_chars` characters.
///
/// Counts characters, not bytes, so multi-byte text is never split.
pub fn truncate_content(content: &str, max_chars: usize) -> &str {
    match content.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => {
            warn!(
                "Content truncated from {} to {} characters.",
                content.chars().count(),
                max_chars
            );
            &content[..byte_idx]
        }
        None => content,
    }
}

/// Build the analysis prompt.
///
/// Only the last `window` entries of `history` are used. They are labelled
/// `User:` and `Assistant:` alternately by position within that window.
pub fn build_prompt(content: &str, query: &str, history: &[String], window: usize) -> String {
    let context = history_context(history, window);

    format!(
        r#"**Role:** You are an AI assistant specialized in analyzing provided web page text content to answer user questions accurately.

**Task:** Analyze the following **Web Page Text Content** and answer the **User Query** based *solely* on the information present in the text.

**Web Page Text Content:**
--- START ---
{content}
--- END ---
{context}

**User Query:** {query}

**Instructions for Response:**
1.  **Base your answer strictly on the provided "Web Page Text Content".** Do not use external knowledge or make assumptions.
2.  **Address the specific "User Query" directly.**
3.  **If the information needed to answer the query is present, extract and synthesize it clearly.** Quote relevant snippets briefly if helpful using markdown blockquotes (`> snippet`).
4.  **If the information is *not* found in the text, explicitly state that.** For example: "The provided text does not contain information about X."
5.  **Use Markdown formatting** for readability (e.g., headings `##`, lists `* item`, bold `**text**`).
6.  **Be objective and factual.**
7.  **Provide a comprehensive answer covering all parts of the query if possible within the text.**
8.  **Do NOT return an empty response.** If you cannot answer, explain why based on instruction #4.
"#
    )
}

fn history_context(history: &[String], window: usize) -> String {
    if history.is_empty() || window == 0 {
        return String::new();
    }

    let start = history.len().saturating_sub(window);
    let lines = history[start..]
        .iter()
        .enumerate()
        .map(|(i, text)| {
            let label = if i % 2 == 0 { "User" } else { "Assistant" };
            format!("{label}: {text}")
        })
        .collect::<Vec<_>>();

    format!("\nPrevious Conversation Context:\n{}", lines.join("\n"))
}

#[cfg(test)]
#[path = "prompt_tests.rs"]
mod tests;
