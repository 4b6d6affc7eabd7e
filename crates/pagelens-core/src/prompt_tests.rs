use super::*;

fn history(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_truncate_short_content_unchanged() {
    assert_eq!(truncate_content("short", 10), "short");
    assert_eq!(truncate_content("exact", 5), "exact");
    assert_eq!(truncate_content("", 5), "");
}

#[test]
fn test_truncate_long_content_to_exact_prefix() {
    let content = "a".repeat(MAX_CONTENT_CHARS + 1234);
    let truncated = truncate_content(&content, MAX_CONTENT_CHARS);
    assert_eq!(truncated.chars().count(), MAX_CONTENT_CHARS);
    assert!(content.starts_with(truncated));
}

#[test]
fn test_truncate_counts_chars_not_bytes() {
    let content = "héllo wörld";
    assert_eq!(truncate_content(content, 4), "héll");
    assert_eq!(truncate_content("ééé", 2), "éé");
}

#[test]
fn test_prompt_section_order() {
    let prompt = build_prompt("PAGE TEXT", "What is it?", &[], HISTORY_WINDOW);

    let role = prompt.find("**Role:**").unwrap();
    let content_header = prompt.find("**Web Page Text Content:**").unwrap();
    let start = prompt.find("--- START ---\nPAGE TEXT\n--- END ---").unwrap();
    let query = prompt.find("**User Query:** What is it?").unwrap();
    let instructions = prompt.find("**Instructions for Response:**").unwrap();

    assert!(role < content_header);
    assert!(content_header < start);
    assert!(start < query);
    assert!(query < instructions);
}

#[test]
fn test_prompt_without_history_has_no_context_block() {
    let prompt = build_prompt("text", "q", &[], HISTORY_WINDOW);
    assert!(!prompt.contains("Previous Conversation Context:"));
}

#[test]
fn test_prompt_has_eight_instructions() {
    let prompt = build_prompt("text", "q", &[], HISTORY_WINDOW);
    for n in 1..=8 {
        assert!(prompt.contains(&format!("\n{n}.  **")), "missing instruction {n}");
    }
    assert!(!prompt.contains("\n9.  "));
    assert!(prompt.contains("Do NOT return an empty response."));
}

#[test]
fn test_prompt_history_uses_last_four_with_positional_labels() {
    let history = history(&["q1", "a1", "q2", "a2", "q3", "a3"]);
    let prompt = build_prompt("text", "q4", &history, HISTORY_WINDOW);

    assert!(prompt.contains(
        "Previous Conversation Context:\nUser: q2\nAssistant: a2\nUser: q3\nAssistant: a3"
    ));
    assert!(!prompt.contains("q1"));
    assert!(!prompt.contains("a1"));
}

#[test]
fn test_prompt_history_labels_follow_position_not_content() {
    let history = history(&["answer only"]);
    let prompt = build_prompt("text", "q", &history, HISTORY_WINDOW);
    assert!(prompt.contains("User: answer only"));
}

#[test]
fn test_prompt_context_sits_between_content_and_query() {
    let history = history(&["earlier question"]);
    let prompt = build_prompt("text", "q", &history, HISTORY_WINDOW);
    let end = prompt.find("--- END ---").unwrap();
    let context = prompt.find("Previous Conversation Context:").unwrap();
    let query = prompt.find("**User Query:**").unwrap();
    assert!(end < context && context < query);
}

#[test]
fn test_prompt_is_deterministic() {
    let history = history(&["a", "b"]);
    assert_eq!(
        build_prompt("c", "q", &history, HISTORY_WINDOW),
        build_prompt("c", "q", &history, HISTORY_WINDOW)
    );
}
