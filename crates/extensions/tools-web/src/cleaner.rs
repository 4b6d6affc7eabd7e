//! HTML to text cleaning.
//!
//! Two pure steps: [`extract_body`] isolates the markup inside `<body>`, and
//! [`clean_body`] drops non-content elements and flattens what is left into
//! newline-separated text. Neither step fails; malformed markup is handled
//! by the HTML5 parser's recovery rules.

use std::sync::LazyLock;

use regex::Regex;
use pagelens_protocols::TextExtractor;
use scraper::{ElementRef, Html, Selector};
use tracing::{info, warn};

/// Elements removed together with their whole subtree.
pub const DENYLISTED_TAGS: &[&str] = &[
    "script", "style", "meta", "link", "header", "footer", "nav", "aside", "form", "button",
    "iframe", "noscript",
];

// The HTML5 parser always synthesizes a body, so presence is checked on the source.
static BODY_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<body[\s/>]").expect("valid body tag regex"));

static BODY_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("body").expect("valid body selector"));

/// Return the inner markup of the `<body>` element.
///
/// Returns an empty string if `html` is empty or has no body element.
pub fn extract_body(html: &str) -> String {
    if html.is_empty() {
        warn!("HTML content is empty, cannot extract body.");
        return String::new();
    }

    if !BODY_TAG.is_match(html) {
        warn!("HTML content has no body element.");
        return String::new();
    }

    let document = Html::parse_document(html);
    document
        .select(&BODY_SELECTOR)
        .next()
        .map(|body| body.inner_html())
        .unwrap_or_default()
}

/// Strip denylisted elements and return the remaining text, one text node
/// per line, with blank lines removed.
pub fn clean_body(body_html: &str) -> String {
    if body_html.is_empty() {
        warn!("Body HTML is empty, cannot clean.");
        return String::new();
    }

    let document = Html::parse_document(body_html);
    let mut fragments = Vec::new();
    collect_text(document.root_element(), &mut fragments);

    let text = fragments.join("\n");
    let cleaned = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    info!("Cleaned text length: {}", cleaned.chars().count());
    cleaned
}

/// [`TextExtractor`] that runs [`extract_body`] followed by [`clean_body`].
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlCleaner;

impl TextExtractor for HtmlCleaner {
    fn extract_text(&self, html: &str) -> String {
        clean_body(&extract_body(html))
    }
}

fn is_denylisted(name: &str) -> bool {
    DENYLISTED_TAGS.iter().any(|tag| tag.eq_ignore_ascii_case(name))
}

/// Depth-first walk over text nodes, skipping denylisted subtrees.
fn collect_text(element: ElementRef<'_>, out: &mut Vec<String>) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                out.push(trimmed.to_string());
            }
        } else if let Some(child_element) = ElementRef::wrap(child) {
            if is_denylisted(child_element.value().name()) {
                continue;
            }
            collect_text(child_element, out);
        }
    }
}

#[cfg(test)]
#[path = "cleaner_tests.rs"]
mod tests;
