//! Web tools for PageLens.
//!
//! Provides the text cleaner that turns rendered HTML into readable text,
//! and a plain HTTP page source for pages that need no JavaScript.

pub mod cleaner;
mod tools;

pub use cleaner::{clean_body, extract_body, HtmlCleaner, DENYLISTED_TAGS};
pub use tools::{HttpFetcher, HttpFetcherConfig};
