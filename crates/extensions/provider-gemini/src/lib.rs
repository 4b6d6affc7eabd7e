//! # PageLens Provider - Gemini
//!
//! Google Gemini provider for PageLens.

mod client;
mod provider;
mod types;

pub use client::{classify_api_error, GeminiClient, DEFAULT_BASE_URL};
pub use provider::{GeminiConfig, GeminiProvider};
pub use types::*;
