//! # PageLens Protocols
//!
//! Core protocol definitions shared by the PageLens crates.
//! Contains only interface definitions - no implementations.
//!
//! ## Core Traits
//!
//! - [`LlmProvider`] - Trait for hosted text-generation backends
//! - [`PageSource`] - Trait for anything that can turn a URL into raw HTML
//! - [`TextExtractor`] - Trait for turning raw HTML into analyzable text

pub mod error;
pub mod provider;
pub mod source;
pub mod types;

pub use error::{InitError, ProviderError, ScrapeError};
pub use provider::{Generation, GenerationParams, GenerationRequest, LlmProvider};
pub use source::{PageSource, TextExtractor};
pub use types::*;
