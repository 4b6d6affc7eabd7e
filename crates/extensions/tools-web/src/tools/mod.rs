//! Web tool implementations.

mod web_fetch;

pub use web_fetch::{HttpFetcher, HttpFetcherConfig};
