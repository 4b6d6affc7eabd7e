//! Error types for the PageLens protocol layer.

mod init;
mod provider;
mod scrape;

pub use init::*;
pub use provider::*;
pub use scrape::*;
