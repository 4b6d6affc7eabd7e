//! Headless browser page source for PageLens.
//!
//! Loads pages in Chrome through the Chrome DevTools Protocol (CDP) so that
//! client-side rendered content is present in the captured HTML.
//!
//! ```text
//! ┌─────────────────┐    WebSocket     ┌──────────────────┐
//! │  BrowserScraper │ ◄──────────────► │  Headless Chrome │
//! │  (this crate)   │       CDP        │                  │
//! └─────────────────┘                  └──────────────────┘
//! ```
//!
//! If Chrome is already listening on the debug port it is reused; otherwise
//! one is launched for the duration of a single fetch and then stopped.

pub mod cdp;
pub mod manager;
mod scraper;

pub use cdp::{CdpClient, CdpError, PageSession};
pub use manager::{BrowserError, BrowserManager, BrowserManagerConfig, DEFAULT_USER_AGENT};
pub use scraper::BrowserScraper;
