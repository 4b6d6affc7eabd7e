//! Chrome DevTools Protocol (CDP) client.
//!
//! Talks to Chrome over its remote-debugging WebSocket using CDP's JSON-RPC
//! messages. Only the handful of commands needed to load a page and read its
//! markup are wrapped.
//!
//! ```rust,ignore
//! let client = CdpClient::connect("http://localhost:9222").await?;
//! let page = client.new_page().await?;
//! page.navigate("https://example.com", Duration::from_secs(30)).await?;
//! let html = page.outer_html().await?;
//! ```

mod client;
mod error;
mod protocol;
mod session;

pub use client::CdpClient;
pub use error::CdpError;
pub use protocol::*;
pub use session::PageSession;
