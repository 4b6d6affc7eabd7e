//! LLM Provider protocol definitions.
//!
//! Providers connect to a hosted text-generation API and turn one prompt
//! into one [`Generation`].

mod request;
mod response;
mod traits;

pub use request::*;
pub use response::*;
pub use traits::*;
