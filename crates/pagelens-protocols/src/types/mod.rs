//! Common types used across PageLens.

mod message;

pub use message::*;
