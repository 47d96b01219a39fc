//! Chat-completion client module
//!
//! Provides the client for the remote chat-completion service.

pub mod chat;
pub mod headers;
pub mod logging;
pub mod models;

pub use chat::{ChatClient, DEFAULT_MODEL, SYSTEM_PROMPT};
pub use models::*;
