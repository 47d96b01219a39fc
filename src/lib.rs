//! Parley - minimal chat-completion client
//!
//! Sends a single user message to a remote chat-completion API and returns
//! the trimmed reply. Configuration comes from the environment; see
//! [`Config::from_env`].

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod metrics;

pub use crate::client::{ChatClient, DEFAULT_MODEL, SYSTEM_PROMPT};
pub use crate::config::{Config, Credential};
pub use crate::error::{ChatError, ChatResult, TransportError};
