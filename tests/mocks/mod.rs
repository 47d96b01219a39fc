//! Mock infrastructure for testing external services
//!
//! Mock servers standing in for the remote chat-completion API.


pub use chat_api::*;
