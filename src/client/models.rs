//! Chat-completion API data models
//!
//! Data structures for chat-completion requests and responses. Only the
//! fields this client reads are modelled; everything else is ignored.

use serde::{Deserialize, Serialize};

/// Message author role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single chat message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Chat completion request body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
}

impl ChatRequest {
    /// Request for a single turn: the system instruction followed by one user message
    pub fn single_turn(model: &str, system_prompt: &str, user_message: &str) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![Message::system(system_prompt), Message::user(user_message)],
        }
    }
}

/// Message inside a returned choice
///
/// `content` is nullable in the wire format (e.g. refusals, tool calls).
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// One candidate completion
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ResponseMessage>,
}

/// Chat completion response body
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

impl ChatResponse {
    /// Content of the first choice, if present
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()?
            .message
            .as_ref()?
            .content
            .as_deref()
    }
}

/// Error envelope returned with non-2xx responses
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiError,
}

/// Error details
#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    pub message: String,
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
    /// String on OpenAI, a number on some compatible services
    #[serde(default)]
    pub code: Option<serde_json::Value>,
}
