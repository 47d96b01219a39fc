//! Error types for Parley
//!
//! Every failure of a chat round trip falls into one of three kinds:
//! configuration, transport, or a malformed response.

use thiserror::Error;

/// Application-level errors
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// Failures talking to the chat-completion service
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upstream returned {status}: {message}")]
    Status { status: u16, message: String },
}

impl TransportError {
    /// HTTP status returned by the service, if the request got that far
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Http(e) => e.status().map(|s| s.as_u16()),
            TransportError::Status { status, .. } => Some(*status),
        }
    }

    /// Quota exhausted or rate limited by the service
    pub fn is_rate_limited(&self) -> bool {
        self.status() == Some(429)
    }

    /// Credential rejected by the service
    pub fn is_auth_rejected(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }
}

impl From<reqwest::Error> for ChatError {
    fn from(e: reqwest::Error) -> Self {
        ChatError::Transport(TransportError::Http(e))
    }
}

impl ChatError {
    /// Short label used for metrics and logs
    pub fn kind(&self) -> &'static str {
        match self {
            ChatError::Configuration(_) => "configuration",
            ChatError::Transport(_) => "transport",
            ChatError::MalformedResponse(_) => "malformed",
        }
    }

    /// Transport details, when this is a transport failure
    pub fn as_transport(&self) -> Option<&TransportError> {
        match self {
            ChatError::Transport(e) => Some(e),
            _ => None,
        }
    }
}

/// Result type alias for convenience
pub type ChatResult<T> = Result<T, ChatError>;
