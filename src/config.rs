//! Configuration management for Parley
//!
//! Configuration is loaded from environment variables (after `.env`, which
//! the binary loads through dotenvy before calling [`Config::from_env`]).

use std::env;
use std::fmt;

use reqwest::header::HeaderValue;
use reqwest::Url;

use crate::error::{ChatError, ChatResult};

/// Environment variable holding the API credential
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
/// Environment variable overriding the service base URL
pub const API_URL_VAR: &str = "OPENAI_API_URL";
/// Default chat-completion service base URL
pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1";

/// Secret used to authenticate against the chat-completion service
///
/// Never empty and always usable in an Authorization header. `Debug` output
/// is redacted so the value cannot leak into logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a secret, rejecting blank values and characters a header cannot carry
    pub fn new(secret: impl Into<String>) -> ChatResult<Self> {
        let secret = secret.into();
        if secret.trim().is_empty() {
            return Err(ChatError::Configuration(format!(
                "{} must not be empty",
                API_KEY_VAR
            )));
        }
        if HeaderValue::from_str(&format!("Bearer {}", secret)).is_err() {
            return Err(ChatError::Configuration(format!(
                "{} contains characters not allowed in an HTTP header",
                API_KEY_VAR
            )));
        }
        Ok(Self(secret))
    }

    /// Raw secret, for building the Authorization header
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Credential for the chat-completion service
    pub api_key: Credential,
    /// Base URL of the chat-completion service, without trailing slash
    pub api_url: String,
}

impl Config {
    /// Build a configuration explicitly
    pub fn new(api_key: Credential, api_url: impl Into<String>) -> ChatResult<Self> {
        let api_url = api_url.into().trim().trim_end_matches('/').to_string();

        let parsed = Url::parse(&api_url).map_err(|e| {
            ChatError::Configuration(format!("Invalid {} {:?}: {}", API_URL_VAR, api_url, e))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") || !parsed.has_host() {
            return Err(ChatError::Configuration(format!(
                "{} must be an http(s) URL, got {:?}",
                API_URL_VAR, api_url
            )));
        }

        Ok(Self { api_key, api_url })
    }

    /// Load configuration from environment variables
    pub fn from_env() -> ChatResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> ChatResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR).ok_or_else(|| {
            ChatError::Configuration(format!("{} must be set", API_KEY_VAR))
        })?;
        let api_url = lookup(API_URL_VAR).unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Self::new(Credential::new(api_key)?, api_url)
    }
}
