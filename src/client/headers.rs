//! Header construction for chat-completion requests

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

use crate::config::Credential;
use crate::error::{ChatError, ChatResult};

/// Build default headers for chat-completion requests
///
/// The Authorization value is marked sensitive so it is omitted from
/// reqwest's own debug output.
pub fn build_default_headers(api_key: &Credential) -> ChatResult<HeaderMap> {
    let mut headers = HeaderMap::new();

    let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key.expose())).map_err(|_| {
        ChatError::Configuration("API key contains characters not allowed in a header".to_string())
    })?;
    auth.set_sensitive(true);

    headers.insert(AUTHORIZATION, auth);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    Ok(headers)
}
