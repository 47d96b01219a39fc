//! Chat-completion client
//!
//! Sends one user message (behind a fixed system instruction) to the
//! chat-completion service and returns the trimmed reply.

use reqwest::header::HeaderMap;
use tracing::{debug, instrument};

use crate::{
    client::{
        headers::build_default_headers,
        logging::RequestContext,
        models::{ApiErrorResponse, ChatRequest, ChatResponse},
    },
    config::Config,
    error::{ChatError, ChatResult, TransportError},
    metrics,
};

/// Model every request is sent to
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
/// System instruction prepended to every request
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Chat-completion client
///
/// Holds only immutable configuration, so one instance can be cloned or
/// shared across tasks and called concurrently.
#[derive(Debug, Clone)]
pub struct ChatClient {
    client: reqwest::Client,
    base_url: String,
    headers: HeaderMap,
    model: &'static str,
}

impl ChatClient {
    /// Create a new client with its own HTTP connection pool
    pub fn new(config: &Config) -> ChatResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("parley/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Self::with_http_client(client, config)
    }

    /// Create a client on top of a caller-supplied HTTP client
    ///
    /// Timeouts, proxies and pooling are whatever `client` was built with.
    /// Request headers are built here, so a credential that cannot be sent
    /// fails construction rather than every call.
    pub fn with_http_client(client: reqwest::Client, config: &Config) -> ChatResult<Self> {
        Ok(Self {
            client,
            base_url: config.api_url.clone(),
            headers: build_default_headers(&config.api_key)?,
            model: DEFAULT_MODEL,
        })
    }

    /// Model identifier sent with every request
    pub fn model(&self) -> &'static str {
        self.model
    }

    /// Base URL of the chat-completion service
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send `user_message` and return the first choice's content, trimmed
    ///
    /// Makes exactly one request; nothing is retried. Dropping the future
    /// aborts the in-flight request.
    #[instrument(skip(self, user_message), fields(model = %self.model))]
    pub async fn get_chat_response(&self, user_message: &str) -> ChatResult<String> {
        let ctx = RequestContext::new(self.model);
        let url = format!("{}/chat/completions", self.base_url);
        let request = ChatRequest::single_turn(self.model, SYSTEM_PROMPT, user_message);

        ctx.log_request_start(&url, user_message.len());
        metrics::record_request(self.model);

        let result = self.send(&ctx, &url, &request).await;
        metrics::record_duration(self.model, ctx.elapsed_secs());

        match result {
            Ok(reply) => {
                ctx.log_request_complete(reply.len());
                Ok(reply)
            }
            Err(e) => {
                ctx.log_request_failed(&e);
                metrics::record_error(e.kind());
                Err(e)
            }
        }
    }

    async fn send(
        &self,
        ctx: &RequestContext,
        url: &str,
        request: &ChatRequest,
    ) -> ChatResult<String> {
        let response = self
            .client
            .post(url)
            .headers(self.headers.clone())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        ctx.log_upstream_response(status.as_u16());

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(upstream_error(status.as_u16(), &text).into());
        }

        let body = response.text().await?;
        debug!(trace_id = %ctx.trace_id, body_len = body.len(), "Chat response body received");

        extract_reply(&body)
    }
}

/// Turn a non-2xx response into a transport error, preferring the service's own message
fn upstream_error(status: u16, body: &str) -> TransportError {
    let message = match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(parsed) => parsed.error.message,
        Err(_) if body.trim().is_empty() => "empty response body".to_string(),
        Err(_) => body.trim().to_string(),
    };
    TransportError::Status { status, message }
}

/// Pull the trimmed first-choice content out of a successful response body
fn extract_reply(body: &str) -> ChatResult<String> {
    let parsed: ChatResponse = serde_json::from_str(body).map_err(|e| {
        ChatError::MalformedResponse(format!("Failed to parse chat response: {}", e))
    })?;

    if parsed.choices.is_empty() {
        return Err(ChatError::MalformedResponse(
            "response contains no choices".to_string(),
        ));
    }

    parsed
        .first_content()
        .map(|content| content.trim().to_string())
        .ok_or_else(|| {
            ChatError::MalformedResponse("first choice has no message content".to_string())
        })
}
