//! Command-line demo support
//!
//! Everything the `parley` binary does besides wiring: logging setup, the
//! single demo round trip, and mapping errors to diagnostics and exit codes.

use std::env;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{
    client::ChatClient,
    config::Config,
    error::{ChatError, ChatResult},
};

/// Prompt sent by the demo
pub const SAMPLE_PROMPT: &str = "Write a one-sentence bedtime story about a unicorn.";

/// Printed when the service reports an exhausted quota or rate limit
pub const QUOTA_HINT: &str =
    "❌ Quota exceeded – please check your plan at https://platform.openai.com/account/billing/plan";

/// Environment variable selecting the log output format (`json` or text)
pub const LOG_FORMAT_VAR: &str = "PARLEY_LOG_FORMAT";

/// Exit code for a missing or invalid configuration
pub const EXIT_CONFIG: u8 = 1;
/// Exit code when the service rejects the call for quota/rate reasons
pub const EXIT_QUOTA: u8 = 2;
/// Exit code for any other API failure
pub const EXIT_API: u8 = 3;

/// Initialize tracing on stderr so stdout carries only the reply
pub fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "parley=info".into());
    let json = env::var(LOG_FORMAT_VAR)
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| anyhow::anyhow!(e))
}

/// Load configuration, build a client and send the demo prompt
pub async fn run() -> ChatResult<String> {
    let config = Config::from_env()?;
    info!(api_url = %config.api_url, "Configuration loaded successfully");

    let client = ChatClient::new(&config)?;
    client.get_chat_response(SAMPLE_PROMPT).await
}

/// Process exit code for a failed run
pub fn exit_code(err: &ChatError) -> u8 {
    match err {
        ChatError::Configuration(_) => EXIT_CONFIG,
        ChatError::Transport(t) if t.is_rate_limited() => EXIT_QUOTA,
        ChatError::Transport(_) | ChatError::MalformedResponse(_) => EXIT_API,
    }
}

/// Human-readable diagnostic for a failed run
pub fn diagnostic(err: &ChatError) -> String {
    match exit_code(err) {
        EXIT_CONFIG => format!("❌ {}", err),
        EXIT_QUOTA => QUOTA_HINT.to_string(),
        _ => format!("API ERROR ▶ {}", err),
    }
}
