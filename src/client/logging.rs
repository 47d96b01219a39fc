//! Per-call logging context
//!
//! Gives every round trip a short correlation id and timing so its log
//! records can be followed from start to completion.

use std::time::Instant;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::error::ChatError;

/// Context for tracking one chat round trip
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Unique identifier for this call (for log correlation)
    pub trace_id: String,
    /// When the call started
    pub start_time: Instant,
    /// Model requested
    pub model: String,
}

impl RequestContext {
    /// Create a new request context
    pub fn new(model: &str) -> Self {
        Self {
            trace_id: Uuid::new_v4().to_string()[..8].to_string(), // Short ID for readability
            start_time: Instant::now(),
            model: model.to_string(),
        }
    }

    /// Get elapsed time in milliseconds
    pub fn elapsed_ms(&self) -> u128 {
        self.start_time.elapsed().as_millis()
    }

    /// Get elapsed time in seconds, for latency histograms
    pub fn elapsed_secs(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }

    /// Log call initiation
    pub fn log_request_start(&self, url: &str, message_len: usize) {
        info!(
            trace_id = %self.trace_id,
            model = %self.model,
            url = %url,
            message_len = %message_len,
            "Chat request started"
        );
    }

    /// Log response received from upstream
    pub fn log_upstream_response(&self, status: u16) {
        debug!(
            trace_id = %self.trace_id,
            status = %status,
            elapsed_ms = %self.elapsed_ms(),
            "Response received from upstream"
        );
    }

    /// Log successful completion
    pub fn log_request_complete(&self, reply_len: usize) {
        info!(
            trace_id = %self.trace_id,
            model = %self.model,
            reply_len = %reply_len,
            elapsed_ms = %self.elapsed_ms(),
            "Chat request completed"
        );
    }

    /// Log a failed call
    pub fn log_request_failed(&self, err: &ChatError) {
        let rate_limited = err.as_transport().is_some_and(|t| t.is_rate_limited());
        if rate_limited {
            warn!(
                trace_id = %self.trace_id,
                elapsed_ms = %self.elapsed_ms(),
                error = %err,
                "Chat request rate limited"
            );
        } else {
            error!(
                trace_id = %self.trace_id,
                kind = err.kind(),
                elapsed_ms = %self.elapsed_ms(),
                error = %err,
                "Chat request failed"
            );
        }
    }
}
