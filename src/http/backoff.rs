//! How long to wait before retrying a request
//!
//! Teamtailor signals rate limiting with HTTP 429 and reports how many
//! seconds remain until the quota resets in `X-Rate-Limit-Reset`. Server
//! errors and transport failures carry no such hint and back off
//! exponentially instead.

use reqwest::header::HeaderMap;
use std::time::Duration;
use tracing::warn;

/// Header carrying the seconds until the rate limit resets
pub const RATE_LIMIT_RESET_HEADER: &str = "X-Rate-Limit-Reset";

/// Compute the wait before retrying a rate-limited request.
///
/// A missing header means no wait. An unparsable value is treated the same
/// way, with a warning.
pub fn backoff_from_headers(headers: &HeaderMap) -> Duration {
    let Some(value) = headers.get(RATE_LIMIT_RESET_HEADER) else {
        return Duration::ZERO;
    };

    match value.to_str().ok().and_then(|s| s.trim().parse::<u64>().ok()) {
        Some(seconds) => Duration::from_secs(seconds),
        None => {
            warn!("Ignoring unparsable {RATE_LIMIT_RESET_HEADER} header: {value:?}");
            Duration::ZERO
        }
    }
}

/// Doubling delay for retries the server gave no hint for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryBackoff {
    pub initial: Duration,
    pub ceiling: Duration,
}

impl Default for RetryBackoff {
    fn default() -> Self {
        Self::new(Duration::from_millis(100), Duration::from_secs(60))
    }
}

impl RetryBackoff {
    pub fn new(initial: Duration, ceiling: Duration) -> Self {
        Self { initial, ceiling }
    }

    /// Delay after the given zero-based failed attempt
    pub fn delay(&self, attempt: u32) -> Duration {
        self.initial
            .saturating_mul(2u32.saturating_pow(attempt))
            .min(self.ceiling)
    }
}
