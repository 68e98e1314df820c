//! HTTP access to the Teamtailor API
//!
//! - 429 answers wait for the server's `X-Rate-Limit-Reset` hint
//! - 5xx answers, timeouts and refused connections back off exponentially
//! - A governor token bucket throttles requests on the client side
//! - Credentials come from the auth module

mod backoff;
mod client;
mod rate_limit;

pub use backoff::{backoff_from_headers, RetryBackoff, RATE_LIMIT_RESET_HEADER};
pub use client::{HttpClient, HttpClientConfig, RequestConfig, API_VERSION_HEADER};
pub use rate_limit::Throttle;
