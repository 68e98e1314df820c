//! The connector's HTTP client
//!
//! Every page request goes through [`HttpClient::get_with_config`]. Each
//! attempt ends in one of three ways: a usable response, an error worth
//! retrying after some wait, or a fatal error, as decided by
//! [`Error::is_retryable`]. A 429 waits for the `X-Rate-Limit-Reset` hint,
//! 5xx answers, timeouts and refused connections use [`RetryBackoff`], and
//! any other 4xx is returned straight away.

use super::backoff::{backoff_from_headers, RetryBackoff};
use super::rate_limit::Throttle;
use crate::auth::{AuthConfig, Authenticator};
use crate::config::TapConfig;
use crate::error::{Error, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Header carrying the requested API version
pub const API_VERSION_HEADER: &str = "x-api-version";

#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Prefix for relative request paths
    pub base_url: Option<String>,
    pub timeout: Duration,
    /// Retries after the first attempt
    pub max_retries: u32,
    pub backoff: RetryBackoff,
    /// Client-side throttle, 0 turns it off
    pub requests_per_second: u32,
    /// Sent with every request
    pub default_headers: HashMap<String, String>,
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: Duration::from_secs(30),
            max_retries: 5,
            backoff: RetryBackoff::default(),
            requests_per_second: 10,
            default_headers: HashMap::new(),
            user_agent: format!("{}/{}", crate::NAME, crate::VERSION),
        }
    }
}

impl HttpClientConfig {
    /// Client settings derived from the connector configuration
    pub fn from_tap_config(config: &TapConfig) -> Self {
        Self {
            base_url: Some(config.api_url.clone()),
            timeout: Duration::from_secs(config.timeout_seconds),
            max_retries: config.max_retries,
            requests_per_second: config.requests_per_second,
            default_headers: HashMap::from([(
                API_VERSION_HEADER.to_string(),
                config.api_version.clone(),
            )]),
            user_agent: config
                .user_agent
                .clone()
                .unwrap_or_else(|| Self::default().user_agent),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    #[must_use]
    pub fn with_backoff(mut self, backoff: RetryBackoff) -> Self {
        self.backoff = backoff;
        self
    }

    #[must_use]
    pub fn without_throttle(mut self) -> Self {
        self.requests_per_second = 0;
        self
    }

    fn header_map(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::with_capacity(self.default_headers.len());
        for (name, value) in &self.default_headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| Error::config(format!("Invalid header name {name:?}: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| Error::config(format!("Invalid value for header {name}: {e}")))?;
            headers.insert(name, value);
        }
        Ok(headers)
    }
}

/// Per-request overrides
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    pub query: HashMap<String, String>,
    pub timeout: Option<Duration>,
    pub max_retries: Option<u32>,
}

impl RequestConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Replace all query parameters
    #[must_use]
    pub fn with_query(mut self, query: HashMap<String, String>) -> Self {
        self.query = query;
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn retries(mut self, retries: u32) -> Self {
        self.max_retries = Some(retries);
        self
    }
}

/// How a single attempt ended
enum Attempt {
    Done(Response),
    Retry { wait: Duration, error: Error },
    Fail(Error),
}

pub struct HttpClient {
    inner: Client,
    config: HttpClientConfig,
    auth: Option<Authenticator>,
    throttle: Option<Throttle>,
}

impl HttpClient {
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let inner = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .default_headers(config.header_map()?)
            .build()?;

        Ok(Self {
            inner,
            throttle: Throttle::per_second(config.requests_per_second),
            config,
            auth: None,
        })
    }

    pub fn with_auth(config: HttpClientConfig, auth: AuthConfig) -> Result<Self> {
        let mut client = Self::with_config(config)?;
        client.auth = Some(Authenticator::new(auth));
        Ok(client)
    }

    /// Authenticated client for the Teamtailor API
    pub fn from_tap_config(config: &TapConfig) -> Result<Self> {
        Self::with_auth(
            HttpClientConfig::from_tap_config(config),
            AuthConfig::token(&config.api_key),
        )
    }

    pub async fn get(&self, path: &str) -> Result<Response> {
        self.get_with_config(path, RequestConfig::default()).await
    }

    /// GET `path` (relative to the base URL, or absolute), retrying as
    /// described in the module docs
    pub async fn get_with_config(&self, path: &str, request: RequestConfig) -> Result<Response> {
        let url = self.build_url(path)?;
        let retries = request.max_retries.unwrap_or(self.config.max_retries);
        let timeout = request.timeout.unwrap_or(self.config.timeout);

        let mut attempt = 0;
        loop {
            if let Some(throttle) = &self.throttle {
                throttle.acquire().await;
            }

            let builder = self.prepare(&url, &request, timeout)?;
            match self.send(builder, attempt, timeout).await {
                Attempt::Done(response) => {
                    debug!(%url, status = response.status().as_u16(), "GET succeeded");
                    return Ok(response);
                }
                Attempt::Fail(error) => return Err(error),
                Attempt::Retry { error, .. } if attempt >= retries => {
                    warn!(%url, "Giving up after {} attempts", attempt + 1);
                    return Err(error);
                }
                Attempt::Retry { wait, error } => {
                    warn!(
                        %url,
                        "{error} (attempt {}/{}), retrying in {wait:?}",
                        attempt + 1,
                        retries + 1
                    );
                    tokio::time::sleep(wait).await;
                    attempt += 1;
                }
            }
        }
    }

    /// Resolve a request path against the base URL. Absolute URLs, such as
    /// `links.next` values, are used as they are.
    pub fn build_url(&self, path: &str) -> Result<Url> {
        if path.starts_with("http://") || path.starts_with("https://") {
            return Ok(Url::parse(path)?);
        }

        let base = self.config.base_url.as_deref().unwrap_or_default();
        let joined = format!(
            "{}/{}",
            base.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Ok(Url::parse(&joined)?)
    }

    fn prepare(&self, url: &Url, request: &RequestConfig, timeout: Duration) -> Result<RequestBuilder> {
        let mut builder = self.inner.get(url.clone()).timeout(timeout);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        match &self.auth {
            Some(auth) => auth.apply(builder),
            None => Ok(builder),
        }
    }

    async fn send(&self, builder: RequestBuilder, attempt: u32, timeout: Duration) -> Attempt {
        let error = match builder.send().await {
            Err(e) if e.is_timeout() => Error::Timeout {
                timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            },
            Err(e) => Error::Http(e),
            Ok(response) if response.status() == StatusCode::TOO_MANY_REQUESTS => {
                let wait = backoff_from_headers(response.headers());
                return Attempt::Retry {
                    wait,
                    error: Error::RateLimited {
                        retry_after_seconds: wait.as_secs(),
                    },
                };
            }
            Ok(response) => {
                let status = response.status();
                if !status.is_client_error() && !status.is_server_error() {
                    return Attempt::Done(response);
                }
                let body = response.text().await.unwrap_or_default();
                Error::http_status(status.as_u16(), body)
            }
        };

        if error.is_retryable() {
            Attempt::Retry {
                wait: self.config.backoff.delay(attempt),
                error,
            }
        } else {
            Attempt::Fail(error)
        }
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.config.base_url)
            .field("max_retries", &self.config.max_retries)
            .field("authenticated", &self.auth.is_some())
            .field("throttle", &self.throttle)
            .finish_non_exhaustive()
    }
}
