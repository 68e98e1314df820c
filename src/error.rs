//! Error type shared by every module of the connector

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Rate limited, retry after {retry_after_seconds}s")]
    RateLimited { retry_after_seconds: u64 },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Response Body Errors
    // ============================================================================
    #[error("JSONPath error: {message}")]
    JsonPath { message: String },

    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    // ============================================================================
    // State and Stream Errors
    // ============================================================================
    #[error("State error: {message}")]
    State { message: String },

    #[error("Stream '{stream}' not found")]
    StreamNotFound { stream: String },

    #[error("Failed to emit message: {message}")]
    Output { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    pub fn json_path(message: impl Into<String>) -> Self {
        Self::JsonPath {
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    pub fn state(message: impl Into<String>) -> Self {
        Self::State {
            message: message.into(),
        }
    }

    pub fn output(message: impl Into<String>) -> Self {
        Self::Output {
            message: message.into(),
        }
    }

    /// Whether sending the same request again could succeed.
    ///
    /// Rate limits, 5xx answers, timeouts and failed connections qualify.
    /// Every other 4xx or transport failure means the request itself is
    /// wrong.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(e) => e.is_timeout() || e.is_connect(),
            Error::RateLimited { .. } | Error::Timeout { .. } => true,
            Error::HttpStatus { status, .. } => *status == 429 || (500..600).contains(status),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Prefix an error with what was being attempted
pub trait ResultExt<T> {
    fn context(self, message: impl Into<String>) -> Result<T>;

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.with_context(|| message.into())
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| Error::Other(format!("{}: {}", f(), e.into())))
    }
}
