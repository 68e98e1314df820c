//! Connector configuration
//!
//! The configuration is read once at startup from a JSON or YAML file (or an
//! inline JSON string) and is read-only afterwards.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::Path;

/// Default API base URL
pub const DEFAULT_API_URL: &str = "https://api.teamtailor.com";

/// Default value for the `x-api-version` header
pub const DEFAULT_API_VERSION: &str = "20231215";

/// Default number of records requested per page
pub const DEFAULT_PAGE_SIZE: u32 = 30;

// ============================================================================
// Tap Config
// ============================================================================

/// Runtime configuration for the connector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TapConfig {
    /// API key used in the `authorization` header
    #[serde(default)]
    pub api_key: String,

    /// Base URL for API requests
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// API version sent as `x-api-version`
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Optional User-Agent override
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Records per page once a page cursor is in play
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Maximum number of retries per request
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Client-side request throttle (0 disables it)
    #[serde(default = "default_rps")]
    pub requests_per_second: u32,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    5
}

fn default_rps() -> u32 {
    10
}

impl TapConfig {
    /// Create a config with the given API key and defaults for everything else
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_url: default_api_url(),
            api_version: default_api_version(),
            user_agent: None,
            page_size: default_page_size(),
            timeout_seconds: default_timeout(),
            max_retries: default_max_retries(),
            requests_per_second: default_rps(),
        }
    }

    /// Set the base URL
    #[must_use]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Set the user agent
    #[must_use]
    pub fn with_user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Set max retries
    #[must_use]
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the client-side throttle
    #[must_use]
    pub fn with_requests_per_second(mut self, rps: u32) -> Self {
        self.requests_per_second = rps;
        self
    }

    /// Parse and validate a config from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| Error::config(format!("Invalid config JSON: {e}")))?;
        config.validated()
    }

    /// Parse and validate a config from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validated()
    }

    /// Load a config file. `.yaml`/`.yml` files are parsed as YAML, anything
    /// else as JSON.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml(&content),
            _ => Self::from_json(&content),
        }
    }

    /// Validate required fields and normalize optional ones
    pub fn validated(mut self) -> Result<Self> {
        if self.api_key.trim().is_empty() {
            return Err(Error::missing_field("api_key"));
        }
        if self.api_url.trim().is_empty() {
            return Err(Error::missing_field("api_url"));
        }
        url::Url::parse(&self.api_url)
            .map_err(|e| Error::invalid_value("api_url", e.to_string()))?;
        if self.page_size == 0 {
            return Err(Error::invalid_value("page_size", "must be greater than 0"));
        }

        self.user_agent = self.user_agent.filter(|agent| !agent.trim().is_empty());
        Ok(self)
    }

    /// JSON schema describing the accepted configuration
    pub fn json_schema() -> serde_json::Value {
        json!({
            "type": "object",
            "title": "tap-teamtailor",
            "properties": {
                "api_key": {
                    "type": "string",
                    "secret": true,
                    "description": "The api key to authorize against the API service"
                },
                "api_url": {
                    "type": "string",
                    "default": DEFAULT_API_URL,
                    "description": "The base url for the API service"
                },
                "api_version": {
                    "type": "string",
                    "default": DEFAULT_API_VERSION,
                    "description": "The api version for the API service"
                },
                "user_agent": {
                    "type": "string",
                    "description": "User-Agent header sent with every request"
                },
                "page_size": {
                    "type": "integer",
                    "default": DEFAULT_PAGE_SIZE,
                    "description": "Records per page"
                },
                "timeout_seconds": {
                    "type": "integer",
                    "default": default_timeout()
                },
                "max_retries": {
                    "type": "integer",
                    "default": default_max_retries()
                },
                "requests_per_second": {
                    "type": "integer",
                    "default": default_rps(),
                    "description": "Client-side request throttle, 0 disables it"
                }
            },
            "required": ["api_key"]
        })
    }
}
