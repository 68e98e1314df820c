//! Attaches credentials to outgoing requests

use super::types::AuthConfig;
use crate::error::{Error, Result};
use reqwest::header::{HeaderName, HeaderValue};
use reqwest::RequestBuilder;

#[derive(Debug, Clone)]
pub struct Authenticator {
    config: AuthConfig,
}

impl Authenticator {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// Add the credential header to `req`.
    ///
    /// An empty secret is rejected rather than sent. The header value is
    /// flagged sensitive so reqwest never prints it.
    pub fn apply(&self, req: RequestBuilder) -> Result<RequestBuilder> {
        let AuthConfig::Header {
            name,
            prefix,
            secret,
        } = &self.config
        else {
            return Ok(req);
        };

        if secret.is_empty() {
            return Err(Error::missing_field("api_key"));
        }

        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| Error::config(format!("Invalid auth header name: {e}")))?;
        let mut value = HeaderValue::from_str(&format!("{prefix}{secret}"))
            .map_err(|e| Error::invalid_value("api_key", e.to_string()))?;
        value.set_sensitive(true);

        Ok(req.header(name, value))
    }
}
