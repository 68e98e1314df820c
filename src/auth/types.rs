//! Credential settings

/// Header the Teamtailor API reads the token from
pub const TOKEN_HEADER: &str = "authorization";

/// Prefix placed in front of the API key
pub const TOKEN_PREFIX: &str = "Token token=";

/// Credentials attached to every request
#[derive(Clone, Default, PartialEq, Eq)]
pub enum AuthConfig {
    #[default]
    None,

    /// A secret sent in a request header, optionally behind a fixed prefix
    Header {
        name: String,
        prefix: String,
        secret: String,
    },
}

impl AuthConfig {
    /// Teamtailor token auth: `authorization: Token token=<api_key>`
    pub fn token(api_key: impl Into<String>) -> Self {
        Self::Header {
            name: TOKEN_HEADER.to_string(),
            prefix: TOKEN_PREFIX.to_string(),
            secret: api_key.into(),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

// Keeps the API key out of logs and panic messages.
impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Header { name, prefix, .. } => f
                .debug_struct("Header")
                .field("name", name)
                .field("prefix", prefix)
                .field("secret", &"<redacted>")
                .finish(),
        }
    }
}

#[cfg(test)]
mod type_tests {
    use super::*;

    #[test]
    fn test_auth_config_default() {
        assert!(AuthConfig::default().is_none());
    }

    #[test]
    fn test_token_config() {
        assert_eq!(
            AuthConfig::token("abc"),
            AuthConfig::Header {
                name: "authorization".to_string(),
                prefix: "Token token=".to_string(),
                secret: "abc".to_string(),
            }
        );
    }

    #[test]
    fn test_debug_redacts_secret() {
        let debug = format!("{:?}", AuthConfig::token("super-secret"));
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("super-secret"));
    }
}
