//! Authentication
//!
//! Teamtailor expects `authorization: Token token=<api_key>` on every
//! request; [`AuthConfig::token`] builds exactly that.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::{AuthConfig, TOKEN_HEADER, TOKEN_PREFIX};
