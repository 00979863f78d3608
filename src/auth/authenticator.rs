//! Bearer token authenticator
//!
//! Applies `Authorization: Bearer <token>` to outgoing requests.

use crate::config::TapConfig;
use crate::error::{Error, Result};
use reqwest::RequestBuilder;

/// Authenticator that attaches a bearer token to every request
#[derive(Clone)]
pub struct BearerTokenAuthenticator {
    token: String,
}

impl BearerTokenAuthenticator {
    /// Create an authenticator from a raw token
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(Error::missing_field("token"));
        }
        Ok(Self { token })
    }

    /// Create an authenticator from the tap configuration
    pub fn from_config(config: &TapConfig) -> Result<Self> {
        Self::new(config.token.clone())
    }

    /// Value of the `Authorization` header
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// Apply authentication to a request builder
    pub fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        req.bearer_auth(&self.token)
    }
}

impl std::fmt::Debug for BearerTokenAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerTokenAuthenticator")
            .field("token", &"<redacted>")
            .finish()
    }
}
