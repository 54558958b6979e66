//! Session token interface.

use crate::errors::Result;
use async_trait::async_trait;

/// Opaque token authorizing one capture session.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// A blank token cannot start a session.
    pub fn is_usable(&self) -> bool {
        !self.0.trim().is_empty()
    }
}

// Tokens are credentials; keep them out of logs.
impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionToken(..)")
    }
}

#[async_trait]
pub trait SessionTokenEffects: Send + Sync {
    /// Fetch a fresh session token. `Ok(None)` means the server answered
    /// without a token.
    async fn get_session_token(&self) -> Result<Option<SessionToken>>;
}
