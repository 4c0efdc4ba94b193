//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::fmt;
use std::time::Duration;

use platform::token::{Authenticator, TokenError};

use crate::error::AuthResult;

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HS256 signing secret (at least 32 bytes)
    pub token_secret: Vec<u8>,
    /// Access token lifetime (12 hours)
    pub token_ttl: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: Vec::new(),
            token_ttl: Duration::from_secs(12 * 3600), // 12 hours
        }
    }
}

impl AuthConfig {
    /// Create config with a random token secret
    pub fn with_random_secret() -> Self {
        Self {
            token_secret: platform::crypto::random_secret(),
            ..Default::default()
        }
    }

    /// Create config for development (random secret, week-long tokens)
    pub fn development() -> Self {
        Self {
            token_ttl: Duration::from_secs(7 * 24 * 3600), // 1 week
            ..Self::with_random_secret()
        }
    }

    /// Get token TTL in seconds
    pub fn token_ttl_secs(&self) -> u64 {
        self.token_ttl.as_secs()
    }

    /// Build the token authenticator
    ///
    /// Fails when the secret is too short to sign with or the lifetime does
    /// not fit a signed duration.
    pub fn authenticator(&self) -> AuthResult<Authenticator> {
        let ttl = chrono::Duration::from_std(self.token_ttl).map_err(|_| TokenError::Lifetime)?;
        Ok(Authenticator::new(&self.token_secret, ttl)?)
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_secret", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}
