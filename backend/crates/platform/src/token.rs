//! Signed Identity Tokens
//!
//! [`Authenticator`] issues and verifies HS256 JWTs that carry a user's id and
//! name. It holds no mutable state: the secret is fixed at construction and
//! the instance is shared behind an `Arc`.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Minimum secret length accepted by [`Authenticator::new`], in bytes
pub const MIN_SECRET_LEN: usize = 32;

/// Token errors
#[derive(Debug, Error)]
pub enum TokenError {
    /// Secret too short to sign with (misconfiguration)
    #[error("Token secret must be at least {min} bytes (got {actual})")]
    WeakSecret { min: usize, actual: usize },

    /// Lifetime is not positive, or pushes expiry past the representable range
    #[error("Token lifetime out of range")]
    Lifetime,

    /// Signing failed (misconfiguration)
    #[error("Token signing failed: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),

    /// Malformed, tampered with, or expired
    #[error("Invalid token")]
    Invalid(#[source] jsonwebtoken::errors::Error),
}

/// Who a token is issued for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSubject {
    pub user_id: Uuid,
    pub user_name: String,
}

/// JWT claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// User id
    pub sub: Uuid,
    /// User name
    pub name: String,
    /// Issued at (seconds since epoch)
    pub iat: i64,
    /// Expires at (seconds since epoch)
    pub exp: i64,
}

impl TokenClaims {
    pub fn subject(&self) -> TokenSubject {
        TokenSubject {
            user_id: self.sub,
            user_name: self.name.clone(),
        }
    }
}

/// Issues and verifies identity tokens
#[derive(Clone)]
pub struct Authenticator {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl Authenticator {
    /// Create an authenticator from a raw secret
    ///
    /// Fails with [`TokenError::WeakSecret`] when the secret is shorter than
    /// [`MIN_SECRET_LEN`], and with [`TokenError::Lifetime`] when the
    /// lifetime is not positive.
    pub fn new(secret: &[u8], ttl: Duration) -> Result<Self, TokenError> {
        if secret.len() < MIN_SECRET_LEN {
            return Err(TokenError::WeakSecret {
                min: MIN_SECRET_LEN,
                actual: secret.len(),
            });
        }
        if ttl <= Duration::zero() {
            return Err(TokenError::Lifetime);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl,
        })
    }

    /// Token lifetime
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token valid from now
    pub fn generate_token(&self, subject: &TokenSubject) -> Result<String, TokenError> {
        self.generate_token_at(subject, Utc::now())
    }

    /// Issue a token with an explicit issue time
    ///
    /// The same subject and issue time always produce the same token.
    pub fn generate_token_at(
        &self,
        subject: &TokenSubject,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let expires_at = issued_at
            .checked_add_signed(self.ttl)
            .ok_or(TokenError::Lifetime)?;
        let claims = TokenClaims {
            sub: subject.user_id,
            name: subject.user_name.clone(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(TokenError::Signing)
    }

    /// Verify signature and expiry, returning the claims
    pub fn parse_token(&self, token: &str) -> Result<TokenClaims, TokenError> {
        decode::<TokenClaims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(TokenError::Invalid)
    }
}

impl fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Authenticator")
            .field("secret", &"[REDACTED]")
            .field("ttl", &self.ttl)
            .finish()
    }
}
