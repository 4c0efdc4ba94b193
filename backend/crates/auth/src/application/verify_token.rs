//! Verify Token Use Case

use std::sync::Arc;

use kernel::id::UserId;
use platform::token::Authenticator;

use crate::domain::entity::identity::Identity;
use crate::error::{AuthError, AuthResult};

/// Verify token input
pub struct VerifyTokenInput {
    pub access_token: String,
}

/// Verify token output
#[derive(Debug)]
pub struct VerifyTokenOutput {
    pub user_id: UserId,
    pub username: String,
}

/// Checks a token and reports who it was issued to
pub struct VerifyTokenUseCase {
    authenticator: Arc<Authenticator>,
}

impl VerifyTokenUseCase {
    pub fn new(authenticator: Arc<Authenticator>) -> Self {
        Self { authenticator }
    }

    pub fn execute(&self, input: VerifyTokenInput) -> AuthResult<VerifyTokenOutput> {
        let identity = self.identify(&input.access_token)?;
        Ok(VerifyTokenOutput {
            user_id: identity.user_id,
            username: identity.user_name,
        })
    }

    /// Verify a raw token into the request identity
    pub fn identify(&self, token: &str) -> AuthResult<Identity> {
        let claims = self.authenticator.parse_token(token).map_err(|e| {
            tracing::info!(error = %e, "Failed to parse token");
            AuthError::InvalidToken
        })?;
        Ok(Identity::from(claims))
    }
}
