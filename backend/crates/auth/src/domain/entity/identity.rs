//! Request Identity
//!
//! Who the current request acts for. Produced by verifying a bearer token,
//! lives for one request, never persisted.

use kernel::id::UserId;
use platform::token::TokenClaims;

/// Verified caller of a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub user_name: String,
}

impl From<TokenClaims> for Identity {
    fn from(claims: TokenClaims) -> Self {
        Self {
            user_id: UserId::from_uuid(claims.sub),
            user_name: claims.name,
        }
    }
}
