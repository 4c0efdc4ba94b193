//! Auth Router

use axum::{Router, routing::post};
use platform::password::CredentialHasher;
use platform::token::Authenticator;
use std::sync::Arc;

use crate::domain::repository::UserStorage;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router for any user storage implementation
///
/// All routes are public.
pub fn auth_router<U>(
    users: Arc<U>,
    hasher: Arc<dyn CredentialHasher>,
    authenticator: Arc<Authenticator>,
) -> Router
where
    U: UserStorage + Send + Sync + 'static,
{
    let state = AuthAppState {
        users,
        hasher,
        authenticator,
    };

    Router::new()
        .route("/signup", post(handlers::sign_up::<U>))
        .route("/signin", post(handlers::sign_in::<U>))
        .route("/verify", post(handlers::verify_token::<U>))
        .with_state(state)
}
