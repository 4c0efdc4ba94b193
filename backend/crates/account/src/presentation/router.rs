//! Account Router

use auth::{UserStorage, require_auth};
use axum::{
    Router,
    routing::{get, post},
};
use platform::token::Authenticator;
use std::sync::Arc;

use crate::domain::AccountStorage;
use crate::presentation::handlers::{self, AccountAppState};

/// Create the Account router
///
/// Every route requires a bearer token. Paths are absolute so the router is
/// merged, not nested.
pub fn account_router<A, U>(
    accounts: Arc<A>,
    users: Arc<U>,
    authenticator: Arc<Authenticator>,
) -> Router
where
    A: AccountStorage + Send + Sync + 'static,
    U: UserStorage + Send + Sync + 'static,
{
    let state = AccountAppState { accounts, users };

    let routes = Router::new()
        .route("/account", post(handlers::create_account::<A, U>))
        .route(
            "/account/{id}",
            get(handlers::get_account::<A, U>).patch(handlers::update_account::<A, U>),
        )
        .with_state(state);

    require_auth(routes, authenticator)
}
