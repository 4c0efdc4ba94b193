//! HTTP Handlers

use axum::extract::State;
use auth::{Identity, UserStorage};
use kernel::http::{Dispatch, JsonBody, PathId, dispatch};
use kernel::id::markers;
use std::sync::Arc;

use crate::application::{
    CreateAccountInput, CreateAccountUseCase, GetAccountUseCase, UpdateAccountInput,
    UpdateAccountUseCase,
};
use crate::domain::{AccountStorage, Device};
use crate::presentation::dto::{
    AccountResponse, CreateAccountRequest, CreateAccountResponse, UpdateAccountRequest,
};

/// Shared state for account handlers
pub struct AccountAppState<A, U>
where
    A: AccountStorage + Send + Sync + 'static,
    U: UserStorage + Send + Sync + 'static,
{
    pub accounts: Arc<A>,
    pub users: Arc<U>,
}

impl<A, U> Clone for AccountAppState<A, U>
where
    A: AccountStorage + Send + Sync + 'static,
    U: UserStorage + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            accounts: self.accounts.clone(),
            users: self.users.clone(),
        }
    }
}

/// POST /account
pub async fn create_account<A, U>(
    State(state): State<AccountAppState<A, U>>,
    identity: Identity,
    JsonBody(req): JsonBody<CreateAccountRequest>,
) -> Dispatch<CreateAccountResponse>
where
    A: AccountStorage + Send + Sync + 'static,
    U: UserStorage + Send + Sync + 'static,
{
    let use_case = CreateAccountUseCase::new(state.accounts.clone(), state.users.clone());

    let input = CreateAccountInput {
        device: Device {
            name: req.device_name,
            os: req.device_os,
            mac_address: req.device_mac_address,
            active: req.active,
        },
        language: req.account_language,
    };

    let result = use_case
        .execute(&identity, input)
        .await
        .map(|out| CreateAccountResponse {
            id: out.id.into_uuid(),
            user_id: out.user_id.into_uuid(),
        });

    dispatch("create account", result)
}

/// GET /account/{id}
pub async fn get_account<A, U>(
    State(state): State<AccountAppState<A, U>>,
    identity: Identity,
    PathId(id): PathId<markers::Account>,
) -> Dispatch<AccountResponse>
where
    A: AccountStorage + Send + Sync + 'static,
    U: UserStorage + Send + Sync + 'static,
{
    let result = GetAccountUseCase::new(state.accounts.clone())
        .execute(&identity, id)
        .await
        .map(AccountResponse::from);

    dispatch("get account", result)
}

/// PATCH /account/{id}
pub async fn update_account<A, U>(
    State(state): State<AccountAppState<A, U>>,
    identity: Identity,
    PathId(id): PathId<markers::Account>,
    JsonBody(req): JsonBody<UpdateAccountRequest>,
) -> Dispatch<AccountResponse>
where
    A: AccountStorage + Send + Sync + 'static,
    U: UserStorage + Send + Sync + 'static,
{
    let input = UpdateAccountInput {
        id,
        patch: req.into(),
    };

    let result = UpdateAccountUseCase::new(state.accounts.clone())
        .execute(&identity, input)
        .await
        .map(AccountResponse::from);

    dispatch("update account", result)
}
