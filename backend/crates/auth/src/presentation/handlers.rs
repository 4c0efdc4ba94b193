//! HTTP Handlers

use axum::extract::State;
use kernel::http::{Dispatch, JsonBody, dispatch};
use platform::password::CredentialHasher;
use platform::token::Authenticator;
use std::sync::Arc;

use crate::application::{
    SignInInput, SignInUseCase, SignUpInput, SignUpUseCase, VerifyTokenInput, VerifyTokenUseCase,
};
use crate::domain::repository::UserStorage;
use crate::presentation::dto::{
    SignInRequest, SignInResponse, SignUpRequest, SignUpResponse, VerifyTokenRequest,
    VerifyTokenResponse,
};

/// Shared state for auth handlers
pub struct AuthAppState<U>
where
    U: UserStorage + Send + Sync + 'static,
{
    pub users: Arc<U>,
    pub hasher: Arc<dyn CredentialHasher>,
    pub authenticator: Arc<Authenticator>,
}

impl<U> Clone for AuthAppState<U>
where
    U: UserStorage + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            users: self.users.clone(),
            hasher: self.hasher.clone(),
            authenticator: self.authenticator.clone(),
        }
    }
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /auth/signup
pub async fn sign_up<U>(
    State(state): State<AuthAppState<U>>,
    JsonBody(req): JsonBody<SignUpRequest>,
) -> Dispatch<SignUpResponse>
where
    U: UserStorage + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(
        state.users.clone(),
        state.hasher.clone(),
        state.authenticator.clone(),
    );

    let input = SignUpInput {
        username: req.username,
        email: req.email,
        password: req.password,
        user_type: req.user_type,
    };

    let result = use_case.execute(input).await.map(|out| SignUpResponse {
        id: out.id.into_uuid(),
        username: out.username,
        email: out.email.into_db(),
        user_type: out.role.id(),
        access_token: out.access_token,
    });

    dispatch("sign up", result)
}

// ============================================================================
// Sign In
// ============================================================================

/// POST /auth/signin
pub async fn sign_in<U>(
    State(state): State<AuthAppState<U>>,
    JsonBody(req): JsonBody<SignInRequest>,
) -> Dispatch<SignInResponse>
where
    U: UserStorage + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(
        state.users.clone(),
        state.hasher.clone(),
        state.authenticator.clone(),
    );

    let input = SignInInput {
        email: req.email,
        password: req.password,
    };

    let result = use_case.execute(input).await.map(|out| SignInResponse {
        access_token: out.access_token,
    });

    dispatch("sign in", result)
}

// ============================================================================
// Verify Token
// ============================================================================

/// POST /auth/verify
pub async fn verify_token<U>(
    State(state): State<AuthAppState<U>>,
    JsonBody(req): JsonBody<VerifyTokenRequest>,
) -> Dispatch<VerifyTokenResponse>
where
    U: UserStorage + Send + Sync + 'static,
{
    let use_case = VerifyTokenUseCase::new(state.authenticator.clone());

    let result = use_case
        .execute(VerifyTokenInput {
            access_token: req.access_token,
        })
        .map(|out| VerifyTokenResponse {
            user_id: out.user_id.into_uuid(),
            username: out.username,
        });

    dispatch("verify token", result)
}
