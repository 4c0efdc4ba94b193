//! API DTOs (Data Transfer Objects)
//!
//! Sign-up and sign-in bodies keep the PascalCase keys existing clients
//! already read (`AccessToken`); everything else is camelCase.

use std::borrow::Cow;

use kernel::http::Validate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Sign Up
// ============================================================================

/// Sign up request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    #[serde(default)]
    pub username: String,
    pub email: String,
    pub password: String,
    /// 1 = student, 2 = teacher
    #[serde(rename = "type")]
    pub user_type: i16,
}

impl Validate for SignUpRequest {
    fn validate(&self) -> Result<(), Cow<'static, str>> {
        if self.password.is_empty() {
            return Err("password must not be empty".into());
        }
        Ok(())
    }
}

/// Sign up response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SignUpResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(rename = "Type")]
    pub user_type: i16,
    pub access_token: String,
}

// ============================================================================
// Sign In
// ============================================================================

/// Sign in request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

impl Validate for SignInRequest {}

/// Sign in response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SignInResponse {
    pub access_token: String,
}

// ============================================================================
// Verify Token
// ============================================================================

/// Verify token request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyTokenRequest {
    pub access_token: String,
}

impl Validate for VerifyTokenRequest {}

/// Verify token response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyTokenResponse {
    pub user_id: Uuid,
    pub username: String,
}
