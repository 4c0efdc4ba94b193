//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Sign-up type is neither student nor teacher
    #[error("Type must be either 1 or 2, which means student or teacher.")]
    WrongUserType,

    /// Email failed format validation
    #[error("invalid email")]
    InvalidEmail,

    /// A user with this email already exists
    #[error("user already created")]
    UserAlreadyCreated,

    /// No user matches the given filter
    #[error("user not found")]
    UserNotFound,

    /// Password did not match the stored hash
    #[error("wrong password")]
    WrongPassword,

    /// No bearer token on a protected route
    #[error("missing token")]
    MissingToken,

    /// Token malformed, tampered with, or expired
    #[error("invalid token")]
    InvalidToken,

    /// Uniqueness constraint rejected a write at the storage boundary
    #[error("duplicate user record")]
    Duplicate,

    /// Password hashing failed
    #[error("Password hashing error: {0}")]
    Password(#[from] platform::password::PasswordError),

    /// Token signing failed or the authenticator is misconfigured
    #[error("Token error: {0}")]
    Token(#[source] platform::token::TokenError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::WrongUserType | AuthError::InvalidEmail => ErrorKind::BadRequest,
            AuthError::UserAlreadyCreated => ErrorKind::Conflict,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::WrongPassword | AuthError::MissingToken | AuthError::InvalidToken => {
                ErrorKind::Unauthorized
            }
            AuthError::Duplicate
            | AuthError::Password(_)
            | AuthError::Token(_)
            | AuthError::Database(_)
            | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Stable code for errors the caller is expected to handle
    pub fn code(&self) -> Option<&'static str> {
        match self {
            AuthError::WrongUserType => Some("wrong_user_type"),
            AuthError::InvalidEmail => Some("invalid_email"),
            AuthError::UserAlreadyCreated => Some("user_already_created"),
            AuthError::UserNotFound => Some("user_not_found"),
            AuthError::WrongPassword => Some("wrong_password"),
            AuthError::MissingToken => Some("missing_token"),
            AuthError::InvalidToken => Some("invalid_token"),
            _ => None,
        }
    }

    /// Log the error with appropriate level
    pub(crate) fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Password(e) => {
                tracing::error!(error = %e, "Auth password hashing error");
            }
            AuthError::Token(e) => {
                tracing::error!(error = %e, "Auth token error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::WrongPassword => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::InvalidToken => {
                tracing::warn!("Invalid token presented");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl From<platform::token::TokenError> for AuthError {
    fn from(err: platform::token::TokenError) -> Self {
        match err {
            platform::token::TokenError::Invalid(_) => AuthError::InvalidToken,
            other => AuthError::Token(other),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        let kind = err.kind();
        match err.code() {
            Some(code) => AppError::expected(kind, err.to_string(), code),
            None => {
                let message = err.to_string();
                AppError::new(kind, message).with_source(err)
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}
