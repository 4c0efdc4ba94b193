//! Account Error Types

use auth::AuthError;
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Account-specific result type alias
pub type AccountResult<T> = Result<T, AccountError>;

/// Account-specific error variants
#[derive(Debug, Error)]
pub enum AccountError {
    /// The caller's user record does not exist
    #[error("user not found")]
    UserNotFound,

    /// The user already owns an account
    #[error("account already created")]
    AccountAlreadyCreated,

    /// No account with the given id
    #[error("account not found")]
    AccountNotFound,

    /// The account belongs to someone else
    #[error("account access denied")]
    AccessDenied,

    /// Uniqueness constraint rejected a write at the storage boundary
    #[error("duplicate account record")]
    Duplicate,

    /// User storage failed
    #[error("User lookup failed: {0}")]
    UserLookup(#[source] AuthError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AccountError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AccountError::UserNotFound | AccountError::AccountNotFound => ErrorKind::NotFound,
            AccountError::AccountAlreadyCreated => ErrorKind::Conflict,
            AccountError::AccessDenied => ErrorKind::Forbidden,
            AccountError::Duplicate
            | AccountError::UserLookup(_)
            | AccountError::Database(_)
            | AccountError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Stable code for errors the caller is expected to handle
    pub fn code(&self) -> Option<&'static str> {
        match self {
            AccountError::UserNotFound => Some("user_not_found"),
            AccountError::AccountAlreadyCreated => Some("account_already_created"),
            AccountError::AccountNotFound => Some("account_not_found"),
            AccountError::AccessDenied => Some("account_access_denied"),
            _ => None,
        }
    }
}

impl From<AuthError> for AccountError {
    fn from(err: AuthError) -> Self {
        AccountError::UserLookup(err)
    }
}

impl From<AccountError> for AppError {
    fn from(err: AccountError) -> Self {
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
