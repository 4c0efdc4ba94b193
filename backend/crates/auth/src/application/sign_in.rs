//! Sign In Use Case
//!
//! Checks an email/password pair and issues a fresh access token.

use std::sync::Arc;

use platform::password::{ClearTextPassword, CredentialHasher, PasswordError, compare_blocking};
use platform::token::Authenticator;

use crate::domain::repository::{UserFilter, UserStorage};
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Sign in output
#[derive(Debug)]
pub struct SignInOutput {
    pub access_token: String,
}

/// Sign in use case
pub struct SignInUseCase<U>
where
    U: UserStorage,
{
    users: Arc<U>,
    hasher: Arc<dyn CredentialHasher>,
    authenticator: Arc<Authenticator>,
}

impl<U> SignInUseCase<U>
where
    U: UserStorage,
{
    pub fn new(
        users: Arc<U>,
        hasher: Arc<dyn CredentialHasher>,
        authenticator: Arc<Authenticator>,
    ) -> Self {
        Self {
            users,
            hasher,
            authenticator,
        }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        // A malformed address cannot belong to any user
        let email = Email::new(&input.email).map_err(|_| AuthError::UserNotFound)?;

        let user = self
            .users
            .get_user(&UserFilter::by_email(email))
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let password = ClearTextPassword::new(input.password);
        match compare_blocking(self.hasher.clone(), user.password_hash.clone(), password).await {
            Ok(()) => {}
            Err(PasswordError::Mismatch) => {
                tracing::warn!(user_id = %user.id, "Wrong password on sign in");
                return Err(AuthError::WrongPassword);
            }
            Err(e) => return Err(e.into()),
        }

        let access_token = self.authenticator.generate_token(&user.token_subject())?;

        tracing::info!(user_id = %user.id, "User signed in");

        Ok(SignInOutput { access_token })
    }
}
