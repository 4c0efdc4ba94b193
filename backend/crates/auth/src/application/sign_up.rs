//! Sign Up Use Case
//!
//! Registers a new user and issues their first access token.

use std::sync::Arc;

use kernel::id::UserId;
use platform::password::{ClearTextPassword, CredentialHasher, hash_blocking};
use platform::token::Authenticator;

use crate::domain::entity::user::User;
use crate::domain::repository::{UserFilter, UserStorage};
use crate::domain::value_object::{email::Email, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub username: String,
    pub email: String,
    pub password: String,
    /// 1 = student, 2 = teacher
    pub user_type: i16,
}

/// Sign up output
#[derive(Debug)]
pub struct SignUpOutput {
    pub id: UserId,
    pub username: String,
    pub email: Email,
    pub role: UserRole,
    pub access_token: String,
}

/// Sign up use case
pub struct SignUpUseCase<U>
where
    U: UserStorage,
{
    users: Arc<U>,
    hasher: Arc<dyn CredentialHasher>,
    authenticator: Arc<Authenticator>,
}

impl<U> SignUpUseCase<U>
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

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        let role = UserRole::try_from_id(input.user_type).ok_or(AuthError::WrongUserType)?;
        let email = Email::new(&input.email)?;

        if self
            .users
            .get_user(&UserFilter::by_email(email.clone()))
            .await?
            .is_some()
        {
            tracing::info!(email = %email, "User already created");
            return Err(AuthError::UserAlreadyCreated);
        }

        let password_hash =
            hash_blocking(self.hasher.clone(), ClearTextPassword::new(input.password)).await?;

        let user = User::new(input.username, email, password_hash, role);

        // A concurrent sign-up with the same email can pass the check above
        self.users.create_user(&user).await.map_err(|e| match e {
            AuthError::Duplicate => AuthError::UserAlreadyCreated,
            other => other,
        })?;

        let access_token = self.authenticator.generate_token(&user.token_subject())?;

        tracing::info!(
            user_id = %user.id,
            role = %user.role,
            "User signed up"
        );

        Ok(SignUpOutput {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
            access_token,
        })
    }
}
