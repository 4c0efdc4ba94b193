//! Storage Port
//!
//! Interface for user persistence. Implementations live in the infrastructure
//! layer. Not-found is `Ok(None)`, never an error.

use kernel::id::UserId;

use crate::domain::entity::user::User;
use crate::domain::value_object::email::Email;
use crate::error::AuthResult;

/// Lookup filter for [`UserStorage::get_user`]
///
/// Every field that is set must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub id: Option<UserId>,
    pub email: Option<Email>,
}

impl UserFilter {
    pub fn by_id(id: UserId) -> Self {
        Self {
            id: Some(id),
            ..Default::default()
        }
    }

    pub fn by_email(email: Email) -> Self {
        Self {
            email: Some(email),
            ..Default::default()
        }
    }

    /// Whether `user` satisfies every set field
    pub fn matches(&self, user: &User) -> bool {
        self.id.is_none_or(|id| id == user.id)
            && self.email.as_ref().is_none_or(|email| *email == user.email)
    }
}

/// User storage port
#[trait_variant::make(UserStorage: Send)]
pub trait LocalUserStorage {
    /// Find the first user matching the filter
    async fn get_user(&self, filter: &UserFilter) -> AuthResult<Option<User>>;

    /// Persist a new user
    ///
    /// Fails with [`AuthError::Duplicate`](crate::error::AuthError::Duplicate)
    /// when the email is already taken.
    async fn create_user(&self, user: &User) -> AuthResult<()>;
}
