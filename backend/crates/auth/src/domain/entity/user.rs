//! User Entity

use kernel::id::UserId;
use platform::password::HashedPassword;
use platform::token::TokenSubject;

use crate::domain::value_object::{email::Email, user_role::UserRole};

/// User entity
///
/// `email` is unique across all users.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: Email,
    pub password_hash: HashedPassword,
    pub role: UserRole,
}

impl User {
    /// Create a new user with a fresh id
    pub fn new(
        username: impl Into<String>,
        email: Email,
        password_hash: HashedPassword,
        role: UserRole,
    ) -> Self {
        Self {
            id: UserId::new(),
            username: username.into(),
            email,
            password_hash,
            role,
        }
    }

    /// Whether the user may publish courses
    pub fn is_teacher(&self) -> bool {
        self.role == UserRole::Teacher
    }

    /// Token subject for this user
    pub fn token_subject(&self) -> TokenSubject {
        TokenSubject {
            user_id: self.id.into_uuid(),
            user_name: self.username.clone(),
        }
    }
}
