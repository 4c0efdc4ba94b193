//! In-Memory Storage
//!
//! Process-local user storage. Used when no database is configured and as
//! the fake in tests. Email uniqueness is checked inside the write lock.

use tokio::sync::RwLock;

use crate::domain::entity::user::User;
use crate::domain::repository::{UserFilter, UserStorage};
use crate::error::{AuthError, AuthResult};

/// In-memory user storage
#[derive(Debug, Default)]
pub struct InMemoryUserStorage {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

impl UserStorage for InMemoryUserStorage {
    async fn get_user(&self, filter: &UserFilter) -> AuthResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| filter.matches(u)).cloned())
    }

    async fn create_user(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == user.email || u.id == user.id) {
            return Err(AuthError::Duplicate);
        }
        users.push(user.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{email::Email, user_role::UserRole};
    use platform::password::{Argon2Hasher, ClearTextPassword, CredentialHasher};

    fn user(email: &str) -> User {
        let hash = Argon2Hasher::light()
            .generate_hash(&ClearTextPassword::new("pw".to_string()))
            .unwrap();
        User::new("someone", Email::new(email).unwrap(), hash, UserRole::Student)
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let storage = InMemoryUserStorage::new();
        let u = user("a@x.com");
        storage.create_user(&u).await.unwrap();

        let by_id = storage.get_user(&UserFilter::by_id(u.id)).await.unwrap();
        assert_eq!(by_id.map(|f| f.id), Some(u.id));

        let by_email = storage
            .get_user(&UserFilter::by_email(Email::new("A@X.com").unwrap()))
            .await
            .unwrap();
        assert_eq!(by_email.map(|f| f.id), Some(u.id));
    }

    #[tokio::test]
    async fn test_missing_user_is_none() {
        let storage = InMemoryUserStorage::new();
        let found = storage
            .get_user(&UserFilter::by_email(Email::new("nobody@x.com").unwrap()))
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let storage = InMemoryUserStorage::new();
        storage.create_user(&user("a@x.com")).await.unwrap();
        let err = storage.create_user(&user("a@x.com")).await.unwrap_err();
        assert!(matches!(err, AuthError::Duplicate));
        assert_eq!(storage.len().await, 1);
    }
}
