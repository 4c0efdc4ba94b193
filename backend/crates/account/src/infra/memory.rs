//! In-Memory Storage
//!
//! The one-account-per-user rule is checked inside the write lock.

use tokio::sync::RwLock;

use crate::domain::{Account, AccountFilter, AccountStorage};
use crate::error::{AccountError, AccountResult};

/// In-memory account storage
#[derive(Debug, Default)]
pub struct InMemoryAccountStorage {
    accounts: RwLock<Vec<Account>>,
}

impl InMemoryAccountStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts
    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }
}

impl AccountStorage for InMemoryAccountStorage {
    async fn get_account(&self, filter: &AccountFilter) -> AccountResult<Option<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.iter().find(|a| filter.matches(a)).cloned())
    }

    async fn create_account(&self, account: &Account) -> AccountResult<()> {
        let mut accounts = self.accounts.write().await;
        if accounts
            .iter()
            .any(|a| a.user_id == account.user_id || a.id == account.id)
        {
            return Err(AccountError::Duplicate);
        }
        accounts.push(account.clone());
        Ok(())
    }

    async fn update_account(&self, account: &Account) -> AccountResult<Option<Account>> {
        let mut accounts = self.accounts.write().await;
        let Some(stored) = accounts.iter_mut().find(|a| a.id == account.id) else {
            return Ok(None);
        };
        stored.devices = account.devices.clone();
        stored.settings = account.settings.clone();
        Ok(Some(stored.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Device, Settings};
    use kernel::id::UserId;

    fn account(user_id: UserId) -> Account {
        Account::new(
            user_id,
            Device {
                name: "laptop".to_string(),
                os: "linux".to_string(),
                mac_address: "00:11:22:33:44:55".to_string(),
                active: false,
            },
            Settings::default(),
        )
    }

    #[tokio::test]
    async fn test_one_account_per_user() {
        let storage = InMemoryAccountStorage::new();
        let owner = UserId::new();

        storage.create_account(&account(owner)).await.unwrap();
        let err = storage.create_account(&account(owner)).await.unwrap_err();
        assert!(matches!(err, AccountError::Duplicate));

        storage.create_account(&account(UserId::new())).await.unwrap();
        assert_eq!(storage.len().await, 2);
    }

    #[tokio::test]
    async fn test_update_keeps_owner() {
        let storage = InMemoryAccountStorage::new();
        let owner = UserId::new();
        let original = account(owner);
        storage.create_account(&original).await.unwrap();

        let mut changed = original.clone();
        changed.user_id = UserId::new();
        changed.settings.language = "fr".to_string();

        let updated = storage.update_account(&changed).await.unwrap().unwrap();
        assert_eq!(updated.user_id, owner);
        assert_eq!(updated.settings.language, "fr");
    }

    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let storage = InMemoryAccountStorage::new();
        let updated = storage
            .update_account(&account(UserId::new()))
            .await
            .unwrap();
        assert!(updated.is_none());
    }
}
