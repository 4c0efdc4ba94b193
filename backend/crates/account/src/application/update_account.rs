//! Update Account Use Case
//!
//! Partial update: fields left out of the input keep their stored value.
//! The account id and owner never change.

use std::sync::Arc;

use auth::Identity;
use kernel::id::AccountId;

use crate::application::load_owned;
use crate::domain::{Account, AccountPatch, AccountStorage};
use crate::error::{AccountError, AccountResult};

/// Update account input
pub struct UpdateAccountInput {
    pub id: AccountId,
    pub patch: AccountPatch,
}

/// Update account use case
pub struct UpdateAccountUseCase<A>
where
    A: AccountStorage,
{
    accounts: Arc<A>,
}

impl<A> UpdateAccountUseCase<A>
where
    A: AccountStorage,
{
    pub fn new(accounts: Arc<A>) -> Self {
        Self { accounts }
    }

    pub async fn execute(
        &self,
        identity: &Identity,
        input: UpdateAccountInput,
    ) -> AccountResult<Account> {
        let mut account = load_owned(self.accounts.as_ref(), input.id, identity).await?;
        account.apply(input.patch);

        // Deleted between the ownership check and the write
        let updated = self
            .accounts
            .update_account(&account)
            .await?
            .ok_or(AccountError::AccountNotFound)?;

        tracing::info!(account_id = %updated.id, "Account updated");

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AccountFilter, Device, Settings};
    use crate::infra::memory::InMemoryAccountStorage;
    use kernel::id::UserId;

    fn identity() -> Identity {
        Identity {
            user_id: UserId::new(),
            user_name: "ada".to_string(),
        }
    }

    fn device(name: &str) -> Device {
        Device {
            name: name.to_string(),
            os: "linux".to_string(),
            mac_address: "00:11:22:33:44:55".to_string(),
            active: true,
        }
    }

    async fn seeded(owner: &Identity) -> (Arc<InMemoryAccountStorage>, Account) {
        let accounts = Arc::new(InMemoryAccountStorage::new());
        let account = Account::new(
            owner.user_id,
            device("laptop"),
            Settings {
                language: "en".to_string(),
            },
        );
        accounts.create_account(&account).await.unwrap();
        (accounts, account)
    }

    #[tokio::test]
    async fn test_owner_updates_settings_only() {
        let owner = identity();
        let (accounts, account) = seeded(&owner).await;

        let updated = UpdateAccountUseCase::new(accounts.clone())
            .execute(
                &owner,
                UpdateAccountInput {
                    id: account.id,
                    patch: AccountPatch {
                        language: Some("de".to_string()),
                        ..Default::default()
                    },
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, account.id);
        assert_eq!(updated.user_id, owner.user_id);
        assert_eq!(updated.settings.language, "de");
        assert_eq!(updated.devices, account.devices);
    }

    #[tokio::test]
    async fn test_denied_update_leaves_account_unchanged() {
        let owner = identity();
        let (accounts, account) = seeded(&owner).await;

        let err = UpdateAccountUseCase::new(accounts.clone())
            .execute(
                &identity(),
                UpdateAccountInput {
                    id: account.id,
                    patch: AccountPatch {
                        devices: Some(vec![device("stolen")]),
                        language: Some("xx".to_string()),
                    },
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::AccessDenied));

        let stored = accounts
            .get_account(&AccountFilter::by_id(account.id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored, account);
    }
}
