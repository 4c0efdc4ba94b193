//! Create Account Use Case

use std::sync::Arc;

use auth::{Identity, UserFilter, UserStorage};
use kernel::id::{AccountId, UserId};

use crate::domain::{Account, AccountFilter, AccountStorage, Device, Settings};
use crate::error::{AccountError, AccountResult};

/// Create account input
pub struct CreateAccountInput {
    pub device: Device,
    pub language: String,
}

/// Create account output
#[derive(Debug)]
pub struct CreateAccountOutput {
    pub id: AccountId,
    pub user_id: UserId,
}

/// Create account use case
pub struct CreateAccountUseCase<A, U>
where
    A: AccountStorage,
    U: UserStorage,
{
    accounts: Arc<A>,
    users: Arc<U>,
}

impl<A, U> CreateAccountUseCase<A, U>
where
    A: AccountStorage,
    U: UserStorage,
{
    pub fn new(accounts: Arc<A>, users: Arc<U>) -> Self {
        Self { accounts, users }
    }

    pub async fn execute(
        &self,
        identity: &Identity,
        input: CreateAccountInput,
    ) -> AccountResult<CreateAccountOutput> {
        // The token may outlive the user it was issued for
        self.users
            .get_user(&UserFilter::by_id(identity.user_id))
            .await?
            .ok_or(AccountError::UserNotFound)?;

        if self
            .accounts
            .get_account(&AccountFilter::by_user_id(identity.user_id))
            .await?
            .is_some()
        {
            tracing::info!(user_id = %identity.user_id, "Account already created");
            return Err(AccountError::AccountAlreadyCreated);
        }

        let account = Account::new(
            identity.user_id,
            input.device,
            Settings {
                language: input.language,
            },
        );

        self.accounts
            .create_account(&account)
            .await
            .map_err(|e| match e {
                AccountError::Duplicate => AccountError::AccountAlreadyCreated,
                other => other,
            })?;

        tracing::info!(
            account_id = %account.id,
            user_id = %account.user_id,
            "Account created"
        );

        Ok(CreateAccountOutput {
            id: account.id,
            user_id: account.user_id,
        })
    }
}
