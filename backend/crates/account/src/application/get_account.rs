//! Get Account Use Case

use std::sync::Arc;

use auth::Identity;
use kernel::id::AccountId;

use crate::application::load_owned;
use crate::domain::{Account, AccountStorage};
use crate::error::AccountResult;

/// Get account use case
pub struct GetAccountUseCase<A>
where
    A: AccountStorage,
{
    accounts: Arc<A>,
}

impl<A> GetAccountUseCase<A>
where
    A: AccountStorage,
{
    pub fn new(accounts: Arc<A>) -> Self {
        Self { accounts }
    }

    pub async fn execute(&self, identity: &Identity, id: AccountId) -> AccountResult<Account> {
        load_owned(self.accounts.as_ref(), id, identity).await
    }
}
