//! Application Layer
//!
//! Account use cases. Every call takes the verified caller [`Identity`](auth::Identity).

pub mod create_account;
pub mod get_account;
pub mod update_account;

// Re-exports
pub use create_account::{CreateAccountInput, CreateAccountOutput, CreateAccountUseCase};
pub use get_account::GetAccountUseCase;
pub use update_account::{UpdateAccountInput, UpdateAccountUseCase};

use auth::Identity;
use kernel::id::AccountId;

use crate::domain::{Account, AccountFilter, AccountStorage};
use crate::error::{AccountError, AccountResult};

/// Load an account and check that `identity` owns it
pub(crate) async fn load_owned<A>(
    accounts: &A,
    id: AccountId,
    identity: &Identity,
) -> AccountResult<Account>
where
    A: AccountStorage,
{
    let account = accounts
        .get_account(&AccountFilter::by_id(id))
        .await?
        .ok_or(AccountError::AccountNotFound)?;

    if !account.is_owned_by(identity.user_id) {
        tracing::warn!(
            account_id = %id,
            user_id = %identity.user_id,
            "Account access denied"
        );
        return Err(AccountError::AccessDenied);
    }

    Ok(account)
}
