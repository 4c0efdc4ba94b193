//! Storage Port

use kernel::id::{AccountId, UserId};

use crate::domain::entity::Account;
use crate::error::AccountResult;

/// Lookup filter for [`AccountStorage::get_account`]
///
/// Every field that is set must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountFilter {
    pub id: Option<AccountId>,
    pub user_id: Option<UserId>,
}

impl AccountFilter {
    pub fn by_id(id: AccountId) -> Self {
        Self {
            id: Some(id),
            ..Default::default()
        }
    }

    pub fn by_user_id(user_id: UserId) -> Self {
        Self {
            user_id: Some(user_id),
            ..Default::default()
        }
    }

    /// Whether `account` satisfies every set field
    pub fn matches(&self, account: &Account) -> bool {
        self.id.is_none_or(|id| id == account.id)
            && self.user_id.is_none_or(|user_id| user_id == account.user_id)
    }
}

/// Account storage port
#[trait_variant::make(AccountStorage: Send)]
pub trait LocalAccountStorage {
    /// Find the first account matching the filter
    async fn get_account(&self, filter: &AccountFilter) -> AccountResult<Option<Account>>;

    /// Persist a new account with its devices and settings as one unit
    ///
    /// Fails with [`AccountError::Duplicate`](crate::error::AccountError::Duplicate)
    /// when the user already owns an account.
    async fn create_account(&self, account: &Account) -> AccountResult<()>;

    /// Replace the stored devices and settings of an existing account
    ///
    /// Returns the stored account, or `None` when it no longer exists.
    async fn update_account(&self, account: &Account) -> AccountResult<Option<Account>>;
}
