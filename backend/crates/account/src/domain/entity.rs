//! Account Entity

use kernel::id::{AccountId, UserId};

/// A device registered to an account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    pub name: String,
    pub os: String,
    pub mac_address: String,
    pub active: bool,
}

/// Per-account preferences
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub language: String,
}

/// Account entity
///
/// `id` and `user_id` never change after creation. Devices keep their order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub user_id: UserId,
    pub devices: Vec<Device>,
    pub settings: Settings,
}

impl Account {
    /// Create a new account with one initial device
    pub fn new(user_id: UserId, device: Device, settings: Settings) -> Self {
        Self {
            id: AccountId::new(),
            user_id,
            devices: vec![device],
            settings,
        }
    }

    /// Whether `user_id` owns this account
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }

    /// Apply a partial update
    pub fn apply(&mut self, patch: AccountPatch) {
        if let Some(devices) = patch.devices {
            self.devices = devices;
        }
        if let Some(language) = patch.language {
            self.settings.language = language;
        }
    }
}

/// Partial update of an account; `None` leaves a field as it is
#[derive(Debug, Clone, Default)]
pub struct AccountPatch {
    pub devices: Option<Vec<Device>>,
    pub language: Option<String>,
}
