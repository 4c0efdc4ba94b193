//! API DTOs (Data Transfer Objects)

use std::borrow::Cow;

use kernel::http::Validate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Account, AccountPatch, Device, Settings};

// ============================================================================
// Shared
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDto {
    pub name: String,
    pub os: String,
    pub mac_address: String,
    pub active: bool,
}

impl From<DeviceDto> for Device {
    fn from(dto: DeviceDto) -> Self {
        Self {
            name: dto.name,
            os: dto.os,
            mac_address: dto.mac_address,
            active: dto.active,
        }
    }
}

impl From<Device> for DeviceDto {
    fn from(device: Device) -> Self {
        Self {
            name: device.name,
            os: device.os,
            mac_address: device.mac_address,
            active: device.active,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsDto {
    pub language: String,
}

impl From<Settings> for SettingsDto {
    fn from(settings: Settings) -> Self {
        Self {
            language: settings.language,
        }
    }
}

// ============================================================================
// Create Account
// ============================================================================

/// Create account request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    pub device_name: String,
    pub device_os: String,
    pub device_mac_address: String,
    #[serde(default)]
    pub active: bool,
    pub account_language: String,
}

impl Validate for CreateAccountRequest {
    fn validate(&self) -> Result<(), Cow<'static, str>> {
        if self.device_name.trim().is_empty() {
            return Err("deviceName must not be empty".into());
        }
        Ok(())
    }
}

/// Create account response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountResponse {
    pub id: Uuid,
    pub user_id: Uuid,
}

// ============================================================================
// Get / Update Account
// ============================================================================

/// Full account view
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub devices: Vec<DeviceDto>,
    pub settings: SettingsDto,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id.into_uuid(),
            user_id: account.user_id.into_uuid(),
            devices: account.devices.into_iter().map(Into::into).collect(),
            settings: account.settings.into(),
        }
    }
}

/// Update account request; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountRequest {
    #[serde(default)]
    pub devices: Option<Vec<DeviceDto>>,
    #[serde(default)]
    pub settings: Option<SettingsDto>,
}

impl Validate for UpdateAccountRequest {}

impl From<UpdateAccountRequest> for AccountPatch {
    fn from(req: UpdateAccountRequest) -> Self {
        Self {
            devices: req
                .devices
                .map(|devices| devices.into_iter().map(Into::into).collect()),
            language: req.settings.map(|s| s.language),
        }
    }
}
