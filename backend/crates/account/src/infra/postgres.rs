//! PostgreSQL Storage Implementation
//!
//! An account spans three tables: `accounts`, `account_devices` (ordered by
//! `position`) and `account_settings`. Writes touch all three in one
//! transaction.

use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use kernel::id::{AccountId, UserId};

use crate::domain::{Account, AccountFilter, AccountStorage, Device, Settings};
use crate::error::{AccountError, AccountResult};

/// Unique violation
/// https://www.postgresql.org/docs/current/errcodes-appendix.html
const UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL-backed account storage
#[derive(Clone)]
pub struct PgAccountStorage {
    pool: PgPool,
}

impl PgAccountStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert_devices(
        tx: &mut Transaction<'_, Postgres>,
        account_id: Uuid,
        devices: &[Device],
    ) -> AccountResult<()> {
        for (position, device) in devices.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO account_devices (
                    account_id,
                    position,
                    name,
                    os,
                    mac_address,
                    active
                ) VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(account_id)
            .bind(position as i32)
            .bind(&device.name)
            .bind(&device.os)
            .bind(&device.mac_address)
            .bind(device.active)
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }
}

impl AccountStorage for PgAccountStorage {
    async fn get_account(&self, filter: &AccountFilter) -> AccountResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT
                a.account_id,
                a.user_id,
                s.language
            FROM accounts a
            JOIN account_settings s ON s.account_id = a.account_id
            WHERE ($1::uuid IS NULL OR a.account_id = $1)
              AND ($2::uuid IS NULL OR a.user_id = $2)
            LIMIT 1
            "#,
        )
        .bind(filter.id.map(AccountId::into_uuid))
        .bind(filter.user_id.map(UserId::into_uuid))
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let devices = sqlx::query_as::<_, DeviceRow>(
            r#"
            SELECT name, os, mac_address, active
            FROM account_devices
            WHERE account_id = $1
            ORDER BY position
            "#,
        )
        .bind(row.account_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(row.into_account(devices)))
    }

    async fn create_account(&self, account: &Account) -> AccountResult<()> {
        let mut tx = self.pool.begin().await?;
        let account_id = account.id.into_uuid();

        sqlx::query("INSERT INTO accounts (account_id, user_id) VALUES ($1, $2)")
            .bind(account_id)
            .bind(account.user_id.into_uuid())
            .execute(&mut *tx)
            .await
            .map_err(map_unique_violation)?;

        sqlx::query("INSERT INTO account_settings (account_id, language) VALUES ($1, $2)")
            .bind(account_id)
            .bind(&account.settings.language)
            .execute(&mut *tx)
            .await?;

        Self::insert_devices(&mut tx, account_id, &account.devices).await?;

        tx.commit().await?;
        Ok(())
    }

    async fn update_account(&self, account: &Account) -> AccountResult<Option<Account>> {
        let mut tx = self.pool.begin().await?;
        let account_id = account.id.into_uuid();

        let updated = sqlx::query(
            "UPDATE account_settings SET language = $2 WHERE account_id = $1",
        )
        .bind(account_id)
        .bind(&account.settings.language)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            return Ok(None);
        }

        sqlx::query("DELETE FROM account_devices WHERE account_id = $1")
            .bind(account_id)
            .execute(&mut *tx)
            .await?;

        Self::insert_devices(&mut tx, account_id, &account.devices).await?;

        tx.commit().await?;

        self.get_account(&AccountFilter::by_id(account.id)).await
    }
}

fn map_unique_violation(err: sqlx::Error) -> AccountError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) => {
            AccountError::Duplicate
        }
        _ => AccountError::Database(err),
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct AccountRow {
    account_id: Uuid,
    user_id: Uuid,
    language: String,
}

impl AccountRow {
    fn into_account(self, devices: Vec<DeviceRow>) -> Account {
        Account {
            id: AccountId::from_uuid(self.account_id),
            user_id: UserId::from_uuid(self.user_id),
            devices: devices.into_iter().map(DeviceRow::into_device).collect(),
            settings: Settings {
                language: self.language,
            },
        }
    }
}

#[derive(sqlx::FromRow)]
struct DeviceRow {
    name: String,
    os: String,
    mac_address: String,
    active: bool,
}

impl DeviceRow {
    fn into_device(self) -> Device {
        Device {
            name: self.name,
            os: self.os,
            mac_address: self.mac_address,
            active: self.active,
        }
    }
}
