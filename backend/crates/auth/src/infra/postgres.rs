//! PostgreSQL Storage Implementation

use sqlx::PgPool;
use uuid::Uuid;

use kernel::id::UserId;
use platform::password::HashedPassword;

use crate::domain::entity::user::User;
use crate::domain::repository::{UserFilter, UserStorage};
use crate::domain::value_object::{email::Email, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

/// Unique violation
/// https://www.postgresql.org/docs/current/errcodes-appendix.html
const UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL-backed user storage
#[derive(Clone)]
pub struct PgUserStorage {
    pool: PgPool,
}

impl PgUserStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserStorage for PgUserStorage {
    async fn get_user(&self, filter: &UserFilter) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                username,
                email,
                password_hash,
                user_type
            FROM users
            WHERE ($1::uuid IS NULL OR user_id = $1)
              AND ($2::text IS NULL OR email = $2)
            LIMIT 1
            "#,
        )
        .bind(filter.id.map(UserId::into_uuid))
        .bind(filter.email.as_ref().map(Email::as_str))
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn create_user(&self, user: &User) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                username,
                email,
                password_hash,
                user_type
            ) VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user.id.into_uuid())
        .bind(&user.username)
        .bind(user.email.as_str())
        .bind(user.password_hash.as_phc_string())
        .bind(user.role.id())
        .execute(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        Ok(())
    }
}

fn map_unique_violation(err: sqlx::Error) -> AuthError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) => {
            AuthError::Duplicate
        }
        _ => AuthError::Database(err),
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    username: String,
    email: String,
    password_hash: String,
    user_type: i16,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let password_hash = HashedPassword::from_phc_string(self.password_hash)
            .map_err(|e| AuthError::Internal(format!("Invalid password_hash: {}", e)))?;

        let role = UserRole::try_from_id(self.user_type)
            .ok_or_else(|| AuthError::Internal(format!("Invalid user_type: {}", self.user_type)))?;

        Ok(User {
            id: UserId::from_uuid(self.user_id),
            username: self.username,
            email: Email::from_db(self.email),
            password_hash,
            role,
        })
    }
}
