//! MySQL implementation of the AccountRepository trait.
//!
//! Each mutation writes a full snapshot in a single statement, so the
//! OTP counter fields change atomically per row. Email uniqueness is
//! enforced by the `uq_accounts_email` index; the duplicate-key error is
//! mapped to `AuthError::EmailTaken` to close the check-then-act race.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use sg_core::domain::entities::account::Account;
use sg_core::errors::{AuthError, DomainError};
use sg_core::repositories::AccountRepository;

/// MySQL implementation of AccountRepository
pub struct MySqlAccountRepository {
    pool: MySqlPool,
}

impl MySqlAccountRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_account(row: &sqlx::mysql::MySqlRow) -> Result<Account, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| database_error("id", e))?;

        Ok(Account {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Database {
                message: format!("Invalid UUID in accounts.id: {}", e),
            })?,
            name: row.try_get("name").map_err(|e| database_error("name", e))?,
            email: row
                .try_get("email")
                .map_err(|e| database_error("email", e))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| database_error("password_hash", e))?,
            email_verified_at: row
                .try_get::<Option<DateTime<Utc>>, _>("email_verified_at")
                .map_err(|e| database_error("email_verified_at", e))?,
            otp_code: row
                .try_get("otp_code")
                .map_err(|e| database_error("otp_code", e))?,
            otp_expires_at: row
                .try_get::<Option<DateTime<Utc>>, _>("otp_expires_at")
                .map_err(|e| database_error("otp_expires_at", e))?,
            failed_otp_attempts: row
                .try_get("failed_otp_attempts")
                .map_err(|e| database_error("failed_otp_attempts", e))?,
            last_login_at: row
                .try_get::<Option<DateTime<Utc>>, _>("last_login_at")
                .map_err(|e| database_error("last_login_at", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| database_error("created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| database_error("updated_at", e))?,
        })
    }
}

fn database_error(column: &str, e: sqlx::Error) -> DomainError {
    DomainError::Database {
        message: format!("Failed to read column {}: {}", column, e),
    }
}

/// Map a write error, turning unique-index violations into `EmailTaken`
fn map_write_error(e: sqlx::Error) -> DomainError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return AuthError::EmailTaken.into();
        }
    }
    DomainError::Database {
        message: format!("Database write failed: {}", e),
    }
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, name, email, password_hash, email_verified_at,
           otp_code, otp_expires_at, failed_otp_attempts,
           last_login_at, created_at, updated_at
    FROM accounts
"#;

#[async_trait]
impl AccountRepository for MySqlAccountRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        let query = format!("{} WHERE id = ? LIMIT 1", SELECT_COLUMNS);

        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Database query failed: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_account(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let query = format!("{} WHERE email = ? LIMIT 1", SELECT_COLUMNS);

        let result = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Database query failed: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_account(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        let query = r#"
            INSERT INTO accounts (
                id, name, email, password_hash, email_verified_at,
                otp_code, otp_expires_at, failed_otp_attempts,
                last_login_at, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(account.id.to_string())
            .bind(&account.name)
            .bind(&account.email)
            .bind(&account.password_hash)
            .bind(account.email_verified_at)
            .bind(&account.otp_code)
            .bind(account.otp_expires_at)
            .bind(account.failed_otp_attempts)
            .bind(account.last_login_at)
            .bind(account.created_at)
            .bind(account.updated_at)
            .execute(&self.pool)
            .await
            .map_err(map_write_error)?;

        Ok(account)
    }

    async fn update(&self, account: Account) -> Result<Account, DomainError> {
        let query = r#"
            UPDATE accounts SET
                name = ?,
                email = ?,
                password_hash = ?,
                email_verified_at = ?,
                otp_code = ?,
                otp_expires_at = ?,
                failed_otp_attempts = ?,
                last_login_at = ?,
                updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&account.name)
            .bind(&account.email)
            .bind(&account.password_hash)
            .bind(account.email_verified_at)
            .bind(&account.otp_code)
            .bind(account.otp_expires_at)
            .bind(account.failed_otp_attempts)
            .bind(account.last_login_at)
            .bind(account.updated_at)
            .bind(account.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(map_write_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: String::from("Account"),
            });
        }

        Ok(account)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to delete account: {}", e),
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn email_taken(&self, email: &str, exclude: Option<Uuid>) -> Result<bool, DomainError> {
        let row = match exclude {
            Some(id) => {
                sqlx::query("SELECT COUNT(*) AS n FROM accounts WHERE email = ? AND id != ?")
                    .bind(email)
                    .bind(id.to_string())
                    .fetch_one(&self.pool)
                    .await
            }
            None => {
                sqlx::query("SELECT COUNT(*) AS n FROM accounts WHERE email = ?")
                    .bind(email)
                    .fetch_one(&self.pool)
                    .await
            }
        }
        .map_err(|e| DomainError::Database {
            message: format!("Database query failed: {}", e),
        })?;

        let count: i64 = row.try_get("n").map_err(|e| database_error("n", e))?;
        Ok(count > 0)
    }
}
