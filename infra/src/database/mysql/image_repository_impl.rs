//! MySQL implementation of the ProfileImageRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use sg_core::domain::entities::profile_image::ProfileImage;
use sg_core::errors::DomainError;
use sg_core::repositories::ProfileImageRepository;

/// MySQL implementation of ProfileImageRepository
pub struct MySqlProfileImageRepository {
    pool: MySqlPool,
}

impl MySqlProfileImageRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_image(row: &sqlx::mysql::MySqlRow) -> Result<ProfileImage, DomainError> {
        let id: String = row.try_get("id").map_err(column_error)?;
        let account_id: String = row.try_get("account_id").map_err(column_error)?;

        Ok(ProfileImage {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Database {
                message: format!("Invalid UUID in profile_images.id: {}", e),
            })?,
            account_id: Uuid::parse_str(&account_id).map_err(|e| DomainError::Database {
                message: format!("Invalid UUID in profile_images.account_id: {}", e),
            })?,
            file_name: row.try_get("file_name").map_err(column_error)?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(column_error)?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(column_error)?,
        })
    }
}

fn column_error(e: sqlx::Error) -> DomainError {
    DomainError::Database {
        message: format!("Failed to read profile image row: {}", e),
    }
}

#[async_trait]
impl ProfileImageRepository for MySqlProfileImageRepository {
    async fn latest_for_account(
        &self,
        account_id: Uuid,
    ) -> Result<Option<ProfileImage>, DomainError> {
        let query = r#"
            SELECT id, account_id, file_name, created_at, updated_at
            FROM profile_images
            WHERE account_id = ?
            ORDER BY created_at DESC
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(account_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Database query failed: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_image(&row)?)),
            None => Ok(None),
        }
    }

    async fn insert(&self, image: ProfileImage) -> Result<ProfileImage, DomainError> {
        let query = r#"
            INSERT INTO profile_images (id, account_id, file_name, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(image.id.to_string())
            .bind(image.account_id.to_string())
            .bind(&image.file_name)
            .bind(image.created_at)
            .bind(image.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to insert profile image: {}", e),
            })?;

        Ok(image)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM profile_images WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to delete profile image: {}", e),
            })?;

        Ok(result.rows_affected() > 0)
    }
}
