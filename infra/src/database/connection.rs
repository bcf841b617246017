//! Database connection pool setup.

use std::time::Duration;

use sqlx::mysql::{MySqlPool, MySqlPoolOptions};

use sg_core::errors::DomainError;
use sg_shared::config::DatabaseConfig;

/// Create a MySQL connection pool from configuration
pub async fn create_pool(config: &DatabaseConfig) -> Result<MySqlPool, DomainError> {
    MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
        .connect(&config.url)
        .await
        .map_err(|e| DomainError::Database {
            message: format!("Failed to connect to database: {}", e),
        })
}
