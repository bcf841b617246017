//! Configuration structs for the Signet backend.
//!
//! Every component receives its configuration explicitly at construction
//! time; there is no global settings singleton. `AppConfig::from_env`
//! assembles the full set from environment variables.

pub mod app;
pub mod auth;
pub mod database;
pub mod email;
pub mod server;
pub mod storage;

pub use app::AppConfig;
pub use auth::{JwtConfig, OtpConfig, PasswordConfig};
pub use database::DatabaseConfig;
pub use email::EmailConfig;
pub use server::ServerConfig;
pub use storage::StorageConfig;
