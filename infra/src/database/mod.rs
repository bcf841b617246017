//! MySQL persistence layer.

pub mod connection;
pub mod mysql;

pub use connection::create_pool;
pub use mysql::{MySqlAccountRepository, MySqlProfileImageRepository};
