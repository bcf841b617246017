//! # Signet Infrastructure
//!
//! Concrete implementations of the core's persistence, notification, and
//! storage interfaces: MySQL repositories via sqlx, SMTP delivery via
//! lettre behind the notification outbox, and a local filesystem image
//! store.

pub mod database;
pub mod email;
pub mod storage;

pub use database::{create_pool, MySqlAccountRepository, MySqlProfileImageRepository};
pub use email::{ChannelOutbox, LoggingMailer, Mailer, NotificationDispatcher, SmtpMailer};
pub use storage::LocalImageStore;
