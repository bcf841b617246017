//! Repository interfaces for persistence, plus in-memory implementations
//! used by tests.

pub mod account;
pub mod image;

pub use account::{AccountRepository, InMemoryAccountRepository};
pub use image::{InMemoryProfileImageRepository, ProfileImageRepository};
