//! Request and response DTOs.

pub mod auth;
pub mod profile;

pub use sg_shared::types::response::{ErrorResponse, MessageResponse};
