//! Route handlers grouped by API area.

pub mod auth;
pub mod users;
