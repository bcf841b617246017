//! One-time passcode engine.
//!
//! Issues, validates, and invalidates the verification challenges carried
//! on account records. A challenge is always scoped to one account; there
//! is deliberately no lookup of an account by code alone, since unscoped
//! 6-digit codes can collide across accounts.

mod service;

#[cfg(test)]
mod tests;

pub use service::OtpService;
