//! # Signet Shared
//!
//! Cross-cutting types shared by every layer of the Signet backend:
//! configuration structs, API response envelopes, and validation utilities.
//! This crate carries no domain logic and no I/O.

pub mod config;
pub mod types;
pub mod utils;
