//! Result types returned by account state machine operations

use crate::domain::entities::account::Account;

/// Outcome of a successful registration
#[derive(Debug, Clone)]
pub struct RegisterOutcome {
    /// The created account, still unverified
    pub account: Account,

    /// The issued OTP, surfaced only when outbound email is disabled
    pub test_otp: Option<String>,
}

/// Outcome of an OTP resend request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResendOutcome {
    /// A fresh code was issued and queued for delivery
    Sent { test_otp: Option<String> },

    /// The account is already verified; nothing to resend
    AlreadyVerified,

    /// The email is not registered. Callers must answer with the same
    /// generic message as `Sent` to avoid account enumeration.
    Anonymous,
}

/// Requested profile sub-updates; unset fields are left untouched.
/// All requested changes validate first and commit together.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

/// Outcome of a profile update
#[derive(Debug, Clone)]
pub struct ProfileUpdateOutcome {
    /// The updated account snapshot
    pub account: Account,

    /// Whether the email address changed (verification was reset)
    pub email_changed: bool,

    /// OTP issued for the new address, surfaced when email is disabled
    pub test_otp: Option<String>,
}
