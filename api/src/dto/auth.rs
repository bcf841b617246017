//! Authentication request and response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use sg_core::services::auth::RegisterOutcome;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    /// Policy (digit + uppercase) is enforced by the core; the DTO only
    /// gates the obvious length floor.
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VerifyOtpRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(equal = 6))]
    pub otp_code: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ResendOtpRequest {
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(equal = 6))]
    pub otp_code: String,

    #[validate(length(min = 8, max = 128))]
    pub new_password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    pub current_password: String,

    #[validate(length(min = 8, max = 128))]
    pub new_password: String,
}

/// Body returned by a successful registration
#[derive(Debug, Clone, Serialize)]
pub struct RegisterResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub email_verified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,

    /// The issued OTP, present only when outbound email is disabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_otp: Option<String>,
}

impl From<RegisterOutcome> for RegisterResponse {
    fn from(outcome: RegisterOutcome) -> Self {
        Self {
            id: outcome.account.id,
            name: outcome.account.name,
            email: outcome.account.email,
            email_verified_at: outcome.account.email_verified_at,
            created_at: outcome.account.created_at,
            test_otp: outcome.test_otp,
        }
    }
}

/// Body returned when login is denied because the email is unverified.
/// A fresh verification code has already been issued at this point.
#[derive(Debug, Clone, Serialize)]
pub struct UnverifiedLoginResponse {
    pub error: String,
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_otp: Option<String>,
}

impl UnverifiedLoginResponse {
    pub fn new(test_otp: Option<String>) -> Self {
        Self {
            error: String::from("EMAIL_NOT_VERIFIED"),
            message: String::from(
                "Email not verified. A verification code has been sent to your email.",
            ),
            test_otp,
        }
    }
}
