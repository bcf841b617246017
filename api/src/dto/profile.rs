//! Profile request and response DTOs.

use serde::{Deserialize, Serialize};
use validator::Validate;

use sg_core::services::profile::ProfileView;

/// Optional sub-updates; absent fields are left untouched
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    pub current_password: Option<String>,

    #[validate(length(min = 8, max = 128))]
    pub new_password: Option<String>,
}

/// Profile body, optionally annotated after an update
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub profile: ProfileView,

    /// Follow-up instruction, e.g. after an email change
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// OTP for the new email address when outbound email is disabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_otp: Option<String>,
}

impl ProfileResponse {
    pub fn new(profile: ProfileView) -> Self {
        Self {
            profile,
            message: None,
            test_otp: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_test_otp(mut self, test_otp: Option<String>) -> Self {
        self.test_otp = test_otp;
        self
    }
}
