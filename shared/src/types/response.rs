//! API response envelope types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Uniform error body returned by every failing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Stable machine-readable error code, e.g. `EMAIL_TAKEN`
    pub error: String,

    /// Human-readable message
    pub message: String,

    /// When the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Simple acknowledgment body with an optional debug OTP.
///
/// `test_otp` is populated only when outbound email is disabled; it mirrors
/// the code that would have been mailed so integration environments can
/// complete verification flows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub detail: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_otp: Option<String>,
}

impl MessageResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
            test_otp: None,
        }
    }

    pub fn with_test_otp(mut self, otp: Option<String>) -> Self {
        self.test_otp = otp;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otp_is_omitted_when_absent() {
        let body = MessageResponse::new("ok");
        let json = serde_json::to_string(&body).unwrap();
        assert!(!json.contains("test_otp"));

        let body = MessageResponse::new("ok").with_test_otp(Some("123456".into()));
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains("\"test_otp\":\"123456\""));
    }
}
