//! Successful authentication result.

use serde::{Deserialize, Serialize};

/// Returned by login and OTP verification: a freshly minted bearer token
/// plus the identity it was issued for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Signed access token
    pub access_token: String,

    /// Token scheme; always `bearer`
    pub token_type: String,

    /// Token lifetime in seconds
    pub expires_in: i64,

    /// Email address the token was issued for
    pub email: String,
}

impl AuthResponse {
    pub fn new(access_token: String, expires_in: i64, email: impl Into<String>) -> Self {
        Self {
            access_token,
            token_type: String::from("bearer"),
            expires_in,
            email: email.into(),
        }
    }
}
