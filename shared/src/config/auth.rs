//! Authentication, OTP, and password hashing configuration

use serde::{Deserialize, Serialize};

/// JWT signing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// JWT secret key for signing tokens
    pub secret: String,

    /// Access token time-to-live in minutes
    #[serde(default = "default_token_ttl")]
    pub ttl_minutes: i64,

    /// JWT issuer claim
    #[serde(default = "default_issuer")]
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from("development-secret-please-change-in-production"),
            ttl_minutes: default_token_ttl(),
            issuer: default_issuer(),
        }
    }
}

impl JwtConfig {
    /// Check if the default secret is still in use (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == "development-secret-please-change-in-production"
    }
}

fn default_token_ttl() -> i64 {
    30
}

fn default_issuer() -> String {
    String::from("signet")
}

/// One-time passcode configuration
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Number of digits in a generated code
    #[serde(default = "default_code_length")]
    pub code_length: usize,

    /// Validity window of an issued code in minutes
    #[serde(default = "default_otp_ttl")]
    pub ttl_minutes: i64,

    /// Wrong guesses allowed before the challenge is wiped
    #[serde(default = "default_max_attempts")]
    pub max_attempts: i32,

    /// A new code may be requested only once the active one has at most
    /// this many minutes of validity left
    #[serde(default = "default_resend_window")]
    pub resend_window_minutes: i64,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            code_length: default_code_length(),
            ttl_minutes: default_otp_ttl(),
            max_attempts: default_max_attempts(),
            resend_window_minutes: default_resend_window(),
        }
    }
}

fn default_code_length() -> usize {
    6
}

fn default_otp_ttl() -> i64 {
    10
}

fn default_max_attempts() -> i32 {
    5
}

fn default_resend_window() -> i64 {
    1
}

/// Password hashing and policy configuration
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct PasswordConfig {
    /// bcrypt cost factor
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,

    /// Minimum accepted password length
    #[serde(default = "default_min_length")]
    pub min_length: usize,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: default_bcrypt_cost(),
            min_length: default_min_length(),
        }
    }
}

fn default_bcrypt_cost() -> u32 {
    12
}

fn default_min_length() -> usize {
    8
}
