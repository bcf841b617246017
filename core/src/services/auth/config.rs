//! Configuration for the account state machine

use sg_shared::config::PasswordConfig;

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Whether outbound email is enabled. When false, operations surface
    /// the freshly issued OTP in their outcome (`test_otp`) instead.
    pub email_enabled: bool,

    /// Password policy applied before any hash
    pub password: PasswordConfig,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            email_enabled: false,
            password: PasswordConfig::default(),
        }
    }
}
