//! Email delivery configuration

use serde::{Deserialize, Serialize};

/// SMTP email configuration.
///
/// When `enabled` is false no mail is sent; OTP codes are surfaced in API
/// responses through the `test_otp` debug channel instead. That flag is the
/// single gate for the non-production path.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// Master switch for outbound email
    #[serde(default)]
    pub enabled: bool,

    /// SMTP server host
    pub smtp_host: String,

    /// SMTP server port (usually 587 for STARTTLS)
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    /// SMTP username
    pub username: String,

    /// SMTP password
    pub password: String,

    /// Sender address
    pub from_address: String,

    /// Sender display name
    #[serde(default = "default_from_name")]
    pub from_name: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            smtp_host: String::from("localhost"),
            smtp_port: default_smtp_port(),
            username: String::new(),
            password: String::new(),
            from_address: String::from("no-reply@signet.local"),
            from_name: default_from_name(),
        }
    }
}

impl EmailConfig {
    /// True when the config carries enough detail to actually send
    pub fn is_configured(&self) -> bool {
        self.enabled && !self.smtp_host.is_empty() && !self.username.is_empty()
    }
}

fn default_smtp_port() -> u16 {
    587
}

fn default_from_name() -> String {
    String::from("Signet")
}
