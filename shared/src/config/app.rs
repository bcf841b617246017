//! Top-level application configuration assembled from the environment

use std::env;

use serde::{Deserialize, Serialize};

use super::auth::{JwtConfig, OtpConfig, PasswordConfig};
use super::database::DatabaseConfig;
use super::email::EmailConfig;
use super::server::ServerConfig;
use super::storage::StorageConfig;

/// Complete configuration for one running instance.
///
/// Constructed once at startup and handed piecewise to the services that
/// need each section; nothing reads the environment after this point.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub otp: OtpConfig,
    pub password: PasswordConfig,
    pub email: EmailConfig,
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Load configuration from environment variables, falling back to
    /// development defaults for anything unset.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(host) = env::var("SERVER_HOST") {
            config.server.host = host;
        }
        if let Some(port) = env_parse("SERVER_PORT") {
            config.server.port = port;
        }

        if let Ok(url) = env::var("DATABASE_URL") {
            config.database.url = url;
        }
        if let Some(max) = env_parse("DATABASE_MAX_CONNECTIONS") {
            config.database.max_connections = max;
        }

        if let Ok(secret) = env::var("JWT_SECRET") {
            config.jwt.secret = secret;
        }
        if let Some(minutes) = env_parse("ACCESS_TOKEN_EXPIRE_MINUTES") {
            config.jwt.ttl_minutes = minutes;
        }
        if let Ok(issuer) = env::var("JWT_ISSUER") {
            config.jwt.issuer = issuer;
        }

        if let Some(minutes) = env_parse("OTP_EXPIRE_MINUTES") {
            config.otp.ttl_minutes = minutes;
        }
        if let Some(attempts) = env_parse("OTP_MAX_ATTEMPTS") {
            config.otp.max_attempts = attempts;
        }
        if let Some(window) = env_parse("OTP_RESEND_WINDOW_MINUTES") {
            config.otp.resend_window_minutes = window;
        }

        if let Some(cost) = env_parse("BCRYPT_COST") {
            config.password.bcrypt_cost = cost;
        }

        if let Some(enabled) = env_parse("EMAIL_ENABLED") {
            config.email.enabled = enabled;
        }
        if let Ok(host) = env::var("MAIL_SERVER") {
            config.email.smtp_host = host;
        }
        if let Some(port) = env_parse("MAIL_PORT") {
            config.email.smtp_port = port;
        }
        if let Ok(username) = env::var("MAIL_USERNAME") {
            config.email.username = username;
        }
        if let Ok(password) = env::var("MAIL_PASSWORD") {
            config.email.password = password;
        }
        if let Ok(from) = env::var("MAIL_FROM") {
            config.email.from_address = from;
        }
        if let Ok(from_name) = env::var("MAIL_FROM_NAME") {
            config.email.from_name = from_name;
        }

        if let Ok(dir) = env::var("IMAGE_DIR") {
            config.storage.image_dir = dir;
        }
        if let Ok(base) = env::var("IMAGE_PUBLIC_BASE_URL") {
            config.storage.public_base_url = base;
        }

        config
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_development_safe() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.jwt.ttl_minutes, 30);
        assert_eq!(config.otp.ttl_minutes, 10);
        assert_eq!(config.otp.max_attempts, 5);
        assert!(!config.email.enabled);
        assert!(config.jwt.is_using_default_secret());
    }
}
