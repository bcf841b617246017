//! Mail transports for notification delivery.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use sg_core::errors::{DomainError, DomainResult};
use sg_core::services::notification::{Notification, NotificationKind};
use sg_shared::config::EmailConfig;
use sg_shared::utils::validation::mask_email;

/// Delivery mechanism used by the dispatcher
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, notification: &Notification) -> DomainResult<()>;
}

/// SMTP mailer built on lettre's async transport
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
}

impl SmtpMailer {
    /// Build a mailer from configuration (STARTTLS relay)
    pub fn new(config: &EmailConfig) -> DomainResult<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to build SMTP transport: {}", e),
            })?
            .port(config.smtp_port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self {
            transport,
            from: format!("{} <{}>", config.from_name, config.from_address),
        })
    }

    fn render(notification: &Notification) -> (String, String) {
        let code = notification.otp.as_deref().unwrap_or_default();
        match notification.kind {
            NotificationKind::Otp => (
                String::from("Your verification code"),
                format!(
                    "Your verification code is: {}\n\n\
                     This code will expire in 10 minutes.\n\
                     If you did not request this code, please ignore this email.\n",
                    code
                ),
            ),
            NotificationKind::PasswordReset => (
                String::from("Password reset request"),
                format!(
                    "You have requested to reset your password. \
                     Your verification code is: {}\n\n\
                     This code will expire in 10 minutes.\n\
                     If you did not request a password reset, please ignore this \
                     email or contact support if you have concerns.\n",
                    code
                ),
            ),
            NotificationKind::PasswordChanged => (
                String::from("Password changed successfully"),
                String::from(
                    "Your password has been successfully changed.\n\
                     If you did not make this change, please contact support immediately.\n",
                ),
            ),
        }
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, notification: &Notification) -> DomainResult<()> {
        let (subject, body) = Self::render(notification);

        let message = Message::builder()
            .from(self.from.parse().map_err(|e| DomainError::Internal {
                message: format!("Invalid from address: {}", e),
            })?)
            .to(notification
                .recipient
                .parse()
                .map_err(|e| DomainError::Internal {
                    message: format!("Invalid recipient address: {}", e),
                })?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to build email message: {}", e),
            })?;

        self.transport
            .send(message)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to send email: {}", e),
            })?;

        Ok(())
    }
}

/// Mailer used when outbound email is disabled: logs instead of sending.
/// The OTP value reaches callers through the `test_otp` response field, so
/// only a masked marker is logged here.
#[derive(Default)]
pub struct LoggingMailer;

impl LoggingMailer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Mailer for LoggingMailer {
    async fn send(&self, notification: &Notification) -> DomainResult<()> {
        tracing::info!(
            recipient = %mask_email(&notification.recipient),
            kind = ?notification.kind,
            event = "email_skipped",
            "Email delivery disabled; notification dropped"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn otp_email_contains_the_code() {
        let (subject, body) = SmtpMailer::render(&Notification::otp("a@x.com", "123456"));
        assert_eq!(subject, "Your verification code");
        assert!(body.contains("123456"));
        assert!(body.contains("expire in 10 minutes"));
    }

    #[test]
    fn reset_email_is_distinct_from_verification() {
        let (subject, body) =
            SmtpMailer::render(&Notification::password_reset("a@x.com", "654321"));
        assert_eq!(subject, "Password reset request");
        assert!(body.contains("654321"));
        assert!(body.contains("reset your password"));
    }

    #[test]
    fn changed_email_carries_no_code() {
        let (subject, body) = SmtpMailer::render(&Notification::password_changed("a@x.com"));
        assert_eq!(subject, "Password changed successfully");
        assert!(!body.contains("code"));
    }
}
