//! Notification outbox.
//!
//! Core operations never send email directly. After a state mutation
//! commits, the operation hands a `Notification` record to the outbox;
//! a separate dispatcher owns delivery. Enqueue failures are logged by the
//! caller and never fail the originating operation.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::errors::DomainResult;

/// What kind of email the dispatcher should render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Otp,
    PasswordReset,
    PasswordChanged,
}

/// A queued notification record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub recipient: String,
    /// The code to embed, for the kinds that carry one
    pub otp: Option<String>,
}

impl Notification {
    /// Verification code email
    pub fn otp(recipient: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Otp,
            recipient: recipient.into(),
            otp: Some(code.into()),
        }
    }

    /// Password reset code email
    pub fn password_reset(recipient: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::PasswordReset,
            recipient: recipient.into(),
            otp: Some(code.into()),
        }
    }

    /// Password changed confirmation email (no code)
    pub fn password_changed(recipient: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::PasswordChanged,
            recipient: recipient.into(),
            otp: None,
        }
    }
}

/// Hand-off point between core operations and the delivery mechanism.
///
/// `enqueue` must not block and must not depend on delivery succeeding.
pub trait NotificationOutbox: Send + Sync {
    fn enqueue(&self, notification: Notification) -> DomainResult<()>;
}

/// Outbox that records everything it receives; used by tests to assert on
/// which notifications an operation produced.
#[derive(Default)]
pub struct RecordingOutbox {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingOutbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything enqueued so far
    pub fn drain(&self) -> Vec<Notification> {
        self.sent.lock().expect("outbox lock poisoned").clone()
    }

    pub fn len(&self) -> usize {
        self.sent.lock().expect("outbox lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl NotificationOutbox for RecordingOutbox {
    fn enqueue(&self, notification: Notification) -> DomainResult<()> {
        self.sent.lock().expect("outbox lock poisoned").push(notification);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_kind_and_payload() {
        let n = Notification::otp("a@x.com", "123456");
        assert_eq!(n.kind, NotificationKind::Otp);
        assert_eq!(n.otp.as_deref(), Some("123456"));

        let n = Notification::password_changed("a@x.com");
        assert_eq!(n.kind, NotificationKind::PasswordChanged);
        assert!(n.otp.is_none());
    }

    #[test]
    fn recording_outbox_captures_order() {
        let outbox = RecordingOutbox::new();
        outbox.enqueue(Notification::otp("a@x.com", "111111")).unwrap();
        outbox
            .enqueue(Notification::password_reset("a@x.com", "222222"))
            .unwrap();

        let sent = outbox.drain();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].kind, NotificationKind::Otp);
        assert_eq!(sent[1].kind, NotificationKind::PasswordReset);
    }
}
