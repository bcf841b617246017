//! Notification dispatcher task.

use tokio::sync::mpsc;

use sg_core::services::notification::Notification;
use sg_shared::utils::validation::mask_email;

use super::mailer::Mailer;

/// Drains the outbox channel and delivers each notification through the
/// mailer. Runs until every outbox handle is dropped. Delivery failures
/// are logged with the (masked) recipient and otherwise swallowed; the
/// state mutation that produced the notification has already committed.
pub struct NotificationDispatcher {
    receiver: mpsc::UnboundedReceiver<Notification>,
    mailer: Box<dyn Mailer>,
}

impl NotificationDispatcher {
    pub fn new(receiver: mpsc::UnboundedReceiver<Notification>, mailer: Box<dyn Mailer>) -> Self {
        Self { receiver, mailer }
    }

    /// Consume the dispatcher and process notifications until shutdown
    pub async fn run(mut self) {
        while let Some(notification) = self.receiver.recv().await {
            if let Err(error) = self.mailer.send(&notification).await {
                tracing::error!(
                    recipient = %mask_email(&notification.recipient),
                    kind = ?notification.kind,
                    error = %error,
                    event = "email_delivery_failed",
                    "Failed to deliver notification"
                );
            }
        }
        tracing::debug!(event = "dispatcher_stopped", "Notification channel closed");
    }

    /// Spawn the dispatcher onto the runtime
    pub fn spawn(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(self.run())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    use sg_core::errors::{DomainError, DomainResult};
    use sg_core::services::notification::NotificationKind;

    use crate::email::ChannelOutbox;
    use sg_core::services::notification::NotificationOutbox;

    struct RecordingMailer {
        delivered: Arc<Mutex<Vec<Notification>>>,
        fail: bool,
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, notification: &Notification) -> DomainResult<()> {
            if self.fail {
                return Err(DomainError::Internal {
                    message: String::from("smtp down"),
                });
            }
            self.delivered.lock().unwrap().push(notification.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn dispatcher_delivers_queued_notifications() {
        let (outbox, receiver) = ChannelOutbox::channel();
        let delivered = Arc::new(Mutex::new(Vec::new()));
        let dispatcher = NotificationDispatcher::new(
            receiver,
            Box::new(RecordingMailer {
                delivered: Arc::clone(&delivered),
                fail: false,
            }),
        );

        outbox
            .enqueue(Notification::otp("a@x.com", "123456"))
            .unwrap();
        outbox
            .enqueue(Notification::password_changed("a@x.com"))
            .unwrap();
        drop(outbox);

        dispatcher.run().await;

        let delivered = delivered.lock().unwrap();
        assert_eq!(delivered.len(), 2);
        assert_eq!(delivered[0].kind, NotificationKind::Otp);
        assert_eq!(delivered[1].kind, NotificationKind::PasswordChanged);
    }

    #[tokio::test]
    async fn delivery_failures_do_not_stop_the_dispatcher() {
        let (outbox, receiver) = ChannelOutbox::channel();
        let dispatcher = NotificationDispatcher::new(
            receiver,
            Box::new(RecordingMailer {
                delivered: Arc::new(Mutex::new(Vec::new())),
                fail: true,
            }),
        );

        outbox
            .enqueue(Notification::otp("a@x.com", "123456"))
            .unwrap();
        drop(outbox);

        // Runs to completion despite every send failing.
        dispatcher.run().await;
    }
}
