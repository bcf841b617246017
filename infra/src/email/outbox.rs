//! Channel-backed notification outbox.

use tokio::sync::mpsc;

use sg_core::errors::{DomainError, DomainResult};
use sg_core::services::notification::{Notification, NotificationOutbox};

/// Outbox half of the notification channel. Enqueueing is non-blocking;
/// the paired receiver is owned by the dispatcher task.
pub struct ChannelOutbox {
    sender: mpsc::UnboundedSender<Notification>,
}

impl ChannelOutbox {
    /// Create the outbox and the receiver the dispatcher will drain
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl NotificationOutbox for ChannelOutbox {
    fn enqueue(&self, notification: Notification) -> DomainResult<()> {
        self.sender
            .send(notification)
            .map_err(|_| DomainError::Internal {
                message: String::from("Notification dispatcher is gone"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sg_core::services::notification::NotificationKind;

    #[tokio::test]
    async fn enqueued_notifications_reach_the_receiver() {
        let (outbox, mut receiver) = ChannelOutbox::channel();

        outbox
            .enqueue(Notification::otp("a@x.com", "123456"))
            .unwrap();

        let received = receiver.recv().await.unwrap();
        assert_eq!(received.kind, NotificationKind::Otp);
        assert_eq!(received.recipient, "a@x.com");
    }

    #[tokio::test]
    async fn enqueue_fails_once_the_receiver_is_dropped() {
        let (outbox, receiver) = ChannelOutbox::channel();
        drop(receiver);

        let result = outbox.enqueue(Notification::password_changed("a@x.com"));
        assert!(result.is_err());
    }
}
