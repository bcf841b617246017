//! Email delivery behind the notification outbox.
//!
//! Core operations enqueue `Notification` records into a channel-backed
//! outbox; the dispatcher drains the channel on its own task and delivers
//! through a `Mailer`. Delivery failures are logged and never retried into
//! a caller's request.

mod dispatcher;
mod mailer;
mod outbox;

pub use dispatcher::NotificationDispatcher;
pub use mailer::{LoggingMailer, Mailer, SmtpMailer};
pub use outbox::ChannelOutbox;
