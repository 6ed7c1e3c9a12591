//! # taskdesk-notify — Acceptance Notifications
//!
//! When a request transitions into `Accepted`, an out-of-band message goes
//! to an admin so they can approve or deny. This crate owns that side of
//! the workflow: the event type, the `Notifier` trait the engine talks to,
//! an email notifier that renders approve/deny capability links, and the
//! test doubles that let transition tests swap in a no-op or failing
//! notifier without changing any result.
//!
//! Delivery is best-effort by contract: the engine dispatches without
//! awaiting and a failure is logged, never surfaced to the caller and
//! never rolled back.

pub mod email;
pub mod event;
pub mod notifier;

pub use email::{EmailNotifier, LogMailer, Mailer, OutboundEmail};
pub use event::{AcceptedNotification, AdminRecipient};
pub use notifier::{FailingNotifier, NoopNotifier, Notifier, NotifyError, RecordingNotifier};
