//! # Notifier Trait and Test Doubles
//!
//! The engine depends on this trait only. Substituting any implementation
//! below — including the failing one — must not change the outcome of any
//! transition; the workflow tests assert exactly that.

use std::sync::Mutex;

use async_trait::async_trait;
use thiserror::Error;

use crate::event::{AcceptedNotification, AdminRecipient};

/// Errors from notification delivery.
///
/// Always non-fatal to the transition that triggered delivery; the engine
/// logs these at `warn` and moves on.
#[derive(Error, Debug)]
pub enum NotifyError {
    /// The underlying transport refused or failed to deliver.
    #[error("delivery failed: {0}")]
    Delivery(String),
}

/// One-way message send toward an admin.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver an acceptance notification to the resolved recipient.
    async fn notify_accepted(
        &self,
        recipient: &AdminRecipient,
        event: &AcceptedNotification,
    ) -> Result<(), NotifyError>;
}

/// Discards every notification. Default for tests that don't care.
#[derive(Debug, Default)]
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn notify_accepted(
        &self,
        _recipient: &AdminRecipient,
        _event: &AcceptedNotification,
    ) -> Result<(), NotifyError> {
        Ok(())
    }
}

/// Records every notification for later assertion.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(AdminRecipient, AcceptedNotification)>>,
}

impl RecordingNotifier {
    /// Snapshot of everything delivered so far.
    pub fn sent(&self) -> Vec<(AdminRecipient, AcceptedNotification)> {
        self.sent.lock().expect("recording notifier lock").clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify_accepted(
        &self,
        recipient: &AdminRecipient,
        event: &AcceptedNotification,
    ) -> Result<(), NotifyError> {
        self.sent
            .lock()
            .expect("recording notifier lock")
            .push((recipient.clone(), event.clone()));
        Ok(())
    }
}

/// Fails every delivery. Used to prove notifier failure never leaks into
/// a transition result.
#[derive(Debug, Default)]
pub struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    async fn notify_accepted(
        &self,
        _recipient: &AdminRecipient,
        _event: &AcceptedNotification,
    ) -> Result<(), NotifyError> {
        Err(NotifyError::Delivery("simulated outage".to_string()))
    }
}
