//! # Notification Events
//!
//! Data carried from the workflow engine to the notifier. Events are
//! plain values: the engine fills them from the record snapshot it already
//! holds, so the notifier never reads the store.

use serde::{Deserialize, Serialize};

use taskdesk_core::{RequestId, Username};

/// Emitted when a request transitions into `Accepted`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptedNotification {
    /// The request that was accepted.
    pub request_id: RequestId,
    /// Project name shown in the message subject.
    pub project: String,
    /// Who originally filed the request.
    pub requester: String,
    /// The assignee who accepted it.
    pub accepted_by: Username,
}

/// The admin the notification is addressed to.
///
/// Resolved by the user directory as the first admin with a non-empty
/// email address. The username rides along so approve tokens can attribute
/// `approvedBy` to the admin who clicked the link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminRecipient {
    /// The admin's username, if the directory knows it.
    pub username: Option<Username>,
    /// Destination email address, guaranteed non-empty by the directory.
    pub email: String,
}
