//! # Request Status Vocabulary
//!
//! The closed set of statuses a request record may hold. Wire strings
//! match the original document collection exactly — including the space
//! in `"In Work"` — so existing stored records and UI filters keep
//! working. Any string outside the set is an `InvalidStatus` error, never
//! silently coerced.

use serde::{Deserialize, Serialize};

use crate::transition::WorkflowError;

/// Lifecycle status of a request.
///
/// Only `Pending`, `Accepted`, and `Approved` are sources of
/// engine-governed transitions; `Rejected` and `Completed` are the
/// engine's terminal states. `InWork`, `Closed`, and `Overdue` are
/// externally set and have no engine edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestStatus {
    /// Newly created, awaiting the assignee's acceptance.
    Pending,
    /// Reserved: set by processes outside this engine.
    #[serde(rename = "In Work")]
    InWork,
    /// Accepted by the delegated assignee; awaiting admin decision.
    Accepted,
    /// Declined, by the assignee (from Pending) or an admin. Terminal.
    Rejected,
    /// Admin-approved; awaiting completion by the assignee.
    Approved,
    /// Work finished by the assignee. Terminal.
    Completed,
    /// Reserved: set by processes outside this engine.
    Closed,
    /// Reserved: set by a scheduled overdue-marking job.
    Overdue,
}

impl RequestStatus {
    /// All statuses, in the order the original service listed them.
    pub const ALL: [RequestStatus; 8] = [
        Self::Pending,
        Self::InWork,
        Self::Accepted,
        Self::Rejected,
        Self::Approved,
        Self::Completed,
        Self::Closed,
        Self::Overdue,
    ];

    /// The canonical wire string for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InWork => "In Work",
            Self::Accepted => "Accepted",
            Self::Rejected => "Rejected",
            Self::Approved => "Approved",
            Self::Completed => "Completed",
            Self::Closed => "Closed",
            Self::Overdue => "Overdue",
        }
    }

    /// Parse a caller-supplied status string.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::InvalidStatus` for anything outside the
    /// closed set. Matching is exact: no trimming, no case folding.
    pub fn parse(s: &str) -> Result<Self, WorkflowError> {
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| WorkflowError::InvalidStatus(s.to_string()))
    }

    /// Whether this status is terminal for the workflow engine.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected | Self::Completed)
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
