//! # Transition Planning
//!
//! The pure core of the workflow engine. Given a record snapshot, an
//! actor, a desired status, and optional feedback, `plan_transition`
//! either produces the exact field mutations that edge implies or rejects
//! the attempt. No I/O happens here; the engine applies the plan through
//! the store's compare-and-set afterwards.
//!
//! ## Edge Table
//!
//! | From     | To        | Who                          | Mutation                              |
//! |----------|-----------|------------------------------|---------------------------------------|
//! | Pending  | Accepted  | assignee                     | `acceptedBy` = actor                  |
//! | Pending  | Rejected  | assignee or admin            | `managerFeedback` (default "Rejected")|
//! | Accepted | Approved  | admin                        | `approvedDate` = now, `approvedBy`    |
//! | Accepted | Rejected  | admin                        | `managerFeedback` (default "Rejected")|
//! | Approved | Completed | assignee                     | status only                           |
//!
//! Everything else — including `from == to` — is `TransitionDenied`. The
//! engine never silently no-ops: a repeated invocation of an
//! already-applied transition finds the record in the target state and is
//! rejected because no self-loop edge exists.

use thiserror::Error;

use taskdesk_core::{Actor, RequestId, Timestamp, Username};

use crate::record::RequestRecord;
use crate::status::RequestStatus;
use crate::store::StoreError;

/// Feedback recorded when a rejection carries none of its own.
const DEFAULT_REJECTION_FEEDBACK: &str = "Rejected";

/// Errors returned by the workflow engine.
#[derive(Error, Debug)]
pub enum WorkflowError {
    /// The referenced request id does not exist.
    #[error("request not found: {0}")]
    NotFound(RequestId),

    /// The (from, to) pair is not an edge, or the actor failed the
    /// edge's authorization predicate.
    #[error("transition not allowed: {from} -> {to}")]
    TransitionDenied {
        /// Status the record held when the attempt was made.
        from: RequestStatus,
        /// Requested target status.
        to: RequestStatus,
    },

    /// The requested target is not a recognized status string.
    #[error("invalid status: {0:?}")]
    InvalidStatus(String),

    /// The conditional write found the record had already left the
    /// expected state — a concurrent transition won.
    #[error("request left status {expected} before the write landed")]
    StaleTransition {
        /// The status the write was conditioned on.
        expected: RequestStatus,
    },

    /// Infrastructure failure in the persistence store.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The field mutations one transition applies.
///
/// Mirrors a document-store `$set`: only populated fields are written,
/// everything else on the record is untouched. Each transition-produced
/// field is set by exactly one edge, so patches never overwrite earlier
/// workflow history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionPatch {
    /// The target status.
    pub status: RequestStatus,
    /// Set by Pending → Accepted.
    pub accepted_by: Option<Username>,
    /// Set by Accepted → Approved.
    pub approved_by: Option<Username>,
    /// Set by Accepted → Approved.
    pub approved_date: Option<Timestamp>,
    /// Set by rejecting edges.
    pub manager_feedback: Option<String>,
}

impl TransitionPatch {
    fn status_only(status: RequestStatus) -> Self {
        Self {
            status,
            accepted_by: None,
            approved_by: None,
            approved_date: None,
            manager_feedback: None,
        }
    }

    /// Apply this patch to a record, set-only semantics.
    ///
    /// Shared by every store implementation so "what a patch means" is
    /// defined in one place.
    pub fn apply_to(&self, record: &mut RequestRecord) {
        record.status = self.status;
        if let Some(by) = &self.accepted_by {
            record.accepted_by = Some(by.clone());
        }
        if let Some(by) = &self.approved_by {
            record.approved_by = Some(by.clone());
        }
        if let Some(date) = self.approved_date {
            record.approved_date = Some(date);
        }
        if let Some(feedback) = &self.manager_feedback {
            record.manager_feedback = Some(feedback.clone());
        }
    }
}

/// A validated transition, ready to submit to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionPlan {
    /// The status the conditional write must find.
    pub from: RequestStatus,
    /// The mutations to apply.
    pub patch: TransitionPatch,
    /// Whether landing this plan triggers the acceptance notification.
    pub notifies_acceptance: bool,
}

/// Validate a proposed transition and compute its mutation.
///
/// Pure: same inputs, same plan. `approved_date` is stamped here with
/// `Timestamp::now()` — the one impurity, matching the original service
/// which stamped the date at decision time, not write time.
///
/// # Errors
///
/// `TransitionDenied` when the (from, to) pair is not in the edge table
/// or the actor fails the edge's predicate. The caller cannot distinguish
/// the two cases; revealing which predicate failed would leak who the
/// assignee is.
pub fn plan_transition(
    record: &RequestRecord,
    actor: &Actor,
    to: RequestStatus,
    feedback: Option<String>,
) -> Result<TransitionPlan, WorkflowError> {
    let from = record.status;
    let deny = || WorkflowError::TransitionDenied { from, to };
    let is_assignee = record
        .delegated_to
        .as_ref()
        .is_some_and(|assignee| *assignee == actor.username);

    let rejection_feedback =
        || feedback.clone().unwrap_or_else(|| DEFAULT_REJECTION_FEEDBACK.to_string());

    let (patch, notifies_acceptance) = match (from, to) {
        (RequestStatus::Pending, RequestStatus::Accepted) => {
            if !is_assignee {
                return Err(deny());
            }
            let mut patch = TransitionPatch::status_only(to);
            patch.accepted_by = Some(actor.username.clone());
            (patch, true)
        }
        (RequestStatus::Pending, RequestStatus::Rejected) => {
            if !is_assignee && !actor.is_admin() {
                return Err(deny());
            }
            let mut patch = TransitionPatch::status_only(to);
            patch.manager_feedback = Some(rejection_feedback());
            (patch, false)
        }
        (RequestStatus::Accepted, RequestStatus::Approved) => {
            if !actor.is_admin() {
                return Err(deny());
            }
            let mut patch = TransitionPatch::status_only(to);
            patch.approved_date = Some(Timestamp::now());
            patch.approved_by = Some(actor.username.clone());
            (patch, false)
        }
        (RequestStatus::Accepted, RequestStatus::Rejected) => {
            if !actor.is_admin() {
                return Err(deny());
            }
            let mut patch = TransitionPatch::status_only(to);
            patch.manager_feedback = Some(rejection_feedback());
            (patch, false)
        }
        (RequestStatus::Approved, RequestStatus::Completed) => {
            if !is_assignee {
                return Err(deny());
            }
            (TransitionPatch::status_only(to), false)
        }
        _ => return Err(deny()),
    };

    Ok(TransitionPlan {
        from,
        patch,
        notifies_acceptance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::NewRequest;
    use taskdesk_core::{RequestId, Role};

    fn record_with_status(status: RequestStatus) -> RequestRecord {
        let mut record = NewRequest {
            project: "Cable pull".to_string(),
            requester: "dave".to_string(),
            site: "East".to_string(),
            request_type: "Install".to_string(),
            request_date: "2026-08-01".to_string(),
            due_date: "2026-08-20".to_string(),
            status: RequestStatus::Pending,
            delegated_to: Some(Username::new("alice").unwrap()),
        }
        .into_record(RequestId::new(), Timestamp::now());
        record.status = status;
        record
    }

    fn alice() -> Actor {
        Actor::new(Username::new("alice").unwrap(), Role::User)
    }

    fn bob() -> Actor {
        Actor::new(Username::new("bob").unwrap(), Role::User)
    }

    fn carol_admin() -> Actor {
        Actor::new(Username::new("carol").unwrap(), Role::Admin)
    }

    // ── Valid edges ──────────────────────────────────────────────────

    #[test]
    fn test_assignee_accepts_pending() {
        let record = record_with_status(RequestStatus::Pending);
        let plan = plan_transition(&record, &alice(), RequestStatus::Accepted, None).unwrap();
        assert_eq!(plan.from, RequestStatus::Pending);
        assert_eq!(plan.patch.status, RequestStatus::Accepted);
        assert_eq!(plan.patch.accepted_by, Some(Username::new("alice").unwrap()));
        assert!(plan.notifies_acceptance);
        assert!(plan.patch.manager_feedback.is_none());
        assert!(plan.patch.approved_by.is_none());
    }

    #[test]
    fn test_assignee_rejects_pending() {
        let record = record_with_status(RequestStatus::Pending);
        let plan = plan_transition(
            &record,
            &alice(),
            RequestStatus::Rejected,
            Some("workload".to_string()),
        )
        .unwrap();
        assert_eq!(plan.patch.manager_feedback.as_deref(), Some("workload"));
        assert!(!plan.notifies_acceptance);
    }

    #[test]
    fn test_admin_rejects_pending() {
        let record = record_with_status(RequestStatus::Pending);
        let plan =
            plan_transition(&record, &carol_admin(), RequestStatus::Rejected, None).unwrap();
        assert_eq!(plan.patch.manager_feedback.as_deref(), Some("Rejected"));
    }

    #[test]
    fn test_admin_approves_accepted() {
        let record = record_with_status(RequestStatus::Accepted);
        let plan =
            plan_transition(&record, &carol_admin(), RequestStatus::Approved, None).unwrap();
        assert_eq!(plan.patch.approved_by, Some(Username::new("carol").unwrap()));
        assert!(plan.patch.approved_date.is_some());
        assert!(!plan.notifies_acceptance);
    }

    #[test]
    fn test_admin_rejects_accepted() {
        let record = record_with_status(RequestStatus::Accepted);
        let plan =
            plan_transition(&record, &carol_admin(), RequestStatus::Rejected, None).unwrap();
        assert_eq!(plan.patch.status, RequestStatus::Rejected);
        assert_eq!(plan.patch.manager_feedback.as_deref(), Some("Rejected"));
    }

    #[test]
    fn test_assignee_completes_approved() {
        let record = record_with_status(RequestStatus::Approved);
        let plan = plan_transition(&record, &alice(), RequestStatus::Completed, None).unwrap();
        assert_eq!(plan.patch, TransitionPatch::status_only(RequestStatus::Completed));
    }

    // ── Predicate failures ───────────────────────────────────────────

    #[test]
    fn test_non_assignee_cannot_accept() {
        let record = record_with_status(RequestStatus::Pending);
        assert!(matches!(
            plan_transition(&record, &bob(), RequestStatus::Accepted, None),
            Err(WorkflowError::TransitionDenied { .. })
        ));
    }

    #[test]
    fn test_admin_cannot_accept_for_assignee() {
        // Accepting is the assignee's call alone; admin role does not help.
        let record = record_with_status(RequestStatus::Pending);
        assert!(plan_transition(&record, &carol_admin(), RequestStatus::Accepted, None).is_err());
    }

    #[test]
    fn test_plain_user_cannot_reject_pending() {
        let record = record_with_status(RequestStatus::Pending);
        assert!(plan_transition(&record, &bob(), RequestStatus::Rejected, None).is_err());
    }

    #[test]
    fn test_assignee_cannot_approve() {
        let record = record_with_status(RequestStatus::Accepted);
        assert!(plan_transition(&record, &alice(), RequestStatus::Approved, None).is_err());
    }

    #[test]
    fn test_assignee_cannot_reject_accepted() {
        // Once accepted, only an admin may reject.
        let record = record_with_status(RequestStatus::Accepted);
        assert!(plan_transition(&record, &alice(), RequestStatus::Rejected, None).is_err());
    }

    #[test]
    fn test_admin_cannot_complete() {
        let record = record_with_status(RequestStatus::Approved);
        assert!(plan_transition(&record, &carol_admin(), RequestStatus::Completed, None).is_err());
    }

    #[test]
    fn test_no_assignee_means_no_acceptance() {
        let mut record = record_with_status(RequestStatus::Pending);
        record.delegated_to = None;
        assert!(plan_transition(&record, &alice(), RequestStatus::Accepted, None).is_err());
    }

    // ── Non-edges ────────────────────────────────────────────────────

    #[test]
    fn test_self_loop_is_denied() {
        for status in RequestStatus::ALL {
            let record = record_with_status(status);
            assert!(
                matches!(
                    plan_transition(&record, &carol_admin(), status, None),
                    Err(WorkflowError::TransitionDenied { .. })
                ),
                "self-loop {status} -> {status} must be denied"
            );
        }
    }

    #[test]
    fn test_reserved_statuses_have_no_edges() {
        for from in [RequestStatus::InWork, RequestStatus::Closed, RequestStatus::Overdue] {
            for to in RequestStatus::ALL {
                let record = record_with_status(from);
                assert!(
                    plan_transition(&record, &carol_admin(), to, None).is_err(),
                    "{from} -> {to} must be denied"
                );
            }
        }
    }

    #[test]
    fn test_terminal_states_have_no_outgoing_edges() {
        for from in [RequestStatus::Rejected, RequestStatus::Completed] {
            for to in RequestStatus::ALL {
                let record = record_with_status(from);
                assert!(plan_transition(&record, &carol_admin(), to, None).is_err());
                assert!(plan_transition(&record, &alice(), to, None).is_err());
            }
        }
    }

    #[test]
    fn test_no_skipping_ahead() {
        // Pending cannot jump straight to Approved or Completed.
        let record = record_with_status(RequestStatus::Pending);
        assert!(plan_transition(&record, &carol_admin(), RequestStatus::Approved, None).is_err());
        assert!(plan_transition(&record, &alice(), RequestStatus::Completed, None).is_err());
        // Accepted cannot go back to Pending or jump to Completed.
        let record = record_with_status(RequestStatus::Accepted);
        assert!(plan_transition(&record, &carol_admin(), RequestStatus::Pending, None).is_err());
        assert!(plan_transition(&record, &alice(), RequestStatus::Completed, None).is_err());
    }

    // ── Patch application ────────────────────────────────────────────

    #[test]
    fn test_patch_apply_sets_only_named_fields() {
        let mut record = record_with_status(RequestStatus::Pending);
        let plan = plan_transition(&record, &alice(), RequestStatus::Accepted, None).unwrap();
        let before_created = record.created_at;
        plan.patch.apply_to(&mut record);
        assert_eq!(record.status, RequestStatus::Accepted);
        assert_eq!(record.accepted_by, Some(Username::new("alice").unwrap()));
        assert!(record.approved_by.is_none());
        assert!(record.manager_feedback.is_none());
        assert_eq!(record.created_at, before_created);
        assert_eq!(record.delegated_to, Some(Username::new("alice").unwrap()));
    }

    #[test]
    fn test_later_patches_do_not_disturb_earlier_fields() {
        let mut record = record_with_status(RequestStatus::Pending);
        plan_transition(&record, &alice(), RequestStatus::Accepted, None)
            .unwrap()
            .patch
            .apply_to(&mut record);
        plan_transition(&record, &carol_admin(), RequestStatus::Approved, None)
            .unwrap()
            .patch
            .apply_to(&mut record);
        plan_transition(&record, &alice(), RequestStatus::Completed, None)
            .unwrap()
            .patch
            .apply_to(&mut record);

        // acceptedBy survived two later transitions; approval fields
        // survived completion.
        assert_eq!(record.status, RequestStatus::Completed);
        assert_eq!(record.accepted_by, Some(Username::new("alice").unwrap()));
        assert_eq!(record.approved_by, Some(Username::new("carol").unwrap()));
        assert!(record.approved_date.is_some());
    }
}
