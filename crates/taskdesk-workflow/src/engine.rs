//! # Workflow Engine
//!
//! Orchestrates one transition end to end: load a snapshot, plan the
//! edge, submit the conditional write, dispatch the acceptance
//! notification. Stateless per invocation; every instance is a thin
//! bundle of `Arc`s over the collaborators.
//!
//! Two entry points feed the same machinery:
//!
//! - [`WorkflowEngine::apply_transition`] — the session path. Any failure
//!   is a typed [`WorkflowError`].
//! - [`WorkflowEngine::apply_token_action`] — the email-link path. A
//!   token is only honored while the record is still `Accepted`; a record
//!   that moved on (including losing the compare-and-set race) yields the
//!   benign [`TokenActionOutcome::NoAction`], because it usually means
//!   another actor already took the decision.

use std::sync::Arc;

use taskdesk_core::{Actor, RequestId, Timestamp, Username};
use taskdesk_notify::{AcceptedNotification, Notifier};
use taskdesk_token::{ActionPayload, TokenAction};

use crate::record::RequestRecord;
use crate::status::RequestStatus;
use crate::store::{RequestStore, UserDirectory};
use crate::transition::{plan_transition, TransitionPatch, WorkflowError};

/// `approvedBy` attribution when a token carries no issuer.
const ANONYMOUS_TOKEN_APPROVER: &str = "email-action";

/// Feedback written by a token deny.
const TOKEN_DENY_FEEDBACK: &str = "Rejected via email action";

/// Result of a token action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenActionOutcome {
    /// The Accepted → Approved edge landed.
    Approved(RequestRecord),
    /// The Accepted → Rejected edge landed.
    Denied(RequestRecord),
    /// The record was not (or no longer) `Accepted`; nothing was written.
    NoAction {
        /// The status the record held instead.
        status: RequestStatus,
    },
}

/// The request workflow engine.
pub struct WorkflowEngine {
    store: Arc<dyn RequestStore>,
    users: Arc<dyn UserDirectory>,
    notifier: Arc<dyn Notifier>,
}

impl WorkflowEngine {
    /// Assemble an engine over its three collaborators.
    pub fn new(
        store: Arc<dyn RequestStore>,
        users: Arc<dyn UserDirectory>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            store,
            users,
            notifier,
        }
    }

    /// Apply a session-authorized transition.
    ///
    /// One snapshot read, one conditional write. The write is keyed on
    /// the status the snapshot held; if a concurrent transition moved the
    /// record first, the result is `StaleTransition` and nothing was
    /// written by this call.
    ///
    /// # Errors
    ///
    /// `NotFound`, `TransitionDenied`, `StaleTransition`, or `Store`.
    pub async fn apply_transition(
        &self,
        id: RequestId,
        actor: &Actor,
        to: RequestStatus,
        feedback: Option<String>,
    ) -> Result<RequestRecord, WorkflowError> {
        let snapshot = self
            .store
            .find_by_id(&id)
            .await?
            .ok_or(WorkflowError::NotFound(id))?;

        let plan = plan_transition(&snapshot, actor, to, feedback)?;

        let updated = self
            .store
            .conditional_update(&id, plan.from, &plan.patch)
            .await?
            .ok_or(WorkflowError::StaleTransition { expected: plan.from })?;

        tracing::info!(
            request_id = %id,
            from = %plan.from,
            to = %updated.status,
            actor = %actor.username,
            "transition applied"
        );

        if plan.notifies_acceptance {
            self.dispatch_acceptance(&updated);
        }
        Ok(updated)
    }

    /// Apply a verified token action.
    ///
    /// The token is the capability — no session predicate runs here. The
    /// precondition (status still `Accepted`) is checked twice: once on
    /// the snapshot for an early benign exit, and again by the
    /// conditional write, which is the check that actually counts.
    ///
    /// # Errors
    ///
    /// `NotFound` or `Store`. A stale record is not an error.
    pub async fn apply_token_action(
        &self,
        payload: &ActionPayload,
    ) -> Result<TokenActionOutcome, WorkflowError> {
        let id = payload.request_id;
        let snapshot = self
            .store
            .find_by_id(&id)
            .await?
            .ok_or(WorkflowError::NotFound(id))?;

        if snapshot.status != RequestStatus::Accepted {
            return Ok(TokenActionOutcome::NoAction {
                status: snapshot.status,
            });
        }

        let patch = match payload.action {
            TokenAction::Approve => TransitionPatch {
                status: RequestStatus::Approved,
                accepted_by: None,
                approved_by: Some(token_approver(payload)),
                approved_date: Some(Timestamp::now()),
                manager_feedback: None,
            },
            TokenAction::Deny => TransitionPatch {
                status: RequestStatus::Rejected,
                accepted_by: None,
                approved_by: None,
                approved_date: None,
                manager_feedback: Some(TOKEN_DENY_FEEDBACK.to_string()),
            },
        };

        match self
            .store
            .conditional_update(&id, RequestStatus::Accepted, &patch)
            .await?
        {
            Some(updated) => {
                tracing::info!(
                    request_id = %id,
                    action = %payload.action,
                    "token action applied"
                );
                Ok(match payload.action {
                    TokenAction::Approve => TokenActionOutcome::Approved(updated),
                    TokenAction::Deny => TokenActionOutcome::Denied(updated),
                })
            }
            None => {
                // Lost the race after the snapshot read. Report whatever
                // the record holds now; a vanished record is NotFound.
                let current = self
                    .store
                    .find_by_id(&id)
                    .await?
                    .ok_or(WorkflowError::NotFound(id))?;
                tracing::debug!(
                    request_id = %id,
                    status = %current.status,
                    "token action superseded by a concurrent transition"
                );
                Ok(TokenActionOutcome::NoAction {
                    status: current.status,
                })
            }
        }
    }

    /// Fire-and-forget acceptance notification.
    ///
    /// Recipient lookup and delivery run on a detached task; any failure
    /// is logged and never reaches the caller of `apply_transition`.
    fn dispatch_acceptance(&self, record: &RequestRecord) {
        let Some(accepted_by) = record.accepted_by.clone() else {
            // Cannot happen for a record the accept edge just wrote.
            return;
        };
        let event = AcceptedNotification {
            request_id: record.id,
            project: record.project.clone(),
            requester: record.requester.clone(),
            accepted_by,
        };
        let users = Arc::clone(&self.users);
        let notifier = Arc::clone(&self.notifier);
        tokio::spawn(async move {
            match users.first_admin_recipient().await {
                Ok(Some(recipient)) => {
                    if let Err(e) = notifier.notify_accepted(&recipient, &event).await {
                        tracing::warn!(
                            request_id = %event.request_id,
                            error = %e,
                            "acceptance notification failed"
                        );
                    }
                }
                Ok(None) => {
                    tracing::warn!(
                        request_id = %event.request_id,
                        "no admin recipient for acceptance notification"
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        request_id = %event.request_id,
                        error = %e,
                        "admin recipient lookup failed"
                    );
                }
            }
        });
    }
}

fn token_approver(payload: &ActionPayload) -> Username {
    match payload.issued_by.clone() {
        Some(username) => username,
        // The literal is non-empty, so construction cannot fail.
        None => Username::new(ANONYMOUS_TOKEN_APPROVER)
            .unwrap_or_else(|_| unreachable!("static approver name is non-empty")),
    }
}
