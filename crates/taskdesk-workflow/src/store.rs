//! # Persistence Collaborator Interfaces
//!
//! The engine consumes these traits and nothing else about storage. The
//! contract that carries the workflow's race handling is
//! `conditional_update`: a compare-and-set whose predicate is the
//! expected current status. "Zero rows matched" — `Ok(None)` — is the
//! authoritative stale signal; success is never assumed from the mere
//! absence of an error.
//!
//! Implementations live in `taskdesk-store`.

use async_trait::async_trait;
use thiserror::Error;

use taskdesk_core::RequestId;
use taskdesk_notify::AdminRecipient;

use crate::record::{NewRequest, RequestRecord};
use crate::status::RequestStatus;
use crate::transition::TransitionPatch;

/// Infrastructure failure in a store backend.
///
/// Distinct from a compare-and-set predicate mismatch, which is a normal
/// outcome reported as `Ok(None)`.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backend failed (connection, serialization, corruption).
    #[error("store backend error: {0}")]
    Backend(String),
}

/// The request collection.
#[async_trait]
pub trait RequestStore: Send + Sync {
    /// Fetch a snapshot by id. `Ok(None)` means no such record.
    async fn find_by_id(&self, id: &RequestId) -> Result<Option<RequestRecord>, StoreError>;

    /// Insert a new record, assigning id and creation time.
    async fn insert(&self, new: NewRequest) -> Result<RequestRecord, StoreError>;

    /// All records, newest first.
    async fn list(&self) -> Result<Vec<RequestRecord>, StoreError>;

    /// Compare-and-set: apply `patch` only if the record exists and its
    /// status equals `expected`. Returns the updated record, or
    /// `Ok(None)` when the predicate did not match — either the record is
    /// gone or a concurrent transition moved it first. Exactly one of two
    /// racing writers with the same `expected` can succeed.
    async fn conditional_update(
        &self,
        id: &RequestId,
        expected: RequestStatus,
        patch: &TransitionPatch,
    ) -> Result<Option<RequestRecord>, StoreError>;
}

/// The user collection, reduced to what the workflow needs from it.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// The first admin with a non-empty email address, if any.
    ///
    /// An arbitrary single pick among possibly many admins — carried over
    /// from the original recipient policy.
    async fn first_admin_recipient(&self) -> Result<Option<AdminRecipient>, StoreError>;
}
