//! # In-Memory Request Store
//!
//! A `Mutex`-guarded map of records. The compare-and-set holds the map
//! lock across check-and-apply, so of two racing writers conditioned on
//! the same expected status exactly one observes a match — the same
//! guarantee a document store's conditional `findOneAndUpdate` provides.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use taskdesk_core::{RequestId, Timestamp};
use taskdesk_workflow::{
    NewRequest, RequestRecord, RequestStatus, RequestStore, StoreError, TransitionPatch,
};

/// In-memory request collection.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<RequestId, RequestRecord>>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<RequestId, RequestRecord>>, StoreError> {
        self.records
            .lock()
            .map_err(|_| StoreError::Backend("request store lock poisoned".to_string()))
    }
}

#[async_trait]
impl RequestStore for MemoryStore {
    async fn find_by_id(&self, id: &RequestId) -> Result<Option<RequestRecord>, StoreError> {
        Ok(self.lock()?.get(id).cloned())
    }

    async fn insert(&self, new: NewRequest) -> Result<RequestRecord, StoreError> {
        let record = new.into_record(RequestId::new(), Timestamp::now());
        self.lock()?.insert(record.id, record.clone());
        Ok(record)
    }

    async fn list(&self) -> Result<Vec<RequestRecord>, StoreError> {
        let mut records: Vec<RequestRecord> = self.lock()?.values().cloned().collect();
        // Newest first, matching the original index listing. Ties on the
        // second-precision timestamp get a stable id order.
        records.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.as_uuid().cmp(b.id.as_uuid()))
        });
        Ok(records)
    }

    async fn conditional_update(
        &self,
        id: &RequestId,
        expected: RequestStatus,
        patch: &TransitionPatch,
    ) -> Result<Option<RequestRecord>, StoreError> {
        let mut records = self.lock()?;
        match records.get_mut(id) {
            Some(record) if record.status == expected => {
                patch.apply_to(record);
                Ok(Some(record.clone()))
            }
            // Predicate mismatch and missing record look the same to the
            // caller: zero rows matched.
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskdesk_core::Username;

    fn new_request(delegated_to: &str) -> NewRequest {
        NewRequest {
            project: "Pole replacement".to_string(),
            requester: "dave".to_string(),
            site: "West".to_string(),
            request_type: "Maintenance".to_string(),
            request_date: "2026-08-10".to_string(),
            due_date: "2026-08-30".to_string(),
            status: RequestStatus::Pending,
            delegated_to: Some(Username::new(delegated_to).unwrap()),
        }
    }

    fn accept_patch(by: &str) -> TransitionPatch {
        TransitionPatch {
            status: RequestStatus::Accepted,
            accepted_by: Some(Username::new(by).unwrap()),
            approved_by: None,
            approved_date: None,
            manager_feedback: None,
        }
    }

    fn reject_patch(feedback: &str) -> TransitionPatch {
        TransitionPatch {
            status: RequestStatus::Rejected,
            accepted_by: None,
            approved_by: None,
            approved_date: None,
            manager_feedback: Some(feedback.to_string()),
        }
    }

    #[tokio::test]
    async fn test_insert_then_find() {
        let store = MemoryStore::new();
        let record = store.insert(new_request("alice")).await.unwrap();
        let found = store.find_by_id(&record.id).await.unwrap().unwrap();
        assert_eq!(found, record);
    }

    #[tokio::test]
    async fn test_find_unknown_is_none() {
        let store = MemoryStore::new();
        assert!(store.find_by_id(&RequestId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_cas_applies_when_status_matches() {
        let store = MemoryStore::new();
        let record = store.insert(new_request("alice")).await.unwrap();
        let updated = store
            .conditional_update(&record.id, RequestStatus::Pending, &accept_patch("alice"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, RequestStatus::Accepted);
        assert_eq!(updated.accepted_by, Some(Username::new("alice").unwrap()));
        // The stored record reflects the write.
        let stored = store.find_by_id(&record.id).await.unwrap().unwrap();
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn test_cas_mismatch_writes_nothing() {
        let store = MemoryStore::new();
        let record = store.insert(new_request("alice")).await.unwrap();
        let result = store
            .conditional_update(&record.id, RequestStatus::Accepted, &reject_patch("late"))
            .await
            .unwrap();
        assert!(result.is_none());
        let stored = store.find_by_id(&record.id).await.unwrap().unwrap();
        assert_eq!(stored.status, RequestStatus::Pending);
        assert!(stored.manager_feedback.is_none());
    }

    #[tokio::test]
    async fn test_cas_on_missing_record_is_none() {
        let store = MemoryStore::new();
        let result = store
            .conditional_update(&RequestId::new(), RequestStatus::Pending, &accept_patch("alice"))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_exactly_one_racing_writer_wins() {
        let store = std::sync::Arc::new(MemoryStore::new());
        let record = store.insert(new_request("alice")).await.unwrap();

        let a = {
            let store = store.clone();
            let id = record.id;
            tokio::spawn(async move {
                store
                    .conditional_update(&id, RequestStatus::Pending, &accept_patch("alice"))
                    .await
                    .unwrap()
            })
        };
        let b = {
            let store = store.clone();
            let id = record.id;
            tokio::spawn(async move {
                store
                    .conditional_update(&id, RequestStatus::Pending, &reject_patch("no capacity"))
                    .await
                    .unwrap()
            })
        };
        let (a, b) = (a.await.unwrap(), b.await.unwrap());

        assert!(a.is_some() ^ b.is_some(), "exactly one writer must win");
        let final_status = store.find_by_id(&record.id).await.unwrap().unwrap().status;
        let winner = a.or(b).unwrap();
        assert_eq!(final_status, winner.status);
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let store = MemoryStore::new();
        let first = store.insert(new_request("alice")).await.unwrap();
        let second = store.insert(new_request("bob")).await.unwrap();
        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), 2);
        // Same-second inserts fall back to a stable order; both must be present.
        assert!(listed.iter().any(|r| r.id == first.id));
        assert!(listed.iter().any(|r| r.id == second.id));
        assert!(listed[0].created_at >= listed[1].created_at);
    }
}
