//! # Request Records
//!
//! The entity under workflow control. Records are exclusively owned by
//! the persistence store: the engine reads a snapshot, computes a patch,
//! and submits a conditional write. It never holds a long-lived reference.
//!
//! Serde field names match the original document shape (`_id`,
//! `delegatedTo`, `managerFeedback`, …) so API responses are byte-for-byte
//! compatible with what the browser UI already consumes.

use serde::{Deserialize, Serialize};

use taskdesk_core::{RequestId, Timestamp, Username};

use crate::status::RequestStatus;

/// A snapshot of one request record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestRecord {
    /// Opaque unique identifier, immutable after creation.
    #[serde(rename = "_id")]
    pub id: RequestId,
    /// Project the request belongs to.
    pub project: String,
    /// Who filed the request.
    pub requester: String,
    /// Site the work applies to.
    pub site: String,
    /// Free-form request category.
    pub request_type: String,
    /// When the request was filed (ISO date supplied by the client).
    pub request_date: String,
    /// Due date (ISO date supplied by the client).
    pub due_date: String,
    /// Current workflow status.
    pub status: RequestStatus,
    /// Assignee empowered to accept and later complete the request.
    /// Set at creation, immutable through the workflow.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delegated_to: Option<Username>,
    /// Written once by the Pending → Accepted transition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted_by: Option<Username>,
    /// Written once by the Accepted → Approved transition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<Username>,
    /// Written once by the Accepted → Approved transition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_date: Option<Timestamp>,
    /// Written once by a rejecting transition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_feedback: Option<String>,
    /// Server-assigned creation instant.
    pub created_at: Timestamp,
}

/// Input for creating a request. The store assigns the id and
/// `created_at`; status starts wherever the caller says (the UI always
/// sends `Pending`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRequest {
    /// Project the request belongs to.
    pub project: String,
    /// Who filed the request.
    pub requester: String,
    /// Site the work applies to.
    pub site: String,
    /// Free-form request category.
    pub request_type: String,
    /// When the request was filed.
    pub request_date: String,
    /// Due date.
    pub due_date: String,
    /// Initial status.
    pub status: RequestStatus,
    /// Assignee empowered to accept the request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delegated_to: Option<Username>,
}

impl NewRequest {
    /// Materialize a record from this input.
    pub fn into_record(self, id: RequestId, created_at: Timestamp) -> RequestRecord {
        RequestRecord {
            id,
            project: self.project,
            requester: self.requester,
            site: self.site,
            request_type: self.request_type,
            request_date: self.request_date,
            due_date: self.due_date,
            status: self.status,
            delegated_to: self.delegated_to,
            accepted_by: None,
            approved_by: None,
            approved_date: None,
            manager_feedback: None,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> RequestRecord {
        NewRequest {
            project: "Feeder upgrade".to_string(),
            requester: "dave".to_string(),
            site: "North yard".to_string(),
            request_type: "Survey".to_string(),
            request_date: "2026-08-01".to_string(),
            due_date: "2026-09-01".to_string(),
            status: RequestStatus::Pending,
            delegated_to: Some(Username::new("alice").unwrap()),
        }
        .into_record(RequestId::new(), Timestamp::parse("2026-08-01T08:00:00Z").unwrap())
    }

    #[test]
    fn test_wire_shape_matches_original_collection() {
        let json = serde_json::to_value(record()).unwrap();
        let obj = json.as_object().unwrap();
        assert!(obj.contains_key("_id"));
        assert!(obj.contains_key("requestType"));
        assert!(obj.contains_key("delegatedTo"));
        assert!(obj.contains_key("createdAt"));
        assert_eq!(obj["status"], "Pending");
        // Transition-produced fields absent until their transition writes them.
        assert!(!obj.contains_key("acceptedBy"));
        assert!(!obj.contains_key("approvedBy"));
        assert!(!obj.contains_key("approvedDate"));
        assert!(!obj.contains_key("managerFeedback"));
    }

    #[test]
    fn test_new_request_starts_clean() {
        let r = record();
        assert!(r.accepted_by.is_none());
        assert!(r.approved_by.is_none());
        assert!(r.approved_date.is_none());
        assert!(r.manager_feedback.is_none());
    }

    #[test]
    fn test_record_json_roundtrip() {
        let r = record();
        let json = serde_json::to_string(&r).unwrap();
        let back: RequestRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }
}
