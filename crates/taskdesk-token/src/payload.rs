//! # Token Payload
//!
//! The claims carried by an action token. Field names on the wire match
//! the compact form the original service used (`rid`, `act`, `exp`, `by`)
//! so tokens stay short enough for email-client URL limits.

use serde::{Deserialize, Serialize};

use taskdesk_core::{RequestId, Timestamp, Username};

/// Default token lifetime: 24 hours, matching the validity window stated
/// in the acceptance email.
pub const DEFAULT_TTL_SECS: i64 = 60 * 60 * 24;

/// The admin action a token authorizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenAction {
    /// Maps to the Accepted → Approved edge.
    Approve,
    /// Maps to the Accepted → Rejected edge.
    Deny,
}

impl std::fmt::Display for TokenAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Approve => f.write_str("approve"),
            Self::Deny => f.write_str("deny"),
        }
    }
}

/// The signed claims: one action on one request, until one expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionPayload {
    /// The request the action applies to.
    #[serde(rename = "rid")]
    pub request_id: RequestId,
    /// The authorized action.
    #[serde(rename = "act")]
    pub action: TokenAction,
    /// Expiry as Unix epoch seconds.
    #[serde(rename = "exp")]
    pub expires_at: i64,
    /// The admin the token was issued for, used as `approvedBy` when the
    /// approve action lands. Absent for anonymous issuance.
    #[serde(rename = "by", skip_serializing_if = "Option::is_none")]
    pub issued_by: Option<Username>,
}

impl ActionPayload {
    /// Build a payload expiring `ttl_secs` after `now`.
    pub fn new(
        request_id: RequestId,
        action: TokenAction,
        now: Timestamp,
        ttl_secs: i64,
        issued_by: Option<Username>,
    ) -> Self {
        Self {
            request_id,
            action,
            expires_at: now.epoch_secs() + ttl_secs,
            issued_by,
        }
    }

    /// Whether the payload is expired at `now`.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.expires_at < now.epoch_secs()
    }
}
