//! # Domain Identity Newtypes
//!
//! Newtype wrappers for taskdesk identifiers. These prevent accidental
//! identifier confusion — a raw string cannot be passed where a validated
//! `Username` is expected, and a `RequestId` only exists if it parsed as
//! a UUID.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;

/// Unique identifier for a workflow request record.
///
/// Opaque and immutable after creation. Serializes as the plain UUID
/// string so it round-trips through URLs and JSON bodies unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub Uuid);

impl RequestId {
    /// Generate a new random request identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a request identifier from its string form.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidId` if the string is not a valid UUID.
    /// Callers at the HTTP boundary translate this to a 400, matching the
    /// "Invalid id" check the original service performed before any
    /// database access.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| CoreError::InvalidId(s.to_string()))
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated username.
///
/// Non-empty, surrounding whitespace stripped. Comparison is
/// case-sensitive: `"Alice"` and `"alice"` are distinct principals, as
/// they were in the original user collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Username(String);

impl Username {
    /// Validate and construct a username.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidUsername` for empty or whitespace-only
    /// input.
    pub fn new(s: impl Into<String>) -> Result<Self, CoreError> {
        let s = s.into();
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(CoreError::InvalidUsername(s));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The username as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for Username {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for Username {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}
