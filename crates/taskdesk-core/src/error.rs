//! # Error Types
//!
//! Shared error enums for the foundational crate. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//! Higher layers define their own error enums and convert at the boundary
//! rather than threading one god-enum through the stack.

use thiserror::Error;

/// Errors from constructing or parsing core primitives.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A request identifier string was not a valid UUID.
    #[error("invalid request id: {0}")]
    InvalidId(String),

    /// A username failed validation (empty or whitespace-only).
    #[error("invalid username: {0:?}")]
    InvalidUsername(String),

    /// A timestamp string was rejected.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Canonical serialization failed.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),
}

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// Float values are not permitted in canonical representations;
    /// they have non-deterministic serialization edge cases.
    #[error("float values are not permitted in canonical representations: {0}")]
    FloatRejected(f64),

    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// Error in cryptographic operations (token signing and verification).
#[derive(Error, Debug)]
pub enum CryptoError {
    /// Signature verification failed.
    #[error("signature verification failed: {0}")]
    VerificationFailed(String),

    /// Key generation or parsing failed.
    #[error("key error: {0}")]
    KeyError(String),
}
