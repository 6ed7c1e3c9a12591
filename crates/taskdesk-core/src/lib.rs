//! # taskdesk-core — Foundational Types
//!
//! The bedrock crate of taskdesk. Defines the primitives every other crate
//! builds on: identifier newtypes, the actor model, UTC-only timestamps,
//! and canonical byte production for capability-token signing.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `RequestId` and `Username`
//!    are newtypes with validated constructors. No bare strings or UUIDs
//!    cross module boundaries.
//!
//! 2. **`Actor` is an immutable input.** Identity resolution happens at the
//!    HTTP boundary; everything below receives a resolved `Actor` value and
//!    never touches ambient session state.
//!
//! 3. **UTC-only timestamps.** `Timestamp` enforces UTC with Z suffix and
//!    seconds precision, so `approvedDate` values are stable ISO-8601
//!    strings regardless of where the service runs.
//!
//! 4. **`CanonicalBytes` newtype.** All token-signing input flows through
//!    `CanonicalBytes::new()`. No raw `serde_json::to_vec()` on a signing
//!    path, which keeps signatures deterministic across encoders.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `taskdesk-*` crates (leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod actor;
pub mod canonical;
pub mod error;
pub mod identity;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use actor::{Actor, Role};
pub use canonical::CanonicalBytes;
pub use error::{CoreError, CryptoError};
pub use identity::{RequestId, Username};
pub use temporal::Timestamp;
