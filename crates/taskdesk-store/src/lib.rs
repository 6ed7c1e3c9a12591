//! # taskdesk-store — Persistence Implementations
//!
//! Implements the collaborator interfaces the workflow engine consumes
//! (`RequestStore`, `UserDirectory`) over in-process memory. The memory
//! backend is the one the test suite and the demo server run on; a
//! document-database backend would implement the same traits, and in
//! particular the same compare-and-set contract, without the engine
//! noticing.

pub mod directory;
pub mod memory;

pub use directory::{MemoryDirectory, UserAccount};
pub use memory::MemoryStore;
