//! # taskdesk-workflow — Request Workflow Engine
//!
//! Owns the finite state machine governing a request's lifecycle: which
//! actor may move a request from one status to another, what field
//! mutations each transition implies, and which side effects fire.
//!
//! ## Allowed Transitions
//!
//! ```text
//! Pending ──accept (assignee)──▶ Accepted ──approve (admin)──▶ Approved
//!    │                             │                              │
//!    └──reject (assignee|admin)    └──reject (admin)       complete (assignee)
//!           │                             │                       │
//!           ▼                             ▼                       ▼
//!        Rejected                      Rejected               Completed
//! ```
//!
//! `Rejected` and `Completed` are terminal for this engine. `In Work`,
//! `Closed`, and `Overdue` are valid stored statuses with no engine edges
//! in or out — they are reserved for processes outside this crate (such as
//! a scheduled overdue-marking job).
//!
//! ## Design Decision
//!
//! The state machine is a runtime-checked enum with a single edge-planning
//! function rather than typestate types. Records arrive from storage with
//! a status known only at runtime, every transition is authorized against
//! a per-call actor, and the write itself is a compare-and-set against the
//! store — compile-time state types would add fourteen impl blocks without
//! removing a single runtime check.
//!
//! ## Concurrency
//!
//! The engine is stateless per invocation: one snapshot read, one
//! conditional write keyed on the expected current status. Two racing
//! invocations are resolved entirely by the store's compare-and-set; the
//! loser observes a predicate mismatch and reports `StaleTransition`
//! (session path) or a benign no-action outcome (token path). No lock is
//! ever held across operations.

pub mod engine;
pub mod record;
pub mod status;
pub mod store;
pub mod transition;

pub use engine::{TokenActionOutcome, WorkflowEngine};
pub use record::{NewRequest, RequestRecord};
pub use status::RequestStatus;
pub use store::{RequestStore, StoreError, UserDirectory};
pub use transition::{plan_transition, TransitionPatch, TransitionPlan, WorkflowError};
