//! # Application State
//!
//! Shared state for the Axum application: the workflow engine, a direct
//! handle on the request store for reads, and the token verifier. All
//! `Arc`s, cheap to clone per request.

use std::sync::Arc;

use taskdesk_notify::Notifier;
use taskdesk_token::TokenVerifier;
use taskdesk_workflow::{RequestStore, UserDirectory, WorkflowEngine};

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    /// The workflow engine, owning the transition logic.
    pub engine: Arc<WorkflowEngine>,
    /// Direct store handle for reads that bypass the engine.
    pub store: Arc<dyn RequestStore>,
    /// Verifies email action tokens.
    pub verifier: TokenVerifier,
}

impl AppState {
    /// Assemble the state, wiring the engine over its collaborators.
    pub fn new(
        store: Arc<dyn RequestStore>,
        users: Arc<dyn UserDirectory>,
        notifier: Arc<dyn Notifier>,
        verifier: TokenVerifier,
    ) -> Self {
        let engine = Arc::new(WorkflowEngine::new(Arc::clone(&store), users, notifier));
        Self {
            engine,
            store,
            verifier,
        }
    }
}
