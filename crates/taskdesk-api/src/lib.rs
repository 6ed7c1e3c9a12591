//! # taskdesk-api — Axum HTTP Surface
//!
//! The HTTP layer over the workflow engine, built on Axum/Tower/Tokio.
//!
//! ## Routes
//!
//! - `POST /api/requests` — create a request (session required)
//! - `GET /api/requests` — list requests, newest first (session required)
//! - `GET /api/requests/{id}` — fetch one request (session required)
//! - `PATCH /api/requests/{id}` — apply a transition (session required)
//! - `GET /api/requests/action?t=…` — perform a signed email action
//!   (no session; the token is the capability)
//!
//! ## Authorization Model
//!
//! Sessions ride two cookies, `session_user` and `session_admin`, each
//! holding the username. The admin cookie wins when both are present.
//! Authorization itself lives in the workflow crate's edge predicates;
//! handlers only resolve the actor and translate errors to status codes.
//!
//! ## Crate Policy
//!
//! - Sits at the top of the dependency DAG.
//! - No business logic in route handlers — every decision that matters
//!   is delegated to `taskdesk-workflow`.
//! - All errors map to structured HTTP responses via [`AppError`].

pub mod auth;
pub mod error;
pub mod routes;
pub mod state;

pub use error::AppError;
pub use routes::router;
pub use state::AppState;
