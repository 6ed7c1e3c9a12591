//! # Route Assembly
//!
//! One router over the request collection and the token action endpoint,
//! wrapped in a `TraceLayer` so every request gets a span.

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub mod action;
pub mod requests;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/requests", get(requests::list).post(requests::create))
        .route(
            "/api/requests/{id}",
            get(requests::fetch).patch(requests::transition),
        )
        .route("/api/requests/action", get(action::perform))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
