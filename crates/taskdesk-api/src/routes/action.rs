//! # Email Action Route
//!
//! `GET /api/requests/action?t=<token>` — the endpoint the acceptance
//! email's approve/deny links point at. No session runs here; a verified
//! token is the whole capability.
//!
//! Three response modes, selected by query flags as in the original
//! service:
//!
//! - `redirect=1` — perform the action, then 303 to the admin page
//!   (the mode email links use, so a click lands somewhere human-readable)
//! - `silent=1` — perform the action, respond 204 with no body
//! - neither — respond with the action outcome as JSON

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use serde::Deserialize;

use taskdesk_core::Timestamp;
use taskdesk_workflow::TokenActionOutcome;

use crate::error::AppError;
use crate::state::AppState;

/// Query parameters of the action endpoint.
#[derive(Debug, Deserialize)]
pub struct ActionQuery {
    /// The signed token from the email link.
    pub t: String,
    #[serde(default)]
    pub redirect: Option<String>,
    #[serde(default)]
    pub silent: Option<String>,
}

fn flag(value: &Option<String>) -> bool {
    value.as_deref() == Some("1")
}

/// `GET /api/requests/action`
pub async fn perform(
    State(state): State<AppState>,
    Query(query): Query<ActionQuery>,
) -> Result<Response, AppError> {
    let payload = state.verifier.verify(&query.t, Timestamp::now())?;
    let outcome = state.engine.apply_token_action(&payload).await?;

    let action = match &outcome {
        TokenActionOutcome::Approved(_) => "approved",
        TokenActionOutcome::Denied(_) => "denied",
        TokenActionOutcome::NoAction { .. } => "none",
    };

    if flag(&query.redirect) {
        let target = format!(
            "/request-form/admin?action={action}&rid={}",
            payload.request_id
        );
        return Ok(Redirect::to(&target).into_response());
    }
    if flag(&query.silent) {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    let body = match outcome {
        TokenActionOutcome::Approved(record) | TokenActionOutcome::Denied(record) => {
            serde_json::json!({ "ok": true, "action": action, "request": record })
        }
        TokenActionOutcome::NoAction { status } => {
            serde_json::json!({ "ok": true, "action": action, "status": status })
        }
    };
    Ok(Json(body).into_response())
}
