//! # Request Collection Routes
//!
//! CRUD over request records plus the transition endpoint. Handlers
//! resolve the session actor, parse inputs into domain types, and hand
//! everything to the engine; they hold no workflow rules of their own.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use taskdesk_core::{RequestId, Username};
use taskdesk_workflow::{NewRequest, RequestRecord, RequestStatus};

use crate::auth::SessionActor;
use crate::error::AppError;
use crate::state::AppState;

/// Body of `PATCH /api/requests/{id}`.
///
/// The status arrives as its display string (`"Accepted"`, `"In Work"`,
/// …) exactly as the browser UI sends it; parsing rejects anything
/// outside the known set before the engine is involved.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionBody {
    pub status: String,
    #[serde(default)]
    pub manager_feedback: Option<String>,
}

/// Body of `POST /api/requests`.
///
/// Every required field is optional at the serde level so validation can
/// name all the missing fields in one 400 response, as the original
/// create handler did.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBody {
    pub project: Option<String>,
    pub requester: Option<String>,
    pub site: Option<String>,
    pub request_type: Option<String>,
    pub request_date: Option<String>,
    pub due_date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub delegated_to: Option<String>,
}

impl CreateBody {
    fn into_new_request(self) -> Result<NewRequest, AppError> {
        let mut missing = Vec::new();
        let mut require = |name: &'static str, value: &Option<String>| {
            if value.as_deref().map_or(true, |v| v.trim().is_empty()) {
                missing.push(name);
            }
        };
        require("project", &self.project);
        require("requester", &self.requester);
        require("site", &self.site);
        require("requestType", &self.request_type);
        require("requestDate", &self.request_date);
        require("dueDate", &self.due_date);
        if !missing.is_empty() {
            return Err(AppError::Validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            )));
        }

        let status = match self.status.as_deref() {
            Some(s) => RequestStatus::parse(s)?,
            None => RequestStatus::Pending,
        };
        let delegated_to = self
            .delegated_to
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(Username::new)
            .transpose()?;

        Ok(NewRequest {
            project: self.project.unwrap_or_default(),
            requester: self.requester.unwrap_or_default(),
            site: self.site.unwrap_or_default(),
            request_type: self.request_type.unwrap_or_default(),
            request_date: self.request_date.unwrap_or_default(),
            due_date: self.due_date.unwrap_or_default(),
            status,
            delegated_to,
        })
    }
}

/// `POST /api/requests`
pub async fn create(
    State(state): State<AppState>,
    SessionActor(actor): SessionActor,
    Json(body): Json<CreateBody>,
) -> Result<(StatusCode, Json<RequestRecord>), AppError> {
    let new = body.into_new_request()?;
    let record = state.store.insert(new).await?;
    tracing::info!(request_id = %record.id, by = %actor.username, "request created");
    Ok((StatusCode::CREATED, Json(record)))
}

/// `GET /api/requests`
pub async fn list(
    State(state): State<AppState>,
    SessionActor(_): SessionActor,
) -> Result<Json<Vec<RequestRecord>>, AppError> {
    Ok(Json(state.store.list().await?))
}

/// `GET /api/requests/{id}`
pub async fn fetch(
    State(state): State<AppState>,
    SessionActor(_): SessionActor,
    Path(id): Path<String>,
) -> Result<Json<RequestRecord>, AppError> {
    let id = RequestId::parse(&id)?;
    let record = state
        .store
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("request {id}")))?;
    Ok(Json(record))
}

/// `PATCH /api/requests/{id}`
pub async fn transition(
    State(state): State<AppState>,
    SessionActor(actor): SessionActor,
    Path(id): Path<String>,
    Json(body): Json<TransitionBody>,
) -> Result<Json<RequestRecord>, AppError> {
    let id = RequestId::parse(&id)?;
    let to = RequestStatus::parse(&body.status)?;
    let updated = state
        .engine
        .apply_transition(id, &actor, to, body.manager_feedback)
        .await?;
    Ok(Json(updated))
}
