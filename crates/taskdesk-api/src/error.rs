//! # Application Error
//!
//! Maps domain errors to structured HTTP responses. The interesting
//! mappings are the workflow ones: a denied edge is 403, a lost
//! compare-and-set race is 409, and every token defect collapses into a
//! single 400 so responses don't distinguish a forged token from a stale
//! one (the logs do).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use taskdesk_core::CoreError;
use taskdesk_token::TokenError;
use taskdesk_workflow::{StoreError, WorkflowError};

/// Application-level error type that maps to HTTP responses.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Request validation failed (bad id, unknown status, bad token).
    #[error("invalid request: {0}")]
    Validation(String),

    /// No usable session cookie.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The actor failed the transition's authorization predicate.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// A concurrent transition won the write.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "internal error");
        }
        let body = serde_json::json!({
            "error": {
                "code": status.as_u16(),
                "message": self.to_string(),
            }
        });
        (status, axum::Json(body)).into_response()
    }
}

impl From<WorkflowError> for AppError {
    fn from(e: WorkflowError) -> Self {
        match e {
            WorkflowError::NotFound(id) => AppError::NotFound(format!("request {id}")),
            WorkflowError::TransitionDenied { .. } => AppError::Forbidden(e.to_string()),
            WorkflowError::InvalidStatus(_) => AppError::Validation(e.to_string()),
            WorkflowError::StaleTransition { .. } => AppError::Conflict(e.to_string()),
            WorkflowError::Store(inner) => AppError::Internal(inner.to_string()),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl From<CoreError> for AppError {
    fn from(e: CoreError) -> Self {
        AppError::Validation(e.to_string())
    }
}

impl From<TokenError> for AppError {
    fn from(e: TokenError) -> Self {
        // The variant matters for operators, not for the client.
        tracing::debug!(error = %e, "action token rejected");
        AppError::Validation("invalid or expired token".to_string())
    }
}
