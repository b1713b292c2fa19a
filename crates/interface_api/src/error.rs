//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use claims_engine::EngineError;
use domain_claims::ClaimError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Admission denied: {0}")]
    AdmissionDenied(String),

    #[error("Lock conflict: {0}")]
    LockConflict(String),

    #[error("Lock not held")]
    LockNotHeld,

    #[error("Not lock holder")]
    NotLockHolder,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, "validation_error", msg.clone()),
            ApiError::InvalidTransition(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "invalid_transition", msg.clone())
            }
            ApiError::AdmissionDenied(msg) => {
                (StatusCode::FORBIDDEN, "admission_denied", msg.clone())
            }
            ApiError::LockConflict(msg) => (StatusCode::CONFLICT, "lock_conflict", msg.clone()),
            ApiError::LockNotHeld => (
                StatusCode::CONFLICT,
                "lock_not_held",
                "Caller does not hold the evaluation lock".to_string(),
            ),
            ApiError::NotLockHolder => (
                StatusCode::FORBIDDEN,
                "not_lock_holder",
                "Caller is not the lock holder".to_string(),
            ),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg.clone()),
            ApiError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg.clone())
            }
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::NotFound(id) => ApiError::NotFound(format!("Claim not found: {id}")),
            EngineError::LockConflict { .. } => ApiError::LockConflict(err.to_string()),
            EngineError::LockNotHeld => ApiError::LockNotHeld,
            EngineError::NotLockHolder => ApiError::NotLockHolder,
            EngineError::AdmissionDenied { .. } => ApiError::AdmissionDenied(err.to_string()),
            EngineError::VersionConflict(_) => ApiError::Conflict(err.to_string()),
            EngineError::Domain(ClaimError::InvalidTransition { .. }) => {
                ApiError::InvalidTransition(err.to_string())
            }
            EngineError::Domain(ClaimError::Validation { .. }) => {
                ApiError::Validation(err.to_string())
            }
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::Validation(err.to_string())
    }
}
