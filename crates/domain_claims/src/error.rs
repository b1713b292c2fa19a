//! Claim domain errors

use thiserror::Error;

/// Errors produced by the pure domain layer
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClaimError {
    /// The requested status is not reachable from the current status for
    /// the acting role (or is disabled by the claim's processor options).
    #[error("Invalid transition from {from} to {to} for role {role}")]
    InvalidTransition {
        from: String,
        to: String,
        role: String,
    },

    /// The payload is missing or malformed for the requested operation.
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<&'static str>,
    },
}

impl ClaimError {
    pub fn validation(message: impl Into<String>) -> Self {
        ClaimError::Validation {
            message: message.into(),
            field: None,
        }
    }

    pub fn missing_field(field: &'static str) -> Self {
        ClaimError::Validation {
            message: format!("Missing required field: {field}"),
            field: Some(field),
        }
    }
}
