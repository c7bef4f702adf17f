//! Error types for the cache layer
//!
//! Two boundaries, two error enums: `StoreError` for backend failures (absorbed
//! by the adapter, never shown to end users) and `AdminError` for the operator
//! API (rendered as a structured JSON envelope).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Store Error Enum ==
/// Failure raised by a key-value store backend.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store cannot be reached (connection refused, dropped, timed out)
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The store answered but the operation failed
    #[error("store operation failed: {0}")]
    Operation(String),
}

impl From<redis::RedisError> for StoreError {
    fn from(err: redis::RedisError) -> Self {
        if err.is_connection_refusal()
            || err.is_connection_dropped()
            || err.is_timeout()
            || err.is_io_error()
        {
            StoreError::Unavailable(err.to_string())
        } else {
            StoreError::Operation(err.to_string())
        }
    }
}

// == Admin Error Enum ==
/// Error surfaced by the cache administration API.
#[derive(Error, Debug)]
pub enum AdminError {
    /// Requested key has no entry; an expected outcome, not a failure
    #[error("Key not found")]
    KeyNotFound,

    /// Malformed operator input (empty pattern, bad parameter)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Unexpected failure above the adapter boundary, rendered as the 500
    /// arm of the envelope. The handlers ride on the failure-absorbing
    /// client, so no current path constructs this variant.
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AdminError::KeyNotFound => (
                StatusCode::NOT_FOUND,
                json!({ "success": false, "error": "Key not found" }),
            ),
            AdminError::InvalidRequest(msg) => (
                StatusCode::BAD_REQUEST,
                json!({ "success": false, "error": "Invalid request", "message": msg }),
            ),
            AdminError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "success": false, "error": "Internal error", "message": msg }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

// == Result Type Aliases ==
/// Convenience Result type for store backends.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Convenience Result type for admin handlers.
pub type AdminResult<T> = std::result::Result<T, AdminError>;
