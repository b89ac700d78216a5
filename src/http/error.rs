//! Error Types for the HTTP layer
//!
//! Every failure leaves a handler as an [`ApiError`], serialized as
//! `{ "code": ..., "message": ... }` with the status from
//! [`ErrorCode::status_code`].

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::fmt;
use store_object::StoreError;

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Required field missing or blank, or the body is not valid JSON
    ValidationFailed,

    /// Path id is not an integer
    InvalidId,

    /// Unique key already taken
    ConstraintViolation,

    /// Store unreachable or query failed
    DatabaseError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::ValidationFailed | ErrorCode::InvalidId => StatusCode::BAD_REQUEST,

            // Duplicate emails stay a server error for client compatibility
            ErrorCode::ConstraintViolation | ErrorCode::DatabaseError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get a default message for this error code.
    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorCode::ValidationFailed => "Request validation failed",
            ErrorCode::InvalidId => "Invalid record id",
            ErrorCode::ConstraintViolation => "Record violates a uniqueness constraint",
            ErrorCode::DatabaseError => "Database operation failed",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Structured error response for API operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code categorizing the error
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn from_code(code: ErrorCode) -> Self {
        Self::new(code, code.default_message())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message)
    }

    pub fn invalid_id(raw: &str) -> Self {
        Self::new(
            ErrorCode::InvalidId,
            format!("Invalid record id '{}': expected an integer", raw),
        )
    }

    pub fn status_code(&self) -> StatusCode {
        self.code.status_code()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(e) => ApiError::validation(e.to_string()),
            StoreError::ConstraintViolation { message, .. } => {
                ApiError::new(ErrorCode::ConstraintViolation, message)
            }
            StoreError::Database { .. } => {
                // Driver details stay in the log
                tracing::error!(error = %err, "Store operation failed");
                ApiError::from_code(ErrorCode::DatabaseError)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
