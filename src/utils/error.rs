//! Error handling module
//!
//! Defines error types and handling logic used in the project

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application error types, returned at the HTTP edge
#[derive(Error, Debug)]
pub enum AppError {
    /// Form validation failed
    #[error("Request validation failed: {0}")]
    Validation(String),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),
}

/// Why a call to the prediction API did not yield a decoded body
///
/// Every variant ends up as a user-visible failure message; none of them
/// leave the submission flow.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiCallError {
    /// Connection refused, DNS failure, timeout or malformed URL
    #[error("{0}")]
    Transport(String),

    /// Final attempt answered with a failing status
    #[error("{0} error returned by the prediction API")]
    Status(u16),

    /// Successful status but the body is not JSON
    #[error("response body is not valid JSON: {0}")]
    Decode(String),
}

/// Error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "type")]
    pub error_type: String,
    pub error: ErrorBody,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(rename = "type")]
    pub error_type: String,
    pub message: String,
}

impl AppError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    /// Get error type string
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "invalid_request_error",
            AppError::NotFound(_) => "not_found_error",
        }
    }

    /// Convert to the JSON error envelope
    pub fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse {
            error_type: "error".to_string(),
            error: ErrorBody {
                error_type: self.error_type().to_string(),
                message: self.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        tracing::warn!("Client error: {} - Status code: {}", self, status);

        (status, Json(self.to_error_response())).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Error handling helper functions
pub mod helpers {
    use super::*;

    /// Create validation error
    pub fn validation_error(message: impl Into<String>) -> AppError {
        AppError::Validation(message.into())
    }

    /// Create not found error
    pub fn not_found_error(message: impl Into<String>) -> AppError {
        AppError::NotFound(message.into())
    }
}
