//! Response types for the payroll API.
//!
//! This module defines the batch response body, the error response
//! structures and the mapping from engine errors to HTTP statuses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::PayrollRecord;
use crate::report::ReportBundle;

/// API error response structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        let (status, error) = match error {
            EngineError::ShapeMismatch { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiError::with_details(
                    "SHAPE_MISMATCH",
                    message,
                    "Provide exactly one attendance token per calendar day",
                ),
            ),
            EngineError::DivisionByZero { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiError::new("DIVISION_BY_ZERO", message),
            ),
            EngineError::Overflow { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiError::with_details(
                    "ARITHMETIC_OVERFLOW",
                    message,
                    "Amounts are too large to compute",
                ),
            ),
            EngineError::InvalidProfile { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "INVALID_PROFILE",
                    message,
                    "The employee profile contains invalid information",
                ),
            ),
            EngineError::InvalidMonth { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_MONTH", message),
            ),
            EngineError::RegisterImport { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("REGISTER_IMPORT_ERROR", message),
            ),
            EngineError::RegisterExport { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("REGISTER_EXPORT_ERROR", message),
            ),
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidConfig { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            ),
        };
        ApiErrorResponse { status, error }
    }
}

/// One employee that could not be computed in a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchFailure {
    /// The employee identifier from the request.
    pub emp_id: String,
    /// Why the computation failed.
    pub error: ApiError,
}

impl BatchFailure {
    /// Builds a failure entry from an engine error.
    pub fn new(emp_id: String, error: EngineError) -> Self {
        let response: ApiErrorResponse = error.into();
        Self {
            emp_id,
            error: response.error,
        }
    }
}

/// Response body for `POST /payroll/batch`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResponse {
    /// Computed records, in request order.
    pub records: Vec<PayrollRecord>,
    /// Employees that failed, in request order.
    pub failures: Vec<BatchFailure>,
    /// Report views over `records`.
    pub reports: ReportBundle,
}
