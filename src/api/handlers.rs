//! HTTP request handlers for the payroll API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{HeaderName, StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    PayrollInput, classify_all, compute_batch, compute_payroll, is_recognized, partition_results,
};
use crate::error::{EngineError, EngineResult};
use crate::models::{MonthContext, PayrollRecord};
use crate::register::export_register;
use crate::report::build_reports;

use super::request::{BatchRequest, ComputeRequest};
use super::response::{ApiError, ApiErrorResponse, BatchFailure, BatchResponse};
use super::state::AppState;

/// Header carrying the number of employees left out of an exported register.
pub const FAILURES_HEADER: &str = "x-payroll-failures";

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payroll/compute", post(compute_handler))
        .route("/payroll/batch", post(batch_handler))
        .route("/payroll/register", post(register_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Payroll request failed"
    );
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}

fn warn_unrecognized(correlation_id: Uuid, emp_id: &str, tokens: &[String]) {
    for (idx, token) in tokens.iter().enumerate() {
        if !is_recognized(token) {
            warn!(
                correlation_id = %correlation_id,
                emp_id = %emp_id,
                day = idx + 1,
                token = %token,
                "Unrecognized attendance token treated as unmarked"
            );
        }
    }
}

/// Resolves the month and computes every employee of a batch request.
fn run_batch(
    correlation_id: Uuid,
    request: BatchRequest,
    state: &AppState,
) -> EngineResult<(MonthContext, Vec<PayrollRecord>, Vec<(String, EngineError)>)> {
    let month = MonthContext::try_from(request.month)?;
    let inputs: Vec<PayrollInput> = request
        .employees
        .into_iter()
        .map(|employee| {
            warn_unrecognized(correlation_id, &employee.profile.emp_id, &employee.attendance);
            employee.into()
        })
        .collect();

    let results = compute_batch(inputs, &month, state.config().config());
    let (records, failures) = partition_results(results);
    Ok((month, records, failures))
}

/// Handler for `POST /payroll/compute`.
///
/// Computes one employee's month and returns the full record.
async fn compute_handler(
    State(state): State<AppState>,
    payload: Result<Json<ComputeRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing compute request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let month = match MonthContext::try_from(request.month) {
        Ok(month) => month,
        Err(err) => return error_response(correlation_id, err),
    };
    warn_unrecognized(correlation_id, &request.profile.emp_id, &request.attendance);
    let attendance = classify_all(&request.attendance);

    let start_time = Instant::now();
    match compute_payroll(request.profile, attendance, &month, state.config().config()) {
        Ok(record) => {
            info!(
                correlation_id = %correlation_id,
                emp_id = %record.profile.emp_id,
                payable_days = %record.aggregation.payable_days,
                net_salary = %record.breakdown.net_salary,
                duration_us = start_time.elapsed().as_micros(),
                "Payroll computed"
            );
            json_response(StatusCode::OK, record)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for `POST /payroll/batch`.
///
/// Computes every employee independently and returns records, failures and
/// the report views over the successful records.
async fn batch_handler(
    State(state): State<AppState>,
    payload: Result<Json<BatchRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing batch request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };
    let employees = request.employees.len();

    let start_time = Instant::now();
    let outcome = run_batch(correlation_id, request, &state).and_then(|(_, records, failures)| {
        let reports = build_reports(&records)?;
        Ok(BatchResponse {
            records,
            failures: failures
                .into_iter()
                .map(|(emp_id, err)| BatchFailure::new(emp_id, err))
                .collect(),
            reports,
        })
    });

    match outcome {
        Ok(response) => {
            info!(
                correlation_id = %correlation_id,
                employees,
                failed = response.failures.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Batch computed"
            );
            json_response(StatusCode::OK, response)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for `POST /payroll/register`.
///
/// Returns the register CSV for the employees that computed successfully.
/// The number left out is reported in the `x-payroll-failures` header.
async fn register_handler(
    State(state): State<AppState>,
    payload: Result<Json<BatchRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing register request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };
    let employees = request.employees.len();

    let start_time = Instant::now();
    let outcome = run_batch(correlation_id, request, &state).and_then(|(month, records, failures)| {
        let csv = export_register(&records, &month)?;
        Ok((csv, failures.len()))
    });

    match outcome {
        Ok((csv, failed)) => {
            info!(
                correlation_id = %correlation_id,
                employees,
                failed,
                duration_us = start_time.elapsed().as_micros(),
                "Register exported"
            );
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (HeaderName::from_static(FAILURES_HEADER), failed.to_string()),
                ],
                csv,
            )
                .into_response()
        }
        Err(err) => error_response(correlation_id, err),
    }
}
