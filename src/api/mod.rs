//! HTTP API module for the payroll engine.
//!
//! Exposes single-employee computation, batch computation with report
//! views, and register CSV export over JSON requests.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::{FAILURES_HEADER, create_router};
pub use request::{BatchRequest, ComputeRequest, EmployeeRequest};
pub use response::{ApiError, ApiErrorResponse, BatchFailure, BatchResponse};
pub use state::AppState;
