//! Request types for the payroll API.

use serde::{Deserialize, Serialize};

use crate::calculation::{PayrollInput, classify_all};
use crate::models::{EmployeeProfile, MonthId};

/// Request body for `POST /payroll/compute`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputeRequest {
    /// The employee's salary profile.
    pub profile: EmployeeProfile,
    /// The payroll month.
    pub month: MonthId,
    /// One raw attendance token per day of the month.
    pub attendance: Vec<String>,
}

/// One employee inside a batch request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRequest {
    /// The employee's salary profile.
    pub profile: EmployeeProfile,
    /// One raw attendance token per day of the month.
    pub attendance: Vec<String>,
}

/// Request body for `POST /payroll/batch` and `POST /payroll/register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchRequest {
    /// The payroll month.
    pub month: MonthId,
    /// Employees to compute, in register order.
    pub employees: Vec<EmployeeRequest>,
}

impl From<EmployeeRequest> for PayrollInput {
    fn from(req: EmployeeRequest) -> Self {
        PayrollInput {
            profile: req.profile,
            attendance: classify_all(&req.attendance),
        }
    }
}
