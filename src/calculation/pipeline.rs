//! End-to-end payroll computation for one employee or a whole month.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::calculation::{aggregate, compute_salary};
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceCode, EmployeeProfile, MonthContext, PayrollRecord};

/// One employee's inputs for a payroll run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollInput {
    /// The employee's salary profile.
    pub profile: EmployeeProfile,
    /// One classified code per day of the month.
    pub attendance: Vec<AttendanceCode>,
}

/// Validates, aggregates and computes salary for one employee.
///
/// # Errors
///
/// - `InvalidProfile` if the profile fails validation
/// - `ShapeMismatch` if `attendance` does not cover the month exactly
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{classify_all, compute_payroll};
/// use payroll_engine::config::EngineConfig;
/// use payroll_engine::models::{EmployeeProfile, MonthContext};
/// use rust_decimal::Decimal;
///
/// let month = MonthContext::new(2025, 1).unwrap();
/// let profile = EmployeeProfile::new("E001", "Asha", Decimal::new(25000, 0));
/// let attendance = classify_all(vec!["P"; 31]);
///
/// let record = compute_payroll(profile, attendance, &month, &EngineConfig::default()).unwrap();
/// assert_eq!(record.breakdown.earned_gross, Decimal::new(25000, 0));
/// ```
pub fn compute_payroll(
    profile: EmployeeProfile,
    attendance: Vec<AttendanceCode>,
    month: &MonthContext,
    config: &EngineConfig,
) -> EngineResult<PayrollRecord> {
    profile.validate()?;

    let days_in_month = month.days_in_month();
    let aggregation = aggregate(&attendance, profile.opening_cl, days_in_month, config.attendance())?;
    let breakdown = compute_salary(&profile, &aggregation, days_in_month, config)?;

    Ok(PayrollRecord {
        profile,
        days_in_month,
        attendance,
        aggregation,
        breakdown,
    })
}

/// Runs [`compute_payroll`] for every employee, in input order.
///
/// Each employee is computed independently, so one failure does not affect
/// the others.
pub fn compute_batch(
    inputs: Vec<PayrollInput>,
    month: &MonthContext,
    config: &EngineConfig,
) -> Vec<(String, EngineResult<PayrollRecord>)> {
    inputs
        .into_iter()
        .map(|input| {
            let emp_id = input.profile.emp_id.clone();
            let result = compute_payroll(input.profile, input.attendance, month, config);
            if let Err(err) = &result {
                warn!(emp_id = %emp_id, error = %err, "Payroll computation failed");
            }
            (emp_id, result)
        })
        .collect()
}

/// Splits batch results into records and `(emp_id, error)` failures.
pub fn partition_results(
    results: Vec<(String, EngineResult<PayrollRecord>)>,
) -> (Vec<PayrollRecord>, Vec<(String, EngineError)>) {
    let mut records = Vec::new();
    let mut failures = Vec::new();
    for (emp_id, result) in results {
        match result {
            Ok(record) => records.push(record),
            Err(err) => failures.push((emp_id, err)),
        }
    }
    (records, failures)
}
