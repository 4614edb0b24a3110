//! Employee profile model.
//!
//! This module defines [`EmployeeProfile`], the static salary profile the
//! payroll calculator consumes, along with its validation rules.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_OPENING_CL;
use crate::error::{EngineError, EngineResult};

/// Department name used when a profile has none.
pub const UNASSIGNED_DEPARTMENT: &str = "Unassigned";

/// Largest gross, balance or adjustment a profile may carry (one trillion).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

fn default_opening_cl() -> Decimal {
    DEFAULT_OPENING_CL
}

fn default_true() -> bool {
    true
}

/// An employee's static salary profile for one payroll run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeProfile {
    /// Employee identifier.
    pub emp_id: String,
    /// Display name.
    pub name: String,
    /// Department used for rollups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// Provident fund account number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epf_no: Option<String>,
    /// State insurance number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub esi_no: Option<String>,
    /// Full monthly gross salary.
    pub gross: Decimal,
    /// Casual-leave balance at the start of the month.
    #[serde(default = "default_opening_cl")]
    pub opening_cl: Decimal,
    /// Whether EPF is deducted.
    #[serde(default = "default_true")]
    pub epf_applicable: bool,
    /// Whether ESI is deducted when under the wage ceiling.
    #[serde(default = "default_true")]
    pub esi_applicable: bool,
    /// One-off bonus for the month.
    #[serde(default)]
    pub bonus: Decimal,
    /// Any other allowance for the month.
    #[serde(default)]
    pub other_allowance: Decimal,
    /// Overtime payment for the month.
    #[serde(default)]
    pub ot: Decimal,
    /// Any other deduction for the month.
    #[serde(default)]
    pub other_deduction: Decimal,
}

impl EmployeeProfile {
    /// Creates a profile with default leave balance, flags and no adjustments.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::EmployeeProfile;
    /// use rust_decimal::Decimal;
    ///
    /// let profile = EmployeeProfile::new("E001", "Asha", Decimal::new(25000, 0));
    /// assert_eq!(profile.opening_cl, Decimal::new(8, 0));
    /// assert!(profile.epf_applicable);
    /// assert_eq!(profile.department(), "Unassigned");
    /// ```
    pub fn new(emp_id: impl Into<String>, name: impl Into<String>, gross: Decimal) -> Self {
        Self {
            emp_id: emp_id.into(),
            name: name.into(),
            department: None,
            epf_no: None,
            esi_no: None,
            gross,
            opening_cl: DEFAULT_OPENING_CL,
            epf_applicable: true,
            esi_applicable: true,
            bonus: Decimal::ZERO,
            other_allowance: Decimal::ZERO,
            ot: Decimal::ZERO,
            other_deduction: Decimal::ZERO,
        }
    }

    /// Department for rollups, `"Unassigned"` when blank or missing.
    pub fn department(&self) -> &str {
        match self.department.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => UNASSIGNED_DEPARTMENT,
        }
    }

    /// Rejects profiles the engine must not compute.
    ///
    /// Fails with `InvalidProfile` when the employee id or name is blank, or
    /// when gross, opening balance or any adjustment is negative or above
    /// [`MAX_AMOUNT`].
    pub fn validate(&self) -> EngineResult<()> {
        if self.emp_id.trim().is_empty() {
            return Err(invalid("emp_id", "must not be empty"));
        }
        if self.name.trim().is_empty() {
            return Err(invalid("name", "must not be empty"));
        }

        for (field, value) in [
            ("gross", self.gross),
            ("opening_cl", self.opening_cl),
            ("bonus", self.bonus),
            ("other_allowance", self.other_allowance),
            ("ot", self.ot),
            ("other_deduction", self.other_deduction),
        ] {
            if value.is_sign_negative() && !value.is_zero() {
                return Err(invalid(field, format!("must not be negative, got {}", value)));
            }
            if value > MAX_AMOUNT {
                return Err(invalid(
                    field,
                    format!("must not exceed {}, got {}", MAX_AMOUNT, value),
                ));
            }
        }

        Ok(())
    }
}

fn invalid(field: &str, message: impl Into<String>) -> EngineError {
    EngineError::InvalidProfile {
        field: field.to_string(),
        message: message.into(),
    }
}
