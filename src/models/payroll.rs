//! Payroll breakdown models.
//!
//! This module contains the [`PayrollBreakdown`] produced by the payroll
//! calculator and the [`PayrollRecord`] that bundles it with its inputs for
//! reporting and register export.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AggregationResult, AttendanceCode, EmployeeProfile};

/// Employer-side statutory contributions.
///
/// Reported alongside the breakdown but never deducted from net pay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerContributions {
    /// Employer provident fund share.
    pub epf: Decimal,
    /// Employer state insurance share.
    pub esi: Decimal,
}

/// The full earnings and deductions for one employee and month.
///
/// Always recomputed from the profile and aggregation; never edited.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{EmployerContributions, PayrollBreakdown};
/// use rust_decimal::Decimal;
///
/// let breakdown = PayrollBreakdown {
///     earned_gross: Decimal::new(10000, 0),
///     basic: Decimal::new(5000, 0),
///     da: Decimal::new(2000, 0),
///     hra: Decimal::new(3000, 0),
///     bonus: Decimal::ZERO,
///     other_allowance: Decimal::ZERO,
///     ot: Decimal::ZERO,
///     total_earnings: Decimal::new(10000, 0),
///     epf_wage: Decimal::new(7000, 0),
///     epf: Decimal::new(840, 0),
///     esi_applicable: true,
///     esi: Decimal::new(75, 0),
///     prof_tax: Decimal::ZERO,
///     other_deduction: Decimal::ZERO,
///     total_deduction: Decimal::new(915, 0),
///     net_salary: Decimal::new(9085, 0),
///     employer_contributions: EmployerContributions {
///         epf: Decimal::new(840, 0),
///         esi: Decimal::new(325, 0),
///     },
/// };
/// assert!(!breakdown.is_negative());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollBreakdown {
    /// Gross prorated by payable days.
    pub earned_gross: Decimal,
    /// Basic salary component.
    pub basic: Decimal,
    /// Dearness allowance component.
    pub da: Decimal,
    /// House rent allowance component.
    pub hra: Decimal,
    /// Bonus from the profile.
    pub bonus: Decimal,
    /// Other allowance from the profile.
    pub other_allowance: Decimal,
    /// Overtime from the profile.
    pub ot: Decimal,
    /// Sum of all earnings.
    pub total_earnings: Decimal,
    /// Basic + DA capped at the EPF wage ceiling.
    pub epf_wage: Decimal,
    /// Employee EPF deduction.
    pub epf: Decimal,
    /// Whether ESI was charged this month.
    pub esi_applicable: bool,
    /// Employee ESI deduction.
    pub esi: Decimal,
    /// Professional tax.
    pub prof_tax: Decimal,
    /// Other deduction from the profile.
    pub other_deduction: Decimal,
    /// Sum of all employee deductions.
    pub total_deduction: Decimal,
    /// Earnings less deductions. Not clamped at zero.
    pub net_salary: Decimal,
    /// Employer statutory shares.
    pub employer_contributions: EmployerContributions,
}

impl PayrollBreakdown {
    /// Returns true when deductions exceed earnings.
    pub fn is_negative(&self) -> bool {
        self.net_salary < Decimal::ZERO
    }
}

/// One employee's computed month: inputs and derived figures together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollRecord {
    /// The profile the figures were computed from.
    pub profile: EmployeeProfile,
    /// Calendar days in the month.
    pub days_in_month: u32,
    /// The classified attendance, one code per day.
    pub attendance: Vec<AttendanceCode>,
    /// Day counts.
    pub aggregation: AggregationResult,
    /// Salary breakdown.
    pub breakdown: PayrollBreakdown,
}
