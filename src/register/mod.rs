//! Spreadsheet register export and import.
//!
//! The register is the CSV a payroll run is handed over in: one row per
//! employee with the summary columns in [`SUMMARY_COLUMNS`], followed by
//! one column per calendar day holding the canonical attendance token.
//! Exported registers import back to the same codes and figures.

mod export;
mod import;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AttendanceCode, EmployeeProfile, PayrollRecord};

pub use export::export_register;
pub use import::import_register;

/// Summary column headings, in register order.
pub const SUMMARY_COLUMNS: [&str; 27] = [
    "S.No",
    "EmpID",
    "EPF No",
    "ESI No",
    "Name",
    "Gross",
    "Present Days",
    "Paid Holiday",
    "Week Off",
    "On Duty",
    "Casual Leave",
    "Loss of Pay",
    "Payable Days",
    "Earned Gross",
    "Basic",
    "DA",
    "HRA",
    "Bonus",
    "Other Allowance",
    "OT",
    "Total Earnings",
    "EPF",
    "ESI",
    "Professional Tax",
    "Other Deduction",
    "Total Deduction",
    "Net Salary",
];

/// The derived figures a register row states, columns 7-27.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterFigures {
    /// Present days.
    pub present_days: Decimal,
    /// Paid-holiday days.
    pub paid_holiday: Decimal,
    /// Week-off days.
    pub week_off: Decimal,
    /// On-duty days.
    pub on_duty: Decimal,
    /// Paid casual leave.
    pub casual_leave: Decimal,
    /// Loss-of-pay days.
    pub loss_of_pay: Decimal,
    /// Payable days.
    pub payable_days: Decimal,
    /// Earned gross.
    pub earned_gross: Decimal,
    /// Basic.
    pub basic: Decimal,
    /// DA.
    pub da: Decimal,
    /// HRA.
    pub hra: Decimal,
    /// Bonus.
    pub bonus: Decimal,
    /// Other allowance.
    pub other_allowance: Decimal,
    /// Overtime.
    pub ot: Decimal,
    /// Total earnings.
    pub total_earnings: Decimal,
    /// Employee EPF.
    pub epf: Decimal,
    /// Employee ESI.
    pub esi: Decimal,
    /// Professional tax.
    pub prof_tax: Decimal,
    /// Other deduction charged.
    pub other_deduction: Decimal,
    /// Total deduction.
    pub total_deduction: Decimal,
    /// Net salary.
    pub net_salary: Decimal,
}

impl RegisterFigures {
    /// The figures a computed record is exported with.
    pub fn from_record(record: &PayrollRecord) -> Self {
        let agg = &record.aggregation;
        let b = &record.breakdown;
        Self {
            present_days: agg.present_days,
            paid_holiday: agg.paid_holiday,
            week_off: agg.week_off,
            on_duty: agg.on_duty,
            casual_leave: agg.casual_leave,
            loss_of_pay: agg.loss_of_pay,
            payable_days: agg.payable_days,
            earned_gross: b.earned_gross,
            basic: b.basic,
            da: b.da,
            hra: b.hra,
            bonus: b.bonus,
            other_allowance: b.other_allowance,
            ot: b.ot,
            total_earnings: b.total_earnings,
            epf: b.epf,
            esi: b.esi,
            prof_tax: b.prof_tax,
            other_deduction: b.other_deduction,
            total_deduction: b.total_deduction,
            net_salary: b.net_salary,
        }
    }

    fn to_cells(&self) -> [Decimal; 21] {
        [
            self.present_days,
            self.paid_holiday,
            self.week_off,
            self.on_duty,
            self.casual_leave,
            self.loss_of_pay,
            self.payable_days,
            self.earned_gross,
            self.basic,
            self.da,
            self.hra,
            self.bonus,
            self.other_allowance,
            self.ot,
            self.total_earnings,
            self.epf,
            self.esi,
            self.prof_tax,
            self.other_deduction,
            self.total_deduction,
            self.net_salary,
        ]
    }

    fn from_cells(cells: [Decimal; 21]) -> Self {
        let [
            present_days,
            paid_holiday,
            week_off,
            on_duty,
            casual_leave,
            loss_of_pay,
            payable_days,
            earned_gross,
            basic,
            da,
            hra,
            bonus,
            other_allowance,
            ot,
            total_earnings,
            epf,
            esi,
            prof_tax,
            other_deduction,
            total_deduction,
            net_salary,
        ] = cells;
        Self {
            present_days,
            paid_holiday,
            week_off,
            on_duty,
            casual_leave,
            loss_of_pay,
            payable_days,
            earned_gross,
            basic,
            da,
            hra,
            bonus,
            other_allowance,
            ot,
            total_earnings,
            epf,
            esi,
            prof_tax,
            other_deduction,
            total_deduction,
            net_salary,
        }
    }
}

/// One employee row read back from a register.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterRow {
    /// The row's serial number.
    pub serial: u32,
    /// Profile rebuilt from the identity and adjustment columns.
    pub profile: EmployeeProfile,
    /// The day cells, classified.
    pub attendance: Vec<AttendanceCode>,
    /// Figures as the register states them.
    pub figures: RegisterFigures,
}

/// True for text a spreadsheet would evaluate, or that already starts with
/// the guard quote and would otherwise lose it on import.
fn needs_formula_guard(value: &str) -> bool {
    matches!(value.chars().next(), Some('=' | '+' | '-' | '@' | '\''))
}

/// Prefixes text that a spreadsheet would evaluate as a formula.
fn guard_text(value: &str) -> String {
    if needs_formula_guard(value) {
        format!("'{}", value)
    } else {
        value.to_string()
    }
}

/// Reverses [`guard_text`].
fn unguard_text(value: &str) -> &str {
    match value.strip_prefix('\'') {
        Some(rest) if needs_formula_guard(rest) => rest,
        _ => value,
    }
}
