//! Report views over computed payroll records.
//!
//! Every view here reshapes, filters or sorts figures that the aggregator
//! and payroll calculator already derived. The only arithmetic is ratios and
//! rollup sums, and those go through [`crate::calculation::decimal`].

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::decimal::{add, divide, multiply};
use crate::error::EngineResult;
use crate::models::PayrollRecord;

/// Attendance percentage for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRow {
    /// Employee identifier.
    pub emp_id: String,
    /// Display name.
    pub name: String,
    /// Present plus on-duty days.
    pub days_attended: Decimal,
    /// Calendar days in the month.
    pub days_in_month: u32,
    /// `days_attended / days_in_month * 100`, 2 places.
    pub attendance_percent: Decimal,
}

/// Where an employee's casual-leave balance stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    /// Some balance remains.
    Available,
    /// Balance used exactly.
    Exhausted,
    /// More leave taken than the balance allowed.
    Exceeded,
}

/// Casual-leave balance for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveBalanceRow {
    /// Employee identifier.
    pub emp_id: String,
    /// Display name.
    pub name: String,
    /// Balance at the start of the month.
    pub opening_cl: Decimal,
    /// Casual leave recorded this month.
    pub taken: Decimal,
    /// Signed closing balance.
    pub closing_cl: Decimal,
    /// Balance status.
    pub status: LeaveStatus,
}

/// EPF/ESI filing row for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatutoryRow {
    /// Employee identifier.
    pub emp_id: String,
    /// Display name.
    pub name: String,
    /// Provident fund account number.
    pub epf_no: Option<String>,
    /// State insurance number.
    pub esi_no: Option<String>,
    /// EPF wage after the ceiling.
    pub epf_wage: Decimal,
    /// Employee EPF share.
    pub epf_employee: Decimal,
    /// Employer EPF share.
    pub epf_employer: Decimal,
    /// Earned gross, the ESI wage.
    pub esi_wage: Decimal,
    /// Employee ESI share.
    pub esi_employee: Decimal,
    /// Employer ESI share.
    pub esi_employer: Decimal,
}

/// Loss-of-pay figures for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsenteeismRow {
    /// Employee identifier.
    pub emp_id: String,
    /// Display name.
    pub name: String,
    /// Department for the row.
    pub department: String,
    /// Unpaid days.
    pub loss_of_pay: Decimal,
    /// Days with no mark.
    pub unmarked_days: u32,
}

/// Per-department totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentRollup {
    /// Department name.
    pub department: String,
    /// Number of employees.
    pub headcount: u32,
    /// Sum of earned gross.
    pub total_earned_gross: Decimal,
    /// Sum of total deductions.
    pub total_deduction: Decimal,
    /// Sum of net salary.
    pub total_net_salary: Decimal,
    /// Mean net salary.
    pub average_net_salary: Decimal,
    /// Mean payable days.
    pub average_payable_days: Decimal,
}

/// All views for one payroll run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportBundle {
    /// Attendance percentage per employee.
    pub attendance: Vec<AttendanceRow>,
    /// Leave balance per employee.
    pub leave_balance: Vec<LeaveBalanceRow>,
    /// EPF/ESI filing rows.
    pub statutory_compliance: Vec<StatutoryRow>,
    /// Employees by loss of pay, highest first.
    pub absenteeism: Vec<AbsenteeismRow>,
    /// Department totals.
    pub departments: Vec<DepartmentRollup>,
}

/// Attendance percentage per employee, in input order.
pub fn attendance_percentage(records: &[PayrollRecord]) -> EngineResult<Vec<AttendanceRow>> {
    records
        .iter()
        .map(|record| -> EngineResult<AttendanceRow> {
            let agg = &record.aggregation;
            let days_attended = agg.present_days + agg.on_duty;
            let attendance_percent = divide(
                multiply(days_attended, Decimal::ONE_HUNDRED)?,
                Decimal::from(record.days_in_month),
            )?;
            Ok(AttendanceRow {
                emp_id: record.profile.emp_id.clone(),
                name: record.profile.name.clone(),
                days_attended,
                days_in_month: record.days_in_month,
                attendance_percent,
            })
        })
        .collect()
}

/// Casual-leave balance per employee, in input order.
pub fn leave_balance(records: &[PayrollRecord]) -> Vec<LeaveBalanceRow> {
    records
        .iter()
        .map(|record| {
            let agg = &record.aggregation;
            let status = if agg.closing_cl > Decimal::ZERO {
                LeaveStatus::Available
            } else if agg.closing_cl.is_zero() {
                LeaveStatus::Exhausted
            } else {
                LeaveStatus::Exceeded
            };
            LeaveBalanceRow {
                emp_id: record.profile.emp_id.clone(),
                name: record.profile.name.clone(),
                opening_cl: agg.opening_cl,
                taken: agg.casual_leave_taken,
                closing_cl: agg.closing_cl,
                status,
            }
        })
        .collect()
}

/// EPF/ESI rows for employees with any statutory deduction this month.
pub fn statutory_compliance(records: &[PayrollRecord]) -> Vec<StatutoryRow> {
    records
        .iter()
        .filter(|record| !record.breakdown.epf.is_zero() || !record.breakdown.esi.is_zero())
        .map(|record| {
            let b = &record.breakdown;
            StatutoryRow {
                emp_id: record.profile.emp_id.clone(),
                name: record.profile.name.clone(),
                epf_no: record.profile.epf_no.clone(),
                esi_no: record.profile.esi_no.clone(),
                epf_wage: b.epf_wage,
                epf_employee: b.epf,
                epf_employer: b.employer_contributions.epf,
                esi_wage: if b.esi_applicable {
                    b.earned_gross
                } else {
                    Decimal::ZERO
                },
                esi_employee: b.esi,
                esi_employer: b.employer_contributions.esi,
            }
        })
        .collect()
}

/// Employees sorted by loss of pay, highest first, ties by employee id.
pub fn absenteeism(records: &[PayrollRecord]) -> Vec<AbsenteeismRow> {
    let mut rows: Vec<AbsenteeismRow> = records
        .iter()
        .map(|record| AbsenteeismRow {
            emp_id: record.profile.emp_id.clone(),
            name: record.profile.name.clone(),
            department: record.profile.department().to_string(),
            loss_of_pay: record.aggregation.loss_of_pay,
            unmarked_days: record.aggregation.unmarked_days,
        })
        .collect();
    rows.sort_by(|a, b| {
        b.loss_of_pay
            .cmp(&a.loss_of_pay)
            .then_with(|| a.emp_id.cmp(&b.emp_id))
    });
    rows
}

/// Totals per department, ordered by department name.
pub fn department_rollup(records: &[PayrollRecord]) -> EngineResult<Vec<DepartmentRollup>> {
    let mut groups: BTreeMap<&str, Vec<&PayrollRecord>> = BTreeMap::new();
    for record in records {
        groups
            .entry(record.profile.department())
            .or_default()
            .push(record);
    }

    groups
        .into_iter()
        .map(|(department, members)| -> EngineResult<DepartmentRollup> {
            let headcount = Decimal::from(members.len());
            let mut total_earned_gross = Decimal::ZERO;
            let mut total_deduction = Decimal::ZERO;
            let mut total_net_salary = Decimal::ZERO;
            let mut total_payable_days = Decimal::ZERO;
            for record in &members {
                total_earned_gross = add(total_earned_gross, record.breakdown.earned_gross)?;
                total_deduction = add(total_deduction, record.breakdown.total_deduction)?;
                total_net_salary = add(total_net_salary, record.breakdown.net_salary)?;
                total_payable_days += record.aggregation.payable_days;
            }

            Ok(DepartmentRollup {
                department: department.to_string(),
                headcount: members.len() as u32,
                total_earned_gross,
                total_deduction,
                total_net_salary,
                average_net_salary: divide(total_net_salary, headcount)?,
                average_payable_days: divide(total_payable_days, headcount)?,
            })
        })
        .collect()
}

/// Builds every view for one payroll run.
pub fn build_reports(records: &[PayrollRecord]) -> EngineResult<ReportBundle> {
    Ok(ReportBundle {
        attendance: attendance_percentage(records)?,
        leave_balance: leave_balance(records),
        statutory_compliance: statutory_compliance(records),
        absenteeism: absenteeism(records),
        departments: department_rollup(records)?,
    })
}
