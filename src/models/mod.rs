//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod aggregation;
mod attendance_code;
mod employee;
mod month;
mod payroll;

pub use aggregation::AggregationResult;
pub use attendance_code::AttendanceCode;
pub use employee::{EmployeeProfile, MAX_AMOUNT, UNASSIGNED_DEPARTMENT};
pub use month::{MonthContext, MonthId};
pub use payroll::{EmployerContributions, PayrollBreakdown, PayrollRecord};
