//! Calculation logic for the payroll engine.
//!
//! This module contains the attendance classifier, the attendance
//! aggregator, precision-safe money arithmetic, the salary calculator and
//! the pipeline that chains them for one employee or a whole month.
//!
//! All functions here are pure: no I/O, no clock, no shared state. They can
//! be called concurrently for different employees without coordination.

mod aggregator;
mod classifier;
pub mod decimal;
mod payroll;
mod pipeline;

pub use aggregator::aggregate;
pub use classifier::{classify, classify_all, is_recognized};
pub use payroll::{
    EpfContribution, EsiContribution, compute_salary, epf_contribution, esi_contribution,
};
pub use pipeline::{PayrollInput, compute_batch, compute_payroll, partition_results};
