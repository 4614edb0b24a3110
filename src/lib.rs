//! Monthly attendance aggregation and payroll engine.
//!
//! This crate turns a month of per-day attendance codes and an employee's
//! salary profile into attendance totals, a casual-leave ledger and a full
//! salary breakdown with statutory EPF, ESI and professional-tax
//! deductions. All money is carried as [`rust_decimal::Decimal`] and rounded
//! half away from zero to two places at defined points.
//!
//! - [`calculation`] holds the pure engine: classifier, aggregator, money
//!   arithmetic, salary calculator and the per-employee pipeline.
//! - [`config`] loads the policy tables (salary split, statutory rates,
//!   professional-tax slabs) from YAML.
//! - [`report`] reshapes computed records into tabular views.
//! - [`register`] exports and imports the spreadsheet register.
//! - [`api`] serves the engine over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod register;
pub mod report;
