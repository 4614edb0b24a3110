//! Configuration loading and management for the payroll engine.
//!
//! This module loads the payroll policy tables from YAML files: the
//! salary split, attendance-counting policy, statutory EPF/ESI rates and
//! the professional-tax slabs.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/default").unwrap();
//! println!("EPF ceiling: {}", loader.config().epf().wage_ceiling);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AttendancePolicy, DEFAULT_BASIC_PERCENT, DEFAULT_DA_PERCENT, DEFAULT_EPF_EMPLOYEE_RATE,
    DEFAULT_EPF_EMPLOYER_RATE, DEFAULT_EPF_WAGE_CEILING, DEFAULT_ESI_EMPLOYEE_RATE,
    DEFAULT_ESI_EMPLOYER_RATE, DEFAULT_ESI_WAGE_CEILING, DEFAULT_HRA_PERCENT, DEFAULT_OPENING_CL,
    EngineConfig, EpfConfig, EsiConfig, HalfDayRemainder, PayrollPolicy, ProfessionalTaxConfig,
    ProfessionalTaxSlab, SalarySplit, StatutoryConfig, ZeroAttendancePolicy,
};
