//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while aggregating attendance,
//! computing salaries, or moving registers in and out of spreadsheet form.

use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the payroll engine.
///
/// Every failure is returned as one of these variants rather than a partial
/// or zeroed value, so a caller can always tell "zero salary" apart from
/// "computation failed".
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::ShapeMismatch {
///     expected: 31,
///     actual: 30,
/// };
/// assert_eq!(
///     error.to_string(),
///     "Attendance has 30 entries but the month has 31 days"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds values the engine cannot use.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// What was wrong with the configuration.
        message: String,
    },

    /// The attendance sequence length differs from the month's day count.
    #[error("Attendance has {actual} entries but the month has {expected} days")]
    ShapeMismatch {
        /// Days in the month.
        expected: usize,
        /// Entries actually supplied.
        actual: usize,
    },

    /// A division had a zero divisor.
    #[error("Division by zero: {dividend} / 0")]
    DivisionByZero {
        /// The value that was being divided.
        dividend: Decimal,
    },

    /// A money operation produced a value outside the decimal range.
    #[error("Arithmetic overflow in {operation}")]
    Overflow {
        /// The operation that overflowed.
        operation: String,
    },

    /// An employee profile was rejected before aggregation.
    #[error("Invalid profile field '{field}': {message}")]
    InvalidProfile {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A year/month pair does not name a calendar month.
    #[error("Invalid month: {year}-{month:02}")]
    InvalidMonth {
        /// The requested year.
        year: i32,
        /// The requested month number.
        month: u32,
    },

    /// A spreadsheet register could not be read back.
    #[error("Register import failed at line {line}: {message}")]
    RegisterImport {
        /// The 1-based line of the offending record.
        line: u64,
        /// A description of the problem.
        message: String,
    },

    /// A spreadsheet register could not be written.
    #[error("Register export failed: {message}")]
    RegisterExport {
        /// A description of the problem.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
