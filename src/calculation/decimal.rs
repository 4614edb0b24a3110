//! Precision-safe money arithmetic.
//!
//! Every monetary step in the engine goes through these functions. Each
//! operation rounds its own result to [`MONEY_SCALE`] places using
//! round-half-away-from-zero, so chained operations cannot drift.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{EngineError, EngineResult};

/// Decimal places kept on every monetary value.
pub const MONEY_SCALE: u32 = 2;

/// Rounds `value` to `decimals` places, half away from zero.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::decimal::round;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let value = Decimal::from_str("2.005").unwrap();
/// assert_eq!(round(value, 2), Decimal::from_str("2.01").unwrap());
/// ```
pub fn round(value: Decimal, decimals: u32) -> Decimal {
    value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds `value` to the money scale.
pub fn round_money(value: Decimal) -> Decimal {
    round(value, MONEY_SCALE)
}

fn overflow(operation: &str) -> EngineError {
    EngineError::Overflow {
        operation: operation.to_string(),
    }
}

/// Returns `a + b` at money precision.
///
/// Fails with `Overflow` when the sum leaves the decimal range.
pub fn add(a: Decimal, b: Decimal) -> EngineResult<Decimal> {
    a.checked_add(b)
        .map(round_money)
        .ok_or_else(|| overflow("add"))
}

/// Returns `a - b` at money precision.
///
/// Fails with `Overflow` when the difference leaves the decimal range.
pub fn subtract(a: Decimal, b: Decimal) -> EngineResult<Decimal> {
    a.checked_sub(b)
        .map(round_money)
        .ok_or_else(|| overflow("subtract"))
}

/// Returns `a * b` at money precision.
///
/// Fails with `Overflow` when the product leaves the decimal range.
pub fn multiply(a: Decimal, b: Decimal) -> EngineResult<Decimal> {
    a.checked_mul(b)
        .map(round_money)
        .ok_or_else(|| overflow("multiply"))
}

/// Returns `a / b` at money precision.
///
/// Fails with `DivisionByZero` when `b` is zero.
pub fn divide(a: Decimal, b: Decimal) -> EngineResult<Decimal> {
    if b.is_zero() {
        return Err(EngineError::DivisionByZero { dividend: a });
    }
    a.checked_div(b)
        .map(round_money)
        .ok_or_else(|| overflow("divide"))
}

/// Returns `percent`% of `value` at money precision.
///
/// The factor `percent / 100` is exact and is not rounded on its own, so
/// fractional rates such as 0.75% keep their full value.
pub fn percentage(value: Decimal, percent: Decimal) -> EngineResult<Decimal> {
    let factor = percent
        .checked_div(Decimal::ONE_HUNDRED)
        .ok_or_else(|| overflow("percentage"))?;
    multiply(value, factor)
}

/// Sums `values`, rounding after each addition.
pub fn sum<I>(values: I) -> EngineResult<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    values.into_iter().try_fold(Decimal::ZERO, add)
}
