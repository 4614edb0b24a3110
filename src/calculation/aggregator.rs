//! Attendance aggregation.
//!
//! This module turns one employee's month of [`AttendanceCode`]s into
//! category day counts and payable days.
//!
//! # Counting rules
//!
//! | Code            | Counted as                                        |
//! |-----------------|---------------------------------------------------|
//! | `P`             | 1 present                                         |
//! | `A`             | 1 loss of pay                                     |
//! | `CL`            | 1 casual leave                                    |
//! | `HCL`           | 0.5 casual leave + 0.5 per policy remainder       |
//! | `HP`, `HL`      | 0.5 present + 0.5 loss of pay                     |
//! | `WO`, `WW`      | 1 week off                                        |
//! | `PH`            | 1 paid holiday                                    |
//! | `PHW` / `pH`    | 0.5 paid holiday + 0.5 per policy remainder       |
//! | `OD`, `WFH`     | 1 on duty                                         |
//! | empty           | unmarked, excluded from every bucket              |
//!
//! Casual leave beyond the opening balance moves to loss of pay before
//! payable days are computed.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::{AttendancePolicy, HalfDayRemainder};
use crate::error::{EngineError, EngineResult};
use crate::models::{AggregationResult, AttendanceCode};

const HALF: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

#[derive(Default)]
struct Tally {
    present: Decimal,
    paid_holiday: Decimal,
    week_off: Decimal,
    on_duty: Decimal,
    casual_leave: Decimal,
    loss_of_pay: Decimal,
    unmarked: u32,
}

impl Tally {
    fn add_remainder(&mut self, remainder: HalfDayRemainder) {
        match remainder {
            HalfDayRemainder::Present => self.present += HALF,
            HalfDayRemainder::LossOfPay => self.loss_of_pay += HALF,
            HalfDayRemainder::Excluded => {}
        }
    }

    fn record(&mut self, code: AttendanceCode, policy: &AttendancePolicy) {
        match code {
            AttendanceCode::Present => self.present += Decimal::ONE,
            AttendanceCode::Absent => self.loss_of_pay += Decimal::ONE,
            AttendanceCode::CasualLeave => self.casual_leave += Decimal::ONE,
            AttendanceCode::HalfCasualLeave => {
                self.casual_leave += HALF;
                self.add_remainder(policy.half_casual_leave_remainder);
            }
            AttendanceCode::HalfPresent | AttendanceCode::HalfLeave => {
                self.present += HALF;
                self.loss_of_pay += HALF;
            }
            AttendanceCode::WeekOff | AttendanceCode::WorkedWeekOff => {
                self.week_off += Decimal::ONE
            }
            AttendanceCode::PaidHoliday => self.paid_holiday += Decimal::ONE,
            AttendanceCode::WorkedPaidHoliday => {
                self.paid_holiday += HALF;
                self.add_remainder(policy.worked_paid_holiday_remainder);
            }
            AttendanceCode::OnDuty | AttendanceCode::WorkFromHome => {
                self.on_duty += Decimal::ONE
            }
            AttendanceCode::Empty => self.unmarked += 1,
        }
    }
}

/// Aggregates one month of attendance.
///
/// # Arguments
///
/// * `codes` - One code per calendar day, in date order
/// * `opening_cl` - Casual-leave balance at the start of the month; a
///   negative balance counts as zero
/// * `days_in_month` - Calendar days in the month
/// * `policy` - Where the non-leave halves of half-day codes are counted
///
/// # Errors
///
/// Returns `ShapeMismatch` when `codes.len()` differs from `days_in_month`.
/// Sequences are never truncated or padded.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{aggregate, classify_all};
/// use payroll_engine::config::AttendancePolicy;
/// use rust_decimal::Decimal;
///
/// let mut tokens = vec!["P"; 25];
/// tokens.extend(["WO"; 4]);
/// tokens.extend(["CL"; 2]);
/// let codes = classify_all(tokens);
///
/// let result = aggregate(&codes, Decimal::new(8, 0), 31, &AttendancePolicy::default()).unwrap();
/// assert_eq!(result.payable_days, Decimal::new(31, 0));
/// assert_eq!(result.closing_cl, Decimal::new(6, 0));
/// ```
pub fn aggregate(
    codes: &[AttendanceCode],
    opening_cl: Decimal,
    days_in_month: u32,
    policy: &AttendancePolicy,
) -> EngineResult<AggregationResult> {
    if codes.len() != days_in_month as usize {
        return Err(EngineError::ShapeMismatch {
            expected: days_in_month as usize,
            actual: codes.len(),
        });
    }

    let mut tally = Tally::default();
    for &code in codes {
        tally.record(code, policy);
    }

    let opening_cl = opening_cl.max(Decimal::ZERO);
    let casual_leave_taken = tally.casual_leave;
    let paid_casual_leave = casual_leave_taken.min(opening_cl);
    let overdraft = casual_leave_taken - paid_casual_leave;
    if overdraft > Decimal::ZERO {
        debug!(
            casual_leave_taken = %casual_leave_taken,
            opening_cl = %opening_cl,
            overdraft = %overdraft,
            "Casual leave overdraft charged as loss of pay"
        );
    }
    let loss_of_pay = tally.loss_of_pay + overdraft;

    let payable_days = tally.present
        + tally.paid_holiday
        + tally.week_off
        + tally.on_duty
        + paid_casual_leave;

    Ok(AggregationResult {
        total_days: days_in_month,
        present_days: tally.present,
        paid_holiday: tally.paid_holiday,
        week_off: tally.week_off,
        on_duty: tally.on_duty,
        casual_leave: paid_casual_leave,
        loss_of_pay,
        payable_days,
        unmarked_days: tally.unmarked,
        casual_leave_taken,
        opening_cl,
        closing_cl: opening_cl - casual_leave_taken,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::classify_all;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn month_of(parts: &[(&str, usize)]) -> Vec<AttendanceCode> {
        let tokens: Vec<&str> = parts
            .iter()
            .flat_map(|(token, count)| std::iter::repeat(*token).take(*count))
            .collect();
        classify_all(tokens)
    }

    fn policy() -> AttendancePolicy {
        AttendancePolicy::default()
    }

    /// AG-001: full month with leave inside the balance
    #[test]
    fn test_full_month_with_casual_leave() {
        let codes = month_of(&[("P", 25), ("WO", 4), ("CL", 2)]);
        let result = aggregate(&codes, dec("8"), 31, &policy()).unwrap();

        assert_eq!(result.present_days, dec("25"));
        assert_eq!(result.week_off, dec("4"));
        assert_eq!(result.casual_leave, dec("2"));
        assert_eq!(result.loss_of_pay, dec("0"));
        assert_eq!(result.payable_days, dec("31"));
        assert_eq!(result.closing_cl, dec("6"));
    }

    /// AG-002: leave beyond the balance becomes loss of pay
    #[test]
    fn test_overdraft_reclassified_to_loss_of_pay() {
        let codes = month_of(&[("P", 19), ("WO", 2), ("CL", 10)]);
        let result = aggregate(&codes, dec("8"), 31, &policy()).unwrap();

        assert_eq!(result.casual_leave_taken, dec("10"));
        assert_eq!(result.casual_leave, dec("8"));
        assert_eq!(result.loss_of_pay, dec("2"));
        assert_eq!(result.payable_days, dec("29"));
        assert_eq!(result.closing_cl, dec("-2"));
        assert_eq!(result.leave_overdraft(), dec("2"));
        assert_eq!(result.accounted_days(), dec("31"));
    }

    /// AG-003: half-day codes contribute fractions
    #[test]
    fn test_half_day_codes() {
        let codes = month_of(&[("HP", 2), ("HL", 2), ("HCL", 2), ("PHW", 1), ("pH", 1), ("P", 22)]);
        let result = aggregate(&codes, dec("8"), 30, &policy()).unwrap();

        // HP/HL: 4 x 0.5 present; HCL remainder: 2 x 0.5; PHW remainder: 2 x 0.5
        assert_eq!(result.present_days, dec("26"));
        assert_eq!(result.loss_of_pay, dec("2"));
        assert_eq!(result.casual_leave, dec("1"));
        assert_eq!(result.paid_holiday, dec("1"));
        assert_eq!(result.payable_days, dec("28"));
        assert_eq!(result.accounted_days(), dec("30"));
    }

    #[test]
    fn test_half_day_remainder_policy_loss_of_pay() {
        let policy = AttendancePolicy {
            half_casual_leave_remainder: HalfDayRemainder::LossOfPay,
            worked_paid_holiday_remainder: HalfDayRemainder::Excluded,
            ..AttendancePolicy::default()
        };
        let codes = month_of(&[("HCL", 2), ("PHW", 2), ("P", 24)]);
        let result = aggregate(&codes, dec("8"), 28, &policy).unwrap();

        assert_eq!(result.casual_leave, dec("1"));
        assert_eq!(result.loss_of_pay, dec("1"));
        assert_eq!(result.paid_holiday, dec("1"));
        assert_eq!(result.present_days, dec("24"));
        assert_eq!(result.payable_days, dec("26"));
        assert_eq!(result.accounted_days(), dec("27"));
    }

    #[test]
    fn test_other_codes_map_to_buckets() {
        let codes = month_of(&[("WW", 1), ("OD", 2), ("WFH", 3), ("PH", 1), ("A", 1), ("P", 20)]);
        let result = aggregate(&codes, dec("8"), 28, &policy()).unwrap();

        assert_eq!(result.week_off, dec("1"));
        assert_eq!(result.on_duty, dec("5"));
        assert_eq!(result.paid_holiday, dec("1"));
        assert_eq!(result.loss_of_pay, dec("1"));
        assert_eq!(result.payable_days, dec("27"));
    }

    #[test]
    fn test_unmarked_days_excluded_from_buckets() {
        let codes = month_of(&[("P", 20), ("", 5), ("??", 5)]);
        let result = aggregate(&codes, dec("8"), 30, &policy()).unwrap();

        assert_eq!(result.unmarked_days, 10);
        assert_eq!(result.accounted_days(), dec("20"));
        assert_eq!(result.payable_days, dec("20"));
        assert_eq!(result.total_days, 30);
    }

    #[test]
    fn test_half_casual_leave_overdraft() {
        let codes = month_of(&[("HCL", 3), ("P", 27)]);
        let result = aggregate(&codes, dec("1"), 30, &policy()).unwrap();

        assert_eq!(result.casual_leave_taken, dec("1.5"));
        assert_eq!(result.casual_leave, dec("1"));
        assert_eq!(result.loss_of_pay, dec("0.5"));
        assert_eq!(result.payable_days, dec("29.5"));
        assert_eq!(result.closing_cl, dec("-0.5"));
    }

    #[test]
    fn test_negative_opening_balance_counts_as_zero() {
        let codes = month_of(&[("CL", 2), ("P", 26)]);
        let result = aggregate(&codes, dec("-3"), 28, &policy()).unwrap();

        assert_eq!(result.opening_cl, dec("0"));
        assert_eq!(result.casual_leave, dec("0"));
        assert_eq!(result.loss_of_pay, dec("2"));
        assert_eq!(result.payable_days, dec("26"));
    }

    #[test]
    fn test_shape_mismatch_too_short() {
        let codes = month_of(&[("P", 30)]);
        match aggregate(&codes, dec("8"), 31, &policy()) {
            Err(EngineError::ShapeMismatch { expected, actual }) => {
                assert_eq!(expected, 31);
                assert_eq!(actual, 30);
            }
            other => panic!("Expected ShapeMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_shape_mismatch_too_long() {
        let codes = month_of(&[("P", 29)]);
        assert!(matches!(
            aggregate(&codes, dec("8"), 28, &policy()),
            Err(EngineError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let codes = month_of(&[("P", 15), ("HL", 3), ("CL", 9), ("WO", 4)]);
        let first = aggregate(&codes, dec("8"), 31, &policy()).unwrap();
        let second = aggregate(&codes, dec("8"), 31, &policy()).unwrap();
        assert_eq!(first, second);
    }
}
