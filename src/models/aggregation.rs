//! Attendance aggregation result model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Day counts derived from one employee's attendance for one month.
///
/// Counts are decimals because half-day codes contribute 0.5. The six
/// category buckets never sum to more than `total_days`. Unmarked days are
/// excluded from every bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationResult {
    /// Calendar days in the month.
    pub total_days: u32,
    /// Worked days, including worked halves of half-day codes.
    pub present_days: Decimal,
    /// Paid-holiday days.
    pub paid_holiday: Decimal,
    /// Weekly-off days, worked or not.
    pub week_off: Decimal,
    /// On-duty and work-from-home days.
    pub on_duty: Decimal,
    /// Casual leave paid from the balance.
    pub casual_leave: Decimal,
    /// Unpaid days, including any casual-leave overdraft.
    pub loss_of_pay: Decimal,
    /// Days the employee is paid for.
    pub payable_days: Decimal,
    /// Days with no attendance mark.
    pub unmarked_days: u32,
    /// Casual leave recorded in the month, before the overdraft moved to LOP.
    pub casual_leave_taken: Decimal,
    /// Casual-leave balance at the start of the month.
    pub opening_cl: Decimal,
    /// Balance after this month's leave. Negative once the balance is exceeded.
    pub closing_cl: Decimal,
}

impl AggregationResult {
    /// Sum of the six category buckets.
    pub fn accounted_days(&self) -> Decimal {
        self.present_days
            + self.paid_holiday
            + self.week_off
            + self.on_duty
            + self.casual_leave
            + self.loss_of_pay
    }

    /// Casual leave charged to loss of pay because the balance ran out.
    pub fn leave_overdraft(&self) -> Decimal {
        self.casual_leave_taken - self.casual_leave
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample() -> AggregationResult {
        AggregationResult {
            total_days: 31,
            present_days: dec("19"),
            paid_holiday: dec("0"),
            week_off: dec("2"),
            on_duty: dec("0"),
            casual_leave: dec("8"),
            loss_of_pay: dec("2"),
            payable_days: dec("29"),
            unmarked_days: 0,
            casual_leave_taken: dec("10"),
            opening_cl: dec("8"),
            closing_cl: dec("-2"),
        }
    }

    #[test]
    fn test_accounted_days_sums_buckets() {
        assert_eq!(sample().accounted_days(), dec("31"));
    }

    #[test]
    fn test_leave_overdraft() {
        assert_eq!(sample().leave_overdraft(), dec("2"));
    }

    #[test]
    fn test_serializes_counts_as_strings() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert!(json.contains("\"payable_days\":\"29\""));
        assert!(json.contains("\"closing_cl\":\"-2\""));
        assert!(json.contains("\"total_days\":31"));
    }
}
