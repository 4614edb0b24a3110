//! Month context model.
//!
//! This module contains the [`MonthContext`] type: the active month's
//! identity, its ordered calendar dates and their weekday labels.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The month an attendance record and payroll run belong to.
///
/// # Example
///
/// ```
/// use payroll_engine::models::MonthContext;
///
/// let month = MonthContext::new(2024, 2).unwrap();
/// assert_eq!(month.days_in_month(), 29);
/// assert_eq!(month.weekday_labels()[0], "Thu");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthContext {
    year: i32,
    month: u32,
    dates: Vec<NaiveDate>,
    weekday_labels: Vec<String>,
}

impl MonthContext {
    /// Builds the calendar for `year`-`month`.
    ///
    /// Returns `InvalidMonth` when the pair does not name a calendar month.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or(EngineError::InvalidMonth { year, month })?;

        let dates: Vec<NaiveDate> = first
            .iter_days()
            .take_while(|date| date.month() == month)
            .collect();
        let weekday_labels = dates
            .iter()
            .map(|date| weekday_label(date.weekday()).to_string())
            .collect();

        Ok(Self {
            year,
            month,
            dates,
            weekday_labels,
        })
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The month number, 1-12.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Every date of the month in order.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Three-letter weekday label for each date.
    pub fn weekday_labels(&self) -> &[String] {
        &self.weekday_labels
    }

    /// Number of calendar days, 28-31.
    pub fn days_in_month(&self) -> u32 {
        self.dates.len() as u32
    }

    /// Register column headings, one per day (e.g. `"1 Mon"`).
    pub fn day_headers(&self) -> Vec<String> {
        self.dates
            .iter()
            .zip(&self.weekday_labels)
            .map(|(date, label)| format!("{} {}", date.day(), label))
            .collect()
    }
}

fn weekday_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

/// Year/month pair as carried in requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthId {
    /// The calendar year.
    pub year: i32,
    /// The month number, 1-12.
    pub month: u32,
}

impl TryFrom<MonthId> for MonthContext {
    type Error = EngineError;

    fn try_from(id: MonthId) -> EngineResult<Self> {
        MonthContext::new(id.year, id.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_in_month_for_each_length() {
        assert_eq!(MonthContext::new(2025, 1).unwrap().days_in_month(), 31);
        assert_eq!(MonthContext::new(2025, 4).unwrap().days_in_month(), 30);
        assert_eq!(MonthContext::new(2025, 2).unwrap().days_in_month(), 28);
        assert_eq!(MonthContext::new(2024, 2).unwrap().days_in_month(), 29);
        assert_eq!(MonthContext::new(2025, 12).unwrap().days_in_month(), 31);
    }

    #[test]
    fn test_dates_are_ordered_and_complete() {
        let month = MonthContext::new(2025, 3).unwrap();
        let dates = month.dates();

        assert_eq!(dates.first(), NaiveDate::from_ymd_opt(2025, 3, 1).as_ref());
        assert_eq!(dates.last(), NaiveDate::from_ymd_opt(2025, 3, 31).as_ref());
        assert!(dates.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_weekday_labels() {
        // 1 March 2025 was a Saturday
        let month = MonthContext::new(2025, 3).unwrap();
        assert_eq!(&month.weekday_labels()[..3], ["Sat", "Sun", "Mon"]);
        assert_eq!(month.weekday_labels().len(), 31);
    }

    #[test]
    fn test_day_headers() {
        let month = MonthContext::new(2025, 3).unwrap();
        let headers = month.day_headers();
        assert_eq!(headers[0], "1 Sat");
        assert_eq!(headers[30], "31 Mon");
    }

    #[test]
    fn test_invalid_month_rejected() {
        match MonthContext::new(2025, 13) {
            Err(EngineError::InvalidMonth { year, month }) => {
                assert_eq!(year, 2025);
                assert_eq!(month, 13);
            }
            _ => panic!("Expected InvalidMonth error"),
        }
        assert!(MonthContext::new(2025, 0).is_err());
    }

    #[test]
    fn test_month_id_conversion() {
        let id = MonthId {
            year: 2025,
            month: 6,
        };
        let month = MonthContext::try_from(id).unwrap();
        assert_eq!(month.year(), 2025);
        assert_eq!(month.month(), 6);
        assert_eq!(month.days_in_month(), 30);
    }
}
