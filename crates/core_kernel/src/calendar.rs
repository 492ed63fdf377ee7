//! Calendar arithmetic for monthly charge scheduling
//!
//! Installment dates advance in calendar months while preserving the
//! day-of-month where the target month allows it, falling back to the last
//! day of shorter months. Reporting groups charges into `YYYY-MM` buckets.

use chrono::{Datelike, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors related to calendar operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalendarError {
    #[error("Invalid month: {0} (expected 1-12)")]
    InvalidMonth(u32),

    #[error("Invalid day of month: {0}")]
    InvalidDay(u32),

    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),
}

/// Returns the last valid day of the given month
pub fn last_day_of_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .expect("first of month is always a valid date")
        .pred_opt()
        .expect("first of month has a predecessor")
        .day()
}

/// Builds a date from year/month with the day clamped to the month's length
///
/// `clamp_to_month(2025, 2, 31)` is February 28th 2025.
pub fn clamp_to_month(year: i32, month: u32, day: u32) -> NaiveDate {
    let day = day.min(last_day_of_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day)
        .expect("clamped day is always a valid date")
}

/// Advances a date by whole calendar months, clamping the day when the
/// target month is shorter than the source day-of-month.
pub fn add_months_clamped(date: NaiveDate, months: u32) -> NaiveDate {
    let zero_based = date.year() * 12 + date.month0() as i32 + months as i32;
    let year = zero_based.div_euclid(12);
    let month = zero_based.rem_euclid(12) as u32 + 1;
    clamp_to_month(year, month, date.day())
}

/// Returns the `YYYY-MM` reporting bucket for a charge date
pub fn month_bucket(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// A calendar month used as a reporting period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    /// Creates a period, validating the month
    pub fn new(year: i32, month: u32) -> Result<Self, CalendarError> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidMonth(month));
        }
        Ok(Self { year, month })
    }

    /// The period containing the given date
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// First day of the period
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .expect("validated month always yields a first day")
    }

    /// First day of the following period (exclusive upper bound for
    /// charge-date range queries)
    pub fn first_day_of_next(&self) -> NaiveDate {
        add_months_clamped(self.first_day(), 1)
    }

    /// Returns true if the date falls inside this period
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first_day() && date < self.first_day_of_next()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Business-date clock for sweep and overdue decisions
///
/// "Today" for a back office is the calendar date in the operator's
/// timezone, not UTC; a policy expiring yesterday must be swept even while
/// UTC is still on the previous day.
#[derive(Debug, Clone, Copy)]
pub struct BusinessCalendar {
    tz: Tz,
}

impl BusinessCalendar {
    /// Creates a calendar for an IANA timezone name
    pub fn from_name(name: &str) -> Result<Self, CalendarError> {
        let tz = Tz::from_str(name)
            .map_err(|_| CalendarError::UnknownTimezone(name.to_string()))?;
        Ok(Self { tz })
    }

    /// The current business date
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.tz).date_naive()
    }
}

impl Default for BusinessCalendar {
    fn default() -> Self {
        Self { tz: chrono_tz::UTC }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_last_day_of_month() {
        assert_eq!(last_day_of_month(2025, 1), 31);
        assert_eq!(last_day_of_month(2025, 2), 28);
        assert_eq!(last_day_of_month(2024, 2), 29);
        assert_eq!(last_day_of_month(2025, 4), 30);
        assert_eq!(last_day_of_month(2025, 12), 31);
    }

    #[test]
    fn test_clamp_to_month() {
        assert_eq!(clamp_to_month(2025, 2, 31), date(2025, 2, 28));
        assert_eq!(clamp_to_month(2024, 2, 31), date(2024, 2, 29));
        assert_eq!(clamp_to_month(2025, 4, 31), date(2025, 4, 30));
        assert_eq!(clamp_to_month(2025, 1, 15), date(2025, 1, 15));
    }

    #[test]
    fn test_add_months_preserves_day() {
        assert_eq!(add_months_clamped(date(2025, 1, 15), 1), date(2025, 2, 15));
        assert_eq!(add_months_clamped(date(2025, 1, 15), 11), date(2025, 12, 15));
    }

    #[test]
    fn test_add_months_clamps_short_target() {
        assert_eq!(add_months_clamped(date(2025, 1, 31), 1), date(2025, 2, 28));
        assert_eq!(add_months_clamped(date(2025, 1, 31), 3), date(2025, 4, 30));
        // Advancing from the original date each time keeps day 31 where valid
        assert_eq!(add_months_clamped(date(2025, 1, 31), 2), date(2025, 3, 31));
    }

    #[test]
    fn test_add_months_rolls_year() {
        assert_eq!(add_months_clamped(date(2025, 12, 1), 1), date(2026, 1, 1));
        assert_eq!(add_months_clamped(date(2025, 3, 10), 24), date(2027, 3, 10));
    }

    #[test]
    fn test_month_bucket() {
        assert_eq!(month_bucket(date(2025, 2, 5)), "2025-02");
        assert_eq!(month_bucket(date(2025, 12, 31)), "2025-12");
    }

    #[test]
    fn test_period_validation() {
        assert!(Period::new(2025, 0).is_err());
        assert!(Period::new(2025, 13).is_err());
        assert!(Period::new(2025, 12).is_ok());
    }

    #[test]
    fn test_period_range() {
        let p = Period::new(2025, 12).unwrap();
        assert_eq!(p.first_day(), date(2025, 12, 1));
        assert_eq!(p.first_day_of_next(), date(2026, 1, 1));
        assert!(p.contains(date(2025, 12, 31)));
        assert!(!p.contains(date(2026, 1, 1)));
    }

    #[test]
    fn test_business_calendar_from_name() {
        assert!(BusinessCalendar::from_name("UTC").is_ok());
        assert!(BusinessCalendar::from_name("Europe/Berlin").is_ok());
        assert!(matches!(
            BusinessCalendar::from_name("Mars/Olympus"),
            Err(CalendarError::UnknownTimezone(_))
        ));
    }
}
