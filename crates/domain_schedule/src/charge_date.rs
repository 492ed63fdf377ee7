//! First-charge date derivation
//!
//! Auto-debit instruments charge on a fixed day of the month. A policy that
//! starts on or after that day in some month is first charged in the
//! following month; a policy that starts before it is charged in the same
//! month. The charge day is clamped to the last day of the target month
//! (charge day 31 in February lands on the 28th).

use chrono::{Datelike, NaiveDate};
use core_kernel::calendar::clamp_to_month;

use crate::method::MethodClassification;

/// Anchors a start date to the next occurrence of a monthly charge day.
///
/// If the start's day-of-month is greater than or equal to the charge day,
/// the charge moves to the next month (rolling the year at December). A
/// start exactly on the charge day also advances; the current month's
/// charge run is taken to have already closed.
pub fn charge_day_anchor(start: NaiveDate, charge_day: u32) -> NaiveDate {
    let (mut year, mut month) = (start.year(), start.month());
    if start.day() >= charge_day {
        if month == 12 {
            year += 1;
            month = 1;
        } else {
            month += 1;
        }
    }
    clamp_to_month(year, month, charge_day)
}

/// Computes the date of the first installment charge.
///
/// Manual instruments charge on the start date unchanged. A missing start
/// date yields `None`: the schedule cannot be dated yet, but amounts and
/// sequence numbers are still computable.
pub fn first_charge_date(
    start: Option<NaiveDate>,
    classification: &MethodClassification,
) -> Option<NaiveDate> {
    let start = start?;
    match (classification.is_auto_debit, classification.charge_day) {
        (true, Some(day)) => Some(charge_day_anchor(start, day)),
        _ => Some(start),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::method::{MethodClassification, PaymentMethodKind};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_start_before_charge_day_stays_in_month() {
        assert_eq!(charge_day_anchor(date(2025, 2, 1), 5), date(2025, 2, 5));
        assert_eq!(charge_day_anchor(date(2025, 6, 14), 15), date(2025, 6, 15));
    }

    #[test]
    fn test_start_on_charge_day_advances() {
        assert_eq!(charge_day_anchor(date(2025, 1, 1), 1), date(2025, 2, 1));
        assert_eq!(charge_day_anchor(date(2025, 6, 15), 15), date(2025, 7, 15));
    }

    #[test]
    fn test_start_after_charge_day_advances() {
        assert_eq!(charge_day_anchor(date(2025, 1, 20), 10), date(2025, 2, 10));
    }

    #[test]
    fn test_december_rolls_year() {
        assert_eq!(charge_day_anchor(date(2025, 12, 20), 10), date(2026, 1, 10));
    }

    #[test]
    fn test_charge_day_clamped_to_short_month() {
        // Day 31 charged out of a January start lands on February's last day
        assert_eq!(charge_day_anchor(date(2025, 1, 31), 31), date(2025, 2, 28));
        assert_eq!(charge_day_anchor(date(2024, 1, 31), 31), date(2024, 2, 29));
        assert_eq!(charge_day_anchor(date(2025, 3, 31), 31), date(2025, 4, 30));
    }

    #[test]
    fn test_manual_method_charges_on_start() {
        let manual = MethodClassification::manual();
        assert_eq!(
            first_charge_date(Some(date(2025, 3, 17)), &manual),
            Some(date(2025, 3, 17))
        );
    }

    #[test]
    fn test_auto_debit_method_anchors() {
        let card = MethodClassification::classify(PaymentMethodKind::CreditCard, Some(5));
        assert_eq!(
            first_charge_date(Some(date(2025, 2, 1)), &card),
            Some(date(2025, 2, 5))
        );
    }

    #[test]
    fn test_missing_start_is_undetermined() {
        let card = MethodClassification::classify(PaymentMethodKind::CreditCard, Some(5));
        assert_eq!(first_charge_date(None, &card), None);
        assert_eq!(first_charge_date(None, &MethodClassification::manual()), None);
    }
}
