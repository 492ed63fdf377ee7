//! Simple payment-record generation
//!
//! The older half of the billing data model: one record per expected
//! payment, derived purely from the policy's own premium, payment count and
//! first-charge day, with no per-item instrument overrides. These records
//! are what reconciliation settles actual payments against.

use chrono::NaiveDate;
use core_kernel::calendar::add_months_clamped;
use core_kernel::Money;
use serde::{Deserialize, Serialize};

use crate::charge_date::charge_day_anchor;
use crate::error::ScheduleError;

/// A generated payment record, not yet persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecordDraft {
    /// 1-based payment number
    pub number: u32,
    /// Expected charge date; None when the policy has no start date yet
    pub charge_date: Option<NaiveDate>,
    /// Expected amount
    pub expected_amount: Money,
}

/// Generates the expected-payment records for a policy.
///
/// Amounts follow the same independent-rounding split as the full
/// installment plan. Dating uses the policy's own first-charge day (1-28)
/// through the same anchor rule as auto-debit instruments; a policy without
/// a charge day is dated from its start date directly, and a policy without
/// a start date gets undated records.
pub fn generate_payment_records(
    total_premium: Money,
    count: u32,
    start_date: Option<NaiveDate>,
    charge_day: Option<u32>,
) -> Result<Vec<PaymentRecordDraft>, ScheduleError> {
    if count == 0 {
        return Err(ScheduleError::InvalidInstallmentCount(0));
    }
    if total_premium.is_negative() {
        return Err(ScheduleError::NegativePremium(total_premium.amount()));
    }
    if let Some(day) = charge_day {
        if !(1..=28).contains(&day) {
            return Err(ScheduleError::InvalidChargeDay(day));
        }
    }

    let first = start_date.map(|start| match charge_day {
        Some(day) => charge_day_anchor(start, day),
        None => start,
    });

    let amounts = total_premium
        .split_even(count)
        .map_err(|_| ScheduleError::InvalidInstallmentCount(count))?;

    let records = amounts
        .into_iter()
        .enumerate()
        .map(|(index, expected_amount)| PaymentRecordDraft {
            number: index as u32 + 1,
            charge_date: first.map(|f| add_months_clamped(f, index as u32)),
            expected_amount,
        })
        .collect();

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    fn money(d: rust_decimal::Decimal) -> Money {
        Money::new(d, Currency::ILS)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_records_with_charge_day_anchor() {
        let records =
            generate_payment_records(money(dec!(3600)), 12, Some(date(2025, 2, 1)), Some(5))
                .unwrap();

        assert_eq!(records.len(), 12);
        assert_eq!(records[0].charge_date, Some(date(2025, 2, 5)));
        assert_eq!(records[11].charge_date, Some(date(2026, 1, 5)));
        assert!(records.iter().all(|r| r.expected_amount.amount() == dec!(300.00)));
    }

    #[test]
    fn test_records_without_charge_day_date_from_start() {
        let records =
            generate_payment_records(money(dec!(1000)), 2, Some(date(2025, 3, 17)), None).unwrap();

        assert_eq!(records[0].charge_date, Some(date(2025, 3, 17)));
        assert_eq!(records[1].charge_date, Some(date(2025, 4, 17)));
    }

    #[test]
    fn test_records_without_start_are_undated() {
        let records = generate_payment_records(money(dec!(1000)), 2, None, Some(10)).unwrap();
        assert!(records.iter().all(|r| r.charge_date.is_none()));
        assert_eq!(records[1].expected_amount.amount(), dec!(500.00));
    }

    #[test]
    fn test_charge_day_out_of_range() {
        let err =
            generate_payment_records(money(dec!(1000)), 2, Some(date(2025, 1, 1)), Some(29))
                .unwrap_err();
        assert_eq!(err, ScheduleError::InvalidChargeDay(29));
    }
}
