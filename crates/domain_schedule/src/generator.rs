//! Installment schedule generation
//!
//! Splits a policy's total premium into a numbered, dated installment plan.
//! Generation is deterministic: identical inputs always produce identical
//! output, which makes it safe for the update path to regenerate
//! unconditionally whenever a trigger field changes.

use chrono::NaiveDate;
use core_kernel::calendar::{add_months_clamped, month_bucket};
use core_kernel::{Money, PaymentMethodId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ScheduleError;

/// Lifecycle status of a schedule item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallmentStatus {
    /// Scheduled, nothing happened yet
    Planned,
    /// Sent to the charging instrument
    Charged,
    /// Money received
    Paid,
    /// Dropped from the plan
    Cancelled,
}

impl fmt::Display for InstallmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            InstallmentStatus::Planned => "planned",
            InstallmentStatus::Charged => "charged",
            InstallmentStatus::Paid => "paid",
            InstallmentStatus::Cancelled => "cancelled",
        };
        write!(f, "{}", token)
    }
}

impl FromStr for InstallmentStatus {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "planned" => Ok(InstallmentStatus::Planned),
            "charged" => Ok(InstallmentStatus::Charged),
            "paid" => Ok(InstallmentStatus::Paid),
            "cancelled" => Ok(InstallmentStatus::Cancelled),
            _ => Err(ScheduleError::UnknownStatus(s.to_string())),
        }
    }
}

/// Inputs to schedule generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleParams {
    /// Total premium to split across the plan
    pub total_premium: Money,
    /// Number of installments (>= 1)
    pub installment_count: u32,
    /// Date of the first charge; None when the policy has no start date yet
    pub first_charge: Option<NaiveDate>,
}

/// A generated schedule item, not yet persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallmentDraft {
    /// 1-based position in the plan
    pub number: u32,
    /// Charge date; None when the schedule cannot be dated yet
    pub charge_date: Option<NaiveDate>,
    /// YYYY-MM reporting bucket derived from the charge date
    pub charge_month: Option<String>,
    /// Amount of this installment
    pub amount: Money,
    /// Per-item instrument override, set only by operator edits
    pub method_override: Option<PaymentMethodId>,
    /// Initial status
    pub status: InstallmentStatus,
}

/// Generates the installment plan for the given parameters.
///
/// Every installment carries round(total / count, 2); the rounding remainder
/// is not redistributed, so the plan total may drift from the premium by
/// less than one minor unit per installment (see `Money::split_even`).
/// Installment `i` is charged `i - 1` calendar months after the first
/// charge, with the day-of-month preserved where the target month allows it
/// and clamped to the month's end otherwise. Dates are always advanced from
/// the first charge date, never from the previous (possibly clamped)
/// installment, so a January 31st plan charges March 31st, not March 28th.
///
/// # Errors
///
/// `InvalidInstallmentCount` when count is zero, `NegativePremium` when the
/// premium is below zero. Both reject before anything reaches the store.
pub fn generate_installments(
    params: &ScheduleParams,
) -> Result<Vec<InstallmentDraft>, ScheduleError> {
    validate(params)?;

    let amounts = params
        .total_premium
        .split_even(params.installment_count)
        .map_err(|_| ScheduleError::InvalidInstallmentCount(params.installment_count))?;

    let drafts = amounts
        .into_iter()
        .enumerate()
        .map(|(index, amount)| {
            let charge_date = params
                .first_charge
                .map(|first| add_months_clamped(first, index as u32));
            InstallmentDraft {
                number: index as u32 + 1,
                charge_month: charge_date.map(month_bucket),
                charge_date,
                amount,
                method_override: None,
                status: InstallmentStatus::Planned,
            }
        })
        .collect();

    Ok(drafts)
}

fn validate(params: &ScheduleParams) -> Result<(), ScheduleError> {
    if params.installment_count == 0 {
        return Err(ScheduleError::InvalidInstallmentCount(0));
    }
    if params.total_premium.is_negative() {
        return Err(ScheduleError::NegativePremium(params.total_premium.amount()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    fn params(premium: rust_decimal::Decimal, count: u32, first: Option<NaiveDate>) -> ScheduleParams {
        ScheduleParams {
            total_premium: Money::new(premium, Currency::ILS),
            installment_count: count,
            first_charge: first,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_zero_count_rejected() {
        let err = generate_installments(&params(dec!(1200), 0, None)).unwrap_err();
        assert_eq!(err, ScheduleError::InvalidInstallmentCount(0));
    }

    #[test]
    fn test_negative_premium_rejected() {
        let err = generate_installments(&params(dec!(-1), 4, None)).unwrap_err();
        assert_eq!(err, ScheduleError::NegativePremium(dec!(-1)));
    }

    #[test]
    fn test_undated_schedule_still_gets_amounts() {
        let drafts = generate_installments(&params(dec!(1200), 4, None)).unwrap();

        assert_eq!(drafts.len(), 4);
        for (i, d) in drafts.iter().enumerate() {
            assert_eq!(d.number, i as u32 + 1);
            assert_eq!(d.charge_date, None);
            assert_eq!(d.charge_month, None);
            assert_eq!(d.amount.amount(), dec!(300.00));
            assert_eq!(d.status, InstallmentStatus::Planned);
        }
    }

    #[test]
    fn test_monthly_progression_and_buckets() {
        let drafts =
            generate_installments(&params(dec!(1200), 3, Some(date(2025, 11, 10)))).unwrap();

        assert_eq!(drafts[0].charge_date, Some(date(2025, 11, 10)));
        assert_eq!(drafts[1].charge_date, Some(date(2025, 12, 10)));
        assert_eq!(drafts[2].charge_date, Some(date(2026, 1, 10)));
        assert_eq!(drafts[0].charge_month.as_deref(), Some("2025-11"));
        assert_eq!(drafts[2].charge_month.as_deref(), Some("2026-01"));
    }

    #[test]
    fn test_end_of_month_clamping_is_per_installment() {
        let drafts =
            generate_installments(&params(dec!(400), 4, Some(date(2025, 1, 31)))).unwrap();

        assert_eq!(drafts[0].charge_date, Some(date(2025, 1, 31)));
        assert_eq!(drafts[1].charge_date, Some(date(2025, 2, 28)));
        // Back on day 31 in March: advanced from the first charge, not from February
        assert_eq!(drafts[2].charge_date, Some(date(2025, 3, 31)));
        assert_eq!(drafts[3].charge_date, Some(date(2025, 4, 30)));
    }

    #[test]
    fn test_generation_is_idempotent() {
        let p = params(dec!(7549.99), 7, Some(date(2025, 5, 14)));
        assert_eq!(
            generate_installments(&p).unwrap(),
            generate_installments(&p).unwrap()
        );
    }
}
