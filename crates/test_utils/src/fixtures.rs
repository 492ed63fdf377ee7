//! Deterministic test fixtures
//!
//! Tests never use the wall clock; "today" is pinned so sweep and overdue
//! assertions stay stable.

use chrono::NaiveDate;
use core_kernel::{Currency, Money};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Pinned calendar dates for scenario tests
pub struct DateFixtures;

impl DateFixtures {
    /// The business date tests treat as "today"
    pub fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).expect("fixture date is valid")
    }

    /// Default policy start
    pub fn policy_start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).expect("fixture date is valid")
    }

    /// An expiry strictly before `today`
    pub fn past_expiry() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, 31).expect("fixture date is valid")
    }

    /// An expiry strictly after `today`
    pub fn future_expiry() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 12, 31).expect("fixture date is valid")
    }
}

/// Common monetary amounts
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// Wraps a decimal in the settlement currency
    pub fn ils(amount: Decimal) -> Money {
        Money::new(amount, Currency::ILS)
    }

    /// A typical annual fleet premium
    pub fn annual_premium() -> Money {
        Self::ils(dec!(7200))
    }
}
