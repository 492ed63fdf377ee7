//! Money types with precise decimal arithmetic
//!
//! This module provides a type-safe representation of monetary values
//! using rust_decimal for precise calculations without floating-point errors.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Neg, Sub};
use thiserror::Error;

/// Currency codes following ISO 4217
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    ILS,
    USD,
    EUR,
}

impl Currency {
    /// Returns the number of decimal places for this currency
    pub fn decimal_places(&self) -> u32 {
        2
    }

    /// Returns the currency symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::ILS => "₪",
            Currency::USD => "$",
            Currency::EUR => "€",
        }
    }

    /// Returns the ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::ILS => "ILS",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors that can occur during money operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Currency mismatch: cannot operate on {0} and {1}")]
    CurrencyMismatch(String, String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Division by zero")]
    DivisionByZero,
}

/// A monetary amount with associated currency
///
/// Money uses rust_decimal for precise arithmetic without floating-point
/// errors. Amounts are kept at the currency's scale (2 fraction digits),
/// matching how premiums and installments cross the API boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    /// Creates a new Money value rounded to the currency's scale
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self {
            amount: amount.round_dp_with_strategy(
                currency.decimal_places(),
                rust_decimal::RoundingStrategy::MidpointAwayFromZero,
            ),
            currency,
        }
    }

    /// Creates Money from an integer amount in minor units (agorot/cents)
    pub fn from_minor(minor_units: i64, currency: Currency) -> Self {
        let divisor = Decimal::new(10_i64.pow(currency.decimal_places()), 0);
        Self::new(Decimal::new(minor_units, 0) / divisor, currency)
    }

    /// Creates a zero amount in the specified currency
    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: dec!(0),
            currency,
        }
    }

    /// Returns the amount
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the currency
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns true if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is negative
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Checked addition that returns an error on currency mismatch
    pub fn checked_add(&self, other: &Money) -> Result<Money, MoneyError> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch(
                self.currency.to_string(),
                other.currency.to_string(),
            ));
        }
        Ok(Self::new(self.amount + other.amount, self.currency))
    }

    /// Checked subtraction that returns an error on currency mismatch
    pub fn checked_sub(&self, other: &Money) -> Result<Money, MoneyError> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch(
                self.currency.to_string(),
                other.currency.to_string(),
            ));
        }
        Ok(Self::new(self.amount - other.amount, self.currency))
    }

    /// Multiplies by a scalar
    pub fn multiply(&self, factor: Decimal) -> Self {
        Self::new(self.amount * factor, self.currency)
    }

    /// Divides by a scalar, rounding to the currency's scale
    pub fn divide(&self, divisor: Decimal) -> Result<Self, MoneyError> {
        if divisor.is_zero() {
            return Err(MoneyError::DivisionByZero);
        }
        Ok(Self::new(self.amount / divisor, self.currency))
    }

    /// Splits the amount into `n` identical parts of round(total / n, scale).
    ///
    /// Every part carries the same independently-rounded amount; the rounding
    /// remainder is NOT pushed onto the last part, so the parts may sum to up
    /// to `n` minor units away from the original total. Callers that need the
    /// schedule to reproduce the historical billing output rely on exactly
    /// this behavior.
    pub fn split_even(&self, n: u32) -> Result<Vec<Money>, MoneyError> {
        if n == 0 {
            return Err(MoneyError::InvalidAmount(
                "Cannot split into zero parts".to_string(),
            ));
        }
        let per_part = self.divide(Decimal::from(n))?;
        Ok(vec![per_part; n as usize])
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dp = self.currency.decimal_places();
        write!(
            f,
            "{} {:.dp$}",
            self.currency.symbol(),
            self.amount,
            dp = dp as usize
        )
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.checked_add(&other)
            .expect("Currency mismatch in Money::add")
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self.checked_sub(&other)
            .expect("Currency mismatch in Money::sub")
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.amount, self.currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_creation() {
        let m = Money::new(dec!(600.50), Currency::ILS);
        assert_eq!(m.amount(), dec!(600.50));
        assert_eq!(m.currency(), Currency::ILS);
    }

    #[test]
    fn test_money_rounds_to_currency_scale() {
        let m = Money::new(dec!(100.005), Currency::ILS);
        assert_eq!(m.amount(), dec!(100.01));
    }

    #[test]
    fn test_money_from_minor() {
        let m = Money::from_minor(60050, Currency::ILS);
        assert_eq!(m.amount(), dec!(600.50));
    }

    #[test]
    fn test_money_arithmetic() {
        let a = Money::new(dec!(100.00), Currency::ILS);
        let b = Money::new(dec!(50.00), Currency::ILS);

        assert_eq!((a + b).amount(), dec!(150.00));
        assert_eq!((a - b).amount(), dec!(50.00));
    }

    #[test]
    fn test_currency_mismatch() {
        let ils = Money::new(dec!(100.00), Currency::ILS);
        let usd = Money::new(dec!(100.00), Currency::USD);

        let result = ils.checked_add(&usd);
        assert!(matches!(result, Err(MoneyError::CurrencyMismatch(_, _))));
    }

    #[test]
    fn test_split_even_exact() {
        let m = Money::new(dec!(7200.00), Currency::ILS);
        let parts = m.split_even(12).unwrap();

        assert_eq!(parts.len(), 12);
        assert!(parts.iter().all(|p| p.amount() == dec!(600.00)));
    }

    #[test]
    fn test_split_even_does_not_redistribute_remainder() {
        // 100 / 3 rounds to 33.33 per part; the missing cent stays missing.
        let m = Money::new(dec!(100.00), Currency::ILS);
        let parts = m.split_even(3).unwrap();

        assert!(parts.iter().all(|p| p.amount() == dec!(33.33)));
        let total: Decimal = parts.iter().map(|p| p.amount()).sum();
        assert_eq!(total, dec!(99.99));
    }

    #[test]
    fn test_split_even_zero_parts() {
        let m = Money::new(dec!(100.00), Currency::ILS);
        assert!(matches!(
            m.split_even(0),
            Err(MoneyError::InvalidAmount(_))
        ));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn split_even_sum_stays_within_tolerance(
            amount in 0i64..1_000_000_000i64,
            parts in 1u32..100u32
        ) {
            let money = Money::from_minor(amount, Currency::ILS);
            let split = money.split_even(parts).unwrap();

            let total: Decimal = split.iter().map(|m| m.amount()).sum();
            let drift = (total - money.amount()).abs();
            let band = Decimal::new(parts as i64, 2);
            prop_assert!(drift <= band, "drift {} exceeds {} for {} parts", drift, band, parts);
        }

        #[test]
        fn split_even_parts_are_identical(
            amount in 0i64..1_000_000_000i64,
            parts in 1u32..100u32
        ) {
            let money = Money::from_minor(amount, Currency::ILS);
            let split = money.split_even(parts).unwrap();

            prop_assert_eq!(split.len(), parts as usize);
            prop_assert!(split.windows(2).all(|w| w[0] == w[1]));
        }
    }
}
