//! Test Data Builders
//!
//! Builder patterns for constructing scheduling inputs with sensible
//! defaults: an annual 7200 premium over 12 monthly installments starting
//! January 1st 2025.

use chrono::NaiveDate;
use core_kernel::{Currency, Money};
use domain_schedule::{PolicyTerms, ScheduleParams};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::fixtures::DateFixtures;

/// Builder for `ScheduleParams`
pub struct ScheduleParamsBuilder {
    premium: Decimal,
    count: u32,
    first_charge: Option<NaiveDate>,
}

impl Default for ScheduleParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ScheduleParamsBuilder {
    /// Creates a builder with default values
    pub fn new() -> Self {
        Self {
            premium: dec!(7200),
            count: 12,
            first_charge: Some(DateFixtures::policy_start()),
        }
    }

    /// Sets the total premium
    pub fn with_premium(mut self, premium: Decimal) -> Self {
        self.premium = premium;
        self
    }

    /// Sets the installment count
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    /// Sets the first charge date
    pub fn with_first_charge(mut self, date: NaiveDate) -> Self {
        self.first_charge = Some(date);
        self
    }

    /// Leaves the schedule undated
    pub fn undated(mut self) -> Self {
        self.first_charge = None;
        self
    }

    /// Builds the schedule parameters
    pub fn build(self) -> ScheduleParams {
        ScheduleParams {
            total_premium: Money::new(self.premium, Currency::ILS),
            installment_count: self.count,
            first_charge: self.first_charge,
        }
    }
}

/// Builder for `PolicyTerms`
pub struct PolicyTermsBuilder {
    premium: Decimal,
    count: u32,
    charge_day: Option<u32>,
    start_date: Option<NaiveDate>,
}

impl Default for PolicyTermsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PolicyTermsBuilder {
    /// Creates a builder with default values
    pub fn new() -> Self {
        Self {
            premium: dec!(7200),
            count: 12,
            charge_day: Some(10),
            start_date: Some(DateFixtures::policy_start()),
        }
    }

    /// Sets the total premium
    pub fn with_premium(mut self, premium: Decimal) -> Self {
        self.premium = premium;
        self
    }

    /// Sets the installment count
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    /// Sets the first-charge day of month
    pub fn with_charge_day(mut self, day: u32) -> Self {
        self.charge_day = Some(day);
        self
    }

    /// Clears the first-charge day
    pub fn without_charge_day(mut self) -> Self {
        self.charge_day = None;
        self
    }

    /// Sets the policy start date
    pub fn with_start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Builds the policy terms
    pub fn build(self) -> PolicyTerms {
        PolicyTerms {
            total_premium: Money::new(self.premium, Currency::ILS),
            installment_count: self.count,
            charge_day: self.charge_day,
            start_date: self.start_date,
        }
    }
}
