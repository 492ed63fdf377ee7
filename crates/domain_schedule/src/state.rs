//! Schedule regeneration state
//!
//! The schedule for a policy is derived data. This module tracks whether
//! the derivation has run and whether a later edit invalidated it, as an
//! explicit three-state machine set by the update handler and consumed by
//! the generator orchestration.

use chrono::NaiveDate;
use core_kernel::Money;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ScheduleError;

/// Whether a policy's schedule matches its current terms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleState {
    /// No schedule has ever been generated for this policy
    NotGenerated,
    /// The persisted schedule was generated from the current terms
    Generated,
    /// A trigger field changed after generation; the schedule is stale
    StaleNeedsRegeneration,
}

impl fmt::Display for ScheduleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            ScheduleState::NotGenerated => "not_generated",
            ScheduleState::Generated => "generated",
            ScheduleState::StaleNeedsRegeneration => "stale_needs_regeneration",
        };
        write!(f, "{}", token)
    }
}

impl FromStr for ScheduleState {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not_generated" => Ok(ScheduleState::NotGenerated),
            "generated" => Ok(ScheduleState::Generated),
            "stale_needs_regeneration" => Ok(ScheduleState::StaleNeedsRegeneration),
            _ => Err(ScheduleError::UnknownStatus(s.to_string())),
        }
    }
}

/// The policy fields the schedule is derived from.
///
/// Only a change to one of these invalidates the schedule; edits to the
/// insurer, notes, coverage type or any other descriptive field never do.
/// The payment-method reference is deliberately not part of the trigger
/// set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyTerms {
    pub total_premium: Money,
    pub installment_count: u32,
    pub charge_day: Option<u32>,
    pub start_date: Option<NaiveDate>,
}

/// Returns true when moving from `old` to `new` terms invalidates the
/// persisted schedule.
pub fn regeneration_required(old: &PolicyTerms, new: &PolicyTerms) -> bool {
    old != new
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    fn terms() -> PolicyTerms {
        PolicyTerms {
            total_premium: Money::new(dec!(7200), Currency::ILS),
            installment_count: 12,
            charge_day: Some(10),
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1),
        }
    }

    #[test]
    fn test_identical_terms_do_not_trigger() {
        assert!(!regeneration_required(&terms(), &terms()));
    }

    #[test]
    fn test_each_trigger_field() {
        let old = terms();

        let mut new = old;
        new.total_premium = Money::new(dec!(7300), Currency::ILS);
        assert!(regeneration_required(&old, &new));

        let mut new = old;
        new.installment_count = 6;
        assert!(regeneration_required(&old, &new));

        let mut new = old;
        new.charge_day = None;
        assert!(regeneration_required(&old, &new));

        let mut new = old;
        new.start_date = NaiveDate::from_ymd_opt(2025, 2, 1);
        assert!(regeneration_required(&old, &new));
    }

    #[test]
    fn test_state_round_trip() {
        for state in [
            ScheduleState::NotGenerated,
            ScheduleState::Generated,
            ScheduleState::StaleNeedsRegeneration,
        ] {
            let parsed: ScheduleState = state.to_string().parse().unwrap();
            assert_eq!(parsed, state);
        }
    }
}
