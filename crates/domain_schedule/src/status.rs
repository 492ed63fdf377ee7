//! Policy status and the expiry sweep predicate
//!
//! Statuses are written freely by operator edits; the only guarded
//! transition in the system is the sweep's Active -> Ended move for
//! policies whose expiry date has passed.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ScheduleError;

/// Lifecycle status of a policy
///
/// `Active -> Ended` happens automatically via the expiry sweep;
/// `Cancelled` and `Frozen` are manual, and `Frozen -> Active` reactivation
/// is permitted. Operator edits may write any value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyStatus {
    Active,
    Ended,
    Cancelled,
    Frozen,
}

impl fmt::Display for PolicyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            PolicyStatus::Active => "active",
            PolicyStatus::Ended => "ended",
            PolicyStatus::Cancelled => "cancelled",
            PolicyStatus::Frozen => "frozen",
        };
        write!(f, "{}", token)
    }
}

impl FromStr for PolicyStatus {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(PolicyStatus::Active),
            "ended" => Ok(PolicyStatus::Ended),
            "cancelled" => Ok(PolicyStatus::Cancelled),
            "frozen" => Ok(PolicyStatus::Frozen),
            _ => Err(ScheduleError::UnknownStatus(s.to_string())),
        }
    }
}

/// Returns true when the sweep should transition this policy to Ended.
///
/// Only Active policies with an expiry date strictly before today expire; a
/// policy expiring today is still in force for the day.
pub fn should_expire(status: PolicyStatus, expiry_date: Option<NaiveDate>, today: NaiveDate) -> bool {
    status == PolicyStatus::Active && expiry_date.is_some_and(|d| d < today)
}
