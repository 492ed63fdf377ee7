//! Reconciliation of actual payments against the plan
//!
//! Settlement classifies a payment as on-time or late relative to its
//! planned charge date. Overdue is a query-time classification and is never
//! stored; an item stops being overdue the moment it is settled or its date
//! is edited forward.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ScheduleError;
use crate::generator::InstallmentStatus;

/// Status of an expected-payment record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentRecordStatus {
    /// Expected, nothing received
    Open,
    /// Settled on or before the planned date
    Paid,
    /// Settled after the planned date
    PaidLate,
}

impl fmt::Display for PaymentRecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            PaymentRecordStatus::Open => "open",
            PaymentRecordStatus::Paid => "paid",
            PaymentRecordStatus::PaidLate => "paid_late",
        };
        write!(f, "{}", token)
    }
}

impl FromStr for PaymentRecordStatus {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(PaymentRecordStatus::Open),
            "paid" => Ok(PaymentRecordStatus::Paid),
            "paid_late" => Ok(PaymentRecordStatus::PaidLate),
            _ => Err(ScheduleError::UnknownStatus(s.to_string())),
        }
    }
}

/// Classifies a settlement against the planned charge date.
///
/// An undated record can never be late.
pub fn settle_status(planned: Option<NaiveDate>, actual: NaiveDate) -> PaymentRecordStatus {
    match planned {
        Some(planned) if actual > planned => PaymentRecordStatus::PaidLate,
        _ => PaymentRecordStatus::Paid,
    }
}

/// Query-time overdue classification for a schedule item
pub fn installment_overdue(
    status: InstallmentStatus,
    charge_date: Option<NaiveDate>,
    today: NaiveDate,
) -> bool {
    status == InstallmentStatus::Planned && charge_date.is_some_and(|d| d <= today)
}

/// Query-time overdue classification for a payment record
pub fn record_overdue(
    status: PaymentRecordStatus,
    charge_date: Option<NaiveDate>,
    today: NaiveDate,
) -> bool {
    status == PaymentRecordStatus::Open && charge_date.is_some_and(|d| d <= today)
}
