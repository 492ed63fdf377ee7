//! Scheduling domain errors

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors produced by the scheduling engine
///
/// Validation errors are raised before any store mutation; a schedule that
/// fails to validate leaves the previously persisted schedule untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Invalid installment count: {0} (must be at least 1)")]
    InvalidInstallmentCount(u32),

    #[error("Negative total premium: {0}")]
    NegativePremium(Decimal),

    #[error("Invalid first-charge day: {0} (must be 1-28)")]
    InvalidChargeDay(u32),

    #[error("Unknown status value: {0}")]
    UnknownStatus(String),

    #[error("Unknown payment method kind: {0}")]
    UnknownMethodKind(String),
}
