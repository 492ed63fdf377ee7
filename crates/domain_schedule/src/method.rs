//! Payment-method classification
//!
//! The scheduling engine only cares about one question per instrument: does
//! it auto-debit on a fixed day of the month? Credit cards and standing
//! orders with a configured charge day do; everything else is charged
//! manually on the policy's own dates.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ScheduleError;

/// Kinds of payment instruments in the directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethodKind {
    /// Credit card charged monthly by the issuer
    CreditCard,
    /// Bank standing order
    StandingOrder,
    /// Cash payment
    Cash,
    /// Check payment
    Check,
    /// Bank transfer
    Transfer,
    /// Anything else
    Other,
}

impl PaymentMethodKind {
    /// Returns true if this kind can auto-debit on a fixed monthly day
    pub fn supports_auto_debit(&self) -> bool {
        matches!(self, PaymentMethodKind::CreditCard | PaymentMethodKind::StandingOrder)
    }
}

impl fmt::Display for PaymentMethodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            PaymentMethodKind::CreditCard => "credit_card",
            PaymentMethodKind::StandingOrder => "standing_order",
            PaymentMethodKind::Cash => "cash",
            PaymentMethodKind::Check => "check",
            PaymentMethodKind::Transfer => "transfer",
            PaymentMethodKind::Other => "other",
        };
        write!(f, "{}", token)
    }
}

impl FromStr for PaymentMethodKind {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "credit_card" => Ok(PaymentMethodKind::CreditCard),
            "standing_order" => Ok(PaymentMethodKind::StandingOrder),
            "cash" => Ok(PaymentMethodKind::Cash),
            "check" => Ok(PaymentMethodKind::Check),
            "transfer" => Ok(PaymentMethodKind::Transfer),
            "other" => Ok(PaymentMethodKind::Other),
            _ => Err(ScheduleError::UnknownMethodKind(s.to_string())),
        }
    }
}

/// Charge semantics resolved for a payment method
///
/// `is_auto_debit` is true only when the instrument kind supports it AND a
/// charge day is configured. A missing method, or a method without a charge
/// day, classifies as manual; schedules must remain computable without a
/// valid instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodClassification {
    pub is_auto_debit: bool,
    pub charge_day: Option<u32>,
}

impl MethodClassification {
    /// Classification for a manual / ad-hoc instrument (or no instrument)
    pub fn manual() -> Self {
        Self {
            is_auto_debit: false,
            charge_day: None,
        }
    }

    /// Classifies an instrument from its kind and configured charge day
    pub fn classify(kind: PaymentMethodKind, charge_day: Option<u32>) -> Self {
        match charge_day {
            Some(day) if kind.supports_auto_debit() => Self {
                is_auto_debit: true,
                charge_day: Some(day),
            },
            _ => Self::manual(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credit_card_with_charge_day_is_auto_debit() {
        let c = MethodClassification::classify(PaymentMethodKind::CreditCard, Some(10));
        assert!(c.is_auto_debit);
        assert_eq!(c.charge_day, Some(10));
    }

    #[test]
    fn test_standing_order_with_charge_day_is_auto_debit() {
        let c = MethodClassification::classify(PaymentMethodKind::StandingOrder, Some(2));
        assert!(c.is_auto_debit);
    }

    #[test]
    fn test_card_without_charge_day_is_manual() {
        let c = MethodClassification::classify(PaymentMethodKind::CreditCard, None);
        assert!(!c.is_auto_debit);
        assert_eq!(c.charge_day, None);
    }

    #[test]
    fn test_cash_is_manual_even_with_charge_day() {
        let c = MethodClassification::classify(PaymentMethodKind::Cash, Some(15));
        assert!(!c.is_auto_debit);
        assert_eq!(c.charge_day, None);
    }

    #[test]
    fn test_kind_round_trip() {
        for kind in [
            PaymentMethodKind::CreditCard,
            PaymentMethodKind::StandingOrder,
            PaymentMethodKind::Cash,
            PaymentMethodKind::Check,
            PaymentMethodKind::Transfer,
            PaymentMethodKind::Other,
        ] {
            let parsed: PaymentMethodKind = kind.to_string().parse().unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn test_unknown_kind() {
        let err = "carrier_pigeon".parse::<PaymentMethodKind>().unwrap_err();
        assert_eq!(
            err,
            ScheduleError::UnknownMethodKind("carrier_pigeon".to_string())
        );
    }
}
