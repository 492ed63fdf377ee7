//! Core Kernel - Foundational types for the fleet back office
//!
//! This crate provides the building blocks shared by every other crate:
//! - Money types with precise decimal arithmetic
//! - Calendar arithmetic for monthly charge scheduling
//! - Strongly-typed identifiers

pub mod calendar;
pub mod identifiers;
pub mod money;

pub use calendar::{BusinessCalendar, CalendarError, Period};
pub use identifiers::{InstallmentId, PaymentMethodId, PaymentRecordId, PolicyId, VehicleId};
pub use money::{Currency, Money, MoneyError};
