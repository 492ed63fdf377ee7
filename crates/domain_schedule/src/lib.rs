//! Scheduling Domain - installment scheduling and payment reconciliation
//!
//! This crate holds the pure scheduling engine for insurance-policy payment
//! plans:
//!
//! - **Payment-method classification**: which instruments auto-debit on a
//!   fixed monthly day and which are charged manually
//! - **Charge dating**: deriving the first charge date from the policy start
//!   and the instrument's charge day
//! - **Generation**: splitting a premium into a dated, numbered installment
//!   schedule (and the simpler payment-record variant)
//! - **Reconciliation**: settling actual payments against planned charges
//!   and classifying overdue items
//! - **State machines**: schedule regeneration state and policy status
//!
//! Everything here is deterministic and free of I/O; persistence lives in
//! `infra_db` and orchestration in `interface_api`.

pub mod charge_date;
pub mod error;
pub mod generator;
pub mod method;
pub mod reconcile;
pub mod record;
pub mod state;
pub mod status;

pub use charge_date::{charge_day_anchor, first_charge_date};
pub use error::ScheduleError;
pub use generator::{generate_installments, InstallmentDraft, InstallmentStatus, ScheduleParams};
pub use method::{MethodClassification, PaymentMethodKind};
pub use reconcile::{installment_overdue, record_overdue, settle_status, PaymentRecordStatus};
pub use record::{generate_payment_records, PaymentRecordDraft};
pub use state::{regeneration_required, PolicyTerms, ScheduleState};
pub use status::{should_expire, PolicyStatus};

use core_kernel::Currency;

/// The single settlement currency of the back office
pub const SETTLEMENT_CURRENCY: Currency = Currency::ILS;
