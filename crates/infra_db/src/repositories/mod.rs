//! Repository implementations

pub mod payment_method;
pub mod payment_record;
pub mod policy;
pub mod schedule;

pub use payment_method::PaymentMethodRepository;
pub use payment_record::{PaymentRecordRepository, PaymentRecordRow, SummaryRow};
pub use policy::{NewPolicy, PolicyFilter, PolicyPatch, PolicyRepository, PolicyRow};
pub use schedule::{InstallmentItemUpdate, InstallmentRow, NewInstallment, ScheduleRepository};
