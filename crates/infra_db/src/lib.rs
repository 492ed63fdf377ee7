//! Infrastructure Database Layer
//!
//! PostgreSQL access for the fleet back office using SQLx, following the
//! repository pattern: each aggregate gets a repository struct over the
//! shared connection pool, and domain types cross the boundary through
//! plain row structs.
//!
//! The installment table is the one resource with atomic-replace semantics:
//! a schedule is always swapped wholesale inside a single transaction so a
//! concurrent reader sees the old full set or the new full set, never a
//! partially applied one.

pub mod error;
pub mod pool;
pub mod repositories;

pub use error::DatabaseError;
pub use pool::{create_pool, create_pool_from_url, DatabaseConfig, DatabasePool};
pub use repositories::{
    InstallmentItemUpdate, InstallmentRow, NewInstallment, NewPolicy, PaymentMethodRepository,
    PaymentRecordRepository, PaymentRecordRow, PolicyFilter, PolicyPatch, PolicyRepository,
    PolicyRow, ScheduleRepository, SummaryRow,
};

/// Embedded schema migrations, applied by the server binary at startup
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();
