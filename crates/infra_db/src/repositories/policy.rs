//! Policy repository
//!
//! Single-row policy storage with last-writer-wins updates (the accepted
//! concurrency model for a low-write back office) and the read-triggered
//! expiry sweep.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use core_kernel::Money;
use domain_schedule::{
    PolicyStatus, PolicyTerms, ScheduleState, SETTLEMENT_CURRENCY,
};

use crate::error::DatabaseError;

const POLICY_COLUMNS: &str = "policy_id, policy_number, coverage_type, insurer, policy_type, \
     vehicle_id, start_date, expiry_date, total_premium, installment_count, charge_day, \
     payment_method_id, status, schedule_state, notes, created_at, updated_at";

/// Repository for policy rows
#[derive(Debug, Clone)]
pub struct PolicyRepository {
    pool: PgPool,
}

impl PolicyRepository {
    /// Creates a new PolicyRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a new policy
    pub async fn insert(&self, policy: NewPolicy) -> Result<PolicyRow, DatabaseError> {
        let policy_id = Uuid::new_v4();
        let now = Utc::now();

        let sql = format!(
            "INSERT INTO policies ({POLICY_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17) \
             RETURNING {POLICY_COLUMNS}"
        );
        let row = sqlx::query_as::<_, PolicyRow>(&sql)
            .bind(policy_id)
            .bind(&policy.policy_number)
            .bind(&policy.coverage_type)
            .bind(&policy.insurer)
            .bind(&policy.policy_type)
            .bind(policy.vehicle_id)
            .bind(policy.start_date)
            .bind(policy.expiry_date)
            .bind(policy.total_premium)
            .bind(policy.installment_count)
            .bind(policy.charge_day)
            .bind(policy.payment_method_id)
            .bind(policy.status.to_string())
            .bind(policy.schedule_state.to_string())
            .bind(&policy.notes)
            .bind(now)
            .bind(now)
            .fetch_one(&self.pool)
            .await?;

        Ok(row)
    }

    /// Fetches a policy by id
    pub async fn fetch(&self, policy_id: Uuid) -> Result<PolicyRow, DatabaseError> {
        let sql = format!("SELECT {POLICY_COLUMNS} FROM policies WHERE policy_id = $1");
        sqlx::query_as::<_, PolicyRow>(&sql)
            .bind(policy_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Policy", policy_id))
    }

    /// Lists policies, optionally filtered by vehicle and status
    pub async fn list(&self, filter: PolicyFilter) -> Result<Vec<PolicyRow>, DatabaseError> {
        let mut qb = QueryBuilder::<sqlx::Postgres>::new(format!(
            "SELECT {POLICY_COLUMNS} FROM policies WHERE 1 = 1"
        ));
        if let Some(vehicle_id) = filter.vehicle_id {
            qb.push(" AND vehicle_id = ").push_bind(vehicle_id);
        }
        if let Some(status) = filter.status {
            qb.push(" AND status = ").push_bind(status.to_string());
        }
        qb.push(" ORDER BY created_at DESC");

        let rows = qb.build_query_as::<PolicyRow>().fetch_all(&self.pool).await?;
        Ok(rows)
    }

    /// Overwrites a policy's mutable fields (full-representation update)
    pub async fn update(
        &self,
        policy_id: Uuid,
        patch: PolicyPatch,
    ) -> Result<PolicyRow, DatabaseError> {
        let sql = format!(
            "UPDATE policies SET \
                 policy_number = $2, coverage_type = $3, insurer = $4, policy_type = $5, \
                 vehicle_id = $6, start_date = $7, expiry_date = $8, total_premium = $9, \
                 installment_count = $10, charge_day = $11, payment_method_id = $12, \
                 status = $13, notes = $14, updated_at = $15 \
             WHERE policy_id = $1 \
             RETURNING {POLICY_COLUMNS}"
        );
        sqlx::query_as::<_, PolicyRow>(&sql)
            .bind(policy_id)
            .bind(&patch.policy_number)
            .bind(&patch.coverage_type)
            .bind(&patch.insurer)
            .bind(&patch.policy_type)
            .bind(patch.vehicle_id)
            .bind(patch.start_date)
            .bind(patch.expiry_date)
            .bind(patch.total_premium)
            .bind(patch.installment_count)
            .bind(patch.charge_day)
            .bind(patch.payment_method_id)
            .bind(patch.status.to_string())
            .bind(&patch.notes)
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Policy", policy_id))
    }

    /// Records the outcome of a schedule (re)generation
    pub async fn set_schedule_state(
        &self,
        policy_id: Uuid,
        state: ScheduleState,
    ) -> Result<(), DatabaseError> {
        let result = sqlx::query("UPDATE policies SET schedule_state = $2 WHERE policy_id = $1")
            .bind(policy_id)
            .bind(state.to_string())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Policy", policy_id));
        }
        Ok(())
    }

    /// Deletes a policy; installments and payment records cascade
    pub async fn delete(&self, policy_id: Uuid) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM policies WHERE policy_id = $1")
            .bind(policy_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Policy", policy_id));
        }
        Ok(())
    }

    /// Transitions every active policy whose expiry date has passed to Ended.
    ///
    /// One idempotent statement; running it twice is harmless. Returns the
    /// number of policies swept.
    pub async fn sweep_expired(&self, today: NaiveDate) -> Result<u64, DatabaseError> {
        let result = sqlx::query(
            "UPDATE policies SET status = $1, updated_at = $2 \
             WHERE status = $3 AND expiry_date IS NOT NULL AND expiry_date < $4",
        )
        .bind(PolicyStatus::Ended.to_string())
        .bind(Utc::now())
        .bind(PolicyStatus::Active.to_string())
        .bind(today)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}

/// Database row representation of a policy
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PolicyRow {
    pub policy_id: Uuid,
    pub policy_number: Option<String>,
    pub coverage_type: String,
    pub insurer: String,
    pub policy_type: Option<String>,
    pub vehicle_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    pub total_premium: Decimal,
    pub installment_count: i32,
    pub charge_day: Option<i32>,
    pub payment_method_id: Option<Uuid>,
    pub status: String,
    pub schedule_state: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PolicyRow {
    /// Parses the stored status token
    pub fn policy_status(&self) -> Result<PolicyStatus, DatabaseError> {
        Ok(self.status.parse()?)
    }

    /// Parses the stored schedule-state token
    pub fn regen_state(&self) -> Result<ScheduleState, DatabaseError> {
        Ok(self.schedule_state.parse()?)
    }

    /// The schedule-deriving terms of this policy, for trigger comparison
    pub fn terms(&self) -> PolicyTerms {
        PolicyTerms {
            total_premium: Money::new(self.total_premium, SETTLEMENT_CURRENCY),
            installment_count: self.installment_count.max(0) as u32,
            charge_day: self.charge_day.map(|d| d.max(0) as u32),
            start_date: self.start_date,
        }
    }
}

/// Data for creating a new policy
#[derive(Debug, Clone)]
pub struct NewPolicy {
    pub policy_number: Option<String>,
    pub coverage_type: String,
    pub insurer: String,
    pub policy_type: Option<String>,
    pub vehicle_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    pub total_premium: Decimal,
    pub installment_count: i32,
    pub charge_day: Option<i32>,
    pub payment_method_id: Option<Uuid>,
    pub status: PolicyStatus,
    pub schedule_state: ScheduleState,
    pub notes: Option<String>,
}

/// Data for overwriting an existing policy
#[derive(Debug, Clone)]
pub struct PolicyPatch {
    pub policy_number: Option<String>,
    pub coverage_type: String,
    pub insurer: String,
    pub policy_type: Option<String>,
    pub vehicle_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    pub total_premium: Decimal,
    pub installment_count: i32,
    pub charge_day: Option<i32>,
    pub payment_method_id: Option<Uuid>,
    pub status: PolicyStatus,
    pub notes: Option<String>,
}

/// Filters for the policy listing
#[derive(Debug, Clone, Copy, Default)]
pub struct PolicyFilter {
    pub vehicle_id: Option<Uuid>,
    pub status: Option<PolicyStatus>,
}
