//! Schedule store
//!
//! Persists the installment plan for a policy. The generator's output is
//! always applied wholesale: delete the existing set, insert the new one,
//! inside a single transaction. Individual items are only touched through
//! the separate operator update path.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use domain_schedule::{InstallmentDraft, InstallmentStatus};

use crate::error::DatabaseError;

const INSTALLMENT_COLUMNS: &str = "installment_id, policy_id, installment_number, charge_date, \
     charge_month, amount, status, payment_method_id, notes";

/// Repository for installment schedules
#[derive(Debug, Clone)]
pub struct ScheduleRepository {
    pool: PgPool,
}

impl ScheduleRepository {
    /// Creates a new ScheduleRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Replaces the full installment set for a policy.
    ///
    /// Atomic: the delete and all inserts commit as one unit of work, so a
    /// concurrent reader observes either the old full set or the new full
    /// set. On any failure the transaction rolls back and the previous
    /// schedule remains intact and visible.
    ///
    /// # Errors
    ///
    /// `NotFound` if the policy does not exist; the referential check runs
    /// inside the same transaction.
    pub async fn replace_schedule(
        &self,
        policy_id: Uuid,
        items: Vec<NewInstallment>,
    ) -> Result<Vec<InstallmentRow>, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let exists = sqlx::query_scalar::<_, i32>("SELECT 1 FROM policies WHERE policy_id = $1")
            .bind(policy_id)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Err(DatabaseError::not_found("Policy", policy_id));
        }

        sqlx::query("DELETE FROM installments WHERE policy_id = $1")
            .bind(policy_id)
            .execute(&mut *tx)
            .await?;

        let insert_sql = format!(
            "INSERT INTO installments ({INSTALLMENT_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {INSTALLMENT_COLUMNS}"
        );

        let mut inserted = Vec::with_capacity(items.len());
        for item in items {
            let row = sqlx::query_as::<_, InstallmentRow>(&insert_sql)
                .bind(Uuid::new_v4())
                .bind(policy_id)
                .bind(item.installment_number)
                .bind(item.charge_date)
                .bind(&item.charge_month)
                .bind(item.amount)
                .bind(item.status.to_string())
                .bind(item.payment_method_id)
                .bind(&item.notes)
                .fetch_one(&mut *tx)
                .await?;
            inserted.push(row);
        }

        tx.commit().await?;
        Ok(inserted)
    }

    /// Lists a policy's installments ordered by installment number
    pub async fn list_for_policy(
        &self,
        policy_id: Uuid,
    ) -> Result<Vec<InstallmentRow>, DatabaseError> {
        let sql = format!(
            "SELECT {INSTALLMENT_COLUMNS} FROM installments \
             WHERE policy_id = $1 ORDER BY installment_number"
        );
        let rows = sqlx::query_as::<_, InstallmentRow>(&sql)
            .bind(policy_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Operator edit of a single installment.
    ///
    /// Fields left as None keep their stored value; this path never renumbers
    /// the plan.
    ///
    /// # Errors
    ///
    /// `NotFound` when the installment does not exist or belongs to another
    /// policy.
    pub async fn update_item(
        &self,
        policy_id: Uuid,
        installment_id: Uuid,
        update: InstallmentItemUpdate,
    ) -> Result<InstallmentRow, DatabaseError> {
        let sql = format!(
            "UPDATE installments SET \
                 charge_date = COALESCE($3, charge_date), \
                 charge_month = COALESCE($4, charge_month), \
                 amount = COALESCE($5, amount), \
                 status = COALESCE($6, status), \
                 payment_method_id = COALESCE($7, payment_method_id), \
                 notes = COALESCE($8, notes) \
             WHERE installment_id = $1 AND policy_id = $2 \
             RETURNING {INSTALLMENT_COLUMNS}"
        );
        sqlx::query_as::<_, InstallmentRow>(&sql)
            .bind(installment_id)
            .bind(policy_id)
            .bind(update.charge_date)
            .bind(&update.charge_month)
            .bind(update.amount)
            .bind(update.status.map(|s| s.to_string()))
            .bind(update.payment_method_id)
            .bind(&update.notes)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Installment", installment_id))
    }
}

/// Database row representation of an installment
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct InstallmentRow {
    pub installment_id: Uuid,
    pub policy_id: Uuid,
    pub installment_number: i32,
    pub charge_date: Option<NaiveDate>,
    pub charge_month: Option<String>,
    pub amount: Decimal,
    pub status: String,
    pub payment_method_id: Option<Uuid>,
    pub notes: Option<String>,
}

impl InstallmentRow {
    /// Parses the stored status token
    pub fn item_status(&self) -> Result<InstallmentStatus, DatabaseError> {
        Ok(self.status.parse()?)
    }
}

/// Data for inserting one installment
#[derive(Debug, Clone)]
pub struct NewInstallment {
    pub installment_number: i32,
    pub charge_date: Option<NaiveDate>,
    pub charge_month: Option<String>,
    pub amount: Decimal,
    pub status: InstallmentStatus,
    pub payment_method_id: Option<Uuid>,
    pub notes: Option<String>,
}

impl NewInstallment {
    /// Maps a generator draft into an insertable row
    pub fn from_draft(draft: &InstallmentDraft) -> Self {
        Self {
            installment_number: draft.number as i32,
            charge_date: draft.charge_date,
            charge_month: draft.charge_month.clone(),
            amount: draft.amount.amount(),
            status: draft.status,
            payment_method_id: draft.method_override.map(Into::into),
            notes: None,
        }
    }
}

/// Partial update for the operator edit path
#[derive(Debug, Clone, Default)]
pub struct InstallmentItemUpdate {
    pub charge_date: Option<NaiveDate>,
    pub charge_month: Option<String>,
    pub amount: Option<Decimal>,
    pub status: Option<InstallmentStatus>,
    pub payment_method_id: Option<Uuid>,
    pub notes: Option<String>,
}
