//! Payment-record repository
//!
//! The legacy expected-payment table reconciliation settles against, plus
//! the monthly aggregation queries behind the finance dashboard.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use core_kernel::Period;
use domain_schedule::{settle_status, PaymentRecordDraft, PaymentRecordStatus};

use crate::error::DatabaseError;

const RECORD_COLUMNS: &str = "payment_id, policy_id, payment_number, charge_date, \
     expected_amount, actual_amount, actual_date, status";

/// Repository for expected-payment records
#[derive(Debug, Clone)]
pub struct PaymentRecordRepository {
    pool: PgPool,
}

impl PaymentRecordRepository {
    /// Creates a new PaymentRecordRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Replaces the full record set for a policy, atomically.
    ///
    /// Same wholesale semantics as the installment store: delete-then-insert
    /// inside one transaction, never partially applied.
    pub async fn replace_for_policy(
        &self,
        policy_id: Uuid,
        drafts: Vec<PaymentRecordDraft>,
    ) -> Result<Vec<PaymentRecordRow>, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let exists = sqlx::query_scalar::<_, i32>("SELECT 1 FROM policies WHERE policy_id = $1")
            .bind(policy_id)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Err(DatabaseError::not_found("Policy", policy_id));
        }

        sqlx::query("DELETE FROM payment_records WHERE policy_id = $1")
            .bind(policy_id)
            .execute(&mut *tx)
            .await?;

        let insert_sql = format!(
            "INSERT INTO payment_records ({RECORD_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, NULL, NULL, $6) \
             RETURNING {RECORD_COLUMNS}"
        );

        let mut inserted = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let row = sqlx::query_as::<_, PaymentRecordRow>(&insert_sql)
                .bind(Uuid::new_v4())
                .bind(policy_id)
                .bind(draft.number as i32)
                .bind(draft.charge_date)
                .bind(draft.expected_amount.amount())
                .bind(PaymentRecordStatus::Open.to_string())
                .fetch_one(&mut *tx)
                .await?;
            inserted.push(row);
        }

        tx.commit().await?;
        Ok(inserted)
    }

    /// Lists a policy's records ordered by payment number
    pub async fn list_for_policy(
        &self,
        policy_id: Uuid,
    ) -> Result<Vec<PaymentRecordRow>, DatabaseError> {
        let sql = format!(
            "SELECT {RECORD_COLUMNS} FROM payment_records \
             WHERE policy_id = $1 ORDER BY payment_number"
        );
        let rows = sqlx::query_as::<_, PaymentRecordRow>(&sql)
            .bind(policy_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Settles a record with the actually-paid amount and date.
    ///
    /// The status becomes Paid, or PaidLate when the actual date is after
    /// the planned charge date.
    ///
    /// # Errors
    ///
    /// `NotFound` when the record does not exist or belongs to another
    /// policy.
    pub async fn mark_paid(
        &self,
        policy_id: Uuid,
        payment_id: Uuid,
        actual_amount: Decimal,
        actual_date: NaiveDate,
    ) -> Result<PaymentRecordRow, DatabaseError> {
        let fetch_sql = format!(
            "SELECT {RECORD_COLUMNS} FROM payment_records \
             WHERE payment_id = $1 AND policy_id = $2"
        );
        let current = sqlx::query_as::<_, PaymentRecordRow>(&fetch_sql)
            .bind(payment_id)
            .bind(policy_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Payment record", payment_id))?;

        let status = settle_status(current.charge_date, actual_date);

        let update_sql = format!(
            "UPDATE payment_records \
             SET actual_amount = $3, actual_date = $4, status = $5 \
             WHERE payment_id = $1 AND policy_id = $2 \
             RETURNING {RECORD_COLUMNS}"
        );
        let row = sqlx::query_as::<_, PaymentRecordRow>(&update_sql)
            .bind(payment_id)
            .bind(policy_id)
            .bind(actual_amount)
            .bind(actual_date)
            .bind(status.to_string())
            .fetch_one(&self.pool)
            .await?;

        Ok(row)
    }

    /// Expected-vs-paid totals for one calendar month
    pub async fn summary_for_period(&self, period: Period) -> Result<SummaryRow, DatabaseError> {
        let row = sqlx::query_as::<_, SummaryRow>(
            "SELECT \
                 'total' AS key, \
                 COALESCE(SUM(expected_amount), 0) AS expected, \
                 COALESCE(SUM(actual_amount) FILTER (WHERE status <> 'open'), 0) AS paid, \
                 COUNT(*) AS count \
             FROM payment_records \
             WHERE charge_date >= $1 AND charge_date < $2",
        )
        .bind(period.first_day())
        .bind(period.first_day_of_next())
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Monthly totals grouped by the owning policy's coverage type
    pub async fn summary_by_coverage_type(
        &self,
        period: Period,
    ) -> Result<Vec<SummaryRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, SummaryRow>(
            "SELECT \
                 p.coverage_type AS key, \
                 COALESCE(SUM(r.expected_amount), 0) AS expected, \
                 COALESCE(SUM(r.actual_amount) FILTER (WHERE r.status <> 'open'), 0) AS paid, \
                 COUNT(*) AS count \
             FROM payment_records r \
             JOIN policies p ON p.policy_id = r.policy_id \
             WHERE r.charge_date >= $1 AND r.charge_date < $2 \
             GROUP BY p.coverage_type \
             ORDER BY p.coverage_type",
        )
        .bind(period.first_day())
        .bind(period.first_day_of_next())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Monthly totals grouped by the owning policy's payment method
    pub async fn summary_by_payment_method(
        &self,
        period: Period,
    ) -> Result<Vec<SummaryRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, SummaryRow>(
            "SELECT \
                 COALESCE(m.display_name, 'unassigned') AS key, \
                 COALESCE(SUM(r.expected_amount), 0) AS expected, \
                 COALESCE(SUM(r.actual_amount) FILTER (WHERE r.status <> 'open'), 0) AS paid, \
                 COUNT(*) AS count \
             FROM payment_records r \
             JOIN policies p ON p.policy_id = r.policy_id \
             LEFT JOIN payment_methods m ON m.method_id = p.payment_method_id \
             WHERE r.charge_date >= $1 AND r.charge_date < $2 \
             GROUP BY COALESCE(m.display_name, 'unassigned') \
             ORDER BY 1",
        )
        .bind(period.first_day())
        .bind(period.first_day_of_next())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

/// Database row representation of a payment record
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PaymentRecordRow {
    pub payment_id: Uuid,
    pub policy_id: Uuid,
    pub payment_number: i32,
    pub charge_date: Option<NaiveDate>,
    pub expected_amount: Decimal,
    pub actual_amount: Option<Decimal>,
    pub actual_date: Option<NaiveDate>,
    pub status: String,
}

impl PaymentRecordRow {
    /// Parses the stored status token
    pub fn record_status(&self) -> Result<PaymentRecordStatus, DatabaseError> {
        Ok(self.status.parse()?)
    }
}

/// One row of an aggregation query
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SummaryRow {
    pub key: String,
    pub expected: Decimal,
    pub paid: Decimal,
    pub count: i64,
}
