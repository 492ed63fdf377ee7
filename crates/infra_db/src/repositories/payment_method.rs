//! Payment-method directory access
//!
//! The scheduling engine only reads from the directory and only needs the
//! instrument's kind and charge day. An id that does not resolve - or
//! resolves to a row the engine cannot interpret - degrades to a manual
//! classification instead of failing: schedules must stay computable
//! without a valid instrument.

use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use domain_schedule::{MethodClassification, PaymentMethodKind};

use crate::error::DatabaseError;

/// Read-only repository over the payment-method directory
#[derive(Debug, Clone)]
pub struct PaymentMethodRepository {
    pool: PgPool,
}

impl PaymentMethodRepository {
    /// Creates a new PaymentMethodRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Resolves a method reference into its charge semantics.
    ///
    /// A missing reference or an unresolvable id classifies as manual; only
    /// infrastructure failures surface as errors.
    pub async fn resolve(
        &self,
        method_id: Option<Uuid>,
    ) -> Result<MethodClassification, DatabaseError> {
        let Some(method_id) = method_id else {
            return Ok(MethodClassification::manual());
        };

        let row = sqlx::query_as::<_, MethodRow>(
            "SELECT kind, charge_day FROM payment_methods WHERE method_id = $1",
        )
        .bind(method_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            warn!(%method_id, "payment method does not resolve, treating as manual");
            return Ok(MethodClassification::manual());
        };

        let kind: PaymentMethodKind = match row.kind.parse() {
            Ok(kind) => kind,
            Err(_) => {
                warn!(%method_id, kind = %row.kind, "unknown payment method kind, treating as manual");
                return Ok(MethodClassification::manual());
            }
        };

        Ok(MethodClassification::classify(
            kind,
            row.charge_day.map(|d| d.max(0) as u32),
        ))
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
struct MethodRow {
    kind: String,
    charge_day: Option<i32>,
}
