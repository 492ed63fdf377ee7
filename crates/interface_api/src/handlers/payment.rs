//! Payment handlers
//!
//! Listing and settlement of expected-payment records. Settlement computes
//! on-time vs late from the planned charge date; the caller only supplies
//! what was actually paid and when.

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use infra_db::{PaymentRecordRepository, PolicyRepository};

use crate::dto::schedule::{MarkPaidRequest, PaymentRecordResponse};
use crate::error::ApiError;
use crate::AppState;

/// Returns a policy's expected-payment records ordered by payment number
pub async fn list_payments(
    State(state): State<AppState>,
    Path(policy_id): Path<Uuid>,
) -> Result<Json<Vec<PaymentRecordResponse>>, ApiError> {
    PolicyRepository::new(state.pool.clone())
        .fetch(policy_id)
        .await?;

    let rows = PaymentRecordRepository::new(state.pool.clone())
        .list_for_policy(policy_id)
        .await?;

    let today = state.calendar.today();
    let responses = rows
        .into_iter()
        .map(|row| PaymentRecordResponse::from_row(row, today))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(responses))
}

/// Settles a payment record with the actually-paid amount and date
pub async fn mark_paid(
    State(state): State<AppState>,
    Path((policy_id, payment_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<MarkPaidRequest>,
) -> Result<Json<PaymentRecordResponse>, ApiError> {
    request.validate()?;

    let row = PaymentRecordRepository::new(state.pool.clone())
        .mark_paid(
            policy_id,
            payment_id,
            request.actual_amount,
            request.actual_payment_date,
        )
        .await?;

    Ok(Json(PaymentRecordResponse::from_row(
        row,
        state.calendar.today(),
    )?))
}
