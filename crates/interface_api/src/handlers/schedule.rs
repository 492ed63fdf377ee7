//! Schedule handlers
//!
//! Read and operator-edit surfaces over the installment store. Bulk replace
//! feeds operator-curated schedules straight to the store, bypassing the
//! generator.

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use core_kernel::calendar::month_bucket;
use domain_schedule::InstallmentStatus;
use infra_db::{InstallmentItemUpdate, NewInstallment, PolicyRepository, ScheduleRepository};

use crate::dto::schedule::{BulkReplaceRequest, InstallmentResponse, InstallmentUpdateRequest};
use crate::error::ApiError;
use crate::AppState;

/// Returns a policy's schedule ordered by installment number
pub async fn get_schedule(
    State(state): State<AppState>,
    Path(policy_id): Path<Uuid>,
) -> Result<Json<Vec<InstallmentResponse>>, ApiError> {
    // 404 for an unknown policy rather than an empty schedule
    PolicyRepository::new(state.pool.clone())
        .fetch(policy_id)
        .await?;

    let rows = ScheduleRepository::new(state.pool.clone())
        .list_for_policy(policy_id)
        .await?;

    let today = state.calendar.today();
    let responses = rows
        .into_iter()
        .map(|row| InstallmentResponse::from_row(row, today))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(responses))
}

/// Operator edit of a single schedule item; never renumbers the plan
pub async fn update_schedule_item(
    State(state): State<AppState>,
    Path((policy_id, installment_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<InstallmentUpdateRequest>,
) -> Result<Json<InstallmentResponse>, ApiError> {
    request.validate()?;

    let update = InstallmentItemUpdate {
        charge_month: request.charge_date.map(month_bucket),
        charge_date: request.charge_date,
        amount: request.amount,
        status: request.status,
        payment_method_id: request.payment_method_id,
        notes: request.notes,
    };

    let row = ScheduleRepository::new(state.pool.clone())
        .update_item(policy_id, installment_id, update)
        .await?;

    Ok(Json(InstallmentResponse::from_row(
        row,
        state.calendar.today(),
    )?))
}

/// Replaces a policy's schedule with operator-supplied items, atomically
pub async fn bulk_replace(
    State(state): State<AppState>,
    Json(request): Json<BulkReplaceRequest>,
) -> Result<Json<Vec<InstallmentResponse>>, ApiError> {
    request.validate()?;

    let items = request
        .items
        .iter()
        .map(|item| NewInstallment {
            installment_number: item.installment_number,
            charge_date: item.charge_date,
            charge_month: item.charge_date.map(month_bucket),
            amount: item.amount,
            status: item.status.unwrap_or(InstallmentStatus::Planned),
            payment_method_id: item.payment_method_id,
            notes: item.notes.clone(),
        })
        .collect();

    let rows = ScheduleRepository::new(state.pool.clone())
        .replace_schedule(request.policy_id, items)
        .await?;

    let today = state.calendar.today();
    let responses = rows
        .into_iter()
        .map(|row| InstallmentResponse::from_row(row, today))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(responses))
}
