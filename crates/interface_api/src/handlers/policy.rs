//! Policy handlers
//!
//! Create and update orchestrate schedule generation: resolve the payment
//! method, derive the first charge date, generate both schedule variants and
//! persist them wholesale. List and detail reads run the expiry sweep first.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::{debug, warn};
use uuid::Uuid;
use validator::Validate;

use core_kernel::Money;
use domain_schedule::{
    first_charge_date, generate_installments, generate_payment_records, regeneration_required,
    PolicyStatus, ScheduleParams, ScheduleState, SETTLEMENT_CURRENCY,
};
use infra_db::{
    NewInstallment, NewPolicy, PaymentMethodRepository, PaymentRecordRepository, PolicyFilter,
    PolicyPatch, PolicyRepository, PolicyRow, ScheduleRepository,
};

use crate::dto::policy::{PolicyListQuery, PolicyResponse, PolicyWriteRequest};
use crate::error::ApiError;
use crate::AppState;

/// Creates a policy and generates its payment schedule
pub async fn create_policy(
    State(state): State<AppState>,
    Json(request): Json<PolicyWriteRequest>,
) -> Result<(StatusCode, Json<PolicyResponse>), ApiError> {
    request.validate()?;

    let policies = PolicyRepository::new(state.pool.clone());
    let row = policies
        .insert(NewPolicy {
            policy_number: request.policy_number.clone(),
            coverage_type: request.coverage_type.clone(),
            insurer: request.insurer.clone(),
            policy_type: request.policy_type.clone(),
            vehicle_id: request.vehicle_id,
            start_date: request.start_date,
            expiry_date: request.expiry_date,
            total_premium: request.total_premium,
            installment_count: request.installment_count,
            charge_day: request.charge_day,
            payment_method_id: request.payment_method_id,
            status: request.status.unwrap_or(PolicyStatus::Active),
            schedule_state: ScheduleState::NotGenerated,
            notes: request.notes.clone(),
        })
        .await?;

    let row = finish_generation(&state, &policies, row).await?;
    Ok((StatusCode::CREATED, Json(PolicyResponse::from_row(row)?)))
}

/// Overwrites a policy and regenerates its schedule when a deriving field
/// changed (or a previous generation is outstanding)
pub async fn update_policy(
    State(state): State<AppState>,
    Path(policy_id): Path<Uuid>,
    Json(request): Json<PolicyWriteRequest>,
) -> Result<Json<PolicyResponse>, ApiError> {
    request.validate()?;

    let policies = PolicyRepository::new(state.pool.clone());
    let before = policies.fetch(policy_id).await?;

    let status = match request.status {
        Some(status) => status,
        None => before.policy_status()?,
    };
    let after = policies
        .update(
            policy_id,
            PolicyPatch {
                policy_number: request.policy_number.clone(),
                coverage_type: request.coverage_type.clone(),
                insurer: request.insurer.clone(),
                policy_type: request.policy_type.clone(),
                vehicle_id: request.vehicle_id,
                start_date: request.start_date,
                expiry_date: request.expiry_date,
                total_premium: request.total_premium,
                installment_count: request.installment_count,
                charge_day: request.charge_day,
                payment_method_id: request.payment_method_id,
                status,
                notes: request.notes.clone(),
            },
        )
        .await?;

    // Regenerate when a trigger field changed, or when an earlier
    // generation never completed (re-saving retries it).
    let needs_regeneration = before.regen_state()? != ScheduleState::Generated
        || regeneration_required(&before.terms(), &after.terms());

    let row = if needs_regeneration {
        finish_generation(&state, &policies, after).await?
    } else {
        after
    };

    Ok(Json(PolicyResponse::from_row(row)?))
}

/// Lists policies, sweeping expired ones first
pub async fn list_policies(
    State(state): State<AppState>,
    Query(query): Query<PolicyListQuery>,
) -> Result<Json<Vec<PolicyResponse>>, ApiError> {
    let policies = PolicyRepository::new(state.pool.clone());
    run_sweep(&state, &policies).await;

    let rows = policies
        .list(PolicyFilter {
            vehicle_id: query.vehicle_id,
            status: query.status,
        })
        .await?;

    let responses = rows
        .into_iter()
        .map(PolicyResponse::from_row)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(responses))
}

/// Fetches a policy, sweeping expired ones first
pub async fn get_policy(
    State(state): State<AppState>,
    Path(policy_id): Path<Uuid>,
) -> Result<Json<PolicyResponse>, ApiError> {
    let policies = PolicyRepository::new(state.pool.clone());
    run_sweep(&state, &policies).await;

    let row = policies.fetch(policy_id).await?;
    Ok(Json(PolicyResponse::from_row(row)?))
}

/// Deletes a policy; its installments and payment records cascade
pub async fn delete_policy(
    State(state): State<AppState>,
    Path(policy_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    PolicyRepository::new(state.pool.clone())
        .delete(policy_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Runs the expiry sweep, best-effort: a failure is logged and never blocks
/// the read that triggered it.
async fn run_sweep(state: &AppState, policies: &PolicyRepository) {
    match policies.sweep_expired(state.calendar.today()).await {
        Ok(0) => {}
        Ok(swept) => debug!(swept, "expired policies transitioned to ended"),
        Err(err) => warn!(error = %err, "expiry sweep failed; statuses may be stale until the next read"),
    }
}

/// Regenerates both schedule variants and records the outcome in the
/// policy's schedule state.
///
/// On failure the policy edit stays saved and the previous schedule remains
/// untouched; the state is marked stale so the next save retries.
async fn finish_generation(
    state: &AppState,
    policies: &PolicyRepository,
    row: PolicyRow,
) -> Result<PolicyRow, ApiError> {
    let policy_id = row.policy_id;
    match regenerate_schedules(state, &row).await {
        Ok(()) => {
            policies
                .set_schedule_state(policy_id, ScheduleState::Generated)
                .await?;
            Ok(policies.fetch(policy_id).await?)
        }
        Err(err) => {
            warn!(%policy_id, error = %err, "schedule generation failed; previous schedule left intact");
            if let Err(state_err) = policies
                .set_schedule_state(policy_id, ScheduleState::StaleNeedsRegeneration)
                .await
            {
                warn!(%policy_id, error = %state_err, "failed to record stale schedule state");
            }
            Err(err)
        }
    }
}

/// Generates and persists the installment plan and the expected-payment
/// records for a policy's current terms.
async fn regenerate_schedules(state: &AppState, policy: &PolicyRow) -> Result<(), ApiError> {
    let methods = PaymentMethodRepository::new(state.pool.clone());
    let classification = methods.resolve(policy.payment_method_id).await?;

    let total_premium = Money::new(policy.total_premium, SETTLEMENT_CURRENCY);
    let installment_count = policy.installment_count.max(0) as u32;

    let params = ScheduleParams {
        total_premium,
        installment_count,
        first_charge: first_charge_date(policy.start_date, &classification),
    };
    let drafts = generate_installments(&params)?;
    let records = generate_payment_records(
        total_premium,
        installment_count,
        policy.start_date,
        policy.charge_day.map(|d| d.max(0) as u32),
    )?;

    ScheduleRepository::new(state.pool.clone())
        .replace_schedule(
            policy.policy_id,
            drafts.iter().map(NewInstallment::from_draft).collect(),
        )
        .await?;
    PaymentRecordRepository::new(state.pool.clone())
        .replace_for_policy(policy.policy_id, records)
        .await?;

    Ok(())
}
