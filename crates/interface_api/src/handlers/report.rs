//! Monthly report handlers
//!
//! Expected-vs-paid aggregates behind the finance dashboard, keyed by
//! calendar month and optionally grouped by coverage type or payment
//! method.

use axum::{
    extract::{Query, State},
    Json,
};

use infra_db::PaymentRecordRepository;

use crate::dto::report::{GroupedSummaryResponse, PeriodSummaryResponse, ReportQuery};
use crate::error::ApiError;
use crate::AppState;

/// Expected-vs-paid totals for one month
pub async fn monthly_summary(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<PeriodSummaryResponse>, ApiError> {
    let period = query.period()?;
    let row = PaymentRecordRepository::new(state.pool.clone())
        .summary_for_period(period)
        .await?;
    Ok(Json(PeriodSummaryResponse::new(period, row)))
}

/// Monthly totals grouped by coverage type
pub async fn summary_by_coverage(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<GroupedSummaryResponse>, ApiError> {
    let period = query.period()?;
    let rows = PaymentRecordRepository::new(state.pool.clone())
        .summary_by_coverage_type(period)
        .await?;
    Ok(Json(GroupedSummaryResponse::new(period, rows)))
}

/// Monthly totals grouped by payment method
pub async fn summary_by_method(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<GroupedSummaryResponse>, ApiError> {
    let period = query.period()?;
    let rows = PaymentRecordRepository::new(state.pool.clone())
        .summary_by_payment_method(period)
        .await?;
    Ok(Json(GroupedSummaryResponse::new(period, rows)))
}
