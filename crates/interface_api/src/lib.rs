//! HTTP API Layer
//!
//! REST surface for the fleet back office using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: policy CRUD orchestration (schedule generation and the
//!   read-triggered expiry sweep), schedule and payment surfaces, monthly
//!   reports
//! - **DTOs**: request/response objects with `validator`-checked invariants
//! - **Error Handling**: one JSON error shape with the status-code mapping
//!   of the scheduling error taxonomy
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, config::ApiConfig};
//!
//! let app = create_router(pool, ApiConfig::default())?;
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;

use axum::{
    routing::{get, post, put},
    Router,
};
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use core_kernel::{BusinessCalendar, CalendarError};

use crate::config::ApiConfig;
use crate::handlers::{health, payment, policy, report, schedule};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: ApiConfig,
    pub calendar: BusinessCalendar,
}

/// Creates the main API router
///
/// # Errors
///
/// Fails when the configured timezone is not a valid IANA name.
pub fn create_router(pool: PgPool, config: ApiConfig) -> Result<Router, CalendarError> {
    let calendar = config.business_calendar()?;
    let state = AppState {
        pool,
        config,
        calendar,
    };

    // Public routes (no API prefix)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Policy routes, including the nested schedule and payment surfaces
    let policy_routes = Router::new()
        .route("/", post(policy::create_policy).get(policy::list_policies))
        .route(
            "/:id",
            get(policy::get_policy)
                .put(policy::update_policy)
                .delete(policy::delete_policy),
        )
        .route("/:id/schedule", get(schedule::get_schedule))
        .route(
            "/:id/schedule/:installment_id",
            put(schedule::update_schedule_item),
        )
        .route("/:id/payments", get(payment::list_payments))
        .route("/:id/payments/:payment_id", put(payment::mark_paid));

    // Operator-curated schedules go straight to the store
    let schedule_routes = Router::new().route("/bulk-replace", post(schedule::bulk_replace));

    // Finance dashboard aggregates
    let report_routes = Router::new()
        .route("/monthly", get(report::monthly_summary))
        .route("/monthly/by-coverage", get(report::summary_by_coverage))
        .route("/monthly/by-method", get(report::summary_by_method));

    let api_routes = Router::new()
        .nest("/policies", policy_routes)
        .nest("/schedule", schedule_routes)
        .nest("/reports", report_routes);

    Ok(Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state))
}
