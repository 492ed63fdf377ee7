//! Router-level tests
//!
//! Exercises routing, request validation, and error mapping without a live
//! database: the pool is lazy and every asserted path rejects before any
//! query runs.

use axum::http::StatusCode;
use axum_test::TestServer;
use interface_api::{config::ApiConfig, create_router};
use serde_json::json;
use sqlx::postgres::PgPoolOptions;

fn test_server() -> TestServer {
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://localhost/fleetpay_test")
        .expect("lazy pool never connects eagerly");
    let router = create_router(pool, ApiConfig::default()).expect("default config builds a router");
    TestServer::new(router).expect("test server")
}

#[tokio::test]
async fn test_health_endpoint() {
    let server = test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    response.assert_json(&json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let server = test_server();

    let response = server.get("/api/v1/garages").await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_policy_rejects_zero_installments() {
    let server = test_server();

    let response = server
        .post("/api/v1/policies")
        .json(&json!({
            "coverage_type": "comprehensive",
            "insurer": "Shield Mutual",
            "total_premium": "7200.00",
            "installment_count": 0
        }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_create_policy_rejects_negative_premium() {
    let server = test_server();

    let response = server
        .post("/api/v1/policies")
        .json(&json!({
            "coverage_type": "comprehensive",
            "insurer": "Shield Mutual",
            "total_premium": "-100.00",
            "installment_count": 12
        }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_create_policy_rejects_charge_day_29() {
    let server = test_server();

    let response = server
        .post("/api/v1/policies")
        .json(&json!({
            "coverage_type": "comprehensive",
            "insurer": "Shield Mutual",
            "total_premium": "7200.00",
            "installment_count": 12,
            "charge_day": 29
        }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_monthly_report_rejects_month_13() {
    let server = test_server();

    let response = server.get("/api/v1/reports/monthly?year=2025&month=13").await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_policy_path_requires_uuid() {
    let server = test_server();

    let response = server.get("/api/v1/policies/not-a-uuid").await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_bulk_replace_rejects_invalid_item_numbers() {
    let server = test_server();

    let response = server
        .post("/api/v1/schedule/bulk-replace")
        .json(&json!({
            "policy_id": "8f0c2ffc-1f9f-4f80-9f53-7b0f1c2d3e4a",
            "items": [{ "installment_number": 0, "amount": "600.00" }]
        }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}
