//! Router tests against an in-process app using the fixed rate backend.

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use salary_core::TaxConstants;
use salary_rates::FixedRateProvider;
use salary_server::{AppState, create_router};
use serde_json::{Value, json};
use tower::ServiceExt;

fn app() -> Router {
    let state = AppState::new(
        TaxConstants::colombia_2026(),
        Arc::new(FixedRateProvider::new(dec!(4000))),
    );
    create_router(state)
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(
    uri: &str,
    body: &Value,
) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn health_reports_ok() {
    let (status, body) = send(get("/api/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn exchange_rate_returns_rate_source_and_timestamp() {
    let (status, body) = send(get("/api/exchange-rate")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rate"].as_f64(), Some(4000.0));
    assert_eq!(body["source"], "fallback");
    assert!(body["lastUpdated"].is_string());
}

#[tokio::test]
async fn calculate_returns_full_breakdown() {
    let request = json!({
        "salary": 2000,
        "currency": "USD",
        "dollarRate": 4000,
        "expenses": [{ "name": "Rent", "value": 1500000 }],
        "nonSalaryIncome": [{ "name": "Bonus", "value": 100, "currency": "USD" }]
    });

    let (status, body) = send(post_json("/api/calculate", &request)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["grossSalary"]["cop"].as_f64(), Some(8000000.0));
    assert_eq!(body["grossSalary"]["usd"].as_f64(), Some(2000.0));
    assert_eq!(body["nonSalaryIncome"]["total"].as_f64(), Some(400000.0));
    assert_eq!(body["totalIncome"]["cop"].as_f64(), Some(8400000.0));
    assert_eq!(body["taxes"]["health"].as_f64(), Some(320000.0));
    assert_eq!(body["expenses"]["total"].as_f64(), Some(1500000.0));
    assert!(body["periodBreakdown"]["hourly"]["cop"].is_number());
    assert!(body["percentages"]["remaining"].is_number());
}

#[tokio::test]
async fn calculate_rejects_negative_salary_with_json_error() {
    let request = json!({ "salary": -100, "currency": "COP", "dollarRate": 0 });

    let (status, body) = send(post_json("/api/calculate", &request)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "salary must not be negative, got -100");
}

#[tokio::test]
async fn calculate_rejects_overflowing_amounts_with_json_error() {
    let request = json!({ "salary": 1e25, "currency": "USD", "dollarRate": 1e5 });

    let (status, body) = send(post_json("/api/calculate", &request)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "amounts are too large to calculate");
}

#[tokio::test]
async fn calculate_rejects_overflowing_income_sum_with_json_error() {
    let request = json!({
        "salary": 5e28,
        "currency": "COP",
        "nonSalaryIncome": [{ "name": "Bonus", "value": 5e28, "currency": "COP" }]
    });

    let (status, body) = send(post_json("/api/calculate", &request)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "amounts are too large to calculate");
}

#[tokio::test]
async fn calculate_rejects_malformed_body_with_json_error() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/calculate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();

    let (status, body) = send(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid request body"));
}

#[tokio::test]
async fn calculate_rejects_unknown_currency() {
    let request = json!({ "salary": 100, "currency": "EUR" });

    let (status, body) = send(post_json("/api/calculate", &request)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let (status, _) = send(get("/api/unknown")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
