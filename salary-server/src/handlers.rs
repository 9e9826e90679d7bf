use axum::{Json, extract::State, extract::rejection::JsonRejection};
use salary_core::{CalculationRequest, CalculationResponse, ExchangeRate, SalaryCalculator};
use serde::Serialize;

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// GET /api/health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// GET /api/exchange-rate
/// Current USD to COP rate with its source (api, cache or fallback).
pub async fn get_exchange_rate(State(state): State<AppState>) -> Json<ExchangeRate> {
    Json(state.rates.usd_to_cop().await)
}

/// POST /api/calculate
/// Full salary breakdown for the submitted salary, expenses and extra income.
pub async fn calculate(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> ApiResult<Json<CalculationResponse>> {
    let Json(request) = payload?;

    let response = SalaryCalculator::new(&state.constants).calculate(&request)?;

    Ok(Json(response))
}
