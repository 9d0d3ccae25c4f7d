//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct IndexResponse {
    message: &'static str,
    status: &'static str,
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    timestamp: i64,
    model_service: &'static str,
    predictors_loaded: bool,
}

/// Service banner
pub async fn index() -> Json<IndexResponse> {
    Json(IndexResponse {
        message: "NVMe Failure Prediction API",
        status: "running",
    })
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    let model_service = state.model_service.name();

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().timestamp(),
        model_service,
        predictors_loaded: model_service != "fallback",
    })
}
