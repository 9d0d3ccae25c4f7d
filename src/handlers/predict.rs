//! Prediction handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;
use validator::Validate;

use crate::logic::{evaluate, Calibration, PredictionReport, TelemetrySnapshot};
use crate::predictor::predict_all;
use crate::{AppError, AppResult, AppState};

/// Feature map plus an optional device temperature threshold
#[derive(Debug, Deserialize, Validate)]
pub struct PredictRequest {
    #[validate(range(min = 1.0, max = 200.0))]
    #[serde(default)]
    pub temp_threshold: Option<f64>,

    #[serde(flatten)]
    pub features: Map<String, Value>,
}

#[derive(Debug, Serialize)]
pub struct PredictMetadata {
    pub request_id: Uuid,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub predictors_loaded: bool,
    pub model_service: &'static str,
    pub temp_threshold: f64,
}

#[derive(Debug, Serialize)]
pub struct PredictResults {
    #[serde(flatten)]
    pub report: PredictionReport,
    pub metadata: PredictMetadata,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub success: bool,
    pub results: PredictResults,
}

/// Run all four models and aggregate their results
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> AppResult<Json<PredictResponse>> {
    let Json(req) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    req.validate()?;

    let request_id = Uuid::new_v4();
    let snapshot = TelemetrySnapshot::from_json_map(&state.catalog, &req.features)?;

    let temp_threshold = req.temp_threshold.unwrap_or(state.config.default_temp_threshold);
    let calibration = Calibration {
        temp_threshold: Some(temp_threshold),
    };

    tracing::debug!(%request_id, features = snapshot.len(), "Running prediction");

    let batch = predict_all(state.model_service.as_ref(), &snapshot, calibration).await;
    let report = evaluate(&state.catalog, &state.scale, &snapshot, &batch.results, calibration)?;

    tracing::info!(
        %request_id,
        status = %report.summary.status,
        overall_risk = report.summary.overall_risk,
        "Prediction complete"
    );

    Ok(Json(PredictResponse {
        success: true,
        results: PredictResults {
            report,
            metadata: PredictMetadata {
                request_id,
                timestamp: chrono::Utc::now(),
                predictors_loaded: batch.all_answered && state.model_service.name() != "fallback",
                model_service: state.model_service.name(),
                temp_threshold,
            },
        },
    }))
}
