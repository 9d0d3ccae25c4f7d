//! Model training handler
//!
//! Pure pass-through: the model service trains, we only relay the outcome.

use axum::{extract::{Path, State}, Json};
use serde::Serialize;

use crate::logic::ModelType;
use crate::predictor::TrainingOutcome;
use crate::{AppError, AppResult, AppState};

#[derive(Debug, Serialize)]
pub struct TrainResponse {
    pub success: bool,
    pub result: TrainingOutcome,
}

/// Trigger training of one model
pub async fn train(
    State(state): State<AppState>,
    Path(model): Path<String>,
) -> AppResult<Json<TrainResponse>> {
    let model = ModelType::parse(&model)
        .ok_or_else(|| AppError::NotFound(format!("Unknown model: {}", model)))?;

    tracing::info!("Training requested for {} model", model);
    let result = state.model_service.train(model).await?;

    if let Some(accuracy) = result.accuracy {
        tracing::info!("{} model trained, accuracy {:.3}", model, accuracy);
    }

    Ok(Json(TrainResponse {
        success: true,
        result,
    }))
}
