//! Model Service Client
//!
//! The prediction models are an external, opaque service. This module
//! talks to it over HTTP, or stands in with fixed fallback results when no
//! service is configured or a model fails to answer.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

use crate::logic::{Calibration, ModelResult, ModelType, TelemetrySnapshot};

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelServiceError {
    #[error("network error: {0}")]
    Network(String),
    #[error("model service timed out")]
    Timeout,
    #[error("model service returned HTTP {0}")]
    Server(u16),
    #[error("invalid model service response: {0}")]
    Parse(String),
    #[error("{0}")]
    Unsupported(String),
}

impl From<reqwest::Error> for ModelServiceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ModelServiceError::Timeout
        } else if err.is_decode() {
            ModelServiceError::Parse(err.to_string())
        } else {
            ModelServiceError::Network(err.to_string())
        }
    }
}

// ============================================================================
// SERVICE TRAIT
// ============================================================================

/// Result of a training run, passed through untouched
#[derive(Debug, Clone, Serialize)]
pub struct TrainingOutcome {
    pub model: ModelType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
    pub details: Value,
}

#[axum::async_trait]
pub trait ModelService: Send + Sync {
    /// Short identifier for health output
    fn name(&self) -> &'static str;

    async fn predict(
        &self,
        model: ModelType,
        snapshot: &TelemetrySnapshot,
        calibration: Calibration,
    ) -> Result<ModelResult, ModelServiceError>;

    async fn train(&self, model: ModelType) -> Result<TrainingOutcome, ModelServiceError>;
}

pub type SharedModelService = Arc<dyn ModelService>;

// ============================================================================
// HTTP SERVICE
// ============================================================================

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    features: &'a TelemetrySnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    temp_threshold: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    risk_percentage: f64,
    #[serde(default)]
    contributions: HashMap<String, f64>,
    #[serde(default)]
    status: Option<String>,
}

/// Client for a remote prediction service
pub struct HttpModelService {
    base_url: String,
    http_client: reqwest::Client,
}

impl HttpModelService {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, ModelServiceError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    fn predict_url(&self, model: ModelType) -> String {
        format!("{}/predict/{}", self.base_url, model.as_str())
    }

    fn train_url(&self, model: ModelType) -> String {
        format!("{}/train/{}", self.base_url, model.as_str())
    }
}

#[axum::async_trait]
impl ModelService for HttpModelService {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn predict(
        &self,
        model: ModelType,
        snapshot: &TelemetrySnapshot,
        calibration: Calibration,
    ) -> Result<ModelResult, ModelServiceError> {
        let body = PredictRequest {
            features: snapshot,
            temp_threshold: match model {
                ModelType::Thermal => calibration.temp_threshold,
                _ => None,
            },
        };

        let response = self.http_client
            .post(self.predict_url(model))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ModelServiceError::Server(response.status().as_u16()));
        }

        let parsed: PredictResponse = response.json().await?;
        if !parsed.risk_percentage.is_finite() {
            return Err(ModelServiceError::Parse("risk_percentage is not finite".to_string()));
        }

        Ok(ModelResult {
            model_type: model,
            risk_percentage: parsed.risk_percentage,
            contributions: parsed.contributions,
            status: parsed.status,
        })
    }

    async fn train(&self, model: ModelType) -> Result<TrainingOutcome, ModelServiceError> {
        let response = self.http_client
            .post(self.train_url(model))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ModelServiceError::Server(response.status().as_u16()));
        }

        let details: Value = response.json().await?;
        Ok(TrainingOutcome {
            model,
            accuracy: details.get("accuracy").and_then(Value::as_f64),
            details,
        })
    }
}

// ============================================================================
// FALLBACK SERVICE
// ============================================================================

/// Fixed result used when a model cannot answer
pub fn fallback_result(model: ModelType) -> ModelResult {
    match model {
        ModelType::Wearout => ModelResult::new(model, 25.0)
            .with_contribution("Power_On_Hours", 50.0)
            .with_contribution("Percent_Life_Used", 50.0),
        ModelType::Thermal => ModelResult::new(model, 25.0)
            .with_contribution("Temperature_C", 100.0),
        ModelType::Power => ModelResult::new(model, 20.0)
            .with_contribution("Unsafe_Shutdowns", 100.0),
        ModelType::Controller => ModelResult::new(model, 20.0)
            .with_contribution("Media_Errors", 50.0)
            .with_contribution("CRC_Errors", 50.0),
    }
    .with_status("Fallback")
}

/// Stand-in used when no model service is configured
#[derive(Debug, Default)]
pub struct FallbackModelService;

#[axum::async_trait]
impl ModelService for FallbackModelService {
    fn name(&self) -> &'static str {
        "fallback"
    }

    async fn predict(
        &self,
        model: ModelType,
        _snapshot: &TelemetrySnapshot,
        _calibration: Calibration,
    ) -> Result<ModelResult, ModelServiceError> {
        Ok(fallback_result(model))
    }

    async fn train(&self, model: ModelType) -> Result<TrainingOutcome, ModelServiceError> {
        Err(ModelServiceError::Unsupported(format!(
            "Training the {} model requires a model service",
            model
        )))
    }
}

// ============================================================================
// BATCH PREDICTION
// ============================================================================

/// Four model results for one request
#[derive(Debug, Clone)]
pub struct PredictionBatch {
    pub results: Vec<ModelResult>,
    /// False if any model was replaced by its fallback
    pub all_answered: bool,
}

/// Query all four models concurrently, substituting fallbacks on failure
pub async fn predict_all(
    service: &dyn ModelService,
    snapshot: &TelemetrySnapshot,
    calibration: Calibration,
) -> PredictionBatch {
    let (wearout, thermal, power, controller) = tokio::join!(
        service.predict(ModelType::Wearout, snapshot, calibration),
        service.predict(ModelType::Thermal, snapshot, calibration),
        service.predict(ModelType::Power, snapshot, calibration),
        service.predict(ModelType::Controller, snapshot, calibration),
    );

    let mut all_answered = true;
    let results = ModelType::ALL
        .into_iter()
        .zip([wearout, thermal, power, controller])
        .map(|(model, outcome)| match outcome {
            Ok(result) if result.model_type == model => result,
            Ok(result) => {
                tracing::warn!(
                    "Model service answered {} for {} request, using fallback",
                    result.model_type, model
                );
                all_answered = false;
                fallback_result(model)
            }
            Err(e) => {
                tracing::warn!("{} prediction failed: {}, using fallback", model, e);
                all_answered = false;
                fallback_result(model)
            }
        })
        .collect();

    PredictionBatch {
        results,
        all_answered,
    }
}
