//! Risk Pipeline
//!
//! Wires the pure components together for one prediction request:
//! snapshot + four model results → per-model views + summary.
//! No I/O and no shared mutable state; safe to run concurrently.

use serde::Serialize;
use thiserror::Error;

use super::catalog::{FeatureCatalog, ScaleTable};
use super::classifier::{classify_single, RiskBand};
use super::normalizer::{normalize_snapshot, NormalizedPoint};
use super::ranker::{top_contributors, RankedContributions, MAX_CONTRIBUTORS};
use super::summary::{aggregate, ModelRisks, Summary};
use super::types::{clamp_percentage, Calibration, ModelResult, ModelType, TelemetrySnapshot};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    #[error("no result supplied for {0} model")]
    MissingModel(ModelType),
    #[error("more than one result supplied for {0} model")]
    DuplicateModel(ModelType),
}

/// Presentation view of one model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelView {
    pub model_type: ModelType,
    pub risk_percentage: f64,
    pub band: RiskBand,
    pub color: &'static str,
    pub contributions: RankedContributions,
    pub normalized: Vec<NormalizedPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Device temperature threshold, thermal model only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temp_threshold: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionReport {
    pub wearout: ModelView,
    pub thermal: ModelView,
    pub power: ModelView,
    pub controller: ModelView,
    pub summary: Summary,
}

impl PredictionReport {
    pub fn view(&self, model: ModelType) -> &ModelView {
        match model {
            ModelType::Wearout => &self.wearout,
            ModelType::Thermal => &self.thermal,
            ModelType::Power => &self.power,
            ModelType::Controller => &self.controller,
        }
    }
}

/// Run the full pipeline over one snapshot and its four model results
pub fn evaluate(
    catalog: &FeatureCatalog,
    scale: &ScaleTable,
    snapshot: &TelemetrySnapshot,
    results: &[ModelResult],
    calibration: Calibration,
) -> Result<PredictionReport, PipelineError> {
    let ordered = order_results(results)?;

    for (name, _) in snapshot.iter() {
        if !scale.contains(name) {
            tracing::warn!(feature = name, "No scale entry, using default maximum");
        }
    }
    let normalized = normalize_snapshot(snapshot, scale);

    let mut risks = ModelRisks::default();
    let [wearout, thermal, power, controller] = ordered.map(|result| {
        let view = build_view(catalog, result, &normalized, calibration);
        risks.set(view.model_type, view.risk_percentage);
        view
    });

    let summary = aggregate(&risks);
    tracing::debug!(
        overall_risk = summary.overall_risk,
        status = %summary.status,
        highest = %summary.highest_risk,
        "Prediction aggregated"
    );

    Ok(PredictionReport {
        wearout,
        thermal,
        power,
        controller,
        summary,
    })
}

/// Exactly one result per model, in fixed model order
fn order_results(results: &[ModelResult]) -> Result<[&ModelResult; 4], PipelineError> {
    let mut slots: [Option<&ModelResult>; 4] = [None; 4];

    for result in results {
        let idx = model_index(result.model_type);
        if slots[idx].is_some() {
            return Err(PipelineError::DuplicateModel(result.model_type));
        }
        slots[idx] = Some(result);
    }

    let mut ordered = Vec::with_capacity(4);
    for (idx, slot) in slots.into_iter().enumerate() {
        ordered.push(slot.ok_or(PipelineError::MissingModel(ModelType::ALL[idx]))?);
    }
    Ok([ordered[0], ordered[1], ordered[2], ordered[3]])
}

fn model_index(model: ModelType) -> usize {
    match model {
        ModelType::Wearout => 0,
        ModelType::Thermal => 1,
        ModelType::Power => 2,
        ModelType::Controller => 3,
    }
}

fn build_view(
    catalog: &FeatureCatalog,
    result: &ModelResult,
    normalized: &[NormalizedPoint],
    calibration: Calibration,
) -> ModelView {
    let risk = clamp_percentage(result.risk_percentage);
    let band = classify_single(risk);

    if result.contributions.is_empty() {
        tracing::debug!(model = %result.model_type, "Model supplied no contributions");
    }

    ModelView {
        model_type: result.model_type,
        risk_percentage: risk,
        band,
        color: band.color(),
        contributions: top_contributors(&result.contributions, catalog, MAX_CONTRIBUTORS),
        normalized: normalized.to_vec(),
        status: result.status.clone(),
        temp_threshold: match result.model_type {
            ModelType::Thermal => calibration.temp_threshold,
            _ => None,
        },
    }
}
