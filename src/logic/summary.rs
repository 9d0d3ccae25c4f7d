//! Summary Aggregator
//!
//! Combines the four model risks into one operator-facing summary.
//! Overall risk is the maximum, never an average: one failing subsystem
//! must not be diluted by three healthy ones.

use std::collections::BTreeMap;

use serde::Serialize;

use super::classifier::{classify_status, needs_attention, RiskStatus, MEDIUM_THRESHOLD};
use super::types::{clamp_percentage, ModelType};

/// One risk percentage per model type
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ModelRisks {
    pub wearout: f64,
    pub thermal: f64,
    pub power: f64,
    pub controller: f64,
}

impl ModelRisks {
    pub fn new(wearout: f64, thermal: f64, power: f64, controller: f64) -> Self {
        Self {
            wearout,
            thermal,
            power,
            controller,
        }
    }

    pub fn get(&self, model: ModelType) -> f64 {
        match model {
            ModelType::Wearout => self.wearout,
            ModelType::Thermal => self.thermal,
            ModelType::Power => self.power,
            ModelType::Controller => self.controller,
        }
    }

    pub fn set(&mut self, model: ModelType, risk: f64) {
        match model {
            ModelType::Wearout => self.wearout = risk,
            ModelType::Thermal => self.thermal = risk,
            ModelType::Power => self.power = risk,
            ModelType::Controller => self.controller = risk,
        }
    }

    /// (model, clamped risk) in fixed model order
    pub fn iter(&self) -> impl Iterator<Item = (ModelType, f64)> + '_ {
        ModelType::ALL
            .into_iter()
            .map(move |m| (m, clamp_percentage(self.get(m))))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub overall_risk: f64,
    pub status: RiskStatus,
    /// Attention icon (overall >= 50), independent of the status text
    pub needs_attention: bool,
    /// First model in fixed order carrying the maximum risk
    pub highest_risk: ModelType,
    pub recommendations: Vec<String>,
    pub per_model_risk: BTreeMap<ModelType, f64>,
}

/// Build the summary for one prediction request
pub fn aggregate(risks: &ModelRisks) -> Summary {
    let mut highest = (ModelType::Wearout, f64::NEG_INFINITY);
    for (model, risk) in risks.iter() {
        if risk > highest.1 {
            highest = (model, risk);
        }
    }
    let (highest_risk, overall_risk) = highest;

    let status = classify_status(overall_risk);

    Summary {
        overall_risk,
        status,
        needs_attention: needs_attention(overall_risk),
        highest_risk,
        recommendations: recommendations(risks, overall_risk, status),
        per_model_risk: risks.iter().collect(),
    }
}

fn recommendations(risks: &ModelRisks, overall_risk: f64, status: RiskStatus) -> Vec<String> {
    if overall_risk < MEDIUM_THRESHOLD {
        return vec![
            "Drive health is good".to_string(),
            "Continue regular monitoring".to_string(),
            "No immediate action required".to_string(),
        ];
    }

    let mut out: Vec<String> = risks
        .iter()
        .filter(|(_, risk)| *risk > MEDIUM_THRESHOLD)
        .map(|(model, risk)| model_recommendation(model, risk))
        .collect();

    match status {
        RiskStatus::Danger => {
            out.push("Immediate backup recommended".to_string());
            out.push("Consider drive replacement".to_string());
        }
        _ => {
            out.push("Backup data soon".to_string());
            out.push("Consider preventive maintenance".to_string());
        }
    }

    out
}

fn model_recommendation(model: ModelType, risk: f64) -> String {
    let advice = match model {
        ModelType::Wearout => "plan replacement, the NAND is nearing its endurance limit",
        ModelType::Thermal => "improve airflow or cooling around the drive",
        ModelType::Power => "check power supply stability and avoid unsafe shutdowns",
        ModelType::Controller => "update firmware and watch media and CRC error counters",
    };
    format!("{} risk at {:.1}%: {}", model.display_name(), risk, advice)
}
