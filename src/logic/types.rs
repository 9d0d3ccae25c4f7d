//! Pipeline Types
//!
//! Data structures shared by the risk pipeline.
//! No classification or ranking logic lives here.

use std::collections::HashMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

// ============================================================================
// MODEL TYPE
// ============================================================================

/// The four independent failure-mode predictors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelType {
    Wearout,
    Thermal,
    Power,
    Controller,
}

impl ModelType {
    /// Fixed model order used for recommendations and tie-breaks
    pub const ALL: [ModelType; 4] = [
        ModelType::Wearout,
        ModelType::Thermal,
        ModelType::Power,
        ModelType::Controller,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelType::Wearout => "wearout",
            ModelType::Thermal => "thermal",
            ModelType::Power => "power",
            ModelType::Controller => "controller",
        }
    }

    /// Operator-facing name
    pub fn display_name(&self) -> &'static str {
        match self {
            ModelType::Wearout => "Wear-Out",
            ModelType::Thermal => "Thermal",
            ModelType::Power => "Power",
            ModelType::Controller => "Controller",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str().eq_ignore_ascii_case(s))
    }
}

impl std::fmt::Display for ModelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// MODEL RESULT (from external model service)
// ============================================================================

/// Output of one prediction model. Consumed once, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelResult {
    pub model_type: ModelType,
    /// Risk percentage (0 - 100)
    pub risk_percentage: f64,
    /// Feature name -> contribution percentage (0 - 100)
    #[serde(default)]
    pub contributions: HashMap<String, f64>,
    /// Free-form status reported by the model service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl ModelResult {
    pub fn new(model_type: ModelType, risk_percentage: f64) -> Self {
        Self {
            model_type,
            risk_percentage,
            contributions: HashMap::new(),
            status: None,
        }
    }

    pub fn with_contribution(mut self, name: &str, percentage: f64) -> Self {
        self.contributions.insert(name.to_string(), percentage);
        self
    }

    pub fn with_status(mut self, status: &str) -> Self {
        self.status = Some(status.to_string());
        self
    }
}

/// Clamp a percentage into [0, 100]; NaN maps to 0
pub fn clamp_percentage(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

// ============================================================================
// TELEMETRY SNAPSHOT
// ============================================================================

/// Ordered feature name -> value mapping for one prediction request.
///
/// Only constructed through the validating constructors in
/// [`crate::logic::validation`], so every value is finite and non-negative.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TelemetrySnapshot {
    pub(crate) values: Vec<(String, f64)>,
}

impl TelemetrySnapshot {
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(n, v)| (n.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Serialize for TelemetrySnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in &self.values {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

// ============================================================================
// CALIBRATION
// ============================================================================

/// Optional device-specific hints passed through to thermal display
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    /// Device temperature threshold in °C
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp_threshold: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_type_parse() {
        assert_eq!(ModelType::parse("thermal"), Some(ModelType::Thermal));
        assert_eq!(ModelType::parse("WEAROUT"), Some(ModelType::Wearout));
        assert_eq!(ModelType::parse("battery"), None);
    }

    #[test]
    fn test_model_type_serde() {
        let json = serde_json::to_string(&ModelType::Controller).unwrap();
        assert_eq!(json, "\"controller\"");
        let back: ModelType = serde_json::from_str("\"power\"").unwrap();
        assert_eq!(back, ModelType::Power);
    }

    #[test]
    fn test_clamp_percentage() {
        assert_eq!(clamp_percentage(-5.0), 0.0);
        assert_eq!(clamp_percentage(42.5), 42.5);
        assert_eq!(clamp_percentage(150.0), 100.0);
        assert_eq!(clamp_percentage(f64::NAN), 0.0);
    }

    #[test]
    fn test_snapshot_serializes_in_order() {
        let snapshot = TelemetrySnapshot {
            values: vec![("b".to_string(), 2.0), ("a".to_string(), 1.0)],
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        assert_eq!(json, r#"{"b":2.0,"a":1.0}"#);
    }
}
