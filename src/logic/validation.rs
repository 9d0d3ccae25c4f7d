//! Boundary Validation
//!
//! The only place raw telemetry enters the pipeline. A snapshot is built
//! only if every value is a finite, non-negative number; otherwise all
//! offending fields are reported together in one error.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use super::catalog::FeatureCatalog;
use super::types::TelemetrySnapshot;

/// Why a single field was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidReason {
    NotNumeric,
    NotFinite,
    Negative,
}

impl InvalidReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvalidReason::NotNumeric => "not a number",
            InvalidReason::NotFinite => "not finite",
            InvalidReason::Negative => "negative",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvalidField {
    pub name: String,
    pub reason: InvalidReason,
}

/// Aggregate validation failure for a whole snapshot
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid telemetry values: {}", describe(.fields))]
pub struct InvalidValueError {
    pub fields: Vec<InvalidField>,
}

fn describe(fields: &[InvalidField]) -> String {
    fields
        .iter()
        .map(|f| format!("{} ({})", f.name, f.reason.as_str()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn check_value(value: f64) -> Option<InvalidReason> {
    if !value.is_finite() {
        Some(InvalidReason::NotFinite)
    } else if value < 0.0 {
        Some(InvalidReason::Negative)
    } else {
        None
    }
}

impl TelemetrySnapshot {
    /// Build a snapshot from numeric pairs.
    ///
    /// Catalog features come first in declaration order, missing ones
    /// filled with 0. Features outside the catalog follow, sorted by name.
    pub fn from_pairs<I, S>(catalog: &FeatureCatalog, pairs: I) -> Result<Self, InvalidValueError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut fields = Vec::new();
        let mut accepted: Vec<(String, f64)> = Vec::new();

        for (name, value) in pairs {
            let name = name.into();
            match check_value(value) {
                Some(reason) => fields.push(InvalidField { name, reason }),
                None => accepted.push((name, value)),
            }
        }

        if !fields.is_empty() {
            fields.sort_by(|a, b| a.name.cmp(&b.name));
            return Err(InvalidValueError { fields });
        }

        Ok(Self::assemble(catalog, accepted))
    }

    /// Build a snapshot from a decoded JSON object
    pub fn from_json_map(catalog: &FeatureCatalog, map: &Map<String, Value>) -> Result<Self, InvalidValueError> {
        let mut fields = Vec::new();
        let mut pairs = Vec::with_capacity(map.len());

        for (name, value) in map {
            match value.as_f64() {
                Some(v) => pairs.push((name.clone(), v)),
                None => fields.push(InvalidField {
                    name: name.clone(),
                    reason: InvalidReason::NotNumeric,
                }),
            }
        }

        match Self::from_pairs(catalog, pairs) {
            Ok(snapshot) if fields.is_empty() => Ok(snapshot),
            Ok(_) => {
                fields.sort_by(|a, b| a.name.cmp(&b.name));
                Err(InvalidValueError { fields })
            }
            Err(mut err) => {
                err.fields.extend(fields);
                err.fields.sort_by(|a, b| a.name.cmp(&b.name));
                Err(err)
            }
        }
    }

    /// Snapshot of the catalog defaults
    pub fn defaults(catalog: &FeatureCatalog) -> Self {
        Self {
            values: catalog
                .defaults()
                .into_iter()
                .map(|(n, v)| (n.to_string(), v))
                .collect(),
        }
    }

    fn assemble(catalog: &FeatureCatalog, mut accepted: Vec<(String, f64)>) -> Self {
        let mut values: Vec<(String, f64)> = catalog
            .names()
            .map(|name| {
                let value = accepted
                    .iter()
                    .rev()
                    .find(|(n, _)| n == name)
                    .map(|(_, v)| *v)
                    .unwrap_or(0.0);
                (name.to_string(), value)
            })
            .collect();

        accepted.retain(|(n, _)| !catalog.contains(n));
        accepted.sort_by(|a, b| a.0.cmp(&b.0));
        accepted.dedup_by(|later, earlier| later.0 == earlier.0);
        values.extend(accepted);

        Self { values }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_catalog_features_default_to_zero() {
        let catalog = FeatureCatalog::standard();
        let snapshot = TelemetrySnapshot::from_pairs(&catalog, [("Temperature_C", 48.0)]).unwrap();
        assert_eq!(snapshot.len(), catalog.len());
        assert_eq!(snapshot.get("Temperature_C"), Some(48.0));
        assert_eq!(snapshot.get("Power_On_Hours"), Some(0.0));
    }

    #[test]
    fn test_catalog_order_then_extras() {
        let catalog = FeatureCatalog::standard();
        let snapshot = TelemetrySnapshot::from_pairs(
            &catalog,
            [("Zeta", 1.0), ("CRC_Errors", 2.0), ("Alpha", 3.0)],
        )
        .unwrap();
        let names: Vec<&str> = snapshot.iter().map(|(n, _)| n).collect();
        assert_eq!(names[0], "Power_On_Hours");
        assert_eq!(&names[catalog.len()..], &["Alpha", "Zeta"]);
    }

    #[test]
    fn test_rejects_negative_and_non_finite_together() {
        let catalog = FeatureCatalog::standard();
        let err = TelemetrySnapshot::from_pairs(
            &catalog,
            [
                ("Temperature_C", -1.0),
                ("Media_Errors", f64::NAN),
                ("CRC_Errors", f64::INFINITY),
                ("Power_On_Hours", 10.0),
            ],
        )
        .unwrap_err();

        assert_eq!(err.fields.len(), 3);
        assert_eq!(err.fields[0].name, "CRC_Errors");
        assert_eq!(err.fields[0].reason, InvalidReason::NotFinite);
        assert_eq!(err.fields[2].reason, InvalidReason::Negative);
        assert!(err.to_string().contains("Temperature_C (negative)"));
    }

    #[test]
    fn test_json_non_numeric_rejected() {
        let catalog = FeatureCatalog::standard();
        let body = json!({ "Temperature_C": "hot", "Media_Errors": -2, "CRC_Errors": 1 });
        let err = TelemetrySnapshot::from_json_map(&catalog, body.as_object().unwrap()).unwrap_err();

        assert_eq!(err.fields.len(), 2);
        assert!(err.fields.iter().any(|f| f.name == "Temperature_C" && f.reason == InvalidReason::NotNumeric));
        assert!(err.fields.iter().any(|f| f.name == "Media_Errors" && f.reason == InvalidReason::Negative));
    }

    #[test]
    fn test_json_valid() {
        let catalog = FeatureCatalog::standard();
        let body = json!({ "Power_On_Hours": 1200, "Read_Error_Rate": 0.25 });
        let snapshot = TelemetrySnapshot::from_json_map(&catalog, body.as_object().unwrap()).unwrap();
        assert_eq!(snapshot.get("Power_On_Hours"), Some(1200.0));
        assert_eq!(snapshot.get("Read_Error_Rate"), Some(0.25));
    }

    #[test]
    fn test_defaults_snapshot() {
        let catalog = FeatureCatalog::standard();
        let snapshot = TelemetrySnapshot::defaults(&catalog);
        assert_eq!(snapshot.get("Total_TBW_TB"), Some(50.0));
        assert_eq!(snapshot.len(), 10);
    }
}
