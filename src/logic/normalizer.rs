//! Normalizer
//!
//! Maps raw feature values onto a shared [0, 100] visualization axis and
//! back. Unknown features scale against the default maximum (100).
//!
//! `denormalize(normalize(v))` is exact only while `v <= max`: values above
//! the maximum are clamped to 100 on the way in and come back as `max`.

use serde::Serialize;

use super::catalog::ScaleTable;
use super::types::TelemetrySnapshot;

/// Raw value -> [0, 100]. Clamped at the top only; inputs are non-negative.
pub fn normalize(value: f64, feature_name: &str, scale: &ScaleTable) -> f64 {
    let max_value = scale.max_value(feature_name);
    ((value / max_value) * 100.0).min(100.0)
}

/// [0, 100] -> raw value, rounded to 2 decimals for display
pub fn denormalize(normalized: f64, feature_name: &str, scale: &ScaleTable) -> f64 {
    let max_value = scale.max_value(feature_name);
    round2((normalized / 100.0) * max_value)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// One point of the visualization vector
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedPoint {
    pub name: String,
    pub raw: f64,
    pub normalized: f64,
}

/// Normalize every feature of a snapshot, keeping snapshot order
pub fn normalize_snapshot(snapshot: &TelemetrySnapshot, scale: &ScaleTable) -> Vec<NormalizedPoint> {
    snapshot
        .iter()
        .map(|(name, raw)| NormalizedPoint {
            name: name.to_string(),
            raw,
            normalized: normalize(raw, name, scale),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_normalize_below_max() {
        let scale = ScaleTable::standard();
        assert!(approx(normalize(25_000.0, "Power_On_Hours", &scale), 50.0));
        assert!(approx(normalize(35.0, "Temperature_C", &scale), 35.0));
        assert!(approx(normalize(0.0, "Media_Errors", &scale), 0.0));
    }

    #[test]
    fn test_normalize_clamps_at_max() {
        let scale = ScaleTable::standard();
        assert_eq!(normalize(100.0, "Temperature_C", &scale), 100.0);
        assert_eq!(normalize(250.0, "Temperature_C", &scale), 100.0);
        assert_eq!(normalize(1e12, "Power_On_Hours", &scale), 100.0);
    }

    #[test]
    fn test_unknown_feature_uses_default_max() {
        let scale = ScaleTable::standard();
        assert!(approx(normalize(42.0, "Fan_Speed", &scale), 42.0));
        assert_eq!(normalize(420.0, "Fan_Speed", &scale), 100.0);
        assert!(approx(denormalize(42.0, "Fan_Speed", &scale), 42.0));
    }

    #[test]
    fn test_denormalize_rounds() {
        let scale = ScaleTable::standard();
        // 33.333..% of 10 = 3.333.. -> 3.33
        assert_eq!(denormalize(100.0 / 3.0, "Read_Error_Rate", &scale), 3.33);
    }

    #[test]
    fn test_round_trip_within_range() {
        let scale = ScaleTable::standard();
        for (name, value) in [
            ("Power_On_Hours", 12_345.0),
            ("Total_TBW_TB", 50.0),
            ("Read_Error_Rate", 0.5),
            ("Unsafe_Shutdowns", 500.0),
        ] {
            let back = denormalize(normalize(value, name, &scale), name, &scale);
            assert!((back - value).abs() <= 0.005, "{name}: {back} != {value}");
        }
    }

    #[test]
    fn test_round_trip_above_max_is_lossy() {
        let scale = ScaleTable::standard();
        let back = denormalize(normalize(900.0, "Unsafe_Shutdowns", &scale), "Unsafe_Shutdowns", &scale);
        assert_eq!(back, 500.0);
    }
}
