//! Integration Tests for the Risk Pipeline
//!
//! Validation, normalization, ranking and aggregation working together.

#[cfg(test)]
mod integration_tests {
    use crate::logic::{
        evaluate, Calibration, ContributionTier, FeatureCatalog, ModelResult, ModelType,
        PipelineError, RankedContributions, RiskBand, RiskStatus, ScaleTable, TelemetrySnapshot,
    };

    fn four_results(wearout: f64, thermal: f64, power: f64, controller: f64) -> Vec<ModelResult> {
        vec![
            ModelResult::new(ModelType::Wearout, wearout)
                .with_contribution("Power_On_Hours", 40.0)
                .with_contribution("Percent_Life_Used", 60.0),
            ModelResult::new(ModelType::Thermal, thermal).with_contribution("Temperature_C", 100.0),
            ModelResult::new(ModelType::Power, power).with_contribution("Unsafe_Shutdowns", 100.0),
            ModelResult::new(ModelType::Controller, controller)
                .with_contribution("Media_Errors", 50.0)
                .with_contribution("CRC_Errors", 50.0),
        ]
    }

    fn snapshot(catalog: &FeatureCatalog) -> TelemetrySnapshot {
        TelemetrySnapshot::from_pairs(
            catalog,
            [
                ("Power_On_Hours", 25_000.0),
                ("Temperature_C", 72.0),
                ("Unsafe_Shutdowns", 900.0),
            ],
        )
        .unwrap()
    }

    /// Thermal-dominated drive ends in Danger with thermal advice only
    #[test]
    fn test_thermal_danger_scenario() {
        let catalog = FeatureCatalog::standard();
        let scale = ScaleTable::standard();
        let report = evaluate(
            &catalog,
            &scale,
            &snapshot(&catalog),
            &four_results(20.0, 72.0, 10.0, 30.0),
            Calibration::default(),
        )
        .unwrap();

        assert_eq!(report.summary.overall_risk, 72.0);
        assert_eq!(report.summary.status, RiskStatus::Danger);
        assert_eq!(report.thermal.band, RiskBand::High);
        assert_eq!(report.wearout.band, RiskBand::Low);

        let recs = &report.summary.recommendations;
        assert!(recs.iter().any(|r| r.starts_with("Thermal")));
        assert!(!recs.iter().any(|r| r.starts_with("Wear-Out") || r.starts_with("Power") || r.starts_with("Controller")));
    }

    /// Ranked contributions and the shared visualization vector per model
    #[test]
    fn test_model_views() {
        let catalog = FeatureCatalog::standard();
        let scale = ScaleTable::standard();
        let report = evaluate(
            &catalog,
            &scale,
            &snapshot(&catalog),
            &four_results(55.0, 10.0, 10.0, 10.0),
            Calibration::default(),
        )
        .unwrap();

        let wearout = report.view(ModelType::Wearout);
        let entries = wearout.contributions.entries();
        assert_eq!(entries[0].name, "Percent_Life_Used");
        assert_eq!(entries[0].tier, ContributionTier::Caution);
        assert_eq!(entries[1].name, "Power_On_Hours");

        // Controller tie resolved by catalog order
        let controller = report.view(ModelType::Controller).contributions.entries();
        assert_eq!(controller[0].name, "Media_Errors");
        assert_eq!(controller[1].name, "CRC_Errors");

        let points = &wearout.normalized;
        assert_eq!(points.len(), catalog.len());
        assert_eq!(points[0].name, "Power_On_Hours");
        assert!((points[0].normalized - 50.0).abs() < 1e-9);
        let shutdowns = points.iter().find(|p| p.name == "Unsafe_Shutdowns").unwrap();
        assert_eq!(shutdowns.normalized, 100.0);
        assert_eq!(shutdowns.raw, 900.0);
    }

    #[test]
    fn test_empty_contributions_render_placeholder() {
        let catalog = FeatureCatalog::standard();
        let mut results = four_results(10.0, 10.0, 10.0, 10.0);
        results[2].contributions.clear();

        let report = evaluate(
            &catalog,
            &ScaleTable::standard(),
            &TelemetrySnapshot::defaults(&catalog),
            &results,
            Calibration::default(),
        )
        .unwrap();

        assert_eq!(report.power.contributions, RankedContributions::Empty);
        assert_eq!(report.summary.status, RiskStatus::Healthy);
    }

    #[test]
    fn test_temp_threshold_only_on_thermal() {
        let catalog = FeatureCatalog::standard();
        let report = evaluate(
            &catalog,
            &ScaleTable::standard(),
            &TelemetrySnapshot::defaults(&catalog),
            &four_results(10.0, 10.0, 10.0, 10.0),
            Calibration { temp_threshold: Some(84.0) },
        )
        .unwrap();

        assert_eq!(report.thermal.temp_threshold, Some(84.0));
        assert_eq!(report.wearout.temp_threshold, None);
        assert_eq!(report.controller.temp_threshold, None);
    }

    #[test]
    fn test_out_of_range_risk_is_clamped() {
        let catalog = FeatureCatalog::standard();
        let report = evaluate(
            &catalog,
            &ScaleTable::standard(),
            &TelemetrySnapshot::defaults(&catalog),
            &four_results(-10.0, 180.0, 0.0, 0.0),
            Calibration::default(),
        )
        .unwrap();

        assert_eq!(report.wearout.risk_percentage, 0.0);
        assert_eq!(report.thermal.risk_percentage, 100.0);
        assert_eq!(report.summary.overall_risk, 100.0);
    }

    #[test]
    fn test_missing_and_duplicate_models() {
        let catalog = FeatureCatalog::standard();
        let scale = ScaleTable::standard();
        let snap = TelemetrySnapshot::defaults(&catalog);

        let mut results = four_results(1.0, 2.0, 3.0, 4.0);
        results.remove(3);
        let err = evaluate(&catalog, &scale, &snap, &results, Calibration::default()).unwrap_err();
        assert_eq!(err, PipelineError::MissingModel(ModelType::Controller));

        let mut results = four_results(1.0, 2.0, 3.0, 4.0);
        results.push(ModelResult::new(ModelType::Power, 9.0));
        let err = evaluate(&catalog, &scale, &snap, &results, Calibration::default()).unwrap_err();
        assert_eq!(err, PipelineError::DuplicateModel(ModelType::Power));
    }

    #[test]
    fn test_invalid_input_rejected_before_normalization() {
        let catalog = FeatureCatalog::standard();
        let result = TelemetrySnapshot::from_pairs(&catalog, [("Temperature_C", f64::NEG_INFINITY)]);
        assert!(result.is_err());
    }

    /// Result order does not matter, views always land in their slot
    #[test]
    fn test_results_in_any_order() {
        let catalog = FeatureCatalog::standard();
        let mut results = four_results(11.0, 22.0, 33.0, 44.0);
        results.reverse();

        let report = evaluate(
            &catalog,
            &ScaleTable::standard(),
            &TelemetrySnapshot::defaults(&catalog),
            &results,
            Calibration::default(),
        )
        .unwrap();

        assert_eq!(report.wearout.risk_percentage, 11.0);
        assert_eq!(report.controller.risk_percentage, 44.0);
        assert_eq!(report.summary.highest_risk, ModelType::Controller);
    }
}
