use chrono::{TimeZone, Utc};
use mrv_core::rules::ConfidencePolicy;
use mrv_core::scoring::confidence::score_confidence;
use mrv_core::scoring::{evaluate, evaluate_at, DetailedAnalysis};
use mrv_core::{Attributes, Report, RuleTable, ValidationStatus};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;

// ===========================================================================
// Fixtures
// ===========================================================================

fn attrs(value: serde_json::Value) -> Option<Attributes> {
    value.as_object().cloned()
}

fn mangrove_report() -> Report {
    Report {
        location: "Sundarbans, Bangladesh".into(),
        project_type: "mangrove".into(),
        area_hectares: dec!(50),
        tree_species: None,
        planting_date: None,
        monitoring_period_months: 24,
        biomass_data: attrs(json!({ "above_ground_biomass": 150 })),
        soil_data: None,
        additional_metrics: None,
    }
}

// ===========================================================================
// Scenarios
// ===========================================================================

#[test]
fn test_mangrove_scenario_end_to_end() {
    let result = evaluate(&mangrove_report(), &RuleTable::builtin()).unwrap();

    assert_eq!(result.status, ValidationStatus::Anomaly);
    assert_eq!(result.estimated_sequestration, dec!(3750.0));
    assert_eq!(result.confidence_score, dec!(0.79));
    assert_eq!(result.detailed_analysis.anomaly_score(), Some(dec!(0.3333)));
    assert_eq!(
        result.validation_notes,
        "Report requires additional review due to anomalies or low confidence. \
         Estimated sequestration: 75.0 tons CO2/hectare. \
         Consider including soil carbon measurements for improved accuracy."
    );
}

#[test]
fn test_tiny_area_rejected() {
    let mut report = mangrove_report();
    report.area_hectares = dec!(0.05);
    let result = evaluate(&report, &RuleTable::builtin()).unwrap();

    assert_eq!(result.status, ValidationStatus::Anomaly);
    assert_eq!(result.estimated_sequestration, Decimal::ZERO);
    assert_eq!(result.confidence_score, Decimal::ZERO);
    assert_eq!(
        result.detailed_analysis,
        DetailedAnalysis::Rejected {
            errors: vec!["Area too small: 0.05 hectares".to_string()],
        }
    );
}

#[test]
fn test_unrecognised_type_uses_default_rate() {
    let mut report = mangrove_report();
    report.project_type = "wetland".into();
    let result = evaluate(&report, &RuleTable::builtin()).unwrap();

    match result.detailed_analysis {
        DetailedAnalysis::Scored {
            project_type_factor,
            ..
        } => assert_eq!(project_type_factor, dec!(10.0)),
        other => panic!("expected scored analysis, got {other:?}"),
    }
    // 50 * 10 * 2 * 1.5
    assert_eq!(result.estimated_sequestration, dec!(1500));
}

#[test]
fn test_decoded_json_report_matches_struct() {
    let value = json!({
        "project_location": "Sundarbans, Bangladesh",
        "project_type": "mangrove",
        "area_hectares": "50",
        "monitoring_period_months": 24,
        "biomass_data": { "above_ground_biomass": 150, "survey_team": "north", "plots": [1, 2] }
    });
    let report = Report::from_value(value).unwrap();
    let result = evaluate(&report, &RuleTable::builtin()).unwrap();
    assert_eq!(result.estimated_sequestration, dec!(3750));
}

// ===========================================================================
// Properties
// ===========================================================================

fn valid_grid() -> Vec<Report> {
    let areas = [dec!(0.1), dec!(0.9), dec!(1), dec!(37.5), dec!(999), dec!(1001), dec!(10000)];
    let months = [6u32, 11, 12, 24, 36, 37, 60, 61, 120];
    let types = ["mangrove", "tropical_forest", "grassland", "agroforestry", "peatland"];
    let biomass = [
        json!({ "above_ground_biomass": 150 }),
        json!({ "above_ground_biomass": 3 }),
        json!({ "tree_count": 12000 }),
        json!({ "tree_count": "many" }),
        json!({ "notes": "no counts" }),
    ];

    let mut reports = Vec::new();
    for (i, area) in areas.iter().enumerate() {
        for (j, m) in months.iter().enumerate() {
            let mut r = mangrove_report();
            r.area_hectares = *area;
            r.monitoring_period_months = *m;
            r.project_type = types[(i + j) % types.len()].into();
            r.biomass_data = attrs(biomass[(i * 3 + j) % biomass.len()].clone());
            if j % 2 == 0 {
                r.soil_data = attrs(json!({ "ph": 6.8 }));
            }
            reports.push(r);
        }
    }
    reports
}

#[test]
fn test_valid_range_always_scores() {
    let rules = RuleTable::builtin();
    for report in valid_grid() {
        let result = evaluate(&report, &rules).unwrap();
        assert!(result.estimated_sequestration >= Decimal::ZERO);
        assert!(result.confidence_score >= Decimal::ZERO && result.confidence_score <= Decimal::ONE);
        let anomaly = result
            .detailed_analysis
            .anomaly_score()
            .expect("in-range report must be scored");
        assert!(anomaly >= Decimal::ZERO && anomaly <= Decimal::ONE);
    }
}

#[test]
fn test_evaluation_is_idempotent() {
    let rules = RuleTable::builtin();
    for report in valid_grid() {
        let a = evaluate_at(&report, &rules, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap())
            .unwrap();
        let b = evaluate_at(&report, &rules, Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap())
            .unwrap();
        assert_eq!(a.estimated_sequestration, b.estimated_sequestration);
        assert_eq!(a.confidence_score, b.confidence_score);
        assert_eq!(a.status, b.status);
        assert_eq!(a.validation_notes, b.validation_notes);
    }
}

#[test]
fn test_sequestration_linear_in_area() {
    let rules = RuleTable::builtin();
    let mut report = mangrove_report();
    report.area_hectares = dec!(10);
    let base = evaluate(&report, &rules).unwrap().estimated_sequestration;

    for multiple in [2, 5, 40, 100] {
        report.area_hectares = dec!(10) * Decimal::from(multiple);
        let scaled = evaluate(&report, &rules).unwrap().estimated_sequestration;
        assert_eq!(scaled, base * Decimal::from(multiple));
    }
}

#[test]
fn test_duration_fit_boundaries() {
    let policy = ConfidencePolicy::default();
    let fit = |months: u32| {
        let mut report = mangrove_report();
        report.monitoring_period_months = months;
        score_confidence(&report, dec!(0.1), &policy).duration_fit
    };
    assert_eq!(fit(12), dec!(1.0));
    assert_eq!(fit(36), dec!(1.0));
    assert_ne!(fit(11), dec!(1.0));
    assert_ne!(fit(37), dec!(1.0));
}

#[test]
fn test_rule_table_not_mutated_by_evaluation() {
    let rules = RuleTable::builtin();
    let snapshot = rules.clone();
    for report in valid_grid() {
        evaluate(&report, &rules).unwrap();
    }
    assert_eq!(rules, snapshot);
}

#[test]
fn test_concurrent_evaluations_agree() {
    let rules = RuleTable::builtin();
    let reports = valid_grid();
    let at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    let expected: Vec<_> = reports
        .iter()
        .map(|r| evaluate_at(r, &rules, at).unwrap())
        .collect();

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                s.spawn(|| {
                    reports
                        .iter()
                        .map(|r| evaluate_at(r, &rules, at).unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn test_tuned_policy_changes_decision() {
    let mut rules = RuleTable::builtin();
    rules.policy.decision.max_anomaly = dec!(0.34);
    rules.validate().unwrap();
    let result = evaluate(&mangrove_report(), &rules).unwrap();
    // anomaly 0.3333 now passes the gate, confidence 0.789 > 0.6
    assert_eq!(result.status, ValidationStatus::Validated);
}
