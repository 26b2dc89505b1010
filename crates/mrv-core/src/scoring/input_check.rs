use crate::report::Report;
use crate::rules::RuleTable;
use crate::types::has_entries;

/// Basic-data checks. All checks run so every violation surfaces at once;
/// an empty list means the report may be scored.
pub fn check_basic_data(report: &Report, rules: &RuleTable) -> Vec<String> {
    let mut errors = Vec::new();

    if report.area_hectares < rules.min_area {
        errors.push(format!("Area too small: {} hectares", report.area_hectares));
    }
    if report.area_hectares > rules.max_area {
        errors.push(format!("Area too large: {} hectares", report.area_hectares));
    }
    if report.monitoring_period_months < rules.min_monitoring_period {
        errors.push(format!(
            "Monitoring period too short: {} months",
            report.monitoring_period_months
        ));
    }
    if report.monitoring_period_months > rules.max_monitoring_period {
        errors.push(format!(
            "Monitoring period too long: {} months",
            report.monitoring_period_months
        ));
    }
    if !has_entries(report.biomass_data.as_ref()) {
        errors.push("Missing biomass data".to_string());
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Attributes;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn base_report() -> Report {
        let mut biomass = Attributes::new();
        biomass.insert("tree_count".into(), json!(800));
        Report {
            location: "Gazi Bay, Kenya".into(),
            project_type: "mangrove".into(),
            area_hectares: dec!(40),
            tree_species: None,
            planting_date: None,
            monitoring_period_months: 24,
            biomass_data: Some(biomass),
            soil_data: None,
            additional_metrics: None,
        }
    }

    #[test]
    fn test_clean_report_passes() {
        assert!(check_basic_data(&base_report(), &RuleTable::builtin()).is_empty());
    }

    #[test]
    fn test_area_too_small() {
        let mut report = base_report();
        report.area_hectares = dec!(0.05);
        let errors = check_basic_data(&report, &RuleTable::builtin());
        assert_eq!(errors, vec!["Area too small: 0.05 hectares".to_string()]);
    }

    #[test]
    fn test_area_too_large() {
        let mut report = base_report();
        report.area_hectares = dec!(12000);
        let errors = check_basic_data(&report, &RuleTable::builtin());
        assert_eq!(errors, vec!["Area too large: 12000 hectares".to_string()]);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let rules = RuleTable::builtin();
        let mut report = base_report();
        report.area_hectares = dec!(0.1);
        report.monitoring_period_months = 6;
        assert!(check_basic_data(&report, &rules).is_empty());
        report.area_hectares = dec!(10000);
        report.monitoring_period_months = 120;
        assert!(check_basic_data(&report, &rules).is_empty());
    }

    #[test]
    fn test_monitoring_period_out_of_range() {
        let rules = RuleTable::builtin();
        let mut report = base_report();
        report.monitoring_period_months = 5;
        assert_eq!(
            check_basic_data(&report, &rules),
            vec!["Monitoring period too short: 5 months".to_string()]
        );
        report.monitoring_period_months = 121;
        assert_eq!(
            check_basic_data(&report, &rules),
            vec!["Monitoring period too long: 121 months".to_string()]
        );
    }

    #[test]
    fn test_empty_and_absent_biomass() {
        let rules = RuleTable::builtin();
        let mut report = base_report();
        report.biomass_data = Some(Attributes::new());
        assert_eq!(check_basic_data(&report, &rules), vec!["Missing biomass data"]);
        report.biomass_data = None;
        assert_eq!(check_basic_data(&report, &rules), vec!["Missing biomass data"]);
    }

    #[test]
    fn test_all_errors_reported_together() {
        let mut report = base_report();
        report.area_hectares = dec!(0.01);
        report.monitoring_period_months = 2;
        report.biomass_data = None;
        let errors = check_basic_data(&report, &RuleTable::builtin());
        assert_eq!(errors.len(), 3);
        assert!(errors[0].starts_with("Area too small"));
        assert!(errors[1].starts_with("Monitoring period too short"));
        assert_eq!(errors[2], "Missing biomass data");
    }
}
