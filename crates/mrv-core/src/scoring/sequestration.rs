//! Sequestration estimate.
//!
//! total = area x project rate x (months / 12) x biomass factor, floored at 0.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::biomass::biomass_factor;
use crate::error::MrvError;
use crate::report::Report;
use crate::rules::RuleTable;
use crate::types::{AnnualRate, TonnesCo2};
use crate::MrvResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequestrationEstimate {
    /// Project-type rate applied (t CO2/ha/yr).
    pub project_type_factor: AnnualRate,
    pub monitoring_years: Decimal,
    /// Estimate before the biomass adjustment.
    pub base_sequestration: TonnesCo2,
    pub biomass_factor: Decimal,
    /// Unrounded total, never negative.
    pub total: TonnesCo2,
}

/// Estimate total CO2 sequestered over the monitoring period.
pub fn estimate_sequestration(
    report: &Report,
    rules: &RuleTable,
) -> MrvResult<SequestrationEstimate> {
    let factor = rules.factor_for(&report.project_type);
    let monitoring_years = Decimal::from(report.monitoring_period_months) / MONTHS_PER_YEAR;

    let base = report
        .area_hectares
        .checked_mul(factor)
        .and_then(|annual| annual.checked_mul(monitoring_years))
        .ok_or_else(|| overflow("base sequestration"))?;

    let biomass = biomass_factor(report.biomass_data.as_ref(), &rules.policy.biomass);
    let adjusted = base
        .checked_mul(biomass)
        .ok_or_else(|| overflow("biomass adjustment"))?;

    Ok(SequestrationEstimate {
        project_type_factor: factor,
        monitoring_years,
        base_sequestration: base,
        biomass_factor: biomass,
        total: adjusted.max(Decimal::ZERO),
    })
}

fn overflow(what: &str) -> MrvError {
    MrvError::ComputationFailure {
        stage: "sequestration".into(),
        reason: format!("{what} overflowed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Attributes;
    use serde_json::json;

    fn base_report() -> Report {
        let mut biomass = Attributes::new();
        biomass.insert("above_ground_biomass".into(), json!(150));
        Report {
            location: "Sundarbans".into(),
            project_type: "mangrove".into(),
            area_hectares: dec!(50),
            tree_species: None,
            planting_date: None,
            monitoring_period_months: 24,
            biomass_data: Some(biomass),
            soil_data: None,
            additional_metrics: None,
        }
    }

    #[test]
    fn test_mangrove_with_above_ground_biomass() {
        let est = estimate_sequestration(&base_report(), &RuleTable::builtin()).unwrap();
        // base = 50 * 25 * 2 = 2500, factor 1.5
        assert_eq!(est.project_type_factor, dec!(25));
        assert_eq!(est.monitoring_years, dec!(2));
        assert_eq!(est.base_sequestration, dec!(2500));
        assert_eq!(est.biomass_factor, dec!(1.5));
        assert_eq!(est.total, dec!(3750));
    }

    #[test]
    fn test_unknown_type_uses_default_rate() {
        let mut report = base_report();
        report.project_type = "wetland".into();
        report.biomass_data = Some(json!({ "note": "survey pending" }).as_object().cloned().unwrap());
        let est = estimate_sequestration(&report, &RuleTable::builtin()).unwrap();
        // 50 * 10 * 2 * 1.0
        assert_eq!(est.project_type_factor, dec!(10));
        assert_eq!(est.total, dec!(1000));
    }

    #[test]
    fn test_fractional_years() {
        let mut report = base_report();
        report.project_type = "grassland".into();
        report.monitoring_period_months = 18;
        report.biomass_data = Some(json!({ "tree_count": 1000 }).as_object().cloned().unwrap());
        let est = estimate_sequestration(&report, &RuleTable::builtin()).unwrap();
        // 50 * 3 * 1.5 * 1.0 = 225
        assert_eq!(est.monitoring_years, dec!(1.5));
        assert_eq!(est.total, dec!(225));
    }

    #[test]
    fn test_linear_in_area() {
        let rules = RuleTable::builtin();
        let mut report = base_report();
        let small = estimate_sequestration(&report, &rules).unwrap().total;
        report.area_hectares = dec!(150);
        let large = estimate_sequestration(&report, &rules).unwrap().total;
        assert_eq!(large, small * dec!(3));
    }

    #[test]
    fn test_zero_rate_gives_zero() {
        let mut rules = RuleTable::builtin();
        rules.sequestration_factors.insert("barren".into(), Decimal::ZERO);
        let mut report = base_report();
        report.project_type = "barren".into();
        let est = estimate_sequestration(&report, &rules).unwrap();
        assert_eq!(est.total, Decimal::ZERO);
    }

    #[test]
    fn test_overflow_is_hard_failure() {
        let mut rules = RuleTable::builtin();
        rules
            .sequestration_factors
            .insert("mangrove".into(), Decimal::MAX);
        let mut report = base_report();
        report.area_hectares = dec!(10000);
        let err = estimate_sequestration(&report, &rules).unwrap_err();
        assert!(matches!(err, MrvError::ComputationFailure { .. }));
    }
}
