//! Rule table and scoring policy.
//!
//! The rule table is the only "model" the validator has: physical bounds,
//! per-project-type sequestration rates and every threshold the scorers use.
//! It is built once, checked with [`RuleTable::validate`], and then shared
//! read-only by every evaluation.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::MrvError;
use crate::types::{AnnualRate, Hectares, Months, Score};
use crate::MrvResult;

/// Key every factor table must carry.
pub const DEFAULT_PROJECT_TYPE: &str = "default";

// ---------------------------------------------------------------------------
// Rule table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleTable {
    pub min_area: Hectares,
    pub max_area: Hectares,
    pub min_monitoring_period: Months,
    pub max_monitoring_period: Months,
    /// Annual tonnes CO2 per hectare by project type.
    pub sequestration_factors: BTreeMap<String, AnnualRate>,
    #[serde(default)]
    pub policy: ScoringPolicy,
}

impl RuleTable {
    /// The rule table shipped with the service.
    pub fn builtin() -> Self {
        let mut factors = BTreeMap::new();
        factors.insert("tropical_forest".to_string(), dec!(15.0));
        factors.insert("mangrove".to_string(), dec!(25.0));
        factors.insert("agroforestry".to_string(), dec!(8.0));
        factors.insert("grassland".to_string(), dec!(3.0));
        factors.insert(DEFAULT_PROJECT_TYPE.to_string(), dec!(10.0));

        RuleTable {
            min_area: dec!(0.1),
            max_area: dec!(10000),
            min_monitoring_period: 6,
            max_monitoring_period: 120,
            sequestration_factors: factors,
            policy: ScoringPolicy::default(),
        }
    }

    /// Parse and check a rule table from JSON.
    pub fn from_json_str(json: &str) -> MrvResult<Self> {
        let table: RuleTable = serde_json::from_str(json)?;
        table.validate()?;
        Ok(table)
    }

    /// Rate for `project_type`, falling back to the `default` entry for
    /// unrecognised types.
    pub fn factor_for(&self, project_type: &str) -> AnnualRate {
        self.sequestration_factors
            .get(project_type)
            .or_else(|| self.sequestration_factors.get(DEFAULT_PROJECT_TYPE))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    pub fn project_types(&self) -> Vec<String> {
        self.sequestration_factors.keys().cloned().collect()
    }

    /// Consistency checks. A table that fails must not be used.
    pub fn validate(&self) -> MrvResult<()> {
        if !self.sequestration_factors.contains_key(DEFAULT_PROJECT_TYPE) {
            return Err(invalid(
                "sequestration_factors",
                "a 'default' factor is required",
            ));
        }
        for (project_type, rate) in &self.sequestration_factors {
            if *rate < Decimal::ZERO {
                return Err(invalid(
                    "sequestration_factors",
                    &format!("factor for '{project_type}' cannot be negative"),
                ));
            }
        }
        if self.min_area <= Decimal::ZERO {
            return Err(invalid("min_area", "must be positive"));
        }
        if self.min_area > self.max_area {
            return Err(invalid("min_area", "must not exceed max_area"));
        }
        if self.min_monitoring_period > self.max_monitoring_period {
            return Err(invalid(
                "min_monitoring_period",
                "must not exceed max_monitoring_period",
            ));
        }
        self.policy.validate()
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::builtin()
    }
}

fn invalid(field: &str, reason: &str) -> MrvError {
    MrvError::InvalidRules {
        field: field.into(),
        reason: reason.into(),
    }
}

fn check_unit(field: &str, value: Score) -> MrvResult<()> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(invalid(field, "must lie in [0, 1]"));
    }
    Ok(())
}

fn check_range(field: &str, lo: Decimal, hi: Decimal) -> MrvResult<()> {
    if lo > hi {
        return Err(invalid(field, "lower clamp exceeds upper clamp"));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Scoring policy
// ---------------------------------------------------------------------------

/// Every clamp, bucket and threshold used by the scorers. These encode
/// policy rather than physics and may be overridden per deployment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringPolicy {
    pub biomass: BiomassPolicy,
    pub anomaly: AnomalyPolicy,
    pub confidence: ConfidencePolicy,
    pub decision: DecisionPolicy,
    pub notes: NotesPolicy,
}

impl ScoringPolicy {
    pub fn validate(&self) -> MrvResult<()> {
        let b = &self.biomass;
        if b.above_ground_divisor <= Decimal::ZERO || b.tree_count_divisor <= Decimal::ZERO {
            return Err(invalid("policy.biomass", "divisors must be positive"));
        }
        check_range("policy.biomass.above_ground", b.above_ground_min, b.above_ground_max)?;
        check_range("policy.biomass.tree_count", b.tree_count_min, b.tree_count_max)?;

        let a = &self.anomaly;
        if a.rate_ceiling_multiplier < Decimal::ZERO {
            return Err(invalid(
                "policy.anomaly.rate_ceiling_multiplier",
                "cannot be negative",
            ));
        }
        for (field, v) in [
            ("policy.anomaly.rate_elevated_fraction", a.rate_elevated_fraction),
            ("policy.anomaly.rate_high_score", a.rate_high_score),
            ("policy.anomaly.rate_elevated_score", a.rate_elevated_score),
            ("policy.anomaly.rate_normal_score", a.rate_normal_score),
            ("policy.anomaly.long_duration_score", a.long_duration_score),
            ("policy.anomaly.short_duration_score", a.short_duration_score),
            ("policy.anomaly.normal_duration_score", a.normal_duration_score),
            ("policy.anomaly.large_area_score", a.large_area_score),
            ("policy.anomaly.small_area_score", a.small_area_score),
            ("policy.anomaly.normal_area_score", a.normal_area_score),
        ] {
            check_unit(field, v)?;
        }

        let c = &self.confidence;
        if c.short_min_months > c.ideal_min_months
            || c.ideal_min_months > c.ideal_max_months
            || c.ideal_max_months > c.extended_max_months
        {
            return Err(invalid(
                "policy.confidence",
                "duration windows must be ordered",
            ));
        }
        for (field, v) in [
            ("policy.confidence.completeness_base", c.completeness_base),
            ("policy.confidence.biomass_weight", c.biomass_weight),
            ("policy.confidence.soil_weight", c.soil_weight),
            ("policy.confidence.species_weight", c.species_weight),
            ("policy.confidence.additional_metrics_weight", c.additional_metrics_weight),
            ("policy.confidence.ideal_fit", c.ideal_fit),
            ("policy.confidence.short_fit", c.short_fit),
            ("policy.confidence.extended_fit", c.extended_fit),
            ("policy.confidence.fallback_fit", c.fallback_fit),
        ] {
            check_unit(field, v)?;
        }

        let d = &self.decision;
        for (field, v) in [
            ("policy.decision.max_anomaly", d.max_anomaly),
            ("policy.decision.min_confidence", d.min_confidence),
            ("policy.decision.high_quality_max_anomaly", d.high_quality_max_anomaly),
            ("policy.decision.high_quality_min_confidence", d.high_quality_min_confidence),
        ] {
            check_unit(field, v)?;
        }
        Ok(())
    }
}

/// Clamp ranges for the biomass adjustment factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiomassPolicy {
    pub above_ground_divisor: Decimal,
    pub above_ground_min: Decimal,
    pub above_ground_max: Decimal,
    pub tree_count_divisor: Decimal,
    pub tree_count_min: Decimal,
    pub tree_count_max: Decimal,
}

impl Default for BiomassPolicy {
    fn default() -> Self {
        BiomassPolicy {
            above_ground_divisor: dec!(100),
            above_ground_min: dec!(0.5),
            above_ground_max: dec!(2.0),
            tree_count_divisor: dec!(1000),
            tree_count_min: dec!(0.7),
            tree_count_max: dec!(1.5),
        }
    }
}

/// Bucket thresholds and scores for the three anomaly signals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnomalyPolicy {
    /// Expected maximum per-hectare total = project rate x this multiplier.
    pub rate_ceiling_multiplier: Decimal,
    /// Fraction of the expected maximum above which the rate is "elevated".
    pub rate_elevated_fraction: Decimal,
    pub rate_high_score: Score,
    pub rate_elevated_score: Score,
    pub rate_normal_score: Score,
    pub long_duration_months: Months,
    pub short_duration_months: Months,
    pub long_duration_score: Score,
    pub short_duration_score: Score,
    pub normal_duration_score: Score,
    pub large_area_hectares: Hectares,
    pub small_area_hectares: Hectares,
    pub large_area_score: Score,
    pub small_area_score: Score,
    pub normal_area_score: Score,
}

impl Default for AnomalyPolicy {
    fn default() -> Self {
        AnomalyPolicy {
            rate_ceiling_multiplier: dec!(2),
            rate_elevated_fraction: dec!(0.7),
            rate_high_score: dec!(0.8),
            rate_elevated_score: dec!(0.4),
            rate_normal_score: dec!(0.1),
            long_duration_months: 60,
            short_duration_months: 12,
            long_duration_score: dec!(0.3),
            short_duration_score: dec!(0.5),
            normal_duration_score: dec!(0.1),
            large_area_hectares: dec!(1000),
            small_area_hectares: dec!(1),
            large_area_score: dec!(0.4),
            small_area_score: dec!(0.3),
            normal_area_score: dec!(0.1),
        }
    }
}

/// Completeness weights and duration-fit windows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidencePolicy {
    pub completeness_base: Score,
    pub biomass_weight: Score,
    pub soil_weight: Score,
    pub species_weight: Score,
    pub additional_metrics_weight: Score,
    /// `[ideal_min_months, ideal_max_months]` scores `ideal_fit`.
    pub ideal_min_months: Months,
    pub ideal_max_months: Months,
    /// `[short_min_months, ideal_min_months)` scores `short_fit`.
    pub short_min_months: Months,
    /// `(ideal_max_months, extended_max_months]` scores `extended_fit`.
    pub extended_max_months: Months,
    pub ideal_fit: Score,
    pub short_fit: Score,
    pub extended_fit: Score,
    pub fallback_fit: Score,
}

impl Default for ConfidencePolicy {
    fn default() -> Self {
        ConfidencePolicy {
            completeness_base: dec!(0.5),
            biomass_weight: dec!(0.2),
            soil_weight: dec!(0.15),
            species_weight: dec!(0.1),
            additional_metrics_weight: dec!(0.05),
            ideal_min_months: 12,
            ideal_max_months: 36,
            short_min_months: 6,
            extended_max_months: 60,
            ideal_fit: dec!(1.0),
            short_fit: dec!(0.7),
            extended_fit: dec!(0.8),
            fallback_fit: dec!(0.5),
        }
    }
}

/// The status gate and the quality-sentence thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionPolicy {
    /// Validated requires anomaly strictly below this.
    pub max_anomaly: Score,
    /// Validated requires confidence strictly above this.
    pub min_confidence: Score,
    pub high_quality_max_anomaly: Score,
    pub high_quality_min_confidence: Score,
}

impl Default for DecisionPolicy {
    fn default() -> Self {
        DecisionPolicy {
            max_anomaly: dec!(0.3),
            min_confidence: dec!(0.6),
            high_quality_max_anomaly: dec!(0.2),
            high_quality_min_confidence: dec!(0.8),
        }
    }
}

/// Month boundaries for the duration caveat in the notes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotesPolicy {
    pub short_period_months: Months,
    pub extended_period_months: Months,
}

impl Default for NotesPolicy {
    fn default() -> Self {
        NotesPolicy {
            short_period_months: 12,
            extended_period_months: 36,
        }
    }
}
