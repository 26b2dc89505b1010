//! The evaluation entry point.
//!
//! Covers:
//! 1. **Basic-data checks** -- any violation short-circuits to an anomaly with
//!    zero sequestration and zero confidence.
//! 2. **Sequestration estimate** -- area x rate x years x biomass factor.
//! 3. **Anomaly score** -- mean of rate, duration and area buckets.
//! 4. **Confidence score** -- mean of completeness, inverse anomaly and
//!    duration fit.
//! 5. **Decision and notes** -- policy gate plus deterministic text.
//!
//! All arithmetic uses `rust_decimal::Decimal`. No `f64`.

use chrono::{DateTime, Utc};
use log::{info, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::anomaly::score_anomaly;
use super::confidence::score_confidence;
use super::decision::{decide_status, generate_notes, rejection_notes};
use super::input_check::check_basic_data;
use super::sequestration::estimate_sequestration;
use crate::report::Report;
use crate::rules::RuleTable;
use crate::types::{AnnualRate, Score, TonnesCo2, ValidationStatus};
use crate::MrvResult;

const OUTPUT_DP: u32 = 2;
const ANALYSIS_DP: u32 = 4;

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub status: ValidationStatus,
    /// Total tonnes CO2, rounded to 2 places.
    #[serde(with = "rust_decimal::serde::float")]
    pub estimated_sequestration: TonnesCo2,
    /// 0-1, rounded to 2 places.
    #[serde(with = "rust_decimal::serde::float")]
    pub confidence_score: Score,
    pub validation_notes: String,
    pub detailed_analysis: DetailedAnalysis,
}

/// Breakdown attached to every result. A report rejected by the basic-data
/// checks carries only its error list. Figures serialise as JSON numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DetailedAnalysis {
    Scored {
        #[serde(with = "rust_decimal::serde::float")]
        anomaly_score: Score,
        #[serde(with = "rust_decimal::serde::float")]
        sequestration_per_hectare: TonnesCo2,
        #[serde(with = "rust_decimal::serde::float")]
        project_type_factor: AnnualRate,
        #[serde(with = "rust_decimal::serde::float")]
        biomass_factor: Decimal,
        #[serde(with = "rust_decimal::serde::float")]
        monitoring_duration_years: Decimal,
        timestamp: DateTime<Utc>,
    },
    Rejected {
        errors: Vec<String>,
    },
}

impl DetailedAnalysis {
    pub fn anomaly_score(&self) -> Option<Score> {
        match self {
            DetailedAnalysis::Scored { anomaly_score, .. } => Some(*anomaly_score),
            DetailedAnalysis::Rejected { .. } => None,
        }
    }

    pub fn errors(&self) -> &[String] {
        match self {
            DetailedAnalysis::Scored { .. } => &[],
            DetailedAnalysis::Rejected { errors } => errors,
        }
    }
}

// ---------------------------------------------------------------------------
// Core calculation
// ---------------------------------------------------------------------------

/// Evaluate a report against the rule table, stamped with the current time.
pub fn evaluate(report: &Report, rules: &RuleTable) -> MrvResult<ValidationResult> {
    evaluate_at(report, rules, Utc::now())
}

/// Evaluate a report with an explicit timestamp. Every other field of the
/// result is a pure function of `report` and `rules`.
pub fn evaluate_at(
    report: &Report,
    rules: &RuleTable,
    timestamp: DateTime<Utc>,
) -> MrvResult<ValidationResult> {
    // --- Basic-data checks ---
    let errors = check_basic_data(report, rules);
    if !errors.is_empty() {
        warn!(
            "Report for '{}' failed basic-data checks: {}",
            report.location,
            errors.join("; ")
        );
        return Ok(ValidationResult {
            status: ValidationStatus::Anomaly,
            estimated_sequestration: Decimal::ZERO,
            confidence_score: Decimal::ZERO,
            validation_notes: rejection_notes(&errors),
            detailed_analysis: DetailedAnalysis::Rejected { errors },
        });
    }

    // --- Estimate ---
    let estimate = estimate_sequestration(report, rules)?;

    // --- Scores ---
    let anomaly = score_anomaly(report, estimate.total, rules)?;
    let confidence = score_confidence(report, anomaly.score, &rules.policy.confidence);

    // --- Decision ---
    let policy = &rules.policy;
    let status = decide_status(anomaly.score, confidence.score, &policy.decision);
    let validation_notes = generate_notes(
        report,
        anomaly.sequestration_per_hectare,
        anomaly.score,
        confidence.score,
        &policy.decision,
        &policy.notes,
    );

    let result = ValidationResult {
        status,
        estimated_sequestration: estimate.total.round_dp(OUTPUT_DP),
        confidence_score: confidence.score.round_dp(OUTPUT_DP),
        validation_notes,
        detailed_analysis: DetailedAnalysis::Scored {
            anomaly_score: anomaly.score.round_dp(ANALYSIS_DP),
            sequestration_per_hectare: anomaly.sequestration_per_hectare.round_dp(ANALYSIS_DP),
            project_type_factor: estimate.project_type_factor,
            biomass_factor: estimate.biomass_factor.round_dp(ANALYSIS_DP),
            monitoring_duration_years: estimate.monitoring_years.round_dp(ANALYSIS_DP),
            timestamp,
        },
    };

    info!(
        "Evaluated report for '{}': {}, {} tons CO2",
        report.location, result.status, result.estimated_sequestration
    );

    Ok(result)
}
