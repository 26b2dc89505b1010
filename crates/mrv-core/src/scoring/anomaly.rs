//! Anomaly score: the mean of three bucketed signals (sequestration rate,
//! monitoring duration, project area). Each signal is a policy score, not a
//! continuous measure.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::MrvError;
use crate::report::Report;
use crate::rules::RuleTable;
use crate::types::{mean, Score, TonnesCo2};
use crate::MrvResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyAssessment {
    pub sequestration_per_hectare: TonnesCo2,
    pub expected_max_per_hectare: TonnesCo2,
    pub rate_signal: Score,
    pub duration_signal: Score,
    pub area_signal: Score,
    /// Mean of the three signals, in [0, 1].
    pub score: Score,
}

pub fn score_anomaly(
    report: &Report,
    estimated_sequestration: TonnesCo2,
    rules: &RuleTable,
) -> MrvResult<AnomalyAssessment> {
    let policy = &rules.policy.anomaly;

    let per_hectare = estimated_sequestration
        .checked_div(report.area_hectares)
        .ok_or_else(|| {
            failure(format!(
                "cannot derive per-hectare rate for area {}",
                report.area_hectares
            ))
        })?;
    let expected_max = rules
        .factor_for(&report.project_type)
        .checked_mul(policy.rate_ceiling_multiplier)
        .ok_or_else(|| failure("expected per-hectare ceiling overflowed".into()))?;
    let elevated_threshold = expected_max
        .checked_mul(policy.rate_elevated_fraction)
        .ok_or_else(|| failure("elevated-rate threshold overflowed".into()))?;

    let rate_signal = if per_hectare > expected_max {
        policy.rate_high_score
    } else if per_hectare > elevated_threshold {
        policy.rate_elevated_score
    } else {
        policy.rate_normal_score
    };

    let months = report.monitoring_period_months;
    let duration_signal = if months > policy.long_duration_months {
        policy.long_duration_score
    } else if months < policy.short_duration_months {
        policy.short_duration_score
    } else {
        policy.normal_duration_score
    };

    let area = report.area_hectares;
    let area_signal = if area > policy.large_area_hectares {
        policy.large_area_score
    } else if area < policy.small_area_hectares {
        policy.small_area_score
    } else {
        policy.normal_area_score
    };

    let score = mean(&[rate_signal, duration_signal, area_signal]);

    Ok(AnomalyAssessment {
        sequestration_per_hectare: per_hectare,
        expected_max_per_hectare: expected_max,
        rate_signal,
        duration_signal,
        area_signal,
        score: score.clamp(Decimal::ZERO, Decimal::ONE),
    })
}

fn failure(reason: String) -> MrvError {
    MrvError::ComputationFailure {
        stage: "anomaly".into(),
        reason,
    }
}
