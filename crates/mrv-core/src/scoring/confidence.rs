//! Confidence score: mean of data completeness, the inverse anomaly score
//! and how well the monitoring duration fits the ideal window.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::report::Report;
use crate::rules::ConfidencePolicy;
use crate::types::{clamp, has_entries, mean, Months, Score};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceAssessment {
    pub completeness: Score,
    pub anomaly_inverse: Score,
    pub duration_fit: Score,
    pub score: Score,
}

pub fn score_confidence(
    report: &Report,
    anomaly_score: Score,
    policy: &ConfidencePolicy,
) -> ConfidenceAssessment {
    let completeness = completeness(report, policy);
    let anomaly_inverse = (Decimal::ONE - anomaly_score).max(Decimal::ZERO);
    let duration_fit = duration_fit(report.monitoring_period_months, policy);

    let score = mean(&[completeness, anomaly_inverse, duration_fit]);

    ConfidenceAssessment {
        completeness,
        anomaly_inverse,
        duration_fit,
        score: clamp(score, Decimal::ZERO, Decimal::ONE),
    }
}

fn completeness(report: &Report, policy: &ConfidencePolicy) -> Score {
    let mut total = policy.completeness_base;
    if has_entries(report.biomass_data.as_ref()) {
        total += policy.biomass_weight;
    }
    if has_entries(report.soil_data.as_ref()) {
        total += policy.soil_weight;
    }
    if report.has_tree_species() {
        total += policy.species_weight;
    }
    if has_entries(report.additional_metrics.as_ref()) {
        total += policy.additional_metrics_weight;
    }
    total.min(Decimal::ONE)
}

fn duration_fit(months: Months, policy: &ConfidencePolicy) -> Score {
    if (policy.ideal_min_months..=policy.ideal_max_months).contains(&months) {
        policy.ideal_fit
    } else if (policy.short_min_months..policy.ideal_min_months).contains(&months) {
        policy.short_fit
    } else if months > policy.ideal_max_months && months <= policy.extended_max_months {
        policy.extended_fit
    } else {
        policy.fallback_fit
    }
}
