//! Status gate and human-readable validation notes.

use rust_decimal::Decimal;

use crate::report::Report;
use crate::rules::{DecisionPolicy, NotesPolicy};
use crate::types::{has_entries, Score, TonnesCo2, ValidationStatus};

pub const HIGH_QUALITY_NOTE: &str = "High-quality report with reliable data.";
pub const GOOD_QUALITY_NOTE: &str = "Good quality report with acceptable confidence.";
pub const REVIEW_NOTE: &str =
    "Report requires additional review due to anomalies or low confidence.";
pub const SHORT_PERIOD_NOTE: &str = "Short monitoring period may affect accuracy.";
pub const EXTENDED_PERIOD_NOTE: &str =
    "Extended monitoring period provides good data reliability.";
pub const MISSING_SOIL_NOTE: &str =
    "Consider including soil carbon measurements for improved accuracy.";

/// `Validated` iff anomaly is below and confidence above the policy gate.
pub fn decide_status(anomaly: Score, confidence: Score, policy: &DecisionPolicy) -> ValidationStatus {
    if anomaly < policy.max_anomaly && confidence > policy.min_confidence {
        ValidationStatus::Validated
    } else {
        ValidationStatus::Anomaly
    }
}

pub fn quality_note(anomaly: Score, confidence: Score, policy: &DecisionPolicy) -> &'static str {
    if anomaly < policy.high_quality_max_anomaly && confidence > policy.high_quality_min_confidence
    {
        HIGH_QUALITY_NOTE
    } else if anomaly < policy.max_anomaly && confidence > policy.min_confidence {
        GOOD_QUALITY_NOTE
    } else {
        REVIEW_NOTE
    }
}

/// Assemble the notes: quality, per-hectare rate, duration caveat, soil
/// caveat, in that order, joined by single spaces.
pub fn generate_notes(
    report: &Report,
    sequestration_per_hectare: TonnesCo2,
    anomaly: Score,
    confidence: Score,
    decision: &DecisionPolicy,
    notes_policy: &NotesPolicy,
) -> String {
    let mut notes: Vec<String> = Vec::with_capacity(4);

    notes.push(quality_note(anomaly, confidence, decision).to_string());
    notes.push(format!(
        "Estimated sequestration: {} tons CO2/hectare.",
        one_decimal(sequestration_per_hectare)
    ));

    let months = report.monitoring_period_months;
    if months < notes_policy.short_period_months {
        notes.push(SHORT_PERIOD_NOTE.to_string());
    } else if months > notes_policy.extended_period_months {
        notes.push(EXTENDED_PERIOD_NOTE.to_string());
    }

    if !has_entries(report.soil_data.as_ref()) {
        notes.push(MISSING_SOIL_NOTE.to_string());
    }

    notes.join(" ")
}

/// Notes for a report that failed the basic-data checks.
pub fn rejection_notes(errors: &[String]) -> String {
    format!("Data validation failed: {}", errors.join("; "))
}

fn one_decimal(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp(1);
    rounded.rescale(1);
    rounded
}
