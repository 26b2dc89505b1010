use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Land area in hectares.
pub type Hectares = Decimal;

/// Tonnes of CO2 sequestered.
pub type TonnesCo2 = Decimal;

/// Sequestration rate in tonnes CO2 per hectare per year.
pub type AnnualRate = Decimal;

/// Scores expressed on a 0-1 scale. Never as percentages.
pub type Score = Decimal;

/// Whole months of monitoring.
pub type Months = u32;

/// Open-ended structured data attached to a report (biomass, soil, extra
/// metrics). Only a handful of keys are interpreted; the rest pass through.
pub type Attributes = serde_json::Map<String, serde_json::Value>;

/// Outcome of a report evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStatus {
    Validated,
    Anomaly,
}

impl std::fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationStatus::Validated => write!(f, "validated"),
            ValidationStatus::Anomaly => write!(f, "anomaly"),
        }
    }
}

/// Clamp `value` into `[lo, hi]`.
pub fn clamp(value: Decimal, lo: Decimal, hi: Decimal) -> Decimal {
    if value < lo {
        lo
    } else if value > hi {
        hi
    } else {
        value
    }
}

/// Arithmetic mean; zero for an empty slice.
pub fn mean(values: &[Decimal]) -> Decimal {
    if values.is_empty() {
        return Decimal::ZERO;
    }
    let sum: Decimal = values.iter().copied().sum();
    sum / Decimal::from(values.len() as u64)
}

/// An optional mapping counts as present only when it holds at least one key.
pub fn has_entries(attrs: Option<&Attributes>) -> bool {
    attrs.map_or(false, |m| !m.is_empty())
}
