//! Biomass adjustment factor.
//!
//! Only two keys of `biomass_data` are interpreted. `above_ground_biomass`
//! takes priority; `tree_count` is consulted only when the former yields no
//! usable value. Anything unusable degrades to a neutral factor of 1.

use log::warn;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::rules::BiomassPolicy;
use crate::types::{clamp, Attributes};

pub const ABOVE_GROUND_BIOMASS_KEY: &str = "above_ground_biomass";
pub const TREE_COUNT_KEY: &str = "tree_count";

/// Multiplicative adjustment applied to the base sequestration estimate.
pub fn biomass_factor(data: Option<&Attributes>, policy: &BiomassPolicy) -> Decimal {
    let Some(data) = data else {
        return Decimal::ONE;
    };

    if let Some(agb) = positive_number(data, ABOVE_GROUND_BIOMASS_KEY) {
        return scaled(
            ABOVE_GROUND_BIOMASS_KEY,
            agb,
            policy.above_ground_divisor,
            policy.above_ground_min,
            policy.above_ground_max,
        );
    }

    if let Some(count) = positive_number(data, TREE_COUNT_KEY) {
        return scaled(
            TREE_COUNT_KEY,
            count,
            policy.tree_count_divisor,
            policy.tree_count_min,
            policy.tree_count_max,
        );
    }

    Decimal::ONE
}

/// `value / divisor` clamped into `[lo, hi]`. A ratio too small to represent
/// takes the lower clamp; one too large is neutral.
fn scaled(key: &str, value: Decimal, divisor: Decimal, lo: Decimal, hi: Decimal) -> Decimal {
    match value.checked_div(divisor) {
        Some(ratio) => clamp(ratio, lo, hi),
        None if value < divisor => lo,
        None => {
            warn!("Ignoring biomass field '{key}': {value} / {divisor} overflowed");
            Decimal::ONE
        }
    }
}

/// A strictly positive numeric value under `key`, if there is one.
/// Non-numeric values are logged and treated as absent. Positive values
/// beyond `Decimal` range saturate to its smallest or largest magnitude.
fn positive_number(data: &Attributes, key: &str) -> Option<Decimal> {
    let value = data.get(key)?;
    let number = match value {
        Value::Number(n) => n,
        Value::Null => return None,
        other => {
            warn!("Ignoring biomass field '{key}': expected a number, got {other}");
            return None;
        }
    };

    if let Some(i) = number.as_i64() {
        return (i > 0).then(|| Decimal::from(i));
    }
    if let Some(u) = number.as_u64() {
        return (u > 0).then(|| Decimal::from(u));
    }

    let float = number.as_f64()?;
    if float <= 0.0 {
        return None;
    }
    match Decimal::from_f64(float) {
        Some(d) if d > Decimal::ZERO => Some(d),
        _ if float < 1.0 => Some(Decimal::new(1, 28)),
        _ => Some(Decimal::MAX),
    }
}
