//! MRV report data model and the submission envelope.
//!
//! A [`Report`] is the unit of evaluation. Structural problems (missing
//! required fields, wrong JSON shapes) are rejected here as
//! [`MrvError::InvalidInput`]; range problems are left to the basic-data
//! checks of the scoring pipeline, which answer with a soft anomaly.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::MrvError;
use crate::types::{Attributes, Hectares, Months};
use crate::MrvResult;

/// A monitoring, reporting and verification submission for one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Free-text project location. Not interpreted.
    #[serde(alias = "project_location")]
    pub location: String,
    /// Key into the rule table's sequestration factors.
    pub project_type: String,
    pub area_hectares: Hectares,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tree_species: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planting_date: Option<NaiveDate>,
    pub monitoring_period_months: Months,
    /// Recognised keys: `above_ground_biomass`, `tree_count`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biomass_data: Option<Attributes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soil_data: Option<Attributes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_metrics: Option<Attributes>,
}

impl Report {
    /// Decode a report from an untyped JSON document.
    pub fn from_value(value: Value) -> MrvResult<Self> {
        serde_json::from_value(value).map_err(|e| MrvError::InvalidInput {
            field: "report_data".into(),
            reason: e.to_string(),
        })
    }

    pub fn has_tree_species(&self) -> bool {
        self.tree_species
            .as_deref()
            .map_or(false, |s| !s.trim().is_empty())
    }
}

/// Submission envelope: the report plus any evidence files uploaded with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRequest {
    pub report_data: Report,
    /// Carried opaquely; never fetched or scored.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub file_urls: Vec<String>,
}

impl ValidationRequest {
    /// Accept either a full envelope (`{"report_data": ..., "file_urls": ...}`)
    /// or a bare report document.
    pub fn from_value(value: Value) -> MrvResult<Self> {
        let is_envelope = value.get("report_data").is_some();
        match value {
            Value::Object(_) if is_envelope => {
                serde_json::from_value(value).map_err(|e| MrvError::InvalidInput {
                    field: "report_data".into(),
                    reason: e.to_string(),
                })
            }
            Value::Object(_) => Ok(ValidationRequest {
                report_data: Report::from_value(value)?,
                file_urls: Vec::new(),
            }),
            other => Err(MrvError::InvalidInput {
                field: "request".into(),
                reason: format!("expected a JSON object, got {}", json_kind(&other)),
            }),
        }
    }
}

impl From<Report> for ValidationRequest {
    fn from(report_data: Report) -> Self {
        ValidationRequest {
            report_data,
            file_urls: Vec::new(),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
