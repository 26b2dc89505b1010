//! Service lifecycle around the scoring pipeline.
//!
//! The rule table is loaded exactly once. A failed load leaves the service
//! degraded: health reports it and every evaluation is refused with
//! [`MrvError::ServiceUnavailable`] rather than falling back to partial rules.

use chrono::{DateTime, Utc};
use log::{error, info};
use serde::{Deserialize, Serialize};

use crate::error::MrvError;
use crate::report::{Report, ValidationRequest};
use crate::rules::RuleTable;
use crate::scoring::{self, ValidationResult};
use crate::MrvResult;

pub const SERVICE_NAME: &str = "Blue Carbon MRV Validation Service";
pub const MODEL_TYPE: &str = "Rule-based validation";
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    Healthy,
    Degraded,
}

/// Service banner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub service: String,
    pub status: String,
    pub model_loaded: bool,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: HealthState,
    pub model_loaded: bool,
    pub service_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Rule table introspection for client-side display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub model_type: String,
    pub model_loaded: bool,
    pub supported_project_types: Vec<String>,
    pub validation_rules: RuleTable,
}

#[derive(Debug)]
enum RuleState {
    Ready(RuleTable),
    Failed(String),
}

/// Owns the outcome of the one-time rule-table initialisation. Immutable
/// afterwards, so a shared reference may serve any number of threads.
#[derive(Debug)]
pub struct ValidationService {
    state: RuleState,
}

impl ValidationService {
    /// Run `loader` once. The table is validated before it is accepted.
    pub fn initialize<F>(loader: F) -> Self
    where
        F: FnOnce() -> MrvResult<RuleTable>,
    {
        let state = match loader().and_then(|rules| rules.validate().map(|_| rules)) {
            Ok(rules) => {
                info!(
                    "Rule table loaded with {} project types",
                    rules.sequestration_factors.len()
                );
                RuleState::Ready(rules)
            }
            Err(e) => {
                error!("Failed to load rule table: {e}");
                RuleState::Failed(e.to_string())
            }
        };
        ValidationService { state }
    }

    pub fn with_rules(rules: RuleTable) -> Self {
        Self::initialize(|| Ok(rules))
    }

    pub fn with_builtin_rules() -> Self {
        Self::initialize(|| Ok(RuleTable::builtin()))
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, RuleState::Ready(_))
    }

    pub fn rules(&self) -> MrvResult<&RuleTable> {
        match &self.state {
            RuleState::Ready(rules) => Ok(rules),
            RuleState::Failed(reason) => Err(MrvError::ServiceUnavailable(format!(
                "rule table not available ({reason})"
            ))),
        }
    }

    /// Evaluate a submission.
    pub fn validate(&self, request: &ValidationRequest) -> MrvResult<ValidationResult> {
        info!(
            "Received validation request for project: {}",
            request.report_data.location
        );
        self.evaluate(&request.report_data)
    }

    pub fn evaluate(&self, report: &Report) -> MrvResult<ValidationResult> {
        let rules = self.rules()?;
        scoring::evaluate(report, rules).map_err(|e| {
            error!("Validation failed for '{}': {e}", report.location);
            e
        })
    }

    pub fn status(&self) -> ServiceStatus {
        ServiceStatus {
            service: SERVICE_NAME.to_string(),
            status: "operational".to_string(),
            model_loaded: self.is_ready(),
            timestamp: Utc::now(),
        }
    }

    pub fn health(&self) -> HealthReport {
        let (status, error) = match &self.state {
            RuleState::Ready(_) => (HealthState::Healthy, None),
            RuleState::Failed(reason) => (HealthState::Degraded, Some(reason.clone())),
        };
        HealthReport {
            status,
            model_loaded: self.is_ready(),
            service_version: SERVICE_VERSION.to_string(),
            error,
            timestamp: Utc::now(),
        }
    }

    pub fn model_info(&self) -> MrvResult<ModelInfo> {
        let rules = self.rules()?;
        Ok(ModelInfo {
            model_type: MODEL_TYPE.to_string(),
            model_loaded: true,
            supported_project_types: rules.project_types(),
            validation_rules: rules.clone(),
        })
    }
}
