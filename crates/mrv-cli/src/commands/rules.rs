use std::path::Path;

use log::info;
use mrv_core::service::ValidationService;
use mrv_core::{MrvError, MrvResult, RuleTable};

use crate::input;

/// Initialise the service from `path`, or from the builtin rule table when no
/// path is configured. A file that cannot be loaded leaves the service
/// degraded instead of aborting, so `health` can still report on it.
pub fn load_service(path: Option<&str>) -> ValidationService {
    match path {
        Some(path) => {
            info!("Loading rule table from {path}");
            ValidationService::initialize(|| read_rule_table(path))
        }
        None => ValidationService::with_builtin_rules(),
    }
}

fn read_rule_table(path: &str) -> MrvResult<RuleTable> {
    let contents = input::file::read_text(path).map_err(|e| rules_error(e.to_string()))?;
    if is_yaml(path) {
        serde_yaml::from_str(&contents).map_err(|e| rules_error(e.to_string()))
    } else {
        RuleTable::from_json_str(&contents)
    }
}

fn is_yaml(path: &str) -> bool {
    matches!(
        Path::new(path).extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

fn rules_error(reason: String) -> MrvError {
    MrvError::InvalidRules {
        field: "rules".into(),
        reason,
    }
}
