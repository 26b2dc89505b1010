use serde_json::Value;

use mrv_core::service::ValidationService;

pub fn run_health(service: &ValidationService) -> Result<Value, Box<dyn std::error::Error>> {
    Ok(serde_json::to_value(service.health())?)
}

pub fn run_model_info(service: &ValidationService) -> Result<Value, Box<dyn std::error::Error>> {
    let info = service.model_info()?;
    Ok(serde_json::to_value(info)?)
}

pub fn run_status(service: &ValidationService) -> Result<Value, Box<dyn std::error::Error>> {
    Ok(serde_json::to_value(service.status())?)
}
