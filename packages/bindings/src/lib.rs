use std::sync::OnceLock;

use mrv_core::service::ValidationService;
use mrv_core::ValidationRequest;
use napi::Result as NapiResult;
use napi_derive::napi;

/// Initialised on first use and read-only afterwards.
static SERVICE: OnceLock<ValidationService> = OnceLock::new();

fn service() -> &'static ValidationService {
    SERVICE.get_or_init(ValidationService::with_builtin_rules)
}

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[napi]
pub fn validate_report(input_json: String) -> NapiResult<String> {
    let value: serde_json::Value = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let request = ValidationRequest::from_value(value).map_err(to_napi_error)?;
    let output = service().validate(&request).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Introspection
// ---------------------------------------------------------------------------

#[napi]
pub fn health_check() -> NapiResult<String> {
    serde_json::to_string(&service().health()).map_err(to_napi_error)
}

#[napi]
pub fn model_info() -> NapiResult<String> {
    let info = service().model_info().map_err(to_napi_error)?;
    serde_json::to_string(&info).map_err(to_napi_error)
}
