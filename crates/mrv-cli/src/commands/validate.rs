use clap::Args;
use serde_json::Value;

use mrv_core::service::ValidationService;
use mrv_core::ValidationRequest;

use crate::input;

#[derive(Args)]
pub struct ValidateArgs {
    /// Submission JSON: `{"report_data": ..., "file_urls": [...]}` or a bare report
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_validate(
    args: ValidateArgs,
    service: &ValidationService,
) -> Result<Value, Box<dyn std::error::Error>> {
    let data: Value = if let Some(ref path) = args.input {
        input::file::read_json_value(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        data
    } else {
        return Err("--input <file.json> or stdin required".into());
    };
    let request = ValidationRequest::from_value(data)?;
    let result = service.validate(&request)?;
    Ok(serde_json::to_value(result)?)
}
