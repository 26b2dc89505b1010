mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::validate::ValidateArgs;

/// Carbon sequestration estimation and anomaly screening for MRV reports
#[derive(Parser)]
#[command(
    name = "mrv",
    version,
    about = "Validate MRV reports and estimate carbon sequestration",
    long_about = "A CLI for screening monitoring, reporting and verification (MRV) \
                  submissions. Estimates total CO2 sequestered, scores anomalies \
                  and confidence against a rule table, and explains the verdict."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Rule table file (.json, .yaml or .yml). The builtin table is used when omitted.
    #[arg(long, env = "MRV_RULES", global = true)]
    rules: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a report submission and estimate its sequestration
    Validate(ValidateArgs),
    /// Report whether the rule table initialised
    Health,
    /// Show the rule table and supported project types
    ModelInfo,
    /// Print the service banner
    Status,
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let service = || commands::rules::load_service(cli.rules.as_deref());

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Validate(args) => commands::validate::run_validate(args, &service()),
        Commands::Health => commands::service::run_health(&service()),
        Commands::ModelInfo => commands::service::run_model_info(&service()),
        Commands::Status => commands::service::run_status(&service()),
        Commands::Version => {
            println!("mrv {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
