pub mod error;
pub mod report;
pub mod rules;
pub mod types;

#[cfg(feature = "scoring")]
pub mod scoring;

#[cfg(feature = "service")]
pub mod service;

pub use error::MrvError;
pub use report::{Report, ValidationRequest};
pub use rules::{RuleTable, ScoringPolicy};
pub use types::*;

/// Standard result type for all MRV operations
pub type MrvResult<T> = Result<T, MrvError>;
