use thiserror::Error;

#[derive(Debug, Error)]
pub enum MrvError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Invalid rule table: {field} — {reason}")]
    InvalidRules { field: String, reason: String },

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Computation failure in {stage}: {reason}")]
    ComputationFailure { stage: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for MrvError {
    fn from(e: serde_json::Error) -> Self {
        MrvError::SerializationError(e.to_string())
    }
}
