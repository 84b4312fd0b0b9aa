use thiserror::Error;

#[derive(Debug, Error)]
pub enum FinCalcError {
    #[error("Invalid range for {field}: {reason}")]
    InvalidRange { field: String, reason: String },

    #[error("Degenerate math in {context}")]
    DegenerateMath { context: String },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for FinCalcError {
    fn from(e: serde_json::Error) -> Self {
        FinCalcError::Serialization(e.to_string())
    }
}
