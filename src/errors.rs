use thiserror::Error;

/// Error type that captures common estimator failures.
#[derive(Debug, Error)]
pub enum EstimatorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid reference: {0}")]
    InvalidRef(String),
}
