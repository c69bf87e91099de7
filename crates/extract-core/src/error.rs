//! Error types for detection producers

use brand_extract_common::ProcessingError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProducerError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Producer execution failed: {0}")]
    ExecutionFailed(String),

    #[error("Producer execution timed out: {0}")]
    Timeout(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Processing error: {0}")]
    Processing(#[from] ProcessingError),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}
