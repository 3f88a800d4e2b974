//! Error types for predictor ingestion

use thiserror::Error;
use vareval_engine::EngineError;

/// Result type alias for ingestion
pub type Result<T> = std::result::Result<T, IngestError>;

/// Errors that can occur while reading collaborator payloads
#[derive(Error, Debug)]
pub enum IngestError {
    /// Payload does not have the expected shape
    #[error("Invalid payload format: {0}")]
    InvalidFormat(String),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    Json(String),

    /// The engine rejected a write
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Document could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for IngestError {
    fn from(e: serde_json::Error) -> Self {
        IngestError::Json(e.to_string())
    }
}
