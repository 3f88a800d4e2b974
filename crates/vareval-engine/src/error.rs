//! Engine error types

use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors that can occur while recording or resolving evidence
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Attempted write to the read-only `Default` source
    #[error("Source '{0}' is read-only")]
    ImmutableSource(String),

    /// Strict lookup or write against an untracked source or criterion
    #[error("Criterion '{criterion}' not found for source '{source_name}'")]
    CriterionNotFound {
        /// Criterion code as given by the caller
        criterion: String,
        /// Source name as given by the caller
        source_name: String,
    },

    /// Internal identity mismatch; indicates a table construction bug
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// Strength outside the catalog's allowed set (strict configuration only)
    #[error("Evidence level {level} is not allowed for {criterion}")]
    StrengthNotAllowed {
        /// Criterion code
        criterion: String,
        /// Rejected level
        level: String,
    },

    /// Score outside the catalog's admissible range (strict configuration only)
    #[error("Score {score} for {criterion} is outside [{min}, {max}]")]
    ScoreOutOfRange {
        /// Criterion code
        criterion: String,
        /// Rejected score
        score: f64,
        /// Lowest admissible score
        min: f64,
        /// Highest admissible score
        max: f64,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl EngineError {
    pub(crate) fn not_found(criterion: impl Into<String>, source_name: impl Into<String>) -> Self {
        EngineError::CriterionNotFound {
            criterion: criterion.into(),
            source_name: source_name.into(),
        }
    }
}
