//! CLI error types

use thiserror::Error;

use hara_engine::EngineError;
use hara_types::HaraError;

/// CLI error types
#[derive(Debug, Error)]
pub enum CliError {
    /// Engine setup error (configuration or catalog file)
    #[error("{0}")]
    Engine(#[from] EngineError),

    /// Combination or classification error
    #[error("{0}")]
    Hara(#[from] HaraError),

    /// JSON encoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
