use std::path::PathBuf;
use thiserror::Error;

use hara_types::HaraError;

/// Errors from building an engine: reading configuration and catalog files.
///
/// Domain errors raised while combining or classifying stay `HaraError`.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Hara(#[from] HaraError),
}

pub type EngineResult<T> = Result<T, EngineError>;
