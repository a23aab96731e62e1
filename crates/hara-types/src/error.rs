use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::asil::AsilRating;
use crate::situation::SituationId;

/// Which rating scale an invalid input was meant for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RatingDimension {
    Severity,
    Exposure,
    Controllability,
}

impl fmt::Display for RatingDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RatingDimension::Severity => write!(f, "severity"),
            RatingDimension::Exposure => write!(f, "exposure"),
            RatingDimension::Controllability => write!(f, "controllability"),
        }
    }
}

/// Errors from the HARA engine.
///
/// All variants describe caller or data misuse. None of them are transient,
/// so none are retryable, and no operation returns a partial result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HaraError {
    #[error("unknown operational situation: {0}")]
    UnknownSituation(SituationId),

    #[error("invalid combination size: {count} (expected 1 to 3 situations)")]
    InvalidCombinationSize { count: usize },

    #[error("invalid {dimension} input: {value:?}")]
    InvalidRatingInput {
        dimension: RatingDimension,
        value: String,
    },

    #[error("catalog integrity error at {id:?}: {reason}")]
    CatalogIntegrity { id: String, reason: String },

    #[error("operational situation listed more than once: {0}")]
    DuplicateSituation(SituationId),

    #[error("incompatible situations {first} and {second}: {reason}")]
    IncompatibleSituations {
        first: SituationId,
        second: SituationId,
        reason: String,
    },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid label: {0:?}")]
    InvalidLabel(String),

    #[error("recorded ASIL {recorded} does not match derived ASIL {derived}")]
    AsilMismatch {
        recorded: AsilRating,
        derived: AsilRating,
    },

    #[error("registry lock poisoned")]
    LockPoisoned,
}

impl HaraError {
    pub fn invalid_rating(dimension: RatingDimension, value: impl Into<String>) -> Self {
        HaraError::InvalidRatingInput {
            dimension,
            value: value.into(),
        }
    }

    pub fn catalog_integrity(id: impl Into<String>, reason: impl Into<String>) -> Self {
        HaraError::CatalogIntegrity {
            id: id.into(),
            reason: reason.into(),
        }
    }
}

pub type HaraResult<T> = Result<T, HaraError>;
