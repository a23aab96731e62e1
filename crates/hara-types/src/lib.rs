//! # hara-types
//!
//! Core data model for Hazard Analysis and Risk Assessment (HARA) per
//! ISO 26262-3.
//!
//! ## Rating Scales
//!
//! - **Severity** (S0..S3): potential harm of the worst-case outcome
//! - **Exposure** (E0..E4): how often the operational situation occurs
//! - **Controllability** (C0..C3): how hard it is for an average driver to avoid harm
//! - **ASIL** (QM < A < B < C < D): the resulting integrity level
//!
//! All scales are totally ordered: a higher index means more exposure,
//! more severity, or less controllability.
//!
//! ## Operational Situations
//!
//! - **OperationalSituation**: immutable catalog record (id, category, name, exposure)
//! - **CombinedSituation**: 1 to 3 constituents reduced to a single exposure
//!   by the minimum rule

#![deny(unsafe_code)]

pub mod asil;
pub mod error;
pub mod levels;
pub mod situation;

pub use asil::{AsilDistribution, AsilRating};
pub use error::{HaraError, HaraResult, RatingDimension};
pub use levels::{ControllabilityLevel, ExposureLevel, RatingTriple, SeverityLevel};
pub use situation::{
    CombinedSituation, OperationalSituation, SituationCategory, SituationId,
    MAX_COMBINATION_SIZE,
};
