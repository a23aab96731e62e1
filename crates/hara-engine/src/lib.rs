//! # hara-engine
//!
//! Operational-situation combination and ASIL classification for ISO 26262
//! hazard analysis.
//!
//! ## Components
//!
//! - **SituationCatalog**: read-only catalog of operational situations,
//!   embedded or loaded from JSON, validated on load
//! - **ScenarioCombiner**: reduces 1 to 3 situations to one exposure
//!   (the minimum) with a rationale citing the limiting situations
//! - **classifier**: the explicit S x E x C -> ASIL table
//! - **CustomCombinationRegistry**: named combinations for a session
//! - **HaraEngine**: facade over all of the above
//!
//! ## Example
//!
//! ```
//! use hara_engine::HaraEngine;
//! use hara_types::{AsilRating, ControllabilityLevel, ExposureLevel, SeverityLevel};
//!
//! let engine = HaraEngine::builtin().unwrap();
//! let night_highway = engine.combine_ids(&["HWY-001", "ENV-006"], None).unwrap();
//! assert_eq!(night_highway.exposure, ExposureLevel::E3);
//!
//! let asil = engine.classify(SeverityLevel::S3, night_highway.exposure, ControllabilityLevel::C3);
//! assert_eq!(asil, AsilRating::D);
//! ```

#![deny(unsafe_code)]

pub mod assessment;
pub mod catalog;
pub mod classifier;
pub mod combiner;
pub mod compatibility;
pub mod config;
pub mod engine;
pub mod error;
pub mod extract;
pub mod registry;

pub use assessment::{distribution, AssessmentRequest, HazardAssessment};
pub use catalog::{CombinationExample, SituationCatalog, BUILTIN_CATALOG};
pub use classifier::{classify, classify_indices, classify_labels, classify_triple};
pub use combiner::ScenarioCombiner;
pub use compatibility::{
    CategoryPairPolicy, Compatibility, CompatibilityEnforcement, CompatibilityPolicy,
    PermissiveCompatibility,
};
pub use config::{CatalogConfig, CompatibilityConfig, EngineConfig, LoggingConfig};
pub use engine::HaraEngine;
pub use error::{EngineError, EngineResult};
pub use extract::{extract_asil_ratings, extract_ratings};
pub use registry::CustomCombinationRegistry;
