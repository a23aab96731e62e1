//! Operational situations and their combinations.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

use crate::levels::ExposureLevel;

/// Largest number of situations that may be combined into one.
pub const MAX_COMBINATION_SIZE: usize = 3;

/// Category of an operational situation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SituationCategory {
    /// City traffic, intersections, parking
    Urban,
    /// Cruising, lane changes, merging
    Highway,
    /// Weather, lighting, temperature
    Environmental,
    /// Charging, towing, service modes
    SpecialOperations,
    /// Emergency braking, evasive steering
    CriticalManeuver,
    /// Normal, degraded, low charge, thermal stress
    VehicleState,
}

impl SituationCategory {
    pub const ALL: &'static [SituationCategory] = &[
        SituationCategory::Urban,
        SituationCategory::Highway,
        SituationCategory::Environmental,
        SituationCategory::SpecialOperations,
        SituationCategory::CriticalManeuver,
        SituationCategory::VehicleState,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SituationCategory::Urban => "Urban",
            SituationCategory::Highway => "Highway",
            SituationCategory::Environmental => "Environmental",
            SituationCategory::SpecialOperations => "SpecialOperations",
            SituationCategory::CriticalManeuver => "CriticalManeuver",
            SituationCategory::VehicleState => "VehicleState",
        }
    }

    /// Section key used by the catalog file (`"urban_driving"`).
    pub fn catalog_key(&self) -> &'static str {
        match self {
            SituationCategory::Urban => "urban_driving",
            SituationCategory::Highway => "highway_driving",
            SituationCategory::Environmental => "environmental_conditions",
            SituationCategory::SpecialOperations => "special_operations",
            SituationCategory::CriticalManeuver => "critical_maneuvers",
            SituationCategory::VehicleState => "vehicle_states",
        }
    }

    pub fn from_catalog_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.catalog_key() == key)
    }

    /// Short filter word accepted by listing commands (`"urban"`, `"states"`).
    pub fn keyword(&self) -> &'static str {
        match self {
            SituationCategory::Urban => "urban",
            SituationCategory::Highway => "highway",
            SituationCategory::Environmental => "environmental",
            SituationCategory::SpecialOperations => "special",
            SituationCategory::CriticalManeuver => "critical",
            SituationCategory::VehicleState => "states",
        }
    }

    /// Resolves a filter word, case-insensitively.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let keyword = keyword.trim().to_ascii_lowercase();
        Self::ALL.iter().copied().find(|c| c.keyword() == keyword)
    }
}

impl fmt::Display for SituationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unique catalog key of an operational situation, e.g. `HWY-001`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SituationId(String);

impl SituationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SituationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SituationId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for SituationId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SituationId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for SituationId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A defined driving or environmental scenario with its exposure rating.
///
/// Reference data: created once when the catalog is loaded and never mutated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationalSituation {
    pub id: SituationId,
    pub category: SituationCategory,
    pub name: String,
    pub exposure: ExposureLevel,
    /// Statistical justification for the exposure rating
    pub rationale: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Share of operating time, e.g. "> 10%"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exposure_percentage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typical_duration: Option<String>,
}

impl OperationalSituation {
    pub fn new(
        id: impl Into<SituationId>,
        category: SituationCategory,
        name: impl Into<String>,
        exposure: ExposureLevel,
        rationale: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            category,
            name: name.into(),
            exposure,
            rationale: rationale.into(),
            description: None,
            exposure_percentage: None,
            frequency: None,
            typical_duration: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// One to three operational situations reduced to a single exposure rating.
///
/// Invariants: `constituents.len()` is within `1..=MAX_COMBINATION_SIZE`, and
/// `exposure` equals the minimum constituent exposure. Instances are built
/// by the scenario combiner, which enforces both.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinedSituation {
    pub name: String,
    /// Constituents in caller order (display only, never affects the exposure)
    pub constituents: Vec<OperationalSituation>,
    pub exposure: ExposureLevel,
    /// Constituents whose exposure equals the combined exposure
    pub limiting: Vec<SituationId>,
    pub rationale: String,
    /// Compatibility warnings raised under advisory enforcement
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub advisories: Vec<String>,
}

impl CombinedSituation {
    pub fn constituent_ids(&self) -> impl Iterator<Item = &SituationId> {
        self.constituents.iter().map(|s| &s.id)
    }

    pub fn is_single(&self) -> bool {
        self.constituents.len() == 1
    }

    pub fn has_advisories(&self) -> bool {
        !self.advisories.is_empty()
    }
}
