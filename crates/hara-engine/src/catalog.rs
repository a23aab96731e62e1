//! Operational situation catalog.
//!
//! The catalog is read-only reference data. It is built once, validated as a
//! whole, and then shared (typically behind an `Arc`) by every combiner and
//! registry that needs it. Several catalogs may coexist, e.g. regional
//! variants, since nothing here is global.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;
use tracing::{debug, info};

use hara_types::{
    ExposureLevel, HaraError, HaraResult, OperationalSituation, SituationCategory, SituationId,
    MAX_COMBINATION_SIZE,
};

use crate::error::{EngineError, EngineResult};

/// The embedded catalog document.
pub const BUILTIN_CATALOG: &str = include_str!("../data/operational_situations.json");

/// A reference combination shipped with the catalog, e.g. "Highway cruising
/// at night" = HWY-001 + ENV-006 -> E3.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinationExample {
    pub name: String,
    pub scenario_ids: Vec<SituationId>,
    pub combined_exposure: ExposureLevel,
}

// On-disk layout. Exposure labels stay strings here so that a bad label is
// reported against the entry that carries it.
#[derive(Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    version: Option<String>,
    basic_scenarios: BTreeMap<String, Vec<RawSituation>>,
    #[serde(default)]
    combination_examples: Vec<RawExample>,
}

#[derive(Deserialize)]
struct RawSituation {
    id: String,
    name: String,
    exposure: String,
    #[serde(default)]
    rationale: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    exposure_percentage: Option<String>,
    #[serde(default)]
    frequency: Option<String>,
    #[serde(default)]
    typical_duration: Option<String>,
}

#[derive(Deserialize)]
struct RawExample {
    name: String,
    scenario_ids: Vec<String>,
    combined_exposure: String,
}

/// Validated, immutable set of operational situations.
#[derive(Clone, Debug)]
pub struct SituationCatalog {
    version: Option<String>,
    situations: Vec<OperationalSituation>,
    index: HashMap<SituationId, usize>,
    examples: Vec<CombinationExample>,
}

impl SituationCatalog {
    /// The catalog embedded in this crate (48 situations in six categories).
    pub fn builtin() -> HaraResult<Self> {
        Self::from_json_str(BUILTIN_CATALOG)
    }

    /// Load a catalog file in the same JSON layout as the built-in one.
    pub fn from_path(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| EngineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "Reading operational situation catalog");
        Ok(Self::from_json_str(&contents)?)
    }

    pub fn from_json_str(json: &str) -> HaraResult<Self> {
        let document: CatalogDocument = serde_json::from_str(json)
            .map_err(|e| HaraError::catalog_integrity("<document>", e.to_string()))?;

        let mut situations = Vec::new();
        for (key, entries) in document.basic_scenarios {
            let category = SituationCategory::from_catalog_key(&key).ok_or_else(|| {
                HaraError::catalog_integrity(key.clone(), "unknown category section")
            })?;
            for raw in entries {
                situations.push(raw.into_situation(category)?);
            }
        }
        // Sections arrive in key order; present them in category order
        // while keeping file order within a category.
        situations.sort_by_key(|s| s.category);

        let mut catalog = Self::build(document.version, situations)?;

        for raw in document.combination_examples {
            let example = raw.into_example()?;
            catalog.check_example(&example)?;
            catalog.examples.push(example);
        }

        info!(
            situations = catalog.len(),
            examples = catalog.examples.len(),
            version = catalog.version.as_deref().unwrap_or("unversioned"),
            "Operational situation catalog loaded"
        );
        Ok(catalog)
    }

    /// Build a catalog from records assembled in code.
    pub fn from_situations(situations: Vec<OperationalSituation>) -> HaraResult<Self> {
        Self::build(None, situations)
    }

    fn build(version: Option<String>, situations: Vec<OperationalSituation>) -> HaraResult<Self> {
        let mut index = HashMap::with_capacity(situations.len());
        for (position, situation) in situations.iter().enumerate() {
            validate_entry(situation)?;
            if index.insert(situation.id.clone(), position).is_some() {
                return Err(HaraError::catalog_integrity(
                    situation.id.as_str(),
                    "duplicate situation id",
                ));
            }
        }

        Ok(Self {
            version,
            situations,
            index,
            examples: Vec::new(),
        })
    }

    fn check_example(&self, example: &CombinationExample) -> HaraResult<()> {
        let count = example.scenario_ids.len();
        if count == 0 || count > MAX_COMBINATION_SIZE {
            return Err(HaraError::catalog_integrity(
                example.name.clone(),
                format!("example combines {count} situations"),
            ));
        }

        let mut seen = HashSet::with_capacity(count);
        let mut minimum = ExposureLevel::E4;
        for id in &example.scenario_ids {
            if !seen.insert(id) {
                return Err(HaraError::catalog_integrity(
                    example.name.clone(),
                    format!("example lists situation {id} more than once"),
                ));
            }
            let situation = self.get(id.as_str()).ok_or_else(|| {
                HaraError::catalog_integrity(
                    example.name.clone(),
                    format!("example references unknown situation {id}"),
                )
            })?;
            minimum = minimum.min(situation.exposure);
        }

        if minimum != example.combined_exposure {
            return Err(HaraError::catalog_integrity(
                example.name.clone(),
                format!(
                    "example states {} but its situations combine to {}",
                    example.combined_exposure, minimum
                ),
            ));
        }
        Ok(())
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn get(&self, id: &str) -> Option<&OperationalSituation> {
        self.index.get(id).map(|&i| &self.situations[i])
    }

    pub fn find_by_id(&self, id: &str) -> HaraResult<&OperationalSituation> {
        self.get(id)
            .ok_or_else(|| HaraError::UnknownSituation(SituationId::new(id)))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn find_by_category(&self, category: SituationCategory) -> Vec<&OperationalSituation> {
        self.situations
            .iter()
            .filter(|s| s.category == category)
            .collect()
    }

    /// Filter by the short words used in listings: "urban", "highway",
    /// "environmental", "special", "critical", "states".
    pub fn find_by_category_keyword(&self, keyword: &str) -> HaraResult<Vec<&OperationalSituation>> {
        let category = SituationCategory::from_keyword(keyword)
            .ok_or_else(|| HaraError::NotFound(format!("category {keyword:?}")))?;
        Ok(self.find_by_category(category))
    }

    /// Categories that have at least one situation, in category order.
    pub fn categories(&self) -> Vec<SituationCategory> {
        let mut categories: Vec<_> = self.situations.iter().map(|s| s.category).collect();
        categories.dedup();
        categories
    }

    pub fn examples(&self) -> &[CombinationExample] {
        &self.examples
    }

    pub fn iter(&self) -> impl Iterator<Item = &OperationalSituation> {
        self.situations.iter()
    }

    pub fn len(&self) -> usize {
        self.situations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.situations.is_empty()
    }
}

fn validate_entry(situation: &OperationalSituation) -> HaraResult<()> {
    if situation.id.as_str().trim().is_empty() {
        return Err(HaraError::catalog_integrity(
            situation.name.clone(),
            "situation id is empty",
        ));
    }
    if situation.name.trim().is_empty() {
        return Err(HaraError::catalog_integrity(
            situation.id.as_str(),
            "situation name is empty",
        ));
    }
    Ok(())
}

impl RawSituation {
    fn into_situation(self, category: SituationCategory) -> HaraResult<OperationalSituation> {
        let exposure: ExposureLevel = self.exposure.parse().map_err(|_| {
            HaraError::catalog_integrity(
                self.id.clone(),
                format!("invalid exposure level {:?}", self.exposure),
            )
        })?;

        Ok(OperationalSituation {
            id: SituationId::new(self.id),
            category,
            name: self.name,
            exposure,
            rationale: self.rationale,
            description: self.description,
            exposure_percentage: self.exposure_percentage,
            frequency: self.frequency,
            typical_duration: self.typical_duration,
        })
    }
}

impl RawExample {
    fn into_example(self) -> HaraResult<CombinationExample> {
        let combined_exposure: ExposureLevel = self.combined_exposure.parse().map_err(|_| {
            HaraError::catalog_integrity(
                self.name.clone(),
                format!("invalid exposure level {:?}", self.combined_exposure),
            )
        })?;

        Ok(CombinationExample {
            name: self.name,
            scenario_ids: self.scenario_ids.into_iter().map(SituationId::from).collect(),
            combined_exposure,
        })
    }
}
