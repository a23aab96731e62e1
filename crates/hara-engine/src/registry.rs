//! Named custom combinations.
//!
//! Analysts register recurring combinations under a name and refer to them
//! by that name later. Registration validates through the combiner, so a
//! stored entry always satisfies the combination invariants.

use std::collections::HashMap;
use std::sync::RwLock;
use tracing::{debug, info};

use hara_types::{CombinedSituation, HaraError, HaraResult};

use crate::combiner::ScenarioCombiner;

/// Thread-safe map from combination name to combined situation.
///
/// Re-registering a name replaces the previous entry.
#[derive(Debug, Default)]
pub struct CustomCombinationRegistry {
    entries: RwLock<HashMap<String, CombinedSituation>>,
}

impl CustomCombinationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Combine `ids` and store the result under `name`.
    ///
    /// Nothing is stored when the combination fails.
    pub fn register<S: AsRef<str>>(
        &self,
        combiner: &ScenarioCombiner,
        name: &str,
        ids: &[S],
    ) -> HaraResult<CombinedSituation> {
        if name.trim().is_empty() {
            return Err(HaraError::InvalidLabel(name.to_string()));
        }

        let combined = combiner.combine_ids(ids, Some(name))?;

        let mut entries = self.entries.write().map_err(|_| HaraError::LockPoisoned)?;
        let replaced = entries
            .insert(name.to_string(), combined.clone())
            .is_some();

        info!(
            name,
            exposure = %combined.exposure,
            replaced,
            "Custom combination registered"
        );

        Ok(combined)
    }

    pub fn resolve(&self, name: &str) -> HaraResult<CombinedSituation> {
        let entries = self.entries.read().map_err(|_| HaraError::LockPoisoned)?;
        entries
            .get(name)
            .cloned()
            .ok_or_else(|| HaraError::NotFound(format!("custom combination {name:?}")))
    }

    /// Registered names, sorted.
    pub fn names(&self) -> HaraResult<Vec<String>> {
        let entries = self.entries.read().map_err(|_| HaraError::LockPoisoned)?;
        let mut names: Vec<String> = entries.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    pub fn remove(&self, name: &str) -> HaraResult<CombinedSituation> {
        let mut entries = self.entries.write().map_err(|_| HaraError::LockPoisoned)?;
        let removed = entries
            .remove(name)
            .ok_or_else(|| HaraError::NotFound(format!("custom combination {name:?}")))?;
        debug!(name, "Custom combination removed");
        Ok(removed)
    }

    pub fn clear(&self) -> HaraResult<()> {
        let mut entries = self.entries.write().map_err(|_| HaraError::LockPoisoned)?;
        entries.clear();
        Ok(())
    }

    pub fn len(&self) -> HaraResult<usize> {
        let entries = self.entries.read().map_err(|_| HaraError::LockPoisoned)?;
        Ok(entries.len())
    }

    pub fn is_empty(&self) -> HaraResult<bool> {
        Ok(self.len()? == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SituationCatalog;
    use hara_types::ExposureLevel;
    use std::sync::Arc;

    fn combiner() -> ScenarioCombiner {
        ScenarioCombiner::new(Arc::new(SituationCatalog::builtin().unwrap()))
    }

    #[test]
    fn register_then_resolve() {
        let registry = CustomCombinationRegistry::new();
        let combiner = combiner();

        let stored = registry
            .register(&combiner, "Night highway", &["HWY-001", "ENV-006"])
            .unwrap();
        assert_eq!(stored.name, "Night highway");

        let resolved = registry.resolve("Night highway").unwrap();
        assert_eq!(resolved, stored);
        assert_eq!(resolved.exposure, ExposureLevel::E3);
    }

    #[test]
    fn names_are_stored_verbatim() {
        let registry = CustomCombinationRegistry::new();
        let stored = registry
            .register(&combiner(), " Night run ", &["HWY-001", "ENV-006"])
            .unwrap();
        assert_eq!(stored.name, " Night run ");
        assert_eq!(registry.names().unwrap(), vec![" Night run "]);
        assert_eq!(registry.resolve(" Night run ").unwrap(), stored);
        assert!(matches!(
            registry.resolve("Night run"),
            Err(HaraError::NotFound(_))
        ));
    }

    #[test]
    fn last_registration_wins() {
        let registry = CustomCombinationRegistry::new();
        let combiner = combiner();

        registry
            .register(&combiner, "Commute", &["URB-001"])
            .unwrap();
        registry
            .register(&combiner, "Commute", &["URB-001", "ENV-005"])
            .unwrap();

        assert_eq!(registry.len().unwrap(), 1);
        assert_eq!(
            registry.resolve("Commute").unwrap().exposure,
            ExposureLevel::E1
        );
    }

    #[test]
    fn failed_combination_is_not_stored() {
        let registry = CustomCombinationRegistry::new();
        let err = registry
            .register(&combiner(), "Broken", &["URB-001", "XXX-999"])
            .unwrap_err();
        assert!(matches!(err, HaraError::UnknownSituation(_)));
        assert!(registry.is_empty().unwrap());
    }

    #[test]
    fn blank_names_are_rejected() {
        let registry = CustomCombinationRegistry::new();
        let err = registry
            .register(&combiner(), "  ", &["URB-001"])
            .unwrap_err();
        assert!(matches!(err, HaraError::InvalidLabel(_)));
    }

    #[test]
    fn unknown_names_are_not_found() {
        let registry = CustomCombinationRegistry::new();
        assert!(matches!(
            registry.resolve("nothing"),
            Err(HaraError::NotFound(_))
        ));
        assert!(matches!(
            registry.remove("nothing"),
            Err(HaraError::NotFound(_))
        ));
    }

    #[test]
    fn names_remove_and_clear() {
        let registry = CustomCombinationRegistry::new();
        let combiner = combiner();
        registry.register(&combiner, "b", &["URB-002"]).unwrap();
        registry.register(&combiner, "a", &["URB-003"]).unwrap();
        registry.register(&combiner, "c", &["URB-004"]).unwrap();

        assert_eq!(registry.names().unwrap(), vec!["a", "b", "c"]);

        registry.remove("b").unwrap();
        assert_eq!(registry.names().unwrap(), vec!["a", "c"]);

        registry.clear().unwrap();
        assert!(registry.is_empty().unwrap());
    }

    #[test]
    fn concurrent_registration() {
        let registry = Arc::new(CustomCombinationRegistry::new());
        let combiner = combiner();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = Arc::clone(&registry);
                let combiner = combiner.clone();
                std::thread::spawn(move || {
                    registry
                        .register(&combiner, &format!("combo-{i}"), &["HWY-001", "ENV-001"])
                        .unwrap();
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(registry.len().unwrap(), 8);
    }
}
