//! Scenario combination.
//!
//! A combined situation is the intersection of its constituents' conditions,
//! so it can occur no more often than the rarest of them: the combined
//! exposure is the minimum constituent exposure. Every constituent sharing
//! that minimum is cited as limiting.

use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

use hara_types::{
    CombinedSituation, ExposureLevel, HaraError, HaraResult, OperationalSituation, SituationId,
    MAX_COMBINATION_SIZE,
};

use crate::catalog::SituationCatalog;
use crate::compatibility::{
    Compatibility, CompatibilityEnforcement, CompatibilityPolicy, PermissiveCompatibility,
};

/// Combines catalog situations into a single exposure rating.
#[derive(Clone)]
pub struct ScenarioCombiner {
    catalog: Arc<SituationCatalog>,
    policy: Arc<dyn CompatibilityPolicy>,
    enforcement: CompatibilityEnforcement,
}

impl ScenarioCombiner {
    /// A combiner with the permissive policy: combinations never fail on
    /// compatibility grounds.
    pub fn new(catalog: Arc<SituationCatalog>) -> Self {
        Self {
            catalog,
            policy: Arc::new(PermissiveCompatibility),
            enforcement: CompatibilityEnforcement::Advisory,
        }
    }

    pub fn with_policy(
        mut self,
        policy: impl CompatibilityPolicy + 'static,
        enforcement: CompatibilityEnforcement,
    ) -> Self {
        self.policy = Arc::new(policy);
        self.enforcement = enforcement;
        self
    }

    pub fn catalog(&self) -> &SituationCatalog {
        &self.catalog
    }

    pub fn enforcement(&self) -> CompatibilityEnforcement {
        self.enforcement
    }

    /// Combine situations by id. `name` is used verbatim when given and not
    /// blank; otherwise the constituent names are joined.
    pub fn combine_ids<S: AsRef<str>>(
        &self,
        ids: &[S],
        name: Option<&str>,
    ) -> HaraResult<CombinedSituation> {
        check_size(ids.len())?;
        let constituents = ids
            .iter()
            .map(|id| self.catalog.find_by_id(id.as_ref()))
            .collect::<HaraResult<Vec<_>>>()?;
        self.combine_resolved(constituents, name)
    }

    /// Combine situation records. Each record must be the catalog's own
    /// entry for its id; records from elsewhere are rejected as unknown.
    pub fn combine(
        &self,
        situations: &[&OperationalSituation],
        name: Option<&str>,
    ) -> HaraResult<CombinedSituation> {
        check_size(situations.len())?;
        let constituents = situations
            .iter()
            .map(|s| match self.catalog.get(s.id.as_str()) {
                Some(entry) if entry == *s => Ok(entry),
                _ => Err(HaraError::UnknownSituation(s.id.clone())),
            })
            .collect::<HaraResult<Vec<_>>>()?;
        self.combine_resolved(constituents, name)
    }

    fn combine_resolved(
        &self,
        constituents: Vec<&OperationalSituation>,
        name: Option<&str>,
    ) -> HaraResult<CombinedSituation> {
        let mut seen = HashSet::new();
        for situation in &constituents {
            if !seen.insert(&situation.id) {
                return Err(HaraError::DuplicateSituation(situation.id.clone()));
            }
        }

        let advisories = self.check_compatibility(&constituents)?;

        let exposure = constituents
            .iter()
            .map(|s| s.exposure)
            .min()
            .ok_or(HaraError::InvalidCombinationSize { count: 0 })?;

        let limiting: Vec<SituationId> = constituents
            .iter()
            .filter(|s| s.exposure == exposure)
            .map(|s| s.id.clone())
            .collect();

        let name = match name {
            Some(given) if !given.trim().is_empty() => given.to_string(),
            _ => synthesize_name(&constituents),
        };

        let rationale = build_rationale(&constituents, exposure);

        debug!(
            name = %name,
            exposure = %exposure,
            constituents = constituents.len(),
            limiting = limiting.len(),
            "Situations combined"
        );

        Ok(CombinedSituation {
            name,
            constituents: constituents.into_iter().cloned().collect(),
            exposure,
            limiting,
            rationale,
            advisories,
        })
    }

    fn check_compatibility(
        &self,
        constituents: &[&OperationalSituation],
    ) -> HaraResult<Vec<String>> {
        let mut advisories = Vec::new();

        for (i, first) in constituents.iter().enumerate() {
            for second in &constituents[i + 1..] {
                let reason = match self.policy.check(first.category, second.category) {
                    Compatibility::Compatible => continue,
                    Compatibility::Incompatible { reason } => reason,
                };

                match self.enforcement {
                    CompatibilityEnforcement::Reject => {
                        warn!(
                            first = %first.id,
                            second = %second.id,
                            %reason,
                            "Incompatible situations rejected"
                        );
                        return Err(HaraError::IncompatibleSituations {
                            first: first.id.clone(),
                            second: second.id.clone(),
                            reason,
                        });
                    }
                    CompatibilityEnforcement::Advisory => {
                        warn!(
                            first = %first.id,
                            second = %second.id,
                            %reason,
                            "Possibly incompatible situations combined"
                        );
                        advisories.push(format!("{} + {}: {}", first.id, second.id, reason));
                    }
                }
            }
        }

        Ok(advisories)
    }
}

impl std::fmt::Debug for ScenarioCombiner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScenarioCombiner")
            .field("situations", &self.catalog.len())
            .field("enforcement", &self.enforcement)
            .finish_non_exhaustive()
    }
}

fn check_size(count: usize) -> HaraResult<()> {
    if count == 0 || count > MAX_COMBINATION_SIZE {
        return Err(HaraError::InvalidCombinationSize { count });
    }
    Ok(())
}

fn synthesize_name(constituents: &[&OperationalSituation]) -> String {
    constituents
        .iter()
        .map(|s| s.name.as_str())
        .collect::<Vec<_>>()
        .join(" + ")
}

fn label(situation: &OperationalSituation) -> String {
    format!("{} ({})", situation.name, situation.id)
}

/// e.g. "Highway cruising (HWY-001): E4; Night driving (ENV-006): E3.
/// Combined exposure = MIN(E4, E3) = E3, limited by Night driving (ENV-006)."
fn build_rationale(constituents: &[&OperationalSituation], exposure: ExposureLevel) -> String {
    let ratings = constituents
        .iter()
        .map(|s| format!("{}: {}", label(s), s.exposure))
        .collect::<Vec<_>>()
        .join("; ");

    let terms = constituents
        .iter()
        .map(|s| s.exposure.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    let limiting = constituents
        .iter()
        .filter(|s| s.exposure == exposure)
        .map(|s| label(s))
        .collect::<Vec<_>>()
        .join(" and ");

    format!("{ratings}. Combined exposure = MIN({terms}) = {exposure}, limited by {limiting}.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compatibility::CategoryPairPolicy;
    use hara_types::SituationCategory;

    fn combiner() -> ScenarioCombiner {
        ScenarioCombiner::new(Arc::new(SituationCatalog::builtin().unwrap()))
    }

    #[test]
    fn combines_with_minimum_exposure() {
        let combined = combiner()
            .combine_ids(&["HWY-001", "ENV-006"], None)
            .unwrap();
        assert_eq!(combined.exposure, ExposureLevel::E3);
        assert_eq!(combined.limiting, vec![SituationId::new("ENV-006")]);
        assert_eq!(combined.name, "Highway cruising + Night driving");
    }

    #[test]
    fn rationale_cites_every_constituent() {
        let combined = combiner()
            .combine_ids(&["HWY-001", "ENV-002", "ENV-006"], None)
            .unwrap();
        assert_eq!(
            combined.rationale,
            "Highway cruising (HWY-001): E4; Heavy rain (ENV-002): E2; Night driving (ENV-006): E3. \
             Combined exposure = MIN(E4, E2, E3) = E2, limited by Heavy rain (ENV-002)."
        );
    }

    #[test]
    fn ties_cite_all_limiting_constituents() {
        let combined = combiner()
            .combine_ids(&["SPC-003", "ENV-007"], None)
            .unwrap();
        assert_eq!(combined.exposure, ExposureLevel::E2);
        assert_eq!(combined.limiting.len(), 2);
        assert!(combined
            .rationale
            .ends_with("limited by EV fast charging (SPC-003) and Extreme heat (ENV-007)."));
    }

    #[test]
    fn supplied_name_is_verbatim() {
        let combined = combiner()
            .combine_ids(&["HWY-002", "ENV-003"], Some("Lane change on snowy highway"))
            .unwrap();
        assert_eq!(combined.name, "Lane change on snowy highway");

        let padded = combiner()
            .combine_ids(&["HWY-001", "ENV-006"], Some(" Night run "))
            .unwrap();
        assert_eq!(padded.name, " Night run ");

        let blank = combiner()
            .combine_ids(&["HWY-002"], Some("   "))
            .unwrap();
        assert_eq!(blank.name, "Highway lane changes");
    }

    #[test]
    fn single_situation_is_identity() {
        let combined = combiner().combine_ids(&["ENV-005"], None).unwrap();
        assert!(combined.is_single());
        assert_eq!(combined.exposure, ExposureLevel::E1);
    }

    #[test]
    fn rejects_bad_sizes_before_lookup() {
        let empty: [&str; 0] = [];
        assert_eq!(
            combiner().combine_ids(&empty, None).unwrap_err(),
            HaraError::InvalidCombinationSize { count: 0 }
        );
        assert_eq!(
            combiner()
                .combine_ids(&["URB-001", "ENV-001", "ENV-006", "NOPE-1"], None)
                .unwrap_err(),
            HaraError::InvalidCombinationSize { count: 4 }
        );
    }

    #[test]
    fn rejects_unknown_ids() {
        let err = combiner()
            .combine_ids(&["URB-001", "ENV-404"], None)
            .unwrap_err();
        assert_eq!(err, HaraError::UnknownSituation(SituationId::new("ENV-404")));
    }

    #[test]
    fn rejects_duplicates() {
        let err = combiner()
            .combine_ids(&["URB-001", "URB-001"], None)
            .unwrap_err();
        assert_eq!(err, HaraError::DuplicateSituation(SituationId::new("URB-001")));
    }

    #[test]
    fn rejects_records_not_from_catalog() {
        let combiner = combiner();
        let forged = OperationalSituation::new(
            "URB-001",
            SituationCategory::Urban,
            "City traffic",
            ExposureLevel::E1,
            "tampered",
        );
        let err = combiner.combine(&[&forged], None).unwrap_err();
        assert!(matches!(err, HaraError::UnknownSituation(_)));

        let genuine = combiner.catalog().find_by_id("URB-001").unwrap().clone();
        assert!(combiner.combine(&[&genuine], None).is_ok());
    }

    #[test]
    fn advisory_policy_records_warnings() {
        let combiner = combiner().with_policy(
            CategoryPairPolicy::new().disallow(SituationCategory::Urban, SituationCategory::Highway),
            CompatibilityEnforcement::Advisory,
        );
        let combined = combiner.combine_ids(&["URB-005", "HWY-001"], None).unwrap();
        assert_eq!(combined.exposure, ExposureLevel::E3);
        assert_eq!(combined.advisories.len(), 1);
        assert!(combined.advisories[0].starts_with("URB-005 + HWY-001"));
    }

    #[test]
    fn reject_policy_fails_combination() {
        let combiner = combiner().with_policy(
            CategoryPairPolicy::new().disallow(SituationCategory::Urban, SituationCategory::Highway),
            CompatibilityEnforcement::Reject,
        );
        let err = combiner
            .combine_ids(&["ENV-006", "URB-005", "HWY-001"], None)
            .unwrap_err();
        match err {
            HaraError::IncompatibleSituations { first, second, .. } => {
                assert_eq!(first.as_str(), "URB-005");
                assert_eq!(second.as_str(), "HWY-001");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        assert!(combiner.combine_ids(&["URB-005", "ENV-006"], None).is_ok());
    }
}
