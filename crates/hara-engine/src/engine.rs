//! The HARA engine facade: catalog, combiner, classifier and registry behind
//! one handle.

use std::sync::Arc;
use tracing::{debug, info};

use hara_types::{
    AsilRating, CombinedSituation, ControllabilityLevel, ExposureLevel, HaraResult,
    OperationalSituation, SeverityLevel,
};

use crate::assessment::{AssessmentRequest, HazardAssessment};
use crate::catalog::SituationCatalog;
use crate::classifier;
use crate::combiner::ScenarioCombiner;
use crate::compatibility::{CompatibilityEnforcement, CompatibilityPolicy};
use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::registry::CustomCombinationRegistry;

/// Shared entry point for combining situations and classifying hazards.
///
/// The catalog is immutable and shared; the registry is the only mutable
/// state and is safe to use from several threads.
#[derive(Debug)]
pub struct HaraEngine {
    combiner: ScenarioCombiner,
    registry: CustomCombinationRegistry,
}

impl HaraEngine {
    pub fn new(catalog: Arc<SituationCatalog>) -> Self {
        Self {
            combiner: ScenarioCombiner::new(catalog),
            registry: CustomCombinationRegistry::new(),
        }
    }

    /// Engine over the embedded catalog with the permissive policy.
    pub fn builtin() -> HaraResult<Self> {
        Ok(Self::new(Arc::new(SituationCatalog::builtin()?)))
    }

    pub fn from_config(config: &EngineConfig) -> EngineResult<Self> {
        let catalog = config.catalog.load()?;
        let policy = config.compatibility.policy();

        info!(
            situations = catalog.len(),
            incompatible_pairs = policy.len(),
            enforcement = ?config.compatibility.enforcement,
            "HARA engine configured"
        );

        Ok(Self::new(Arc::new(catalog))
            .with_policy(policy, config.compatibility.enforcement))
    }

    pub fn with_policy(
        mut self,
        policy: impl CompatibilityPolicy + 'static,
        enforcement: CompatibilityEnforcement,
    ) -> Self {
        self.combiner = self.combiner.with_policy(policy, enforcement);
        self
    }

    pub fn catalog(&self) -> &SituationCatalog {
        self.combiner.catalog()
    }

    pub fn combiner(&self) -> &ScenarioCombiner {
        &self.combiner
    }

    pub fn registry(&self) -> &CustomCombinationRegistry {
        &self.registry
    }

    pub fn combine(
        &self,
        situations: &[&OperationalSituation],
        name: Option<&str>,
    ) -> HaraResult<CombinedSituation> {
        self.combiner.combine(situations, name)
    }

    pub fn combine_ids<S: AsRef<str>>(
        &self,
        ids: &[S],
        name: Option<&str>,
    ) -> HaraResult<CombinedSituation> {
        self.combiner.combine_ids(ids, name)
    }

    pub fn classify(
        &self,
        severity: SeverityLevel,
        exposure: ExposureLevel,
        controllability: ControllabilityLevel,
    ) -> AsilRating {
        let asil = classifier::classify(severity, exposure, controllability);
        debug!(
            %severity,
            %exposure,
            %controllability,
            %asil,
            "Hazardous event classified"
        );
        asil
    }

    /// Register a named combination for later lookup.
    pub fn register<S: AsRef<str>>(
        &self,
        name: &str,
        ids: &[S],
    ) -> HaraResult<CombinedSituation> {
        self.registry.register(&self.combiner, name, ids)
    }

    pub fn resolve(&self, name: &str) -> HaraResult<CombinedSituation> {
        self.registry.resolve(name)
    }

    /// Combine the request's situations and classify the hazard.
    pub fn assess(&self, request: AssessmentRequest) -> HaraResult<HazardAssessment> {
        let situation = self
            .combiner
            .combine_ids(&request.situation_ids, request.situation_name.as_deref())?;

        let mut assessment = HazardAssessment::new(
            request.hazard,
            situation,
            request.severity,
            request.controllability,
        );
        assessment.severity_rationale = request.severity_rationale;
        assessment.controllability_rationale = request.controllability_rationale;

        debug!(
            hazard = %assessment.hazard,
            ratings = %assessment.triple(),
            asil = %assessment.asil,
            "Hazard assessed"
        );

        Ok(assessment)
    }
}
