//! Hazard assessments: a hazard bound to its situation, S/C judgments and ASIL.

use serde::{Deserialize, Serialize};
use tracing::warn;

use hara_types::{
    AsilDistribution, AsilRating, CombinedSituation, ControllabilityLevel, ExposureLevel,
    HaraError, HaraResult, RatingTriple, SeverityLevel,
};

use crate::classifier;

/// Input to `HaraEngine::assess`.
///
/// Severity and controllability are judgments made outside the engine; the
/// exposure always comes from combining `situation_ids`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentRequest {
    pub hazard: String,
    pub situation_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub situation_name: Option<String>,
    pub severity: SeverityLevel,
    pub controllability: ControllabilityLevel,
    #[serde(default)]
    pub severity_rationale: String,
    #[serde(default)]
    pub controllability_rationale: String,
}

impl AssessmentRequest {
    pub fn new<I, S>(
        hazard: impl Into<String>,
        situation_ids: I,
        severity: SeverityLevel,
        controllability: ControllabilityLevel,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            hazard: hazard.into(),
            situation_ids: situation_ids.into_iter().map(Into::into).collect(),
            situation_name: None,
            severity,
            controllability,
            severity_rationale: String::new(),
            controllability_rationale: String::new(),
        }
    }

    pub fn with_situation_name(mut self, name: impl Into<String>) -> Self {
        self.situation_name = Some(name.into());
        self
    }

    pub fn with_rationales(
        mut self,
        severity: impl Into<String>,
        controllability: impl Into<String>,
    ) -> Self {
        self.severity_rationale = severity.into();
        self.controllability_rationale = controllability.into();
        self
    }
}

/// A classified hazardous event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HazardAssessment {
    pub hazard: String,
    pub situation: CombinedSituation,
    pub severity: SeverityLevel,
    pub controllability: ControllabilityLevel,
    pub asil: AsilRating,
    #[serde(default)]
    pub severity_rationale: String,
    #[serde(default)]
    pub controllability_rationale: String,
}

impl HazardAssessment {
    /// Classify `situation` with the given judgments.
    pub fn new(
        hazard: impl Into<String>,
        situation: CombinedSituation,
        severity: SeverityLevel,
        controllability: ControllabilityLevel,
    ) -> Self {
        let asil = classifier::classify(severity, situation.exposure, controllability);
        Self {
            hazard: hazard.into(),
            situation,
            severity,
            controllability,
            asil,
            severity_rationale: String::new(),
            controllability_rationale: String::new(),
        }
    }

    pub fn exposure(&self) -> ExposureLevel {
        self.situation.exposure
    }

    pub fn triple(&self) -> RatingTriple {
        RatingTriple::new(self.severity, self.exposure(), self.controllability)
    }

    pub fn requires_safety_goal(&self) -> bool {
        self.asil.requires_safety_goal()
    }

    /// Re-derive the ASIL from the stored ratings. Fails when the recorded
    /// value disagrees, e.g. after an edited assessment was reloaded.
    pub fn verify(&self) -> HaraResult<AsilRating> {
        let derived = classifier::classify_triple(&self.triple());
        if derived != self.asil {
            warn!(
                hazard = %self.hazard,
                recorded = %self.asil,
                %derived,
                "ASIL mismatch"
            );
            return Err(HaraError::AsilMismatch {
                recorded: self.asil,
                derived,
            });
        }
        Ok(derived)
    }
}

/// Rating counts over a set of assessments.
pub fn distribution<'a, I>(assessments: I) -> AsilDistribution
where
    I: IntoIterator<Item = &'a HazardAssessment>,
{
    assessments.into_iter().map(|a| a.asil).collect()
}
