//! Logical compatibility of combined situations.
//!
//! Situations combined into one must be able to occur at the same time
//! (parking and highway cruising cannot). There is no complete compatibility
//! matrix, so the rule is a policy supplied by the caller: a predicate over
//! category pairs. The combiner consults it for every pair of constituents
//! and applies the configured enforcement to the verdict.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use hara_types::SituationCategory;

/// Verdict for one pair of categories.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Compatibility {
    Compatible,
    Incompatible { reason: String },
}

impl Compatibility {
    pub fn is_compatible(&self) -> bool {
        matches!(self, Compatibility::Compatible)
    }
}

/// Decides whether situations of two categories may be combined.
///
/// Implementations must be symmetric; the combiner passes each unordered
/// pair once, in constituent order.
pub trait CompatibilityPolicy: Send + Sync {
    fn check(&self, first: SituationCategory, second: SituationCategory) -> Compatibility;
}

/// Any `Fn(first, second) -> bool` is a policy: `true` means compatible.
impl<F> CompatibilityPolicy for F
where
    F: Fn(SituationCategory, SituationCategory) -> bool + Send + Sync,
{
    fn check(&self, first: SituationCategory, second: SituationCategory) -> Compatibility {
        if self(first, second) {
            Compatibility::Compatible
        } else {
            Compatibility::Incompatible {
                reason: format!("{first} and {second} situations cannot occur together"),
            }
        }
    }
}

/// Accepts every combination. This is the engine default.
#[derive(Clone, Copy, Debug, Default)]
pub struct PermissiveCompatibility;

impl CompatibilityPolicy for PermissiveCompatibility {
    fn check(&self, _first: SituationCategory, _second: SituationCategory) -> Compatibility {
        Compatibility::Compatible
    }
}

/// Rejects an explicit list of unordered category pairs.
#[derive(Clone, Debug, Default)]
pub struct CategoryPairPolicy {
    disallowed: HashSet<(SituationCategory, SituationCategory)>,
}

impl CategoryPairPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (SituationCategory, SituationCategory)>,
    {
        pairs
            .into_iter()
            .fold(Self::new(), |policy, (a, b)| policy.disallow(a, b))
    }

    pub fn disallow(mut self, a: SituationCategory, b: SituationCategory) -> Self {
        self.disallowed.insert(ordered(a, b));
        self
    }

    pub fn is_disallowed(&self, a: SituationCategory, b: SituationCategory) -> bool {
        self.disallowed.contains(&ordered(a, b))
    }

    pub fn len(&self) -> usize {
        self.disallowed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.disallowed.is_empty()
    }
}

impl CompatibilityPolicy for CategoryPairPolicy {
    fn check(&self, first: SituationCategory, second: SituationCategory) -> Compatibility {
        if self.is_disallowed(first, second) {
            Compatibility::Incompatible {
                reason: format!("{first} / {second} is a disallowed category pair"),
            }
        } else {
            Compatibility::Compatible
        }
    }
}

fn ordered(
    a: SituationCategory,
    b: SituationCategory,
) -> (SituationCategory, SituationCategory) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// What the combiner does with an `Incompatible` verdict.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompatibilityEnforcement {
    /// Record the verdict on the combined situation and carry on
    #[default]
    Advisory,
    /// Fail the combination with `IncompatibleSituations`
    Reject,
}
