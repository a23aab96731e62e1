//! ASIL (Automotive Safety Integrity Level) ratings.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::HaraError;

/// ASIL levels according to ISO 26262, ordered QM < A < B < C < D.
///
/// An ASIL is never an independent fact: it is always the image of an
/// (S, E, C) triple under the classification table, so any stored value must
/// agree with re-derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AsilRating {
    /// Quality Management - no safety requirements
    QM,
    /// ASIL A - lowest safety integrity level
    A,
    /// ASIL B
    B,
    /// ASIL C
    C,
    /// ASIL D - highest safety integrity level
    D,
}

impl AsilRating {
    pub const ALL: &'static [AsilRating] = &[
        AsilRating::QM,
        AsilRating::A,
        AsilRating::B,
        AsilRating::C,
        AsilRating::D,
    ];

    /// Short label as it appears in a HARA table column ("QM", "B").
    pub fn as_str(&self) -> &'static str {
        match self {
            AsilRating::QM => "QM",
            AsilRating::A => "A",
            AsilRating::B => "B",
            AsilRating::C => "C",
            AsilRating::D => "D",
        }
    }

    /// Hazards rated A to D need a safety goal; QM hazards are handled by
    /// the quality management process.
    pub fn requires_safety_goal(&self) -> bool {
        *self != AsilRating::QM
    }
}

impl fmt::Display for AsilRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AsilRating::QM => write!(f, "QM"),
            other => write!(f, "ASIL {}", other.as_str()),
        }
    }
}

impl FromStr for AsilRating {
    type Err = HaraError;

    /// Accepts "QM", "A".."D" and the long form "ASIL B".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        let short = normalized
            .strip_prefix("ASIL")
            .map(str::trim_start)
            .unwrap_or(normalized.as_str());
        match short {
            "QM" => Ok(AsilRating::QM),
            "A" => Ok(AsilRating::A),
            "B" => Ok(AsilRating::B),
            "C" => Ok(AsilRating::C),
            "D" => Ok(AsilRating::D),
            _ => Err(HaraError::InvalidLabel(s.to_string())),
        }
    }
}

/// Count of hazards per ASIL, for summary tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AsilDistribution {
    counts: BTreeMap<AsilRating, usize>,
}

impl AsilDistribution {
    pub fn from_ratings<I>(ratings: I) -> Self
    where
        I: IntoIterator<Item = AsilRating>,
    {
        let mut distribution = Self::default();
        for rating in ratings {
            distribution.record(rating);
        }
        distribution
    }

    pub fn record(&mut self, rating: AsilRating) {
        *self.counts.entry(rating).or_insert(0) += 1;
    }

    pub fn count(&self, rating: AsilRating) -> usize {
        self.counts.get(&rating).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Number of hazards rated A or above.
    pub fn safety_relevant(&self) -> usize {
        self.counts
            .iter()
            .filter(|(rating, _)| rating.requires_safety_goal())
            .map(|(_, count)| count)
            .sum()
    }

    pub fn highest(&self) -> Option<AsilRating> {
        self.counts.keys().next_back().copied()
    }

    /// Every rating with its count, QM first, zeros included.
    pub fn iter(&self) -> impl Iterator<Item = (AsilRating, usize)> + '_ {
        AsilRating::ALL.iter().map(|r| (*r, self.count(*r)))
    }
}

impl FromIterator<AsilRating> for AsilDistribution {
    fn from_iter<T: IntoIterator<Item = AsilRating>>(iter: T) -> Self {
        Self::from_ratings(iter)
    }
}
