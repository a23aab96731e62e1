//! Ordinal rating scales: Severity, Exposure, Controllability.
//!
//! Each scale is a closed enum, so a value of the type is always in domain.
//! Conversions from labels ("S3") or indices (3) are the only fallible entry
//! points and report `HaraError::InvalidRatingInput`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{HaraError, RatingDimension};

macro_rules! rating_scale {
    (
        $(#[$meta:meta])*
        $name:ident, $dimension:expr, $prefix:literal {
            $($(#[$vmeta:meta])* $variant:ident = $index:literal => $criterion:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($(#[$vmeta])* $variant = $index,)+
        }

        impl $name {
            /// Every level, lowest first.
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// Ordinal index of the level.
            pub fn index(self) -> u8 {
                self as u8
            }

            /// Canonical label, e.g. `"E3"`.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant),)+
                }
            }

            /// ISO 26262-3 classification criterion for this level.
            pub fn criterion(&self) -> &'static str {
                match self {
                    $($name::$variant => $criterion,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl TryFrom<u8> for $name {
            type Error = HaraError;

            fn try_from(value: u8) -> Result<Self, Self::Error> {
                match value {
                    $($index => Ok($name::$variant),)+
                    other => Err(HaraError::invalid_rating($dimension, other.to_string())),
                }
            }
        }

        impl FromStr for $name {
            type Err = HaraError;

            /// Parses `"S3"`, `"s3"` or `" S3 "`. Bare digits are rejected.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                let invalid = || HaraError::invalid_rating($dimension, s);
                let digits = trimmed
                    .strip_prefix($prefix)
                    .or_else(|| trimmed.strip_prefix(&$prefix.to_ascii_lowercase()))
                    .ok_or_else(invalid)?;
                let index: u8 = digits.parse().map_err(|_| invalid())?;
                $name::try_from(index).map_err(|_| invalid())
            }
        }
    };
}

rating_scale! {
    /// Severity of the worst-case outcome of a hazardous event.
    SeverityLevel, RatingDimension::Severity, "S" {
        /// No injuries
        S0 = 0 => "No injuries",
        /// Light and moderate injuries
        S1 = 1 => "Light and moderate injuries",
        /// Severe and life-threatening injuries (survival probable)
        S2 = 2 => "Severe and life-threatening injuries (survival probable)",
        /// Life-threatening injuries (survival uncertain), fatal injuries
        S3 = 3 => "Life-threatening injuries (survival uncertain), fatal injuries",
    }
}

rating_scale! {
    /// Probability of exposure to the operational situation.
    ExposureLevel, RatingDimension::Exposure, "E" {
        /// Incredible
        E0 = 0 => "Incredible",
        /// Very low probability (situation occurs only in rare operating conditions)
        E1 = 1 => "Very low probability",
        /// Low probability (< 1% of average operating time)
        E2 = 2 => "Low probability (< 1% of average operating time)",
        /// Medium probability (1% to 10% of average operating time)
        E3 = 3 => "Medium probability (1% to 10% of average operating time)",
        /// High probability (> 10% of average operating time)
        E4 = 4 => "High probability (> 10% of average operating time)",
    }
}

rating_scale! {
    /// Ability of an average driver or other traffic participant to avoid harm.
    ControllabilityLevel, RatingDimension::Controllability, "C" {
        /// Controllable in general
        C0 = 0 => "Controllable in general",
        /// Simply controllable (99% or more of drivers avoid harm)
        C1 = 1 => "Simply controllable (99% or more of drivers avoid harm)",
        /// Normally controllable (90% or more of drivers avoid harm)
        C2 = 2 => "Normally controllable (90% or more of drivers avoid harm)",
        /// Difficult to control or uncontrollable (less than 90% avoid harm)
        C3 = 3 => "Difficult to control or uncontrollable (less than 90% of drivers avoid harm)",
    }
}

/// A complete (S, E, C) triple, as fed to the ASIL classifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RatingTriple {
    pub severity: SeverityLevel,
    pub exposure: ExposureLevel,
    pub controllability: ControllabilityLevel,
}

impl RatingTriple {
    pub fn new(
        severity: SeverityLevel,
        exposure: ExposureLevel,
        controllability: ControllabilityLevel,
    ) -> Self {
        Self {
            severity,
            exposure,
            controllability,
        }
    }
}

impl fmt::Display for RatingTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}",
            self.severity, self.exposure, self.controllability
        )
    }
}
