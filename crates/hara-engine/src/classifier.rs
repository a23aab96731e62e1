//! ASIL classification: (Severity, Exposure, Controllability) -> ASIL.
//!
//! The mapping is an explicit three-dimensional table indexed by the ordinal
//! of each scale. Every one of the 4 x 5 x 4 = 80 cells is written out, so no
//! value is extrapolated at the table boundaries.
//!
//! Structure of the table:
//! - S0, E0 and C0 rows are QM throughout
//! - the rating never decreases when S, E or C increases
//! - S3 / C3 is rated D from E2 upwards

use hara_types::{
    AsilRating, ControllabilityLevel, ExposureLevel, HaraResult, RatingTriple, SeverityLevel,
};

/// `ASIL_TABLE[severity][exposure][controllability]`
const ASIL_TABLE: [[[AsilRating; 4]; 5]; 4] = {
    use AsilRating::*;
    [
        // S0
        [
            [QM, QM, QM, QM], // E0
            [QM, QM, QM, QM], // E1
            [QM, QM, QM, QM], // E2
            [QM, QM, QM, QM], // E3
            [QM, QM, QM, QM], // E4
        ],
        // S1
        [
            [QM, QM, QM, QM], // E0
            [QM, QM, QM, QM], // E1
            [QM, QM, QM, QM], // E2
            [QM, QM, QM, A],  // E3
            [QM, QM, A, B],   // E4
        ],
        // S2
        [
            [QM, QM, QM, QM], // E0
            [QM, QM, QM, QM], // E1
            [QM, QM, QM, A],  // E2
            [QM, QM, A, B],   // E3
            [QM, A, B, C],    // E4
        ],
        // S3
        [
            [QM, QM, QM, QM], // E0
            [QM, QM, QM, A],  // E1
            [QM, QM, A, D],   // E2
            [QM, A, B, D],    // E3
            [QM, B, C, D],    // E4
        ],
    ]
};

/// Classify a hazardous event. Total and pure: the same inputs always give
/// the same rating.
pub fn classify(
    severity: SeverityLevel,
    exposure: ExposureLevel,
    controllability: ControllabilityLevel,
) -> AsilRating {
    ASIL_TABLE[severity.index() as usize][exposure.index() as usize]
        [controllability.index() as usize]
}

pub fn classify_triple(triple: &RatingTriple) -> AsilRating {
    classify(triple.severity, triple.exposure, triple.controllability)
}

/// Classify from labels such as `("S3", "E2", "C3")`.
pub fn classify_labels(
    severity: &str,
    exposure: &str,
    controllability: &str,
) -> HaraResult<AsilRating> {
    Ok(classify(
        severity.parse()?,
        exposure.parse()?,
        controllability.parse()?,
    ))
}

/// Classify from raw ordinal indices, rejecting anything outside the scales.
pub fn classify_indices(
    severity: u8,
    exposure: u8,
    controllability: u8,
) -> HaraResult<AsilRating> {
    Ok(classify(
        SeverityLevel::try_from(severity)?,
        ExposureLevel::try_from(exposure)?,
        ControllabilityLevel::try_from(controllability)?,
    ))
}

/// Every cell of the table as `(triple, rating)`, severity-major.
pub fn table_cells() -> impl Iterator<Item = (RatingTriple, AsilRating)> {
    SeverityLevel::ALL.iter().flat_map(|&s| {
        ExposureLevel::ALL.iter().flat_map(move |&e| {
            ControllabilityLevel::ALL.iter().map(move |&c| {
                let triple = RatingTriple::new(s, e, c);
                (triple, classify(s, e, c))
            })
        })
    })
}
