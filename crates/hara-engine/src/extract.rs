//! Recover ratings from free-text assessments.
//!
//! Upstream analysis (often written by hand or generated) states its ratings
//! in prose such as `Severity (S): S3`. Labelled forms win; a bare token such
//! as `E4` anywhere in the text is the fallback.

use std::sync::LazyLock;

use regex::Regex;

use hara_types::{
    AsilRating, ControllabilityLevel, ExposureLevel, HaraError, HaraResult, RatingDimension,
    RatingTriple, SeverityLevel,
};

static SEVERITY_LABELLED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Severity \(S\):\s*S([0-3])").expect("severity regex is valid")
});
static EXPOSURE_LABELLED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Exposure \(E\):\s*E([0-4])").expect("exposure regex is valid")
});
static CONTROLLABILITY_LABELLED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Controllability \(C\):\s*C([0-3])").expect("controllability regex is valid")
});

static SEVERITY_BARE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bS([0-3])\b").expect("severity regex is valid"));
static EXPOSURE_BARE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bE([0-4])\b").expect("exposure regex is valid"));
static CONTROLLABILITY_BARE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bC([0-3])\b").expect("controllability regex is valid"));

/// `| ASIL B |` or `| QM |` cells of a markdown HARA table.
static ASIL_CELL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\|\s*(ASIL\s*[A-D]|QM)\s*\|").expect("ASIL cell regex is valid")
});

/// Extract an (S, E, C) triple from free text.
///
/// Fails with `InvalidRatingInput` naming the first dimension that has
/// neither a labelled nor a bare rating.
pub fn extract_ratings(text: &str) -> HaraResult<RatingTriple> {
    let severity = find_index(text, &SEVERITY_LABELLED, &SEVERITY_BARE)
        .ok_or_else(|| missing(RatingDimension::Severity, text))?;
    let exposure = find_index(text, &EXPOSURE_LABELLED, &EXPOSURE_BARE)
        .ok_or_else(|| missing(RatingDimension::Exposure, text))?;
    let controllability = find_index(text, &CONTROLLABILITY_LABELLED, &CONTROLLABILITY_BARE)
        .ok_or_else(|| missing(RatingDimension::Controllability, text))?;

    Ok(RatingTriple::new(
        SeverityLevel::try_from(severity)?,
        ExposureLevel::try_from(exposure)?,
        ControllabilityLevel::try_from(controllability)?,
    ))
}

/// ASIL ratings found in the cells of a markdown table, in row order.
pub fn extract_asil_ratings(table: &str) -> Vec<AsilRating> {
    table
        .lines()
        .filter_map(|row| ASIL_CELL.captures(row))
        .filter_map(|caps| caps[1].parse().ok())
        .collect()
}

fn find_index(text: &str, labelled: &Regex, bare: &Regex) -> Option<u8> {
    labelled
        .captures(text)
        .or_else(|| bare.captures(text))
        .and_then(|caps| caps[1].parse().ok())
}

fn missing(dimension: RatingDimension, text: &str) -> HaraError {
    let excerpt: String = text.chars().take(40).collect();
    HaraError::invalid_rating(dimension, format!("no rating found in {excerpt:?}"))
}
