//! ASIL classification command

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use hara_engine::{classifier, HaraEngine};
use hara_types::{AsilRating, ControllabilityLevel, ExposureLevel, RatingTriple, SeverityLevel};

use crate::error::CliResult;
use crate::output::{self, OutputFormat};

/// Arguments for `hara classify`
#[derive(Args)]
pub struct ClassifyArgs {
    /// Severity, S0 to S3
    pub severity: SeverityLevel,

    /// Exposure, E0 to E4
    pub exposure: ExposureLevel,

    /// Controllability, C0 to C3
    pub controllability: ControllabilityLevel,
}

/// One classified triple
#[derive(Debug, Serialize, Tabled)]
struct ClassificationRow {
    severity: SeverityLevel,
    exposure: ExposureLevel,
    controllability: ControllabilityLevel,
    asil: AsilRating,
    #[tabled(rename = "safety goal")]
    safety_goal: bool,
}

impl ClassificationRow {
    fn new(triple: RatingTriple, asil: AsilRating) -> Self {
        Self {
            severity: triple.severity,
            exposure: triple.exposure,
            controllability: triple.controllability,
            asil,
            safety_goal: asil.requires_safety_goal(),
        }
    }
}

/// Execute the classify command
pub fn execute(args: ClassifyArgs, engine: &HaraEngine, format: OutputFormat) -> CliResult<()> {
    let asil = engine.classify(args.severity, args.exposure, args.controllability);
    let triple = RatingTriple::new(args.severity, args.exposure, args.controllability);
    output::print_output(vec![ClassificationRow::new(triple, asil)], format)
}

/// Print every cell of the classification table
pub fn print_table(format: OutputFormat) -> CliResult<()> {
    let rows: Vec<ClassificationRow> = classifier::table_cells()
        .map(|(triple, asil)| ClassificationRow::new(triple, asil))
        .collect();
    output::print_output(rows, format)
}
