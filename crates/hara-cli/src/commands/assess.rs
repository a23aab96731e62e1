//! Hazard assessment command

use clap::Args;

use hara_engine::{AssessmentRequest, HaraEngine};
use hara_types::{ControllabilityLevel, SeverityLevel};

use crate::commands::combine;
use crate::error::CliResult;
use crate::output::{self, print_field, print_success, OutputFormat};

/// Arguments for `hara assess`
#[derive(Args)]
pub struct AssessArgs {
    /// Severity, S0 to S3
    #[arg(short, long)]
    pub severity: SeverityLevel,

    /// Controllability, C0 to C3
    #[arg(short, long)]
    pub controllability: ControllabilityLevel,

    /// Hazard description
    #[arg(long, default_value = "Unnamed hazard")]
    pub hazard: String,

    /// Name for the combined situation
    #[arg(short, long)]
    pub name: Option<String>,

    /// Situation IDs defining the operational situation (1 to 3)
    #[arg(required = true, num_args = 1..)]
    pub ids: Vec<String>,
}

/// Execute the assess command
pub fn execute(args: AssessArgs, engine: &HaraEngine, format: OutputFormat) -> CliResult<()> {
    let mut request =
        AssessmentRequest::new(args.hazard, args.ids, args.severity, args.controllability);
    if let Some(name) = args.name {
        request = request.with_situation_name(name);
    }

    let assessment = engine.assess(request)?;

    match format {
        OutputFormat::Json => output::print_json(&assessment),
        OutputFormat::Table => {
            combine::print_combined(&assessment.situation, format)?;
            print_field("Hazard", &assessment.hazard);
            print_field("Ratings", assessment.triple());
            print_field("ASIL", assessment.asil);
            if assessment.requires_safety_goal() {
                print_success("Safety goal required");
            } else {
                print_success("QM: no safety goal required");
            }
            Ok(())
        }
    }
}
