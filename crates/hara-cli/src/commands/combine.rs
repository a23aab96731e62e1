//! Situation combination command

use clap::Args;
use serde::Serialize;
use tabled::{Table, Tabled};

use hara_engine::HaraEngine;
use hara_types::CombinedSituation;

use crate::error::CliResult;
use crate::output::{self, print_field, print_warning, OutputFormat};

/// Arguments for `hara combine`
#[derive(Args)]
pub struct CombineArgs {
    /// Situation IDs to combine (1 to 3)
    #[arg(required = true, num_args = 1..)]
    pub ids: Vec<String>,

    /// Name for the combined situation
    #[arg(short, long)]
    pub name: Option<String>,
}

/// Table row for a combination's constituents
#[derive(Debug, Serialize, Tabled)]
struct ConstituentRow {
    id: String,
    name: String,
    exposure: String,
    limiting: String,
}

fn constituent_rows(combined: &CombinedSituation) -> Vec<ConstituentRow> {
    combined
        .constituents
        .iter()
        .map(|s| ConstituentRow {
            id: s.id.to_string(),
            name: s.name.clone(),
            exposure: s.exposure.to_string(),
            limiting: if combined.limiting.contains(&s.id) {
                "yes".to_string()
            } else {
                String::new()
            },
        })
        .collect()
}

/// Print a combined situation in the requested format
pub fn print_combined(combined: &CombinedSituation, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => output::print_json(combined),
        OutputFormat::Table => {
            println!("{}", Table::new(constituent_rows(combined)));
            print_field("Combined", &combined.name);
            print_field("Exposure", combined.exposure);
            print_field("Rationale", &combined.rationale);
            for advisory in &combined.advisories {
                print_warning(advisory);
            }
            Ok(())
        }
    }
}

/// Execute the combine command
pub fn execute(args: CombineArgs, engine: &HaraEngine, format: OutputFormat) -> CliResult<()> {
    let combined = engine.combine_ids(&args.ids, args.name.as_deref())?;
    print_combined(&combined, format)
}
