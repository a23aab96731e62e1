//! Operational situation catalog commands

use clap::Subcommand;
use serde::Serialize;
use tabled::Tabled;

use hara_engine::HaraEngine;
use hara_types::OperationalSituation;

use crate::error::CliResult;
use crate::output::{self, print_field, OutputFormat};

/// Situation subcommands
#[derive(Subcommand)]
pub enum SituationCommands {
    /// List catalog situations
    List {
        /// Filter by category (urban, highway, environmental, special, critical, states)
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Show one situation
    Show {
        /// Situation ID, e.g. HWY-001
        id: String,
    },
}

/// Table row for situation listings
#[derive(Debug, Serialize, Tabled)]
struct SituationRow {
    id: String,
    category: String,
    name: String,
    exposure: String,
}

impl From<&OperationalSituation> for SituationRow {
    fn from(situation: &OperationalSituation) -> Self {
        Self {
            id: situation.id.to_string(),
            category: situation.category.keyword().to_string(),
            name: situation.name.clone(),
            exposure: situation.exposure.to_string(),
        }
    }
}

/// Execute a situation command
pub fn execute(
    command: SituationCommands,
    engine: &HaraEngine,
    format: OutputFormat,
) -> CliResult<()> {
    match command {
        SituationCommands::List { category } => {
            let catalog = engine.catalog();
            let situations = match category {
                Some(keyword) => catalog.find_by_category_keyword(&keyword)?,
                None => catalog.iter().collect(),
            };
            let rows: Vec<SituationRow> = situations.into_iter().map(SituationRow::from).collect();
            output::print_output(rows, format)
        }

        SituationCommands::Show { id } => {
            let situation = engine.catalog().find_by_id(&id)?;
            match format {
                OutputFormat::Json => output::print_json(situation),
                OutputFormat::Table => {
                    print_field("ID", &situation.id);
                    print_field("Name", &situation.name);
                    print_field("Category", situation.category);
                    print_field(
                        "Exposure",
                        format!("{} - {}", situation.exposure, situation.exposure.criterion()),
                    );
                    print_field("Rationale", &situation.rationale);
                    let optional = [
                        ("Description", &situation.description),
                        ("Share of time", &situation.exposure_percentage),
                        ("Frequency", &situation.frequency),
                        ("Duration", &situation.typical_duration),
                    ];
                    for (label, value) in optional {
                        if let Some(value) = value {
                            print_field(label, value);
                        }
                    }
                    Ok(())
                }
            }
        }
    }
}
