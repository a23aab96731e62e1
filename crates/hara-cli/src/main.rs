//! HARA CLI - operational situation combination and ASIL classification
//!
//! This CLI gives safety analysts a terminal interface to:
//! - Browse the operational situation catalog
//! - Combine situations into a single exposure rating
//! - Classify (S, E, C) triples into ASIL ratings
//! - Assess a hazard against a combined situation

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod error;
mod output;

use commands::{assess, classify, combine, situations};
use error::CliResult;
use hara_engine::{EngineConfig, HaraEngine};

/// HARA CLI application
#[derive(Parser)]
#[command(name = "hara")]
#[command(about = "HARA - operational situation combination and ASIL classification", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(long, env = "HARA_CONFIG", global = true)]
    config: Option<String>,

    /// Situation catalog file (defaults to the built-in catalog)
    #[arg(long, env = "HARA_CATALOG", global = true)]
    catalog: Option<std::path::PathBuf>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    output: output::OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Browse the operational situation catalog
    #[command(alias = "sit")]
    Situations {
        #[command(subcommand)]
        command: situations::SituationCommands,
    },

    /// Combine 1 to 3 situations into one exposure rating
    Combine(combine::CombineArgs),

    /// Classify a severity / exposure / controllability triple
    Classify(classify::ClassifyArgs),

    /// Print the full severity x exposure x controllability table
    Table,

    /// Assess a hazard in a combined situation
    Assess(assess::AssessArgs),

    /// Show the effective configuration
    Config,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::print_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let mut config = EngineConfig::load(cli.config.as_deref())?;
    if let Some(catalog) = cli.catalog {
        config.catalog.path = Some(catalog);
    }

    init_tracing(&config, cli.verbose);

    let engine = HaraEngine::from_config(&config)?;

    match cli.command {
        Commands::Situations { command } => situations::execute(command, &engine, cli.output),
        Commands::Combine(args) => combine::execute(args, &engine, cli.output),
        Commands::Classify(args) => classify::execute(args, &engine, cli.output),
        Commands::Table => classify::print_table(cli.output),
        Commands::Assess(args) => assess::execute(args, &engine, cli.output),
        Commands::Config => output::print_json(&config),
    }
}

/// Logs go to stderr so JSON output on stdout stays parseable.
fn init_tracing(config: &EngineConfig, verbose: bool) {
    let filter = if verbose {
        "debug".to_string()
    } else {
        config.logging.level.clone()
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| filter.into());

    if config.logging.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .without_time()
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
