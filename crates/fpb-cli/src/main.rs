//! # fpb CLI entry point
//!
//! Parses command-line arguments, installs logging and dispatches to the
//! subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use fpb_cli::config::ReportConfig;
use fpb_cli::inspect::{run_inspect, InspectArgs};
use fpb_cli::validate::{run_validate, ValidateArgs, EXIT_CONFIGURATION};
use fpb_cli::versions::run_versions;

/// Fuel plugin builder
///
/// Validates Fuel plugin bundles against the schemas of their declared
/// package version.
#[derive(Parser, Debug)]
#[command(name = "fpb", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a plugin directory.
    Validate(ValidateArgs),

    /// Print the data tree a plugin directory loads into.
    Inspect(InspectArgs),

    /// List supported package versions.
    Versions,
}

fn init_logging(verbose: u8, json: bool) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_json);

    tracing::debug!("fpb CLI v{} starting", env!("CARGO_PKG_VERSION"));

    let result = match cli.command {
        Commands::Validate(args) => ReportConfig::from_env()
            .map_err(anyhow::Error::from)
            .and_then(|config| run_validate(&args, &config)),
        Commands::Inspect(args) => run_inspect(&args),
        Commands::Versions => run_versions(),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_CONFIGURATION)
        }
    }
}
