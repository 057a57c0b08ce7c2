//! # Inspect Subcommand
//!
//! Prints the data tree a plugin loads into, after `*_path` resolution and
//! auxiliary file overlays. Loader problems go to stderr.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use fpb_core::RenderFormat;

use crate::validate::{EXIT_CONFIGURATION, EXIT_VALID};

/// Serialization of the printed tree.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeFormat {
    /// Pretty-printed JSON.
    #[default]
    Json,
    /// YAML.
    Yaml,
}

/// Arguments for the `fpb inspect` subcommand.
#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    /// Plugin directory containing metadata.yaml.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = TreeFormat::Json)]
    pub format: TreeFormat,
}

/// Execute the inspect subcommand, writing the tree to `out` and the load
/// report to `err`.
pub fn run_inspect_to<W: Write, E: Write>(
    args: &InspectArgs,
    out: &mut W,
    err: &mut E,
) -> Result<u8> {
    let loaded = match fpb_validator::load(&args.path) {
        Ok(loaded) => loaded,
        Err(e) => {
            tracing::error!(path = %args.path.display(), "{e}");
            writeln!(err, "ERROR: {e}")?;
            return Ok(EXIT_CONFIGURATION);
        }
    };

    let rendered = match args.format {
        TreeFormat::Json => serde_json::to_string_pretty(&loaded.tree)
            .context("failed to serialize data tree as JSON")?,
        TreeFormat::Yaml => {
            serde_yaml::to_string(&loaded.tree).context("failed to serialize data tree as YAML")?
        }
    };
    writeln!(out, "{}", rendered.trim_end())?;

    let report = loaded
        .report
        .render(RenderFormat::Text, false)
        .context("failed to render load report")?;
    writeln!(err, "{report}")?;
    Ok(EXIT_VALID)
}

/// Execute the inspect subcommand against stdout and stderr.
pub fn run_inspect(args: &InspectArgs) -> Result<u8> {
    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    run_inspect_to(args, &mut stdout.lock(), &mut stderr.lock())
}
