//! # Validate Subcommand
//!
//! Validates one plugin directory and prints the report to stdout.
//!
//! Exit codes: [`EXIT_VALID`], [`EXIT_INVALID`], and
//! [`EXIT_CONFIGURATION`] when the plugin cannot be validated at all
//! (missing manifest, unknown `package_version`).

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use fpb_core::{RenderFormat, RenderOptions};

use crate::config::ReportConfig;

/// The plugin passed every check.
pub const EXIT_VALID: u8 = 0;
/// The report holds at least one error.
pub const EXIT_INVALID: u8 = 1;
/// Validation could not run.
pub const EXIT_CONFIGURATION: u8 = 2;

/// Arguments for the `fpb validate` subcommand.
#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Plugin directory containing metadata.yaml.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Output format: text, json or yaml.
    #[arg(long)]
    pub format: Option<RenderFormat>,

    /// Omit the closing summary.
    #[arg(long)]
    pub no_summary: bool,

    /// Spaces per nesting level in text output.
    #[arg(long)]
    pub indent: Option<usize>,

    /// Marker placed before the deepest failures in text output.
    #[arg(long)]
    pub pointer: Option<String>,

    /// Stamp JSON and YAML output with the generation time.
    #[arg(long)]
    pub timestamp: bool,
}

impl ValidateArgs {
    /// Apply command line overrides on top of `config`.
    pub fn effective_config(&self, config: &ReportConfig) -> ReportConfig {
        let mut effective = config.clone();
        if let Some(format) = self.format {
            effective.format = format;
        }
        if let Some(indent) = self.indent {
            effective.style.indent = indent;
        }
        if let Some(pointer) = &self.pointer {
            effective.style.failure_pointer = pointer.clone();
        }
        effective.timestamp |= self.timestamp;
        effective
    }
}

/// Execute the validate subcommand, writing the report to `out`.
pub fn run_validate_to<W: Write>(
    args: &ValidateArgs,
    config: &ReportConfig,
    out: &mut W,
) -> Result<u8> {
    let config = args.effective_config(config);
    let root: &Path = &args.path;

    let report = match fpb_validator::validate(root) {
        Ok(report) => report,
        Err(e) => {
            tracing::error!(path = %root.display(), "{e}");
            writeln!(out, "ERROR: {e}")?;
            return Ok(EXIT_CONFIGURATION);
        }
    };

    let options = RenderOptions {
        style: config.style.clone(),
        generated_at: (config.timestamp && config.format != RenderFormat::Text)
            .then(chrono::Utc::now),
    };
    let rendered = report
        .render_with(config.format, !args.no_summary, &options)
        .context("failed to render validation report")?;
    writeln!(out, "{rendered}")?;

    if report.is_failed() {
        Ok(EXIT_INVALID)
    } else {
        Ok(EXIT_VALID)
    }
}

/// Execute the validate subcommand against stdout.
pub fn run_validate(args: &ValidateArgs, config: &ReportConfig) -> Result<u8> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_validate_to(args, config, &mut out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(path: &Path) -> ValidateArgs {
        ValidateArgs {
            path: path.to_path_buf(),
            format: None,
            no_summary: false,
            indent: None,
            pointer: None,
            timestamp: false,
        }
    }

    #[test]
    fn flags_override_configuration() {
        let mut a = args(Path::new("."));
        a.format = Some(RenderFormat::Json);
        a.indent = Some(2);
        a.pointer = Some("! ".to_string());
        a.timestamp = true;
        let effective = a.effective_config(&ReportConfig::default());
        assert_eq!(effective.format, RenderFormat::Json);
        assert_eq!(effective.style.indent, 2);
        assert_eq!(effective.style.failure_pointer, "! ");
        assert!(effective.timestamp);
    }

    #[test]
    fn unset_flags_keep_configuration() {
        let config = ReportConfig {
            format: RenderFormat::Yaml,
            ..ReportConfig::default()
        };
        assert_eq!(args(Path::new(".")).effective_config(&config), config);
    }

    #[test]
    fn missing_manifest_is_configuration_exit() {
        let dir = tempfile::tempdir().unwrap();
        let mut out = Vec::new();
        let code = run_validate_to(&args(dir.path()), &ReportConfig::default(), &mut out).unwrap();
        assert_eq!(code, EXIT_CONFIGURATION);
        assert!(String::from_utf8(out).unwrap().contains("plugin manifest not found"));
    }
}
