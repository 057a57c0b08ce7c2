//! # Versions Subcommand
//!
//! Lists supported package versions with the oldest Fuel release each
//! runs on.

use std::io::Write;

use anyhow::Result;
use fpb_core::PackageVersion;
use fpb_validator::minimum_platform;

/// Write the version table to `out`.
pub fn run_versions_to<W: Write>(out: &mut W) -> Result<u8> {
    writeln!(out, "{:<16}{}", "package_version", "minimum fuel_version")?;
    for version in PackageVersion::ALL {
        writeln!(out, "{:<16}{}", version.as_str(), minimum_platform(version))?;
    }
    Ok(0)
}

/// Write the version table to stdout.
pub fn run_versions() -> Result<u8> {
    let stdout = std::io::stdout();
    run_versions_to(&mut stdout.lock())
}
