#![deny(missing_docs)]

//! # fpb-validator — Validator Dispatch
//!
//! Entry point of the engine. [`validate`] reads the declared
//! `package_version`, selects the matching [`PackageBinding`], loads the
//! plugin with the bound layout and runs the bound check suite.
//!
//! ## Design Principles
//!
//! 1. **Configuration errors abort, plugin errors report.** A missing
//!    manifest or an unknown package version is a
//!    [`fpb_core::ConfigurationError`]. Everything else ends up in the
//!    returned report.
//!
//! 2. **Partial loads still validate.** The suite is skipped only when the
//!    load produced no data at all.
//!
//! 3. **No output.** Nothing here prints or exits; callers render the
//!    report.

use std::path::Path;

use fpb_core::{ConfigurationError, ReportNode};
use fpb_loader::DataTree;

pub mod binding;
pub mod manifest;
pub mod suite;

pub use binding::{minimum_platform, PackageBinding};
pub use manifest::read_package_version;

/// Result of loading a plugin for its declared package version.
#[derive(Debug, Clone)]
pub struct LoadedPlugin {
    /// The binding selected by `package_version`.
    pub binding: PackageBinding,
    /// The merged data tree.
    pub tree: DataTree,
    /// Problems found while loading.
    pub report: ReportNode,
}

/// Load the plugin at `root` with the layout of its declared version.
pub fn load(root: &Path) -> Result<LoadedPlugin, ConfigurationError> {
    let version = read_package_version(root)?;
    let binding = PackageBinding::for_version(version)?;
    let (tree, report) = fpb_loader::load(root, &binding.layout);
    Ok(LoadedPlugin {
        binding,
        tree,
        report,
    })
}

/// Validate the plugin at `root`.
pub fn validate(root: &Path) -> Result<ReportNode, ConfigurationError> {
    let LoadedPlugin {
        binding,
        tree,
        report: load_report,
    } = load(root)?;

    let mut report = ReportNode::new(format!("Validating: {}", root.display()));
    report.add_node(load_report);
    if tree.is_empty() {
        tracing::info!(root = %root.display(), "nothing loaded; checks skipped");
        return Ok(report);
    }
    report.add_node(suite::run(&binding, root, &tree)?);

    tracing::info!(
        root = %root.display(),
        package_version = %binding.version,
        failures = report.count_failures(),
        "validation finished"
    );
    Ok(report)
}
