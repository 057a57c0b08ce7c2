//! Path existence checks relative to the plugin root.
//!
//! Paths containing glob metacharacters (`*`, `?`, `[`) are masks and are
//! satisfied by at least one match.

use std::path::Path;

use fpb_core::ReportNode;
use fpb_loader::files::{is_mask, mask_pattern};
use serde_json::Value;

/// Title of the path check node.
pub const TITLE: &str = "Checking path existence";

/// Release fields naming directories inside the plugin.
pub const RELEASE_PATH_FIELDS: [&str; 2] = ["deployment_scripts_path", "repository_path"];

fn mask_matches(base: &Path, mask: &str) -> bool {
    let pattern = mask_pattern(base, mask);
    match glob::glob(&pattern) {
        Ok(mut paths) => paths.any(|entry| entry.is_ok()),
        Err(e) => {
            tracing::debug!(%pattern, error = %e, "invalid path mask");
            false
        }
    }
}

/// Report whether `relative` exists below `base`.
pub fn path_existence_check(base: &Path, relative: &str) -> ReportNode {
    let mut report = ReportNode::new(TITLE);
    report.info(format!("Path: {relative}"));

    let exists = if is_mask(relative) {
        mask_matches(base, relative)
    } else {
        base.join(relative).exists()
    };
    if !exists {
        report.error(format!("Path {relative} does not exist"));
    }
    report
}

/// Check every path-valued field a release record carries.
///
/// Each present field gets a node titled with the field name. Non-string
/// values are left to the schema check.
pub fn release_paths_check(base: &Path, release: &Value) -> ReportNode {
    let mut report = ReportNode::new("Checking release paths");
    for field in RELEASE_PATH_FIELDS {
        if let Some(Value::String(relative)) = release.get(field) {
            let mut node = ReportNode::new(field);
            node.add_node(path_existence_check(base, relative));
            report.add_node(node);
        }
    }
    report
}
