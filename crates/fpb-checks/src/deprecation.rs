//! Deprecation warnings. These never fail a report.

use fpb_core::ReportNode;
use serde_json::Value;

/// Warn when the manifest still carries the root `fuel_version` list.
pub fn legacy_fuel_version_check(metadata: &Value) -> ReportNode {
    let mut report = ReportNode::new("Checking for legacy field 'fuel_version'");
    if metadata.get("fuel_version").is_some() {
        report.warning(
            "\"fuel_version\" field in metadata.yaml is deprecated and will be removed in further \
             Fuel releases.",
        );
    }
    report
}

/// Warn when a release record carries a `mode` directive.
pub fn mode_directive_check(release: &Value) -> ReportNode {
    let mut report = ReportNode::new("Looking for deprecated 'mode' directive inside releases");
    if release.get("mode").is_some() {
        report.warning(
            "\"mode\" directive is deprecated and ignored by Fuel releases older than 6.1",
        );
    }
    report
}
