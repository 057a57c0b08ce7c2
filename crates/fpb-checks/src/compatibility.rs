//! Platform version compatibility.

use fpb_core::{PlatformVersion, ReportNode};
use serde_json::Value;

/// Title of the compatibility check node.
pub const TITLE: &str = "Checking fuel_version compatibility with package_version";

/// Every Fuel release a plugin declares, with malformed entries reported.
///
/// Reads `fuel_version` at the manifest root and `releases[*].fuel_version`
/// when releases carry their own lists.
fn declared_versions(metadata: &Value, report: &mut ReportNode) -> Vec<PlatformVersion> {
    let mut lists: Vec<&Value> = Vec::new();
    if let Some(list) = metadata.get("fuel_version") {
        lists.push(list);
    }
    if let Some(Value::Array(releases)) = metadata.get("releases") {
        lists.extend(releases.iter().filter_map(|r| r.get("fuel_version")));
    }

    let mut versions = Vec::new();
    for list in lists {
        let Value::Array(items) = list else {
            report.error(format!("fuel_version should be a list of versions, got {list}"));
            continue;
        };
        for item in items {
            let parsed = match item {
                Value::String(s) => PlatformVersion::parse(s).map_err(|e| e.to_string()),
                Value::Number(n) => {
                    PlatformVersion::parse(&n.to_string()).map_err(|e| e.to_string())
                }
                other => Err(format!("{other} is not a version string")),
            };
            match parsed {
                Ok(version) if !versions.contains(&version) => versions.push(version),
                Ok(_) => {}
                Err(reason) => {
                    report.error(reason);
                }
            }
        }
    }
    versions
}

/// Verify that every Fuel release the manifest declares is at least
/// `minimum`.
pub fn version_compatibility_check(minimum: &PlatformVersion, metadata: &Value) -> ReportNode {
    let mut report = ReportNode::new(TITLE);
    let package_version = metadata
        .get("package_version")
        .and_then(Value::as_str)
        .unwrap_or("unknown");
    report.info(format!("Expected Fuel version >= {minimum}"));

    let declared = declared_versions(metadata, &mut report);
    let incompatible: Vec<String> = declared
        .iter()
        .filter(|v| *v < minimum)
        .map(|v| format!("'{v}'"))
        .collect();

    if !incompatible.is_empty() {
        let list = incompatible.join(", ");
        report.error(format!(
            "Current plugin format {package_version} is not compatible with {list} Fuel release. \
             Fuel version must be {minimum} or higher. Please remove {list} version from \
             metadata.yaml file or downgrade package_version."
        ));
    } else if !report.is_failed() {
        report.info("Plugin is compatible with target Fuel version.");
    }
    report
}
