//! Reading `package_version` ahead of the full load.

use std::path::Path;

use fpb_core::{ConfigurationError, PackageVersion};
use fpb_loader::files::load_file;
use fpb_loader::find_manifest;
use fpb_loader::loader::MANIFEST_NAMES;
use serde_json::Value;

/// The package version declared by the plugin at `root`.
pub fn read_package_version(root: &Path) -> Result<PackageVersion, ConfigurationError> {
    let manifest = find_manifest(root).ok_or_else(|| ConfigurationError::ManifestNotFound {
        path: root.to_path_buf(),
        expected: MANIFEST_NAMES.join(", "),
    })?;
    let data = load_file(&manifest).map_err(|e| ConfigurationError::ManifestUnreadable {
        path: manifest.clone(),
        reason: e.to_string(),
    })?;
    match data.get("package_version") {
        Some(Value::String(declared)) => declared.parse(),
        Some(Value::Null) | None => {
            Err(ConfigurationError::MissingPackageVersion { path: manifest })
        }
        Some(other) => Err(ConfigurationError::UnsupportedPackageVersion {
            version: other.to_string(),
            supported: PackageVersion::supported_list(),
        }),
    }
}
