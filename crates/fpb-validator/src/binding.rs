//! Package version bindings.
//!
//! | package version | minimum Fuel | tasks.yaml | deployment tasks | components | graphs |
//! |-----------------|--------------|------------|------------------|------------|--------|
//! | 1.0.0 | 6.0 | yes | no | no | no |
//! | 2.0.0 | 6.1 | yes | no | no | no |
//! | 3.0.0 | 7.0 | yes | yes | no | no |
//! | 4.0.0 | 8.0 | yes | yes | yes | no |
//! | 5.0.0 | 8.0 | no | yes | yes | yes |

use fpb_core::{ConfigurationError, PackageVersion, PlatformVersion};
use fpb_loader::Layout;
use fpb_schema::SchemaSet;

/// Oldest Fuel release able to run plugins of `version`.
///
/// 5.0.0 is pinned to 8.0, the same floor as 4.0.0. No earlier release
/// table fixes a 5.0.0 floor (it was either a `0.1` placeholder or `9.0`),
/// so 8.0 is a deliberate choice.
pub fn minimum_platform(version: PackageVersion) -> &'static str {
    match version {
        PackageVersion::V1 => "6.0",
        PackageVersion::V2 => "6.1",
        PackageVersion::V3 => "7.0",
        PackageVersion::V4 | PackageVersion::V5 => "8.0",
    }
}

/// Everything a package version selects.
#[derive(Debug, Clone)]
pub struct PackageBinding {
    /// The bound version.
    pub version: PackageVersion,
    /// Lowest acceptable `fuel_version` entry.
    pub minimum_platform: PlatformVersion,
    /// Auxiliary files the loader reads.
    pub layout: Layout,
    /// Schemas the check suite applies.
    pub schemas: SchemaSet,
}

impl PackageBinding {
    /// Build the binding for `version`.
    pub fn for_version(version: PackageVersion) -> Result<Self, ConfigurationError> {
        let binding = Self {
            version,
            minimum_platform: PlatformVersion::parse(minimum_platform(version))?,
            layout: Layout::for_version(version),
            schemas: SchemaSet::for_version(version)?,
        };
        tracing::info!(
            package_version = %version,
            minimum_platform = %binding.minimum_platform,
            "selected package binding"
        );
        Ok(binding)
    }

    /// Build the binding for a manifest's `package_version` string.
    pub fn for_declared(declared: &str) -> Result<Self, ConfigurationError> {
        Self::for_version(declared.parse()?)
    }
}
