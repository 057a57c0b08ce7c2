//! # Versions
//!
//! Two unrelated version axes meet in a plugin manifest:
//!
//! - [`PackageVersion`]: the plugin *format* generation declared by
//!   `package_version`. It selects schemas, loader layout and checks.
//! - [`PlatformVersion`]: a release of the host deployment platform, as
//!   listed in `fuel_version`. Compared component-wise.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, VersionParseError};

/// Supported plugin package-format versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PackageVersion {
    /// Format 1.0.0.
    #[serde(rename = "1.0.0")]
    V1,
    /// Format 2.0.0.
    #[serde(rename = "2.0.0")]
    V2,
    /// Format 3.0.0.
    #[serde(rename = "3.0.0")]
    V3,
    /// Format 4.0.0.
    #[serde(rename = "4.0.0")]
    V4,
    /// Format 5.0.0.
    #[serde(rename = "5.0.0")]
    V5,
}

impl PackageVersion {
    /// Every supported version, oldest first.
    pub const ALL: [PackageVersion; 5] = [
        PackageVersion::V1,
        PackageVersion::V2,
        PackageVersion::V3,
        PackageVersion::V4,
        PackageVersion::V5,
    ];

    /// The canonical manifest spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageVersion::V1 => "1.0.0",
            PackageVersion::V2 => "2.0.0",
            PackageVersion::V3 => "3.0.0",
            PackageVersion::V4 => "4.0.0",
            PackageVersion::V5 => "5.0.0",
        }
    }

    /// Comma-joined list of supported versions, for diagnostics.
    pub fn supported_list() -> String {
        Self::ALL
            .iter()
            .map(PackageVersion::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for PackageVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageVersion {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s.trim())
            .ok_or_else(|| ConfigurationError::UnsupportedPackageVersion {
                version: s.to_string(),
                supported: Self::supported_list(),
            })
    }
}

/// A dotted numeric platform version such as `6.1` or `9.0.0`.
///
/// Missing trailing components compare as zero, so `8.0` and `8.0.0` are
/// equal while `6.10` sorts after `6.9`.
#[derive(Debug, Clone)]
pub struct PlatformVersion {
    raw: String,
    parts: Vec<u64>,
}

impl PlatformVersion {
    /// Parse a version string.
    pub fn parse(input: &str) -> Result<Self, VersionParseError> {
        let raw = input.trim();
        let parts = raw
            .split('.')
            .map(|part| {
                if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                part.parse::<u64>().ok()
            })
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| VersionParseError {
                input: input.to_string(),
            })?;
        Ok(Self {
            raw: raw.to_string(),
            parts,
        })
    }

    /// The string this version was parsed from.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Numeric components in order.
    pub fn parts(&self) -> &[u64] {
        &self.parts
    }
}

impl FromStr for PlatformVersion {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PlatformVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Ord for PlatformVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.parts.len().max(other.parts.len());
        for i in 0..len {
            let a = self.parts.get(i).copied().unwrap_or(0);
            let b = other.parts.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => continue,
                non_eq => return non_eq,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for PlatformVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for PlatformVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PlatformVersion {}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> PlatformVersion {
        PlatformVersion::parse(s).unwrap()
    }

    #[test]
    fn package_version_round_trips_through_str() {
        for version in PackageVersion::ALL {
            assert_eq!(version.as_str().parse::<PackageVersion>().unwrap(), version);
        }
    }

    #[test]
    fn unknown_package_version_is_configuration_error() {
        let err = "6.0.0".parse::<PackageVersion>().unwrap_err();
        match err {
            ConfigurationError::UnsupportedPackageVersion { version, supported } => {
                assert_eq!(version, "6.0.0");
                assert!(supported.contains("5.0.0"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn package_version_serde_uses_dotted_form() {
        let json = serde_json::to_string(&PackageVersion::V4).unwrap();
        assert_eq!(json, "\"4.0.0\"");
    }

    #[test]
    fn platform_versions_compare_numerically() {
        assert!(v("6.10") > v("6.9"));
        assert!(v("7.0") > v("6.1"));
        assert!(v("9.0.1") > v("9.0"));
        assert!(v("10.0") > v("9.1"));
    }

    #[test]
    fn trailing_zero_components_are_equal() {
        assert_eq!(v("8.0"), v("8.0.0"));
        assert_eq!(v("8"), v("8.0"));
    }

    #[test]
    fn malformed_platform_versions_are_rejected() {
        for bad in ["", "8.", ".8", "8.x", "eight", "8..0", "-1.0"] {
            assert!(PlatformVersion::parse(bad).is_err(), "{bad:?} should fail");
        }
    }

    #[test]
    fn display_preserves_input() {
        assert_eq!(v("6.0").to_string(), "6.0");
        assert_eq!(v(" 7.0 ").as_str(), "7.0");
    }
}
