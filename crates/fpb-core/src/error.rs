//! # Error Hierarchy
//!
//! Conditions that abort a validation run. Problems inside a plugin are
//! never raised through these types; they become error nodes in the
//! report tree.

use std::path::PathBuf;

use thiserror::Error;

/// A misconfiguration of the run itself (not of the plugin's contents).
#[derive(Error, Debug)]
pub enum ConfigurationError {
    /// The manifest declares a package version with no registered binding.
    #[error("unsupported package version {version:?}; supported versions: {supported}")]
    UnsupportedPackageVersion {
        /// The declared version string.
        version: String,
        /// Comma-joined list of supported versions.
        supported: String,
    },

    /// No root manifest exists under the plugin directory.
    #[error("plugin manifest not found in {path}: expected one of {expected}")]
    ManifestNotFound {
        /// The plugin directory that was searched.
        path: PathBuf,
        /// Comma-joined candidate file names.
        expected: String,
    },

    /// The root manifest exists but could not be read or parsed.
    #[error("failed to read plugin manifest {path}: {reason}")]
    ManifestUnreadable {
        /// Path of the manifest file.
        path: PathBuf,
        /// Underlying read or parse failure.
        reason: String,
    },

    /// The root manifest lacks a string `package_version` field.
    #[error("plugin manifest {path} does not declare a package_version")]
    MissingPackageVersion {
        /// Path of the manifest file.
        path: PathBuf,
    },

    /// A built-in schema failed to compile.
    #[error("invalid built-in schema '{name}': {reason}")]
    InvalidSchema {
        /// Name of the schema in the registry.
        name: String,
        /// Compiler diagnostic.
        reason: String,
    },

    /// A task schema was requested for an empty set of task types.
    #[error("task schema requires at least one task type")]
    EmptyTaskTypes,

    /// A built-in platform version constant did not parse.
    #[error(transparent)]
    InvalidPlatformVersion(#[from] VersionParseError),
}

/// Serialization failure while rendering a report as JSON or YAML.
#[derive(Error, Debug)]
pub enum RenderError {
    /// JSON serialization failed.
    #[error("failed to render report as JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization failed.
    #[error("failed to render report as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// A version string that is not a dotted sequence of non-negative integers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid version string {input:?}: expected dot-separated numbers")]
pub struct VersionParseError {
    /// The rejected input.
    pub input: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_version_display() {
        let err = ConfigurationError::UnsupportedPackageVersion {
            version: "9.9.9".to_string(),
            supported: "1.0.0, 2.0.0".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("\"9.9.9\""));
        assert!(msg.contains("1.0.0, 2.0.0"));
    }

    #[test]
    fn manifest_not_found_display() {
        let err = ConfigurationError::ManifestNotFound {
            path: PathBuf::from("/tmp/plugin"),
            expected: "metadata.yaml, metadata.json".to_string(),
        };
        assert!(format!("{err}").contains("/tmp/plugin"));
    }

    #[test]
    fn version_parse_error_display() {
        let err = VersionParseError {
            input: "8.x".to_string(),
        };
        assert!(format!("{err}").contains("\"8.x\""));
    }

    #[test]
    fn render_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: RenderError = json_err.into();
        assert!(format!("{err}").starts_with("failed to render report as JSON"));
    }
}
