//! Auxiliary files each package format reads from the plugin root.

use fpb_core::PackageVersion;

/// One conventional file loaded into a fixed top-level key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlay {
    /// Key the data is stored under.
    pub key: &'static str,
    /// File name without extension, relative to the plugin root.
    pub stem: &'static str,
}

impl Overlay {
    const fn same(name: &'static str) -> Self {
        Self {
            key: name,
            stem: name,
        }
    }
}

const TASKS: Overlay = Overlay::same("tasks");
const ENVIRONMENT_CONFIG: Overlay = Overlay::same("environment_config");
const DEPLOYMENT_TASKS: Overlay = Overlay::same("deployment_tasks");
const NETWORK_ROLES: Overlay = Overlay::same("network_roles");
const NODE_ROLES: Overlay = Overlay::same("node_roles");
const VOLUMES: Overlay = Overlay::same("volumes");
const COMPONENTS: Overlay = Overlay::same("components");

/// The ordered overlays of one package format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    overlays: Vec<Overlay>,
}

impl Layout {
    /// A layout with explicit overlays.
    pub fn new(overlays: Vec<Overlay>) -> Self {
        Self { overlays }
    }

    /// The layout plugins of `version` are expected to follow.
    pub fn for_version(version: PackageVersion) -> Self {
        let overlays = match version {
            PackageVersion::V1 | PackageVersion::V2 => vec![TASKS, ENVIRONMENT_CONFIG],
            PackageVersion::V3 => vec![
                TASKS,
                ENVIRONMENT_CONFIG,
                DEPLOYMENT_TASKS,
                NETWORK_ROLES,
                NODE_ROLES,
                VOLUMES,
            ],
            PackageVersion::V4 => vec![
                TASKS,
                ENVIRONMENT_CONFIG,
                DEPLOYMENT_TASKS,
                NETWORK_ROLES,
                NODE_ROLES,
                VOLUMES,
                COMPONENTS,
            ],
            PackageVersion::V5 => vec![
                ENVIRONMENT_CONFIG,
                DEPLOYMENT_TASKS,
                NETWORK_ROLES,
                NODE_ROLES,
                VOLUMES,
                COMPONENTS,
            ],
        };
        Self { overlays }
    }

    /// Overlays in load order.
    pub fn overlays(&self) -> &[Overlay] {
        &self.overlays
    }
}
