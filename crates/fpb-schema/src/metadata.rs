//! Plugin manifest (`metadata.yaml`) and release record schemas.

use fpb_core::PackageVersion;
use serde_json::{json, Value};

use crate::fragments::{document, list_of_strings, PLUGIN_NAME_PATTERN};

const GROUPS_6_1: [&str; 5] = [
    "network",
    "storage",
    "storage::cinder",
    "storage::glance",
    "hypervisor",
];

/// A release record as embedded in 1.0.0 to 4.0.0 manifests.
pub fn legacy_release() -> Value {
    json!({
        "type": "object",
        "required": ["version", "os", "mode", "deployment_scripts_path", "repository_path"],
        "properties": {
            "version": {"type": "string"},
            "os": {"enum": ["ubuntu", "centos"]},
            "deployment_scripts_path": {"type": "string"},
            "repository_path": {"type": "string"},
            "mode": {"type": "array", "items": {"enum": ["ha", "multinode"]}}
        }
    })
}

/// A release record of a 5.0.0 plugin, after its `*_path` fields have been
/// resolved. Embedded branches only need the right container type here;
/// each one gets its own check.
pub fn release() -> Value {
    let nullable_object = json!({"type": ["object", "null"]});
    let nullable_array = json!({"type": ["array", "null"]});
    document(json!({
        "type": "object",
        "required": ["version", "deployment_scripts_path", "repository_path"],
        "properties": {
            "name": {"type": "string"},
            "description": {"type": "string"},
            "version": {"type": "string"},
            "operating_system": {"enum": ["ubuntu", "centos"]},
            "os": {"enum": ["ubuntu", "centos"]},
            "mode": {"type": "array", "items": {"enum": ["ha", "multinode"]}},
            "is_release": {"type": "boolean"},
            "deployment_scripts_path": {"type": "string"},
            "repository_path": {"type": "string"},
            "graphs": {"type": "array", "items": {"type": "object"}},
            "roles": nullable_object.clone(),
            "network_roles": nullable_array.clone(),
            "volumes": nullable_object.clone(),
            "components": nullable_array.clone(),
            "networks": nullable_object.clone(),
            "attributes": nullable_object.clone(),
            "vmware_attributes": nullable_object.clone(),
            "node_attributes": nullable_object.clone(),
            "nic_attributes": nullable_object.clone(),
            "bond_attributes": nullable_object
        }
    }))
}

fn groups(extra: &[&str]) -> Value {
    let names: Vec<&str> = GROUPS_6_1.iter().chain(extra).copied().collect();
    json!({"type": "array", "uniqueItems": true, "items": {"enum": names}})
}

/// Root manifest schema for `version`.
pub fn metadata(version: PackageVersion) -> Value {
    let package_version = json!({"enum": [version.as_str()]});
    let name = json!({"type": "string", "pattern": PLUGIN_NAME_PATTERN});

    if version == PackageVersion::V1 {
        return document(json!({
            "title": "plugin",
            "type": "object",
            "required": ["name", "title", "version", "releases", "package_version"],
            "properties": {
                "name": name,
                "title": {"type": "string"},
                "version": {"type": "string"},
                "package_version": package_version,
                "description": {"type": "string"},
                "fuel_version": list_of_strings(),
                "releases": {"type": "array", "items": legacy_release()}
            }
        }));
    }

    let mut required = vec![
        "name",
        "title",
        "version",
        "package_version",
        "description",
        "fuel_version",
        "licenses",
        "authors",
        "homepage",
        "releases",
        "groups",
    ];

    let (groups, releases) = match version {
        PackageVersion::V1 | PackageVersion::V2 | PackageVersion::V3 => (
            groups(&[]),
            json!({"type": "array", "items": legacy_release()}),
        ),
        PackageVersion::V4 => {
            required.push("is_hotpluggable");
            (
                groups(&["equipment"]),
                json!({"type": "array", "items": legacy_release()}),
            )
        }
        PackageVersion::V5 => (
            groups(&["monitoring"]),
            json!({"type": "array", "items": {"type": "object"}}),
        ),
    };

    let mut schema = json!({
        "title": "plugin",
        "type": "object",
        "required": required,
        "properties": {
            "name": name,
            "title": {"type": "string"},
            "version": {"type": "string"},
            "package_version": package_version,
            "description": {"type": "string"},
            "fuel_version": list_of_strings(),
            "licenses": list_of_strings(),
            "authors": list_of_strings(),
            "homepage": {"type": "string"},
            "groups": groups,
            "releases": releases
        }
    });
    if version >= PackageVersion::V4 {
        schema["properties"]["is_hotpluggable"] = json!({"type": "boolean"});
    }
    document(schema)
}
