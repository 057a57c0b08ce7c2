//! The check suite run over a loaded data tree.
//!
//! ```text
//! Validating data
//!     Checking fuel_version compatibility with package_version
//!     Checking schemas
//!         metadata | tasks | deployment_tasks | network_roles | ...
//!     Checking multi schemas
//!         tasks | deployment_tasks
//!     Checking env attributes schemas
//!         environment_config
//!     Checking releases
//!         releases -> 0
//!     (5.0.0) Checking task roles, attribute metadata, deprecations
//! ```
//!
//! A branch is checked only when the tree holds non-empty data for it.

use std::path::Path;

use fpb_checks::{
    environment_attributes_check, generic_schema_check, legacy_fuel_version_check,
    mode_directive_check, multi_type_check, release_paths_check, task_role_check,
    version_compatibility_check,
};
use fpb_core::{ConfigurationError, PackageVersion, ReportNode};
use fpb_loader::DataTree;
use fpb_schema::SchemaSet;
use serde_json::Value;

use crate::binding::PackageBinding;

/// Title of the suite's root node.
pub const TITLE: &str = "Validating data";

/// Root-level attribute metadata keys of 5.0.0 plugins.
const ATTRIBUTE_METADATA_KEYS: [&str; 3] = [
    "node_attributes_metadata",
    "nic_attributes_metadata",
    "bond_attributes_metadata",
];

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn present<'a>(data: &'a Value, key: &str) -> Option<&'a Value> {
    data.get(key).filter(|v| truthy(v))
}

fn titled(title: impl Into<String>, child: ReportNode) -> ReportNode {
    let mut node = ReportNode::new(title);
    node.add_node(child);
    node
}

/// File-backed branches and the schema each is checked against.
fn branch_schemas(schemas: &SchemaSet) -> [(&'static str, Option<&Value>); 6] {
    [
        ("tasks", schemas.tasks_file.as_ref()),
        ("deployment_tasks", schemas.deployment_tasks.as_ref()),
        ("network_roles", schemas.network_roles.as_ref()),
        ("node_roles", schemas.node_roles.as_ref()),
        ("volumes", schemas.volumes.as_ref()),
        ("components", schemas.components.as_ref()),
    ]
}

fn check_schemas(schemas: &SchemaSet, data: &Value) -> Result<ReportNode, ConfigurationError> {
    let mut report = ReportNode::new("Checking schemas");
    report.add_node(titled("metadata", generic_schema_check(&schemas.metadata, data)?));
    for (key, schema) in branch_schemas(schemas) {
        if let (Some(schema), Some(branch)) = (schema, present(data, key)) {
            tracing::debug!(branch = key, "checking branch schema");
            report.add_node(titled(key, generic_schema_check(schema, branch)?));
        }
    }
    Ok(report)
}

fn check_multi_schemas(
    schemas: &SchemaSet,
    data: &Value,
) -> Result<ReportNode, ConfigurationError> {
    let mut report = ReportNode::new("Checking multi schemas");
    let branches = [
        ("tasks", &schemas.tasks_file_types),
        ("deployment_tasks", &schemas.deployment_task_types),
    ];
    for (key, typed) in branches {
        if typed.is_empty() {
            continue;
        }
        if let Some(branch) = present(data, key) {
            report.add_node(titled(key, multi_type_check(typed, branch)?));
        }
    }
    Ok(report)
}

fn check_env_attributes(
    schemas: &SchemaSet,
    data: &Value,
) -> Result<ReportNode, ConfigurationError> {
    let mut report = ReportNode::new("Checking env attributes schemas");
    if let Some(config) = present(data, "environment_config") {
        report.add_node(titled(
            "environment_config",
            environment_attributes_check(&schemas.attributes, config)?,
        ));
    }
    Ok(report)
}

fn check_graphs(schemas: &SchemaSet, release: &Value) -> Result<ReportNode, ConfigurationError> {
    let mut report = ReportNode::new("Checking graphs");
    let Some(Value::Array(graphs)) = present(release, "graphs") else {
        return Ok(report);
    };
    for (index, entry) in graphs.iter().enumerate() {
        let graph_type = entry.get("type").and_then(Value::as_str).unwrap_or("");
        let mut node = ReportNode::new(format!("graphs -> {index}"));
        node.info(format!("Graph: \"{graph_type}\""));
        if let Some(schema) = &schemas.graph_association {
            node.add_node(generic_schema_check(schema, entry)?);
        }
        if let Some(tasks) = entry.get("graph").and_then(|g| present(g, "tasks")) {
            node.add_node(multi_type_check(&schemas.deployment_task_types, tasks)?);
            if let Some(pattern) = schemas.task_role_pattern {
                node.add_node(task_role_check(pattern, tasks)?);
            }
        }
        report.add_node(node);
    }
    Ok(report)
}

/// Release-embedded branches of 5.0.0 plugins: release key, schema.
fn release_branches(schemas: &SchemaSet) -> [(&'static str, Option<&Value>); 7] {
    [
        ("roles", schemas.node_roles.as_ref()),
        ("network_roles", schemas.network_roles.as_ref()),
        ("volumes", schemas.volumes.as_ref()),
        ("components", schemas.components.as_ref()),
        ("node_attributes", schemas.node_attributes.as_ref()),
        ("nic_attributes", schemas.nic_attributes.as_ref()),
        ("bond_attributes", schemas.nic_attributes.as_ref()),
    ]
}

fn check_release(
    binding: &PackageBinding,
    root: &Path,
    index: usize,
    release: &Value,
) -> Result<ReportNode, ConfigurationError> {
    let schemas = &binding.schemas;
    let mut report = ReportNode::new(format!("releases -> {index}"));
    if let Some(schema) = &schemas.release {
        report.add_node(generic_schema_check(schema, release)?);
    }
    report.add_node(release_paths_check(root, release));

    if binding.version >= PackageVersion::V5 {
        report.add_node(mode_directive_check(release));
        report.add_node(check_graphs(schemas, release)?);
        for (key, schema) in release_branches(schemas) {
            if let (Some(schema), Some(branch)) = (schema, present(release, key)) {
                report.add_node(titled(key, generic_schema_check(schema, branch)?));
            }
        }
        if let Some(attributes) = present(release, "attributes") {
            report.add_node(titled(
                "attributes",
                environment_attributes_check(&schemas.attributes, attributes)?,
            ));
        }
    }
    Ok(report)
}

fn check_releases(
    binding: &PackageBinding,
    root: &Path,
    data: &Value,
) -> Result<ReportNode, ConfigurationError> {
    let mut report = ReportNode::new("Checking releases");
    if let Some(Value::Array(releases)) = data.get("releases") {
        for (index, release) in releases.iter().enumerate() {
            if release.is_object() {
                report.add_node(check_release(binding, root, index, release)?);
            }
        }
    }
    Ok(report)
}

fn check_attribute_metadata(
    schemas: &SchemaSet,
    data: &Value,
) -> Result<ReportNode, ConfigurationError> {
    let mut report = ReportNode::new("Checking attribute metadata");
    for key in ATTRIBUTE_METADATA_KEYS {
        let schema = if key == "node_attributes_metadata" {
            &schemas.node_attributes
        } else {
            &schemas.nic_attributes
        };
        if let (Some(schema), Some(branch)) = (schema, present(data, key)) {
            report.add_node(titled(key, generic_schema_check(schema, branch)?));
        }
    }
    Ok(report)
}

/// Run every check bound to `binding` over `tree`.
pub fn run(
    binding: &PackageBinding,
    root: &Path,
    tree: &DataTree,
) -> Result<ReportNode, ConfigurationError> {
    let data = tree.as_value();
    let schemas = &binding.schemas;

    let mut report = ReportNode::new(TITLE);
    report.add_node(version_compatibility_check(&binding.minimum_platform, data));
    report.add_node(check_schemas(schemas, data)?);
    report.add_node(check_multi_schemas(schemas, data)?);
    report.add_node(check_env_attributes(schemas, data)?);
    report.add_node(check_releases(binding, root, data)?);

    if binding.version >= PackageVersion::V5 {
        if let (Some(pattern), Some(tasks)) =
            (schemas.task_role_pattern, present(data, "deployment_tasks"))
        {
            report.add_node(titled("deployment_tasks", task_role_check(pattern, tasks)?));
        }
        report.add_node(check_attribute_metadata(schemas, data)?);
        report.add_node(legacy_fuel_version_check(data));
    }
    Ok(report)
}
