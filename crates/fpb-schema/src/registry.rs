//! Per-version schema sets.
//!
//! A [`SchemaSet`] is a plain record built once per validation run. Each
//! package version composes it from the shared fragments; there is no
//! inheritance between versions, only explicit reuse.

use std::collections::BTreeMap;

use fpb_core::{ConfigurationError, PackageVersion};
use serde_json::Value;

use crate::attributes::{self, AttributeSchemas};
use crate::components;
use crate::fragments::TASK_ROLE_PATTERN;
use crate::graph;
use crate::metadata;
use crate::roles;
use crate::task::{self, TaskType};

/// Task types accepted in `tasks.yaml` for each version.
fn tasks_file_types(version: PackageVersion) -> &'static [TaskType] {
    match version {
        PackageVersion::V1 => &[TaskType::Puppet, TaskType::Shell],
        PackageVersion::V2 | PackageVersion::V3 | PackageVersion::V4 => {
            &[TaskType::Puppet, TaskType::Shell, TaskType::Reboot]
        }
        PackageVersion::V5 => &[],
    }
}

/// Every schema a package version validates against.
#[derive(Debug, Clone)]
pub struct SchemaSet {
    /// The version this set belongs to.
    pub version: PackageVersion,
    /// Root manifest.
    pub metadata: Value,
    /// Release records checked one by one (5.0.0 only; older formats embed
    /// release records in [`SchemaSet::metadata`]).
    pub release: Option<Value>,
    /// `tasks.yaml` list shape.
    pub tasks_file: Option<Value>,
    /// `tasks.yaml` per-type parameter shapes, keyed by `type`.
    pub tasks_file_types: BTreeMap<String, Value>,
    /// `deployment_tasks.yaml` list shape.
    pub deployment_tasks: Option<Value>,
    /// Per-type deployment task shapes, keyed by `type`.
    pub deployment_task_types: BTreeMap<String, Value>,
    /// `network_roles.yaml`.
    pub network_roles: Option<Value>,
    /// `node_roles.yaml`.
    pub node_roles: Option<Value>,
    /// `volumes.yaml`.
    pub volumes: Option<Value>,
    /// `components.yaml`.
    pub components: Option<Value>,
    /// `environment_config.yaml`.
    pub attributes: AttributeSchemas,
    /// A release's graph entries.
    pub graph_association: Option<Value>,
    /// Node attribute metadata.
    pub node_attributes: Option<Value>,
    /// NIC and bond attribute metadata.
    pub nic_attributes: Option<Value>,
    /// Pattern role references must match unless written as `/regex/`.
    pub task_role_pattern: Option<&'static str>,
}

impl SchemaSet {
    /// Build the schema set for `version`.
    pub fn for_version(version: PackageVersion) -> Result<Self, ConfigurationError> {
        let mut set = Self {
            version,
            metadata: metadata::metadata(version),
            release: None,
            tasks_file: None,
            tasks_file_types: BTreeMap::new(),
            deployment_tasks: None,
            deployment_task_types: BTreeMap::new(),
            network_roles: None,
            node_roles: None,
            volumes: None,
            components: None,
            attributes: AttributeSchemas::legacy(),
            graph_association: None,
            node_attributes: None,
            nic_attributes: None,
            task_role_pattern: None,
        };

        let file_types = tasks_file_types(version);
        if !file_types.is_empty() {
            set.tasks_file = Some(task::tasks_file_schema(
                file_types,
                version >= PackageVersion::V2,
                version >= PackageVersion::V3,
            ));
            set.tasks_file_types = file_types
                .iter()
                .filter_map(|t| {
                    task::tasks_file_parameters(*t).map(|s| (t.as_str().to_string(), s))
                })
                .collect();
        }

        match version {
            PackageVersion::V1 => {}
            PackageVersion::V2 => {
                set.attributes = AttributeSchemas::v6_1();
            }
            PackageVersion::V3 | PackageVersion::V4 => {
                set.attributes = if version == PackageVersion::V3 {
                    AttributeSchemas::v6_1()
                } else {
                    AttributeSchemas::v8_0()
                };
                set.deployment_tasks = Some(task::legacy_deployment_tasks_schema());
                set.deployment_task_types = TaskType::DEPLOYMENT
                    .iter()
                    .filter_map(|t| {
                        task::legacy_deployment_task(*t).map(|s| (t.as_str().to_string(), s))
                    })
                    .collect();
                set.network_roles = Some(roles::network_roles());
                set.node_roles = Some(roles::node_roles(false));
                set.volumes = Some(roles::volumes());
                if version == PackageVersion::V4 {
                    set.components = Some(components::components_v4());
                }
            }
            PackageVersion::V5 => {
                let mut all_types: Vec<TaskType> = TaskType::DEPLOYMENT.to_vec();
                all_types.extend(TaskType::LIFECYCLE);

                set.release = Some(metadata::release());
                set.attributes = AttributeSchemas::v8_0();
                set.deployment_tasks = Some(task::tasks_schema(&all_types)?);
                set.deployment_task_types = all_types
                    .iter()
                    .map(|t| Ok((t.as_str().to_string(), task::typed_task_schema(*t)?)))
                    .collect::<Result<_, ConfigurationError>>()?;
                set.network_roles = Some(roles::network_roles());
                set.node_roles = Some(roles::node_roles(true));
                set.volumes = Some(roles::volumes());
                set.components = Some(components::components_v5());
                set.graph_association = Some(graph::graph_association(&all_types)?);
                set.node_attributes = Some(attributes::node_attributes());
                set.nic_attributes = Some(attributes::nic_attributes());
                set.task_role_pattern = Some(TASK_ROLE_PATTERN);
            }
        }

        Ok(set)
    }

    /// Every schema in the set with a stable name, for diagnostics and
    /// compile checks.
    pub fn named_schemas(&self) -> Vec<(String, &Value)> {
        let mut out: Vec<(String, &Value)> = vec![("metadata".to_string(), &self.metadata)];
        let optional = [
            ("release", &self.release),
            ("tasks", &self.tasks_file),
            ("deployment_tasks", &self.deployment_tasks),
            ("network_roles", &self.network_roles),
            ("node_roles", &self.node_roles),
            ("volumes", &self.volumes),
            ("components", &self.components),
            ("graph_association", &self.graph_association),
            ("node_attributes", &self.node_attributes),
            ("nic_attributes", &self.nic_attributes),
        ];
        for (name, schema) in optional {
            if let Some(schema) = schema {
                out.push((name.to_string(), schema));
            }
        }
        out.push(("attributes.root".to_string(), &self.attributes.root));
        out.push(("attributes.element".to_string(), &self.attributes.element));
        out.push(("attributes.meta".to_string(), &self.attributes.meta));
        for (name, schema) in &self.tasks_file_types {
            out.push((format!("tasks.{name}"), schema));
        }
        for (name, schema) in &self.deployment_task_types {
            out.push((format!("deployment_tasks.{name}"), schema));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_schema_of_every_version_compiles() {
        for version in PackageVersion::ALL {
            let set = SchemaSet::for_version(version).unwrap();
            for (name, schema) in set.named_schemas() {
                let built = jsonschema::options()
                    .with_draft(jsonschema::Draft::Draft4)
                    .build(schema);
                assert!(built.is_ok(), "{version} {name}: {:?}", built.err());
            }
        }
    }

    #[test]
    fn branches_appear_incrementally() {
        let v1 = SchemaSet::for_version(PackageVersion::V1).unwrap();
        assert!(v1.tasks_file.is_some());
        assert!(v1.deployment_tasks.is_none());
        assert_eq!(
            v1.tasks_file_types.keys().collect::<Vec<_>>(),
            ["puppet", "shell"]
        );

        let v2 = SchemaSet::for_version(PackageVersion::V2).unwrap();
        assert!(v2.tasks_file_types.contains_key("reboot"));

        let v3 = SchemaSet::for_version(PackageVersion::V3).unwrap();
        assert!(v3.node_roles.is_some());
        assert!(v3.components.is_none());
        assert_eq!(v3.deployment_task_types.len(), 9);

        let v4 = SchemaSet::for_version(PackageVersion::V4).unwrap();
        assert!(v4.components.is_some());
        assert!(v4.graph_association.is_none());

        let v5 = SchemaSet::for_version(PackageVersion::V5).unwrap();
        assert!(v5.tasks_file.is_none());
        assert!(v5.release.is_some());
        assert!(v5.graph_association.is_some());
        assert_eq!(v5.deployment_task_types.len(), 12);
        assert_eq!(v5.task_role_pattern, Some(TASK_ROLE_PATTERN));
    }

    #[test]
    fn metadata_pins_package_version() {
        for version in PackageVersion::ALL {
            let set = SchemaSet::for_version(version).unwrap();
            assert_eq!(
                set.metadata["properties"]["package_version"]["enum"][0],
                version.as_str()
            );
        }
    }
}
