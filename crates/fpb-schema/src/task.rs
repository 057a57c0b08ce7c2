//! Deployment task schemas.
//!
//! Task types form a closed set. Schemas for the current task generation
//! are produced by one generator, [`task_schema`], which every typed schema
//! and the combined task list share. Older plugin formats keep their own
//! hand-shaped variants ([`legacy_deployment_task`], [`tasks_file_schema`]).

use std::fmt;

use fpb_core::ConfigurationError;
use serde_json::{json, Map, Value};

use crate::fragments::{
    document, list_of_strings, positive_integer, task_group, yaql_expression,
    FILE_PERMISSIONS_PATTERN, STAGE_PATTERN, TASK_NAME_PATTERN, TASK_ROLE_PATTERN,
    TASK_VERSION_PATTERN,
};

/// Fields every generated task schema requires.
pub const OBLIGATORY_FIELDS: [&str; 2] = ["id", "type"];

/// Fields that name the nodes a task runs on.
pub const ROLE_FIELDS: [&str; 3] = ["role", "groups", "roles"];

/// A deployment task type, selected by a task's `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TaskType {
    /// Puppet manifest run.
    Puppet,
    /// Shell command on target nodes.
    Shell,
    /// Node reboot.
    Reboot,
    /// Task group.
    Group,
    /// File copy from master to nodes.
    CopyFiles,
    /// Directory rsync.
    Sync,
    /// Inline file upload.
    UploadFile,
    /// Stage anchor.
    Stage,
    /// No-op placeholder.
    Skipped,
    /// Shell command on the master node.
    MasterShell,
    /// Move a node back to bootstrap.
    MoveToBootstrap,
    /// Erase a node.
    EraseNode,
}

impl TaskType {
    /// Types accepted in 3.0.0+ deployment tasks and in graph task lists.
    pub const DEPLOYMENT: [TaskType; 9] = [
        TaskType::CopyFiles,
        TaskType::Group,
        TaskType::Reboot,
        TaskType::Shell,
        TaskType::Skipped,
        TaskType::Stage,
        TaskType::Sync,
        TaskType::Puppet,
        TaskType::UploadFile,
    ];

    /// Types that only node-lifecycle graphs of 5.0.0 plugins use.
    pub const LIFECYCLE: [TaskType; 3] = [
        TaskType::MasterShell,
        TaskType::MoveToBootstrap,
        TaskType::EraseNode,
    ];

    /// The `type` field spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::Puppet => "puppet",
            TaskType::Shell => "shell",
            TaskType::Reboot => "reboot",
            TaskType::Group => "group",
            TaskType::CopyFiles => "copy_files",
            TaskType::Sync => "sync",
            TaskType::UploadFile => "upload_file",
            TaskType::Stage => "stage",
            TaskType::Skipped => "skipped",
            TaskType::MasterShell => "master_shell",
            TaskType::MoveToBootstrap => "move_to_bootstrap",
            TaskType::EraseNode => "erase_node",
        }
    }

    /// Look up a type by its `type` field spelling.
    pub fn from_name(name: &str) -> Option<TaskType> {
        Self::DEPLOYMENT
            .into_iter()
            .chain(Self::LIFECYCLE)
            .find(|t| t.as_str() == name)
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn strategy() -> Value {
    json!({
        "type": "object",
        "required": ["type"],
        "properties": {
            "type": {"type": "string", "enum": ["parallel", "one_by_one"]},
            "amount": {"oneOf": [{"type": "integer"}, yaql_expression()]}
        }
    })
}

fn task_relation() -> Value {
    json!({
        "type": "object",
        "required": ["name"],
        "properties": {
            "name": {"oneOf": [{"type": "string"}, yaql_expression()]},
            "role": {"oneOf": [{"type": "string"}, {"type": "array"}, yaql_expression()]},
            "policy": {"type": "string", "enum": ["all", "any"]}
        }
    })
}

/// A role reference: one string or a list of strings. Pattern and regex
/// validity are enforced by the role check, not by the schema.
fn task_role() -> Value {
    json!({
        "oneOf": [
            {"type": "string"},
            {"type": "array", "items": {"type": "string"}}
        ]
    })
}

fn relations() -> Value {
    json!({
        "oneOf": [
            {"type": "array", "items": task_relation()},
            yaql_expression()
        ]
    })
}

/// Generate a task schema accepting `types`.
///
/// `required` is merged with [`OBLIGATORY_FIELDS`] without duplicates.
/// `parameters` defaults to `{"type": "object"}`; a `strategy` property is
/// added to it unless the caller already defined one.
pub fn task_schema(
    types: &[TaskType],
    required: &[&str],
    parameters: Option<Value>,
) -> Result<Value, ConfigurationError> {
    if types.is_empty() {
        return Err(ConfigurationError::EmptyTaskTypes);
    }

    let mut parameters = parameters.unwrap_or_else(|| json!({"type": "object"}));
    if let Value::Object(params) = &mut parameters {
        let properties = params
            .entry("properties")
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(properties) = properties {
            properties.entry("strategy").or_insert_with(strategy);
        }
    }

    let mut all_required: Vec<&str> = OBLIGATORY_FIELDS.to_vec();
    for &field in required {
        if !all_required.contains(&field) {
            all_required.push(field);
        }
    }

    let type_names: Vec<&str> = types.iter().map(TaskType::as_str).collect();

    Ok(document(json!({
        "type": "object",
        "required": all_required,
        "properties": {
            "type": {"enum": type_names},
            "id": {"type": "string", "pattern": TASK_ROLE_PATTERN},
            "version": {"type": "string", "pattern": TASK_VERSION_PATTERN},
            "role": task_role(),
            "groups": task_role(),
            "roles": task_role(),
            "required_for": task_group(),
            "requires": task_group(),
            "cross-depends": relations(),
            "cross-depended-by": relations(),
            "stage": {"type": "string", "pattern": STAGE_PATTERN},
            "tasks": {
                "type": "array",
                "items": {"type": "string", "pattern": TASK_ROLE_PATTERN}
            },
            "reexecute_on": {
                "type": "array",
                "items": {"type": "string", "enum": ["deploy_changes"]}
            },
            "parameters": parameters
        }
    })))
}

fn shell_parameters() -> Value {
    json!({
        "type": "object",
        "required": ["cmd"],
        "properties": {
            "cmd": {"type": "string"},
            "retries": {"type": "integer"},
            "interval": {"type": "integer"},
            "timeout": {"type": "integer"}
        }
    })
}

fn copy_files_parameters() -> Value {
    json!({
        "type": "object",
        "required": ["files"],
        "properties": {
            "files": {
                "type": "array",
                "minItems": 1,
                "items": {
                    "type": "object",
                    "required": ["src", "dst"],
                    "properties": {
                        "src": {"type": "string"},
                        "dst": {"type": "string"}
                    }
                }
            },
            "permissions": {"type": "string", "pattern": FILE_PERMISSIONS_PATTERN},
            "dir_permissions": {"type": "string", "pattern": FILE_PERMISSIONS_PATTERN}
        }
    })
}

/// The schema for a single task of `task_type`, current generation.
pub fn typed_task_schema(task_type: TaskType) -> Result<Value, ConfigurationError> {
    let (required, parameters): (&[&str], Option<Value>) = match task_type {
        TaskType::Puppet => (
            &[],
            Some(json!({
                "type": "object",
                "required": ["puppet_manifest", "puppet_modules", "timeout"],
                "properties": {
                    "puppet_manifest": {"type": "string", "minLength": 1},
                    "puppet_modules": {"type": "string", "minLength": 1},
                    "timeout": {"type": "integer"},
                    "retries": {"type": "integer"}
                }
            })),
        ),
        TaskType::Shell | TaskType::MasterShell => (&[], Some(shell_parameters())),
        TaskType::Reboot => (
            &[],
            Some(json!({
                "type": "object",
                "properties": {"timeout": {"type": "integer"}}
            })),
        ),
        TaskType::CopyFiles => (&["parameters"], Some(copy_files_parameters())),
        TaskType::Sync => (
            &["parameters"],
            Some(json!({
                "type": "object",
                "required": ["src", "dst"],
                "properties": {
                    "src": {"type": "string"},
                    "dst": {"type": "string"},
                    "timeout": {"type": "integer"}
                }
            })),
        ),
        TaskType::UploadFile => (
            &["parameters"],
            Some(json!({
                "type": "object",
                "required": ["path", "data"],
                "properties": {
                    "path": {"type": "string"},
                    "data": {"type": "string"}
                }
            })),
        ),
        TaskType::Group
        | TaskType::Stage
        | TaskType::Skipped
        | TaskType::MoveToBootstrap
        | TaskType::EraseNode => (&[], None),
    };
    task_schema(&[task_type], required, parameters)
}

/// A list of tasks of any of `types`, current generation.
pub fn tasks_schema(types: &[TaskType]) -> Result<Value, ConfigurationError> {
    Ok(document(json!({
        "type": "array",
        "items": task_schema(types, &[], None)?
    })))
}

/// Deployment task list shape of 3.0.0 and 4.0.0 plugins.
pub fn legacy_deployment_tasks_schema() -> Value {
    let type_names: Vec<&str> = [
        TaskType::Puppet,
        TaskType::Shell,
        TaskType::Group,
        TaskType::Skipped,
        TaskType::CopyFiles,
        TaskType::Sync,
        TaskType::UploadFile,
        TaskType::Stage,
        TaskType::Reboot,
    ]
    .iter()
    .map(TaskType::as_str)
    .collect();
    document(json!({
        "type": "array",
        "items": {
            "type": "object",
            "required": ["id", "type"],
            "properties": {
                "id": {"type": "string", "pattern": TASK_NAME_PATTERN},
                "type": {"enum": type_names},
                "required_for": task_group(),
                "requires": task_group()
            }
        }
    }))
}

fn legacy_task_role() -> Value {
    json!({"oneOf": [task_group(), {"enum": ["*", "master"]}]})
}

/// Per-type deployment task shape of 3.0.0 and 4.0.0 plugins.
///
/// Lifecycle task types did not exist in those formats.
pub fn legacy_deployment_task(task_type: TaskType) -> Option<Value> {
    let name = task_type.as_str();
    let schema = match task_type {
        TaskType::Puppet => json!({
            "type": "object",
            "properties": {
                "type": {"enum": [name]},
                "groups": task_group(),
                "role": legacy_task_role(),
                "parameters": {
                    "type": "object",
                    "required": ["puppet_manifest", "puppet_modules", "timeout"],
                    "properties": {
                        "puppet_manifest": {"type": "string", "minLength": 1},
                        "puppet_modules": {"type": "string", "minLength": 1},
                        "timeout": {"type": "integer"},
                        "retries": {"type": "integer"}
                    }
                }
            }
        }),
        TaskType::Shell => json!({
            "type": "object",
            "required": ["role"],
            "properties": {
                "type": {"enum": [name]},
                "role": legacy_task_role(),
                "parameters": shell_parameters()
            }
        }),
        TaskType::Group => json!({
            "type": "object",
            "required": ["role"],
            "properties": {
                "type": {"enum": [name]},
                "role": legacy_task_role(),
                "parameters": {
                    "type": "object",
                    "properties": {
                        "strategy": {
                            "type": "object",
                            "properties": {"type": {"enum": ["parallel", "one_by_one"]}}
                        }
                    }
                }
            }
        }),
        TaskType::CopyFiles => json!({
            "type": "object",
            "required": ["role", "parameters"],
            "properties": {
                "type": {"enum": [name]},
                "role": legacy_task_role(),
                "parameters": copy_files_parameters()
            }
        }),
        TaskType::Sync => json!({
            "type": "object",
            "required": ["role", "parameters"],
            "properties": {
                "type": {"enum": [name]},
                "role": legacy_task_role(),
                "parameters": {
                    "type": "object",
                    "required": ["src", "dst"],
                    "properties": {
                        "src": {"type": "string"},
                        "dst": {"type": "string"},
                        "timeout": {"type": "integer"}
                    }
                }
            }
        }),
        TaskType::UploadFile => json!({
            "type": "object",
            "required": ["role", "parameters"],
            "properties": {
                "type": {"enum": [name]},
                "role": legacy_task_role(),
                "parameters": {
                    "type": "object",
                    "required": ["path", "data"],
                    "properties": {
                        "path": {"type": "string"},
                        "data": {"type": "string"}
                    }
                }
            }
        }),
        TaskType::Reboot => json!({
            "type": "object",
            "properties": {
                "type": {"enum": [name]},
                "parameters": {
                    "type": "object",
                    "properties": {"timeout": {"type": "integer"}}
                }
            }
        }),
        TaskType::Skipped | TaskType::Stage => json!({
            "type": "object",
            "properties": {"type": {"enum": [name]}}
        }),
        TaskType::MasterShell | TaskType::MoveToBootstrap | TaskType::EraseNode => return None,
    };
    Some(schema)
}

/// `tasks.yaml` list shape of 1.0.0 to 4.0.0 plugins.
///
/// `stage` is either the plain enum of 1.0.0 or [`STAGE_PATTERN`];
/// `with_retries` adds the `retries` parameter introduced in 3.0.0.
pub fn tasks_file_schema(types: &[TaskType], stage_priority: bool, with_retries: bool) -> Value {
    let type_names: Vec<&str> = types.iter().map(TaskType::as_str).collect();
    let stage = if stage_priority {
        json!({"type": "string", "pattern": STAGE_PATTERN})
    } else {
        json!({"enum": ["post_deployment", "pre_deployment"]})
    };
    let mut parameters = base_parameters();
    if with_retries {
        parameters["properties"]["retries"] = positive_integer();
    }
    document(json!({
        "type": "array",
        "items": {
            "type": "object",
            "required": ["parameters", "type", "stage", "role"],
            "properties": {
                "type": {"enum": type_names},
                "parameters": parameters,
                "stage": stage,
                "role": {"oneOf": [list_of_strings(), {"enum": ["*", "master"]}]}
            }
        }
    }))
}

fn base_parameters() -> Value {
    json!({
        "type": "object",
        "required": ["timeout"],
        "properties": {"timeout": positive_integer()}
    })
}

/// Per-type `parameters` shape for `tasks.yaml` entries.
pub fn tasks_file_parameters(task_type: TaskType) -> Option<Value> {
    let parameters = match task_type {
        TaskType::Puppet => json!({
            "type": "object",
            "required": ["timeout", "puppet_modules", "puppet_manifest"],
            "properties": {
                "timeout": positive_integer(),
                "puppet_modules": {"type": "string"},
                "puppet_manifest": {"type": "string"}
            }
        }),
        TaskType::Shell => json!({
            "type": "object",
            "required": ["timeout", "cmd"],
            "properties": {
                "timeout": positive_integer(),
                "cmd": {"type": "string"}
            }
        }),
        TaskType::Reboot => base_parameters(),
        _ => return None,
    };
    Some(json!({
        "type": "object",
        "properties": {"parameters": parameters}
    }))
}
