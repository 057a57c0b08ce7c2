//! Deployment graph schemas of 5.0.0 plugins.

use fpb_core::ConfigurationError;
use serde_json::{json, Value};

use crate::fragments::document;
use crate::task::{tasks_schema, TaskType};

/// A graph body: optional name and metadata plus a task list accepting
/// `types`.
pub fn graph(types: &[TaskType]) -> Result<Value, ConfigurationError> {
    Ok(document(json!({
        "type": "object",
        "additionalProperties": false,
        "properties": {
            "metadata": {"type": "object"},
            "name": {"type": "string"},
            "tasks": tasks_schema(types)?
        }
    })))
}

/// A release's graph entry: the graph plus its type (`deployment`,
/// `provision`, ...).
pub fn graph_association(types: &[TaskType]) -> Result<Value, ConfigurationError> {
    Ok(document(json!({
        "type": "object",
        "additionalProperties": false,
        "required": ["graph"],
        "properties": {
            "graph": graph(types)?,
            "type": {"type": "string"}
        }
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn association_wraps_graph() {
        let association = graph_association(&TaskType::DEPLOYMENT).unwrap();
        let validator = jsonschema::options()
            .with_draft(jsonschema::Draft::Draft4)
            .build(&association)
            .unwrap();
        let entry = json!({
            "type": "deployment",
            "graph": {
                "name": "deployment-graph-name",
                "tasks": [{
                    "id": "test-plugin_role",
                    "type": "group",
                    "role": ["test-plugin_role"],
                    "parameters": {"strategy": {"type": "parallel"}}
                }]
            }
        });
        assert!(validator.is_valid(&entry));
        assert!(!validator.is_valid(&json!({"type": "deployment"})));
        assert!(!validator.is_valid(&json!({"graph": {"nodes": []}})));
    }

    #[test]
    fn empty_type_list_propagates() {
        assert!(graph(&[]).is_err());
    }
}
