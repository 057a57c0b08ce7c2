//! Node roles, network roles and volume allocation schemas.

use serde_json::{json, Value};

use crate::fragments::{
    document, limits, list_of_strings, restrictions, NETWORK_ROLE_PATTERN, NODE_ROLE_KEY_PATTERN,
    TASK_ROLE_PATTERN,
};

/// `node_roles.yaml`: a mapping of role id to role definition.
///
/// 5.0.0 plugins may also list the tasks a role runs (`with_tasks`).
pub fn node_roles(with_tasks: bool) -> Value {
    let mut role = json!({
        "type": "object",
        "required": ["name", "description"],
        "properties": {
            "name": {"type": "string", "description": "Name that will be shown on UI"},
            "description": {"type": "string", "description": "Short description of role functionality"},
            "conflicts": {
                "oneOf": [list_of_strings(), {"type": "string", "enum": ["*"]}]
            },
            "has_primary": {
                "type": "boolean",
                "description": "During orchestration this role will be splitted into primary-role and role."
            },
            "public_ip_required": {
                "type": "boolean",
                "description": "Specify if role needs public IP address."
            },
            "update_required": list_of_strings(),
            "update_once": list_of_strings(),
            "weight": {
                "type": "integer",
                "description": "Specify weight that will be used to sort out the roles on the Fuel web UI"
            },
            "limits": limits(),
            "restrictions": restrictions()
        }
    });
    if with_tasks {
        role["properties"]["tasks"] = json!({
            "type": "array",
            "items": {"type": "string", "pattern": TASK_ROLE_PATTERN}
        });
    }
    document(json!({
        "type": "object",
        "patternProperties": {NODE_ROLE_KEY_PATTERN: role},
        "additionalProperties": false
    }))
}

/// `network_roles.yaml`: a list of network role definitions.
pub fn network_roles() -> Value {
    let name = json!({"type": "string", "pattern": NETWORK_ROLE_PATTERN});
    document(json!({
        "type": "array",
        "items": {
            "type": "object",
            "required": ["id", "default_mapping", "properties"],
            "properties": {
                "id": {"type": "string"},
                "default_mapping": {"type": "string"},
                "properties": {
                    "type": "object",
                    "required": ["subnet", "gateway", "vip"],
                    "properties": {
                        "subnet": {"type": "boolean"},
                        "gateway": {"type": "boolean"},
                        "vip": {
                            "type": "array",
                            "items": {
                                "type": "object",
                                "required": ["name"],
                                "properties": {"name": name, "namespace": name}
                            }
                        }
                    }
                }
            }
        }
    }))
}

/// `volumes.yaml`: role-to-volume allocations plus volume definitions.
pub fn volumes() -> Value {
    document(json!({
        "type": "object",
        "required": ["volumes_roles_mapping", "volumes"],
        "properties": {
            "volumes_roles_mapping": {
                "type": "object",
                "patternProperties": {
                    TASK_ROLE_PATTERN: {
                        "type": "array",
                        "minItems": 1,
                        "items": {
                            "type": "object",
                            "description": "Volume allocations for role",
                            "required": ["allocate_size", "id"],
                            "properties": {
                                "allocate_size": {
                                    "type": "string",
                                    "enum": ["all", "min", "full-disk"]
                                },
                                "id": {"type": "string"}
                            }
                        }
                    }
                },
                "additionalProperties": false
            },
            "volumes": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["id", "type"],
                    "properties": {
                        "id": {"type": "string"},
                        "type": {"type": "string"}
                    }
                }
            }
        }
    }))
}
