//! Component compatibility schemas (`components.yaml`).

use serde_json::{json, Value};

use crate::fragments::document;

/// `<kind>:<name>[:<name>...]` where kind is a known component category.
pub const COMPONENT_NAME_PATTERN: &str =
    "^(hypervisor|network|storage|additional_service):([0-9a-z_-]+:)*[0-9a-z_-]+$";

/// Like [`COMPONENT_NAME_PATTERN`], but the last segment may be `*`.
pub const COMPATIBLE_COMPONENT_NAME_PATTERN: &str =
    r"^(hypervisor|network|storage|additional_service):([0-9a-z_-]+:)*([0-9a-z_-]+|(\*)?)$";

/// Components schema of 4.0.0 plugins.
pub fn components_v4() -> Value {
    let compatibility = json!({
        "type": "array",
        "items": {
            "type": "object",
            "additionalProperties": false,
            "properties": {
                "name": {"type": "string", "pattern": COMPATIBLE_COMPONENT_NAME_PATTERN}
            }
        }
    });
    document(json!({
        "type": "array",
        "items": {
            "required": ["name"],
            "type": "object",
            "additionalProperties": false,
            "properties": {
                "name": {"type": "string", "pattern": COMPONENT_NAME_PATTERN},
                "compatible": compatibility.clone(),
                "incompatible": compatibility
            }
        }
    }))
}

/// Components schema of 5.0.0 plugins: labels, descriptions and
/// requirement lists with optional messages.
pub fn components_v5() -> Value {
    let items = json!({
        "type": "array",
        "items": {
            "type": "object",
            "required": ["name"],
            "properties": {
                "name": {"type": "string", "pattern": COMPATIBLE_COMPONENT_NAME_PATTERN},
                "message": {"type": "string"}
            }
        }
    });
    document(json!({
        "type": "array",
        "items": {
            "required": ["name", "label"],
            "type": "object",
            "additionalProperties": false,
            "properties": {
                "name": {"type": "string", "pattern": COMPONENT_NAME_PATTERN},
                "label": {"type": "string"},
                "description": {"type": "string"},
                "compatible": items.clone(),
                "requires": items.clone(),
                "incompatible": items,
                "bind": {"type": "array"}
            }
        }
    }))
}
