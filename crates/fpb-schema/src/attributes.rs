//! Environment, node and NIC attribute schemas.

use serde_json::{json, Value};

use crate::fragments::{document, legacy_restrictions, restrictions, NODE_ROLE_KEY_PATTERN};

/// The three schemas applied to an `environment_config.yaml` document.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSchemas {
    /// The document as a whole.
    pub root: Value,
    /// Each entry under `attributes` except `metadata`.
    pub element: Value,
    /// The `attributes.metadata` entry.
    pub meta: Value,
}

fn values_list() -> Value {
    json!({
        "type": "array",
        "items": {
            "type": "object",
            "required": ["data", "label"],
            "properties": {
                "data": {"type": "string"},
                "label": {"type": "string"}
            }
        }
    })
}

fn element(value: Value, restrictions: Option<Value>) -> Value {
    let mut schema = json!({
        "type": "object",
        "required": ["type", "label", "weight", "value"],
        "properties": {
            "type": {"type": "string"},
            "weight": {"type": "integer"},
            "value": value,
            "label": {"type": "string"},
            "values": values_list()
        }
    });
    if let Some(restrictions) = restrictions {
        schema["properties"]["restrictions"] = restrictions;
    }
    document(schema)
}

fn meta(restrictions: Value) -> Value {
    document(json!({
        "type": "object",
        "properties": {
            "label": {"type": "string"},
            "weight": {"type": "integer"},
            "toggleable": {"type": "boolean"},
            "enabled": {"type": "boolean"},
            "restrictions": restrictions
        }
    }))
}

fn plain_root() -> Value {
    document(json!({
        "type": "object",
        "properties": {"attributes": {"type": "object"}}
    }))
}

impl AttributeSchemas {
    /// 1.0.0: no restriction shapes on elements.
    pub fn legacy() -> Self {
        Self {
            root: plain_root(),
            element: element(json!({"type": ["string", "boolean"]}), None),
            meta: meta(legacy_restrictions()),
        }
    }

    /// 2.0.0 and 3.0.0.
    pub fn v6_1() -> Self {
        Self {
            root: plain_root(),
            element: element(json!({"type": ["string", "boolean"]}), Some(restrictions())),
            meta: meta(restrictions()),
        }
    }

    /// 4.0.0 and 5.0.0: generated values and a settings group.
    pub fn v8_0() -> Self {
        let value = json!({
            "anyOf": [
                {"type": "string"},
                {"type": "boolean"},
                {"type": "object", "properties": {"generator": {"type": "string"}}}
            ]
        });
        let root = document(json!({
            "type": "object",
            "properties": {
                "attributes": {
                    "type": "object",
                    "properties": {
                        "group": {
                            "enum": [
                                "general", "security", "compute", "network",
                                "storage", "logging", "openstack_services", "other"
                            ]
                        }
                    }
                }
            }
        }));
        Self {
            root,
            element: element(value, Some(restrictions())),
            meta: meta(restrictions()),
        }
    }
}

fn nic_attribute_item() -> Value {
    json!({
        "type": "object",
        "required": ["type", "label", "value"],
        "properties": {
            "label": {"type": "string"},
            "description": {"type": "string"},
            "type": {"type": "string"},
            "value": {},
            "restrictions": restrictions()
        }
    })
}

fn nic_metadata_item() -> Value {
    json!({
        "type": "object",
        "required": ["label"],
        "properties": {
            "label": {"type": "string"},
            "restrictions": restrictions()
        }
    })
}

/// NIC and bond attribute metadata: a `metadata` entry plus named
/// attributes.
pub fn nic_attributes() -> Value {
    document(json!({
        "type": "object",
        "properties": {"metadata": nic_metadata_item()},
        "patternProperties": {"^(?!metadata)[0-9a-zA-Z_-]+$": nic_attribute_item()},
        "additionalProperties": false
    }))
}

/// Node attribute metadata: named groups, each shaped like
/// [`nic_attributes`].
pub fn node_attributes() -> Value {
    document(json!({
        "type": "object",
        "patternProperties": {NODE_ROLE_KEY_PATTERN: {"$ref": "#/definitions/attrItem"}},
        "definitions": {"attrItem": nic_attributes()},
        "additionalProperties": false
    }))
}
