//! Shared schema fragments.
//!
//! Every versioned schema is assembled from these building blocks. Each
//! function returns a fresh [`Value`] so callers may extend the result
//! without affecting other schemas.

use serde_json::{json, Value};

/// `$schema` URI stamped on top-level documents.
pub const DRAFT4: &str = "http://json-schema.org/draft-04/schema#";

/// Plugin names: lower case letters, digits, `_` and `-`.
pub const PLUGIN_NAME_PATTERN: &str = "^[a-z0-9_-]+$";

/// Task identifiers, task group members and role names in 3.0.0+ tasks.
pub const TASK_NAME_PATTERN: &str = "^[0-9a-zA-Z_-]+$";

/// Task identifiers and role names that also accept the `*` wildcard.
pub const TASK_ROLE_PATTERN: &str = r"^[0-9a-zA-Z_-]+$|^\*$";

/// Semantic-ish task versions.
pub const TASK_VERSION_PATTERN: &str = r"^\d+.\d+.\d+$";

/// Deployment stage with an optional numeric priority suffix.
pub const STAGE_PATTERN: &str =
    r"^(post_deployment|pre_deployment)(/[-+]?([0-9]*\.[0-9]+|[0-9]+))?$";

/// Network role and VIP names.
pub const NETWORK_ROLE_PATTERN: &str = "^[0-9a-z_-]+$";

/// Four-digit octal permissions.
pub const FILE_PERMISSIONS_PATTERN: &str = "^[0-7]{4}$";

/// Node role identifiers used as mapping keys.
pub const NODE_ROLE_KEY_PATTERN: &str = "^[0-9a-zA-Z_-]+$";

/// Wrap a schema body as a top-level draft-04 document.
pub fn document(mut body: Value) -> Value {
    if let Value::Object(map) = &mut body {
        map.insert("$schema".to_string(), Value::String(DRAFT4.to_string()));
    }
    body
}

/// An array of strings.
pub fn list_of_strings() -> Value {
    json!({"type": "array", "items": {"type": "string"}})
}

/// A non-negative integer.
pub fn positive_integer() -> Value {
    json!({"type": "integer", "minimum": 0})
}

/// A restriction condition expression.
pub fn condition() -> Value {
    json!({"type": "string"})
}

/// A restriction with explicit `condition`, `message` and `action`.
pub fn full_restriction() -> Value {
    json!({
        "type": "object",
        "required": ["condition"],
        "properties": {
            "condition": condition(),
            "message": {"type": "string"},
            "action": {"type": "string"}
        }
    })
}

/// A `{condition: message}` shorthand restriction.
pub fn short_restriction() -> Value {
    json!({"type": "object", "minProperties": 1, "maxProperties": 1})
}

/// A non-empty list of restrictions in any of the three accepted forms.
pub fn restrictions() -> Value {
    json!({
        "type": "array",
        "minItems": 1,
        "items": {
            "anyOf": [condition(), full_restriction(), short_restriction()]
        }
    })
}

/// Restrictions as accepted by 1.0.0 plugins: plain strings or objects.
pub fn legacy_restrictions() -> Value {
    json!({"type": "array", "items": {"type": ["string", "object"]}})
}

/// A node-count rule: a literal number or an expression.
pub fn rule() -> Value {
    json!({"type": ["string", "integer"]})
}

/// Node-count limits for a role, with conditional overrides.
pub fn limits() -> Value {
    let override_rule = json!({
        "type": "object",
        "description": "Property which can change limit recommended|min|max properties due to some additional condition",
        "required": ["condition"],
        "properties": {
            "condition": {"type": "string"},
            "max": rule(),
            "recommended": rule(),
            "min": rule(),
            "message": {"type": "string"}
        }
    });
    json!({
        "type": "object",
        "description": "Limits for count of nodes for node role",
        "properties": {
            "condition": condition(),
            "max": rule(),
            "recommended": rule(),
            "min": rule(),
            "overrides": {
                "type": "array",
                "description": "Array of limit override properties",
                "minItems": 1,
                "items": override_rule
            }
        }
    })
}

/// A `{yaql_exp: ...}` expression object.
pub fn yaql_expression() -> Value {
    json!({
        "type": "object",
        "required": ["yaql_exp"],
        "properties": {"yaql_exp": {"type": "string"}}
    })
}

/// An array of task names.
pub fn task_group() -> Value {
    json!({
        "type": "array",
        "items": {"type": "string", "pattern": TASK_NAME_PATTERN}
    })
}
