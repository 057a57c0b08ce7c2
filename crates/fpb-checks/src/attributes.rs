//! Environment attribute checks.
//!
//! The document shape is checked first. Only when it passes is every entry
//! under `attributes` checked: `metadata` against the meta schema, every
//! other entry against the element schema.

use fpb_core::{ConfigurationError, ReportNode};
use fpb_schema::AttributeSchemas;
use serde_json::Value;

use crate::schema::generic_schema_check;

/// Title of the attribute check node.
pub const TITLE: &str = "Checking environment attributes";

/// Validate an `environment_config.yaml` document.
pub fn environment_attributes_check(
    schemas: &AttributeSchemas,
    config: &Value,
) -> Result<ReportNode, ConfigurationError> {
    let mut report = ReportNode::new(TITLE);
    let root = generic_schema_check(&schemas.root, config)?;
    let root_failed = root.is_failed();
    report.add_node(root);
    if root_failed {
        return Ok(report);
    }

    let attributes = match config.get("attributes") {
        None => return Ok(report),
        Some(Value::Null) => {
            let mut node = ReportNode::new("attributes");
            node.error("attributes should be a mapping, got null");
            report.add_node(node);
            return Ok(report);
        }
        Some(Value::Object(map)) => map,
        // the root schema already rejected every other shape
        Some(_) => return Ok(report),
    };

    for (id, attribute) in attributes {
        let mut node = ReportNode::new(format!("attributes -> {id}"));
        if attribute.is_null() {
            node.error(format!("attribute '{id}' is empty"));
        } else {
            let schema = if id == "metadata" {
                &schemas.meta
            } else {
                &schemas.element
            };
            node.add_node(generic_schema_check(schema, attribute)?);
        }
        report.add_node(node);
    }
    Ok(report)
}
