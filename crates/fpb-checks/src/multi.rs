//! Type-dispatched schema check for record lists.
//!
//! Each record names its schema through its `type` field. Records whose
//! type has no schema are reported against their index.

use std::collections::BTreeMap;

use fpb_core::{ConfigurationError, ReportNode};
use serde_json::Value;

use crate::schema::generic_schema_check;

/// Title of every multi-schema check node.
pub const TITLE: &str = "Applying multiple JSON Schemas distinguished by record 'type' field";

fn record_label(record: &Value, index: usize) -> String {
    match record.get("id") {
        Some(Value::String(id)) => id.clone(),
        Some(Value::Null) | None => index.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Validate each record of `data` against `schemas[record.type]`.
///
/// `data` must be a list; anything else is a single error.
pub fn multi_type_check(
    schemas: &BTreeMap<String, Value>,
    data: &Value,
) -> Result<ReportNode, ConfigurationError> {
    let mut report = ReportNode::new(TITLE);
    let Value::Array(records) = data else {
        report.error("Data should be a list of entities");
        return Ok(report);
    };

    for (index, record) in records.iter().enumerate() {
        let record_type = record.get("type").and_then(Value::as_str).unwrap_or("");
        match schemas.get(record_type) {
            Some(schema) => {
                let mut checking = ReportNode::new(format!(
                    "Checking: {} of type {record_type}",
                    record_label(record, index)
                ));
                checking.add_node(generic_schema_check(schema, record)?);
                report.add_node(checking);
            }
            None => {
                tracing::debug!(index, record_type, "no schema for record type");
                report.error(format!("Invalid type: {record_type} for record: {index}"));
            }
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schemas() -> BTreeMap<String, Value> {
        let mut map = BTreeMap::new();
        map.insert(
            "puppet".to_string(),
            json!({"type": "object", "required": ["parameters"]}),
        );
        map.insert(
            "shell".to_string(),
            json!({"type": "object", "required": ["parameters"]}),
        );
        map
    }

    #[test]
    fn non_list_is_single_error() {
        let report = multi_type_check(&schemas(), &json!({"type": "puppet"})).unwrap();
        assert_eq!(report.count_failures(), 1);
        assert_eq!(
            report.children()[0].text(),
            Some("Data should be a list of entities")
        );
    }

    #[test]
    fn unknown_type_is_reported_by_index() {
        let data = json!([
            {"type": "puppet", "parameters": {}},
            {"type": "unknown"}
        ]);
        let report = multi_type_check(&schemas(), &data).unwrap();
        assert_eq!(report.count_failures(), 1);
        let last = report.children().last().unwrap();
        assert_eq!(last.text(), Some("Invalid type: unknown for record: 1"));
    }

    #[test]
    fn record_uses_id_when_present() {
        let data = json!([{"id": "deploy", "type": "shell"}]);
        let report = multi_type_check(&schemas(), &data).unwrap();
        assert_eq!(report.count_failures(), 1);
        let checking = &report.children()[0];
        assert_eq!(checking.text(), Some("Checking: deploy of type shell"));
        assert!(checking.is_failed());
    }

    #[test]
    fn missing_type_is_invalid() {
        let report = multi_type_check(&schemas(), &json!([{}])).unwrap();
        assert_eq!(
            report.children()[0].text(),
            Some("Invalid type:  for record: 0")
        );
    }
}
