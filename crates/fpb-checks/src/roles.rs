//! Role references in deployment tasks.
//!
//! `role`, `groups` and `roles` accept a name matching the role pattern, a
//! `/regex/` written between slashes, or a list of either.

use fpb_core::{ConfigurationError, ReportNode};
use fpb_schema::task::ROLE_FIELDS;
use regex::Regex;
use serde_json::Value;

/// Title of the role check node.
pub const TITLE: &str = "Checking task role references";

fn valid_reference(pattern: &Regex, value: &str) -> bool {
    if value.len() >= 2 && value.starts_with('/') && value.ends_with('/') {
        return Regex::new(&value[1..value.len() - 1]).is_ok();
    }
    pattern.is_match(value)
}

fn references(value: &Value) -> Option<Vec<&str>> {
    match value {
        Value::String(s) => Some(vec![s.as_str()]),
        Value::Array(items) => items.iter().map(Value::as_str).collect(),
        _ => None,
    }
}

/// Check every role reference of every task in `tasks`.
///
/// Non-list input and non-object records are left to the schema checks.
pub fn task_role_check(pattern: &str, tasks: &Value) -> Result<ReportNode, ConfigurationError> {
    let compiled = Regex::new(pattern).map_err(|e| ConfigurationError::InvalidSchema {
        name: "task role pattern".to_string(),
        reason: e.to_string(),
    })?;
    let mut report = ReportNode::new(TITLE);
    let Some(tasks) = tasks.as_array() else {
        return Ok(report);
    };

    for (index, task) in tasks.iter().enumerate() {
        for field in ROLE_FIELDS {
            let Some(value) = task.get(field) else {
                continue;
            };
            let valid = references(value)
                .is_some_and(|refs| refs.iter().all(|r| valid_reference(&compiled, r)));
            if !valid {
                let mut node = ReportNode::new(format!("{index} -> {field}"));
                node.error(format!(
                    "Role field should be either a valid regexp enclosed by slashes or a string \
                     of '{pattern}' or an array of those. Got '{value}' instead."
                ));
                report.add_node(node);
            }
        }
    }
    Ok(report)
}
