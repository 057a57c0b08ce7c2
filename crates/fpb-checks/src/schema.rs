//! # JSON Schema Check
//!
//! Applies a draft-04 schema to a value and turns every violation into a
//! report node keyed by the violating field's path:
//!
//! ```text
//! Applying JSON Schema to data
//!     releases -> 0 -> os
//!         ERROR: "windows" is not one of ["ubuntu","centos"]
//! ```
//!
//! Violations at the document root attach directly to the check node.
//! Violations are ordered by path, then by message, so output does not
//! depend on the order in which the validator happens to report them.
//!
//! ## Combinator expansion
//!
//! An `anyOf` / `oneOf` failure on its own only says that no branch
//! matched. The offending value is re-validated against every branch and
//! each branch's violations are nested below the combinator's error, under
//! the same path node. Branches that cannot be located (for instance behind
//! a `$ref`) or compiled on their own are skipped.

use std::cmp::Ordering;

use fpb_core::{ConfigurationError, Level, ReportNode};
use jsonschema::{Draft, Validator};
use serde_json::Value;

/// Title of every schema check node.
pub const TITLE: &str = "Applying JSON Schema to data";

const MAX_EXPANSION_DEPTH: usize = 8;

/// A single violation, with branch violations of combinators nested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Path segments from the validated value to the violating field.
    pub path: Vec<String>,
    /// Human-readable message.
    pub message: String,
    /// Violations of each `anyOf` / `oneOf` branch.
    pub context: Vec<Violation>,
}

impl Violation {
    /// Path segments joined with `" -> "`.
    pub fn display_path(&self) -> String {
        self.path.join(" -> ")
    }
}

/// Compile a schema as draft-04.
pub fn compile(schema: &Value) -> Result<Validator, ConfigurationError> {
    jsonschema::options()
        .with_draft(Draft::Draft4)
        .build(schema)
        .map_err(|e| ConfigurationError::InvalidSchema {
            name: schema_name(schema),
            reason: e.to_string(),
        })
}

fn schema_name(schema: &Value) -> String {
    schema
        .get("title")
        .and_then(Value::as_str)
        .unwrap_or("inline schema")
        .to_string()
}

/// Split a JSON pointer into unescaped segments.
pub fn pointer_segments(pointer: &str) -> Vec<String> {
    if pointer.is_empty() {
        return Vec::new();
    }
    pointer
        .split('/')
        .skip(1)
        .map(|segment| segment.replace("~1", "/").replace("~0", "~"))
        .collect()
}

/// Render required-property violations as `'name' is a required property`.
fn describe(error: &jsonschema::ValidationError<'_>) -> String {
    let message = error.to_string();
    if let Some(name) = message.strip_suffix(" is a required property") {
        if let Ok(Value::String(name)) = serde_json::from_str::<Value>(name) {
            return format!("'{name}' is a required property");
        }
    }
    message
}

fn segment_cmp(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        _ => a.cmp(b),
    }
}

fn path_cmp(a: &[String], b: &[String]) -> Ordering {
    for (x, y) in a.iter().zip(b) {
        match segment_cmp(x, y) {
            Ordering::Equal => continue,
            non_eq => return non_eq,
        }
    }
    a.len().cmp(&b.len())
}

fn branch_violations(
    root: &Value,
    schema_path: &str,
    instance: &Value,
    depth: usize,
) -> Vec<Violation> {
    if depth >= MAX_EXPANSION_DEPTH {
        return Vec::new();
    }
    if !(schema_path.ends_with("/anyOf") || schema_path.ends_with("/oneOf")) {
        return Vec::new();
    }
    let Some(Value::Array(branches)) = root.pointer(schema_path) else {
        return Vec::new();
    };
    let mut out = Vec::new();
    for branch in branches {
        let Ok(validator) = compile(branch) else {
            continue;
        };
        out.extend(collect(&validator, branch, instance, depth + 1));
    }
    out
}

fn collect(validator: &Validator, schema: &Value, data: &Value, depth: usize) -> Vec<Violation> {
    let mut violations: Vec<Violation> = validator
        .iter_errors(data)
        .map(|error| {
            let schema_path = error.schema_path.to_string();
            Violation {
                path: pointer_segments(&error.instance_path.to_string()),
                message: describe(&error),
                context: branch_violations(schema, &schema_path, &error.instance, depth),
            }
        })
        .collect();
    violations.sort_by(|a, b| path_cmp(&a.path, &b.path).then_with(|| a.message.cmp(&b.message)));
    violations
}

/// All violations of `data` against `schema`, sorted by path then message.
pub fn violations(schema: &Value, data: &Value) -> Result<Vec<Violation>, ConfigurationError> {
    let validator = compile(schema)?;
    Ok(collect(&validator, schema, data, 0))
}

fn attach(report: &mut ReportNode, violations: Vec<Violation>) {
    for violation in violations {
        let error = ReportNode::leaf(Level::Error, violation.message);
        if violation.path.is_empty() {
            report.add_node(error);
            attach(report, violation.context);
        } else {
            let mut path_node = ReportNode::new(violation.path.join(" -> "));
            path_node.add_node(error);
            attach(&mut path_node, violation.context);
            report.add_node(path_node);
        }
    }
}

/// Validate `data` against `schema`.
///
/// Fails only when the schema itself does not compile.
pub fn generic_schema_check(
    schema: &Value,
    data: &Value,
) -> Result<ReportNode, ConfigurationError> {
    let found = violations(schema, data)?;
    tracing::debug!(schema = %schema_name(schema), violations = found.len(), "applied JSON schema");
    let mut report = ReportNode::new(TITLE);
    attach(&mut report, found);
    Ok(report)
}
