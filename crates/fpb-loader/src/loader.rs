//! Building the plugin data tree.

use std::path::{Path, PathBuf};

use fpb_core::ReportNode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::files::{load_file, load_path, merge_values, resolve_file};
use crate::layout::Layout;

/// Root manifest candidates, in lookup order.
pub const MANIFEST_NAMES: [&str; 3] = ["metadata.yaml", "metadata.yml", "metadata.json"];

/// Key suffix marking a reference to another file.
pub const PATH_SUFFIX: &str = "_path";

/// Reference keys that always name directories. They are never loaded;
/// their existence is checked by the release path checks.
pub const DIRECTORY_REFERENCES: [&str; 2] = ["deployment_scripts_path", "repository_path"];

/// The merged plugin data, rooted at the manifest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataTree(Value);

impl DataTree {
    /// Wrap an already loaded value.
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// The underlying value.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consume the tree.
    pub fn into_value(self) -> Value {
        self.0
    }

    /// Top-level entry, treating JSON `null` as absent.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    /// True when nothing was loaded at all.
    pub fn is_empty(&self) -> bool {
        match &self.0 {
            Value::Null => true,
            Value::Object(map) => map.is_empty(),
            _ => false,
        }
    }
}

/// The manifest file of the plugin at `root`, if any.
pub fn find_manifest(root: &Path) -> Option<PathBuf> {
    MANIFEST_NAMES
        .iter()
        .map(|name| root.join(name))
        .find(|candidate| candidate.is_file())
}

/// Replace `*_path` references below `value` with the data they point at.
///
/// Returns a new tree. A reference to a directory, or under one of the
/// [`DIRECTORY_REFERENCES`] keys, is kept as is; a reference that cannot be
/// loaded is kept under its `_path` key and reported under a node titled
/// with the referenced path.
pub fn resolve_paths(value: &Value, base: &Path, report: &mut ReportNode) -> Value {
    match value {
        Value::Object(map) => {
            let mut resolved = Map::new();
            for (key, entry) in map {
                let reference = match entry {
                    Value::String(s) if key.ends_with(PATH_SUFFIX) => s,
                    _ => {
                        resolved.insert(key.clone(), resolve_paths(entry, base, report));
                        continue;
                    }
                };
                let target = base.join(reference);
                if target.is_dir() {
                    report.info(format!("{reference} is valid directory"));
                    resolved.insert(key.clone(), entry.clone());
                    continue;
                }
                if DIRECTORY_REFERENCES.contains(&key.as_str()) {
                    resolved.insert(key.clone(), entry.clone());
                    continue;
                }
                match load_path(base, reference) {
                    Ok(data) => {
                        let stripped = &key[..key.len() - PATH_SUFFIX.len()];
                        resolved.insert(stripped.to_string(), data);
                    }
                    Err(e) => {
                        tracing::debug!(
                            key = %key,
                            reference = %reference,
                            error = %e,
                            "unresolved reference"
                        );
                        let mut node = ReportNode::new(reference.clone());
                        node.error(e);
                        report.add_node(node);
                        resolved.insert(key.clone(), entry.clone());
                    }
                }
            }
            Value::Object(resolved)
        }
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| resolve_paths(item, base, report))
                .collect(),
        ),
        scalar => scalar.clone(),
    }
}

fn load_manifest(root: &Path) -> (Value, ReportNode) {
    let Some(manifest) = find_manifest(root) else {
        let mut report = ReportNode::new(format!(
            "Loading root metadata file: {}",
            root.join(MANIFEST_NAMES[0]).display()
        ));
        report.error(format!(
            "Can't find file. Expected one of: {}",
            MANIFEST_NAMES.join(", ")
        ));
        return (Value::Object(Map::new()), report);
    };

    let mut report = ReportNode::new(format!("Loading root metadata file: {}", manifest.display()));
    match load_file(&manifest) {
        Ok(data) => {
            let data = resolve_paths(&data, root, &mut report);
            (data, report)
        }
        Err(e) => {
            report.error(e);
            (Value::Object(Map::new()), report)
        }
    }
}

fn apply_overlays(data: &mut Value, root: &Path, layout: &Layout, report: &mut ReportNode) {
    let Value::Object(map) = data else {
        tracing::warn!("root manifest is not a mapping; auxiliary files skipped");
        return;
    };
    for overlay in layout.overlays() {
        let file_name = format!("{}.yaml", overlay.stem);
        let Some(file) = resolve_file(&root.join(overlay.stem)) else {
            tracing::warn!(file = %file_name, "optional file not present");
            let mut node = ReportNode::new(file_name);
            node.info("Can't find file.");
            report.add_node(node);
            continue;
        };
        match load_file(&file) {
            Ok(loaded) => {
                let merged = match map.remove(overlay.key) {
                    Some(existing) if !existing.is_null() => merge_values(existing, loaded),
                    _ => loaded,
                };
                map.insert(overlay.key.to_string(), merged);
            }
            Err(e) => {
                let mut node = ReportNode::new(file.display().to_string());
                node.error(e);
                report.add_node(node);
            }
        }
    }
}

/// Load the plugin at `root` following `layout`.
///
/// Never fails: every problem becomes a node of the returned report. A
/// missing or unreadable manifest yields an empty tree.
pub fn load(root: &Path, layout: &Layout) -> (DataTree, ReportNode) {
    let mut report = ReportNode::new(format!("File structure validation: {}", root.display()));
    let (mut data, manifest_report) = load_manifest(root);
    report.add_node(manifest_report);
    apply_overlays(&mut data, root, layout, &mut report);
    tracing::debug!(root = %root.display(), failures = report.count_failures(), "plugin loaded");
    (DataTree(data), report)
}
