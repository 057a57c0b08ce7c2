//! File access: format dispatch, masks and the merge policy.
//!
//! ## Formats
//!
//! | Extension | Result |
//! |-----------|--------|
//! | `yaml`, `yml` | parsed through `serde_yaml`, converted to JSON values |
//! | `json` | parsed through `serde_json` |
//! | `txt` | the file contents as one string |
//!
//! ## Merge policy
//!
//! When several sources feed one key (mask matches, overlays onto manifest
//! keys) they are folded with [`merge_values`]:
//!
//! - mapping + mapping: keys merged, last writer wins;
//! - sequence + sequence: concatenated in encounter order;
//! - anything else: last writer wins.

use std::path::{Path, PathBuf};

use serde_json::{Map, Number, Value};

use crate::error::{LoadError, LoadResult};

/// Extensions with a parser, in lookup order.
pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["yaml", "yml", "json", "txt"];

/// Extensions tried, in order, when a reference omits one.
pub const STRUCTURED_EXTENSIONS: [&str; 3] = ["yaml", "yml", "json"];

/// True if `reference` contains glob metacharacters.
///
/// Only the reference a plugin wrote is inspected, never the directory it
/// is resolved against.
pub fn is_mask(reference: &str) -> bool {
    reference.contains(['*', '?', '['])
}

/// Glob pattern matching `mask` below `base`.
///
/// Metacharacters in `base` are escaped, so a plugin root such as
/// `plugin[1]/` matches literally.
pub fn mask_pattern(base: &Path, mask: &str) -> String {
    if Path::new(mask).is_absolute() {
        return mask.to_string();
    }
    let mut pattern = glob::Pattern::escape(&base.to_string_lossy());
    if !pattern.is_empty() && !pattern.ends_with(std::path::is_separator) {
        pattern.push(std::path::MAIN_SEPARATOR);
    }
    pattern.push_str(mask);
    pattern
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
}

fn read(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            LoadError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            LoadError::Io {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

/// Parse one file according to its extension.
pub fn load_file(path: &Path) -> LoadResult<Value> {
    let value = match extension(path).as_deref() {
        Some("yaml" | "yml") => {
            let content = read(path)?;
            let yaml: serde_yaml::Value =
                serde_yaml::from_str(&content).map_err(|e| LoadError::YamlParse {
                    path: path.to_path_buf(),
                    source: e,
                })?;
            yaml_to_json_value(yaml)
        }
        Some("json") => {
            let content = read(path)?;
            serde_json::from_str(&content).map_err(|e| LoadError::JsonParse {
                path: path.to_path_buf(),
                source: e,
            })?
        }
        Some("txt") => Value::String(read(path)?),
        _ => {
            return Err(LoadError::UnsupportedFormat {
                path: path.to_path_buf(),
                allowed: SUPPORTED_EXTENSIONS.join(", "),
            })
        }
    };
    tracing::debug!(path = %path.display(), "loaded file");
    Ok(value)
}

/// The file a reference points at: the exact path if it is a file, else the
/// first of `path.yaml`, `path.yml`, `path.json` that exists.
pub fn resolve_file(path: &Path) -> Option<PathBuf> {
    if path.is_file() {
        return Some(path.to_path_buf());
    }
    STRUCTURED_EXTENSIONS.iter().find_map(|ext| {
        let mut candidate = path.as_os_str().to_os_string();
        candidate.push(".");
        candidate.push(ext);
        let candidate = PathBuf::from(candidate);
        candidate.is_file().then_some(candidate)
    })
}

/// Files matching a glob mask that have a parser, sorted.
pub fn expand_mask(pattern: &str) -> LoadResult<Vec<PathBuf>> {
    let entries = glob::glob(pattern).map_err(|e| LoadError::InvalidGlob {
        pattern: pattern.to_string(),
        source: e,
    })?;
    let mut paths: Vec<PathBuf> = entries
        .flatten()
        .filter(|p| p.is_file())
        .filter(|p| {
            extension(p).is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
        })
        .collect();
    paths.sort();
    Ok(paths)
}

/// Load `reference` relative to `base`: a glob mask (every match merged in
/// sorted order) or a single file resolved with [`resolve_file`].
pub fn load_path(base: &Path, reference: &str) -> LoadResult<Value> {
    let path = base.join(reference);
    if is_mask(reference) {
        let matches = expand_mask(&mask_pattern(base, reference))?;
        if matches.is_empty() {
            return Err(LoadError::FileNotFound { path });
        }
        let mut merged: Option<Value> = None;
        for file in &matches {
            let data = load_file(file)?;
            merged = Some(match merged {
                Some(acc) => merge_values(acc, data),
                None => data,
            });
        }
        return Ok(merged.unwrap_or(Value::Null));
    }
    match resolve_file(&path) {
        Some(file) => load_file(&file),
        None => Err(LoadError::FileNotFound { path }),
    }
}

/// Fold `overlay` into `base`.
pub fn merge_values(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base), Value::Object(overlay)) => {
            base.extend(overlay);
            Value::Object(base)
        }
        (Value::Array(mut base), Value::Array(overlay)) => {
            base.extend(overlay);
            Value::Array(base)
        }
        (_, overlay) => overlay,
    }
}

fn yaml_number(n: &serde_yaml::Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::Number(Number::from(i))
    } else if let Some(u) = n.as_u64() {
        Value::Number(Number::from(u))
    } else {
        // NaN and infinities have no JSON form
        n.as_f64()
            .and_then(Number::from_f64)
            .map_or(Value::Null, Value::Number)
    }
}

fn yaml_key(key: serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s,
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Null => "null".to_string(),
        serde_yaml::Value::Tagged(tagged) => yaml_key(tagged.value),
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

/// Convert a YAML value to a JSON value.
///
/// Tags are stripped and non-string mapping keys are stringified. Floats
/// stay floats: `fuel_version: [8.0]` keeps its numeric form for the schema
/// checks to judge.
pub fn yaml_to_json_value(yaml: serde_yaml::Value) -> Value {
    match yaml {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => yaml_number(&n),
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(seq) => {
            Value::Array(seq.into_iter().map(yaml_to_json_value).collect())
        }
        serde_yaml::Value::Mapping(map) => {
            let mut obj = Map::new();
            for (k, v) in map {
                obj.insert(yaml_key(k), yaml_to_json_value(v));
            }
            Value::Object(obj)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json_value(tagged.value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = write(dir.path(), "a.yaml", "name: plugin\nversions: [1, 2]\n");
        let yml = write(dir.path(), "b.yml", "- one\n");
        let json = write(dir.path(), "c.json", r#"{"k": true}"#);
        let txt = write(dir.path(), "d.txt", "plain\n");

        assert_eq!(
            load_file(&yaml).unwrap(),
            json!({"name": "plugin", "versions": [1, 2]})
        );
        assert_eq!(load_file(&yml).unwrap(), json!(["one"]));
        assert_eq!(load_file(&json).unwrap(), json!({"k": true}));
        assert_eq!(load_file(&txt).unwrap(), json!("plain\n"));
    }

    #[test]
    fn unknown_extension_is_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let xml = write(dir.path(), "graph.xml", "<graph/>");
        assert!(matches!(load_file(&xml), Err(LoadError::UnsupportedFormat { .. })));
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_path(dir.path(), "absent").unwrap_err();
        assert!(matches!(err, LoadError::FileNotFound { .. }));
        assert_eq!(err.to_string(), "Can't find file.");
    }

    #[test]
    fn syntax_errors_are_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = write(dir.path(), "bad.yaml", "key: [unclosed\n");
        let json = write(dir.path(), "bad.json", "{");
        assert!(matches!(load_file(&yaml), Err(LoadError::YamlParse { .. })));
        assert!(matches!(load_file(&json), Err(LoadError::JsonParse { .. })));
    }

    #[test]
    fn reference_without_extension_tries_structured_formats() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "graphs/deploy.yml", "tasks: []\n");
        let value = load_path(dir.path(), "graphs/deploy").unwrap();
        assert_eq!(value, json!({"tasks": []}));
    }

    #[test]
    fn mask_merges_matches_in_sorted_order() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "tasks/b.yaml", "- id: second\n");
        write(dir.path(), "tasks/a.yaml", "- id: first\n");
        write(dir.path(), "tasks/notes.md", "ignored");
        let value = load_path(dir.path(), "tasks/*").unwrap();
        assert_eq!(value, json!([{"id": "first"}, {"id": "second"}]));
    }

    #[test]
    fn mask_without_matches_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_path(dir.path(), "nothing/*.yaml"),
            Err(LoadError::FileNotFound { .. })
        ));
    }

    #[test]
    fn metacharacters_in_base_are_literal() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("plugin[1]");
        write(&root, "graphs/d.yaml", "- id: deploy\n");
        write(&root, "tasks/a.yaml", "- id: first\n");

        let single = load_path(&root, "graphs/d.yaml").unwrap();
        assert_eq!(single, json!([{"id": "deploy"}]));
        let masked = load_path(&root, "tasks/*.yaml").unwrap();
        assert_eq!(masked, json!([{"id": "first"}]));
    }

    #[test]
    fn mask_pattern_escapes_base_only() {
        let pattern = mask_pattern(Path::new("/tmp/plugin[1]"), "tasks/*.yaml");
        assert!(pattern.starts_with("/tmp/plugin[[]1[]]"));
        assert!(pattern.ends_with("tasks/*.yaml"));
    }

    #[test]
    fn merge_policy() {
        assert_eq!(
            merge_values(json!({"a": 1, "b": 1}), json!({"b": 2, "c": 3})),
            json!({"a": 1, "b": 2, "c": 3})
        );
        assert_eq!(merge_values(json!([1]), json!([2, 3])), json!([1, 2, 3]));
        assert_eq!(merge_values(json!([1]), json!({"k": 1})), json!({"k": 1}));
        assert_eq!(merge_values(json!({"k": 1}), json!("text")), json!("text"));
    }

    #[test]
    fn yaml_conversion_stringifies_keys_and_keeps_floats() {
        let yaml: serde_yaml::Value =
            serde_yaml::from_str("1: one\ntrue: yes\nversion: 8.0\ntagged: !custom value\n")
                .unwrap();
        let value = yaml_to_json_value(yaml);
        assert_eq!(value["1"], json!("one"));
        assert_eq!(value["true"], json!("yes"));
        assert_eq!(value["version"], json!(8.0));
        assert_eq!(value["tagged"], json!("value"));
    }

    #[test]
    fn empty_yaml_is_null() {
        let dir = tempfile::tempdir().unwrap();
        let empty = write(dir.path(), "empty.yaml", "");
        assert_eq!(load_file(&empty).unwrap(), Value::Null);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn scalar() -> impl Strategy<Value = Value> {
            prop_oneof![
                Just(Value::Null),
                any::<bool>().prop_map(Value::Bool),
                any::<i64>().prop_map(|n| json!(n)),
                "[a-z]{0,8}".prop_map(Value::String),
            ]
        }

        proptest! {
            #[test]
            fn sequences_concatenate(a in prop::collection::vec(scalar(), 0..8),
                                     b in prop::collection::vec(scalar(), 0..8)) {
                let merged = merge_values(Value::Array(a.clone()), Value::Array(b.clone()));
                let mut expected = a;
                expected.extend(b);
                prop_assert_eq!(merged, Value::Array(expected));
            }

            #[test]
            fn mappings_keep_every_key(a in prop::collection::btree_map("[a-d]", scalar(), 0..4),
                                       b in prop::collection::btree_map("[a-d]", scalar(), 0..4)) {
                let to_obj = |m: &std::collections::BTreeMap<String, Value>| {
                    Value::Object(m.clone().into_iter().collect())
                };
                let merged = merge_values(to_obj(&a), to_obj(&b));
                let obj = merged.as_object().unwrap();
                for key in a.keys().chain(b.keys()) {
                    prop_assert!(obj.contains_key(key));
                }
                for (key, value) in &b {
                    prop_assert_eq!(&obj[key], value);
                }
            }
        }
    }
}
