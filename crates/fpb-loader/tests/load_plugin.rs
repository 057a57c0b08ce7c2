//! Loading complete plugin directories.

use std::path::Path;

use fpb_core::PackageVersion;
use fpb_loader::{load, Layout};
use serde_json::json;

fn write(root: &Path, name: &str, content: &str) {
    let path = root.join(name);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn v5_plugin(root: &Path) {
    write(
        root,
        "metadata.yaml",
        r#"
name: fuel_plugin_example_v5
title: Title for fuel_plugin_example_v5 plugin
version: '1.0.0'
package_version: '5.0.0'
releases:
  - name: 'ExampleRelease'
    operating_system: 'ubuntu'
    version: 'newton-10.0'
    deployment_scripts_path: deployment_scripts/
    repository_path: repositories/ubuntu
    networks_metadata_path: metadata/networks.yaml
    graphs:
      - type: provisioning
        graph:
          name: provisioning
          tasks_path: graphs/provisioning.yaml
      - type: deployment
        graph:
          name: deployment
          tasks_path: graphs/deployment/*.yaml
"#,
    );
    std::fs::create_dir_all(root.join("deployment_scripts")).unwrap();
    write(
        root,
        "graphs/provisioning.yaml",
        "- id: provision\n  type: shell\n",
    );
    write(
        root,
        "graphs/deployment/01.yaml",
        "- id: first\n  type: puppet\n",
    );
    write(
        root,
        "graphs/deployment/02.yaml",
        "- id: second\n  type: puppet\n",
    );
    write(
        root,
        "node_roles.yaml",
        "plugin_role:\n  name: Plugin role\n",
    );
    write(root, "environment_config.yaml", "attributes: {}\n");
}

#[test]
fn v5_plugin_loads_with_graphs_inlined() {
    let dir = tempfile::tempdir().unwrap();
    v5_plugin(dir.path());

    let (tree, report) = load(dir.path(), &Layout::for_version(PackageVersion::V5));
    let release = &tree.as_value()["releases"][0];

    assert_eq!(
        release["graphs"][1]["graph"]["tasks"],
        json!([{"id": "first", "type": "puppet"}, {"id": "second", "type": "puppet"}])
    );
    assert_eq!(release["graphs"][0]["graph"]["tasks"][0]["id"], "provision");
    assert_eq!(release["deployment_scripts_path"], "deployment_scripts/");
    // metadata/networks.yaml is missing; repositories/ubuntu is left to
    // the release path checks
    assert_eq!(report.count_failures(), 1);
    assert_eq!(release["repository_path"], "repositories/ubuntu");
    assert!(tree.get("node_roles").is_some());
}

#[test]
fn loading_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    v5_plugin(dir.path());
    let layout = Layout::for_version(PackageVersion::V5);

    let (first_tree, first_report) = load(dir.path(), &layout);
    let (second_tree, second_report) = load(dir.path(), &layout);
    assert_eq!(first_tree, second_tree);
    assert_eq!(
        first_report.count_failures(),
        second_report.count_failures()
    );
}

#[test]
fn json_manifest_is_accepted() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "metadata.json",
        r#"{"name": "plugin", "package_version": "1.0.0"}"#,
    );
    let (tree, report) = load(dir.path(), &Layout::for_version(PackageVersion::V1));
    assert!(!report.is_failed());
    assert_eq!(tree.get("name").unwrap(), "plugin");
}

#[test]
fn plugin_root_with_glob_metacharacters() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("plugin[1]");
    write(
        &root,
        "metadata.yaml",
        "name: plugin\npackage_version: '5.0.0'\ngraph:\n  tasks_path: graphs/d.yaml\n",
    );
    write(&root, "graphs/d.yaml", "- id: deploy\n  type: puppet\n");

    let (tree, report) = load(&root, &Layout::for_version(PackageVersion::V5));
    assert_eq!(report.count_failures(), 0);
    assert_eq!(
        tree.get("graph").unwrap(),
        &json!({"tasks": [{"id": "deploy", "type": "puppet"}]})
    );
}
