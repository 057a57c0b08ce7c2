//! End-to-end validation of plugin directories.

use std::path::Path;

use fpb_core::{ConfigurationError, PackageVersion, RenderFormat};
use fpb_validator::{load, validate};

fn write(root: &Path, name: &str, content: &str) {
    let path = root.join(name);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn v1_manifest(deployment_scripts_path: &str) -> String {
    format!(
        r#"
name: fuel_plugin_example
title: Example plugin
version: '1.0.0'
package_version: '1.0.0'
description: Enable to use plugin X for Neutron
fuel_version: ['6.0']
releases:
  - os: ubuntu
    version: 2014.2-6.0
    mode: ['ha', 'multinode']
    deployment_scripts_path: {deployment_scripts_path}
    repository_path: repositories/ubuntu
"#
    )
}

const V1_TASKS: &str = r#"
- role: ['controller']
  stage: post_deployment
  type: shell
  parameters:
    cmd: ./deploy.sh
    timeout: 42
- role: '*'
  stage: pre_deployment
  type: puppet
  parameters:
    puppet_manifest: site.pp
    puppet_modules: modules
    timeout: 360
"#;

const V1_ENVIRONMENT: &str = r#"
attributes:
  fuel_plugin_example_text:
    value: 'Set default value'
    label: 'Text field'
    description: 'Description for text field'
    weight: 25
    type: "text"
"#;

fn v1_plugin(root: &Path, deployment_scripts_path: &str) {
    write(root, "metadata.yaml", &v1_manifest(deployment_scripts_path));
    write(root, "tasks.yaml", V1_TASKS);
    write(root, "environment_config.yaml", V1_ENVIRONMENT);
    std::fs::create_dir_all(root.join("deployment_scripts")).unwrap();
    std::fs::create_dir_all(root.join("repositories/ubuntu")).unwrap();
}

fn render(report: &fpb_core::ReportNode) -> String {
    report.render(RenderFormat::Text, true).unwrap()
}

#[test]
fn valid_v1_plugin_passes() {
    let dir = tempfile::tempdir().unwrap();
    v1_plugin(dir.path(), "deployment_scripts/");
    let report = validate(dir.path()).unwrap();
    assert!(!report.is_failed(), "{}", render(&report));
    assert!(render(&report).ends_with("Validation successful!"));
}

#[test]
fn missing_deployment_scripts_is_one_failure() {
    let dir = tempfile::tempdir().unwrap();
    v1_plugin(dir.path(), "missing_dir");
    let report = validate(dir.path()).unwrap();
    assert_eq!(report.count_failures(), 1, "{}", render(&report));
    assert!(render(&report).contains("Path missing_dir does not exist"));
}

#[test]
fn invalid_task_type_is_reported_with_index() {
    let dir = tempfile::tempdir().unwrap();
    v1_plugin(dir.path(), "deployment_scripts/");
    write(
        dir.path(),
        "tasks.yaml",
        "- role: '*'\n  stage: post_deployment\n  type: reboot\n  parameters:\n    timeout: 1\n",
    );
    let report = validate(dir.path()).unwrap();
    let rendered = render(&report);
    // reboot arrived with 2.0.0
    assert!(
        rendered.contains("Invalid type: reboot for record: 0"),
        "{rendered}"
    );
}

#[test]
fn incompatible_fuel_version_is_listed() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "metadata.yaml",
        "name: plugin\npackage_version: '3.0.0'\nfuel_version: ['6.0', '7.0', '8.0']\n",
    );
    let report = validate(dir.path()).unwrap();
    let rendered = render(&report);
    assert!(
        rendered.contains("not compatible with '6.0' Fuel release"),
        "{rendered}"
    );
    assert!(!rendered.contains("'8.0' Fuel release"));
}

#[test]
fn v5_plugin_checks_releases_and_graphs() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "metadata.yaml",
        r#"
name: fuel_plugin_example_v5
title: Example v5
version: '1.0.0'
package_version: '5.0.0'
description: Example
fuel_version: ['9.1']
licenses: ['Apache License Version 2.0']
authors: ['Author']
homepage: https://github.com/openstack/fuel-plugins
groups: []
is_hotpluggable: false
releases:
  - name: ExampleRelease
    operating_system: ubuntu
    version: newton-10.0
    mode: ['ha']
    deployment_scripts_path: deployment_scripts/
    repository_path: repositories/ubuntu
    graphs:
      - type: deployment
        graph:
          name: deployment
          tasks_path: graphs/deployment.yaml
"#,
    );
    write(
        dir.path(),
        "graphs/deployment.yaml",
        "- id: task\n  type: shell\n  role: ['/[broken/']\n  parameters:\n    cmd: echo\n",
    );
    std::fs::create_dir_all(dir.path().join("deployment_scripts")).unwrap();

    let report = validate(dir.path()).unwrap();
    let rendered = render(&report);
    assert!(
        rendered.contains("Path repositories/ubuntu does not exist"),
        "{rendered}"
    );
    assert!(
        rendered.contains("Role field should be either a valid regexp"),
        "{rendered}"
    );
    assert!(
        rendered.contains("WARNING: \"mode\" directive is deprecated"),
        "{rendered}"
    );
    assert!(rendered.contains("WARNING: \"fuel_version\" field in metadata.yaml is deprecated"));
    assert!(rendered.contains("Graph: \"deployment\""));
}

#[test]
fn configuration_errors_abort() {
    let empty = tempfile::tempdir().unwrap();
    assert!(matches!(
        validate(empty.path()),
        Err(ConfigurationError::ManifestNotFound { .. })
    ));

    let unknown = tempfile::tempdir().unwrap();
    write(
        unknown.path(),
        "metadata.yaml",
        "package_version: '42.0.0'\n",
    );
    assert!(matches!(
        validate(unknown.path()),
        Err(ConfigurationError::UnsupportedPackageVersion { .. })
    ));
}

#[test]
fn load_uses_declared_layout() {
    let dir = tempfile::tempdir().unwrap();
    v1_plugin(dir.path(), "deployment_scripts/");
    let loaded = load(dir.path()).unwrap();
    assert_eq!(loaded.binding.version, PackageVersion::V1);
    assert!(loaded.tree.get("tasks").is_some());
    assert!(loaded.tree.get("environment_config").is_some());
    assert!(!loaded.report.is_failed());
}

#[test]
fn validation_is_repeatable() {
    let dir = tempfile::tempdir().unwrap();
    v1_plugin(dir.path(), "missing_dir");
    let first = validate(dir.path()).unwrap();
    let second = validate(dir.path()).unwrap();
    assert_eq!(first, second);
}
