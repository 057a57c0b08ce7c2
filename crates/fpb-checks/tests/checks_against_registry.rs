//! Checks driven by real registry schemas.

use fpb_checks::{
    environment_attributes_check, generic_schema_check, multi_type_check, release_paths_check,
    task_role_check,
};
use fpb_core::{PackageVersion, RenderFormat};
use fpb_schema::SchemaSet;
use serde_json::json;

#[test]
fn v5_deployment_tasks_dispatch_on_type() {
    let set = SchemaSet::for_version(PackageVersion::V5).unwrap();
    let tasks = json!([
        {
            "id": "plugin_task",
            "type": "shell",
            "role": ["controller"],
            "version": "2.1.0",
            "parameters": {"cmd": "echo ok", "timeout": 60}
        },
        {"id": "broken", "type": "teleport", "role": "*"}
    ]);
    let report = multi_type_check(&set.deployment_task_types, &tasks).unwrap();
    assert_eq!(report.count_failures(), 1);
    let rendered = report.render(RenderFormat::Text, false).unwrap();
    assert!(rendered.contains("Invalid type: teleport for record: 1"));
}

#[test]
fn v4_metadata_requires_hotpluggable_flag() {
    let set = SchemaSet::for_version(PackageVersion::V4).unwrap();
    let metadata = json!({
        "name": "plugin_name",
        "title": "Title",
        "version": "1.0.0",
        "package_version": "4.0.0",
        "description": "Plugin",
        "fuel_version": ["8.0"],
        "licenses": ["Apache License Version 2.0"],
        "authors": ["Author"],
        "homepage": "https://example.org",
        "groups": [],
        "releases": [{
            "os": "ubuntu",
            "version": "liberty-8.0",
            "mode": ["ha"],
            "deployment_scripts_path": "deployment_scripts/",
            "repository_path": "repositories/ubuntu"
        }]
    });
    let report = generic_schema_check(&set.metadata, &metadata).unwrap();
    let rendered = report.render(RenderFormat::Text, false).unwrap();
    assert!(
        rendered.contains("'is_hotpluggable' is a required property"),
        "{rendered}"
    );
}

#[test]
fn v8_attribute_group_is_enforced() {
    let set = SchemaSet::for_version(PackageVersion::V4).unwrap();
    let config = json!({"attributes": {"group": "billing"}});
    let report = environment_attributes_check(&set.attributes, &config).unwrap();
    assert!(report.is_failed());
}

#[test]
fn role_check_and_paths_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("deployment_scripts")).unwrap();
    let release = json!({
        "deployment_scripts_path": "deployment_scripts",
        "repository_path": "repositories/ubuntu"
    });
    let report = release_paths_check(dir.path(), &release);
    assert_eq!(report.count_failures(), 1);
    let rendered = report.render(RenderFormat::Text, false).unwrap();
    assert!(rendered.contains("Path repositories/ubuntu does not exist"));

    let set = SchemaSet::for_version(PackageVersion::V5).unwrap();
    let pattern = set.task_role_pattern.unwrap();
    let tasks = json!([{"id": "t", "type": "puppet", "groups": ["/^(?!base)/"]}]);
    // look-around is not supported by the regex crate
    assert!(task_role_check(pattern, &tasks).unwrap().is_failed());
}
