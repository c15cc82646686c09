//! Integration test: loading non-built integration directories.

mod common;

use mp_content::{ContentError, Integration};

fn write_integration(root: &std::path::Path) {
    common::write(
        &root.join("definition.yaml"),
        r#"identifier: VirusTotalV3
name: VirusTotal V3
is_custom: false
documentation_link: https://docs.example.com/virustotal
parameters:
  - name: API Key
    type: password
    is_mandatory: true
  - name: Verify SSL
    type: boolean
    default_value: true
    is_mandatory: false
"#,
    );
    common::write(&root.join("actions").join("ping.yaml"), "name: Ping\n");
    common::write(
        &root.join("actions").join("enrich_hash.yaml"),
        "name: Enrich Hash\nis_custom: true\n",
    );
    common::write(
        &root.join("connectors").join("alerts.yaml"),
        "name: Alerts Connector\nis_enabled: false\n",
    );
    common::write(
        &root.join("pyproject.toml"),
        "[project]\nname = \"VirusTotalV3\"\ndependencies = [\"TIPCommon>=2.0\"]\n",
    );
}

#[test]
fn test_load_integration_components() {
    let dir = tempfile::tempdir().unwrap();
    write_integration(dir.path());

    let integration = Integration::from_non_built_path(dir.path()).unwrap();
    assert_eq!(integration.identifier(), "VirusTotalV3");
    assert_eq!(integration.name(), "VirusTotal V3");
    assert_eq!(integration.actions.len(), 2);
    assert_eq!(integration.connectors.len(), 1);
    assert!(integration.jobs.is_empty());
    assert!(integration.has_action("Ping"));
    assert!(!integration.has_mapping_rules);

    let custom: Vec<_> = integration
        .components()
        .filter(|c| c.is_custom)
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(custom, ["Enrich Hash"]);
    assert!(!integration.connectors[0].is_enabled);

    let project = integration.project.unwrap();
    assert!(project.declares("tipcommon"));
    assert!(!project.declares("envcommon"));
}

#[test]
fn test_mapping_rules_presence_is_detected() {
    let dir = tempfile::tempdir().unwrap();
    write_integration(dir.path());
    common::write(&dir.path().join("integration_mapping_rules.yaml"), "[]\n");

    let integration = Integration::from_non_built_path(dir.path()).unwrap();
    assert!(integration.has_mapping_rules);
}

#[test]
fn test_malformed_pyproject_names_the_file() {
    let dir = tempfile::tempdir().unwrap();
    write_integration(dir.path());
    common::write(&dir.path().join("pyproject.toml"), "[project\n");

    let err = Integration::from_non_built_path(dir.path()).unwrap_err();
    assert!(matches!(err, ContentError::TomlParse { .. }), "{err:?}");
    assert!(err.to_string().contains("pyproject.toml"));
}

#[test]
fn test_release_notes_do_not_gate_loading() {
    let dir = tempfile::tempdir().unwrap();
    write_integration(dir.path());
    common::write(
        &dir.path().join("release_notes.yaml"),
        "- description: Early preview
  deprecated: false
  integration_version: 0.5
  item_name: VirusTotal V3
  item_type: Integration
  regressive: false
  removed: false
  new: true
",
    );

    let integration = Integration::from_non_built_path(dir.path()).unwrap();
    assert_eq!(integration.actions.len(), 2);

    let err = mp_content::release_note::load_release_notes(dir.path()).unwrap_err();
    assert!(matches!(err, ContentError::Conversion { .. }), "{err:?}");
    assert!(err.to_string().contains("release_notes.yaml"), "{err}");
}

#[test]
fn test_missing_definition_is_file_not_found() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("actions")).unwrap();

    let err = Integration::from_non_built_path(dir.path()).unwrap_err();
    assert!(matches!(err, ContentError::FileNotFound { .. }), "{err:?}");
}
