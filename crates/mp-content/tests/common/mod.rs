//! On-disk content fixtures shared by the integration tests.

#![allow(dead_code)]

use std::path::Path;

pub const PLAYBOOK_ID: &str = "0b7c2c51-4c1f-4a3a-9a6c-6a0e1b6a2d10";

pub fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

pub fn definition_yaml(name: &str) -> String {
    format!(
        r#"identifier: {PLAYBOOK_ID}
is_enable: true
version: 3.0
name: {name}
description: Triage reported phishing emails.
debug_alert_identifier: null
debug_base_alert_identifier: null
is_debug_mode: false
type: playbook
template_name: null
original_workflow_identifier: {PLAYBOOK_ID}
version_comment: null
version_creator: null
creator: admin
priority: 2
category: 0
is_automatic: true
is_archived: false
permissions: []
environments:
  - '*'
"#
    )
}

pub const DISPLAY_INFO_YAML: &str = r#"type: playbook
content_hub_display_name: Phishing Triage
description: Triage reported phishing emails.
author: Content Team
contact_email: content@example.com
tags: [Email]
contribution_type: google
should_display_in_content_hub: true
acknowledge_debug_data_included: false
"#;

pub const RELEASE_NOTES_YAML: &str = r#"- description: Initial release
  deprecated: false
  integration_version: 1.0
  item_name: Phishing Triage
  item_type: Playbook
  regressive: false
  removed: false
  new: true
"#;

pub fn step_yaml(identifier: &str, instance_name: &str, step_type: &str) -> String {
    format!(
        r#"name: {instance_name}
description: ''
identifier: {identifier}
original_step_id: {identifier}
playbook_id: {PLAYBOOK_ID}
parent_step_ids: []
parent_step_id: ''
previous_result_condition: null
instance_name: {instance_name}
is_automatic: true
is_skippable: false
action_provider: Scripts
action_name: {instance_name}
integration: null
type: {step_type}
parameters:
  - step_id: {identifier}
    playbook_id: {PLAYBOOK_ID}
    name: ScriptName
    value: {instance_name}
auto_skip_on_failure: false
is_debug_mock_data: false
step_debug_data: null
start_loop_step_id: null
parent_container_id: null
is_touched_by_ai: false
parallel_actions: []
"#
    )
}

/// A minimal valid playbook directory with one action step.
pub fn write_playbook(root: &Path) {
    write(&root.join("definition.yaml"), &definition_yaml("Phishing Triage"));
    write(&root.join("display_info.yaml"), DISPLAY_INFO_YAML);
    write(&root.join("release_notes.yaml"), RELEASE_NOTES_YAML);
    write(
        &root.join("steps").join("enrich.yaml"),
        &step_yaml("step-1", "Enrich Entities", "action"),
    );
}
