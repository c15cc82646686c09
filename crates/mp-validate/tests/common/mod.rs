//! Fixture content units and a scripted change source.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use mp_validate::{ChangeSource, GitError};

pub fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

pub fn definition_yaml(identifier: &str, name: &str, kind: &str, environments: &[&str]) -> String {
    let envs: String = environments
        .iter()
        .map(|e| format!("  - '{e}'\n"))
        .collect();
    let envs = if envs.is_empty() {
        "environments: []\n".to_string()
    } else {
        format!("environments:\n{envs}")
    };
    format!(
        "identifier: {identifier}
is_enable: true
version: 1.0
name: {name}
description: ''
debug_alert_identifier: null
debug_base_alert_identifier: null
is_debug_mode: false
type: {kind}
template_name: null
original_workflow_identifier: {identifier}
version_comment: null
version_creator: null
creator: admin
priority: 2
category: 0
is_automatic: true
is_archived: false
permissions: []
{envs}"
    )
}

pub const DISPLAY_INFO_YAML: &str = "type: playbook
content_hub_display_name: Fixture
description: ''
author: Content Team
contact_email: content@example.com
tags: []
contribution_type: third_party
should_display_in_content_hub: true
acknowledge_debug_data_included: false
";

pub fn release_notes_yaml(versions: &[&str]) -> String {
    versions
        .iter()
        .map(|v| {
            format!(
                "- description: Change
  deprecated: false
  integration_version: {v}
  item_name: Fixture
  item_type: Playbook
  regressive: false
  removed: false
  new: false
"
            )
        })
        .collect()
}

/// One step; `extra` holds additional YAML lines (already indented for the
/// root mapping) such as `start_loop_step_id` or parameters.
pub fn step_yaml(identifier: &str, instance_name: &str, step_type: &str, extra: &str) -> String {
    format!(
        "name: {instance_name}
description: ''
identifier: {identifier}
original_step_id: {identifier}
playbook_id: pb
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
auto_skip_on_failure: false
is_debug_mock_data: false
step_debug_data: null
parent_container_id: null
is_touched_by_ai: false
{extra}"
    )
}

pub fn parameters_yaml(step_id: &str, params: &[(&str, &str)]) -> String {
    let mut out = String::from("parameters:\n");
    for (name, value) in params {
        out.push_str(&format!(
            "  - step_id: {step_id}\n    playbook_id: pb\n    name: {name}\n    value: '{value}'\n"
        ));
    }
    out
}

pub struct PlaybookFixture {
    pub identifier: String,
    pub name: String,
    pub kind: &'static str,
    pub environments: Vec<String>,
    pub steps: Vec<String>,
    pub release_notes: Vec<String>,
}

impl PlaybookFixture {
    pub fn new(identifier: &str, name: &str) -> Self {
        Self {
            identifier: identifier.into(),
            name: name.into(),
            kind: "playbook",
            environments: vec!["Default Environment".into()],
            steps: Vec::new(),
            release_notes: vec!["1.0".into()],
        }
    }

    pub fn block(mut self) -> Self {
        self.kind = "block";
        self
    }

    pub fn environments(mut self, envs: &[&str]) -> Self {
        self.environments = envs.iter().map(|e| e.to_string()).collect();
        self
    }

    pub fn step(mut self, yaml: String) -> Self {
        self.steps.push(yaml);
        self
    }

    pub fn release_notes(mut self, versions: &[&str]) -> Self {
        self.release_notes = versions.iter().map(|v| v.to_string()).collect();
        self
    }

    /// Write the unit under `parent/<dir>` and return its path.
    pub fn write(&self, parent: &Path, dir: &str) -> PathBuf {
        let root = parent.join(dir);
        let envs: Vec<&str> = self.environments.iter().map(String::as_str).collect();
        write(
            &root.join("definition.yaml"),
            &definition_yaml(&self.identifier, &self.name, self.kind, &envs),
        );
        write(&root.join("display_info.yaml"), DISPLAY_INFO_YAML);
        let notes: Vec<&str> = self.release_notes.iter().map(String::as_str).collect();
        write(&root.join("release_notes.yaml"), &release_notes_yaml(&notes));
        std::fs::create_dir_all(root.join("steps")).unwrap();
        for (i, step) in self.steps.iter().enumerate() {
            write(&root.join("steps").join(format!("{i:02}.yaml")), step);
        }
        root
    }
}

/// A change source answering from fixed data, recording every request.
#[derive(Default)]
pub struct ScriptedChanges {
    pub changed: Vec<PathBuf>,
    pub base_files: HashMap<PathBuf, String>,
    pub fail_with_timeout: bool,
    pub requests: Mutex<Vec<String>>,
}

impl ChangeSource for ScriptedChanges {
    fn changed_files(&self, _unit: &Path, base: &str, head: &str) -> Result<Vec<PathBuf>, GitError> {
        self.requests
            .lock()
            .unwrap()
            .push(format!("diff {base}...{head}"));
        if self.fail_with_timeout {
            return Err(GitError::TimedOut {
                args: "diff".into(),
                timeout: std::time::Duration::from_secs(1),
            });
        }
        Ok(self.changed.clone())
    }

    fn file_at(
        &self,
        _unit: &Path,
        reference: &str,
        file: &Path,
    ) -> Result<Option<String>, GitError> {
        self.requests
            .lock()
            .unwrap()
            .push(format!("show {reference}:{}", file.display()));
        Ok(self.base_files.get(file).cloned())
    }
}
