//! Typed playbook fixtures, written to disk through the non-built dialect.

use std::path::Path;

use mp_content::playbook::{
    PlaybookDisplayInfo, PlaybookMetadata, PlaybookType, Step, StepDebugData, StepParameter,
    StepType,
};
use mp_content::ReleaseNote;
use mp_core::Buildable;

pub const PLAYBOOK_ID: &str = "6f1c8a0e-2b7d-4f3e-9c55-1d2e3f4a5b6c";

pub fn metadata(identifier: &str, name: &str, environments: &[&str]) -> PlaybookMetadata {
    PlaybookMetadata {
        identifier: identifier.into(),
        name: name.into(),
        is_enable: true,
        version: 1.0,
        description: String::new(),
        creation_source: None,
        default_access_level: None,
        simulation_clone: None,
        debug_alert_identifier: None,
        debug_base_alert_identifier: None,
        is_debug_mode: false,
        playbook_type: PlaybookType::Playbook,
        template_name: None,
        original_workflow_identifier: identifier.into(),
        version_comment: None,
        version_creator: None,
        last_editor: None,
        creator: "admin".into(),
        priority: 2,
        category: 0,
        is_automatic: true,
        is_archived: false,
        permissions: Vec::new(),
        environments: environments.iter().map(|e| e.to_string()).collect(),
    }
}

pub fn step(identifier: &str, instance_name: &str, step_type: StepType) -> Step {
    Step {
        name: instance_name.into(),
        description: String::new(),
        identifier: identifier.into(),
        original_step_id: identifier.into(),
        playbook_id: PLAYBOOK_ID.into(),
        parent_step_ids: Vec::new(),
        parent_step_id: String::new(),
        previous_result_condition: None,
        instance_name: instance_name.into(),
        is_automatic: true,
        is_skippable: false,
        action_provider: "Scripts".into(),
        action_name: instance_name.into(),
        integration: None,
        step_type,
        parameters: Vec::new(),
        auto_skip_on_failure: false,
        is_debug_mock_data: false,
        step_debug_data: None,
        is_touched_by_ai: false,
        start_loop_step_id: None,
        parent_container_id: None,
        parallel_actions: Vec::new(),
    }
}

pub fn start_loop(identifier: &str, instance_name: &str) -> Step {
    step(identifier, instance_name, StepType::ForEachStartLoop)
}

pub fn end_loop(identifier: &str, instance_name: &str, start: &str) -> Step {
    let mut s = step(identifier, instance_name, StepType::ForEachEndLoop);
    s.start_loop_step_id = Some(start.into());
    s
}

pub fn with_param(mut step: Step, name: &str, value: &str) -> Step {
    step.parameters.push(StepParameter {
        step_id: step.identifier.clone(),
        playbook_id: step.playbook_id.clone(),
        name: name.into(),
        value: Some(value.into()),
    });
    step
}

pub fn with_debug_data(mut step: Step) -> Step {
    step.step_debug_data = Some(StepDebugData {
        step_id: step.identifier.clone(),
        playbook_id: step.playbook_id.clone(),
        creation_time: 1_700_000_000_000,
        modification_time: 1_700_000_000_000,
        result_value: Some("true".into()),
        result_json: None,
        scope_entities_enrichment_data: Vec::new(),
        tenant_id: None,
    });
    step
}

pub fn note(version: f64) -> ReleaseNote {
    ReleaseNote {
        description: "Change".into(),
        deprecated: false,
        new: false,
        item_name: "Fixture".into(),
        item_type: "Playbook".into(),
        publish_time: None,
        regressive: false,
        removed: false,
        ticket: None,
        version,
    }
}

fn write_yaml<T: serde::Serialize>(path: &Path, value: &T) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, serde_yaml::to_string(value).unwrap()).unwrap();
}

/// Write a non-built playbook directory. Steps are stored in list order.
pub fn write_playbook(
    root: &Path,
    metadata: &PlaybookMetadata,
    display_info: &PlaybookDisplayInfo,
    steps: &[Step],
    notes: &[ReleaseNote],
) {
    write_yaml(&root.join("definition.yaml"), &metadata.to_non_built());
    write_yaml(&root.join("display_info.yaml"), &display_info.to_non_built());
    let notes: Vec<_> = notes.iter().map(ReleaseNote::to_non_built).collect();
    write_yaml(&root.join("release_notes.yaml"), &notes);
    for (i, step) in steps.iter().enumerate() {
        let file = root
            .join("steps")
            .join(format!("{i:02}_{}.yaml", step.identifier));
        write_yaml(&file, &step.to_non_built());
    }
}

/// A playbook with the given steps and otherwise default content.
pub fn write_simple_playbook(root: &Path, steps: &[Step]) {
    write_playbook(
        root,
        &metadata(PLAYBOOK_ID, "Fixture Playbook", &["Default Environment"]),
        &PlaybookDisplayInfo::default(),
        steps,
        &[note(1.0)],
    );
}
