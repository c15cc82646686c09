//! Playbook steps, their parameters, and captured debug data.
//!
//! Steps reference each other by identifier only: `parent_step_ids` orders
//! the graph and `start_loop_step_id` points an end-loop step back at the
//! start-loop step it closes. Neither relation implies ownership.

use mp_core::constants::MAX_STEP_PARALLEL_ACTIONS;
use mp_core::{Buildable, ConversionError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

mp_core::representable_enum! {
    /// What a step does when the playbook reaches it.
    pub enum StepType {
        Action = 0 => "action",
        MultiChoiceQuestion = 1 => "multi_choice_question",
        PreviousAction = 2 => "previous_action",
        CaseDataCondition = 3 => "case_data_condition",
        Condition = 4 => "condition",
        /// Invocation of another playbook of type block.
        Block = 5 => "block",
        Output = 6 => "output",
        ParallelActionsContainer = 7 => "parallel_actions_container",
        ForEachStartLoop = 8 => "for_each_start_loop",
        ForEachEndLoop = 9 => "for_each_end_loop",
    }
}

// ---------------------------------------------------------------------------
// StepParameter
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct StepParameter {
    pub step_id: String,
    pub playbook_id: String,
    pub name: String,
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BuiltStepParameter {
    pub parent_step_identifier: String,
    pub parent_workflow_identifier: String,
    pub name: String,
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NonBuiltStepParameter {
    pub step_id: String,
    pub playbook_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Buildable for StepParameter {
    const ENTITY: &'static str = "StepParameter";
    type Built = BuiltStepParameter;
    type NonBuilt = NonBuiltStepParameter;

    fn from_built(built: BuiltStepParameter) -> Result<Self, ConversionError> {
        Ok(Self {
            step_id: built.parent_step_identifier,
            playbook_id: built.parent_workflow_identifier,
            name: built.name,
            value: built.value,
        })
    }

    fn from_non_built(non_built: NonBuiltStepParameter) -> Result<Self, ConversionError> {
        Ok(Self {
            step_id: non_built.step_id,
            playbook_id: non_built.playbook_id,
            name: non_built.name,
            value: non_built.value,
        })
    }

    fn to_built(&self) -> BuiltStepParameter {
        BuiltStepParameter {
            parent_step_identifier: self.step_id.clone(),
            parent_workflow_identifier: self.playbook_id.clone(),
            name: self.name.clone(),
            value: self.value.clone(),
        }
    }

    fn to_non_built(&self) -> NonBuiltStepParameter {
        NonBuiltStepParameter {
            step_id: self.step_id.clone(),
            playbook_id: self.playbook_id.clone(),
            name: self.name.clone(),
            value: self.value.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// StepDebugData
// ---------------------------------------------------------------------------

/// Result captured from a simulated run of a step.
///
/// Enrichment records are kept opaque. The built dialect carries them twice,
/// as an array and as a serialized JSON string; the string is recomputed on
/// export and ignored on import.
#[derive(Debug, Clone, PartialEq)]
pub struct StepDebugData {
    pub step_id: String,
    pub playbook_id: String,
    /// Unix time in milliseconds.
    pub creation_time: i64,
    /// Unix time in milliseconds.
    pub modification_time: i64,
    pub result_value: Option<String>,
    pub result_json: Option<String>,
    pub scope_entities_enrichment_data: Vec<Value>,
    pub tenant_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BuiltStepDebugData {
    pub creation_time_unix_time_in_ms: i64,
    pub modification_time_unix_time_in_ms: i64,
    pub original_workflow_identifier: String,
    pub original_step_identifier: String,
    pub result_value: Option<String>,
    pub result_json: Option<String>,
    #[serde(default)]
    pub scope_entities_enrichment_data: Vec<Value>,
    #[serde(default)]
    pub scope_entities_enrichment_data_json: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NonBuiltStepDebugData {
    pub step_id: String,
    pub playbook_id: String,
    pub creation_time: i64,
    pub modification_time: i64,
    pub result_value: Option<String>,
    pub result_json: Option<String>,
    #[serde(default)]
    pub scope_entities_enrichment_data: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
}

impl Buildable for StepDebugData {
    const ENTITY: &'static str = "StepDebugData";
    type Built = BuiltStepDebugData;
    type NonBuilt = NonBuiltStepDebugData;

    fn from_built(built: BuiltStepDebugData) -> Result<Self, ConversionError> {
        Ok(Self {
            step_id: built.original_step_identifier,
            playbook_id: built.original_workflow_identifier,
            creation_time: built.creation_time_unix_time_in_ms,
            modification_time: built.modification_time_unix_time_in_ms,
            result_value: built.result_value,
            result_json: built.result_json,
            scope_entities_enrichment_data: built.scope_entities_enrichment_data,
            tenant_id: built.tenant_id,
        })
    }

    fn from_non_built(non_built: NonBuiltStepDebugData) -> Result<Self, ConversionError> {
        Ok(Self {
            step_id: non_built.step_id,
            playbook_id: non_built.playbook_id,
            creation_time: non_built.creation_time,
            modification_time: non_built.modification_time,
            result_value: non_built.result_value,
            result_json: non_built.result_json,
            scope_entities_enrichment_data: non_built.scope_entities_enrichment_data,
            tenant_id: non_built.tenant_id,
        })
    }

    fn to_built(&self) -> BuiltStepDebugData {
        let enrichment = self.scope_entities_enrichment_data.clone();
        BuiltStepDebugData {
            creation_time_unix_time_in_ms: self.creation_time,
            modification_time_unix_time_in_ms: self.modification_time,
            original_workflow_identifier: self.playbook_id.clone(),
            original_step_identifier: self.step_id.clone(),
            result_value: self.result_value.clone(),
            result_json: self.result_json.clone(),
            scope_entities_enrichment_data_json: Value::Array(enrichment.clone()).to_string(),
            scope_entities_enrichment_data: enrichment,
            tenant_id: self.tenant_id.clone(),
        }
    }

    fn to_non_built(&self) -> NonBuiltStepDebugData {
        NonBuiltStepDebugData {
            step_id: self.step_id.clone(),
            playbook_id: self.playbook_id.clone(),
            creation_time: self.creation_time,
            modification_time: self.modification_time,
            result_value: self.result_value.clone(),
            result_json: self.result_json.clone(),
            scope_entities_enrichment_data: self.scope_entities_enrichment_data.clone(),
            tenant_id: self.tenant_id.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Step
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub name: String,
    pub description: String,
    pub identifier: String,
    pub original_step_id: String,
    pub playbook_id: String,
    pub parent_step_ids: Vec<String>,
    pub parent_step_id: String,
    pub previous_result_condition: Option<String>,
    /// Display name unique within the playbook, used in diagnostics.
    pub instance_name: String,
    pub is_automatic: bool,
    pub is_skippable: bool,
    pub action_provider: String,
    pub action_name: String,
    pub integration: Option<String>,
    pub step_type: StepType,
    pub parameters: Vec<StepParameter>,
    pub auto_skip_on_failure: bool,
    pub is_debug_mock_data: bool,
    pub step_debug_data: Option<StepDebugData>,
    pub is_touched_by_ai: bool,
    /// For end-loop steps: identifier of the start-loop step being closed.
    pub start_loop_step_id: Option<String>,
    pub parent_container_id: Option<String>,
    pub parallel_actions: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BuiltStep {
    pub identifier: String,
    pub original_step_identifier: String,
    pub parent_workflow_identifier: String,
    pub parent_step_identifiers: Vec<String>,
    pub parent_step_identifier: String,
    pub previous_result_condition: Option<String>,
    pub instance_name: String,
    pub is_automatic: bool,
    pub name: String,
    pub is_skippable: bool,
    pub description: String,
    pub action_provider: String,
    pub action_name: String,
    #[serde(with = "mp_core::enums::code")]
    pub r#type: StepType,
    pub integration: Option<String>,
    pub parameters: Vec<BuiltStepParameter>,
    pub auto_skip_on_failure: bool,
    pub is_debug_mock_data: bool,
    pub step_debug_data: Option<BuiltStepDebugData>,
    pub parent_step_container_id: Option<String>,
    pub is_touched_by_ai: bool,
    pub start_loop_step_identifier: Option<String>,
    #[serde(default)]
    pub parallel_actions: Vec<BuiltStep>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NonBuiltStep {
    pub name: String,
    pub description: String,
    pub identifier: String,
    pub original_step_id: String,
    pub playbook_id: String,
    #[serde(default)]
    pub parent_step_ids: Vec<String>,
    pub parent_step_id: String,
    pub previous_result_condition: Option<String>,
    pub instance_name: String,
    pub is_automatic: bool,
    pub is_skippable: bool,
    pub action_provider: String,
    pub action_name: String,
    pub integration: Option<String>,
    pub r#type: StepType,
    #[serde(default)]
    pub parameters: Vec<NonBuiltStepParameter>,
    pub auto_skip_on_failure: bool,
    pub is_debug_mock_data: bool,
    pub step_debug_data: Option<NonBuiltStepDebugData>,
    pub start_loop_step_id: Option<String>,
    pub parent_container_id: Option<String>,
    pub is_touched_by_ai: bool,
    #[serde(default)]
    pub parallel_actions: Vec<NonBuiltStep>,
}

fn check_parallel_actions(count: usize) -> Result<(), ConversionError> {
    if count > MAX_STEP_PARALLEL_ACTIONS {
        return Err(ConversionError::InvalidValue {
            entity: Step::ENTITY,
            field: "parallel_actions",
            reason: format!("at most {MAX_STEP_PARALLEL_ACTIONS} parallel actions, found {count}"),
        });
    }
    Ok(())
}

impl Step {
    pub fn is_start_loop(&self) -> bool {
        self.step_type == StepType::ForEachStartLoop
    }

    pub fn is_end_loop(&self) -> bool {
        self.step_type == StepType::ForEachEndLoop
    }

    /// Value of the named parameter, if present and set.
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters
            .iter()
            .find(|p| p.name == name)
            .and_then(|p| p.value.as_deref())
    }
}

impl Buildable for Step {
    const ENTITY: &'static str = "Step";
    type Built = BuiltStep;
    type NonBuilt = NonBuiltStep;

    fn from_built(built: BuiltStep) -> Result<Self, ConversionError> {
        check_parallel_actions(built.parallel_actions.len())?;
        Ok(Self {
            name: built.name,
            description: built.description,
            identifier: built.identifier,
            original_step_id: built.original_step_identifier,
            playbook_id: built.parent_workflow_identifier,
            parent_step_ids: built.parent_step_identifiers,
            parent_step_id: built.parent_step_identifier,
            previous_result_condition: built.previous_result_condition,
            instance_name: built.instance_name,
            is_automatic: built.is_automatic,
            is_skippable: built.is_skippable,
            action_provider: built.action_provider,
            action_name: built.action_name,
            integration: built.integration,
            step_type: built.r#type,
            parameters: built
                .parameters
                .into_iter()
                .map(StepParameter::from_built)
                .collect::<Result<_, _>>()?,
            auto_skip_on_failure: built.auto_skip_on_failure,
            is_debug_mock_data: built.is_debug_mock_data,
            step_debug_data: built
                .step_debug_data
                .map(StepDebugData::from_built)
                .transpose()?,
            is_touched_by_ai: built.is_touched_by_ai,
            start_loop_step_id: built.start_loop_step_identifier,
            parent_container_id: built.parent_step_container_id,
            parallel_actions: built
                .parallel_actions
                .into_iter()
                .map(Step::from_built)
                .collect::<Result<_, _>>()?,
        })
    }

    fn from_non_built(non_built: NonBuiltStep) -> Result<Self, ConversionError> {
        check_parallel_actions(non_built.parallel_actions.len())?;
        Ok(Self {
            name: non_built.name,
            description: non_built.description,
            identifier: non_built.identifier,
            original_step_id: non_built.original_step_id,
            playbook_id: non_built.playbook_id,
            parent_step_ids: non_built.parent_step_ids,
            parent_step_id: non_built.parent_step_id,
            previous_result_condition: non_built.previous_result_condition,
            instance_name: non_built.instance_name,
            is_automatic: non_built.is_automatic,
            is_skippable: non_built.is_skippable,
            action_provider: non_built.action_provider,
            action_name: non_built.action_name,
            integration: non_built.integration,
            step_type: non_built.r#type,
            parameters: non_built
                .parameters
                .into_iter()
                .map(StepParameter::from_non_built)
                .collect::<Result<_, _>>()?,
            auto_skip_on_failure: non_built.auto_skip_on_failure,
            is_debug_mock_data: non_built.is_debug_mock_data,
            step_debug_data: non_built
                .step_debug_data
                .map(StepDebugData::from_non_built)
                .transpose()?,
            is_touched_by_ai: non_built.is_touched_by_ai,
            start_loop_step_id: non_built.start_loop_step_id,
            parent_container_id: non_built.parent_container_id,
            parallel_actions: non_built
                .parallel_actions
                .into_iter()
                .map(Step::from_non_built)
                .collect::<Result<_, _>>()?,
        })
    }

    fn to_built(&self) -> BuiltStep {
        BuiltStep {
            identifier: self.identifier.clone(),
            original_step_identifier: self.original_step_id.clone(),
            parent_workflow_identifier: self.playbook_id.clone(),
            parent_step_identifiers: self.parent_step_ids.clone(),
            parent_step_identifier: self.parent_step_id.clone(),
            previous_result_condition: self.previous_result_condition.clone(),
            instance_name: self.instance_name.clone(),
            is_automatic: self.is_automatic,
            name: self.name.clone(),
            is_skippable: self.is_skippable,
            description: self.description.clone(),
            action_provider: self.action_provider.clone(),
            action_name: self.action_name.clone(),
            r#type: self.step_type,
            integration: self.integration.clone(),
            parameters: self.parameters.iter().map(StepParameter::to_built).collect(),
            auto_skip_on_failure: self.auto_skip_on_failure,
            is_debug_mock_data: self.is_debug_mock_data,
            step_debug_data: self.step_debug_data.as_ref().map(StepDebugData::to_built),
            parent_step_container_id: self.parent_container_id.clone(),
            is_touched_by_ai: self.is_touched_by_ai,
            start_loop_step_identifier: self.start_loop_step_id.clone(),
            parallel_actions: self.parallel_actions.iter().map(Step::to_built).collect(),
        }
    }

    fn to_non_built(&self) -> NonBuiltStep {
        NonBuiltStep {
            name: self.name.clone(),
            description: self.description.clone(),
            identifier: self.identifier.clone(),
            original_step_id: self.original_step_id.clone(),
            playbook_id: self.playbook_id.clone(),
            parent_step_ids: self.parent_step_ids.clone(),
            parent_step_id: self.parent_step_id.clone(),
            previous_result_condition: self.previous_result_condition.clone(),
            instance_name: self.instance_name.clone(),
            is_automatic: self.is_automatic,
            is_skippable: self.is_skippable,
            action_provider: self.action_provider.clone(),
            action_name: self.action_name.clone(),
            integration: self.integration.clone(),
            r#type: self.step_type,
            parameters: self
                .parameters
                .iter()
                .map(StepParameter::to_non_built)
                .collect(),
            auto_skip_on_failure: self.auto_skip_on_failure,
            is_debug_mock_data: self.is_debug_mock_data,
            step_debug_data: self
                .step_debug_data
                .as_ref()
                .map(StepDebugData::to_non_built),
            start_loop_step_id: self.start_loop_step_id.clone(),
            parent_container_id: self.parent_container_id.clone(),
            is_touched_by_ai: self.is_touched_by_ai,
            parallel_actions: self
                .parallel_actions
                .iter()
                .map(Step::to_non_built)
                .collect(),
        }
    }
}
