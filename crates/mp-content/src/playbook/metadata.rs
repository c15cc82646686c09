//! Playbook metadata: the `definition.yaml` of a playbook or block.

use mp_core::{Buildable, ConversionError};
use serde::{Deserialize, Serialize};

use super::access_permission::{
    AccessPermission, BuiltAccessPermission, NonBuiltAccessPermission, PlaybookAccessLevel,
};

mp_core::representable_enum! {
    /// A full playbook, or a block reusable from other playbooks.
    pub enum PlaybookType {
        Playbook = 0 => "playbook",
        Block = 1 => "block",
    }
}

mp_core::representable_enum! {
    pub enum PlaybookCreationSource {
        UserOrApiInitiated = 0 => "user_or_api_initiated",
        AiGeneratedFromAlert = 1 => "ai_generated_from_alert",
        AiGeneratedFromPrompt = 2 => "ai_generated_from_prompt",
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaybookMetadata {
    pub identifier: String,
    pub name: String,
    pub is_enable: bool,
    pub version: f64,
    pub description: String,
    pub creation_source: Option<PlaybookCreationSource>,
    pub default_access_level: Option<PlaybookAccessLevel>,
    pub simulation_clone: Option<bool>,
    pub debug_alert_identifier: Option<String>,
    pub debug_base_alert_identifier: Option<String>,
    pub is_debug_mode: bool,
    pub playbook_type: PlaybookType,
    pub template_name: Option<String>,
    pub original_workflow_identifier: String,
    pub version_comment: Option<String>,
    pub version_creator: Option<String>,
    pub last_editor: Option<String>,
    pub creator: String,
    pub priority: i64,
    pub category: i64,
    pub is_automatic: bool,
    pub is_archived: bool,
    pub permissions: Vec<AccessPermission>,
    pub environments: Vec<String>,
}

impl PlaybookMetadata {
    pub fn is_block(&self) -> bool {
        self.playbook_type == PlaybookType::Block
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BuiltPlaybookMetadata {
    pub identifier: String,
    pub name: String,
    pub is_enable: bool,
    pub version: f64,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "mp_core::enums::optional_code")]
    pub creation_source: Option<PlaybookCreationSource>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "mp_core::enums::optional_code")]
    pub default_access_level: Option<PlaybookAccessLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simulation_clone: Option<bool>,
    pub debug_alert_identifier: Option<String>,
    pub debug_base_alert_identifier: Option<String>,
    pub is_debug_mode: bool,
    #[serde(with = "mp_core::enums::code")]
    pub playbook_type: PlaybookType,
    pub template_name: Option<String>,
    pub original_workflow_identifier: String,
    pub version_comment: Option<String>,
    pub version_creator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_editor: Option<String>,
    pub creator: String,
    pub priority: i64,
    pub category: i64,
    pub is_automatic: bool,
    pub is_archived: bool,
    #[serde(default)]
    pub permissions: Vec<BuiltAccessPermission>,
    #[serde(default)]
    pub environments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NonBuiltPlaybookMetadata {
    pub identifier: String,
    pub is_enable: bool,
    pub version: f64,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_source: Option<PlaybookCreationSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_access_level: Option<PlaybookAccessLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simulation_clone: Option<bool>,
    pub debug_alert_identifier: Option<String>,
    pub debug_base_alert_identifier: Option<String>,
    pub is_debug_mode: bool,
    pub r#type: PlaybookType,
    pub template_name: Option<String>,
    pub original_workflow_identifier: String,
    pub version_comment: Option<String>,
    pub version_creator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_editor: Option<String>,
    pub creator: String,
    pub priority: i64,
    pub category: i64,
    pub is_automatic: bool,
    pub is_archived: bool,
    #[serde(default)]
    pub permissions: Vec<NonBuiltAccessPermission>,
    #[serde(default)]
    pub environments: Vec<String>,
}

impl Buildable for PlaybookMetadata {
    const ENTITY: &'static str = "PlaybookMetadata";
    type Built = BuiltPlaybookMetadata;
    type NonBuilt = NonBuiltPlaybookMetadata;

    fn from_built(built: BuiltPlaybookMetadata) -> Result<Self, ConversionError> {
        Ok(Self {
            identifier: built.identifier,
            name: built.name,
            is_enable: built.is_enable,
            version: built.version,
            description: built.description,
            creation_source: built.creation_source,
            default_access_level: built.default_access_level,
            simulation_clone: built.simulation_clone,
            debug_alert_identifier: built.debug_alert_identifier,
            debug_base_alert_identifier: built.debug_base_alert_identifier,
            is_debug_mode: built.is_debug_mode,
            playbook_type: built.playbook_type,
            template_name: built.template_name,
            original_workflow_identifier: built.original_workflow_identifier,
            version_comment: built.version_comment,
            version_creator: built.version_creator,
            last_editor: built.last_editor,
            creator: built.creator,
            priority: built.priority,
            category: built.category,
            is_automatic: built.is_automatic,
            is_archived: built.is_archived,
            permissions: built
                .permissions
                .into_iter()
                .map(AccessPermission::from_built)
                .collect::<Result<_, _>>()?,
            environments: built.environments,
        })
    }

    fn from_non_built(non_built: NonBuiltPlaybookMetadata) -> Result<Self, ConversionError> {
        Ok(Self {
            identifier: non_built.identifier,
            name: non_built.name,
            is_enable: non_built.is_enable,
            version: non_built.version,
            description: non_built.description,
            creation_source: non_built.creation_source,
            default_access_level: non_built.default_access_level,
            simulation_clone: non_built.simulation_clone,
            debug_alert_identifier: non_built.debug_alert_identifier,
            debug_base_alert_identifier: non_built.debug_base_alert_identifier,
            is_debug_mode: non_built.is_debug_mode,
            playbook_type: non_built.r#type,
            template_name: non_built.template_name,
            original_workflow_identifier: non_built.original_workflow_identifier,
            version_comment: non_built.version_comment,
            version_creator: non_built.version_creator,
            last_editor: non_built.last_editor,
            creator: non_built.creator,
            priority: non_built.priority,
            category: non_built.category,
            is_automatic: non_built.is_automatic,
            is_archived: non_built.is_archived,
            permissions: non_built
                .permissions
                .into_iter()
                .map(AccessPermission::from_non_built)
                .collect::<Result<_, _>>()?,
            environments: non_built.environments,
        })
    }

    fn to_built(&self) -> BuiltPlaybookMetadata {
        BuiltPlaybookMetadata {
            identifier: self.identifier.clone(),
            name: self.name.clone(),
            is_enable: self.is_enable,
            version: self.version,
            description: self.description.clone(),
            creation_source: self.creation_source,
            default_access_level: self.default_access_level,
            simulation_clone: self.simulation_clone,
            debug_alert_identifier: self.debug_alert_identifier.clone(),
            debug_base_alert_identifier: self.debug_base_alert_identifier.clone(),
            is_debug_mode: self.is_debug_mode,
            playbook_type: self.playbook_type,
            template_name: self.template_name.clone(),
            original_workflow_identifier: self.original_workflow_identifier.clone(),
            version_comment: self.version_comment.clone(),
            version_creator: self.version_creator.clone(),
            last_editor: self.last_editor.clone(),
            creator: self.creator.clone(),
            priority: self.priority,
            category: self.category,
            is_automatic: self.is_automatic,
            is_archived: self.is_archived,
            permissions: self
                .permissions
                .iter()
                .map(AccessPermission::to_built)
                .collect(),
            environments: self.environments.clone(),
        }
    }

    fn to_non_built(&self) -> NonBuiltPlaybookMetadata {
        NonBuiltPlaybookMetadata {
            identifier: self.identifier.clone(),
            is_enable: self.is_enable,
            version: self.version,
            name: self.name.clone(),
            description: self.description.clone(),
            creation_source: self.creation_source,
            default_access_level: self.default_access_level,
            simulation_clone: self.simulation_clone,
            debug_alert_identifier: self.debug_alert_identifier.clone(),
            debug_base_alert_identifier: self.debug_base_alert_identifier.clone(),
            is_debug_mode: self.is_debug_mode,
            r#type: self.playbook_type,
            template_name: self.template_name.clone(),
            original_workflow_identifier: self.original_workflow_identifier.clone(),
            version_comment: self.version_comment.clone(),
            version_creator: self.version_creator.clone(),
            last_editor: self.last_editor.clone(),
            creator: self.creator.clone(),
            priority: self.priority,
            category: self.category,
            is_automatic: self.is_automatic,
            is_archived: self.is_archived,
            permissions: self
                .permissions
                .iter()
                .map(AccessPermission::to_non_built)
                .collect(),
            environments: self.environments.clone(),
        }
    }
}
