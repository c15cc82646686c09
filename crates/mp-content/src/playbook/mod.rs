//! # Playbooks
//!
//! A non-built playbook is a directory:
//!
//! ```text
//! <playbook>/
//! ├── definition.yaml        PlaybookMetadata
//! ├── display_info.yaml      PlaybookDisplayInfo
//! ├── trigger.yaml           Trigger (optional)
//! ├── release_notes.yaml     [ReleaseNote]
//! ├── steps/*.yaml           Step, one per file
//! ├── overviews/*.yaml       Overview, one per file
//! └── widgets/*.yaml         PlaybookWidgetMetadata, one per file
//! ```
//!
//! A built playbook is a single JSON export whose `Definition` key holds the
//! metadata fields together with steps, triggers and overview templates.

pub mod access_permission;
pub mod condition;
pub mod display_info;
pub mod metadata;
pub mod overview;
pub mod step;
pub mod trigger;
pub mod widget;

use std::path::Path;

use mp_core::constants::{
    CONTENT_HUB_CATEGORY, DEFINITION_FILE, DISPLAY_INFO_FILE, OVERVIEWS_DIR, STEPS_DIR,
    TRIGGER_FILE, WIDGETS_DIR,
};
use mp_core::{Buildable, ConversionError};
use serde::{Deserialize, Serialize};

use crate::error::{ContentError, ContentResult};
use crate::parser;
use crate::release_note::{self, NonBuiltReleaseNote, ReleaseNote};

pub use access_permission::{AccessPermission, PlaybookAccessLevel};
pub use condition::{Condition, ConditionGroup, LogicalOperator, MatchType};
pub use display_info::{PlaybookContributionType, PlaybookDisplayInfo};
pub use metadata::{PlaybookCreationSource, PlaybookMetadata, PlaybookType};
pub use overview::{Overview, OverviewType};
pub use step::{Step, StepDebugData, StepParameter, StepType};
pub use trigger::{Trigger, TriggerType};
pub use widget::{PlaybookWidgetMetadata, WidgetDataDefinition, WidgetSize, WidgetType};

use display_info::NonBuiltPlaybookDisplayInfo;
use metadata::{BuiltPlaybookMetadata, NonBuiltPlaybookMetadata};
use overview::{BuiltOverview, BuiltOverviewDetails, NonBuiltOverview};
use step::{BuiltStep, NonBuiltStep};
use trigger::{BuiltTrigger, NonBuiltTrigger};
use widget::{BuiltPlaybookWidgetMetadata, NonBuiltPlaybookWidgetMetadata};

/// A playbook (or block) with all its components.
#[derive(Debug, Clone, PartialEq)]
pub struct Playbook {
    pub metadata: PlaybookMetadata,
    pub display_info: PlaybookDisplayInfo,
    pub steps: Vec<Step>,
    pub triggers: Vec<Trigger>,
    pub overviews: Vec<Overview>,
    pub widgets: Vec<PlaybookWidgetMetadata>,
    pub release_notes: Vec<ReleaseNote>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BuiltPlaybookDefinition {
    #[serde(flatten)]
    pub metadata: BuiltPlaybookMetadata,
    #[serde(default)]
    pub steps: Vec<BuiltStep>,
    #[serde(default)]
    pub triggers: Vec<BuiltTrigger>,
    #[serde(default)]
    pub overview_templates: Vec<BuiltOverviewDetails>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BuiltPlaybook {
    pub category_name: String,
    #[serde(default)]
    pub overview_templates_details: Vec<BuiltOverview>,
    #[serde(default)]
    pub widget_templates: Vec<BuiltPlaybookWidgetMetadata>,
    pub definition: BuiltPlaybookDefinition,
}

/// All components of a playbook in their non-built shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NonBuiltPlaybook {
    pub meta_data: NonBuiltPlaybookMetadata,
    pub display_info: NonBuiltPlaybookDisplayInfo,
    pub steps: Vec<NonBuiltStep>,
    pub triggers: Vec<NonBuiltTrigger>,
    pub overviews: Vec<NonBuiltOverview>,
    pub widgets: Vec<NonBuiltPlaybookWidgetMetadata>,
    pub release_notes: Vec<NonBuiltReleaseNote>,
}

/// Release note stood in for a playbook read from a platform export, which
/// carries no changelog.
fn placeholder_release_note() -> ReleaseNote {
    ReleaseNote {
        description: "Release description".to_string(),
        deprecated: false,
        new: true,
        item_name: "Playbook name".to_string(),
        item_type: "Playbook".to_string(),
        publish_time: None,
        regressive: false,
        removed: false,
        ticket: None,
        version: 1.0,
    }
}

fn convert_all<E: Buildable>(
    items: Vec<E::Built>,
) -> Result<Vec<E>, ConversionError> {
    items.into_iter().map(E::from_built).collect()
}

fn convert_all_non_built<E: Buildable>(
    items: Vec<E::NonBuilt>,
) -> Result<Vec<E>, ConversionError> {
    items.into_iter().map(E::from_non_built).collect()
}

impl Playbook {
    pub fn identifier(&self) -> &str {
        &self.metadata.identifier
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Read a non-built playbook directory.
    ///
    /// `definition.yaml` and `display_info.yaml` are required; every other
    /// component is optional and absent ones load as empty lists. The first
    /// malformed file aborts the load.
    pub fn from_non_built_path(path: &Path) -> ContentResult<Self> {
        let _span = tracing::debug_span!("load_playbook", path = %path.display()).entered();

        let metadata: PlaybookMetadata = parser::load_non_built(&path.join(DEFINITION_FILE))?;
        let display_info: PlaybookDisplayInfo =
            parser::load_non_built(&path.join(DISPLAY_INFO_FILE))?;

        let trigger_path = path.join(TRIGGER_FILE);
        let triggers = if trigger_path.is_file() {
            vec![parser::load_non_built(&trigger_path)?]
        } else {
            Vec::new()
        };

        let playbook = Self {
            metadata,
            display_info,
            steps: parser::load_non_built_dir(&path.join(STEPS_DIR))?,
            triggers,
            overviews: parser::load_non_built_dir(&path.join(OVERVIEWS_DIR))?,
            widgets: parser::load_non_built_dir(&path.join(WIDGETS_DIR))?,
            release_notes: release_note::load_release_notes(path)?,
        };
        tracing::debug!(
            steps = playbook.steps.len(),
            widgets = playbook.widgets.len(),
            release_notes = playbook.release_notes.len(),
            "playbook loaded"
        );
        Ok(playbook)
    }

    /// Read a built playbook export file.
    pub fn from_built_path(path: &Path) -> ContentResult<Self> {
        let built: BuiltPlaybook = parser::load_json_typed(path)?;
        Self::from_built(built).map_err(|source| ContentError::Conversion {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl Buildable for Playbook {
    const ENTITY: &'static str = "Playbook";
    type Built = BuiltPlaybook;
    type NonBuilt = NonBuiltPlaybook;

    /// Exports carry neither display info nor release notes; both take
    /// defaults.
    fn from_built(built: BuiltPlaybook) -> Result<Self, ConversionError> {
        let definition = built.definition;
        Ok(Self {
            metadata: PlaybookMetadata::from_built(definition.metadata)?,
            display_info: PlaybookDisplayInfo::default(),
            steps: convert_all(definition.steps)?,
            triggers: convert_all(definition.triggers)?,
            overviews: convert_all(built.overview_templates_details)?,
            widgets: convert_all(built.widget_templates)?,
            release_notes: vec![placeholder_release_note()],
        })
    }

    fn from_non_built(non_built: NonBuiltPlaybook) -> Result<Self, ConversionError> {
        Ok(Self {
            metadata: PlaybookMetadata::from_non_built(non_built.meta_data)?,
            display_info: PlaybookDisplayInfo::from_non_built(non_built.display_info)?,
            steps: convert_all_non_built(non_built.steps)?,
            triggers: convert_all_non_built(non_built.triggers)?,
            overviews: convert_all_non_built(non_built.overviews)?,
            widgets: convert_all_non_built(non_built.widgets)?,
            release_notes: convert_all_non_built(non_built.release_notes)?,
        })
    }

    fn to_built(&self) -> BuiltPlaybook {
        let overviews: Vec<BuiltOverview> = self.overviews.iter().map(Overview::to_built).collect();
        BuiltPlaybook {
            category_name: CONTENT_HUB_CATEGORY.to_string(),
            widget_templates: self
                .widgets
                .iter()
                .map(PlaybookWidgetMetadata::to_built)
                .collect(),
            definition: BuiltPlaybookDefinition {
                metadata: self.metadata.to_built(),
                steps: self.steps.iter().map(Step::to_built).collect(),
                triggers: self.triggers.iter().map(Trigger::to_built).collect(),
                overview_templates: overviews
                    .iter()
                    .map(|o| o.overview_template.clone())
                    .collect(),
            },
            overview_templates_details: overviews,
        }
    }

    fn to_non_built(&self) -> NonBuiltPlaybook {
        NonBuiltPlaybook {
            meta_data: self.metadata.to_non_built(),
            display_info: self.display_info.to_non_built(),
            steps: self.steps.iter().map(Step::to_non_built).collect(),
            triggers: self.triggers.iter().map(Trigger::to_non_built).collect(),
            overviews: self.overviews.iter().map(Overview::to_non_built).collect(),
            widgets: self
                .widgets
                .iter()
                .map(PlaybookWidgetMetadata::to_non_built)
                .collect(),
            release_notes: self
                .release_notes
                .iter()
                .map(ReleaseNote::to_non_built)
                .collect(),
        }
    }
}
