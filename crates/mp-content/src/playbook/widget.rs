//! Overview widgets attached to a playbook.
//!
//! HTML widgets carry a typed data definition; every other widget type
//! carries an opaque JSON payload. The built dialect stores the definition
//! as a serialized JSON string (`DataDefinitionJson`), the non-built dialect
//! as a structured `data_definition` mapping.

use mp_core::{Buildable, ConversionError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::condition::{BuiltConditionGroup, ConditionGroup, NonBuiltConditionGroup};

mp_core::representable_enum! {
    pub enum WidgetType {
        KeyValue = 0 => "key_value",
        Events = 1 => "events",
        JsonResult = 2 => "json_result",
        Html = 3 => "html",
        WallActivities = 4 => "wall_activities",
        Alerts = 5 => "alerts",
        Timeline = 6 => "timeline",
        Graph = 7 => "graph",
        Text = 8 => "text",
        PotentiallyGroupedAlerts = 9 => "potentially_grouped_alerts",
        EntitiesHighlights = 10 => "entities_highlights",
        PendingSteps = 11 => "pending_steps",
        CaseRecommendations = 12 => "case_recommendations",
        Statistics = 13 => "statistics",
        CaseDescription = 14 => "case_description",
        Insight = 15 => "insight",
        CaseAssistant = 16 => "case_assistant",
        CaseApsGraph = 17 => "case_aps_graph",
        CaseRelatedFindings = 18 => "case_related_findings",
        CaseImpactedResources = 19 => "case_impacted_resources",
        Form = 20 => "form",
        QuickActions = 21 => "quick_actions",
    }
}

mp_core::representable_enum! {
    /// Grid columns the widget occupies.
    pub enum WidgetSize {
        HalfWidth = 1 => "half_width",
        FullWidth = 2 => "full_width",
        ThirdWidth = 3 => "third_width",
        TwoThirdsWidth = 4 => "two_thirds_width",
    }
}

mp_core::representable_enum! {
    pub enum WidgetDefinitionScope {
        Case = 0 => "case",
        Alert = 1 => "alert",
        Both = 2 => "both",
    }
}

// ---------------------------------------------------------------------------
// HTML data definition
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct HtmlWidgetDataDefinition {
    pub html_height: i64,
    pub safe_rendering: bool,
    pub widget_type: WidgetType,
    pub widget_definition_scope: WidgetDefinitionScope,
    pub html_content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuiltHtmlWidgetDataDefinition {
    pub html_height: i64,
    pub safe_rendering: bool,
    #[serde(with = "mp_core::enums::code")]
    pub r#type: WidgetType,
    #[serde(with = "mp_core::enums::code")]
    pub widget_definition_scope: WidgetDefinitionScope,
    #[serde(default)]
    pub html_content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NonBuiltHtmlWidgetDataDefinition {
    pub html_height: i64,
    pub safe_rendering: bool,
    pub r#type: WidgetType,
    pub widget_definition_scope: WidgetDefinitionScope,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub html_content: String,
}

impl Buildable for HtmlWidgetDataDefinition {
    const ENTITY: &'static str = "HtmlWidgetDataDefinition";
    type Built = BuiltHtmlWidgetDataDefinition;
    type NonBuilt = NonBuiltHtmlWidgetDataDefinition;

    fn from_built(built: BuiltHtmlWidgetDataDefinition) -> Result<Self, ConversionError> {
        Ok(Self {
            html_height: built.html_height,
            safe_rendering: built.safe_rendering,
            widget_type: built.r#type,
            widget_definition_scope: built.widget_definition_scope,
            html_content: built.html_content,
        })
    }

    fn from_non_built(
        non_built: NonBuiltHtmlWidgetDataDefinition,
    ) -> Result<Self, ConversionError> {
        Ok(Self {
            html_height: non_built.html_height,
            safe_rendering: non_built.safe_rendering,
            widget_type: non_built.r#type,
            widget_definition_scope: non_built.widget_definition_scope,
            html_content: non_built.html_content,
        })
    }

    fn to_built(&self) -> BuiltHtmlWidgetDataDefinition {
        BuiltHtmlWidgetDataDefinition {
            html_height: self.html_height,
            safe_rendering: self.safe_rendering,
            r#type: self.widget_type,
            widget_definition_scope: self.widget_definition_scope,
            html_content: self.html_content.clone(),
        }
    }

    fn to_non_built(&self) -> NonBuiltHtmlWidgetDataDefinition {
        NonBuiltHtmlWidgetDataDefinition {
            html_height: self.html_height,
            safe_rendering: self.safe_rendering,
            r#type: self.widget_type,
            widget_definition_scope: self.widget_definition_scope,
            html_content: self.html_content.clone(),
        }
    }
}

/// Payload of a widget, typed only for HTML widgets.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetDataDefinition {
    Html(HtmlWidgetDataDefinition),
    /// Serialized JSON text, written back to the built dialect verbatim.
    Opaque(String),
}

impl WidgetDataDefinition {
    fn from_built_json(widget_type: WidgetType, raw: &str) -> Result<Self, ConversionError> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| ConversionError::InvalidValue {
                entity: PlaybookWidgetMetadata::ENTITY,
                field: "DataDefinitionJson",
                reason: e.to_string(),
            })?;
        if widget_type == WidgetType::Html {
            HtmlWidgetDataDefinition::from_built_value(value).map(Self::Html)
        } else {
            Ok(Self::Opaque(raw.to_owned()))
        }
    }

    fn from_non_built_value(
        widget_type: WidgetType,
        value: Value,
    ) -> Result<Self, ConversionError> {
        if widget_type != WidgetType::Html {
            return Ok(Self::Opaque(value.to_string()));
        }
        if value.is_null() {
            return Err(ConversionError::MissingField {
                entity: PlaybookWidgetMetadata::ENTITY,
                field: "data_definition",
            });
        }
        HtmlWidgetDataDefinition::from_non_built_value(value).map(Self::Html)
    }

    fn to_built_json(&self) -> String {
        match self {
            Self::Html(html) => serde_json::to_string(&html.to_built()).unwrap_or_default(),
            Self::Opaque(raw) => raw.clone(),
        }
    }

    fn to_non_built_value(&self) -> Value {
        match self {
            Self::Html(html) => serde_json::to_value(html.to_non_built()).unwrap_or(Value::Null),
            Self::Opaque(raw) => serde_json::from_str(raw).unwrap_or(Value::Null),
        }
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct PlaybookWidgetMetadata {
    pub title: String,
    pub description: String,
    pub identifier: String,
    pub order: i64,
    pub template_identifier: String,
    pub widget_type: WidgetType,
    pub data_definition: WidgetDataDefinition,
    pub widget_size: WidgetSize,
    pub action_widget_template_id: Option<String>,
    pub step_id: Option<String>,
    pub step_integration: Option<String>,
    pub block_step_id: Option<String>,
    pub block_step_instance_name: Option<String>,
    pub present_if_empty: bool,
    /// Visibility rule.
    pub conditions_group: ConditionGroup,
    pub integration_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BuiltPlaybookWidgetMetadata {
    pub title: String,
    pub description: String,
    pub identifier: String,
    pub order: i64,
    pub template_identifier: String,
    #[serde(with = "mp_core::enums::code")]
    pub r#type: WidgetType,
    pub data_definition_json: String,
    #[serde(with = "mp_core::enums::code")]
    pub grid_columns: WidgetSize,
    pub action_widget_template_identifier: Option<String>,
    pub step_identifier: Option<String>,
    pub step_integration: Option<String>,
    pub block_step_identifier: Option<String>,
    pub block_step_instance_name: Option<String>,
    pub present_if_empty: bool,
    pub conditions_group: BuiltConditionGroup,
    pub integration_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NonBuiltPlaybookWidgetMetadata {
    pub title: String,
    pub description: String,
    pub identifier: String,
    pub order: i64,
    pub template_identifier: String,
    pub r#type: WidgetType,
    #[serde(default)]
    pub data_definition: Value,
    pub widget_size: WidgetSize,
    pub action_widget_template_id: Option<String>,
    pub step_id: Option<String>,
    pub step_integration: Option<String>,
    pub block_step_id: Option<String>,
    pub block_step_instance_name: Option<String>,
    pub present_if_empty: bool,
    pub conditions_group: NonBuiltConditionGroup,
    pub integration_name: Option<String>,
}

impl Buildable for PlaybookWidgetMetadata {
    const ENTITY: &'static str = "PlaybookWidgetMetadata";
    type Built = BuiltPlaybookWidgetMetadata;
    type NonBuilt = NonBuiltPlaybookWidgetMetadata;

    fn from_built(built: BuiltPlaybookWidgetMetadata) -> Result<Self, ConversionError> {
        Ok(Self {
            data_definition: WidgetDataDefinition::from_built_json(
                built.r#type,
                &built.data_definition_json,
            )?,
            title: built.title,
            description: built.description,
            identifier: built.identifier,
            order: built.order,
            template_identifier: built.template_identifier,
            widget_type: built.r#type,
            widget_size: built.grid_columns,
            action_widget_template_id: built.action_widget_template_identifier,
            step_id: built.step_identifier,
            step_integration: built.step_integration,
            block_step_id: built.block_step_identifier,
            block_step_instance_name: built.block_step_instance_name,
            present_if_empty: built.present_if_empty,
            conditions_group: ConditionGroup::from_built(built.conditions_group)?,
            integration_name: built.integration_name,
        })
    }

    fn from_non_built(non_built: NonBuiltPlaybookWidgetMetadata) -> Result<Self, ConversionError> {
        Ok(Self {
            data_definition: WidgetDataDefinition::from_non_built_value(
                non_built.r#type,
                non_built.data_definition,
            )?,
            title: non_built.title,
            description: non_built.description,
            identifier: non_built.identifier,
            order: non_built.order,
            template_identifier: non_built.template_identifier,
            widget_type: non_built.r#type,
            widget_size: non_built.widget_size,
            action_widget_template_id: non_built.action_widget_template_id,
            step_id: non_built.step_id,
            step_integration: non_built.step_integration,
            block_step_id: non_built.block_step_id,
            block_step_instance_name: non_built.block_step_instance_name,
            present_if_empty: non_built.present_if_empty,
            conditions_group: ConditionGroup::from_non_built(non_built.conditions_group)?,
            integration_name: non_built.integration_name,
        })
    }

    fn to_built(&self) -> BuiltPlaybookWidgetMetadata {
        BuiltPlaybookWidgetMetadata {
            title: self.title.clone(),
            description: self.description.clone(),
            identifier: self.identifier.clone(),
            order: self.order,
            template_identifier: self.template_identifier.clone(),
            r#type: self.widget_type,
            data_definition_json: self.data_definition.to_built_json(),
            grid_columns: self.widget_size,
            action_widget_template_identifier: self.action_widget_template_id.clone(),
            step_identifier: self.step_id.clone(),
            step_integration: self.step_integration.clone(),
            block_step_identifier: self.block_step_id.clone(),
            block_step_instance_name: self.block_step_instance_name.clone(),
            present_if_empty: self.present_if_empty,
            conditions_group: self.conditions_group.to_built(),
            integration_name: self.integration_name.clone(),
        }
    }

    fn to_non_built(&self) -> NonBuiltPlaybookWidgetMetadata {
        NonBuiltPlaybookWidgetMetadata {
            title: self.title.clone(),
            description: self.description.clone(),
            identifier: self.identifier.clone(),
            order: self.order,
            template_identifier: self.template_identifier.clone(),
            r#type: self.widget_type,
            data_definition: self.data_definition.to_non_built_value(),
            widget_size: self.widget_size,
            action_widget_template_id: self.action_widget_template_id.clone(),
            step_id: self.step_id.clone(),
            step_integration: self.step_integration.clone(),
            block_step_id: self.block_step_id.clone(),
            block_step_instance_name: self.block_step_instance_name.clone(),
            present_if_empty: self.present_if_empty,
            conditions_group: self.conditions_group.to_non_built(),
            integration_name: self.integration_name.clone(),
        }
    }
}
