//! Playbook triggers.
//!
//! Both dialects flatten the trigger's condition group into sibling
//! `conditions`/`logical_operator` keys; in memory it is one
//! [`ConditionGroup`].

use mp_core::{Buildable, ConversionError};
use serde::{Deserialize, Serialize};

use super::condition::{BuiltCondition, ConditionGroup, LogicalOperator, NonBuiltCondition};

mp_core::representable_enum! {
    /// Alert attribute a trigger matches on.
    pub enum TriggerType {
        VendorName = 0 => "vendor_name",
        TagName = 1 => "tag_name",
        RuleName = 2 => "rule_name",
        ProductName = 3 => "product_name",
        NetworkName = 4 => "network_name",
        EntityDetails = 5 => "entity_details",
        RelationDetails = 6 => "relation_details",
        TrackingList = 7 => "tracking_list",
        All = 8 => "all",
        AlertTriggerValue = 9 => "alert_trigger_value",
        CaseData = 10 => "case_data",
        GetInputs = 11 => "get_inputs",
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Trigger {
    pub identifier: String,
    pub is_enabled: bool,
    pub playbook_id: String,
    pub playbook_name: Option<String>,
    pub trigger_type: TriggerType,
    pub conditions: ConditionGroup,
    pub environments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BuiltTrigger {
    pub identifier: String,
    pub is_enabled: bool,
    pub definition_identifier: String,
    #[serde(with = "mp_core::enums::code")]
    pub r#type: TriggerType,
    pub workflow_name: Option<String>,
    #[serde(with = "mp_core::enums::code")]
    pub logical_operator: LogicalOperator,
    #[serde(default)]
    pub conditions: Vec<BuiltCondition>,
    #[serde(default)]
    pub environments: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NonBuiltTrigger {
    pub identifier: String,
    pub is_enabled: bool,
    pub playbook_id: String,
    #[serde(rename = "type_", alias = "type")]
    pub trigger_type: TriggerType,
    #[serde(default)]
    pub conditions: Vec<NonBuiltCondition>,
    pub logical_operator: LogicalOperator,
    #[serde(default)]
    pub environments: Vec<String>,
    #[serde(default)]
    pub playbook_name: Option<String>,
}

impl Buildable for Trigger {
    const ENTITY: &'static str = "Trigger";
    type Built = BuiltTrigger;
    type NonBuilt = NonBuiltTrigger;

    fn from_built(built: BuiltTrigger) -> Result<Self, ConversionError> {
        Ok(Self {
            identifier: built.identifier,
            is_enabled: built.is_enabled,
            playbook_id: built.definition_identifier,
            playbook_name: built.workflow_name,
            trigger_type: built.r#type,
            conditions: ConditionGroup::from_built_parts(built.conditions, built.logical_operator)?,
            environments: built.environments,
        })
    }

    fn from_non_built(non_built: NonBuiltTrigger) -> Result<Self, ConversionError> {
        Ok(Self {
            identifier: non_built.identifier,
            is_enabled: non_built.is_enabled,
            playbook_id: non_built.playbook_id,
            playbook_name: non_built.playbook_name,
            trigger_type: non_built.trigger_type,
            conditions: ConditionGroup::from_non_built_parts(
                non_built.conditions,
                non_built.logical_operator,
            )?,
            environments: non_built.environments,
        })
    }

    fn to_built(&self) -> BuiltTrigger {
        BuiltTrigger {
            identifier: self.identifier.clone(),
            is_enabled: self.is_enabled,
            definition_identifier: self.playbook_id.clone(),
            r#type: self.trigger_type,
            workflow_name: self.playbook_name.clone(),
            logical_operator: self.conditions.logical_operator,
            conditions: self.conditions.built_conditions(),
            environments: self.environments.clone(),
        }
    }

    fn to_non_built(&self) -> NonBuiltTrigger {
        NonBuiltTrigger {
            identifier: self.identifier.clone(),
            is_enabled: self.is_enabled,
            playbook_id: self.playbook_id.clone(),
            trigger_type: self.trigger_type,
            conditions: self.conditions.non_built_conditions(),
            logical_operator: self.conditions.logical_operator,
            environments: self.environments.clone(),
            playbook_name: self.playbook_name.clone(),
        }
    }
}
