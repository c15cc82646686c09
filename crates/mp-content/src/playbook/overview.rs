//! Case/alert overview templates attached to a playbook.

use mp_core::{Buildable, ConversionError};
use serde::{Deserialize, Serialize};

mp_core::representable_enum! {
    pub enum OverviewType {
        PlaybookDefault = 0 => "playbook_default",
        Regular = 1 => "regular",
        SystemAlert = 2 => "system_alert",
        SystemCase = 3 => "system_case",
        AlertType = 4 => "alert_type",
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Overview {
    pub identifier: String,
    pub name: String,
    pub creator: Option<String>,
    pub playbook_id: String,
    pub overview_type: OverviewType,
    pub alert_rule_type: Option<String>,
    /// Role ids allowed to see the overview.
    pub roles: Vec<i64>,
    /// Role display names; exported beside the template, not inside it.
    pub role_names: Vec<String>,
}

/// The template part of a built overview. This is also the shape the
/// playbook definition lists under `OverviewTemplates`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BuiltOverviewDetails {
    pub identifier: String,
    pub name: String,
    pub creator: Option<String>,
    pub playbook_definition_identifier: String,
    #[serde(with = "mp_core::enums::code")]
    pub r#type: OverviewType,
    pub alert_rule_type: Option<String>,
    #[serde(default)]
    pub roles: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BuiltOverview {
    pub overview_template: BuiltOverviewDetails,
    #[serde(default)]
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NonBuiltOverview {
    pub identifier: String,
    pub name: String,
    pub creator: Option<String>,
    pub playbook_id: String,
    pub r#type: OverviewType,
    pub alert_rule_type: Option<String>,
    #[serde(default)]
    pub roles: Vec<i64>,
    #[serde(default)]
    pub role_names: Vec<String>,
}

impl Buildable for Overview {
    const ENTITY: &'static str = "Overview";
    type Built = BuiltOverview;
    type NonBuilt = NonBuiltOverview;

    fn from_built(built: BuiltOverview) -> Result<Self, ConversionError> {
        let details = built.overview_template;
        Ok(Self {
            identifier: details.identifier,
            name: details.name,
            creator: details.creator,
            playbook_id: details.playbook_definition_identifier,
            overview_type: details.r#type,
            alert_rule_type: details.alert_rule_type,
            roles: details.roles,
            role_names: built.roles,
        })
    }

    fn from_non_built(non_built: NonBuiltOverview) -> Result<Self, ConversionError> {
        Ok(Self {
            identifier: non_built.identifier,
            name: non_built.name,
            creator: non_built.creator,
            playbook_id: non_built.playbook_id,
            overview_type: non_built.r#type,
            alert_rule_type: non_built.alert_rule_type,
            roles: non_built.roles,
            role_names: non_built.role_names,
        })
    }

    fn to_built(&self) -> BuiltOverview {
        BuiltOverview {
            overview_template: BuiltOverviewDetails {
                identifier: self.identifier.clone(),
                name: self.name.clone(),
                creator: self.creator.clone(),
                playbook_definition_identifier: self.playbook_id.clone(),
                r#type: self.overview_type,
                alert_rule_type: self.alert_rule_type.clone(),
                roles: self.roles.clone(),
            },
            roles: self.role_names.clone(),
        }
    }

    fn to_non_built(&self) -> NonBuiltOverview {
        NonBuiltOverview {
            identifier: self.identifier.clone(),
            name: self.name.clone(),
            creator: self.creator.clone(),
            playbook_id: self.playbook_id.clone(),
            r#type: self.overview_type,
            alert_rule_type: self.alert_rule_type.clone(),
            roles: self.roles.clone(),
            role_names: self.role_names.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mp_core::enums::has_unique_members;
    use serde_json::json;

    #[test]
    fn built_round_trip() {
        let built = json!({
            "OverviewTemplate": {
                "Identifier": "ov-1",
                "Name": "Phishing Overview",
                "Creator": null,
                "PlaybookDefinitionIdentifier": "pb-1",
                "Type": 0,
                "AlertRuleType": null,
                "Roles": [1, 2]
            },
            "Roles": ["Admin", "Tier1"]
        });
        let overview = Overview::from_built_value(built.clone()).unwrap();
        assert_eq!(overview.role_names, vec!["Admin", "Tier1"]);
        assert_eq!(overview.to_built_value().unwrap(), built);
    }

    #[test]
    fn non_built_round_trip() {
        let non_built = json!({
            "identifier": "ov-1",
            "name": "Phishing Overview",
            "creator": "admin",
            "playbook_id": "pb-1",
            "type": "system_alert",
            "alert_rule_type": "Phishing",
            "roles": [],
            "role_names": []
        });
        let overview = Overview::from_non_built_value(non_built.clone()).unwrap();
        assert_eq!(overview.overview_type, OverviewType::SystemAlert);
        assert_eq!(overview.to_non_built_value().unwrap(), non_built);
    }

    #[test]
    fn overview_types_are_unique() {
        assert!(has_unique_members::<OverviewType>());
    }
}
