//! Content Hub catalog entry for a playbook (`display_info.yaml`).
//!
//! The built catalog record is generated by the platform. Exporting fills
//! platform-owned fields with fixed defaults: empty identifier, zero
//! timestamps, version `0.0`, no integrations, no dependent playbooks and
//! no alert overview.

use mp_core::{Buildable, ConversionError};
use serde::{Deserialize, Serialize};

use super::metadata::PlaybookType;

mp_core::representable_enum! {
    /// Who authored and maintains the content.
    pub enum PlaybookContributionType {
        Unspecified = 0 => "unspecified",
        Google = 1 => "google",
        ThirdParty = 2 => "third_party",
        Partner = 3 => "partner",
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaybookDisplayInfo {
    pub playbook_type: PlaybookType,
    pub content_hub_display_name: String,
    pub description: String,
    pub author: String,
    pub contact_email: String,
    pub tags: Vec<String>,
    pub contribution_type: PlaybookContributionType,
    pub is_google_verified: bool,
    pub should_display_in_content_hub: bool,
    /// Author acknowledged that steps ship with captured debug data.
    pub allowed_debug_data: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BuiltPlaybookDisplayInfo {
    pub identifier: String,
    pub file_name: String,
    #[serde(with = "mp_core::enums::code")]
    pub r#type: PlaybookType,
    pub display_name: String,
    pub description: String,
    pub create_time: i64,
    pub update_time: i64,
    pub version: f64,
    pub author: String,
    pub contact_email: String,
    pub integrations: Vec<String>,
    pub dependent_playbook_ids: Vec<String>,
    pub tags: Vec<String>,
    #[serde(with = "mp_core::enums::code")]
    pub source: PlaybookContributionType,
    pub verified: bool,
    pub standalone: bool,
    pub has_alert_overview: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NonBuiltPlaybookDisplayInfo {
    pub r#type: PlaybookType,
    pub content_hub_display_name: String,
    pub description: String,
    pub author: String,
    pub contact_email: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub contribution_type: PlaybookContributionType,
    pub should_display_in_content_hub: bool,
    pub acknowledge_debug_data_included: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_google_verified: Option<bool>,
}

impl Default for PlaybookDisplayInfo {
    fn default() -> Self {
        Self {
            playbook_type: PlaybookType::Playbook,
            content_hub_display_name: String::new(),
            description: String::new(),
            author: String::new(),
            contact_email: String::new(),
            tags: Vec::new(),
            contribution_type: PlaybookContributionType::ThirdParty,
            is_google_verified: false,
            should_display_in_content_hub: false,
            allowed_debug_data: false,
        }
    }
}

impl Buildable for PlaybookDisplayInfo {
    const ENTITY: &'static str = "PlaybookDisplayInfo";
    type Built = BuiltPlaybookDisplayInfo;
    type NonBuilt = NonBuiltPlaybookDisplayInfo;

    /// The catalog record does not carry the debug-data acknowledgement, so
    /// it defaults to `false`.
    fn from_built(built: BuiltPlaybookDisplayInfo) -> Result<Self, ConversionError> {
        Ok(Self {
            playbook_type: built.r#type,
            content_hub_display_name: built.display_name,
            description: built.description,
            author: built.author,
            contact_email: built.contact_email,
            tags: built.tags,
            contribution_type: built.source,
            is_google_verified: built.verified,
            should_display_in_content_hub: built.standalone,
            allowed_debug_data: false,
        })
    }

    fn from_non_built(non_built: NonBuiltPlaybookDisplayInfo) -> Result<Self, ConversionError> {
        Ok(Self {
            playbook_type: non_built.r#type,
            content_hub_display_name: non_built.content_hub_display_name,
            description: non_built.description,
            author: non_built.author,
            contact_email: non_built.contact_email,
            tags: non_built.tags,
            contribution_type: non_built.contribution_type,
            is_google_verified: non_built.is_google_verified.unwrap_or(false),
            should_display_in_content_hub: non_built.should_display_in_content_hub,
            allowed_debug_data: non_built.acknowledge_debug_data_included,
        })
    }

    fn to_built(&self) -> BuiltPlaybookDisplayInfo {
        BuiltPlaybookDisplayInfo {
            identifier: String::new(),
            file_name: self.content_hub_display_name.clone(),
            r#type: self.playbook_type,
            display_name: self.content_hub_display_name.clone(),
            description: self.description.clone(),
            create_time: 0,
            update_time: 0,
            version: 0.0,
            author: self.author.clone(),
            contact_email: self.contact_email.clone(),
            integrations: Vec::new(),
            dependent_playbook_ids: Vec::new(),
            tags: self.tags.clone(),
            source: self.contribution_type,
            verified: self.is_google_verified,
            standalone: self.should_display_in_content_hub,
            has_alert_overview: false,
        }
    }

    /// `is_google_verified` is only written when set.
    fn to_non_built(&self) -> NonBuiltPlaybookDisplayInfo {
        NonBuiltPlaybookDisplayInfo {
            r#type: self.playbook_type,
            content_hub_display_name: self.content_hub_display_name.clone(),
            description: self.description.clone(),
            author: self.author.clone(),
            contact_email: self.contact_email.clone(),
            tags: self.tags.clone(),
            contribution_type: self.contribution_type,
            should_display_in_content_hub: self.should_display_in_content_hub,
            acknowledge_debug_data_included: self.allowed_debug_data,
            is_google_verified: self.is_google_verified.then_some(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mp_core::enums::has_unique_members;
    use serde_json::json;

    #[test]
    fn non_built_round_trip() {
        let non_built = json!({
            "type": "playbook",
            "content_hub_display_name": "Phishing Triage",
            "description": "Triage reported phishing",
            "author": "Example SOC",
            "contact_email": "soc@example.com",
            "tags": ["Email", "Phishing"],
            "contribution_type": "third_party",
            "should_display_in_content_hub": true,
            "acknowledge_debug_data_included": false
        });
        let info = PlaybookDisplayInfo::from_non_built_value(non_built.clone()).unwrap();
        assert_eq!(info.contribution_type, PlaybookContributionType::ThirdParty);
        assert_eq!(info.to_non_built_value().unwrap(), non_built);
    }

    #[test]
    fn contribution_type_is_case_insensitive() {
        let info = PlaybookDisplayInfo::from_non_built_value(json!({
            "type": "BLOCK",
            "content_hub_display_name": "Enrich",
            "description": "",
            "author": "",
            "contact_email": "",
            "contribution_type": "Partner",
            "should_display_in_content_hub": false,
            "acknowledge_debug_data_included": true,
            "is_google_verified": true
        }))
        .unwrap();
        assert_eq!(info.contribution_type, PlaybookContributionType::Partner);
        assert!(info.allowed_debug_data);
        assert!(info.is_google_verified);
    }

    #[test]
    fn built_round_trip_with_platform_defaults() {
        let built = json!({
            "Identifier": "",
            "FileName": "Phishing Triage",
            "Type": 0,
            "DisplayName": "Phishing Triage",
            "Description": "Triage reported phishing",
            "CreateTime": 0,
            "UpdateTime": 0,
            "Version": 0.0,
            "Author": "Example SOC",
            "ContactEmail": "soc@example.com",
            "Integrations": [],
            "DependentPlaybookIds": [],
            "Tags": ["Email"],
            "Source": 2,
            "Verified": false,
            "Standalone": true,
            "HasAlertOverview": false
        });
        let info = PlaybookDisplayInfo::from_built_value(built.clone()).unwrap();
        assert!(!info.allowed_debug_data);
        assert_eq!(info.to_built_value().unwrap(), built);
    }

    #[test]
    fn export_fills_platform_fields() {
        let built = PlaybookDisplayInfo::default().to_built();
        assert_eq!(built.identifier, "");
        assert_eq!(built.create_time, 0);
        assert_eq!(built.version, 0.0);
        assert!(built.integrations.is_empty());
        assert_eq!(built.source, PlaybookContributionType::ThirdParty);
    }

    #[test]
    fn contribution_types_are_unique() {
        assert!(has_unique_members::<PlaybookContributionType>());
    }
}
