//! Per-user access grants on a playbook.

use mp_core::{Buildable, ConversionError};
use serde::{Deserialize, Serialize};

mp_core::representable_enum! {
    pub enum PlaybookAccessLevel {
        NoAccess = 0 => "no_access",
        View = 1 => "view",
        Edit = 2 => "edit",
    }
}

/// One user's access level on one playbook.
///
/// The playbook id is fixed at construction; permissions belong to exactly
/// one [`PlaybookMetadata`](super::metadata::PlaybookMetadata).
#[derive(Debug, Clone, PartialEq)]
pub struct AccessPermission {
    playbook_id: String,
    pub user: String,
    pub access_level: PlaybookAccessLevel,
}

impl AccessPermission {
    pub fn new(
        playbook_id: impl Into<String>,
        user: impl Into<String>,
        access_level: PlaybookAccessLevel,
    ) -> Self {
        Self {
            playbook_id: playbook_id.into(),
            user: user.into(),
            access_level,
        }
    }

    pub fn playbook_id(&self) -> &str {
        &self.playbook_id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BuiltAccessPermission {
    pub workflow_original_identifier: String,
    pub user: String,
    #[serde(with = "mp_core::enums::code")]
    pub access_level: PlaybookAccessLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NonBuiltAccessPermission {
    pub playbook_id: String,
    pub user: String,
    pub access_level: PlaybookAccessLevel,
}

impl Buildable for AccessPermission {
    const ENTITY: &'static str = "AccessPermission";
    type Built = BuiltAccessPermission;
    type NonBuilt = NonBuiltAccessPermission;

    fn from_built(built: BuiltAccessPermission) -> Result<Self, ConversionError> {
        Ok(Self::new(
            built.workflow_original_identifier,
            built.user,
            built.access_level,
        ))
    }

    fn from_non_built(non_built: NonBuiltAccessPermission) -> Result<Self, ConversionError> {
        Ok(Self::new(
            non_built.playbook_id,
            non_built.user,
            non_built.access_level,
        ))
    }

    fn to_built(&self) -> BuiltAccessPermission {
        BuiltAccessPermission {
            workflow_original_identifier: self.playbook_id.clone(),
            user: self.user.clone(),
            access_level: self.access_level,
        }
    }

    fn to_non_built(&self) -> NonBuiltAccessPermission {
        NonBuiltAccessPermission {
            playbook_id: self.playbook_id.clone(),
            user: self.user.clone(),
            access_level: self.access_level,
        }
    }
}
