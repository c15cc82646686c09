//! Release notes (`release_notes.yaml`), shared by playbooks and
//! integrations.
//!
//! The file is a YAML sequence of notes. Notes added in one change form a
//! batch sharing one version, and each batch is exactly `1.0` above the last.

use std::path::{Path, PathBuf};

use mp_core::constants::{MINIMUM_RELEASE_NOTE_VERSION, RELEASE_NOTES_FILES};
use mp_core::{Buildable, ConversionError};
use serde::{Deserialize, Serialize};

use crate::error::{ContentError, ContentResult};
use crate::parser;

#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseNote {
    pub description: String,
    pub deprecated: bool,
    pub new: bool,
    pub item_name: String,
    pub item_type: String,
    /// Unix time in seconds.
    pub publish_time: Option<i64>,
    pub regressive: bool,
    pub removed: bool,
    pub ticket: Option<String>,
    pub version: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BuiltReleaseNote {
    pub change_description: String,
    pub deprecated: bool,
    pub new: bool,
    pub item_name: String,
    pub item_type: String,
    pub publish_time: Option<i64>,
    pub regressive: bool,
    pub removed: bool,
    pub ticket_number: Option<String>,
    pub introduced_in_integration_version: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NonBuiltReleaseNote {
    pub description: String,
    pub deprecated: bool,
    pub integration_version: f64,
    pub item_name: String,
    pub item_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_time: Option<i64>,
    pub regressive: bool,
    pub removed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_number: Option<String>,
    pub new: bool,
}

fn check_version(version: f64) -> Result<f64, ConversionError> {
    if version.is_finite() && version >= MINIMUM_RELEASE_NOTE_VERSION {
        Ok(version)
    } else {
        Err(ConversionError::InvalidValue {
            entity: ReleaseNote::ENTITY,
            field: "version",
            reason: format!("must be at least {MINIMUM_RELEASE_NOTE_VERSION:.1}, found {version}"),
        })
    }
}

impl Buildable for ReleaseNote {
    const ENTITY: &'static str = "ReleaseNote";
    type Built = BuiltReleaseNote;
    type NonBuilt = NonBuiltReleaseNote;

    fn from_built(built: BuiltReleaseNote) -> Result<Self, ConversionError> {
        Ok(Self {
            version: check_version(built.introduced_in_integration_version)?,
            description: built.change_description,
            deprecated: built.deprecated,
            new: built.new,
            item_name: built.item_name,
            item_type: built.item_type,
            publish_time: built.publish_time,
            regressive: built.regressive,
            removed: built.removed,
            ticket: built.ticket_number,
        })
    }

    fn from_non_built(non_built: NonBuiltReleaseNote) -> Result<Self, ConversionError> {
        Ok(Self {
            version: check_version(non_built.integration_version)?,
            description: non_built.description,
            deprecated: non_built.deprecated,
            new: non_built.new,
            item_name: non_built.item_name,
            item_type: non_built.item_type,
            publish_time: non_built.publish_time,
            regressive: non_built.regressive,
            removed: non_built.removed,
            ticket: non_built.ticket_number,
        })
    }

    fn to_built(&self) -> BuiltReleaseNote {
        BuiltReleaseNote {
            change_description: self.description.clone(),
            deprecated: self.deprecated,
            new: self.new,
            item_name: self.item_name.clone(),
            item_type: self.item_type.clone(),
            publish_time: self.publish_time,
            regressive: self.regressive,
            removed: self.removed,
            ticket_number: self.ticket.clone(),
            introduced_in_integration_version: self.version,
        }
    }

    fn to_non_built(&self) -> NonBuiltReleaseNote {
        NonBuiltReleaseNote {
            description: self.description.clone(),
            deprecated: self.deprecated,
            integration_version: self.version,
            item_name: self.item_name.clone(),
            item_type: self.item_type.clone(),
            publish_time: self.publish_time,
            regressive: self.regressive,
            removed: self.removed,
            ticket_number: self.ticket.clone(),
            new: self.new,
        }
    }
}

/// Path of the release-notes file in `unit`, if one exists.
pub fn release_notes_path(unit: &Path) -> Option<PathBuf> {
    RELEASE_NOTES_FILES
        .iter()
        .map(|name| unit.join(name))
        .find(|path| path.is_file())
}

/// True when `path` names a release-notes file.
pub fn is_release_notes_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| RELEASE_NOTES_FILES.contains(&n))
}

/// Parse release notes from YAML text. An empty document is an empty list.
pub fn parse_release_notes(content: &str, path: &Path) -> ContentResult<Vec<ReleaseNote>> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    let notes: Option<Vec<NonBuiltReleaseNote>> = parser::parse_yaml_typed(content, path)?;
    notes
        .unwrap_or_default()
        .into_iter()
        .map(|n| {
            ReleaseNote::from_non_built(n).map_err(|source| ContentError::Conversion {
                path: path.to_path_buf(),
                source,
            })
        })
        .collect()
}

/// Load the release notes of a content unit. A unit without a
/// release-notes file has none.
pub fn load_release_notes(unit: &Path) -> ContentResult<Vec<ReleaseNote>> {
    let Some(path) = release_notes_path(unit) else {
        return Ok(Vec::new());
    };
    let content = std::fs::read_to_string(&path).map_err(|e| ContentError::Io {
        path: path.clone(),
        source: e,
    })?;
    parse_release_notes(&content, &path)
}
