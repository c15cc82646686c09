//! Per-integration exemptions from individual rules.
//!
//! Loaded from an optional YAML file; every list defaults to empty except
//! the ping exemptions, which start from the built-in list.

use std::collections::BTreeSet;
use std::path::Path;

use mp_content::{parser, ContentError, ContentResult};
use mp_core::constants::EXCLUDED_INTEGRATIONS_IDS_WITHOUT_PING;
use serde::Deserialize;

fn default_without_ping() -> BTreeSet<String> {
    EXCLUDED_INTEGRATIONS_IDS_WITHOUT_PING
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Exclusions {
    /// Integration identifiers that need no ping action.
    pub integrations_without_ping: BTreeSet<String>,
    /// Integration or connector names that need no TLS parameter.
    pub names_without_verify_ssl: BTreeSet<String>,
    /// Names whose TLS parameter may default to false.
    pub names_where_ssl_default_is_not_true: BTreeSet<String>,
    /// Integration identifiers that need no documentation link.
    pub integrations_without_documentation_link: BTreeSet<String>,
    /// Integration identifiers whose connectors need no mapping rules.
    pub integrations_with_connectors_and_no_mapping: BTreeSet<String>,
    /// Parameter display names accepted despite the naming pattern.
    pub excluded_param_display_names: BTreeSet<String>,
}

impl Default for Exclusions {
    fn default() -> Self {
        Self {
            integrations_without_ping: default_without_ping(),
            names_without_verify_ssl: BTreeSet::new(),
            names_where_ssl_default_is_not_true: BTreeSet::new(),
            integrations_without_documentation_link: BTreeSet::new(),
            integrations_with_connectors_and_no_mapping: BTreeSet::new(),
            excluded_param_display_names: BTreeSet::new(),
        }
    }
}

impl Exclusions {
    /// Load exclusions from `path`. Lists absent from the file keep their
    /// defaults.
    pub fn load(path: &Path) -> ContentResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        parser::parse_yaml_typed(&content, path)
    }
}
