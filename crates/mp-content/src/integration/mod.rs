//! # Integrations
//!
//! A non-built integration is a directory:
//!
//! ```text
//! <integration>/
//! ├── definition.yaml                   IntegrationDefinition
//! ├── release_notes.yaml                [ReleaseNote] (read on demand)
//! ├── .python-version                   interpreter version (read on demand)
//! ├── integration_mapping_rules.yaml    ontology mapping (presence only)
//! ├── pyproject.toml                    PyProject (optional)
//! ├── actions/*.yaml                    ComponentDefinition
//! ├── connectors/*.yaml                 ComponentDefinition
//! └── jobs/*.yaml                       ComponentDefinition
//! ```

pub mod component;
pub mod project;

use std::path::Path;

use mp_core::constants::{
    ACTIONS_DIR, CONNECTORS_DIR, DEFINITION_FILE, JOBS_DIR, MAPPING_RULES_FILE, PROJECT_FILE,
};

use crate::error::ContentResult;
use crate::parser;

pub use component::{ComponentDefinition, IntegrationDefinition, ScriptParameter};
pub use project::PyProject;

/// An integration with the script definitions the validators inspect.
#[derive(Debug, Clone, PartialEq)]
pub struct Integration {
    pub definition: IntegrationDefinition,
    pub actions: Vec<ComponentDefinition>,
    pub connectors: Vec<ComponentDefinition>,
    pub jobs: Vec<ComponentDefinition>,
    pub has_mapping_rules: bool,
    pub project: Option<PyProject>,
}

fn load_components(dir: &Path) -> ContentResult<Vec<ComponentDefinition>> {
    parser::definition_files(dir)?
        .iter()
        .map(|path| parser::load_yaml_typed(path))
        .collect()
}

impl Integration {
    pub fn identifier(&self) -> &str {
        &self.definition.identifier
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    /// Read a non-built integration directory. Only `definition.yaml` is
    /// required. Release notes are not read here; the rules that need them
    /// load them through [`crate::release_note::load_release_notes`].
    pub fn from_non_built_path(path: &Path) -> ContentResult<Self> {
        let _span = tracing::debug_span!("load_integration", path = %path.display()).entered();

        let project_path = path.join(PROJECT_FILE);
        let project = if project_path.is_file() {
            Some(parser::load_toml_typed(&project_path)?)
        } else {
            None
        };

        let integration = Self {
            definition: parser::load_yaml_typed(&path.join(DEFINITION_FILE))?,
            actions: load_components(&path.join(ACTIONS_DIR))?,
            connectors: load_components(&path.join(CONNECTORS_DIR))?,
            jobs: load_components(&path.join(JOBS_DIR))?,
            has_mapping_rules: path.join(MAPPING_RULES_FILE).is_file(),
            project,
        };
        tracing::debug!(
            actions = integration.actions.len(),
            connectors = integration.connectors.len(),
            jobs = integration.jobs.len(),
            "integration loaded"
        );
        Ok(integration)
    }

    /// Every action, connector and job, in that order.
    pub fn components(&self) -> impl Iterator<Item = &ComponentDefinition> {
        self.actions
            .iter()
            .chain(self.connectors.iter())
            .chain(self.jobs.iter())
    }

    pub fn has_action(&self, name: &str) -> bool {
        self.actions.iter().any(|a| a.name == name)
    }
}
