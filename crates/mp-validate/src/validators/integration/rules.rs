//! Presence rules: ping action, mapping rules, documentation link and SDK
//! dependencies.

use std::path::Path;
use std::sync::Arc;

use mp_content::Integration;
use mp_core::constants::{MAPPING_RULES_FILE, PING_ACTION_NAME, PROJECT_FILE, REQUIRED_SDK_PACKAGES};
use url::Url;

use crate::engine::{unit_name, Validator};
use crate::error::ValidationError;
use crate::exclusions::Exclusions;

/// Every integration ships a connectivity test action.
pub struct PingActionValidation {
    exclusions: Arc<Exclusions>,
}

impl PingActionValidation {
    pub fn new(exclusions: Arc<Exclusions>) -> Self {
        Self { exclusions }
    }
}

impl Validator for PingActionValidation {
    fn name(&self) -> &str {
        "Ping Action Validation"
    }

    fn run(&self, path: &Path) -> Result<(), ValidationError> {
        let integration = Integration::from_non_built_path(path)?;
        if self
            .exclusions
            .integrations_without_ping
            .contains(integration.identifier())
            || integration.has_action(PING_ACTION_NAME)
        {
            return Ok(());
        }
        Err(ValidationError::non_fatal(format!(
            "Integration '{}' doesn't implement a '{PING_ACTION_NAME}' action",
            unit_name(path)
        )))
    }
}

/// Integrations with connectors map their events onto the ontology.
pub struct MappingRulesValidation {
    exclusions: Arc<Exclusions>,
}

impl MappingRulesValidation {
    pub fn new(exclusions: Arc<Exclusions>) -> Self {
        Self { exclusions }
    }
}

impl Validator for MappingRulesValidation {
    fn name(&self) -> &str {
        "Mapping Rules Validation"
    }

    fn run(&self, path: &Path) -> Result<(), ValidationError> {
        let integration = Integration::from_non_built_path(path)?;
        if integration.connectors.is_empty()
            || integration.has_mapping_rules
            || self
                .exclusions
                .integrations_with_connectors_and_no_mapping
                .contains(integration.identifier())
        {
            return Ok(());
        }
        Err(ValidationError::non_fatal(format!(
            "Integration '{}' has connectors but no {MAPPING_RULES_FILE} file",
            unit_name(path)
        )))
    }
}

/// The definition links to user documentation over http(s).
pub struct DocumentationLinkValidation {
    exclusions: Arc<Exclusions>,
}

impl DocumentationLinkValidation {
    pub fn new(exclusions: Arc<Exclusions>) -> Self {
        Self { exclusions }
    }
}

/// Why `link` is not a usable documentation link, if it is not.
pub fn documentation_link_problem(link: Option<&str>) -> Option<String> {
    let link = match link.map(str::trim) {
        None | Some("") => return Some("is missing a documentation link".to_string()),
        Some(link) => link,
    };
    match Url::parse(link) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => None,
        Ok(url) => Some(format!(
            "has a documentation link with unsupported scheme '{}': {link}",
            url.scheme()
        )),
        Err(e) => Some(format!("has an invalid documentation link {link:?}: {e}")),
    }
}

impl Validator for DocumentationLinkValidation {
    fn name(&self) -> &str {
        "Documentation Link Validation"
    }

    fn run(&self, path: &Path) -> Result<(), ValidationError> {
        let integration = Integration::from_non_built_path(path)?;
        if self
            .exclusions
            .integrations_without_documentation_link
            .contains(integration.identifier())
        {
            return Ok(());
        }
        match documentation_link_problem(integration.definition.documentation_link.as_deref()) {
            None => Ok(()),
            Some(problem) => Err(ValidationError::non_fatal(format!(
                "Integration '{}' {problem}",
                unit_name(path)
            ))),
        }
    }
}

/// Integrations that run connectors or jobs depend on the SDK packages.
#[derive(Debug, Clone, Copy, Default)]
pub struct DependenciesValidation;

impl Validator for DependenciesValidation {
    fn name(&self) -> &str {
        "Dependencies Validation"
    }

    fn run(&self, path: &Path) -> Result<(), ValidationError> {
        let integration = Integration::from_non_built_path(path)?;
        if integration.connectors.is_empty() && integration.jobs.is_empty() {
            return Ok(());
        }
        let name = unit_name(path);
        let Some(project) = &integration.project else {
            return Err(ValidationError::non_fatal(format!(
                "Integration '{name}' has connectors or jobs but no {PROJECT_FILE}"
            )));
        };
        let missing: Vec<&str> = REQUIRED_SDK_PACKAGES
            .iter()
            .copied()
            .filter(|pkg| !project.declares(pkg))
            .collect();
        if missing.is_empty() {
            return Ok(());
        }
        Err(ValidationError::non_fatal(format!(
            "Integration '{name}' must declare {} in the {PROJECT_FILE} dependencies",
            missing.join(", ")
        )))
    }
}
