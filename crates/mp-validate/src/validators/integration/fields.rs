//! Naming rules for integration, script and parameter names.

use std::path::Path;
use std::sync::Arc;

use mp_content::integration::ComponentDefinition;
use mp_content::Integration;
use mp_core::constants::{METADATA_NAME_PATTERN, PARAM_NAME_PATTERN};
use regex::Regex;

use crate::engine::Validator;
use crate::error::ValidationError;
use crate::exclusions::Exclusions;

/// Names use letters, digits, hyphens and whitespace; parameter names may
/// also contain apostrophes.
pub struct FieldsValidation {
    exclusions: Arc<Exclusions>,
}

struct NamePatterns {
    metadata: Regex,
    param: Regex,
}

fn compile(pattern: &str) -> Result<Regex, ValidationError> {
    Regex::new(pattern)
        .map_err(|e| ValidationError::fatal(format!("invalid name pattern {pattern}: {e}")))
}

impl FieldsValidation {
    pub fn new(exclusions: Arc<Exclusions>) -> Self {
        Self { exclusions }
    }

    fn param_name_ok(&self, patterns: &NamePatterns, name: &str) -> bool {
        patterns.param.is_match(name) || self.exclusions.excluded_param_display_names.contains(name)
    }

    fn check_components(
        &self,
        patterns: &NamePatterns,
        kind: &str,
        components: &[ComponentDefinition],
        problems: &mut Vec<String>,
    ) {
        for component in components {
            if !patterns.metadata.is_match(&component.name) {
                problems.push(format!(
                    "{kind} name: {} does not match the regex: {METADATA_NAME_PATTERN}",
                    component.name
                ));
            }
            for param in &component.parameters {
                if !self.param_name_ok(patterns, &param.name) {
                    problems.push(format!(
                        "{kind} Parameter name: {} does not match the regex: {PARAM_NAME_PATTERN}",
                        param.name
                    ));
                }
            }
        }
    }
}

impl Validator for FieldsValidation {
    fn name(&self) -> &str {
        "Fields Validation"
    }

    fn run(&self, path: &Path) -> Result<(), ValidationError> {
        let patterns = NamePatterns {
            metadata: compile(METADATA_NAME_PATTERN)?,
            param: compile(PARAM_NAME_PATTERN)?,
        };
        let integration = Integration::from_non_built_path(path)?;

        let mut problems = Vec::new();
        self.check_components(&patterns, "Action", &integration.actions, &mut problems);
        self.check_components(&patterns, "Connector", &integration.connectors, &mut problems);
        self.check_components(&patterns, "Job", &integration.jobs, &mut problems);
        if !patterns.metadata.is_match(integration.name()) {
            problems.push(format!(
                "Integration name: {} does not match the regex: {METADATA_NAME_PATTERN}",
                integration.name()
            ));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::non_fatal(problems.join("\n")))
        }
    }
}
