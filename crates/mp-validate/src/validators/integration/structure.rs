use std::path::Path;

use mp_core::constants::{ACTIONS_DIR, DEFINITION_FILE};

use crate::engine::Validator;
use crate::error::ValidationError;

/// The integration directory has a definition file and an actions directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegrationStructureValidation;

impl Validator for IntegrationStructureValidation {
    fn name(&self) -> &str {
        "Integration Structure Validation"
    }

    fn run(&self, path: &Path) -> Result<(), ValidationError> {
        let mut problems = Vec::new();
        if !path.join(DEFINITION_FILE).is_file() {
            problems.push(format!("Missing required file: {DEFINITION_FILE}"));
        }
        if !path.join(ACTIONS_DIR).is_dir() {
            problems.push(format!("Missing required directory: {ACTIONS_DIR}/"));
        }
        if problems.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::fatal(problems.join("\n")))
        }
    }
}
