use std::path::Path;

use mp_core::constants::{DEFINITION_FILE, DISPLAY_INFO_FILE, STEPS_DIR};

use crate::engine::Validator;
use crate::error::ValidationError;

/// The playbook directory has the files every later check reads.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaybookStructureValidation;

impl Validator for PlaybookStructureValidation {
    fn name(&self) -> &str {
        "Playbook Structure Validation"
    }

    fn run(&self, path: &Path) -> Result<(), ValidationError> {
        if !path.is_dir() {
            return Err(ValidationError::fatal(format!(
                "{} is not a playbook directory",
                path.display()
            )));
        }

        let mut problems = Vec::new();
        for file in [DEFINITION_FILE, DISPLAY_INFO_FILE] {
            if !path.join(file).is_file() {
                problems.push(format!("Missing required file: {file}"));
            }
        }
        let steps = path.join(STEPS_DIR);
        if steps.exists() && !steps.is_dir() {
            problems.push(format!("'{STEPS_DIR}' must be a directory"));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::fatal(problems.join("\n")))
        }
    }
}
