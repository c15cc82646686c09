use std::path::Path;

use mp_content::{ContentError, Integration};
use mp_core::constants::{DEFINITION_FILE, PYTHON_VERSION_FILE};

use crate::engine::Validator;
use crate::error::ValidationError;

/// The integration pins its interpreter in `.python-version`, and the pin
/// agrees with `python_version` in the definition when that is set.
#[derive(Debug, Clone, Copy, Default)]
pub struct PythonVersionFileValidation;

impl Validator for PythonVersionFileValidation {
    fn name(&self) -> &str {
        "Python Version File Validation"
    }

    fn run(&self, path: &Path) -> Result<(), ValidationError> {
        let file = path.join(PYTHON_VERSION_FILE);
        if !file.is_file() {
            return Err(ValidationError::non_fatal(format!(
                "Missing {PYTHON_VERSION_FILE} file"
            )));
        }
        let pinned = std::fs::read_to_string(&file).map_err(|source| ContentError::Io {
            path: file.clone(),
            source,
        })?;
        let pinned = pinned.trim();

        let integration = Integration::from_non_built_path(path)?;
        match integration.definition.python_version_text() {
            Some(declared) if declared != pinned => Err(ValidationError::non_fatal(format!(
                "Make sure the version in the {PYTHON_VERSION_FILE} file ({pinned}) matches \
                 python_version in {DEFINITION_FILE} ({declared})"
            ))),
            _ => Ok(()),
        }
    }
}
