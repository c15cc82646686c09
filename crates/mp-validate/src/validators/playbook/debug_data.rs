use std::path::Path;

use mp_content::Playbook;

use crate::engine::Validator;
use crate::error::ValidationError;

/// Simulator leftovers must not ship.
///
/// Steps may carry captured debug data only when the display info
/// acknowledges it, and neither the playbook simulator nor per-step mock
/// mode may be left enabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct DebugDataValidation;

pub fn debug_data_problems(playbook: &Playbook) -> Vec<String> {
    let with_data: Vec<_> = playbook
        .steps
        .iter()
        .filter(|s| s.step_debug_data.is_some())
        .collect();

    let mut problems = Vec::new();
    if !with_data.is_empty() && !playbook.display_info.allowed_debug_data {
        problems.push(
            "The playbook contains debug data, but 'acknowledge_debug_data_included' is set to \
             false in the display info file. Set it to true to allow this data."
                .to_string(),
        );
        problems.extend(
            with_data
                .iter()
                .map(|s| format!("Step <{}> contains debug data.", s.instance_name)),
        );
    }

    if playbook.metadata.is_debug_mode {
        problems.push(
            "Playbook Simulator (definition.yaml/'is_debug_mode') cannot be enabled. \
             Please disable it."
                .to_string(),
        );
    }

    problems.extend(
        playbook
            .steps
            .iter()
            .filter(|s| s.is_debug_mock_data)
            .map(|s| {
                format!(
                    "Step <{}> debug mode cannot be enabled. Please disable it.",
                    s.instance_name
                )
            }),
    );
    problems
}

impl Validator for DebugDataValidation {
    fn name(&self) -> &str {
        "Debug Data Validation"
    }

    fn run(&self, path: &Path) -> Result<(), ValidationError> {
        let playbook = Playbook::from_non_built_path(path)?;
        let problems = debug_data_problems(&playbook);
        if problems.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::non_fatal(problems.join("\n")))
        }
    }
}
