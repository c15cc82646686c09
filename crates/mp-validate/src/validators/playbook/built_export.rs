use std::path::Path;

use mp_content::Playbook;
use mp_core::{Buildable, ConversionError};

use crate::engine::Validator;
use crate::error::ValidationError;

/// The playbook converts to its platform export and reads back unchanged.
///
/// The export is produced, re-imported and exported again; both exports
/// must be identical. Display info and release notes are not part of the
/// export and are not compared.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltExportValidation;

fn conversion_failure(stage: &str, err: ConversionError) -> ValidationError {
    ValidationError::fatal(format!("Could not {stage} the built playbook: {err}"))
}

impl Validator for BuiltExportValidation {
    fn name(&self) -> &str {
        "Built Export Validation"
    }

    fn run(&self, path: &Path) -> Result<(), ValidationError> {
        let playbook = Playbook::from_non_built_path(path)?;
        let built = playbook
            .to_built_value()
            .map_err(|e| conversion_failure("export", e))?;
        let reloaded =
            Playbook::from_built_value(built.clone()).map_err(|e| conversion_failure("import", e))?;
        let rebuilt = reloaded
            .to_built_value()
            .map_err(|e| conversion_failure("re-export", e))?;

        let mut differing = Vec::new();
        if reloaded.metadata != playbook.metadata {
            differing.push("definition");
        }
        if reloaded.steps != playbook.steps {
            differing.push("steps");
        }
        if reloaded.triggers != playbook.triggers {
            differing.push("triggers");
        }
        if reloaded.overviews != playbook.overviews {
            differing.push("overviews");
        }
        if reloaded.widgets != playbook.widgets {
            differing.push("widgets");
        }
        if rebuilt != built {
            differing.push("export");
        }

        if differing.is_empty() {
            tracing::debug!(steps = playbook.steps.len(), "built export is stable");
            return Ok(());
        }
        Err(ValidationError::fatal(format!(
            "The built playbook does not read back unchanged: {} differ",
            differing.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::playbook::testing::{
        end_loop, start_loop, step, with_debug_data, with_param, write_simple_playbook,
    };
    use mp_content::playbook::StepType;

    #[test]
    fn typical_playbook_exports_stably() {
        let dir = tempfile::tempdir().unwrap();
        write_simple_playbook(
            dir.path(),
            &[
                with_param(step("s1", "Enrich", StepType::Action), "Entity", "[Event.src]"),
                with_debug_data(step("s2", "Notify", StepType::Action)),
                start_loop("l1", "Start Loop"),
                end_loop("l2", "End Loop", "l1"),
            ],
        );
        assert_eq!(BuiltExportValidation.run(dir.path()), Ok(()));
    }

    #[test]
    fn unloadable_playbook_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut container = step("p1", "Parallel", StepType::ParallelActionsContainer);
        container.parallel_actions = (0..6)
            .map(|i| step(&format!("a{i}"), &format!("Action {i}"), StepType::Action))
            .collect();
        write_simple_playbook(dir.path(), &[container]);

        let err = BuiltExportValidation.run(dir.path()).unwrap_err();
        assert!(err.is_fatal());
        assert!(err.message().contains("parallel"), "{}", err.message());
    }
}
