use std::collections::HashSet;
use std::path::Path;

use mp_content::parser;
use mp_content::playbook::Step;
use mp_core::constants::STEPS_DIR;

use crate::engine::Validator;
use crate::error::ValidationError;

/// Every for-each start step is closed by an end step and vice versa.
///
/// Only counts and start-id membership are checked; the relative order of
/// two loops is not, so interleaved pairs pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoopStepsValidation;

/// Problems with the loop steps of `steps`, in step order, followed by the
/// overall count mismatch if any.
pub fn loop_problems(steps: &[Step]) -> Vec<String> {
    let mut balance: i64 = 0;
    let mut closed: HashSet<&str> = HashSet::new();
    for step in steps {
        if step.is_start_loop() {
            balance += 1;
        } else if step.is_end_loop() {
            balance -= 1;
            if let Some(id) = step.start_loop_step_id.as_deref() {
                closed.insert(id);
            }
        }
    }

    let mut problems: Vec<String> = steps
        .iter()
        .filter(|s| s.is_start_loop() && !closed.contains(s.identifier.as_str()))
        .map(|s| {
            format!(
                "Step <{}> is missing a matching end loop step",
                s.instance_name
            )
        })
        .collect();

    if balance > 0 {
        problems.push(format!("Playbook is missing {balance} end loop steps"));
    } else if balance < 0 {
        problems.push(format!("Playbook is missing {} start loop steps", -balance));
    }
    problems
}

impl Validator for LoopStepsValidation {
    fn name(&self) -> &str {
        "Loop Steps Validation"
    }

    fn run(&self, path: &Path) -> Result<(), ValidationError> {
        let steps: Vec<Step> = parser::load_non_built_dir(&path.join(STEPS_DIR))?;
        let problems = loop_problems(&steps);
        if problems.is_empty() {
            return Ok(());
        }
        Err(ValidationError::fatal(problems.join("\n")))
    }
}
