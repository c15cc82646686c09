use std::path::Path;

use mp_content::parser;
use mp_content::playbook::Step;
use mp_core::constants::STEPS_DIR;

use crate::engine::Validator;
use crate::error::ValidationError;

pub const ASSIGNED_USERS: &str = "AssignedUsers";
pub const PENDING_ACTION_TIMEOUT: &str = "PendingActionTimeout";
pub const ASYNC_ACTION_TIMEOUT: &str = "AsyncActionTimeout";
pub const ASYNC_POLLING_INTERVAL: &str = "AsyncPollingInterval";

pub const MIN_PENDING_ACTION_TIMEOUT_SECS: i64 = 300;
pub const MAX_ASYNC_ACTION_TIMEOUT_SECS: i64 = 14 * 24 * 60 * 60;
pub const MIN_ASYNC_POLLING_INTERVAL_SECS: i64 = 30;

/// Bounds and cross-field rules on step parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct StepParamsValidation;

fn seconds(name: &str, raw: &str, problems: &mut Vec<String>) -> Option<i64> {
    match raw.trim().parse::<i64>() {
        Ok(v) => Some(v),
        Err(_) => {
            problems.push(format!("{name} must be a whole number of seconds, got {raw:?}."));
            None
        }
    }
}

/// Problems with the parameters of one step; empty when all are valid.
/// Empty values are not checked.
pub fn step_problems(step: &Step) -> Vec<String> {
    let mut problems = Vec::new();
    let mut action_timeout = None;
    let mut polling_interval = None;

    for param in &step.parameters {
        let Some(raw) = param.value.as_deref().filter(|v| !v.is_empty()) else {
            continue;
        };
        match param.name.as_str() {
            ASSIGNED_USERS if step.is_automatic => {
                problems.push("AssignedUsers is not allowed for automatic steps.".to_string());
            }
            PENDING_ACTION_TIMEOUT => {
                if let Some(v) = seconds(PENDING_ACTION_TIMEOUT, raw, &mut problems) {
                    if v < MIN_PENDING_ACTION_TIMEOUT_SECS {
                        problems.push("PendingActionTimeout must be at least 300 seconds.".into());
                    }
                }
            }
            ASYNC_ACTION_TIMEOUT => {
                action_timeout = seconds(ASYNC_ACTION_TIMEOUT, raw, &mut problems);
                if let Some(v) = action_timeout {
                    if !(1..=MAX_ASYNC_ACTION_TIMEOUT_SECS).contains(&v) {
                        problems.push(
                            "AsyncActionTimeout must be a positive number of at most 14 days (in seconds)."
                                .into(),
                        );
                    }
                }
            }
            ASYNC_POLLING_INTERVAL => {
                polling_interval = seconds(ASYNC_POLLING_INTERVAL, raw, &mut problems);
                if let Some(v) = polling_interval {
                    if v < MIN_ASYNC_POLLING_INTERVAL_SECS {
                        problems.push("AsyncPollingInterval must be at least 30 seconds.".into());
                    }
                }
            }
            _ => {}
        }
    }

    if let (Some(interval), Some(timeout)) = (polling_interval, action_timeout) {
        if interval >= timeout {
            problems.push("AsyncPollingInterval must be less than AsyncActionTimeout.".into());
        }
    }
    problems
}

impl Validator for StepParamsValidation {
    fn name(&self) -> &str {
        "Step Parameters Validation"
    }

    fn run(&self, path: &Path) -> Result<(), ValidationError> {
        let steps: Vec<Step> = parser::load_non_built_dir(&path.join(STEPS_DIR))?;

        let mut lines = Vec::new();
        for step in &steps {
            let problems = step_problems(step);
            if !problems.is_empty() {
                lines.push(format!("Step name: {}", step.instance_name));
                lines.extend(problems);
            }
        }

        if lines.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::non_fatal(lines.join("\n")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::playbook::testing::{step, with_param, write_simple_playbook};
    use mp_content::playbook::StepType;

    fn action(name: &str) -> Step {
        step(name, name, StepType::Action)
    }

    #[test]
    fn valid_parameters_pass() {
        let s = with_param(
            with_param(action("Wait"), ASYNC_ACTION_TIMEOUT, "86400"),
            ASYNC_POLLING_INTERVAL,
            "60",
        );
        assert!(step_problems(&s).is_empty());
    }

    #[test]
    fn assigned_users_only_on_manual_steps() {
        let automatic = with_param(action("Assign"), ASSIGNED_USERS, "@Tier1");
        assert_eq!(
            step_problems(&automatic),
            ["AssignedUsers is not allowed for automatic steps."]
        );

        let mut manual = automatic.clone();
        manual.is_automatic = false;
        assert!(step_problems(&manual).is_empty());
    }

    #[test]
    fn bounds_are_enforced() {
        let s = with_param(
            with_param(
                with_param(action("Slow"), PENDING_ACTION_TIMEOUT, "299"),
                ASYNC_ACTION_TIMEOUT,
                "1209601",
            ),
            ASYNC_POLLING_INTERVAL,
            "29",
        );
        let problems = step_problems(&s);
        assert_eq!(problems.len(), 3, "{problems:?}");
        assert!(problems[0].starts_with("PendingActionTimeout"));
        assert!(problems[1].starts_with("AsyncActionTimeout"));
        assert!(problems[2].starts_with("AsyncPollingInterval must be at least"));
    }

    #[test]
    fn polling_interval_must_be_strictly_less_than_timeout() {
        let s = with_param(
            with_param(action("Poll"), ASYNC_ACTION_TIMEOUT, "60"),
            ASYNC_POLLING_INTERVAL,
            "60",
        );
        assert_eq!(
            step_problems(&s),
            ["AsyncPollingInterval must be less than AsyncActionTimeout."]
        );
    }

    #[test]
    fn non_numeric_values_are_reported() {
        let s = with_param(action("Odd"), PENDING_ACTION_TIMEOUT, "five minutes");
        let problems = step_problems(&s);
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("\"five minutes\""));
    }

    #[test]
    fn groups_messages_per_step() {
        let dir = tempfile::tempdir().unwrap();
        write_simple_playbook(
            dir.path(),
            &[
                with_param(action("First"), PENDING_ACTION_TIMEOUT, "10"),
                action("Clean"),
                with_param(action("Second"), ASSIGNED_USERS, "@Admins"),
            ],
        );

        let err = StepParamsValidation.run(dir.path()).unwrap_err();
        assert!(!err.is_fatal());
        assert_eq!(
            err.message(),
            "Step name: First\n\
             PendingActionTimeout must be at least 300 seconds.\n\
             Step name: Second\n\
             AssignedUsers is not allowed for automatic steps."
        );
    }
}
