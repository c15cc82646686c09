//! The validator contract and the per-unit pipeline.

use std::path::Path;

use crate::error::ValidationError;
use crate::report::{ValidationPhase, ValidationResults};

/// Name of the unit at `path` as shown in reports: its directory name.
pub fn unit_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// A named check over one content-unit directory.
///
/// Implementations hold no per-run state, so one instance can serve any
/// number of units.
pub trait Validator: Send + Sync {
    fn name(&self) -> &str;

    fn run(&self, path: &Path) -> Result<(), ValidationError>;
}

/// An ordered set of validators for one kind of content unit.
///
/// Priority validators run first. The first fatal failure from any validator
/// stops the unit; non-fatal failures are collected and the run continues.
pub struct Pipeline {
    phase: ValidationPhase,
    priority: Vec<Box<dyn Validator>>,
    non_priority: Vec<Box<dyn Validator>>,
}

impl Pipeline {
    pub fn new(priority: Vec<Box<dyn Validator>>, non_priority: Vec<Box<dyn Validator>>) -> Self {
        Self {
            phase: ValidationPhase::PreBuild,
            priority,
            non_priority,
        }
    }

    /// Report results under `phase` instead of pre-build.
    pub fn in_phase(mut self, phase: ValidationPhase) -> Self {
        self.phase = phase;
        self
    }

    pub fn phase(&self) -> ValidationPhase {
        self.phase
    }

    pub fn priority_names(&self) -> Vec<&str> {
        self.priority.iter().map(|v| v.name()).collect()
    }

    pub fn non_priority_names(&self) -> Vec<&str> {
        self.non_priority.iter().map(|v| v.name()).collect()
    }

    /// Run every applicable validator against the unit at `path`.
    pub fn run(&self, unit_name: &str, path: &Path) -> ValidationResults {
        let _span =
            tracing::info_span!("validate", unit = %unit_name, phase = %self.phase).entered();
        let mut results = ValidationResults::new(unit_name, self.phase);

        let ordered = self.priority.iter().chain(self.non_priority.iter());
        for validator in ordered {
            let name = validator.name();
            tracing::debug!(validator = name, "running validator");
            let Err(err) = validator.run(path) else {
                continue;
            };
            results.record(name, &err);
            if err.is_fatal() {
                tracing::error!(validator = name, "fatal validation failure, skipping the rest");
                break;
            }
            tracing::warn!(validator = name, "validation failed");
        }

        tracing::info!(
            success = results.is_success,
            fatal = results.report.failed_fatal_validations.len(),
            non_fatal = results.report.failed_non_fatal_validations.len(),
            "unit validated"
        );
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Scripted {
        name: &'static str,
        outcome: Option<ValidationError>,
        calls: Arc<AtomicUsize>,
    }

    impl Scripted {
        fn boxed(
            name: &'static str,
            outcome: Option<ValidationError>,
        ) -> (Box<dyn Validator>, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            let v = Self {
                name,
                outcome,
                calls: Arc::clone(&calls),
            };
            (Box::new(v), calls)
        }
    }

    impl Validator for Scripted {
        fn name(&self) -> &str {
            self.name
        }

        fn run(&self, _path: &Path) -> Result<(), ValidationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.outcome {
                Some(err) => Err(err.clone()),
                None => Ok(()),
            }
        }
    }

    #[test]
    fn fatal_priority_failure_skips_everything_after_it() {
        let (a, _) = Scripted::boxed("A", Some(ValidationError::fatal("broken")));
        let (b, b_calls) = Scripted::boxed("B", None);
        let (c, c_calls) = Scripted::boxed("C", None);
        let pipeline = Pipeline::new(vec![a, b], vec![c]);

        let results = pipeline.run("unit", Path::new("."));

        assert_eq!(b_calls.load(Ordering::SeqCst), 0);
        assert_eq!(c_calls.load(Ordering::SeqCst), 0);
        assert!(!results.is_success);
        assert_eq!(results.report.failed_fatal_validations.len(), 1);
        assert_eq!(results.report.failed_fatal_validations[0].validation_name, "A");
    }

    #[test]
    fn non_fatal_failures_accumulate() {
        let (p, _) = Scripted::boxed("P", None);
        let (x, _) = Scripted::boxed("X", Some(ValidationError::non_fatal("first")));
        let (y, y_calls) = Scripted::boxed("Y", Some(ValidationError::non_fatal("second")));
        let pipeline = Pipeline::new(vec![p], vec![x, y]);

        let results = pipeline.run("unit", Path::new("."));

        assert_eq!(y_calls.load(Ordering::SeqCst), 1);
        assert!(!results.is_success);
        let infos: Vec<_> = results
            .report
            .failed_non_fatal_validations
            .iter()
            .map(|i| i.info.as_str())
            .collect();
        assert_eq!(infos, ["first", "second"]);
        assert!(results.report.failed_fatal_validations.is_empty());
    }

    #[test]
    fn fatal_non_priority_failure_also_stops() {
        let (x, _) = Scripted::boxed("X", Some(ValidationError::fatal("stop")));
        let (y, y_calls) = Scripted::boxed("Y", None);
        let pipeline = Pipeline::new(vec![], vec![x, y]);

        let results = pipeline.run("unit", Path::new("."));
        assert_eq!(y_calls.load(Ordering::SeqCst), 0);
        assert_eq!(results.report.failed_fatal_validations.len(), 1);
    }

    #[test]
    fn clean_unit_succeeds() {
        let (a, a_calls) = Scripted::boxed("A", None);
        let (b, b_calls) = Scripted::boxed("B", None);
        let pipeline = Pipeline::new(vec![a], vec![b]);

        let results = pipeline.run("unit", Path::new("."));
        assert!(results.is_success);
        assert!(results.report.is_empty());
        assert_eq!(a_calls.load(Ordering::SeqCst) + b_calls.load(Ordering::SeqCst), 2);
        assert_eq!(pipeline.priority_names(), ["A"]);
        assert_eq!(pipeline.non_priority_names(), ["B"]);
        assert_eq!(results.phase, ValidationPhase::PreBuild);
    }

    #[test]
    fn results_carry_the_pipeline_phase() {
        let (a, _) = Scripted::boxed("A", None);
        let pipeline = Pipeline::new(vec![a], vec![]).in_phase(ValidationPhase::Build);
        assert_eq!(pipeline.run("unit", Path::new(".")).phase, ValidationPhase::Build);
    }
}
