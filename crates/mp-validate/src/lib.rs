//! # mp-validate
//!
//! Validation of marketplace content units.
//!
//! A [`Validator`] checks one aspect of a unit directory and fails with one
//! of two kinds of [`ValidationError`]: non-fatal failures are collected and
//! the run continues, fatal ones stop the unit. A [`Pipeline`] runs a fixed
//! list of priority validators followed by the rest and produces
//! [`ValidationResults`] for the unit. Playbooks that pass pre-build are
//! also checked in the build phase unless the run is limited to pre-build.
//!
//! Validators receive everything they depend on through their constructors.
//! The release-note checks talk to version control through [`ChangeSource`]
//! so it can be exercised without a repository.

pub mod config;
pub mod engine;
pub mod error;
pub mod exclusions;
pub mod report;
pub mod validators;
pub mod vcs;

use std::path::Path;
use std::sync::Arc;

pub use config::{ConfigError, RunConfig, VersionBumpConfig};
pub use engine::{Pipeline, Validator};
pub use error::{GitError, ValidationError};
pub use exclusions::Exclusions;
pub use report::{FullReport, ValidationIssue, ValidationPhase, ValidationReport, ValidationResults};
pub use vcs::{ChangeSource, GitCli};

use mp_content::ContentKind;

/// Every pipeline of one run.
pub struct Validations {
    playbooks: Pipeline,
    integrations: Pipeline,
    playbook_build: Pipeline,
    only_pre_build: bool,
}

impl Validations {
    pub fn new(
        config: &RunConfig,
        exclusions: Arc<Exclusions>,
        changes: Arc<dyn ChangeSource>,
    ) -> Self {
        Self {
            playbooks: validators::playbook::pipeline(config.version_bump(), Arc::clone(&changes)),
            integrations: validators::integration::pipeline(
                exclusions,
                config.version_bump(),
                changes,
            ),
            playbook_build: validators::playbook::build_pipeline(),
            only_pre_build: config.only_pre_build,
        }
    }

    /// The pipeline validating `kind` in `phase`, if there is one.
    pub fn pipeline(&self, phase: ValidationPhase, kind: ContentKind) -> Option<&Pipeline> {
        match (phase, kind) {
            (ValidationPhase::PreBuild, ContentKind::Playbook) => Some(&self.playbooks),
            (ValidationPhase::PreBuild, ContentKind::Integration) => Some(&self.integrations),
            (ValidationPhase::Build, ContentKind::Playbook) if !self.only_pre_build => {
                Some(&self.playbook_build)
            }
            _ => None,
        }
    }

    /// Validate the unit at `path`, reported under its directory name.
    ///
    /// Later phases run only when the earlier ones recorded no fatal failure.
    pub fn run(&self, kind: ContentKind, path: &Path) -> FullReport {
        let name = engine::unit_name(path);
        let mut report = FullReport::new();
        for phase in [ValidationPhase::PreBuild, ValidationPhase::Build] {
            let Some(pipeline) = self.pipeline(phase, kind) else {
                continue;
            };
            let results = pipeline.run(&name, path);
            let stop = !results.report.failed_fatal_validations.is_empty();
            report.entry(phase).or_default().push(results);
            if stop {
                break;
            }
        }
        report
    }

    /// Validate every unit in order and merge the results.
    pub fn run_all<'a, I>(&self, units: I) -> FullReport
    where
        I: IntoIterator<Item = (ContentKind, &'a Path)>,
    {
        let mut full = FullReport::new();
        for (kind, path) in units {
            report::combine(&mut full, self.run(kind, path));
        }
        full
    }
}
