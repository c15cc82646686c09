use std::path::Path;
use std::sync::Arc;

use mp_content::integration::PyProject;
use mp_content::release_note::{self, ReleaseNote};
use mp_content::{parser, ContentError};
use mp_core::constants::{MINIMUM_RELEASE_NOTE_VERSION, PROJECT_FILE};

use crate::config::VersionBumpConfig;
use crate::engine::Validator;
use crate::error::ValidationError;
use crate::validators::playbook::{all_at, format_version};
use crate::vcs::ChangeSource;

/// A changed integration raises `project.version` by exactly one and
/// documents the release with notes at that version.
///
/// An integration whose `pyproject.toml` is new on this branch must start
/// at 1.0, and so must every note it ships.
pub struct IntegrationVersionBumpValidation {
    config: VersionBumpConfig,
    changes: Arc<dyn ChangeSource>,
}

/// Compare the project version with the base branch (`None` for a new
/// integration) and check the notes appended on this branch.
pub fn check_integration_version(
    previous: Option<f64>,
    current: f64,
    added_notes: &[ReleaseNote],
) -> Result<(), ValidationError> {
    match previous {
        Some(previous) => {
            let expected = previous + 1.0;
            if current != expected {
                return Err(ValidationError::non_fatal(format!(
                    "The project version must be incremented by exactly 1.0: expected {}, found {}",
                    format_version(expected),
                    format_version(current)
                )));
            }
            if !all_at(added_notes, current) {
                return Err(ValidationError::non_fatal(format!(
                    "The release note's version must match the project version {} in all the \
                     newly added notes.",
                    format_version(current)
                )));
            }
            Ok(())
        }
        None if added_notes.is_empty() => Err(ValidationError::non_fatal(
            "New integration release notes file cannot be empty.",
        )),
        None if current == MINIMUM_RELEASE_NOTE_VERSION
            && all_at(added_notes, MINIMUM_RELEASE_NOTE_VERSION) =>
        {
            Ok(())
        }
        None => Err(ValidationError::non_fatal(format!(
            "New integration version must be initialized to {} in {PROJECT_FILE} and in the \
             release notes.",
            format_version(MINIMUM_RELEASE_NOTE_VERSION)
        ))),
    }
}

fn read(path: &Path) -> Result<String, ContentError> {
    std::fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.to_path_buf(),
        source,
    })
}

impl IntegrationVersionBumpValidation {
    pub fn new(config: VersionBumpConfig, changes: Arc<dyn ChangeSource>) -> Self {
        Self { config, changes }
    }

    fn git_failure(err: impl std::fmt::Display) -> ValidationError {
        ValidationError::non_fatal(format!("Could not compare with the base branch: {err}"))
    }

    fn base_file(
        &self,
        unit: &Path,
        base: &str,
        file: &Path,
    ) -> Result<Option<String>, ValidationError> {
        self.changes.file_at(unit, base, file).map_err(Self::git_failure)
    }
}

impl Validator for IntegrationVersionBumpValidation {
    fn name(&self) -> &str {
        "Integration Version Bump"
    }

    fn run(&self, path: &Path) -> Result<(), ValidationError> {
        let Some(head) = self.config.head_sha.as_deref() else {
            tracing::debug!("no head commit configured, skipping integration version check");
            return Ok(());
        };
        let base = self.config.base_branch.as_str();

        let changed = self
            .changes
            .changed_files(path, base, head)
            .map_err(Self::git_failure)?;
        if changed.is_empty() {
            return Ok(());
        }

        let Some(notes_file) = changed
            .into_iter()
            .find(|p| release_note::is_release_notes_file(p))
        else {
            return Err(ValidationError::fatal(
                "release_notes.yml file must be updated before PR",
            ));
        };

        let project_path = path.join(PROJECT_FILE);
        if !project_path.is_file() {
            return Err(ValidationError::non_fatal(format!(
                "Missing {PROJECT_FILE}; the integration version cannot be checked"
            )));
        }
        let project: PyProject = parser::load_toml_typed(&project_path)?;
        let Some(current) = project.version_number() else {
            return Err(ValidationError::non_fatal(format!(
                "{PROJECT_FILE} must declare a numeric project.version"
            )));
        };

        let notes_path = path.join(&notes_file);
        let notes = release_note::parse_release_notes(&read(&notes_path)?, &notes_path)?;

        let previous_version = match self.base_file(path, base, Path::new(PROJECT_FILE))? {
            Some(text) => parser::parse_toml_typed::<PyProject>(&text, &project_path)?
                .version_number(),
            None => None,
        };
        let previous_count = match self.base_file(path, base, &notes_file)? {
            Some(text) if previous_version.is_some() => {
                release_note::parse_release_notes(&text, &notes_path)?.len()
            }
            _ => 0,
        };
        let added = notes.get(previous_count..).unwrap_or(&[]);
        tracing::debug!(
            ?previous_version,
            current,
            added = added.len(),
            "checking integration version"
        );

        check_integration_version(previous_version, current, added)
    }
}
