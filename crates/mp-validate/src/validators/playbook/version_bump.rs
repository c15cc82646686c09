use std::path::Path;
use std::sync::Arc;

use mp_content::release_note::{self, ReleaseNote};
use mp_content::ContentError;
use mp_core::constants::MINIMUM_RELEASE_NOTE_VERSION;

use crate::config::VersionBumpConfig;
use crate::engine::Validator;
use crate::error::ValidationError;
use crate::vcs::ChangeSource;

/// A changed playbook ships a correctly versioned release note.
///
/// The unit is compared with the base branch. If anything changed, the
/// release-notes file must be among the changes; notes appended in this
/// change must all carry the previous last version plus one, and a file
/// new on this branch must start at 1.0.
pub struct VersionBumpValidation {
    config: VersionBumpConfig,
    changes: Arc<dyn ChangeSource>,
}

/// `2.0` rather than `2`.
pub(crate) fn format_version(version: f64) -> String {
    if version.fract() == 0.0 {
        format!("{version:.1}")
    } else {
        version.to_string()
    }
}

pub(crate) fn all_at(notes: &[ReleaseNote], version: f64) -> bool {
    notes.iter().all(|n| n.version == version)
}

/// Compare the notes on this branch with those on the base branch
/// (`None` when the file is new). A base file without notes counts as new.
pub fn check_release_notes(
    previous: Option<&[ReleaseNote]>,
    current: &[ReleaseNote],
) -> Result<(), ValidationError> {
    let previous = previous.unwrap_or(&[]);
    match previous.last() {
        Some(last) => {
            let expected = last.version + 1.0;
            let added = current.get(previous.len()..).unwrap_or(&[]);
            if all_at(added, expected) {
                Ok(())
            } else {
                Err(ValidationError::non_fatal(format!(
                    "The release note's version must be incremented to {} and be consistent \
                     in all the newly added notes.",
                    format_version(expected)
                )))
            }
        }
        None if current.is_empty() => Err(ValidationError::non_fatal(
            "New playbook release notes file cannot be empty.",
        )),
        None if all_at(current, MINIMUM_RELEASE_NOTE_VERSION) => Ok(()),
        None => Err(ValidationError::non_fatal(format!(
            "New playbook release notes version must be initialized to {}.",
            format_version(MINIMUM_RELEASE_NOTE_VERSION)
        ))),
    }
}

impl VersionBumpValidation {
    pub fn new(config: VersionBumpConfig, changes: Arc<dyn ChangeSource>) -> Self {
        Self { config, changes }
    }

    fn git_failure(err: impl std::fmt::Display) -> ValidationError {
        ValidationError::non_fatal(format!("Could not compare with the base branch: {err}"))
    }

    fn read_notes(content: &str, path: &Path) -> Result<Vec<ReleaseNote>, ContentError> {
        release_note::parse_release_notes(content, path)
    }
}

impl Validator for VersionBumpValidation {
    fn name(&self) -> &str {
        "Playbook Version Bump"
    }

    fn run(&self, path: &Path) -> Result<(), ValidationError> {
        let Some(head) = self.config.head_sha.as_deref() else {
            tracing::debug!("no head commit configured, skipping release-note check");
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

        let absolute = path.join(&notes_file);
        let current_text = std::fs::read_to_string(&absolute).map_err(|source| {
            ContentError::Io {
                path: absolute.clone(),
                source,
            }
        })?;
        let current = Self::read_notes(&current_text, &absolute)?;

        let previous = match self
            .changes
            .file_at(path, base, &notes_file)
            .map_err(Self::git_failure)?
        {
            Some(text) => Some(Self::read_notes(&text, &absolute)?),
            None => None,
        };
        check_release_notes(previous.as_deref(), &current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notes(versions: &[f64]) -> Vec<ReleaseNote> {
        versions
            .iter()
            .map(|&version| ReleaseNote {
                description: "change".into(),
                deprecated: false,
                new: false,
                item_name: "Phishing Triage".into(),
                item_type: "Playbook".into(),
                publish_time: None,
                regressive: false,
                removed: false,
                ticket: None,
                version,
            })
            .collect()
    }

    #[test]
    fn next_version_passes() {
        let previous = notes(&[1.0]);
        let current = notes(&[1.0, 2.0, 2.0]);
        assert_eq!(check_release_notes(Some(&previous[..]), &current), Ok(()));
    }

    #[test]
    fn mixed_versions_name_the_expected_one() {
        let previous = notes(&[1.0]);
        let current = notes(&[1.0, 2.0, 3.0]);
        let err = check_release_notes(Some(&previous[..]), &current).unwrap_err();
        assert!(!err.is_fatal());
        assert!(err.message().contains("incremented to 2.0"), "{}", err.message());
    }

    #[test]
    fn no_added_notes_passes() {
        let previous = notes(&[1.0, 2.0]);
        let current = notes(&[1.0, 2.0]);
        assert_eq!(check_release_notes(Some(&previous[..]), &current), Ok(()));
    }

    #[test]
    fn new_file_starts_at_one() {
        assert_eq!(check_release_notes(None, &notes(&[1.0, 1.0])), Ok(()));
        let err = check_release_notes(None, &notes(&[2.0])).unwrap_err();
        assert!(err.message().contains("initialized to 1.0"));
        let err = check_release_notes(None, &[]).unwrap_err();
        assert!(err.message().contains("cannot be empty"));
    }

    #[test]
    fn fractional_versions_format_plainly() {
        assert_eq!(format_version(2.0), "2.0");
        assert_eq!(format_version(2.5), "2.5");
    }
}
