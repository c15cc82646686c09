//! Validation outcomes and external-command errors.

use std::path::PathBuf;
use std::time::Duration;

use mp_content::ContentError;
use thiserror::Error;

/// Why a validator rejected a content unit.
///
/// The kind decides what the pipeline does next: a non-fatal failure is
/// recorded and the remaining validators still run, a fatal one stops the
/// unit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A structural precondition is broken; further checks are meaningless.
    #[error("{0}")]
    Fatal(String),

    /// A rule is violated but the unit can still be checked for other issues.
    #[error("{0}")]
    NonFatal(String),
}

impl ValidationError {
    pub fn fatal(msg: impl Into<String>) -> Self {
        Self::Fatal(msg.into())
    }

    pub fn non_fatal(msg: impl Into<String>) -> Self {
        Self::NonFatal(msg.into())
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Fatal(msg) | Self::NonFatal(msg) => msg,
        }
    }
}

/// Content that cannot be loaded cannot be validated: a loader failure
/// inside a validator aborts the unit.
impl From<ContentError> for ValidationError {
    fn from(err: ContentError) -> Self {
        Self::Fatal(err.to_string())
    }
}

/// Failures of the `git` subprocess.
#[derive(Debug, Error)]
pub enum GitError {
    #[error("failed to spawn git in {dir}: {source}")]
    Spawn {
        dir: PathBuf,
        source: std::io::Error,
    },

    #[error("git {args} exited with {status}: {stderr}")]
    Failed {
        args: String,
        status: String,
        stderr: String,
    },

    #[error("failed to read output of git {args}: {source}")]
    Read {
        args: String,
        source: std::io::Error,
    },

    #[error("git {args} did not finish within {timeout:?}")]
    TimedOut { args: String, timeout: Duration },

    #[error("git output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_distinguishable() {
        let fatal = ValidationError::fatal("broken");
        let soft = ValidationError::non_fatal("off");
        assert!(fatal.is_fatal());
        assert!(!soft.is_fatal());
        assert_eq!(fatal.message(), "broken");
        assert_eq!(soft.to_string(), "off");
    }

    #[test]
    fn loader_errors_become_fatal() {
        let err: ValidationError = ContentError::FileNotFound {
            path: PathBuf::from("playbooks/phishing/definition.yaml"),
        }
        .into();
        assert!(err.is_fatal());
        assert!(err.message().contains("definition.yaml"));
    }

    #[test]
    fn timeout_display() {
        let err = GitError::TimedOut {
            args: "diff --name-only".into(),
            timeout: Duration::from_secs(5),
        };
        assert_eq!(err.to_string(), "git diff --name-only did not finish within 5s");
    }
}
