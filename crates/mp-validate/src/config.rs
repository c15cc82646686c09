//! Run configuration.
//!
//! Read once from the environment by the driver and passed down to the
//! validators that need it; nothing below this module reads the process
//! environment.

use std::path::PathBuf;
use std::time::Duration;

/// Commit under review. Unset outside pull-request builds.
pub const HEAD_SHA_VAR: &str = "GITHUB_PR_SHA";
/// Branch the pull request merges into.
pub const BASE_BRANCH_VAR: &str = "MP_BASE_BRANCH";
/// Upper bound, in seconds, for each git invocation.
pub const GIT_TIMEOUT_VAR: &str = "MP_GIT_TIMEOUT_SECS";
/// YAML file of per-integration rule exemptions.
pub const EXCLUSIONS_FILE_VAR: &str = "MP_EXCLUSIONS_FILE";

pub const DEFAULT_BASE_BRANCH: &str = "main";

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {var}: {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Inputs of the release-note version check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionBumpConfig {
    pub base_branch: String,
    /// `None` disables the check.
    pub head_sha: Option<String>,
}

impl Default for VersionBumpConfig {
    fn default() -> Self {
        Self {
            base_branch: DEFAULT_BASE_BRANCH.to_string(),
            head_sha: None,
        }
    }
}

/// Settings for one `mp validate` run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub base_branch: String,
    pub head_sha: Option<String>,
    pub git_timeout: Option<Duration>,
    pub exclusions_file: Option<PathBuf>,
    pub only_pre_build: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            base_branch: DEFAULT_BASE_BRANCH.to_string(),
            head_sha: None,
            git_timeout: None,
            exclusions_file: None,
            only_pre_build: false,
        }
    }
}

impl RunConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `GITHUB_PR_SHA` (optional; empty counts as unset)
    /// - `MP_BASE_BRANCH` (default: `main`)
    /// - `MP_GIT_TIMEOUT_SECS` (optional; a positive integer)
    /// - `MP_EXCLUSIONS_FILE` (optional)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let git_timeout = match non_empty(GIT_TIMEOUT_VAR) {
            None => None,
            Some(raw) => Some(parse_timeout(&raw)?),
        };

        Ok(Self {
            base_branch: non_empty(BASE_BRANCH_VAR)
                .unwrap_or_else(|| DEFAULT_BASE_BRANCH.to_string()),
            head_sha: non_empty(HEAD_SHA_VAR),
            git_timeout,
            exclusions_file: non_empty(EXCLUSIONS_FILE_VAR).map(PathBuf::from),
            only_pre_build: false,
        })
    }

    pub fn version_bump(&self) -> VersionBumpConfig {
        VersionBumpConfig {
            base_branch: self.base_branch.clone(),
            head_sha: self.head_sha.clone(),
        }
    }
}

/// Parse a timeout in whole seconds. Zero is rejected; unset the variable
/// to disable the bound.
pub fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidValue {
        var: GIT_TIMEOUT_VAR,
        value: raw.to_string(),
        reason,
    };
    let secs: u64 = raw.trim().parse().map_err(|e| invalid(format!("{e}")))?;
    if secs == 0 {
        return Err(invalid("must be at least 1 second".into()));
    }
    Ok(Duration::from_secs(secs))
}
