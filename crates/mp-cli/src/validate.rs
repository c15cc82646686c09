//! # Validate subcommand
//!
//! Resolves the content units to check, runs their pipelines and prints
//! the combined report. Returns exit code 1 when any unit failed.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Args;

use mp_content::ContentKind;
use mp_validate::config::parse_timeout;
use mp_validate::report::has_failures;
use mp_validate::{Exclusions, FullReport, GitCli, RunConfig, ValidationResults, Validations};

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Content unit directories, or directories to search for units.
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Run only the pre-build validations.
    #[arg(long)]
    pub only_pre_build: bool,

    /// Print the report as JSON instead of text.
    #[arg(long)]
    pub json: bool,

    /// Commit under review (overrides GITHUB_PR_SHA).
    #[arg(long)]
    pub head_sha: Option<String>,

    /// Branch to compare against (overrides MP_BASE_BRANCH).
    #[arg(long)]
    pub base_branch: Option<String>,

    /// Upper bound for each git call (overrides MP_GIT_TIMEOUT_SECS).
    #[arg(long, value_name = "SECS", value_parser = parse_timeout)]
    pub git_timeout_secs: Option<Duration>,

    /// YAML file of per-integration rule exemptions (overrides MP_EXCLUSIONS_FILE).
    #[arg(long, value_name = "FILE")]
    pub exclusions: Option<PathBuf>,
}

impl ValidateArgs {
    /// Apply the flags on top of configuration read from the environment.
    pub fn apply(&self, mut config: RunConfig) -> RunConfig {
        if let Some(sha) = &self.head_sha {
            config.head_sha = Some(sha.clone());
        }
        if let Some(branch) = &self.base_branch {
            config.base_branch = branch.clone();
        }
        if self.git_timeout_secs.is_some() {
            config.git_timeout = self.git_timeout_secs;
        }
        if let Some(file) = &self.exclusions {
            config.exclusions_file = Some(file.clone());
        }
        config.only_pre_build |= self.only_pre_build;
        config
    }
}

/// Execute the validate subcommand.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let config = args.apply(RunConfig::from_env().context("invalid environment configuration")?);
    tracing::debug!(?config, "resolved run configuration");

    let exclusions = match &config.exclusions_file {
        Some(path) => Exclusions::load(path)
            .with_context(|| format!("failed to load exclusions from {}", path.display()))?,
        None => Exclusions::default(),
    };

    let units = discover_units(&args.paths)?;
    if units.is_empty() {
        tracing::warn!("no playbooks or integrations found");
    }

    let validations = Validations::new(
        &config,
        Arc::new(exclusions),
        Arc::new(GitCli::new(config.git_timeout)),
    );
    let report = validations.run_all(units.iter().map(|(kind, path)| (*kind, path.as_path())));

    if args.json {
        let json = serde_json::to_string_pretty(&report).context("failed to render report")?;
        println!("{json}");
    } else {
        print!("{}", render_text(&report));
    }

    Ok(if has_failures(&report) { 1 } else { 0 })
}

/// Resolve `paths` to content units. A path that is itself a unit is taken
/// as is; any other directory is searched, without descending into units or
/// hidden directories. The result is sorted and free of duplicates.
pub fn discover_units(paths: &[PathBuf]) -> Result<Vec<(ContentKind, PathBuf)>> {
    let mut units = Vec::new();
    for path in paths {
        if !path.is_dir() {
            bail!("{} is not a directory", path.display());
        }
        match ContentKind::detect(path) {
            Some(kind) => units.push((kind, path.clone())),
            None => search(path, &mut units)?,
        }
    }
    units.sort_by(|a, b| a.1.cmp(&b.1));
    units.dedup_by(|a, b| a.1 == b.1);
    Ok(units)
}

fn search(dir: &Path, units: &mut Vec<(ContentKind, PathBuf)>) -> Result<()> {
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("failed to read {}", dir.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("failed to read {}", dir.display()))?;
        let path = entry.path();
        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        if hidden || !path.is_dir() {
            continue;
        }
        match ContentKind::detect(&path) {
            Some(kind) => units.push((kind, path)),
            None => search(&path, units)?,
        }
    }
    Ok(())
}

fn render_unit(out: &mut String, results: &ValidationResults) {
    let status = if results.is_success { "PASS" } else { "FAIL" };
    let _ = writeln!(out, "  {status}  {}", results.unit_name);
    let report = &results.report;
    for issue in &report.failed_non_fatal_validations {
        let _ = writeln!(out, "    [non-fatal] {}", issue.validation_name);
        for line in issue.info.lines() {
            let _ = writeln!(out, "        {line}");
        }
    }
    for issue in &report.failed_fatal_validations {
        let _ = writeln!(out, "    [fatal] {}", issue.validation_name);
        for line in issue.info.lines() {
            let _ = writeln!(out, "        {line}");
        }
    }
    if !report.failed_fatal_validations.is_empty() {
        let _ = writeln!(out, "    remaining validations were skipped");
    }
}

/// Plain-text rendering of a run: one block per phase, one line per unit
/// followed by its failures, and a closing tally.
pub fn render_text(report: &FullReport) -> String {
    let mut out = String::new();
    for (phase, results) in report {
        let _ = writeln!(out, "{phase}");
        for unit in results {
            render_unit(&mut out, unit);
        }
    }
    let all: Vec<_> = report.values().flatten().collect();
    let failed = all.iter().filter(|r| !r.is_success).count();
    let _ = writeln!(out, "{} checked, {failed} failed", all.len());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use mp_validate::{ValidationError, ValidationPhase};

    #[derive(clap::Parser, Debug)]
    struct Wrapper {
        #[command(flatten)]
        args: ValidateArgs,
    }

    fn parse(argv: &[&str]) -> Result<ValidateArgs, clap::Error> {
        use clap::Parser;
        Wrapper::try_parse_from(std::iter::once("mp").chain(argv.iter().copied())).map(|w| w.args)
    }

    #[test]
    fn flags_override_environment() {
        let env = RunConfig {
            head_sha: Some("from-env".into()),
            base_branch: "develop".into(),
            ..RunConfig::default()
        };
        let flags = ["--head-sha", "abc", "--git-timeout-secs", "30", "--only-pre-build", "."];
        let config = parse(&flags).unwrap().apply(env);
        assert_eq!(config.head_sha.as_deref(), Some("abc"));
        assert_eq!(config.base_branch, "develop");
        assert_eq!(config.git_timeout, Some(Duration::from_secs(30)));
        assert!(config.only_pre_build);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        assert!(parse(&["--git-timeout-secs", "0", "."]).is_err());
        assert!(parse(&[]).is_err());
    }

    #[test]
    fn text_report_marks_skipped_validations() {
        let mut failed = ValidationResults::new("loops", ValidationPhase::PreBuild);
        failed.record("Step Parameters Validation", &ValidationError::non_fatal("too short"));
        failed.record(
            "Loop Steps Validation",
            &ValidationError::fatal("Playbook is missing 1 end loop steps"),
        );
        let passed = ValidationResults::new("triage", ValidationPhase::PreBuild);
        let mut report = FullReport::new();
        report.insert(ValidationPhase::PreBuild, vec![failed, passed]);

        let text = render_text(&report);
        assert_eq!(
            text,
            "Pre-Build\n\
             \x20 FAIL  loops\n\
             \x20   [non-fatal] Step Parameters Validation\n\
             \x20       too short\n\
             \x20   [fatal] Loop Steps Validation\n\
             \x20       Playbook is missing 1 end loop steps\n\
             \x20   remaining validations were skipped\n\
             \x20 PASS  triage\n\
             2 checked, 1 failed\n"
        );
    }
}
