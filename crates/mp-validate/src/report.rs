//! Validation results.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::error::ValidationError;

/// Build stage a result belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ValidationPhase {
    #[serde(rename = "Pre-Build")]
    PreBuild,
    #[serde(rename = "Build")]
    Build,
    #[serde(rename = "Post-Build")]
    PostBuild,
}

impl ValidationPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PreBuild => "Pre-Build",
            Self::Build => "Build",
            Self::PostBuild => "Post-Build",
        }
    }
}

impl fmt::Display for ValidationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One failed validator and what it reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub validation_name: String,
    pub info: String,
}

/// Failures collected for one content unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub unit_name: String,
    pub failed_non_fatal_validations: Vec<ValidationIssue>,
    pub failed_fatal_validations: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn new(unit_name: impl Into<String>) -> Self {
        Self {
            unit_name: unit_name.into(),
            ..Self::default()
        }
    }

    pub fn add_non_fatal_validation(&mut self, name: &str, info: impl Into<String>) {
        self.failed_non_fatal_validations.push(ValidationIssue {
            validation_name: name.to_string(),
            info: info.into(),
        });
    }

    pub fn add_fatal_validation(&mut self, name: &str, info: impl Into<String>) {
        self.failed_fatal_validations.push(ValidationIssue {
            validation_name: name.to_string(),
            info: info.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.failed_fatal_validations.is_empty() && self.failed_non_fatal_validations.is_empty()
    }
}

/// Outcome of one phase for one content unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResults {
    pub unit_name: String,
    pub phase: ValidationPhase,
    pub is_success: bool,
    pub report: ValidationReport,
}

impl ValidationResults {
    pub fn new(unit_name: impl Into<String>, phase: ValidationPhase) -> Self {
        let unit_name = unit_name.into();
        Self {
            report: ValidationReport::new(unit_name.clone()),
            unit_name,
            phase,
            is_success: true,
        }
    }

    /// Record a validator failure. Any failure marks the unit unsuccessful.
    pub fn record(&mut self, validator: &str, err: &ValidationError) {
        self.is_success = false;
        match err {
            ValidationError::Fatal(msg) => self.report.add_fatal_validation(validator, msg.clone()),
            ValidationError::NonFatal(msg) => {
                self.report.add_non_fatal_validation(validator, msg.clone())
            }
        }
    }
}

/// Results of a whole run, grouped by phase.
pub type FullReport = BTreeMap<ValidationPhase, Vec<ValidationResults>>;

/// True when any unit in any phase failed.
pub fn has_failures(report: &FullReport) -> bool {
    report.values().flatten().any(|r| !r.is_success)
}

/// Merge `other` into `into`, appending per phase.
pub fn combine(into: &mut FullReport, other: FullReport) {
    for (phase, results) in other {
        into.entry(phase).or_default().extend(results);
    }
}
