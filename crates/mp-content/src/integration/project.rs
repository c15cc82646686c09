//! The integration's `pyproject.toml` dependency manifest.

use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PyProject {
    #[serde(default)]
    pub project: ProjectTable,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProjectTable {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub dependencies: Vec<String>,
}

/// Normalized distribution name of a PEP 508 requirement string.
fn requirement_name(requirement: &str) -> String {
    requirement
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.'))
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
        .replace(['_', '.'], "-")
}

impl PyProject {
    /// True when `package` appears among the declared dependencies.
    pub fn declares(&self, package: &str) -> bool {
        let wanted = requirement_name(package);
        self.project
            .dependencies
            .iter()
            .any(|d| requirement_name(d.trim()) == wanted)
    }

    /// `project.version` as a number; `None` when absent or not numeric.
    pub fn version_number(&self) -> Option<f64> {
        self.project.version.as_deref()?.trim().parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_names_with_specifiers_and_extras() {
        let project: PyProject = toml::from_str(
            r#"
[project]
name = "VirusTotal"
dependencies = ["TIPCommon>=2.0", "envcommon[extra] == 1.0.1", "requests"]
"#,
        )
        .unwrap();
        assert!(project.declares("tipcommon"));
        assert!(project.declares("EnvCommon"));
        assert!(project.declares("requests"));
        assert!(!project.declares("urllib3"));
    }

    #[test]
    fn missing_project_table_has_no_dependencies() {
        let project: PyProject = toml::from_str("[tool.uv]\n").unwrap();
        assert!(project.project.dependencies.is_empty());
    }

    #[test]
    fn version_reads_as_number() {
        let project: PyProject =
            toml::from_str("[project]\nname = \"MailRelay\"\nversion = \"2.0\"\n").unwrap();
        assert_eq!(project.version_number(), Some(2.0));

        let odd: PyProject = toml::from_str("[project]\nversion = \"2.0.post1\"\n").unwrap();
        assert_eq!(odd.version_number(), None);
        assert_eq!(PyProject::default().version_number(), None);
    }

    #[test]
    fn separators_normalize() {
        assert_eq!(requirement_name("Tip_Common.Ext>=1"), "tip-common-ext");
    }
}
