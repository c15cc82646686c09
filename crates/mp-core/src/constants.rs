//! Repository layout and rule constants shared by the loader and validators.

/// Suffix of every non-built definition file.
pub const DEF_FILE_SUFFIX: &str = ".yaml";

/// Metadata file at the root of every content unit.
pub const DEFINITION_FILE: &str = "definition.yaml";

pub const DISPLAY_INFO_FILE: &str = "display_info.yaml";

pub const TRIGGER_FILE: &str = "trigger.yaml";

/// Accepted names for the release-notes file, preferred first.
pub const RELEASE_NOTES_FILES: &[&str] = &["release_notes.yaml", "release_notes.yml"];

pub const STEPS_DIR: &str = "steps";
pub const OVERVIEWS_DIR: &str = "overviews";
pub const WIDGETS_DIR: &str = "widgets";

pub const ACTIONS_DIR: &str = "actions";
pub const CONNECTORS_DIR: &str = "connectors";
pub const JOBS_DIR: &str = "jobs";

pub const MAPPING_RULES_FILE: &str = "integration_mapping_rules.yaml";
pub const PROJECT_FILE: &str = "pyproject.toml";
pub const PYTHON_VERSION_FILE: &str = ".python-version";

/// Category name stamped on every exported playbook.
pub const CONTENT_HUB_CATEGORY: &str = "Content Hub";

/// Environment name that stands for every environment.
pub const ALL_ENVIRONMENTS: &str = "*";

pub const MINIMUM_RELEASE_NOTE_VERSION: f64 = 1.0;

pub const MAX_STEP_PARALLEL_ACTIONS: usize = 5;

/// Integrations allowed to ship without a connectivity test action.
pub const EXCLUDED_INTEGRATIONS_IDS_WITHOUT_PING: &[&str] =
    &["ChronicleSupportTools", "Connectors", "Lacework", "PagerDuty"];

/// Name of the connectivity test action.
pub const PING_ACTION_NAME: &str = "Ping";

/// Packages every integration with connectors or jobs must declare.
pub const REQUIRED_SDK_PACKAGES: &[&str] = &["tipcommon", "envcommon"];

/// Accepted names of the TLS verification parameter.
pub const VALID_SSL_PARAM_NAMES: &[&str] = &["Verify SSL", "Verify SSL Certificate"];

/// Parameter type token of boolean parameters.
pub const BOOLEAN_PARAM_TYPE: &str = "boolean";

/// Allowed integration, action, connector and job names.
pub const METADATA_NAME_PATTERN: &str = r"^[a-zA-Z0-9\-\s]+$";

/// Allowed parameter display names.
pub const PARAM_NAME_PATTERN: &str = r"^[a-zA-Z0-9\-'\s]+$";

/// Parameter types that choose among `optional_values`.
pub const OPTION_PARAM_TYPES: &[&str] = &["ddl", "multi_choice_parameter", "multi_values"];
