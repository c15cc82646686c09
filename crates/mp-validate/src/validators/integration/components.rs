//! Component flag rules: custom and disabled scripts, TLS verification and
//! action parameter options.

use std::path::Path;
use std::sync::Arc;

use mp_content::integration::{ComponentDefinition, ScriptParameter};
use mp_content::Integration;
use mp_core::constants::{BOOLEAN_PARAM_TYPE, OPTION_PARAM_TYPES, VALID_SSL_PARAM_NAMES};

use crate::engine::{unit_name, Validator};
use crate::error::ValidationError;
use crate::exclusions::Exclusions;

fn names_or_none<'a>(components: impl Iterator<Item = &'a ComponentDefinition>) -> String {
    let names: Vec<&str> = components.map(|c| c.name.as_str()).collect();
    if names.is_empty() {
        "None".to_string()
    } else {
        names.join(", ")
    }
}

/// Content in the marketplace is never marked custom.
#[derive(Debug, Clone, Copy, Default)]
pub struct CustomComponentsValidation;

impl Validator for CustomComponentsValidation {
    fn name(&self) -> &str {
        "Custom Components Validation"
    }

    fn run(&self, path: &Path) -> Result<(), ValidationError> {
        let integration = Integration::from_non_built_path(path)?;
        let is_custom = |c: &&ComponentDefinition| c.is_custom;
        if !integration.definition.is_custom && !integration.components().any(|c| c.is_custom) {
            return Ok(());
        }
        Err(ValidationError::non_fatal(format!(
            "Integration '{}' contains custom components:\
             \n  - Is integration custom: {}\
             \n  - Custom actions: {}\
             \n  - Custom connectors: {}\
             \n  - Custom jobs: {}",
            unit_name(path),
            integration.definition.is_custom,
            names_or_none(integration.actions.iter().filter(is_custom)),
            names_or_none(integration.connectors.iter().filter(is_custom)),
            names_or_none(integration.jobs.iter().filter(is_custom)),
        )))
    }
}

/// Every shipped script is enabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledComponentsValidation;

impl Validator for DisabledComponentsValidation {
    fn name(&self) -> &str {
        "Disabled Components Validation"
    }

    fn run(&self, path: &Path) -> Result<(), ValidationError> {
        let integration = Integration::from_non_built_path(path)?;
        let is_disabled = |c: &&ComponentDefinition| !c.is_enabled;
        if integration.components().all(|c| c.is_enabled) {
            return Ok(());
        }
        Err(ValidationError::non_fatal(format!(
            "{} contains disabled scripts:\
             \nDisabled actions: {}\
             \nDisabled connectors: {}\
             \nDisabled jobs: {}",
            unit_name(path),
            names_or_none(integration.actions.iter().filter(is_disabled)),
            names_or_none(integration.connectors.iter().filter(is_disabled)),
            names_or_none(integration.jobs.iter().filter(is_disabled)),
        )))
    }
}

/// The integration and each connector expose a boolean TLS verification
/// parameter that defaults to on.
pub struct SslParameterValidation {
    exclusions: Arc<Exclusions>,
}

impl SslParameterValidation {
    pub fn new(exclusions: Arc<Exclusions>) -> Self {
        Self { exclusions }
    }

    fn problem(&self, script: &str, parameters: &[ScriptParameter]) -> Option<String> {
        if self.exclusions.names_without_verify_ssl.contains(script) {
            return None;
        }
        let Some(param) = parameters
            .iter()
            .find(|p| VALID_SSL_PARAM_NAMES.contains(&p.name.as_str()))
        else {
            return Some(format!("{script} is missing a 'Verify SSL' parameter"));
        };
        let is_boolean = param
            .param_type
            .as_deref()
            .is_some_and(|t| t.eq_ignore_ascii_case(BOOLEAN_PARAM_TYPE));
        if !is_boolean {
            return Some(format!(
                "The 'Verify SSL' parameter in {script} must be of type 'boolean'"
            ));
        }
        if self
            .exclusions
            .names_where_ssl_default_is_not_true
            .contains(script)
            || param.defaults_to_true()
        {
            return None;
        }
        Some(format!(
            "The default value of the 'Verify SSL' param in {script} must be a boolean true"
        ))
    }
}

impl Validator for SslParameterValidation {
    fn name(&self) -> &str {
        "SSL Validation"
    }

    fn run(&self, path: &Path) -> Result<(), ValidationError> {
        let integration = Integration::from_non_built_path(path)?;
        let definition = self.problem(
            &integration.definition.name,
            &integration.definition.parameters,
        );
        let connectors: Vec<String> = integration
            .connectors
            .iter()
            .filter_map(|c| self.problem(&c.name, &c.parameters))
            .collect();
        if definition.is_none() && connectors.is_empty() {
            return Ok(());
        }
        let connectors = if connectors.is_empty() {
            "None".to_string()
        } else {
            connectors.join(", ")
        };
        Err(ValidationError::non_fatal(format!(
            "Integration '{}' has problems with SSL parameter:\
             \n  - In integration definition: {}\
             \n  - In connectors: {connectors}",
            unit_name(path),
            definition.as_deref().unwrap_or("None"),
        )))
    }
}

/// Option-typed action parameters list their options, other parameters do
/// not, and a default must be one of the options.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActionParametersValidation;

/// Flags for `param`: (option type without options, options on a non-option
/// type, default that is not one of the options).
fn parameter_problems(param: &ScriptParameter) -> (bool, bool, bool) {
    let is_option_type = param.param_type.as_deref().is_some_and(|t| {
        OPTION_PARAM_TYPES
            .iter()
            .any(|o| o.eq_ignore_ascii_case(t))
    });
    let options = param.optional_values.as_deref();
    let bad_default = match (options, param.default_text()) {
        (Some(options), Some(default)) => !options.contains(&default),
        _ => false,
    };
    (
        is_option_type && options.is_none(),
        !is_option_type && options.is_some(),
        bad_default,
    )
}

fn format_offenders(offenders: &[(String, String)]) -> String {
    if offenders.is_empty() {
        return "None".to_string();
    }
    offenders
        .iter()
        .map(|(action, param)| format!("{param} from {action}"))
        .collect::<Vec<_>>()
        .join(", ")
}

impl Validator for ActionParametersValidation {
    fn name(&self) -> &str {
        "Action Parameters Validation"
    }

    fn run(&self, path: &Path) -> Result<(), ValidationError> {
        let integration = Integration::from_non_built_path(path)?;
        let mut missing = Vec::new();
        let mut unexpected = Vec::new();
        let mut bad_default = Vec::new();
        for action in &integration.actions {
            for param in &action.parameters {
                let (m, u, d) = parameter_problems(param);
                let entry = || (action.name.clone(), param.name.clone());
                if m {
                    missing.push(entry());
                }
                if u {
                    unexpected.push(entry());
                }
                if d {
                    bad_default.push(entry());
                }
            }
        }
        if missing.is_empty() && unexpected.is_empty() && bad_default.is_empty() {
            return Ok(());
        }
        Err(ValidationError::non_fatal(format!(
            "Integration '{}' contains actions with invalid parameters:\
             \n  - Multiple options parameters without optional values: {}\
             \n  - Other parameters with optional values: {}\
             \n  - Defaults that are not one of the options: {}",
            unit_name(path),
            format_offenders(&missing),
            format_offenders(&unexpected),
            format_offenders(&bad_default),
        )))
    }
}
