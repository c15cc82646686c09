//! Integration validators.

mod components;
mod fields;
mod python_version;
mod rules;
mod structure;
mod version_bump;

use std::sync::Arc;

pub use components::{
    ActionParametersValidation, CustomComponentsValidation, DisabledComponentsValidation,
    SslParameterValidation,
};
pub use rules::{
    documentation_link_problem, DependenciesValidation, DocumentationLinkValidation,
    MappingRulesValidation, PingActionValidation,
};
pub use fields::FieldsValidation;
pub use python_version::PythonVersionFileValidation;
pub use structure::IntegrationStructureValidation;
pub use version_bump::{check_integration_version, IntegrationVersionBumpValidation};

use crate::config::VersionBumpConfig;
use crate::engine::{Pipeline, Validator};
use crate::exclusions::Exclusions;
use crate::vcs::ChangeSource;

/// The pre-build pipeline for integrations.
pub fn pipeline(
    exclusions: Arc<Exclusions>,
    version_bump: VersionBumpConfig,
    changes: Arc<dyn ChangeSource>,
) -> Pipeline {
    let priority: Vec<Box<dyn Validator>> = vec![Box::new(IntegrationStructureValidation)];
    let non_priority: Vec<Box<dyn Validator>> = vec![
        Box::new(PingActionValidation::new(Arc::clone(&exclusions))),
        Box::new(MappingRulesValidation::new(Arc::clone(&exclusions))),
        Box::new(CustomComponentsValidation),
        Box::new(DisabledComponentsValidation),
        Box::new(DocumentationLinkValidation::new(Arc::clone(&exclusions))),
        Box::new(DependenciesValidation),
        Box::new(SslParameterValidation::new(Arc::clone(&exclusions))),
        Box::new(ActionParametersValidation),
        Box::new(FieldsValidation::new(exclusions)),
        Box::new(PythonVersionFileValidation),
        Box::new(IntegrationVersionBumpValidation::new(version_bump, changes)),
    ];
    Pipeline::new(priority, non_priority)
}
