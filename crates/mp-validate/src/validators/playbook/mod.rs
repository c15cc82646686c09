//! Playbook and block validators.

mod built_export;
mod debug_data;
mod environments;
mod loop_balance;
mod schema;
mod step_params;
mod structure;
mod version_bump;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;

pub use built_export::BuiltExportValidation;
pub use debug_data::{debug_data_problems, DebugDataValidation};
pub use environments::{missing_environments, BlockEnvironmentsValidation, NESTED_BLOCK_PARAM};
pub use loop_balance::{loop_problems, LoopStepsValidation};
pub use schema::DefinitionSchemaValidation;
pub use step_params::{step_problems, StepParamsValidation};
pub use structure::PlaybookStructureValidation;
pub use version_bump::{check_release_notes, VersionBumpValidation};
pub(crate) use version_bump::{all_at, format_version};

use crate::config::VersionBumpConfig;
use crate::engine::{Pipeline, Validator};
use crate::report::ValidationPhase;
use crate::vcs::ChangeSource;

/// The pre-build pipeline for playbooks and blocks.
pub fn pipeline(version_bump: VersionBumpConfig, changes: Arc<dyn ChangeSource>) -> Pipeline {
    let priority: Vec<Box<dyn Validator>> = vec![
        Box::new(PlaybookStructureValidation),
        Box::new(DefinitionSchemaValidation),
        Box::new(LoopStepsValidation),
    ];
    let non_priority: Vec<Box<dyn Validator>> = vec![
        Box::new(StepParamsValidation),
        Box::new(DebugDataValidation),
        Box::new(VersionBumpValidation::new(version_bump, changes)),
        Box::new(BlockEnvironmentsValidation),
    ];
    Pipeline::new(priority, non_priority)
}

/// The build pipeline for playbooks: the built export must be stable.
pub fn build_pipeline() -> Pipeline {
    let priority: Vec<Box<dyn Validator>> = vec![Box::new(BuiltExportValidation)];
    Pipeline::new(priority, Vec::new()).in_phase(ValidationPhase::Build)
}
