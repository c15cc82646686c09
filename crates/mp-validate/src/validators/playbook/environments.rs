use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use mp_content::parser;
use mp_content::playbook::{PlaybookMetadata, StepType};
use mp_content::Playbook;
use mp_core::constants::{ALL_ENVIRONMENTS, DEFINITION_FILE};

use crate::engine::Validator;
use crate::error::ValidationError;

/// Step parameter holding the identifier of the block a block step runs.
pub const NESTED_BLOCK_PARAM: &str = "NestedWorkflowIdentifier";

/// Blocks used by a playbook are available wherever the playbook runs.
///
/// Referenced blocks are looked up by identifier among the sibling
/// directories of the playbook. A block that cannot be found is skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockEnvironmentsValidation;

/// Environments of `playbook` a block declaring `block_envs` does not cover.
pub fn missing_environments<'a>(
    playbook_envs: &'a [String],
    block_envs: &[String],
) -> BTreeSet<&'a str> {
    if block_envs.iter().any(|e| e == ALL_ENVIRONMENTS) {
        return BTreeSet::new();
    }
    playbook_envs
        .iter()
        .map(String::as_str)
        .filter(|env| !block_envs.iter().any(|b| b == env))
        .collect()
}

/// Metadata of every block among the siblings of `unit`, keyed by identifier.
fn sibling_blocks(unit: &Path) -> HashMap<String, PlaybookMetadata> {
    let mut blocks = HashMap::new();
    let Some(parent) = unit.parent() else {
        return blocks;
    };
    let Ok(entries) = std::fs::read_dir(parent) else {
        return blocks;
    };
    for entry in entries.flatten() {
        let definition = entry.path().join(DEFINITION_FILE);
        if !definition.is_file() {
            continue;
        }
        match parser::load_non_built::<PlaybookMetadata>(&definition) {
            Ok(meta) if meta.is_block() => {
                blocks.insert(meta.identifier.clone(), meta);
            }
            Ok(_) => {}
            Err(err) => tracing::debug!(%err, "skipping unreadable sibling definition"),
        }
    }
    blocks
}

impl Validator for BlockEnvironmentsValidation {
    fn name(&self) -> &str {
        "Block Environments Validation"
    }

    fn run(&self, path: &Path) -> Result<(), ValidationError> {
        let playbook = Playbook::from_non_built_path(path)?;
        let references: Vec<(&str, &str)> = playbook
            .steps
            .iter()
            .filter(|s| s.step_type == StepType::Block)
            .filter_map(|s| Some((s.instance_name.as_str(), s.parameter(NESTED_BLOCK_PARAM)?)))
            .collect();
        if references.is_empty() {
            return Ok(());
        }

        let blocks = sibling_blocks(path);
        let mut problems = Vec::new();
        for (step_name, block_id) in references {
            let Some(block) = blocks.get(block_id) else {
                tracing::debug!(block = block_id, "referenced block not found, skipping");
                continue;
            };
            let missing = missing_environments(&playbook.metadata.environments, &block.environments);
            if !missing.is_empty() {
                problems.push(format!(
                    "Block '{}' used by step <{step_name}> is missing environments: {}",
                    block.name,
                    missing.into_iter().collect::<Vec<_>>().join(", ")
                ));
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::non_fatal(problems.join("\n")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envs(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn reports_set_difference() {
        let playbook = envs(&["Default Environment", "EMEA", "APAC"]);
        let block = envs(&["Default Environment"]);
        let missing = missing_environments(&playbook, &block);
        assert_eq!(missing.into_iter().collect::<Vec<_>>(), ["APAC", "EMEA"]);
    }

    #[test]
    fn superset_and_wildcard_pass() {
        let playbook = envs(&["EMEA"]);
        assert!(missing_environments(&playbook, &envs(&["EMEA", "APAC"])).is_empty());
        assert!(missing_environments(&playbook, &envs(&["*"])).is_empty());
    }
}
