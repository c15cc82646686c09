//! JSON-schema shape checks on the playbook's YAML sources.
//!
//! Runs before anything maps the files onto typed entities, so authors get
//! every shape violation with its location instead of the first
//! deserialization error.

use std::path::Path;

use jsonschema::Draft;
use mp_content::parser;
use mp_core::constants::{DEFINITION_FILE, STEPS_DIR};
use serde_json::Value;

use crate::engine::Validator;
use crate::error::ValidationError;

const DEFINITION_SCHEMA: &str = include_str!("../../../schemas/playbook-definition.schema.json");
const STEP_SCHEMA: &str = include_str!("../../../schemas/playbook-step.schema.json");

#[derive(Debug, Clone, Copy, Default)]
pub struct DefinitionSchemaValidation;

fn compile(name: &str, source: &str) -> Result<jsonschema::Validator, ValidationError> {
    let schema: Value = serde_json::from_str(source)
        .map_err(|e| ValidationError::fatal(format!("invalid built-in schema {name}: {e}")))?;
    jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(&schema)
        .map_err(|e| ValidationError::fatal(format!("cannot compile schema {name}: {e}")))
}

/// Violations of `document` against `schema`, one line each, prefixed with
/// the file they come from.
fn violations(schema: &jsonschema::Validator, file: &str, document: &Value) -> Vec<String> {
    schema
        .iter_errors(document)
        .map(|e| {
            let at = e.instance_path.to_string();
            if at.is_empty() {
                format!("{file}: {e}")
            } else {
                format!("{file} at {at}: {e}")
            }
        })
        .collect()
}

impl Validator for DefinitionSchemaValidation {
    fn name(&self) -> &str {
        "Definition Schema Validation"
    }

    fn run(&self, path: &Path) -> Result<(), ValidationError> {
        let definition_schema = compile("playbook-definition", DEFINITION_SCHEMA)?;
        let step_schema = compile("playbook-step", STEP_SCHEMA)?;

        let definition = parser::load_yaml_as_value(&path.join(DEFINITION_FILE))?;
        let mut problems = violations(&definition_schema, DEFINITION_FILE, &definition);

        for step_file in parser::definition_files(&path.join(STEPS_DIR))? {
            let document = parser::load_yaml_as_value(&step_file)?;
            let shown = step_file
                .strip_prefix(path)
                .unwrap_or(&step_file)
                .display()
                .to_string();
            problems.extend(violations(&step_schema, &shown, &document));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::fatal(problems.join("\n")))
        }
    }
}
