//! Definition files of an integration and its scripts.
//!
//! Only the keys the validators read are modelled; anything else in the
//! files is ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A configurable parameter of an integration or script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptParameter {
    pub name: String,
    #[serde(rename = "type", default)]
    pub param_type: Option<String>,
    #[serde(default)]
    pub default_value: Option<Value>,
    #[serde(default)]
    pub is_mandatory: bool,
    #[serde(default)]
    pub optional_values: Option<Vec<String>>,
}

impl ScriptParameter {
    /// True when the default is a boolean `true` (or its string form).
    pub fn defaults_to_true(&self) -> bool {
        match &self.default_value {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }

    /// The default rendered as text; `None` when absent or empty.
    pub fn default_text(&self) -> Option<String> {
        value_text(self.default_value.as_ref())
    }
}

fn value_text(value: Option<&Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    }
}

/// The integration's own `definition.yaml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrationDefinition {
    pub identifier: String,
    pub name: String,
    #[serde(default)]
    pub is_custom: bool,
    #[serde(default)]
    pub documentation_link: Option<String>,
    #[serde(default)]
    pub parameters: Vec<ScriptParameter>,
    /// Interpreter version, e.g. `3.11`. YAML may give it as a number.
    #[serde(default)]
    pub python_version: Option<Value>,
}

impl IntegrationDefinition {
    pub fn python_version_text(&self) -> Option<String> {
        value_text(self.python_version.as_ref())
    }
}

fn enabled() -> bool {
    true
}

/// One action, connector or job definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentDefinition {
    pub name: String,
    #[serde(default)]
    pub is_custom: bool,
    #[serde(default = "enabled")]
    pub is_enabled: bool,
    #[serde(default)]
    pub parameters: Vec<ScriptParameter>,
}
