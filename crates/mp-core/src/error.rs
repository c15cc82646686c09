//! # Error Types
//!
//! Errors raised while converting content between the built and non-built
//! dialects. These are malformed-input errors: they never become validation
//! diagnostics on their own, the caller decides how to abort.

use std::fmt;

use thiserror::Error;

/// The wire shape a document was being read or written as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// Platform export (PascalCase keys, integer-coded enums).
    Built,
    /// Repository source (snake_case keys, string-coded enums).
    NonBuilt,
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Built => f.write_str("built"),
            Self::NonBuilt => f.write_str("non-built"),
        }
    }
}

/// Failure to map a document onto an entity, or an entity onto a document.
#[derive(Error, Debug)]
pub enum ConversionError {
    /// A string token does not name any member of the enum.
    #[error("unrecognized value {value:?} for {enum_name}")]
    UnknownToken {
        /// Name of the enum that was being parsed.
        enum_name: &'static str,
        /// The offending token, as written.
        value: String,
    },

    /// An integer code does not map to any member of the enum.
    #[error("unrecognized value {code} for {enum_name}")]
    UnknownCode {
        /// Name of the enum that was being parsed.
        enum_name: &'static str,
        /// The offending code.
        code: i64,
    },

    /// A required key is absent or null where the entity needs a value.
    #[error("failed to load {entity}: missing required field `{field}`")]
    MissingField {
        entity: &'static str,
        field: &'static str,
    },

    /// A key is present but its value cannot be used.
    #[error("failed to load {entity}: invalid value for `{field}`: {reason}")]
    InvalidValue {
        entity: &'static str,
        field: &'static str,
        reason: String,
    },

    /// The document did not match the dialect's shape.
    #[error("failed to load {dialect} {entity}: {source}")]
    Deserialize {
        entity: &'static str,
        dialect: Dialect,
        #[source]
        source: serde_json::Error,
    },

    /// The entity could not be rendered into the dialect's shape.
    #[error("failed to render {dialect} {entity}: {source}")]
    Serialize {
        entity: &'static str,
        dialect: Dialect,
        #[source]
        source: serde_json::Error,
    },
}
