//! Content loading errors.
//!
//! Every variant that comes from a file carries its path, so a failed load
//! can be traced to the exact component that broke it.

use std::path::PathBuf;

use mp_core::ConversionError;
use thiserror::Error;

/// Errors raised while reading a content unit from disk.
#[derive(Debug, Error)]
pub enum ContentError {
    /// YAML parsing failed, or the document does not have the expected shape.
    #[error("failed to parse YAML at {path}: {source}")]
    YamlParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// JSON parsing failed.
    #[error("failed to parse JSON at {path}: {source}")]
    JsonParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// TOML parsing failed.
    #[error("failed to parse TOML at {path}: {source}")]
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A required file was not found.
    #[error("required file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// The document parsed but could not be mapped onto its entity.
    #[error("failed to load {path}: {source}")]
    Conversion {
        path: PathBuf,
        source: ConversionError,
    },

    /// I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias for content operations.
pub type ContentResult<T> = Result<T, ContentError>;
