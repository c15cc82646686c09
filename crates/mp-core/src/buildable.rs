//! # Buildable Contract
//!
//! An entity that can be read from and written to both dialects. The round
//! trip law every implementation honours:
//!
//! ```text
//! E::from_built(b).to_built()         == b
//! E::from_non_built(n).to_non_built() == n
//! ```
//!
//! for any document whose fields exist in that dialect. Fields one dialect
//! lacks take documented defaults when converting across.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{ConversionError, Dialect};

/// Two-way mapping between an entity and its built/non-built wire shapes.
pub trait Buildable: Sized {
    /// Entity name used in conversion errors.
    const ENTITY: &'static str;

    /// Platform-export shape.
    type Built: Serialize + DeserializeOwned;

    /// Repository-source shape.
    type NonBuilt: Serialize + DeserializeOwned;

    fn from_built(built: Self::Built) -> Result<Self, ConversionError>;

    fn from_non_built(non_built: Self::NonBuilt) -> Result<Self, ConversionError>;

    fn to_built(&self) -> Self::Built;

    fn to_non_built(&self) -> Self::NonBuilt;

    /// Parse a built JSON tree and convert it.
    fn from_built_value(value: Value) -> Result<Self, ConversionError> {
        let built = serde_json::from_value(value).map_err(|source| ConversionError::Deserialize {
            entity: Self::ENTITY,
            dialect: Dialect::Built,
            source,
        })?;
        Self::from_built(built)
    }

    /// Parse a non-built JSON tree and convert it.
    fn from_non_built_value(value: Value) -> Result<Self, ConversionError> {
        let non_built =
            serde_json::from_value(value).map_err(|source| ConversionError::Deserialize {
                entity: Self::ENTITY,
                dialect: Dialect::NonBuilt,
                source,
            })?;
        Self::from_non_built(non_built)
    }

    fn to_built_value(&self) -> Result<Value, ConversionError> {
        serde_json::to_value(self.to_built()).map_err(|source| ConversionError::Serialize {
            entity: Self::ENTITY,
            dialect: Dialect::Built,
            source,
        })
    }

    fn to_non_built_value(&self) -> Result<Value, ConversionError> {
        serde_json::to_value(self.to_non_built()).map_err(|source| ConversionError::Serialize {
            entity: Self::ENTITY,
            dialect: Dialect::NonBuilt,
            source,
        })
    }
}
