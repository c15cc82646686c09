//! # mp-core: Foundational Types for the Content Toolkit
//!
//! Every content component (playbook step, trigger, widget, release note, ...)
//! exists in two wire shapes:
//!
//! - **built**: the platform-consumed JSON export. PascalCase keys, enums as
//!   small integer codes.
//! - **non-built**: the human-authored repository YAML. snake_case keys, enums
//!   as lowercase string tokens.
//!
//! This crate defines the pieces every other crate agrees on when moving
//! between the two.
//!
//! ## Key Design Principles
//!
//! 1. **Closed enums with two encodings.** [`RepresentableEnum`] gives every
//!    enum a code and a token. Declaring one through [`representable_enum!`]
//!    generates both, plus `Display`/`FromStr` and token-based serde.
//!
//! 2. **Typed dialects.** [`Buildable`] carries the built and non-built shapes
//!    as associated types, so both directions are checked at compile time.
//!
//! 3. **Malformed input is an error, not a diagnostic.** Conversion failures
//!    surface as [`ConversionError`] and propagate to the loader or validator
//!    that asked for the entity.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `mp-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod buildable;
pub mod constants;
pub mod enums;
pub mod error;

pub use buildable::Buildable;
pub use enums::RepresentableEnum;
pub use error::{ConversionError, Dialect};

#[doc(hidden)]
pub mod __private {
    pub use serde;
}
