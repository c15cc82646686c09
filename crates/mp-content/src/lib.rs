//! # mp-content
//!
//! Content-unit data model: playbooks, blocks and integrations, with the
//! conversions between the built (exported platform JSON) and non-built
//! (YAML source tree) forms.
//!
//! Every entity implements [`mp_core::Buildable`]. Loading goes through
//! [`parser`], which attaches the offending path to every error.

pub mod error;
pub mod integration;
pub mod parser;
pub mod playbook;
pub mod release_note;

use std::path::Path;

use mp_core::constants::{ACTIONS_DIR, DISPLAY_INFO_FILE, STEPS_DIR};

pub use error::{ContentError, ContentResult};
pub use integration::Integration;
pub use playbook::Playbook;
pub use release_note::ReleaseNote;

/// What a content-unit directory holds, judged from its layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Playbook,
    Integration,
}

impl ContentKind {
    /// Classify `path`. Playbooks carry a display-info file or a steps
    /// directory; integrations carry an actions directory. Anything else is
    /// `None`.
    pub fn detect(path: &Path) -> Option<Self> {
        if path.join(DISPLAY_INFO_FILE).is_file() || path.join(STEPS_DIR).is_dir() {
            Some(Self::Playbook)
        } else if path.join(ACTIONS_DIR).is_dir() {
            Some(Self::Integration)
        } else {
            None
        }
    }
}
