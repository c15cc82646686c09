//! Concrete validators, grouped by the kind of content unit they check.

pub mod integration;
pub mod playbook;
