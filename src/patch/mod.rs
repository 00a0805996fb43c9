//! Convergent text edits to the build descriptor and the startup file
//!
//! Neither file is parsed. Each edit is a small named pass over the raw text
//! (or its lines) anchored on the exact shapes we own, and every pass leaves
//! already-converged input byte-identical. Files are only rewritten when a
//! pass changed something.

pub mod descriptor;
pub mod startup;

pub use descriptor::{DescriptorOptions, DescriptorReport, patch_build_descriptor};
pub use startup::{StartupPatch, StartupReport, patch_startup_config};

use serde::Serialize;

/// A value replaced inside the build descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Substitution {
    /// What was edited, e.g. `project version` or `api path`
    pub target: String,
    pub old: String,
    pub new: String,
}

impl Substitution {
    pub fn new(target: impl Into<String>, old: &str, new: &str) -> Self {
        Self {
            target: target.into(),
            old: old.to_string(),
            new: new.to_string(),
        }
    }

    pub fn is_change(&self) -> bool {
        self.old != self.new
    }
}
