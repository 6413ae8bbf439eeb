//! Generated artifacts

use middleflow_core::{FunctionDeclaration, Variant};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One generated entry point, ready to be written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedArtifact {
    /// Function the artifact belongs to
    pub function: String,

    /// Path relative to the service root, `<folder>/<function>.<ext>`
    pub file_name: PathBuf,

    pub variant: Variant,

    /// Entry point source text
    pub source: String,

    /// Handler the function must point at, `<folder>/<function>.handler`
    pub handler: String,

    /// Number of steps in the pipeline
    pub step_count: usize,
}

impl GeneratedArtifact {
    /// Point `function` at the generated entry point
    ///
    /// The middleware declaration is consumed by the artifact, so it is
    /// removed from the function.
    pub fn apply_to(&self, function: &mut FunctionDeclaration) {
        function.handler = Some(self.handler.clone());
        function.middleware = None;
    }
}
