//! Pipeline AST definitions
//!
//! A pipeline is the fully assembled, ordered list of canonical steps for
//! one deployable function.

use super::handler::HandlerRef;
use super::step::CanonicalStep;
use crate::error::Result;
use crate::ir::{ChainLink, ModuleBindings};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Ordered middleware steps of one function
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pipeline {
    /// The steps, in execution order
    pub steps: Vec<CanonicalStep>,
}

impl Pipeline {
    /// Create a pipeline from already-canonical steps
    pub fn new(steps: Vec<CanonicalStep>) -> Self {
        Self { steps }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Every handler reference, in step order, then-side before catch-side
    pub fn handler_refs(&self) -> impl Iterator<Item = &HandlerRef> {
        self.steps.iter().flat_map(|step| step.handlers())
    }

    /// Distinct module paths, in order of first reference
    pub fn module_paths(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.handler_refs()
            .map(|handler| handler.module_path.as_str())
            .filter(|module| seen.insert(*module))
            .collect()
    }

    /// Lower the steps into chain links
    pub fn lower(&self) -> Vec<ChainLink> {
        crate::ir::lower(self)
    }

    /// Import bindings for every referenced module
    ///
    /// Fails when two distinct module paths sanitize to the same identifier.
    pub fn bindings(&self) -> Result<ModuleBindings> {
        ModuleBindings::from_pipeline(self)
    }
}

impl FromIterator<CanonicalStep> for Pipeline {
    fn from_iter<I: IntoIterator<Item = CanonicalStep>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
