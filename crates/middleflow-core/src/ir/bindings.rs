//! Module bindings
//!
//! Every distinct module referenced by a pipeline is imported exactly once
//! per artifact, under an identifier derived from its path.

use crate::ast::handler::binding_name;
use crate::ast::Pipeline;
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A module path and the identifier it is bound to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleBinding {
    pub module_path: String,
    pub binding: String,
}

/// Ordered, collision-free set of module bindings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleBindings {
    bindings: Vec<ModuleBinding>,
}

impl ModuleBindings {
    /// Collect bindings for every module referenced by `pipeline`
    pub fn from_pipeline(pipeline: &Pipeline) -> Result<Self> {
        let mut by_binding: HashMap<String, String> = HashMap::new();
        let mut bindings = Vec::new();

        for module_path in pipeline.module_paths() {
            let binding = binding_name(module_path);

            if let Some(existing) = by_binding.get(&binding) {
                return Err(CoreError::BindingCollision {
                    binding,
                    first: existing.clone(),
                    second: module_path.to_string(),
                });
            }

            by_binding.insert(binding.clone(), module_path.to_string());
            bindings.push(ModuleBinding {
                module_path: module_path.to_string(),
                binding,
            });
        }

        Ok(Self { bindings })
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModuleBinding> {
        self.bindings.iter()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Identifier bound to `module_path`, if the module is referenced
    pub fn binding_for(&self, module_path: &str) -> Option<&str> {
        self.bindings
            .iter()
            .find(|b| b.module_path == module_path)
            .map(|b| b.binding.as_str())
    }
}
