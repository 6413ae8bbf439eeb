//! Chain program
//!
//! The typed intermediate form the variant renderers consume: one import
//! per distinct module and one call per chain link, with every literal
//! already escaped.

use crate::error::Result;
use middleflow_core::ast::handler::is_identifier;
use middleflow_core::{Arm, HandlerRef, ModuleBindings, Pipeline};

/// One module import
pub(super) struct Import {
    /// Identifier the module is bound to
    pub(super) binding: String,

    /// Module specifier, without quotes and without escaping
    pub(super) specifier: String,
}

impl Import {
    /// Specifier as a quoted, escaped string literal
    pub(super) fn literal(&self, suffix: &str) -> String {
        string_literal(&format!("{}{}", self.specifier, suffix))
    }
}

/// One position of the promise chain
pub(super) struct ChainCall {
    pub(super) arm: Arm,

    /// Callee expression, e.g. `auth.check` or `auth["check-token"]`
    pub(super) callee: String,
}

pub(super) struct ChainProgram {
    pub(super) imports: Vec<Import>,
    pub(super) calls: Vec<ChainCall>,
}

impl ChainProgram {
    pub(super) fn build(pipeline: &Pipeline, import_base: &str) -> Result<Self> {
        let bindings = pipeline.bindings()?;

        let imports = bindings
            .iter()
            .map(|b| Import {
                binding: b.binding.clone(),
                specifier: import_specifier(import_base, &b.module_path),
            })
            .collect();

        let calls = pipeline
            .lower()
            .into_iter()
            .map(|link| ChainCall {
                arm: link.arm,
                callee: callee(&bindings, &link.handler),
            })
            .collect();

        Ok(Self { imports, calls })
    }

    /// The `.then(...)` / `.catch(...)` continuation of the chain
    pub(super) fn render_chain(&self) -> String {
        self.calls
            .iter()
            .map(|call| match call.arm {
                Arm::Success => format!(
                    "\n    .then(onSuccess(() => {}(event, context)))",
                    call.callee
                ),
                Arm::Failure => format!(
                    "\n    .catch(onFailure(() => {}(event, context)))",
                    call.callee
                ),
            })
            .collect()
    }
}

fn callee(bindings: &ModuleBindings, handler: &HandlerRef) -> String {
    // Bindings are built from the same pipeline, so every module is present.
    let binding = bindings
        .binding_for(&handler.module_path)
        .map(str::to_string)
        .unwrap_or_else(|| handler.binding_name());

    if is_identifier(&handler.export_name) {
        format!("{}.{}", binding, handler.export_name)
    } else {
        format!("{}[{}]", binding, string_literal(&handler.export_name))
    }
}

fn import_specifier(import_base: &str, module_path: &str) -> String {
    let base = import_base.trim_end_matches('/');
    if base.is_empty() {
        format!("./{}", module_path)
    } else {
        format!("{}/{}", base, module_path)
    }
}

/// A double-quoted string literal valid in both variants
fn string_literal(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}
