//! Handler references
//!
//! A handler is addressed as `module/path.export`. The module path may itself
//! contain dots, so the reference is always split on its last `.`.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A callable unit: an export of a source module
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HandlerRef {
    /// Module path relative to the service root (e.g. `src/auth/jwt`)
    pub module_path: String,

    /// Exported function name inside the module
    pub export_name: String,
}

impl HandlerRef {
    /// Parse a dotted reference such as `src/handlers.v2.handler`
    ///
    /// The split happens on the last `.`, so the example above yields module
    /// `src/handlers.v2` and export `handler`.
    pub fn parse(reference: &str) -> Result<Self> {
        let (module_path, export_name) =
            reference
                .rsplit_once('.')
                .ok_or_else(|| CoreError::InvalidReference {
                    reference: reference.to_string(),
                    message: "expected '<module>.<export>'".to_string(),
                })?;

        if module_path.is_empty() {
            return Err(CoreError::InvalidReference {
                reference: reference.to_string(),
                message: "module path is empty".to_string(),
            });
        }
        if export_name.is_empty() {
            return Err(CoreError::InvalidReference {
                reference: reference.to_string(),
                message: "export name is empty".to_string(),
            });
        }

        Ok(Self {
            module_path: module_path.to_string(),
            export_name: export_name.to_string(),
        })
    }

    /// Identifier the module is bound to in generated code
    pub fn binding_name(&self) -> String {
        binding_name(&self.module_path)
    }
}

impl fmt::Display for HandlerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.module_path, self.export_name)
    }
}

/// Names a module binding may never take
///
/// JavaScript reserved words and strict-mode restricted names, plus every
/// name the generated entry point declares or reads from the enclosing scope.
pub const RESERVED_BINDINGS: &[&str] = &[
    // language
    "arguments", "await", "break", "case", "catch", "class", "const", "continue",
    "debugger", "default", "delete", "do", "else", "enum", "eval", "export",
    "extends", "false", "finally", "for", "function", "if", "implements", "import",
    "in", "instanceof", "interface", "let", "new", "null", "package", "private",
    "protected", "public", "return", "static", "super", "switch", "this", "throw",
    "true", "try", "typeof", "undefined", "var", "void", "while", "with", "yield",
    // entry point
    "Context", "Handler", "MiddlewareContext", "Promise", "context", "error", "event",
    "exports", "handler", "invoke", "module", "onFailure", "onSuccess", "prev",
    "require", "stopped",
];

/// Whether `name` is taken by the language or by the generated entry point
pub fn is_reserved_binding(name: &str) -> bool {
    RESERVED_BINDINGS.contains(&name)
}

/// Sanitize a module path into a valid, non-reserved identifier
///
/// Every character outside `[A-Za-z0-9_$]` becomes `_`, and so does a
/// leading digit. A reserved result gets a trailing `_`.
pub fn binding_name(module_path: &str) -> String {
    let mut binding: String = module_path
        .chars()
        .enumerate()
        .map(|(i, c)| {
            if is_identifier_char(c) && !(i == 0 && c.is_ascii_digit()) {
                c
            } else {
                '_'
            }
        })
        .collect();

    if is_reserved_binding(&binding) {
        binding.push('_');
    }
    binding
}

/// Whether `name` can be used verbatim as a property in dotted access
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if is_identifier_char(first) && !first.is_ascii_digit() => {
            chars.all(is_identifier_char)
        }
        _ => false,
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}
