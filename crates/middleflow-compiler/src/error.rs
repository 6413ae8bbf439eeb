//! Compiler error types

use middleflow_core::CoreError;
use middleflow_parser::ParseError;
use thiserror::Error;

/// Compiler error
#[derive(Error, Debug)]
pub enum CompileError {
    /// A raw step or handler reference could not be parsed
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A function declares both a handler and an explicit step array
    #[error(
        "Error in function {function}. When defining a handler, only the {{ pre: ..., pos: ...}} configuration is allowed."
    )]
    ConflictingHandler { function: String },

    /// Function-level and global pre/pos lists meet under the `reject` policy
    #[error(
        "Error in function {function}. Function-level pre/pos cannot be combined with global pre/pos unless a combination policy is configured."
    )]
    AmbiguousPrePos { function: String },

    /// A referenced module has no recognised source file
    #[error(
        "Unsupported handler extension for module {module}. Only .js, .jsx, .ts and .tsx are supported."
    )]
    UnresolvedModule { module: String },

    /// The deployment runtime is not one the emitter targets
    #[error("middleflow doesn't support the \"{runtime}\" runtime")]
    UnsupportedRuntime { runtime: String },

    /// Two module paths sanitize to the same binding
    #[error("Modules '{first}' and '{second}' both bind to '{binding}' in the same pipeline")]
    BindingCollision {
        binding: String,
        first: String,
        second: String,
    },
}

impl From<CoreError> for CompileError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::BindingCollision {
                binding,
                first,
                second,
            } => CompileError::BindingCollision {
                binding,
                first,
                second,
            },
            other => CompileError::Parse(ParseError::from(other)),
        }
    }
}

/// Result type for compiler operations
pub type Result<T> = std::result::Result<T, CompileError>;
