//! SDK error types

use middleflow_compiler::CompileError;
use thiserror::Error;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Assembly, resolution or emission failed
    #[error(transparent)]
    Compile(#[from] CompileError),

    /// `build_function` was asked for a function nobody declared
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    /// A function name that cannot be used as an artifact file name
    #[error("Invalid function name: {0:?} must be a single path component")]
    InvalidFunctionName(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A build task panicked or was cancelled
    #[error("Build task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SdkError {
    /// Whether this is an I/O error of the given kind
    pub fn is_io_kind(&self, kind: std::io::ErrorKind) -> bool {
        matches!(self, SdkError::Io(err) if err.kind() == kind)
    }
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;
