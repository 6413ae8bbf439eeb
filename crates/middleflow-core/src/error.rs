//! Error types for middleflow Core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid handler reference '{reference}': {message}")]
    InvalidReference { reference: String, message: String },

    #[error(
        "Modules '{first}' and '{second}' both bind to '{binding}' in the same pipeline"
    )]
    BindingCollision {
        binding: String,
        first: String,
        second: String,
    },
}

pub type Result<T> = std::result::Result<T, CoreError>;
