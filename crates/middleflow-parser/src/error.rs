//! Parser error types

use middleflow_core::CoreError;
use thiserror::Error;

/// Parser error
#[derive(Error, Debug)]
pub enum ParseError {
    /// A raw step matches none of the recognized shapes
    #[error("Invalid handler: {raw}")]
    InvalidSpec { raw: String },

    /// A handler reference cannot be split into module and export
    #[error("Invalid handler reference '{reference}': {message}")]
    InvalidReference { reference: String, message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Missing required field
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Invalid field value
    #[error("Invalid value for field '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl From<CoreError> for ParseError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidReference { reference, message } => {
                ParseError::InvalidReference { reference, message }
            }
            other => ParseError::InvalidValue {
                field: "handler".to_string(),
                message: other.to_string(),
            },
        }
    }
}

/// Result type for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;
