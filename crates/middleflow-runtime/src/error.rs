//! Runtime error types

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// A handler's rejection
///
/// Rejections are ordinary values on the failure arm: they are handed to
/// catch handlers through `prev` and only surface as [`RuntimeError`] when
/// nothing catches them.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("{message}")]
pub struct HandlerError {
    pub message: String,

    /// Optional structured payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl HandlerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

/// Outcome of one handler call
pub type HandlerResult = std::result::Result<Value, HandlerError>;

/// Runtime error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    /// A link references a handler the registry does not know
    #[error("Handler not registered: {handler}")]
    HandlerNotRegistered { handler: String },

    /// The chain finished on the failure arm
    #[error("Unhandled error in chain: {0}")]
    Unhandled(HandlerError),
}

impl RuntimeError {
    /// The uncaught rejection, if that is what ended the chain
    pub fn unhandled(&self) -> Option<&HandlerError> {
        match self {
            RuntimeError::Unhandled(err) => Some(err),
            RuntimeError::HandlerNotRegistered { .. } => None,
        }
    }
}

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;
