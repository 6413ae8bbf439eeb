//! Function declarations
//!
//! What a descriptor says about one deployable function: its own handler
//! and, optionally, a `middleware` entry. The entry is either an explicit
//! array of steps or a `{ pre, pos }` object wrapped around the handler.

use super::step::RawStep;
use serde::{Deserialize, Serialize};

/// A function as declared by the descriptor source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionDeclaration {
    /// Logical function name (the descriptor key when omitted)
    #[serde(default)]
    pub name: String,

    /// Single handler reference (`module.export`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handler: Option<String>,

    /// Middleware declaration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middleware: Option<MiddlewareDeclaration>,
}

impl FunctionDeclaration {
    /// A plain function with only a handler
    pub fn with_handler(name: impl Into<String>, handler: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            handler: Some(handler.into()),
            middleware: None,
        }
    }

    /// A function whose whole chain is an explicit step array
    pub fn with_steps(name: impl Into<String>, steps: Vec<RawStep>) -> Self {
        Self {
            name: name.into(),
            handler: None,
            middleware: Some(MiddlewareDeclaration::Steps(steps)),
        }
    }

    /// Wrap the declared handler with function-level pre/pos steps
    pub fn wrapped(mut self, pre: Vec<RawStep>, pos: Vec<RawStep>) -> Self {
        self.middleware = Some(MiddlewareDeclaration::PrePos(PrePosDeclaration { pre, pos }));
        self
    }

    /// Function-level pre/pos lists, when declared
    pub fn pre_pos(&self) -> Option<&PrePosDeclaration> {
        match &self.middleware {
            Some(MiddlewareDeclaration::PrePos(pre_pos)) => Some(pre_pos),
            _ => None,
        }
    }
}

/// The `middleware` entry of a function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MiddlewareDeclaration {
    /// Explicit, complete list of steps
    Steps(Vec<RawStep>),

    /// Steps run before and after the function's own handler
    PrePos(PrePosDeclaration),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PrePosDeclaration {
    #[serde(default)]
    pub pre: Vec<RawStep>,

    #[serde(default)]
    pub pos: Vec<RawStep>,
}

impl PrePosDeclaration {
    pub fn is_empty(&self) -> bool {
        self.pre.is_empty() && self.pos.is_empty()
    }
}
