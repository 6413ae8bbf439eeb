//! Invocation context
//!
//! Created fresh for every chain invocation. Handlers see it by shared
//! reference: they may request the end of the chain, and they can read
//! what the previous link produced.

use crate::error::HandlerError;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};

/// What the previous link left behind
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Previous {
    /// No handler has run yet
    #[default]
    Unset,

    /// Last successful value
    Value(Value),

    /// Last caught error
    Error(HandlerError),
}

impl Previous {
    pub fn value(&self) -> Option<&Value> {
        match self {
            Previous::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&HandlerError> {
        match self {
            Previous::Error(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, Previous::Unset)
    }
}

/// Per-invocation context handed to every handler
#[derive(Debug, Default)]
pub struct InvocationContext {
    ended: AtomicBool,
    prev: Previous,
}

impl InvocationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip every link after the one currently running
    ///
    /// The running handler is never aborted; its outcome still settles the
    /// chain.
    pub fn end(&self) {
        self.ended.store(true, Ordering::SeqCst);
    }

    pub fn is_ended(&self) -> bool {
        self.ended.load(Ordering::SeqCst)
    }

    pub fn prev(&self) -> &Previous {
        &self.prev
    }

    pub(crate) fn set_prev(&mut self, prev: Previous) {
        self.prev = prev;
    }
}
