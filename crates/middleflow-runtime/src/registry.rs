//! Handler registry
//!
//! Maps handler references to their implementations. A chain is checked
//! against the registry before its first handler runs, so a missing
//! handler never leaves a chain half executed.

use crate::error::{Result, RuntimeError};
use crate::handler::Handler;
use middleflow_core::{ChainLink, HandlerRef};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Default, Clone)]
pub struct HandlerRegistry {
    handlers: HashMap<HandlerRef, Arc<dyn Handler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under a dotted reference such as `auth.check`
    pub fn register(
        &mut self,
        reference: &str,
        handler: impl Handler + 'static,
    ) -> middleflow_core::Result<&mut Self> {
        let handler_ref = HandlerRef::parse(reference)?;
        self.handlers.insert(handler_ref, Arc::new(handler));
        Ok(self)
    }

    /// Register an already shared handler
    pub fn register_arc(&mut self, handler_ref: HandlerRef, handler: Arc<dyn Handler>) {
        self.handlers.insert(handler_ref, handler);
    }

    pub fn get(&self, handler_ref: &HandlerRef) -> Option<Arc<dyn Handler>> {
        self.handlers.get(handler_ref).cloned()
    }

    pub fn contains(&self, handler_ref: &HandlerRef) -> bool {
        self.handlers.contains_key(handler_ref)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Fail on the first link, in chain order, with no registered handler
    pub fn check(&self, links: &[ChainLink]) -> Result<()> {
        match links.iter().find(|link| !self.contains(&link.handler)) {
            Some(link) => Err(RuntimeError::HandlerNotRegistered {
                handler: link.handler.to_string(),
            }),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut handlers: Vec<String> = self.handlers.keys().map(|h| h.to_string()).collect();
        handlers.sort();
        f.debug_struct("HandlerRegistry")
            .field("handlers", &handlers)
            .finish()
    }
}
