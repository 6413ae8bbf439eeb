//! Test modules for the chain engine


#[cfg(test)]
mod scenarios_test;

use crate::context::{InvocationContext, Previous};
use crate::error::{HandlerError, HandlerResult};
use crate::handler::Handler;
use crate::registry::HandlerRegistry;
use async_trait::async_trait;
use middleflow_core::{CanonicalStep, HandlerRef};
use serde_json::Value;
use std::sync::{Arc, Mutex};

/// Shared record of `(handler, prev)` for every call, in call order
#[derive(Clone, Default)]
pub(super) struct CallLog(Arc<Mutex<Vec<(String, Previous)>>>);

impl CallLog {
    pub(super) fn names(&self) -> Vec<String> {
        self.0.lock().unwrap().iter().map(|(n, _)| n.clone()).collect()
    }

    pub(super) fn prev_of(&self, name: &str) -> Option<Previous> {
        self.0
            .lock()
            .unwrap()
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, prev)| prev.clone())
    }
}

pub(super) enum Behavior {
    Resolve(Value),
    Reject(&'static str),
    EndThenResolve(Value),
    EndThenReject(&'static str),
}

pub(super) struct Scripted {
    name: String,
    behavior: Behavior,
    log: CallLog,
}

#[async_trait]
impl Handler for Scripted {
    async fn call(&self, _event: &Value, ctx: &InvocationContext) -> HandlerResult {
        self.log
            .0
            .lock()
            .unwrap()
            .push((self.name.clone(), ctx.prev().clone()));

        match &self.behavior {
            Behavior::Resolve(value) => Ok(value.clone()),
            Behavior::Reject(message) => Err(HandlerError::new(*message)),
            Behavior::EndThenResolve(value) => {
                ctx.end();
                Ok(value.clone())
            }
            Behavior::EndThenReject(message) => {
                ctx.end();
                Err(HandlerError::new(*message))
            }
        }
    }
}

pub(super) fn register(
    registry: &mut HandlerRegistry,
    log: &CallLog,
    reference: &str,
    behavior: Behavior,
) {
    registry
        .register(
            reference,
            Scripted {
                name: reference.to_string(),
                behavior,
                log: log.clone(),
            },
        )
        .unwrap();
}

pub(super) fn then(reference: &str) -> CanonicalStep {
    CanonicalStep::Then(HandlerRef::parse(reference).unwrap())
}

pub(super) fn catch(reference: &str) -> CanonicalStep {
    CanonicalStep::Catch(HandlerRef::parse(reference).unwrap())
}

pub(super) fn then_catch(then: &str, catch: &str) -> CanonicalStep {
    CanonicalStep::ThenCatch(
        HandlerRef::parse(then).unwrap(),
        HandlerRef::parse(catch).unwrap(),
    )
}
