//! Chain driver
//!
//! Executes a pipeline link by link. Each handler is awaited before the
//! next link is evaluated; cancellation is cooperative only.

use super::machine::{ChainMachine, Transition};
use crate::context::InvocationContext;
use crate::error::{Result, RuntimeError};
use crate::registry::HandlerRegistry;
use middleflow_core::{ChainLink, Pipeline};
use serde_json::Value;
use std::sync::Arc;

/// Chain driver for in-process pipeline execution
#[derive(Debug, Clone)]
pub struct ChainDriver {
    registry: Arc<HandlerRegistry>,
}

impl ChainDriver {
    pub fn new(registry: HandlerRegistry) -> Self {
        Self::with_registry(Arc::new(registry))
    }

    pub fn with_registry(registry: Arc<HandlerRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Run `pipeline` against `event` with a fresh context
    pub async fn run(&self, pipeline: &Pipeline, event: Value) -> Result<Value> {
        let mut ctx = InvocationContext::new();
        self.run_with_context(pipeline, &event, &mut ctx).await
    }

    /// Run `pipeline` with a caller-owned context
    ///
    /// Fails with `HandlerNotRegistered` before any handler runs when a
    /// link has no implementation, and with `Unhandled` when the chain
    /// ends on the failure arm. A context that is already ended runs no
    /// handler and yields `Null`.
    pub async fn run_with_context(
        &self,
        pipeline: &Pipeline,
        event: &Value,
        ctx: &mut InvocationContext,
    ) -> Result<Value> {
        let links = pipeline.lower();
        self.registry.check(&links)?;

        let mut machine = ChainMachine::new();
        if ctx.is_ended() {
            tracing::debug!("context already ended, chain passes through");
            machine.stop();
        }

        for (position, link) in links.iter().enumerate() {
            match machine.next(link) {
                Transition::Skip => {
                    tracing::trace!(
                        position,
                        handler = %link.handler,
                        stopped = machine.state().is_stopped(),
                        "link passed through"
                    );
                }
                Transition::Invoke => {
                    self.invoke(link, event, ctx, &mut machine).await?;

                    if ctx.is_ended() && !machine.state().is_stopped() {
                        tracing::debug!(position, handler = %link.handler, "chain ended early");
                        machine.stop();
                    }
                }
            }
        }

        machine.finish().map_err(RuntimeError::Unhandled)
    }

    async fn invoke(
        &self,
        link: &ChainLink,
        event: &Value,
        ctx: &mut InvocationContext,
        machine: &mut ChainMachine,
    ) -> Result<()> {
        let handler =
            self.registry
                .get(&link.handler)
                .ok_or_else(|| RuntimeError::HandlerNotRegistered {
                    handler: link.handler.to_string(),
                })?;

        ctx.set_prev(machine.incoming());

        let outcome = handler.call(event, ctx).await;

        tracing::debug!(
            handler = %link.handler,
            arm = ?link.arm,
            ok = outcome.is_ok(),
            "handler settled"
        );

        machine.settle(outcome);
        Ok(())
    }
}
