//! Handler interface

use crate::context::InvocationContext;
use crate::error::HandlerResult;
use async_trait::async_trait;
use futures::future::BoxFuture;
use serde_json::Value;

/// One callable unit of a chain
#[async_trait]
pub trait Handler: Send + Sync {
    /// Handle `event`; `Err` moves the chain onto the failure arm
    async fn call(&self, event: &Value, ctx: &InvocationContext) -> HandlerResult;
}

/// Handler backed by a closure returning a boxed future
pub struct FnHandler<F> {
    f: F,
}

#[async_trait]
impl<F> Handler for FnHandler<F>
where
    F: for<'a> Fn(&'a Value, &'a InvocationContext) -> BoxFuture<'a, HandlerResult> + Send + Sync,
{
    async fn call(&self, event: &Value, ctx: &InvocationContext) -> HandlerResult {
        (self.f)(event, ctx).await
    }
}

/// Wrap a closure as a [`Handler`]
///
/// ```ignore
/// use futures::FutureExt;
///
/// let greet = handler_fn(|event, _ctx| {
///     async move { Ok(serde_json::json!({ "hello": event["name"] })) }.boxed()
/// });
/// ```
pub fn handler_fn<F>(f: F) -> FnHandler<F>
where
    F: for<'a> Fn(&'a Value, &'a InvocationContext) -> BoxFuture<'a, HandlerResult> + Send + Sync,
{
    FnHandler { f }
}
