//! Run a middleware chain in process
//!
//! Run with: `cargo run -p middleflow-sdk --example run_chain`
//!
//! An auth gate ends the chain for anonymous requests; a failing handler is
//! caught by an error reporter that turns the rejection into a response.

use futures::FutureExt;
use middleflow_core::{CanonicalStep, HandlerRef, Pipeline};
use middleflow_runtime::{handler_fn, HandlerError};
use middleflow_sdk::{ChainDriver, HandlerRegistry};
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "middleflow_runtime=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    let mut registry = HandlerRegistry::new();
    registry
        .register(
            "auth.check",
            handler_fn(|event, ctx| {
                async move {
                    if event.get("user").is_none() {
                        ctx.end();
                        return Ok(json!({ "statusCode": 401 }));
                    }
                    Ok(json!({ "user": event["user"].clone() }))
                }
                .boxed()
            }),
        )?
        .register(
            "orders.create",
            handler_fn(|event, _ctx| {
                async move {
                    match event["amount"].as_u64() {
                        Some(amount) if amount > 0 => {
                            Ok(json!({ "statusCode": 201, "amount": amount }))
                        }
                        _ => Err(HandlerError::new("amount must be positive")
                            .with_data(json!({ "statusCode": 400 }))),
                    }
                }
                .boxed()
            }),
        )?
        .register(
            "errors.report",
            handler_fn(|_event, ctx| {
                async move {
                    let err = ctx.prev().error().cloned();
                    Ok(json!({
                        "statusCode": err.as_ref().and_then(|e| e.data.clone()).map(|d| d["statusCode"].clone()),
                        "error": err.map(|e| e.message),
                    }))
                }
                .boxed()
            }),
        )?;

    let pipeline = Pipeline::new(vec![
        CanonicalStep::Then(HandlerRef::parse("auth.check")?),
        CanonicalStep::ThenCatch(
            HandlerRef::parse("orders.create")?,
            HandlerRef::parse("errors.report")?,
        ),
    ]);
    let driver = ChainDriver::new(registry);

    for event in [
        json!({ "amount": 10 }),
        json!({ "user": "ada", "amount": 10 }),
        json!({ "user": "ada", "amount": 0 }),
    ] {
        let result = driver.run(&pipeline, event.clone()).await?;
        println!("{} -> {}", event, result);
    }

    Ok(())
}
