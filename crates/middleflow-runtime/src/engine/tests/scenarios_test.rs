//! End-to-end chain scenarios through the driver

use super::{catch, register, then, then_catch, Behavior, CallLog};
use crate::context::Previous;
use crate::engine::ChainDriver;
use crate::error::{HandlerError, RuntimeError};
use crate::registry::HandlerRegistry;
use middleflow_core::Pipeline;
use serde_json::{json, Value};

#[tokio::test]
async fn test_all_success_runs_in_order() {
    let log = CallLog::default();
    let mut registry = HandlerRegistry::new();
    register(&mut registry, &log, "m1.h", Behavior::Resolve(json!(1)));
    register(&mut registry, &log, "m2.h", Behavior::Resolve(json!(2)));
    register(&mut registry, &log, "f.h", Behavior::Resolve(json!("done")));

    let pipeline = Pipeline::new(vec![then("m1.h"), then("m2.h"), then("f.h")]);
    let result = ChainDriver::new(registry)
        .run(&pipeline, json!({ "path": "/" }))
        .await;

    assert_eq!(result, Ok(json!("done")));
    assert_eq!(log.names(), vec!["m1.h", "m2.h", "f.h"]);
    assert_eq!(log.prev_of("m1.h"), Some(Previous::Unset));
    assert_eq!(log.prev_of("m2.h"), Some(Previous::Value(json!(1))));
    assert_eq!(log.prev_of("f.h"), Some(Previous::Value(json!(2))));
}

#[tokio::test]
async fn test_rejection_is_caught_downstream() {
    let log = CallLog::default();
    let mut registry = HandlerRegistry::new();
    register(&mut registry, &log, "m1.h", Behavior::Resolve(json!(1)));
    register(&mut registry, &log, "m2.h", Behavior::Resolve(json!(2)));
    register(&mut registry, &log, "c1.h", Behavior::Resolve(json!("c1")));
    register(&mut registry, &log, "m3.h", Behavior::Reject("m3 failed"));
    register(&mut registry, &log, "c2.h", Behavior::Resolve(json!("recovered")));
    register(&mut registry, &log, "f.h", Behavior::Resolve(json!("final")));

    let pipeline = Pipeline::new(vec![
        then("m1.h"),
        then_catch("m2.h", "c1.h"),
        then("m3.h"),
        catch("c2.h"),
        then("f.h"),
    ]);
    let result = ChainDriver::new(registry).run(&pipeline, Value::Null).await;

    assert_eq!(result, Ok(json!("final")));
    assert_eq!(log.names(), vec!["m1.h", "m2.h", "m3.h", "c2.h", "f.h"]);
    assert_eq!(
        log.prev_of("c2.h"),
        Some(Previous::Error(HandlerError::new("m3 failed")))
    );
    assert_eq!(log.prev_of("f.h"), Some(Previous::Value(json!("recovered"))));
}

#[tokio::test]
async fn test_then_catch_catches_its_own_then_side() {
    let log = CallLog::default();
    let mut registry = HandlerRegistry::new();
    register(&mut registry, &log, "m.h", Behavior::Reject("nope"));
    register(&mut registry, &log, "c.h", Behavior::Resolve(json!("caught")));

    let pipeline = Pipeline::new(vec![then_catch("m.h", "c.h")]);
    let result = ChainDriver::new(registry).run(&pipeline, Value::Null).await;

    assert_eq!(result, Ok(json!("caught")));
    assert_eq!(log.names(), vec!["m.h", "c.h"]);
}

#[tokio::test]
async fn test_end_skips_remaining_links() {
    let log = CallLog::default();
    let mut registry = HandlerRegistry::new();
    register(&mut registry, &log, "m1.h", Behavior::Resolve(json!(1)));
    register(&mut registry, &log, "m2.h", Behavior::EndThenResolve(json!("early")));
    register(&mut registry, &log, "m3.h", Behavior::Resolve(json!(3)));
    register(&mut registry, &log, "c.h", Behavior::Resolve(json!("c")));
    register(&mut registry, &log, "f.h", Behavior::Resolve(json!("f")));

    let pipeline = Pipeline::new(vec![
        then("m1.h"),
        then("m2.h"),
        then("m3.h"),
        catch("c.h"),
        then("f.h"),
    ]);
    let result = ChainDriver::new(registry).run(&pipeline, Value::Null).await;

    assert_eq!(result, Ok(json!("early")));
    assert_eq!(log.names(), vec!["m1.h", "m2.h"]);
}

#[tokio::test]
async fn test_end_on_rejection_is_not_caught() {
    let log = CallLog::default();
    let mut registry = HandlerRegistry::new();
    register(&mut registry, &log, "auth.h", Behavior::EndThenReject("unauthorized"));
    register(&mut registry, &log, "c.h", Behavior::Resolve(json!("c")));

    let pipeline = Pipeline::new(vec![then("auth.h"), catch("c.h")]);
    let result = ChainDriver::new(registry).run(&pipeline, Value::Null).await;

    assert_eq!(
        result,
        Err(RuntimeError::Unhandled(HandlerError::new("unauthorized")))
    );
    assert_eq!(log.names(), vec!["auth.h"]);
}

#[tokio::test]
async fn test_uncaught_rejection_becomes_invocation_error() {
    let log = CallLog::default();
    let mut registry = HandlerRegistry::new();
    register(&mut registry, &log, "m1.h", Behavior::Reject("bad input"));
    register(&mut registry, &log, "f.h", Behavior::Resolve(json!("f")));

    let pipeline = Pipeline::new(vec![then("m1.h"), then("f.h")]);
    let err = ChainDriver::new(registry)
        .run(&pipeline, Value::Null)
        .await
        .unwrap_err();

    assert_eq!(err.unhandled(), Some(&HandlerError::new("bad input")));
    assert_eq!(log.names(), vec!["m1.h"]);
}

#[tokio::test]
async fn test_missing_handler_fails_before_any_call() {
    let log = CallLog::default();
    let mut registry = HandlerRegistry::new();
    register(&mut registry, &log, "m1.h", Behavior::Resolve(json!(1)));

    let pipeline = Pipeline::new(vec![then("m1.h"), catch("ghost.h")]);
    let result = ChainDriver::new(registry).run(&pipeline, Value::Null).await;

    assert_eq!(
        result,
        Err(RuntimeError::HandlerNotRegistered {
            handler: "ghost.h".to_string()
        })
    );
    assert!(log.names().is_empty());
}

#[tokio::test]
async fn test_empty_pipeline_resolves_null() {
    let driver = ChainDriver::new(HandlerRegistry::new());
    let result = driver.run(&Pipeline::default(), json!({})).await;
    assert_eq!(result, Ok(Value::Null));
}
