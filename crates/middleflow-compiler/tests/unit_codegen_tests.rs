//! Unit tests for chain emission

use middleflow_compiler::ChainEmitter;
use middleflow_core::{CanonicalStep, HandlerRef, Pipeline, Variant};

fn handler(reference: &str) -> HandlerRef {
    HandlerRef::parse(reference).unwrap()
}

fn scenario_b() -> Pipeline {
    Pipeline::new(vec![
        CanonicalStep::Then(handler("m1.h")),
        CanonicalStep::ThenCatch(handler("m2.h"), handler("c1.h")),
        CanonicalStep::Then(handler("m3.h")),
        CanonicalStep::Catch(handler("c2.h")),
        CanonicalStep::Then(handler("f.h")),
    ])
}

/// Chain links in emission order, as `(arm, callee)` pairs
fn chain_calls(text: &str) -> Vec<(&str, &str)> {
    text.lines()
        .map(str::trim)
        .filter_map(|line| {
            let (arm, rest) = if let Some(rest) = line.strip_prefix(".then(onSuccess(() => ") {
                ("then", rest)
            } else if let Some(rest) = line.strip_prefix(".catch(onFailure(() => ") {
                ("catch", rest)
            } else {
                return None;
            };
            rest.split_once("(event, context)")
                .map(|(callee, _)| (arm, callee))
        })
        .collect()
}

#[test]
fn test_chain_mirrors_pipeline_order() {
    let source = ChainEmitter::emit(&scenario_b(), Variant::JavaScript, "..").unwrap();

    assert_eq!(
        chain_calls(source.as_str()),
        vec![
            ("then", "m1.h"),
            ("then", "m2.h"),
            ("catch", "c1.h"),
            ("then", "m3.h"),
            ("catch", "c2.h"),
            ("then", "f.h"),
        ]
    );
}

#[test]
fn test_each_module_imported_once() {
    let pipeline = Pipeline::new(vec![
        CanonicalStep::Then(handler("auth.check")),
        CanonicalStep::ThenCatch(handler("auth.refresh"), handler("auth.deny")),
    ]);
    let source = ChainEmitter::emit(&pipeline, Variant::JavaScript, "..").unwrap();

    assert_eq!(source.as_str().matches("require(").count(), 1);
    assert!(source
        .as_str()
        .contains(r#"const auth = require("../auth");"#));
}

#[test]
fn test_javascript_entry_point_shape() {
    let source = ChainEmitter::emit(&scenario_b(), Variant::JavaScript, "..").unwrap();
    let text = source.as_str();

    assert!(text.starts_with("'use strict';"));
    assert!(text.contains("module.exports.handler = async (event, context) => {"));
    assert!(text.contains("context.end = () => {"));
    assert!(text.contains("if (stopped) return prev;"));
    assert!(text.contains("if (stopped) throw error;"));
    assert!(text.contains("context.prev = error;"));
    assert!(!text.contains("{{"));
    assert!(!text.contains("import "));
}

#[test]
fn test_typescript_entry_point_shape() {
    let source = ChainEmitter::emit(&scenario_b(), Variant::TypeScript, "..").unwrap();
    let text = source.as_str();

    assert!(text.starts_with("import { Context } from 'aws-lambda';"));
    assert!(text.contains(r#"import * as m1 from "../m1.js";"#));
    assert!(text.contains("type MiddlewareContext<TResult = any> = Context & {"));
    assert!(text.contains("export const handler: Handler = async (event, context) => {"));
    assert!(!text.contains("require("));
    assert!(!text.contains("{{"));
}

#[test]
fn test_special_characters_are_escaped() {
    let pipeline = Pipeline::new(vec![CanonicalStep::Then(handler(
        "src/it's \"quoted\".my-handler",
    ))]);
    let source = ChainEmitter::emit(&pipeline, Variant::JavaScript, "..").unwrap();
    let text = source.as_str();

    assert!(text.contains(r#"require("../src/it's \"quoted\"")"#));
    assert!(text.contains(r#"src_it_s__quoted_["my-handler"](event, context)"#));
}

#[test]
fn test_empty_pipeline_emits_identity_chain() {
    for variant in [Variant::JavaScript, Variant::TypeScript] {
        let source = ChainEmitter::emit(&Pipeline::default(), variant, "..").unwrap();
        assert!(source.as_str().contains("return Promise.resolve();"));
        assert!(chain_calls(source.as_str()).is_empty());
    }
}

#[test]
fn test_modules_named_like_entry_point_locals_are_renamed() {
    let pipeline = Pipeline::new(vec![
        CanonicalStep::Then(handler("context.load")),
        CanonicalStep::Then(handler("event.parse")),
        CanonicalStep::Then(handler("new.h")),
        CanonicalStep::Then(handler("handler.hello")),
    ]);

    let js = ChainEmitter::emit(&pipeline, Variant::JavaScript, "..").unwrap();
    assert!(js
        .as_str()
        .contains(r#"const context_ = require("../context");"#));
    assert!(js.as_str().contains(r#"const new_ = require("../new");"#));
    assert_eq!(
        chain_calls(js.as_str()),
        vec![
            ("then", "context_.load"),
            ("then", "event_.parse"),
            ("then", "new_.h"),
            ("then", "handler_.hello"),
        ]
    );

    let ts = ChainEmitter::emit(&pipeline, Variant::TypeScript, "..").unwrap();
    assert!(ts
        .as_str()
        .contains(r#"import * as handler_ from "../handler.js";"#));
    assert!(ts.as_str().contains("export const handler: Handler"));
    assert!(!ts.as_str().contains("import * as handler from"));
}

#[test]
fn test_renamed_binding_can_still_collide() {
    let pipeline = Pipeline::new(vec![
        CanonicalStep::Then(handler("context.load")),
        CanonicalStep::Then(handler("context_.load")),
    ]);
    assert!(ChainEmitter::emit(&pipeline, Variant::JavaScript, "..").is_err());
}
