//! Common test utilities for SDK integration tests

#![allow(dead_code)]

pub mod node;

use middleflow_sdk::{BuildConfig, MemoryWriter, MiddlewareBuilder, Variant};
use std::collections::HashMap;
use std::sync::Arc;

/// Probe backed by a fixed table of module variants
pub fn table_probe(entries: &[(&str, Variant)]) -> impl Fn(&str) -> Option<Variant> + Send + Sync {
    let table: HashMap<String, Variant> = entries
        .iter()
        .map(|(module, variant)| (module.to_string(), *variant))
        .collect();
    move |module: &str| table.get(module).copied()
}

/// A builder wired to an in-memory writer and a table probe
pub fn memory_builder(
    config: BuildConfig,
    functions_yaml: &str,
    modules: &[(&str, Variant)],
) -> (MiddlewareBuilder, Arc<MemoryWriter>) {
    let writer = Arc::new(MemoryWriter::new());
    let builder = MiddlewareBuilder::new(config)
        .with_functions_yaml(functions_yaml)
        .unwrap()
        .with_probe(table_probe(modules))
        .with_writer(writer.clone());
    (builder, writer)
}

/// Callees of the emitted chain, in emission order
pub fn chain_callees(source: &str) -> Vec<String> {
    source
        .lines()
        .map(str::trim)
        .filter_map(|line| {
            line.strip_prefix(".then(onSuccess(() => ")
                .or_else(|| line.strip_prefix(".catch(onFailure(() => "))
        })
        .filter_map(|rest| rest.split_once("(event, context)"))
        .map(|(callee, _)| callee.to_string())
        .collect()
}
