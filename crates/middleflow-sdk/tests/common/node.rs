//! Runs emitted JavaScript entry points under node
//!
//! Every stub handler records its name, the event id and the `prev` value it
//! observed, then returns, rejects or ends the chain as scripted.

use middleflow_compiler::ChainEmitter;
use middleflow_core::{HandlerRef, Pipeline, Variant};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::process::Command;

const STUB_PRELUDE: &str = r#"'use strict';

const record = (name, event, context) => {
  const prev = context.prev;
  globalThis.calls.push({
    handler: name,
    event: event.id,
    prev: prev instanceof Error ? { error: prev.message } : prev === undefined ? null : prev,
  });
};

"#;

const RUNNER: &str = r#"'use strict';

globalThis.calls = [];
const { handler } = require('./.middleware/entry.js');

handler({ id: 'evt-1' }, {}).then(
  (result) => console.log(JSON.stringify({ calls: globalThis.calls, result })),
  (error) => console.log(JSON.stringify({ calls: globalThis.calls, error: error.message })),
);
"#;

/// What a stub handler does after recording its call
#[derive(Debug, Clone)]
pub enum Stub {
    Returns(Value),
    Rejects(&'static str),
    EndsWith(Value),
    EndsRejecting(&'static str),
}

impl Stub {
    fn body(&self) -> String {
        match self {
            Stub::Returns(value) => format!("return {};", value),
            Stub::Rejects(message) => format!("throw new Error({});", json!(message)),
            Stub::EndsWith(value) => format!("context.end();\n  return {};", value),
            Stub::EndsRejecting(message) => {
                format!("context.end();\n  throw new Error({});", json!(message))
            }
        }
    }
}

/// Outcome of one invocation of the emitted handler
#[derive(Debug)]
pub struct NodeRun {
    pub calls: Vec<Value>,
    pub result: Option<Value>,
    pub error: Option<String>,
}

impl NodeRun {
    /// Handlers in invocation order
    pub fn handlers(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| call["handler"].as_str())
            .collect()
    }

    /// The `prev` each handler observed, in invocation order
    pub fn prevs(&self) -> Vec<Value> {
        self.calls.iter().map(|call| call["prev"].clone()).collect()
    }
}

pub fn node_available() -> bool {
    Command::new("node")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// Emit `pipeline` as JavaScript, install the stubs beside it and invoke the
/// handler once
///
/// Returns `None` when node is not installed.
pub fn run_in_node(pipeline: &Pipeline, stubs: &[(&str, Stub)]) -> Option<NodeRun> {
    if !node_available() {
        eprintln!("node not found on PATH, skipping");
        return None;
    }

    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    let mut modules: BTreeMap<String, String> = BTreeMap::new();
    for (reference, stub) in stubs {
        let handler = HandlerRef::parse(reference).unwrap();
        let source = modules
            .entry(handler.module_path.clone())
            .or_insert_with(|| STUB_PRELUDE.to_string());
        source.push_str(&format!(
            "exports[{}] = async (event, context) => {{\n  record({}, event, context);\n  {}\n}};\n",
            json!(handler.export_name),
            json!(reference),
            stub.body()
        ));
    }
    for (module, source) in &modules {
        write(root, &format!("{}.js", module), source);
    }

    let entry = ChainEmitter::emit(pipeline, Variant::JavaScript, "..").unwrap();
    write(root, ".middleware/entry.js", entry.as_str());
    write(root, "package.json", r#"{ "type": "commonjs" }"#);
    write(root, "run.js", RUNNER);

    let output = Command::new("node")
        .arg("run.js")
        .current_dir(root)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "node failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    Some(NodeRun {
        calls: report["calls"].as_array().cloned().unwrap_or_default(),
        result: report.get("result").cloned(),
        error: report.get("error").and_then(Value::as_str).map(str::to_string),
    })
}

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}
