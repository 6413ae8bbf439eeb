//! Runtime precondition
//!
//! Both variants target a Node.js entry point. Any other deployment runtime
//! aborts the whole build pass.

use crate::error::{CompileError, Result};

const SUPPORTED_RUNTIME_PREFIX: &str = "nodejs";

pub fn is_supported_runtime(runtime: &str) -> bool {
    runtime.starts_with(SUPPORTED_RUNTIME_PREFIX)
        && runtime.len() > SUPPORTED_RUNTIME_PREFIX.len()
}

/// Fail with `UnsupportedRuntime` unless `runtime` is a Node.js runtime id
pub fn ensure_supported_runtime(runtime: &str) -> Result<()> {
    if is_supported_runtime(runtime) {
        Ok(())
    } else {
        Err(CompileError::UnsupportedRuntime {
            runtime: runtime.to_string(),
        })
    }
}
