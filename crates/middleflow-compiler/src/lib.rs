//! middleflow Compiler - pipeline assembly, variant resolution and emission
//!
//! This crate turns function declarations into pipeline source text:
//! assemble the ordered steps, pick one source variant for the whole
//! artifact, then render the promise chain for that variant.

pub mod assembler;
pub mod codegen;
pub mod compiler;
pub mod error;
pub mod resolver;

// Re-export main types
pub use assembler::{PipelineAssembler, PrePosPolicy};
pub use codegen::{ChainEmitter, SourceText};
pub use compiler::{CompiledPipeline, Compiler, CompilerOptions};
pub use error::{CompileError, Result};
pub use resolver::{
    ensure_supported_runtime, FileSystemProbe, ModuleProbe, Resolution, ResolveSession,
    VariantResolver,
};
