//! middleflow SDK
//!
//! High-level API for generating middleware entry points: one build pass
//! turns function declarations into written artifacts, and a matching
//! `clean()` removes them again.

pub mod artifact;
pub mod builder;
pub mod config;
pub mod error;
pub mod writer;

// Re-export main types
pub use artifact::GeneratedArtifact;
pub use builder::MiddlewareBuilder;
pub use config::BuildConfig;
pub use error::{Result, SdkError};
pub use writer::{ArtifactWriter, FileSystemWriter, MemoryWriter};

// Re-export commonly used types from dependencies
pub use middleflow_compiler::{CompileError, PrePosPolicy};
pub use middleflow_core::{FunctionDeclaration, Pipeline, RawStep, Variant};
pub use middleflow_runtime::{ChainDriver, HandlerRegistry, InvocationContext};
