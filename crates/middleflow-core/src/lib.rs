//! middleflow Core - Core types and definitions for the middleware-chain compiler
//!
//! This crate provides the fundamental types used across the middleflow workspace:
//! - Handler references and their import bindings
//! - Raw and canonical step definitions
//! - Function declarations as supplied by the descriptor source
//! - Pipelines and source variants
//! - The lowered chain IR consumed by both the emitter and the runtime
//! - Error types

pub mod ast;
pub mod error;
pub mod ir;

// Re-export commonly used types
pub use ast::{
    CanonicalStep, FunctionDeclaration, HandlerRef, MiddlewareDeclaration, Pipeline,
    PrePosDeclaration, RawStep, Variant,
};
pub use error::{CoreError, Result};
pub use ir::{Arm, ChainLink, ModuleBinding, ModuleBindings};
