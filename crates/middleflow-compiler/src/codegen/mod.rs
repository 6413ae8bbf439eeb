//! Code generation module
//!
//! Renders a pipeline into the source text of a deployable entry point.
//! Generation goes through a typed program (`ChainProgram`) and a tiny
//! placeholder template engine; values are escaped when the program is
//! built, never while splicing text.

mod emitter;
mod javascript;
mod program;
mod template;
mod typescript;

pub use emitter::{ChainEmitter, SourceText};
