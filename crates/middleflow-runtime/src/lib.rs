//! middleflow Runtime - in-process execution of middleware chains
//!
//! Runs a [`Pipeline`](middleflow_core::Pipeline) against registered async
//! handlers with the same semantics as the generated entry points:
//! - success and failure arms, with pass-through on mismatch
//! - `prev` carrying the last value or the last caught error
//! - cooperative early termination through [`InvocationContext::end`]

pub mod context;
pub mod engine;
pub mod error;
pub mod handler;
pub mod registry;

pub use context::{InvocationContext, Previous};
pub use engine::{ChainDriver, ChainMachine, ChainState, Settled, Transition};
pub use error::{HandlerError, HandlerResult, Result, RuntimeError};
pub use handler::{handler_fn, FnHandler, Handler};
pub use registry::HandlerRegistry;
