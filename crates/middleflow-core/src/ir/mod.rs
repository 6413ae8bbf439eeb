//! IR (Intermediate Representation) definitions
//!
//! The lowered form of a pipeline. Both the chain emitter and the chain
//! runtime consume this IR, which keeps generated code and the in-process
//! driver behaviourally identical.

pub mod bindings;
pub mod chain;

pub use bindings::{ModuleBinding, ModuleBindings};
pub use chain::{lower, Arm, ChainLink};
