//! Execution engine module
//!
//! `ChainMachine` holds the pure arm/stop state machine; `ChainDriver`
//! walks a lowered chain, awaiting handlers where the machine says so.

pub mod driver;
pub mod machine;

#[cfg(test)]
mod tests;

// Re-export for convenience
pub use driver::ChainDriver;
pub use machine::{ChainMachine, ChainState, Settled, Transition};
