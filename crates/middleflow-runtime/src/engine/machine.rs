//! Chain state machine
//!
//! Tracks which arm the chain is on and whether it was stopped. It never
//! calls handlers; it only says whether a link runs and records what the
//! link produced.

use crate::context::Previous;
use crate::error::{HandlerError, HandlerResult};
use middleflow_core::{Arm, ChainLink};
use serde_json::Value;

/// The outcome the chain is currently carrying
#[derive(Debug, Clone, PartialEq)]
pub enum Settled {
    Fulfilled(Value),
    Rejected(HandlerError),
}

impl Settled {
    pub fn arm(&self) -> Arm {
        match self {
            Settled::Fulfilled(_) => Arm::Success,
            Settled::Rejected(_) => Arm::Failure,
        }
    }
}

impl From<HandlerResult> for Settled {
    fn from(outcome: HandlerResult) -> Self {
        match outcome {
            Ok(value) => Settled::Fulfilled(value),
            Err(err) => Settled::Rejected(err),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChainState {
    /// Links still run when their arm matches
    Running(Settled),

    /// Every remaining link passes the outcome through
    Stopped(Settled),
}

impl ChainState {
    pub fn settled(&self) -> &Settled {
        match self {
            ChainState::Running(settled) | ChainState::Stopped(settled) => settled,
        }
    }

    pub fn is_stopped(&self) -> bool {
        matches!(self, ChainState::Stopped(_))
    }
}

/// What to do with the next link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Pass the current outcome through unchanged
    Skip,

    /// Run the link's handler
    Invoke,
}

#[derive(Debug, Clone)]
pub struct ChainMachine {
    state: ChainState,

    /// Number of handler outcomes recorded so far
    settled_count: usize,
}

impl Default for ChainMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl ChainMachine {
    /// A running chain carrying an empty success
    pub fn new() -> Self {
        Self {
            state: ChainState::Running(Settled::Fulfilled(Value::Null)),
            settled_count: 0,
        }
    }

    pub fn state(&self) -> &ChainState {
        &self.state
    }

    /// Decide whether `link` runs
    pub fn next(&self, link: &ChainLink) -> Transition {
        match &self.state {
            ChainState::Stopped(_) => Transition::Skip,
            ChainState::Running(settled) if settled.arm() == link.arm => Transition::Invoke,
            ChainState::Running(_) => Transition::Skip,
        }
    }

    /// What the next invoked handler sees as `prev`
    pub fn incoming(&self) -> Previous {
        if self.settled_count == 0 {
            return Previous::Unset;
        }

        match self.state.settled() {
            Settled::Fulfilled(value) => Previous::Value(value.clone()),
            Settled::Rejected(err) => Previous::Error(err.clone()),
        }
    }

    /// Record a handler outcome, keeping the running/stopped state
    pub fn settle(&mut self, outcome: HandlerResult) {
        let settled = Settled::from(outcome);
        self.state = match self.state {
            ChainState::Running(_) => ChainState::Running(settled),
            ChainState::Stopped(_) => ChainState::Stopped(settled),
        };
        self.settled_count += 1;
    }

    /// Stop the chain; the current outcome becomes final
    pub fn stop(&mut self) {
        if let ChainState::Running(settled) = &self.state {
            self.state = ChainState::Stopped(settled.clone());
        }
    }

    /// The invocation result
    pub fn finish(self) -> HandlerResult {
        match self.state {
            ChainState::Running(Settled::Fulfilled(value))
            | ChainState::Stopped(Settled::Fulfilled(value)) => Ok(value),
            ChainState::Running(Settled::Rejected(err))
            | ChainState::Stopped(Settled::Rejected(err)) => Err(err),
        }
    }
}
