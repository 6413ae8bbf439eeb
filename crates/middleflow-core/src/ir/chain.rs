//! Chain links
//!
//! A pipeline lowers to a flat list of links, one per promise-chain
//! position. `Then` becomes a success link, `Catch` a failure link, and
//! `ThenCatch` a success link immediately followed by a failure link, so the
//! catch side also sees a rejection raised by its own then side.

use crate::ast::{CanonicalStep, HandlerRef, Pipeline};
use serde::{Deserialize, Serialize};

/// Which arm of the chain a link listens on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arm {
    Success,
    Failure,
}

/// One position in the lowered chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainLink {
    /// Index of the canonical step this link came from
    pub step_index: usize,

    pub arm: Arm,

    pub handler: HandlerRef,
}

impl ChainLink {
    pub fn on_success(step_index: usize, handler: HandlerRef) -> Self {
        Self {
            step_index,
            arm: Arm::Success,
            handler,
        }
    }

    pub fn on_failure(step_index: usize, handler: HandlerRef) -> Self {
        Self {
            step_index,
            arm: Arm::Failure,
            handler,
        }
    }
}

/// Lower a pipeline into chain links, preserving step order
pub fn lower(pipeline: &Pipeline) -> Vec<ChainLink> {
    let mut links = Vec::with_capacity(pipeline.len());

    for (index, step) in pipeline.steps.iter().enumerate() {
        match step {
            CanonicalStep::Then(handler) => {
                links.push(ChainLink::on_success(index, handler.clone()));
            }
            CanonicalStep::Catch(handler) => {
                links.push(ChainLink::on_failure(index, handler.clone()));
            }
            CanonicalStep::ThenCatch(then, catch) => {
                links.push(ChainLink::on_success(index, then.clone()));
                links.push(ChainLink::on_failure(index, catch.clone()));
            }
        }
    }

    log::trace!(
        "lowered {} steps into {} chain links",
        pipeline.len(),
        links.len()
    );

    links
}
