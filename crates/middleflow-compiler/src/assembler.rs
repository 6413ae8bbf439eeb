//! Pipeline assembly
//!
//! Combines global pre-steps, a function's own steps and global post-steps
//! into one ordered pipeline. A function's own steps come from its
//! declaration, first match wins:
//! - an explicit step array is used verbatim (and must not be mixed with a
//!   handler)
//! - a `{ pre, pos }` object wraps the function's handler
//! - otherwise the handler alone, or nothing

use crate::error::{CompileError, Result};
use middleflow_core::{FunctionDeclaration, MiddlewareDeclaration, Pipeline, RawStep};
use middleflow_parser::HandlerSpecParser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// How function-level `pre`/`pos` combine with non-empty global lists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrePosPolicy {
    /// Refuse to guess: the function fails with `AmbiguousPrePos`
    #[default]
    Reject,

    /// `global pre ++ function pre ++ handler ++ function pos ++ global pos`
    Nest,

    /// Function-level lists replace the global ones for that function
    FunctionOverrides,
}

/// Pipeline assembler
///
/// Holds the global pre/pos lists for one build pass. The lists are shared
/// read-only across functions, so cloning the assembler is cheap.
#[derive(Debug, Clone)]
pub struct PipelineAssembler {
    global_pre: Arc<[RawStep]>,
    global_pos: Arc<[RawStep]>,
    policy: PrePosPolicy,
}

impl Default for PipelineAssembler {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

impl PipelineAssembler {
    pub fn new(global_pre: Vec<RawStep>, global_pos: Vec<RawStep>) -> Self {
        Self {
            global_pre: global_pre.into(),
            global_pos: global_pos.into(),
            policy: PrePosPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: PrePosPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> PrePosPolicy {
        self.policy
    }

    /// Whether any global pre/pos step is configured
    pub fn has_global_steps(&self) -> bool {
        !self.global_pre.is_empty() || !self.global_pos.is_empty()
    }

    /// Assemble `global_pre ++ own ++ global_pos` into a pipeline
    ///
    /// Every raw step goes through the handler spec parser; the first
    /// invalid step, in sequence order, aborts the assembly.
    pub fn assemble(
        global_pre: &[RawStep],
        own: &[RawStep],
        global_pos: &[RawStep],
    ) -> Result<Pipeline> {
        global_pre
            .iter()
            .chain(own)
            .chain(global_pos)
            .map(|raw| HandlerSpecParser::parse(raw).map_err(CompileError::from))
            .collect()
    }

    /// Assemble the pipeline of one declared function
    pub fn assemble_function(&self, function: &FunctionDeclaration) -> Result<Pipeline> {
        let handler = function.handler.as_ref().map(|h| RawStep::Handler(h.clone()));

        let pipeline = match (&handler, &function.middleware) {
            (Some(_), Some(MiddlewareDeclaration::Steps(_))) => {
                return Err(CompileError::ConflictingHandler {
                    function: function.name.clone(),
                });
            }
            (None, Some(MiddlewareDeclaration::Steps(steps))) => {
                Self::assemble(&self.global_pre, steps, &self.global_pos)?
            }
            (_, Some(MiddlewareDeclaration::PrePos(pre_pos))) => {
                let own: Vec<RawStep> = pre_pos
                    .pre
                    .iter()
                    .cloned()
                    .chain(handler.clone())
                    .chain(pre_pos.pos.iter().cloned())
                    .collect();

                if pre_pos.is_empty() || !self.has_global_steps() {
                    Self::assemble(&self.global_pre, &own, &self.global_pos)?
                } else {
                    match self.policy {
                        PrePosPolicy::Reject => {
                            return Err(CompileError::AmbiguousPrePos {
                                function: function.name.clone(),
                            });
                        }
                        PrePosPolicy::Nest => {
                            Self::assemble(&self.global_pre, &own, &self.global_pos)?
                        }
                        PrePosPolicy::FunctionOverrides => Self::assemble(&[], &own, &[])?,
                    }
                }
            }
            (handler, None) => {
                let own: Vec<RawStep> = handler.iter().cloned().collect();
                Self::assemble(&self.global_pre, &own, &self.global_pos)?
            }
        };

        tracing::debug!(
            function = %function.name,
            steps = pipeline.len(),
            "assembled pipeline"
        );

        Ok(pipeline)
    }
}
