//! Main compiler
//!
//! Provides one entry point over the three build stages: assemble a
//! function's pipeline, resolve its variant, emit its source.

use crate::assembler::{PipelineAssembler, PrePosPolicy};
use crate::codegen::{ChainEmitter, SourceText};
use crate::error::Result;
use crate::resolver::{ModuleProbe, Resolution, ResolveSession, VariantResolver};
use middleflow_core::{FunctionDeclaration, Pipeline, RawStep, Variant};

/// Compiler options
#[derive(Debug, Clone)]
pub struct CompilerOptions {
    /// Path from the generated artifact back to the service root
    pub import_base: String,

    /// How function-level pre/pos combine with the global lists
    pub pre_pos_policy: PrePosPolicy,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            import_base: "..".to_string(),
            pre_pos_policy: PrePosPolicy::default(),
        }
    }
}

/// Output of compiling one pipeline
#[derive(Debug, Clone)]
pub struct CompiledPipeline {
    /// Function the pipeline belongs to
    pub function: String,

    pub pipeline: Pipeline,

    /// Variant resolution, kept for the artifact's lifetime
    pub resolution: Resolution,

    pub source: SourceText,
}

impl CompiledPipeline {
    pub fn variant(&self) -> Variant {
        self.resolution.variant
    }
}

/// The middleflow compiler
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    options: CompilerOptions,
    assembler: PipelineAssembler,
}

impl Compiler {
    /// Compiler without global steps
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiler with global pre/pos lists and custom options
    pub fn with_options(
        global_pre: Vec<RawStep>,
        global_pos: Vec<RawStep>,
        options: CompilerOptions,
    ) -> Self {
        let assembler =
            PipelineAssembler::new(global_pre, global_pos).with_policy(options.pre_pos_policy);

        Self { options, assembler }
    }

    pub fn options(&self) -> &CompilerOptions {
        &self.options
    }

    pub fn assembler(&self) -> &PipelineAssembler {
        &self.assembler
    }

    /// Assemble the pipeline of a declared function
    pub fn assemble(&self, function: &FunctionDeclaration) -> Result<Pipeline> {
        self.assembler.assemble_function(function)
    }

    /// Resolve and emit an already assembled pipeline
    pub fn compile_pipeline(
        &self,
        function: &str,
        pipeline: Pipeline,
        probe: &dyn ModuleProbe,
    ) -> Result<CompiledPipeline> {
        let mut session = ResolveSession::new(probe);
        let resolution = VariantResolver::resolve_in(&pipeline, &mut session)?;
        let source = ChainEmitter::emit(&pipeline, resolution.variant, &self.options.import_base)?;

        tracing::debug!(
            function,
            variant = %resolution.variant,
            steps = pipeline.len(),
            "compiled pipeline"
        );

        Ok(CompiledPipeline {
            function: function.to_string(),
            pipeline,
            resolution,
            source,
        })
    }

    /// Assemble, resolve and emit one declared function
    pub fn compile_function(
        &self,
        function: &FunctionDeclaration,
        probe: &dyn ModuleProbe,
    ) -> Result<CompiledPipeline> {
        let pipeline = self.assemble(function)?;
        self.compile_pipeline(&function.name, pipeline, probe)
    }
}
