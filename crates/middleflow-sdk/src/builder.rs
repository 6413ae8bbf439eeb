//! Middleware builder
//!
//! Runs one build pass: check the runtime, select the functions that need
//! an entry point, compile each one in its own task, then write the
//! results. Nothing is written unless every selected function compiled.

use crate::artifact::GeneratedArtifact;
use crate::config::BuildConfig;
use crate::error::{Result, SdkError};
use crate::writer::{ArtifactWriter, FileSystemWriter};
use middleflow_compiler::{
    ensure_supported_runtime, CompileError, Compiler, CompilerOptions, FileSystemProbe,
    ModuleProbe,
};
use middleflow_core::FunctionDeclaration;
use middleflow_parser::DeclarationParser;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinSet;

/// Builder for middleware entry points
///
/// # Example
///
/// ```rust,ignore
/// use middleflow_sdk::{BuildConfig, MiddlewareBuilder};
///
/// let builder = MiddlewareBuilder::new(BuildConfig::from_yaml(config_yaml)?)
///     .with_functions_yaml(functions_yaml)?;
///
/// let artifacts = builder.build_all().await?;
/// // ... package the service ...
/// builder.clean().await;
/// ```
pub struct MiddlewareBuilder {
    config: BuildConfig,
    functions: Vec<FunctionDeclaration>,
    probe: Option<Arc<dyn ModuleProbe>>,
    writer: Arc<dyn ArtifactWriter>,
}

/// State shared by the tasks of one build pass
struct BuildContext {
    compiler: Compiler,
    probe: Arc<dyn ModuleProbe>,
    folder: String,
}

impl BuildContext {
    /// Compile one function; `None` when its pipeline has no steps
    fn compile(&self, function: &FunctionDeclaration) -> Result<Option<GeneratedArtifact>> {
        ensure_file_name(&function.name)?;

        let pipeline = self.compiler.assemble(function)?;
        if pipeline.is_empty() {
            tracing::debug!(function = %function.name, "empty pipeline, nothing to generate");
            return Ok(None);
        }

        let compiled = self
            .compiler
            .compile_pipeline(&function.name, pipeline, self.probe.as_ref())?;

        let file_name = PathBuf::from(&self.folder).join(format!(
            "{}.{}",
            function.name,
            compiled.source.extension()
        ));

        Ok(Some(GeneratedArtifact {
            function: function.name.clone(),
            file_name,
            variant: compiled.variant(),
            step_count: compiled.pipeline.len(),
            handler: format!("{}/{}.handler", self.folder, function.name),
            source: compiled.source.text,
        }))
    }
}

/// The artifact of a function is named after it, so the name must stay
/// inside the output folder
fn ensure_file_name(name: &str) -> Result<()> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) if !name.contains(|c: char| c == '/' || c == '\\') => Ok(()),
        _ => Err(SdkError::InvalidFunctionName(name.to_string())),
    }
}

impl MiddlewareBuilder {
    /// Builder writing to the file system under `config.service_path`
    pub fn new(config: BuildConfig) -> Self {
        let writer = Arc::new(FileSystemWriter::new(config.service_path.clone()));
        Self {
            config,
            functions: Vec::new(),
            probe: None,
            writer,
        }
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    pub fn functions(&self) -> &[FunctionDeclaration] {
        &self.functions
    }

    /// Add a function declaration
    pub fn with_function(mut self, function: FunctionDeclaration) -> Self {
        self.functions.push(function);
        self
    }

    /// Add several function declarations, keeping their order
    pub fn with_functions(mut self, functions: impl IntoIterator<Item = FunctionDeclaration>) -> Self {
        self.functions.extend(functions);
        self
    }

    /// Add the functions of a YAML mapping of name to declaration
    pub fn with_functions_yaml(self, yaml: &str) -> Result<Self> {
        let functions = DeclarationParser::parse_functions(yaml).map_err(CompileError::from)?;
        Ok(self.with_functions(functions))
    }

    /// Replace the file system probe
    pub fn with_probe(mut self, probe: impl ModuleProbe + 'static) -> Self {
        self.probe = Some(Arc::new(probe));
        self
    }

    /// Replace the file system writer
    pub fn with_writer(mut self, writer: Arc<dyn ArtifactWriter>) -> Self {
        self.writer = writer;
        self
    }

    /// Build every function that needs an entry point
    ///
    /// A function is selected when global pre/pos steps are configured or
    /// when it declares `middleware` itself. Artifacts come back in
    /// declaration order. On error no artifact is written.
    pub async fn build_all(&self) -> Result<Vec<GeneratedArtifact>> {
        let context = Arc::new(self.context()?);

        let selected: Vec<FunctionDeclaration> = self
            .functions
            .iter()
            .filter(|function| self.is_selected(function))
            .cloned()
            .collect();

        if selected.is_empty() {
            tracing::debug!("no function needs middleware");
            return Ok(Vec::new());
        }

        let mut tasks = JoinSet::new();
        for (index, function) in selected.into_iter().enumerate() {
            let context = Arc::clone(&context);
            tasks.spawn(async move { (index, context.compile(&function)) });
        }

        let mut results = Vec::with_capacity(tasks.len());
        while let Some(joined) = tasks.join_next().await {
            results.push(joined?);
        }
        results.sort_by_key(|(index, _)| *index);

        // The first failure in declaration order wins, whatever finished first.
        let artifacts: Vec<GeneratedArtifact> = results
            .into_iter()
            .map(|(_, result)| result)
            .collect::<Result<Vec<_>>>()?
            .into_iter()
            .flatten()
            .collect();

        self.write_all(&artifacts).await?;
        Ok(artifacts)
    }

    /// Build a single named function
    ///
    /// Returns `None` when the function is not selected or its pipeline is
    /// empty.
    pub async fn build_function(&self, name: &str) -> Result<Option<GeneratedArtifact>> {
        let context = self.context()?;

        let function = self
            .functions
            .iter()
            .find(|function| function.name == name)
            .ok_or_else(|| SdkError::UnknownFunction(name.to_string()))?;

        if !self.is_selected(function) {
            return Ok(None);
        }

        let artifact = context.compile(function)?;
        if let Some(artifact) = &artifact {
            self.write_all(std::slice::from_ref(artifact)).await?;
        }
        Ok(artifact)
    }

    /// Remove the output folder, when configured to
    ///
    /// A missing folder is fine; any other failure is logged and ignored.
    pub async fn clean(&self) {
        if !self.config.clean_folder {
            return;
        }

        match self.writer.remove_dir(Path::new(self.config.folder())).await {
            Ok(()) => tracing::debug!(folder = %self.config.folder(), "removed middleware folder"),
            Err(err) if err.is_io_kind(std::io::ErrorKind::NotFound) => {
                tracing::debug!(folder = %self.config.folder(), "middleware folder already absent");
            }
            Err(err) => {
                tracing::warn!(folder = %self.config.folder(), error = %err, "failed to clean middleware folder");
            }
        }
    }

    fn is_selected(&self, function: &FunctionDeclaration) -> bool {
        !self.config.pre.is_empty() || !self.config.pos.is_empty() || function.middleware.is_some()
    }

    /// Per-pass context; fails before any work on an unsupported runtime
    fn context(&self) -> Result<BuildContext> {
        ensure_supported_runtime(&self.config.runtime)?;

        let options = CompilerOptions {
            import_base: self.config.path_to_root()?,
            pre_pos_policy: self.config.pre_pos_policy,
        };
        let compiler =
            Compiler::with_options(self.config.pre.clone(), self.config.pos.clone(), options);

        let probe: Arc<dyn ModuleProbe> = match &self.probe {
            Some(probe) => Arc::clone(probe),
            None => Arc::new(FileSystemProbe::new(&self.config.service_path)?),
        };

        Ok(BuildContext {
            compiler,
            probe,
            folder: self.config.folder().to_string(),
        })
    }

    async fn write_all(&self, artifacts: &[GeneratedArtifact]) -> Result<()> {
        if artifacts.is_empty() {
            return Ok(());
        }

        self.writer.create_dir(Path::new(self.config.folder())).await?;

        for artifact in artifacts {
            tracing::info!(
                "Middleware: setting {} middlewares for function {}",
                artifact.step_count,
                artifact.function
            );
            self.writer.write(&artifact.file_name, &artifact.source).await?;
        }

        Ok(())
    }
}
