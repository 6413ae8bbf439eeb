//! Chain emitter
//!
//! Entry point of code generation: build the chain program for a pipeline,
//! then hand it to the renderer of the requested variant.

use super::program::ChainProgram;
use super::{javascript, typescript};
use crate::error::Result;
use middleflow_core::{Pipeline, Variant};
use std::fmt;

/// Generated source text, tagged with its variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceText {
    pub variant: Variant,
    pub text: String,
}

impl SourceText {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// File extension the text should be written with
    pub fn extension(&self) -> &'static str {
        self.variant.extension()
    }
}

impl fmt::Display for SourceText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Chain emitter
pub struct ChainEmitter;

impl ChainEmitter {
    /// Render `pipeline` as an entry point of the given variant
    ///
    /// `import_base` is the path from the artifact's folder back to the
    /// service root, e.g. `..` for an artifact in `.middleware/`. The output
    /// is a pure function of its inputs: the same pipeline always renders
    /// byte-identical text.
    pub fn emit(pipeline: &Pipeline, variant: Variant, import_base: &str) -> Result<SourceText> {
        let program = ChainProgram::build(pipeline, import_base)?;

        let text = match variant {
            Variant::JavaScript => javascript::render(&program),
            Variant::TypeScript => typescript::render(&program),
        };

        tracing::trace!(
            %variant,
            imports = program.imports.len(),
            links = program.calls.len(),
            "emitted chain"
        );

        Ok(SourceText { variant, text })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use middleflow_core::{CanonicalStep, HandlerRef};

    fn handler(reference: &str) -> HandlerRef {
        HandlerRef::parse(reference).unwrap()
    }

    #[test]
    fn test_empty_pipeline_renders_bare_chain() {
        let source = ChainEmitter::emit(&Pipeline::default(), Variant::JavaScript, "..").unwrap();
        assert!(source.as_str().contains("return Promise.resolve();"));
        assert!(!source.as_str().contains("require("));
    }

    #[test]
    fn test_then_catch_renders_then_before_catch() {
        let pipeline = Pipeline::new(vec![CanonicalStep::ThenCatch(
            handler("a.h"),
            handler("c.h"),
        )]);
        let source = ChainEmitter::emit(&pipeline, Variant::JavaScript, "..").unwrap();
        let then_at = source.as_str().find(".then(onSuccess(() => a.h(").unwrap();
        let catch_at = source.as_str().find(".catch(onFailure(() => c.h(").unwrap();
        assert!(then_at < catch_at);
    }

    #[test]
    fn test_typescript_imports_compiled_modules() {
        let pipeline = Pipeline::new(vec![CanonicalStep::Then(handler("src/auth.check"))]);
        let source = ChainEmitter::emit(&pipeline, Variant::TypeScript, "..").unwrap();
        assert!(source
            .as_str()
            .contains(r#"import * as src_auth from "../src/auth.js";"#));
        assert_eq!(source.extension(), "ts");
    }
}
