//! Variant resolver
//!
//! One pipeline produces one artifact, so one variant must serve every
//! module the pipeline references. The strongest probed variant wins; a
//! pipeline that references nothing stays on the weakest variant.

use super::probe::ModuleProbe;
use crate::error::{CompileError, Result};
use middleflow_core::{Pipeline, Variant};
use std::collections::HashMap;

/// Probe results memoized for the lifetime of one pipeline's resolution
pub struct ResolveSession<'a> {
    probe: &'a dyn ModuleProbe,
    cache: HashMap<String, Option<Variant>>,
    probe_calls: usize,
}

impl<'a> ResolveSession<'a> {
    pub fn new(probe: &'a dyn ModuleProbe) -> Self {
        Self {
            probe,
            cache: HashMap::new(),
            probe_calls: 0,
        }
    }

    /// Classify a module, probing it at most once per session
    pub fn classify(&mut self, module_path: &str) -> Option<Variant> {
        if let Some(cached) = self.cache.get(module_path) {
            return *cached;
        }

        self.probe_calls += 1;
        let variant = self.probe.probe(module_path);
        self.cache.insert(module_path.to_string(), variant);
        variant
    }

    /// Number of times the underlying probe was consulted
    pub fn probe_calls(&self) -> usize {
        self.probe_calls
    }
}

/// Outcome of resolving one pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Variant of the generated artifact
    pub variant: Variant,

    /// Each referenced module and the variant it probed as, in step order
    pub modules: Vec<(String, Variant)>,
}

impl Resolution {
    /// Modules that forced the upgrade to the resolved variant
    pub fn upgraded_by(&self) -> impl Iterator<Item = &str> {
        self.modules
            .iter()
            .filter(move |(_, variant)| *variant == self.variant && self.variant != Variant::weakest())
            .map(|(module, _)| module.as_str())
    }
}

/// Variant resolver
pub struct VariantResolver;

impl VariantResolver {
    /// Resolve the artifact variant of `pipeline`
    pub fn resolve(pipeline: &Pipeline, probe: &dyn ModuleProbe) -> Result<Variant> {
        Ok(Self::resolution(pipeline, probe)?.variant)
    }

    /// Resolve with per-module detail
    pub fn resolution(pipeline: &Pipeline, probe: &dyn ModuleProbe) -> Result<Resolution> {
        let mut session = ResolveSession::new(probe);
        Self::resolve_in(pipeline, &mut session)
    }

    /// Resolve using an existing session
    ///
    /// Fails with `UnresolvedModule` naming the first module, in step order,
    /// that the probe cannot classify.
    pub fn resolve_in(pipeline: &Pipeline, session: &mut ResolveSession<'_>) -> Result<Resolution> {
        let mut variant = Variant::weakest();
        let mut modules = Vec::new();

        for module_path in pipeline.module_paths() {
            let probed = session
                .classify(module_path)
                .ok_or_else(|| CompileError::UnresolvedModule {
                    module: module_path.to_string(),
                })?;

            variant = variant.strongest(probed);
            modules.push((module_path.to_string(), probed));
        }

        tracing::debug!(
            %variant,
            modules = modules.len(),
            probes = session.probe_calls(),
            "resolved pipeline variant"
        );

        Ok(Resolution { variant, modules })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use middleflow_core::{CanonicalStep, HandlerRef};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn pipeline(refs: &[&str]) -> Pipeline {
        refs.iter()
            .map(|r| CanonicalStep::Then(HandlerRef::parse(r).unwrap()))
            .collect()
    }

    #[test]
    fn test_session_probes_each_module_once() {
        let calls = AtomicUsize::new(0);
        let probe = |_: &str| {
            calls.fetch_add(1, Ordering::SeqCst);
            Some(Variant::JavaScript)
        };

        let p = pipeline(&["a.one", "a.two", "b.one", "a.three"]);
        let mut session = ResolveSession::new(&probe);
        VariantResolver::resolve_in(&p, &mut session).unwrap();
        VariantResolver::resolve_in(&p, &mut session).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(session.probe_calls(), 2);
    }

    #[test]
    fn test_upgraded_by_lists_strong_modules() {
        let probe = |m: &str| {
            Some(if m.starts_with("ts") {
                Variant::TypeScript
            } else {
                Variant::JavaScript
            })
        };
        let resolution =
            VariantResolver::resolution(&pipeline(&["js1.h", "ts1.h", "js2.h"]), &probe).unwrap();

        assert_eq!(resolution.variant, Variant::TypeScript);
        assert_eq!(resolution.upgraded_by().collect::<Vec<_>>(), vec!["ts1"]);
    }
}
