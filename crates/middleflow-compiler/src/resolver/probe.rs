//! Module probes
//!
//! A probe classifies a module path into a source variant, or reports that
//! no recognised source exists. When both a weak and a strong source exist
//! for the same module, the strong one wins.

use middleflow_core::Variant;
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

/// Classifies a module path into a source variant
pub trait ModuleProbe: Send + Sync {
    /// `None` when the module has no recognised source
    fn probe(&self, module_path: &str) -> Option<Variant>;
}

impl<F> ModuleProbe for F
where
    F: Fn(&str) -> Option<Variant> + Send + Sync,
{
    fn probe(&self, module_path: &str) -> Option<Variant> {
        self(module_path)
    }
}

/// Probe that looks for source files under a service root
///
/// `src/auth` is classified as `TypeScript` when `src/auth.ts` or
/// `src/auth.tsx` exists, else as `JavaScript` when `src/auth.js` or
/// `src/auth.jsx` exists.
#[derive(Debug, Clone)]
pub struct FileSystemProbe {
    root: PathBuf,
}

impl FileSystemProbe {
    /// Create a probe rooted at `root` (made absolute, need not exist)
    pub fn new<P: AsRef<Path>>(root: P) -> std::io::Result<Self> {
        let root = root.as_ref().absolutize()?.to_path_buf();
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn has_source(&self, module_path: &str, variant: Variant) -> bool {
        variant
            .source_extensions()
            .iter()
            .any(|ext| self.root.join(format!("{}.{}", module_path, ext)).is_file())
    }
}

impl ModuleProbe for FileSystemProbe {
    fn probe(&self, module_path: &str) -> Option<Variant> {
        [Variant::TypeScript, Variant::JavaScript]
            .into_iter()
            .find(|variant| self.has_source(module_path, *variant))
    }
}
