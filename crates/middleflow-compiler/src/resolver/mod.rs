//! Variant resolution
//!
//! Decides which source variant one generated artifact targets, by probing
//! every module its pipeline references, and checks the global runtime
//! precondition of a build pass.

mod probe;
mod runtime;
mod variant_resolver;

pub use probe::{FileSystemProbe, ModuleProbe};
pub use runtime::{ensure_supported_runtime, is_supported_runtime};
pub use variant_resolver::{Resolution, ResolveSession, VariantResolver};
