//! AST definitions
//!
//! Build-time representation of middleware steps, from the raw wire shape
//! down to the canonical pipeline handed to the compiler.

pub mod declaration;
pub mod handler;
pub mod pipeline;
pub mod step;
pub mod variant;

pub use declaration::{FunctionDeclaration, MiddlewareDeclaration, PrePosDeclaration};
pub use handler::HandlerRef;
pub use pipeline::Pipeline;
pub use step::{CanonicalStep, RawStep};
pub use variant::Variant;
