//! middleflow Parser - raw step and declaration parser
//!
//! This crate normalizes raw middleware steps into canonical steps and reads
//! function declarations from YAML or JSON fragments.

pub mod declaration_parser;
pub mod error;
pub mod step_parser;
mod yaml_parser;

// Re-export main parser types
pub use declaration_parser::DeclarationParser;
pub use error::{ParseError, Result};
pub use step_parser::HandlerSpecParser;
