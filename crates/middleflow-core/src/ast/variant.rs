//! Source variants
//!
//! The two source dialects a handler module can be authored in. The
//! declaration order doubles as the strictness order: the derived `Ord`
//! makes `TypeScript` compare greater than `JavaScript`.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Untyped sources (`.js`, `.jsx`)
    JavaScript,

    /// Typed sources (`.ts`, `.tsx`), dominates `JavaScript`
    TypeScript,
}

impl Variant {
    /// The weakest variant, used when nothing forces an upgrade
    pub const fn weakest() -> Self {
        Variant::JavaScript
    }

    /// File extension of artifacts generated for this variant
    pub const fn extension(self) -> &'static str {
        match self {
            Variant::JavaScript => "js",
            Variant::TypeScript => "ts",
        }
    }

    /// Source file extensions recognised as this variant
    pub const fn source_extensions(self) -> &'static [&'static str] {
        match self {
            Variant::JavaScript => &["js", "jsx"],
            Variant::TypeScript => &["ts", "tsx"],
        }
    }

    /// Stronger of the two
    pub fn strongest(self, other: Self) -> Self {
        self.max(other)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::JavaScript => write!(f, "javascript"),
            Variant::TypeScript => write!(f, "typescript"),
        }
    }
}
