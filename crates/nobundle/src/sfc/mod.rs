//! Vue single-file component handling.
//!
//! [`scanner`] splits a `.vue` file into its top-level blocks without a full
//! HTML parser. [`compiler`] turns those blocks into a script body, a
//! template string and an optional stylesheet.

pub mod compiler;
pub mod scanner;

pub use compiler::{CompiledComponent, ComponentCompiler, VueCompiler};
pub use scanner::{SfcBlock, SfcDescriptor, scan};

/// Maximum file size in bytes (10 MB)
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Maximum number of top-level blocks to process
pub const MAX_BLOCKS: usize = 100;

/// Top-level block kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Template,
    Script,
    /// `<script setup>`
    ScriptSetup,
    Style,
}

impl BlockKind {
    pub fn tag(self) -> &'static str {
        match self {
            Self::Template => "template",
            Self::Script | Self::ScriptSetup => "script",
            Self::Style => "style",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractorError {
    /// File exceeds maximum allowed size
    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: usize, max: usize },

    #[error("Too many blocks: {count} found (max: {max} allowed)")]
    TooManyBlocks { count: usize, max: usize },

    /// Opening tag without a matching close tag
    #[error("Unclosed <{tag}> block starting at byte position {position}")]
    UnclosedBlock { tag: &'static str, position: usize },
}
