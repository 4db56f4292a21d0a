//! Turn a Vue source tree into ES modules a browser can load without a
//! bundler.
//!
//! Every module specifier in every emitted script is rewritten until it is
//! root-absolute, relative or a URL:
//!
//! ```text
//! discover ─▶ loader ─▶ parse ─▶ specifier pipeline ─▶ AST passes ─▶ print/minify ─▶ write
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use nobundle::{BuildOptions, build};
//!
//! let report = build(&BuildOptions::new("my-app")).await?;
//! println!("{} files written to {}", report.files_processed(), report.output_dir.display());
//! ```

pub mod alias;
pub mod build;
pub mod discovery;
pub mod ecma;
pub mod entrypoint;
pub mod error;
pub mod expand;
pub mod loaders;
pub mod pipeline;
pub mod remap;
pub mod sfc;
pub mod source_file;
pub mod specifier;

pub use alias::AliasResolver;
pub use build::{BuildOptions, BuildReport, Builder, DEFAULT_OUTPUT_DIR, build};
pub use error::{Error, Result};
pub use expand::DirectoryExpander;
pub use loaders::{BareSpecifier, LoadContext, Loader, LoaderRegistry, LoaderTest};
pub use pipeline::{ImportSite, Pipeline, SpecifierPass, TransformedModule};
pub use remap::RemapTable;
pub use source_file::SourceFile;
pub use specifier::SpecifierKind;

pub use nobundle_config as config;
