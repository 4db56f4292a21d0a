//! Configuration for nobundle builds.
//!
//! `imports.config.json` lives at the project root and controls how bare
//! package imports are remapped, which outputs are left untouched, and which
//! path aliases are expanded.

pub mod config;
pub mod discovery;
pub mod error;
pub mod settings;
pub mod validation;

pub use config::*;
pub use error::*;
pub use settings::*;

pub use discovery::ConfigDiscovery;
pub use validation::{ConfigValidator, FsValidator, SchemaValidator, validate_fs, validate_schema};
