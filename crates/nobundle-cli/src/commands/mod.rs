//! Command implementations.

pub mod build;
pub(crate) mod utils;

pub use build::execute as build_execute;
