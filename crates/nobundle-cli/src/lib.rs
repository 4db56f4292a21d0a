//! nobundle CLI - turn a Vue source tree into ES modules a browser can load
//! without a bundler.
//!
//! # Architecture
//!
//! - [`cli`] - Argument definitions
//! - [`commands`] - The build command
//! - [`error`] - Error types with actionable messages
//! - [`logger`] - Structured logging with tracing
//! - [`ui`] - Status lines and the build summary
//!
//! # Example
//!
//! ```rust,no_run
//! use nobundle_cli::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result, ResultExt};
