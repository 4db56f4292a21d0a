//! Error handling for the nobundle CLI.
//!
//! [`CliError`] wraps the library errors and adds the CLI's own failure
//! modes. Engine errors carrying a configuration failure are unwrapped into
//! [`CliError::Config`] so both paths report the same way.
//!
//! # Example
//!
//! ```rust,no_run
//! use nobundle_cli::error::{Result, ResultExt};
//! use std::path::Path;
//!
//! fn read_config(path: &Path) -> Result<String> {
//!     std::fs::read_to_string(path).with_path(path)
//! }
//! ```

mod miette;

use std::path::PathBuf;

use nobundle_config::ConfigError;
use thiserror::Error;

pub use self::miette::cli_error_to_miette;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("Build failed: {0}")]
    Build(nobundle::Error),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("Directory {} does not exist", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Custom(String),
}

impl From<nobundle::Error> for CliError {
    fn from(err: nobundle::Error) -> Self {
        match err {
            nobundle::Error::Config(config) => Self::Config(config),
            other => Self::Build(other),
        }
    }
}

pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Attach context to fallible results.
pub trait ResultExt<T> {
    /// Turn a not-found I/O error into [`CliError::DirectoryNotFound`] for `path`.
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T>;

    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T>;

    fn context(self, msg: impl std::fmt::Display) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T> {
        self.map_err(|e| match e.into() {
            CliError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {
                CliError::DirectoryNotFound(path.as_ref().to_path_buf())
            }
            other => other,
        })
    }

    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{err}\n\nHint: {hint}"))
        })
    }

    fn context(self, msg: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{msg}: {err}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_missing_config_message() {
        let err: CliError = nobundle::Error::Config(ConfigError::NotFound {
            file: "imports.config.json",
            root: PathBuf::from("my-app"),
        })
        .into();
        assert!(matches!(err, CliError::Config(_)));
        assert_eq!(err.to_string(), "No imports.config.json found at project root my-app");
    }

    #[test]
    fn test_engine_errors_stay_build_errors() {
        let err: CliError = nobundle::Error::io("dist/x.js", io::Error::other("disk full")).into();
        assert!(matches!(err, CliError::Build(_)));
        assert!(err.to_string().contains("dist/x.js"));
    }

    #[test]
    fn test_directory_not_found_message() {
        let err = CliError::DirectoryNotFound(PathBuf::from("nope"));
        assert_eq!(err.to_string(), "Directory nope does not exist");
    }

    #[test]
    fn test_with_path_maps_not_found() {
        let result: std::result::Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::NotFound, "missing"));
        let err = result.with_path("some/dir").unwrap_err();
        assert!(matches!(err, CliError::DirectoryNotFound(p) if p == PathBuf::from("some/dir")));
    }

    #[test]
    fn test_with_hint_and_context() {
        let result: Result<()> = Err(CliError::Custom("boom".into()));
        let err = result.with_hint("try again").unwrap_err();
        assert_eq!(err.to_string(), "boom\n\nHint: try again");

        let result: Result<()> = Err(CliError::Custom("boom".into()));
        let err = result.context("Writing output").unwrap_err();
        assert_eq!(err.to_string(), "Writing output: boom");
    }
}
