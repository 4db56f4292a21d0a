//! Error types for the rewriting engine and build orchestrator.

use std::path::PathBuf;

use nobundle_config::ConfigError;
use thiserror::Error;

use crate::sfc::ExtractorError;

/// Every failure aborts the build; nothing here is retried or skipped.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory-import expansion could not read the directory it needed.
    #[error("cannot resolve '{specifier}' imported from {}: {} is not readable", importer.display(), path.display())]
    Resolution {
        specifier: String,
        importer: PathBuf,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {message}", file.display())]
    Parse { file: PathBuf, message: String },

    #[error("failed to compile component {}: {message}", file.display())]
    Component { file: PathBuf, message: String },

    #[error("failed to extract blocks from {}: {source}", file.display())]
    Extract {
        file: PathBuf,
        #[source]
        source: ExtractorError,
    },

    #[error("failed to minify {}: {message}", file.display())]
    Minify { file: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// File the error is attributed to, where one is known.
    pub fn file(&self) -> Option<&std::path::Path> {
        match self {
            Self::Io { path, .. } => Some(path),
            Self::Resolution { importer, .. } => Some(importer),
            Self::Parse { file, .. }
            | Self::Component { file, .. }
            | Self::Extract { file, .. }
            | Self::Minify { file, .. } => Some(file),
            Self::Config(_) => None,
        }
    }
}
