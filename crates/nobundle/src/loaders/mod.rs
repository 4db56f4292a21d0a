//! Per-file loaders and the dispatcher that picks one.
//!
//! ```text
//! SourceFile ──▶ LoaderRegistry::find ──▶ ComponentLoader  (.vue)
//!                                     ├──▶ ScriptLoader     (.js)
//!                                     ├──▶ AssetLoader      (images, fonts, json)
//!                                     └──▶ IconLoader       (.ico)
//! ```
//!
//! The first loader whose [`LoaderTest`] matches wins; files no loader claims
//! are skipped.

mod asset;
mod component;
mod script;

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use nobundle_config::ImportsConfig;

use crate::error::{Error, Result};
use crate::pipeline::Pipeline;
use crate::source_file::SourceFile;

pub use asset::{AssetLoader, IconLoader};
pub use component::ComponentLoader;
pub use script::ScriptLoader;

/// Which files a loader claims, by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderTest {
    Extension(&'static str),
    OneOf(&'static [&'static str]),
}

impl LoaderTest {
    pub fn matches(self, extension: &str) -> bool {
        match self {
            Self::Extension(ext) => ext == extension,
            Self::OneOf(exts) => exts.contains(&extension),
        }
    }
}

/// A bare specifier that survived rewriting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BareSpecifier {
    pub file: String,
    pub specifier: String,
}

/// Shared state for one build, handed to every loader.
pub struct LoadContext<'b> {
    pub root: &'b Path,
    pub output: &'b Path,
    pub config: &'b ImportsConfig,
    pub pipeline: &'b Pipeline,
    /// Root-absolute stylesheet URLs, in the order components were emitted.
    pub stylesheets: &'b mut Vec<String>,
    pub bare_specifiers: &'b mut Vec<BareSpecifier>,
}

impl LoadContext<'_> {
    pub(crate) fn record_bare(&mut self, file: &SourceFile, found: Vec<String>) {
        self.bare_specifiers
            .extend(found.into_iter().map(|specifier| BareSpecifier {
                file: file.relative_path(),
                specifier,
            }));
    }
}

#[async_trait]
pub trait Loader: Send + Sync {
    fn name(&self) -> &'static str;

    fn test(&self) -> LoaderTest;

    /// Transform or copy `file`, returning the paths written.
    async fn load(&self, file: &SourceFile, ctx: &mut LoadContext<'_>) -> Result<Vec<PathBuf>>;
}

/// Ordered loader list; first match wins.
pub struct LoaderRegistry {
    loaders: Vec<Box<dyn Loader>>,
}

impl LoaderRegistry {
    pub fn new() -> Self {
        Self {
            loaders: Vec::new(),
        }
    }

    /// Component, script, asset and icon loaders, in that order.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(ComponentLoader::default()));
        registry.register(Box::new(ScriptLoader));
        registry.register(Box::new(AssetLoader));
        registry.register(Box::new(IconLoader));
        registry
    }

    pub fn register(&mut self, loader: Box<dyn Loader>) {
        self.loaders.push(loader);
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.loaders.iter().map(|l| l.name()).collect()
    }

    pub fn find(&self, file: &SourceFile) -> Option<&dyn Loader> {
        self.loaders
            .iter()
            .find(|l| l.test().matches(&file.extension))
            .map(|l| l.as_ref())
    }
}

impl Default for LoaderRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

pub(crate) async fn read_to_string(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| Error::io(path, e))
}

pub(crate) async fn write(path: &Path, contents: impl AsRef<[u8]>) -> Result<()> {
    tokio::fs::write(path, contents)
        .await
        .map_err(|e| Error::io(path, e))
}

pub(crate) async fn copy(from: &Path, to: &Path) -> Result<()> {
    tokio::fs::copy(from, to)
        .await
        .map(|_| ())
        .map_err(|e| Error::io(from, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(path: &str) -> SourceFile {
        SourceFile::from_relative(Path::new(path)).unwrap()
    }

    #[test]
    fn standard_order() {
        assert_eq!(
            LoaderRegistry::standard().names(),
            vec!["component", "script", "asset", "icon"]
        );
    }

    #[test]
    fn first_match_wins() {
        let registry = LoaderRegistry::standard();
        assert_eq!(registry.find(&file("src/App.vue")).map(|l| l.name()), Some("component"));
        assert_eq!(registry.find(&file("src/main.js")).map(|l| l.name()), Some("script"));
        assert_eq!(registry.find(&file("src/data.json")).map(|l| l.name()), Some("asset"));
        assert_eq!(registry.find(&file("src/font.woff2")).map(|l| l.name()), Some("asset"));
        assert_eq!(registry.find(&file("public/favicon.ico")).map(|l| l.name()), Some("icon"));
    }

    #[test]
    fn unclaimed_extensions_are_skipped() {
        let registry = LoaderRegistry::standard();
        assert!(registry.find(&file("src/notes.md")).is_none());
    }
}
