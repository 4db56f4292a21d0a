//! Build orchestration.
//!
//! # Build Process
//!
//! 1. Load and validate `imports.config.json` from the project root
//! 2. Build the rewrite pipeline from it
//! 3. Discover sources and hand each one to its loader, in order
//! 4. Write `index.html` linking every collected stylesheet
//!
//! Files are processed one at a time; the first error aborts the build.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use nobundle_config::{ConfigDiscovery, ImportsConfig, validate_fs};

use crate::discovery::discover_sources;
use crate::entrypoint::write_entrypoint;
use crate::error::{Error, Result};
use crate::loaders::{BareSpecifier, LoadContext, LoaderRegistry};
use crate::pipeline::Pipeline;

/// Default output directory name, created inside the input root.
pub const DEFAULT_OUTPUT_DIR: &str = "dist";

#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
}

impl BuildOptions {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: None,
        }
    }

    pub fn output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// `output`, or `<input>/dist`.
    pub fn output_dir(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.input.join(DEFAULT_OUTPUT_DIR))
    }
}

/// What a build produced.
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    pub output_dir: PathBuf,
    /// Files handled, keyed by loader name.
    pub files_by_loader: BTreeMap<&'static str, usize>,
    /// Discovered files no loader claimed.
    pub skipped: usize,
    pub stylesheets: Vec<String>,
    pub bare_specifiers: Vec<BareSpecifier>,
    pub entrypoint: PathBuf,
    pub duration: Duration,
}

impl BuildReport {
    pub fn files_processed(&self) -> usize {
        self.files_by_loader.values().sum()
    }
}

/// Runs builds with a fixed loader set.
pub struct Builder {
    loaders: LoaderRegistry,
}

impl Builder {
    pub fn new() -> Self {
        Self {
            loaders: LoaderRegistry::standard(),
        }
    }

    pub fn with_loaders(loaders: LoaderRegistry) -> Self {
        Self { loaders }
    }

    /// Load configuration from the input root and build.
    pub async fn build(&self, options: &BuildOptions) -> Result<BuildReport> {
        let config = ConfigDiscovery::new(&options.input).load()?;
        self.build_with_config(options, &config).await
    }

    /// Build with an already loaded configuration.
    pub async fn build_with_config(
        &self,
        options: &BuildOptions,
        config: &ImportsConfig,
    ) -> Result<BuildReport> {
        let start = Instant::now();
        let root = options.input.as_path();
        let output = options.output_dir();

        validate_fs(config, root)?;
        let pipeline = Pipeline::from_config(config)?;
        create_dir(&output).await?;

        let files = discover_sources(root, &output)?;
        tracing::info!(
            root = %root.display(),
            output = %output.display(),
            files = files.len(),
            "starting build"
        );

        let mut report = BuildReport {
            output_dir: output.clone(),
            ..BuildReport::default()
        };
        let mut ctx = LoadContext {
            root,
            output: &output,
            config,
            pipeline: &pipeline,
            stylesheets: &mut report.stylesheets,
            bare_specifiers: &mut report.bare_specifiers,
        };

        for file in &files {
            let Some(loader) = self.loaders.find(file) else {
                tracing::debug!(file = %file, "no loader; skipping");
                report.skipped += 1;
                continue;
            };
            create_dir(&output.join(file.output_directory())).await?;
            loader.load(file, &mut ctx).await?;
            *report.files_by_loader.entry(loader.name()).or_default() += 1;
        }

        report.entrypoint = write_entrypoint(&output, &config.settings, &report.stylesheets).await?;
        report.duration = start.elapsed();
        tracing::info!(
            files = report.files_processed(),
            stylesheets = report.stylesheets.len(),
            bare = report.bare_specifiers.len(),
            "build finished"
        );
        Ok(report)
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

/// Build with the standard loaders.
pub async fn build(options: &BuildOptions) -> Result<BuildReport> {
    Builder::new().build(options).await
}

async fn create_dir(path: &Path) -> Result<()> {
    tokio::fs::create_dir_all(path)
        .await
        .map_err(|e| Error::io(path, e))
}
