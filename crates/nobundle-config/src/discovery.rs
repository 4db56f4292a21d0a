//! File-based config discovery for CLI use
//!
//! Finds `imports.config.json` at a project root and loads it, applying
//! environment overrides and schema validation.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{CONFIG_FILE_NAME, ImportsConfig};
use crate::error::{ConfigError, Result};
use crate::validation::{ConfigValidator, SchemaValidator};

/// File-based configuration discovery
///
/// # Example
///
/// ```no_run
/// use nobundle_config::ConfigDiscovery;
///
/// let discovery = ConfigDiscovery::new("my-app");
/// let config = discovery.load().unwrap();
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Path of the config file if it exists at the root.
    pub fn find(&self) -> Option<PathBuf> {
        let path = self.root.join(CONFIG_FILE_NAME);
        path.is_file().then_some(path)
    }

    /// Load and validate the config file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the root has no `imports.config.json`.
    pub fn load(&self) -> Result<ImportsConfig> {
        let path = self.find().ok_or_else(|| ConfigError::NotFound {
            file: CONFIG_FILE_NAME,
            root: self.root.clone(),
        })?;
        self.load_from(&path)
    }

    fn load_from(&self, path: &Path) -> Result<ImportsConfig> {
        tracing::debug!(path = %path.display(), "loading import configuration");

        let content = fs::read_to_string(path)?;
        let mut config = ImportsConfig::from_json_str(&content)?;
        config.settings = config.settings.with_env_overrides()?;

        SchemaValidator.validate(&config)?;

        tracing::debug!(
            import_options = config.import_options.len(),
            excluded = config.excluded_libraries.len(),
            aliases = config.aliases.len(),
            "configuration loaded"
        );
        Ok(config)
    }
}
