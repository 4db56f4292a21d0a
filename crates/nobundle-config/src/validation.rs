//! Config validation strategies
//!
//! Schema validation runs on every load. Filesystem validation is opt-in and
//! only checks things that must exist before a build starts.

use std::path::{Path, PathBuf};

use regex::Regex;

use crate::config::ImportsConfig;
use crate::error::{ConfigError, Result};

pub trait ConfigValidator {
    fn validate(&self, config: &ImportsConfig) -> Result<()>;
}

/// Schema-only validation (no filesystem checks)
///
/// # Example
///
/// ```
/// use nobundle_config::{ConfigValidator, ImportsConfig, SchemaValidator};
///
/// let config = ImportsConfig::default();
/// SchemaValidator.validate(&config).unwrap();
/// ```
pub struct SchemaValidator;

impl ConfigValidator for SchemaValidator {
    fn validate(&self, config: &ImportsConfig) -> Result<()> {
        for (key, option) in &config.import_options {
            if key.trim().is_empty() {
                return Err(ConfigError::SchemaValidation {
                    message: "importOptions keys cannot be empty".to_string(),
                    hint: Some("Use a package name or a regex pattern as the key".to_string()),
                });
            }

            if option.transform.trim().is_empty() {
                return Err(ConfigError::SchemaValidation {
                    message: format!("transform for '{key}' is empty"),
                    hint: Some("Point it at the module URL the import should load".to_string()),
                });
            }
        }

        for pattern in config.pattern_keys() {
            Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;
        }

        for library in &config.excluded_libraries {
            if library.trim().is_empty() || library.contains('/') {
                return Err(ConfigError::SchemaValidation {
                    message: format!("excluded library '{library}' must be a bare file name"),
                    hint: Some("List output file names such as 'vue.esm.min.js'".to_string()),
                });
            }
        }

        for alias in &config.aliases {
            if alias.alias.is_empty() {
                return Err(ConfigError::SchemaValidation {
                    message: "alias prefix cannot be empty".to_string(),
                    hint: Some("Use a prefix like '@/'".to_string()),
                });
            }
        }

        if config.settings.source_dir.is_empty() || config.settings.source_dir.contains('/') {
            return Err(ConfigError::InvalidValue {
                field: "settings.sourceDir".to_string(),
                hint: Some("Name a single top-level directory, e.g. 'src'".to_string()),
            });
        }

        Ok(())
    }
}

/// Filesystem validator (for CLI use)
///
/// Checks that the configured source directory exists under the project root.
pub struct FsValidator {
    root: PathBuf,
}

impl FsValidator {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl ConfigValidator for FsValidator {
    fn validate(&self, config: &ImportsConfig) -> Result<()> {
        SchemaValidator.validate(config)?;

        let source_dir = self.root.join(&config.settings.source_dir);
        if !source_dir.is_dir() {
            return Err(ConfigError::InvalidValue {
                field: "settings.sourceDir".to_string(),
                hint: Some(format!("{} is not a directory", source_dir.display())),
            });
        }
        Ok(())
    }
}

/// Convenience wrapper around [`SchemaValidator`].
pub fn validate_schema(config: &ImportsConfig) -> Result<()> {
    SchemaValidator.validate(config)
}

/// Convenience wrapper around [`FsValidator`].
pub fn validate_fs(config: &ImportsConfig, root: impl AsRef<Path>) -> Result<()> {
    FsValidator::new(root).validate(config)
}
