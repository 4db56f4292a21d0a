//! Configuration model for `imports.config.json`.
//!
//! The file declares how bare package imports are remapped to pinned module
//! URLs, which output files are already self-contained leaves, which path
//! aliases the project uses, and a handful of build settings.
//!
//! ```json
//! {
//!   "importOptions": {
//!     "axios": { "transform": "/modules/axios@0.24.0.esm.min.js", "skipDefaultConversion": true },
//!     "@heroicons/vue/[^/]*$": { "transform": "/modules/$0/${member}.js" }
//!   },
//!   "excludedLibraries": ["vue@3.2.21.esm.min.prod.js"],
//!   "aliases": [{ "alias": "@/", "replacement": "/src/" }],
//!   "settings": { "entrypoint": "/src/main.js" }
//! }
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConfigError, Result};
use crate::settings::BuildSettings;

/// Name of the configuration file expected at the project root.
pub const CONFIG_FILE_NAME: &str = "imports.config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ImportsConfig {
    /// Package name (or regex pattern) to remap entry. Declaration order is
    /// significant: patterns are tried in the order they were written.
    #[serde(default)]
    pub import_options: IndexMap<String, ImportOption>,

    /// Output file names that have no internal imports and are copied verbatim.
    #[serde(default)]
    pub excluded_libraries: Vec<String>,

    #[serde(default = "default_aliases")]
    pub aliases: Vec<AliasConfig>,

    #[serde(default)]
    pub settings: BuildSettings,
}

/// One `importOptions` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ImportOption {
    /// Target template. `${member}` expands to the imported symbol, `$0` to
    /// the whole pattern match and `$1`..`$9` to capture groups.
    pub transform: String,

    /// Keep the original import form instead of converting each named
    /// import into a default import of its own module.
    #[serde(default)]
    pub skip_default_conversion: bool,
}

/// A literal path prefix substitution (e.g. `@/` to `/src/`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AliasConfig {
    pub alias: String,
    pub replacement: String,
}

pub fn default_aliases() -> Vec<AliasConfig> {
    vec![AliasConfig {
        alias: "@/".to_string(),
        replacement: "/src/".to_string(),
    }]
}

/// Characters that only show up in a key when it is meant as a regex.
///
/// Excludes `.` and `-`, which appear in package names.
const PATTERN_SYNTAX: &[char] = &['[', ']', '(', ')', '{', '}', '*', '+', '?', '^', '$', '|', '\\'];

/// Whether an `importOptions` key is a regex pattern rather than a package name.
pub fn is_pattern(key: &str) -> bool {
    key.contains(PATTERN_SYNTAX)
}

impl Default for ImportsConfig {
    fn default() -> Self {
        Self {
            import_options: IndexMap::new(),
            excluded_libraries: Vec::new(),
            aliases: default_aliases(),
            settings: BuildSettings::default(),
        }
    }
}

impl ImportsConfig {
    /// Create from serde_json::Value (for programmatic config)
    ///
    /// # Example
    ///
    /// ```
    /// use nobundle_config::ImportsConfig;
    /// use serde_json::json;
    ///
    /// let config = ImportsConfig::from_value(json!({
    ///     "importOptions": {
    ///         "vue": { "transform": "/modules/vue.js", "skipDefaultConversion": true }
    ///     }
    /// }))
    /// .unwrap();
    /// assert!(config.import_options["vue"].skip_default_conversion);
    /// ```
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Parse the JSON text of an `imports.config.json` file.
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| ConfigError::InvalidValue {
            field: CONFIG_FILE_NAME.to_string(),
            hint: Some(format!("Invalid JSON: {e}")),
        })
    }

    /// Whether `file_name` (name plus extension) is a known dependency-graph leaf.
    pub fn is_excluded_library(&self, file_name: &str) -> bool {
        self.excluded_libraries.iter().any(|lib| lib == file_name)
    }

    /// Keys of `importOptions` that are regex patterns, in declaration order.
    pub fn pattern_keys(&self) -> impl Iterator<Item = &str> {
        self.import_options
            .keys()
            .map(String::as_str)
            .filter(|key| is_pattern(key))
    }
}
