//! Build settings shared by every loader.

use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Prefix for environment overrides (`NOBUNDLE_ENTRYPOINT`, `NOBUNDLE_SOURCE_DIR`, ...).
pub const ENV_PREFIX: &str = "NOBUNDLE_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BuildSettings {
    /// Module script referenced from the generated `index.html`.
    #[serde(default = "default_entrypoint")]
    pub entrypoint: String,

    #[serde(default = "default_global_stylesheet")]
    pub global_stylesheet: String,

    #[serde(default = "default_favicon")]
    pub favicon: String,

    /// Files below this top-level directory are pretty-printed, everything
    /// else is minified.
    #[serde(default = "default_source_dir")]
    pub source_dir: String,
}

fn default_entrypoint() -> String {
    "/src/main.js".to_string()
}

fn default_global_stylesheet() -> String {
    "/index.css".to_string()
}

fn default_favicon() -> String {
    "/favicon.ico".to_string()
}

fn default_source_dir() -> String {
    "src".to_string()
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            entrypoint: default_entrypoint(),
            global_stylesheet: default_global_stylesheet(),
            favicon: default_favicon(),
            source_dir: default_source_dir(),
        }
    }
}

/// Environment layer. Env keys arrive lowercased and snake_cased, so they get
/// their own shape instead of going through the camelCase file schema.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SettingsOverrides {
    entrypoint: Option<String>,
    global_stylesheet: Option<String>,
    favicon: Option<String>,
    source_dir: Option<String>,
}

impl BuildSettings {
    /// Apply `NOBUNDLE_*` environment overrides on top of these settings.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides_from(Env::prefixed(ENV_PREFIX))
    }

    fn with_overrides_from(mut self, env: Env) -> Result<Self> {
        let overrides: SettingsOverrides = Figment::new()
            .merge(Serialized::defaults(SettingsOverrides::default()))
            .merge(env.only(&["entrypoint", "global_stylesheet", "favicon", "source_dir"]))
            .extract()
            .map_err(|e| ConfigError::InvalidValue {
                field: "environment".to_string(),
                hint: Some(format!("Check {ENV_PREFIX}* variables: {e}")),
            })?;

        if let Some(entrypoint) = overrides.entrypoint {
            tracing::debug!(%entrypoint, "entrypoint overridden from environment");
            self.entrypoint = entrypoint;
        }
        if let Some(stylesheet) = overrides.global_stylesheet {
            self.global_stylesheet = stylesheet;
        }
        if let Some(favicon) = overrides.favicon {
            self.favicon = favicon;
        }
        if let Some(source_dir) = overrides.source_dir {
            self.source_dir = source_dir;
        }
        Ok(self)
    }
}
