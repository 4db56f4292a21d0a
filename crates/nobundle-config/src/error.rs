//! Error types for configuration discovery, loading and validation.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No {file} found at project root {}", root.display())]
    NotFound { file: &'static str, root: PathBuf },

    #[error("invalid config value for '{field}'{}", hint.as_ref().map(|h| format!(": {h}")).unwrap_or_default())]
    InvalidValue { field: String, hint: Option<String> },

    #[error("invalid import pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("schema validation failed: {message}{}", hint.as_ref().map(|h| format!("\n\nHint: {h}")).unwrap_or_default())]
    SchemaValidation {
        message: String,
        hint: Option<String>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_file_and_root() {
        let err = ConfigError::NotFound {
            file: "imports.config.json",
            root: PathBuf::from("/projects/app"),
        };
        let msg = err.to_string();
        assert!(msg.contains("imports.config.json"));
        assert!(msg.contains("/projects/app"));
    }

    #[test]
    fn invalid_value_without_hint() {
        let err = ConfigError::InvalidValue {
            field: "aliases".to_string(),
            hint: None,
        };
        assert_eq!(err.to_string(), "invalid config value for 'aliases'");
    }

    #[test]
    fn schema_validation_includes_hint() {
        let err = ConfigError::SchemaValidation {
            message: "transform for 'vue' is empty".to_string(),
            hint: Some("Point it at a module URL".to_string()),
        };
        let msg = err.to_string();
        assert!(msg.contains("transform for 'vue' is empty"));
        assert!(msg.contains("Hint: Point it at a module URL"));
    }
}
