//! Tests for loading imports.config.json from a project root.

use nobundle_config::{ConfigDiscovery, ConfigError};
use std::fs;
use tempfile::TempDir;

fn write_config(dir: &TempDir, body: &str) {
    fs::write(dir.path().join("imports.config.json"), body).expect("write config");
}

#[test]
fn load_full_config() {
    let dir = TempDir::new().expect("tempdir");
    write_config(
        &dir,
        r#"{
            "importOptions": {
                "axios": {
                    "transform": "/modules/axios@0.24.0.esm.min.js",
                    "skipDefaultConversion": true
                },
                "@heroicons/vue/[^/]*$": {
                    "transform": "/modules/$0/${member}.js"
                }
            },
            "excludedLibraries": ["vue@3.2.21.esm.min.prod.js"]
        }"#,
    );

    let config = ConfigDiscovery::new(dir.path()).load().expect("load");
    assert_eq!(config.import_options.len(), 2);
    assert!(config.import_options["axios"].skip_default_conversion);
    assert!(config.is_excluded_library("vue@3.2.21.esm.min.prod.js"));
    // Defaults fill in what the file omits.
    assert_eq!(config.aliases[0].alias, "@/");
    assert_eq!(config.settings.entrypoint, "/src/main.js");
}

#[test]
fn empty_object_is_a_valid_config() {
    let dir = TempDir::new().expect("tempdir");
    write_config(&dir, "{}");

    let config = ConfigDiscovery::new(dir.path()).load().expect("load");
    assert!(config.import_options.is_empty());
    assert!(config.excluded_libraries.is_empty());
}

#[test]
fn settings_and_aliases_can_be_overridden_in_file() {
    let dir = TempDir::new().expect("tempdir");
    write_config(
        &dir,
        r#"{
            "aliases": [{ "alias": "~/", "replacement": "/app/" }],
            "settings": { "sourceDir": "app", "entrypoint": "/app/main.js" }
        }"#,
    );

    let config = ConfigDiscovery::new(dir.path()).load().expect("load");
    assert_eq!(config.aliases.len(), 1);
    assert_eq!(config.aliases[0].replacement, "/app/");
    assert_eq!(config.settings.source_dir, "app");
    assert_eq!(config.settings.favicon, "/favicon.ico");
}

#[test]
fn malformed_json_is_invalid_value() {
    let dir = TempDir::new().expect("tempdir");
    write_config(&dir, "{ \"importOptions\": ");

    let err = ConfigDiscovery::new(dir.path()).load().unwrap_err();
    match err {
        ConfigError::InvalidValue { field, hint } => {
            assert_eq!(field, "imports.config.json");
            assert!(hint.unwrap().contains("Invalid JSON"));
        }
        other => panic!("expected InvalidValue, got {other:?}"),
    }
}

#[test]
fn bad_pattern_fails_at_load() {
    let dir = TempDir::new().expect("tempdir");
    write_config(
        &dir,
        r#"{ "importOptions": { "icons/([a-z": { "transform": "/x.js" } } }"#,
    );

    let err = ConfigDiscovery::new(dir.path()).load().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidPattern { ref pattern, .. } if pattern == "icons/([a-z"));
}
