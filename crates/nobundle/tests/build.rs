//! End-to-end builds of small Vue projects.

use std::fs;
use std::path::Path;

use nobundle::config::{ConfigError, default_aliases};
use nobundle::loaders::{ComponentLoader, ScriptLoader};
use nobundle::pipeline::audit;
use nobundle::{BuildOptions, Builder, Error, LoaderRegistry, build};
use oxc_allocator::Allocator;
use regex::Regex;
use tempfile::TempDir;
use walkdir::WalkDir;

const CONFIG: &str = r#"{
    "importOptions": {
        "vue": { "transform": "/modules/vue@3.2.21.esm.min.prod.js", "skipDefaultConversion": true },
        "@vue/devtools-api": { "transform": "/modules/vue-devtools-api@6.0.0.esm.min.js", "skipDefaultConversion": true },
        "vue-router": { "transform": "/modules/vue-router@4.0.12.esm.min.js", "skipDefaultConversion": true },
        "date-fns": { "transform": "/modules/date-fns@2.26.0.esm.min.js", "skipDefaultConversion": true },
        "axios": { "transform": "/modules/axios@0.24.0.esm.min.js", "skipDefaultConversion": true },
        "@heroicons/vue/[^/]*$": { "transform": "/modules/$0/${member}.js" }
    },
    "excludedLibraries": ["vue@3.2.21.esm.min.prod.js"]
}"#;

const APP_VUE: &str = r#"<template>
  <div class="app">
    <img src="@/assets/logo.png">
    <my-button @click="load"><home-icon /></my-button>
  </div>
</template>

<script>
import axios from 'axios'
import { HomeIcon } from '@heroicons/vue/outline'
import MyButton from './components/Button'

export default {
  name: 'App',
  components: { MyButton, HomeIcon },
  methods: {
    load() {
      return axios.get('/api')
    },
  },
}
</script>

<style>
  .app {
    margin: 0;
  }
</style>
"#;

const BUTTON_VUE: &str = r#"<template>
  <button><slot /></button>
</template>

<script setup>
const label = 'x'
</script>

<style>
button { color: red; }
</style>
"#;

const MAIN_JS: &str = r#"import { createApp } from 'vue'
import App from './App.vue'
import './index.css'

createApp(App).mount('#app')
"#;

const ROUTER_JS: &str = r#"import { createRouter, createWebHistory } from 'vue-router'
import { format, parseISO as parse } from 'date-fns'
export { setupDevtoolsPlugin } from '@vue/devtools-api'
export * from './components/Button'

export const stamp = (iso) => format(parse(iso), 'yyyy')
export const router = createRouter({
  history: createWebHistory(),
  routes: [{ path: '/', component: () => import('@/App.vue') }],
})
"#;

const VENDORED_VUE: &str = "export const createApp=()=>{};;;\n/* prebuilt */\n";

fn write(root: &Path, rel: &str, contents: &[u8]) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn fixture() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "imports.config.json", CONFIG.as_bytes());
    write(root, "package.json", b"{}");
    write(root, "src/main.js", MAIN_JS.as_bytes());
    write(root, "src/App.vue", APP_VUE.as_bytes());
    write(root, "src/router.js", ROUTER_JS.as_bytes());
    write(root, "src/components/Button/Button.vue", BUTTON_VUE.as_bytes());
    write(root, "src/components/Button/Button.css", b".unused {}");
    write(root, "src/assets/logo.png", &[0x89, b'P', b'N', b'G']);
    write(root, "public/favicon.ico", &[0, 0, 1, 0]);
    write(root, "modules/vue@3.2.21.esm.min.prod.js", VENDORED_VUE.as_bytes());
    write(
        root,
        "modules/helper.js",
        b"export function helperFunction(someValue) {\n  const incremented = someValue + 1;\n  return incremented;\n}\n",
    );
    dir
}

fn read(root: &Path, rel: &str) -> String {
    fs::read_to_string(root.join(rel)).unwrap_or_else(|e| panic!("{rel}: {e}"))
}

#[tokio::test]
async fn builds_project_into_dist() {
    let dir = fixture();
    let root = dir.path();
    let report = build(&BuildOptions::new(root)).await.unwrap();
    let dist = root.join("dist");
    assert_eq!(report.output_dir, dist);

    // Directory import expands to the component script, not the stylesheet.
    let app = read(&dist, "src/App.js");
    assert!(app.contains("from './components/Button/Button.js'"), "{app}");
    assert!(app.contains("import axios from '/modules/axios@0.24.0.esm.min.js'"), "{app}");
    assert!(
        app.contains("import HomeIcon from '/modules/@heroicons/vue/outline/HomeIcon.js'"),
        "{app}"
    );
    assert!(app.contains("template: `"), "{app}");
    assert!(app.contains(r#"<img src="/src/assets/logo.png">"#), "{app}");
    assert_eq!(read(&dist, "src/App.css"), ".app {\n  margin: 0;\n}");

    // A setup-only component still default-exports its options.
    let button = read(&dist, "src/components/Button/Button.js");
    let export_at = button.find("export default {").unwrap();
    let template_at = button.find("template: `").unwrap();
    let setup_at = button.find("setup() {").unwrap();
    let body_at = button.find("const label = 'x'").unwrap();
    assert!(export_at < template_at && template_at < setup_at && setup_at < body_at, "{button}");
    assert!(dist.join("src/components/Button/Button.css").is_file());

    let main = read(&dist, "src/main.js");
    assert!(main.contains("import { createApp } from '/modules/vue@3.2.21.esm.min.prod.js'"), "{main}");
    assert!(main.contains("import App from './App.js'"), "{main}");
    assert!(!main.contains("index.css"), "{main}");

    // Excluded libraries are copied untouched; other non-source scripts are minified.
    assert_eq!(
        fs::read(dist.join("modules/vue@3.2.21.esm.min.prod.js")).unwrap(),
        VENDORED_VUE.as_bytes()
    );
    let helper = read(&dist, "modules/helper.js");
    assert!(helper.contains("helperFunction"));
    assert!(!helper.contains("incremented"), "{helper}");

    assert_eq!(fs::read(dist.join("src/assets/logo.png")).unwrap(), [0x89, b'P', b'N', b'G']);
    assert!(dist.join("favicon.ico").is_file());
    assert!(!dist.join("public").exists());
    assert!(!dist.join("package.json").exists());

    let html = read(&dist, "index.html");
    let app_css = html.find(r#"href="/src/App.css""#).unwrap();
    let button_css = html.find(r#"href="/src/components/Button/Button.css""#).unwrap();
    assert!(app_css < button_css);
    assert!(html.contains(r#"<script type="module" src="/src/main.js"></script>"#));

    assert_eq!(report.stylesheets, vec!["/src/App.css", "/src/components/Button/Button.css"]);
    assert_eq!(report.files_by_loader.get("component"), Some(&2));
    assert_eq!(report.files_by_loader.get("script"), Some(&4));
    assert_eq!(report.files_by_loader.get("asset"), Some(&1));
    assert_eq!(report.files_by_loader.get("icon"), Some(&1));
    assert!(report.bare_specifiers.is_empty(), "{:?}", report.bare_specifiers);
}

#[tokio::test]
async fn packages_that_skip_conversion_keep_named_imports() {
    let dir = fixture();
    build(&BuildOptions::new(dir.path())).await.unwrap();

    let router = read(&dir.path().join("dist"), "src/router.js");
    assert!(
        router.contains(
            "import { createRouter, createWebHistory } from '/modules/vue-router@4.0.12.esm.min.js';"
        ),
        "{router}"
    );
    assert!(
        router.contains("import { format, parseISO as parse } from '/modules/date-fns@2.26.0.esm.min.js';"),
        "{router}"
    );
    assert!(
        router.contains("export { setupDevtoolsPlugin } from '/modules/vue-devtools-api@6.0.0.esm.min.js';"),
        "{router}"
    );
    assert!(router.contains("export * from './components/Button/Button.js';"), "{router}");
    assert!(router.contains("import('/src/App.js')"), "{router}");
    assert!(!router.contains("import createRouter"), "{router}");
}

#[tokio::test]
async fn emitted_scripts_have_no_bare_specifiers() {
    let dir = fixture();
    let report = build(&BuildOptions::new(dir.path())).await.unwrap();
    let loadable = Regex::new(r"^(\.{1,2}/|/|https?://)").unwrap();
    let aliases = default_aliases();

    let mut checked = 0;
    for entry in WalkDir::new(&report.output_dir) {
        let entry = entry.unwrap();
        if entry.path().extension().and_then(|e| e.to_str()) != Some("js") {
            continue;
        }
        let code = fs::read_to_string(entry.path()).unwrap();
        let allocator = Allocator::default();
        let program = nobundle::ecma::parse(&allocator, &code, entry.path()).unwrap();
        let bare = audit::bare_specifiers(&program, &aliases, entry.path());
        assert!(bare.is_empty(), "{}: {bare:?}", entry.path().display());
        checked += 1;

        for line in code.lines() {
            for quoted in line.split(" from '").skip(1) {
                let specifier = quoted.split('\'').next().unwrap_or_default();
                assert!(loadable.is_match(specifier), "{}: {line}", entry.path().display());
            }
        }
    }
    assert_eq!(checked, 6);
}

#[tokio::test]
async fn custom_output_directory() {
    let dir = fixture();
    let out = TempDir::new().unwrap();
    let report = build(&BuildOptions::new(dir.path()).output(out.path())).await.unwrap();
    assert_eq!(report.output_dir, out.path());
    assert!(out.path().join("index.html").is_file());
    assert!(!dir.path().join("dist").exists());
}

#[tokio::test]
async fn unconfigured_package_is_reported() {
    let dir = fixture();
    write(dir.path(), "src/util.js", b"import dayjs from 'dayjs';\nexport const now = () => dayjs();\n");

    let report = build(&BuildOptions::new(dir.path())).await.unwrap();
    assert_eq!(report.bare_specifiers.len(), 1);
    assert_eq!(report.bare_specifiers[0].file, "src/util.js");
    assert_eq!(report.bare_specifiers[0].specifier, "dayjs");
}

#[tokio::test]
async fn missing_config_fails_before_writing() {
    let dir = fixture();
    fs::remove_file(dir.path().join("imports.config.json")).unwrap();

    let err = build(&BuildOptions::new(dir.path())).await.unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::NotFound { .. })), "{err:?}");
    assert!(!dir.path().join("dist").exists());
}

#[tokio::test]
async fn unreadable_import_directory_aborts_build() {
    let dir = fixture();
    write(dir.path(), "src/broken.js", b"import thing from './missing/Thing';\n");

    let err = build(&BuildOptions::new(dir.path())).await.unwrap_err();
    match err {
        Error::Resolution { specifier, .. } => assert_eq!(specifier, "./missing/Thing"),
        other => panic!("expected Resolution, got {other:?}"),
    }
}

#[tokio::test]
async fn files_without_a_loader_are_skipped() {
    let dir = fixture();
    let mut loaders = LoaderRegistry::new();
    loaders.register(Box::new(ComponentLoader::default()));
    loaders.register(Box::new(ScriptLoader));

    let report = Builder::with_loaders(loaders)
        .build(&BuildOptions::new(dir.path()))
        .await
        .unwrap();
    // logo.png and favicon.ico
    assert_eq!(report.skipped, 2);
    assert!(!dir.path().join("dist/src/assets/logo.png").exists());
    assert!(dir.path().join("dist/src/App.js").is_file());
}
