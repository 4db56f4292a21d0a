//! The static `index.html` shell.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use nobundle_config::BuildSettings;

use crate::error::{Error, Result};

pub const ENTRYPOINT_FILE: &str = "index.html";

/// Render the HTML document. Stylesheets are linked in the given order,
/// after the global stylesheet.
pub fn render_entrypoint(settings: &BuildSettings, stylesheets: &[String]) -> String {
    let mut links = String::new();
    for href in stylesheets {
        let _ = writeln!(links, "    <link rel=\"stylesheet\" href=\"{}\">", escape_attr(href));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="">
  <head>
    <title></title>
    <meta charset="utf-8">
    <meta http-equiv="X-UA-Compatible" content="IE=edge">
    <meta name="viewport" content="width=device-width,initial-scale=1.0">
    <link rel="icon" href="{favicon}">
    <!-- Styles -->
    <link rel="stylesheet" href="{global}">
{links}    <!-- Entrypoint -->
    <script type="module" src="{entry}"></script>
  </head>
  <body>
    <div id="app"></div>
  </body>
</html>
"#,
        favicon = escape_attr(&settings.favicon),
        global = escape_attr(&settings.global_stylesheet),
        entry = escape_attr(&settings.entrypoint),
    )
}

/// Write `index.html` into `output` and return its path.
pub async fn write_entrypoint(
    output: &Path,
    settings: &BuildSettings,
    stylesheets: &[String],
) -> Result<PathBuf> {
    let path = output.join(ENTRYPOINT_FILE);
    tokio::fs::write(&path, render_entrypoint(settings, stylesheets))
        .await
        .map_err(|e| Error::io(&path, e))?;
    tracing::debug!(path = %path.display(), stylesheets = stylesheets.len(), "wrote entrypoint");
    Ok(path)
}

fn escape_attr(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}
