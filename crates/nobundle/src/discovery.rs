//! Source tree enumeration.

use std::path::Path;

use walkdir::{DirEntry, WalkDir};

use crate::error::{Error, Result};
use crate::source_file::{SourceFile, is_recognized};

const IGNORED_DIRS: &[&str] = &["node_modules", "dist"];

/// Root-level extensions that belong to project tooling (`package.json`,
/// `vite.config.js`) rather than to the app.
const ROOT_TOOLING_EXTENSIONS: &[&str] = &["js", "json"];

/// Enumerate every recognized file under `root`, in a stable order.
///
/// `node_modules`, `dist`, the output directory and any dot-prefixed entry
/// are skipped.
pub fn discover_sources(root: &Path, output_dir: &Path) -> Result<Vec<SourceFile>> {
    let output_dir = output_dir.canonicalize().ok();
    let mut files = Vec::new();

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_ignored(entry, output_dir.as_deref()));

    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            Error::io(path, e.into())
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let Some(file) = SourceFile::from_relative(relative) else {
            continue;
        };
        if !is_recognized(&file.extension) {
            continue;
        }
        if file.directory.is_empty() && ROOT_TOOLING_EXTENSIONS.contains(&file.extension.as_str()) {
            tracing::debug!(file = %file, "skipping root tooling file");
            continue;
        }
        files.push(file);
    }

    tracing::debug!(count = files.len(), root = %root.display(), "discovered source files");
    Ok(files)
}

fn is_ignored(entry: &DirEntry, output_dir: Option<&Path>) -> bool {
    if entry.depth() == 0 {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    if name.starts_with('.') {
        return true;
    }
    if entry.file_type().is_dir() {
        if IGNORED_DIRS.contains(&name.as_ref()) {
            return true;
        }
        if let Some(out) = output_dir {
            return entry.path().canonicalize().is_ok_and(|p| p == out);
        }
    }
    false
}
