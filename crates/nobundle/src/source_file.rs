//! Discovered source files and the extensions the build recognizes.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::specifier::COMPONENT_EXTENSION;

/// Recognized extensions in priority order. Directory and extensionless
/// imports prefer earlier entries when several files match.
pub const RECOGNIZED_EXTENSIONS: &[&str] = &[
    "vue", "js", "jpeg", "jpg", "png", "svg", "json", "ico", "woff", "woff2", "ttf", "otf",
];

/// Top-level directory served from the site root as-is.
pub const PUBLIC_DIR: &str = "public";

pub fn is_recognized(extension: &str) -> bool {
    RECOGNIZED_EXTENSIONS.contains(&extension)
}

/// Rank of an extension in [`RECOGNIZED_EXTENSIONS`]; lower is preferred.
pub fn extension_priority(extension: &str) -> Option<usize> {
    RECOGNIZED_EXTENSIONS.iter().position(|e| *e == extension)
}

/// A file found under the project root, split once at discovery time.
///
/// `directory` is relative to the root and uses `/` separators; it is empty
/// for files at the root. `extension` carries no leading dot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceFile {
    pub directory: String,
    pub base_name: String,
    pub extension: String,
}

impl SourceFile {
    /// Split a root-relative path. Returns `None` for paths without a file
    /// name or extension.
    pub fn from_relative(path: &Path) -> Option<Self> {
        let base_name = path.file_stem()?.to_str()?.to_string();
        let extension = path.extension()?.to_str()?.to_string();
        let directory = path
            .parent()
            .map(|p| {
                p.components()
                    .filter_map(|c| c.as_os_str().to_str())
                    .collect::<Vec<_>>()
                    .join("/")
            })
            .unwrap_or_default();
        Some(Self {
            directory,
            base_name,
            extension,
        })
    }

    /// `name.ext`
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.base_name, self.extension)
    }

    /// Root-relative path, `/`-separated.
    pub fn relative_path(&self) -> String {
        self.sibling(&self.file_name())
    }

    /// Root-relative path of another file in the same directory.
    pub fn sibling(&self, file_name: &str) -> String {
        if self.directory.is_empty() {
            file_name.to_string()
        } else {
            format!("{}/{file_name}", self.directory)
        }
    }

    /// Whether this is a single-file component.
    pub fn is_component(&self) -> bool {
        COMPONENT_EXTENSION.strip_prefix('.') == Some(self.extension.as_str())
    }

    pub fn path_in(&self, root: &Path) -> PathBuf {
        root.join(self.relative_path())
    }

    /// Whether the file lives under the top-level directory `dir`.
    pub fn is_under(&self, dir: &str) -> bool {
        self.directory == dir || self.directory.starts_with(&format!("{dir}/"))
    }

    /// Directory the file's outputs land in, relative to the output root.
    ///
    /// Mirrors `directory`, except that the `public/` prefix is dropped.
    pub fn output_directory(&self) -> &str {
        if self.directory == PUBLIC_DIR {
            return "";
        }
        self.directory
            .strip_prefix(PUBLIC_DIR)
            .and_then(|rest| rest.strip_prefix('/'))
            .unwrap_or(&self.directory)
    }

    /// Output path of `file_name` next to this file's outputs.
    pub fn output_path(&self, output_root: &Path, file_name: &str) -> PathBuf {
        let dir = self.output_directory();
        if dir.is_empty() {
            output_root.join(file_name)
        } else {
            output_root.join(dir).join(file_name)
        }
    }

    /// Root-absolute URL of `file_name` next to this file's outputs.
    pub fn output_url(&self, file_name: &str) -> String {
        let dir = self.output_directory();
        if dir.is_empty() {
            format!("/{file_name}")
        } else {
            format!("/{dir}/{file_name}")
        }
    }
}

impl fmt::Display for SourceFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.relative_path())
    }
}
