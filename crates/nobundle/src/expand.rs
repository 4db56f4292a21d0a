//! Directory and extensionless import expansion.
//!
//! Browsers do not probe for `index.js` or missing extensions, so
//! `./components/Button` has to become `./components/Button/Button.js` and
//! `./utils/format` has to become `./utils/format.js` before the file ships.

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use path_clean::PathClean;

use crate::alias::AliasResolver;
use crate::error::{Error, Result};
use crate::source_file::extension_priority;
use crate::specifier::{SpecifierKind, rename_component_extension};

/// Where the specifier being expanded was written.
#[derive(Debug, Clone, Copy)]
pub struct ImporterContext<'p> {
    /// Project root on disk.
    pub root: &'p Path,
    /// Importing file's directory, relative to the root (`src/components`).
    pub directory: &'p str,
    /// Importing file, for error messages.
    pub file: &'p Path,
}

#[derive(Debug, Clone)]
pub struct DirectoryExpander {
    aliases: AliasResolver,
}

/// A directory entry that could complete a specifier.
#[derive(Debug, PartialEq, Eq)]
struct Candidate {
    stem: String,
    extension: String,
    priority: usize,
}

impl Candidate {
    fn from_path(path: &Path) -> Option<Self> {
        let stem = path.file_stem()?.to_str()?.to_string();
        let extension = path.extension()?.to_str()?.to_string();
        let priority = extension_priority(&extension)?;
        Some(Self {
            stem,
            extension,
            priority,
        })
    }

    fn file_name(&self) -> String {
        format!("{}.{}", self.stem, self.extension)
    }
}

impl DirectoryExpander {
    pub fn new(aliases: AliasResolver) -> Self {
        Self { aliases }
    }

    /// Expand `specifier` to an explicit file, or return `None` when it is
    /// already explicit or nothing on disk completes it.
    ///
    /// # Errors
    ///
    /// [`Error::Resolution`] when an extensionless specifier points into a
    /// directory that cannot be read.
    pub fn expand(&self, specifier: &str, ctx: &ImporterContext<'_>) -> Result<Option<String>> {
        let kind = SpecifierKind::classify(specifier, self.aliases.aliases());
        let Some(candidate) = self.candidate_path(specifier, kind, ctx) else {
            return Ok(None);
        };

        if candidate.is_dir() {
            return self.expand_directory(specifier, &candidate, ctx);
        }
        self.expand_file(specifier, &candidate, ctx)
    }

    /// Filesystem path the specifier refers to, or `None` for specifiers
    /// that never touch the project tree.
    fn candidate_path(
        &self,
        specifier: &str,
        kind: SpecifierKind,
        ctx: &ImporterContext<'_>,
    ) -> Option<PathBuf> {
        let relative = match kind {
            SpecifierKind::Bare | SpecifierKind::Url => return None,
            SpecifierKind::Relative => Path::new(ctx.directory).join(specifier),
            SpecifierKind::RootAbsolute => PathBuf::from(specifier.trim_start_matches('/')),
            SpecifierKind::Aliased => {
                PathBuf::from(self.aliases.resolve(specifier).trim_start_matches('/'))
            }
        };
        Some(ctx.root.join(relative).clean())
    }

    fn expand_directory(
        &self,
        specifier: &str,
        dir: &Path,
        ctx: &ImporterContext<'_>,
    ) -> Result<Option<String>> {
        let dir_name = dir.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        let best = list_candidates(dir, specifier, ctx)?
            .into_iter()
            .min_by(|a, b| rank_in_directory(a, b, dir_name));

        Ok(best.map(|c| {
            let expanded = format!("{}/{}", specifier.trim_end_matches('/'), c.file_name());
            tracing::debug!(specifier, expanded = %expanded, "expanded directory import");
            rename_component_extension(&expanded).unwrap_or(expanded)
        }))
    }

    fn expand_file(
        &self,
        specifier: &str,
        candidate: &Path,
        ctx: &ImporterContext<'_>,
    ) -> Result<Option<String>> {
        let file_name = specifier.rsplit('/').next().unwrap_or(specifier);
        // Already carries an extension (or a versioned name like `vue@3.2`).
        if file_name.is_empty() || file_name.contains('.') {
            return Ok(None);
        }

        let parent = candidate.parent().unwrap_or(ctx.root);
        let best = list_candidates(parent, specifier, ctx)?
            .into_iter()
            .filter(|c| c.stem == file_name)
            .min_by(|a, b| a.priority.cmp(&b.priority));

        Ok(best.map(|c| {
            let prefix = &specifier[..specifier.len() - file_name.len()];
            let expanded = format!("{prefix}{}", c.file_name());
            tracing::debug!(specifier, expanded = %expanded, "completed extensionless import");
            rename_component_extension(&expanded).unwrap_or(expanded)
        }))
    }
}

/// Prefer `Button/Button.*`, then `index.*`, then by extension priority,
/// then by name.
fn rank_in_directory(a: &Candidate, b: &Candidate, dir_name: &str) -> Ordering {
    let key = |c: &Candidate| (c.stem != dir_name, c.stem != "index", c.priority);
    key(a).cmp(&key(b)).then_with(|| a.stem.cmp(&b.stem))
}

fn list_candidates(dir: &Path, specifier: &str, ctx: &ImporterContext<'_>) -> Result<Vec<Candidate>> {
    let resolution_error = |source| Error::Resolution {
        specifier: specifier.to_string(),
        importer: ctx.file.to_path_buf(),
        path: dir.to_path_buf(),
        source,
    };

    let mut candidates = Vec::new();
    for entry in fs::read_dir(dir).map_err(resolution_error)? {
        let entry = entry.map_err(resolution_error)?;
        if !entry.file_type().map_err(resolution_error)?.is_file() {
            continue;
        }
        if let Some(candidate) = Candidate::from_path(&entry.path()) {
            candidates.push(candidate);
        }
    }
    Ok(candidates)
}
