//! Specifier rewrite pipeline.
//!
//! Every place a module path can appear is an [`ImportSite`]. The pipeline
//! runs an ordered list of [`SpecifierPass`]es over each site's string; each
//! pass declares which sites it handles. The AST side lives in [`rewriter`],
//! which finds the sites and writes results back.
//!
//! ```text
//! specifier ─▶ alias ─▶ component extension ─▶ package remap ─▶ directory expansion
//! ```

pub mod audit;
pub mod convert;
pub mod passes;
pub mod rewriter;
pub mod setup;
pub mod styles;
pub mod template;

use std::path::{Path, PathBuf};

use nobundle_config::ImportsConfig;
use oxc_allocator::Allocator;

use crate::alias::AliasResolver;
use crate::ecma;
use crate::error::Result;
use crate::expand::{DirectoryExpander, ImporterContext};
use crate::remap::RemapTable;
use crate::source_file::SourceFile;

pub use passes::{AliasPass, ComponentExtensionPass, DirectoryExpansionPass, PackageRemapPass};
pub use rewriter::SpecifierRewriter;

/// Where a specifier was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportSite {
    /// `import ... from 'x'`. `named_bindings` is set when the declaration has
    /// at least one `{ member }` binding.
    StaticImport { named_bindings: bool },
    /// `export ... from 'x'` and `export * from 'x'`
    ReExport,
    /// `import('x')` with a string literal argument
    DynamicImport,
    /// Any other string literal ending in `.vue`, e.g. a route table entry.
    ComponentReference,
    /// `src="..."`/`href="..."` in template markup
    MarkupAttribute,
}

impl ImportSite {
    pub fn is_module_source(self) -> bool {
        matches!(
            self,
            Self::StaticImport { .. } | Self::ReExport | Self::DynamicImport
        )
    }
}

/// Per-file context handed to each pass.
#[derive(Debug, Clone, Copy)]
pub struct RewriteContext<'p> {
    pub importer: ImporterContext<'p>,
}

impl<'p> RewriteContext<'p> {
    pub fn new(root: &'p Path, directory: &'p str, file: &'p Path) -> Self {
        Self {
            importer: ImporterContext {
                root,
                directory,
                file,
            },
        }
    }

    pub fn file(&self) -> &Path {
        self.importer.file
    }
}

pub trait SpecifierPass: Send + Sync {
    fn name(&self) -> &'static str;

    fn applies_to(&self, site: ImportSite) -> bool;

    /// Return the rewritten specifier, or `None` to leave it as is.
    fn rewrite(
        &self,
        specifier: &str,
        site: ImportSite,
        ctx: &RewriteContext<'_>,
    ) -> Result<Option<String>>;
}

/// The shared services plus the ordered passes built from them.
pub struct Pipeline {
    aliases: AliasResolver,
    remap: RemapTable,
    passes: Vec<Box<dyn SpecifierPass>>,
}

impl Pipeline {
    /// Build the standard pass order from configuration.
    pub fn from_config(config: &ImportsConfig) -> Result<Self> {
        let aliases = AliasResolver::new(config.aliases.clone());
        let remap = RemapTable::from_config(config)?;
        let passes: Vec<Box<dyn SpecifierPass>> = vec![
            Box::new(AliasPass::new(aliases.clone())),
            Box::new(ComponentExtensionPass),
            Box::new(PackageRemapPass::new(remap.clone())),
            Box::new(DirectoryExpansionPass::new(DirectoryExpander::new(
                aliases.clone(),
            ))),
        ];
        Ok(Self {
            aliases,
            remap,
            passes,
        })
    }

    pub fn aliases(&self) -> &AliasResolver {
        &self.aliases
    }

    pub fn remap(&self) -> &RemapTable {
        &self.remap
    }

    pub fn pass_names(&self) -> Vec<&'static str> {
        self.passes.iter().map(|p| p.name()).collect()
    }

    /// Run every applicable pass in order. Returns `None` if nothing changed.
    pub fn rewrite(
        &self,
        specifier: &str,
        site: ImportSite,
        ctx: &RewriteContext<'_>,
    ) -> Result<Option<String>> {
        let mut current = specifier.to_string();
        for pass in self.passes.iter().filter(|p| p.applies_to(site)) {
            if let Some(next) = pass.rewrite(&current, site, ctx)? {
                tracing::trace!(pass = pass.name(), from = %current, to = %next, "specifier pass");
                current = next;
            }
        }

        if current == specifier {
            return Ok(None);
        }
        tracing::debug!(
            file = %ctx.file().display(),
            from = specifier,
            to = %current,
            ?site,
            "rewrote specifier"
        );
        Ok(Some(current))
    }

    /// Rewrite alias references inside template markup.
    pub fn rewrite_markup(&self, markup: &str, ctx: &RewriteContext<'_>) -> Result<String> {
        let mut failure = None;
        let rewritten = self.aliases.rewrite_markup(markup, |value| {
            match self.rewrite(value, ImportSite::MarkupAttribute, ctx) {
                Ok(next) => next.unwrap_or_else(|| value.to_string()),
                Err(e) => {
                    failure.get_or_insert(e);
                    value.to_string()
                }
            }
        });
        match failure {
            Some(e) => Err(e),
            None => Ok(rewritten),
        }
    }
}

/// Output of [`Pipeline::transform_module`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformedModule {
    pub code: String,
    /// Specifiers a browser still cannot load.
    pub bare_specifiers: Vec<String>,
}

impl Pipeline {
    /// Parse `source`, run every AST pass over it and print it back.
    ///
    /// Pass order: specifier rewriting, stylesheet import removal,
    /// default-import conversion, then (for components) template injection.
    /// The bare-specifier audit runs last, on the final tree.
    pub fn transform_module(
        &self,
        source: &str,
        root: &Path,
        file: &SourceFile,
        template: Option<&str>,
    ) -> Result<TransformedModule> {
        let path = PathBuf::from(file.relative_path());
        let allocator = Allocator::default();
        let mut program = ecma::parse(&allocator, source, &path)?;

        let ctx = RewriteContext::new(root, &file.directory, &path);
        let rewritten = SpecifierRewriter::new(&allocator, self, ctx).run(&mut program)?;
        let styles = styles::strip_style_imports(&mut program);
        let converted = convert::convert_named_imports(&allocator, &mut program, &self.remap, &path)?;
        let wrapped = file.is_component() && setup::wrap_setup_body(&allocator, &mut program, &path)?;
        if let Some(template) = template {
            template::inject_template(&allocator, &mut program, template, &path)?;
        }
        let bare_specifiers = audit::bare_specifiers(&program, self.aliases.aliases(), &path);

        tracing::debug!(
            file = %path.display(),
            rewritten,
            styles,
            converted,
            wrapped,
            "transformed module"
        );
        Ok(TransformedModule {
            code: ecma::print_pretty(&program),
            bare_specifiers,
        })
    }
}
