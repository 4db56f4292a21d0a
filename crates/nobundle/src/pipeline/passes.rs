//! The four specifier passes, in pipeline order.

use super::{ImportSite, RewriteContext, SpecifierPass};
use crate::alias::AliasResolver;
use crate::error::Result;
use crate::expand::DirectoryExpander;
use crate::remap::RemapTable;
use crate::specifier::rename_component_extension;

/// `@/x` to `/src/x`. Runs on every site, including markup.
pub struct AliasPass {
    aliases: AliasResolver,
}

impl AliasPass {
    pub fn new(aliases: AliasResolver) -> Self {
        Self { aliases }
    }
}

impl SpecifierPass for AliasPass {
    fn name(&self) -> &'static str {
        "alias"
    }

    fn applies_to(&self, _site: ImportSite) -> bool {
        true
    }

    fn rewrite(&self, specifier: &str, _: ImportSite, _: &RewriteContext<'_>) -> Result<Option<String>> {
        if !self.aliases.has_alias(specifier) {
            return Ok(None);
        }
        Ok(Some(self.aliases.resolve(specifier)))
    }
}

/// `./Foo.vue` to `./Foo.js`
pub struct ComponentExtensionPass;

impl SpecifierPass for ComponentExtensionPass {
    fn name(&self) -> &'static str {
        "component-extension"
    }

    fn applies_to(&self, site: ImportSite) -> bool {
        site != ImportSite::MarkupAttribute
    }

    fn rewrite(&self, specifier: &str, _: ImportSite, _: &RewriteContext<'_>) -> Result<Option<String>> {
        Ok(rename_component_extension(specifier))
    }
}

/// Bare package name to configured module URL.
///
/// Static imports with named bindings whose entry converts them are left
/// alone here; [`super::convert`] splits those into per-member imports.
pub struct PackageRemapPass {
    table: RemapTable,
}

impl PackageRemapPass {
    pub fn new(table: RemapTable) -> Self {
        Self { table }
    }
}

impl SpecifierPass for PackageRemapPass {
    fn name(&self) -> &'static str {
        "package-remap"
    }

    fn applies_to(&self, site: ImportSite) -> bool {
        site.is_module_source()
    }

    fn rewrite(
        &self,
        specifier: &str,
        site: ImportSite,
        ctx: &RewriteContext<'_>,
    ) -> Result<Option<String>> {
        let Some(hit) = self.table.lookup(specifier) else {
            return Ok(None);
        };
        if site == (ImportSite::StaticImport { named_bindings: true })
            && hit.entry.converts_named_imports()
        {
            return Ok(None);
        }

        let target = hit.target(None);
        if target.is_none() {
            tracing::warn!(
                file = %ctx.file().display(),
                specifier,
                "remap target needs an imported member name; leaving specifier unchanged"
            );
        }
        Ok(target)
    }
}

/// `./components/Button` to `./components/Button/Button.js`
pub struct DirectoryExpansionPass {
    expander: DirectoryExpander,
}

impl DirectoryExpansionPass {
    pub fn new(expander: DirectoryExpander) -> Self {
        Self { expander }
    }
}

impl SpecifierPass for DirectoryExpansionPass {
    fn name(&self) -> &'static str {
        "directory-expansion"
    }

    fn applies_to(&self, site: ImportSite) -> bool {
        site.is_module_source()
    }

    fn rewrite(
        &self,
        specifier: &str,
        _: ImportSite,
        ctx: &RewriteContext<'_>,
    ) -> Result<Option<String>> {
        self.expander.expand(specifier, &ctx.importer)
    }
}
