//! Check that every module source left in a program is loadable by a browser.

use std::path::Path;

use nobundle_config::AliasConfig;
use oxc_ast::ast::{
    ExportAllDeclaration, ExportNamedDeclaration, Expression, ImportDeclaration, ImportExpression,
    Program,
};
use oxc_ast_visit::Visit;
use oxc_ast_visit::walk;

use crate::specifier::SpecifierKind;

struct SourceCollector<'v> {
    sources: Vec<&'v str>,
}

impl<'a> Visit<'a> for SourceCollector<'a> {
    fn visit_import_declaration(&mut self, it: &ImportDeclaration<'a>) {
        if !it.import_kind.is_type() {
            self.sources.push(it.source.value.as_str());
        }
    }

    fn visit_export_named_declaration(&mut self, it: &ExportNamedDeclaration<'a>) {
        if let Some(source) = &it.source {
            self.sources.push(source.value.as_str());
        }
        walk::walk_export_named_declaration(self, it);
    }

    fn visit_export_all_declaration(&mut self, it: &ExportAllDeclaration<'a>) {
        self.sources.push(it.source.value.as_str());
    }

    fn visit_import_expression(&mut self, it: &ImportExpression<'a>) {
        if let Expression::StringLiteral(literal) = &it.source {
            self.sources.push(literal.value.as_str());
        }
        walk::walk_import_expression(self, it);
    }
}

/// Bare specifiers still present in `program`, in source order.
///
/// Aliased specifiers count as bare here: after the pipeline they should
/// have been replaced.
pub fn bare_specifiers(program: &Program<'_>, aliases: &[AliasConfig], file: &Path) -> Vec<String> {
    let mut collector = SourceCollector {
        sources: Vec::new(),
    };
    collector.visit_program(program);

    let bare: Vec<String> = collector
        .sources
        .into_iter()
        .filter(|source| !SpecifierKind::classify(source, aliases).is_browser_resolvable())
        .map(str::to_string)
        .collect();

    for specifier in &bare {
        tracing::warn!(
            file = %file.display(),
            specifier = %specifier,
            "bare specifier left in output; add an importOptions entry for it"
        );
    }
    bare
}
