//! AST side of the pipeline: find every import site and write results back.

use oxc_allocator::Allocator;
use oxc_ast::AstBuilder;
use oxc_ast::ast::{
    ExportAllDeclaration, ExportNamedDeclaration, Expression, ImportDeclaration,
    ImportDeclarationSpecifier, ImportExpression, Program, StringLiteral,
};
use oxc_ast_visit::VisitMut;

use super::{ImportSite, Pipeline, RewriteContext};
use crate::error::{Error, Result};
use crate::specifier::COMPONENT_EXTENSION;

pub struct SpecifierRewriter<'a, 'p> {
    ast: AstBuilder<'a>,
    pipeline: &'p Pipeline,
    ctx: RewriteContext<'p>,
    rewritten: usize,
    /// First failure; later sites are skipped once set.
    error: Option<Error>,
}

impl<'a, 'p> SpecifierRewriter<'a, 'p> {
    pub fn new(allocator: &'a Allocator, pipeline: &'p Pipeline, ctx: RewriteContext<'p>) -> Self {
        Self {
            ast: AstBuilder::new(allocator),
            pipeline,
            ctx,
            rewritten: 0,
            error: None,
        }
    }

    /// Rewrite the program in place and return how many specifiers changed.
    pub fn run(mut self, program: &mut Program<'a>) -> Result<usize> {
        self.visit_program(program);
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.rewritten),
        }
    }

    fn rewrite_literal(&mut self, literal: &mut StringLiteral<'a>, site: ImportSite) {
        if self.error.is_some() {
            return;
        }
        match self.pipeline.rewrite(literal.value.as_str(), site, &self.ctx) {
            Ok(Some(next)) => {
                literal.value = self.ast.atom(&next);
                literal.raw = None;
                self.rewritten += 1;
            }
            Ok(None) => {}
            Err(e) => self.error = Some(e),
        }
    }
}

impl<'a> VisitMut<'a> for SpecifierRewriter<'a, '_> {
    fn visit_import_declaration(&mut self, it: &mut ImportDeclaration<'a>) {
        let named_bindings = it.specifiers.as_ref().is_some_and(|specifiers| {
            specifiers
                .iter()
                .any(|s| matches!(s, ImportDeclarationSpecifier::ImportSpecifier(_)))
        });
        self.rewrite_literal(&mut it.source, ImportSite::StaticImport { named_bindings });
    }

    fn visit_export_named_declaration(&mut self, it: &mut ExportNamedDeclaration<'a>) {
        if let Some(source) = &mut it.source {
            self.rewrite_literal(source, ImportSite::ReExport);
        }
        if let Some(declaration) = &mut it.declaration {
            self.visit_declaration(declaration);
        }
    }

    fn visit_export_all_declaration(&mut self, it: &mut ExportAllDeclaration<'a>) {
        self.rewrite_literal(&mut it.source, ImportSite::ReExport);
    }

    fn visit_import_expression(&mut self, it: &mut ImportExpression<'a>) {
        match &mut it.source {
            Expression::StringLiteral(literal) => {
                self.rewrite_literal(literal, ImportSite::DynamicImport);
            }
            other => self.visit_expression(other),
        }
        if let Some(options) = &mut it.options {
            self.visit_expression(options);
        }
    }

    fn visit_string_literal(&mut self, it: &mut StringLiteral<'a>) {
        if it.value.ends_with(COMPONENT_EXTENSION) {
            self.rewrite_literal(it, ImportSite::ComponentReference);
        }
    }
}
