//! Parse, print and minify ES modules with oxc.

use std::path::{Path, PathBuf};

use oxc_allocator::Allocator;
use oxc_ast::ast::{Expression, Program};
use oxc_codegen::{Codegen, CodegenOptions};
use oxc_minifier::{Minifier, MinifierOptions};
use oxc_parser::Parser;
use oxc_span::SourceType;

use crate::error::{Error, Result};

/// Parse `source` as an ES module.
///
/// The source must live in the allocator (or outlive it) since the AST
/// borrows from it.
pub fn parse<'a>(allocator: &'a Allocator, source: &'a str, file: &Path) -> Result<Program<'a>> {
    let ret = Parser::new(allocator, source, SourceType::mjs()).parse();
    if ret.panicked || !ret.errors.is_empty() {
        let message = ret
            .errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        return Err(Error::Parse {
            file: file.to_path_buf(),
            message: if message.is_empty() {
                "parser gave up".to_string()
            } else {
                message
            },
        });
    }
    Ok(ret.program)
}

/// Parse a single expression into the allocator.
pub fn parse_expression<'a>(
    allocator: &'a Allocator,
    source: &str,
    file: &Path,
) -> Result<Expression<'a>> {
    let source = allocator.alloc_str(source);
    Parser::new(allocator, source, SourceType::mjs())
        .parse_expression()
        .map_err(|errors| Error::Parse {
            file: file.to_path_buf(),
            message: errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join(", "),
        })
}

/// Readable output for application sources.
pub fn print_pretty(program: &Program<'_>) -> String {
    Codegen::new()
        .with_options(CodegenOptions {
            single_quote: true,
            ..CodegenOptions::default()
        })
        .build(program)
        .code
}

/// Compress, mangle and print `source` in one go.
pub fn minify(source: &str, file: &Path) -> Result<String> {
    let allocator = Allocator::default();
    let mut program = parse(&allocator, source, file)?;

    let ret = Minifier::new(MinifierOptions::default()).minify(&allocator, &mut program);

    Ok(Codegen::new()
        .with_options(CodegenOptions {
            minify: true,
            ..CodegenOptions::default()
        })
        .with_scoping(ret.scoping)
        .build(&program)
        .code)
}

/// [`minify`] on the blocking pool.
pub async fn minify_async(source: String, file: PathBuf) -> Result<String> {
    let task_file = file.clone();
    tokio::task::spawn_blocking(move || minify(&source, &task_file))
        .await
        .map_err(|e| Error::Minify {
            file,
            message: format!("Task join error: {e}"),
        })?
}
