//! Drop stylesheet imports; component styles are emitted as separate files
//! and linked from `index.html`.

use oxc_ast::ast::{Program, Statement};

const STYLE_EXTENSION: &str = ".css";

/// Remove `import './x.css'` statements. Returns how many were removed.
pub fn strip_style_imports(program: &mut Program<'_>) -> usize {
    let before = program.body.len();
    program.body.retain(|stmt| {
        !matches!(stmt, Statement::ImportDeclaration(decl) if decl.source.value.ends_with(STYLE_EXTENSION))
    });
    before - program.body.len()
}
