//! Turn a `<script setup>` body into a default-exported options object.
//!
//! ```js
//! import { ref } from '/modules/vue.js'
//! const n = ref(1)
//! ```
//!
//! becomes
//!
//! ```js
//! import { ref } from '/modules/vue.js'
//! export default {
//!   setup() {
//!     const n = ref(1)
//!     return { ref, n }
//!   }
//! }
//! ```
//!
//! Module declarations stay at the top level; every other statement moves
//! into `setup()`, and every top-level binding is returned so the template
//! can see it.

use std::path::Path;

use oxc_allocator::Allocator;
use oxc_ast::AstBuilder;
use oxc_ast::ast::{
    BindingPattern, BindingPatternKind, ExportDefaultDeclarationKind, Expression,
    ImportDeclarationSpecifier, ObjectPropertyKind, Program, Statement,
};

use crate::ecma;
use crate::error::{Error, Result};

/// Wrap the program in `export default { setup() { ... } }` unless it already
/// has a default export. Returns whether it was wrapped.
pub fn wrap_setup_body<'a>(
    allocator: &'a Allocator,
    program: &mut Program<'a>,
    file: &Path,
) -> Result<bool> {
    if has_default_export(program) {
        return Ok(false);
    }

    let ast = AstBuilder::new(allocator);
    let body = std::mem::replace(&mut program.body, ast.vec());
    let mut setup = ast.vec();
    let mut bindings = Vec::new();

    for stmt in body {
        if let Statement::ImportDeclaration(decl) = &stmt {
            if !decl.import_kind.is_type() {
                for specifier in decl.specifiers.iter().flatten() {
                    let type_only = matches!(
                        specifier,
                        ImportDeclarationSpecifier::ImportSpecifier(s) if s.import_kind.is_type()
                    );
                    if !type_only {
                        bindings.push(specifier.local().name.to_string());
                    }
                }
            }
        }
        if stmt.is_module_declaration() {
            program.body.push(stmt);
            continue;
        }
        declared_names(&stmt, &mut bindings);
        setup.push(stmt);
    }

    let wrapper = format!(
        "export default {{\n  setup() {{\n    return {{ {} }};\n  }}\n}};\n",
        bindings.join(", ")
    );
    let wrapper = allocator.alloc_str(&wrapper);
    let parsed = ecma::parse(allocator, wrapper, file)?;

    for mut stmt in parsed.body {
        if let Some(statements) = setup_statements(&mut stmt) {
            let trailing = std::mem::replace(statements, ast.vec());
            let mut moved = std::mem::replace(&mut setup, ast.vec());
            for returned in trailing {
                moved.push(returned);
            }
            *statements = moved;
        }
        program.body.push(stmt);
    }

    if !setup.is_empty() {
        return Err(Error::Component {
            file: file.to_path_buf(),
            message: "could not build setup() for <script setup>".to_string(),
        });
    }

    tracing::debug!(
        file = %file.display(),
        bindings = bindings.len(),
        "wrapped script setup body"
    );
    Ok(true)
}

fn has_default_export(program: &Program<'_>) -> bool {
    program.body.iter().any(|stmt| match stmt {
        Statement::ExportDefaultDeclaration(_) => true,
        Statement::ExportNamedDeclaration(decl) => decl
            .specifiers
            .iter()
            .any(|s| s.exported.name().as_str() == "default"),
        _ => false,
    })
}

/// Body of the `setup()` method in the generated wrapper.
fn setup_statements<'s, 'a>(
    stmt: &'s mut Statement<'a>,
) -> Option<&'s mut oxc_allocator::Vec<'a, Statement<'a>>> {
    let Statement::ExportDefaultDeclaration(decl) = stmt else {
        return None;
    };
    let ExportDefaultDeclarationKind::ObjectExpression(object) = &mut decl.declaration else {
        return None;
    };
    let ObjectPropertyKind::ObjectProperty(property) = object.properties.first_mut()? else {
        return None;
    };
    let Expression::FunctionExpression(function) = &mut property.value else {
        return None;
    };
    function.body.as_mut().map(|body| &mut body.statements)
}

fn declared_names(stmt: &Statement<'_>, out: &mut Vec<String>) {
    match stmt {
        Statement::VariableDeclaration(decl) => {
            for declarator in &decl.declarations {
                pattern_names(&declarator.id, out);
            }
        }
        Statement::FunctionDeclaration(function) => {
            if let Some(id) = &function.id {
                out.push(id.name.to_string());
            }
        }
        Statement::ClassDeclaration(class) => {
            if let Some(id) = &class.id {
                out.push(id.name.to_string());
            }
        }
        _ => {}
    }
}

fn pattern_names(pattern: &BindingPattern<'_>, out: &mut Vec<String>) {
    match &pattern.kind {
        BindingPatternKind::BindingIdentifier(ident) => out.push(ident.name.to_string()),
        BindingPatternKind::ObjectPattern(object) => {
            for property in &object.properties {
                pattern_names(&property.value, out);
            }
            if let Some(rest) = &object.rest {
                pattern_names(&rest.argument, out);
            }
        }
        BindingPatternKind::ArrayPattern(array) => {
            for element in array.elements.iter().flatten() {
                pattern_names(element, out);
            }
            if let Some(rest) = &array.rest {
                pattern_names(&rest.argument, out);
            }
        }
        BindingPatternKind::AssignmentPattern(assign) => pattern_names(&assign.left, out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrap(source: &str) -> (bool, String) {
        let allocator = Allocator::default();
        let file = Path::new("src/Counter.vue");
        let mut program = ecma::parse(&allocator, source, file).unwrap();
        let wrapped = wrap_setup_body(&allocator, &mut program, file).unwrap();
        (wrapped, ecma::print_pretty(&program))
    }

    #[test]
    fn setup_body_becomes_default_export() {
        let (wrapped, out) = wrap(
            "import { ref } from '/modules/vue.js';\nimport Child from './Child.js';\nconst count = ref(1);\nfunction increment() { count.value++; }\n",
        );
        assert!(wrapped);
        assert!(out.starts_with("import { ref } from '/modules/vue.js';"), "{out}");
        let export_at = out.find("export default {").unwrap();
        let setup_at = out.find("setup() {").unwrap();
        let body_at = out.find("const count = ref(1);").unwrap();
        let return_at = out.find("return {").unwrap();
        assert!(export_at < setup_at && setup_at < body_at && body_at < return_at, "{out}");
        for name in ["ref", "Child", "count", "increment"] {
            assert!(out[return_at..].contains(name), "{name} missing: {out}");
        }
    }

    #[test]
    fn destructured_bindings_are_returned() {
        let (_, out) = wrap(
            "const { alpha, beta: [gamma, ...delta] } = load();\nconst { epsilon = 1, ...zeta } = other();\n",
        );
        let returned = &out[out.find("return {").unwrap()..];
        assert!(!returned.contains("beta"), "{out}");
        for name in ["alpha", "gamma", "delta", "epsilon", "zeta"] {
            assert!(returned.contains(name), "{name} missing: {out}");
        }
    }

    #[test]
    fn existing_default_export_is_left_alone() {
        let (wrapped, out) = wrap("const n = 1;\nexport default { data() { return { n }; } };\n");
        assert!(!wrapped);
        assert!(!out.contains("setup()"), "{out}");
    }

    #[test]
    fn named_exports_stay_top_level() {
        let (wrapped, out) = wrap("export const version = 1;\nconst n = 2;\n");
        assert!(wrapped);
        let export_at = out.find("export const version").unwrap();
        let default_at = out.find("export default").unwrap();
        assert!(export_at < default_at, "{out}");
        assert!(!out[out.find("return {").unwrap()..].contains("version"), "{out}");
    }

    #[test]
    fn empty_body_still_exports_a_component() {
        let (wrapped, out) = wrap("");
        assert!(wrapped);
        assert!(out.contains("export default {"), "{out}");
    }
}
