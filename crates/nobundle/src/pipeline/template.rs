//! Inline compiled template markup into the component's options object.

use std::path::Path;

use oxc_allocator::Allocator;
use oxc_ast::AstBuilder;
use oxc_ast::ast::{
    Argument, ExportDefaultDeclarationKind, Expression, ObjectExpression, Program, PropertyKind,
    Statement,
};
use oxc_span::SPAN;

use crate::ecma;
use crate::error::Result;
use crate::sfc::compiler::indent;

const TEMPLATE_INDENT: usize = 2;

/// Factory functions whose first argument is the options object.
const COMPONENT_FACTORIES: &[&str] = &["defineComponent"];

/// Prepend `template: \`...\`` to the default-exported options object.
///
/// Handles `export default { ... }` and `export default defineComponent({ ... })`.
/// Returns `false`, with a warning, when neither shape is found.
pub fn inject_template<'a>(
    allocator: &'a Allocator,
    program: &mut Program<'a>,
    template: &str,
    file: &Path,
) -> Result<bool> {
    let literal = format!("`\n{}\n`", indent(&escape_template(template), TEMPLATE_INDENT));
    let value = ecma::parse_expression(allocator, &literal, file)?;

    let Some(options) = component_options(program) else {
        tracing::warn!(
            file = %file.display(),
            "no default-exported options object; template not inlined"
        );
        return Ok(false);
    };

    let ast = AstBuilder::new(allocator);
    let property = ast.object_property_kind_object_property(
        SPAN,
        PropertyKind::Init,
        ast.property_key_static_identifier(SPAN, "template"),
        value,
        false,
        false,
        false,
    );
    options.properties.insert(0, property);
    Ok(true)
}

fn component_options<'p, 'a>(program: &'p mut Program<'a>) -> Option<&'p mut ObjectExpression<'a>> {
    program.body.iter_mut().find_map(|stmt| {
        let Statement::ExportDefaultDeclaration(decl) = stmt else {
            return None;
        };
        match &mut decl.declaration {
            ExportDefaultDeclarationKind::ObjectExpression(object) => Some(&mut **object),
            ExportDefaultDeclarationKind::CallExpression(call) => {
                let is_factory = matches!(
                    &call.callee,
                    Expression::Identifier(ident) if COMPONENT_FACTORIES.contains(&ident.name.as_str())
                );
                if !is_factory {
                    return None;
                }
                match call.arguments.first_mut() {
                    Some(Argument::ObjectExpression(object)) => Some(&mut **object),
                    _ => None,
                }
            }
            _ => None,
        }
    })
}

/// Make `text` safe inside a template literal.
fn escape_template(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace("${", "\\${")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inject(script: &str, template: &str) -> (bool, String) {
        let allocator = Allocator::default();
        let file = Path::new("src/Hello.vue");
        let mut program = ecma::parse(&allocator, script, file).unwrap();
        let injected = inject_template(&allocator, &mut program, template, file).unwrap();
        (injected, ecma::print_pretty(&program))
    }

    #[test]
    fn prepends_to_plain_options_object() {
        let (ok, out) = inject(
            "export default { name: 'Hello', data() { return { n: 1 }; } };",
            "<p>{{ n }}</p>",
        );
        assert!(ok);
        let template_at = out.find("template:").unwrap();
        let name_at = out.find("name:").unwrap();
        assert!(template_at < name_at, "{out}");
        assert!(out.contains("<p>{{ n }}</p>"), "{out}");
    }

    #[test]
    fn handles_define_component() {
        let (ok, out) = inject(
            "import { defineComponent } from 'vue';\nexport default defineComponent({ name: 'Hello' });",
            "<div/>",
        );
        assert!(ok);
        assert!(out.contains("defineComponent({"), "{out}");
        assert!(out.contains("template: `"), "{out}");
    }

    #[test]
    fn backticks_and_interpolations_stay_literal() {
        let (ok, out) = inject("export default {};", "<code>`${x}`</code>");
        assert!(ok);
        assert!(out.contains("\\`\\${x}\\`"), "{out}");
    }

    #[test]
    fn missing_options_object_is_reported() {
        let (ok, out) = inject("export const a = 1;", "<p/>");
        assert!(!ok);
        assert!(!out.contains("template"));
    }

    #[test]
    fn escape_covers_backslash_first() {
        assert_eq!(escape_template("a\\`b"), "a\\\\\\`b");
    }
}
