//! Default-import conversion for remapped packages.
//!
//! Per-symbol module hosts expose each export as its own file with a default
//! export, so
//!
//! ```js
//! import { HomeIcon, UserIcon as User } from '@heroicons/vue/outline'
//! ```
//!
//! becomes
//!
//! ```js
//! import HomeIcon from '/modules/@heroicons/vue/outline/HomeIcon.js'
//! import User from '/modules/@heroicons/vue/outline/UserIcon.js'
//! ```
//!
//! Entries with `skipDefaultConversion` keep the original import form and are
//! handled by the package remap pass instead.

use std::path::Path;

use oxc_allocator::Allocator;
use oxc_ast::AstBuilder;
use oxc_ast::ast::{ImportDeclaration, ImportDeclarationSpecifier, Program, Statement};

use crate::ecma;
use crate::error::Result;
use crate::remap::RemapTable;

/// Replace each convertible import declaration with one import per binding.
/// Returns how many declarations were converted.
pub fn convert_named_imports<'a>(
    allocator: &'a Allocator,
    program: &mut Program<'a>,
    table: &RemapTable,
    file: &Path,
) -> Result<usize> {
    if table.is_empty() {
        return Ok(0);
    }

    let ast = AstBuilder::new(allocator);
    let body = std::mem::replace(&mut program.body, ast.vec());
    let mut converted = 0;

    for stmt in body {
        let replacement = match &stmt {
            Statement::ImportDeclaration(decl) => converted_source(decl, table),
            _ => None,
        };
        let Some(text) = replacement else {
            program.body.push(stmt);
            continue;
        };

        tracing::debug!(
            file = %file.display(),
            from = %stmt_source(&stmt),
            "split named imports into per-member imports"
        );
        let text = allocator.alloc_str(&text);
        let parsed = ecma::parse(allocator, text, file)?;
        for new_stmt in parsed.body {
            program.body.push(new_stmt);
        }
        converted += 1;
    }

    Ok(converted)
}

fn stmt_source<'s>(stmt: &'s Statement<'_>) -> &'s str {
    match stmt {
        Statement::ImportDeclaration(decl) => decl.source.value.as_str(),
        _ => "",
    }
}

/// Source text of the per-member imports, or `None` if the declaration stays.
fn converted_source(decl: &ImportDeclaration<'_>, table: &RemapTable) -> Option<String> {
    if decl.import_kind.is_type() {
        return None;
    }
    let specifiers = decl.specifiers.as_ref()?;
    if !specifiers
        .iter()
        .any(|s| matches!(s, ImportDeclarationSpecifier::ImportSpecifier(_)))
    {
        return None;
    }
    let hit = table.lookup(decl.source.value.as_str())?;
    if !hit.entry.converts_named_imports() {
        return None;
    }

    let mut out = String::new();
    for specifier in specifiers {
        let (member, binding) = match specifier {
            ImportDeclarationSpecifier::ImportSpecifier(s) => {
                (s.imported.name().to_string(), s.local.name.to_string())
            }
            ImportDeclarationSpecifier::ImportDefaultSpecifier(s) => {
                (s.local.name.to_string(), s.local.name.to_string())
            }
            ImportDeclarationSpecifier::ImportNamespaceSpecifier(s) => {
                (s.local.name.to_string(), format!("* as {}", s.local.name))
            }
        };
        let target = hit.target(Some(&member))?;
        out.push_str(&format!("import {binding} from '{}';\n", escape_single_quoted(&target)));
    }
    Some(out)
}

fn escape_single_quoted(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

#[cfg(test)]
mod tests {
    use super::*;
    use nobundle_config::ImportsConfig;
    use serde_json::json;

    fn convert(source: &str) -> (usize, String) {
        let config = ImportsConfig::from_value(json!({
            "importOptions": {
                "axios": { "transform": "/modules/axios@0.24.0.esm.min.js", "skipDefaultConversion": true },
                "@heroicons/vue/[^/]*$": { "transform": "/modules/$0/${member}.js" },
                "lodash-es": { "transform": "/modules/lodash-es/${member}.js" }
            }
        }))
        .unwrap();
        let table = RemapTable::from_config(&config).unwrap();
        let allocator = Allocator::default();
        let file = Path::new("src/App.vue");
        let mut program = ecma::parse(&allocator, source, file).unwrap();
        let n = convert_named_imports(&allocator, &mut program, &table, file).unwrap();
        (n, ecma::print_pretty(&program))
    }

    #[test]
    fn pattern_entry_splits_members() {
        let (n, out) = convert(
            "import { HomeIcon, UserIcon as User } from '@heroicons/vue/outline';\nconsole.log(HomeIcon, User);\n",
        );
        assert_eq!(n, 1);
        assert!(
            out.contains("import HomeIcon from '/modules/@heroicons/vue/outline/HomeIcon.js';"),
            "{out}"
        );
        assert!(
            out.contains("import User from '/modules/@heroicons/vue/outline/UserIcon.js';"),
            "{out}"
        );
        assert!(out.contains("console.log(HomeIcon, User)"));
    }

    #[test]
    fn skip_default_conversion_keeps_declaration() {
        let (n, out) = convert("import axios from 'axios';\nimport { get } from 'axios';\n");
        assert_eq!(n, 0);
        assert!(out.contains("import { get } from 'axios'"), "{out}");
    }

    #[test]
    fn default_and_namespace_bindings_use_local_name() {
        let (n, out) = convert("import debounce, * as rest from 'lodash-es';\nimport { throttle } from 'lodash-es';\n");
        // Only the declaration with a named binding converts.
        assert_eq!(n, 1);
        assert!(out.contains("import debounce, * as rest from 'lodash-es'"), "{out}");
        assert!(out.contains("import throttle from '/modules/lodash-es/throttle.js'"), "{out}");
    }

    #[test]
    fn statement_order_is_preserved() {
        let (_, out) = convert(
            "import a from './a.js';\nimport { HomeIcon } from '@heroicons/vue/solid';\nimport b from './b.js';\n",
        );
        let a = out.find("./a.js").unwrap();
        let icon = out.find("HomeIcon.js").unwrap();
        let b = out.find("./b.js").unwrap();
        assert!(a < icon && icon < b, "{out}");
    }
}
