//! Component compilation seam.
//!
//! The build only needs three things from a component: a script module, the
//! template markup to inline, and an optional stylesheet. [`VueCompiler`]
//! gets them from the block scanner; a full template compiler can be plugged
//! in behind [`ComponentCompiler`] instead.

use std::path::Path;

use super::scanner::{SfcBlock, scan};
use crate::error::{Error, Result};

/// Body used when a component has no `<script>` at all.
pub const EMPTY_COMPONENT_SCRIPT: &str = "export default {}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledComponent {
    pub script: String,
    /// Template markup, without the surrounding `<template>` tag.
    pub template: Option<String>,
    /// First `<style>` block, dedented.
    pub style: Option<String>,
}

pub trait ComponentCompiler: Send + Sync {
    fn name(&self) -> &'static str;

    fn compile(&self, source: &str, file: &Path) -> Result<CompiledComponent>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct VueCompiler;

impl ComponentCompiler for VueCompiler {
    fn name(&self) -> &'static str {
        "vue"
    }

    fn compile(&self, source: &str, file: &Path) -> Result<CompiledComponent> {
        let descriptor = scan(source).map_err(|source| Error::Extract {
            file: file.to_path_buf(),
            source,
        })?;

        if descriptor.template.is_none()
            && descriptor.script.is_none()
            && descriptor.script_setup.is_none()
        {
            return Err(Error::Component {
                file: file.to_path_buf(),
                message: "no <template> or <script> block".to_string(),
            });
        }

        for block in descriptor.script.iter().chain(descriptor.script_setup.iter()) {
            if !matches!(block.lang, "js" | "javascript") {
                tracing::warn!(
                    file = %file.display(),
                    lang = block.lang,
                    "script language is not transpiled; emitted as-is"
                );
            }
        }

        let script = combine_scripts(descriptor.script_setup.as_ref(), descriptor.script.as_ref())
            .unwrap_or_else(|| EMPTY_COMPONENT_SCRIPT.to_string());

        let template = descriptor
            .template
            .map(|block| block.content.trim_matches(|c| c == '\n' || c == '\r').to_string());

        if descriptor.styles.len() > 1 {
            tracing::warn!(
                file = %file.display(),
                count = descriptor.styles.len(),
                "only the first <style> block is emitted"
            );
        }
        let style = descriptor
            .styles
            .first()
            .map(|block| dedent(block.content).trim().to_string())
            .filter(|css| !css.is_empty());

        Ok(CompiledComponent {
            script,
            template,
            style,
        })
    }
}

/// Setup body first, then the regular body, separated by a blank line.
fn combine_scripts(setup: Option<&SfcBlock<'_>>, regular: Option<&SfcBlock<'_>>) -> Option<String> {
    match (setup, regular) {
        (None, None) => None,
        (Some(only), None) | (None, Some(only)) => Some(only.content.to_string()),
        (Some(setup), Some(regular)) => Some(format!("{}\n\n{}", setup.content, regular.content)),
    }
}

/// Strip the indentation shared by every non-blank line.
pub fn dedent(text: &str) -> String {
    let common = text
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start().len())
        .min()
        .unwrap_or(0);

    text.lines()
        .map(|l| l.get(common..).unwrap_or_else(|| l.trim_start()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prefix every line with `amount` spaces.
pub fn indent(text: &str, amount: usize) -> String {
    let pad = " ".repeat(amount);
    text.split('\n')
        .map(|line| format!("{pad}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}
