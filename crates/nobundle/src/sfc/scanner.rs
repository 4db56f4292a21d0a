//! Top-level block scanner for `.vue` files.
//!
//! Uses memchr instead of regex so malformed input cannot trigger
//! pathological matching.

use memchr::memmem;

use super::{BlockKind, ExtractorError, MAX_BLOCKS, MAX_FILE_SIZE};

/// One top-level block with its inner content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SfcBlock<'a> {
    pub kind: BlockKind,
    pub content: &'a str,
    /// Byte offset of `content` in the file.
    pub offset: usize,
    /// `lang` attribute, `js`/`html`/`css` when absent.
    pub lang: &'a str,
}

#[derive(Debug, Default)]
pub struct SfcDescriptor<'a> {
    pub template: Option<SfcBlock<'a>>,
    pub script: Option<SfcBlock<'a>>,
    pub script_setup: Option<SfcBlock<'a>>,
    pub styles: Vec<SfcBlock<'a>>,
}

pub fn scan(source: &str) -> Result<SfcDescriptor<'_>, ExtractorError> {
    if source.len() > MAX_FILE_SIZE {
        return Err(ExtractorError::FileTooLarge {
            size: source.len(),
            max: MAX_FILE_SIZE,
        });
    }

    let bytes = source.as_bytes();
    let mut descriptor = SfcDescriptor::default();
    let mut pointer = 0;
    let mut count = 0;

    while let Some((start, open)) = next_opening(bytes, pointer) {
        match open {
            Opening::Comment => {
                pointer = memmem::find(&bytes[start..], b"-->")
                    .map(|pos| start + pos + 3)
                    .unwrap_or(bytes.len());
                continue;
            }
            Opening::Tag(tag) => {
                let block = parse_block(source, start, tag, &mut pointer)?;
                count += 1;
                if count > MAX_BLOCKS {
                    return Err(ExtractorError::TooManyBlocks {
                        count,
                        max: MAX_BLOCKS,
                    });
                }
                descriptor.insert(block);
            }
        }
    }

    Ok(descriptor)
}

impl<'a> SfcDescriptor<'a> {
    /// First block of each kind wins; later duplicates are dropped.
    fn insert(&mut self, block: SfcBlock<'a>) {
        match block.kind {
            BlockKind::Template => {
                self.template.get_or_insert(block);
            }
            BlockKind::Script => {
                self.script.get_or_insert(block);
            }
            BlockKind::ScriptSetup => {
                self.script_setup.get_or_insert(block);
            }
            BlockKind::Style => self.styles.push(block),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Opening {
    Comment,
    Tag(&'static str),
}

const TAGS: [&str; 3] = ["template", "script", "style"];

/// Earliest top-level `<!--`, `<template`, `<script` or `<style` at or after `from`.
fn next_opening(bytes: &[u8], from: usize) -> Option<(usize, Opening)> {
    let mut search = from;
    while search < bytes.len() {
        let lt = search + memchr::memchr(b'<', &bytes[search..])?;
        let rest = &bytes[lt + 1..];
        if rest.starts_with(b"!--") {
            return Some((lt, Opening::Comment));
        }
        for tag in TAGS {
            if rest.starts_with(tag.as_bytes()) && is_tag_delimiter(rest.get(tag.len()).copied()) {
                return Some((lt, Opening::Tag(tag)));
            }
        }
        search = lt + 1;
    }
    None
}

fn is_tag_delimiter(byte: Option<u8>) -> bool {
    matches!(byte, Some(b' ' | b'\t' | b'\n' | b'\r' | b'>' | b'/'))
}

fn parse_block<'a>(
    source: &'a str,
    start: usize,
    tag: &'static str,
    pointer: &mut usize,
) -> Result<SfcBlock<'a>, ExtractorError> {
    let bytes = source.as_bytes();
    let attrs_start = start + 1 + tag.len();
    let unclosed = ExtractorError::UnclosedBlock {
        tag,
        position: start,
    };

    let Some(tag_end) = find_closing_angle(bytes, attrs_start) else {
        return Err(unclosed);
    };
    let attrs = &source[attrs_start..tag_end];
    let kind = match tag {
        "template" => BlockKind::Template,
        "style" => BlockKind::Style,
        _ if has_attribute(attrs, "setup") => BlockKind::ScriptSetup,
        _ => BlockKind::Script,
    };
    let lang = extract_lang_attribute(attrs).unwrap_or(match kind {
        BlockKind::Template => "html",
        BlockKind::Style => "css",
        BlockKind::Script | BlockKind::ScriptSetup => "js",
    });

    // <script src="..." />
    if tag_end > attrs_start && bytes[tag_end - 1] == b'/' {
        *pointer = tag_end + 1;
        return Ok(SfcBlock {
            kind,
            content: "",
            offset: tag_end + 1,
            lang,
        });
    }

    let content_start = tag_end + 1;
    let content_end = if kind == BlockKind::Template {
        find_template_end(bytes, content_start)
    } else {
        let close = format!("</{tag}>");
        memmem::find(&bytes[content_start..], close.as_bytes()).map(|pos| content_start + pos)
    };
    let Some(content_end) = content_end else {
        return Err(unclosed);
    };

    *pointer = content_end + tag.len() + 3; // "</" + tag + ">"
    Ok(SfcBlock {
        kind,
        content: &source[content_start..content_end],
        offset: content_start,
        lang,
    })
}

/// Matching `</template>` for a top-level template, skipping nested
/// `<template v-if>` style blocks.
fn find_template_end(bytes: &[u8], from: usize) -> Option<usize> {
    let mut depth = 1usize;
    let mut pos = from;
    loop {
        let close = memmem::find(&bytes[pos..], b"</template>").map(|p| pos + p)?;
        let open = find_nested_template(bytes, pos).filter(|&o| o < close);
        match open {
            Some(o) => {
                depth += 1;
                pos = o + "<template".len();
            }
            None => {
                depth -= 1;
                if depth == 0 {
                    return Some(close);
                }
                pos = close + "</template>".len();
            }
        }
    }
}

fn find_nested_template(bytes: &[u8], from: usize) -> Option<usize> {
    let mut pos = from;
    while let Some(p) = memmem::find(&bytes[pos..], b"<template") {
        let at = pos + p;
        if is_tag_delimiter(bytes.get(at + "<template".len()).copied()) {
            return Some(at);
        }
        pos = at + 1;
    }
    None
}

/// Finds the closing `>` of an opening tag, handling quoted attributes.
fn find_closing_angle(bytes: &[u8], start: usize) -> Option<usize> {
    let mut in_quote = false;
    let mut quote_char = 0u8;

    for (i, &byte) in bytes[start..].iter().enumerate() {
        match byte {
            b'"' | b'\'' => {
                if !in_quote {
                    in_quote = true;
                    quote_char = byte;
                } else if byte == quote_char {
                    in_quote = false;
                }
            }
            b'>' if !in_quote => return Some(start + i),
            _ => {}
        }
    }

    None
}

fn has_attribute(attrs: &str, name: &str) -> bool {
    attrs
        .split(|c: char| c.is_whitespace() || c == '/')
        .any(|token| token == name || token.starts_with(&format!("{name}=")))
}

fn extract_lang_attribute(attrs: &str) -> Option<&str> {
    let after = attrs.find("lang=").map(|pos| attrs[pos + 5..].trim_start())?;
    let quote = after.chars().next()?;
    if quote == '"' || quote == '\'' {
        let end = after[1..].find(quote)?;
        Some(&after[1..=end])
    } else {
        let end = after
            .find(|c: char| c.is_whitespace() || c == '>' || c == '/')
            .unwrap_or(after.len());
        Some(&after[..end])
    }
}
