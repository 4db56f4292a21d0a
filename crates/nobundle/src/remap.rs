//! Bare package name to pinned module URL table.
//!
//! Built once from `importOptions`. Exact names are looked up first; pattern
//! keys are tried afterwards in declaration order and the first match wins.

use nobundle_config::{ImportOption, ImportsConfig, is_pattern};
use regex::Regex;

use crate::error::Result;

#[derive(Debug, Clone)]
pub enum Matcher {
    Exact(String),
    Pattern(Regex),
}

#[derive(Debug, Clone)]
pub struct RemapEntry {
    matcher: Matcher,
    template: String,
    skip_default_conversion: bool,
}

/// A successful lookup: the entry plus what the pattern captured.
#[derive(Debug, Clone)]
pub struct RemapMatch<'t> {
    pub entry: &'t RemapEntry,
    /// `captures[0]` is the whole match, `captures[n]` the nth group.
    /// Exact matches carry the package name as `captures[0]`.
    pub captures: Vec<String>,
}

impl RemapEntry {
    fn new(key: &str, option: &ImportOption) -> Result<Self> {
        let matcher = if is_pattern(key) {
            let regex = Regex::new(key).map_err(|source| {
                nobundle_config::ConfigError::InvalidPattern {
                    pattern: key.to_string(),
                    source,
                }
            })?;
            Matcher::Pattern(regex)
        } else {
            Matcher::Exact(key.to_string())
        };
        Ok(Self {
            matcher,
            template: option.transform.clone(),
            skip_default_conversion: option.skip_default_conversion,
        })
    }

    /// Whether named imports are split into one default import per member.
    pub fn converts_named_imports(&self) -> bool {
        !self.skip_default_conversion
    }

    /// Whether the target depends on the imported member name.
    pub fn is_per_member(&self) -> bool {
        self.template.contains("${member}")
    }

    /// Expand the target template.
    ///
    /// Returns `None` when the template needs a member name and none is
    /// available, e.g. for a dynamic `import()` of a per-symbol package.
    pub fn target(&self, member: Option<&str>, captures: &[String]) -> Option<String> {
        let mut out = String::with_capacity(self.template.len() + 16);
        let mut rest = self.template.as_str();

        while let Some(idx) = rest.find('$') {
            out.push_str(&rest[..idx]);
            let tail = &rest[idx + 1..];

            if let Some(after) = tail.strip_prefix("{member}") {
                out.push_str(member?);
                rest = after;
            } else if let Some(digit) = tail.chars().next().and_then(|c| c.to_digit(10)) {
                if let Some(capture) = captures.get(digit as usize) {
                    out.push_str(capture);
                }
                rest = &tail[1..];
            } else {
                out.push('$');
                rest = tail;
            }
        }
        out.push_str(rest);
        Some(out)
    }
}

#[derive(Debug, Clone, Default)]
pub struct RemapTable {
    entries: Vec<RemapEntry>,
}

impl RemapTable {
    pub fn from_config(config: &ImportsConfig) -> Result<Self> {
        let entries = config
            .import_options
            .iter()
            .map(|(key, option)| RemapEntry::new(key, option))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { entries })
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn lookup(&self, specifier: &str) -> Option<RemapMatch<'_>> {
        let exact = self.entries.iter().find(|entry| match &entry.matcher {
            Matcher::Exact(name) => name == specifier,
            Matcher::Pattern(regex) => regex.as_str() == specifier,
        });
        if let Some(entry) = exact {
            return Some(RemapMatch {
                entry,
                captures: vec![specifier.to_string()],
            });
        }

        self.entries.iter().find_map(|entry| {
            let Matcher::Pattern(regex) = &entry.matcher else {
                return None;
            };
            let caps = regex.captures(specifier)?;
            let captures = caps
                .iter()
                .map(|m| m.map(|m| m.as_str().to_string()).unwrap_or_default())
                .collect();
            Some(RemapMatch { entry, captures })
        })
    }
}

impl RemapMatch<'_> {
    pub fn target(&self, member: Option<&str>) -> Option<String> {
        self.entry.target(member, &self.captures)
    }
}
