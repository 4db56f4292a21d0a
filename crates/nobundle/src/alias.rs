//! Path alias resolution (`@/` to `/src/`).

use std::sync::LazyLock;

use nobundle_config::AliasConfig;
use regex::{Captures, Regex};

/// Plain `src`/`href` attributes. Bound attributes (`:src`) hold JS
/// expressions and are not matched.
static MARKUP_ATTRIBUTE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r#"(\s)(src|href)="([^"]*)""#).ok());

#[derive(Debug, Clone, Default)]
pub struct AliasResolver {
    aliases: Vec<AliasConfig>,
}

impl AliasResolver {
    pub fn new(aliases: Vec<AliasConfig>) -> Self {
        Self { aliases }
    }

    pub fn aliases(&self) -> &[AliasConfig] {
        &self.aliases
    }

    pub fn has_alias(&self, path: &str) -> bool {
        self.aliases.iter().any(|a| path.starts_with(&a.alias))
    }

    /// Apply every alias in configured order, each at most once, as a prefix
    /// substitution.
    ///
    /// Alias prefixes are assumed to be disjoint and no replacement should
    /// start with another alias, otherwise the result depends on order.
    pub fn resolve(&self, path: &str) -> String {
        let mut resolved = path.to_string();
        for alias in &self.aliases {
            if let Some(rest) = resolved.strip_prefix(alias.alias.as_str()) {
                resolved = format!("{}{rest}", alias.replacement);
            }
        }
        resolved
    }

    /// Rewrite `src="..."` and `href="..."` attribute values in template markup
    /// with `rewrite`, leaving every other byte untouched.
    pub fn rewrite_markup(&self, markup: &str, mut rewrite: impl FnMut(&str) -> String) -> String {
        let Some(re) = MARKUP_ATTRIBUTE.as_ref() else {
            return markup.to_string();
        };
        re.replace_all(markup, |caps: &Captures<'_>| {
            format!("{}{}=\"{}\"", &caps[1], &caps[2], rewrite(&caps[3]))
        })
        .into_owned()
    }
}
