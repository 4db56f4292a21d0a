//! Module specifier classification.

use nobundle_config::AliasConfig;

/// Component file extension, renamed to [`SCRIPT_EXTENSION`] in output specifiers.
pub const COMPONENT_EXTENSION: &str = ".vue";
pub const SCRIPT_EXTENSION: &str = ".js";

/// The shape of a module specifier as written in source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecifierKind {
    /// `./x` or `../x`
    Relative,
    /// `/x`
    RootAbsolute,
    /// Starts with a configured alias prefix such as `@/`.
    Aliased,
    /// `https://...`, `http://...` or protocol-relative `//...`
    Url,
    /// A package name, optionally with a subpath. Browsers cannot load these.
    Bare,
}

impl SpecifierKind {
    pub fn classify(specifier: &str, aliases: &[AliasConfig]) -> Self {
        if aliases
            .iter()
            .any(|a| !a.alias.is_empty() && specifier.starts_with(&a.alias))
        {
            return Self::Aliased;
        }
        if specifier.starts_with("./") || specifier.starts_with("../") {
            return Self::Relative;
        }
        if specifier.starts_with("//") || has_url_scheme(specifier) {
            return Self::Url;
        }
        if specifier.starts_with('/') {
            return Self::RootAbsolute;
        }
        Self::Bare
    }

    /// Whether a browser can load this specifier without an import map.
    pub fn is_browser_resolvable(self) -> bool {
        matches!(self, Self::Relative | Self::RootAbsolute | Self::Url)
    }
}

fn has_url_scheme(specifier: &str) -> bool {
    ["http://", "https://", "data:", "blob:"]
        .iter()
        .any(|scheme| specifier.starts_with(scheme))
}

/// Replace a trailing `.vue` on the last path segment with `.js`.
///
/// Only the final segment is touched, so `./vue.config/Foo.vue` keeps its
/// directory name.
pub fn rename_component_extension(specifier: &str) -> Option<String> {
    let (dir, name) = match specifier.rfind('/') {
        Some(idx) => specifier.split_at(idx + 1),
        None => ("", specifier),
    };
    let stem = name.strip_suffix(COMPONENT_EXTENSION)?;
    Some(format!("{dir}{stem}{SCRIPT_EXTENSION}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nobundle_config::default_aliases;

    #[test]
    fn classifies_each_kind() {
        let aliases = default_aliases();
        let cases = [
            ("./App.vue", SpecifierKind::Relative),
            ("../utils/date.js", SpecifierKind::Relative),
            ("/src/main.js", SpecifierKind::RootAbsolute),
            ("@/components/Nav", SpecifierKind::Aliased),
            ("https://cdn.example.com/vue.js", SpecifierKind::Url),
            ("//cdn.example.com/vue.js", SpecifierKind::Url),
            ("vue", SpecifierKind::Bare),
            ("@heroicons/vue/outline", SpecifierKind::Bare),
            (".hidden", SpecifierKind::Bare),
        ];
        for (spec, expected) in cases {
            assert_eq!(SpecifierKind::classify(spec, &aliases), expected, "{spec}");
        }
    }

    #[test]
    fn scoped_package_is_not_an_alias() {
        // `@/` is the alias, `@scope/pkg` is a package.
        let kind = SpecifierKind::classify("@headlessui/vue", &default_aliases());
        assert_eq!(kind, SpecifierKind::Bare);
        assert!(!kind.is_browser_resolvable());
    }

    #[test]
    fn renames_only_last_segment() {
        assert_eq!(
            rename_component_extension("./Foo.vue").as_deref(),
            Some("./Foo.js")
        );
        assert_eq!(
            rename_component_extension("/src/vue.d/Bar.vue").as_deref(),
            Some("/src/vue.d/Bar.js")
        );
        assert_eq!(rename_component_extension("Foo.vue").as_deref(), Some("Foo.js"));
        assert_eq!(rename_component_extension("./Foo.js"), None);
        assert_eq!(rename_component_extension("./Foo.vue/index.js"), None);
    }
}
