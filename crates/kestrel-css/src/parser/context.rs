//! Per-parse configuration.

use crate::properties::CSSPropertyID;

/// [§ 3.3 Quirks Mode](https://quirks.spec.whatwg.org/)
///
/// Which kind of stylesheet the text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CSSParserMode {
    /// An author stylesheet in a standards-mode document.
    #[default]
    Standard,
    /// An author stylesheet in a quirks-mode document.
    Quirks,
    /// The user-agent stylesheet; internal-only grammar is allowed.
    UASheet,
}

/// Whether the document is a secure context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SecureContextMode {
    /// Not a secure context.
    #[default]
    Insecure,
    /// A secure context.
    Secure,
}

/// Settings shared by every parse of one stylesheet. Immutable and cheap
/// to clone.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParserContext {
    /// The stylesheet mode.
    pub mode: CSSParserMode,
    /// The document's secure-context state.
    pub secure_context: SecureContextMode,
    /// Base for resolving relative `url()`s; empty means none.
    pub base_url: String,
}

impl ParserContext {
    /// A context for the given mode with no base URL.
    #[must_use]
    pub const fn new(mode: CSSParserMode) -> Self {
        Self {
            mode,
            secure_context: SecureContextMode::Insecure,
            base_url: String::new(),
        }
    }

    /// A copy with the base URL set.
    #[must_use]
    pub fn with_base_url(&self, base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..self.clone()
        }
    }

    /// A copy that parses in `mode` instead.
    #[must_use]
    pub fn with_mode(&self, mode: CSSParserMode) -> Self {
        Self {
            mode,
            ..self.clone()
        }
    }

    /// Returns true when parsing the user-agent stylesheet.
    #[must_use]
    pub fn is_ua_sheet(&self) -> bool {
        self.mode == CSSParserMode::UASheet
    }

    /// Returns true when parsing in quirks mode.
    #[must_use]
    pub fn is_quirks(&self) -> bool {
        self.mode == CSSParserMode::Quirks
    }

    /// Resolve a `url()` against the base URL.
    ///
    /// Absolute URLs, `data:` URLs, and fragment-only references are kept
    /// as written. Relative paths replace the last path segment of the
    /// base; a leading `/` replaces the base's whole path.
    #[must_use]
    pub fn complete_url(&self, relative: &str) -> String {
        if self.base_url.is_empty()
            || relative.is_empty()
            || relative.starts_with('#')
            || has_scheme(relative)
        {
            return relative.to_string();
        }

        let base = self.base_url.split(['?', '#']).next().unwrap_or_default();
        if let Some(rest) = relative.strip_prefix("//") {
            let scheme = base.split_once(':').map_or("https", |(scheme, _)| scheme);
            return format!("{scheme}://{rest}");
        }

        let origin_end = base
            .find("://")
            .map_or(0, |i| base[i + 3..].find('/').map_or(base.len(), |j| i + 3 + j));
        if relative.starts_with('/') {
            return format!("{}{relative}", &base[..origin_end]);
        }
        match base[origin_end..].rfind('/') {
            Some(i) => format!("{}{relative}", &base[..origin_end + i + 1]),
            None if origin_end > 0 => format!("{base}/{relative}"),
            None => relative.to_string(),
        }
    }
}

fn has_scheme(url: &str) -> bool {
    let Some((scheme, _)) = url.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Whether a unitless number may stand in for a `px` length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnitlessQuirk {
    /// The quirk applies when the context is in quirks mode.
    #[default]
    Allow,
    /// Never accept unitless lengths.
    Forbid,
}

/// Settings for one property parse, threaded down into sub-parsers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LocalContext {
    /// The property was named through a legacy `-webkit-` alias.
    pub use_alias_parsing: bool,
    /// Whether the unitless length quirk may apply.
    pub unitless_quirk: UnitlessQuirk,
    /// The shorthand being expanded, if any.
    pub current_shorthand: Option<CSSPropertyID>,
}

impl LocalContext {
    /// A copy parsing on behalf of `shorthand`.
    #[must_use]
    pub const fn within(self, shorthand: CSSPropertyID) -> Self {
        Self {
            current_shorthand: Some(shorthand),
            ..self
        }
    }

    /// A copy that never accepts unitless lengths.
    #[must_use]
    pub const fn forbid_unitless(self) -> Self {
        Self {
            unitless_quirk: UnitlessQuirk::Forbid,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_url() {
        let ctx = ParserContext::default().with_base_url("https://example.com/css/site.css");
        assert_eq!(ctx.complete_url("img/a.png"), "https://example.com/css/img/a.png");
        assert_eq!(ctx.complete_url("/a.png"), "https://example.com/a.png");
        assert_eq!(ctx.complete_url("data:image/png;base64,AA"), "data:image/png;base64,AA");
        assert_eq!(ctx.complete_url("#frag"), "#frag");
        assert_eq!(ctx.complete_url("//cdn.test/x.png"), "https://cdn.test/x.png");
    }

    #[test]
    fn test_with_mode_keeps_base() {
        let ctx = ParserContext::default().with_base_url("https://a.test/");
        let quirks = ctx.with_mode(CSSParserMode::Quirks);
        assert!(quirks.is_quirks());
        assert_eq!(quirks.base_url, "https://a.test/");
        assert_eq!(quirks.complete_url("b.png"), "https://a.test/b.png");
    }
}
