//! An editable set of parsed declarations, as held by a style rule or an
//! element's `style` attribute.

use serde::Serialize;

use crate::parser::context::{CSSParserMode, LocalContext, ParserContext};
use crate::parser::declaration::parse_declarations;
use crate::parser::property_parser::{CSSPropertyParser, parse_value_text};
use crate::parser::stream::TokenStream;
use crate::properties::{CSSPropertyID, PropertyValue, resolve_property};
use crate::values::{CSSValue, ValueRef};

/// The outcome of [`MutablePropertyValueSet::parse_and_set`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetResult {
    /// At least one longhand was added or changed.
    Changed,
    /// The value parsed but every longhand already had it.
    Unchanged,
    /// The value did not parse; the set is untouched.
    ParseError,
}

/// [§ 6.6 CSSStyleDeclaration](https://drafts.csswg.org/cssom/#the-cssstyledeclaration-interface)
///
/// "A CSS declaration block is an ordered collection of CSS properties
/// with their associated values." Only longhands are stored; a shorthand
/// is stored as its expansion.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MutablePropertyValueSet {
    #[serde(skip)]
    context: ParserContext,
    entries: Vec<PropertyValue>,
}

impl MutablePropertyValueSet {
    /// An empty set parsing in `mode`.
    #[must_use]
    pub const fn new(mode: CSSParserMode) -> Self {
        Self::with_context(ParserContext::new(mode))
    }

    /// An empty set parsing with `context`.
    #[must_use]
    pub const fn with_context(context: ParserContext) -> Self {
        Self {
            context,
            entries: Vec::new(),
        }
    }

    /// The parser context values are parsed with.
    #[must_use]
    pub const fn context(&self) -> &ParserContext {
        &self.context
    }

    /// The number of longhands in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the set holds no longhands.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The longhands in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &PropertyValue> {
        self.entries.iter()
    }

    fn find(&self, id: CSSPropertyID) -> Option<&PropertyValue> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Store one longhand, replacing any entry for the same property. A
    /// replaced entry moves to the end. Returns true if the set changed.
    pub fn set_property(&mut self, entry: PropertyValue) -> bool {
        match self.entries.iter().position(|existing| existing.id == entry.id) {
            Some(index) if self.entries[index] == entry => false,
            Some(index) => {
                let _ = self.entries.remove(index);
                self.entries.push(entry);
                true
            }
            None => {
                self.entries.push(entry);
                true
            }
        }
    }

    fn set_all(&mut self, entries: Vec<PropertyValue>) -> bool {
        entries
            .into_iter()
            .fold(false, |changed, entry| self.set_property(entry) | changed)
    }

    /// [§ 6.6 setProperty()](https://drafts.csswg.org/cssom/#dom-cssstyledeclaration-setproperty)
    ///
    /// Parse `text` as the value of `id` and store the resulting longhands.
    pub fn parse_and_set(&mut self, id: CSSPropertyID, text: &str, important: bool) -> SetResult {
        let Ok(entries) = parse_value_text(id, text, important, &self.context) else {
            return SetResult::ParseError;
        };
        if self.set_all(entries) {
            SetResult::Changed
        } else {
            SetResult::Unchanged
        }
    }

    /// [§ 6.6 cssText](https://drafts.csswg.org/cssom/#dom-cssstyledeclaration-csstext)
    ///
    /// Parse a `;`-separated declaration list and store every declaration
    /// that parses. Unknown properties and invalid values are skipped.
    /// Returns true if the set changed.
    pub fn parse_declaration_list(&mut self, text: &str) -> bool {
        let mut changed = false;
        for declaration in parse_declarations(text) {
            let Some((id, use_alias_parsing)) = resolve_property(&declaration.name) else {
                continue;
            };
            let local = LocalContext {
                use_alias_parsing,
                ..LocalContext::default()
            };
            let mut stream = TokenStream::new(&declaration.value);
            let mut entries = Vec::new();
            if CSSPropertyParser::parse_value_with(
                id,
                local,
                true,
                &mut stream,
                &self.context,
                &mut entries,
            ) {
                changed |= self.set_all(entries);
            }
        }
        changed
    }

    /// The stored value of a longhand.
    #[must_use]
    pub fn get_property_css_value(&self, id: CSSPropertyID) -> Option<ValueRef> {
        self.find(id).map(|entry| entry.value.clone())
    }

    /// [§ 6.6 getPropertyValue()](https://drafts.csswg.org/cssom/#dom-cssstyledeclaration-getpropertyvalue)
    ///
    /// The serialized value of a longhand. For a shorthand, the value is
    /// only available when all its longhands share one CSS-wide keyword or
    /// one pending `var()` text; otherwise the empty string.
    #[must_use]
    pub fn get_property_value(&self, id: CSSPropertyID) -> String {
        if !id.is_shorthand() {
            return self.find(id).map(|entry| entry.value.css_text()).unwrap_or_default();
        }
        let values: Option<Vec<&ValueRef>> = id
            .longhands()
            .iter()
            .map(|&longhand| self.find(longhand).map(|entry| &entry.value))
            .collect();
        let Some((first, rest)) = values.as_deref().and_then(<[_]>::split_first) else {
            return String::new();
        };
        if rest.iter().any(|value| value != first) {
            return String::new();
        }
        match &***first {
            CSSValue::CSSWide(keyword) => keyword.to_string(),
            CSSValue::PendingSubstitution { shorthand, text } if *shorthand == id => text.clone(),
            _ => String::new(),
        }
    }

    /// Whether the property is `!important`. A shorthand is important when
    /// every one of its longhands is.
    #[must_use]
    pub fn is_important(&self, id: CSSPropertyID) -> bool {
        if !id.is_shorthand() {
            return self.find(id).is_some_and(|entry| entry.important);
        }
        id.longhands()
            .iter()
            .all(|&longhand| self.find(longhand).is_some_and(|entry| entry.important))
    }

    /// [§ 6.6 removeProperty()](https://drafts.csswg.org/cssom/#dom-cssstyledeclaration-removeproperty)
    ///
    /// Remove a longhand, or every longhand of a shorthand. Returns true if
    /// anything was removed.
    pub fn remove_property(&mut self, id: CSSPropertyID) -> bool {
        let before = self.entries.len();
        if id.is_shorthand() {
            let longhands = id.longhands();
            self.entries.retain(|entry| !longhands.contains(&entry.id));
        } else {
            self.entries.retain(|entry| entry.id != id);
        }
        self.entries.len() != before
    }

    /// [§ 6.7.2 Serializing CSS Values](https://drafts.csswg.org/cssom/#serialize-a-css-declaration-block)
    ///
    /// `name: value;` for each longhand, separated by single spaces.
    /// Longhands waiting on `var()` are written once as their shorthand.
    #[must_use]
    pub fn as_text(&self) -> String {
        let mut written_shorthands = Vec::new();
        let mut declarations = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            let (name, value) = match &*entry.value {
                CSSValue::PendingSubstitution { shorthand, text } => {
                    if written_shorthands.contains(shorthand) {
                        continue;
                    }
                    written_shorthands.push(*shorthand);
                    (shorthand.name(), text.clone())
                }
                value => (entry.name(), value.css_text()),
            };
            let important = if entry.important { " !important" } else { "" };
            declarations.push(format!("{name}: {value}{important};"));
        }
        declarations.join(" ")
    }
}

impl<'a> IntoIterator for &'a MutablePropertyValueSet {
    type Item = &'a PropertyValue;
    type IntoIter = core::slice::Iter<'a, PropertyValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use CSSPropertyID as P;

    #[test]
    fn test_replace_moves_to_end() {
        let mut set = MutablePropertyValueSet::default();
        assert!(set.parse_declaration_list("color: red; width: 1px; color: blue"));
        assert_eq!(set.as_text(), "width: 1px; color: blue;");
    }

    #[test]
    fn test_parse_and_set_results() {
        let mut set = MutablePropertyValueSet::default();
        assert_eq!(set.parse_and_set(P::Margin, "1px", false), SetResult::Changed);
        assert_eq!(set.parse_and_set(P::Margin, "1px", false), SetResult::Unchanged);
        assert_eq!(set.parse_and_set(P::Margin, "1px !important", false), SetResult::ParseError);
        assert_eq!(set.parse_and_set(P::MarginTop, "2px", true), SetResult::Changed);
        assert_eq!(set.len(), 4);
        assert!(set.is_important(P::MarginTop));
        assert!(!set.is_important(P::Margin));
    }

    #[test]
    fn test_shorthand_values() {
        let mut set = MutablePropertyValueSet::default();
        let _ = set.parse_declaration_list("padding: inherit; margin: var(--m)");
        assert_eq!(set.get_property_value(P::Padding), "inherit");
        assert_eq!(set.get_property_value(P::Margin), "var(--m)");
        assert_eq!(set.get_property_value(P::MarginTop), "");
        assert_eq!(
            set.as_text(),
            "padding-top: inherit; padding-right: inherit; padding-bottom: inherit; \
             padding-left: inherit; margin: var(--m);"
        );
        assert!(set.remove_property(P::Margin));
        assert!(!set.remove_property(P::Margin));
        assert_eq!(set.len(), 4);
    }
}
