//! The value parsing entry points.
//!
//! [§ 2.2 Declarations](https://www.w3.org/TR/css-syntax-3/#syntax-description)
//!
//! "Declarations have a name, and a value... The value is the list of
//! component values that follow the colon, optionally terminated by a
//! `!important` annotation."
//!
//! Everything that is not specific to one property happens here: CSS-wide
//! keywords, values that need `var()` substitution, the `!important`
//! annotation, and the rule that the whole value must be used up.

use crate::error::ParseError;
use crate::parser::context::{LocalContext, ParserContext};
use crate::parser::stream::TokenStream;
use crate::properties::consumers::at_end_or_important;
use crate::properties::longhands::parse_longhand;
use crate::properties::shorthands::parse_shorthand;
use crate::properties::{CSSPropertyID, PropertyValue};
use crate::tokenizer::CSSToken;
use crate::values::{CSSValue, CSSWideKeyword, ValueRef};

/// [§ 6.4.2 Important declarations](https://www.w3.org/TR/css-cascade-4/#importance)
///
/// "A declaration is important if it has a !important annotation, i.e.
/// if the last two (non-whitespace, non-comment) tokens in its value are
/// a <delim-token> with the value "!" followed by an <ident-token> with
/// a value that is an ASCII case-insensitive match for "important"."
///
/// STEP 1: Check for <delim-token> "!".
/// STEP 2: Skip any whitespace between "!" and "important".
/// STEP 3: Check for <ident-token> "important".
fn consume_important(stream: &mut TokenStream) -> bool {
    let start = stream.save();
    // STEP 1: Check for !
    if !stream.peek().is_delim('!') {
        return false;
    }
    // STEP 2: Skip whitespace between ! and important
    let _ = stream.consume_including_whitespace();
    // STEP 3: Check for ident "important"
    if stream.peek().ident_matches("important") {
        let _ = stream.consume_including_whitespace();
        return true;
    }
    stream.restore(start);
    false
}

/// Consume the value's closing annotation, if allowed. Returns the
/// declaration's importance, or `None` if anything but the end follows.
fn consume_value_end(stream: &mut TokenStream, allow_important: bool) -> Option<bool> {
    let important = allow_important && consume_important(stream);
    stream.at_end().then_some(important)
}

/// A lone CSS-wide keyword, followed only by the end of the value.
fn consume_css_wide_keyword(stream: &mut TokenStream) -> Option<CSSWideKeyword> {
    let CSSToken::Ident(name) = stream.peek() else {
        return None;
    };
    let keyword = CSSWideKeyword::from_ident(name)?;
    let start = stream.save();
    let _ = stream.consume_including_whitespace();
    if at_end_or_important(stream) {
        Some(keyword)
    } else {
        stream.restore(start);
        None
    }
}

/// The raw text of a value that contains `var()`, with trailing whitespace
/// and an allowed `!important` left out. Returns the text and whether the
/// annotation was present.
fn consume_unparsed(stream: &mut TokenStream, allow_important: bool) -> (String, bool) {
    let start = stream.save();
    let mut end = start;
    let mut important = false;
    while !stream.at_end() {
        if allow_important && stream.peek().is_delim('!') {
            let bang = stream.save();
            if consume_important(stream) && stream.at_end() {
                important = true;
                break;
            }
            stream.restore(bang);
        }
        let token = stream.consume();
        if !token.is_whitespace() {
            end = stream.save();
        }
    }
    (stream.source_text(start, end), important)
}

/// [§ 2 Property Value Parsing](https://drafts.csswg.org/css-values-4/#value-defs)
///
/// Parses one declaration value into longhand entries.
#[derive(Debug)]
pub struct CSSPropertyParser<'a> {
    stream: &'a mut TokenStream,
    context: &'a ParserContext,
    local: LocalContext,
    parsed: Vec<PropertyValue>,
}

impl<'a> CSSPropertyParser<'a> {
    /// Parse the value of `id` from `stream` and append its longhands to
    /// `out`.
    ///
    /// Returns false, leaving `out` unchanged, when the value does not
    /// match the property's grammar or anything but an allowed
    /// `!important` follows it.
    pub fn parse_value(
        id: CSSPropertyID,
        allow_important: bool,
        stream: &'a mut TokenStream,
        context: &'a ParserContext,
        out: &mut Vec<PropertyValue>,
    ) -> bool {
        Self::parse_value_with(id, LocalContext::default(), allow_important, stream, context, out)
    }

    /// [`Self::parse_value`] with an explicit local context, as used for
    /// properties named through a `-webkit-` alias.
    pub fn parse_value_with(
        id: CSSPropertyID,
        local: LocalContext,
        allow_important: bool,
        stream: &'a mut TokenStream,
        context: &'a ParserContext,
        out: &mut Vec<PropertyValue>,
    ) -> bool {
        let mut parser = Self {
            stream,
            context,
            local,
            parsed: Vec::new(),
        };
        let parsed = parser.parse_value_start(id, allow_important);

        #[cfg(feature = "parse-trace")]
        eprintln!(
            "[PARSE] {id}: {} ({} entries)",
            if parsed { "accepted" } else { "rejected" },
            parser.parsed.len()
        );

        if parsed {
            out.append(&mut parser.parsed);
        }
        parsed
    }

    fn parse_value_start(&mut self, id: CSSPropertyID, allow_important: bool) -> bool {
        self.stream.consume_whitespace();
        if self.stream.at_end() {
            return false;
        }

        // STEP 1: A CSS-wide keyword sets every longhand.
        if let Some(keyword) = consume_css_wide_keyword(self.stream) {
            let Some(important) = consume_value_end(self.stream, allow_important) else {
                return false;
            };
            self.add_for_all_longhands(id, &CSSValue::CSSWide(keyword).into_ref(), important);
            return true;
        }

        // STEP 2: Values with `var()` wait for substitution.
        if self.stream.contains_function("var") {
            let (text, important) = consume_unparsed(self.stream, allow_important);
            if id.is_shorthand() {
                let pending = CSSValue::PendingSubstitution {
                    shorthand: id,
                    text,
                }
                .into_ref();
                self.add_for_all_longhands(id, &pending, important);
            } else {
                self.parsed
                    .push(PropertyValue::new(id, CSSValue::Unparsed(text).into_ref(), important));
            }
            return true;
        }

        // STEP 3: The property's own grammar.
        if id.is_shorthand() {
            if !parse_shorthand(id, false, self.stream, self.context, &self.local, &mut self.parsed) {
                return false;
            }
        } else {
            let Some(value) = parse_longhand(id, self.stream, self.context, &self.local) else {
                return false;
            };
            self.parsed.push(PropertyValue::new(id, value, false));
        }

        // STEP 4: Only the annotation may follow.
        let Some(important) = consume_value_end(self.stream, allow_important) else {
            self.parsed.clear();
            return false;
        };
        for entry in &mut self.parsed {
            entry.important = important;
        }
        true
    }

    fn add_for_all_longhands(&mut self, id: CSSPropertyID, value: &ValueRef, important: bool) {
        if !id.is_shorthand() {
            self.parsed.push(PropertyValue::new(id, value.clone(), important));
            return;
        }
        self.parsed.extend(id.longhands().iter().map(|&longhand| PropertyValue {
            id: longhand,
            shorthand: Some(id),
            value: value.clone(),
            important,
            implicit: false,
        }));
    }
}

/// Parse `text` as the value of longhand `id`.
///
/// A CSS-wide keyword parses to [`CSSValue::CSSWide`] and a value that
/// contains `var()` to [`CSSValue::Unparsed`]. Shorthands and
/// `!important` are not accepted.
#[must_use]
pub fn parse_single_value(
    id: CSSPropertyID,
    text: &str,
    context: &ParserContext,
) -> Option<ValueRef> {
    if id.is_shorthand() {
        return None;
    }
    let mut stream = TokenStream::new(text);
    let mut out = Vec::with_capacity(1);
    if !CSSPropertyParser::parse_value(id, false, &mut stream, context, &mut out) {
        return None;
    }
    out.pop().map(|entry| entry.value)
}

/// Parse `text` as the value of `id`, as when a script sets one property.
///
/// `!important` inside the text is rejected; `important` marks every
/// resulting entry instead.
///
/// # Errors
///
/// [`ParseError::EmptyValue`] for blank text, [`ParseError::InvalidValue`]
/// when the text does not match the property's grammar.
pub fn parse_value_text(
    id: CSSPropertyID,
    text: &str,
    important: bool,
    context: &ParserContext,
) -> Result<Vec<PropertyValue>, ParseError> {
    if text.trim().is_empty() {
        return Err(ParseError::EmptyValue(id));
    }
    let mut stream = TokenStream::new(text);
    let mut out = Vec::new();
    if !CSSPropertyParser::parse_value(id, false, &mut stream, context, &mut out) {
        return Err(ParseError::InvalidValue {
            property: id,
            value: text.trim().to_string(),
        });
    }
    for entry in &mut out {
        entry.important = important;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    use CSSPropertyID as P;

    fn parse(id: CSSPropertyID, text: &str) -> Option<Vec<PropertyValue>> {
        let mut stream = TokenStream::new(text);
        let mut out = Vec::new();
        CSSPropertyParser::parse_value(id, true, &mut stream, &ParserContext::default(), &mut out)
            .then_some(out)
    }

    #[test]
    fn test_important_annotation() {
        let entries = parse(P::Color, "  red ! IMPORTANT ").unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].important);
        assert!(parse(P::Color, "red !important junk").is_none());
        assert!(parse(P::Color, "red !").is_none());
        assert!(parse(P::Color, "!important").is_none());
    }

    #[test]
    fn test_css_wide_keywords() {
        let entries = parse(P::Margin, "inherit !important").unwrap();
        assert_eq!(entries.len(), 4);
        assert!(entries.iter().all(|e| e.important && e.shorthand == Some(P::Margin)));
        assert!(entries.iter().all(|e| e.value.css_text() == "inherit"));
        assert!(parse(P::Width, "initial 10px").is_none());
    }

    #[test]
    fn test_var_values() {
        let entries = parse(P::Width, "calc(var(--w) + 1px) !important").unwrap();
        assert_eq!(*entries[0].value, CSSValue::Unparsed("calc(var(--w) + 1px)".into()));
        assert!(entries[0].important);

        let entries = parse(P::Margin, "var(--m) 2px").unwrap();
        assert_eq!(entries.len(), 4);
        assert!(entries.iter().all(|e| matches!(
            &*e.value,
            CSSValue::PendingSubstitution { shorthand: P::Margin, text } if text == "var(--m) 2px"
        )));
    }

    #[test]
    fn test_single_value() {
        let ctx = ParserContext::default();
        assert_eq!(parse_single_value(P::Width, "10px", &ctx).map(|v| v.css_text()).as_deref(), Some("10px"));
        assert!(parse_single_value(P::Margin, "10px", &ctx).is_none());
        assert!(parse_single_value(P::Width, "10px !important", &ctx).is_none());
        assert_eq!(
            parse_single_value(P::Width, "unset", &ctx).map(|v| v.css_text()).as_deref(),
            Some("unset")
        );
    }

    #[test]
    fn test_value_text_errors() {
        let ctx = ParserContext::default();
        assert_eq!(parse_value_text(P::Width, "  ", false, &ctx), Err(ParseError::EmptyValue(P::Width)));
        assert_eq!(
            parse_value_text(P::Width, "bogus", false, &ctx),
            Err(ParseError::InvalidValue {
                property: P::Width,
                value: "bogus".into()
            })
        );
        let entries = parse_value_text(P::Gap, "1px", true, &ctx).unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.important));
    }
}
