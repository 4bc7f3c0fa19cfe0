//! `font` and `font-variant`.

use super::Expansion;
use crate::parser::context::{ParserContext, UnitlessQuirk};
use crate::parser::stream::TokenStream;
use crate::properties::CSSPropertyID;
use crate::properties::consumers::{
    at_end_or_important, consume_ident_in, consume_slash_including_whitespace,
};
use crate::properties::font::{
    AlternatesParser, EastAsianParser, LigaturesParser, NumericParser, VariantAccumulator,
    VariantParseResult, consume_font_family, consume_font_size, consume_font_stretch_keyword,
    consume_font_style, consume_font_variant_css21, consume_font_weight, consume_line_height,
    consume_system_font,
};
use crate::values::{CSSValue, CSSValueID, ValueRef};

use CSSPropertyID as P;
use CSSValueID as V;

/// Longhands `font` resets to their initial values without reading them.
const FONT_RESETS: &[(CSSPropertyID, CSSValueID)] = &[
    (P::FontVariantLigatures, V::Normal),
    (P::FontVariantNumeric, V::Normal),
    (P::FontVariantEastAsian, V::Normal),
    (P::FontVariantAlternates, V::Normal),
    (P::FontVariantPosition, V::Normal),
    (P::FontVariantEmoji, V::Normal),
    (P::FontSizeAdjust, V::None),
    (P::FontKerning, V::Auto),
    (P::FontOpticalSizing, V::Auto),
    (P::FontFeatureSettings, V::Normal),
    (P::FontVariationSettings, V::Normal),
];

/// [§ 2.8 Shorthand font property](https://www.w3.org/TR/css-fonts-4/#font-prop)
///
/// `[ [ <'font-style'> || <font-variant-css2> || <'font-weight'> ||
///  <font-width-css3> ]? <'font-size'> [ / <'line-height'> ]? <'font-family'># ]
///  | <system-family-name>`
pub(super) fn expand_font(
    out: &mut Expansion,
    stream: &mut TokenStream,
    ctx: &ParserContext,
) -> Option<()> {
    // A system font stands for every longhand until it is resolved.
    if let Some(system_font) = consume_system_font(stream) {
        let pending = CSSValue::PendingSystemFont(system_font).into_ref();
        out.set_all(P::Font.longhands(), &pending);
        return Some(());
    }

    // STEP 1: Style, small-caps, weight and width in any order.
    let mut style = None;
    let mut caps = None;
    let mut weight = None;
    let mut stretch = None;
    for _ in 0..4 {
        if stream.at_end() {
            break;
        }
        let id = stream.peek_id();
        if id == Some(V::Normal) {
            let _ = stream.consume_including_whitespace();
            continue;
        }
        if style.is_none() && matches!(id, Some(V::Italic | V::Oblique)) {
            style = Some(consume_font_style(stream)?);
            continue;
        }
        if caps.is_none()
            && let Some(value) = consume_font_variant_css21(stream)
        {
            caps = Some(value);
            continue;
        }
        if weight.is_none()
            && let Some(value) = consume_font_weight(stream)
        {
            weight = Some(value);
            continue;
        }
        if stretch.is_none()
            && let Some(value) = consume_font_stretch_keyword(stream)
        {
            stretch = Some(value);
            continue;
        }
        break;
    }
    if stream.at_end() {
        return None;
    }

    // STEP 2: Size, then an optional line height, then the family.
    let size = consume_font_size(stream, ctx, UnitlessQuirk::Forbid)?;
    if stream.at_end() {
        return None;
    }
    let line_height = if consume_slash_including_whitespace(stream) {
        Some(consume_line_height(stream, ctx)?)
    } else {
        None
    };
    let family = consume_font_family(stream)?;

    let normal = || CSSValue::ident(V::Normal);
    out.set(P::FontStyle, style.unwrap_or_else(normal));
    out.set(P::FontVariantCaps, caps.unwrap_or_else(normal));
    out.set(P::FontWeight, weight.unwrap_or_else(normal));
    out.set(P::FontStretch, stretch.unwrap_or_else(normal));
    out.set(P::FontSize, size);
    out.set(P::LineHeight, line_height.unwrap_or_else(normal));
    out.set(P::FontFamily, family);
    for &(longhand, keyword) in FONT_RESETS {
        out.set_implicit(longhand, CSSValue::ident(keyword));
    }
    Some(())
}

/// Offer the next token to `accumulator`. `None` when the token repeats a
/// filled group, which invalidates the whole value.
fn offer<A: VariantAccumulator>(accumulator: &mut A, stream: &mut TokenStream) -> Option<bool> {
    match accumulator.consume(stream) {
        VariantParseResult::ConsumedValue => Some(true),
        VariantParseResult::DisallowedValue => None,
        VariantParseResult::UnknownValue => Some(false),
    }
}

/// Take the next token as one of `keywords` into `slot` if the slot is
/// still empty.
fn fill_once(
    slot: &mut Option<ValueRef>,
    stream: &mut TokenStream,
    keywords: &[CSSValueID],
) -> bool {
    if slot.is_some() {
        return false;
    }
    *slot = consume_ident_in(stream, keywords);
    slot.is_some()
}

/// [§ 6.11 Overall shorthand for font rendering](https://www.w3.org/TR/css-fonts-4/#font-variant-prop)
///
/// `normal | none | [ <common-lig-values> || ... || <east-asian-width-values>
///  || ruby || [ sub | super ] || [ text | emoji | unicode ] ]`
pub(super) fn expand_font_variant(out: &mut Expansion, stream: &mut TokenStream) -> Option<()> {
    let normal = || CSSValue::ident(V::Normal);

    if let Some(keyword) = consume_ident_in(stream, &[V::Normal, V::None]) {
        out.set(P::FontVariantLigatures, keyword);
        for &longhand in &P::FontVariant.longhands()[1..] {
            out.set(longhand, normal());
        }
        return Some(());
    }

    let mut ligatures = LigaturesParser::default();
    let mut numeric = NumericParser::default();
    let mut east_asian = EastAsianParser::default();
    let mut alternates = AlternatesParser::default();
    let mut caps = None;
    let mut position = None;
    let mut emoji = None;
    let mut found = false;

    while !at_end_or_important(stream) {
        let taken = offer(&mut ligatures, stream)?
            || offer(&mut numeric, stream)?
            || offer(&mut east_asian, stream)?
            || offer(&mut alternates, stream)?
            || fill_once(
                &mut caps,
                stream,
                &[
                    V::SmallCaps,
                    V::AllSmallCaps,
                    V::PetiteCaps,
                    V::AllPetiteCaps,
                    V::Unicase,
                    V::TitlingCaps,
                ],
            )
            || fill_once(&mut position, stream, &[V::Sub, V::Super])
            || fill_once(&mut emoji, stream, &[V::Text, V::Emoji, V::Unicode]);
        if !taken {
            break;
        }
        found = true;
    }
    if !found {
        return None;
    }

    out.set(P::FontVariantLigatures, ligatures.finalize());
    out.set(P::FontVariantCaps, caps.unwrap_or_else(normal));
    out.set(P::FontVariantAlternates, alternates.finalize());
    out.set(P::FontVariantNumeric, numeric.finalize());
    out.set(P::FontVariantEastAsian, east_asian.finalize());
    out.set(P::FontVariantPosition, position.unwrap_or_else(normal));
    out.set(P::FontVariantEmoji, emoji.unwrap_or_else(normal));
    Some(())
}

#[cfg(test)]
mod tests {
    use super::super::parse_shorthand;
    use super::*;
    use crate::parser::context::LocalContext;
    use crate::properties::PropertyValue;

    fn expand(id: CSSPropertyID, text: &str) -> Option<Vec<PropertyValue>> {
        let mut stream = TokenStream::new(text);
        let mut out = Vec::new();
        parse_shorthand(
            id,
            false,
            &mut stream,
            &ParserContext::default(),
            &LocalContext::default(),
            &mut out,
        )
        .then_some(out)
    }

    fn value_of(entries: &[PropertyValue], id: CSSPropertyID) -> String {
        entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.value.css_text())
            .unwrap_or_default()
    }

    #[test]
    fn test_font_components() {
        let entries = expand(P::Font, "italic bold 12px/30px Georgia, serif").unwrap();
        assert_eq!(entries.len(), P::Font.longhands().len());
        assert_eq!(value_of(&entries, P::FontStyle), "italic");
        assert_eq!(value_of(&entries, P::FontWeight), "bold");
        assert_eq!(value_of(&entries, P::FontSize), "12px");
        assert_eq!(value_of(&entries, P::LineHeight), "30px");
        assert_eq!(value_of(&entries, P::FontFamily), "Georgia, serif");
        assert_eq!(value_of(&entries, P::FontVariantCaps), "normal");
        assert_eq!(value_of(&entries, P::FontKerning), "auto");
    }

    #[test]
    fn test_font_requires_size_and_family() {
        assert!(expand(P::Font, "bold").is_none());
        assert!(expand(P::Font, "12px").is_none());
        assert!(expand(P::Font, "12px/ serif").is_none());
        assert!(expand(P::Font, "normal normal normal normal normal 12px serif").is_none());
        assert!(expand(P::Font, "small-caps 1em serif").is_some());
    }

    #[test]
    fn test_font_system_font() {
        let entries = expand(P::Font, "caption").unwrap();
        assert!(entries.iter().all(|e| matches!(*e.value, CSSValue::PendingSystemFont(V::Caption))));
    }

    #[test]
    fn test_font_variant() {
        let entries = expand(P::FontVariant, "small-caps slashed-zero common-ligatures").unwrap();
        assert_eq!(value_of(&entries, P::FontVariantCaps), "small-caps");
        assert_eq!(value_of(&entries, P::FontVariantNumeric), "slashed-zero");
        assert_eq!(value_of(&entries, P::FontVariantLigatures), "common-ligatures");
        assert_eq!(value_of(&entries, P::FontVariantEmoji), "normal");

        let entries = expand(P::FontVariant, "none").unwrap();
        assert_eq!(value_of(&entries, P::FontVariantLigatures), "none");
        assert_eq!(value_of(&entries, P::FontVariantCaps), "normal");

        assert!(expand(P::FontVariant, "common-ligatures no-common-ligatures").is_none());
        assert!(expand(P::FontVariant, "sub super").is_none());
        assert!(expand(P::FontVariant, "none small-caps").is_none());
    }
}
