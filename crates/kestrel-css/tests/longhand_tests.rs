//! Integration tests for longhand property grammars.

use kestrel_css::parser::{CSSParserMode, ParserContext, parse_single_value, parse_value_text};
use kestrel_css::properties::CSSPropertyID;
use kestrel_css::values::{CSSValue, CSSWideKeyword};
use kestrel_css::ParseError;
use strum::IntoEnumIterator;

use CSSPropertyID as P;

/// Helper to parse a longhand value and serialize it
fn parse(id: CSSPropertyID, value: &str) -> Option<String> {
    parse_single_value(id, value, &ParserContext::default()).map(|v| v.css_text())
}

#[test]
fn test_every_longhand_takes_css_wide_keywords() {
    for id in CSSPropertyID::iter().filter(|id| !id.is_shorthand()) {
        let value = parse_single_value(id, " revert-layer ", &ParserContext::default());
        assert_eq!(
            value.as_deref(),
            Some(&CSSValue::CSSWide(CSSWideKeyword::RevertLayer)),
            "{id} rejected a CSS-wide keyword"
        );
    }
}

#[test]
fn test_every_longhand_defers_var() {
    for id in CSSPropertyID::iter().filter(|id| !id.is_shorthand()) {
        let value = parse_single_value(id, "var(--x, 1px)", &ParserContext::default());
        assert_eq!(
            value.as_deref(),
            Some(&CSSValue::Unparsed("var(--x, 1px)".into())),
            "{id} did not defer var()"
        );
    }
}

#[test]
fn test_display() {
    assert_eq!(parse(P::Display, "inline flow-root").as_deref(), Some("inline-block"));
    assert_eq!(parse(P::Display, "block flow list-item").as_deref(), Some("list-item"));
    assert_eq!(parse(P::Display, "list-item grid"), None);
}

#[test]
fn test_box_model() {
    assert_eq!(parse(P::MaxWidth, "none").as_deref(), Some("none"));
    assert_eq!(parse(P::MaxWidth, "auto"), None);
    assert_eq!(parse(P::PaddingLeft, "-1px"), None);
    assert_eq!(parse(P::ZIndex, "-3").as_deref(), Some("-3"));
    assert_eq!(parse(P::ZIndex, "1.5"), None);
    assert_eq!(parse(P::Opacity, "150%").as_deref(), Some("150%"));
}

#[test]
fn test_unitless_lengths_in_quirks_mode() {
    let quirks = ParserContext::new(CSSParserMode::Quirks);
    let text = |id, value| parse_single_value(id, value, &quirks).map(|v| v.css_text());
    assert_eq!(text(P::Width, "10").as_deref(), Some("10px"));
    assert_eq!(text(P::Top, "3").as_deref(), Some("3px"));
    assert_eq!(text(P::OutlineWidth, "3"), None);
    assert_eq!(parse(P::Width, "10"), None);
}

#[test]
fn test_alignment() {
    assert_eq!(parse(P::AlignSelf, "first baseline").as_deref(), Some("baseline"));
    assert_eq!(parse(P::JustifyItems, "right legacy").as_deref(), Some("legacy right"));
    assert_eq!(parse(P::JustifyContent, "baseline"), None);
    assert_eq!(parse(P::AlignContent, "safe center").as_deref(), Some("safe center"));
}

#[test]
fn test_backgrounds() {
    assert_eq!(parse(P::BackgroundRepeat, "repeat no-repeat").as_deref(), Some("repeat-x"));
    assert_eq!(parse(P::BorderImageSlice, "fill 1 2").as_deref(), Some("1 2 fill"));
    assert_eq!(parse(P::BackgroundSize, "auto 10px, contain").as_deref(), Some("auto 10px, contain"));
    assert_eq!(parse(P::BackgroundAttachment, "fixed, local").as_deref(), Some("fixed, local"));
}

#[test]
fn test_fonts() {
    assert_eq!(
        parse(P::FontFamily, "Times New Roman, serif").as_deref(),
        Some("\"Times New Roman\", serif")
    );
    assert_eq!(parse(P::FontWeight, "1001"), None);
    assert_eq!(parse(P::FontStyle, "oblique 20deg").as_deref(), Some("oblique 20deg"));
    assert_eq!(
        parse(P::FontFeatureSettings, "\"liga\" off, \"kern\"").as_deref(),
        Some("\"liga\" 0, \"kern\"")
    );
}

#[test]
fn test_text() {
    assert_eq!(
        parse(P::TextDecorationLine, "line-through underline").as_deref(),
        Some("underline line-through")
    );
    assert_eq!(
        parse(P::TextIndent, "each-line 2em hanging").as_deref(),
        Some("2em hanging each-line")
    );
    assert_eq!(parse(P::TextTransform, "uppercase lowercase"), None);
}

#[test]
fn test_transforms_and_transitions() {
    assert_eq!(
        parse(P::Transform, "translatex(10px) ROTATE(0)").as_deref(),
        Some("translateX(10px) rotate(0deg)")
    );
    assert_eq!(parse(P::TransitionTimingFunction, "steps(3, end)").as_deref(), Some("steps(3)"));
    assert_eq!(parse(P::TransitionDuration, "-1s"), None);
    assert_eq!(parse(P::TransitionDelay, "-1s").as_deref(), Some("-1s"));
    assert_eq!(parse(P::TransitionProperty, "none, opacity"), None);
}

#[test]
fn test_outline_style() {
    assert_eq!(parse(P::OutlineStyle, "auto").as_deref(), Some("auto"));
    assert_eq!(parse(P::OutlineStyle, "hidden"), None);
    assert_eq!(parse(P::BorderTopStyle, "hidden").as_deref(), Some("hidden"));
}

#[test]
fn test_trailing_tokens_rejected() {
    assert_eq!(parse(P::Color, "red blue"), None);
    assert_eq!(parse(P::Width, "10px,"), None);
    assert_eq!(
        parse_value_text(P::Width, "10px 20px", false, &ParserContext::default()),
        Err(ParseError::InvalidValue {
            property: P::Width,
            value: "10px 20px".into()
        })
    );
}

#[test]
fn test_anchor_functions_rejected() {
    assert_eq!(parse(P::Top, "anchor(--a top)"), None);
    assert_eq!(parse(P::Width, "anchor-size(width)"), None);
    assert_eq!(parse(P::Left, "calc(anchor(--a left) + 1px)"), None);
}

#[test]
fn test_content_alt_text() {
    assert_eq!(parse(P::Content, "\"a\" \"b\" / \"alt\"").as_deref(), Some("\"a\" \"b\" / \"alt\""));
    assert_eq!(parse(P::Content, "open-quote").as_deref(), Some("open-quote"));
    assert_eq!(parse(P::Content, "\"a\" / \"b\" \"c\""), None);
    assert_eq!(parse(P::Content, "/ \"alt\""), None);
    assert_eq!(parse(P::Content, "\"a\" /"), None);
}

#[test]
fn test_last_baseline_serializes() {
    assert_eq!(parse(P::AlignContent, "last baseline").as_deref(), Some("last baseline"));
    assert_eq!(parse(P::AlignContent, "baseline first").as_deref(), Some("baseline"));
    assert_eq!(parse(P::AlignContent, "last\\ baseline"), None);

    let entries =
        parse_value_text(P::PlaceContent, "last baseline", false, &ParserContext::default())
            .unwrap_or_default();
    let text: Vec<String> = entries.iter().map(|e| e.value.css_text()).collect();
    assert_eq!(text, ["last baseline", "start"]);
}
