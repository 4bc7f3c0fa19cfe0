//! Integration tests for value parsing and serialization.

use kestrel_common::warning::has_warned;
use kestrel_css::ValueError;
use kestrel_css::parser::{CSSParserMode, ParserContext, parse_single_value};
use kestrel_css::properties::CSSPropertyID;
use kestrel_css::values::{CSSValue, Color, NumericLiteral, Separator, UnitType, ValueList};
use quickcheck_macros::quickcheck;

use CSSPropertyID as P;

/// Helper to parse a longhand value and serialize it
fn text(id: CSSPropertyID, value: &str) -> Option<String> {
    parse_single_value(id, value, &ParserContext::default()).map(|v| v.css_text())
}

fn text_in(mode: CSSParserMode, id: CSSPropertyID, value: &str) -> Option<String> {
    parse_single_value(id, value, &ParserContext::new(mode)).map(|v| v.css_text())
}

#[test]
fn test_numeric_serialization() {
    assert_eq!(text(P::Width, "10.50px").as_deref(), Some("10.5px"));
    assert_eq!(text(P::Width, "0").as_deref(), Some("0px"));
    assert_eq!(text(P::Width, "33%").as_deref(), Some("33%"));
    assert_eq!(NumericLiteral::new(1.0 / 3.0, UnitType::Em).to_string(), "0.333333em");
}

#[test]
fn test_calc_simplification() {
    assert_eq!(
        text(P::Width, "calc(1em + 50% + 10px)").as_deref(),
        Some("calc(50% + 1em + 10px)")
    );
    assert_eq!(text(P::Width, "calc(10px - 1em)").as_deref(), Some("calc(-1em + 10px)"));
    assert_eq!(text(P::Width, "calc(1px +2px)"), None);
    assert_eq!(text(P::Width, "calc(2 + 3px)"), None);
}

#[test]
fn test_negative_sizes_rejected() {
    assert_eq!(text(P::Width, "-1px"), None);
    assert_eq!(text(P::MarginTop, "-1px").as_deref(), Some("-1px"));
}

#[test]
fn test_colors() {
    assert_eq!(text(P::Color, "red").as_deref(), Some("red"));
    assert_eq!(text(P::Color, "#f00").as_deref(), Some("rgb(255, 0, 0)"));
    assert_eq!(text(P::Color, "rgb(1 2 3 / 50%)").as_deref(), Some("rgba(1, 2, 3, 0.5)"));
    assert_eq!(text(P::Color, "hsl(120, 100%, 50%)").as_deref(), Some("rgb(0, 255, 0)"));
    assert_eq!(text(P::Color, "#12345"), None);
    assert_eq!(text(P::Color, "rgb(50% 0% 100%)").as_deref(), Some("rgb(128, 0, 255)"));
    assert_eq!(text(P::Color, "rgba(0, 0, 0, 20%)").as_deref(), Some("rgba(0, 0, 0, 0.2)"));
}

/// Serialize a parsed value, parse the text again, and compare.
fn assert_round_trips(id: CSSPropertyID, value: &str) {
    let ctx = ParserContext::default();
    let Some(parsed) = parse_single_value(id, value, &ctx) else {
        panic!("{id}: '{value}' did not parse");
    };
    let serialized = parsed.css_text();
    assert_eq!(
        parse_single_value(id, &serialized, &ctx),
        Some(parsed),
        "{id}: '{value}' serialized as '{serialized}'"
    );
}

#[test]
fn test_serialization_round_trips() {
    for color in [
        "red",
        "#1a2b3c",
        "#1A2B",
        "rgb(1 2 3 / 50%)",
        "hsl(120 100% 50% / 0.25)",
        "light-dark(red, #00f)",
        "currentcolor",
    ] {
        assert_round_trips(P::Color, color);
    }
    assert_round_trips(P::BackgroundSize, "auto 10px, contain");
    assert_round_trips(P::FontFamily, "Times New Roman, serif");
    assert_round_trips(P::TransitionProperty, "opacity, width");
    assert_round_trips(P::GridTemplateColumns, "[a] repeat(2, 10px 1fr) [b]");
    assert_round_trips(P::GridTemplateRows, "repeat(auto-fill, [x] 10px)");
    assert_round_trips(P::GridTemplateAreas, "'a b' 'c d'");
    assert_round_trips(P::GridRowStart, "span 2 foo");
    assert_round_trips(P::BackgroundImage, "image-set(url(a) 2x, 'b' type('image/png'))");
    assert_round_trips(P::Width, "calc(1em + 50% + 10px)");
    assert_round_trips(P::Width, "calc(100% / 3 - 2em)");
}

#[test]
fn test_folded_calc_round_trips() {
    let value = "image-set(url(foo) calc(1dpcm * 37.79532))";
    assert_eq!(
        text(P::BackgroundImage, value).as_deref(),
        Some("image-set(url(\"foo\") calc(1dppx))")
    );
    assert_round_trips(P::BackgroundImage, value);
}

#[test]
fn test_light_dark_color() {
    assert_eq!(
        text(P::Color, "light-dark(red, #00f)").as_deref(),
        Some("light-dark(red, rgb(0, 0, 255))")
    );
    assert_eq!(text(P::Color, "light-dark(red)"), None);
    assert_eq!(text(P::Color, "light-dark(red, blue, green)"), None);
}

#[test]
fn test_hashless_color_quirk() {
    assert_eq!(text(P::Color, "ff0000"), None);
    assert_eq!(
        text_in(CSSParserMode::Quirks, P::Color, "ff0000").as_deref(),
        Some("rgb(255, 0, 0)")
    );
}

#[test]
fn test_image_set() {
    assert_eq!(
        text(P::BackgroundImage, "image-set(url(foo))").as_deref(),
        Some("image-set(url(\"foo\") 1x)")
    );
    assert_eq!(
        text(P::BackgroundImage, "-webkit-image-set(url(a) 1x, url(b) 2x)").as_deref(),
        Some("image-set(url(\"a\") 1x, url(\"b\") 2x)")
    );
    assert_eq!(text(P::BackgroundImage, "image-set()"), None);
}

#[test]
fn test_light_dark_images_only_in_ua_sheet() {
    let value = "light-dark(url(light.png), url(dark.png))";
    assert_eq!(text(P::BackgroundImage, value), None);
    assert_eq!(
        text_in(CSSParserMode::UASheet, P::BackgroundImage, value).as_deref(),
        Some("light-dark(url(\"light.png\"), url(\"dark.png\"))")
    );
}

#[test]
fn test_value_lists() {
    let mut list = ValueList::comma();
    list.append(CSSValue::numeric(NumericLiteral::px(1.0)));
    list.append(CSSValue::numeric(NumericLiteral::percentage(50.0)));
    assert_eq!(list.len(), 2);
    assert_eq!(list.into_value().css_text(), "1px, 50%");
    assert_eq!(ValueList::new(Separator::Slash).len(), 0);
}

#[test]
fn test_list_editing() {
    let one = CSSValue::numeric(NumericLiteral::px(1.0));
    let two = CSSValue::numeric(NumericLiteral::px(2.0));
    let list = ValueList::from_values(Separator::Comma, [one.clone(), two.clone(), one.clone()]);
    assert!(list.has_value(&CSSValue::numeric(NumericLiteral::px(1.0))));

    let (rest, removed) = list.copy().remove_all(&one);
    assert!(removed);
    assert_eq!(rest.separator(), Separator::Comma);
    assert_eq!(rest.into_value().css_text(), "2px");
    assert_eq!(list.into_value().css_text(), "1px, 2px, 1px");
    assert!(!ValueList::space().has_value(&two));
}

#[test]
fn test_unknown_separator() {
    assert_eq!(Separator::try_from(","), Ok(Separator::Comma));
    assert_eq!(Separator::try_from(" / "), Ok(Separator::Slash));
    assert_eq!(
        Separator::try_from('|'),
        Err(ValueError::UnknownSeparator("|".to_string()))
    );
    assert!(has_warned("CSS", "unknown list separator '|'"));
}

#[quickcheck]
fn prop_three_digit_hex_duplicates_nibbles(r: u8, g: u8, b: u8) -> bool {
    let (r, g, b) = (r % 16, g % 16, b % 16);
    let hex = format!("{r:x}{g:x}{b:X}");
    Color::from_hex(&hex) == Some(Color::rgb(r * 17, g * 17, b * 17))
}

#[quickcheck]
fn prop_four_digit_hex_duplicates_nibbles(r: u8, g: u8, b: u8, a: u8) -> bool {
    let (r, g, b, a) = (r % 16, g % 16, b % 16, a % 16);
    let hex = format!("{r:x}{g:X}{b:x}{a:X}");
    Color::from_hex(&hex) == Some(Color::rgba(r * 17, g * 17, b * 17, a * 17))
}

#[quickcheck]
fn prop_six_digit_hex_round_trips(r: u8, g: u8, b: u8) -> bool {
    let hex = format!("{r:02x}{g:02X}{b:02x}");
    Color::from_hex(&hex) == Some(Color::rgb(r, g, b))
}
