//! Integration tests for declaration blocks.

use kestrel_css::parser::{CSSParserMode, ParserContext};
use kestrel_css::properties::CSSPropertyID;
use kestrel_css::style::{MutablePropertyValueSet, SetResult};
use kestrel_css::values::CSSValue;
use kestrel_common::warning::{clear_warnings, has_warned};

use CSSPropertyID as P;

fn declarations(text: &str) -> MutablePropertyValueSet {
    let mut set = MutablePropertyValueSet::default();
    let _ = set.parse_declaration_list(text);
    set
}

#[test]
fn test_later_declaration_wins() {
    let set = declarations("color: red !important; color: blue");
    assert_eq!(set.len(), 1);
    assert_eq!(set.get_property_value(P::Color), "blue");
    assert!(!set.is_important(P::Color));
}

#[test]
fn test_invalid_declarations_are_skipped() {
    clear_warnings();
    let set = declarations("color red; bogus: 1px; width: -1px; -webkit-nope: 1; height: 2px");
    assert_eq!(set.as_text(), "height: 2px;");
    assert!(has_warned("CSS", "unsupported property alias '-webkit-nope'"));
}

#[test]
fn test_important_annotation() {
    let set = declarations("margin: 1px !important; top: 0 ! important; left: 0 !importan");
    assert!(set.is_important(P::Margin));
    assert!(set.is_important(P::MarginLeft));
    assert!(set.is_important(P::Top));
    assert!(set.get_property_css_value(P::Left).is_none());
}

#[test]
fn test_serialization() {
    let set = declarations("border-color: red blue; opacity: 0.5 !important");
    assert_eq!(
        set.as_text(),
        "border-top-color: red; border-right-color: blue; border-bottom-color: red; \
         border-left-color: blue; opacity: 0.5 !important;"
    );
}

#[test]
fn test_pending_shorthand_written_once() {
    let set = declarations("border: var(--b) !important; color: red");
    assert_eq!(set.len(), P::Border.longhands().len() + 1);
    assert_eq!(set.as_text(), "border: var(--b) !important; color: red;");
    assert_eq!(set.get_property_value(P::Border), "var(--b)");
    assert!(set.is_important(P::Border));
}

#[test]
fn test_longhand_var_is_unparsed() {
    let set = declarations("width: calc(var(--w) * 2)");
    let value = set.get_property_css_value(P::Width);
    assert_eq!(value.as_deref(), Some(&CSSValue::Unparsed("calc(var(--w) * 2)".into())));
}

#[test]
fn test_parse_and_set() {
    let mut set = MutablePropertyValueSet::default();
    assert_eq!(set.parse_and_set(P::Gap, "1px", false), SetResult::Changed);
    assert_eq!(set.parse_and_set(P::RowGap, "1px", false), SetResult::Changed);
    assert_eq!(set.parse_and_set(P::RowGap, "1px", false), SetResult::Unchanged);
    assert_eq!(set.parse_and_set(P::Gap, "", false), SetResult::ParseError);
    assert_eq!(set.parse_and_set(P::Gap, "1px 2px 3px", false), SetResult::ParseError);
    assert_eq!(set.as_text(), "column-gap: 1px; row-gap: 1px;");
}

#[test]
fn test_remove_property() {
    let mut set = declarations("overflow: hidden; color: red");
    assert!(set.remove_property(P::OverflowY));
    assert_eq!(set.get_property_value(P::OverflowX), "hidden");
    assert!(set.remove_property(P::Overflow));
    assert!(!set.remove_property(P::Overflow));
    assert_eq!(set.as_text(), "color: red;");
}

#[test]
fn test_parser_mode() {
    let mut set = MutablePropertyValueSet::new(CSSParserMode::Quirks);
    assert!(set.parse_declaration_list("width: 10; color: ff0000"));
    assert_eq!(set.as_text(), "width: 10px; color: rgb(255, 0, 0);");

    let mut set = MutablePropertyValueSet::with_context(ParserContext::default());
    assert!(!set.parse_declaration_list("width: 10"));
    assert!(set.is_empty());
}

#[test]
fn test_json_output() {
    let set = declarations("flex-grow: 2");
    let json = serde_json::to_value(&set).unwrap_or_default();
    let entry = &json["entries"][0];
    assert_eq!(entry["id"], "flex-grow");
    assert_eq!(entry["shorthand"], serde_json::Value::Null);
    assert_eq!(entry["important"], false);
}
