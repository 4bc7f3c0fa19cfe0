//! Box alignment, flexbox and gap longhands.
//!
//! [CSS Box Alignment Module Level 3](https://www.w3.org/TR/css-align-3/)

use super::consumers::{
    ValueRange, consume_ident_id, consume_ident_in, consume_integer, consume_length_or_percent,
    consume_number,
};
use crate::parser::context::{ParserContext, UnitlessQuirk};
use crate::parser::stream::TokenStream;
use crate::values::{
    CSSValue, CSSValueID, ContentDistribution, IdenticalValuesPolicy, ValuePair, ValueRef,
};

use CSSValueID as V;

const SELF_POSITIONS: &[CSSValueID] = &[
    V::Start,
    V::End,
    V::Center,
    V::SelfStart,
    V::SelfEnd,
    V::FlexStart,
    V::FlexEnd,
    V::AnchorCenter,
];

const SELF_POSITIONS_WITH_LEFT_RIGHT: &[CSSValueID] = &[
    V::Start,
    V::End,
    V::Center,
    V::SelfStart,
    V::SelfEnd,
    V::FlexStart,
    V::FlexEnd,
    V::AnchorCenter,
    V::Left,
    V::Right,
];

const CONTENT_POSITIONS: &[CSSValueID] = &[V::Start, V::End, V::Center, V::FlexStart, V::FlexEnd];

const CONTENT_POSITIONS_WITH_LEFT_RIGHT: &[CSSValueID] = &[
    V::Start,
    V::End,
    V::Center,
    V::FlexStart,
    V::FlexEnd,
    V::Left,
    V::Right,
];

fn pair(first: ValueRef, second: ValueRef) -> ValueRef {
    CSSValue::Pair(ValuePair::new(first, second, IdenticalValuesPolicy::Drop)).into_ref()
}

/// [§ 4.2 Baseline Alignment](https://www.w3.org/TR/css-align-3/#baseline-values)
///
/// `<baseline-position> = [ first | last ]? && baseline`, resolved to
/// `baseline` or `last baseline`.
fn consume_baseline_keyword(stream: &mut TokenStream) -> Option<CSSValueID> {
    let start = stream.save();
    let mut preference = consume_ident_id(stream, &[V::First, V::Last]);
    if consume_ident_id(stream, &[V::Baseline]).is_none() {
        stream.restore(start);
        return None;
    }
    if preference.is_none() {
        preference = consume_ident_id(stream, &[V::First, V::Last]);
    }
    if preference == Some(V::Last) {
        return Some(V::LastBaseline);
    }
    Some(V::Baseline)
}

/// `<baseline-position>` as a value: `baseline`, or the pair
/// `last baseline`.
fn consume_baseline(stream: &mut TokenStream) -> Option<ValueRef> {
    match consume_baseline_keyword(stream)? {
        V::LastBaseline => Some(pair(CSSValue::ident(V::Last), CSSValue::ident(V::Baseline))),
        id => Some(CSSValue::ident(id)),
    }
}

/// [§ 6.1 Self-Alignment](https://www.w3.org/TR/css-align-3/#self-alignment)
///
/// `auto | normal | stretch | <baseline-position> |
///  <overflow-position>? <self-position>`
pub fn consume_self_position_overflow_position(
    stream: &mut TokenStream,
    positions: &[CSSValueID],
) -> Option<ValueRef> {
    if let Some(keyword) = consume_ident_in(stream, &[V::Auto, V::Normal, V::Stretch]) {
        return Some(keyword);
    }
    if let Some(baseline) = consume_baseline(stream) {
        return Some(baseline);
    }
    let start = stream.save();
    let overflow = consume_ident_in(stream, &[V::Safe, V::Unsafe]);
    let Some(position) = consume_ident_in(stream, positions) else {
        stream.restore(start);
        return None;
    };
    match overflow {
        Some(overflow) => Some(pair(overflow, position)),
        None => Some(position),
    }
}

/// `align-self`
pub fn consume_align_self(stream: &mut TokenStream) -> Option<ValueRef> {
    consume_self_position_overflow_position(stream, SELF_POSITIONS)
}

/// `justify-self`
pub fn consume_justify_self(stream: &mut TokenStream) -> Option<ValueRef> {
    consume_self_position_overflow_position(stream, SELF_POSITIONS_WITH_LEFT_RIGHT)
}

/// [§ 6.3 Default Alignment](https://www.w3.org/TR/css-align-3/#align-items-property)
///
/// `align-items`: as `align-self` without `auto`.
pub fn consume_align_items(stream: &mut TokenStream) -> Option<ValueRef> {
    if stream.peek_id() == Some(V::Auto) {
        return None;
    }
    consume_align_self(stream)
}

/// [§ 6.3 Default Alignment](https://www.w3.org/TR/css-align-3/#justify-items-property)
///
/// `justify-items`: `legacy [ left | right | center ]?` in either order, or
/// `justify-self` without `auto`.
pub fn consume_justify_items(stream: &mut TokenStream) -> Option<ValueRef> {
    let start = stream.save();
    let legacy = consume_ident_in(stream, &[V::Legacy]);
    let position = consume_ident_in(stream, &[V::Left, V::Right, V::Center]);
    let legacy = legacy.or_else(|| {
        position
            .is_some()
            .then(|| consume_ident_in(stream, &[V::Legacy]))
            .flatten()
    });
    match (legacy, position) {
        (Some(legacy), Some(position)) => return Some(pair(legacy, position)),
        (Some(legacy), None) => return Some(legacy),
        _ => stream.restore(start),
    }
    if stream.peek_id() == Some(V::Auto) {
        return None;
    }
    consume_justify_self(stream)
}

/// [§ 5.1 The align-content and justify-content Properties](https://www.w3.org/TR/css-align-3/#align-justify-content)
///
/// `normal | <baseline-position> | <content-distribution> |
///  <overflow-position>? <content-position>`
pub fn consume_content_distribution_overflow_position(
    stream: &mut TokenStream,
    positions: &[CSSValueID],
) -> Option<ValueRef> {
    let value = |distribution, position, overflow| {
        Some(
            CSSValue::ContentDistribution(ContentDistribution::new(distribution, position, overflow))
                .into_ref(),
        )
    };
    if consume_ident_id(stream, &[V::Normal]).is_some() {
        return value(None, Some(V::Normal), None);
    }
    if let Some(baseline) = consume_baseline_keyword(stream) {
        return value(None, Some(baseline), None);
    }
    if let Some(distribution) = consume_ident_id(
        stream,
        &[V::SpaceBetween, V::SpaceAround, V::SpaceEvenly, V::Stretch],
    ) {
        return value(Some(distribution), None, None);
    }
    let start = stream.save();
    let overflow = consume_ident_id(stream, &[V::Safe, V::Unsafe]);
    let Some(position) = consume_ident_id(stream, positions) else {
        stream.restore(start);
        return None;
    };
    value(None, Some(position), overflow)
}

/// `align-content`
pub fn consume_align_content(stream: &mut TokenStream) -> Option<ValueRef> {
    consume_content_distribution_overflow_position(stream, CONTENT_POSITIONS)
}

/// `justify-content`. Baseline alignment does not apply to the inline axis.
pub fn consume_justify_content(stream: &mut TokenStream) -> Option<ValueRef> {
    if matches!(stream.peek_id(), Some(V::First | V::Last | V::Baseline)) {
        return None;
    }
    consume_content_distribution_overflow_position(stream, CONTENT_POSITIONS_WITH_LEFT_RIGHT)
}

// ----------------------------------------------------------------------------
// Flexbox
// ----------------------------------------------------------------------------

/// [§ 5.1 Flex Flow Direction](https://www.w3.org/TR/css-flexbox-1/#flex-direction-property)
pub fn consume_flex_direction(stream: &mut TokenStream) -> Option<ValueRef> {
    consume_ident_in(
        stream,
        &[V::Row, V::RowReverse, V::Column, V::ColumnReverse],
    )
}

/// [§ 5.2 Flex Line Wrapping](https://www.w3.org/TR/css-flexbox-1/#flex-wrap-property)
pub fn consume_flex_wrap(stream: &mut TokenStream) -> Option<ValueRef> {
    consume_ident_in(stream, &[V::Nowrap, V::Wrap, V::WrapReverse])
}

/// [§ 7.3.1 The flex-grow property](https://www.w3.org/TR/css-flexbox-1/#flex-grow-property)
///
/// `<number [0,∞]>` for `flex-grow` and `flex-shrink`.
pub fn consume_flex_factor(stream: &mut TokenStream) -> Option<ValueRef> {
    consume_number(stream, ValueRange::NonNegative)
}

/// [§ 7.3.3 The flex-basis property](https://www.w3.org/TR/css-flexbox-1/#flex-basis-property)
///
/// `content | <'width'>`
pub fn consume_flex_basis(stream: &mut TokenStream, ctx: &ParserContext) -> Option<ValueRef> {
    consume_ident_in(
        stream,
        &[V::Auto, V::Content, V::MinContent, V::MaxContent, V::FitContent],
    )
    .or_else(|| consume_length_or_percent(stream, ctx, ValueRange::NonNegative, UnitlessQuirk::Forbid))
}

/// [§ 5.4 Display Order](https://www.w3.org/TR/css-flexbox-1/#order-property)
pub fn consume_order(stream: &mut TokenStream) -> Option<ValueRef> {
    consume_integer(stream, i64::MIN)
}

/// [§ 8.1 Row and Column Gutters](https://www.w3.org/TR/css-align-3/#column-row-gap)
///
/// `normal | <length-percentage [0,∞]>`
pub fn consume_gap(stream: &mut TokenStream, ctx: &ParserContext) -> Option<ValueRef> {
    consume_ident_in(stream, &[V::Normal]).or_else(|| {
        consume_length_or_percent(stream, ctx, ValueRange::NonNegative, UnitlessQuirk::Forbid)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str, consume: fn(&mut TokenStream) -> Option<ValueRef>) -> Option<String> {
        let mut stream = TokenStream::new(text);
        let value = consume(&mut stream)?;
        stream.at_end().then(|| value.css_text())
    }

    #[test]
    fn test_self_alignment() {
        assert_eq!(parse("unsafe end", consume_align_self).as_deref(), Some("unsafe end"));
        assert_eq!(parse("first baseline", consume_align_self).as_deref(), Some("baseline"));
        assert_eq!(parse("baseline last", consume_align_self).as_deref(), Some("last baseline"));
        assert_eq!(parse("left", consume_align_self), None);
        assert_eq!(parse("left", consume_justify_self).as_deref(), Some("left"));
        assert_eq!(parse("auto", consume_align_items), None);
    }

    #[test]
    fn test_justify_items_legacy() {
        assert_eq!(parse("legacy", consume_justify_items).as_deref(), Some("legacy"));
        assert_eq!(parse("right legacy", consume_justify_items).as_deref(), Some("legacy right"));
        assert_eq!(parse("legacy center", consume_justify_items).as_deref(), Some("legacy center"));
        assert_eq!(parse("center", consume_justify_items).as_deref(), Some("center"));
    }

    #[test]
    fn test_content_distribution() {
        assert_eq!(parse("safe center", consume_align_content).as_deref(), Some("safe center"));
        assert_eq!(parse("space-evenly", consume_justify_content).as_deref(), Some("space-evenly"));
        assert_eq!(parse("last baseline", consume_align_content).as_deref(), Some("last baseline"));
        assert_eq!(parse("baseline", consume_justify_content), None);
        assert_eq!(parse("left", consume_align_content), None);
    }
}
