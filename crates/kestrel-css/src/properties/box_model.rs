//! Sizing, box edges, positioning and other box-level longhands.
//!
//! [CSS Box Model Module Level 3](https://www.w3.org/TR/css-box-3/)

use super::consumers::{
    ValueRange, consume_ident_in, consume_integer, consume_length_or_percent,
    consume_number_or_percent,
};
use crate::parser::context::{LocalContext, ParserContext, UnitlessQuirk};
use crate::parser::stream::TokenStream;
use crate::values::{CSSValueID, ValueRef};

use CSSValueID as V;

/// [§ 3.2 Sizing Values](https://www.w3.org/TR/css-sizing-3/#sizing-values)
///
/// `auto | min-content | max-content | fit-content | <length-percentage [0,∞]>`
/// for `width`, `height`, `min-width` and `min-height`. `max-width` and
/// `max-height` take `none` in place of `auto`.
pub fn consume_size(
    stream: &mut TokenStream,
    ctx: &ParserContext,
    initial: CSSValueID,
) -> Option<ValueRef> {
    consume_ident_in(stream, &[initial, V::MinContent, V::MaxContent, V::FitContent])
        .or_else(|| {
            consume_length_or_percent(stream, ctx, ValueRange::NonNegative, UnitlessQuirk::Allow)
        })
}

/// [§ 5.1 Margins](https://www.w3.org/TR/css-box-3/#margins)
///
/// `<length-percentage> | auto`
pub fn consume_margin(stream: &mut TokenStream, ctx: &ParserContext) -> Option<ValueRef> {
    consume_ident_in(stream, &[V::Auto])
        .or_else(|| consume_length_or_percent(stream, ctx, ValueRange::All, UnitlessQuirk::Allow))
}

/// [§ 6.1 Paddings](https://www.w3.org/TR/css-box-3/#paddings)
///
/// `<length-percentage [0,∞]>`
pub fn consume_padding(stream: &mut TokenStream, ctx: &ParserContext) -> Option<ValueRef> {
    consume_length_or_percent(stream, ctx, ValueRange::NonNegative, UnitlessQuirk::Allow)
}

/// [§ 3.1 Box Insets](https://www.w3.org/TR/css-position-3/#insets)
///
/// `auto | <length-percentage>`. Unitless quirk lengths are only accepted
/// when the inset is set on its own.
pub fn consume_inset(
    stream: &mut TokenStream,
    ctx: &ParserContext,
    local: &LocalContext,
) -> Option<ValueRef> {
    let quirk = if local.current_shorthand.is_some() {
        UnitlessQuirk::Forbid
    } else {
        local.unitless_quirk
    };
    consume_ident_in(stream, &[V::Auto])
        .or_else(|| consume_length_or_percent(stream, ctx, ValueRange::All, quirk))
}

/// [§ 4.1 box-sizing](https://www.w3.org/TR/css-sizing-3/#box-sizing)
pub fn consume_box_sizing(stream: &mut TokenStream) -> Option<ValueRef> {
    consume_ident_in(stream, &[V::ContentBox, V::BorderBox])
}

/// [§ 2 Choosing A Positioning Scheme](https://www.w3.org/TR/css-position-3/#position-property)
pub fn consume_position_scheme(stream: &mut TokenStream) -> Option<ValueRef> {
    consume_ident_in(
        stream,
        &[V::Static, V::Relative, V::Absolute, V::Sticky, V::Fixed],
    )
}

/// [§ 9.5.1 Positioning the float](https://www.w3.org/TR/CSS2/visuren.html#float-position)
///
/// `left | right | inline-start | inline-end | none`
pub fn consume_float(stream: &mut TokenStream) -> Option<ValueRef> {
    consume_ident_in(
        stream,
        &[V::Left, V::Right, V::InlineStart, V::InlineEnd, V::None],
    )
}

/// [§ 9.5.2 Controlling flow next to floats](https://www.w3.org/TR/CSS2/visuren.html#flow-control)
pub fn consume_clear(stream: &mut TokenStream) -> Option<ValueRef> {
    consume_ident_in(
        stream,
        &[V::None, V::Left, V::Right, V::InlineStart, V::InlineEnd, V::Both],
    )
}

/// [§ 4.1 visibility](https://www.w3.org/TR/css-display-3/#visibility)
pub fn consume_visibility(stream: &mut TokenStream) -> Option<ValueRef> {
    consume_ident_in(stream, &[V::Visible, V::Hidden, V::Collapse])
}

/// [§ 9.9.1 Specifying the stack level](https://www.w3.org/TR/CSS2/visuren.html#z-index)
///
/// `auto | <integer>`
pub fn consume_z_index(stream: &mut TokenStream) -> Option<ValueRef> {
    consume_ident_in(stream, &[V::Auto]).or_else(|| consume_integer(stream, i64::MIN))
}

/// [§ 3.2 Transparency](https://www.w3.org/TR/css-color-4/#transparency)
///
/// `<opacity-value> = <number> | <percentage>`. Out-of-range values are
/// kept and clamped at computed-value time.
pub fn consume_opacity(stream: &mut TokenStream) -> Option<ValueRef> {
    consume_number_or_percent(stream, ValueRange::All)
}

/// [§ 3.1 Managing Overflow](https://www.w3.org/TR/css-overflow-3/#overflow-properties)
///
/// `visible | hidden | clip | scroll | auto`
pub fn consume_overflow(stream: &mut TokenStream) -> Option<ValueRef> {
    consume_ident_in(
        stream,
        &[V::Visible, V::Hidden, V::Clip, V::Scroll, V::Auto],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::context::CSSParserMode;
    use crate::properties::CSSPropertyID;

    fn parse_with<F>(text: &str, consume: F) -> Option<String>
    where
        F: FnOnce(&mut TokenStream) -> Option<ValueRef>,
    {
        let mut stream = TokenStream::new(text);
        let value = consume(&mut stream)?;
        stream.at_end().then(|| value.css_text())
    }

    #[test]
    fn test_sizes_in_quirks_mode() {
        let quirks = ParserContext::new(CSSParserMode::Quirks);
        let standard = ParserContext::default();
        assert_eq!(parse_with("10", |s| consume_size(s, &quirks, V::Auto)).as_deref(), Some("10px"));
        assert_eq!(parse_with("10", |s| consume_size(s, &standard, V::Auto)), None);
        assert_eq!(parse_with("-1px", |s| consume_size(s, &standard, V::Auto)), None);
        assert_eq!(parse_with("none", |s| consume_size(s, &standard, V::None)).as_deref(), Some("none"));
        assert_eq!(parse_with("-5", |s| consume_margin(s, &quirks)).as_deref(), Some("-5px"));
    }

    #[test]
    fn test_insets_forbid_unitless_within_shorthand() {
        let quirks = ParserContext::new(CSSParserMode::Quirks);
        let local = LocalContext::default();
        assert_eq!(parse_with("3", |s| consume_inset(s, &quirks, &local)).as_deref(), Some("3px"));
        let within = local.within(CSSPropertyID::Inset);
        assert_eq!(parse_with("3", |s| consume_inset(s, &quirks, &within)), None);
    }

    #[test]
    fn test_z_index_and_opacity() {
        assert_eq!(parse_with("-3", consume_z_index).as_deref(), Some("-3"));
        assert_eq!(parse_with("1.5", consume_z_index), None);
        assert_eq!(parse_with("150%", consume_opacity).as_deref(), Some("150%"));
        assert_eq!(parse_with("-2", consume_opacity).as_deref(), Some("-2"));
    }
}
