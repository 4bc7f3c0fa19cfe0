//! Text and text decoration longhands.
//!
//! [CSS Text Module Level 3](https://www.w3.org/TR/css-text-3/)

use super::consumers::{
    ValueRange, consume_ident_id, consume_ident_in, consume_length, consume_length_or_percent,
};
use crate::parser::context::{ParserContext, UnitlessQuirk};
use crate::parser::stream::TokenStream;
use crate::values::{CSSValue, CSSValueID, Separator, ValueList, ValueRef};

use CSSValueID as V;

/// [§ 7.1 Text Alignment](https://www.w3.org/TR/css-text-3/#text-align-property)
///
/// `start | end | left | right | center | justify | match-parent`
pub fn consume_text_align(stream: &mut TokenStream) -> Option<ValueRef> {
    consume_ident_in(
        stream,
        &[V::Start, V::End, V::Left, V::Right, V::Center, V::Justify, V::MatchParent],
    )
}

/// [§ 2.1 Case Transforms](https://www.w3.org/TR/css-text-3/#text-transform-property)
///
/// `none | [capitalize | uppercase | lowercase] || full-width || full-size-kana`
pub fn consume_text_transform(stream: &mut TokenStream) -> Option<ValueRef> {
    if let Some(none) = consume_ident_in(stream, &[V::None]) {
        return Some(none);
    }
    let mut case = None;
    let mut full_width = None;
    let mut full_size_kana = None;
    loop {
        let slot = match stream.peek_id() {
            Some(V::Capitalize | V::Uppercase | V::Lowercase) => &mut case,
            Some(V::FullWidth) => &mut full_width,
            Some(V::FullSizeKana) => &mut full_size_kana,
            _ => break,
        };
        if slot.is_some() {
            return None;
        }
        *slot = stream.peek_id();
        let _ = stream.consume_including_whitespace();
    }
    keyword_sequence([case, full_width, full_size_kana])
}

/// Keywords in canonical order; a single keyword is returned bare.
fn keyword_sequence<const N: usize>(ids: [Option<CSSValueID>; N]) -> Option<ValueRef> {
    let values: Vec<ValueRef> = ids.into_iter().flatten().map(CSSValue::ident).collect();
    match values.as_slice() {
        [] => None,
        [single] => Some(single.clone()),
        _ => Some(ValueList::from_values(Separator::Space, values).into_value()),
    }
}

/// [§ 8.1 First Line Indentation](https://www.w3.org/TR/css-text-3/#text-indent-property)
///
/// `<length-percentage> && hanging? && each-line?`
pub fn consume_text_indent(stream: &mut TokenStream, ctx: &ParserContext) -> Option<ValueRef> {
    let mut length = None;
    let mut hanging = None;
    let mut each_line = None;
    loop {
        if length.is_none()
            && let Some(value) =
                consume_length_or_percent(stream, ctx, ValueRange::All, UnitlessQuirk::Allow)
        {
            length = Some(value);
            continue;
        }
        match stream.peek_id() {
            Some(V::Hanging) if hanging.is_none() => hanging = Some(V::Hanging),
            Some(V::EachLine) if each_line.is_none() => each_line = Some(V::EachLine),
            _ => break,
        }
        let _ = stream.consume_including_whitespace();
    }
    let length = length?;
    let mut list = ValueList::space();
    list.append(length);
    for id in [hanging, each_line].into_iter().flatten() {
        list.append(CSSValue::ident(id));
    }
    if list.len() == 1 {
        return list.first().cloned();
    }
    Some(list.into_value())
}

/// [§ 9.2 Tracking](https://www.w3.org/TR/css-text-3/#letter-spacing-property)
///
/// `normal | <length>` for `letter-spacing` and `word-spacing`.
pub fn consume_spacing(stream: &mut TokenStream, ctx: &ParserContext) -> Option<ValueRef> {
    consume_ident_in(stream, &[V::Normal])
        .or_else(|| consume_length(stream, ctx, ValueRange::All, UnitlessQuirk::Allow))
}

/// [§ 4.1 White Space Collapsing](https://www.w3.org/TR/css-text-4/#white-space-collapsing)
///
/// `collapse | preserve | preserve-breaks | preserve-spaces | break-spaces`
pub fn consume_white_space_collapse(stream: &mut TokenStream) -> Option<ValueRef> {
    consume_ident_in(
        stream,
        &[
            V::Collapse,
            V::Preserve,
            V::PreserveBreaks,
            V::PreserveSpaces,
            V::BreakSpaces,
        ],
    )
}

/// [§ 6.1 Text Wrapping](https://www.w3.org/TR/css-text-4/#text-wrap)
///
/// `wrap | nowrap | balance | stable | pretty`
pub fn consume_text_wrap(stream: &mut TokenStream) -> Option<ValueRef> {
    consume_ident_in(
        stream,
        &[V::Wrap, V::Nowrap, V::Balance, V::Stable, V::Pretty],
    )
}

// ----------------------------------------------------------------------------
// Decoration
// ----------------------------------------------------------------------------

/// [§ 2.1 Text Decoration Lines](https://www.w3.org/TR/css-text-decor-3/#text-decoration-line-property)
///
/// `none | [ underline || overline || line-through || blink ]`
pub fn consume_text_decoration_line(stream: &mut TokenStream) -> Option<ValueRef> {
    if let Some(none) = consume_ident_in(stream, &[V::None]) {
        return Some(none);
    }
    let mut lines: [Option<CSSValueID>; 4] = [None; 4];
    while let Some(id) =
        consume_ident_id(stream, &[V::Underline, V::Overline, V::LineThrough, V::Blink])
    {
        let index = match id {
            V::Underline => 0,
            V::Overline => 1,
            V::LineThrough => 2,
            _ => 3,
        };
        if lines[index].replace(id).is_some() {
            return None;
        }
    }
    keyword_sequence(lines)
}

/// [§ 2.2 Text Decoration Style](https://www.w3.org/TR/css-text-decor-3/#text-decoration-style-property)
///
/// `solid | double | dotted | dashed | wavy`
pub fn consume_text_decoration_style(stream: &mut TokenStream) -> Option<ValueRef> {
    consume_ident_in(stream, &[V::Solid, V::Double, V::Dotted, V::Dashed, V::Wavy])
}

/// [§ 2.4 Text Decoration Line Thickness](https://www.w3.org/TR/css-text-decor-4/#text-decoration-width-property)
///
/// `auto | from-font | <length-percentage>`
pub fn consume_text_decoration_thickness(
    stream: &mut TokenStream,
    ctx: &ParserContext,
) -> Option<ValueRef> {
    consume_ident_in(stream, &[V::Auto, V::FromFont]).or_else(|| {
        consume_length_or_percent(stream, ctx, ValueRange::All, UnitlessQuirk::Forbid)
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
    fn test_decoration_line_order() {
        assert_eq!(
            parse("line-through underline", consume_text_decoration_line).as_deref(),
            Some("underline line-through")
        );
        assert_eq!(parse("underline underline", consume_text_decoration_line), None);
        assert_eq!(parse("none", consume_text_decoration_line).as_deref(), Some("none"));
    }

    #[test]
    fn test_text_transform() {
        assert_eq!(
            parse("full-width uppercase", consume_text_transform).as_deref(),
            Some("uppercase full-width")
        );
        assert_eq!(parse("uppercase lowercase", consume_text_transform), None);
    }

    #[test]
    fn test_text_indent() {
        let indent = |s: &mut TokenStream| consume_text_indent(s, &ParserContext::default());
        assert_eq!(parse("each-line 2em hanging", indent).as_deref(), Some("2em hanging each-line"));
        assert_eq!(parse("hanging", indent), None);
        assert_eq!(parse("5%", indent).as_deref(), Some("5%"));
    }
}
