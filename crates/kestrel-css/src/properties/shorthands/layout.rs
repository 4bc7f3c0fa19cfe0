//! Flexbox, box alignment and grid shorthands.

use super::Expansion;
use crate::parser::context::{LocalContext, ParserContext};
use crate::parser::stream::{SavePoint, TokenStream};
use crate::properties::CSSPropertyID;
use crate::properties::alignment::{
    consume_align_content, consume_flex_basis, consume_justify_content,
};
use crate::properties::color::numeric_of;
use crate::properties::consumers::{
    ValueRange, at_end_or_important, consume_ident_in, consume_number,
    consume_slash_including_whitespace,
};
use crate::properties::grid::{
    TrackListType, consume_grid_line, consume_grid_template, consume_implicit_auto_flow,
    consume_template_rows_or_columns, consume_track_list, is_custom_ident_line,
};
use crate::properties::longhands::parse_longhand;
use crate::values::{CSSValue, CSSValueID, ContentDistribution, NumericLiteral, ValueRef};

use CSSPropertyID as P;
use CSSValueID as V;

/// [§ 7.1 The flex Shorthand](https://www.w3.org/TR/css-flexbox-1/#flex-property)
///
/// `none | [ <'flex-grow'> <'flex-shrink'>? || <'flex-basis'> ]`
///
/// "When omitted from the flex shorthand, its specified value is 1" for
/// both factors, and the basis "is 0%" when omitted.
#[allow(clippy::float_cmp)]
pub(super) fn expand_flex(
    out: &mut Expansion,
    stream: &mut TokenStream,
    ctx: &ParserContext,
) -> Option<()> {
    let number = |value: f64| CSSValue::numeric(NumericLiteral::number(value));

    if consume_ident_in(stream, &[V::None]).is_some() {
        out.set(P::FlexGrow, number(0.0));
        out.set(P::FlexShrink, number(0.0));
        out.set(P::FlexBasis, CSSValue::ident(V::Auto));
        return Some(());
    }

    let mut grow = None;
    let mut shrink = None;
    let mut basis = None;
    for _ in 0..3 {
        if at_end_or_important(stream) {
            break;
        }
        let state = stream.save();
        if let Some(factor) = consume_number(stream, ValueRange::All) {
            let raw = numeric_of(&factor).map(|n| n.value);
            if raw.is_some_and(|v| v < 0.0) {
                stream.restore(state);
                break;
            }
            if grow.is_none() {
                grow = Some(factor);
            } else if shrink.is_none() {
                shrink = Some(factor);
            } else if raw == Some(0.0) && basis.is_none() {
                // A unitless zero after both factors is the basis.
                basis = Some(CSSValue::numeric(NumericLiteral::px(0.0)));
            } else {
                stream.restore(state);
                break;
            }
        } else if basis.is_none() {
            let Some(value) = consume_flex_basis(stream, ctx) else {
                break;
            };
            basis = Some(value);
            // The basis may not sit between the two factors.
            if grow.is_some() && shrink.is_none() {
                shrink = Some(number(1.0));
            }
        } else {
            break;
        }
    }
    if grow.is_none() && shrink.is_none() && basis.is_none() {
        return None;
    }

    out.set(P::FlexGrow, grow.unwrap_or_else(|| number(1.0)));
    out.set(P::FlexShrink, shrink.unwrap_or_else(|| number(1.0)));
    out.set(
        P::FlexBasis,
        basis.unwrap_or_else(|| CSSValue::numeric(NumericLiteral::percentage(0.0))),
    );
    Some(())
}

/// [§ 5.3 place-content](https://www.w3.org/TR/css-align-3/#place-content),
/// [§ 6.3 place-self](https://www.w3.org/TR/css-align-3/#place-self-property)
/// and [§ 7.3 place-items](https://www.w3.org/TR/css-align-3/#place-items-property).
///
/// `<'align-*'> <'justify-*'>?`. A single value applies to both axes;
/// a lone baseline `place-content` justifies to `start`.
pub(super) fn expand_place(
    id: CSSPropertyID,
    out: &mut Expansion,
    stream: &mut TokenStream,
    ctx: &ParserContext,
    local: &LocalContext,
) -> Option<()> {
    let &[align_id, justify_id] = id.longhands() else {
        return None;
    };
    let start = stream.save();
    let is_baseline = matches!(stream.peek_id(), Some(V::First | V::Last | V::Baseline));

    let align = if id == P::PlaceContent {
        consume_align_content(stream)
    } else {
        parse_longhand(align_id, stream, ctx, local)
    }?;

    let justify = if id == P::PlaceContent {
        match consume_justify_content(stream) {
            Some(justify) => justify,
            None if is_baseline => {
                CSSValue::ContentDistribution(ContentDistribution::new(None, Some(V::Start), None))
                    .into_ref()
            }
            None => {
                stream.restore(start);
                consume_justify_content(stream)?
            }
        }
    } else if let Some(justify) = parse_longhand(justify_id, stream, ctx, local) {
        justify
    } else {
        // The single value must read the same way on the inline axis.
        let end = stream.save();
        stream.restore(start);
        let justify = parse_longhand(justify_id, stream, ctx, local)?;
        if stream.save() != end {
            return None;
        }
        justify
    };

    out.set(align_id, align);
    out.set(justify_id, justify);
    Some(())
}

/// [§ 7.4 Explicit Grid Shorthand](https://www.w3.org/TR/css-grid-2/#explicit-grid-shorthand)
pub(super) fn expand_grid_template(
    out: &mut Expansion,
    stream: &mut TokenStream,
    ctx: &ParserContext,
) -> Option<()> {
    let template = consume_grid_template(stream, ctx)?;
    out.set(P::GridTemplateRows, template.rows);
    out.set(P::GridTemplateColumns, template.columns);
    out.set(P::GridTemplateAreas, template.areas);
    Some(())
}

/// [§ 7.8 Grid Definition Shorthand](https://www.w3.org/TR/css-grid-2/#grid-shorthand)
///
/// `<'grid-template'> |
///  <'grid-template-rows'> / [ auto-flow && dense? ] <'grid-auto-columns'>? |
///  [ auto-flow && dense? ] <'grid-auto-rows'>? / <'grid-template-columns'>`
///
/// The implicit grid longhands are reset even when the text names them.
pub(super) fn expand_grid(
    out: &mut Expansion,
    stream: &mut TokenStream,
    ctx: &ParserContext,
) -> Option<()> {
    let auto = || CSSValue::ident(V::Auto);
    let none = || CSSValue::ident(V::None);

    // STEP 1: <'grid-template'>
    {
        let mut save = SavePoint::new(stream);
        if let Some(template) = consume_grid_template(&mut save, ctx) {
            save.consume_whitespace();
            if at_end_or_important(&save) {
                save.release();
                out.set(P::GridTemplateRows, template.rows);
                out.set(P::GridTemplateColumns, template.columns);
                out.set(P::GridTemplateAreas, template.areas);
                out.set_implicit(P::GridAutoFlow, CSSValue::ident(V::Row));
                out.set_implicit(P::GridAutoRows, auto());
                out.set_implicit(P::GridAutoColumns, auto());
                return Some(());
            }
        }
    }

    // STEP 2: [ auto-flow && dense? ] <'grid-auto-rows'>? / <'grid-template-columns'>
    if matches!(stream.peek_id(), Some(V::Dense | V::AutoFlow)) {
        let flow = consume_implicit_auto_flow(stream, V::Row)?;
        let auto_rows = if consume_slash_including_whitespace(stream) {
            auto()
        } else {
            let rows = consume_track_list(stream, ctx, TrackListType::Auto)?;
            if !consume_slash_including_whitespace(stream) {
                return None;
            }
            rows
        };
        let columns = consume_template_rows_or_columns(stream, ctx)?;
        out.set(P::GridTemplateRows, none());
        out.set(P::GridTemplateColumns, columns);
        out.set(P::GridTemplateAreas, none());
        out.set_implicit(P::GridAutoFlow, flow);
        out.set_implicit(P::GridAutoRows, auto_rows);
        out.set_implicit(P::GridAutoColumns, auto());
        return Some(());
    }

    // STEP 3: <'grid-template-rows'> / [ auto-flow && dense? ] <'grid-auto-columns'>?
    let rows = consume_template_rows_or_columns(stream, ctx)?;
    if !consume_slash_including_whitespace(stream) {
        return None;
    }
    let flow = consume_implicit_auto_flow(stream, V::Column)?;
    let auto_columns = if at_end_or_important(stream) {
        auto()
    } else {
        consume_track_list(stream, ctx, TrackListType::Auto)?
    };
    out.set(P::GridTemplateRows, rows);
    out.set(P::GridTemplateColumns, none());
    out.set(P::GridTemplateAreas, none());
    out.set_implicit(P::GridAutoFlow, flow);
    out.set_implicit(P::GridAutoRows, auto());
    out.set_implicit(P::GridAutoColumns, auto_columns);
    Some(())
}

/// The line an omitted end falls back to: the start when it is a lone
/// `<custom-ident>`, `auto` otherwise.
fn implied_end(start: &ValueRef) -> ValueRef {
    if is_custom_ident_line(start) {
        start.clone()
    } else {
        CSSValue::ident(V::Auto)
    }
}

/// [§ 8.4 Placement Shorthands](https://www.w3.org/TR/css-grid-2/#placement-shorthands)
///
/// `<grid-line> [ / <grid-line> ]?` for `grid-row` and `grid-column`.
pub(super) fn expand_grid_line_pair(
    id: CSSPropertyID,
    out: &mut Expansion,
    stream: &mut TokenStream,
) -> Option<()> {
    let &[start_id, end_id] = id.longhands() else {
        return None;
    };
    let start = consume_grid_line(stream)?;
    let end = if consume_slash_including_whitespace(stream) {
        consume_grid_line(stream)?
    } else {
        implied_end(&start)
    };
    out.set(start_id, start);
    out.set(end_id, end);
    Some(())
}

/// [§ 8.4 Placement Shorthands](https://www.w3.org/TR/css-grid-2/#placement-shorthands)
///
/// `<grid-line> [ / <grid-line> ]{0,3}` in row-start, column-start,
/// row-end, column-end order.
pub(super) fn expand_grid_area(out: &mut Expansion, stream: &mut TokenStream) -> Option<()> {
    let row_start = consume_grid_line(stream)?;
    let mut lines = [None, None, None];
    for line in &mut lines {
        if !consume_slash_including_whitespace(stream) {
            break;
        }
        *line = Some(consume_grid_line(stream)?);
    }
    let [column_start, row_end, column_end] = lines;
    let column_start = column_start.unwrap_or_else(|| implied_end(&row_start));
    let row_end = row_end.unwrap_or_else(|| implied_end(&row_start));
    let column_end = column_end.unwrap_or_else(|| implied_end(&column_start));

    out.set(P::GridRowStart, row_start);
    out.set(P::GridColumnStart, column_start);
    out.set(P::GridRowEnd, row_end);
    out.set(P::GridColumnEnd, column_end);
    Some(())
}

#[cfg(test)]
mod tests {
    use super::super::parse_shorthand;
    use super::*;
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

    fn values(id: CSSPropertyID, text: &str) -> Option<Vec<String>> {
        expand(id, text).map(|entries| entries.iter().map(|e| e.value.css_text()).collect())
    }

    #[test]
    fn test_flex_forms() {
        assert_eq!(values(P::Flex, "none").unwrap(), ["0", "0", "auto"]);
        assert_eq!(values(P::Flex, "2").unwrap(), ["2", "1", "0%"]);
        assert_eq!(values(P::Flex, "auto").unwrap(), ["1", "1", "auto"]);
        assert_eq!(values(P::Flex, "2 3 10px").unwrap(), ["2", "3", "10px"]);
        assert_eq!(values(P::Flex, "1 1 0").unwrap(), ["1", "1", "0px"]);
        assert_eq!(values(P::Flex, "10px 2").unwrap(), ["2", "1", "10px"]);
        assert!(values(P::Flex, "-1").is_none());
        assert!(values(P::Flex, "1 10px 2").is_none());
        assert!(values(P::Flex, "1 2 3").is_none());
    }

    #[test]
    fn test_place_shorthands() {
        assert_eq!(values(P::PlaceItems, "center").unwrap(), ["center", "center"]);
        assert_eq!(values(P::PlaceSelf, "start end").unwrap(), ["start", "end"]);
        assert_eq!(values(P::PlaceContent, "baseline").unwrap(), ["baseline", "start"]);
        assert_eq!(
            values(P::PlaceContent, "space-between center").unwrap(),
            ["space-between", "center"]
        );
        assert!(values(P::PlaceItems, "auto").is_none());
    }

    #[test]
    fn test_grid_placement() {
        assert_eq!(values(P::GridRow, "1 / 3").unwrap(), ["1", "3"]);
        assert_eq!(values(P::GridColumn, "main").unwrap(), ["main", "main"]);
        assert_eq!(values(P::GridColumn, "2").unwrap(), ["2", "auto"]);
        assert_eq!(
            values(P::GridArea, "a").unwrap(),
            ["a", "a", "a", "a"]
        );
        assert_eq!(
            values(P::GridArea, "1 / 2").unwrap(),
            ["1", "2", "auto", "auto"]
        );
        assert!(values(P::GridArea, "1 / 2 / 3 / 4 / 5").is_none());
    }

    #[test]
    fn test_grid_forms() {
        let entries = expand(P::Grid, "auto-flow dense 40px / 1fr 2fr").unwrap();
        let flow = entries.iter().find(|e| e.id == P::GridAutoFlow).unwrap();
        assert_eq!(flow.value.css_text(), "dense");
        assert!(flow.implicit);
        assert_eq!(
            values(P::Grid, "100px / auto-flow").unwrap(),
            ["100px", "none", "none", "column", "auto", "auto"]
        );
        let template = expand(P::Grid, "none").unwrap();
        assert!(template.iter().skip(3).all(|e| e.implicit));
        assert!(values(P::Grid, "auto-flow 40px").is_none());
    }
}
