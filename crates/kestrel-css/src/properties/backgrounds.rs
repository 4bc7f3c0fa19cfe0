//! Background and border longhands.
//!
//! [CSS Backgrounds and Borders Module Level 3](https://www.w3.org/TR/css-backgrounds-3/)

use super::color::consume_color;
use super::consumers::{
    ValueRange, consume_comma_list, consume_ident_id, consume_ident_in,
    consume_length, consume_length_or_percent, consume_number, consume_percent,
};
use super::image::consume_image_or_none;
use crate::parser::context::{LocalContext, ParserContext, UnitlessQuirk};
use crate::parser::stream::TokenStream;
use crate::values::{
    BorderImageSlice, CSSValue, CSSValueID, IdenticalValuesPolicy, RepeatStyle,
    Separator, ValueList, ValuePair, ValueQuad, ValueRef,
};
use crate::properties::CSSPropertyID;

use CSSValueID as V;

/// `<bg-image>#`
pub fn consume_background_image(stream: &mut TokenStream, ctx: &ParserContext) -> Option<ValueRef> {
    consume_comma_list(stream, |s| consume_image_or_none(s, ctx))
}

/// One `background-position-x` or `-y` component:
/// `center | [ <start> | <end> ] <length-percentage>? | <length-percentage>`
pub fn consume_position_component(
    stream: &mut TokenStream,
    ctx: &ParserContext,
    start: CSSValueID,
    end: CSSValueID,
) -> Option<ValueRef> {
    if let Some(center) = consume_ident_in(stream, &[V::Center]) {
        return Some(center);
    }
    if let Some(edge) = consume_ident_in(stream, &[start, end]) {
        let Some(offset) =
            consume_length_or_percent(stream, ctx, ValueRange::All, UnitlessQuirk::Forbid)
        else {
            return Some(edge);
        };
        return Some(ValueList::from_values(Separator::Space, [edge, offset]).into_value());
    }
    consume_length_or_percent(stream, ctx, ValueRange::All, UnitlessQuirk::Forbid)
}

/// [§ 3.6 background-position](https://www.w3.org/TR/css-backgrounds-4/#background-position-longhands)
///
/// `background-position-x` and `background-position-y` as comma lists.
pub fn consume_background_position_axis(
    stream: &mut TokenStream,
    ctx: &ParserContext,
    horizontal: bool,
) -> Option<ValueRef> {
    let (start, end) = if horizontal {
        (V::Left, V::Right)
    } else {
        (V::Top, V::Bottom)
    };
    consume_comma_list(stream, |s| consume_position_component(s, ctx, start, end))
}

/// [§ 3.9 Sizing Images](https://www.w3.org/TR/css-backgrounds-3/#background-size)
///
/// `<bg-size> = [ <length-percentage [0,∞]> | auto ]{1,2} | cover | contain`.
/// A second `auto` is dropped; a single value stays single.
pub fn consume_background_size(stream: &mut TokenStream, ctx: &ParserContext) -> Option<ValueRef> {
    if let Some(keyword) = consume_ident_in(stream, &[V::Cover, V::Contain]) {
        return Some(keyword);
    }
    let size = |s: &mut TokenStream| {
        consume_ident_in(s, &[V::Auto]).or_else(|| {
            consume_length_or_percent(s, ctx, ValueRange::NonNegative, UnitlessQuirk::Forbid)
        })
    };
    let horizontal = size(stream)?;
    if consume_ident_in(stream, &[V::Auto]).is_some() {
        return Some(horizontal);
    }
    match consume_length_or_percent(stream, ctx, ValueRange::NonNegative, UnitlessQuirk::Forbid) {
        Some(vertical) => Some(
            CSSValue::Pair(ValuePair::new(horizontal, vertical, IdenticalValuesPolicy::Keep))
                .into_ref(),
        ),
        None => Some(horizontal),
    }
}

/// `<bg-size>#`
pub fn consume_background_size_list(
    stream: &mut TokenStream,
    ctx: &ParserContext,
) -> Option<ValueRef> {
    consume_comma_list(stream, |s| consume_background_size(s, ctx))
}

/// [§ 3.4 Tiling Images](https://www.w3.org/TR/css-backgrounds-3/#background-repeat)
///
/// `<repeat-style> = repeat-x | repeat-y | [repeat | space | round | no-repeat]{1,2}`
pub fn consume_repeat_style(stream: &mut TokenStream) -> Option<ValueRef> {
    const AXIS: &[CSSValueID] = &[V::Repeat, V::NoRepeat, V::Round, V::Space];
    let style = match consume_ident_id(stream, &[V::RepeatX, V::RepeatY]) {
        Some(V::RepeatX) => RepeatStyle::new(V::Repeat, V::NoRepeat),
        Some(_) => RepeatStyle::new(V::NoRepeat, V::Repeat),
        None => {
            let x = consume_ident_id(stream, AXIS)?;
            let y = consume_ident_id(stream, AXIS).unwrap_or(x);
            RepeatStyle::new(x, y)
        }
    };
    Some(CSSValue::RepeatStyle(style).into_ref())
}

/// `<repeat-style>#`
pub fn consume_background_repeat(stream: &mut TokenStream) -> Option<ValueRef> {
    consume_comma_list(stream, consume_repeat_style)
}

/// `<attachment> = scroll | fixed | local`
pub fn consume_attachment(stream: &mut TokenStream) -> Option<ValueRef> {
    consume_ident_in(stream, &[V::Scroll, V::Fixed, V::Local])
}

/// `<visual-box> = border-box | padding-box | content-box`
pub fn consume_background_box(stream: &mut TokenStream) -> Option<ValueRef> {
    consume_ident_in(stream, &[V::BorderBox, V::PaddingBox, V::ContentBox])
}

/// `<bg-clip> = <visual-box> | text`
pub fn consume_background_clip(stream: &mut TokenStream) -> Option<ValueRef> {
    consume_background_box(stream).or_else(|| consume_ident_in(stream, &[V::Text]))
}

// ----------------------------------------------------------------------------
// Borders
// ----------------------------------------------------------------------------

/// [§ 4.3 Line Thickness](https://www.w3.org/TR/css-backgrounds-3/#border-width)
///
/// `<line-width> = <length [0,∞]> | thin | medium | thick`
pub fn consume_line_width(
    stream: &mut TokenStream,
    ctx: &ParserContext,
    quirk: UnitlessQuirk,
) -> Option<ValueRef> {
    consume_ident_in(stream, &[V::Thin, V::Medium, V::Thick])
        .or_else(|| consume_length(stream, ctx, ValueRange::NonNegative, quirk))
}

/// A `border-*-width` longhand. Unitless quirk lengths are accepted only
/// when set directly or through `border-width`.
pub fn consume_border_width_side(
    stream: &mut TokenStream,
    ctx: &ParserContext,
    local: &LocalContext,
) -> Option<ValueRef> {
    let quirk = match local.current_shorthand {
        None | Some(CSSPropertyID::BorderWidth) => local.unitless_quirk,
        Some(_) => UnitlessQuirk::Forbid,
    };
    consume_line_width(stream, ctx, quirk)
}

/// [§ 4.2 Line Patterns](https://www.w3.org/TR/css-backgrounds-3/#border-style)
///
/// `<line-style> = none | hidden | dotted | dashed | solid | double |
///  groove | ridge | inset | outset`
pub fn consume_line_style(stream: &mut TokenStream) -> Option<ValueRef> {
    consume_ident_in(
        stream,
        &[
            V::None,
            V::Hidden,
            V::Dotted,
            V::Dashed,
            V::Solid,
            V::Double,
            V::Groove,
            V::Ridge,
            V::Inset,
            V::Outset,
        ],
    )
}

/// [§ 5.1 Curve Radii](https://www.w3.org/TR/css-backgrounds-3/#border-radius)
///
/// `<length-percentage [0,∞]>{1,2}`, a pair that prints once when both
/// radii agree.
pub fn consume_border_radius_corner(
    stream: &mut TokenStream,
    ctx: &ParserContext,
) -> Option<ValueRef> {
    let radius = |s: &mut TokenStream| {
        consume_length_or_percent(s, ctx, ValueRange::NonNegative, UnitlessQuirk::Forbid)
    };
    let horizontal = radius(stream)?;
    let vertical = radius(stream).unwrap_or_else(|| horizontal.clone());
    Some(CSSValue::Pair(ValuePair::new(horizontal, vertical, IdenticalValuesPolicy::Drop)).into_ref())
}

/// [§ 6.4 Image Edge Repeat](https://www.w3.org/TR/css-backgrounds-3/#border-image-repeat)
///
/// `[ stretch | repeat | round | space ]{1,2}`
pub fn consume_border_image_repeat(stream: &mut TokenStream) -> Option<ValueRef> {
    const KEYWORDS: &[CSSValueID] = &[V::Stretch, V::Repeat, V::Round, V::Space];
    let horizontal = consume_ident_in(stream, KEYWORDS)?;
    let vertical = consume_ident_in(stream, KEYWORDS).unwrap_or_else(|| horizontal.clone());
    Some(CSSValue::Pair(ValuePair::new(horizontal, vertical, IdenticalValuesPolicy::Drop)).into_ref())
}

/// Read one to four values and fill the rest by the four-side rule.
fn consume_quad<F>(stream: &mut TokenStream, mut item: F) -> Option<ValueQuad>
where
    F: FnMut(&mut TokenStream) -> Option<ValueRef>,
{
    let mut sides: [Option<ValueRef>; 4] = Default::default();
    for side in &mut sides {
        match item(stream) {
            Some(value) => *side = Some(value),
            None => break,
        }
    }
    let [top, right, bottom, left] = sides;
    Some(ValueQuad::from_sides(top?, right, bottom, left, IdenticalValuesPolicy::Drop))
}

/// [§ 6.2 Image Slicing](https://www.w3.org/TR/css-backgrounds-3/#border-image-slice)
///
/// `[<number [0,∞]> | <percentage [0,∞]>]{1,4} && fill?`
pub fn consume_border_image_slice(stream: &mut TokenStream) -> Option<ValueRef> {
    let start = stream.save();
    let mut fill = consume_ident_in(stream, &[V::Fill]).is_some();
    let Some(slices) = consume_quad(stream, |s| {
        consume_percent(s, ValueRange::NonNegative).or_else(|| consume_number(s, ValueRange::NonNegative))
    }) else {
        stream.restore(start);
        return None;
    };
    if consume_ident_in(stream, &[V::Fill]).is_some() {
        if fill {
            stream.restore(start);
            return None;
        }
        fill = true;
    }
    Some(CSSValue::BorderImageSlice(BorderImageSlice { slices, fill }).into_ref())
}

/// [§ 6.3 Drawing Areas](https://www.w3.org/TR/css-backgrounds-3/#border-image-width)
///
/// `[ <length-percentage [0,∞]> | <number [0,∞]> | auto ]{1,4}`
pub fn consume_border_image_width(stream: &mut TokenStream, ctx: &ParserContext) -> Option<ValueRef> {
    let quad = consume_quad(stream, |s| {
        consume_number(s, ValueRange::NonNegative)
            .or_else(|| {
                consume_length_or_percent(s, ctx, ValueRange::NonNegative, UnitlessQuirk::Forbid)
            })
            .or_else(|| consume_ident_in(s, &[V::Auto]))
    })?;
    Some(CSSValue::Quad(quad).into_ref())
}

/// [§ 6.5 Extending the image area](https://www.w3.org/TR/css-backgrounds-3/#border-image-outset)
///
/// `[ <length [0,∞]> | <number [0,∞]> ]{1,4}`
pub fn consume_border_image_outset(stream: &mut TokenStream, ctx: &ParserContext) -> Option<ValueRef> {
    let quad = consume_quad(stream, |s| {
        consume_number(s, ValueRange::NonNegative)
            .or_else(|| consume_length(s, ctx, ValueRange::NonNegative, UnitlessQuirk::Forbid))
    })?;
    Some(CSSValue::Quad(quad).into_ref())
}

/// The five `border-image-*` components.
#[derive(Debug, Default)]
pub struct BorderImageComponents {
    /// `border-image-source`
    pub source: Option<ValueRef>,
    /// `border-image-slice`
    pub slice: Option<ValueRef>,
    /// `border-image-width`
    pub width: Option<ValueRef>,
    /// `border-image-outset`
    pub outset: Option<ValueRef>,
    /// `border-image-repeat`
    pub repeat: Option<ValueRef>,
}

impl BorderImageComponents {
    /// The component values in `border-image` longhand order, with
    /// missing ones as `initial`.
    #[must_use]
    pub fn into_values(self) -> [(ValueRef, bool); 5] {
        let fill = |value: Option<ValueRef>| match value {
            Some(value) => (value, false),
            None => (CSSValue::initial(), true),
        };
        [
            fill(self.source),
            fill(self.slice),
            fill(self.width),
            fill(self.outset),
            fill(self.repeat),
        ]
    }
}

/// [§ 6.6 Image Border Shorthand](https://www.w3.org/TR/css-backgrounds-3/#border-image)
///
/// `<'border-image-source'> || <'border-image-slice'> [ / <'border-image-width'> |
///  / <'border-image-width'>? / <'border-image-outset'> ]? || <'border-image-repeat'>`
pub fn consume_border_image_components(
    stream: &mut TokenStream,
    ctx: &ParserContext,
) -> Option<BorderImageComponents> {
    use super::consumers::consume_slash_including_whitespace;

    let mut parts = BorderImageComponents::default();
    while !stream.at_end() {
        if parts.source.is_none()
            && let Some(source) = consume_image_or_none(stream, ctx)
        {
            parts.source = Some(source);
            continue;
        }
        if parts.repeat.is_none()
            && let Some(repeat) = consume_border_image_repeat(stream)
        {
            parts.repeat = Some(repeat);
            continue;
        }
        if parts.slice.is_some() {
            break;
        }
        let start = stream.save();
        let Some(slice) = consume_border_image_slice(stream) else {
            break;
        };
        parts.slice = Some(slice);
        if consume_slash_including_whitespace(stream) {
            parts.width = consume_border_image_width(stream, ctx);
            if consume_slash_including_whitespace(stream) {
                parts.outset = consume_border_image_outset(stream, ctx);
                if parts.outset.is_none() {
                    stream.restore(start);
                    return None;
                }
            } else if parts.width.is_none() {
                stream.restore(start);
                return None;
            }
        }
    }
    (parts.source.is_some() || parts.repeat.is_some() || parts.slice.is_some()).then_some(parts)
}

/// `<color>` for the border and outline color longhands.
pub fn consume_border_color(
    stream: &mut TokenStream,
    ctx: &ParserContext,
    local: &LocalContext,
) -> Option<ValueRef> {
    let local = match local.current_shorthand {
        None | Some(CSSPropertyID::BorderColor) => *local,
        Some(_) => local.forbid_unitless(),
    };
    consume_color(stream, ctx, &local)
}
