//! `border`, `border-block`, `border-inline`, `border-radius` and
//! `border-image`.

use super::{Expansion, skip_optional_comma};
use crate::parser::context::{LocalContext, ParserContext, UnitlessQuirk};
use crate::parser::stream::TokenStream;
use crate::properties::CSSPropertyID;
use crate::properties::backgrounds::consume_border_image_components;
use crate::properties::consumers::{
    ValueRange, consume_length_or_percent, consume_slash_including_whitespace,
};
use crate::properties::longhands::parse_longhand;
use crate::tokenizer::CSSToken;
use crate::values::{CSSValue, IdenticalValuesPolicy, ValuePair, ValueRef};

use CSSPropertyID as P;

/// Which component of a border a longhand carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BorderPart {
    Width,
    Style,
    Color,
    Image,
}

fn border_part(longhand: CSSPropertyID) -> BorderPart {
    let name = longhand.name();
    if name.starts_with("border-image") {
        BorderPart::Image
    } else if name.ends_with("-width") {
        BorderPart::Width
    } else if name.ends_with("-style") {
        BorderPart::Style
    } else {
        BorderPart::Color
    }
}

/// [§ 4.4 Border Shorthands](https://www.w3.org/TR/css-backgrounds-3/#border-shorthands)
///
/// `<line-width> || <line-style> || <color>`, set on every side the
/// shorthand covers. `border` also resets `border-image`.
pub(super) fn expand_border(
    id: CSSPropertyID,
    out: &mut Expansion,
    stream: &mut TokenStream,
    ctx: &ParserContext,
    local: &LocalContext,
) -> Option<()> {
    let longhands = id.longhands();
    let first_of = |part| longhands.iter().copied().find(|&l| border_part(l) == part);
    let (width_id, style_id, color_id) = (
        first_of(BorderPart::Width)?,
        first_of(BorderPart::Style)?,
        first_of(BorderPart::Color)?,
    );

    // STEP 1: Width, style and color in any order, each at most once.
    let mut width = None;
    let mut style = None;
    let mut color = None;
    while !stream.at_end() {
        if width.is_none()
            && let Some(value) = parse_longhand(width_id, stream, ctx, local)
        {
            width = Some(value);
        } else if style.is_none()
            && let Some(value) = parse_longhand(style_id, stream, ctx, local)
        {
            style = Some(value);
        } else if color.is_none()
            && let Some(value) = parse_longhand(color_id, stream, ctx, local)
        {
            color = Some(value);
        } else {
            break;
        }
        skip_optional_comma(stream);
    }
    if width.is_none() && style.is_none() && color.is_none() {
        return None;
    }

    // STEP 2: Fan out to the sides. Components left out reset to `initial`.
    let width = width.unwrap_or_else(CSSValue::initial);
    let style = style.unwrap_or_else(CSSValue::initial);
    let color = color.unwrap_or_else(CSSValue::initial);
    for &longhand in longhands {
        match border_part(longhand) {
            BorderPart::Width => out.set(longhand, width.clone()),
            BorderPart::Style => out.set(longhand, style.clone()),
            BorderPart::Color => out.set(longhand, color.clone()),
            BorderPart::Image => out.set_implicit(longhand, CSSValue::initial()),
        }
    }
    Some(())
}

/// Fill missing sides of `values` by the four-side rule.
fn complete_sides(values: &[ValueRef]) -> Option<[ValueRef; 4]> {
    let top = values.first()?.clone();
    let right = values.get(1).unwrap_or(&top).clone();
    let bottom = values.get(2).unwrap_or(&top).clone();
    let left = values.get(3).unwrap_or(&right).clone();
    Some([top, right, bottom, left])
}

/// Up to four radii, stopping at any delimiter.
fn consume_radii(stream: &mut TokenStream, ctx: &ParserContext) -> Option<Vec<ValueRef>> {
    let mut radii = Vec::with_capacity(4);
    while radii.len() < 4 && !stream.at_end() && !matches!(stream.peek(), CSSToken::Delim(_)) {
        radii.push(consume_length_or_percent(
            stream,
            ctx,
            ValueRange::NonNegative,
            UnitlessQuirk::Forbid,
        )?);
    }
    (!radii.is_empty()).then_some(radii)
}

/// [§ 5.1 Curve Radii](https://www.w3.org/TR/css-backgrounds-3/#border-radius)
///
/// `<length-percentage [0,∞]>{1,4} [ / <length-percentage [0,∞]>{1,4} ]?`
///
/// Through the `-webkit-` alias, exactly two values without a slash are
/// one elliptical radius for every corner.
pub(super) fn expand_border_radius(
    out: &mut Expansion,
    stream: &mut TokenStream,
    ctx: &ParserContext,
    local: &LocalContext,
) -> Option<()> {
    let mut horizontal = consume_radii(stream, ctx)?;
    let mut vertical = Vec::new();
    if consume_slash_including_whitespace(stream) {
        vertical = consume_radii(stream, ctx)?;
    } else if local.use_alias_parsing && horizontal.len() == 2 {
        vertical = horizontal.split_off(1);
    }

    let horizontal = complete_sides(&horizontal)?;
    let vertical = if vertical.is_empty() {
        horizontal.clone()
    } else {
        complete_sides(&vertical)?
    };

    let corners = [
        P::BorderTopLeftRadius,
        P::BorderTopRightRadius,
        P::BorderBottomRightRadius,
        P::BorderBottomLeftRadius,
    ];
    for ((corner, h), v) in corners.into_iter().zip(horizontal).zip(vertical) {
        let pair = ValuePair::new(h, v, IdenticalValuesPolicy::Drop);
        out.set(corner, CSSValue::Pair(pair).into_ref());
    }
    Some(())
}

/// [§ 6.6 Image Border Shorthand](https://www.w3.org/TR/css-backgrounds-3/#border-image)
pub(super) fn expand_border_image(
    out: &mut Expansion,
    stream: &mut TokenStream,
    ctx: &ParserContext,
) -> Option<()> {
    let components = consume_border_image_components(stream, ctx)?;
    let longhands = [
        P::BorderImageSource,
        P::BorderImageSlice,
        P::BorderImageWidth,
        P::BorderImageOutset,
        P::BorderImageRepeat,
    ];
    for (longhand, (value, implicit)) in longhands.into_iter().zip(components.into_values()) {
        if implicit {
            out.set_implicit(longhand, value);
        } else {
            out.set(longhand, value);
        }
    }
    Some(())
}

#[cfg(test)]
mod tests {
    use super::super::parse_shorthand;
    use super::*;
    use crate::properties::PropertyValue;

    fn expand(id: CSSPropertyID, text: &str, local: &LocalContext) -> Option<Vec<PropertyValue>> {
        let mut stream = TokenStream::new(text);
        let mut out = Vec::new();
        parse_shorthand(id, false, &mut stream, &ParserContext::default(), local, &mut out)
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
    fn test_border_fans_out() {
        let entries = expand(P::Border, "1px solid red", &LocalContext::default()).unwrap();
        assert_eq!(entries.len(), 17);
        assert_eq!(value_of(&entries, P::BorderLeftWidth), "1px");
        assert_eq!(value_of(&entries, P::BorderBottomStyle), "solid");
        assert_eq!(value_of(&entries, P::BorderTopColor), "red");
        assert_eq!(value_of(&entries, P::BorderImageSource), "initial");
        assert!(entries.iter().all(|e| e.shorthand == Some(P::Border)));
        let image = entries.iter().find(|e| e.id == P::BorderImageRepeat).unwrap();
        assert!(image.implicit);
    }

    #[test]
    fn test_border_missing_components() {
        let entries = expand(P::BorderBlock, "dotted", &LocalContext::default()).unwrap();
        assert_eq!(entries.len(), 6);
        assert_eq!(value_of(&entries, P::BorderBlockEndStyle), "dotted");
        assert_eq!(value_of(&entries, P::BorderBlockStartWidth), "initial");
        assert!(expand(P::Border, "solid dashed", &LocalContext::default()).is_none());
    }

    #[test]
    fn test_border_radius() {
        let local = LocalContext::default();
        let entries = expand(P::BorderRadius, "10px 20px / 5px", &local).unwrap();
        assert_eq!(value_of(&entries, P::BorderTopLeftRadius), "10px 5px");
        assert_eq!(value_of(&entries, P::BorderTopRightRadius), "20px 5px");
        assert_eq!(value_of(&entries, P::BorderBottomLeftRadius), "20px 5px");

        let entries = expand(P::BorderRadius, "1px 2px", &local).unwrap();
        assert_eq!(value_of(&entries, P::BorderBottomRightRadius), "1px");

        let alias = LocalContext {
            use_alias_parsing: true,
            ..LocalContext::default()
        };
        let entries = expand(P::BorderRadius, "1px 2px", &alias).unwrap();
        assert_eq!(value_of(&entries, P::BorderBottomRightRadius), "1px 2px");

        assert!(expand(P::BorderRadius, "1px /", &local).is_none());
        assert!(expand(P::BorderRadius, "-1px", &local).is_none());
    }

    #[test]
    fn test_border_image() {
        let entries = expand(P::BorderImage, "url(a.png) 30 round", &LocalContext::default()).unwrap();
        assert_eq!(value_of(&entries, P::BorderImageSlice), "30");
        assert_eq!(value_of(&entries, P::BorderImageRepeat), "round");
        assert_eq!(value_of(&entries, P::BorderImageWidth), "initial");
    }
}
