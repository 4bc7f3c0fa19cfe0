//! `<image>` parsing: urls, `image-set()`, gradients.
//!
//! [CSS Images Module Level 4](https://www.w3.org/TR/css-images-4/)

use super::color::{consume_color, consume_light_dark, numeric_of};
use super::consumers::{
    ValueRange, consume_angle, consume_comma_including_whitespace, consume_ident_id,
    consume_length_or_percent, consume_percent, consume_position,
    consume_resolution, consume_string, consume_url_text, url_value,
};
use crate::parser::context::{LocalContext, ParserContext, UnitlessQuirk};
use crate::parser::stream::{RestoringBlockGuard, TokenStream};
use crate::tokenizer::CSSToken;
use crate::values::{
    CSSValue, CSSValueID, Gradient, GradientKind, ImageSetOption, NumericLiteral, Separator,
    UnitType, ValueList, ValueRef,
};

/// Run `body` inside the function block at the cursor. The stream is left
/// untouched unless `body` succeeds and consumes the whole block.
fn consume_function<F>(stream: &mut TokenStream, body: F) -> Option<ValueRef>
where
    F: FnOnce(&mut TokenStream) -> Option<ValueRef>,
{
    let value = {
        let mut guard = RestoringBlockGuard::new(stream)?;
        guard.consume_whitespace();
        let value = body(&mut guard)?;
        guard.release().then_some(value)?
    };
    stream.consume_whitespace();
    Some(value)
}

/// [§ 2 Image Values](https://www.w3.org/TR/css-images-4/#image-values)
///
/// `<image> = <url> | <image-set()> | <gradient>`. `light-dark()` of two
/// images is accepted in the user-agent stylesheet only.
pub fn consume_image(stream: &mut TokenStream, ctx: &ParserContext) -> Option<ValueRef> {
    consume_image_inner(stream, ctx, true)
}

/// `none | <image>`
pub fn consume_image_or_none(stream: &mut TokenStream, ctx: &ParserContext) -> Option<ValueRef> {
    if stream.peek_id() == Some(CSSValueID::None) {
        let _ = stream.consume_including_whitespace();
        return Some(CSSValue::ident(CSSValueID::None));
    }
    consume_image(stream, ctx)
}

fn consume_image_inner(
    stream: &mut TokenStream,
    ctx: &ParserContext,
    allow_image_set: bool,
) -> Option<ValueRef> {
    if let Some(url) = consume_url_text(stream) {
        return Some(url_value(url, ctx));
    }
    let CSSToken::Function(name) = stream.peek() else {
        return None;
    };
    let name = name.to_ascii_lowercase();
    match name.as_str() {
        "image-set" | "-webkit-image-set" if allow_image_set => {
            consume_function(stream, |s| consume_image_set(s, ctx))
        }
        "light-dark" if ctx.is_ua_sheet() => consume_function(stream, |s| {
            consume_light_dark(s, |s| consume_image_or_none(s, ctx))
        }),
        _ => consume_gradient(stream, &name, ctx),
    }
}

/// [§ 2.2 Image Fallbacks and Annotations](https://www.w3.org/TR/css-images-4/#image-set-notation)
///
/// `image-set( <image-set-option># )`
fn consume_image_set(stream: &mut TokenStream, ctx: &ParserContext) -> Option<ValueRef> {
    let mut options = ValueList::comma();
    loop {
        options.append(consume_image_set_option(stream, ctx)?);
        if !consume_comma_including_whitespace(stream) {
            break;
        }
    }
    Some(CSSValue::ImageSet(options).into_ref())
}

/// `[ <image> | <string> ] [ <resolution> || type(<string>) ]?`
fn consume_image_set_option(stream: &mut TokenStream, ctx: &ParserContext) -> Option<ValueRef> {
    let image = match stream.peek() {
        CSSToken::String(text) => {
            let text = text.clone();
            let _ = stream.consume_including_whitespace();
            url_value(text, ctx)
        }
        // "<image-set()> values can't be nested"
        _ => consume_image_inner(stream, ctx, false)?,
    };

    let mut resolution = None;
    let mut mime_type = None;
    for _ in 0..2 {
        if resolution.is_none()
            && let Some(value) = consume_resolution(stream, ValueRange::All)
        {
            // Negative literals are invalid; a calc() result is clamped later.
            if matches!(&*value, CSSValue::Numeric(n) if n.value < 0.0) {
                return None;
            }
            resolution = Some(value);
            continue;
        }
        if mime_type.is_none() && stream.peek().function_matches("type") {
            let value = consume_function(stream, |s| {
                let CSSValue::String(text) = &*consume_string(s)? else {
                    return None;
                };
                Some(CSSValue::ImageSetType(text.clone()).into_ref())
            })?;
            mime_type = Some(value);
            continue;
        }
        break;
    }

    let resolution =
        resolution.unwrap_or_else(|| CSSValue::numeric(NumericLiteral::new(1.0, UnitType::X)));
    Some(
        CSSValue::ImageSetOption(ImageSetOption {
            image,
            resolution,
            mime_type,
        })
        .into_ref(),
    )
}

/// [§ 3 Gradients](https://www.w3.org/TR/css-images-4/#gradients)
fn consume_gradient(stream: &mut TokenStream, name: &str, ctx: &ParserContext) -> Option<ValueRef> {
    let (repeating, base) = match name.strip_prefix("repeating-") {
        Some(base) => (true, base),
        None => (false, name),
    };
    let kind = match base {
        "linear-gradient" => GradientKind::Linear,
        "radial-gradient" => GradientKind::Radial,
        "conic-gradient" => GradientKind::Conic,
        _ => return None,
    };
    consume_function(stream, |s| {
        let mut args = ValueList::comma();
        let preamble = match kind {
            GradientKind::Linear => consume_linear_preamble(s, ctx),
            GradientKind::Radial => consume_radial_preamble(s, ctx),
            GradientKind::Conic => consume_conic_preamble(s, ctx),
        };
        if let Some(preamble) = preamble {
            args.append(preamble);
            if !consume_comma_including_whitespace(s) {
                return None;
            }
        }
        consume_color_stops(s, ctx, kind, &mut args)?;
        Some(
            CSSValue::Gradient(Gradient {
                kind,
                repeating,
                args,
            })
            .into_ref(),
        )
    })
}

fn space_list(values: Vec<ValueRef>) -> Option<ValueRef> {
    match values.len() {
        0 => None,
        1 => values.into_iter().next(),
        _ => Some(ValueList::from_values(Separator::Space, values).into_value()),
    }
}

/// `[ <angle> | to <side-or-corner> ]`
fn consume_linear_preamble(stream: &mut TokenStream, _ctx: &ParserContext) -> Option<ValueRef> {
    if let Some(angle) = consume_angle(stream, true) {
        return Some(angle);
    }
    if stream.peek_id() != Some(CSSValueID::To) {
        return None;
    }
    let state = stream.save();
    let _ = stream.consume_including_whitespace();
    let horizontal = [CSSValueID::Left, CSSValueID::Right];
    let vertical = [CSSValueID::Top, CSSValueID::Bottom];
    let mut parts = vec![CSSValue::ident(CSSValueID::To)];
    let mut seen_horizontal = false;
    let mut seen_vertical = false;
    while let Some(id) = stream.peek_id() {
        if !seen_horizontal && horizontal.contains(&id) {
            seen_horizontal = true;
        } else if !seen_vertical && vertical.contains(&id) {
            seen_vertical = true;
        } else {
            break;
        }
        let _ = stream.consume_including_whitespace();
        parts.push(CSSValue::ident(id));
    }
    if parts.len() == 1 {
        stream.restore(state);
        return None;
    }
    space_list(parts)
}

/// `[ <radial-shape> || <radial-size> ]? [ at <position> ]?`
fn consume_radial_preamble(stream: &mut TokenStream, ctx: &ParserContext) -> Option<ValueRef> {
    const EXTENTS: &[CSSValueID] = &[
        CSSValueID::ClosestSide,
        CSSValueID::ClosestCorner,
        CSSValueID::FarthestSide,
        CSSValueID::FarthestCorner,
    ];
    let mut parts = Vec::new();
    let mut shape = None;
    let mut size: Vec<ValueRef> = Vec::new();
    for _ in 0..2 {
        if shape.is_none()
            && let Some(id) = consume_ident_id(stream, &[CSSValueID::Circle, CSSValueID::Ellipse])
        {
            shape = Some(id);
            parts.push(CSSValue::ident(id));
            continue;
        }
        if size.is_empty() {
            if let Some(id) = consume_ident_id(stream, EXTENTS) {
                size.push(CSSValue::ident(id));
            } else if let Some(first) =
                consume_length_or_percent(stream, ctx, ValueRange::NonNegative, UnitlessQuirk::Forbid)
            {
                size.push(first);
                if let Some(second) = consume_length_or_percent(
                    stream,
                    ctx,
                    ValueRange::NonNegative,
                    UnitlessQuirk::Forbid,
                ) {
                    size.push(second);
                }
            }
            if !size.is_empty() {
                parts.extend(size.iter().cloned());
                continue;
            }
        }
        break;
    }
    if !radial_size_matches_shape(shape, &size) {
        return None;
    }
    if stream.peek_id() == Some(CSSValueID::At) {
        let _ = stream.consume_including_whitespace();
        let (x, y) = consume_position(stream, ctx, UnitlessQuirk::Forbid)?;
        parts.extend([CSSValue::ident(CSSValueID::At), x, y]);
    }
    space_list(parts)
}

/// "If `<radial-shape>` is `circle`, `<radial-size>` may be a single
/// `<length>`. If it is `ellipse`, it must be two `<length-percentage>`s."
/// Extent keywords fit either shape.
fn radial_size_matches_shape(shape: Option<CSSValueID>, size: &[ValueRef]) -> bool {
    if size.iter().all(|v| v.as_identifier().is_some()) {
        return true;
    }
    let is_length = |v: &ValueRef| numeric_of(v).is_some_and(|n| n.unit != UnitType::Percentage);
    match (shape, size) {
        (Some(CSSValueID::Circle) | None, [radius]) => is_length(radius),
        (Some(CSSValueID::Ellipse) | None, [_, _]) => true,
        _ => false,
    }
}

/// `[ from <angle> ]? [ at <position> ]?`
fn consume_conic_preamble(stream: &mut TokenStream, ctx: &ParserContext) -> Option<ValueRef> {
    let mut parts = Vec::new();
    if stream.peek_id() == Some(CSSValueID::From) {
        let _ = stream.consume_including_whitespace();
        parts.extend([CSSValue::ident(CSSValueID::From), consume_angle(stream, true)?]);
    }
    if stream.peek_id() == Some(CSSValueID::At) {
        let _ = stream.consume_including_whitespace();
        let (x, y) = consume_position(stream, ctx, UnitlessQuirk::Forbid)?;
        parts.extend([CSSValue::ident(CSSValueID::At), x, y]);
    }
    space_list(parts)
}

fn consume_stop_position(
    stream: &mut TokenStream,
    ctx: &ParserContext,
    kind: GradientKind,
) -> Option<ValueRef> {
    match kind {
        GradientKind::Conic => {
            consume_angle(stream, true).or_else(|| consume_percent(stream, ValueRange::All))
        }
        _ => consume_length_or_percent(stream, ctx, ValueRange::All, UnitlessQuirk::Forbid),
    }
}

/// [§ 3.5.1 Color Stop Lists](https://www.w3.org/TR/css-images-4/#color-stop-syntax)
///
/// `<color-stop-list> = <color-stop> , [ <color-hint>? , <color-stop> ]#`
fn consume_color_stops(
    stream: &mut TokenStream,
    ctx: &ParserContext,
    kind: GradientKind,
    args: &mut ValueList,
) -> Option<()> {
    let local = LocalContext::default().forbid_unitless();
    let mut stops = 0;
    let mut previous_was_hint = true;
    loop {
        if let Some(color) = consume_color(stream, ctx, &local) {
            let mut parts = vec![color];
            for _ in 0..2 {
                match consume_stop_position(stream, ctx, kind) {
                    Some(position) => parts.push(position),
                    None => break,
                }
            }
            args.append(space_list(parts)?);
            stops += 1;
            previous_was_hint = false;
        } else if !previous_was_hint
            && let Some(hint) = consume_stop_position(stream, ctx, kind)
        {
            args.append(hint);
            previous_was_hint = true;
        } else {
            return None;
        }
        if !consume_comma_including_whitespace(stream) {
            break;
        }
    }
    // "A gradient needs at least two color stops", and may not end on a hint.
    (stops >= 2 && !previous_was_hint).then_some(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::context::CSSParserMode;

    fn image_in(text: &str, mode: CSSParserMode) -> Option<String> {
        let mut stream = TokenStream::new(text);
        let value = consume_image(&mut stream, &ParserContext::new(mode))?;
        stream.at_end().then(|| value.css_text())
    }

    fn image(text: &str) -> Option<String> {
        image_in(text, CSSParserMode::Standard)
    }

    #[test]
    fn test_image_set_defaults_resolution() {
        assert_eq!(image("image-set(url(foo))").as_deref(), Some("image-set(url(\"foo\") 1x)"));
        assert_eq!(image("image-set('foo' 2x)").as_deref(), Some("image-set(url(\"foo\") 2x)"));
        assert_eq!(
            image("-webkit-image-set(url(a) 1x, url(b) 2x)").as_deref(),
            Some("image-set(url(\"a\") 1x, url(\"b\") 2x)")
        );
    }

    #[test]
    fn test_image_set_type() {
        assert_eq!(
            image("image-set(url(foo) type('image/png'))").as_deref(),
            Some("image-set(url(\"foo\") 1x type(\"image/png\"))")
        );
        assert_eq!(
            image("image-set(url(foo) type('image/png') 2x)").as_deref(),
            Some("image-set(url(\"foo\") 2x type(\"image/png\"))")
        );
    }

    #[test]
    fn test_image_set_rejects() {
        assert_eq!(image("image-set()"), None);
        assert_eq!(image("image-set(1x)"), None);
        assert_eq!(image("image-set(url(foo) -1x)"), None);
        assert_eq!(image("image-set(linear-gradient(red) 1x)"), None);
        assert_eq!(image("image-set(image-set(url(a)) 1x)"), None);
    }

    #[test]
    fn test_gradients() {
        assert_eq!(
            image("linear-gradient(to right, red, blue 25%)").as_deref(),
            Some("linear-gradient(to right, red, blue 25%)")
        );
        assert_eq!(
            image("radial-gradient(circle 10px at center, red, blue)").as_deref(),
            Some("radial-gradient(circle 10px at center center, red, blue)")
        );
        assert_eq!(
            image("repeating-conic-gradient(from 90deg, red, 10%, blue)").as_deref(),
            Some("repeating-conic-gradient(from 90deg, red, 10%, blue)")
        );
        assert_eq!(image("linear-gradient(red)"), None);
        assert_eq!(image("linear-gradient(red, 10%)"), None);
        assert_eq!(image("radial-gradient(ellipse 10px, red, blue)"), None);
    }

    #[test]
    fn test_light_dark_images_only_in_ua_sheet() {
        let text = "light-dark(url(light.png), url(dark.png))";
        assert_eq!(image(text), None);
        assert_eq!(
            image_in(text, CSSParserMode::UASheet).as_deref(),
            Some("light-dark(url(\"light.png\"), url(\"dark.png\"))")
        );
    }
}
