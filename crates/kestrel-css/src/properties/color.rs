//! `<color>` parsing.
//!
//! [CSS Color Module Level 4](https://www.w3.org/TR/css-color-4/)

use super::consumers::{
    ValueRange, consume_angle, consume_comma_including_whitespace, consume_number,
    consume_percent, consume_slash_including_whitespace,
};
use crate::parser::context::{LocalContext, ParserContext, UnitlessQuirk};
use crate::parser::stream::{RestoringBlockGuard, TokenStream};
use crate::tokenizer::{CSSToken, NumericType};
use crate::values::color::hsl_to_rgb;
use crate::values::{CSSValue, CSSValueID, Color, NumericLiteral, ValueRef};

/// The literal behind a numeric value, folding resolved `calc()`.
#[must_use]
pub fn numeric_of(value: &CSSValue) -> Option<NumericLiteral> {
    match value {
        CSSValue::Numeric(n) => Some(*n),
        CSSValue::Math(m) => m.resolved(),
        _ => None,
    }
}

/// [§ 4.1 The `<color>` syntax](https://www.w3.org/TR/css-color-4/#color-syntax)
///
/// `<hex-color> | <named-color> | currentcolor | transparent | rgb() |
///  rgba() | hsl() | hsla() | light-dark()`
pub fn consume_color(
    stream: &mut TokenStream,
    ctx: &ParserContext,
    local: &LocalContext,
) -> Option<ValueRef> {
    let value = match stream.peek() {
        CSSToken::Ident(name) => {
            if name.eq_ignore_ascii_case("currentcolor") {
                Some(CSSValue::ident(CSSValueID::Currentcolor))
            } else if let Some((keyword, _)) = Color::from_named(name) {
                Some(CSSValue::ColorKeyword(keyword).into_ref())
            } else {
                None
            }
        }
        CSSToken::Hash { value, .. } => Color::from_hex(value).map(|c| CSSValue::Color(c).into_ref()),
        CSSToken::Function(name) => {
            let name = name.to_ascii_lowercase();
            return consume_color_function(stream, &name, ctx, local);
        }
        _ => None,
    };
    match value {
        Some(value) => {
            let _ = stream.consume_including_whitespace();
            Some(value)
        }
        None => consume_hashless_hex(stream, ctx, local),
    }
}

fn consume_color_function(
    stream: &mut TokenStream,
    name: &str,
    ctx: &ParserContext,
    local: &LocalContext,
) -> Option<ValueRef> {
    let value = {
        let mut guard = RestoringBlockGuard::new(stream)?;
        guard.consume_whitespace();
        let value = match name {
            "rgb" | "rgba" => consume_rgb(&mut guard).map(|c| CSSValue::Color(c).into_ref()),
            "hsl" | "hsla" => consume_hsl(&mut guard).map(|c| CSSValue::Color(c).into_ref()),
            "light-dark" => consume_light_dark(&mut guard, |s| consume_color(s, ctx, local)),
            _ => None,
        }?;
        guard.release().then_some(value)?
    };
    stream.consume_whitespace();
    Some(value)
}

/// `light-dark(<item>, <item>)` contents; the guard has already entered
/// the function.
pub fn consume_light_dark<F>(stream: &mut TokenStream, mut item: F) -> Option<ValueRef>
where
    F: FnMut(&mut TokenStream) -> Option<ValueRef>,
{
    let light = item(stream)?;
    if !consume_comma_including_whitespace(stream) {
        return None;
    }
    let dark = item(stream)?;
    Some(CSSValue::LightDark(light, dark).into_ref())
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_channel(value: f64) -> u8 {
    value.clamp(0.0, 255.0).round() as u8
}

/// A color channel as written: a number in `[0, 255]` or a percentage.
fn consume_rgb_channel(stream: &mut TokenStream, want_percent: Option<bool>) -> Option<(f64, bool)> {
    if want_percent != Some(true)
        && let Some(n) = consume_number(stream, ValueRange::All).and_then(|v| numeric_of(&v))
    {
        return Some((n.value, false));
    }
    if want_percent != Some(false)
        && let Some(p) = consume_percent(stream, ValueRange::All).and_then(|v| numeric_of(&v))
    {
        return Some((p.value / 100.0 * 255.0, true));
    }
    None
}

/// `<alpha-value> = <number> | <percentage>`
fn consume_alpha(stream: &mut TokenStream) -> Option<u8> {
    if let Some(n) = consume_number(stream, ValueRange::All).and_then(|v| numeric_of(&v)) {
        return Some(to_channel(n.value.clamp(0.0, 1.0) * 255.0));
    }
    let p = consume_percent(stream, ValueRange::All).and_then(|v| numeric_of(&v))?;
    Some(to_channel(p.value.clamp(0.0, 100.0) / 100.0 * 255.0))
}

/// [§ 5.1 The RGB functions](https://www.w3.org/TR/css-color-4/#rgb-functions)
///
/// Legacy syntax: `rgb(<percentage>#{3}, <alpha-value>?)` or
/// `rgb(<number>#{3}, <alpha-value>?)`. Modern syntax: space-separated
/// channels, `none` allowed, optional `/ <alpha-value>`.
fn consume_rgb(stream: &mut TokenStream) -> Option<Color> {
    let none = |s: &mut TokenStream| {
        (s.peek_id() == Some(CSSValueID::None)).then(|| {
            let _ = s.consume_including_whitespace();
            0.0
        })
    };

    let (first, first_percent) = match none(stream) {
        Some(zero) => (zero, None),
        None => {
            let (value, percent) = consume_rgb_channel(stream, None)?;
            (value, Some(percent))
        }
    };

    let legacy = first_percent.is_some() && matches!(stream.peek(), CSSToken::Comma);
    let mut channels = [first, 0.0, 0.0];
    let mut alpha = 255;
    if legacy {
        for channel in &mut channels[1..] {
            if !consume_comma_including_whitespace(stream) {
                return None;
            }
            *channel = consume_rgb_channel(stream, first_percent)?.0;
        }
        if consume_comma_including_whitespace(stream) {
            alpha = consume_alpha(stream)?;
        }
    } else {
        for channel in &mut channels[1..] {
            *channel = match none(stream) {
                Some(zero) => zero,
                None => consume_rgb_channel(stream, None)?.0,
            };
        }
        if consume_slash_including_whitespace(stream) {
            alpha = match none(stream) {
                Some(_) => 0,
                None => consume_alpha(stream)?,
            };
        }
    }
    let [r, g, b] = channels.map(to_channel);
    Some(Color::rgba(r, g, b, alpha))
}

/// [§ 7.1 The HSL functions](https://www.w3.org/TR/css-color-4/#the-hsl-notation)
fn consume_hsl(stream: &mut TokenStream) -> Option<Color> {
    let hue = if let Some(n) = consume_number(stream, ValueRange::All).and_then(|v| numeric_of(&v)) {
        n.value
    } else {
        let angle = consume_angle(stream, false).and_then(|v| numeric_of(&v))?;
        let factor = angle.unit.canonical_factor().unwrap_or(1.0);
        angle.value * factor
    };

    let legacy = consume_comma_including_whitespace(stream);
    let mut percents = [0.0; 2];
    for (i, slot) in percents.iter_mut().enumerate() {
        if legacy && i > 0 && !consume_comma_including_whitespace(stream) {
            return None;
        }
        let value = consume_percent(stream, ValueRange::All).and_then(|v| numeric_of(&v));
        *slot = match value {
            Some(p) => p.value,
            None if !legacy => consume_number(stream, ValueRange::All)
                .and_then(|v| numeric_of(&v))?
                .value,
            None => return None,
        };
    }
    let alpha = if (legacy && consume_comma_including_whitespace(stream))
        || (!legacy && consume_slash_including_whitespace(stream))
    {
        consume_alpha(stream)?
    } else {
        255
    };
    let (r, g, b) = hsl_to_rgb(hue, percents[0] / 100.0, percents[1] / 100.0);
    Some(Color::rgba(r, g, b, alpha))
}

/// [Quirks § 3.5 The hashless hex color quirk](https://quirks.spec.whatwg.org/#the-hashless-hex-color-quirk)
///
/// In quirks mode a color may be written without its `#` as an ident,
/// number or dimension whose text is three or six hex digits.
fn consume_hashless_hex(
    stream: &mut TokenStream,
    ctx: &ParserContext,
    local: &LocalContext,
) -> Option<ValueRef> {
    if !ctx.is_quirks() || local.unitless_quirk == UnitlessQuirk::Forbid {
        return None;
    }
    let text = match stream.peek() {
        CSSToken::Ident(name) => name.clone(),
        CSSToken::Number {
            int_value: Some(n),
            numeric_type: NumericType::Integer,
            ..
        } if (0..1_000_000).contains(n) => format!("{n:06}"),
        CSSToken::Dimension {
            int_value: Some(n),
            numeric_type: NumericType::Integer,
            unit,
            ..
        } if (0..1_000_000).contains(n) => {
            let text = format!("{n}{unit}");
            format!("{text:0>6}")
        }
        _ => return None,
    };
    if !matches!(text.len(), 3 | 6) {
        return None;
    }
    let color = Color::from_hex(&text)?;
    let _ = stream.consume_including_whitespace();
    Some(CSSValue::Color(color).into_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::context::CSSParserMode;

    fn color(text: &str, mode: CSSParserMode) -> Option<String> {
        let mut stream = TokenStream::new(text);
        let ctx = ParserContext::new(mode);
        let value = consume_color(&mut stream, &ctx, &LocalContext::default())?;
        stream.at_end().then(|| value.css_text())
    }

    #[test]
    fn test_rgb_forms() {
        let standard = CSSParserMode::Standard;
        assert_eq!(color("rgb(1, 2, 3)", standard).as_deref(), Some("rgb(1, 2, 3)"));
        assert_eq!(color("rgb(1 2 3 / 50%)", standard).as_deref(), Some("rgba(1, 2, 3, 0.5)"));
        assert_eq!(color("rgba(100%, 0%, 0%, 0.2)", standard).as_deref(), Some("rgba(255, 0, 0, 0.2)"));
        assert_eq!(color("rgb(1, 2 3)", standard), None);
        assert_eq!(color("rgb(10%, 2, 3)", standard), None);
    }

    #[test]
    fn test_hsl() {
        let standard = CSSParserMode::Standard;
        assert_eq!(color("hsl(120, 100%, 50%)", standard).as_deref(), Some("rgb(0, 255, 0)"));
        assert_eq!(color("hsl(0.5turn 100% 50%)", standard).as_deref(), Some("rgb(0, 255, 255)"));
    }

    #[test]
    fn test_hashless_quirk() {
        assert_eq!(color("ff0000", CSSParserMode::Standard), None);
        assert_eq!(color("ff0000", CSSParserMode::Quirks).as_deref(), Some("rgb(255, 0, 0)"));
        assert_eq!(color("00ff00", CSSParserMode::Quirks).as_deref(), Some("rgb(0, 255, 0)"));
        assert_eq!(color("123", CSSParserMode::Quirks).as_deref(), Some("rgb(0, 1, 35)"));
    }
}
