//! `background` and `background-position`.

use super::Expansion;
use crate::parser::context::{LocalContext, ParserContext, UnitlessQuirk};
use crate::parser::stream::TokenStream;
use crate::properties::CSSPropertyID;
use crate::properties::backgrounds::{
    consume_attachment, consume_background_box, consume_background_clip, consume_background_size,
    consume_repeat_style,
};
use crate::properties::color::consume_color;
use crate::properties::consumers::{
    consume_comma_including_whitespace, consume_position, consume_slash_including_whitespace,
};
use crate::properties::image::consume_image_or_none;
use crate::tokenizer::CSSToken;
use crate::values::{CSSValue, Separator, ValueList, ValueRef};

use CSSPropertyID as P;

/// Join per-layer values: a single layer stays a single value.
fn join_layers(values: Vec<ValueRef>) -> ValueRef {
    if values.len() == 1
        && let Some(value) = values.first()
    {
        return value.clone();
    }
    ValueList::from_values(Separator::Comma, values).into_value()
}

/// One `<bg-layer>` or `<final-bg-layer>`: each component at most once, in
/// any order, with `<bg-size>` only directly after `<bg-position> /`.
///
/// Slots follow the `background` longhand table.
fn consume_layer(
    stream: &mut TokenStream,
    ctx: &ParserContext,
    local: &LocalContext,
    longhands: &[CSSPropertyID],
) -> Option<Vec<Option<ValueRef>>> {
    let mut slots: Vec<Option<ValueRef>> = vec![None; longhands.len()];
    let index_of = |id| longhands.iter().position(|&l| l == id);
    let y_index = index_of(P::BackgroundPositionY)?;
    let mut position_parsed = false;

    loop {
        let mut found = false;
        for (index, &longhand) in longhands.iter().enumerate() {
            if slots[index].is_some() {
                continue;
            }
            let value = match longhand {
                P::BackgroundImage => consume_image_or_none(stream, ctx),
                P::BackgroundPositionX => {
                    let Some((x, y)) = consume_position(stream, ctx, UnitlessQuirk::Forbid) else {
                        continue;
                    };
                    slots[y_index] = Some(y);
                    position_parsed = true;
                    Some(x)
                }
                P::BackgroundPositionY => continue,
                P::BackgroundSize => {
                    if !consume_slash_including_whitespace(stream) {
                        continue;
                    }
                    let size = consume_background_size(stream, ctx);
                    if size.is_none() || !position_parsed {
                        return None;
                    }
                    size
                }
                P::BackgroundRepeat => consume_repeat_style(stream),
                P::BackgroundAttachment => consume_attachment(stream),
                P::BackgroundOrigin => consume_background_box(stream),
                P::BackgroundClip => consume_background_clip(stream),
                P::BackgroundColor => consume_color(stream, ctx, &local.forbid_unitless()),
                _ => None,
            };
            if let Some(value) = value {
                slots[index] = Some(value);
                found = true;
            }
        }
        if !found || stream.at_end() || matches!(stream.peek(), CSSToken::Comma) {
            break;
        }
    }
    slots.iter().any(Option::is_some).then_some(slots)
}

/// [§ 3.10 Backgrounds Shorthand](https://www.w3.org/TR/css-backgrounds-3/#background)
///
/// `<bg-layer>#? , <final-bg-layer>`. Only the final layer may carry a
/// color. A layer without a `background-clip` clips to its origin.
pub(super) fn expand_background(
    out: &mut Expansion,
    stream: &mut TokenStream,
    ctx: &ParserContext,
    local: &LocalContext,
) -> Option<()> {
    let longhands = P::Background.longhands();
    let index_of = |id| longhands.iter().position(|&l| l == id);
    let (origin, clip, color) = (
        index_of(P::BackgroundOrigin)?,
        index_of(P::BackgroundClip)?,
        index_of(P::BackgroundColor)?,
    );

    let mut layers: Vec<Vec<ValueRef>> = vec![Vec::new(); longhands.len()];
    let mut previous_layer_had_color = false;
    loop {
        // STEP 1: Parse one layer.
        let mut slots = consume_layer(stream, ctx, local, longhands)?;
        if previous_layer_had_color {
            return None;
        }
        previous_layer_had_color = slots[color].is_some();

        // STEP 2: Fill what the layer left out.
        if slots[clip].is_none() {
            slots[clip] = slots[origin].clone();
        }
        for (values, slot) in layers.iter_mut().zip(slots) {
            values.push(slot.unwrap_or_else(CSSValue::initial));
        }

        if !consume_comma_including_whitespace(stream) {
            break;
        }
    }

    // STEP 3: The color comes from the final layer alone.
    for (index, (&longhand, values)) in longhands.iter().zip(layers).enumerate() {
        let value = if index == color {
            values.last().cloned()?
        } else {
            join_layers(values)
        };
        out.set(longhand, value);
    }
    Some(())
}

/// [§ 3.6 background-position](https://www.w3.org/TR/css-backgrounds-3/#background-position)
///
/// `<bg-position>#`, split into `background-position-x` and `-y`.
pub(super) fn expand_background_position(
    out: &mut Expansion,
    stream: &mut TokenStream,
    ctx: &ParserContext,
) -> Option<()> {
    let mut xs = Vec::new();
    let mut ys = Vec::new();
    loop {
        let (x, y) = consume_position(stream, ctx, UnitlessQuirk::Allow)?;
        xs.push(x);
        ys.push(y);
        if !consume_comma_including_whitespace(stream) {
            break;
        }
    }
    out.set(P::BackgroundPositionX, join_layers(xs));
    out.set(P::BackgroundPositionY, join_layers(ys));
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

    fn value_of(entries: &[PropertyValue], id: CSSPropertyID) -> String {
        entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.value.css_text())
            .unwrap_or_default()
    }

    #[test]
    fn test_background_single_layer() {
        let entries = expand(P::Background, "red").unwrap();
        assert_eq!(entries.len(), 9);
        assert_eq!(value_of(&entries, P::BackgroundColor), "red");
        assert_eq!(value_of(&entries, P::BackgroundImage), "initial");
        assert_eq!(value_of(&entries, P::BackgroundClip), "initial");
    }

    #[test]
    fn test_background_position_and_size() {
        let entries = expand(P::Background, "left top / contain no-repeat").unwrap();
        assert_eq!(value_of(&entries, P::BackgroundPositionX), "left");
        assert_eq!(value_of(&entries, P::BackgroundPositionY), "top");
        assert_eq!(value_of(&entries, P::BackgroundSize), "contain");
        assert_eq!(value_of(&entries, P::BackgroundRepeat), "no-repeat");
        assert!(expand(P::Background, "/ contain").is_none());
    }

    #[test]
    fn test_background_layers() {
        let entries = expand(P::Background, "none, padding-box blue").unwrap();
        assert_eq!(value_of(&entries, P::BackgroundImage), "none, initial");
        assert_eq!(value_of(&entries, P::BackgroundOrigin), "initial, padding-box");
        assert_eq!(value_of(&entries, P::BackgroundClip), "initial, padding-box");
        assert_eq!(value_of(&entries, P::BackgroundColor), "blue");
        assert!(expand(P::Background, "red, none").is_none());
        assert!(expand(P::Background, "none,").is_none());
    }

    #[test]
    fn test_background_position_shorthand() {
        let entries = expand(P::BackgroundPosition, "50% 6px").unwrap();
        assert_eq!(value_of(&entries, P::BackgroundPositionX), "50%");
        assert_eq!(value_of(&entries, P::BackgroundPositionY), "6px");
        let entries = expand(P::BackgroundPosition, "left, right 10px bottom 20px").unwrap();
        assert_eq!(value_of(&entries, P::BackgroundPositionX), "left, right 10px");
        assert_eq!(value_of(&entries, P::BackgroundPositionY), "center, bottom 20px");
    }
}
