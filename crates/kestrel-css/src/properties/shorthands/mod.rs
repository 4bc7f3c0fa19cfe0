//! Shorthand expansion.
//!
//! [§ 4.2 Shorthand Properties](https://www.w3.org/TR/css-cascade-5/#shorthand)
//!
//! "Some properties are shorthand properties, meaning that they allow
//! authors to specify the values of several properties with a single
//! property. A shorthand property sets all of its longhand sub-properties,
//! exactly as if expanded in place."
//!
//! Every expander fills an [`Expansion`]: one slot per longhand of the
//! shorthand, in the order [`CSSPropertyID::longhands`] lists them. The
//! expansion is only written to the caller's output once every slot is
//! filled and the value text is used up, so a failed parse leaves the
//! output untouched.

mod background;
mod borders;
mod font;
mod layout;
mod transition;

use super::consumers::{at_end_or_important, consume_comma_including_whitespace};
use super::longhands::parse_longhand;
use super::{CSSPropertyID, PropertyValue};
use crate::parser::context::{LocalContext, ParserContext};
use crate::parser::stream::TokenStream;
use crate::values::{CSSValue, CSSValueID, ValueRef};

use CSSPropertyID as P;

/// The longhand values collected while expanding one shorthand.
#[derive(Debug)]
pub struct Expansion {
    shorthand: CSSPropertyID,
    important: bool,
    slots: Vec<Option<(ValueRef, bool)>>,
}

impl Expansion {
    /// An empty expansion of `shorthand`.
    #[must_use]
    pub fn new(shorthand: CSSPropertyID, important: bool) -> Self {
        Self {
            shorthand,
            important,
            slots: vec![None; shorthand.longhands().len()],
        }
    }

    fn slot(&mut self, id: CSSPropertyID) -> Option<&mut Option<(ValueRef, bool)>> {
        let index = self.shorthand.longhands().iter().position(|&l| l == id);
        debug_assert!(index.is_some(), "{id} is not a longhand of {}", self.shorthand);
        self.slots.get_mut(index?)
    }

    /// Set a longhand the value text mentioned.
    pub fn set(&mut self, id: CSSPropertyID, value: ValueRef) {
        if let Some(slot) = self.slot(id) {
            *slot = Some((value, false));
        }
    }

    /// Set a longhand to a value the text did not mention.
    pub fn set_implicit(&mut self, id: CSSPropertyID, value: ValueRef) {
        if let Some(slot) = self.slot(id) {
            *slot = Some((value, true));
        }
    }

    /// Set every longhand of `ids` to the same value.
    pub fn set_all(&mut self, ids: &[CSSPropertyID], value: &ValueRef) {
        for &id in ids {
            self.set(id, value.clone());
        }
    }

    /// Returns true once every longhand has a value.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Append the longhands to `out` in table order. Nothing is appended
    /// unless every longhand has a value.
    pub fn emit(self, out: &mut Vec<PropertyValue>) -> bool {
        if !self.is_complete() {
            return false;
        }
        let shorthand = self.shorthand;
        let important = self.important;
        out.extend(
            shorthand
                .longhands()
                .iter()
                .zip(self.slots)
                .filter_map(|(&id, slot)| {
                    let (value, implicit) = slot?;
                    Some(PropertyValue {
                        id,
                        shorthand: Some(shorthand),
                        value,
                        important,
                        implicit,
                    })
                }),
        );
        true
    }
}

/// Expand shorthand `id` from `stream` into `out`.
///
/// On success exactly `id.longhands().len()` entries are appended and the
/// stream is at its end or at `!important`. On failure `out` is unchanged.
pub fn parse_shorthand(
    id: CSSPropertyID,
    important: bool,
    stream: &mut TokenStream,
    ctx: &ParserContext,
    local: &LocalContext,
    out: &mut Vec<PropertyValue>,
) -> bool {
    if !id.is_shorthand() {
        return false;
    }
    let local = local.within(id);
    let mut expansion = Expansion::new(id, important);
    let parsed = expand(id, &mut expansion, stream, ctx, &local).is_some();

    if !parsed || !at_end_or_important(stream) {
        #[cfg(feature = "parse-trace")]
        eprintln!("[PARSE] shorthand {id} rejected at {:?}", stream.peek());
        return false;
    }

    let before = out.len();
    if !expansion.emit(out) {
        return false;
    }
    debug_assert_eq!(out.len() - before, id.longhands().len());

    #[cfg(feature = "parse-trace")]
    eprintln!("[PARSE] shorthand {id} -> {} longhands", out.len() - before);
    true
}

fn expand(
    id: CSSPropertyID,
    out: &mut Expansion,
    stream: &mut TokenStream,
    ctx: &ParserContext,
    local: &LocalContext,
) -> Option<()> {
    match id {
        P::Margin
        | P::Padding
        | P::Inset
        | P::BorderColor
        | P::BorderStyle
        | P::BorderWidth => expand_via_4_longhands(id, out, stream, ctx, local),
        P::MarginBlock
        | P::MarginInline
        | P::PaddingBlock
        | P::PaddingInline
        | P::InsetBlock
        | P::InsetInline
        | P::BorderBlockColor
        | P::BorderBlockStyle
        | P::BorderBlockWidth
        | P::BorderInlineColor
        | P::BorderInlineStyle
        | P::BorderInlineWidth
        | P::Overflow
        | P::Gap => expand_via_2_longhands(id, out, stream, ctx, local),
        P::BorderTop
        | P::BorderRight
        | P::BorderBottom
        | P::BorderLeft
        | P::BorderBlockStart
        | P::BorderBlockEnd
        | P::BorderInlineStart
        | P::BorderInlineEnd
        | P::Outline
        | P::TextDecoration => expand_greedily(id, out, stream, ctx, local, &[]),
        P::FlexFlow => expand_greedily(
            id,
            out,
            stream,
            ctx,
            local,
            &[CSSValueID::Row, CSSValueID::Nowrap],
        ),
        P::WhiteSpace => expand_white_space(out, stream, ctx, local),

        P::Border | P::BorderBlock | P::BorderInline => {
            borders::expand_border(id, out, stream, ctx, local)
        }
        P::BorderRadius => borders::expand_border_radius(out, stream, ctx, local),
        P::BorderImage => borders::expand_border_image(out, stream, ctx),

        P::Background => background::expand_background(out, stream, ctx, local),
        P::BackgroundPosition => background::expand_background_position(out, stream, ctx),

        P::Flex => layout::expand_flex(out, stream, ctx),
        P::PlaceContent | P::PlaceItems | P::PlaceSelf => {
            layout::expand_place(id, out, stream, ctx, local)
        }
        P::GridTemplate => layout::expand_grid_template(out, stream, ctx),
        P::Grid => layout::expand_grid(out, stream, ctx),
        P::GridRow | P::GridColumn => layout::expand_grid_line_pair(id, out, stream),
        P::GridArea => layout::expand_grid_area(out, stream),

        P::Font => font::expand_font(out, stream, ctx),
        P::FontVariant => font::expand_font_variant(out, stream),

        P::Transition => transition::expand_transition(out, stream),
        _ => None,
    }
}

/// `<value>{1,2}`: the second longhand defaults to the first.
fn expand_via_2_longhands(
    id: CSSPropertyID,
    out: &mut Expansion,
    stream: &mut TokenStream,
    ctx: &ParserContext,
    local: &LocalContext,
) -> Option<()> {
    let &[first_id, second_id] = id.longhands() else {
        return None;
    };
    let first = parse_longhand(first_id, stream, ctx, local)?;
    let second =
        parse_longhand(second_id, stream, ctx, local).unwrap_or_else(|| first.clone());
    out.set(first_id, first);
    out.set(second_id, second);
    Some(())
}

/// [§ 4.2 Shorthand Properties](https://www.w3.org/TR/css-cascade-5/#shorthand)
///
/// `<value>{1,4}` in top, right, bottom, left order. "If there is only one
/// component value, it applies to all sides. If there are two values, the
/// top and bottom are set to the first value and the right and left are set
/// to the second. If there are three values, the top is set to the first
/// value, the left and right are set to the second, and the bottom is set
/// to the third."
fn expand_via_4_longhands(
    id: CSSPropertyID,
    out: &mut Expansion,
    stream: &mut TokenStream,
    ctx: &ParserContext,
    local: &LocalContext,
) -> Option<()> {
    let &[top_id, right_id, bottom_id, left_id] = id.longhands() else {
        return None;
    };
    // STEP 1: Read up to four values; each later side needs the earlier ones.
    let top = parse_longhand(top_id, stream, ctx, local)?;
    let right = parse_longhand(right_id, stream, ctx, local);
    let bottom = right
        .as_ref()
        .and_then(|_| parse_longhand(bottom_id, stream, ctx, local));
    let left = bottom
        .as_ref()
        .and_then(|_| parse_longhand(left_id, stream, ctx, local));

    // STEP 2: Fill the missing sides.
    let right = right.unwrap_or_else(|| top.clone());
    let bottom = bottom.unwrap_or_else(|| top.clone());
    let left = left.unwrap_or_else(|| right.clone());

    out.set(top_id, top);
    out.set(right_id, right);
    out.set(bottom_id, bottom);
    out.set(left_id, left);
    Some(())
}

/// The longhands in any order, each at most once. Longhands the text does
/// not mention get `initial`, or the keyword from `initial_keywords` at the
/// same position when one is given.
fn expand_greedily(
    id: CSSPropertyID,
    out: &mut Expansion,
    stream: &mut TokenStream,
    ctx: &ParserContext,
    local: &LocalContext,
    initial_keywords: &[CSSValueID],
) -> Option<()> {
    let longhands = id.longhands();
    let mut values: Vec<Option<ValueRef>> = vec![None; longhands.len()];
    loop {
        let found = longhands.iter().zip(values.iter_mut()).any(|(&longhand, slot)| {
            if slot.is_some() {
                return false;
            }
            *slot = parse_longhand(longhand, stream, ctx, local);
            slot.is_some()
        });
        if !found || stream.at_end() {
            break;
        }
    }
    if values.iter().all(Option::is_none) {
        return None;
    }
    for (index, (&longhand, value)) in longhands.iter().zip(values).enumerate() {
        let value = value.unwrap_or_else(|| {
            initial_keywords
                .get(index)
                .map_or_else(CSSValue::initial, |&keyword| CSSValue::ident(keyword))
        });
        out.set(longhand, value);
    }
    Some(())
}

/// [§ 3 White Space Processing](https://www.w3.org/TR/css-text-4/#white-space-property)
///
/// `normal | pre | pre-wrap | pre-line | nowrap | break-spaces |
///  <'white-space-collapse'> || <'text-wrap'>`. A predefined keyword is
/// only taken as such when nothing but `!important` follows it.
fn expand_white_space(
    out: &mut Expansion,
    stream: &mut TokenStream,
    ctx: &ParserContext,
    local: &LocalContext,
) -> Option<()> {
    use CSSValueID as V;

    let start = stream.save();
    if let Some(keyword) = stream.peek_id() {
        let expanded = match keyword {
            V::Normal => Some((V::Collapse, V::Wrap)),
            V::Pre => Some((V::Preserve, V::Nowrap)),
            V::PreWrap => Some((V::Preserve, V::Wrap)),
            V::PreLine => Some((V::PreserveBreaks, V::Wrap)),
            V::Nowrap => Some((V::Collapse, V::Nowrap)),
            V::BreakSpaces => Some((V::BreakSpaces, V::Wrap)),
            _ => None,
        };
        if let Some((collapse, wrap)) = expanded {
            let _ = stream.consume_including_whitespace();
            if at_end_or_important(stream) {
                out.set(P::WhiteSpaceCollapse, CSSValue::ident(collapse));
                out.set(P::TextWrap, CSSValue::ident(wrap));
                return Some(());
            }
            stream.restore(start);
        }
    }
    expand_greedily(P::WhiteSpace, out, stream, ctx, local, &[])
}

/// Skip an optional comma between components, as `border` allows.
fn skip_optional_comma(stream: &mut TokenStream) {
    let _ = consume_comma_including_whitespace(stream);
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    fn expand_text(id: CSSPropertyID, text: &str) -> Option<Vec<(String, String)>> {
        let mut stream = TokenStream::new(text);
        let mut out = Vec::new();
        let ok = parse_shorthand(
            id,
            false,
            &mut stream,
            &ParserContext::default(),
            &LocalContext::default(),
            &mut out,
        );
        assert_eq!(ok, !out.is_empty());
        ok.then(|| {
            out.iter()
                .map(|entry| (entry.id.name().to_string(), entry.value.css_text()))
                .collect()
        })
    }

    #[test]
    fn test_four_value_rule() {
        let margins = expand_text(P::Margin, "1px 2px 3px").unwrap();
        let values: Vec<_> = margins.iter().map(|(_, v)| v.as_str()).collect();
        assert_eq!(values, ["1px", "2px", "3px", "2px"]);
        assert!(expand_text(P::Margin, "1px 2px 3px 4px 5px").is_none());
    }

    #[test]
    fn test_greedy_fills_initial() {
        let outline = expand_text(P::Outline, "dashed").unwrap();
        assert_eq!(
            outline,
            [
                ("outline-color".to_string(), "initial".to_string()),
                ("outline-style".to_string(), "dashed".to_string()),
                ("outline-width".to_string(), "initial".to_string()),
            ]
        );
        let flow = expand_text(P::FlexFlow, "wrap").unwrap();
        assert_eq!(flow[0].1, "row");
        assert_eq!(flow[1].1, "wrap");
    }

    #[test]
    fn test_white_space_keywords() {
        let pre_line = expand_text(P::WhiteSpace, "pre-line").unwrap();
        assert_eq!(pre_line[0].1, "preserve-breaks");
        assert_eq!(pre_line[1].1, "wrap");
        let longhands = expand_text(P::WhiteSpace, "nowrap preserve").unwrap();
        assert_eq!(longhands[0].1, "preserve");
        assert_eq!(longhands[1].1, "nowrap");
    }

    #[test]
    fn test_longhands_are_rejected() {
        assert!(expand_text(P::Width, "10px").is_none());
    }

    #[test]
    fn test_failures_leave_no_entries() {
        for id in CSSPropertyID::iter().filter(|id| id.is_shorthand()) {
            assert!(expand_text(id, "10px 10px 10px 10px 10px bogus").is_none(), "{id}");
        }
    }
}
