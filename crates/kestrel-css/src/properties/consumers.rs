//! Component-value consumers shared by the property grammars.
//!
//! [§ 2 Value Definition Syntax](https://www.w3.org/TR/css-values-4/#value-defs)
//!
//! Each consumer reads one component value at the cursor and either
//! returns it and advances past any following whitespace, or returns
//! `None` without moving the stream.

use crate::parser::context::{ParserContext, UnitlessQuirk};
use crate::parser::stream::{RestoringBlockGuard, TokenStream};
use crate::tokenizer::{CSSToken, NumericType};
use crate::values::math::{CalcCategory, consume_math_function, is_math_function};
use crate::values::{
    CSSValue, CSSValueID, CSSWideKeyword, NumericLiteral, Separator, UnitCategory, UnitType,
    UrlValue, ValueList, ValueRef,
};

/// Which signs a numeric grammar accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueRange {
    /// Any value.
    All,
    /// "`[0,∞]`"
    NonNegative,
}

impl ValueRange {
    fn accepts(self, value: f64) -> bool {
        self == Self::All || value >= 0.0
    }
}

// ----------------------------------------------------------------------------
// Keywords and identifiers
// ----------------------------------------------------------------------------

/// Consume any known keyword.
pub fn consume_ident(stream: &mut TokenStream) -> Option<ValueRef> {
    let id = stream.peek_id()?;
    let _ = stream.consume_including_whitespace();
    Some(CSSValue::ident(id))
}

/// Consume a keyword from `allowed`, returning its id.
pub fn consume_ident_id(stream: &mut TokenStream, allowed: &[CSSValueID]) -> Option<CSSValueID> {
    let id = stream.peek_id().filter(|id| allowed.contains(id))?;
    let _ = stream.consume_including_whitespace();
    Some(id)
}

/// Consume a keyword from `allowed`.
pub fn consume_ident_in(stream: &mut TokenStream, allowed: &[CSSValueID]) -> Option<ValueRef> {
    consume_ident_id(stream, allowed).map(CSSValue::ident)
}

/// Returns true if the next token is one of the `allowed` keywords.
#[must_use]
pub fn peek_ident_in(stream: &TokenStream, allowed: &[CSSValueID]) -> bool {
    stream.peek_id().is_some_and(|id| allowed.contains(&id))
}

/// [§ 3.2 Author-defined Identifiers](https://www.w3.org/TR/css-values-4/#custom-idents)
///
/// "The CSS-wide keywords are not valid `<custom-ident>`s. The `default`
/// keyword is reserved and is also not a valid `<custom-ident>`." Keywords
/// in `excluded` are rejected as well.
pub fn consume_custom_ident(
    stream: &mut TokenStream,
    excluded: &[CSSValueID],
) -> Option<ValueRef> {
    let CSSToken::Ident(name) = stream.peek() else {
        return None;
    };
    if CSSWideKeyword::from_ident(name).is_some()
        || name.eq_ignore_ascii_case("default")
        || CSSValueID::from_ident(name).is_some_and(|id| excluded.contains(&id))
    {
        return None;
    }
    let value = CSSValue::CustomIdent(name.clone()).into_ref();
    let _ = stream.consume_including_whitespace();
    Some(value)
}

/// Consume a `<string>`.
pub fn consume_string(stream: &mut TokenStream) -> Option<ValueRef> {
    let CSSToken::String(text) = stream.peek() else {
        return None;
    };
    let value = CSSValue::String(text.clone()).into_ref();
    let _ = stream.consume_including_whitespace();
    Some(value)
}

/// The raw text of a `url()`: either an `<url-token>` or a `url(<string>)`
/// function.
pub fn consume_url_text(stream: &mut TokenStream) -> Option<String> {
    match stream.peek() {
        CSSToken::Url(text) => {
            let text = text.clone();
            let _ = stream.consume_including_whitespace();
            Some(text)
        }
        token if token.function_matches("url") => {
            let text = {
                let mut guard = RestoringBlockGuard::new(stream)?;
                guard.consume_whitespace();
                let CSSToken::String(text) = guard.consume_including_whitespace() else {
                    return None;
                };
                guard.release().then_some(text)?
            };
            stream.consume_whitespace();
            Some(text)
        }
        _ => None,
    }
}

/// [§ 4.5 Resource Locators](https://www.w3.org/TR/css-values-4/#urls)
pub fn consume_url(stream: &mut TokenStream, ctx: &ParserContext) -> Option<ValueRef> {
    let relative = consume_url_text(stream)?;
    Some(url_value(relative, ctx))
}

/// Wrap url text, resolving it against the context.
#[must_use]
pub fn url_value(relative: String, ctx: &ParserContext) -> ValueRef {
    let absolute = ctx.complete_url(&relative);
    CSSValue::Url(UrlValue { relative, absolute }).into_ref()
}

// ----------------------------------------------------------------------------
// Delimiters
// ----------------------------------------------------------------------------

/// Consume a `,` and the whitespace after it.
pub fn consume_comma_including_whitespace(stream: &mut TokenStream) -> bool {
    if matches!(stream.peek(), CSSToken::Comma) {
        let _ = stream.consume_including_whitespace();
        true
    } else {
        false
    }
}

/// Consume a `/` and the whitespace after it.
pub fn consume_slash_including_whitespace(stream: &mut TokenStream) -> bool {
    if stream.peek().is_delim('/') {
        let _ = stream.consume_including_whitespace();
        true
    } else {
        false
    }
}

/// Returns true at the end of the value or at a `!important` marker.
#[must_use]
pub fn at_end_or_important(stream: &TokenStream) -> bool {
    stream.at_end() || stream.peek().is_delim('!')
}

/// `<item>#`: one or more comma-separated items, always as a comma list.
pub fn consume_comma_list<F>(stream: &mut TokenStream, mut item: F) -> Option<ValueRef>
where
    F: FnMut(&mut TokenStream) -> Option<ValueRef>,
{
    let start = stream.save();
    let mut list = ValueList::comma();
    loop {
        let Some(value) = item(stream) else {
            stream.restore(start);
            return None;
        };
        list.append(value);
        if !consume_comma_including_whitespace(stream) {
            break;
        }
    }
    Some(list.into_value())
}

/// `<item>+`: one or more space-separated items. A single item is returned
/// unwrapped.
pub fn consume_space_list<F>(stream: &mut TokenStream, mut item: F) -> Option<ValueRef>
where
    F: FnMut(&mut TokenStream) -> Option<ValueRef>,
{
    let mut list = ValueList::space();
    while let Some(value) = item(stream) {
        list.append(value);
    }
    match list.len() {
        0 => None,
        1 => list.first().cloned(),
        _ => Some(list.into_value()),
    }
}

// ----------------------------------------------------------------------------
// Numbers and dimensions
// ----------------------------------------------------------------------------

fn consume_math_of(stream: &mut TokenStream, target: CalcCategory) -> Option<ValueRef> {
    if !is_math_function(stream.peek()) {
        return None;
    }
    let state = stream.save();
    match consume_math_function(stream) {
        Some(math) if math.category().fits(target) => {
            stream.consume_whitespace();
            Some(CSSValue::Math(math).into_ref())
        }
        _ => {
            stream.restore(state);
            None
        }
    }
}

fn consume_literal(stream: &mut TokenStream, literal: NumericLiteral) -> ValueRef {
    let _ = stream.consume_including_whitespace();
    CSSValue::numeric(literal)
}

/// `<integer>` no smaller than `minimum`.
#[allow(clippy::cast_precision_loss)]
pub fn consume_integer(stream: &mut TokenStream, minimum: i64) -> Option<ValueRef> {
    match stream.peek() {
        CSSToken::Number {
            value,
            numeric_type: NumericType::Integer,
            ..
        } if *value >= minimum as f64 => {
            let value = *value;
            Some(consume_literal(stream, NumericLiteral::integer(value)))
        }
        _ => consume_math_of(stream, CalcCategory::Number),
    }
}

/// `<integer [1,∞]>`
pub fn consume_positive_integer(stream: &mut TokenStream) -> Option<ValueRef> {
    consume_integer(stream, 1)
}

/// `<number>`
pub fn consume_number(stream: &mut TokenStream, range: ValueRange) -> Option<ValueRef> {
    match stream.peek() {
        CSSToken::Number { value, .. } if range.accepts(*value) => {
            let value = *value;
            Some(consume_literal(stream, NumericLiteral::number(value)))
        }
        _ => consume_math_of(stream, CalcCategory::Number),
    }
}

/// `<percentage>`
pub fn consume_percent(stream: &mut TokenStream, range: ValueRange) -> Option<ValueRef> {
    match stream.peek() {
        CSSToken::Percentage { value, .. } if range.accepts(*value) => {
            let value = *value;
            Some(consume_literal(stream, NumericLiteral::percentage(value)))
        }
        _ => consume_math_of(stream, CalcCategory::Percent),
    }
}

fn dimension_of(token: &CSSToken, category: UnitCategory) -> Option<NumericLiteral> {
    let CSSToken::Dimension { value, unit, .. } = token else {
        return None;
    };
    let unit = UnitType::from_unit_str(unit).filter(|u| u.category() == category)?;
    Some(NumericLiteral::new(*value, unit))
}

/// [§ 5 Distance Units](https://www.w3.org/TR/css-values-4/#lengths)
///
/// `<length>`. Unitless zero is always a length. Other unitless numbers
/// are accepted as `px` only in quirks mode when `quirk` allows it.
#[allow(clippy::float_cmp)]
pub fn consume_length(
    stream: &mut TokenStream,
    ctx: &ParserContext,
    range: ValueRange,
    quirk: UnitlessQuirk,
) -> Option<ValueRef> {
    let token = stream.peek();
    if let Some(literal) = dimension_of(token, UnitCategory::Length) {
        return range
            .accepts(literal.value)
            .then(|| consume_literal(stream, literal));
    }
    if let CSSToken::Number { value, .. } = token {
        let value = *value;
        let unitless_ok =
            value == 0.0 || (quirk == UnitlessQuirk::Allow && ctx.is_quirks());
        return (unitless_ok && range.accepts(value))
            .then(|| consume_literal(stream, NumericLiteral::px(value)));
    }
    consume_math_of(stream, CalcCategory::Length)
}

/// `<length-percentage>`
pub fn consume_length_or_percent(
    stream: &mut TokenStream,
    ctx: &ParserContext,
    range: ValueRange,
    quirk: UnitlessQuirk,
) -> Option<ValueRef> {
    if matches!(stream.peek(), CSSToken::Percentage { .. }) {
        return consume_percent(stream, range);
    }
    consume_length(stream, ctx, range, quirk)
        .or_else(|| consume_math_of(stream, CalcCategory::LengthPercent))
}

fn consume_dimension(
    stream: &mut TokenStream,
    category: UnitCategory,
    calc: CalcCategory,
    range: ValueRange,
) -> Option<ValueRef> {
    match dimension_of(stream.peek(), category) {
        Some(literal) if range.accepts(literal.value) => Some(consume_literal(stream, literal)),
        Some(_) => None,
        None => consume_math_of(stream, calc),
    }
}

/// `<angle>`. Unitless zero is accepted as `0deg` when `allow_zero` is set.
#[allow(clippy::float_cmp)]
pub fn consume_angle(stream: &mut TokenStream, allow_zero: bool) -> Option<ValueRef> {
    if allow_zero
        && matches!(stream.peek(), CSSToken::Number { value, .. } if *value == 0.0)
    {
        return Some(consume_literal(stream, NumericLiteral::new(0.0, UnitType::Deg)));
    }
    consume_dimension(stream, UnitCategory::Angle, CalcCategory::Angle, ValueRange::All)
}

/// `<time>`
pub fn consume_time(stream: &mut TokenStream, range: ValueRange) -> Option<ValueRef> {
    consume_dimension(stream, UnitCategory::Time, CalcCategory::Time, range)
}

/// `<resolution>`
pub fn consume_resolution(stream: &mut TokenStream, range: ValueRange) -> Option<ValueRef> {
    consume_dimension(stream, UnitCategory::Resolution, CalcCategory::Resolution, range)
}

/// `<flex>`: a non-negative `fr` dimension.
pub fn consume_flex(stream: &mut TokenStream) -> Option<ValueRef> {
    let literal = dimension_of(stream.peek(), UnitCategory::Flex)?;
    (literal.value >= 0.0).then(|| consume_literal(stream, literal))
}

/// `<number> | <percentage>`
pub fn consume_number_or_percent(stream: &mut TokenStream, range: ValueRange) -> Option<ValueRef> {
    consume_number(stream, range).or_else(|| consume_percent(stream, range))
}

// ----------------------------------------------------------------------------
// Position
// ----------------------------------------------------------------------------

/// One parsed `<position>` component.
#[derive(Debug, Clone)]
enum PositionPart {
    Keyword(CSSValueID),
    Offset(ValueRef),
}

const POSITION_KEYWORDS: &[CSSValueID] = &[
    CSSValueID::Left,
    CSSValueID::Right,
    CSSValueID::Top,
    CSSValueID::Bottom,
    CSSValueID::Center,
];

fn consume_position_part(
    stream: &mut TokenStream,
    ctx: &ParserContext,
    quirk: UnitlessQuirk,
) -> Option<PositionPart> {
    if let Some(id) = consume_ident_id(stream, POSITION_KEYWORDS) {
        return Some(PositionPart::Keyword(id));
    }
    consume_length_or_percent(stream, ctx, ValueRange::All, quirk).map(PositionPart::Offset)
}

const fn is_horizontal(id: CSSValueID) -> bool {
    matches!(id, CSSValueID::Left | CSSValueID::Right)
}

const fn is_vertical(id: CSSValueID) -> bool {
    matches!(id, CSSValueID::Top | CSSValueID::Bottom)
}

fn part_value(part: &PositionPart) -> ValueRef {
    match part {
        PositionPart::Keyword(id) => CSSValue::ident(*id),
        PositionPart::Offset(value) => value.clone(),
    }
}

fn resolve_one(part: &PositionPart) -> (ValueRef, ValueRef) {
    let center = || CSSValue::ident(CSSValueID::Center);
    match part {
        PositionPart::Keyword(id) if is_vertical(*id) => (center(), CSSValue::ident(*id)),
        other => (part_value(other), center()),
    }
}

fn resolve_two(first: &PositionPart, second: &PositionPart) -> Option<(ValueRef, ValueRef)> {
    use PositionPart::{Keyword, Offset};
    match (first, second) {
        (Keyword(a), Keyword(b)) => {
            if (is_horizontal(*a) && is_horizontal(*b)) || (is_vertical(*a) && is_vertical(*b)) {
                None
            } else if is_vertical(*a) || is_horizontal(*b) {
                Some((CSSValue::ident(*b), CSSValue::ident(*a)))
            } else {
                Some((CSSValue::ident(*a), CSSValue::ident(*b)))
            }
        }
        (Keyword(a), Offset(_)) if is_vertical(*a) => None,
        (Offset(_), Keyword(b)) if is_horizontal(*b) => None,
        _ => Some((part_value(first), part_value(second))),
    }
}

/// The three- and four-value forms: `[ left | right ] <lp>?` and
/// `[ top | bottom ] <lp>?` in either order, with `center` standing alone.
fn resolve_edges(parts: &[PositionPart]) -> Option<(ValueRef, ValueRef)> {
    let mut groups: Vec<(CSSValueID, Option<ValueRef>)> = Vec::new();
    let mut iter = parts.iter().peekable();
    while let Some(part) = iter.next() {
        let PositionPart::Keyword(id) = part else {
            return None;
        };
        let offset = match iter.peek() {
            Some(PositionPart::Offset(value)) => {
                let value = value.clone();
                let _ = iter.next();
                Some(value)
            }
            _ => None,
        };
        if *id == CSSValueID::Center && offset.is_some() {
            return None;
        }
        groups.push((*id, offset));
    }
    let [(a, a_offset), (b, b_offset)] = <[_; 2]>::try_from(groups).ok()?;
    let group_value = |id: CSSValueID, offset: Option<ValueRef>| match offset {
        Some(offset) => {
            ValueList::from_values(Separator::Space, [CSSValue::ident(id), offset]).into_value()
        }
        None => CSSValue::ident(id),
    };
    let a_vertical = is_vertical(a) || (a == CSSValueID::Center && is_horizontal(b));
    let b_vertical = is_vertical(b) || (b == CSSValueID::Center && is_horizontal(a));
    match (a_vertical, b_vertical) {
        (false, true) => Some((group_value(a, a_offset), group_value(b, b_offset))),
        (true, false) => Some((group_value(b, b_offset), group_value(a, a_offset))),
        _ => None,
    }
}

fn resolve_position(parts: &[PositionPart]) -> Option<(ValueRef, ValueRef)> {
    match parts {
        [one] => Some(resolve_one(one)),
        [first, second] => resolve_two(first, second),
        [_, _, _] | [_, _, _, _] => resolve_edges(parts),
        _ => None,
    }
}

/// [§ 4.4 2D Positioning](https://www.w3.org/TR/css-values-4/#position)
///
/// `<position>` split into its horizontal and vertical components. Tries
/// the longest form first and falls back to shorter ones, leaving
/// unconsumed whatever the chosen form did not use.
pub fn consume_position(
    stream: &mut TokenStream,
    ctx: &ParserContext,
    quirk: UnitlessQuirk,
) -> Option<(ValueRef, ValueRef)> {
    let mut parts = Vec::with_capacity(4);
    let mut states = Vec::with_capacity(4);
    while parts.len() < 4 {
        let Some(part) = consume_position_part(stream, ctx, quirk) else {
            break;
        };
        parts.push(part);
        states.push(stream.save());
    }
    while !parts.is_empty() {
        if let Some(resolved) = resolve_position(&parts) {
            if let Some(state) = states.last() {
                stream.restore(*state);
            }
            return Some(resolved);
        }
        let _ = parts.pop();
        let _ = states.pop();
    }
    None
}

/// `<position>` limited to the one- and two-value forms, as used by
/// `transform-origin` and gradient centers.
pub fn consume_one_or_two_value_position(
    stream: &mut TokenStream,
    ctx: &ParserContext,
) -> Option<(ValueRef, ValueRef)> {
    let first = consume_position_part(stream, ctx, UnitlessQuirk::Forbid)?;
    let state = stream.save();
    if let Some(second) = consume_position_part(stream, ctx, UnitlessQuirk::Forbid) {
        if let Some(resolved) = resolve_two(&first, &second) {
            return Some(resolved);
        }
        stream.restore(state);
    }
    Some(resolve_one(&first))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(text: &str) -> Option<(String, String)> {
        let mut stream = TokenStream::new(text);
        let (x, y) = consume_position(&mut stream, &ParserContext::default(), UnitlessQuirk::Forbid)?;
        stream.at_end().then(|| (x.css_text(), y.css_text()))
    }

    #[test]
    fn test_position_forms() {
        assert_eq!(position("50% 6px"), Some(("50%".into(), "6px".into())));
        assert_eq!(position("top"), Some(("center".into(), "top".into())));
        assert_eq!(position("bottom left"), Some(("left".into(), "bottom".into())));
        assert_eq!(
            position("right 10px bottom 20px"),
            Some(("right 10px".into(), "bottom 20px".into()))
        );
        assert_eq!(position("left left"), None);
        assert_eq!(position("top 10px"), None);
    }

    #[test]
    fn test_length_quirk() {
        let quirks = ParserContext::new(crate::parser::context::CSSParserMode::Quirks);
        let mut stream = TokenStream::new("10");
        assert!(
            consume_length(&mut stream, &quirks, ValueRange::All, UnitlessQuirk::Allow).is_some()
        );
        let mut stream = TokenStream::new("10");
        let standard = ParserContext::default();
        assert!(
            consume_length(&mut stream, &standard, ValueRange::All, UnitlessQuirk::Allow).is_none()
        );
    }
}
