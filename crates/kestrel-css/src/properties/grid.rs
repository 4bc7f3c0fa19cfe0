//! Grid longhands and the pieces the grid shorthands reuse.
//!
//! [CSS Grid Layout Module Level 2](https://www.w3.org/TR/css-grid-2/)

use super::color::numeric_of;
use super::consumers::{
    ValueRange, consume_comma_including_whitespace, consume_custom_ident, consume_flex,
    consume_ident_id, consume_ident_in, consume_integer, consume_length_or_percent,
    consume_positive_integer, consume_slash_including_whitespace,
};
use crate::parser::context::{ParserContext, UnitlessQuirk};
use crate::parser::stream::{BlockGuard, RestoringBlockGuard, SavePoint, TokenStream};
use crate::tokenizer::CSSToken;
use crate::values::grid::{GRID_MAX_LINE, clamp_repetitions};
use crate::values::{
    CSSValue, CSSValueID, FunctionValue, GridAutoRepeat, GridIntegerRepeat, GridTemplateAreas,
    NumericLiteral, Separator, UnitType, ValueList, ValueRef,
};

use CSSValueID as V;

/// Which grammar a track list follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackListType {
    /// `grid-template-rows` / `grid-template-columns`.
    Template,
    /// The explicit track list after the `/` of `grid-template`'s areas
    /// form: no `repeat()`.
    TemplateNoRepeat,
    /// `subgrid <line-name-list>?`.
    TemplateSubgrid,
    /// `grid-auto-rows` / `grid-auto-columns`: sizes only.
    Auto,
}

/// Stops a track list: end of input, or any delimiter (`/`, `!`).
fn is_range_at_end(stream: &TokenStream) -> bool {
    stream.at_end() || matches!(stream.peek(), CSSToken::Delim(_))
}

fn consume_custom_ident_for_grid_line(stream: &mut TokenStream) -> Option<ValueRef> {
    if matches!(stream.peek_id(), Some(V::Auto | V::Span)) {
        return None;
    }
    consume_custom_ident(stream, &[])
}

/// `<line-names> = '[' <custom-ident>* ']'`. Names are added to `names`.
/// Returns false without moving the stream when no bracket block is next,
/// or when the block is malformed or empty outside a subgrid.
fn consume_line_names_into(
    stream: &mut TokenStream,
    subgrid: bool,
    names: &mut ValueList,
) -> bool {
    if !matches!(stream.peek(), CSSToken::LeftBracket) {
        return false;
    }
    let start = stream.save();
    let mut found = ValueList::space();
    let released = {
        let Some(mut guard) = RestoringBlockGuard::new(stream) else {
            return false;
        };
        guard.consume_whitespace();
        while let Some(name) = consume_custom_ident_for_grid_line(&mut guard) {
            found.append(name);
        }
        guard.release()
    };
    if !released {
        return false;
    }
    stream.consume_whitespace();
    if !subgrid && found.is_empty() {
        stream.restore(start);
        return false;
    }
    for name in found.iter() {
        names.append(name.clone());
    }
    true
}

/// A freshly consumed `<line-names>` as a [`CSSValue::GridLineNames`].
pub fn consume_line_names(stream: &mut TokenStream, subgrid: bool) -> Option<ValueRef> {
    let mut names = ValueList::space();
    consume_line_names_into(stream, subgrid, &mut names)
        .then(|| CSSValue::GridLineNames(names).into_ref())
}

/// `<track-breadth> = <length-percentage [0,∞]> | <flex [0,∞]> | min-content
///  | max-content | auto`
fn consume_grid_breadth(stream: &mut TokenStream, ctx: &ParserContext) -> Option<ValueRef> {
    if let Some(id) = consume_ident_in(stream, &[V::Auto, V::MinContent, V::MaxContent]) {
        return Some(id);
    }
    if matches!(stream.peek(), CSSToken::Dimension { unit, .. } if unit.eq_ignore_ascii_case("fr")) {
        return consume_flex(stream);
    }
    consume_length_or_percent(stream, ctx, ValueRange::NonNegative, UnitlessQuirk::Forbid)
}

fn is_flex(value: &CSSValue) -> bool {
    matches!(value, CSSValue::Numeric(n) if n.unit == UnitType::Fr)
}

fn function_value(name: &str, args: impl IntoIterator<Item = ValueRef>) -> ValueRef {
    CSSValue::Function(FunctionValue::new(
        name,
        ValueList::from_values(Separator::Comma, args),
    ))
    .into_ref()
}

/// `<track-size> = <track-breadth> | minmax( <inflexible-breadth> ,
///  <track-breadth> ) | fit-content( <length-percentage [0,∞]> )`
pub fn consume_track_size(stream: &mut TokenStream, ctx: &ParserContext) -> Option<ValueRef> {
    if stream.peek().function_matches("minmax") {
        let value = {
            let mut guard = RestoringBlockGuard::new(stream)?;
            guard.consume_whitespace();
            let min = consume_grid_breadth(&mut guard, ctx).filter(|v| !is_flex(v))?;
            if !consume_comma_including_whitespace(&mut guard) {
                return None;
            }
            let max = consume_grid_breadth(&mut guard, ctx)?;
            guard.release().then(|| function_value("minmax", [min, max]))?
        };
        stream.consume_whitespace();
        return Some(value);
    }
    if stream.peek().function_matches("fit-content") {
        let value = {
            let mut guard = RestoringBlockGuard::new(stream)?;
            guard.consume_whitespace();
            let length = consume_length_or_percent(
                &mut guard,
                ctx,
                ValueRange::NonNegative,
                UnitlessQuirk::Allow,
            )?;
            guard.release().then(|| function_value("fit-content", [length]))?
        };
        stream.consume_whitespace();
        return Some(value);
    }
    consume_grid_breadth(stream, ctx)
}

fn is_breadth_fixed(value: &CSSValue) -> bool {
    match value.as_identifier() {
        Some(id) => !matches!(id, V::Auto | V::MinContent | V::MaxContent),
        None => !is_flex(value),
    }
}

/// [§ 7.2.3.2 Repeat-to-fill](https://www.w3.org/TR/css-grid-2/#auto-repeat)
///
/// "The `<auto-repeat>` variant can only contain `<fixed-size>` tracks."
fn is_track_fixed(value: &CSSValue) -> bool {
    match value {
        CSSValue::Function(function) if function.name == "fit-content" => false,
        CSSValue::Function(function) => function.args.iter().any(|arg| is_breadth_fixed(arg)),
        other => is_breadth_fixed(other),
    }
}

/// Outcome of one `repeat()`.
struct RepeatResult {
    value: ValueRef,
    is_auto: bool,
}

/// [§ 7.2.3 Repeating Rows and Columns](https://www.w3.org/TR/css-grid-2/#repeat-notation)
fn consume_repeat(
    stream: &mut TokenStream,
    ctx: &ParserContext,
    subgrid: bool,
    all_fixed: &mut bool,
) -> Option<RepeatResult> {
    let mut guard = BlockGuard::new(stream)?;
    guard.consume_whitespace();

    // <name-repeat> only supports auto-fill.
    if subgrid && guard.peek_id() == Some(V::AutoFit) {
        return None;
    }
    let auto_kind = consume_ident_id(&mut guard, &[V::AutoFill, V::AutoFit]);
    let count = match auto_kind {
        Some(_) => 1.0,
        None => numeric_of(&*consume_positive_integer(&mut guard)?)?.value,
    };
    if !consume_comma_including_whitespace(&mut guard) {
        return None;
    }

    let mut tracks = ValueList::space();
    let mut line_name_sets = usize::from(append_line_names(&mut guard, subgrid, &mut tracks));
    let mut track_count = 0;
    while !guard.at_end() {
        if subgrid {
            if line_name_sets == 0 || !append_line_names(&mut guard, subgrid, &mut tracks) {
                return None;
            }
            line_name_sets += 1;
        } else {
            let size = consume_track_size(&mut guard, ctx)?;
            *all_fixed = *all_fixed && is_track_fixed(&size);
            tracks.append(size);
            track_count += 1;
            let _ = append_line_names(&mut guard, subgrid, &mut tracks);
        }
    }
    if (subgrid && line_name_sets == 0) || (!subgrid && track_count == 0) {
        return None;
    }

    let value = match auto_kind {
        Some(kind) => CSSValue::GridAutoRepeat(GridAutoRepeat { kind, tracks }),
        None => {
            let per_repetition = if subgrid { line_name_sets } else { track_count };
            CSSValue::GridIntegerRepeat(GridIntegerRepeat {
                repetitions: clamp_repetitions(count, per_repetition),
                tracks,
            })
        }
    };
    Some(RepeatResult {
        value: value.into_ref(),
        is_auto: auto_kind.is_some(),
    })
}

fn append_line_names(stream: &mut TokenStream, subgrid: bool, values: &mut ValueList) -> bool {
    match consume_line_names(stream, subgrid) {
        Some(names) => {
            values.append(names);
            true
        }
        None => false,
    }
}

/// [§ 7.2 Explicit Track Sizing](https://www.w3.org/TR/css-grid-2/#track-sizing)
///
/// `<track-list>`, `<auto-track-list>`, `<explicit-track-list>`,
/// `subgrid <line-name-list>?` or `<track-size>+`, per `list_type`.
pub fn consume_track_list(
    stream: &mut TokenStream,
    ctx: &ParserContext,
    list_type: TrackListType,
) -> Option<ValueRef> {
    let mut save = SavePoint::new(stream);
    let value = consume_track_list_inner(&mut save, ctx, list_type)?;
    save.release();
    Some(value)
}

fn consume_track_list_inner(
    stream: &mut TokenStream,
    ctx: &ParserContext,
    list_type: TrackListType,
) -> Option<ValueRef> {
    let allow_line_names = list_type != TrackListType::Auto;
    if !allow_line_names && matches!(stream.peek(), CSSToken::LeftBracket) {
        return None;
    }
    let subgrid = list_type == TrackListType::TemplateSubgrid;

    let mut values = ValueList::space();
    if subgrid {
        values.append(consume_ident_in(stream, &[V::Subgrid])?);
    }
    let _ = append_line_names(stream, subgrid, &mut values);

    let allow_repeat = matches!(list_type, TrackListType::Template | TrackListType::TemplateSubgrid);
    let mut seen_auto_repeat = false;
    let mut all_fixed = true;
    loop {
        if stream.peek().function_matches("repeat") {
            if !allow_repeat {
                return None;
            }
            let repeat = consume_repeat(stream, ctx, subgrid, &mut all_fixed)?;
            stream.consume_whitespace();
            // "There can only be one <auto-repeat>"
            if repeat.is_auto && seen_auto_repeat {
                return None;
            }
            seen_auto_repeat |= repeat.is_auto;
            values.append(repeat.value);
        } else if let Some(size) = consume_track_size(stream, ctx) {
            if subgrid {
                return None;
            }
            all_fixed = all_fixed && is_track_fixed(&size);
            values.append(size);
        } else if !subgrid {
            return None;
        }

        if seen_auto_repeat && !all_fixed {
            return None;
        }
        if !allow_line_names && matches!(stream.peek(), CSSToken::LeftBracket) {
            return None;
        }
        let appended = append_line_names(stream, subgrid, &mut values);
        if subgrid && !appended && !stream.peek().function_matches("repeat") {
            return is_range_at_end(stream).then(|| finish_track_list(values));
        }
        if is_range_at_end(stream) {
            break;
        }
    }
    Some(finish_track_list(values))
}

/// A single track stays bare; anything else is a space list.
fn finish_track_list(values: ValueList) -> ValueRef {
    match (values.len(), values.first()) {
        (1, Some(only)) if !matches!(**only, CSSValue::GridLineNames(_)) => only.clone(),
        _ => values.into_value(),
    }
}

/// `none | <track-list> | <auto-track-list> | subgrid <line-name-list>?`
pub fn consume_template_rows_or_columns(
    stream: &mut TokenStream,
    ctx: &ParserContext,
) -> Option<ValueRef> {
    match stream.peek_id() {
        Some(V::None) => consume_ident_in(stream, &[V::None]),
        Some(V::Subgrid) => consume_track_list(stream, ctx, TrackListType::TemplateSubgrid),
        _ => consume_track_list(stream, ctx, TrackListType::Template),
    }
}

/// [§ 8.3 Line-based Placement](https://www.w3.org/TR/css-grid-2/#line-placement)
///
/// `auto | <custom-ident> | [ <integer> && <custom-ident>? ] |
///  [ span && [ <integer> || <custom-ident> ] ]`
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss, clippy::float_cmp)]
pub fn consume_grid_line(stream: &mut TokenStream) -> Option<ValueRef> {
    if let Some(auto) = consume_ident_in(stream, &[V::Auto]) {
        return Some(auto);
    }
    fn consume_number(stream: &mut TokenStream) -> Option<f64> {
        consume_integer(stream, i64::MIN)
            .and_then(|v| numeric_of(&v))
            .map(|n| n.value)
    }
    fn consume_span(stream: &mut TokenStream) -> bool {
        consume_ident_id(stream, &[V::Span]).is_some()
    }

    let mut save = SavePoint::new(stream);

    let mut number = consume_number(&mut save);
    let name;
    let span;
    if number.is_some() {
        name = consume_custom_ident_for_grid_line(&mut save);
        span = consume_span(&mut save);
    } else if consume_span(&mut save) {
        span = true;
        number = consume_number(&mut save);
        name = consume_custom_ident_for_grid_line(&mut save);
        if number.is_none() {
            number = consume_number(&mut save);
        }
    } else {
        name = Some(consume_custom_ident_for_grid_line(&mut save)?);
        number = consume_number(&mut save);
        span = consume_span(&mut save);
        if !span && number.is_none() {
            save.release();
            return name;
        }
    }

    // "span" alone, negative spans and zero are invalid.
    if span && number.is_none() && name.is_none() {
        return None;
    }
    if span && number.is_some_and(|n| n < 0.0) {
        return None;
    }
    if number == Some(0.0) {
        return None;
    }
    let limit = GRID_MAX_LINE as f64;
    let number = number.map(|n| n.trunc().clamp(-limit, limit));

    let mut values = ValueList::space();
    if span {
        values.append(CSSValue::ident(V::Span));
    }
    if let Some(n) = number
        && (!span || name.is_none() || n != 1.0)
    {
        values.append(CSSValue::numeric(NumericLiteral::integer(n)));
    }
    if let Some(name) = name {
        values.append(name);
    }
    save.release();
    Some(values.into_value())
}

/// Returns true for a grid line that is a lone `<custom-ident>`.
#[must_use]
pub fn is_custom_ident_line(value: &CSSValue) -> bool {
    matches!(value, CSSValue::CustomIdent(_))
}

/// [§ 7.3 Named Areas](https://www.w3.org/TR/css-grid-2/#grid-template-areas-property)
///
/// `none | <string>+`
pub fn consume_template_areas(stream: &mut TokenStream) -> Option<ValueRef> {
    if let Some(none) = consume_ident_in(stream, &[V::None]) {
        return Some(none);
    }
    let mut areas = GridTemplateAreas::new();
    while let CSSToken::String(row) = stream.peek() {
        if !areas.push_row(row) {
            return None;
        }
        let _ = stream.consume_including_whitespace();
    }
    (areas.row_count() > 0).then(|| CSSValue::GridTemplateAreas(areas).into_ref())
}

/// [§ 8.5 Automatic Placement](https://www.w3.org/TR/css-grid-2/#grid-auto-flow-property)
///
/// `[ row | column ] || dense`. `row` is implied by `dense` alone and not
/// repeated.
pub fn consume_auto_flow(stream: &mut TokenStream) -> Option<ValueRef> {
    let mut direction = consume_ident_id(stream, &[V::Row, V::Column]);
    let dense = consume_ident_id(stream, &[V::Dense]);
    if direction.is_none() {
        direction = consume_ident_id(stream, &[V::Row, V::Column]);
        if direction.is_none() && dense.is_none() {
            return None;
        }
    }
    Some(auto_flow_value(direction, dense.is_some()))
}

fn auto_flow_value(direction: Option<CSSValueID>, dense: bool) -> ValueRef {
    let mut values = ValueList::space();
    if let Some(direction) = direction
        && (direction == V::Column || !dense)
    {
        values.append(CSSValue::ident(direction));
    }
    if dense {
        values.append(CSSValue::ident(V::Dense));
    }
    values.into_value()
}

/// `[ auto-flow && dense? ]` inside the `grid` shorthand, resolved
/// against the axis it appears on.
pub fn consume_implicit_auto_flow(
    stream: &mut TokenStream,
    direction: CSSValueID,
) -> Option<ValueRef> {
    let dense = if consume_ident_id(stream, &[V::AutoFlow]).is_some() {
        consume_ident_id(stream, &[V::Dense]).is_some()
    } else {
        let _ = consume_ident_id(stream, &[V::Dense])?;
        let _ = consume_ident_id(stream, &[V::AutoFlow])?;
        true
    };
    Some(auto_flow_value(Some(direction), dense))
}

/// The three longhands `grid-template` sets.
#[derive(Debug, Clone)]
pub struct GridTemplate {
    /// `grid-template-rows`
    pub rows: ValueRef,
    /// `grid-template-columns`
    pub columns: ValueRef,
    /// `grid-template-areas`
    pub areas: ValueRef,
}

/// `[ <line-names>? <string> <track-size>? <line-names>? ]+
///  [ / <explicit-track-list> ]?`
fn consume_rows_areas_columns(stream: &mut TokenStream, ctx: &ParserContext) -> Option<GridTemplate> {
    let mut areas = GridTemplateAreas::new();
    let mut rows = ValueList::space();
    // Trailing names of one row merge with the leading names of the next.
    let mut pending_names: Option<ValueList> = None;

    loop {
        let mut names = pending_names.take().unwrap_or_else(ValueList::space);
        let _ = consume_line_names_into(stream, false, &mut names);
        if !names.is_empty() {
            rows.append(CSSValue::GridLineNames(names).into_ref());
        }

        let CSSToken::String(row) = stream.peek() else {
            return None;
        };
        if !areas.push_row(row) {
            return None;
        }
        let _ = stream.consume_including_whitespace();

        let size = consume_track_size(stream, ctx).unwrap_or_else(|| CSSValue::ident(V::Auto));
        rows.append(size);

        let mut trailing = ValueList::space();
        if consume_line_names_into(stream, false, &mut trailing) {
            pending_names = Some(trailing);
        }

        if stream.at_end() || stream.peek().is_delim('/') || stream.peek().is_delim('!') {
            break;
        }
    }
    if let Some(names) = pending_names {
        rows.append(CSSValue::GridLineNames(names).into_ref());
    }

    let columns = if !stream.at_end() && !stream.peek().is_delim('!') {
        if !consume_slash_including_whitespace(stream) {
            return None;
        }
        let columns = consume_track_list(stream, ctx, TrackListType::TemplateNoRepeat)?;
        if !(stream.at_end() || stream.peek().is_delim('!')) {
            return None;
        }
        columns
    } else {
        CSSValue::ident(V::None)
    };

    Some(GridTemplate {
        rows: rows.into_value(),
        columns,
        areas: CSSValue::GridTemplateAreas(areas).into_ref(),
    })
}

/// [§ 7.4 Explicit Grid Shorthand](https://www.w3.org/TR/css-grid-2/#explicit-grid-shorthand)
///
/// `none | [ <'grid-template-rows'> / <'grid-template-columns'> ] |
///  [ <line-names>? <string> <track-size>? <line-names>? ]+
///  [ / <explicit-track-list> ]?`
pub fn consume_grid_template(stream: &mut TokenStream, ctx: &ParserContext) -> Option<GridTemplate> {
    // STEP 1: <grid-template-rows> / <grid-template-columns>
    {
        let mut save = SavePoint::new(stream);
        if let Some(rows) = consume_template_rows_or_columns(&mut save, ctx)
            && consume_slash_including_whitespace(&mut save)
            && let Some(columns) = consume_template_rows_or_columns(&mut save, ctx)
        {
            save.release();
            return Some(GridTemplate {
                rows,
                columns,
                areas: CSSValue::ident(V::None),
            });
        }
    }

    // STEP 2: the areas form.
    {
        let mut save = SavePoint::new(stream);
        if let Some(template) = consume_rows_areas_columns(&mut save, ctx) {
            save.release();
            return Some(template);
        }
    }

    // STEP 3: `none` alone. This comes last since `none` may also start
    // the first form.
    let _ = consume_ident_in(stream, &[V::None])?;
    Some(GridTemplate {
        rows: CSSValue::ident(V::None),
        columns: CSSValue::ident(V::None),
        areas: CSSValue::ident(V::None),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::grid::track_count;

    fn tracks(text: &str) -> Option<ValueRef> {
        let mut stream = TokenStream::new(text);
        let value = consume_template_rows_or_columns(&mut stream, &ParserContext::default())?;
        stream.at_end().then_some(value)
    }

    fn line(text: &str) -> Option<String> {
        let mut stream = TokenStream::new(text);
        let value = consume_grid_line(&mut stream)?;
        stream.at_end().then(|| value.css_text())
    }

    #[test]
    fn test_repeat_is_clamped() {
        let count = |text: &str| tracks(text).map(|v| track_count(&v));
        assert_eq!(count("repeat(999, 20px)"), Some(999));
        assert_eq!(count("repeat(1000000, [first] min-content [last])"), Some(1_000_000));
        assert_eq!(count("repeat(100000000000000000000, 10% 1fr)"), Some(10_000_000));
        assert_eq!(
            count("repeat(100000000000000000000, 10% 5em 1fr auto auto 15px min-content)"),
            Some(9_999_997)
        );
    }

    #[test]
    fn test_auto_repeat_rules() {
        assert!(tracks("repeat(auto-fill, 10px) 20px").is_some());
        assert!(tracks("repeat(auto-fill, 10px) repeat(auto-fit, 20px)").is_none());
        assert!(tracks("repeat(auto-fill, 1fr)").is_none());
        assert!(tracks("[] 10px").is_none());
        assert_eq!(tracks("subgrid [a] [] [b]").map(|v| v.css_text()).as_deref(), Some("subgrid [a] [] [b]"));
    }

    #[test]
    fn test_grid_line_forms() {
        assert_eq!(line("auto").as_deref(), Some("auto"));
        assert_eq!(line("foo").as_deref(), Some("foo"));
        assert_eq!(line("2 foo").as_deref(), Some("2 foo"));
        assert_eq!(line("span 1 foo").as_deref(), Some("span foo"));
        assert_eq!(line("foo 3 span").as_deref(), Some("span 3 foo"));
        assert_eq!(line("5000000000").as_deref(), Some("10000000"));
        assert_eq!(line("-5000000000").as_deref(), Some("-10000000"));
        assert_eq!(line("span"), None);
        assert_eq!(line("span -1"), None);
        assert_eq!(line("0"), None);
    }

    #[test]
    fn test_auto_flow() {
        let flow = |text: &str| {
            let mut stream = TokenStream::new(text);
            consume_auto_flow(&mut stream).map(|v| v.css_text())
        };
        assert_eq!(flow("dense row").as_deref(), Some("dense"));
        assert_eq!(flow("column dense").as_deref(), Some("column dense"));
        assert_eq!(flow("row").as_deref(), Some("row"));
    }
}
