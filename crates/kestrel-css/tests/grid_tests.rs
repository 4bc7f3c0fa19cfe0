//! Integration tests for grid templates, lines, and the grid shorthands.

use kestrel_css::parser::{ParserContext, parse_single_value, parse_value_text};
use kestrel_css::properties::{CSSPropertyID, PropertyValue};
use kestrel_css::values::grid::{GRID_MAX_TRACKS, track_count};
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

use CSSPropertyID as P;

fn parse(id: CSSPropertyID, value: &str) -> Option<String> {
    parse_single_value(id, value, &ParserContext::default()).map(|v| v.css_text())
}

fn expand(id: CSSPropertyID, value: &str) -> Vec<PropertyValue> {
    parse_value_text(id, value, false, &ParserContext::default()).unwrap_or_default()
}

fn value_of(entries: &[PropertyValue], id: CSSPropertyID) -> String {
    entries
        .iter()
        .find(|entry| entry.id == id)
        .map(|entry| entry.value.css_text())
        .unwrap_or_default()
}

/// Number of tracks `repeat(count, <tracks> sizes)` expands to in `id`.
fn expanded_tracks_in(id: CSSPropertyID, count: u64, tracks: usize) -> Option<usize> {
    let sizes = vec!["10px"; tracks].join(" ");
    let value = parse_single_value(
        id,
        &format!("repeat({count}, {sizes})"),
        &ParserContext::default(),
    )?;
    Some(track_count(&value))
}

fn expanded_tracks(count: u64, tracks: usize) -> Option<usize> {
    expanded_tracks_in(P::GridTemplateColumns, count, tracks)
}

#[quickcheck]
fn prop_repeat_track_count_is_clamped(count: u64, tracks: u8, rows: bool) -> TestResult {
    let id = if rows { P::GridTemplateRows } else { P::GridTemplateColumns };
    let tracks = usize::from(tracks % 8) + 1;
    if count == 0 {
        return TestResult::from_bool(expanded_tracks_in(id, count, tracks).is_none());
    }
    let per_repetition_cap = GRID_MAX_TRACKS / tracks;
    let expected = usize::try_from(count).map_or(per_repetition_cap, |n| n.min(per_repetition_cap)) * tracks;
    TestResult::from_bool(expanded_tracks_in(id, count, tracks) == Some(expected))
}

#[test]
fn test_huge_repeat_counts() {
    assert_eq!(expanded_tracks(100_000_000_000, 2), Some(10_000_000));
    assert_eq!(expanded_tracks(100_000_000_000, 7), Some(9_999_997));
    assert_eq!(expanded_tracks(999, 1), Some(999));
    assert_eq!(expanded_tracks(1_000_001, 1), Some(1_000_001));
    assert_eq!(expanded_tracks(4_200_000, 2), Some(8_400_000));
}

#[test]
fn test_huge_repeat_counts_in_rows() {
    let rows = |count, tracks| expanded_tracks_in(P::GridTemplateRows, count, tracks);
    assert_eq!(rows(100_000_000_000, 2), Some(10_000_000));
    assert_eq!(rows(100_000_000_000, 7), Some(9_999_997));
    assert_eq!(rows(1_200_000, 1), Some(1_200_000));
}

#[test]
fn test_line_names_do_not_count_as_tracks() {
    let value = parse_single_value(
        P::GridTemplateColumns,
        "repeat(1000000, [a] 10px [b])",
        &ParserContext::default(),
    );
    assert_eq!(value.as_deref().map(track_count), Some(1_000_000));
}

#[test]
fn test_track_lists() {
    assert_eq!(parse(P::GridTemplateColumns, "[a] 10px [b]").as_deref(), Some("[a] 10px [b]"));
    assert_eq!(parse(P::GridTemplateColumns, "repeat(auto-fill, 1fr)"), None);
    assert_eq!(parse(P::GridTemplateColumns, "[] 10px"), None);
    assert_eq!(
        parse(P::GridTemplateRows, "subgrid [a] [] [b]").as_deref(),
        Some("subgrid [a] [] [b]")
    );
    assert_eq!(parse(P::GridAutoRows, "subgrid"), None);
}

#[test]
fn test_template_areas() {
    assert_eq!(
        parse(P::GridTemplateAreas, "'head head' 'nav main'").as_deref(),
        Some("\"head head\" \"nav main\"")
    );
    assert_eq!(parse(P::GridTemplateAreas, "'a b' 'b a'"), None);
    assert_eq!(parse(P::GridTemplateAreas, "'a b' 'c'"), None);
    assert_eq!(parse(P::GridTemplateAreas, "none").as_deref(), Some("none"));
}

#[test]
fn test_grid_lines() {
    assert_eq!(parse(P::GridRowStart, "span 1 foo").as_deref(), Some("span foo"));
    assert_eq!(parse(P::GridRowStart, "foo 3 span").as_deref(), Some("span 3 foo"));
    assert_eq!(parse(P::GridColumnEnd, "5000000000").as_deref(), Some("10000000"));
    assert_eq!(parse(P::GridColumnEnd, "0"), None);
    assert_eq!(parse(P::GridColumnEnd, "span"), None);
}

#[test]
fn test_placement_shorthands() {
    let entries = expand(P::GridArea, "header");
    assert_eq!(entries.len(), 4);
    assert!(entries.iter().all(|e| e.value.css_text() == "header"));

    let entries = expand(P::GridArea, "1 / 2");
    assert_eq!(value_of(&entries, P::GridRowStart), "1");
    assert_eq!(value_of(&entries, P::GridColumnStart), "2");
    assert_eq!(value_of(&entries, P::GridRowEnd), "auto");
    assert_eq!(value_of(&entries, P::GridColumnEnd), "auto");

    let entries = expand(P::GridColumn, "2");
    assert_eq!(value_of(&entries, P::GridColumnEnd), "auto");
}

#[test]
fn test_grid_shorthand() {
    let entries = expand(P::Grid, "100px / auto-flow");
    assert_eq!(value_of(&entries, P::GridTemplateRows), "100px");
    assert_eq!(value_of(&entries, P::GridAutoFlow), "column");
    assert_eq!(entries.len(), P::Grid.longhands().len());

    let entries = expand(P::Grid, "none");
    assert!(
        entries
            .iter()
            .filter(|e| matches!(e.id, P::GridAutoFlow | P::GridAutoRows | P::GridAutoColumns))
            .all(|e| e.implicit)
    );
    assert!(expand(P::Grid, "auto-flow 40px").is_empty());

    let entries = expand(P::Grid, "dense auto-flow / 10px");
    assert_eq!(value_of(&entries, P::GridAutoFlow), "dense");
    assert_eq!(value_of(&entries, P::GridTemplateColumns), "10px");
    assert!(expand(P::Grid, "dense / 10px").is_empty());

    let entries = expand(P::Grid, "none / auto-flow 100px");
    assert_eq!(value_of(&entries, P::GridTemplateRows), "none");
    assert_eq!(value_of(&entries, P::GridAutoFlow), "column");
    assert_eq!(value_of(&entries, P::GridAutoColumns), "100px");
}
