//! Grid track repetition and template areas.
//!
//! [CSS Grid Layout Module Level 2](https://www.w3.org/TR/css-grid-2/)

use core::fmt;
use std::collections::BTreeMap;

use serde::Serialize;

use super::{CSSValue, CSSValueID, ValueList, write_string};

/// The largest number of explicit tracks a track list may expand to.
pub const GRID_MAX_TRACKS: usize = 10_000_000;

/// The largest line number a `<grid-line>` may name, in either direction.
pub const GRID_MAX_LINE: i64 = 10_000_000;

/// Clamp a `repeat()` count so that one repetition of `tracks` tracks
/// never expands past [`GRID_MAX_TRACKS`].
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn clamp_repetitions(count: f64, tracks: usize) -> usize {
    let count = count.clamp(0.0, GRID_MAX_TRACKS as f64) as usize;
    count.min(GRID_MAX_TRACKS / tracks.max(1))
}

/// [§ 7.2.3.1 Syntax of repeat()](https://www.w3.org/TR/css-grid-2/#repeat-syntax)
///
/// `repeat(<integer [1,∞]>, [ <line-names>? <track-size> ]+ <line-names>?)`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridIntegerRepeat {
    /// The clamped repetition count.
    pub repetitions: usize,
    /// One repetition: tracks and line names.
    pub tracks: ValueList,
}

impl fmt::Display for GridIntegerRepeat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "repeat({}, {})", self.repetitions, self.tracks)
    }
}

/// `repeat([ auto-fill | auto-fit ], <fixed-repeat-tracks>)`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridAutoRepeat {
    /// [`CSSValueID::AutoFill`] or [`CSSValueID::AutoFit`].
    pub kind: CSSValueID,
    /// One repetition: tracks and line names.
    pub tracks: ValueList,
}

impl fmt::Display for GridAutoRepeat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "repeat({}, {})", self.kind, self.tracks)
    }
}

/// Number of tracks in a value, expanding integer repeats. Line names
/// count zero; an auto repeat counts one repetition.
#[must_use]
pub fn track_count(value: &CSSValue) -> usize {
    match value {
        CSSValue::List(list) => list.iter().map(|item| track_count(item)).sum(),
        CSSValue::GridIntegerRepeat(repeat) => {
            let per_repetition: usize = repeat.tracks.iter().map(|item| track_count(item)).sum();
            repeat.repetitions.saturating_mul(per_repetition)
        }
        CSSValue::GridAutoRepeat(repeat) => repeat.tracks.iter().map(|item| track_count(item)).sum(),
        CSSValue::GridLineNames(_) | CSSValue::Identifier(CSSValueID::None) => 0,
        _ => 1,
    }
}

/// The rectangle one named area covers; ends are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NamedGridArea {
    /// First row.
    pub row_start: usize,
    /// One past the last row.
    pub row_end: usize,
    /// First column.
    pub column_start: usize,
    /// One past the last column.
    pub column_end: usize,
}

/// [§ 7.3 Named Areas](https://www.w3.org/TR/css-grid-2/#grid-template-areas-property)
///
/// "Each string is parsed into a list of tokens ... All strings must have
/// the same number of columns, or else the declaration is invalid."
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridTemplateAreas {
    rows: Vec<Vec<Option<String>>>,
    areas: BTreeMap<String, NamedGridArea>,
}

impl GridTemplateAreas {
    /// An empty grid; rows are added with [`Self::push_row`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rows: Vec::new(),
            areas: BTreeMap::new(),
        }
    }

    /// Add one row string. Returns false if the row is malformed, has a
    /// different width than earlier rows, or breaks an area's rectangle.
    pub fn push_row(&mut self, text: &str) -> bool {
        let Some(cells) = split_row(text) else {
            return false;
        };
        if cells.is_empty() || self.rows.first().is_some_and(|first| first.len() != cells.len()) {
            return false;
        }

        let row = self.rows.len();
        let mut column = 0;
        while column < cells.len() {
            let Some(name) = &cells[column] else {
                column += 1;
                continue;
            };
            let mut end = column + 1;
            while cells.get(end).is_some_and(|cell| cell.as_ref() == Some(name)) {
                end += 1;
            }
            match self.areas.get_mut(name) {
                Some(area) => {
                    // "If a named grid area spans multiple grid cells, but
                    // those cells do not form a single filled-in rectangle,
                    // the declaration is invalid."
                    if area.column_start != column || area.column_end != end || area.row_end != row
                    {
                        return false;
                    }
                    area.row_end = row + 1;
                }
                None => {
                    let _ = self.areas.insert(
                        name.clone(),
                        NamedGridArea {
                            row_start: row,
                            row_end: row + 1,
                            column_start: column,
                            column_end: end,
                        },
                    );
                }
            }
            column = end;
        }
        self.rows.push(cells);
        true
    }

    /// Number of rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// The area with the given name.
    #[must_use]
    pub fn area(&self, name: &str) -> Option<&NamedGridArea> {
        self.areas.get(name)
    }
}

impl Default for GridTemplateAreas {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GridTemplateAreas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            let text = row
                .iter()
                .map(|cell| cell.as_deref().unwrap_or("."))
                .collect::<Vec<_>>()
                .join(" ");
            write_string(f, &text)?;
        }
        Ok(())
    }
}

/// "A sequence of name code points, representing a named cell token ... A
/// sequence of one or more '.' (U+002E FULL STOP), representing a null cell
/// token ... A sequence of whitespace, representing nothing ... A sequence
/// of any other characters, representing a trash token."
fn split_row(text: &str) -> Option<Vec<Option<String>>> {
    let chars: Vec<char> = text.chars().collect();
    let mut cells = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c.is_ascii_whitespace() {
            i += 1;
        } else if c == '.' {
            while chars.get(i) == Some(&'.') {
                i += 1;
            }
            cells.push(None);
        } else if is_name_code_point(c) {
            let start = i;
            while chars.get(i).is_some_and(|&c| is_name_code_point(c)) {
                i += 1;
            }
            cells.push(Some(chars[start..i].iter().collect()));
        } else {
            return None;
        }
    }
    Some(cells)
}

const fn is_name_code_point(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_areas_must_be_rectangles() {
        let mut areas = GridTemplateAreas::new();
        assert!(areas.push_row("a a b"));
        assert!(areas.push_row("a a c"));
        assert!(!areas.clone().push_row("a b b"));
        assert!(!areas.clone().push_row("a a"));
        assert_eq!(
            areas.area("a"),
            Some(&NamedGridArea {
                row_start: 0,
                row_end: 2,
                column_start: 0,
                column_end: 2,
            })
        );
    }

    #[test]
    fn test_null_cells_collapse() {
        let mut areas = GridTemplateAreas::new();
        assert!(areas.push_row("head ...  side"));
        assert_eq!(areas.column_count(), 3);
        assert_eq!(CSSValue::GridTemplateAreas(areas).css_text(), "\"head . side\"");
    }

    #[test]
    fn test_clamp_repetitions() {
        assert_eq!(clamp_repetitions(1e20, 2), 5_000_000);
        assert_eq!(clamp_repetitions(1e20, 7), 1_428_571);
        assert_eq!(clamp_repetitions(999.0, 1), 999);
        assert_eq!(clamp_repetitions(-3.0, 1), 0);
    }
}
