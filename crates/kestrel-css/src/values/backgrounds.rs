//! [CSS Backgrounds and Borders Module Level 3](https://www.w3.org/TR/css-backgrounds-3/)

use core::fmt;

use serde::Serialize;

use super::{CSSValueID, ValueQuad};

/// [§ 3.4 Tiling Images](https://www.w3.org/TR/css-backgrounds-3/#background-repeat)
///
/// One `<repeat-style>`, stored as its two axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RepeatStyle {
    /// Horizontal repetition.
    pub x: CSSValueID,
    /// Vertical repetition.
    pub y: CSSValueID,
}

impl RepeatStyle {
    /// Create a repeat style from its axes.
    #[must_use]
    pub const fn new(x: CSSValueID, y: CSSValueID) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for RepeatStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.x, self.y) {
            (CSSValueID::Repeat, CSSValueID::NoRepeat) => f.write_str("repeat-x"),
            (CSSValueID::NoRepeat, CSSValueID::Repeat) => f.write_str("repeat-y"),
            (x, y) if x == y => write!(f, "{x}"),
            (x, y) => write!(f, "{x} {y}"),
        }
    }
}

/// [§ 6.2 Image Slicing](https://www.w3.org/TR/css-backgrounds-3/#border-image-slice)
///
/// `[<number [0,∞]> | <percentage [0,∞]>]{1,4} && fill?`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BorderImageSlice {
    /// The four offsets.
    pub slices: ValueQuad,
    /// "The fill keyword, if present, causes the middle part of the border
    /// image to be preserved."
    pub fill: bool,
}

impl fmt::Display for BorderImageSlice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slices)?;
        if self.fill {
            f.write_str(" fill")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeat_style_collapses() {
        use CSSValueID::{NoRepeat, Repeat, Round, Space};
        assert_eq!(RepeatStyle::new(Repeat, NoRepeat).to_string(), "repeat-x");
        assert_eq!(RepeatStyle::new(NoRepeat, Repeat).to_string(), "repeat-y");
        assert_eq!(RepeatStyle::new(Space, Space).to_string(), "space");
        assert_eq!(RepeatStyle::new(Round, Space).to_string(), "round space");
    }
}
