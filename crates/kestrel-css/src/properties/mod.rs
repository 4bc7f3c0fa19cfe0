//! Property grammars.
//!
//! [CSS Cascading and Inheritance Level 5](https://www.w3.org/TR/css-cascade-5/)
//!
//! Each longhand has one grammar, reached through
//! [`longhands::parse_longhand`]. Shorthands are expanded by
//! [`shorthands::parse_shorthand`] into exactly the longhands
//! [`CSSPropertyID::longhands`] lists, or into nothing at all.

/// Box alignment, flexbox and gaps.
pub mod alignment;
/// Backgrounds and borders.
pub mod backgrounds;
/// Sizing, margins, paddings, insets and positioning.
pub mod box_model;
/// `<color>` and `light-dark()`.
pub mod color;
/// Shared component-value consumers.
pub mod consumers;
/// `display` and `content`.
pub mod display;
/// Fonts.
pub mod font;
/// Grid layout.
pub mod grid;
/// `<image>`.
pub mod image;
/// Longhand dispatch.
pub mod longhands;
/// Property ids and shorthand tables.
pub mod property_id;
/// Shorthand expansion.
pub mod shorthands;
/// Text and text decoration.
pub mod text;
/// Transforms and transitions.
pub mod transforms;

use serde::Serialize;

pub use property_id::{CSSPropertyID, resolve_property};

use crate::values::ValueRef;

/// [§ 4.1 Declarations](https://www.w3.org/TR/css-syntax-3/#declaration)
///
/// One longhand with its parsed value, as emitted by the parser and
/// stored in a property set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyValue {
    /// The longhand.
    pub id: CSSPropertyID,
    /// The shorthand this entry was expanded from, if any.
    pub shorthand: Option<CSSPropertyID>,
    /// The parsed value.
    pub value: ValueRef,
    /// Whether the declaration was `!important`.
    pub important: bool,
    /// Set for longhands the shorthand's text did not mention.
    pub implicit: bool,
}

impl PropertyValue {
    /// An explicitly set longhand.
    #[must_use]
    pub const fn new(id: CSSPropertyID, value: ValueRef, important: bool) -> Self {
        Self {
            id,
            shorthand: None,
            value,
            important,
            implicit: false,
        }
    }

    /// The entry's name, as written in a declaration.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.id.name()
    }
}
