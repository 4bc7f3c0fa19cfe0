//! Parsed CSS values.
//!
//! [CSS Values and Units Module Level 4](https://www.w3.org/TR/css-values-4/)
//!
//! Every successful property parse yields a [`ValueRef`]: an immutable,
//! shared [`CSSValue`]. Containers hold `ValueRef`s, so a value placed in
//! several lists (for example the `initial` keyword filled into every
//! missing background layer) is stored once.
//!
//! Serialization is `Display`; [`CSSValue::css_text`] is a convenience
//! for `to_string()`.

/// Alignment values.
pub mod alignment;
/// Background and border-image values.
pub mod backgrounds;
/// Colors.
pub mod color;
/// Grid track repetition and template areas.
pub mod grid;
/// Images, `image-set()` and gradients.
pub mod image;
/// Keyword identifiers.
pub mod keywords;
/// Lists, pairs, and quads.
pub mod list;
/// `calc()` and friends.
pub mod math;
/// Numbers with units.
pub mod numeric;

use core::fmt;
use std::sync::Arc;

use serde::Serialize;

pub use alignment::ContentDistribution;
pub use backgrounds::{BorderImageSlice, RepeatStyle};
pub use color::Color;
pub use grid::{GridAutoRepeat, GridIntegerRepeat, GridTemplateAreas, NamedGridArea};
pub use image::{Gradient, GradientKind, ImageSetOption, UrlValue};
pub use keywords::{CSSValueID, CSSWideKeyword};
pub use list::{IdenticalValuesPolicy, Separator, ValueList, ValuePair, ValueQuad};
pub use math::{CalcCategory, MathExpression, MathFunction};
pub use numeric::{NumericLiteral, UnitCategory, UnitType};

use crate::properties::CSSPropertyID;

/// A shared, immutable parsed value.
pub type ValueRef = Arc<CSSValue>;

/// A parsed CSS value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CSSValue {
    /// A predefined keyword.
    Identifier(CSSValueID),
    /// [§ 3.2 Author-defined Identifiers](https://www.w3.org/TR/css-values-4/#custom-idents)
    CustomIdent(String),
    /// A quoted string.
    String(String),
    /// `url(...)`.
    Url(UrlValue),
    /// A number, percentage, or dimension.
    Numeric(NumericLiteral),
    /// A `calc()`-family expression.
    Math(MathFunction),
    /// A resolved color.
    Color(Color),
    /// A named color that serializes as its keyword.
    ColorKeyword(&'static str),
    /// `light-dark(<light>, <dark>)`.
    LightDark(ValueRef, ValueRef),
    /// An ordered list.
    List(ValueList),
    /// Two values.
    Pair(ValuePair),
    /// Four side values.
    Quad(ValueQuad),
    /// Any other functional notation, kept as name plus arguments.
    Function(FunctionValue),
    /// `repeat(<integer>, <tracks>)`.
    GridIntegerRepeat(GridIntegerRepeat),
    /// `repeat(auto-fill | auto-fit, <tracks>)`.
    GridAutoRepeat(GridAutoRepeat),
    /// `[name1 name2]`.
    GridLineNames(ValueList),
    /// The strings of `grid-template-areas`.
    GridTemplateAreas(GridTemplateAreas),
    /// `image-set(<option>#)`; the list holds [`CSSValue::ImageSetOption`]s.
    ImageSet(ValueList),
    /// One `image-set()` candidate.
    ImageSetOption(ImageSetOption),
    /// `type(<string>)` inside an `image-set()` candidate.
    ImageSetType(String),
    /// A gradient image.
    Gradient(Gradient),
    /// `align-content`, `justify-content`.
    ContentDistribution(ContentDistribution),
    /// `background-repeat` per layer.
    RepeatStyle(RepeatStyle),
    /// `border-image-slice`.
    BorderImageSlice(BorderImageSlice),
    /// A named font family.
    FontFamily(String),
    /// A system font keyword used by the `font` shorthand; every longhand
    /// is resolved from the platform later.
    PendingSystemFont(CSSValueID),
    /// `initial`, `inherit`, `unset`, `revert`, `revert-layer`.
    CSSWide(CSSWideKeyword),
    /// The raw text of a value containing `var()`.
    Unparsed(String),
    /// A longhand of a shorthand whose value contains `var()`. Serializes as
    /// the empty string; the text is kept on the shorthand.
    PendingSubstitution {
        /// The shorthand that was set.
        shorthand: CSSPropertyID,
        /// The shorthand's raw value text.
        text: String,
    },
}

impl CSSValue {
    /// Share the value.
    #[must_use]
    pub fn into_ref(self) -> ValueRef {
        Arc::new(self)
    }

    /// A shared keyword.
    #[must_use]
    pub fn ident(id: CSSValueID) -> ValueRef {
        Self::Identifier(id).into_ref()
    }

    /// A shared numeric value.
    #[must_use]
    pub fn numeric(literal: NumericLiteral) -> ValueRef {
        Self::Numeric(literal).into_ref()
    }

    /// A shared `initial`.
    #[must_use]
    pub fn initial() -> ValueRef {
        Self::CSSWide(CSSWideKeyword::Initial).into_ref()
    }

    /// The keyword, if this is one.
    #[must_use]
    pub const fn as_identifier(&self) -> Option<CSSValueID> {
        match self {
            Self::Identifier(id) => Some(*id),
            _ => None,
        }
    }

    /// Returns true if this is the keyword `id`.
    #[must_use]
    pub fn is_identifier(&self, id: CSSValueID) -> bool {
        self.as_identifier() == Some(id)
    }

    /// The literal, if this is a plain numeric value.
    #[must_use]
    pub const fn as_numeric(&self) -> Option<&NumericLiteral> {
        match self {
            Self::Numeric(n) => Some(n),
            _ => None,
        }
    }

    /// The list, if this is one.
    #[must_use]
    pub const fn as_list(&self) -> Option<&ValueList> {
        match self {
            Self::List(list) => Some(list),
            _ => None,
        }
    }

    /// Returns true for `initial`, `inherit` and the other CSS-wide keywords.
    #[must_use]
    pub const fn is_css_wide(&self) -> bool {
        matches!(self, Self::CSSWide(_))
    }

    /// The serialized text.
    #[must_use]
    pub fn css_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CSSValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier(id) => f.write_str(id.into_static()),
            Self::CustomIdent(name) => f.write_str(name),
            Self::String(s) => write_string(f, s),
            Self::Url(url) => write!(f, "{url}"),
            Self::Numeric(n) => write!(f, "{n}"),
            Self::Math(m) => write!(f, "{m}"),
            Self::Color(c) => write!(f, "{c}"),
            Self::ColorKeyword(name) => f.write_str(name),
            Self::LightDark(light, dark) => write!(f, "light-dark({light}, {dark})"),
            Self::List(list) => write!(f, "{list}"),
            Self::GridLineNames(names) => write!(f, "[{names}]"),
            Self::Pair(pair) => write!(f, "{pair}"),
            Self::Quad(quad) => write!(f, "{quad}"),
            Self::Function(func) => write!(f, "{func}"),
            Self::GridIntegerRepeat(r) => write!(f, "{r}"),
            Self::GridAutoRepeat(r) => write!(f, "{r}"),
            Self::GridTemplateAreas(areas) => write!(f, "{areas}"),
            Self::ImageSet(options) => write!(f, "image-set({options})"),
            Self::ImageSetOption(option) => write!(f, "{option}"),
            Self::ImageSetType(mime) => {
                f.write_str("type(")?;
                write_string(f, mime)?;
                f.write_str(")")
            }
            Self::Gradient(g) => write!(f, "{g}"),
            Self::ContentDistribution(c) => write!(f, "{c}"),
            Self::RepeatStyle(r) => write!(f, "{r}"),
            Self::BorderImageSlice(s) => write!(f, "{s}"),
            Self::FontFamily(name) => write_family_name(f, name),
            Self::PendingSystemFont(id) => f.write_str(id.into_static()),
            Self::CSSWide(keyword) => write!(f, "{keyword}"),
            Self::Unparsed(text) => f.write_str(text),
            Self::PendingSubstitution { .. } => Ok(()),
        }
    }
}

/// [§ 2.1 Common Serializing Idioms](https://www.w3.org/TR/cssom-1/#serialize-a-string)
///
/// "To serialize a string means to create a string represented by '"',
/// followed by the result of applying the rules below to each character of
/// the given string, followed by '"'."
pub(crate) fn write_string(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in s.chars() {
        match c {
            '\0' => f.write_str("\u{FFFD}")?,
            '"' | '\\' => write!(f, "\\{c}")?,
            c if c.is_control() => write!(f, "\\{:x} ", u32::from(c))?,
            c => write!(f, "{c}")?,
        }
    }
    f.write_str("\"")
}

/// Family names that read back as a single identifier print bare;
/// anything else is quoted.
fn write_family_name(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    let is_plain_ident = name.chars().next().is_some_and(|c| c.is_alphabetic() || c == '_')
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_' || !c.is_ascii());
    let is_reserved = CSSValueID::from_ident(name).is_some()
        || CSSWideKeyword::from_ident(name).is_some()
        || name.eq_ignore_ascii_case("default");
    if is_plain_ident && !is_reserved {
        f.write_str(name)
    } else {
        write_string(f, name)
    }
}

/// A function kept by name, such as `minmax(...)` or `cubic-bezier(...)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionValue {
    /// Lowercase function name.
    pub name: String,
    /// The arguments, usually comma-separated.
    pub args: ValueList,
}

impl FunctionValue {
    /// Create a function value.
    #[must_use]
    pub fn new(name: impl Into<String>, args: ValueList) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}

impl fmt::Display for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_escaping() {
        let value = CSSValue::String("a\"b\\c".to_string());
        assert_eq!(value.css_text(), r#""a\"b\\c""#);
    }

    #[test]
    fn test_family_name_quoting() {
        assert_eq!(CSSValue::FontFamily("Arial".into()).css_text(), "Arial");
        assert_eq!(
            CSSValue::FontFamily("Times New Roman".into()).css_text(),
            "\"Times New Roman\""
        );
        assert_eq!(CSSValue::FontFamily("serif".into()).css_text(), "\"serif\"");
    }

    #[test]
    fn test_pending_substitution_is_empty() {
        let value = CSSValue::PendingSubstitution {
            shorthand: CSSPropertyID::Margin,
            text: "var(--x)".to_string(),
        };
        assert_eq!(value.css_text(), "");
    }
}
