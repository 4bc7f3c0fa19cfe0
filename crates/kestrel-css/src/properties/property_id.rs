//! Property identifiers and shorthand tables.

use kestrel_common::warning::warn_once;
use serde::Serialize;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// Every property this crate can parse.
///
/// Names parse ASCII case-insensitively and display in canonical
/// lowercase.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    IntoStaticStr,
    Serialize,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[serde(into = "&'static str")]
#[allow(missing_docs)]
pub enum CSSPropertyID {
    // Box sizing
    Width,
    Height,
    MinWidth,
    MinHeight,
    MaxWidth,
    MaxHeight,
    BoxSizing,

    // Margins, paddings, insets
    MarginTop,
    MarginRight,
    MarginBottom,
    MarginLeft,
    MarginBlockStart,
    MarginBlockEnd,
    MarginInlineStart,
    MarginInlineEnd,
    PaddingTop,
    PaddingRight,
    PaddingBottom,
    PaddingLeft,
    PaddingBlockStart,
    PaddingBlockEnd,
    PaddingInlineStart,
    PaddingInlineEnd,
    Top,
    Right,
    Bottom,
    Left,
    InsetBlockStart,
    InsetBlockEnd,
    InsetInlineStart,
    InsetInlineEnd,

    // Display and positioning
    Display,
    Position,
    Float,
    Clear,
    Visibility,
    ZIndex,
    Opacity,
    OverflowX,
    OverflowY,
    Content,

    // Colors and backgrounds
    Color,
    BackgroundColor,
    BackgroundImage,
    BackgroundPositionX,
    BackgroundPositionY,
    BackgroundSize,
    BackgroundRepeat,
    BackgroundAttachment,
    BackgroundOrigin,
    BackgroundClip,

    // Borders
    BorderTopWidth,
    BorderRightWidth,
    BorderBottomWidth,
    BorderLeftWidth,
    BorderTopStyle,
    BorderRightStyle,
    BorderBottomStyle,
    BorderLeftStyle,
    BorderTopColor,
    BorderRightColor,
    BorderBottomColor,
    BorderLeftColor,
    BorderBlockStartWidth,
    BorderBlockStartStyle,
    BorderBlockStartColor,
    BorderBlockEndWidth,
    BorderBlockEndStyle,
    BorderBlockEndColor,
    BorderInlineStartWidth,
    BorderInlineStartStyle,
    BorderInlineStartColor,
    BorderInlineEndWidth,
    BorderInlineEndStyle,
    BorderInlineEndColor,
    BorderTopLeftRadius,
    BorderTopRightRadius,
    BorderBottomRightRadius,
    BorderBottomLeftRadius,
    BorderImageSource,
    BorderImageSlice,
    BorderImageWidth,
    BorderImageOutset,
    BorderImageRepeat,
    OutlineColor,
    OutlineStyle,
    OutlineWidth,
    OutlineOffset,

    // Text
    TextAlign,
    TextTransform,
    TextIndent,
    LetterSpacing,
    WordSpacing,
    TextDecorationLine,
    TextDecorationStyle,
    TextDecorationColor,
    TextDecorationThickness,
    WhiteSpaceCollapse,
    TextWrap,

    // Fonts
    FontStyle,
    FontVariantLigatures,
    FontVariantCaps,
    FontVariantNumeric,
    FontVariantEastAsian,
    FontVariantAlternates,
    FontVariantPosition,
    FontVariantEmoji,
    FontWeight,
    FontStretch,
    FontSize,
    LineHeight,
    FontFamily,
    FontSizeAdjust,
    FontKerning,
    FontOpticalSizing,
    FontFeatureSettings,
    FontVariationSettings,

    // Flexbox and alignment
    FlexDirection,
    FlexWrap,
    FlexGrow,
    FlexShrink,
    FlexBasis,
    Order,
    AlignContent,
    JustifyContent,
    AlignItems,
    JustifyItems,
    AlignSelf,
    JustifySelf,
    RowGap,
    ColumnGap,

    // Grid
    GridTemplateRows,
    GridTemplateColumns,
    GridTemplateAreas,
    GridAutoFlow,
    GridAutoRows,
    GridAutoColumns,
    GridRowStart,
    GridRowEnd,
    GridColumnStart,
    GridColumnEnd,

    // Transforms and transitions
    Transform,
    TransformOrigin,
    TransitionProperty,
    TransitionDuration,
    TransitionTimingFunction,
    TransitionDelay,
    TransitionBehavior,

    // Shorthands
    Margin,
    Padding,
    Inset,
    MarginBlock,
    MarginInline,
    PaddingBlock,
    PaddingInline,
    InsetBlock,
    InsetInline,
    Overflow,
    Gap,
    Background,
    BackgroundPosition,
    Border,
    BorderBlock,
    BorderInline,
    BorderColor,
    BorderStyle,
    BorderWidth,
    BorderTop,
    BorderRight,
    BorderBottom,
    BorderLeft,
    BorderBlockStart,
    BorderBlockEnd,
    BorderInlineStart,
    BorderInlineEnd,
    BorderBlockColor,
    BorderBlockStyle,
    BorderBlockWidth,
    BorderInlineColor,
    BorderInlineStyle,
    BorderInlineWidth,
    BorderRadius,
    BorderImage,
    Outline,
    TextDecoration,
    WhiteSpace,
    Flex,
    FlexFlow,
    Font,
    FontVariant,
    GridTemplate,
    Grid,
    GridRow,
    GridColumn,
    GridArea,
    PlaceContent,
    PlaceItems,
    PlaceSelf,
    Transition,
}

use CSSPropertyID as P;

const MARGIN: &[P] = &[P::MarginTop, P::MarginRight, P::MarginBottom, P::MarginLeft];
const PADDING: &[P] = &[P::PaddingTop, P::PaddingRight, P::PaddingBottom, P::PaddingLeft];
const INSET: &[P] = &[P::Top, P::Right, P::Bottom, P::Left];
const BORDER_WIDTH: &[P] = &[
    P::BorderTopWidth,
    P::BorderRightWidth,
    P::BorderBottomWidth,
    P::BorderLeftWidth,
];
const BORDER_STYLE: &[P] = &[
    P::BorderTopStyle,
    P::BorderRightStyle,
    P::BorderBottomStyle,
    P::BorderLeftStyle,
];
const BORDER_COLOR: &[P] = &[
    P::BorderTopColor,
    P::BorderRightColor,
    P::BorderBottomColor,
    P::BorderLeftColor,
];
const BORDER: &[P] = &[
    P::BorderTopWidth,
    P::BorderRightWidth,
    P::BorderBottomWidth,
    P::BorderLeftWidth,
    P::BorderTopStyle,
    P::BorderRightStyle,
    P::BorderBottomStyle,
    P::BorderLeftStyle,
    P::BorderTopColor,
    P::BorderRightColor,
    P::BorderBottomColor,
    P::BorderLeftColor,
    P::BorderImageSource,
    P::BorderImageSlice,
    P::BorderImageWidth,
    P::BorderImageOutset,
    P::BorderImageRepeat,
];
const BORDER_BLOCK: &[P] = &[
    P::BorderBlockStartWidth,
    P::BorderBlockEndWidth,
    P::BorderBlockStartStyle,
    P::BorderBlockEndStyle,
    P::BorderBlockStartColor,
    P::BorderBlockEndColor,
];
const BORDER_INLINE: &[P] = &[
    P::BorderInlineStartWidth,
    P::BorderInlineEndWidth,
    P::BorderInlineStartStyle,
    P::BorderInlineEndStyle,
    P::BorderInlineStartColor,
    P::BorderInlineEndColor,
];
const BORDER_IMAGE: &[P] = &[
    P::BorderImageSource,
    P::BorderImageSlice,
    P::BorderImageWidth,
    P::BorderImageOutset,
    P::BorderImageRepeat,
];
const BORDER_RADIUS: &[P] = &[
    P::BorderTopLeftRadius,
    P::BorderTopRightRadius,
    P::BorderBottomRightRadius,
    P::BorderBottomLeftRadius,
];
const BACKGROUND: &[P] = &[
    P::BackgroundImage,
    P::BackgroundPositionX,
    P::BackgroundPositionY,
    P::BackgroundSize,
    P::BackgroundRepeat,
    P::BackgroundAttachment,
    P::BackgroundOrigin,
    P::BackgroundClip,
    P::BackgroundColor,
];
const FONT: &[P] = &[
    P::FontStyle,
    P::FontVariantLigatures,
    P::FontVariantCaps,
    P::FontVariantNumeric,
    P::FontVariantEastAsian,
    P::FontVariantAlternates,
    P::FontVariantPosition,
    P::FontVariantEmoji,
    P::FontWeight,
    P::FontStretch,
    P::FontSize,
    P::LineHeight,
    P::FontFamily,
    P::FontSizeAdjust,
    P::FontKerning,
    P::FontOpticalSizing,
    P::FontFeatureSettings,
    P::FontVariationSettings,
];
const FONT_VARIANT: &[P] = &[
    P::FontVariantLigatures,
    P::FontVariantCaps,
    P::FontVariantAlternates,
    P::FontVariantNumeric,
    P::FontVariantEastAsian,
    P::FontVariantPosition,
    P::FontVariantEmoji,
];
const GRID_TEMPLATE: &[P] = &[
    P::GridTemplateRows,
    P::GridTemplateColumns,
    P::GridTemplateAreas,
];
const GRID: &[P] = &[
    P::GridTemplateRows,
    P::GridTemplateColumns,
    P::GridTemplateAreas,
    P::GridAutoFlow,
    P::GridAutoRows,
    P::GridAutoColumns,
];
const GRID_AREA: &[P] = &[
    P::GridRowStart,
    P::GridColumnStart,
    P::GridRowEnd,
    P::GridColumnEnd,
];
const TRANSITION: &[P] = &[
    P::TransitionProperty,
    P::TransitionDuration,
    P::TransitionTimingFunction,
    P::TransitionDelay,
    P::TransitionBehavior,
];
const TEXT_DECORATION: &[P] = &[
    P::TextDecorationLine,
    P::TextDecorationThickness,
    P::TextDecorationStyle,
    P::TextDecorationColor,
];
const OUTLINE: &[P] = &[P::OutlineColor, P::OutlineStyle, P::OutlineWidth];

/// Properties that also parse with a `-webkit-` prefix.
const WEBKIT_ALIASES: &[P] = &[
    P::BorderRadius,
    P::BorderTopLeftRadius,
    P::BorderTopRightRadius,
    P::BorderBottomRightRadius,
    P::BorderBottomLeftRadius,
    P::BoxSizing,
    P::Flex,
    P::FlexDirection,
    P::FlexWrap,
    P::FlexFlow,
    P::FlexGrow,
    P::FlexShrink,
    P::FlexBasis,
    P::AlignItems,
    P::AlignSelf,
    P::AlignContent,
    P::JustifyContent,
    P::Order,
    P::Transform,
    P::TransformOrigin,
    P::Transition,
    P::TransitionProperty,
    P::TransitionDuration,
    P::TransitionTimingFunction,
    P::TransitionDelay,
];

impl CSSPropertyID {
    /// [§ 4.2 Shorthand Properties](https://www.w3.org/TR/css-cascade-5/#shorthand)
    ///
    /// The longhands a shorthand sets, in the order its expander emits
    /// them. Empty for longhands.
    #[must_use]
    pub const fn longhands(self) -> &'static [Self] {
        match self {
            Self::Margin => MARGIN,
            Self::Padding => PADDING,
            Self::Inset => INSET,
            Self::MarginBlock => &[P::MarginBlockStart, P::MarginBlockEnd],
            Self::MarginInline => &[P::MarginInlineStart, P::MarginInlineEnd],
            Self::PaddingBlock => &[P::PaddingBlockStart, P::PaddingBlockEnd],
            Self::PaddingInline => &[P::PaddingInlineStart, P::PaddingInlineEnd],
            Self::InsetBlock => &[P::InsetBlockStart, P::InsetBlockEnd],
            Self::InsetInline => &[P::InsetInlineStart, P::InsetInlineEnd],
            Self::Overflow => &[P::OverflowX, P::OverflowY],
            Self::Gap => &[P::RowGap, P::ColumnGap],
            Self::Background => BACKGROUND,
            Self::BackgroundPosition => &[P::BackgroundPositionX, P::BackgroundPositionY],
            Self::Border => BORDER,
            Self::BorderBlock => BORDER_BLOCK,
            Self::BorderInline => BORDER_INLINE,
            Self::BorderColor => BORDER_COLOR,
            Self::BorderStyle => BORDER_STYLE,
            Self::BorderWidth => BORDER_WIDTH,
            Self::BorderTop => &[P::BorderTopWidth, P::BorderTopStyle, P::BorderTopColor],
            Self::BorderRight => &[P::BorderRightWidth, P::BorderRightStyle, P::BorderRightColor],
            Self::BorderBottom => &[
                P::BorderBottomWidth,
                P::BorderBottomStyle,
                P::BorderBottomColor,
            ],
            Self::BorderLeft => &[P::BorderLeftWidth, P::BorderLeftStyle, P::BorderLeftColor],
            Self::BorderBlockStart => &[
                P::BorderBlockStartWidth,
                P::BorderBlockStartStyle,
                P::BorderBlockStartColor,
            ],
            Self::BorderBlockEnd => &[
                P::BorderBlockEndWidth,
                P::BorderBlockEndStyle,
                P::BorderBlockEndColor,
            ],
            Self::BorderInlineStart => &[
                P::BorderInlineStartWidth,
                P::BorderInlineStartStyle,
                P::BorderInlineStartColor,
            ],
            Self::BorderInlineEnd => &[
                P::BorderInlineEndWidth,
                P::BorderInlineEndStyle,
                P::BorderInlineEndColor,
            ],
            Self::BorderBlockColor => &[P::BorderBlockStartColor, P::BorderBlockEndColor],
            Self::BorderBlockStyle => &[P::BorderBlockStartStyle, P::BorderBlockEndStyle],
            Self::BorderBlockWidth => &[P::BorderBlockStartWidth, P::BorderBlockEndWidth],
            Self::BorderInlineColor => &[P::BorderInlineStartColor, P::BorderInlineEndColor],
            Self::BorderInlineStyle => &[P::BorderInlineStartStyle, P::BorderInlineEndStyle],
            Self::BorderInlineWidth => &[P::BorderInlineStartWidth, P::BorderInlineEndWidth],
            Self::BorderRadius => BORDER_RADIUS,
            Self::BorderImage => BORDER_IMAGE,
            Self::Outline => OUTLINE,
            Self::TextDecoration => TEXT_DECORATION,
            Self::WhiteSpace => &[P::WhiteSpaceCollapse, P::TextWrap],
            Self::Flex => &[P::FlexGrow, P::FlexShrink, P::FlexBasis],
            Self::FlexFlow => &[P::FlexDirection, P::FlexWrap],
            Self::Font => FONT,
            Self::FontVariant => FONT_VARIANT,
            Self::GridTemplate => GRID_TEMPLATE,
            Self::Grid => GRID,
            Self::GridRow => &[P::GridRowStart, P::GridRowEnd],
            Self::GridColumn => &[P::GridColumnStart, P::GridColumnEnd],
            Self::GridArea => GRID_AREA,
            Self::PlaceContent => &[P::AlignContent, P::JustifyContent],
            Self::PlaceItems => &[P::AlignItems, P::JustifyItems],
            Self::PlaceSelf => &[P::AlignSelf, P::JustifySelf],
            Self::Transition => TRANSITION,
            _ => &[],
        }
    }

    /// Returns true if this property expands into longhands.
    #[must_use]
    pub const fn is_shorthand(self) -> bool {
        !self.longhands().is_empty()
    }

    /// The canonical property name.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Returns true if `-webkit-<name>` is an accepted alias.
    #[must_use]
    pub fn has_webkit_alias(self) -> bool {
        WEBKIT_ALIASES.contains(&self)
    }
}

/// Map a property name to its id.
///
/// Canonical names match ASCII case-insensitively. A `-webkit-` alias of
/// a supported property resolves to that property with the alias flag
/// set; unsupported `-webkit-` names are reported once and rejected.
#[must_use]
pub fn resolve_property(name: &str) -> Option<(CSSPropertyID, bool)> {
    if let Ok(id) = name.parse::<CSSPropertyID>() {
        return Some((id, false));
    }
    let lower = name.to_ascii_lowercase();
    let unprefixed = lower.strip_prefix("-webkit-")?;
    match unprefixed.parse::<CSSPropertyID>() {
        Ok(id) if id.has_webkit_alias() => Some((id, true)),
        _ => {
            warn_once("CSS", &format!("unsupported property alias '{name}'"));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_longhands_are_not_shorthands() {
        for id in CSSPropertyID::iter() {
            for longhand in id.longhands() {
                assert!(!longhand.is_shorthand(), "{id} lists shorthand {longhand}");
            }
        }
    }

    #[test]
    fn test_resolve_property() {
        assert_eq!(resolve_property("Margin-Top"), Some((CSSPropertyID::MarginTop, false)));
        assert_eq!(
            resolve_property("-webkit-border-radius"),
            Some((CSSPropertyID::BorderRadius, true))
        );
        assert_eq!(resolve_property("-webkit-z-index"), None);
        assert_eq!(resolve_property("bogus"), None);
    }
}
