//! Longhand dispatch: one grammar per longhand property.

use super::CSSPropertyID;
use super::alignment::{
    consume_align_content, consume_align_items, consume_align_self, consume_flex_basis,
    consume_flex_direction, consume_flex_factor, consume_flex_wrap, consume_gap,
    consume_justify_content, consume_justify_items, consume_justify_self, consume_order,
};
use super::backgrounds::{
    consume_attachment, consume_background_box, consume_background_clip,
    consume_background_image, consume_background_position_axis, consume_background_repeat,
    consume_background_size_list, consume_border_color, consume_border_image_outset,
    consume_border_image_repeat, consume_border_image_slice, consume_border_image_width,
    consume_border_radius_corner, consume_border_width_side, consume_line_style,
    consume_line_width,
};
use super::box_model::{
    consume_box_sizing, consume_clear, consume_float, consume_inset, consume_margin,
    consume_opacity, consume_overflow, consume_padding, consume_position_scheme, consume_size,
    consume_visibility, consume_z_index,
};
use super::color::consume_color;
use super::consumers::{ValueRange, consume_comma_list, consume_ident_in, consume_length};
use super::display::{consume_content, consume_display};
use super::font::{
    consume_font_family, consume_font_feature_settings, consume_font_kerning,
    consume_font_optical_sizing, consume_font_size, consume_font_size_adjust,
    consume_font_stretch, consume_font_style, consume_font_variant_alternates,
    consume_font_variant_caps, consume_font_variant_east_asian, consume_font_variant_emoji,
    consume_font_variant_ligatures, consume_font_variant_numeric, consume_font_variant_position,
    consume_font_variation_settings, consume_font_weight, consume_line_height,
};
use super::grid::{
    TrackListType, consume_auto_flow, consume_grid_line, consume_template_areas,
    consume_template_rows_or_columns, consume_track_list,
};
use super::image::consume_image_or_none;
use super::text::{
    consume_spacing, consume_text_align, consume_text_decoration_line,
    consume_text_decoration_style, consume_text_decoration_thickness, consume_text_indent,
    consume_text_transform, consume_text_wrap, consume_white_space_collapse,
};
use super::transforms::{
    consume_transform, consume_transform_origin, consume_transition_behavior,
    consume_transition_delay, consume_transition_duration, consume_transition_property,
    consume_transition_timing_function,
};
use crate::parser::context::{LocalContext, ParserContext, UnitlessQuirk};
use crate::parser::stream::TokenStream;
use crate::values::{CSSValueID, ValueRef};

use CSSPropertyID as P;

/// Parse the value of longhand `id` from the front of `stream`.
///
/// The stream is left after the value; callers check for the end or a
/// trailing `!important`. Returns `None` for shorthands and for values
/// that do not match the grammar.
pub fn parse_longhand(
    id: CSSPropertyID,
    stream: &mut TokenStream,
    ctx: &ParserContext,
    local: &LocalContext,
) -> Option<ValueRef> {
    let quirk = local.unitless_quirk;
    match id {
        P::Width | P::Height | P::MinWidth | P::MinHeight => {
            consume_size(stream, ctx, CSSValueID::Auto)
        }
        P::MaxWidth | P::MaxHeight => consume_size(stream, ctx, CSSValueID::None),
        P::BoxSizing => consume_box_sizing(stream),

        P::MarginTop
        | P::MarginRight
        | P::MarginBottom
        | P::MarginLeft
        | P::MarginBlockStart
        | P::MarginBlockEnd
        | P::MarginInlineStart
        | P::MarginInlineEnd => consume_margin(stream, ctx),
        P::PaddingTop
        | P::PaddingRight
        | P::PaddingBottom
        | P::PaddingLeft
        | P::PaddingBlockStart
        | P::PaddingBlockEnd
        | P::PaddingInlineStart
        | P::PaddingInlineEnd => consume_padding(stream, ctx),
        P::Top
        | P::Right
        | P::Bottom
        | P::Left
        | P::InsetBlockStart
        | P::InsetBlockEnd
        | P::InsetInlineStart
        | P::InsetInlineEnd => consume_inset(stream, ctx, local),

        P::Display => consume_display(stream),
        P::Position => consume_position_scheme(stream),
        P::Float => consume_float(stream),
        P::Clear => consume_clear(stream),
        P::Visibility => consume_visibility(stream),
        P::ZIndex => consume_z_index(stream),
        P::Opacity => consume_opacity(stream),
        P::OverflowX | P::OverflowY => consume_overflow(stream),
        P::Content => consume_content(stream, ctx),

        P::Color | P::BackgroundColor => consume_color(stream, ctx, local),
        P::BackgroundImage => consume_background_image(stream, ctx),
        P::BackgroundPositionX => consume_background_position_axis(stream, ctx, true),
        P::BackgroundPositionY => consume_background_position_axis(stream, ctx, false),
        P::BackgroundSize => consume_background_size_list(stream, ctx),
        P::BackgroundRepeat => consume_background_repeat(stream),
        P::BackgroundAttachment => consume_comma_list(stream, consume_attachment),
        P::BackgroundOrigin => consume_comma_list(stream, consume_background_box),
        P::BackgroundClip => consume_comma_list(stream, consume_background_clip),

        P::BorderTopWidth
        | P::BorderRightWidth
        | P::BorderBottomWidth
        | P::BorderLeftWidth
        | P::BorderBlockStartWidth
        | P::BorderBlockEndWidth
        | P::BorderInlineStartWidth
        | P::BorderInlineEndWidth => consume_border_width_side(stream, ctx, local),
        P::BorderTopStyle
        | P::BorderRightStyle
        | P::BorderBottomStyle
        | P::BorderLeftStyle
        | P::BorderBlockStartStyle
        | P::BorderBlockEndStyle
        | P::BorderInlineStartStyle
        | P::BorderInlineEndStyle => consume_line_style(stream),
        P::BorderTopColor
        | P::BorderRightColor
        | P::BorderBottomColor
        | P::BorderLeftColor
        | P::BorderBlockStartColor
        | P::BorderBlockEndColor
        | P::BorderInlineStartColor
        | P::BorderInlineEndColor => consume_border_color(stream, ctx, local),
        P::BorderTopLeftRadius
        | P::BorderTopRightRadius
        | P::BorderBottomRightRadius
        | P::BorderBottomLeftRadius => consume_border_radius_corner(stream, ctx),
        P::BorderImageSource => consume_image_or_none(stream, ctx),
        P::BorderImageSlice => consume_border_image_slice(stream),
        P::BorderImageWidth => consume_border_image_width(stream, ctx),
        P::BorderImageOutset => consume_border_image_outset(stream, ctx),
        P::BorderImageRepeat => consume_border_image_repeat(stream),
        P::OutlineColor => consume_color(stream, ctx, &local.forbid_unitless()),
        // "auto | <outline-line-style>", where hidden is not allowed.
        P::OutlineStyle => match stream.peek_id() {
            Some(CSSValueID::Hidden) => None,
            _ => consume_ident_in(stream, &[CSSValueID::Auto]).or_else(|| consume_line_style(stream)),
        },
        P::OutlineWidth => consume_line_width(stream, ctx, UnitlessQuirk::Forbid),
        P::OutlineOffset => consume_length(stream, ctx, ValueRange::All, UnitlessQuirk::Forbid),

        P::TextAlign => consume_text_align(stream),
        P::TextTransform => consume_text_transform(stream),
        P::TextIndent => consume_text_indent(stream, ctx),
        P::LetterSpacing | P::WordSpacing => consume_spacing(stream, ctx),
        P::TextDecorationLine => consume_text_decoration_line(stream),
        P::TextDecorationStyle => consume_text_decoration_style(stream),
        P::TextDecorationColor => consume_color(stream, ctx, &local.forbid_unitless()),
        P::TextDecorationThickness => consume_text_decoration_thickness(stream, ctx),
        P::WhiteSpaceCollapse => consume_white_space_collapse(stream),
        P::TextWrap => consume_text_wrap(stream),

        P::FontStyle => consume_font_style(stream),
        P::FontVariantLigatures => consume_font_variant_ligatures(stream),
        P::FontVariantCaps => consume_font_variant_caps(stream),
        P::FontVariantNumeric => consume_font_variant_numeric(stream),
        P::FontVariantEastAsian => consume_font_variant_east_asian(stream),
        P::FontVariantAlternates => consume_font_variant_alternates(stream),
        P::FontVariantPosition => consume_font_variant_position(stream),
        P::FontVariantEmoji => consume_font_variant_emoji(stream),
        P::FontWeight => consume_font_weight(stream),
        P::FontStretch => consume_font_stretch(stream),
        P::FontSize => consume_font_size(stream, ctx, quirk),
        P::LineHeight => consume_line_height(stream, ctx),
        P::FontFamily => consume_font_family(stream),
        P::FontSizeAdjust => consume_font_size_adjust(stream),
        P::FontKerning => consume_font_kerning(stream),
        P::FontOpticalSizing => consume_font_optical_sizing(stream),
        P::FontFeatureSettings => consume_font_feature_settings(stream),
        P::FontVariationSettings => consume_font_variation_settings(stream),

        P::FlexDirection => consume_flex_direction(stream),
        P::FlexWrap => consume_flex_wrap(stream),
        P::FlexGrow | P::FlexShrink => consume_flex_factor(stream),
        P::FlexBasis => consume_flex_basis(stream, ctx),
        P::Order => consume_order(stream),
        P::AlignContent => consume_align_content(stream),
        P::JustifyContent => consume_justify_content(stream),
        P::AlignItems => consume_align_items(stream),
        P::JustifyItems => consume_justify_items(stream),
        P::AlignSelf => consume_align_self(stream),
        P::JustifySelf => consume_justify_self(stream),
        P::RowGap | P::ColumnGap => consume_gap(stream, ctx),

        P::GridTemplateRows | P::GridTemplateColumns => {
            consume_template_rows_or_columns(stream, ctx)
        }
        P::GridTemplateAreas => consume_template_areas(stream),
        P::GridAutoFlow => consume_auto_flow(stream),
        P::GridAutoRows | P::GridAutoColumns => {
            consume_track_list(stream, ctx, TrackListType::Auto)
        }
        P::GridRowStart | P::GridRowEnd | P::GridColumnStart | P::GridColumnEnd => {
            consume_grid_line(stream)
        }

        P::Transform => consume_transform(stream, ctx),
        P::TransformOrigin => consume_transform_origin(stream, ctx),
        P::TransitionProperty => consume_transition_property(stream),
        P::TransitionDuration => consume_transition_duration(stream),
        P::TransitionTimingFunction => consume_transition_timing_function(stream),
        P::TransitionDelay => consume_transition_delay(stream),
        P::TransitionBehavior => consume_transition_behavior(stream),

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_shorthands_have_no_longhand_grammar() {
        for id in CSSPropertyID::iter().filter(|id| id.is_shorthand()) {
            let mut stream = TokenStream::new("auto");
            let value =
                parse_longhand(id, &mut stream, &ParserContext::default(), &LocalContext::default());
            assert!(value.is_none(), "{id} parsed as a longhand");
        }
    }

    #[test]
    fn test_outline_style_rejects_hidden() {
        let parse = |text: &str| {
            let mut stream = TokenStream::new(text);
            parse_longhand(P::OutlineStyle, &mut stream, &ParserContext::default(), &LocalContext::default())
                .map(|v| v.css_text())
        };
        assert_eq!(parse("auto").as_deref(), Some("auto"));
        assert_eq!(parse("dashed").as_deref(), Some("dashed"));
        assert_eq!(parse("hidden"), None);
    }
}
