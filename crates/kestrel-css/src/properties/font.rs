//! Font longhands.
//!
//! [CSS Fonts Module Level 4](https://www.w3.org/TR/css-fonts-4/)

use super::color::numeric_of;
use super::consumers::{
    ValueRange, at_end_or_important, consume_angle, consume_comma_list, consume_custom_ident,
    consume_ident_id, consume_ident_in, consume_integer, consume_length_or_percent,
    consume_number, consume_percent,
};
use crate::parser::context::{ParserContext, UnitlessQuirk};
use crate::parser::stream::{RestoringBlockGuard, TokenStream};
use crate::tokenizer::CSSToken;
use crate::values::{
    CSSValue, CSSValueID, CSSWideKeyword, FunctionValue, IdenticalValuesPolicy, NumericLiteral,
    Separator, ValueList, ValuePair, ValueRef,
};

use CSSValueID as V;

/// [§ 3.7 font](https://www.w3.org/TR/css-fonts-4/#font-prop)
///
/// "`caption | icon | menu | message-box | small-caption | status-bar`"
pub const SYSTEM_FONTS: &[CSSValueID] = &[
    V::Caption,
    V::Icon,
    V::Menu,
    V::MessageBox,
    V::SmallCaption,
    V::StatusBar,
];

/// Consume a system font keyword.
pub fn consume_system_font(stream: &mut TokenStream) -> Option<CSSValueID> {
    consume_ident_id(stream, SYSTEM_FONTS)
}

/// [§ 2.1.1 Generic font families](https://www.w3.org/TR/css-fonts-4/#generic-font-families)
const GENERIC_FAMILIES: &[CSSValueID] = &[
    V::Serif,
    V::SansSerif,
    V::Cursive,
    V::Fantasy,
    V::Monospace,
    V::SystemUi,
    V::UiSerif,
    V::UiSansSerif,
    V::UiMonospace,
    V::UiRounded,
    V::Math,
    V::Fangsong,
];

/// `<family-name> = <string> | <custom-ident>+`
///
/// A lone identifier may not be a CSS-wide keyword or `default`; a
/// sequence of identifiers joins with single spaces.
fn consume_family_name(stream: &mut TokenStream) -> Option<ValueRef> {
    if let CSSToken::String(name) = stream.peek() {
        let value = CSSValue::FontFamily(name.clone()).into_ref();
        let _ = stream.consume_including_whitespace();
        return Some(value);
    }

    let start = stream.save();
    let mut words = Vec::new();
    while let CSSToken::Ident(word) = stream.peek() {
        words.push(word.clone());
        let _ = stream.consume_including_whitespace();
    }
    let reserved = |word: &str| {
        CSSWideKeyword::from_ident(word).is_some() || word.eq_ignore_ascii_case("default")
    };
    match words.as_slice() {
        [] => None,
        [single] if reserved(single) => {
            stream.restore(start);
            None
        }
        _ => Some(CSSValue::FontFamily(words.join(" ")).into_ref()),
    }
}

/// [§ 2.1 Font family](https://www.w3.org/TR/css-fonts-4/#font-family-prop)
///
/// `[ <family-name> | <generic-family> ]#`
pub fn consume_font_family(stream: &mut TokenStream) -> Option<ValueRef> {
    consume_comma_list(stream, |s| {
        consume_ident_in(s, GENERIC_FAMILIES).or_else(|| consume_family_name(s))
    })
}

/// [§ 2.5 Font size](https://www.w3.org/TR/css-fonts-4/#font-size-prop)
///
/// `<absolute-size> | <relative-size> | <length-percentage [0,∞]> | math`
pub fn consume_font_size(
    stream: &mut TokenStream,
    ctx: &ParserContext,
    quirk: UnitlessQuirk,
) -> Option<ValueRef> {
    const KEYWORDS: &[CSSValueID] = &[
        V::XxSmall,
        V::XSmall,
        V::Small,
        V::Medium,
        V::Large,
        V::XLarge,
        V::XxLarge,
        V::XxxLarge,
        V::Larger,
        V::Smaller,
        V::Math,
    ];
    consume_ident_in(stream, KEYWORDS)
        .or_else(|| consume_length_or_percent(stream, ctx, ValueRange::NonNegative, quirk))
}

/// [§ 4.2 Line height](https://www.w3.org/TR/css-inline-3/#line-height-property)
///
/// `normal | <number [0,∞]> | <length-percentage [0,∞]>`
pub fn consume_line_height(stream: &mut TokenStream, ctx: &ParserContext) -> Option<ValueRef> {
    consume_ident_in(stream, &[V::Normal])
        .or_else(|| consume_number(stream, ValueRange::NonNegative))
        .or_else(|| {
            consume_length_or_percent(stream, ctx, ValueRange::NonNegative, UnitlessQuirk::Forbid)
        })
}

/// [§ 2.4 Font style](https://www.w3.org/TR/css-fonts-4/#font-style-prop)
///
/// `normal | italic | oblique <angle [-90deg,90deg]>?`
pub fn consume_font_style(stream: &mut TokenStream) -> Option<ValueRef> {
    if let Some(keyword) = consume_ident_in(stream, &[V::Normal, V::Italic]) {
        return Some(keyword);
    }
    let oblique = consume_ident_in(stream, &[V::Oblique])?;
    let Some(angle) = consume_angle(stream, false) else {
        return Some(oblique);
    };
    if let Some(literal) = numeric_of(&angle) {
        let degrees = literal.value * literal.unit.canonical_factor().unwrap_or(1.0);
        if !(-90.0..=90.0).contains(&degrees) {
            return None;
        }
    }
    Some(ValueList::from_values(Separator::Space, [oblique, angle]).into_value())
}

/// [§ 2.2 Font weight](https://www.w3.org/TR/css-fonts-4/#font-weight-prop)
///
/// `normal | bold | bolder | lighter | <number [1,1000]>`
///
/// A number outside the range is left unconsumed, so that `font: 0/0`
/// reads its leading zero as the size.
pub fn consume_font_weight(stream: &mut TokenStream) -> Option<ValueRef> {
    if let Some(keyword) = consume_ident_in(stream, &[V::Normal, V::Bold, V::Bolder, V::Lighter]) {
        return Some(keyword);
    }
    if let CSSToken::Number { value, .. } = stream.peek()
        && !(1.0..=1000.0).contains(value)
    {
        return None;
    }
    let start = stream.save();
    let weight = consume_number(stream, ValueRange::NonNegative)?;
    match numeric_of(&weight) {
        Some(literal) if !(1.0..=1000.0).contains(&literal.value) => {
            stream.restore(start);
            None
        }
        _ => Some(weight),
    }
}

/// The CSS Fonts 3 `font-stretch` keywords, the only form the `font`
/// shorthand accepts.
pub fn consume_font_stretch_keyword(stream: &mut TokenStream) -> Option<ValueRef> {
    consume_ident_in(
        stream,
        &[
            V::Normal,
            V::UltraCondensed,
            V::ExtraCondensed,
            V::Condensed,
            V::SemiCondensed,
            V::SemiExpanded,
            V::Expanded,
            V::ExtraExpanded,
            V::UltraExpanded,
        ],
    )
}

/// [§ 2.3 Font width](https://www.w3.org/TR/css-fonts-4/#font-stretch-prop)
///
/// `normal | <percentage [0,∞]> | ultra-condensed | ... | ultra-expanded`
pub fn consume_font_stretch(stream: &mut TokenStream) -> Option<ValueRef> {
    consume_font_stretch_keyword(stream).or_else(|| consume_percent(stream, ValueRange::NonNegative))
}

/// [§ 6.7 font-variant-caps](https://www.w3.org/TR/css-fonts-4/#font-variant-caps-prop)
pub fn consume_font_variant_caps(stream: &mut TokenStream) -> Option<ValueRef> {
    consume_ident_in(
        stream,
        &[
            V::Normal,
            V::SmallCaps,
            V::AllSmallCaps,
            V::PetiteCaps,
            V::AllPetiteCaps,
            V::Unicase,
            V::TitlingCaps,
        ],
    )
}

/// `normal | small-caps`, the variant grammar of the `font` shorthand.
pub fn consume_font_variant_css21(stream: &mut TokenStream) -> Option<ValueRef> {
    consume_ident_in(stream, &[V::Normal, V::SmallCaps])
}

/// [§ 6.5 font-variant-position](https://www.w3.org/TR/css-fonts-4/#font-variant-position-prop)
pub fn consume_font_variant_position(stream: &mut TokenStream) -> Option<ValueRef> {
    consume_ident_in(stream, &[V::Normal, V::Sub, V::Super])
}

/// [§ 6.13 font-variant-emoji](https://www.w3.org/TR/css-fonts-4/#font-variant-emoji-prop)
pub fn consume_font_variant_emoji(stream: &mut TokenStream) -> Option<ValueRef> {
    consume_ident_in(stream, &[V::Normal, V::Text, V::Emoji, V::Unicode])
}

/// [§ 2.6 font-size-adjust](https://www.w3.org/TR/css-fonts-5/#font-size-adjust-prop)
///
/// `none | [ ex-height | cap-height | ch-width | ic-width | ic-height ]?
///  [ from-font | <number [0,∞]> ]`
pub fn consume_font_size_adjust(stream: &mut TokenStream) -> Option<ValueRef> {
    if let Some(none) = consume_ident_in(stream, &[V::None]) {
        return Some(none);
    }
    let start = stream.save();
    let metric = consume_ident_id(
        stream,
        &[V::ExHeight, V::CapHeight, V::ChWidth, V::IcWidth, V::IcHeight],
    );
    let Some(value) = consume_number(stream, ValueRange::NonNegative)
        .or_else(|| consume_ident_in(stream, &[V::FromFont]))
    else {
        stream.restore(start);
        return None;
    };
    match metric {
        None | Some(V::ExHeight) => Some(value),
        Some(metric) => Some(
            CSSValue::Pair(ValuePair::new(
                CSSValue::ident(metric),
                value,
                IdenticalValuesPolicy::Keep,
            ))
            .into_ref(),
        ),
    }
}

/// [§ 6.1 font-kerning](https://www.w3.org/TR/css-fonts-4/#font-kerning-prop)
pub fn consume_font_kerning(stream: &mut TokenStream) -> Option<ValueRef> {
    consume_ident_in(stream, &[V::Auto, V::Normal, V::None])
}

/// [§ 8.3 font-optical-sizing](https://www.w3.org/TR/css-fonts-4/#font-optical-sizing-def)
pub fn consume_font_optical_sizing(stream: &mut TokenStream) -> Option<ValueRef> {
    consume_ident_in(stream, &[V::Auto, V::None])
}

/// An OpenType tag: a string of exactly four printable ASCII characters.
fn consume_opentype_tag(stream: &mut TokenStream) -> Option<String> {
    let CSSToken::String(tag) = stream.peek() else {
        return None;
    };
    let valid = tag.chars().count() == 4 && tag.chars().all(|c| (' '..='~').contains(&c));
    let tag = valid.then(|| tag.clone())?;
    let _ = stream.consume_including_whitespace();
    Some(tag)
}

/// `<feature-tag-value> = <opentype-tag> [ <integer [0,∞]> | on | off ]?`
///
/// Serializes as the bare tag when the value is `1`.
#[allow(clippy::float_cmp)]
fn consume_feature_tag(stream: &mut TokenStream) -> Option<ValueRef> {
    let tag = consume_opentype_tag(stream)?;
    let value = if let Some(integer) = consume_integer(stream, 0) {
        numeric_of(&integer).map_or(1.0, |n| n.value)
    } else {
        match consume_ident_id(stream, &[V::On, V::Off]) {
            Some(V::Off) => 0.0,
            _ => 1.0,
        }
    };
    let tag = CSSValue::String(tag).into_ref();
    if value == 1.0 {
        return Some(tag);
    }
    let value = CSSValue::numeric(NumericLiteral::integer(value));
    Some(ValueList::from_values(Separator::Space, [tag, value]).into_value())
}

/// [§ 7.1 font-feature-settings](https://www.w3.org/TR/css-fonts-4/#font-feature-settings-prop)
///
/// `normal | <feature-tag-value>#`
pub fn consume_font_feature_settings(stream: &mut TokenStream) -> Option<ValueRef> {
    consume_ident_in(stream, &[V::Normal]).or_else(|| consume_comma_list(stream, consume_feature_tag))
}

/// [§ 8.2 font-variation-settings](https://www.w3.org/TR/css-fonts-4/#font-variation-settings-def)
///
/// `normal | [ <opentype-tag> <number> ]#`
pub fn consume_font_variation_settings(stream: &mut TokenStream) -> Option<ValueRef> {
    if let Some(normal) = consume_ident_in(stream, &[V::Normal]) {
        return Some(normal);
    }
    consume_comma_list(stream, |s| {
        let start = s.save();
        let tag = consume_opentype_tag(s)?;
        let Some(value) = consume_number(s, ValueRange::All) else {
            s.restore(start);
            return None;
        };
        let tag = CSSValue::String(tag).into_ref();
        Some(ValueList::from_values(Separator::Space, [tag, value]).into_value())
    })
}

// ----------------------------------------------------------------------------
// font-variant-* accumulators
// ----------------------------------------------------------------------------

/// The outcome of offering the next token to a variant accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantParseResult {
    /// The token belonged to this property and was taken.
    ConsumedValue,
    /// The token belongs to this property but repeats a filled slot.
    DisallowedValue,
    /// The token is not part of this property's grammar.
    UnknownValue,
}

/// A multi-keyword `font-variant-*` value built up one token at a time,
/// so that the `font-variant` shorthand can interleave several of them.
pub trait VariantAccumulator: Default {
    /// Offer the next token.
    fn consume(&mut self, stream: &mut TokenStream) -> VariantParseResult;

    /// The collected value, or `normal` when nothing was consumed.
    fn finalize(self) -> ValueRef;
}

/// Keywords sorted into exclusive groups, each usable once.
#[derive(Debug)]
struct KeywordGroups {
    groups: &'static [&'static [CSSValueID]],
    seen: u32,
    values: ValueList,
}

impl KeywordGroups {
    const fn new(groups: &'static [&'static [CSSValueID]]) -> Self {
        Self {
            groups,
            seen: 0,
            values: ValueList::space(),
        }
    }

    fn consume(&mut self, stream: &mut TokenStream) -> VariantParseResult {
        let Some(id) = stream.peek_id() else {
            return VariantParseResult::UnknownValue;
        };
        let Some(group) = self.groups.iter().position(|g| g.contains(&id)) else {
            return VariantParseResult::UnknownValue;
        };
        let bit = 1 << group;
        if self.seen & bit != 0 {
            return VariantParseResult::DisallowedValue;
        }
        self.seen |= bit;
        let _ = stream.consume_including_whitespace();
        self.values.append(CSSValue::ident(id));
        VariantParseResult::ConsumedValue
    }

    fn finalize(self) -> ValueRef {
        if self.values.is_empty() {
            CSSValue::ident(V::Normal)
        } else {
            self.values.into_value()
        }
    }
}

macro_rules! keyword_accumulator {
    ($(#[$doc:meta])* $name:ident, $groups:expr) => {
        $(#[$doc])*
        #[derive(Debug)]
        pub struct $name(KeywordGroups);

        impl Default for $name {
            fn default() -> Self {
                Self(KeywordGroups::new($groups))
            }
        }

        impl VariantAccumulator for $name {
            fn consume(&mut self, stream: &mut TokenStream) -> VariantParseResult {
                self.0.consume(stream)
            }

            fn finalize(self) -> ValueRef {
                self.0.finalize()
            }
        }
    };
}

keyword_accumulator!(
    /// [§ 6.4 font-variant-ligatures](https://www.w3.org/TR/css-fonts-4/#font-variant-ligatures-prop)
    ///
    /// `<common-lig-values> || <discretionary-lig-values> ||
    ///  <historical-lig-values> || <contextual-alt-values>`
    LigaturesParser,
    &[
        &[V::CommonLigatures, V::NoCommonLigatures],
        &[V::DiscretionaryLigatures, V::NoDiscretionaryLigatures],
        &[V::HistoricalLigatures, V::NoHistoricalLigatures],
        &[V::Contextual, V::NoContextual],
    ]
);

keyword_accumulator!(
    /// [§ 6.7 font-variant-numeric](https://www.w3.org/TR/css-fonts-4/#font-variant-numeric-prop)
    ///
    /// `<numeric-figure-values> || <numeric-spacing-values> ||
    ///  <numeric-fraction-values> || ordinal || slashed-zero`
    NumericParser,
    &[
        &[V::LiningNums, V::OldstyleNums],
        &[V::ProportionalNums, V::TabularNums],
        &[V::DiagonalFractions, V::StackedFractions],
        &[V::Ordinal],
        &[V::SlashedZero],
    ]
);

keyword_accumulator!(
    /// [§ 6.10 font-variant-east-asian](https://www.w3.org/TR/css-fonts-4/#font-variant-east-asian-prop)
    ///
    /// `<east-asian-variant-values> || <east-asian-width-values> || ruby`
    EastAsianParser,
    &[
        &[
            V::Jis78,
            V::Jis83,
            V::Jis90,
            V::Jis04,
            V::Simplified,
            V::Traditional,
        ],
        &[V::FullWidth, V::ProportionalWidth],
        &[V::Ruby],
    ]
);

/// [§ 6.8 font-variant-alternates](https://www.w3.org/TR/css-fonts-4/#font-variant-alternates-prop)
///
/// `historical-forms || stylistic(<ident>) || styleset(<ident>#) ||
///  character-variant(<ident>#) || swash(<ident>) || ornaments(<ident>) ||
///  annotation(<ident>)`
#[derive(Debug, Default)]
pub struct AlternatesParser {
    historical_forms: bool,
    functions: Vec<ValueRef>,
    seen_functions: Vec<&'static str>,
}

impl AlternatesParser {
    const FUNCTIONS: &'static [(&'static str, bool)] = &[
        ("stylistic", false),
        ("styleset", true),
        ("character-variant", true),
        ("swash", false),
        ("ornaments", false),
        ("annotation", false),
    ];

    fn consume_function(stream: &mut TokenStream, name: &str, list: bool) -> Option<ValueRef> {
        let value = {
            let mut guard = RestoringBlockGuard::new(stream)?;
            guard.consume_whitespace();
            let args = if list {
                let values = consume_comma_list(&mut guard, |s| consume_custom_ident(s, &[]))?;
                values.as_list().map(ValueList::copy)?
            } else {
                let ident = consume_custom_ident(&mut guard, &[])?;
                ValueList::from_values(Separator::Comma, [ident])
            };
            guard
                .release()
                .then(|| CSSValue::Function(FunctionValue::new(name, args)).into_ref())?
        };
        stream.consume_whitespace();
        Some(value)
    }
}

impl VariantAccumulator for AlternatesParser {
    fn consume(&mut self, stream: &mut TokenStream) -> VariantParseResult {
        if stream.peek_id() == Some(V::HistoricalForms) {
            if self.historical_forms {
                return VariantParseResult::DisallowedValue;
            }
            self.historical_forms = true;
            let _ = stream.consume_including_whitespace();
            return VariantParseResult::ConsumedValue;
        }
        let CSSToken::Function(name) = stream.peek() else {
            return VariantParseResult::UnknownValue;
        };
        let name = name.to_ascii_lowercase();
        let Some(&(name, list)) = Self::FUNCTIONS.iter().find(|(n, _)| *n == name) else {
            return VariantParseResult::UnknownValue;
        };
        if self.seen_functions.contains(&name) {
            return VariantParseResult::DisallowedValue;
        }
        match Self::consume_function(stream, name, list) {
            Some(value) => {
                self.seen_functions.push(name);
                self.functions.push(value);
                VariantParseResult::ConsumedValue
            }
            None => VariantParseResult::DisallowedValue,
        }
    }

    fn finalize(self) -> ValueRef {
        let mut values = ValueList::space();
        for function in self.functions {
            values.append(function);
        }
        if self.historical_forms {
            values.append(CSSValue::ident(V::HistoricalForms));
        }
        if values.is_empty() {
            CSSValue::ident(V::Normal)
        } else {
            values.into_value()
        }
    }
}

/// A `font-variant-*` longhand: one of `keywords` alone, or one or more
/// tokens the accumulator takes.
fn consume_variant_longhand<A: VariantAccumulator>(
    stream: &mut TokenStream,
    keywords: &[CSSValueID],
) -> Option<ValueRef> {
    if let Some(keyword) = consume_ident_in(stream, keywords) {
        return Some(keyword);
    }
    let start = stream.save();
    let mut accumulator = A::default();
    loop {
        if accumulator.consume(stream) != VariantParseResult::ConsumedValue {
            stream.restore(start);
            return None;
        }
        if at_end_or_important(stream) {
            break;
        }
    }
    Some(accumulator.finalize())
}

/// `normal | none | <ligature values>`
pub fn consume_font_variant_ligatures(stream: &mut TokenStream) -> Option<ValueRef> {
    consume_variant_longhand::<LigaturesParser>(stream, &[V::Normal, V::None])
}

/// `normal | <numeric values>`
pub fn consume_font_variant_numeric(stream: &mut TokenStream) -> Option<ValueRef> {
    consume_variant_longhand::<NumericParser>(stream, &[V::Normal])
}

/// `normal | <east asian values>`
pub fn consume_font_variant_east_asian(stream: &mut TokenStream) -> Option<ValueRef> {
    consume_variant_longhand::<EastAsianParser>(stream, &[V::Normal])
}

/// `normal | <alternates values>`
pub fn consume_font_variant_alternates(stream: &mut TokenStream) -> Option<ValueRef> {
    consume_variant_longhand::<AlternatesParser>(stream, &[V::Normal])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str, consume: fn(&mut TokenStream) -> Option<ValueRef>) -> Option<String> {
        let mut stream = TokenStream::new(text);
        let value = consume(&mut stream)?;
        stream.at_end().then(|| value.css_text())
    }

    #[test]
    fn test_family_names() {
        assert_eq!(
            parse("Times New Roman, serif", consume_font_family).as_deref(),
            Some("\"Times New Roman\", serif")
        );
        assert_eq!(parse("'Arial'", consume_font_family).as_deref(), Some("Arial"));
        assert_eq!(parse("inherit", consume_font_family), None);
        assert_eq!(parse("default", consume_font_family), None);
        assert_eq!(parse("a, ", consume_font_family), None);
    }

    #[test]
    fn test_weight_and_style() {
        assert_eq!(parse("700", consume_font_weight).as_deref(), Some("700"));
        assert_eq!(parse("0", consume_font_weight), None);
        assert_eq!(parse("1001", consume_font_weight), None);
        assert_eq!(parse("oblique 20deg", consume_font_style).as_deref(), Some("oblique 20deg"));
        assert_eq!(parse("oblique 91deg", consume_font_style), None);
        assert_eq!(parse("oblique", consume_font_style).as_deref(), Some("oblique"));
    }

    #[test]
    fn test_variant_accumulators() {
        assert_eq!(
            parse("no-common-ligatures contextual", consume_font_variant_ligatures).as_deref(),
            Some("no-common-ligatures contextual")
        );
        assert_eq!(parse("common-ligatures no-common-ligatures", consume_font_variant_ligatures), None);
        assert_eq!(
            parse("slashed-zero tabular-nums", consume_font_variant_numeric).as_deref(),
            Some("slashed-zero tabular-nums")
        );
        assert_eq!(parse("jis78 ruby", consume_font_variant_east_asian).as_deref(), Some("jis78 ruby"));
        assert_eq!(
            parse("historical-forms styleset(a, b)", consume_font_variant_alternates).as_deref(),
            Some("styleset(a, b) historical-forms")
        );
    }

    #[test]
    fn test_feature_settings() {
        assert_eq!(
            parse("\"liga\" off, \"kern\", \"ss01\" 3", consume_font_feature_settings).as_deref(),
            Some("\"liga\" 0, \"kern\", \"ss01\" 3")
        );
        assert_eq!(parse("\"lig\"", consume_font_feature_settings), None);
        assert_eq!(
            parse("\"wght\" 650", consume_font_variation_settings).as_deref(),
            Some("\"wght\" 650")
        );
        assert_eq!(parse("cap-height 0.5", consume_font_size_adjust).as_deref(), Some("cap-height 0.5"));
        assert_eq!(parse("ex-height from-font", consume_font_size_adjust).as_deref(), Some("from-font"));
    }
}
