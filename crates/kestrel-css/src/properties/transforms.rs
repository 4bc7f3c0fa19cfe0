//! Transform and transition longhands.
//!
//! [CSS Transforms Module Level 1](https://www.w3.org/TR/css-transforms-1/)
//! [CSS Transitions Level 1](https://www.w3.org/TR/css-transitions-1/)

use super::color::numeric_of;
use super::consumers::{
    ValueRange, consume_angle, consume_comma_including_whitespace, consume_comma_list,
    consume_custom_ident, consume_ident_in, consume_length, consume_length_or_percent,
    consume_number, consume_number_or_percent, consume_one_or_two_value_position,
    consume_positive_integer, consume_space_list, consume_time,
};
use super::CSSPropertyID;
use crate::parser::context::{ParserContext, UnitlessQuirk};
use crate::parser::stream::{RestoringBlockGuard, TokenStream};
use crate::tokenizer::CSSToken;
use crate::values::{CSSValue, CSSValueID, FunctionValue, Separator, ValueList, ValueRef};

use CSSValueID as V;

/// The argument grammar of one transform function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TransformArgs {
    /// Exactly this many `<number>`s.
    Numbers(usize),
    /// `<length-percentage>` then an optional second one.
    Translate,
    /// One `<length-percentage>`.
    TranslateAxis,
    /// One `<length>`.
    TranslateZ,
    /// `<length-percentage>, <length-percentage>, <length>`
    Translate3d,
    /// `[<number> | <percentage>]{1,2}`
    Scale,
    /// One `<number> | <percentage>`.
    ScaleAxis,
    /// One `<angle> | <zero>`.
    Angle,
    /// `[<angle> | <zero>]{1,2}`
    Skew,
    /// `<length [0,∞]> | none`
    Perspective,
}

impl TransformArgs {
    /// The minimum and maximum argument counts.
    const fn arity(self) -> (usize, usize) {
        match self {
            Self::Numbers(n) => (n, n),
            Self::Translate | Self::Scale | Self::Skew => (1, 2),
            Self::Translate3d => (3, 3),
            Self::TranslateAxis
            | Self::TranslateZ
            | Self::ScaleAxis
            | Self::Angle
            | Self::Perspective => (1, 1),
        }
    }

    fn consume_arg(
        self,
        stream: &mut TokenStream,
        ctx: &ParserContext,
        index: usize,
    ) -> Option<ValueRef> {
        let length_percent = |s: &mut TokenStream| {
            consume_length_or_percent(s, ctx, ValueRange::All, UnitlessQuirk::Forbid)
        };
        match self {
            Self::Numbers(_) => consume_number(stream, ValueRange::All),
            Self::Translate | Self::TranslateAxis => length_percent(stream),
            Self::Translate3d if index < 2 => length_percent(stream),
            Self::Translate3d | Self::TranslateZ => {
                consume_length(stream, ctx, ValueRange::All, UnitlessQuirk::Forbid)
            }
            Self::Scale | Self::ScaleAxis => consume_number_or_percent(stream, ValueRange::All),
            Self::Angle | Self::Skew => consume_angle(stream, true),
            Self::Perspective => consume_ident_in(stream, &[V::None]).or_else(|| {
                consume_length(stream, ctx, ValueRange::NonNegative, UnitlessQuirk::Forbid)
            }),
        }
    }
}

/// [§ 9 The Transform Functions](https://www.w3.org/TR/css-transforms-1/#transform-functions)
/// and the 3D functions of Level 2, by canonical name.
const TRANSFORM_FUNCTIONS: &[(&str, TransformArgs)] = &[
    ("matrix", TransformArgs::Numbers(6)),
    ("matrix3d", TransformArgs::Numbers(16)),
    ("translate", TransformArgs::Translate),
    ("translateX", TransformArgs::TranslateAxis),
    ("translateY", TransformArgs::TranslateAxis),
    ("translateZ", TransformArgs::TranslateZ),
    ("translate3d", TransformArgs::Translate3d),
    ("scale", TransformArgs::Scale),
    ("scaleX", TransformArgs::ScaleAxis),
    ("scaleY", TransformArgs::ScaleAxis),
    ("scaleZ", TransformArgs::ScaleAxis),
    ("rotate", TransformArgs::Angle),
    ("rotateX", TransformArgs::Angle),
    ("rotateY", TransformArgs::Angle),
    ("rotateZ", TransformArgs::Angle),
    ("skew", TransformArgs::Skew),
    ("skewX", TransformArgs::Angle),
    ("skewY", TransformArgs::Angle),
    ("perspective", TransformArgs::Perspective),
];

fn consume_transform_args(
    stream: &mut TokenStream,
    ctx: &ParserContext,
    kind: TransformArgs,
) -> Option<ValueList> {
    let (min, max) = kind.arity();
    let mut args = ValueList::comma();
    for index in 0..max {
        if index > 0 && !consume_comma_including_whitespace(stream) {
            if index < min {
                return None;
            }
            break;
        }
        args.append(kind.consume_arg(stream, ctx, index)?);
    }
    Some(args)
}

/// One `<transform-function>`, named in its canonical camel case.
pub fn consume_transform_function(
    stream: &mut TokenStream,
    ctx: &ParserContext,
) -> Option<ValueRef> {
    let CSSToken::Function(name) = stream.peek() else {
        return None;
    };
    let &(canonical, kind) = TRANSFORM_FUNCTIONS
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(name))?;
    let value = {
        let mut guard = RestoringBlockGuard::new(stream)?;
        guard.consume_whitespace();
        let args = consume_transform_args(&mut guard, ctx, kind)?;
        guard
            .release()
            .then(|| CSSValue::Function(FunctionValue::new(canonical, args)).into_ref())?
    };
    stream.consume_whitespace();
    Some(value)
}

/// [§ 7 The transform Property](https://www.w3.org/TR/css-transforms-1/#transform-property)
///
/// `none | <transform-function>+`
pub fn consume_transform(stream: &mut TokenStream, ctx: &ParserContext) -> Option<ValueRef> {
    if let Some(none) = consume_ident_in(stream, &[V::None]) {
        return Some(none);
    }
    consume_space_list(stream, |s| consume_transform_function(s, ctx))
}

/// [§ 8 The transform-origin Property](https://www.w3.org/TR/css-transforms-1/#transform-origin-property)
///
/// A one- or two-value `<position>` followed by an optional z `<length>`.
pub fn consume_transform_origin(stream: &mut TokenStream, ctx: &ParserContext) -> Option<ValueRef> {
    let (x, y) = consume_one_or_two_value_position(stream, ctx)?;
    let mut list = ValueList::from_values(Separator::Space, [x, y]);
    if let Some(z) = consume_length(stream, ctx, ValueRange::All, UnitlessQuirk::Forbid) {
        list.append(z);
    }
    Some(list.into_value())
}

// ----------------------------------------------------------------------------
// Transitions
// ----------------------------------------------------------------------------

/// `all | <custom-ident>`. Known property names are stored in their
/// canonical spelling.
fn consume_transition_target(stream: &mut TokenStream) -> Option<ValueRef> {
    if let Some(all) = consume_ident_in(stream, &[V::All]) {
        return Some(all);
    }
    if let CSSToken::Ident(name) = stream.peek()
        && let Ok(id) = name.parse::<CSSPropertyID>()
    {
        let _ = stream.consume_including_whitespace();
        return Some(CSSValue::CustomIdent(id.name().to_string()).into_ref());
    }
    consume_custom_ident(stream, &[V::None])
}

/// [§ 2.1 The transition-property Property](https://www.w3.org/TR/css-transitions-1/#transition-property-property)
///
/// One item of `none | <single-transition-property>#`. `none` is accepted
/// here; list callers reject it unless it is the only item.
pub fn consume_single_transition_property(stream: &mut TokenStream) -> Option<ValueRef> {
    consume_ident_in(stream, &[V::None]).or_else(|| consume_transition_target(stream))
}

/// `none | <single-transition-property>#`
pub fn consume_transition_property(stream: &mut TokenStream) -> Option<ValueRef> {
    let list = consume_comma_list(stream, consume_single_transition_property)?;
    let items = list.as_list()?;
    if items.len() > 1 && items.iter().any(|item| item.is_identifier(V::None)) {
        return None;
    }
    Some(list)
}

/// `<time [0s,∞]>#`
pub fn consume_transition_duration(stream: &mut TokenStream) -> Option<ValueRef> {
    consume_comma_list(stream, |s| consume_time(s, ValueRange::NonNegative))
}

/// `<time>#`
pub fn consume_transition_delay(stream: &mut TokenStream) -> Option<ValueRef> {
    consume_comma_list(stream, |s| consume_time(s, ValueRange::All))
}

/// `normal | allow-discrete`
pub fn consume_transition_behavior_value(stream: &mut TokenStream) -> Option<ValueRef> {
    consume_ident_in(stream, &[V::Normal, V::AllowDiscrete])
}

/// [§ 2.4 The transition-behavior Property](https://drafts.csswg.org/css-transitions-2/#transition-behavior-property)
pub fn consume_transition_behavior(stream: &mut TokenStream) -> Option<ValueRef> {
    consume_comma_list(stream, consume_transition_behavior_value)
}

/// [§ 3.1 Cubic Bézier Easing Functions](https://www.w3.org/TR/css-easing-1/#cubic-bezier-easing-functions)
///
/// `cubic-bezier(<number [0,1]>, <number>, <number [0,1]>, <number>)`
fn consume_cubic_bezier(stream: &mut TokenStream) -> Option<ValueList> {
    let mut args = ValueList::comma();
    for index in 0..4 {
        if index > 0 && !consume_comma_including_whitespace(stream) {
            return None;
        }
        let value = consume_number(stream, ValueRange::All)?;
        if index % 2 == 0
            && numeric_of(&value).is_some_and(|n| !(0.0..=1.0).contains(&n.value))
        {
            return None;
        }
        args.append(value);
    }
    Some(args)
}

/// [§ 4.1 Step Easing Functions](https://www.w3.org/TR/css-easing-1/#step-easing-functions)
///
/// `steps(<integer>, <step-position>?)`. The default `end` position is
/// not serialized.
fn consume_steps(stream: &mut TokenStream) -> Option<ValueList> {
    let count = consume_positive_integer(stream)?;
    let mut args = ValueList::comma();
    args.append(count.clone());
    if !consume_comma_including_whitespace(stream) {
        return Some(args);
    }
    let position = consume_ident_in(
        stream,
        &[V::JumpStart, V::JumpEnd, V::JumpNone, V::JumpBoth, V::Start, V::End],
    )?;
    if position.is_identifier(V::JumpNone) && numeric_of(&count).is_some_and(|n| n.value < 2.0) {
        return None;
    }
    if !position.is_identifier(V::End) && !position.is_identifier(V::JumpEnd) {
        args.append(position);
    }
    Some(args)
}

/// [§ 2 Easing Functions](https://www.w3.org/TR/css-easing-1/#easing-functions)
///
/// `linear | ease | ease-in | ease-out | ease-in-out | step-start |
///  step-end | <cubic-bezier()> | <steps()>`
pub fn consume_easing_function(stream: &mut TokenStream) -> Option<ValueRef> {
    if let Some(keyword) = consume_ident_in(
        stream,
        &[
            V::Linear,
            V::Ease,
            V::EaseIn,
            V::EaseOut,
            V::EaseInOut,
            V::StepStart,
            V::StepEnd,
        ],
    ) {
        return Some(keyword);
    }
    let name = if stream.peek().function_matches("cubic-bezier") {
        "cubic-bezier"
    } else if stream.peek().function_matches("steps") {
        "steps"
    } else {
        return None;
    };
    let value = {
        let mut guard = RestoringBlockGuard::new(stream)?;
        guard.consume_whitespace();
        let args = if name == "steps" {
            consume_steps(&mut guard)?
        } else {
            consume_cubic_bezier(&mut guard)?
        };
        guard
            .release()
            .then(|| CSSValue::Function(FunctionValue::new(name, args)).into_ref())?
    };
    stream.consume_whitespace();
    Some(value)
}

/// `<easing-function>#`
pub fn consume_transition_timing_function(stream: &mut TokenStream) -> Option<ValueRef> {
    consume_comma_list(stream, consume_easing_function)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str, consume: fn(&mut TokenStream) -> Option<ValueRef>) -> Option<String> {
        let mut stream = TokenStream::new(text);
        let value = consume(&mut stream)?;
        stream.at_end().then(|| value.css_text())
    }

    fn transform(text: &str) -> Option<String> {
        parse(text, |s| consume_transform(s, &ParserContext::default()))
    }

    #[test]
    fn test_transform_functions() {
        assert_eq!(
            transform("translatex(10px) ROTATE(0)").as_deref(),
            Some("translateX(10px) rotate(0deg)")
        );
        assert_eq!(transform("scale(1, 50%)").as_deref(), Some("scale(1, 50%)"));
        assert_eq!(transform("matrix(1, 0, 0, 1, 0)"), None);
        assert_eq!(transform("translate(1px,)"), None);
        assert_eq!(transform("perspective(-1px)"), None);
        assert_eq!(transform("none").as_deref(), Some("none"));
    }

    #[test]
    fn test_easing_functions() {
        let easing = |s: &mut TokenStream| consume_transition_timing_function(s);
        assert_eq!(parse("steps(3, end)", easing).as_deref(), Some("steps(3)"));
        assert_eq!(parse("steps(3, jump-both)", easing).as_deref(), Some("steps(3, jump-both)"));
        assert_eq!(parse("steps(1, jump-none)", easing), None);
        assert_eq!(parse("steps(0)", easing), None);
        assert_eq!(
            parse("cubic-bezier(0.1, -2, 1, 3), ease", easing).as_deref(),
            Some("cubic-bezier(0.1, -2, 1, 3), ease")
        );
        assert_eq!(parse("cubic-bezier(1.5, 0, 0, 0)", easing), None);
    }

    #[test]
    fn test_transition_property() {
        assert_eq!(
            parse("Opacity, my-prop", consume_transition_property).as_deref(),
            Some("opacity, my-prop")
        );
        assert_eq!(parse("none", consume_transition_property).as_deref(), Some("none"));
        assert_eq!(parse("none, opacity", consume_transition_property), None);
        assert_eq!(parse("inherit", consume_transition_property), None);
    }

    #[test]
    fn test_transition_duration_rejects_negative() {
        assert_eq!(parse("1s, 200ms", consume_transition_duration).as_deref(), Some("1s, 200ms"));
        assert_eq!(parse("-1s", consume_transition_duration), None);
        assert_eq!(parse("-1s", consume_transition_delay).as_deref(), Some("-1s"));
    }
}
