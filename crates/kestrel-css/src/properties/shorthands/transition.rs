//! `transition`.

use super::Expansion;
use crate::parser::stream::TokenStream;
use crate::properties::CSSPropertyID;
use crate::properties::consumers::{
    ValueRange, at_end_or_important, consume_comma_including_whitespace, consume_time,
};
use crate::properties::transforms::{
    consume_easing_function, consume_single_transition_property,
    consume_transition_behavior_value,
};
use crate::tokenizer::CSSToken;
use crate::values::{CSSValue, CSSValueID, NumericLiteral, Separator, UnitType, ValueList, ValueRef};

use CSSPropertyID as P;
use CSSValueID as V;

/// Components of one `<single-transition>`, tried in this order so that
/// the first time is the duration and the second the delay.
const PARSE_ORDER: [CSSPropertyID; 5] = [
    P::TransitionDuration,
    P::TransitionTimingFunction,
    P::TransitionDelay,
    P::TransitionBehavior,
    P::TransitionProperty,
];

fn consume_component(id: CSSPropertyID, stream: &mut TokenStream) -> Option<ValueRef> {
    match id {
        P::TransitionDuration => consume_time(stream, ValueRange::NonNegative),
        P::TransitionTimingFunction => consume_easing_function(stream),
        P::TransitionDelay => consume_time(stream, ValueRange::All),
        P::TransitionBehavior => consume_transition_behavior_value(stream),
        P::TransitionProperty => consume_single_transition_property(stream),
        _ => None,
    }
}

fn initial_component(id: CSSPropertyID) -> ValueRef {
    match id {
        P::TransitionProperty => CSSValue::ident(V::All),
        P::TransitionDuration | P::TransitionDelay => {
            CSSValue::numeric(NumericLiteral::new(0.0, UnitType::S))
        }
        P::TransitionTimingFunction => CSSValue::ident(V::Ease),
        _ => CSSValue::ident(V::Normal),
    }
}

/// [§ 2.5 The transition Shorthand Property](https://www.w3.org/TR/css-transitions-1/#transition-shorthand-property)
///
/// `<single-transition>#`, where
/// `<single-transition> = [ none | <single-transition-property> ] ||
///  <time> || <easing-function> || <time> || <transition-behavior-value>`
pub(super) fn expand_transition(out: &mut Expansion, stream: &mut TokenStream) -> Option<()> {
    let mut lists: [ValueList; 5] = core::array::from_fn(|_| ValueList::new(Separator::Comma));
    loop {
        // STEP 1: One transition, components in any order.
        let mut item: [Option<ValueRef>; 5] = Default::default();
        loop {
            let found = PARSE_ORDER.iter().zip(item.iter_mut()).any(|(&id, slot)| {
                if slot.is_some() {
                    return false;
                }
                *slot = consume_component(id, stream);
                slot.is_some()
            });
            if !found || at_end_or_important(stream) || matches!(stream.peek(), CSSToken::Comma) {
                break;
            }
        }
        if item.iter().all(Option::is_none) {
            return None;
        }

        // STEP 2: Fill what the transition left out.
        for ((&id, slot), list) in PARSE_ORDER.iter().zip(item).zip(lists.iter_mut()) {
            list.append(slot.unwrap_or_else(|| initial_component(id)));
        }

        if !consume_comma_including_whitespace(stream) {
            break;
        }
    }

    let [duration, timing, delay, behavior, property] = lists;
    // "none" names no property, so it cannot share the list with others.
    if property.len() > 1 && property.iter().any(|item| item.is_identifier(V::None)) {
        return None;
    }
    out.set(P::TransitionProperty, property.into_value());
    out.set(P::TransitionDuration, duration.into_value());
    out.set(P::TransitionTimingFunction, timing.into_value());
    out.set(P::TransitionDelay, delay.into_value());
    out.set(P::TransitionBehavior, behavior.into_value());
    Some(())
}

#[cfg(test)]
mod tests {
    use super::super::parse_shorthand;
    use super::*;
    use crate::parser::context::{LocalContext, ParserContext};

    fn values(text: &str) -> Option<Vec<String>> {
        let mut stream = TokenStream::new(text);
        let mut out = Vec::new();
        parse_shorthand(
            P::Transition,
            false,
            &mut stream,
            &ParserContext::default(),
            &LocalContext::default(),
            &mut out,
        )
        .then(|| out.iter().map(|e| e.value.css_text()).collect())
    }

    #[test]
    fn test_transition_defaults() {
        assert_eq!(
            values("opacity 1s").unwrap(),
            ["opacity", "1s", "ease", "0s", "normal"]
        );
    }

    #[test]
    fn test_transition_times_in_order() {
        assert_eq!(
            values("2s linear 500ms width allow-discrete").unwrap(),
            ["width", "2s", "linear", "500ms", "allow-discrete"]
        );
    }

    #[test]
    fn test_transition_lists() {
        assert!(values("color 1s, none").is_none());
        assert_eq!(
            values("color 1s, top 2s ease-in").unwrap(),
            ["color, top", "1s, 2s", "ease, ease-in", "0s, 0s", "normal, normal"]
        );
        assert!(values("1s 2s 3s").is_none());
        assert!(values("color,").is_none());
    }
}
