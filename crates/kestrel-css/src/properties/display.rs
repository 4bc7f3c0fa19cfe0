//! `display` and `content`.
//!
//! [CSS Display Module Level 3](https://www.w3.org/TR/css-display-3/)

use super::consumers::{
    consume_custom_ident, consume_ident_in, consume_slash_including_whitespace, consume_string,
};
use super::image::consume_image;
use crate::parser::context::ParserContext;
use crate::parser::stream::{RestoringBlockGuard, TokenStream};
use crate::values::{CSSValue, CSSValueID, FunctionValue, Separator, ValueList, ValueRef};

use CSSValueID as V;

/// [§ 2.1 Outer Display Roles](https://www.w3.org/TR/css-display-3/#outer-role)
const fn is_display_outside(id: CSSValueID) -> bool {
    matches!(id, V::Inline | V::Block | V::RunIn)
}

/// [§ 2.2 Inner Display Layout Models](https://www.w3.org/TR/css-display-3/#inner-model)
const fn is_display_inside(id: CSSValueID) -> bool {
    matches!(
        id,
        V::Flow | V::FlowRoot | V::Table | V::Flex | V::Grid | V::Math | V::Ruby
    )
}

/// [§ 2.5 Box Generation](https://www.w3.org/TR/css-display-3/#box-generation)
const fn is_display_box(id: CSSValueID) -> bool {
    matches!(id, V::None | V::Contents)
}

/// [§ 2.4 Layout-Internal Display Types](https://www.w3.org/TR/css-display-3/#layout-specific-display)
const fn is_display_internal(id: CSSValueID) -> bool {
    matches!(
        id,
        V::TableRowGroup
            | V::TableHeaderGroup
            | V::TableFooterGroup
            | V::TableRow
            | V::TableCell
            | V::TableColumnGroup
            | V::TableColumn
            | V::TableCaption
            | V::RubyBase
            | V::RubyText
            | V::RubyBaseContainer
            | V::RubyTextContainer
    )
}

/// [§ 2.6 Precomposed Inline-level Display Values](https://www.w3.org/TR/css-display-3/#legacy-display)
const fn is_display_legacy(id: CSSValueID) -> bool {
    matches!(id, V::InlineBlock | V::InlineTable | V::InlineFlex | V::InlineGrid)
}

/// The keywords of a multi-keyword `display`, sorted into their roles.
#[derive(Debug, Default)]
struct DisplayKeywords {
    outside: Option<CSSValueID>,
    inside: Option<CSSValueID>,
    list_item: Option<CSSValueID>,
}

impl DisplayKeywords {
    /// Sort `ids` into roles, each filled at most once.
    fn validate(ids: &[CSSValueID]) -> Option<Self> {
        let mut result = Self::default();
        for &id in ids {
            if result.outside.is_none() && is_display_outside(id) {
                result.outside = Some(id);
            } else if result.inside.is_none() && is_display_inside(id) {
                result.inside = Some(id);
            } else if result.list_item.is_none() && id == V::ListItem {
                result.list_item = Some(id);
            } else {
                return None;
            }
        }
        Some(result)
    }

    /// Drop redundant keywords and fold into the precomposed legacy
    /// keywords where one exists.
    fn adjust(&mut self) {
        let outside = self.outside;
        let inside = self.inside;
        match inside {
            Some(V::Flow) if outside.is_some() => self.inside = None,
            Some(V::Flex | V::FlowRoot | V::Grid | V::Table) => {
                if outside == Some(V::Block) {
                    self.outside = None;
                } else if outside == Some(V::Inline) && self.list_item.is_none() {
                    self.outside = None;
                    self.inside = match inside {
                        Some(V::Flex) => Some(V::InlineFlex),
                        Some(V::FlowRoot) => Some(V::InlineBlock),
                        Some(V::Grid) => Some(V::InlineGrid),
                        _ => Some(V::InlineTable),
                    };
                }
            }
            Some(V::Math | V::Ruby) if outside == Some(V::Inline) => self.outside = None,
            _ => {}
        }
        if self.list_item.is_some() {
            if outside == Some(V::Block) {
                self.outside = None;
            }
            if inside == Some(V::Flow) {
                self.inside = None;
            }
        }
    }
}

fn consume_display_keywords(stream: &mut TokenStream, first: CSSValueID) -> Option<ValueRef> {
    let mut ids = vec![first];
    for _ in 0..2 {
        let Some(id) = stream.peek_id() else {
            break;
        };
        let _ = stream.consume_including_whitespace();
        ids.push(id);
    }

    let mut keywords = DisplayKeywords::validate(&ids)?;
    // "[ <display-outside>? && [ flow | flow-root ]? && list-item ]"
    if keywords.list_item.is_some()
        && let Some(inside) = keywords.inside
        && !matches!(inside, V::Flow | V::FlowRoot)
    {
        return None;
    }
    keywords.adjust();

    let parts: Vec<_> = [keywords.outside, keywords.inside, keywords.list_item]
        .into_iter()
        .flatten()
        .map(CSSValue::ident)
        .collect();
    match parts.as_slice() {
        [single] => Some(single.clone()),
        _ => Some(ValueList::from_values(Separator::Space, parts).into_value()),
    }
}

/// [§ 2 Box Layout Modes: the display property](https://www.w3.org/TR/css-display-3/#the-display-properties)
///
/// `[ <display-outside> || <display-inside> ] |
///  [ <display-outside>? && [ flow | flow-root ]? && list-item ] |
///  <display-internal> | <display-box> | <display-legacy>`
pub fn consume_display(stream: &mut TokenStream) -> Option<ValueRef> {
    let id = stream.peek_id()?;
    let _ = stream.consume_including_whitespace();
    if stream.peek_id().is_some() {
        return consume_display_keywords(stream, id);
    }
    if id == V::Flow {
        return Some(CSSValue::ident(V::Block));
    }
    let valid = id == V::ListItem
        || is_display_box(id)
        || is_display_internal(id)
        || is_display_legacy(id)
        || is_display_inside(id)
        || is_display_outside(id);
    valid.then(|| CSSValue::ident(id))
}

/// `attr(<ident>)`
fn consume_attr(stream: &mut TokenStream) -> Option<ValueRef> {
    if !stream.peek().function_matches("attr") {
        return None;
    }
    let value = {
        let mut guard = RestoringBlockGuard::new(stream)?;
        guard.consume_whitespace();
        let name = consume_custom_ident(&mut guard, &[])?;
        let args = ValueList::from_values(Separator::Comma, [name]);
        guard
            .release()
            .then(|| CSSValue::Function(FunctionValue::new("attr", args)).into_ref())?
    };
    stream.consume_whitespace();
    Some(value)
}

/// [§ 1 Inserting and replacing content](https://www.w3.org/TR/css-content-3/#content-property)
///
/// `normal | none | [ <content-replacement> | <content-list> ]
///  [/ <string> ]?`
pub fn consume_content(stream: &mut TokenStream, ctx: &ParserContext) -> Option<ValueRef> {
    if let Some(id) = consume_ident_in(stream, &[V::None, V::Normal]) {
        return Some(id);
    }

    let mut values = ValueList::space();
    loop {
        let value = consume_image(stream, ctx)
            .or_else(|| consume_string(stream))
            .or_else(|| consume_attr(stream))
            .or_else(|| {
                consume_ident_in(
                    stream,
                    &[V::OpenQuote, V::CloseQuote, V::NoOpenQuote, V::NoCloseQuote],
                )
            });
        match value {
            Some(value) => values.append(value),
            None => break,
        }
    }
    if values.is_empty() {
        return None;
    }

    if !consume_slash_including_whitespace(stream) {
        return Some(values.into_value());
    }
    let mut alt_text = ValueList::space();
    alt_text.append(consume_string(stream)?);
    let mut outer = ValueList::slash();
    outer.append(values.into_value());
    outer.append(alt_text.into_value());
    Some(outer.into_value())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn display(text: &str) -> Option<String> {
        let mut stream = TokenStream::new(text);
        let value = consume_display(&mut stream)?;
        stream.at_end().then(|| value.css_text())
    }

    #[test]
    fn test_display_canonicalization() {
        assert_eq!(display("flow").as_deref(), Some("block"));
        assert_eq!(display("inline flow-root").as_deref(), Some("inline-block"));
        assert_eq!(display("block flex").as_deref(), Some("flex"));
        assert_eq!(display("inline grid").as_deref(), Some("inline-grid"));
        assert_eq!(display("block flow").as_deref(), Some("block"));
        assert_eq!(display("inline ruby").as_deref(), Some("ruby"));
        assert_eq!(display("block flow list-item").as_deref(), Some("list-item"));
        assert_eq!(display("inline flow-root list-item").as_deref(), Some("inline flow-root list-item"));
        assert_eq!(display("list-item grid"), None);
        assert_eq!(display("block inline"), None);
        assert_eq!(display("bogus"), None);
    }
}
