//! Ordered value containers: lists, pairs and quads.
//!
//! [§ 2.2 Component Value Combinators](https://www.w3.org/TR/css-values-4/#component-combinators)

use core::fmt;

use kestrel_common::warning::warn_once;
use serde::Serialize;

use super::{CSSValue, ValueRef};
use crate::error::ValueError;

/// The literal text placed between list items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Separator {
    /// `a b`
    Space,
    /// `a, b`
    Comma,
    /// `a / b`
    Slash,
}

impl Separator {
    /// The serialized separator text.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Space => " ",
            Self::Comma => ", ",
            Self::Slash => " / ",
        }
    }
}

impl TryFrom<&str> for Separator {
    type Error = ValueError;

    /// Accepts the separator text with or without surrounding spaces.
    fn try_from(text: &str) -> Result<Self, Self::Error> {
        match text.trim() {
            "" => Ok(Self::Space),
            "," => Ok(Self::Comma),
            "/" => Ok(Self::Slash),
            other => {
                warn_once("CSS", &format!("unknown list separator '{other}'"));
                Err(ValueError::UnknownSeparator(other.to_string()))
            }
        }
    }
}

impl TryFrom<char> for Separator {
    type Error = ValueError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        let mut buf = [0; 4];
        Self::try_from(&*c.encode_utf8(&mut buf))
    }
}

/// [§ 2.2 Component Value Combinators](https://www.w3.org/TR/css-values-4/#component-combinators)
///
/// An insertion-ordered list of values with a fixed separator. Items are
/// shared, never deep-copied; an empty slot serializes as nothing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueList {
    separator: Separator,
    items: Vec<Option<ValueRef>>,
}

impl ValueList {
    /// An empty list with the given separator.
    #[must_use]
    pub const fn new(separator: Separator) -> Self {
        Self {
            separator,
            items: Vec::new(),
        }
    }

    /// An empty space-separated list.
    #[must_use]
    pub const fn space() -> Self {
        Self::new(Separator::Space)
    }

    /// An empty comma-separated list.
    #[must_use]
    pub const fn comma() -> Self {
        Self::new(Separator::Comma)
    }

    /// An empty slash-separated list.
    #[must_use]
    pub const fn slash() -> Self {
        Self::new(Separator::Slash)
    }

    /// Build a list from existing values.
    #[must_use]
    pub fn from_values(separator: Separator, values: impl IntoIterator<Item = ValueRef>) -> Self {
        Self {
            separator,
            items: values.into_iter().map(Some).collect(),
        }
    }

    /// The separator fixed at construction.
    #[must_use]
    pub const fn separator(&self) -> Separator {
        self.separator
    }

    /// Append a shared value.
    pub fn append(&mut self, value: ValueRef) {
        self.items.push(Some(value));
    }

    /// Append a slot that may be empty.
    pub fn append_slot(&mut self, value: Option<ValueRef>) {
        self.items.push(value);
    }

    /// Number of slots, including empty ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the list has no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The value at `index`, if present and non-empty.
    #[must_use]
    pub fn item(&self, index: usize) -> Option<&ValueRef> {
        self.items.get(index).and_then(Option::as_ref)
    }

    /// The first non-empty slot's value when it is the first slot.
    #[must_use]
    pub fn first(&self) -> Option<&ValueRef> {
        self.item(0)
    }

    /// The last slot's value.
    #[must_use]
    pub fn last(&self) -> Option<&ValueRef> {
        self.items.last().and_then(Option::as_ref)
    }

    /// Iterate the non-empty values.
    pub fn iter(&self) -> impl Iterator<Item = &ValueRef> {
        self.items.iter().flatten()
    }

    /// Returns true if any item equals `value`.
    #[must_use]
    pub fn has_value(&self, value: &CSSValue) -> bool {
        self.iter().any(|item| **item == *value)
    }

    /// A new list without the items equal to `value`, and whether anything
    /// was removed.
    #[must_use]
    pub fn remove_all(&self, value: &CSSValue) -> (Self, bool) {
        let items: Vec<_> = self
            .items
            .iter()
            .filter(|slot| slot.as_deref() != Some(value))
            .cloned()
            .collect();
        let removed = items.len() != self.items.len();
        (
            Self {
                separator: self.separator,
                items,
            },
            removed,
        )
    }

    /// A shallow copy sharing every item and keeping the separator.
    #[must_use]
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Finish building and share the list as a value.
    #[must_use]
    pub fn into_value(self) -> ValueRef {
        CSSValue::List(self).into_ref()
    }
}

impl fmt::Display for ValueList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, slot) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(self.separator.as_str())?;
            }
            if let Some(value) = slot {
                write!(f, "{value}")?;
            }
        }
        Ok(())
    }
}

/// Whether equal components collapse when serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum IdenticalValuesPolicy {
    /// Always print every component.
    Keep,
    /// Print the shortest form that expands back to the same values.
    Drop,
}

/// Two values, such as a `border-radius` corner or a `background-size`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValuePair {
    /// The first (usually horizontal) component.
    pub first: ValueRef,
    /// The second (usually vertical) component.
    pub second: ValueRef,
    /// Serialization policy.
    pub policy: IdenticalValuesPolicy,
}

impl ValuePair {
    /// Create a pair.
    #[must_use]
    pub const fn new(first: ValueRef, second: ValueRef, policy: IdenticalValuesPolicy) -> Self {
        Self {
            first,
            second,
            policy,
        }
    }
}

impl fmt::Display for ValuePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.policy == IdenticalValuesPolicy::Drop && self.first == self.second {
            write!(f, "{}", self.first)
        } else {
            write!(f, "{} {}", self.first, self.second)
        }
    }
}

/// Four values in top, right, bottom, left order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueQuad {
    /// Top component.
    pub top: ValueRef,
    /// Right component.
    pub right: ValueRef,
    /// Bottom component.
    pub bottom: ValueRef,
    /// Left component.
    pub left: ValueRef,
    /// Serialization policy.
    pub policy: IdenticalValuesPolicy,
}

impl ValueQuad {
    /// Create a quad.
    #[must_use]
    pub const fn new(
        top: ValueRef,
        right: ValueRef,
        bottom: ValueRef,
        left: ValueRef,
        policy: IdenticalValuesPolicy,
    ) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
            policy,
        }
    }

    /// [§ 4.2 Shorthand Properties](https://www.w3.org/TR/css-cascade-5/#shorthand)
    ///
    /// Fill missing sides with the 1/2/3/4-value rule: right defaults to top,
    /// bottom to top, left to right.
    #[must_use]
    pub fn from_sides(
        top: ValueRef,
        right: Option<ValueRef>,
        bottom: Option<ValueRef>,
        left: Option<ValueRef>,
        policy: IdenticalValuesPolicy,
    ) -> Self {
        let right = right.unwrap_or_else(|| top.clone());
        let bottom = bottom.unwrap_or_else(|| top.clone());
        let left = left.unwrap_or_else(|| right.clone());
        Self::new(top, right, bottom, left, policy)
    }
}

impl fmt::Display for ValueQuad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.policy == IdenticalValuesPolicy::Keep {
            return write!(f, "{} {} {} {}", self.top, self.right, self.bottom, self.left);
        }
        let show_left = self.left != self.right;
        let show_bottom = self.bottom != self.top || show_left;
        let show_right = self.right != self.top || show_bottom;

        write!(f, "{}", self.top)?;
        if show_right {
            write!(f, " {}", self.right)?;
        }
        if show_bottom {
            write!(f, " {}", self.bottom)?;
        }
        if show_left {
            write!(f, " {}", self.left)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::values::{CSSValueID, NumericLiteral};

    fn px(value: f64) -> ValueRef {
        CSSValue::numeric(NumericLiteral::px(value))
    }

    #[test]
    fn test_has_value_compares_by_equality() {
        let list = ValueList::from_values(Separator::Space, [px(1.0), CSSValue::ident(CSSValueID::Auto)]);
        assert!(list.has_value(&px(1.0)));
        assert!(list.has_value(&CSSValue::ident(CSSValueID::Auto)));
        assert!(!list.has_value(&px(2.0)));
    }

    #[test]
    fn test_remove_all_keeps_separator() {
        let list = ValueList::from_values(Separator::Slash, [px(1.0), px(2.0), px(1.0)]);
        let (rest, removed) = list.remove_all(&px(1.0));
        assert!(removed);
        assert_eq!(rest.len(), 1);
        assert_eq!(rest.separator(), Separator::Slash);
        assert_eq!(rest.to_string(), "2px");

        let (same, removed) = rest.remove_all(&px(5.0));
        assert!(!removed);
        assert_eq!(same, rest);
    }

    #[test]
    fn test_copy_shares_items() {
        let list = ValueList::from_values(Separator::Comma, [px(1.0), px(2.0)]);
        let copy = list.copy();
        assert_eq!(copy.separator(), Separator::Comma);
        assert_eq!(copy.to_string(), "1px, 2px");
        assert!(matches!((list.first(), copy.first()), (Some(a), Some(b)) if Arc::ptr_eq(a, b)));
    }

    #[test]
    fn test_separator_from_text() {
        assert_eq!(Separator::try_from(" , "), Ok(Separator::Comma));
        assert_eq!(Separator::try_from('/'), Ok(Separator::Slash));
        assert_eq!(Separator::try_from(' '), Ok(Separator::Space));
        assert_eq!(
            Separator::try_from(";"),
            Err(ValueError::UnknownSeparator(";".to_string()))
        );
    }
}
