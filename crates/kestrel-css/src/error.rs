//! Error types for the text-level entry points.
//!
//! Grammar mismatches inside the parsers are `None`/`false`; these types
//! only surface at the boundary where a caller handed in a property name
//! or a value string.

use thiserror::Error;

use crate::properties::CSSPropertyID;

/// Why a property value could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The property name is not one this crate knows.
    #[error("unknown property '{0}'")]
    UnknownProperty(String),
    /// The value does not match the property's grammar.
    #[error("invalid value for {property}: '{value}'")]
    InvalidValue {
        /// The property being parsed.
        property: CSSPropertyID,
        /// The rejected text.
        value: String,
    },
    /// The value was empty or only whitespace.
    #[error("empty value for {0}")]
    EmptyValue(CSSPropertyID),
}

/// Errors from building values programmatically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    /// A list separator other than space, comma, or slash.
    #[error("unknown list separator '{0}'")]
    UnknownSeparator(String),
}
