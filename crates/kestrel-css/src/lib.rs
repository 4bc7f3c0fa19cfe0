//! CSS tokenizer, property value parser, and shorthand expansion for the Kestrel engine.
//!
//! # Scope
//!
//! This crate implements:
//! - **CSS Tokenizer** ([§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization))
//!   - All token types: ident, function, at-keyword, hash, string, url, number, dimension, etc.
//!   - Comment handling
//!   - Escape sequences
//!
//! - **Value Parsing** ([CSS Values Level 4](https://www.w3.org/TR/css-values-4/))
//!   - Lengths, percentages, angles, times, resolutions, and `calc()`
//!   - Colors, including `light-dark()`
//!   - Images, gradients, and `image-set()`
//!   - Grid templates, lines, and areas
//!
//! - **Shorthand Expansion** ([CSS Cascading Level 5](https://www.w3.org/TR/css-cascade-5/#shorthand))
//!   - Every shorthand expands into all of its longhands, or into nothing
//!   - CSS-wide keywords and `var()` values apply to every longhand
//!
//! - **Declaration Blocks** ([CSSOM](https://drafts.csswg.org/cssom/#css-declaration-blocks))
//!   - Declaration-list parsing with error recovery
//!   - `!important` handling
//!   - Serialization back to text
//!
//! # Not Yet Implemented
//!
//! - Selectors and style rules
//! - The cascade and computed values
//! - `var()` substitution

/// Error types.
pub mod error;
/// Value parsing per [§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing).
pub mod parser;
/// Property ids and grammars per [CSS Cascading Level 5](https://www.w3.org/TR/css-cascade-5/).
pub mod properties;
/// Declaration blocks per [CSSOM](https://drafts.csswg.org/cssom/#css-declaration-blocks).
pub mod style;
/// CSS tokenizer per [§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization).
pub mod tokenizer;
/// Parsed values per [CSS Values Level 4](https://www.w3.org/TR/css-values-4/).
pub mod values;

// Re-exports for convenience
pub use error::{ParseError, ValueError};
pub use parser::{CSSParserMode, CSSPropertyParser, ParserContext, parse_single_value, parse_value_text};
pub use properties::{CSSPropertyID, PropertyValue, resolve_property};
pub use style::{MutablePropertyValueSet, SetResult};
pub use tokenizer::{CSSToken, CSSTokenizer};
pub use values::{CSSValue, ValueRef};
