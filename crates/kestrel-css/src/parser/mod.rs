//! Parsing property values.
//!
//! [CSS Syntax Module Level 3](https://www.w3.org/TR/css-syntax-3/)

/// Per-parse configuration.
pub mod context;
/// Declaration-list splitting.
pub mod declaration;
/// Value entry points and `!important` handling.
pub mod property_parser;
/// The backtracking token cursor.
pub mod stream;

pub use context::{CSSParserMode, LocalContext, ParserContext, SecureContextMode, UnitlessQuirk};
pub use declaration::{Declaration, parse_declarations};
pub use property_parser::{CSSPropertyParser, parse_single_value, parse_value_text};
pub use stream::{BlockGuard, RestoringBlockGuard, SavePoint, StreamState, TokenStream};
