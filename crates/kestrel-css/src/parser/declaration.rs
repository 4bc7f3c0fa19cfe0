//! Splitting a declaration list into `name: value` pairs.

use crate::parser::stream::TokenStream;
use crate::tokenizer::CSSToken;

/// [§ 2.2 Declarations](https://www.w3.org/TR/css-syntax-3/#declaration)
///
/// One declaration as written: the property name and the raw value text,
/// `!important` included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// The property name as written.
    pub name: String,
    /// The value text, trimmed.
    pub value: String,
}

/// Skip to just past the next top-level `;`.
fn skip_to_semicolon(stream: &mut TokenStream) {
    while !stream.at_end() {
        if matches!(stream.consume(), CSSToken::Semicolon) {
            return;
        }
    }
}

/// [§ 5.4.6 Consume a declaration](https://www.w3.org/TR/css-syntax-3/#consume-declaration)
fn consume_declaration(stream: &mut TokenStream) -> Option<Declaration> {
    // "Consume the next input token."
    let CSSToken::Ident(name) = stream.consume_including_whitespace() else {
        return None;
    };

    // "If the next input token is anything other than a <colon-token>, this is a parse error.
    // Return nothing."
    if !matches!(stream.peek(), CSSToken::Colon) {
        return None;
    }
    let _ = stream.consume_including_whitespace();

    // "As long as the next input token is anything other than an <EOF-token>, consume a
    // component value and append it to the declaration's value."
    let start = stream.save();
    let mut end = start;
    while !stream.at_end() && !matches!(stream.peek(), CSSToken::Semicolon) {
        if !stream.consume().is_whitespace() {
            end = stream.save();
        }
    }
    Some(Declaration {
        name,
        value: stream.source_text(start, end),
    })
}

/// [§ 5.4.5 Consume a list of declarations](https://www.w3.org/TR/css-syntax-3/#consume-list-of-declarations)
///
/// Split `text` on top-level semicolons. A malformed declaration is
/// dropped and parsing resumes after the next `;`.
#[must_use]
pub fn parse_declarations(text: &str) -> Vec<Declaration> {
    let mut stream = TokenStream::new(text);
    let mut declarations = Vec::new();

    loop {
        match stream.peek() {
            // "<whitespace-token>" or "<semicolon-token>"
            // "Do nothing."
            CSSToken::Whitespace | CSSToken::Semicolon => {
                let _ = stream.consume();
            }

            // "<EOF-token>"
            // "Return the list of declarations."
            CSSToken::EOF => return declarations,

            // "<ident-token>"
            // "Consume a declaration. If anything was returned, append it to
            // the list of declarations."
            CSSToken::Ident(_) => match consume_declaration(&mut stream) {
                Some(declaration) => declarations.push(declaration),
                None => skip_to_semicolon(&mut stream),
            },

            // "anything else"
            // "This is a parse error. ... As long as the next input token is anything
            // other than a <semicolon-token> or <EOF-token>, consume a component value
            // and throw away the returned value."
            _ => skip_to_semicolon(&mut stream),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(text: &str) -> Vec<(String, String)> {
        parse_declarations(text)
            .into_iter()
            .map(|d| (d.name, d.value))
            .collect()
    }

    #[test]
    fn test_split_on_semicolons() {
        assert_eq!(
            pairs("color: red ; margin:1px 2px;;"),
            [
                ("color".to_string(), "red".to_string()),
                ("margin".to_string(), "1px 2px".to_string()),
            ]
        );
    }

    #[test]
    fn test_semicolons_inside_blocks() {
        assert_eq!(
            pairs("content: \"a;b\"; background: url(x;y.png) (a;b)"),
            [
                ("content".to_string(), "\"a;b\"".to_string()),
                ("background".to_string(), "url(x;y.png) (a;b)".to_string()),
            ]
        );
    }

    #[test]
    fn test_recovery() {
        assert_eq!(
            pairs("color red; 12px: x; width: 1px !important"),
            [("width".to_string(), "1px !important".to_string())]
        );
    }
}
