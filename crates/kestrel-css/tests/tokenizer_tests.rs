//! Integration tests for the CSS tokenizer.

use kestrel_css::tokenizer::{CSSToken, CSSTokenizer, HashType, NumericType, tokenize};

#[test]
fn test_whitespace() {
    let tokens = tokenize("   \t\n  ");
    assert_eq!(tokens.len(), 2); // whitespace + EOF
    assert!(matches!(tokens[0], CSSToken::Whitespace));
    assert!(matches!(tokens[1], CSSToken::EOF));
}

#[test]
fn test_ident_and_function() {
    let tokens = tokenize("background-color rgb(");
    assert_eq!(tokens[0], CSSToken::Ident("background-color".into()));
    assert!(matches!(tokens[1], CSSToken::Whitespace));
    assert_eq!(tokens[2], CSSToken::Function("rgb".into()));
}

#[test]
fn test_escaped_ident() {
    let tokens = tokenize("\\41 b");
    assert_eq!(tokens[0], CSSToken::Ident("Ab".into()));
    assert_eq!(tokens.len(), 2);
}

#[test]
fn test_comments_are_dropped() {
    let tokens = tokenize("/* one */a/**/b");
    assert_eq!(
        tokens,
        [
            CSSToken::Ident("a".into()),
            CSSToken::Ident("b".into()),
            CSSToken::EOF,
        ]
    );
}

#[test]
fn test_hash_types() {
    let tokens = tokenize("#main #123");
    match &tokens[0] {
        CSSToken::Hash { value, hash_type } => {
            assert_eq!(value, "main");
            assert_eq!(*hash_type, HashType::Id);
        }
        _ => panic!("Expected Hash token"),
    }
    match &tokens[2] {
        CSSToken::Hash { value, hash_type } => {
            assert_eq!(value, "123");
            assert_eq!(*hash_type, HashType::Unrestricted);
        }
        _ => panic!("Expected Hash token"),
    }
}

#[test]
fn test_numbers() {
    let tokens = tokenize("10px 50% 1e3 +.5 -7");
    match &tokens[0] {
        CSSToken::Dimension {
            value,
            int_value,
            numeric_type,
            unit,
        } => {
            assert!((*value - 10.0).abs() < f64::EPSILON);
            assert_eq!(*int_value, Some(10));
            assert_eq!(*numeric_type, NumericType::Integer);
            assert_eq!(unit, "px");
        }
        _ => panic!("Expected Dimension token"),
    }
    assert!(matches!(tokens[2], CSSToken::Percentage { value, .. } if (value - 50.0).abs() < f64::EPSILON));
    assert!(matches!(
        tokens[4],
        CSSToken::Number { value, numeric_type: NumericType::Number, .. } if (value - 1000.0).abs() < f64::EPSILON
    ));
    assert!(matches!(tokens[6], CSSToken::Number { value, .. } if (value - 0.5).abs() < f64::EPSILON));
    assert!(matches!(tokens[8], CSSToken::Number { int_value: Some(-7), .. }));
}

#[test]
fn test_strings() {
    let tokens = tokenize("'single' \"dou\\\"ble\"");
    assert_eq!(tokens[0], CSSToken::String("single".into()));
    assert_eq!(tokens[2], CSSToken::String("dou\"ble".into()));
}

#[test]
fn test_bad_string_at_newline() {
    let tokens = tokenize("'abc\ndef");
    assert_eq!(tokens[0], CSSToken::BadString);
    assert!(matches!(tokens[1], CSSToken::Whitespace));
    assert_eq!(tokens[2], CSSToken::Ident("def".into()));
}

#[test]
fn test_urls() {
    assert_eq!(tokenize("url( foo.png )")[0], CSSToken::Url("foo.png".into()));
    assert_eq!(tokenize("url(a b)")[0], CSSToken::BadUrl);
    let quoted = tokenize("url(\"x.png\")");
    assert_eq!(quoted[0], CSSToken::Function("url".into()));
    assert_eq!(quoted[1], CSSToken::String("x.png".into()));
}

#[test]
fn test_punctuation() {
    let tokens = tokenize("<!--:;,[](){}-->");
    assert_eq!(
        tokens,
        [
            CSSToken::CDO,
            CSSToken::Colon,
            CSSToken::Semicolon,
            CSSToken::Comma,
            CSSToken::LeftBracket,
            CSSToken::RightBracket,
            CSSToken::LeftParen,
            CSSToken::RightParen,
            CSSToken::LeftBrace,
            CSSToken::RightBrace,
            CSSToken::CDC,
            CSSToken::EOF,
        ]
    );
}

#[test]
fn test_crlf_is_normalized() {
    let tokens = tokenize("a\r\nb");
    assert_eq!(tokens.len(), 4);
    assert!(matches!(tokens[1], CSSToken::Whitespace));
}

#[test]
fn test_tokenizer_is_lazy_iterator() {
    let mut tokenizer = CSSTokenizer::new("a b");
    assert_eq!(tokenizer.next(), Some(CSSToken::Ident("a".into())));
    assert_eq!(tokenizer.position(), 1);
    assert_eq!(tokenizer.by_ref().count(), 2);
    assert_eq!(tokenizer.next(), None);
    assert_eq!(tokenizer.next_token(), CSSToken::EOF);
}
