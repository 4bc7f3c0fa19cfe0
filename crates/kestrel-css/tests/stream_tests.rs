//! Integration tests for the token stream and its block guards.

use kestrel_css::parser::{BlockGuard, RestoringBlockGuard, SavePoint, TokenStream};
use kestrel_css::tokenizer::CSSToken;
use kestrel_css::values::CSSValueID;

#[test]
fn test_leading_whitespace_is_visible() {
    let mut stream = TokenStream::new("  auto");
    assert!(stream.peek().is_whitespace());
    stream.consume_whitespace();
    assert_eq!(stream.peek_id(), Some(CSSValueID::Auto));
}

#[test]
fn test_save_and_restore() {
    let mut stream = TokenStream::new("a b c");
    let start = stream.save();
    let _ = stream.consume_including_whitespace();
    let _ = stream.consume_including_whitespace();
    assert!(stream.peek().ident_matches("c"));
    stream.restore(start);
    assert_eq!(stream.save(), start);
    assert!(stream.peek().ident_matches("a"));
}

#[test]
fn test_block_guard_ends_at_close_token() {
    let mut stream = TokenStream::new("rgb(1 2) x");
    {
        let Some(mut guard) = BlockGuard::new(&mut stream) else {
            panic!("Expected a block");
        };
        assert!(matches!(guard.consume_including_whitespace(), CSSToken::Number { .. }));
        assert!(matches!(guard.consume(), CSSToken::Number { .. }));
        assert!(guard.at_end());
        assert_eq!(guard.consume(), CSSToken::EOF);
    }
    stream.consume_whitespace();
    assert!(stream.peek().ident_matches("x"));
}

#[test]
fn test_block_guard_skips_unread_contents() {
    let mut stream = TokenStream::new("[a [b] c] d");
    drop(BlockGuard::new(&mut stream));
    stream.consume_whitespace();
    assert!(stream.peek().ident_matches("d"));
}

#[test]
fn test_restoring_guard() {
    let mut stream = TokenStream::new("f(a b)");
    {
        let Some(mut guard) = RestoringBlockGuard::new(&mut stream) else {
            panic!("Expected a block");
        };
        let _ = guard.consume_including_whitespace();
        assert!(!guard.release());
    }
    assert!(stream.peek().function_matches("f"));

    {
        let Some(mut guard) = RestoringBlockGuard::new(&mut stream) else {
            panic!("Expected a block");
        };
        let _ = guard.consume_including_whitespace();
        let _ = guard.consume_including_whitespace();
        assert!(guard.release());
    }
    assert!(stream.at_end());
}

#[test]
fn test_save_point() {
    let mut stream = TokenStream::new("a b");
    {
        let mut point = SavePoint::new(&mut stream);
        let _ = point.consume_including_whitespace();
    }
    assert!(stream.peek().ident_matches("a"));
    {
        let mut point = SavePoint::new(&mut stream);
        let _ = point.consume_including_whitespace();
        point.release();
    }
    assert!(stream.peek().ident_matches("b"));
}

#[test]
fn test_source_text_and_function_search() {
    let mut stream = TokenStream::new("1px calc(var(--x)) /* c */ end");
    assert!(stream.contains_function("var"));
    assert!(!stream.contains_function("env"));
    let start = stream.save();
    let _ = stream.consume_including_whitespace();
    let _ = stream.consume();
    let end = stream.save();
    assert_eq!(stream.source_text(start, end), "1px calc(var(--x))");
}
