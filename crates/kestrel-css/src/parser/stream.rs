//! A lazily-filled, backtracking cursor over CSS tokens.
//!
//! [§ 5.3 Parser Entry Points](https://www.w3.org/TR/css-syntax-3/#parser-entry-points)
//!
//! Property grammars read tokens through a [`TokenStream`]. The stream pulls
//! one token at a time from the tokenizer, keeps what it has pulled so that
//! [`TokenStream::save`] and [`TokenStream::restore`] can backtrack freely,
//! and tracks the simple blocks entered through the guard types so that
//! [`TokenStream::at_end`] stops at the end of the innermost block.

use core::ops::{Deref, DerefMut};

use crate::tokenizer::{BlockKind, CSSToken, CSSTokenizer};
use crate::values::CSSValueID;

static EOF_TOKEN: CSSToken = CSSToken::EOF;

/// A position in a [`TokenStream`], produced by [`TokenStream::save`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamState {
    offset: usize,
    depth: usize,
}

/// Peekable token cursor with unlimited backtracking within one parse.
#[derive(Debug, Clone)]
pub struct TokenStream {
    tokenizer: CSSTokenizer,
    /// Every token pulled so far; always holds the token at `offset`.
    tokens: Vec<CSSToken>,
    /// Code-point offset where each token in `tokens` starts.
    starts: Vec<usize>,
    offset: usize,
    /// Blocks entered through guards, innermost last.
    blocks: Vec<BlockKind>,
}

impl TokenStream {
    /// Start streaming tokens from `text`.
    #[must_use]
    pub fn new(text: &str) -> Self {
        let mut stream = Self {
            tokenizer: CSSTokenizer::new(text),
            tokens: Vec::new(),
            starts: Vec::new(),
            offset: 0,
            blocks: Vec::new(),
        };
        stream.fill();
        stream
    }

    fn fill(&mut self) {
        while self.tokens.len() <= self.offset {
            self.starts.push(self.tokenizer.position());
            self.tokens.push(self.tokenizer.next_token());
        }
    }

    fn advance(&mut self) {
        if !self.peek().is_eof() {
            self.offset += 1;
            self.fill();
        }
    }

    /// The next token, including whitespace.
    #[must_use]
    pub fn peek(&self) -> &CSSToken {
        self.tokens.get(self.offset).unwrap_or(&EOF_TOKEN)
    }

    /// The keyword of the next token if it is an `<ident-token>`.
    #[must_use]
    pub fn peek_id(&self) -> Option<CSSValueID> {
        self.peek().value_id()
    }

    /// The keyword of the next token if it is a `<function-token>`.
    #[must_use]
    pub fn peek_function_id(&self) -> Option<CSSValueID> {
        self.peek().function_id()
    }

    /// The next token's code point if it is a `<delim-token>`.
    #[must_use]
    pub fn peek_delim(&self) -> Option<char> {
        match self.peek() {
            CSSToken::Delim(c) => Some(*c),
            _ => None,
        }
    }

    /// Returns true at EOF, or at the token closing the innermost guarded block.
    #[must_use]
    pub fn at_end(&self) -> bool {
        let token = self.peek();
        token.is_eof() || self.blocks.last().is_some_and(|kind| token.closes(*kind))
    }

    /// [§ 5.4.7 Consume a component value](https://www.w3.org/TR/css-syntax-3/#consume-component-value)
    ///
    /// Consume the next token. A block-start token consumes its whole block;
    /// use a [`BlockGuard`] to read the block's contents instead. Returns EOF
    /// without moving when [`Self::at_end`] holds.
    pub fn consume(&mut self) -> CSSToken {
        if self.at_end() {
            return CSSToken::EOF;
        }
        let token = self.peek().clone();
        self.advance();
        if let Some(kind) = token.block_kind() {
            self.skip_block(kind);
        }
        token
    }

    /// Consume the next component value and any whitespace after it.
    pub fn consume_including_whitespace(&mut self) -> CSSToken {
        let token = self.consume();
        self.consume_whitespace();
        token
    }

    /// Skip whitespace tokens.
    pub fn consume_whitespace(&mut self) {
        while self.peek().is_whitespace() {
            self.advance();
        }
    }

    /// Skip to just past the token closing an already-opened block.
    fn skip_block(&mut self, kind: BlockKind) {
        let mut open = vec![kind];
        while let Some(&innermost) = open.last() {
            let token = self.peek();
            if token.is_eof() {
                return;
            }
            if token.closes(innermost) {
                let _ = open.pop();
            } else if let Some(nested) = token.block_kind() {
                open.push(nested);
            }
            self.advance();
        }
    }

    /// Consume the block-start token at the cursor and treat its matching
    /// close token as the end of the stream.
    fn enter_block(&mut self) -> bool {
        let Some(kind) = self.peek().block_kind() else {
            return false;
        };
        self.advance();
        self.blocks.push(kind);
        true
    }

    /// Skip the rest of the innermost block and consume its close token.
    fn leave_block(&mut self) {
        while !self.at_end() {
            let _ = self.consume();
        }
        if let Some(kind) = self.blocks.pop()
            && self.peek().closes(kind)
        {
            self.advance();
        }
    }

    /// Snapshot the cursor.
    #[must_use]
    pub fn save(&self) -> StreamState {
        StreamState {
            offset: self.offset,
            depth: self.blocks.len(),
        }
    }

    /// Move the cursor back to a snapshot taken inside the same block.
    pub fn restore(&mut self, state: StreamState) {
        debug_assert!(self.blocks.len() >= state.depth);
        self.blocks.truncate(state.depth);
        self.offset = state.offset;
        self.fill();
    }

    /// The source text between two snapshots.
    #[must_use]
    pub fn source_text(&self, from: StreamState, to: StreamState) -> String {
        let start = self.starts.get(from.offset).copied().unwrap_or_default();
        let end = self.starts.get(to.offset).copied().unwrap_or(start);
        self.tokenizer.slice(start, end)
    }

    /// Returns true if a `<function-token>` with this name appears anywhere
    /// ahead of the cursor, including inside nested blocks. The cursor does
    /// not move.
    pub fn contains_function(&mut self, name: &str) -> bool {
        let start = self.offset;
        let mut found = false;
        while !self.peek().is_eof() {
            if self.peek().function_matches(name) {
                found = true;
                break;
            }
            self.advance();
        }
        self.offset = start;
        found
    }
}

/// [§ 5.4.8 Consume a simple block](https://www.w3.org/TR/css-syntax-3/#consume-simple-block)
///
/// Scopes parsing to the contents of one simple block or function. Creating
/// the guard consumes the opening token; dropping it skips whatever is left
/// inside and consumes the matching close token.
#[derive(Debug)]
pub struct BlockGuard<'a> {
    stream: &'a mut TokenStream,
}

impl<'a> BlockGuard<'a> {
    /// Enter the block at the cursor, or `None` if the next token does not
    /// open one.
    pub fn new(stream: &'a mut TokenStream) -> Option<Self> {
        if stream.enter_block() {
            Some(Self { stream })
        } else {
            None
        }
    }
}

impl Drop for BlockGuard<'_> {
    fn drop(&mut self) {
        self.stream.leave_block();
    }
}

impl Deref for BlockGuard<'_> {
    type Target = TokenStream;

    fn deref(&self) -> &TokenStream {
        self.stream
    }
}

impl DerefMut for BlockGuard<'_> {
    fn deref_mut(&mut self) -> &mut TokenStream {
        self.stream
    }
}

/// A [`BlockGuard`] for speculative parses. Unless [`Self::release`]
/// succeeds, dropping it puts the stream back before the opening token.
#[derive(Debug)]
pub struct RestoringBlockGuard<'a> {
    stream: &'a mut TokenStream,
    state: StreamState,
    released: bool,
}

impl<'a> RestoringBlockGuard<'a> {
    /// Enter the block at the cursor, or `None` if the next token does not
    /// open one.
    pub fn new(stream: &'a mut TokenStream) -> Option<Self> {
        let state = stream.save();
        if !stream.enter_block() {
            return None;
        }
        Some(Self {
            stream,
            state,
            released: false,
        })
    }

    /// Commit the parse. Succeeds only when the block's contents have been
    /// fully consumed; the close token is then consumed too.
    pub fn release(&mut self) -> bool {
        if self.released || !self.stream.at_end() {
            return false;
        }
        self.stream.leave_block();
        self.released = true;
        true
    }
}

impl Drop for RestoringBlockGuard<'_> {
    fn drop(&mut self) {
        if !self.released {
            self.stream.restore(self.state);
        }
    }
}

impl Deref for RestoringBlockGuard<'_> {
    type Target = TokenStream;

    fn deref(&self) -> &TokenStream {
        self.stream
    }
}

impl DerefMut for RestoringBlockGuard<'_> {
    fn deref_mut(&mut self) -> &mut TokenStream {
        self.stream
    }
}

/// Restores the stream on drop unless released.
#[derive(Debug)]
pub struct SavePoint<'a> {
    stream: &'a mut TokenStream,
    state: StreamState,
    released: bool,
}

impl<'a> SavePoint<'a> {
    /// Snapshot the stream.
    pub fn new(stream: &'a mut TokenStream) -> Self {
        let state = stream.save();
        Self {
            stream,
            state,
            released: false,
        }
    }

    /// Keep everything consumed since the snapshot.
    pub const fn release(&mut self) {
        self.released = true;
    }
}

impl Drop for SavePoint<'_> {
    fn drop(&mut self) {
        if !self.released {
            self.stream.restore(self.state);
        }
    }
}

impl Deref for SavePoint<'_> {
    type Target = TokenStream;

    fn deref(&self) -> &TokenStream {
        self.stream
    }
}

impl DerefMut for SavePoint<'_> {
    fn deref_mut(&mut self) -> &mut TokenStream {
        self.stream
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consume_skips_whole_block() {
        let mut stream = TokenStream::new("calc(1 + (2)) x");
        assert!(matches!(stream.consume(), CSSToken::Function(_)));
        stream.consume_whitespace();
        assert!(stream.peek().ident_matches("x"));
    }

    #[test]
    fn test_restore_after_block_guard() {
        let mut stream = TokenStream::new("f(a b) c");
        let start = stream.save();
        {
            let guard = BlockGuard::new(&mut stream);
            assert!(guard.is_some());
        }
        assert!(stream.peek().is_whitespace());
        stream.restore(start);
        assert!(stream.peek().function_matches("f"));
    }
}
