//! A peekable, markable cursor over a token stream.
//!
//! Grounded on a Python iterator used by a from-scratch Kotlin parser:
//! lookahead is cached in a deque, and a stack of "markers" records what
//! was consumed since each marker was pushed. Popping a marker either
//! merges its recording into the enclosing marker (speculative parse
//! succeeded, keep going) or replays it back onto the front of the cache
//! (speculative parse failed, or was pure lookahead - rewind). This is
//! what gives the parser unlimited backtracking without re-lexing.

use std::collections::VecDeque;

use ktc_lex::{Lexer, LexerConfig, Token, TokenKind};
use ktc_util::{LexResult, Position};

/// Wraps a [`Lexer`] behind a cache-and-marker cursor, surfacing
/// [`Token`]s (or the lex error that ended the stream).
pub struct TokenCursor<'a> {
    source: std::iter::Peekable<Lexer<'a>>,
    cache: VecDeque<Token>,
    markers: Vec<VecDeque<Token>>,
    last: Option<Token>,
    exhausted_at: Option<Position>,
    eof_error: Option<ktc_util::LexError>,
}

impl<'a> TokenCursor<'a> {
    pub fn new(source: &'a str, config: LexerConfig) -> Self {
        Self {
            source: Lexer::new(source, config).peekable(),
            cache: VecDeque::new(),
            markers: Vec::new(),
            last: None,
            exhausted_at: None,
            eof_error: None,
        }
    }

    fn pull_one(&mut self) -> Option<Token> {
        match self.source.next() {
            Some(Ok(tok)) => Some(tok),
            Some(Err(err)) => {
                self.eof_error = Some(err);
                None
            }
            None => None,
        }
    }

    /// The lex error that stopped the underlying stream, if any was hit
    /// while filling the cache.
    pub fn lex_error(&self) -> Option<&ktc_util::LexError> {
        self.eof_error.as_ref()
    }

    /// Look `offset` tokens ahead without consuming anything. `offset =
    /// 0` is the next token that `advance()` would return.
    pub fn peek(&mut self, offset: usize) -> Option<&Token> {
        while self.cache.len() <= offset {
            match self.pull_one() {
                Some(tok) => self.cache.push_back(tok),
                None => break,
            }
        }
        self.cache.get(offset)
    }

    /// Consume and return the next token, recording it into the
    /// innermost active marker.
    pub fn advance(&mut self) -> Option<Token> {
        let next = if let Some(tok) = self.cache.pop_front() {
            Some(tok)
        } else {
            self.pull_one()
        };
        if let Some(tok) = &next {
            if let Some(marker) = self.markers.last_mut() {
                marker.push_back(tok.clone());
            }
        }
        self.last = next.clone();
        next
    }

    /// The most recently advanced-over token.
    pub fn last(&self) -> Option<&Token> {
        self.last.as_ref()
    }

    /// Push a new marker onto the stack; every token `advance()` yields
    /// from now on is also recorded here until this marker is popped.
    pub fn push_marker(&mut self) {
        self.markers.push(VecDeque::new());
    }

    /// Pop the innermost marker. `reset = true` replays its tokens back
    /// onto the front of the cache (rewinding); `reset = false` merges
    /// them into the next-enclosing marker (or drops them if there is
    /// none), keeping the advance.
    pub fn pop_marker(&mut self, reset: bool) {
        let marker = self.markers.pop().expect("marker stack must not be empty");
        if marker.is_empty() {
            return;
        }
        if reset {
            for tok in marker.into_iter().rev() {
                self.cache.push_front(tok);
            }
        } else if let Some(outer) = self.markers.last_mut() {
            outer.extend(marker);
        }
    }

    /// Run `f` as a transactional scope: if it returns `Some`, the
    /// tokens consumed inside are kept (merged into the enclosing
    /// marker, if any); if it returns `None`, every token consumed
    /// inside is pushed back and replayed.
    pub fn transact<T>(&mut self, f: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        self.push_marker();
        let result = f(self);
        self.pop_marker(result.is_none());
        result
    }

    /// Run `f` purely for lookahead: tokens consumed inside are always
    /// replayed afterward, regardless of what `f` returns.
    pub fn simulate<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.push_marker();
        let result = f(self);
        self.pop_marker(true);
        result
    }

    pub fn is_at_end(&mut self) -> bool {
        self.peek(0).map(|t| t.is_eof()).unwrap_or(true)
    }
}
