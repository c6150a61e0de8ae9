//! Tokenizes Kotlin source text.
//!
//! [`Lexer`] is an iterator of [`ktc_util::LexResult<Token>`]: it scans one
//! token per `next()` call and stops (returns `None`) at end of input or
//! after the first error, since this grammar has no lexical error
//! recovery. See [`token`] for the token vocabulary and [`cursor`] /
//! [`unicode`] for the character-level plumbing the lexer is built on.

pub mod cursor;
mod lexer;
pub mod token;
pub mod unicode;

pub use lexer::Lexer;
pub use token::{Token, TokenKind};

/// Lexer behavior knobs. The only current knob is whether comment trivia
/// (`LineComment`/`DelimitedComment`) is yielded as tokens or silently
/// skipped; every other token, including `ShebangLine`, is always
/// emitted. `NewLine` tokens are governed by bracket nesting instead (see
/// [`lexer::core::Mode`]) and are unaffected by this setting.
#[derive(Clone, Copy, Debug)]
pub struct LexerConfig {
    pub yield_comments: bool,
}

impl Default for LexerConfig {
    /// Comments are yielded by default (spec: the flag "default on").
    fn default() -> Self {
        Self { yield_comments: true }
    }
}
