//! The crate-wide error taxonomy.
//!
//! `ktc-lex` and `ktc-par` each define their own `thiserror` enum for the
//! failures their phase can raise; [`Error`] composes the two so a caller
//! that drives lexer and parser together can match on a single type, the
//! same umbrella-over-per-phase-enum shape used elsewhere in this lineage.

use thiserror::Error;

use crate::Position;

/// A lexical failure, carrying the position at which it was detected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at {position}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub position: Position,
}

impl LexError {
    pub fn new(kind: LexErrorKind, position: Position) -> Self {
        Self { kind, position }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    #[error("unterminated delimited comment")]
    UnterminatedDelimitedComment,
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated multi-line string literal")]
    UnterminatedMultiLineString,
    #[error("unterminated character literal")]
    UnterminatedCharacter,
    #[error("empty character literal")]
    EmptyCharacterLiteral,
    #[error("illegal escape character '\\{0}'")]
    IllegalEscape(char),
    #[error("malformed unicode escape")]
    MalformedUnicodeEscape,
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),
    #[error("empty identifier")]
    EmptyBacktickIdentifier,
    #[error("unterminated identifier")]
    UnterminatedBacktickIdentifier,
    #[error("newline in backtick-quoted identifier")]
    NewlineInBacktickIdentifier,
}

/// A syntactic failure, carrying the position of the offending token and a
/// human-readable expected/found message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at {position}")]
pub struct ParseError {
    pub message: String,
    pub position: Position,
}

impl ParseError {
    pub fn new(message: impl Into<String>, position: Position) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }

    pub fn expected_found(what: &str, found: &str, position: Position) -> Self {
        Self::new(format!("expected {what}, but found '{found}'"), position)
    }

    pub fn expected_eof(what: &str, position: Position) -> Self {
        Self::new(format!("expected {what}, but reached end of file"), position)
    }
}

/// The umbrella failure of lexing-then-parsing: either phase can raise,
/// and a driver that wants "one error type" matches on this.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl Error {
    pub fn position(&self) -> Position {
        match self {
            Error::Lex(e) => e.position,
            Error::Parse(e) => e.position,
        }
    }
}

pub type LexResult<T> = Result<T, LexError>;
pub type ParseResult<T> = Result<T, ParseError>;
