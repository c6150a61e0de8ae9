//! The token vocabulary produced by [`crate::Lexer`].
//!
//! A [`Token`] pairs a [`TokenKind`] with the raw source substring it was
//! scanned from (`value`) and the [`ktc_util::Position`] of its first
//! character. `value` is never decoded: escape sequences inside string and
//! character literals, and digit separators inside numeric literals, are
//! left exactly as they appeared in the source. Downstream consumers that
//! need the decoded form do that decoding themselves; nothing here needs
//! it, since pretty-printing and structural parsing both just replay the
//! substring verbatim.

use std::fmt;

use ktc_util::Position;

/// The category of a scanned token.
///
/// Trivia (`NewLine`, the comment kinds, `ShebangLine`) are only ever
/// produced when the lexer is configured to yield them; by default they
/// are skipped between ordinary tokens. See [`crate::LexerConfig`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Trivia
    ShebangLine,
    LineComment,
    DelimitedComment,
    NewLine,

    // Structural
    /// One of `( ) { } [ ] , ; :: ->` - see [`Token::value`] for which.
    Separator,
    At,

    // Literals
    RealLiteral,
    FloatLiteral,
    DoubleLiteral,
    IntegerLiteral,
    HexLiteral,
    BinLiteral,
    UnsignedLiteral,
    LongLiteral,
    BooleanLiteral,
    NullLiteral,
    CharacterLiteral,
    LineStringLiteral,
    MultiLineStringLiteral,

    // Names
    Identifier,
    /// A backtick-quoted identifier, e.g. `` `class` ``; `value` excludes
    /// the backticks.
    QuotedIdentifier,
    /// A word that is reserved and unconditionally unusable as an
    /// identifier: `val var fun ... typeof`, plus soft-keyword-like
    /// combinations this lexer fuses eagerly (`as?`, `return@label`, ...).
    HardKeyword,
    /// `...` - reserved but not otherwise meaningful to the lexer.
    Reserved,

    /// Any of the operator symbols/words: `+ - * / % = += ... in !in is
    /// !is .. : :: . ? ?. ?: -> => && || ! ++ -- ...`
    Operator,

    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A single scanned token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// The raw, undecoded source substring this token was scanned from.
    pub value: String,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            value: value.into(),
            position,
        }
    }

    pub fn eof(position: Position) -> Self {
        Self::new(TokenKind::Eof, "", position)
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    /// True for the trivia kinds that [`crate::LexerConfig::yield_comments`]
    /// gates.
    pub fn is_trivia(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::LineComment
                | TokenKind::DelimitedComment
                | TokenKind::ShebangLine
                | TokenKind::NewLine
        )
    }

    /// True when this token's value matches `text` and its kind is one of
    /// the kinds a grammar production would accept that literal text as
    /// (`Separator`, `Operator`, `HardKeyword`, `Reserved`, or plain
    /// `Identifier`). Kotlin's soft keywords (`where`, `by`, `get`, `set`,
    /// `constructor`, `companion`, `dynamic`, `public`, ...) are not
    /// reserved words at all - they lex as ordinary identifiers and only
    /// the parser, by checking this at a specific grammar position, gives
    /// them keyword meaning. `QuotedIdentifier` (backtick-escaped) never
    /// matches, since backticks exist precisely to use a keyword-shaped
    /// name as an ordinary identifier.
    pub fn is(&self, text: &str) -> bool {
        matches!(
            self.kind,
            TokenKind::Separator
                | TokenKind::Operator
                | TokenKind::HardKeyword
                | TokenKind::Reserved
                | TokenKind::Identifier
        ) && self.value == text
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?})@{}", self.kind, self.value, self.position)
    }
}

/// Hard keywords: unconditionally reserved, never usable as an identifier.
pub const HARD_KEYWORDS: &[&str] = &[
    "as", "break", "class", "continue", "do", "else", "false", "for", "fun", "if", "in",
    "interface", "is", "null", "object", "package", "return", "super", "this", "throw", "true",
    "try", "typealias", "typeof", "val", "var", "when", "while",
];

pub fn is_hard_keyword(word: &str) -> bool {
    HARD_KEYWORDS.contains(&word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hard_keyword_lookup() {
        assert!(is_hard_keyword("fun"));
        assert!(is_hard_keyword("typeof"));
        assert!(!is_hard_keyword("dynamic"));
        assert!(!is_hard_keyword("identifier"));
    }

    #[test]
    fn token_is_matches_value_and_class() {
        let tok = Token::new(TokenKind::Separator, "(", Position::START);
        assert!(tok.is("("));
        assert!(!tok.is(")"));
        let ident = Token::new(TokenKind::Identifier, "(", Position::START);
        assert!(!ident.is("("));
    }
}
