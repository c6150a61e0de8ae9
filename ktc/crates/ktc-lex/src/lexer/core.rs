//! Main `Lexer` struct, token dispatch, and the bracket-mode stack that
//! decides whether a run of newlines is syntactically significant.
//!
//! Kotlin treats `NEWLINE` as a real token, but only outside `(...)` and
//! `[...]` - a lambda parameter list or an array access spanning several
//! lines does not need trailing commas or explicit continuations. A `{`
//! re-opens newline significance, even nested inside parens (a lambda
//! argument's body cares about its own statement breaks), so this is a
//! stack, not a flag.

use ktc_util::{LexError, LexErrorKind, LexResult, LineIndex, Position};

use crate::cursor::Cursor;
use crate::token::{Token, TokenKind};
use crate::LexerConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Mode {
    /// Newlines are significant and surface as `NewLine` tokens.
    Default,
    /// Newlines are skipped silently; set while inside `(...)` / `[...]`.
    Inside,
}

pub struct Lexer<'a> {
    pub(crate) cursor: Cursor<'a>,
    pub(crate) modes: Vec<Mode>,
    pub(crate) config: LexerConfig,
    line_index: LineIndex,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, config: LexerConfig) -> Self {
        Self {
            cursor: Cursor::new(source),
            modes: vec![Mode::Default],
            config,
            line_index: LineIndex::new(source),
        }
    }

    pub(crate) fn position(&self) -> Position {
        self.line_index.offset_to_position(self.cursor.position())
    }

    pub(crate) fn error(&self, kind: LexErrorKind, at: Position) -> LexError {
        LexError::new(kind, at)
    }

    pub(crate) fn make_token(&self, kind: TokenKind, start: usize, start_pos: Position) -> Token {
        Token::new(kind, self.cursor.slice_from(start), start_pos)
    }

    pub(crate) fn push_mode(&mut self, mode: Mode) {
        self.modes.push(mode);
    }

    pub(crate) fn pop_mode(&mut self) {
        if self.modes.len() > 1 {
            self.modes.pop();
        }
    }

    fn current_mode(&self) -> Mode {
        *self.modes.last().expect("mode stack is never empty")
    }

    /// Scans and returns the next token, or the `Eof` sentinel once the
    /// source is exhausted. Comment trivia (`LineComment`/
    /// `DelimitedComment`) is skipped unless [`LexerConfig::yield_comments`]
    /// is set, in which case it surfaces as tokens too. A leading shebang
    /// line always surfaces as a `ShebangLine` token regardless of that
    /// flag; `NewLine` tokens are mode-gated independently of it.
    pub fn next_token(&mut self) -> LexResult<Token> {
        loop {
            if self.cursor.is_at_end() {
                return Ok(Token::eof(self.position()));
            }

            let c = self.cursor.current_char();

            if c == '\n' || c == '\r' {
                if let Some(tok) = self.scan_newline_run() {
                    return Ok(tok);
                }
                continue;
            }

            if c.is_whitespace() {
                self.cursor.advance();
                continue;
            }

            if c == '#' && self.cursor.position() == 0 && self.cursor.peek_char(1) == '!' {
                // Unlike the two comment kinds below, the shebang line is
                // always emitted: `yield_comments` only gates
                // `LineComment`/`DelimitedComment`.
                return Ok(self.scan_shebang());
            }

            if c == '/' && self.cursor.peek_char(1) == '/' {
                let tok = self.scan_line_comment();
                if self.config.yield_comments {
                    return Ok(tok);
                }
                continue;
            }

            if c == '/' && self.cursor.peek_char(1) == '*' {
                let tok = self.scan_delimited_comment()?;
                if self.config.yield_comments {
                    return Ok(tok);
                }
                continue;
            }

            break;
        }

        self.scan_token()
    }

    /// Consumes one or more newline characters (and the insignificant
    /// whitespace/comments interleaved among them), coalescing the whole
    /// run into a single `NewLine` token when the current mode treats
    /// newlines as significant.
    fn scan_newline_run(&mut self) -> Option<Token> {
        let start = self.cursor.position();
        let start_pos = self.position();
        loop {
            match self.cursor.current_char() {
                '\n' | '\r' => self.cursor.advance(),
                c if c.is_whitespace() => self.cursor.advance(),
                '/' if self.cursor.peek_char(1) == '/' => {
                    self.scan_line_comment();
                }
                '/' if self.cursor.peek_char(1) == '*' => {
                    let _ = self.scan_delimited_comment();
                }
                _ => break,
            }
        }
        if self.current_mode() == Mode::Inside {
            return None;
        }
        Some(self.make_token(TokenKind::NewLine, start, start_pos))
    }

    fn scan_token(&mut self) -> LexResult<Token> {
        let start = self.cursor.position();
        let start_pos = self.position();
        let c = self.cursor.current_char();

        match c {
            '(' | '[' => {
                self.cursor.advance();
                self.push_mode(Mode::Inside);
                Ok(self.make_token(TokenKind::Separator, start, start_pos))
            }
            ')' | ']' => {
                self.cursor.advance();
                self.pop_mode();
                Ok(self.make_token(TokenKind::Separator, start, start_pos))
            }
            '{' => {
                self.cursor.advance();
                self.push_mode(Mode::Default);
                Ok(self.make_token(TokenKind::Separator, start, start_pos))
            }
            '}' => {
                self.cursor.advance();
                self.pop_mode();
                Ok(self.make_token(TokenKind::Separator, start, start_pos))
            }
            ',' | ';' => {
                self.cursor.advance();
                Ok(self.make_token(TokenKind::Separator, start, start_pos))
            }
            '"' => self.scan_string(start, start_pos),
            '\'' => self.scan_character(start, start_pos),
            '`' => self.scan_quoted_identifier(start, start_pos),
            c if crate::unicode::is_ident_start(c) => {
                self.scan_identifier_or_keyword(start, start_pos)
            }
            c if c.is_ascii_digit() => self.scan_number(start, start_pos),
            '.' if self.cursor.peek_char(1).is_ascii_digit() => self.scan_number(start, start_pos),
            _ => self.scan_operator(start, start_pos),
        }
    }

    fn scan_shebang(&mut self) -> Token {
        let start = self.cursor.position();
        let start_pos = self.position();
        while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
            self.cursor.advance();
        }
        self.make_token(TokenKind::ShebangLine, start, start_pos)
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = LexResult<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_token() {
            Ok(tok) if tok.is_eof() => None,
            other => Some(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source, LexerConfig::default())
            .map(|r| r.unwrap().kind)
            .collect()
    }

    #[test]
    fn newline_significant_at_top_level() {
        assert_eq!(
            kinds("val x\nval y"),
            vec![
                TokenKind::HardKeyword,
                TokenKind::Identifier,
                TokenKind::NewLine,
                TokenKind::HardKeyword,
                TokenKind::Identifier,
            ]
        );
    }

    #[test]
    fn newline_suppressed_inside_parens() {
        assert_eq!(
            kinds("(1,\n2)"),
            vec![
                TokenKind::Separator,
                TokenKind::IntegerLiteral,
                TokenKind::Separator,
                TokenKind::IntegerLiteral,
                TokenKind::Separator,
            ]
        );
    }

    #[test]
    fn newline_restored_in_brace_nested_within_parens() {
        let toks = kinds("(x.let {\ny\n})");
        assert!(toks.contains(&TokenKind::NewLine));
    }

    #[test]
    fn comments_yielded_by_default() {
        assert_eq!(
            kinds("// hi\nval"),
            vec![TokenKind::LineComment, TokenKind::NewLine, TokenKind::HardKeyword]
        );
    }

    #[test]
    fn comments_skipped_when_configured_off() {
        let cfg = LexerConfig {
            yield_comments: false,
        };
        let toks: Vec<_> = Lexer::new("// hi\nval", cfg)
            .map(|r| r.unwrap().kind)
            .collect();
        assert_eq!(toks, vec![TokenKind::NewLine, TokenKind::HardKeyword]);
    }

    #[test]
    fn shebang_emitted_even_with_comments_off() {
        let cfg = LexerConfig {
            yield_comments: false,
        };
        let toks: Vec<_> = Lexer::new("#!/usr/bin/env kotlin\nval", cfg)
            .map(|r| r.unwrap().kind)
            .collect();
        assert_eq!(toks, vec![TokenKind::ShebangLine, TokenKind::NewLine, TokenKind::HardKeyword]);
    }
}
