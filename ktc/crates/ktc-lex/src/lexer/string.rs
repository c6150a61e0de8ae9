//! String and character literals.
//!
//! A token's `value` is the raw, undecoded source substring - escapes are
//! validated here (so `"\q"` is still rejected at lex time) but never
//! turned into the character they denote, and `${...}` interpolation spans
//! are skipped over structurally rather than re-lexed into sub-tokens:
//! there is no separate "interpolated expression" token, only the
//! surrounding `LineStringLiteral`/`MultiLineStringLiteral`.
//!
//! Interpolation spans need their own brace-depth counter, and that
//! counter has to recurse into nested string literals (`"${"${x}"}"` is
//! legal), because a literal `}` inside a nested string must not be
//! mistaken for the one that closes the interpolation.

use ktc_util::{LexErrorKind, LexResult, Position};

use crate::token::{Token, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    pub(crate) fn scan_string(&mut self, start: usize, start_pos: Position) -> LexResult<Token> {
        if self.cursor.peek_char(1) == '"' && self.cursor.peek_char(2) == '"' {
            self.cursor.advance_n(3);
            self.skip_multiline_string_body(start_pos)?;
            return Ok(self.make_token(TokenKind::MultiLineStringLiteral, start, start_pos));
        }
        self.cursor.advance(); // opening '"'
        self.skip_line_string_body(start_pos)?;
        Ok(self.make_token(TokenKind::LineStringLiteral, start, start_pos))
    }

    pub(crate) fn scan_character(&mut self, start: usize, start_pos: Position) -> LexResult<Token> {
        self.cursor.advance(); // opening '\''
        if self.cursor.current_char() == '\'' {
            return Err(self.error(LexErrorKind::EmptyCharacterLiteral, start_pos));
        }
        if self.cursor.is_at_end() || self.cursor.current_char() == '\n' {
            return Err(self.error(LexErrorKind::UnterminatedCharacter, start_pos));
        }
        if self.cursor.current_char() == '\\' {
            self.cursor.advance();
            self.consume_escape(start_pos)?;
        } else {
            self.cursor.advance();
        }
        if self.cursor.current_char() != '\'' {
            return Err(self.error(LexErrorKind::UnterminatedCharacter, start_pos));
        }
        self.cursor.advance();
        Ok(self.make_token(TokenKind::CharacterLiteral, start, start_pos))
    }

    fn skip_line_string_body(&mut self, start_pos: Position) -> LexResult<()> {
        loop {
            if self.cursor.is_at_end() || self.cursor.current_char() == '\n' {
                return Err(self.error(LexErrorKind::UnterminatedString, start_pos));
            }
            match self.cursor.current_char() {
                '"' => {
                    self.cursor.advance();
                    return Ok(());
                }
                '\\' => {
                    self.cursor.advance();
                    self.consume_escape(start_pos)?;
                }
                '$' if self.cursor.peek_char(1) == '{' => {
                    self.cursor.advance_n(2);
                    self.skip_interpolation(start_pos)?;
                }
                _ => self.cursor.advance(),
            }
        }
    }

    fn skip_multiline_string_body(&mut self, start_pos: Position) -> LexResult<()> {
        loop {
            if self.cursor.is_at_end() {
                return Err(self.error(LexErrorKind::UnterminatedMultiLineString, start_pos));
            }
            match self.cursor.current_char() {
                '"' => {
                    let mut count = 0usize;
                    while self.cursor.peek_char(count) == '"' {
                        count += 1;
                    }
                    if count >= 3 {
                        self.cursor.advance_n(3);
                        return Ok(());
                    }
                    self.cursor.advance();
                }
                '$' if self.cursor.peek_char(1) == '{' => {
                    self.cursor.advance_n(2);
                    self.skip_interpolation(start_pos)?;
                }
                _ => self.cursor.advance(),
            }
        }
    }

    /// Called with the cursor positioned just past `${`; consumes up to
    /// and including the matching `}`, recursing through any nested
    /// string literals and their own interpolation spans.
    fn skip_interpolation(&mut self, start_pos: Position) -> LexResult<()> {
        let mut depth = 1u32;
        loop {
            if self.cursor.is_at_end() {
                return Err(self.error(LexErrorKind::UnterminatedString, start_pos));
            }
            match self.cursor.current_char() {
                '{' => {
                    depth += 1;
                    self.cursor.advance();
                }
                '}' => {
                    depth -= 1;
                    self.cursor.advance();
                    if depth == 0 {
                        return Ok(());
                    }
                }
                '"' if self.cursor.peek_char(1) == '"' && self.cursor.peek_char(2) == '"' => {
                    self.cursor.advance_n(3);
                    self.skip_multiline_string_body(start_pos)?;
                }
                '"' => {
                    self.cursor.advance();
                    self.skip_line_string_body(start_pos)?;
                }
                _ => self.cursor.advance(),
            }
        }
    }

    fn consume_escape(&mut self, start_pos: Position) -> LexResult<()> {
        if self.cursor.is_at_end() {
            return Err(self.error(LexErrorKind::UnterminatedString, start_pos));
        }
        match self.cursor.current_char() {
            't' | 'b' | 'r' | 'n' | '\'' | '"' | '\\' | '$' => {
                self.cursor.advance();
                Ok(())
            }
            'u' => {
                self.cursor.advance();
                for _ in 0..4 {
                    if !self.cursor.current_char().is_ascii_hexdigit() {
                        return Err(self.error(LexErrorKind::MalformedUnicodeEscape, start_pos));
                    }
                    self.cursor.advance();
                }
                Ok(())
            }
            other => Err(self.error(LexErrorKind::IllegalEscape(other), start_pos)),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Lexer, LexerConfig, TokenKind};

    fn scan_one(source: &str) -> crate::Token {
        Lexer::new(source, LexerConfig::default())
            .next_token()
            .unwrap()
    }

    #[test]
    fn simple_line_string() {
        let t = scan_one(r#""hello""#);
        assert_eq!(t.kind, TokenKind::LineStringLiteral);
        assert_eq!(t.value, r#""hello""#);
    }

    #[test]
    fn line_string_value_is_raw_not_decoded() {
        let t = scan_one(r#""a\nb""#);
        assert_eq!(t.value, r#""a\nb""#);
    }

    #[test]
    fn unterminated_line_string_errors() {
        let mut lexer = Lexer::new("\"oops", LexerConfig::default());
        assert!(lexer.next_token().is_err());
    }

    #[test]
    fn newline_in_line_string_errors() {
        let mut lexer = Lexer::new("\"a\nb\"", LexerConfig::default());
        assert!(lexer.next_token().is_err());
    }

    #[test]
    fn illegal_escape_errors() {
        let mut lexer = Lexer::new(r#""\q""#, LexerConfig::default());
        assert!(lexer.next_token().is_err());
    }

    #[test]
    fn unicode_escape_requires_four_hex_digits() {
        assert!(scan_one(r#""A""#).kind == TokenKind::LineStringLiteral);
        let mut lexer = Lexer::new(r#""\u41""#, LexerConfig::default());
        assert!(lexer.next_token().is_err());
    }

    #[test]
    fn braced_interpolation_with_embedded_braces() {
        let t = scan_one(r#""${ if (x) { 1 } else { 2 } }""#);
        assert_eq!(t.kind, TokenKind::LineStringLiteral);
    }

    #[test]
    fn interpolation_with_nested_string_containing_brace_char() {
        let t = scan_one(r#""${f("}")}""#);
        assert_eq!(t.kind, TokenKind::LineStringLiteral);
    }

    #[test]
    fn multiline_string_basic() {
        let t = scan_one("\"\"\"hello\nworld\"\"\"");
        assert_eq!(t.kind, TokenKind::MultiLineStringLiteral);
    }

    #[test]
    fn multiline_string_allows_lone_quotes() {
        let t = scan_one("\"\"\"a \" b \"\" c\"\"\"");
        assert_eq!(t.kind, TokenKind::MultiLineStringLiteral);
    }

    #[test]
    fn multiline_string_with_interpolation() {
        let t = scan_one("\"\"\"value: ${x}\"\"\"");
        assert_eq!(t.kind, TokenKind::MultiLineStringLiteral);
    }

    #[test]
    fn unterminated_multiline_string_errors() {
        let mut lexer = Lexer::new("\"\"\"never closes", LexerConfig::default());
        assert!(lexer.next_token().is_err());
    }

    #[test]
    fn empty_character_literal_errors() {
        let mut lexer = Lexer::new("''", LexerConfig::default());
        assert!(lexer.next_token().is_err());
    }

    #[test]
    fn simple_character_literal() {
        let t = scan_one("'a'");
        assert_eq!(t.kind, TokenKind::CharacterLiteral);
        assert_eq!(t.value, "'a'");
    }

    #[test]
    fn escaped_character_literal() {
        let t = scan_one(r"'\n'");
        assert_eq!(t.kind, TokenKind::CharacterLiteral);
        assert_eq!(t.value, r"'\n'");
    }
}
