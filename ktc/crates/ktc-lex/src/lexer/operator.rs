//! Operators, `@`, and the lone `...` reserved token.
//!
//! Two disambiguations live here rather than in a generic longest-match
//! table because they aren't simple length comparisons:
//!
//! - `!in` / `!is` are word operators, but only when the word isn't
//!   immediately continued by another identifier character - `!isReady`
//!   is `!` applied to the identifier `isReady`, not `!is` applied to
//!   `Ready`.
//! - `?::` is `?` followed by `::` (a nullable-typed callable reference
//!   receiver), never `?:` (elvis) followed by a stray `:`.

use ktc_util::{LexErrorKind, LexResult, Position};

use crate::token::{Token, TokenKind};
use crate::unicode::is_ident_continue;
use crate::Lexer;

impl<'a> Lexer<'a> {
    fn matches_word_operator(&self, word: &str) -> bool {
        let chars: Vec<char> = word.chars().collect();
        for (i, expected) in chars.iter().enumerate() {
            if self.cursor.peek_char(1 + i) != *expected {
                return false;
            }
        }
        !is_ident_continue(self.cursor.peek_char(1 + chars.len()))
    }

    pub(crate) fn scan_operator(&mut self, start: usize, start_pos: Position) -> LexResult<Token> {
        let c0 = self.cursor.current_char();

        if c0 == '@' {
            self.cursor.advance();
            return Ok(self.make_token(TokenKind::At, start, start_pos));
        }

        if c0 == '!' {
            if self.matches_word_operator("in") {
                self.cursor.advance_n(3);
                return Ok(self.make_token(TokenKind::Operator, start, start_pos));
            }
            if self.matches_word_operator("is") {
                self.cursor.advance_n(3);
                return Ok(self.make_token(TokenKind::Operator, start, start_pos));
            }
            if self.cursor.peek_char(1) == '=' && self.cursor.peek_char(2) == '=' {
                self.cursor.advance_n(3);
            } else if self.cursor.peek_char(1) == '=' {
                self.cursor.advance_n(2);
            } else {
                self.cursor.advance();
            }
            return Ok(self.make_token(TokenKind::Operator, start, start_pos));
        }

        let p1 = self.cursor.peek_char(1);
        let p2 = self.cursor.peek_char(2);

        match c0 {
            '.' => {
                if p1 == '.' && p2 == '.' {
                    self.cursor.advance_n(3);
                    Ok(self.make_token(TokenKind::Reserved, start, start_pos))
                } else if p1 == '.' {
                    self.cursor.advance_n(2);
                    Ok(self.make_token(TokenKind::Operator, start, start_pos))
                } else {
                    self.cursor.advance();
                    Ok(self.make_token(TokenKind::Operator, start, start_pos))
                }
            }
            ':' => {
                let n = if p1 == ':' { 2 } else { 1 };
                self.cursor.advance_n(n);
                Ok(self.make_token(TokenKind::Operator, start, start_pos))
            }
            '?' => {
                let n = if p1 == ':' && p2 == ':' {
                    1
                } else if p1 == '.' || p1 == ':' {
                    2
                } else {
                    1
                };
                self.cursor.advance_n(n);
                Ok(self.make_token(TokenKind::Operator, start, start_pos))
            }
            '-' => {
                let n = if p1 == '>' || p1 == '-' || p1 == '=' { 2 } else { 1 };
                self.cursor.advance_n(n);
                Ok(self.make_token(TokenKind::Operator, start, start_pos))
            }
            '=' => {
                let n = if p1 == '=' && p2 == '=' {
                    3
                } else if p1 == '=' {
                    2
                } else {
                    1
                };
                self.cursor.advance_n(n);
                Ok(self.make_token(TokenKind::Operator, start, start_pos))
            }
            '<' => {
                let n = if p1 == '=' { 2 } else { 1 };
                self.cursor.advance_n(n);
                Ok(self.make_token(TokenKind::Operator, start, start_pos))
            }
            '>' => {
                let n = if p1 == '=' { 2 } else { 1 };
                self.cursor.advance_n(n);
                Ok(self.make_token(TokenKind::Operator, start, start_pos))
            }
            '&' => {
                let n = if p1 == '&' { 2 } else { 1 };
                self.cursor.advance_n(n);
                Ok(self.make_token(TokenKind::Operator, start, start_pos))
            }
            '|' => {
                let n = if p1 == '|' { 2 } else { 1 };
                self.cursor.advance_n(n);
                Ok(self.make_token(TokenKind::Operator, start, start_pos))
            }
            '+' => {
                let n = if p1 == '+' || p1 == '=' { 2 } else { 1 };
                self.cursor.advance_n(n);
                Ok(self.make_token(TokenKind::Operator, start, start_pos))
            }
            '*' => {
                let n = if p1 == '=' { 2 } else { 1 };
                self.cursor.advance_n(n);
                Ok(self.make_token(TokenKind::Operator, start, start_pos))
            }
            '/' => {
                let n = if p1 == '=' { 2 } else { 1 };
                self.cursor.advance_n(n);
                Ok(self.make_token(TokenKind::Operator, start, start_pos))
            }
            '%' => {
                let n = if p1 == '=' { 2 } else { 1 };
                self.cursor.advance_n(n);
                Ok(self.make_token(TokenKind::Operator, start, start_pos))
            }
            c => Err(self.error(LexErrorKind::UnexpectedCharacter(c), start_pos)),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Lexer, LexerConfig, TokenKind};

    fn scan_all(source: &str) -> Vec<(TokenKind, String)> {
        Lexer::new(source, LexerConfig::default())
            .map(|r| {
                let t = r.unwrap();
                (t.kind, t.value)
            })
            .collect()
    }

    #[test]
    fn triple_dot_is_reserved() {
        assert_eq!(scan_all("...")[0], (TokenKind::Reserved, "...".to_string()));
    }

    #[test]
    fn double_dot_is_range_operator() {
        assert_eq!(scan_all("..")[0], (TokenKind::Operator, "..".to_string()));
    }

    #[test]
    fn question_colon_colon_splits_into_two_tokens() {
        let toks = scan_all("?::");
        assert_eq!(toks, vec![
            (TokenKind::Operator, "?".to_string()),
            (TokenKind::Operator, "::".to_string()),
        ]);
    }

    #[test]
    fn elvis_operator() {
        assert_eq!(scan_all("?:")[0], (TokenKind::Operator, "?:".to_string()));
    }

    #[test]
    fn bang_in_as_word_operator() {
        assert_eq!(scan_all("!in")[0], (TokenKind::Operator, "!in".to_string()));
    }

    #[test]
    fn bang_in_not_an_operator_when_continued_by_identifier_char() {
        let toks = scan_all("!inner");
        assert_eq!(toks[0], (TokenKind::Operator, "!".to_string()));
        assert_eq!(toks[1].0, TokenKind::Identifier);
        assert_eq!(toks[1].1, "inner");
    }

    #[test]
    fn bang_is_word_operator() {
        assert_eq!(scan_all("!is")[0], (TokenKind::Operator, "!is".to_string()));
    }

    #[test]
    fn referential_equality_operators() {
        assert_eq!(scan_all("===")[0], (TokenKind::Operator, "===".to_string()));
        assert_eq!(scan_all("!==")[0], (TokenKind::Operator, "!==".to_string()));
    }

    #[test]
    fn at_sign_standalone() {
        assert_eq!(scan_all("@")[0], (TokenKind::At, "@".to_string()));
    }
}
