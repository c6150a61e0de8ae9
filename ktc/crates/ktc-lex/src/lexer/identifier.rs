//! Identifiers, hard keywords, and the contextual forms fused onto them:
//! ``as?`` and the label-qualified jump/reference keywords (``return@``,
//! ``continue@``, ``break@``, ``this@``, ``super@``). Fusion only happens
//! when the `@` immediately follows the word with no intervening
//! whitespace - `this @label` is three tokens, `this@label` is two.

use ktc_util::LexResult;

use crate::token::{is_hard_keyword, Token, TokenKind};
use crate::unicode::is_ident_continue;
use crate::Lexer;

/// Words whose immediately-following, whitespace-free `@` fuses into the
/// token itself.
const LABEL_FUSING_WORDS: &[&str] = &["return", "continue", "break", "this", "super"];

impl<'a> Lexer<'a> {
    pub(crate) fn scan_identifier_or_keyword(
        &mut self,
        start: usize,
        start_pos: ktc_util::Position,
    ) -> LexResult<Token> {
        while !self.cursor.is_at_end() && is_ident_continue(self.cursor.current_char()) {
            self.cursor.advance();
        }
        let word = self.cursor.slice_from(start);

        let kind = match word {
            "true" | "false" => TokenKind::BooleanLiteral,
            "null" => TokenKind::NullLiteral,
            w if is_hard_keyword(w) => {
                if w == "as" && self.cursor.current_char() == '?' {
                    self.cursor.advance();
                    return Ok(self.make_token(TokenKind::HardKeyword, start, start_pos));
                }
                if LABEL_FUSING_WORDS.contains(&w) && self.cursor.current_char() == '@' {
                    self.cursor.advance();
                    return Ok(self.make_token(TokenKind::HardKeyword, start, start_pos));
                }
                TokenKind::HardKeyword
            }
            _ => TokenKind::Identifier,
        };

        Ok(self.make_token(kind, start, start_pos))
    }

    pub(crate) fn scan_quoted_identifier(
        &mut self,
        start: usize,
        start_pos: ktc_util::Position,
    ) -> LexResult<Token> {
        self.cursor.advance(); // opening '`'
        let body_start = self.cursor.position();
        loop {
            if self.cursor.is_at_end() {
                return Err(self.error(ktc_util::LexErrorKind::UnterminatedBacktickIdentifier, start_pos));
            }
            match self.cursor.current_char() {
                '`' => break,
                '\n' => {
                    return Err(self.error(ktc_util::LexErrorKind::NewlineInBacktickIdentifier, start_pos))
                }
                _ => self.cursor.advance(),
            }
        }
        if self.cursor.position() == body_start {
            return Err(self.error(ktc_util::LexErrorKind::EmptyBacktickIdentifier, start_pos));
        }
        let value = self.cursor.slice_from(body_start).to_string();
        self.cursor.advance(); // closing '`'
        let _ = start;
        Ok(Token::new(TokenKind::QuotedIdentifier, value, start_pos))
    }
}
