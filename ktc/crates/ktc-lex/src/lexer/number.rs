//! Numeric literals: decimal, hex (`0x`/`0X`), and binary (`0b`/`0B`)
//! integers, with `_` digit separators; real literals with an optional
//! leading dot, an optional exponent, and an optional `f`/`F` suffix; and
//! the `u`/`U` (optionally followed by `L`) / lone `L` suffixes that apply
//! uniformly across all three integer bases and override the base-specific
//! token kind with `UnsignedLiteral`/`LongLiteral`.
//!
//! The one sharp edge: a `.` immediately followed by a non-digit ends the
//! integer literal right there rather than being folded in as a malformed
//! real - `0.toLong()` lexes as an integer, then a separate `.` operator.

use ktc_util::{LexResult, Position};

use crate::token::{Token, TokenKind};
use crate::unicode::is_digit_in_base;
use crate::Lexer;

enum Suffix {
    Unsigned,
    Long,
    None,
}

impl<'a> Lexer<'a> {
    fn consume_digit_run(&mut self, base: u32) {
        while !self.cursor.is_at_end()
            && (is_digit_in_base(self.cursor.current_char(), base) || self.cursor.current_char() == '_')
        {
            self.cursor.advance();
        }
    }

    fn consume_unsigned_long_suffix(&mut self) -> Suffix {
        match self.cursor.current_char() {
            'u' | 'U' => {
                self.cursor.advance();
                if self.cursor.current_char() == 'L' {
                    self.cursor.advance();
                }
                Suffix::Unsigned
            }
            'L' => {
                self.cursor.advance();
                Suffix::Long
            }
            _ => Suffix::None,
        }
    }

    fn finish_integer(&mut self, start: usize, start_pos: Position, base_kind: TokenKind) -> Token {
        let kind = match self.consume_unsigned_long_suffix() {
            Suffix::Unsigned => TokenKind::UnsignedLiteral,
            Suffix::Long => TokenKind::LongLiteral,
            Suffix::None => base_kind,
        };
        self.make_token(kind, start, start_pos)
    }

    pub(crate) fn scan_number(&mut self, start: usize, start_pos: Position) -> LexResult<Token> {
        if self.cursor.current_char() == '0'
            && matches!(self.cursor.peek_char(1), 'x' | 'X')
        {
            self.cursor.advance();
            self.cursor.advance();
            self.consume_digit_run(16);
            return Ok(self.finish_integer(start, start_pos, TokenKind::HexLiteral));
        }

        if self.cursor.current_char() == '0'
            && matches!(self.cursor.peek_char(1), 'b' | 'B')
        {
            self.cursor.advance();
            self.cursor.advance();
            self.consume_digit_run(2);
            return Ok(self.finish_integer(start, start_pos, TokenKind::BinLiteral));
        }

        self.consume_digit_run(10);

        let mut is_real = false;

        if self.cursor.current_char() == '.' && self.cursor.peek_char(1).is_ascii_digit() {
            self.cursor.advance(); // '.'
            self.consume_digit_run(10);
            is_real = true;
        }

        if matches!(self.cursor.current_char(), 'e' | 'E') {
            let sign_offset = if matches!(self.cursor.peek_char(1), '+' | '-') {
                2
            } else {
                1
            };
            if self.cursor.peek_char(sign_offset).is_ascii_digit() {
                self.cursor.advance(); // e/E
                if sign_offset == 2 {
                    self.cursor.advance(); // +/-
                }
                self.consume_digit_run(10);
                is_real = true;
            }
        }

        if is_real {
            let kind = if matches!(self.cursor.current_char(), 'f' | 'F') {
                self.cursor.advance();
                TokenKind::FloatLiteral
            } else {
                TokenKind::DoubleLiteral
            };
            return Ok(self.make_token(kind, start, start_pos));
        }

        if matches!(self.cursor.current_char(), 'f' | 'F') {
            self.cursor.advance();
            return Ok(self.make_token(TokenKind::FloatLiteral, start, start_pos));
        }

        Ok(self.finish_integer(start, start_pos, TokenKind::IntegerLiteral))
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
    fn plain_decimal() {
        let t = scan_one("42");
        assert_eq!(t.kind, TokenKind::IntegerLiteral);
        assert_eq!(t.value, "42");
    }

    #[test]
    fn decimal_with_separators() {
        let t = scan_one("1_000_000");
        assert_eq!(t.kind, TokenKind::IntegerLiteral);
        assert_eq!(t.value, "1_000_000");
    }

    #[test]
    fn hex_literal() {
        let t = scan_one("0xFF_FF");
        assert_eq!(t.kind, TokenKind::HexLiteral);
        assert_eq!(t.value, "0xFF_FF");
    }

    #[test]
    fn binary_literal() {
        let t = scan_one("0b1010_0101");
        assert_eq!(t.kind, TokenKind::BinLiteral);
    }

    #[test]
    fn unsigned_suffix_overrides_base_kind() {
        assert_eq!(scan_one("42u").kind, TokenKind::UnsignedLiteral);
        assert_eq!(scan_one("0xFFu").kind, TokenKind::UnsignedLiteral);
        assert_eq!(scan_one("0b11uL").kind, TokenKind::UnsignedLiteral);
    }

    #[test]
    fn long_suffix_overrides_base_kind() {
        assert_eq!(scan_one("42L").kind, TokenKind::LongLiteral);
        assert_eq!(scan_one("0xFFL").kind, TokenKind::LongLiteral);
    }

    #[test]
    fn real_literal_with_fraction() {
        let t = scan_one("3.14");
        assert_eq!(t.kind, TokenKind::DoubleLiteral);
        assert_eq!(t.value, "3.14");
    }

    #[test]
    fn real_literal_with_exponent() {
        let t = scan_one("1e10");
        assert_eq!(t.kind, TokenKind::DoubleLiteral);
    }

    #[test]
    fn real_literal_with_signed_exponent() {
        let t = scan_one("2.5E-3");
        assert_eq!(t.kind, TokenKind::DoubleLiteral);
        assert_eq!(t.value, "2.5E-3");
    }

    #[test]
    fn float_suffix_on_real() {
        assert_eq!(scan_one("3.14f").kind, TokenKind::FloatLiteral);
    }

    #[test]
    fn float_suffix_on_plain_integer() {
        assert_eq!(scan_one("1f").kind, TokenKind::FloatLiteral);
    }

    #[test]
    fn leading_dot_real_literal() {
        let mut lexer = Lexer::new(".5", LexerConfig::default());
        let t = lexer.next_token().unwrap();
        assert_eq!(t.kind, TokenKind::DoubleLiteral);
        assert_eq!(t.value, ".5");
    }

    #[test]
    fn dot_followed_by_non_digit_does_not_join_integer() {
        let mut lexer = Lexer::new("0.toLong()", LexerConfig::default());
        let first = lexer.next_token().unwrap();
        assert_eq!(first.kind, TokenKind::IntegerLiteral);
        assert_eq!(first.value, "0");
        let second = lexer.next_token().unwrap();
        assert_eq!(second.kind, TokenKind::Operator);
        assert_eq!(second.value, ".");
    }
}
