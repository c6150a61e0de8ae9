//! Comment scanning: `// line comments` and `/* delimited, nestable
//! comments */`. Both produce a token so that a caller configured to
//! retain trivia (e.g. a formatter) sees them; [`super::core::Lexer`]
//! decides whether to keep or discard the result.

use ktc_util::{LexErrorKind, LexResult};

use crate::token::{Token, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    pub(crate) fn scan_line_comment(&mut self) -> Token {
        let start = self.cursor.position();
        let start_pos = self.position();
        self.cursor.advance(); // '/'
        self.cursor.advance(); // '/'
        while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
            self.cursor.advance();
        }
        self.make_token(TokenKind::LineComment, start, start_pos)
    }

    /// Delimited comments nest: `/* outer /* inner */ still outer */` is
    /// one comment.
    pub(crate) fn scan_delimited_comment(&mut self) -> LexResult<Token> {
        let start = self.cursor.position();
        let start_pos = self.position();
        self.cursor.advance(); // '/'
        self.cursor.advance(); // '*'

        let mut depth = 1u32;
        while depth > 0 {
            if self.cursor.is_at_end() {
                return Err(self.error(LexErrorKind::UnterminatedDelimitedComment, start_pos));
            }
            if self.cursor.current_char() == '/' && self.cursor.peek_char(1) == '*' {
                self.cursor.advance();
                self.cursor.advance();
                depth += 1;
            } else if self.cursor.current_char() == '*' && self.cursor.peek_char(1) == '/' {
                self.cursor.advance();
                self.cursor.advance();
                depth -= 1;
            } else {
                self.cursor.advance();
            }
        }

        Ok(self.make_token(TokenKind::DelimitedComment, start, start_pos))
    }
}
