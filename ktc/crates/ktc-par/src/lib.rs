//! Recursive-descent parser for Kotlin source and script files.
//!
//! [`Parser`] wraps a [`cursor::TokenCursor`] (itself wrapping a
//! [`ktc_lex::Lexer`]) and exposes the primitives every grammar rule in
//! [`items`], [`types`], [`expr`], and [`stmt`] is built from:
//! `accept`/`would_accept` for single expected tokens, `try_parse` for
//! backtracking over an arbitrary sub-rule. Kotlin's grammar is not
//! LL(1) in a handful of spots (a bare `{` after an expression can
//! start a lambda or a block, `Foo<Bar>` can be a generic call or two
//! comparisons, `as?` needs lookahead past `as`, a declaration's
//! receiver can swallow what turns out to be its own name) - those
//! routines resolve the ambiguity with `try_parse`/`simulate` rather
//! than backtracking the whole grammar.

pub mod ast;
pub mod cursor;
mod expr;
mod items;
mod stmt;
mod types;

use cursor::TokenCursor;
use ktc_lex::{LexerConfig, Token, TokenKind};
use ktc_util::{Diagnostic, Handler, ParseError, ParseResult, Position};

pub use ast::{KotlinFile, Script};

/// Parser behavior knobs.
#[derive(Clone, Copy, Debug, Default)]
pub struct ParserConfig {
    /// Forwarded to the underlying [`LexerConfig`]; comments are never
    /// consulted by the grammar, so the parser itself always skips
    /// them regardless of this setting except when echoing diagnostics.
    pub lexer: LexerConfig,
}

pub struct Parser<'a> {
    cursor: TokenCursor<'a>,
    handler: Option<&'a mut Handler>,
    /// Position of the last token handed out, used to anchor a
    /// synthetic EOF token once the underlying lexer stream runs dry
    /// (the lexer's own iterator stops yielding rather than emitting an
    /// explicit EOF token - see [`ktc_lex::Lexer`]'s `Iterator` impl).
    last_position: Position,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str, config: ParserConfig) -> Self {
        Self {
            cursor: TokenCursor::new(source, config.lexer),
            handler: None,
            last_position: Position::START,
        }
    }

    pub fn with_handler(source: &'a str, config: ParserConfig, handler: &'a mut Handler) -> Self {
        Self {
            cursor: TokenCursor::new(source, config.lexer),
            handler: Some(handler),
            last_position: Position::START,
        }
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        if let Some(handler) = self.handler.as_deref_mut() {
            handler.emit(diagnostic);
        }
    }

    // -- core token primitives -------------------------------------------------

    fn eof_token(&self) -> Token {
        Token::eof(self.last_position)
    }

    /// The next significant token without consuming it. Trivia
    /// (`NewLine`/comments/shebang) is skipped transparently; none of
    /// the grammar rules need raw access to it.
    pub(crate) fn peek(&mut self) -> Token {
        self.peek_nth(0)
    }

    /// The `n`-th significant (non-trivia) token ahead, without
    /// consuming anything.
    pub(crate) fn peek_nth(&mut self, n: usize) -> Token {
        let mut significant_seen = 0usize;
        let mut offset = 0usize;
        loop {
            match self.cursor.peek(offset) {
                None => return self.eof_token(),
                Some(tok) if tok.is_trivia() => {
                    offset += 1;
                }
                Some(tok) => {
                    if significant_seen == n {
                        return tok.clone();
                    }
                    significant_seen += 1;
                    offset += 1;
                }
            }
        }
    }

    fn advance_skipping_trivia(&mut self) -> Option<Token> {
        loop {
            let tok = self.cursor.advance()?;
            if !tok.is_trivia() {
                return Some(tok);
            }
        }
    }

    pub(crate) fn position(&mut self) -> Position {
        self.peek().position
    }

    /// Consume and return the next significant token, whatever it is.
    pub(crate) fn bump(&mut self) -> Token {
        let tok = self.advance_skipping_trivia().unwrap_or_else(|| self.eof_token());
        self.last_position = tok.position;
        tok
    }

    /// Consume the next token if its text matches `text`, else leave the
    /// cursor untouched and return `None`.
    pub(crate) fn accept(&mut self, text: &str) -> Option<Token> {
        if self.peek().is(text) {
            Some(self.bump())
        } else {
            None
        }
    }

    /// Non-consuming check of whether the next token's text matches.
    pub(crate) fn would_accept(&mut self, text: &str) -> bool {
        self.peek().is(text)
    }

    pub(crate) fn would_accept_kind(&mut self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    /// Non-consuming check across multiple candidate texts.
    pub(crate) fn would_accept_either(&mut self, options: &[&str]) -> bool {
        options.iter().any(|o| self.peek().is(o))
    }

    /// Like [`accept`], but raises a diagnostic and returns a
    /// [`ParseError`] if the token does not match.
    pub(crate) fn expect(&mut self, text: &str) -> ParseResult<Token> {
        if let Some(tok) = self.accept(text) {
            Ok(tok)
        } else {
            let found = self.peek();
            let err = ParseError::expected_found(text, &format!("{:?}", found.value), found.position);
            self.report(Diagnostic::error(err.message.clone(), err.position));
            Err(err)
        }
    }

    pub(crate) fn expect_identifier(&mut self) -> ParseResult<String> {
        if self.would_accept_kind(TokenKind::Identifier) || self.would_accept_kind(TokenKind::QuotedIdentifier) {
            Ok(self.bump().value)
        } else {
            let found = self.peek();
            let err = ParseError::expected_found("identifier", &format!("{:?}", found.value), found.position);
            self.report(Diagnostic::error(err.message.clone(), err.position));
            Err(err)
        }
    }

    /// Run `f` as a speculative parse: on `Ok`, the consumed tokens
    /// stay consumed (and merge into any enclosing speculative scope);
    /// on `Err`, the cursor is rewound as if `f` never ran. Diagnostics
    /// `f` queues along a failed branch are not suppressed - ambiguity
    /// resolution routines disambiguate using token shape alone (via
    /// `would_accept`/`peek`), never by reading emitted diagnostics.
    pub(crate) fn try_parse<T>(&mut self, f: impl FnOnce(&mut Self) -> ParseResult<T>) -> Option<T> {
        self.cursor.push_marker();
        let result = f(self);
        self.cursor.pop_marker(result.is_err());
        result.ok()
    }

    /// Pure lookahead: run `f`, always rewind afterward regardless of
    /// what it returns. Used to peek past an arbitrary-length prefix
    /// (e.g. scanning to the matching `)` to decide lambda vs. block).
    pub(crate) fn simulate<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.cursor.push_marker();
        let result = f(self);
        self.cursor.pop_marker(true);
        result
    }

    fn is_at_end(&mut self) -> bool {
        self.peek().is_eof()
    }

    /// Whether a `NewLine` token lies between the cursor and the next
    /// significant token - a non-consuming check, since `peek`/`bump`
    /// already skip trivia transparently and a bare newline needs no
    /// separate consumption once its presence has been confirmed.
    pub(crate) fn newline_ahead(&mut self) -> bool {
        let mut offset = 0usize;
        loop {
            match self.cursor.peek(offset) {
                None => return false,
                Some(tok) if tok.kind == TokenKind::NewLine => return true,
                Some(tok) if tok.is_trivia() => offset += 1,
                Some(_) => return false,
            }
        }
    }

    /// A single statement/declaration terminator (spec's `semi`): a
    /// literal `;`, or at least one significant newline. Also satisfied by
    /// standing at EOF or a closing `}`, since those already end the
    /// enclosing sequence without needing a terminator of their own.
    pub(crate) fn semi(&mut self) -> ParseResult<()> {
        if self.accept(";").is_some() {
            return Ok(());
        }
        if self.newline_ahead() || self.is_at_end() || self.would_accept("}") {
            return Ok(());
        }
        let found = self.peek();
        Err(ktc_util::ParseError::expected_found(
            "';' or a newline",
            &found.value,
            found.position,
        ))
    }

    /// One or more `semi`s (spec's `semis`): like [`semi`], but also
    /// swallows any further run of redundant `;` tokens (`val x = 1;;
    /// val y = 2` is still two declarations separated once).
    pub(crate) fn semis(&mut self) -> ParseResult<()> {
        self.semi()?;
        while self.accept(";").is_some() {}
        Ok(())
    }

    // -- entry points -----------------------------------------------------------

    pub fn parse(&mut self) -> ParseResult<KotlinFile> {
        let shebang = self.parse_shebang();
        let mut annotations = self.parse_annotations();
        let package = self.parse_package_directive(&mut annotations)?;
        let imports = self.parse_import_list()?;
        let mut declarations = Vec::new();
        while !self.is_at_end() {
            declarations.push(self.parse_top_level_declaration()?);
            self.semis()?;
        }
        Ok(KotlinFile {
            shebang,
            annotations,
            package,
            imports,
            declarations,
        })
    }

    pub fn parse_script(&mut self) -> ParseResult<Script> {
        let shebang = self.parse_shebang();
        let mut annotations = self.parse_annotations();
        let package = self.parse_package_directive(&mut annotations)?;
        let imports = self.parse_import_list()?;
        let mut statements = Vec::new();
        while !self.is_at_end() {
            statements.push(self.parse_statement()?);
            self.semi()?;
        }
        Ok(Script {
            shebang,
            annotations,
            package,
            imports,
            statements,
        })
    }

    fn parse_shebang(&mut self) -> Option<String> {
        if self.would_accept_kind(TokenKind::ShebangLine) {
            Some(self.bump().value)
        } else {
            None
        }
    }

    fn parse_package_directive(&mut self, file_annotations: &mut Vec<ast::Annotation>) -> ParseResult<Option<ast::PackageDirective>> {
        if self.accept("package").is_some() {
            let name = self.parse_identifier()?;
            let annotations = std::mem::take(file_annotations);
            Ok(Some(ast::PackageDirective { annotations, name }))
        } else {
            Ok(None)
        }
    }

    /// Zero or more `@Annotation` groups, each optionally followed by
    /// more annotations - used wherever the grammar allows a modifier
    /// list to start with annotations (declarations, parameters, types).
    pub(crate) fn parse_annotations(&mut self) -> Vec<ast::Annotation> {
        let mut annotations = Vec::new();
        while self.would_accept_kind(TokenKind::At) {
            match self.parse_annotation() {
                Ok(a) => annotations.push(a),
                Err(_) => break,
            }
        }
        annotations
    }

    pub(crate) fn parse_annotation(&mut self) -> ParseResult<ast::Annotation> {
        self.expect("@")?;
        let use_site_target = if self.would_accept_either(&["file", "field", "property", "get", "set", "receiver", "param", "setparam", "delegate"])
            && self.peek_nth(1).is(":")
        {
            let target = self.bump().value;
            self.expect(":")?;
            Some(target)
        } else {
            None
        };
        let entries = if self.accept("[").is_some() {
            let mut entries = vec![self.parse_annotation_entry()?];
            while !self.would_accept("]") {
                entries.push(self.parse_annotation_entry()?);
            }
            self.expect("]")?;
            entries
        } else {
            vec![self.parse_annotation_entry()?]
        };
        Ok(ast::Annotation {
            use_site_target,
            entries,
        })
    }

    fn parse_annotation_entry(&mut self) -> ParseResult<ast::AnnotationEntry> {
        let name = self.parse_identifier()?;
        let type_arguments = self.parse_optional_type_arguments()?;
        let value_arguments = if self.would_accept("(") {
            self.parse_value_arguments()?
        } else {
            Vec::new()
        };
        Ok(ast::AnnotationEntry {
            name,
            type_arguments,
            value_arguments,
        })
    }

    pub(crate) fn parse_identifier(&mut self) -> ParseResult<ast::Identifier> {
        let mut segments = vec![self.expect_identifier()?];
        while self.would_accept(".") && self.peek_nth(1).kind == TokenKind::Identifier {
            self.bump();
            segments.push(self.expect_identifier()?);
        }
        Ok(ast::Identifier(segments))
    }

    /// Every modifier-list position accepts annotations interleaved
    /// with keyword modifiers in any order.
    pub(crate) fn parse_modifiers(&mut self) -> ParseResult<ast::Modifiers> {
        // `fun` is deliberately absent: `fun interface` is a class-family
        // declaration and bare `fun` starts a function declaration, so both
        // are left for the declaration dispatcher in `items` to recognize
        // as a unit rather than being peeled off here.
        const MODIFIER_KEYWORDS: &[&str] = &[
            "public", "private", "protected", "internal",
            "abstract", "final", "open", "override",
            "enum", "sealed", "data", "inner", "value", "annotation", "companion",
            "suspend", "tailrec", "operator", "infix", "inline", "external",
            "vararg", "noinline", "crossinline",
            "expect", "actual", "lateinit", "const", "in", "out", "reified",
        ];
        let mut modifiers = Vec::new();
        loop {
            if self.would_accept_kind(TokenKind::At) {
                modifiers.push(ast::Modifier::Annotation(self.parse_annotation()?));
            } else if MODIFIER_KEYWORDS.iter().any(|k| self.would_accept(k)) {
                modifiers.push(ast::Modifier::Keyword(self.bump().value));
            } else {
                break;
            }
        }
        Ok(modifiers)
    }

    fn parse_import_list(&mut self) -> ParseResult<Vec<ast::ImportDirective>> {
        let mut imports = Vec::new();
        while self.would_accept("import") {
            imports.push(self.parse_import_directive()?);
        }
        Ok(imports)
    }

    fn parse_import_directive(&mut self) -> ParseResult<ast::ImportDirective> {
        self.expect("import")?;
        let mut segments = vec![self.expect_identifier()?];
        let mut wildcard = false;
        while self.accept(".").is_some() {
            if self.accept("*").is_some() {
                wildcard = true;
                break;
            }
            segments.push(self.expect_identifier()?);
        }
        let alias = if self.accept("as").is_some() {
            Some(self.expect_identifier()?)
        } else {
            None
        };
        Ok(ast::ImportDirective {
            name: ast::Identifier(segments),
            wildcard,
            alias,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_empty_file() {
        let mut p = Parser::new("", ParserConfig::default());
        let file = p.parse().expect("empty file parses");
        assert!(file.package.is_none());
        assert!(file.imports.is_empty());
        assert!(file.declarations.is_empty());
    }

    #[test]
    fn parses_package_and_imports() {
        let mut p = Parser::new("package com.example\nimport kotlin.collections.List\nimport kotlin.io.*\n", ParserConfig::default());
        let file = p.parse().expect("parses");
        assert_eq!(file.package.unwrap().name.to_string(), "com.example");
        assert_eq!(file.imports.len(), 2);
        assert!(file.imports[1].wildcard);
    }

    #[test]
    fn try_parse_rewinds_on_failure() {
        let mut p = Parser::new("foo bar", ParserConfig::default());
        let outcome: Option<String> = p.try_parse(|inner| inner.expect("baz").map(|t| t.value));
        assert!(outcome.is_none());
        assert_eq!(p.bump().value, "foo");
    }

    #[test]
    fn top_level_declarations_separated_by_newline() {
        let mut p = Parser::new("val x = 1\nval y = 2", ParserConfig::default());
        let file = p.parse().expect("newline-separated declarations parse");
        assert_eq!(file.declarations.len(), 2);
    }

    #[test]
    fn top_level_declarations_separated_by_semicolon() {
        let mut p = Parser::new("val x = 1; val y = 2", ParserConfig::default());
        let file = p.parse().expect("semicolon-separated declarations parse");
        assert_eq!(file.declarations.len(), 2);
    }

    #[test]
    fn top_level_declarations_without_separator_are_rejected() {
        let mut p = Parser::new("val x = 1 val y = 2", ParserConfig::default());
        assert!(p.parse().is_err());
    }

    #[test]
    fn script_statements_without_separator_are_rejected() {
        let mut p = Parser::new("val x = 1 val y = 2", ParserConfig::default());
        assert!(p.parse_script().is_err());
    }
}
