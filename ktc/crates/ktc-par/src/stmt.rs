//! Statement parsing: declarations, assignments, loops, and bare
//! expression statements. A statement is whatever is allowed inside a
//! [`Block`] or at script top level - this is also where the
//! assignment-vs-expression-statement ambiguity is resolved, since both
//! start by parsing the same postfix-unary expression.

use crate::ast::*;
use crate::Parser;
use ktc_lex::TokenKind;
use ktc_util::ParseResult;

const ASSIGNMENT_OPERATORS: &[&str] = &["=", "+=", "-=", "*=", "/=", "%="];

impl<'a> Parser<'a> {
    pub(crate) fn parse_statement(&mut self) -> ParseResult<Statement> {
        let annotations_and_modifiers_follow = self.would_accept_kind(TokenKind::At)
            || self.starts_modifier_keyword();
        if annotations_and_modifiers_follow || self.starts_declaration() {
            return Ok(Statement::Declaration(self.parse_local_declaration()?));
        }
        if self.would_accept("for") {
            return Ok(Statement::Loop(self.parse_for_statement()?));
        }
        if self.would_accept("while") {
            return Ok(Statement::Loop(self.parse_while_statement()?));
        }
        if self.would_accept("do") {
            return Ok(Statement::Loop(self.parse_do_while_statement()?));
        }
        let expr = self.parse_expression()?;
        if self.would_accept_either(ASSIGNMENT_OPERATORS) {
            let operator = self.bump().value;
            let value = Box::new(self.parse_expression()?);
            return Ok(Statement::Assignment(Assignment {
                target: Box::new(expr),
                operator,
                value,
            }));
        }
        Ok(Statement::Expression(expr))
    }

    fn starts_modifier_keyword(&mut self) -> bool {
        const STARTERS: &[&str] = &[
            "public", "private", "protected", "internal", "abstract", "final", "open",
            "override", "enum", "sealed", "data", "inner", "value", "annotation",
            "suspend", "tailrec", "operator", "infix", "inline", "external", "lateinit",
            "const", "expect", "actual",
        ];
        STARTERS.iter().any(|k| self.would_accept(k))
    }

    fn starts_declaration(&mut self) -> bool {
        self.would_accept("class")
            || self.would_accept("interface")
            || self.would_accept("object")
            || self.would_accept("val")
            || self.would_accept("var")
            || self.would_accept("typealias")
            || (self.would_accept("fun") && !self.starts_anonymous_function())
    }

    fn starts_anonymous_function(&mut self) -> bool {
        // `fun` starts a declaration-statement unless it's being used as
        // an expression (anonymous function), which this grammar only
        // produces inside a larger expression context - a bare `fun` at
        // statement position is always a local function declaration.
        false
    }

    fn parse_local_declaration(&mut self) -> ParseResult<Declaration> {
        self.parse_declaration()
    }

    pub(crate) fn parse_for_statement(&mut self) -> ParseResult<LoopStatement> {
        self.expect("for")?;
        self.expect("(")?;
        let annotations_consumed = self.parse_annotations();
        let _ = annotations_consumed;
        let variable = self.parse_variable_declaration_or_multi()?;
        self.expect("in")?;
        let in_expr = Box::new(self.parse_expression()?);
        self.expect(")")?;
        let body = self.parse_optional_loop_body()?;
        Ok(LoopStatement::For {
            variable,
            in_expr,
            body,
        })
    }

    pub(crate) fn parse_while_statement(&mut self) -> ParseResult<LoopStatement> {
        self.expect("while")?;
        self.expect("(")?;
        let condition = Box::new(self.parse_expression()?);
        self.expect(")")?;
        let body = self.parse_optional_loop_body()?;
        Ok(LoopStatement::While { condition, body })
    }

    pub(crate) fn parse_do_while_statement(&mut self) -> ParseResult<LoopStatement> {
        self.expect("do")?;
        let body = self.parse_optional_loop_body()?;
        self.expect("while")?;
        self.expect("(")?;
        let condition = Box::new(self.parse_expression()?);
        self.expect(")")?;
        Ok(LoopStatement::DoWhile { body, condition })
    }

    fn parse_optional_loop_body(&mut self) -> ParseResult<Option<ControlStructureBody>> {
        if self.would_accept(";") || self.would_accept("while") {
            Ok(None)
        } else if self.would_accept("{") {
            Ok(Some(ControlStructureBody::Block(self.parse_block()?)))
        } else {
            Ok(Some(ControlStructureBody::Expression(Box::new(self.parse_expression()?))))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParserConfig;

    fn parse_stmt(src: &str) -> Statement {
        let mut p = Parser::new(src, ParserConfig::default());
        p.parse_statement().expect("statement parses")
    }

    #[test]
    fn parses_val_declaration_statement() {
        let stmt = parse_stmt("val x = 1");
        assert!(matches!(stmt, Statement::Declaration(Declaration::Property(_))));
    }

    #[test]
    fn parses_plain_assignment() {
        let stmt = parse_stmt("x = 1");
        assert!(matches!(stmt, Statement::Assignment(_)));
    }

    #[test]
    fn parses_compound_assignment() {
        let stmt = parse_stmt("x += 1");
        match stmt {
            Statement::Assignment(a) => assert_eq!(a.operator, "+="),
            other => panic!("expected assignment, got {other:?}"),
        }
    }

    #[test]
    fn parses_expression_statement() {
        let stmt = parse_stmt("println(1)");
        assert!(matches!(stmt, Statement::Expression(_)));
    }

    #[test]
    fn parses_for_loop() {
        let stmt = parse_stmt("for (i in 0..10) { println(i) }");
        match stmt {
            Statement::Loop(LoopStatement::For { .. }) => {}
            other => panic!("expected for loop, got {other:?}"),
        }
    }

    #[test]
    fn parses_while_loop() {
        let stmt = parse_stmt("while (true) { break }");
        assert!(matches!(stmt, Statement::Loop(LoopStatement::While { .. })));
    }

    #[test]
    fn parses_do_while_loop() {
        let stmt = parse_stmt("do { x() } while (cond)");
        assert!(matches!(stmt, Statement::Loop(LoopStatement::DoWhile { .. })));
    }
}
