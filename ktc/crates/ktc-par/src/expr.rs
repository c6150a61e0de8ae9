//! Expression parsing: the full binary-operator precedence chain,
//! prefix/postfix unary forms, primary expressions (literals, `if`,
//! `when`, `try`, jumps, lambdas, object literals, callable
//! references), and the handful of genuinely ambiguous constructs that
//! need a speculative or bounded lookahead to resolve:
//!
//! - `as?` vs `as` is resolved in the lexer (fused when unspaced).
//! - a trailing `{ ... }` after a call is a lambda argument, not a
//!   block statement - [`Parser::parse_call_suffix`] greedily attaches
//!   it.
//! - `Foo<Bar>()` vs `(Foo < Bar) > ()` is resolved with
//!   [`Parser::try_parse`] around the type-argument list.

use crate::ast::*;
use crate::Parser;
use ktc_lex::TokenKind;
use ktc_util::ParseResult;

impl<'a> Parser<'a> {
    pub(crate) fn parse_expression(&mut self) -> ParseResult<Expr> {
        self.parse_disjunction()
    }

    fn parse_disjunction(&mut self) -> ParseResult<Expr> {
        self.parse_left_assoc_binary(&["||"], Self::parse_conjunction)
    }

    fn parse_conjunction(&mut self) -> ParseResult<Expr> {
        self.parse_left_assoc_binary(&["&&"], Self::parse_equality)
    }

    fn parse_equality(&mut self) -> ParseResult<Expr> {
        self.parse_left_assoc_binary(&["==", "!=", "===", "!=="], Self::parse_comparison)
    }

    fn parse_comparison(&mut self) -> ParseResult<Expr> {
        self.parse_left_assoc_binary(&["<", ">", "<=", ">="], Self::parse_infix_operation)
    }

    /// `in`/`!in`/`is`/`!is` - these get dedicated AST nodes because
    /// their right-hand side differs structurally (an expression for
    /// range tests, a type for type tests).
    fn parse_infix_operation(&mut self) -> ParseResult<Expr> {
        let mut value = self.parse_elvis()?;
        loop {
            if self.would_accept("in") || self.would_accept("!in") {
                let negated = self.bump().value == "!in";
                let range = Box::new(self.parse_elvis()?);
                value = Expr::RangeTest {
                    value: Box::new(value),
                    negated,
                    range,
                };
            } else if self.would_accept("is") || self.would_accept("!is") {
                let negated = self.bump().value == "!is";
                let ty = self.parse_type()?;
                value = Expr::TypeTest {
                    value: Box::new(value),
                    negated,
                    ty,
                };
            } else {
                break;
            }
        }
        Ok(value)
    }

    fn parse_elvis(&mut self) -> ParseResult<Expr> {
        self.parse_left_assoc_binary(&["?:"], Self::parse_infix_function_call)
    }

    /// A bare identifier used as an infix function name: `1 shl 2`.
    fn parse_infix_function_call(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_range()?;
        while self.would_accept_kind(TokenKind::Identifier) {
            let operator = self.bump().value;
            let right = self.parse_range()?;
            left = Expr::Binary {
                left: Box::new(left),
                operator,
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_range(&mut self) -> ParseResult<Expr> {
        self.parse_left_assoc_binary(&["..", "..<"], Self::parse_additive)
    }

    fn parse_additive(&mut self) -> ParseResult<Expr> {
        self.parse_left_assoc_binary(&["+", "-"], Self::parse_multiplicative)
    }

    fn parse_multiplicative(&mut self) -> ParseResult<Expr> {
        self.parse_left_assoc_binary(&["*", "/", "%"], Self::parse_as_expression)
    }

    fn parse_as_expression(&mut self) -> ParseResult<Expr> {
        let mut value = self.parse_prefix_unary()?;
        while self.would_accept("as") || self.would_accept("as?") {
            let operator = self.bump().value;
            let ty = self.parse_type()?;
            value = Expr::As {
                value: Box::new(value),
                operator,
                ty,
            };
        }
        Ok(value)
    }

    fn parse_left_assoc_binary(
        &mut self,
        operators: &[&str],
        mut next: impl FnMut(&mut Self) -> ParseResult<Expr> + Copy,
    ) -> ParseResult<Expr> {
        let mut left = next(self)?;
        while self.would_accept_either(operators) {
            let operator = self.bump().value;
            let right = next(self)?;
            left = Expr::Binary {
                left: Box::new(left),
                operator,
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_prefix_unary(&mut self) -> ParseResult<Expr> {
        const PREFIX_OPERATORS: &[&str] = &["-", "+", "++", "--", "!"];
        let mut operators = Vec::new();
        loop {
            if self.would_accept_kind(TokenKind::At) {
                self.parse_annotation()?;
                continue;
            }
            if PREFIX_OPERATORS.iter().any(|o| self.would_accept(o)) {
                operators.push(self.bump().value);
            } else {
                break;
            }
        }
        let expr = Box::new(self.parse_postfix_unary()?);
        if operators.is_empty() {
            Ok(*expr)
        } else {
            Ok(Expr::PrefixUnary { operators, expr })
        }
    }

    fn parse_postfix_unary(&mut self) -> ParseResult<Expr> {
        let primary = self.parse_primary()?;
        let mut suffixes = Vec::new();
        loop {
            if self.would_accept("++") || self.would_accept("--") {
                suffixes.push(PostfixSuffix::IncDec(self.bump().value));
            } else if self.would_accept("::") {
                break;
            } else if self.would_accept(".") || self.would_accept("?.") {
                suffixes.push(self.parse_navigation_suffix()?);
            } else if self.would_accept("[") {
                suffixes.push(self.parse_indexing_suffix()?);
            } else if self.would_accept("(") || self.would_accept("<") || self.starts_trailing_lambda() {
                match self.try_parse(|p| p.parse_call_suffix()) {
                    Some(suffix) => suffixes.push(suffix),
                    None => break,
                }
            } else {
                break;
            }
        }
        if suffixes.is_empty() {
            Ok(primary)
        } else {
            Ok(Expr::PostfixUnary {
                primary: Box::new(primary),
                suffixes,
            })
        }
    }

    #[tracing::instrument(skip(self))]
    fn starts_trailing_lambda(&mut self) -> bool {
        self.would_accept_kind(TokenKind::Separator) && self.peek().value == "{"
    }

    fn parse_navigation_suffix(&mut self) -> ParseResult<PostfixSuffix> {
        let operator = self.bump().value;
        let member = if self.accept("(").is_some() {
            let inner = self.parse_expression()?;
            self.expect(")")?;
            NavigationMember::Parenthesized(Box::new(inner))
        } else if self.would_accept("class") {
            self.bump();
            NavigationMember::Class
        } else {
            NavigationMember::Identifier(self.expect_identifier()?)
        };
        Ok(PostfixSuffix::Navigation { operator, member })
    }

    fn parse_indexing_suffix(&mut self) -> ParseResult<PostfixSuffix> {
        self.expect("[")?;
        let mut indices = vec![self.parse_expression()?];
        while self.accept(",").is_some() {
            indices.push(self.parse_expression()?);
        }
        self.expect("]")?;
        Ok(PostfixSuffix::Indexing(indices))
    }

    #[tracing::instrument(skip(self))]
    fn parse_call_suffix(&mut self) -> ParseResult<PostfixSuffix> {
        let type_arguments = self.parse_optional_type_arguments()?;
        let value_arguments = if self.would_accept("(") {
            self.parse_value_arguments()?
        } else {
            Vec::new()
        };
        let annotated_lambda = if self.starts_trailing_lambda() {
            Some(Box::new(self.parse_lambda_literal()?))
        } else {
            None
        };
        if value_arguments.is_empty() && annotated_lambda.is_none() && type_arguments.is_empty() {
            let found = self.peek();
            return Err(ktc_util::ParseError::expected_found("call arguments", &found.value, found.position));
        }
        Ok(PostfixSuffix::CallSuffix {
            type_arguments,
            value_arguments,
            annotated_lambda,
        })
    }

    pub(crate) fn parse_value_arguments(&mut self) -> ParseResult<Vec<ValueArgument>> {
        self.expect("(")?;
        let mut arguments = Vec::new();
        if !self.would_accept(")") {
            arguments.push(self.parse_value_argument()?);
            while self.accept(",").is_some() {
                if self.would_accept(")") {
                    break;
                }
                arguments.push(self.parse_value_argument()?);
            }
        }
        self.expect(")")?;
        Ok(arguments)
    }

    fn parse_value_argument(&mut self) -> ParseResult<ValueArgument> {
        let name = if self.would_accept_kind(TokenKind::Identifier) && self.peek_nth(1).is("=") {
            let name = self.bump().value;
            self.expect("=")?;
            Some(name)
        } else {
            None
        };
        let spread = self.accept("*").is_some();
        let expr = self.parse_expression()?;
        Ok(ValueArgument { name, spread, expr })
    }

    fn parse_primary(&mut self) -> ParseResult<Expr> {
        if self.would_accept("::") {
            return self.parse_callable_reference(None);
        }
        if self.would_accept("(") {
            self.bump();
            let inner = self.parse_expression()?;
            self.expect(")")?;
            return self.maybe_callable_reference(Expr::Parenthesized(Box::new(inner)));
        }
        if self.starts_trailing_lambda() {
            return Ok(Expr::FunctionLiteral(Box::new(self.parse_lambda_literal()?)));
        }
        if self.would_accept("this") {
            let label = self.parse_label_suffix();
            return Ok(Expr::This(label));
        }
        if self.would_accept("super") {
            self.bump();
            let type_argument = if self.accept("<").is_some() {
                let ty = self.parse_type()?;
                self.expect(">")?;
                Some(ty)
            } else {
                None
            };
            let label = self.parse_label_suffix();
            return Ok(Expr::Super { type_argument, label });
        }
        if self.would_accept("if") {
            return Ok(Expr::If(Box::new(self.parse_if_expression()?)));
        }
        if self.would_accept("when") {
            return Ok(Expr::When(Box::new(self.parse_when_expression()?)));
        }
        if self.would_accept("try") {
            return Ok(Expr::Try(Box::new(self.parse_try_expression()?)));
        }
        if self.would_accept("throw") || self.would_accept("return") || self.would_accept("continue") || self.would_accept("break") {
            return Ok(Expr::Jump(Box::new(self.parse_jump_expression()?)));
        }
        if self.would_accept("object") {
            return Ok(Expr::ObjectLiteral(Box::new(self.parse_object_literal()?)));
        }
        if self.would_accept("fun") {
            return Ok(Expr::AnonymousFunction(Box::new(self.parse_anonymous_function()?)));
        }
        let kind = self.peek().kind;
        match kind {
            TokenKind::IntegerLiteral => Ok(Expr::Literal(Literal::Integer(self.bump().value))),
            TokenKind::HexLiteral => Ok(Expr::Literal(Literal::Hex(self.bump().value))),
            TokenKind::BinLiteral => Ok(Expr::Literal(Literal::Bin(self.bump().value))),
            TokenKind::UnsignedLiteral => Ok(Expr::Literal(Literal::Unsigned(self.bump().value))),
            TokenKind::LongLiteral => Ok(Expr::Literal(Literal::Long(self.bump().value))),
            TokenKind::FloatLiteral => Ok(Expr::Literal(Literal::Float(self.bump().value))),
            TokenKind::DoubleLiteral | TokenKind::RealLiteral => Ok(Expr::Literal(Literal::Double(self.bump().value))),
            TokenKind::BooleanLiteral => Ok(Expr::Literal(Literal::Boolean(self.bump().value))),
            TokenKind::NullLiteral => {
                self.bump();
                Ok(Expr::Literal(Literal::Null))
            }
            TokenKind::CharacterLiteral => Ok(Expr::Literal(Literal::Character(self.bump().value))),
            TokenKind::LineStringLiteral => Ok(Expr::StringLiteral(StringLiteral::Line(self.bump().value))),
            TokenKind::MultiLineStringLiteral => Ok(Expr::StringLiteral(StringLiteral::MultiLine(self.bump().value))),
            TokenKind::Identifier | TokenKind::QuotedIdentifier => {
                let name = self.bump().value;
                self.maybe_callable_reference(Expr::SimpleIdentifier(name))
            }
            _ => {
                let found = self.peek();
                Err(ktc_util::ParseError::expected_found("expression", &found.value, found.position))
            }
        }
    }

    fn maybe_callable_reference(&mut self, receiver: Expr) -> ParseResult<Expr> {
        if self.would_accept("::") {
            self.parse_callable_reference(Some(Box::new(receiver)))
        } else {
            Ok(receiver)
        }
    }

    fn parse_callable_reference(&mut self, receiver: Option<Box<Expr>>) -> ParseResult<Expr> {
        self.expect("::")?;
        let member = if self.would_accept("class") {
            self.bump();
            CallableMember::Class
        } else {
            CallableMember::Identifier(self.expect_identifier()?)
        };
        Ok(Expr::CallableReference(Box::new(CallableReference { receiver, member })))
    }

    fn parse_label_suffix(&mut self) -> Option<String> {
        // Labels fuse into the keyword token itself in the lexer
        // (`this@label`), so the value here already has the `@name`
        // suffix attached when present.
        let tok = self.bump();
        tok.value.split_once('@').map(|(_, label)| label.to_string())
    }

    pub(crate) fn parse_lambda_literal(&mut self) -> ParseResult<LambdaLiteral> {
        self.expect("{")?;
        let parameters = self.try_parse(|p| p.parse_lambda_parameter_list()).unwrap_or_default();
        let mut statements = Vec::new();
        while !self.would_accept("}") {
            statements.push(self.parse_statement()?);
            self.semi()?;
        }
        self.expect("}")?;
        Ok(LambdaLiteral { parameters, statements })
    }

    fn parse_lambda_parameter_list(&mut self) -> ParseResult<Vec<LambdaParameter>> {
        let mut parameters = Vec::new();
        if !self.would_accept("->") {
            parameters.push(self.parse_lambda_parameter()?);
            while self.accept(",").is_some() {
                parameters.push(self.parse_lambda_parameter()?);
            }
        }
        self.expect("->")?;
        Ok(parameters)
    }

    fn parse_lambda_parameter(&mut self) -> ParseResult<LambdaParameter> {
        let variable = self.parse_variable_declaration_or_multi()?;
        let ty = if self.accept(":").is_some() {
            Some(self.parse_type()?)
        } else {
            None
        };
        Ok(LambdaParameter { variable, ty })
    }

    fn parse_object_literal(&mut self) -> ParseResult<ObjectLiteral> {
        self.expect("object")?;
        let delegation_specifiers = if self.accept(":").is_some() {
            self.parse_delegation_specifiers()?
        } else {
            Vec::new()
        };
        self.expect("{")?;
        let mut body = Vec::new();
        while !self.would_accept("}") {
            body.push(self.parse_class_member()?);
        }
        self.expect("}")?;
        Ok(ObjectLiteral { delegation_specifiers, body })
    }

    fn parse_anonymous_function(&mut self) -> ParseResult<FunctionDeclaration> {
        let position = self.position();
        self.expect("fun")?;
        let value_parameters = self.parse_function_value_parameters()?;
        let return_type = if self.accept(":").is_some() {
            Some(self.parse_type()?)
        } else {
            None
        };
        let body = self.parse_optional_function_body()?;
        Ok(FunctionDeclaration {
            position,
            modifiers: Vec::new(),
            type_parameters: Vec::new(),
            receiver_type: None,
            name: None,
            value_parameters,
            return_type,
            type_constraints: Vec::new(),
            body,
        })
    }

    pub(crate) fn parse_function_value_parameters(&mut self) -> ParseResult<Vec<FunctionParameter>> {
        self.expect("(")?;
        let mut parameters = Vec::new();
        if !self.would_accept(")") {
            parameters.push(self.parse_function_parameter()?);
            while self.accept(",").is_some() {
                if self.would_accept(")") {
                    break;
                }
                parameters.push(self.parse_function_parameter()?);
            }
        }
        self.expect(")")?;
        Ok(parameters)
    }

    fn parse_function_parameter(&mut self) -> ParseResult<FunctionParameter> {
        let modifiers = self.parse_modifiers()?;
        let name = self.expect_identifier()?;
        self.expect(":")?;
        let ty = self.parse_type()?;
        let default_value = if self.accept("=").is_some() {
            Some(self.parse_expression()?)
        } else {
            None
        };
        Ok(FunctionParameter {
            modifiers,
            name,
            ty,
            default_value,
        })
    }

    pub(crate) fn parse_optional_function_body(&mut self) -> ParseResult<Option<FunctionBody>> {
        if self.would_accept("{") {
            Ok(Some(FunctionBody::Block(self.parse_block()?)))
        } else if self.accept("=").is_some() {
            Ok(Some(FunctionBody::Expression(Box::new(self.parse_expression()?))))
        } else {
            Ok(None)
        }
    }

    pub(crate) fn parse_block(&mut self) -> ParseResult<Block> {
        let position = self.position();
        self.expect("{")?;
        let mut statements = Vec::new();
        while !self.would_accept("}") {
            statements.push(self.parse_statement()?);
            self.semi()?;
        }
        self.expect("}")?;
        Ok(Block { position, statements })
    }

    fn parse_control_structure_body(&mut self) -> ParseResult<ControlStructureBody> {
        if self.would_accept("{") {
            Ok(ControlStructureBody::Block(self.parse_block()?))
        } else {
            Ok(ControlStructureBody::Expression(Box::new(self.parse_expression()?)))
        }
    }

    #[tracing::instrument(skip(self))]
    fn parse_if_expression(&mut self) -> ParseResult<IfExpression> {
        self.expect("if")?;
        self.expect("(")?;
        let condition = Box::new(self.parse_expression()?);
        self.expect(")")?;
        let body = if self.would_accept(";") || self.would_accept("else") {
            None
        } else {
            Some(self.parse_control_structure_body()?)
        };
        self.accept(";");
        // A sibling `when` entry's `else -> body` must not be absorbed by
        // this `if`: an `else` immediately followed by `->` belongs to the
        // enclosing entry, not to us.
        let else_body = if self.would_accept("else") && self.peek_nth(1).value != "->" {
            self.bump();
            if self.would_accept(";") {
                None
            } else {
                Some(self.parse_control_structure_body()?)
            }
        } else {
            None
        };
        Ok(IfExpression { condition, body, else_body })
    }

    fn parse_when_expression(&mut self) -> ParseResult<WhenExpression> {
        self.expect("when")?;
        let subject = if self.accept("(").is_some() {
            let annotations = self.parse_annotations();
            let variable = self.try_parse(|p| {
                let v = p.parse_variable_declaration()?;
                p.expect("=")?;
                Ok(v)
            });
            let expr = Box::new(self.parse_expression()?);
            self.expect(")")?;
            Some(WhenSubject {
                annotations,
                variable,
                expr,
            })
        } else {
            None
        };
        self.expect("{")?;
        let mut entries = Vec::new();
        while !self.would_accept("}") {
            entries.push(self.parse_when_entry()?);
        }
        self.expect("}")?;
        Ok(WhenExpression { subject, entries })
    }

    #[tracing::instrument(skip(self))]
    fn parse_when_entry(&mut self) -> ParseResult<WhenEntry> {
        if self.accept("else").is_some() {
            self.expect("->")?;
            let body = self.parse_control_structure_body()?;
            return Ok(WhenEntry::Else { body });
        }
        let mut conditions = vec![self.parse_when_condition()?];
        while self.accept(",").is_some() {
            conditions.push(self.parse_when_condition()?);
        }
        self.expect("->")?;
        let body = self.parse_control_structure_body()?;
        Ok(WhenEntry::Conditions { conditions, body })
    }

    fn parse_when_condition(&mut self) -> ParseResult<WhenCondition> {
        if self.would_accept("in") || self.would_accept("!in") {
            let negated = self.bump().value == "!in";
            let range = self.parse_expression()?;
            return Ok(WhenCondition::RangeTest { negated, range });
        }
        if self.would_accept("is") || self.would_accept("!is") {
            let negated = self.bump().value == "!is";
            let ty = self.parse_type()?;
            return Ok(WhenCondition::TypeTest { negated, ty });
        }
        Ok(WhenCondition::Expression(self.parse_expression()?))
    }

    fn parse_try_expression(&mut self) -> ParseResult<TryExpression> {
        self.expect("try")?;
        let block = self.parse_block()?;
        let mut catch_blocks = Vec::new();
        while self.would_accept("catch") {
            catch_blocks.push(self.parse_catch_block()?);
        }
        let finally_block = if self.accept("finally").is_some() {
            Some(self.parse_block()?)
        } else {
            None
        };
        Ok(TryExpression {
            block,
            catch_blocks,
            finally_block,
        })
    }

    fn parse_catch_block(&mut self) -> ParseResult<CatchBlock> {
        self.expect("catch")?;
        self.expect("(")?;
        let annotations = self.parse_annotations();
        let name = self.expect_identifier()?;
        self.expect(":")?;
        let ty = self.parse_type()?;
        self.expect(")")?;
        let block = self.parse_block()?;
        Ok(CatchBlock {
            annotations,
            name,
            ty,
            block,
        })
    }

    fn parse_jump_expression(&mut self) -> ParseResult<JumpExpression> {
        if self.would_accept("throw") {
            self.bump();
            return Ok(JumpExpression::Throw(Box::new(self.parse_expression()?)));
        }
        if self.would_accept("return") {
            let tok = self.bump();
            let label = tok.value.split_once('@').map(|(_, l)| l.to_string());
            let value = if self.starts_expression() {
                Some(Box::new(self.parse_expression()?))
            } else {
                None
            };
            return Ok(JumpExpression::Return { label, value });
        }
        if self.would_accept("continue") {
            let tok = self.bump();
            let label = tok.value.split_once('@').map(|(_, l)| l.to_string());
            return Ok(JumpExpression::Continue { label });
        }
        let tok = self.bump();
        let label = tok.value.split_once('@').map(|(_, l)| l.to_string());
        Ok(JumpExpression::Break { label })
    }

    fn starts_expression(&mut self) -> bool {
        !matches!(
            self.peek().value.as_str(),
            "}" | ")" | "]" | ";" | "," | "else" | "catch" | "finally"
        ) && !self.peek().is_eof()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParserConfig;

    fn parse_expr(src: &str) -> Expr {
        let mut p = Parser::new(src, ParserConfig::default());
        p.parse_expression().expect("expression parses")
    }

    #[test]
    fn additive_is_left_associative() {
        assert_eq!(parse_expr("1 + 2 - 3").to_string(), "1 + 2 - 3");
    }

    #[test]
    fn multiplicative_binds_tighter_than_additive() {
        let expr = parse_expr("1 + 2 * 3");
        match &expr {
            Expr::Binary { left, operator, right } => {
                assert_eq!(operator, "+");
                assert_eq!(left.to_string(), "1");
                assert_eq!(right.to_string(), "2 * 3");
            }
            other => panic!("expected binary, got {other:?}"),
        }
    }

    #[test]
    fn elvis_operator() {
        assert_eq!(parse_expr("a ?: b").to_string(), "a ?: b");
    }

    #[test]
    fn range_test_with_in() {
        let expr = parse_expr("x in 1..10");
        assert!(matches!(expr, Expr::RangeTest { negated: false, .. }));
    }

    #[test]
    fn negated_type_test() {
        let expr = parse_expr("x !is String");
        assert!(matches!(expr, Expr::TypeTest { negated: true, .. }));
    }

    #[test]
    fn as_question_cast() {
        assert_eq!(parse_expr("x as? Int").to_string(), "x as? Int");
    }

    #[test]
    fn call_with_arguments() {
        let expr = parse_expr("foo(1, 2)");
        match expr {
            Expr::PostfixUnary { suffixes, .. } => assert_eq!(suffixes.len(), 1),
            other => panic!("expected call, got {other:?}"),
        }
    }

    #[test]
    fn call_with_trailing_lambda() {
        let expr = parse_expr("items.map { it * 2 }");
        match expr {
            Expr::PostfixUnary { suffixes, .. } => assert_eq!(suffixes.len(), 2),
            other => panic!("expected navigation + call, got {other:?}"),
        }
    }

    #[test]
    fn navigation_chain() {
        let expr = parse_expr("a.b.c");
        assert_eq!(expr.to_string(), "a.b.c");
    }

    #[test]
    fn safe_navigation() {
        let expr = parse_expr("a?.b");
        assert_eq!(expr.to_string(), "a?.b");
    }

    #[test]
    fn indexing() {
        let expr = parse_expr("a[0]");
        assert_eq!(expr.to_string(), "a[0]");
    }

    #[test]
    fn if_expression_as_expression() {
        let expr = parse_expr("if (a) 1 else 2");
        assert_eq!(expr.to_string(), "if (a) 1 else 2");
    }

    #[test]
    fn when_with_else() {
        let expr = parse_expr("when (x) { 1 -> \"one\"\n else -> \"other\" }");
        assert!(matches!(expr, Expr::When(_)));
    }

    #[test]
    fn when_entry_if_without_else_does_not_absorb_sibling_else() {
        let expr = parse_expr("when (x) { 1 -> if (a) 2\n else -> 3 }");
        match expr {
            Expr::When(when) => {
                assert_eq!(when.entries.len(), 2);
                assert!(matches!(when.entries[1], WhenEntry::Else { .. }));
            }
            other => panic!("expected a when expression, got {other:?}"),
        }
    }

    #[test]
    fn callable_reference_without_receiver() {
        let expr = parse_expr("::foo");
        assert_eq!(expr.to_string(), "::foo");
    }

    #[test]
    fn callable_reference_with_receiver() {
        let expr = parse_expr("String::length");
        assert_eq!(expr.to_string(), "String::length");
    }

    #[test]
    fn infix_function_call() {
        assert_eq!(parse_expr("1 shl 2").to_string(), "1 shl 2");
    }
}
