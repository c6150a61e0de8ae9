//! Type parsing: nullable types, user types with generic arguments,
//! function types, parenthesized types, `dynamic`, and the
//! ambiguous-receiver resolution a function-type parses into.

use crate::ast::*;
use crate::Parser;
use ktc_util::ParseResult;

impl<'a> Parser<'a> {
    /// `type` - the entry point used by return types, parameter types,
    /// property types, and supertype lists.
    pub(crate) fn parse_type(&mut self) -> ParseResult<Type> {
        let base = self.parse_unnullable_type()?;
        if self.accept("?").is_some() {
            Ok(Type::Nullable(Box::new(base)))
        } else {
            Ok(base)
        }
    }

    fn parse_unnullable_type(&mut self) -> ParseResult<Type> {
        if self.would_accept("dynamic") {
            self.bump();
            return Ok(Type::Dynamic);
        }
        if self.would_accept("(") {
            // Could be a parenthesized type `(Int)` or the parameter
            // list of a function type `(Int) -> String`. Function
            // types are far more common once a `->` follows, so try
            // that interpretation first and fall back.
            if let Some(ft) = self.try_parse(|p| p.parse_function_type_params_and_arrow()) {
                return Ok(Type::Function(ft));
            }
            self.expect("(")?;
            let inner = self.parse_type()?;
            self.expect(")")?;
            return Ok(Type::Parenthesized(Box::new(inner)));
        }
        // A receiver-qualified function type: `Int.(String) -> Unit`.
        if let Some(ft) = self.try_parse(|p| p.parse_receiver_function_type()) {
            return Ok(Type::Function(ft));
        }
        Ok(Type::User(self.parse_user_type()?))
    }

    fn parse_function_type_params_and_arrow(&mut self) -> ParseResult<FunctionType> {
        self.expect("(")?;
        let mut parameters = Vec::new();
        if !self.would_accept(")") {
            parameters.push(self.parse_type()?);
            while self.accept(",").is_some() {
                parameters.push(self.parse_type()?);
            }
        }
        self.expect(")")?;
        self.expect("->")?;
        let return_type = Box::new(self.parse_type()?);
        Ok(FunctionType {
            receiver: None,
            parameters,
            return_type,
        })
    }

    fn parse_receiver_function_type(&mut self) -> ParseResult<FunctionType> {
        let receiver = if self.would_accept("(") {
            self.expect("(")?;
            let inner = self.parse_type()?;
            self.expect(")")?;
            Type::Parenthesized(Box::new(inner))
        } else {
            Type::User(self.parse_user_type()?)
        };
        self.expect(".")?;
        let mut function_type = self.parse_function_type_params_and_arrow()?;
        function_type.receiver = Some(Box::new(receiver));
        Ok(function_type)
    }

    pub(crate) fn parse_user_type(&mut self) -> ParseResult<UserType> {
        let mut segments = vec![self.parse_simple_user_type()?];
        while self.would_accept(".") && self.peek_nth(1).kind == ktc_lex::TokenKind::Identifier {
            self.bump();
            segments.push(self.parse_simple_user_type()?);
        }
        Ok(UserType { segments })
    }

    fn parse_simple_user_type(&mut self) -> ParseResult<SimpleUserType> {
        let name = self.expect_identifier()?;
        let type_arguments = self.parse_optional_type_arguments()?;
        Ok(SimpleUserType { name, type_arguments })
    }

    /// `<Type, *, in Type, out Type>`, or an empty list if the next
    /// token isn't `<` at all. This is itself speculative: `<` can also
    /// be a comparison operator, so callers that parse it inside an
    /// expression context go through [`Parser::parse_call_suffix`]
    /// instead, which tries this and rewinds on failure.
    pub(crate) fn parse_optional_type_arguments(&mut self) -> ParseResult<Vec<TypeProjection>> {
        if !self.would_accept("<") {
            return Ok(Vec::new());
        }
        self.expect("<")?;
        let mut projections = vec![self.parse_type_projection()?];
        while self.accept(",").is_some() {
            projections.push(self.parse_type_projection()?);
        }
        self.expect(">")?;
        Ok(projections)
    }

    fn parse_type_projection(&mut self) -> ParseResult<TypeProjection> {
        if self.accept("*").is_some() {
            return Ok(TypeProjection::Star);
        }
        let variance = if self.would_accept("in") || self.would_accept("out") {
            Some(self.bump().value)
        } else {
            None
        };
        let ty = Box::new(self.parse_type()?);
        Ok(TypeProjection::Type { variance, ty })
    }

    pub(crate) fn parse_type_parameters(&mut self) -> ParseResult<Vec<TypeParameter>> {
        if self.accept("<").is_none() {
            return Ok(Vec::new());
        }
        let mut params = vec![self.parse_type_parameter()?];
        while self.accept(",").is_some() {
            params.push(self.parse_type_parameter()?);
        }
        self.expect(">")?;
        Ok(params)
    }

    fn parse_type_parameter(&mut self) -> ParseResult<TypeParameter> {
        let annotations = self.parse_annotations();
        let variance = if self.would_accept("in") || self.would_accept("out") {
            Some(self.bump().value)
        } else {
            None
        };
        let name = self.expect_identifier()?;
        let bound = if self.accept(":").is_some() {
            Some(self.parse_type()?)
        } else {
            None
        };
        Ok(TypeParameter {
            annotations,
            variance,
            name,
            bound,
        })
    }

    pub(crate) fn parse_type_constraints(&mut self) -> ParseResult<Vec<TypeConstraint>> {
        if self.accept("where").is_none() {
            return Ok(Vec::new());
        }
        let mut constraints = vec![self.parse_type_constraint()?];
        while self.accept(",").is_some() {
            constraints.push(self.parse_type_constraint()?);
        }
        Ok(constraints)
    }

    fn parse_type_constraint(&mut self) -> ParseResult<TypeConstraint> {
        let annotations = self.parse_annotations();
        let name = self.expect_identifier()?;
        self.expect(":")?;
        let bound = self.parse_type()?;
        Ok(TypeConstraint {
            annotations,
            name,
            bound,
        })
    }
}
