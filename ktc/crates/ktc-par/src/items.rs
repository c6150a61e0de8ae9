//! Declaration parsing: classes, objects, functions, properties, and
//! type aliases - everything that can stand at the top level of a file,
//! inside a class body, or (minus accessors) inside a block.
//!
//! The hard part here is not any single grammar rule but an ambiguity
//! that cuts across all of them: a function or property can carry an
//! optional receiver type before its name (`fun String.reversed()`,
//! `val Foo.bar: Int`), and the receiver and the name are lexically
//! indistinguishable from a single dotted, possibly-generic type until
//! you notice there's nothing left to be the name. `parse_receiver_and_name`
//! is where that gets resolved: it speculatively parses a full type,
//! then decides whether its last segment was actually the declaration's
//! name or whether a `.` is still owed.

use crate::ast::*;
use crate::Parser;
use ktc_util::{ParseError, ParseResult};

impl<'a> Parser<'a> {
    /// A local declaration (inside a block or script): never attaches
    /// `get`/`set` accessors, since those only belong to top-level and
    /// member property declarations.
    pub(crate) fn parse_declaration(&mut self) -> ParseResult<Declaration> {
        self.parse_declaration_with(false)
    }

    /// A top-level or class-member declaration: `val`/`var` here may be
    /// followed by `get`/`set` accessor blocks.
    pub(crate) fn parse_top_level_declaration(&mut self) -> ParseResult<Declaration> {
        self.parse_declaration_with(true)
    }

    #[tracing::instrument(skip(self))]
    fn parse_declaration_with(&mut self, top_level: bool) -> ParseResult<Declaration> {
        let position = self.position();
        let modifiers = self.parse_modifiers()?;
        if self.would_accept("class")
            || self.would_accept("interface")
            || (self.would_accept("fun") && self.peek_nth(1).is("interface"))
        {
            return Ok(Declaration::Class(self.parse_class_declaration(position, modifiers)?));
        }
        if self.would_accept("object") {
            return Ok(Declaration::Object(self.parse_object_declaration(position, modifiers)?));
        }
        if self.would_accept("fun") {
            return Ok(Declaration::Function(self.parse_function_declaration(position, modifiers)?));
        }
        if self.would_accept("val") || self.would_accept("var") {
            return Ok(Declaration::Property(self.parse_property_declaration(position, modifiers, top_level)?));
        }
        if self.would_accept("typealias") {
            return Ok(Declaration::TypeAlias(self.parse_type_alias_declaration(position, modifiers)?));
        }
        let found = self.peek();
        Err(ParseError::expected_found("declaration", &found.value, found.position))
    }

    // -- classes, interfaces, fun interfaces -----------------------------------

    fn parse_class_declaration(&mut self, position: ktc_util::Position, modifiers: Modifiers) -> ParseResult<ClassDeclaration> {
        let kind = if self.would_accept("fun") {
            self.bump();
            self.expect("interface")?;
            ClassKind::FunInterface
        } else if self.accept("class").is_some() {
            ClassKind::Class
        } else {
            self.expect("interface")?;
            ClassKind::Interface
        };
        let name = self.expect_identifier()?;
        let type_parameters = self.parse_type_parameters()?;
        let primary_constructor = self.parse_primary_constructor()?;
        let delegation_specifiers = if self.accept(":").is_some() {
            self.parse_delegation_specifiers()?
        } else {
            Vec::new()
        };
        let type_constraints = self.parse_type_constraints()?;
        let is_enum = modifiers
            .iter()
            .any(|m| matches!(m, Modifier::Keyword(k) if k == "enum"));
        let body = if self.would_accept("{") {
            Some(if is_enum {
                self.parse_enum_class_body()?
            } else {
                self.parse_class_body()?
            })
        } else {
            None
        };
        Ok(ClassDeclaration {
            position,
            modifiers,
            kind,
            name,
            type_parameters,
            primary_constructor,
            delegation_specifiers,
            type_constraints,
            body,
        })
    }

    /// `[modifiers 'constructor'] '(' classParameter,* ')'`, or nothing
    /// at all if the class has neither a `constructor` keyword nor a
    /// bare parameter list immediately after its name/type parameters.
    fn parse_primary_constructor(&mut self) -> ParseResult<Option<PrimaryConstructor>> {
        let with_keyword = self.try_parse(|p| {
            let modifiers = p.parse_modifiers()?;
            p.expect("constructor")?;
            Ok(modifiers)
        });
        match with_keyword {
            Some(modifiers) => Ok(Some(PrimaryConstructor {
                modifiers,
                parameters: self.parse_class_parameters()?,
            })),
            None if self.would_accept("(") => Ok(Some(PrimaryConstructor {
                modifiers: Vec::new(),
                parameters: self.parse_class_parameters()?,
            })),
            None => Ok(None),
        }
    }

    fn parse_class_parameters(&mut self) -> ParseResult<Vec<ClassParameter>> {
        self.expect("(")?;
        let mut parameters = Vec::new();
        if !self.would_accept(")") {
            parameters.push(self.parse_class_parameter()?);
            while self.accept(",").is_some() {
                if self.would_accept(")") {
                    break;
                }
                parameters.push(self.parse_class_parameter()?);
            }
        }
        self.expect(")")?;
        Ok(parameters)
    }

    fn parse_class_parameter(&mut self) -> ParseResult<ClassParameter> {
        let modifiers = self.parse_modifiers()?;
        let mutability = if self.would_accept("val") || self.would_accept("var") {
            Some(self.bump().value)
        } else {
            None
        };
        let name = self.expect_identifier()?;
        self.expect(":")?;
        let ty = self.parse_type()?;
        let default_value = if self.accept("=").is_some() {
            Some(self.parse_expression()?)
        } else {
            None
        };
        Ok(ClassParameter {
            modifiers,
            mutability,
            name,
            ty,
            default_value,
        })
    }

    /// `: delegationSpecifier, ...` - each entry tried in order as an
    /// explicit `by`-delegation, a supertype constructor call, and
    /// finally a bare supertype, since all three start with a type.
    pub(crate) fn parse_delegation_specifiers(&mut self) -> ParseResult<Vec<DelegationSpecifier>> {
        let mut specifiers = vec![self.parse_annotated_delegation_specifier()?];
        while self.accept(",").is_some() {
            specifiers.push(self.parse_annotated_delegation_specifier()?);
        }
        Ok(specifiers)
    }

    fn parse_annotated_delegation_specifier(&mut self) -> ParseResult<DelegationSpecifier> {
        let _annotations = self.parse_annotations();
        self.parse_delegation_specifier()
    }

    fn parse_delegation_specifier(&mut self) -> ParseResult<DelegationSpecifier> {
        if let Some(spec) = self.try_parse(|p| {
            let ty = p.parse_type()?;
            p.expect("by")?;
            let expr = p.parse_expression()?;
            Ok(DelegationSpecifier::Explicit { ty, expr })
        }) {
            return Ok(spec);
        }
        if let Some(spec) = self.try_parse(|p| {
            let ty = p.parse_user_type()?;
            let arguments = p.parse_value_arguments()?;
            Ok(DelegationSpecifier::SuperTypeCallEntry { ty, arguments })
        }) {
            return Ok(spec);
        }
        Ok(DelegationSpecifier::SuperType(self.parse_type()?))
    }

    fn parse_class_body(&mut self) -> ParseResult<ClassBody> {
        self.expect("{")?;
        let mut members = Vec::new();
        while !self.would_accept("}") {
            members.push(self.parse_class_member()?);
        }
        self.expect("}")?;
        Ok(ClassBody {
            enum_entries: Vec::new(),
            members,
        })
    }

    /// An enum's class body: zero or more comma-separated enum entries,
    /// optionally followed by a `;` and the ordinary member list.
    fn parse_enum_class_body(&mut self) -> ParseResult<ClassBody> {
        self.expect("{")?;
        let mut enum_entries = Vec::new();
        if !self.would_accept(";") && !self.would_accept("}") {
            enum_entries.push(self.parse_enum_entry()?);
            while self.accept(",").is_some() {
                if self.would_accept(";") || self.would_accept("}") {
                    break;
                }
                enum_entries.push(self.parse_enum_entry()?);
            }
        }
        let mut members = Vec::new();
        if self.accept(";").is_some() {
            while !self.would_accept("}") {
                members.push(self.parse_class_member()?);
            }
        }
        self.expect("}")?;
        Ok(ClassBody { enum_entries, members })
    }

    fn parse_enum_entry(&mut self) -> ParseResult<EnumEntry> {
        let modifiers = self.parse_modifiers()?;
        let name = self.expect_identifier()?;
        let arguments = if self.would_accept("(") {
            self.parse_value_arguments()?
        } else {
            Vec::new()
        };
        let body = if self.would_accept("{") {
            Some(self.parse_class_body()?)
        } else {
            None
        };
        Ok(EnumEntry {
            modifiers,
            name,
            arguments,
            body,
        })
    }

    pub(crate) fn parse_class_member(&mut self) -> ParseResult<ClassMember> {
        if self.accept("init").is_some() {
            return Ok(ClassMember::Init(self.parse_block()?));
        }
        if self.starts_secondary_constructor() {
            return Ok(ClassMember::SecondaryConstructor(self.parse_secondary_constructor()?));
        }
        if self.starts_companion_object() {
            let position = self.position();
            let modifiers = self.parse_modifiers()?;
            return Ok(ClassMember::CompanionObject(self.parse_object_declaration(position, modifiers)?));
        }
        Ok(ClassMember::Declaration(self.parse_top_level_declaration()?))
    }

    fn starts_secondary_constructor(&mut self) -> bool {
        self.simulate(|p| {
            let _ = p.parse_modifiers();
            p.would_accept("constructor")
        })
    }

    /// `companion` is itself a plain modifier keyword, so telling a
    /// companion object member apart from an ordinary modified
    /// declaration means looking past the whole modifier list for the
    /// `object` keyword it must be followed by.
    fn starts_companion_object(&mut self) -> bool {
        self.simulate(|p| {
            let modifiers = p.parse_modifiers().unwrap_or_default();
            modifiers
                .iter()
                .any(|m| matches!(m, Modifier::Keyword(k) if k == "companion"))
                && p.would_accept("object")
        })
    }

    fn parse_secondary_constructor(&mut self) -> ParseResult<SecondaryConstructor> {
        let modifiers = self.parse_modifiers()?;
        self.expect("constructor")?;
        let parameters = self.parse_function_value_parameters()?;
        let delegation_call = if self.accept(":").is_some() {
            Some(self.parse_constructor_delegation_call()?)
        } else {
            None
        };
        let body = if self.would_accept("{") {
            Some(self.parse_block()?)
        } else {
            None
        };
        Ok(SecondaryConstructor {
            modifiers,
            parameters,
            delegation_call,
            body,
        })
    }

    fn parse_constructor_delegation_call(&mut self) -> ParseResult<ConstructorDelegationCall> {
        let target = if self.accept("this").is_some() {
            ConstructorDelegationTarget::This
        } else if self.accept("super").is_some() {
            ConstructorDelegationTarget::Super
        } else {
            let found = self.peek();
            return Err(ParseError::expected_found("'this' or 'super'", &found.value, found.position));
        };
        let arguments = self.parse_value_arguments()?;
        Ok(ConstructorDelegationCall { target, arguments })
    }

    // -- objects ----------------------------------------------------------------

    fn parse_object_declaration(&mut self, position: ktc_util::Position, modifiers: Modifiers) -> ParseResult<ObjectDeclaration> {
        self.expect("object")?;
        let is_companion = modifiers
            .iter()
            .any(|m| matches!(m, Modifier::Keyword(k) if k == "companion"));
        let name = if self.would_accept_kind(ktc_lex::TokenKind::Identifier)
            || self.would_accept_kind(ktc_lex::TokenKind::QuotedIdentifier)
        {
            Some(self.expect_identifier()?)
        } else {
            None
        };
        let delegation_specifiers = if self.accept(":").is_some() {
            self.parse_delegation_specifiers()?
        } else {
            Vec::new()
        };
        let body = if self.would_accept("{") {
            Some(self.parse_class_body()?)
        } else {
            None
        };
        Ok(ObjectDeclaration {
            position,
            modifiers,
            is_companion,
            name,
            delegation_specifiers,
            body,
        })
    }

    // -- functions ----------------------------------------------------------------

    fn parse_function_declaration(&mut self, position: ktc_util::Position, modifiers: Modifiers) -> ParseResult<FunctionDeclaration> {
        self.expect("fun")?;
        let type_parameters = self.parse_type_parameters()?;
        let (receiver_type, name) = self.parse_receiver_and_name()?;
        let value_parameters = self.parse_function_value_parameters()?;
        let return_type = if self.accept(":").is_some() {
            Some(self.parse_type()?)
        } else {
            None
        };
        let type_constraints = self.parse_type_constraints()?;
        let body = self.parse_optional_function_body()?;
        Ok(FunctionDeclaration {
            position,
            modifiers,
            type_parameters,
            receiver_type,
            name: Some(name),
            value_parameters,
            return_type,
            type_constraints,
            body,
        })
    }

    // -- properties ---------------------------------------------------------------

    fn parse_property_declaration(&mut self, position: ktc_util::Position, modifiers: Modifiers, top_level: bool) -> ParseResult<PropertyDeclaration> {
        let is_var = self.would_accept("var");
        if is_var {
            self.bump();
        } else {
            self.expect("val")?;
        }
        let type_parameters = self.parse_type_parameters()?;

        let (receiver_type, variable) = if self.would_accept("(") {
            let multi = self.parse_multi_variable_declaration()?;
            if self.would_accept(":") {
                let found = self.peek();
                return Err(ParseError::new(
                    "type annotations are not allowed on a destructuring declaration",
                    found.position,
                ));
            }
            (None, VariableDeclarationOrMulti::Multi(multi))
        } else {
            let (receiver, name) = self.parse_receiver_and_name()?;
            let ty = if self.accept(":").is_some() {
                Some(self.parse_type()?)
            } else {
                None
            };
            (
                receiver,
                VariableDeclarationOrMulti::Single(VariableDeclaration {
                    annotations: Vec::new(),
                    name,
                    ty,
                }),
            )
        };

        let type_constraints = self.parse_type_constraints()?;

        let initializer = if self.accept("=").is_some() {
            Some(PropertyInitializer::Expression(self.parse_expression()?))
        } else if self.accept("by").is_some() {
            Some(PropertyInitializer::Delegate(self.parse_expression()?))
        } else {
            None
        };

        let (getter, setter) = if top_level {
            self.parse_accessors()?
        } else {
            (None, None)
        };

        Ok(PropertyDeclaration {
            position,
            modifiers,
            is_var,
            type_parameters,
            receiver_type,
            variable,
            type_constraints,
            initializer,
            getter,
            setter,
        })
    }

    fn parse_multi_variable_declaration(&mut self) -> ParseResult<MultiVariableDeclaration> {
        self.expect("(")?;
        let mut variables = vec![self.parse_variable_declaration()?];
        while self.accept(",").is_some() {
            if self.would_accept(")") {
                break;
            }
            variables.push(self.parse_variable_declaration()?);
        }
        self.expect(")")?;
        Ok(MultiVariableDeclaration { variables })
    }

    pub(crate) fn parse_variable_declaration(&mut self) -> ParseResult<VariableDeclaration> {
        let annotations = self.parse_annotations();
        let name = self.expect_identifier()?;
        let ty = if self.accept(":").is_some() {
            Some(self.parse_type()?)
        } else {
            None
        };
        Ok(VariableDeclaration { annotations, name, ty })
    }

    pub(crate) fn parse_variable_declaration_or_multi(&mut self) -> ParseResult<VariableDeclarationOrMulti> {
        if self.would_accept("(") {
            Ok(VariableDeclarationOrMulti::Multi(self.parse_multi_variable_declaration()?))
        } else {
            Ok(VariableDeclarationOrMulti::Single(self.parse_variable_declaration()?))
        }
    }

    /// Resolves the receiver-vs-name ambiguity shared by function and
    /// (single-variable) property declarations: `fun String.reversed()`
    /// and `fun foo()` start identically, since `foo` alone is just as
    /// valid a (single-segment, receiver-less) type as `String.` is the
    /// first part of a longer one. Speculatively parse a type; if it
    /// isn't immediately followed by `.`, its last segment must really
    /// have been the name all along, so peel it back off.
    #[tracing::instrument(skip(self))]
    fn parse_receiver_and_name(&mut self) -> ParseResult<(Option<Type>, String)> {
        if let Some(ty) = self.try_parse(|p| p.parse_type()) {
            if !self.would_accept(".") {
                if let Type::User(mut user) = ty {
                    let last_has_generics = user
                        .segments
                        .last()
                        .map(|s| !s.type_arguments.is_empty())
                        .unwrap_or(true);
                    if !last_has_generics {
                        let name = user.segments.pop().expect("non-empty user type").name;
                        let receiver = if user.segments.is_empty() {
                            None
                        } else {
                            Some(Type::User(UserType { segments: user.segments }))
                        };
                        return Ok((receiver, name));
                    }
                    let found = self.peek();
                    return Err(ParseError::expected_found("identifier", &found.value, found.position));
                }
                let found = self.peek();
                return Err(ParseError::expected_found("'.'", &found.value, found.position));
            }
            self.expect(".")?;
            let name = self.expect_identifier()?;
            return Ok((Some(ty), name));
        }
        let name = self.expect_identifier()?;
        Ok((None, name))
    }

    /// `get`/`set` accessor blocks, only ever attached by callers
    /// parsing a top-level-or-member property declaration. At most one
    /// of each; a repeat is a hard error, not a speculative failure.
    fn parse_accessors(&mut self) -> ParseResult<(Option<Getter>, Option<Setter>)> {
        let mut getter: Option<Getter> = None;
        let mut setter: Option<Setter> = None;
        loop {
            match self.try_parse(|p| p.parse_one_accessor()) {
                Some(Accessor::Getter(g)) => {
                    if getter.is_some() {
                        let found = self.peek();
                        return Err(ParseError::new("duplicate property getter", found.position));
                    }
                    getter = Some(g);
                }
                Some(Accessor::Setter(s)) => {
                    if setter.is_some() {
                        let found = self.peek();
                        return Err(ParseError::new("duplicate property setter", found.position));
                    }
                    setter = Some(s);
                }
                None => break,
            }
        }
        Ok((getter, setter))
    }

    fn parse_one_accessor(&mut self) -> ParseResult<Accessor> {
        self.accept(";");
        let modifiers = self.parse_modifiers()?;
        if self.accept("get").is_some() {
            let mut return_type = None;
            let mut body = None;
            if self.accept("(").is_some() {
                self.expect(")")?;
                if self.accept(":").is_some() {
                    return_type = Some(self.parse_type()?);
                }
                body = self.parse_optional_function_body()?;
            }
            return Ok(Accessor::Getter(Getter {
                modifiers,
                return_type,
                body,
            }));
        }
        if self.accept("set").is_some() {
            self.expect("(")?;
            if self.would_accept(")") {
                let found = self.peek();
                return Err(ParseError::new("a property setter must declare its value parameter", found.position));
            }
            let parameter = self.parse_function_parameter_without_default()?;
            self.expect(")")?;
            let body = self.parse_optional_function_body()?;
            return Ok(Accessor::Setter(Setter {
                modifiers,
                parameter: Some(parameter),
                body,
            }));
        }
        let found = self.peek();
        Err(ParseError::expected_found("'get' or 'set'", &found.value, found.position))
    }

    fn parse_function_parameter_without_default(&mut self) -> ParseResult<FunctionParameter> {
        let modifiers = self.parse_modifiers()?;
        let name = self.expect_identifier()?;
        let ty = if self.accept(":").is_some() {
            Some(self.parse_type()?)
        } else {
            None
        };
        Ok(FunctionParameter {
            modifiers,
            name,
            ty: ty.unwrap_or(Type::Dynamic),
            default_value: None,
        })
    }

    // -- type aliases ---------------------------------------------------------------

    fn parse_type_alias_declaration(&mut self, position: ktc_util::Position, modifiers: Modifiers) -> ParseResult<TypeAliasDeclaration> {
        self.expect("typealias")?;
        let name = self.expect_identifier()?;
        let type_parameters = self.parse_type_parameters()?;
        self.expect("=")?;
        let ty = self.parse_type()?;
        Ok(TypeAliasDeclaration {
            position,
            modifiers,
            name,
            type_parameters,
            ty,
        })
    }
}

enum Accessor {
    Getter(Getter),
    Setter(Setter),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParserConfig;

    fn parse_decl(src: &str) -> Declaration {
        let mut p = Parser::new(src, ParserConfig::default());
        p.parse_top_level_declaration().expect("declaration parses")
    }

    #[test]
    fn parses_simple_class() {
        let decl = parse_decl("class Point(val x: Int, val y: Int)");
        match decl {
            Declaration::Class(c) => {
                assert_eq!(c.name, "Point");
                assert_eq!(c.primary_constructor.unwrap().parameters.len(), 2);
            }
            other => panic!("expected class, got {other:?}"),
        }
    }

    #[test]
    fn parses_interface_with_supertype() {
        let decl = parse_decl("interface Animal : Named, Comparable<Animal>");
        match decl {
            Declaration::Class(c) => {
                assert_eq!(c.kind, ClassKind::Interface);
                assert_eq!(c.delegation_specifiers.len(), 2);
            }
            other => panic!("expected interface, got {other:?}"),
        }
    }

    #[test]
    fn parses_fun_interface() {
        let decl = parse_decl("fun interface Callback { fun invoke() }");
        match decl {
            Declaration::Class(c) => assert_eq!(c.kind, ClassKind::FunInterface),
            other => panic!("expected fun interface, got {other:?}"),
        }
    }

    #[test]
    fn parses_class_with_delegation() {
        let decl = parse_decl("class Box(value: Int) : Comparable<Box> by Delegate(value)");
        match decl {
            Declaration::Class(c) => match &c.delegation_specifiers[0] {
                DelegationSpecifier::Explicit { .. } => {}
                other => panic!("expected explicit delegation, got {other:?}"),
            },
            other => panic!("expected class, got {other:?}"),
        }
    }

    #[test]
    fn parses_enum_class() {
        let decl = parse_decl("enum class Color { RED, GREEN, BLUE }");
        match decl {
            Declaration::Class(c) => assert_eq!(c.body.unwrap().enum_entries.len(), 3),
            other => panic!("expected enum class, got {other:?}"),
        }
    }

    #[test]
    fn parses_enum_class_with_members() {
        let decl = parse_decl("enum class Color { RED, GREEN; fun hex(): String = \"\" }");
        match decl {
            Declaration::Class(c) => {
                let body = c.body.unwrap();
                assert_eq!(body.enum_entries.len(), 2);
                assert_eq!(body.members.len(), 1);
            }
            other => panic!("expected enum class, got {other:?}"),
        }
    }

    #[test]
    fn parses_class_with_secondary_constructor() {
        let decl = parse_decl("class Foo { constructor(x: Int) : this() {} }");
        match decl {
            Declaration::Class(c) => {
                let body = c.body.unwrap();
                assert!(matches!(body.members[0], ClassMember::SecondaryConstructor(_)));
            }
            other => panic!("expected class, got {other:?}"),
        }
    }

    #[test]
    fn parses_companion_object_member() {
        let decl = parse_decl("class Foo { companion object { val x = 1 } }");
        match decl {
            Declaration::Class(c) => {
                let body = c.body.unwrap();
                assert!(matches!(body.members[0], ClassMember::CompanionObject(_)));
            }
            other => panic!("expected class, got {other:?}"),
        }
    }

    #[test]
    fn parses_init_block() {
        let decl = parse_decl("class Foo { init { println(1) } }");
        match decl {
            Declaration::Class(c) => {
                let body = c.body.unwrap();
                assert!(matches!(body.members[0], ClassMember::Init(_)));
            }
            other => panic!("expected class, got {other:?}"),
        }
    }

    #[test]
    fn parses_object_declaration() {
        let decl = parse_decl("object Singleton { val x = 1 }");
        match decl {
            Declaration::Object(o) => {
                assert_eq!(o.name.as_deref(), Some("Singleton"));
                assert!(!o.is_companion);
            }
            other => panic!("expected object, got {other:?}"),
        }
    }

    #[test]
    fn parses_plain_function() {
        let decl = parse_decl("fun add(a: Int, b: Int): Int = a + b");
        match decl {
            Declaration::Function(f) => {
                assert_eq!(f.name.as_deref(), Some("add"));
                assert!(f.receiver_type.is_none());
                assert_eq!(f.value_parameters.len(), 2);
            }
            other => panic!("expected function, got {other:?}"),
        }
    }

    #[test]
    fn parses_extension_function() {
        let decl = parse_decl("fun String.reversed(): String { return this }");
        match decl {
            Declaration::Function(f) => {
                assert_eq!(f.name.as_deref(), Some("reversed"));
                assert_eq!(f.receiver_type.unwrap().to_string(), "String");
            }
            other => panic!("expected function, got {other:?}"),
        }
    }

    #[test]
    fn parses_generic_extension_function() {
        let decl = parse_decl("fun <T> MutableList<T>.swap(i: Int, j: Int) {}");
        match decl {
            Declaration::Function(f) => {
                assert_eq!(f.name.as_deref(), Some("swap"));
                assert_eq!(f.receiver_type.unwrap().to_string(), "MutableList<T>");
            }
            other => panic!("expected function, got {other:?}"),
        }
    }

    #[test]
    fn parses_plain_property() {
        let decl = parse_decl("val x: Int = 1");
        match decl {
            Declaration::Property(p) => {
                assert!(!p.is_var);
                assert!(p.receiver_type.is_none());
                match p.variable {
                    VariableDeclarationOrMulti::Single(v) => assert_eq!(v.name, "x"),
                    _ => panic!("expected single variable"),
                }
            }
            other => panic!("expected property, got {other:?}"),
        }
    }

    #[test]
    fn parses_extension_property() {
        let decl = parse_decl("val Foo.bar: Int get() = 0");
        match decl {
            Declaration::Property(p) => {
                assert_eq!(p.receiver_type.unwrap().to_string(), "Foo");
                assert!(p.getter.is_some());
            }
            other => panic!("expected property, got {other:?}"),
        }
    }

    #[test]
    fn parses_property_with_setter() {
        let decl = parse_decl("var x: Int = 0\n    set(value) { field = value }");
        match decl {
            Declaration::Property(p) => {
                assert!(p.is_var);
                let setter = p.setter.expect("setter present");
                assert_eq!(setter.parameter.unwrap().name, "value");
            }
            other => panic!("expected property, got {other:?}"),
        }
    }

    #[test]
    fn rejects_duplicate_getter() {
        let mut p = Parser::new("val x: Int get() = 1 get() = 2", ParserConfig::default());
        assert!(p.parse_top_level_declaration().is_err());
    }

    #[test]
    fn rejects_empty_parameter_setter() {
        let mut p = Parser::new("var x: Int = 0\n    set() {}", ParserConfig::default());
        assert!(p.parse_top_level_declaration().is_err());
    }

    #[test]
    fn parses_destructuring_property() {
        let decl = parse_decl("val (a, b) = pair()");
        match decl {
            Declaration::Property(p) => {
                assert!(p.receiver_type.is_none());
                match p.variable {
                    VariableDeclarationOrMulti::Multi(m) => assert_eq!(m.variables.len(), 2),
                    _ => panic!("expected multi-variable declaration"),
                }
            }
            other => panic!("expected property, got {other:?}"),
        }
    }

    #[test]
    fn rejects_type_annotation_on_destructuring() {
        let mut p = Parser::new("val (foo): Bar = Baz()", ParserConfig::default());
        assert!(p.parse_top_level_declaration().is_err());
    }

    #[test]
    fn local_declaration_does_not_attach_accessors() {
        let mut p = Parser::new("fun main() { val x = 1\nget() }", ParserConfig::default());
        let file = p.parse().expect("file parses");
        match &file.declarations[0] {
            Declaration::Function(f) => match f.body.as_ref().unwrap() {
                FunctionBody::Block(b) => assert_eq!(b.statements.len(), 2),
                _ => panic!("expected block body"),
            },
            other => panic!("expected function, got {other:?}"),
        }
    }

    #[test]
    fn parses_type_alias() {
        let decl = parse_decl("typealias Handler = (Event) -> Unit");
        match decl {
            Declaration::TypeAlias(t) => {
                assert_eq!(t.name, "Handler");
                assert_eq!(t.ty.to_string(), "(Event) -> Unit");
            }
            other => panic!("expected type alias, got {other:?}"),
        }
    }

    #[test]
    fn parses_generic_type_alias() {
        let decl = parse_decl("typealias Pair<A, B> = Tuple2<A, B>");
        match decl {
            Declaration::TypeAlias(t) => assert_eq!(t.type_parameters.len(), 2),
            other => panic!("expected type alias, got {other:?}"),
        }
    }

    #[test]
    fn declaration_position_is_its_first_token() {
        let decl = parse_decl("class Point");
        match decl {
            Declaration::Class(c) => assert_eq!(c.position, ktc_util::Position::new(1, 1)),
            other => panic!("expected class, got {other:?}"),
        }
    }

    #[test]
    fn declaration_position_starts_at_leading_modifier() {
        let decl = parse_decl("  public class Point");
        match decl {
            Declaration::Class(c) => assert_eq!(c.position, ktc_util::Position::new(1, 3)),
            other => panic!("expected class, got {other:?}"),
        }
    }
}
