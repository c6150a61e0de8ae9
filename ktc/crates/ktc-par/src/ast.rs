//! Abstract syntax tree produced by [`crate::Parser`].
//!
//! Every node is a plain owned data structure - no arena, no interning.
//! [`Display`] impls double as the pretty-printer: printing a parsed tree
//! and re-parsing the result is expected to produce an equivalent tree,
//! which is this crate's primary testable correctness property.
//!
//! String literals (`StringLiteral`) are leaf nodes that store their raw
//! source text verbatim, `${...}` interpolation included - there is no
//! separate "interpolated expression" node, because this grammar never
//! re-parses the inside of an interpolation span.

use std::fmt;

use ktc_util::Position;

/// A dot-separated name, e.g. `kotlin.collections.List`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier(pub Vec<String>);

impl Identifier {
    pub fn single(name: impl Into<String>) -> Self {
        Self(vec![name.into()])
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

/// A parsed compilation unit: `package`, imports, then top-level
/// declarations.
#[derive(Debug, Clone, PartialEq)]
pub struct KotlinFile {
    pub shebang: Option<String>,
    pub annotations: Vec<Annotation>,
    pub package: Option<PackageDirective>,
    pub imports: Vec<ImportDirective>,
    pub declarations: Vec<Declaration>,
}

impl fmt::Display for KotlinFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(shebang) = &self.shebang {
            writeln!(f, "{shebang}")?;
        }
        for a in &self.annotations {
            writeln!(f, "{a}")?;
        }
        if let Some(p) = &self.package {
            writeln!(f, "{p}")?;
        }
        for i in &self.imports {
            writeln!(f, "{i}")?;
        }
        for (i, d) in self.declarations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{d}")?;
        }
        Ok(())
    }
}

/// A `.kts` script: same imports/package preamble, but a flat list of
/// statements instead of only declarations.
#[derive(Debug, Clone, PartialEq)]
pub struct Script {
    pub shebang: Option<String>,
    pub annotations: Vec<Annotation>,
    pub package: Option<PackageDirective>,
    pub imports: Vec<ImportDirective>,
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PackageDirective {
    pub annotations: Vec<Annotation>,
    pub name: Identifier,
}

impl fmt::Display for PackageDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "package {}", self.name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportDirective {
    pub name: Identifier,
    pub wildcard: bool,
    pub alias: Option<String>,
}

impl fmt::Display for ImportDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "import {}", self.name)?;
        if self.wildcard {
            write!(f, ".*")?;
        }
        if let Some(alias) = &self.alias {
            write!(f, " as {alias}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------
// Modifiers and annotations
// ---------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Modifier {
    Annotation(Annotation),
    /// Any bare modifier keyword: visibility (`public`/`private`/...),
    /// inheritance (`abstract`/`final`/`open`/`override`), class kind
    /// (`enum`/`sealed`/`data`/`inner`/`value`/`annotation`/`companion`),
    /// function (`suspend`/`tailrec`/`operator`/`infix`/`inline`/
    /// `external`), parameter (`vararg`/`noinline`/`crossinline`),
    /// platform (`expect`/`actual`), `lateinit`, `const`, variance
    /// (`in`/`out`), `reified`.
    Keyword(String),
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modifier::Annotation(a) => write!(f, "{a}"),
            Modifier::Keyword(k) => write!(f, "{k}"),
        }
    }
}

pub type Modifiers = Vec<Modifier>;

pub(crate) fn fmt_modifiers(modifiers: &Modifiers, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for m in modifiers {
        write!(f, "{m} ")?;
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub use_site_target: Option<String>,
    pub entries: Vec<AnnotationEntry>,
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@")?;
        if let Some(target) = &self.use_site_target {
            write!(f, "{target}:")?;
        }
        if self.entries.len() == 1 {
            write!(f, "{}", self.entries[0])
        } else {
            write!(f, "[")?;
            for (i, e) in self.entries.iter().enumerate() {
                if i > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{e}")?;
            }
            write!(f, "]")
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationEntry {
    pub name: Identifier,
    pub type_arguments: Vec<TypeProjection>,
    pub value_arguments: Vec<ValueArgument>,
}

impl fmt::Display for AnnotationEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        fmt_angle_list(&self.type_arguments, f)?;
        if !self.value_arguments.is_empty() {
            write!(f, "(")?;
            fmt_comma_list(&self.value_arguments, f)?;
            write!(f, ")")?;
        }
        Ok(())
    }
}

fn fmt_comma_list<T: fmt::Display>(items: &[T], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

fn fmt_angle_list<T: fmt::Display>(items: &[T], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if items.is_empty() {
        return Ok(());
    }
    write!(f, "<")?;
    fmt_comma_list(items, f)?;
    write!(f, ">")
}

// ---------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Nullable(Box<Type>),
    User(UserType),
    Function(FunctionType),
    Parenthesized(Box<Type>),
    Dynamic,
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Nullable(inner) => write!(f, "{inner}?"),
            Type::User(u) => write!(f, "{u}"),
            Type::Function(ft) => write!(f, "{ft}"),
            Type::Parenthesized(inner) => write!(f, "({inner})"),
            Type::Dynamic => write!(f, "dynamic"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserType {
    pub segments: Vec<SimpleUserType>,
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{seg}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimpleUserType {
    pub name: String,
    pub type_arguments: Vec<TypeProjection>,
}

impl fmt::Display for SimpleUserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        fmt_angle_list(&self.type_arguments, f)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeProjection {
    Star,
    Type {
        variance: Option<String>,
        ty: Box<Type>,
    },
}

impl fmt::Display for TypeProjection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeProjection::Star => write!(f, "*"),
            TypeProjection::Type { variance, ty } => {
                if let Some(v) = variance {
                    write!(f, "{v} ")?;
                }
                write!(f, "{ty}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionType {
    pub receiver: Option<Box<Type>>,
    pub parameters: Vec<Type>,
    pub return_type: Box<Type>,
}

impl fmt::Display for FunctionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(r) = &self.receiver {
            write!(f, "{r}.")?;
        }
        write!(f, "(")?;
        fmt_comma_list(&self.parameters, f)?;
        write!(f, ") -> {}", self.return_type)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeParameter {
    pub annotations: Vec<Annotation>,
    pub variance: Option<String>,
    pub name: String,
    pub bound: Option<Type>,
}

impl fmt::Display for TypeParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for a in &self.annotations {
            write!(f, "{a} ")?;
        }
        if let Some(v) = &self.variance {
            write!(f, "{v} ")?;
        }
        write!(f, "{}", self.name)?;
        if let Some(b) = &self.bound {
            write!(f, " : {b}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeConstraint {
    pub annotations: Vec<Annotation>,
    pub name: String,
    pub bound: Type,
}

impl fmt::Display for TypeConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for a in &self.annotations {
            write!(f, "{a} ")?;
        }
        write!(f, "{} : {}", self.name, self.bound)
    }
}

fn fmt_type_params(params: &[TypeParameter], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt_angle_list(params, f)
}

fn fmt_type_constraints(constraints: &[TypeConstraint], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if constraints.is_empty() {
        return Ok(());
    }
    write!(f, " where ")?;
    fmt_comma_list(constraints, f)
}

// ---------------------------------------------------------------------
// Declarations
// ---------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Class(ClassDeclaration),
    Object(ObjectDeclaration),
    Function(FunctionDeclaration),
    Property(PropertyDeclaration),
    TypeAlias(TypeAliasDeclaration),
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Declaration::Class(c) => write!(f, "{c}"),
            Declaration::Object(o) => write!(f, "{o}"),
            Declaration::Function(func) => write!(f, "{func}"),
            Declaration::Property(p) => write!(f, "{p}"),
            Declaration::TypeAlias(t) => write!(f, "{t}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    Class,
    Interface,
    FunInterface,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDeclaration {
    pub position: Position,
    pub modifiers: Modifiers,
    pub kind: ClassKind,
    pub name: String,
    pub type_parameters: Vec<TypeParameter>,
    pub primary_constructor: Option<PrimaryConstructor>,
    pub delegation_specifiers: Vec<DelegationSpecifier>,
    pub type_constraints: Vec<TypeConstraint>,
    pub body: Option<ClassBody>,
}

impl fmt::Display for ClassDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_modifiers(&self.modifiers, f)?;
        match self.kind {
            ClassKind::Class => write!(f, "class ")?,
            ClassKind::Interface => write!(f, "interface ")?,
            ClassKind::FunInterface => write!(f, "fun interface ")?,
        }
        write!(f, "{}", self.name)?;
        fmt_type_params(&self.type_parameters, f)?;
        if let Some(pc) = &self.primary_constructor {
            write!(f, "{pc}")?;
        }
        if !self.delegation_specifiers.is_empty() {
            write!(f, " : ")?;
            fmt_comma_list(&self.delegation_specifiers, f)?;
        }
        fmt_type_constraints(&self.type_constraints, f)?;
        if let Some(body) = &self.body {
            write!(f, " {body}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrimaryConstructor {
    pub modifiers: Modifiers,
    pub parameters: Vec<ClassParameter>,
}

impl fmt::Display for PrimaryConstructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.modifiers.is_empty() {
            fmt_modifiers(&self.modifiers, f)?;
            write!(f, "constructor")?;
        }
        write!(f, "(")?;
        fmt_comma_list(&self.parameters, f)?;
        write!(f, ")")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassParameter {
    pub modifiers: Modifiers,
    /// `val`/`var` when the parameter also declares a property.
    pub mutability: Option<String>,
    pub name: String,
    pub ty: Type,
    pub default_value: Option<Expr>,
}

impl fmt::Display for ClassParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_modifiers(&self.modifiers, f)?;
        if let Some(m) = &self.mutability {
            write!(f, "{m} ")?;
        }
        write!(f, "{}: {}", self.name, self.ty)?;
        if let Some(d) = &self.default_value {
            write!(f, " = {d}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SecondaryConstructor {
    pub modifiers: Modifiers,
    pub parameters: Vec<FunctionParameter>,
    pub delegation_call: Option<ConstructorDelegationCall>,
    pub body: Option<Block>,
}

impl fmt::Display for SecondaryConstructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_modifiers(&self.modifiers, f)?;
        write!(f, "constructor(")?;
        fmt_comma_list(&self.parameters, f)?;
        write!(f, ")")?;
        if let Some(d) = &self.delegation_call {
            write!(f, " : {d}")?;
        }
        if let Some(b) = &self.body {
            write!(f, " {b}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstructorDelegationCall {
    pub target: ConstructorDelegationTarget,
    pub arguments: Vec<ValueArgument>,
}

impl fmt::Display for ConstructorDelegationCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.target)?;
        fmt_comma_list(&self.arguments, f)?;
        write!(f, ")")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstructorDelegationTarget {
    This,
    Super,
}

impl fmt::Display for ConstructorDelegationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstructorDelegationTarget::This => write!(f, "this"),
            ConstructorDelegationTarget::Super => write!(f, "super"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DelegationSpecifier {
    /// `: Base(args)` - a supertype constructor call.
    SuperTypeCallEntry {
        ty: UserType,
        arguments: Vec<ValueArgument>,
    },
    /// `: Base by delegate` - interface delegation.
    Explicit { ty: Type, expr: Expr },
    /// `: Base` with neither a call nor `by` - an interface with no
    /// constructor arguments.
    SuperType(Type),
}

impl fmt::Display for DelegationSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DelegationSpecifier::SuperTypeCallEntry { ty, arguments } => {
                write!(f, "{ty}(")?;
                fmt_comma_list(arguments, f)?;
                write!(f, ")")
            }
            DelegationSpecifier::Explicit { ty, expr } => write!(f, "{ty} by {expr}"),
            DelegationSpecifier::SuperType(ty) => write!(f, "{ty}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassBody {
    pub enum_entries: Vec<EnumEntry>,
    pub members: Vec<ClassMember>,
}

impl fmt::Display for ClassBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{{")?;
        for (i, entry) in self.enum_entries.iter().enumerate() {
            if i > 0 {
                writeln!(f, ",")?;
            }
            write!(f, "    {entry}")?;
        }
        if !self.enum_entries.is_empty() {
            writeln!(f, ";")?;
        }
        for member in &self.members {
            writeln!(f, "    {member}")?;
        }
        write!(f, "}}")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumEntry {
    pub modifiers: Modifiers,
    pub name: String,
    pub arguments: Vec<ValueArgument>,
    pub body: Option<ClassBody>,
}

impl fmt::Display for EnumEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_modifiers(&self.modifiers, f)?;
        write!(f, "{}", self.name)?;
        if !self.arguments.is_empty() {
            write!(f, "(")?;
            fmt_comma_list(&self.arguments, f)?;
            write!(f, ")")?;
        }
        if let Some(b) = &self.body {
            write!(f, " {b}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClassMember {
    Declaration(Declaration),
    SecondaryConstructor(SecondaryConstructor),
    CompanionObject(ObjectDeclaration),
    Init(Block),
}

impl fmt::Display for ClassMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassMember::Declaration(d) => write!(f, "{d}"),
            ClassMember::SecondaryConstructor(s) => write!(f, "{s}"),
            ClassMember::CompanionObject(o) => write!(f, "{o}"),
            ClassMember::Init(b) => write!(f, "init {b}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectDeclaration {
    pub position: Position,
    pub modifiers: Modifiers,
    pub is_companion: bool,
    pub name: Option<String>,
    pub delegation_specifiers: Vec<DelegationSpecifier>,
    pub body: Option<ClassBody>,
}

impl fmt::Display for ObjectDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_modifiers(&self.modifiers, f)?;
        if self.is_companion {
            write!(f, "companion ")?;
        }
        write!(f, "object")?;
        if let Some(n) = &self.name {
            write!(f, " {n}")?;
        }
        if !self.delegation_specifiers.is_empty() {
            write!(f, " : ")?;
            fmt_comma_list(&self.delegation_specifiers, f)?;
        }
        if let Some(b) = &self.body {
            write!(f, " {b}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionParameter {
    pub modifiers: Modifiers,
    pub name: String,
    pub ty: Type,
    pub default_value: Option<Expr>,
}

impl fmt::Display for FunctionParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_modifiers(&self.modifiers, f)?;
        write!(f, "{}: {}", self.name, self.ty)?;
        if let Some(d) = &self.default_value {
            write!(f, " = {d}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDeclaration {
    pub position: Position,
    pub modifiers: Modifiers,
    pub type_parameters: Vec<TypeParameter>,
    pub receiver_type: Option<Type>,
    /// `None` for anonymous functions used as expressions.
    pub name: Option<String>,
    pub value_parameters: Vec<FunctionParameter>,
    pub return_type: Option<Type>,
    pub type_constraints: Vec<TypeConstraint>,
    pub body: Option<FunctionBody>,
}

impl fmt::Display for FunctionDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_modifiers(&self.modifiers, f)?;
        write!(f, "fun")?;
        fmt_type_params(&self.type_parameters, f)?;
        write!(f, " ")?;
        if let Some(r) = &self.receiver_type {
            write!(f, "{r}.")?;
        }
        if let Some(n) = &self.name {
            write!(f, "{n}")?;
        }
        write!(f, "(")?;
        fmt_comma_list(&self.value_parameters, f)?;
        write!(f, ")")?;
        if let Some(rt) = &self.return_type {
            write!(f, ": {rt}")?;
        }
        fmt_type_constraints(&self.type_constraints, f)?;
        if let Some(b) = &self.body {
            write!(f, " {b}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FunctionBody {
    Block(Block),
    Expression(Box<Expr>),
}

impl fmt::Display for FunctionBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FunctionBody::Block(b) => write!(f, "{b}"),
            FunctionBody::Expression(e) => write!(f, "= {e}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    pub annotations: Vec<Annotation>,
    pub name: String,
    pub ty: Option<Type>,
}

impl fmt::Display for VariableDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for a in &self.annotations {
            write!(f, "{a} ")?;
        }
        write!(f, "{}", self.name)?;
        if let Some(t) = &self.ty {
            write!(f, ": {t}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MultiVariableDeclaration {
    pub variables: Vec<VariableDeclaration>,
}

impl fmt::Display for MultiVariableDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        fmt_comma_list(&self.variables, f)?;
        write!(f, ")")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum VariableDeclarationOrMulti {
    Single(VariableDeclaration),
    Multi(MultiVariableDeclaration),
}

impl fmt::Display for VariableDeclarationOrMulti {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariableDeclarationOrMulti::Single(v) => write!(f, "{v}"),
            VariableDeclarationOrMulti::Multi(m) => write!(f, "{m}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDeclaration {
    pub position: Position,
    pub modifiers: Modifiers,
    pub is_var: bool,
    pub type_parameters: Vec<TypeParameter>,
    pub receiver_type: Option<Type>,
    pub variable: VariableDeclarationOrMulti,
    pub type_constraints: Vec<TypeConstraint>,
    pub initializer: Option<PropertyInitializer>,
    pub getter: Option<Getter>,
    pub setter: Option<Setter>,
}

impl fmt::Display for PropertyDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_modifiers(&self.modifiers, f)?;
        write!(f, "{} ", if self.is_var { "var" } else { "val" })?;
        fmt_type_params(&self.type_parameters, f)?;
        if let Some(r) = &self.receiver_type {
            write!(f, "{r}.")?;
        }
        write!(f, "{}", self.variable)?;
        fmt_type_constraints(&self.type_constraints, f)?;
        if let Some(init) = &self.initializer {
            write!(f, " {init}")?;
        }
        if let Some(g) = &self.getter {
            write!(f, "\n    {g}")?;
        }
        if let Some(s) = &self.setter {
            write!(f, "\n    {s}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyInitializer {
    Expression(Expr),
    Delegate(Expr),
}

impl fmt::Display for PropertyInitializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyInitializer::Expression(e) => write!(f, "= {e}"),
            PropertyInitializer::Delegate(e) => write!(f, "by {e}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Getter {
    pub modifiers: Modifiers,
    pub return_type: Option<Type>,
    pub body: Option<FunctionBody>,
}

impl fmt::Display for Getter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_modifiers(&self.modifiers, f)?;
        write!(f, "get")?;
        if let Some(b) = &self.body {
            write!(f, "() {b}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Setter {
    pub modifiers: Modifiers,
    pub parameter: Option<FunctionParameter>,
    pub body: Option<FunctionBody>,
}

impl fmt::Display for Setter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_modifiers(&self.modifiers, f)?;
        write!(f, "set")?;
        if let Some(p) = &self.parameter {
            write!(f, "({p})")?;
        }
        if let Some(b) = &self.body {
            write!(f, " {b}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeAliasDeclaration {
    pub position: Position,
    pub modifiers: Modifiers,
    pub name: String,
    pub type_parameters: Vec<TypeParameter>,
    pub ty: Type,
}

impl fmt::Display for TypeAliasDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_modifiers(&self.modifiers, f)?;
        write!(f, "typealias {}", self.name)?;
        fmt_type_params(&self.type_parameters, f)?;
        write!(f, " = {}", self.ty)
    }
}

// ---------------------------------------------------------------------
// Statements
// ---------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub position: Position,
    pub statements: Vec<Statement>,
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{{")?;
        for s in &self.statements {
            writeln!(f, "    {s}")?;
        }
        write!(f, "}}")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Declaration(Declaration),
    Assignment(Assignment),
    Loop(LoopStatement),
    Expression(Expr),
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Declaration(d) => write!(f, "{d}"),
            Statement::Assignment(a) => write!(f, "{a}"),
            Statement::Loop(l) => write!(f, "{l}"),
            Statement::Expression(e) => write!(f, "{e}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub target: Box<Expr>,
    pub operator: String,
    pub value: Box<Expr>,
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.target, self.operator, self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ControlStructureBody {
    Block(Block),
    Expression(Box<Expr>),
}

impl fmt::Display for ControlStructureBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlStructureBody::Block(b) => write!(f, "{b}"),
            ControlStructureBody::Expression(e) => write!(f, "{e}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoopStatement {
    For {
        variable: VariableDeclarationOrMulti,
        in_expr: Box<Expr>,
        body: Option<ControlStructureBody>,
    },
    While {
        condition: Box<Expr>,
        body: Option<ControlStructureBody>,
    },
    DoWhile {
        body: Option<ControlStructureBody>,
        condition: Box<Expr>,
    },
}

impl fmt::Display for LoopStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoopStatement::For {
                variable,
                in_expr,
                body,
            } => {
                write!(f, "for ({variable} in {in_expr})")?;
                if let Some(b) = body {
                    write!(f, " {b}")?;
                }
                Ok(())
            }
            LoopStatement::While { condition, body } => {
                write!(f, "while ({condition})")?;
                if let Some(b) = body {
                    write!(f, " {b}")?;
                }
                Ok(())
            }
            LoopStatement::DoWhile { body, condition } => {
                write!(f, "do")?;
                if let Some(b) = body {
                    write!(f, " {b}")?;
                }
                write!(f, " while ({condition})")
            }
        }
    }
}

// ---------------------------------------------------------------------
// Expressions
// ---------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ValueArgument {
    pub name: Option<String>,
    pub spread: bool,
    pub expr: Expr,
}

impl fmt::Display for ValueArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(n) = &self.name {
            write!(f, "{n} = ")?;
        }
        if self.spread {
            write!(f, "*")?;
        }
        write!(f, "{}", self.expr)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Integer(String),
    Hex(String),
    Bin(String),
    Unsigned(String),
    Long(String),
    Float(String),
    Double(String),
    Boolean(String),
    Null,
    Character(String),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Integer(s)
            | Literal::Hex(s)
            | Literal::Bin(s)
            | Literal::Unsigned(s)
            | Literal::Long(s)
            | Literal::Float(s)
            | Literal::Double(s)
            | Literal::Boolean(s)
            | Literal::Character(s) => write!(f, "{s}"),
            Literal::Null => write!(f, "null"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StringLiteral {
    Line(String),
    MultiLine(String),
}

impl fmt::Display for StringLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StringLiteral::Line(s) | StringLiteral::MultiLine(s) => write!(f, "{s}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LambdaParameter {
    pub variable: VariableDeclarationOrMulti,
    pub ty: Option<Type>,
}

impl fmt::Display for LambdaParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.variable)?;
        if let Some(t) = &self.ty {
            write!(f, ": {t}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LambdaLiteral {
    pub parameters: Vec<LambdaParameter>,
    pub statements: Vec<Statement>,
}

impl fmt::Display for LambdaLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ ")?;
        if !self.parameters.is_empty() {
            fmt_comma_list(&self.parameters, f)?;
            write!(f, " -> ")?;
        }
        for (i, s) in self.statements.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{s}")?;
        }
        write!(f, " }}")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectLiteral {
    pub delegation_specifiers: Vec<DelegationSpecifier>,
    pub body: Vec<ClassMember>,
}

impl fmt::Display for ObjectLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "object")?;
        if !self.delegation_specifiers.is_empty() {
            write!(f, " : ")?;
            fmt_comma_list(&self.delegation_specifiers, f)?;
        }
        writeln!(f, " {{")?;
        for m in &self.body {
            writeln!(f, "    {m}")?;
        }
        write!(f, "}}")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfExpression {
    pub condition: Box<Expr>,
    pub body: Option<ControlStructureBody>,
    pub else_body: Option<ControlStructureBody>,
}

impl fmt::Display for IfExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "if ({})", self.condition)?;
        if let Some(b) = &self.body {
            write!(f, " {b}")?;
        }
        if let Some(e) = &self.else_body {
            write!(f, " else {e}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhenSubject {
    pub annotations: Vec<Annotation>,
    pub variable: Option<VariableDeclaration>,
    pub expr: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WhenCondition {
    Expression(Expr),
    RangeTest { negated: bool, range: Expr },
    TypeTest { negated: bool, ty: Type },
}

impl fmt::Display for WhenCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WhenCondition::Expression(e) => write!(f, "{e}"),
            WhenCondition::RangeTest { negated, range } => {
                write!(f, "{}{range}", if *negated { "!in " } else { "in " })
            }
            WhenCondition::TypeTest { negated, ty } => {
                write!(f, "{}{ty}", if *negated { "!is " } else { "is " })
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WhenEntry {
    Conditions {
        conditions: Vec<WhenCondition>,
        body: ControlStructureBody,
    },
    Else {
        body: ControlStructureBody,
    },
}

impl fmt::Display for WhenEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WhenEntry::Conditions { conditions, body } => {
                fmt_comma_list(conditions, f)?;
                write!(f, " -> {body}")
            }
            WhenEntry::Else { body } => write!(f, "else -> {body}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhenExpression {
    pub subject: Option<WhenSubject>,
    pub entries: Vec<WhenEntry>,
}

impl fmt::Display for WhenExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "when ")?;
        if let Some(s) = &self.subject {
            write!(f, "({}) ", s.expr)?;
        }
        writeln!(f, "{{")?;
        for e in &self.entries {
            writeln!(f, "    {e}")?;
        }
        write!(f, "}}")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatchBlock {
    pub annotations: Vec<Annotation>,
    pub name: String,
    pub ty: Type,
    pub block: Block,
}

impl fmt::Display for CatchBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "catch ({}: {}) {}", self.name, self.ty, self.block)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TryExpression {
    pub block: Block,
    pub catch_blocks: Vec<CatchBlock>,
    pub finally_block: Option<Block>,
}

impl fmt::Display for TryExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "try {}", self.block)?;
        for c in &self.catch_blocks {
            write!(f, " {c}")?;
        }
        if let Some(fin) = &self.finally_block {
            write!(f, " finally {fin}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum JumpExpression {
    Throw(Box<Expr>),
    Return {
        label: Option<String>,
        value: Option<Box<Expr>>,
    },
    Continue {
        label: Option<String>,
    },
    Break {
        label: Option<String>,
    },
}

impl fmt::Display for JumpExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JumpExpression::Throw(e) => write!(f, "throw {e}"),
            JumpExpression::Return { label, value } => {
                write!(f, "return")?;
                if let Some(l) = label {
                    write!(f, "@{l}")?;
                }
                if let Some(v) = value {
                    write!(f, " {v}")?;
                }
                Ok(())
            }
            JumpExpression::Continue { label } => {
                write!(f, "continue")?;
                if let Some(l) = label {
                    write!(f, "@{l}")?;
                }
                Ok(())
            }
            JumpExpression::Break { label } => {
                write!(f, "break")?;
                if let Some(l) = label {
                    write!(f, "@{l}")?;
                }
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CallableMember {
    Identifier(String),
    Class,
}

impl fmt::Display for CallableMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallableMember::Identifier(n) => write!(f, "{n}"),
            CallableMember::Class => write!(f, "class"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallableReference {
    pub receiver: Option<Box<Expr>>,
    pub member: CallableMember,
}

impl fmt::Display for CallableReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(r) = &self.receiver {
            write!(f, "{r}")?;
        }
        write!(f, "::{}", self.member)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NavigationMember {
    Identifier(String),
    Class,
    Parenthesized(Box<Expr>),
}

impl fmt::Display for NavigationMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationMember::Identifier(n) => write!(f, "{n}"),
            NavigationMember::Class => write!(f, "class"),
            NavigationMember::Parenthesized(e) => write!(f, "({e})"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PostfixSuffix {
    IncDec(String),
    TypeArguments(Vec<TypeProjection>),
    CallSuffix {
        type_arguments: Vec<TypeProjection>,
        value_arguments: Vec<ValueArgument>,
        annotated_lambda: Option<Box<LambdaLiteral>>,
    },
    Navigation {
        operator: String,
        member: NavigationMember,
    },
    Indexing(Vec<Expr>),
}

impl fmt::Display for PostfixSuffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostfixSuffix::IncDec(op) => write!(f, "{op}"),
            PostfixSuffix::TypeArguments(args) => fmt_angle_list(args, f),
            PostfixSuffix::CallSuffix {
                type_arguments,
                value_arguments,
                annotated_lambda,
            } => {
                fmt_angle_list(type_arguments, f)?;
                if !value_arguments.is_empty() || annotated_lambda.is_none() {
                    write!(f, "(")?;
                    fmt_comma_list(value_arguments, f)?;
                    write!(f, ")")?;
                }
                if let Some(lambda) = annotated_lambda {
                    write!(f, " {lambda}")?;
                }
                Ok(())
            }
            PostfixSuffix::Navigation { operator, member } => write!(f, "{operator}{member}"),
            PostfixSuffix::Indexing(indices) => {
                write!(f, "[")?;
                fmt_comma_list(indices, f)?;
                write!(f, "]")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Parenthesized(Box<Expr>),
    SimpleIdentifier(String),
    Literal(Literal),
    StringLiteral(StringLiteral),
    This(Option<String>),
    Super {
        type_argument: Option<Type>,
        label: Option<String>,
    },
    CollectionLiteral(Vec<Expr>),
    FunctionLiteral(Box<LambdaLiteral>),
    AnonymousFunction(Box<FunctionDeclaration>),
    ObjectLiteral(Box<ObjectLiteral>),
    If(Box<IfExpression>),
    When(Box<WhenExpression>),
    Try(Box<TryExpression>),
    Jump(Box<JumpExpression>),
    CallableReference(Box<CallableReference>),
    PrefixUnary {
        operators: Vec<String>,
        expr: Box<Expr>,
    },
    PostfixUnary {
        primary: Box<Expr>,
        suffixes: Vec<PostfixSuffix>,
    },
    As {
        value: Box<Expr>,
        operator: String,
        ty: Type,
    },
    RangeTest {
        value: Box<Expr>,
        negated: bool,
        range: Box<Expr>,
    },
    TypeTest {
        value: Box<Expr>,
        negated: bool,
        ty: Type,
    },
    Binary {
        left: Box<Expr>,
        operator: String,
        right: Box<Expr>,
    },
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Parenthesized(e) => write!(f, "({e})"),
            Expr::SimpleIdentifier(n) => write!(f, "{n}"),
            Expr::Literal(l) => write!(f, "{l}"),
            Expr::StringLiteral(s) => write!(f, "{s}"),
            Expr::This(label) => {
                write!(f, "this")?;
                if let Some(l) = label {
                    write!(f, "@{l}")?;
                }
                Ok(())
            }
            Expr::Super {
                type_argument,
                label,
            } => {
                write!(f, "super")?;
                if let Some(t) = type_argument {
                    write!(f, "<{t}>")?;
                }
                if let Some(l) = label {
                    write!(f, "@{l}")?;
                }
                Ok(())
            }
            Expr::CollectionLiteral(items) => {
                write!(f, "[")?;
                fmt_comma_list(items, f)?;
                write!(f, "]")
            }
            Expr::FunctionLiteral(l) => write!(f, "{l}"),
            Expr::AnonymousFunction(func) => write!(f, "{func}"),
            Expr::ObjectLiteral(o) => write!(f, "{o}"),
            Expr::If(i) => write!(f, "{i}"),
            Expr::When(w) => write!(f, "{w}"),
            Expr::Try(t) => write!(f, "{t}"),
            Expr::Jump(j) => write!(f, "{j}"),
            Expr::CallableReference(c) => write!(f, "{c}"),
            Expr::PrefixUnary { operators, expr } => {
                for op in operators {
                    write!(f, "{op}")?;
                }
                write!(f, "{expr}")
            }
            Expr::PostfixUnary { primary, suffixes } => {
                write!(f, "{primary}")?;
                for s in suffixes {
                    write!(f, "{s}")?;
                }
                Ok(())
            }
            Expr::As { value, operator, ty } => write!(f, "{value} {operator} {ty}"),
            Expr::RangeTest {
                value,
                negated,
                range,
            } => write!(f, "{value} {}{range}", if *negated { "!in " } else { "in " }),
            Expr::TypeTest { value, negated, ty } => {
                write!(f, "{value} {}{ty}", if *negated { "!is " } else { "is " })
            }
            Expr::Binary {
                left,
                operator,
                right,
            } => write!(f, "{left} {operator} {right}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_display_joins_segments() {
        let id = Identifier(vec!["kotlin".into(), "collections".into(), "List".into()]);
        assert_eq!(id.to_string(), "kotlin.collections.List");
    }

    #[test]
    fn binary_expression_round_trips_textually() {
        let expr = Expr::Binary {
            left: Box::new(Expr::SimpleIdentifier("a".into())),
            operator: "+".into(),
            right: Box::new(Expr::SimpleIdentifier("b".into())),
        };
        assert_eq!(expr.to_string(), "a + b");
    }

    #[test]
    fn nullable_user_type_display() {
        let ty = Type::Nullable(Box::new(Type::User(UserType {
            segments: vec![SimpleUserType {
                name: "String".into(),
                type_arguments: vec![],
            }],
        })));
        assert_eq!(ty.to_string(), "String?");
    }

    #[test]
    fn as_question_expression_display() {
        let expr = Expr::As {
            value: Box::new(Expr::SimpleIdentifier("x".into())),
            operator: "as?".into(),
            ty: Type::User(UserType {
                segments: vec![SimpleUserType {
                    name: "Int".into(),
                    type_arguments: vec![],
                }],
            }),
        };
        assert_eq!(expr.to_string(), "x as? Int");
    }
}
