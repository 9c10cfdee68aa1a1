//! This module describes the tree that is generated from the parser. It's a tree that contains pure
//! syntactic information due the origin. The main types of this file are [Expr], [TypeNode] and
//! [Statement].

use std::fmt::{self, Display};

use itertools::Itertools;
use subty_location::Located;

/// A name written somewhere in the source, e.g. the property of a member access.
pub type Name = Located<String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    StrictEq,
    StrictNotEq,
    Add,
}

impl Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StrictEq => write!(f, "==="),
            Self::StrictNotEq => write!(f, "!=="),
            Self::Add => write!(f, "+"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}

impl Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And => write!(f, "&&"),
            Self::Or => write!(f, "||"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Typeof,
}

impl Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Not => write!(f, "!"),
            Self::Typeof => write!(f, "typeof "),
        }
    }
}

/// A property inside an object expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Property {
    /// `name: expr`
    Field(Name, Expr),
    /// `...expr`
    Spread(Expr),
}

impl Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name, expr) => write!(f, "{name}: {expr}"),
            Self::Spread(expr) => write!(f, "...{expr}"),
        }
    }
}

/// A parameter of an arrow function. The annotation is optional in the syntax so the checker can
/// complain about it.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: Name,
    pub typ: Option<TypeNode>,
}

impl Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.typ {
            Some(typ) => write!(f, "{}: {}", self.name, typ),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Expressions are language constructions that intrinsically contains a value. E.g
///
/// ```ts
/// ((x: number) => x + 1)(2)
/// ```
///
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Identifier(String),
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    Object(Vec<Property>),
    Member(Box<Expr>, Name),
    Computed(Box<Expr>, Box<Expr>),
    Ascription(Box<Expr>, Box<TypeNode>),
    Function(Vec<Param>, Box<Expr>),
    Call(Box<Expr>, Vec<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
    Logical(LogicalOp, Box<Expr>, Box<Expr>),
    Unary(UnaryOp, Box<Expr>),
}

impl Display for ExprKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier(id) => write!(f, "{id}"),
            Self::Null => write!(f, "null"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::Object(props) if props.is_empty() => write!(f, "{{}}"),
            Self::Object(props) => write!(f, "{{ {} }}", props.iter().join(", ")),
            Self::Member(obj, name) => write!(f, "{obj}.{name}"),
            Self::Computed(obj, index) => write!(f, "{obj}[{index}]"),
            Self::Ascription(expr, typ) => write!(f, "({expr} as {typ})"),
            Self::Function(params, body) => write!(f, "(({}) => {body})", params.iter().join(", ")),
            Self::Call(fun, args) => write!(f, "{fun}({})", args.iter().join(", ")),
            Self::Binary(op, l, r) => write!(f, "({l} {op} {r})"),
            Self::Logical(op, l, r) => write!(f, "({l} {op} {r})"),
            Self::Unary(op, e) => write!(f, "{op}{e}"),
        }
    }
}

/// An expression is some syntactic element that intrinsically has a value. It can be a literal
/// value, a variable, a function call, a function definition and etc.
pub type Expr = Located<ExprKind>;

/// A property signature inside an object type literal.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberNode {
    pub name: Name,
    pub typ: Option<TypeNode>,
}

impl Display for MemberNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.typ {
            Some(typ) => write!(f, "{}: {}", self.name, typ),
            None => write!(f, "{}", self.name),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionNode {
    pub params: Vec<Param>,
    pub ret: Box<TypeNode>,
}

impl Display for FunctionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(({}) => {})", self.params.iter().join(", "), self.ret)
    }
}

/// Literal values written in type position, like `1` in `1 | 2`.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralNode {
    Boolean(bool),
    Number(f64),
    String(String),
}

impl Display for LiteralNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s:?}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    Null,
    Boolean,
    Number,
    String,
    Unknown,
    Never,
    Literal(LiteralNode),
    Object(Vec<MemberNode>),
    Function(FunctionNode),
    Union(Vec<TypeNode>),
    Intersection(Vec<TypeNode>),
}

impl Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Boolean => write!(f, "boolean"),
            Self::Number => write!(f, "number"),
            Self::String => write!(f, "string"),
            Self::Unknown => write!(f, "unknown"),
            Self::Never => write!(f, "never"),
            Self::Literal(l) => write!(f, "{l}"),
            Self::Object(members) => write!(f, "{{ {} }}", members.iter().join("; ")),
            Self::Function(n) => write!(f, "{n}"),
            Self::Union(ts) => write!(f, "({})", ts.iter().join(" | ")),
            Self::Intersection(ts) => write!(f, "({})", ts.iter().join(" & ")),
        }
    }
}

/// A type annotation as it was written, e.g. `{ x: number }` in `e as { x: number }`.
pub type TypeNode = Located<TypeKind>;

#[derive(Debug, Clone, PartialEq)]
pub enum StatementKind {
    /// `declare name: T;`
    Declare(Name, TypeNode),
    /// `let name = e;` or `let name: T = e;`
    Let(Name, Option<TypeNode>, Expr),
    /// `e;`
    Expr(Expr),
}

impl Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Declare(name, typ) => write!(f, "declare {name}: {typ};"),
            Self::Let(name, Some(typ), expr) => write!(f, "let {name}: {typ} = {expr};"),
            Self::Let(name, None, expr) => write!(f, "let {name} = {expr};"),
            Self::Expr(expr) => write!(f, "{expr};"),
        }
    }
}

/// A statement on the top level of a program.
pub type Statement = Located<StatementKind>;
