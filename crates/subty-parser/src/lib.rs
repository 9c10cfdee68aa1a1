//! This module parses a text source code into a [subty_tree::abstract] tree, using a LALR(1) parser
//! generator called LALRPOP. It does not include error recovery strategies nor incremental parsing.

pub mod error;

use subty_error::Error;
use subty_location::{ByteRange, Located};
use subty_tree::r#abstract::{Expr, Statement, TypeNode};

use error::from_lalrpop;

#[macro_use]
extern crate lalrpop_util;

lalrpop_mod!(
    #[allow(warnings)]
    #[allow(clippy::all)]
    /// The parsing module
    parser
);

pub use parser::*;

pub(crate) fn loc<T>(start: usize, data: T, end: usize) -> Located<T> {
    Located::new(ByteRange::new(start, end), data)
}

pub trait Parser<T> {
    fn parse_source(&self, code: &str) -> Result<T, Error>;
}

impl Parser<Vec<Statement>> for ProgramParser {
    fn parse_source(&self, code: &str) -> Result<Vec<Statement>, Error> {
        self.parse(code).map_err(from_lalrpop)
    }
}

impl Parser<Expr> for ExprParser {
    fn parse_source(&self, code: &str) -> Result<Expr, Error> {
        self.parse(code).map_err(from_lalrpop)
    }
}

impl Parser<TypeNode> for TypeParser {
    fn parse_source(&self, code: &str) -> Result<TypeNode, Error> {
        self.parse(code).map_err(from_lalrpop)
    }
}

/// All the entry points of the grammar, built once and reused.
pub struct Parsers {
    pub program: Box<dyn Parser<Vec<Statement>>>,
    pub expr: Box<dyn Parser<Expr>>,
    pub typ: Box<dyn Parser<TypeNode>>,
}

impl Default for Parsers {
    fn default() -> Self {
        Self {
            program: Box::new(ProgramParser::new()),
            expr: Box::new(ExprParser::new()),
            typ: Box::new(TypeParser::new()),
        }
    }
}

impl Parser<Vec<Statement>> for Parsers {
    fn parse_source(&self, code: &str) -> Result<Vec<Statement>, Error> {
        self.program.parse_source(code)
    }
}

impl Parser<Expr> for Parsers {
    fn parse_source(&self, code: &str) -> Result<Expr, Error> {
        self.expr.parse_source(code)
    }
}

impl Parser<TypeNode> for Parsers {
    fn parse_source(&self, code: &str) -> Result<TypeNode, Error> {
        self.typ.parse_source(code)
    }
}

pub fn parse_program(code: &str) -> Result<Vec<Statement>, Error> {
    ProgramParser::new().parse_source(code)
}

pub fn parse_expr(code: &str) -> Result<Expr, Error> {
    ExprParser::new().parse_source(code)
}

pub fn parse_type(code: &str) -> Result<TypeNode, Error> {
    TypeParser::new().parse_source(code)
}
