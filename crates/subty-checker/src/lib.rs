//! This module type checks [Expr]essions of a small structural language with singleton, union and
//! intersection types. Checking is bidirectional: [infer::Infer] synthesizes the type of an
//! expression and [check::Check] verifies an expression against a known type, falling back to
//! [is_subtype] when no specific rule applies.

use subty_error::Error;
use subty_tree::r#abstract::{Expr, TypeNode};

use self::{
    check::Check,
    context::{Ctx, Env},
    infer::Infer,
    types::Type,
};

pub mod algebra;
pub mod and_then;
pub mod check;
pub mod config;
pub mod context;
pub mod infer;
pub mod program;
pub mod subtype;
pub mod trace;
pub mod types;

pub use algebra::{empty_intersection, intersection, union};
pub use subtype::is_subtype;

pub type Result<T, U = Error> = std::result::Result<T, U>;

/// Synthesizes the type of `expr` with the default configuration.
pub fn synth(env: &Env, expr: &Expr) -> Result<Type> {
    expr.infer(Ctx::new(env.clone(), Default::default()))
}

/// Checks `expr` against `typ` with the default configuration.
pub fn check(env: &Env, expr: &Expr, typ: Type) -> Result<()> {
    expr.check(Ctx::new(env.clone(), Default::default()), typ)
}

/// Converts a type annotation into a [Type].
pub fn of_annotation(node: &TypeNode) -> Result<Type> {
    node.infer(Ctx::default())
}
