//! Exposes a trait called [Check] that checks if an expression conforms to a known type.

use crate::types::Type;

pub mod expr;

/// This trait exposes a function called [Check::check] that tries to check an expression against a
/// known type, succeeding silently. An example of this type rule is
///
/// ```md
///     G |- e1 <== T1   ...   G |- en <== Tn
/// ------------------------------------------------
///   G |- { x1: e1, .., xn: en } <== { x1: T1, .., xn: Tn }
/// ```
///
pub trait Check<'a> {
    type Context;
    type Result;

    /// Checks an expression against a known type.
    fn check(self, ctx: Self::Context, typ: Type) -> Self::Result;
}
