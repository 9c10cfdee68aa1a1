//! Exposes an interface to synthesize the type of expressions and annotations. The main
//! construction of this module is the [Infer] trait.

pub mod expr;
pub mod ops;
pub mod typ;

/// This trait exposes a function called [Infer::infer] that discovers the most precise type of an
/// expression without any expectation. A type rule that expresses this is:
///
/// ```md
///     G |- e => { x: T, .. }
/// ------------------------------
///         G |- e.x => T
/// ```
///
pub trait Infer {
    type Context<'a>;
    type Return;

    /// Synthesizes the type of an expression.
    fn infer(self, ctx: Self::Context<'_>) -> Self::Return;
}
