//! This module holds the trees that the parser hands to the checker. It does not depend on anything
//! of the checker, only on subty-location that provides constructions to localize things in the
//! source code.
//!
//! The trees available in this module are:
//!
//! - Abstract: a purely syntactic tree of expressions, type annotations and top level statements
//!   with no semantic information. It comes from the parser.
//!

pub mod r#abstract;
