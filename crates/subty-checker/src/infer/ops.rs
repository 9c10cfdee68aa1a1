//! Rules of the operators, written for operand types that are not unions. The union case is
//! handled by [crate::and_then] before these rules are reached.

use subty_tree::r#abstract::{BinaryOp, LogicalOp, UnaryOp};

use crate::{
    algebra::union,
    context::Ctx,
    subtype::is_subtype,
    trace,
    types::{Literal, MonoType, Type},
    Result,
};

pub fn binary(ctx: &Ctx, op: BinaryOp, left: &Type, right: &Type) -> Result<Type> {
    match op {
        BinaryOp::StrictEq | BinaryOp::StrictNotEq => {
            match (left.as_singleton(), right.as_singleton()) {
                (Some(l), Some(r)) => {
                    let equal = l.strict_eq(r);
                    Ok(MonoType::singleton(equal == (op == BinaryOp::StrictEq)))
                }
                _ => Ok(MonoType::boolean()),
            }
        }

        BinaryOp::Add => {
            let number = MonoType::number();

            let numbers = trace::instrument(
                "isSubtype",
                format_args!("{left}, {right} <: {number}"),
                || Ok(is_subtype(left, &number) && is_subtype(right, &number)),
            )?;

            if !numbers {
                return ctx.error("+ expects numbers");
            }

            match (left.as_singleton(), right.as_singleton()) {
                (Some(Literal::Number(l)), Some(Literal::Number(r))) => {
                    Ok(MonoType::singleton(l + r))
                }
                (Some(_), Some(_)) => ctx.bug("unexpected value"),
                _ => Ok(number),
            }
        }
    }
}

pub fn logical(op: LogicalOp, left: &Type, right: &Type) -> Type {
    match op {
        LogicalOp::And if left.is_falsy() => left.clone(),
        LogicalOp::And if left.is_truthy() => right.clone(),
        LogicalOp::Or if left.is_truthy() => left.clone(),
        LogicalOp::Or if left.is_falsy() => right.clone(),
        _ => union([left.clone(), right.clone()]),
    }
}

pub fn unary(op: UnaryOp, operand: &Type) -> Type {
    match op {
        UnaryOp::Not if operand.is_truthy() => MonoType::singleton(false),
        UnaryOp::Not if operand.is_falsy() => MonoType::singleton(true),
        UnaryOp::Not => MonoType::boolean(),
        UnaryOp::Typeof => typeof_type(operand),
    }
}

/// The type of the tag that `typeof` produces at runtime for values of `typ`.
pub fn typeof_type(typ: &Type) -> Type {
    let tag = |tag: &str| MonoType::singleton(tag);

    match &**typ {
        MonoType::Singleton(value) => typeof_type(&value.base()),
        MonoType::Boolean => tag("boolean"),
        MonoType::Number => tag("number"),
        MonoType::String => tag("string"),
        MonoType::Function(..) => tag("function"),
        MonoType::Null | MonoType::Object(_) => tag("object"),
        MonoType::Unknown => MonoType::string(),
        MonoType::Never => MonoType::never(),

        MonoType::Union(types) => union(types.iter().map(typeof_type)),

        // Members of an intersection describe the same values, so they share a tag or the
        // intersection has no values at all.
        MonoType::Intersection(types) => {
            let tags = types.iter().map(typeof_type).collect::<Vec<_>>();

            match tags.split_first() {
                Some((first, rest)) if rest.iter().all(|tag| tag == first) => first.clone(),
                _ => MonoType::never(),
            }
        }
    }
}
