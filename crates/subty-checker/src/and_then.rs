//! Union aware evaluation. A rule written for a concrete (non union) operand is applied to every
//! branch of a union operand, and the results are joined back together with [union]. This is what
//! lets `x === 1` with `x: 1 | 2` produce `true | false` instead of `boolean`.

use itertools::Itertools;

use crate::{algebra::union, context::Ctx, trace, types::Type, Result};

fn branches(typ: &Type) -> Vec<Type> {
    match typ.as_union() {
        Some(members) => members.to_vec(),
        None => vec![typ.clone()],
    }
}

/// Applies `eval` to every branch of `typ`.
pub fn and_then(
    ctx: &Ctx,
    name: &'static str,
    typ: &Type,
    mut eval: impl FnMut(&Type) -> Result<Type>,
) -> Result<Type> {
    if !typ.is_union() {
        return trace::instrument(name, typ, || eval(typ));
    }

    let branches = branches(typ);
    ctx.branches(branches.len())?;

    let results = branches
        .iter()
        .map(|branch| trace::instrument(name, branch, || eval(branch)))
        .collect::<Result<Vec<_>>>()?;

    Ok(union(results))
}

/// Applies `eval` to every pair of branches of `left` and `right`.
pub fn and_then2(
    ctx: &Ctx,
    name: &'static str,
    left: &Type,
    right: &Type,
    mut eval: impl FnMut(&Type, &Type) -> Result<Type>,
) -> Result<Type> {
    if !left.is_union() && !right.is_union() {
        return trace::instrument(name, format_args!("{left}, {right}"), || eval(left, right));
    }

    let (lefts, rights) = (branches(left), branches(right));
    ctx.branches(lefts.len() * rights.len())?;

    let results = lefts
        .iter()
        .cartesian_product(rights.iter())
        .map(|(l, r)| trace::instrument(name, format_args!("{l}, {r}"), || eval(l, r)))
        .collect::<Result<Vec<_>>>()?;

    Ok(union(results))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, context::Env, types::MonoType};
    use std::rc::Rc;

    fn one_two() -> Type {
        union([MonoType::singleton(1.0), MonoType::singleton(2.0)])
    }

    #[test]
    fn evaluates_each_branch() {
        let ctx = Ctx::default();
        let mut seen = vec![];

        let result = and_then(&ctx, "test", &one_two(), |branch| {
            seen.push(branch.clone());
            Ok(MonoType::singleton(branch.to_string()))
        })
        .unwrap();

        assert_eq!(seen.len(), 2);
        assert_eq!(result.to_string(), "'1' | '2'");
    }

    #[test]
    fn concrete_operands_are_evaluated_once() {
        let ctx = Ctx::default();
        let result = and_then2(&ctx, "test", &MonoType::number(), &MonoType::string(), |l, r| {
            Ok(MonoType::singleton(format!("{l}{r}")))
        });

        assert_eq!(result, Ok(MonoType::singleton("numberstring")));
    }

    #[test]
    fn pairs_cover_the_cross_product() {
        let ctx = Ctx::default();
        let mut count = 0;

        and_then2(&ctx, "test", &one_two(), &one_two(), |_, _| {
            count += 1;
            Ok(MonoType::boolean())
        })
        .unwrap();

        assert_eq!(count, 4);
    }

    #[test]
    fn branch_budget_is_enforced() {
        let ctx = Ctx::new(Env::empty(), Rc::new(Config::default().with_max_branches(3)));
        let err = and_then2(&ctx, "test", &one_two(), &one_two(), |_, _| Ok(MonoType::boolean()))
            .unwrap_err();

        assert_eq!(err.message(), "too many union branches (4 > 3)");
    }
}
