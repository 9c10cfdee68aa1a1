//! Normalizing constructors for unions and intersections. They are the only way to build these
//! types, and they keep them in a canonical form: members are flattened, redundant members are
//! collapsed away using [is_subtype], intersections are distributed over unions (so a union never
//! sits inside an intersection) and provably empty intersections become `never`.

use std::{mem::discriminant, rc::Rc};

use itertools::Itertools;

use crate::{
    subtype::is_subtype,
    types::{MonoType, Type, TypeSet},
};

/// Splices the members of nested unions (or intersections) into the list.
fn flatten(
    types: impl IntoIterator<Item = Type>,
    members: fn(&MonoType) -> Option<&TypeSet>,
) -> Vec<Type> {
    types
        .into_iter()
        .flat_map(|typ| {
            let nested = members(&typ).map(TypeSet::to_vec);
            nested.unwrap_or_else(|| vec![typ])
        })
        .collect()
}

/// Drops every member that is dominated by another one. When two members dominate each other
/// (they are equal under subtyping) only the first one stays.
fn collapse(types: Vec<Type>, dominates: impl Fn(&Type, &Type) -> bool) -> Vec<Type> {
    types
        .iter()
        .enumerate()
        .filter(|(i1, t1)| {
            types.iter().enumerate().all(|(i2, t2)| {
                *i1 == i2 || !dominates(t2, t1) || (dominates(t1, t2) && *i1 < i2)
            })
        })
        .map(|(_, t)| t.clone())
        .collect()
}

/// Keeps only the most general members.
fn collapse_subtypes(types: Vec<Type>) -> Vec<Type> {
    collapse(types, |general, specific| is_subtype(specific, general))
}

/// Keeps only the most specific members.
fn collapse_supertypes(types: Vec<Type>) -> Vec<Type> {
    collapse(types, |specific, general| is_subtype(specific, general))
}

pub fn union(types: impl IntoIterator<Item = Type>) -> Type {
    let mut types = collapse_subtypes(flatten(types, MonoType::as_union));

    match types.len() {
        0 => MonoType::never(),
        1 => types.remove(0),
        _ => Rc::new(MonoType::Union(TypeSet::new(types))),
    }
}

/// Decides if no value can be described by both types at once.
pub fn empty_intersection(x: &Type, y: &Type) -> bool {
    use MonoType::*;

    match (&**x, &**y) {
        (Never, _) | (_, Never) => true,
        (Unknown, _) | (_, Unknown) => false,

        (Union(xs), _) => xs.iter().all(|x| empty_intersection(x, y)),
        (_, Union(ys)) => ys.iter().all(|y| empty_intersection(x, y)),
        (Intersection(xs), _) => xs.iter().any(|x| empty_intersection(x, y)),
        (_, Intersection(ys)) => ys.iter().any(|y| empty_intersection(x, y)),

        (Singleton(a), Singleton(b)) => a != b,
        (Singleton(a), _) => discriminant(&*a.base()) != discriminant(&**y),
        (_, Singleton(b)) => discriminant(&*b.base()) != discriminant(&**x),

        (Object(xs), Object(ys)) => xs.iter().any(|(name, x)| {
            ys.get(name)
                .map_or(false, |y| empty_intersection(x, y))
        }),

        _ => discriminant(&**x) != discriminant(&**y),
    }
}

/// Intersects members that are known not to contain unions.
fn intersection_no_union(types: Vec<Type>) -> Type {
    let types = flatten(types, MonoType::as_intersection);

    let empty = types
        .iter()
        .tuple_combinations()
        .any(|(t1, t2)| empty_intersection(t1, t2));

    if empty {
        return MonoType::never();
    }

    let mut types = collapse_supertypes(types);

    match types.len() {
        0 => MonoType::unknown(),
        1 => types.remove(0),
        _ => Rc::new(MonoType::Intersection(TypeSet::new(types))),
    }
}

/// All the ways of choosing one branch of every member, where a type that is not a union is its
/// own single branch.
fn distribute_union(types: &[Type]) -> Vec<Vec<Type>> {
    types
        .iter()
        .map(|typ| match typ.as_union() {
            Some(branches) => branches.to_vec(),
            None => vec![typ.clone()],
        })
        .multi_cartesian_product()
        .collect()
}

/// How many branch combinations [intersection] visits when distributing over the unions among
/// `types`.
pub fn distribution_size(types: &[Type]) -> usize {
    flatten(types.iter().cloned(), MonoType::as_intersection)
        .iter()
        .map(|typ| typ.as_union().map_or(1, TypeSet::len))
        .fold(1, usize::saturating_mul)
}

pub fn intersection(types: impl IntoIterator<Item = Type>) -> Type {
    let types = flatten(types, MonoType::as_intersection);

    if types.is_empty() {
        return MonoType::unknown();
    }

    union(
        distribute_union(&types)
            .into_iter()
            .map(intersection_no_union),
    )
}
