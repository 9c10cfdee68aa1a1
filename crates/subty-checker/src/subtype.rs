//! The subtyping relation. `is_subtype(a, b)` holds when every value described by `a` is also
//! described by `b`. There is no coercion: the relation only looks at the shape of the types.

use std::rc::Rc;

use crate::types::{MonoType, Type};

pub fn is_subtype(fst: &Type, snd: &Type) -> bool {
    use MonoType::*;

    if Rc::ptr_eq(fst, snd) {
        return true;
    }

    match (&**fst, &**snd) {
        (Never, _) | (_, Unknown) => true,

        (Null, Null) | (Boolean, Boolean) | (Number, Number) | (String, String) => true,

        // Every alternative has to fit.
        (Union(fsts), _) => fsts.iter().all(|fst| is_subtype(fst, snd)),

        (_, Union(snds)) => snds.iter().any(|snd| is_subtype(fst, snd)),

        (_, Intersection(snds)) => snds.iter().all(|snd| is_subtype(fst, snd)),

        (Intersection(fsts), _) => fsts.iter().any(|fst| is_subtype(fst, snd)),

        (Singleton(x), Singleton(y)) => x == y,

        (Singleton(x), _) => is_subtype(&x.base(), snd),

        // Width and depth: `fst` may have more properties, shared ones must be subtypes.
        (Object(fsts), Object(snds)) => snds.iter().all(|(name, snd)| {
            fsts.get(name)
                .map_or(false, |fst| is_subtype(fst, snd))
        }),

        (Function(fst_args, fst_ret), Function(snd_args, snd_ret)) => {
            fst_args.len() == snd_args.len()
                && snd_args
                    .iter()
                    .zip(fst_args)
                    .all(|(snd, fst)| is_subtype(snd, fst))
                && is_subtype(fst_ret, snd_ret)
        }

        _ => false,
    }
}
