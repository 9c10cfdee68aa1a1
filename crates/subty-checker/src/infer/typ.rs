//! Conversion of written type annotations into [Type]s.

use std::collections::HashSet;

use subty_tree::r#abstract::{LiteralNode, Param, TypeKind, TypeNode};

use super::Infer;
use crate::{
    algebra::{distribution_size, intersection, union},
    context::Ctx,
    trace,
    types::{MonoType, Type},
    Result,
};

impl Infer for &TypeNode {
    type Context<'a> = Ctx;
    type Return = Result<Type>;

    fn infer(self, ctx: Self::Context<'_>) -> Self::Return {
        let mut ctx = ctx.descend()?;
        ctx.set_position(self.location);

        trace::instrument("ofAnnotation", self, || match &self.data {
            TypeKind::Null => Ok(MonoType::null()),
            TypeKind::Boolean => Ok(MonoType::boolean()),
            TypeKind::Number => Ok(MonoType::number()),
            TypeKind::String => Ok(MonoType::string()),
            TypeKind::Unknown => Ok(MonoType::unknown()),
            TypeKind::Never => Ok(MonoType::never()),

            TypeKind::Literal(LiteralNode::Boolean(b)) => Ok(MonoType::singleton(*b)),
            TypeKind::Literal(LiteralNode::Number(n)) => Ok(MonoType::singleton(*n)),
            TypeKind::Literal(LiteralNode::String(s)) => Ok(MonoType::singleton(s.as_str())),

            TypeKind::Object(members) => {
                let mut seen = HashSet::new();
                let mut properties = Vec::with_capacity(members.len());

                for member in members {
                    let name = &member.name;

                    let Some(typ) = &member.typ else {
                        return ctx.bug_at(name.location, format!("expected type for {}", name.data));
                    };

                    if !seen.insert(name.data.as_str()) {
                        return ctx.error_at(name.location, format!("duplicate property {}", name.data));
                    }

                    properties.push((name.data.clone(), typ.infer(ctx.clone())?));
                }

                MonoType::object(properties).or_else(|err| ctx.error(err.to_string()))
            }

            TypeKind::Function(function) => {
                let args = params(&ctx, &function.params)?;
                let ret = function.ret.infer(ctx.clone())?;
                Ok(MonoType::function(args, ret))
            }

            TypeKind::Union(types) => types
                .iter()
                .map(|typ| typ.infer(ctx.clone()))
                .collect::<Result<Vec<_>>>()
                .map(union),

            TypeKind::Intersection(types) => {
                let types = types
                    .iter()
                    .map(|typ| typ.infer(ctx.clone()))
                    .collect::<Result<Vec<_>>>()?;

                ctx.branches(distribution_size(&types))?;
                Ok(intersection(types))
            }
        })
    }
}

/// The types of the parameters of a function type, which must all be annotated.
fn params(ctx: &Ctx, params: &[Param]) -> Result<Vec<Type>> {
    params
        .iter()
        .map(|param| match &param.typ {
            Some(typ) => typ.infer(ctx.clone()),
            None => ctx.bug_at(
                param.name.location,
                format!("expected type for {}", param.name.data),
            ),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::of_annotation;
    use subty_error::ErrorKind;
    use subty_parser::parse_type;

    fn convert(code: &str) -> crate::Result<String> {
        of_annotation(&parse_type(code).unwrap()).map(|typ| typ.to_string())
    }

    #[test]
    fn converts_every_form() {
        assert_eq!(convert("null").unwrap(), "null");
        assert_eq!(convert("unknown").unwrap(), "unknown");
        assert_eq!(convert("'a'").unwrap(), "'a'");
        assert_eq!(convert("{ x: number; y: 1 }").unwrap(), "{ x: number, y: 1 }");
        assert_eq!(convert("{}").unwrap(), "{}");
        assert_eq!(
            convert("(f: (x: number) => string, y: boolean) => null").unwrap(),
            "((number) => string, boolean) => null"
        );
    }

    #[test]
    fn annotations_are_normalized() {
        assert_eq!(convert("1 | number").unwrap(), "number");
        assert_eq!(convert("number & 1").unwrap(), "1");
        assert_eq!(convert("1 & 2").unwrap(), "never");
        assert_eq!(convert("(1 | 'a') & string").unwrap(), "'a'");
    }

    #[test]
    fn rejects_duplicate_members() {
        let err = convert("{ x: number, x: string }").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
        assert_eq!(err.message(), "duplicate property x");
    }

    #[test]
    fn nesting_is_bounded() {
        let nested = |levels: usize| {
            format!("{}number{}", "{ a: ".repeat(levels), " }".repeat(levels))
        };

        assert!(convert(&nested(100)).is_ok());

        let err = convert(&nested(200)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
        assert_eq!(err.message(), "expression nesting exceeds 128");
    }

    #[test]
    fn distribution_is_bounded() {
        let operands = |count: usize| vec!["(1 | 2)"; count].join(" & ");

        assert_eq!(convert(&operands(12)).unwrap(), "1 | 2");

        let err = convert(&operands(13)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
        assert_eq!(err.message(), "too many union branches (8192 > 4096)");
    }

    #[test]
    fn unannotated_members_are_gaps() {
        let err = convert("{ x }").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Bug);
        assert_eq!(err.message(), "expected type for x");

        let err = convert("(x) => number").unwrap_err();
        assert!(err.is_bug());
        assert_eq!(err.message(), "expected type for x");
    }
}
