//! Type synthesis for expressions.

use std::collections::HashSet;

use subty_tree::r#abstract::*;

use super::{ops, Infer};
use crate::{
    and_then::{and_then, and_then2},
    check::Check,
    context::Ctx,
    trace,
    types::{MonoType, Type},
    Result,
};

impl Infer for &Expr {
    type Context<'a> = Ctx;
    type Return = Result<Type>;

    fn infer(self, ctx: Self::Context<'_>) -> Self::Return {
        let mut ctx = ctx.descend()?;
        ctx.set_position(self.location);

        trace::instrument("synth", self, || synth(ctx, self))
    }
}

fn synth(ctx: Ctx, expr: &Expr) -> Result<Type> {
    use ExprKind::*;

    match &expr.data {
        Identifier(x) => match ctx.lookup(x) {
            Some(typ) => Ok(typ),
            None => ctx.error(format!("unbound identifier '{x}'")),
        },

        Null => Ok(MonoType::null()),
        Boolean(b) => Ok(ctx.literal(*b)),
        Number(n) => Ok(ctx.literal(*n)),
        String(s) => Ok(ctx.literal(s.as_str())),

        Object(properties) => {
            let mut seen = HashSet::new();
            let mut fields = Vec::with_capacity(properties.len());

            for property in properties {
                let (name, value) = field(&ctx, property)?;

                if !seen.insert(name.data.as_str()) {
                    return ctx.error_at(name.location, format!("duplicate property {}", name.data));
                }

                fields.push((name.data.clone(), value.infer(ctx.clone())?));
            }

            MonoType::object(fields).or_else(|err| ctx.error(err.to_string()))
        }

        Member(object, name) => {
            let typ = object.infer(ctx.clone())?;

            and_then(&ctx, "andThenMember", &typ, |typ| {
                let Some(properties) = typ.as_object() else {
                    return ctx.error_at(object.location, ". expects object");
                };

                match properties.get(&name.data) {
                    Some(typ) => Ok(typ.clone()),
                    None => ctx.error_at(name.location, format!("no such property {}", name.data)),
                }
            })
        }

        Computed(..) => ctx.bug("unimplemented computed member access"),

        Ascription(expr, annotation) => {
            let typ = annotation.infer(ctx.clone())?;
            expr.check(ctx, typ.clone())?;
            Ok(typ)
        }

        Function(params, body) => {
            let mut body_ctx = ctx.clone();
            let mut args = Vec::with_capacity(params.len());

            for param in params {
                let Some(annotation) = &param.typ else {
                    let name = &param.name;
                    return ctx.error_at(name.location, format!("type required for '{}'", name.data));
                };

                let typ = annotation.infer(ctx.clone())?;
                body_ctx = body_ctx.extend(param.name.data.clone(), typ.clone());
                args.push(typ);
            }

            let ret = body.infer(body_ctx)?;
            Ok(MonoType::function(args, ret))
        }

        Call(callee, args) => {
            let typ = callee.infer(ctx.clone())?;

            and_then(&ctx, "andThenCall", &typ, |typ| {
                let Some((params, ret)) = typ.as_function() else {
                    return ctx.error_at(callee.location, "call expects function");
                };

                if params.len() != args.len() {
                    return ctx.error(format!(
                        "expected {} args, got {} args",
                        params.len(),
                        args.len()
                    ));
                }

                for (arg, param) in args.iter().zip(params) {
                    arg.check(ctx.clone(), param.clone())?;
                }

                Ok(ret.clone())
            })
        }

        Binary(op, left, right) => {
            let left = left.infer(ctx.clone())?;
            let right = right.infer(ctx.clone())?;

            and_then2(&ctx, "andThenBinary", &left, &right, |left, right| {
                ops::binary(&ctx, *op, left, right)
            })
        }

        Logical(op, left, right) => {
            let left = left.infer(ctx.clone())?;
            let right = right.infer(ctx.clone())?;

            and_then2(&ctx, "andThenLogical", &left, &right, |left, right| {
                Ok(ops::logical(*op, left, right))
            })
        }

        Unary(op, operand) => {
            let typ = operand.infer(ctx.clone())?;
            and_then(&ctx, "andThenUnary", &typ, |typ| Ok(ops::unary(*op, typ)))
        }
    }
}

/// The name and value of a property written in an object expression.
pub(crate) fn field<'a>(ctx: &Ctx, property: &'a Property) -> Result<(&'a Name, &'a Expr)> {
    match property {
        Property::Field(name, value) => Ok((name, value)),
        Property::Spread(value) => ctx.bug_at(value.location, "unimplemented spread property"),
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        config::{Config, LiteralPolicy},
        context::{Ctx, Env},
        infer::Infer,
        of_annotation,
    };
    use std::rc::Rc;
    use subty_error::ErrorKind;
    use subty_parser::{parse_expr, parse_type};

    fn env() -> Env {
        [
            ("x", "1 | 2"),
            ("n", "number"),
            ("s", "string"),
            ("point", "{ x: number, y: number }"),
            ("add", "(a: number, b: number) => number"),
            ("either", "{ a: 1 } | { a: 'one', b: boolean }"),
            ("maybe", "{ a: number } | null"),
            ("fns", "((a: number) => 1) | ((b: number) => 'b')"),
        ]
        .into_iter()
        .map(|(name, code)| (name, of_annotation(&parse_type(code).unwrap()).unwrap()))
        .collect()
    }

    fn synth(code: &str) -> crate::Result<String> {
        crate::synth(&env(), &parse_expr(code).unwrap()).map(|typ| typ.to_string())
    }

    fn message(code: &str) -> String {
        synth(code).unwrap_err().message().to_string()
    }

    #[test]
    fn literals_are_singletons() {
        assert_eq!(synth("1").unwrap(), "1");
        assert_eq!(synth("'a'").unwrap(), "'a'");
        assert_eq!(synth("true").unwrap(), "true");
        assert_eq!(synth("null").unwrap(), "null");
        assert_eq!(synth("{ a: 1, b: { c: 'd' } }").unwrap(), "{ a: 1, b: { c: 'd' } }");
    }

    #[test]
    fn literals_can_be_widened() {
        let config = Config::default().with_literals(LiteralPolicy::Primitive);
        let ctx = Ctx::new(env(), Rc::new(config));
        let typ = parse_expr("{ a: 1, b: 'c', d: !n }").unwrap().infer(ctx).unwrap();
        assert_eq!(typ.to_string(), "{ a: number, b: string, d: boolean }");
    }

    #[test]
    fn identifiers() {
        assert_eq!(synth("point").unwrap(), "{ x: number, y: number }");
        assert_eq!(message("nope"), "unbound identifier 'nope'");
    }

    #[test]
    fn member_access() {
        assert_eq!(synth("point.x").unwrap(), "number");
        assert_eq!(synth("{ a: { b: 1 } }.a.b").unwrap(), "1");
        assert_eq!(message("n.x"), ". expects object");
        assert_eq!(message("point.z"), "no such property z");
    }

    #[test]
    fn member_access_distributes_over_unions() {
        assert_eq!(synth("either.a").unwrap(), "1 | 'one'");
        assert_eq!(message("either.b"), "no such property b");
        assert_eq!(message("maybe.a"), ". expects object");
    }

    #[test]
    fn ascriptions_check_and_return_the_annotation() {
        assert_eq!(synth("1 as number").unwrap(), "number");
        assert_eq!(synth("{ x: 1, y: 2, } as { x: number, y: number }").unwrap(), "{ x: number, y: number }");
        assert_eq!(message("'a' as number"), "expected number, got 'a'");
    }

    #[test]
    fn functions_require_annotated_params() {
        assert_eq!(synth("(a: number, b) => a").unwrap_err().message(), "type required for 'b'");
        assert_eq!(message("a => a"), "type required for 'a'");
        assert_eq!(synth("(a: number) => a + 1").unwrap(), "(number) => number");
        assert_eq!(synth("() => 'k'").unwrap(), "() => 'k'");
    }

    #[test]
    fn calls() {
        assert_eq!(synth("add(1, n)").unwrap(), "number");
        assert_eq!(message("add(1)"), "expected 2 args, got 1 args");
        assert_eq!(message("add(1, 's')"), "expected number, got 's'");
        assert_eq!(message("n(1)"), "call expects function");
        assert_eq!(synth("((a: number) => a === 1)(1)").unwrap(), "boolean");
        assert_eq!(synth("fns(1)").unwrap(), "1 | 'b'");
    }

    #[test]
    fn equality_narrows_per_branch() {
        assert_eq!(synth("x === 1").unwrap(), "true | false");
        assert_eq!(synth("x !== 3").unwrap(), "true");
        assert_eq!(synth("n === 1").unwrap(), "boolean");
    }

    #[test]
    fn addition() {
        assert_eq!(synth("1 + 2").unwrap(), "3");
        assert_eq!(synth("x + 1").unwrap(), "2 | 3");
        assert_eq!(synth("n + x").unwrap(), "number");
        assert_eq!(message("s + 1"), "+ expects numbers");
    }

    #[test]
    fn logical_and_unary() {
        assert_eq!(synth("x && 'yes'").unwrap(), "'yes'");
        assert_eq!(synth("null || s").unwrap(), "string");
        assert_eq!(synth("n || s").unwrap(), "number | string");
        assert_eq!(synth("!x").unwrap(), "false");
        assert_eq!(synth("!n").unwrap(), "boolean");
        assert_eq!(synth("typeof x").unwrap(), "'number'");
        assert_eq!(synth("typeof maybe").unwrap(), "'object'");
        assert_eq!(synth("typeof (n || s)").unwrap(), "'number' | 'string'");
    }

    #[test]
    fn unsupported_forms_are_bugs() {
        let err = synth("point['x']").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Bug);
        assert_eq!(err.message(), "unimplemented computed member access");

        let err = synth("{ ...point }").unwrap_err();
        assert!(err.is_bug());
        assert_eq!(err.message(), "unimplemented spread property");
    }

    #[test]
    fn duplicate_properties_are_rejected() {
        assert_eq!(message("{ a: 1, a: 2 }"), "duplicate property a");
    }

    #[test]
    fn nesting_is_bounded() {
        let config = Config::default().with_max_depth(8);
        let ctx = Ctx::new(env(), Rc::new(config));
        let code = format!("{}1{}", "(".repeat(3), ")".repeat(3));
        assert!(parse_expr(&code).unwrap().infer(ctx.clone()).is_ok());

        let deep = (0..10).fold("1".to_string(), |acc, _| format!("{acc} + 1"));
        let err = parse_expr(&deep).unwrap().infer(ctx).unwrap_err();
        assert_eq!(err.message(), "expression nesting exceeds 8");
    }

    #[test]
    fn default_nesting_fits_on_a_test_thread() {
        let max = Config::default().max_depth;

        assert_eq!(synth(&format!("{}1", "!".repeat(max - 1))).unwrap(), "false");
        assert_eq!(
            message(&format!("{}1", "!".repeat(max))),
            format!("expression nesting exceeds {max}")
        );
    }
}
