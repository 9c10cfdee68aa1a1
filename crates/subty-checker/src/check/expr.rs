//! Checking of expressions against known types.

use std::collections::HashSet;

use indexmap::IndexMap;
use subty_tree::r#abstract::{Expr, ExprKind, Property};

use super::Check;
use crate::{
    context::Ctx,
    infer::{expr::field, Infer},
    subtype::is_subtype,
    trace,
    types::Type,
    Result,
};

impl Check<'_> for &Expr {
    type Context = Ctx;
    type Result = Result<()>;

    fn check(self, ctx: Self::Context, typ: Type) -> Self::Result {
        let mut ctx = ctx.descend()?;
        ctx.set_position(self.location);

        trace::instrument("check", format_args!("{self} <== {typ}"), || {
            match (&self.data, typ.as_object()) {
                (ExprKind::Object(fields), Some(expected)) => {
                    trace::instrument("checkObject", self, || check_object(&ctx, fields, expected))
                }

                _ => {
                    let synthesized = self.infer(ctx.clone())?;

                    let fits = trace::instrument(
                        "isSubtype",
                        format_args!("{synthesized} <: {typ}"),
                        || Ok(is_subtype(&synthesized, &typ)),
                    )?;

                    if fits {
                        Ok(())
                    } else {
                        ctx.error(format!("expected {typ}, got {synthesized}"))
                    }
                }
            }
        })
    }
}

/// Checks an object expression property by property, so that every expected property has to be
/// written and nothing else may be.
fn check_object(ctx: &Ctx, fields: &[Property], expected: &IndexMap<String, Type>) -> Result<()> {
    let fields = fields
        .iter()
        .map(|property| field(ctx, property))
        .collect::<Result<Vec<_>>>()?;

    let mut seen = HashSet::new();

    for &(name, _) in &fields {
        if !seen.insert(name.data.as_str()) {
            return ctx.error_at(name.location, format!("duplicate property {}", name.data));
        }
    }

    if let Some(name) = expected.keys().find(|name| !seen.contains(name.as_str())) {
        return ctx.error(format!("missing property {name}"));
    }

    for (name, value) in fields {
        match expected.get(&name.data) {
            Some(typ) => value.check(ctx.clone(), typ.clone())?,
            None => return ctx.error_at(name.location, format!("extra property {}", name.data)),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::{context::Env, of_annotation, types::Type};
    use subty_parser::{parse_expr, parse_type};

    fn typ(code: &str) -> Type {
        of_annotation(&parse_type(code).unwrap()).unwrap()
    }

    fn check(expr: &str, against: &str) -> crate::Result<()> {
        let env = Env::empty().set("n", typ("number")).set("x", typ("1 | 2"));
        crate::check(&env, &parse_expr(expr).unwrap(), typ(against))
    }

    fn message(expr: &str, against: &str) -> String {
        check(expr, against).unwrap_err().message().to_string()
    }

    #[test]
    fn object_literals_check_property_by_property() {
        assert!(check("{ x: 1, y: 2 }", "{ x: number, y: number }").is_ok());
        assert!(check("{ y: n, x: 1 }", "{ x: number, y: number }").is_ok());
        assert!(check("{ p: { q: 1 } }", "{ p: { q: number } }").is_ok());
    }

    #[test]
    fn extra_and_missing_properties() {
        assert_eq!(message("{ x: 1, y: 2 }", "{ x: number }"), "extra property y");
        assert_eq!(message("{ x: 1 }", "{ x: number, y: number }"), "missing property y");
        assert_eq!(message("{ p: { q: 1, r: 2 } }", "{ p: { q: number } }"), "extra property r");
    }

    #[test]
    fn property_values_are_checked() {
        assert_eq!(
            message("{ x: 'a', y: 2 }", "{ x: number, y: number }"),
            "expected number, got 'a'"
        );
    }

    #[test]
    fn other_forms_fall_back_to_subtyping() {
        assert!(check("x", "number").is_ok());
        assert!(check("x", "1 | 2 | 3").is_ok());
        assert!(check("1", "unknown").is_ok());
        assert_eq!(message("n", "1 | 2"), "expected 1 | 2, got number");
        assert_eq!(message("{ x: 1 }", "number"), "expected number, got { x: 1 }");
    }

    #[test]
    fn object_literals_against_unions_are_synthesized() {
        assert!(check("{ x: 1, y: 2 }", "{ x: number } | null").is_ok());
        assert_eq!(
            message("{ x: 'a' }", "{ x: number } | null"),
            "expected { x: number } | null, got { x: 'a' }"
        );
    }

    #[test]
    fn errors_point_at_the_offending_property() {
        let code = "{ x: 1, y: 2 }";
        let err = check(code, "{ x: number }").unwrap_err();
        assert_eq!(err.render_location(code), Some("1:9~1:10".to_string()));
    }
}
