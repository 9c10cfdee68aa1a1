//! The context is the environment of bindings on the left side of a judgment, together with the
//! position being checked and the settings of the checker instance.

use std::rc::Rc;

use subty_error::Error;
use subty_location::ByteRange;

use crate::{
    config::{Config, LiteralPolicy},
    types::{Literal, MonoType, Type},
    Result,
};

/// An immutable map from identifiers to types. Setting a binding returns a new environment that
/// shares its structure with the old one.
#[derive(Clone, Default, Debug)]
pub struct Env {
    map: im_rc::HashMap<String, Type>,
}

impl Env {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<Type> {
        self.map.get(name).cloned()
    }

    pub fn set(&self, name: impl Into<String>, typ: Type) -> Self {
        Self {
            map: self.map.update(name.into(), typ),
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Type)> for Env {
    fn from_iter<T: IntoIterator<Item = (S, Type)>>(iter: T) -> Self {
        Self {
            map: iter.into_iter().map(|(name, typ)| (name.into(), typ)).collect(),
        }
    }
}

#[derive(Clone, Default)]
pub struct Ctx {
    pub env: Env,
    pub config: Rc<Config>,
    pub location: ByteRange,
    pub depth: usize,
}

impl Ctx {
    pub fn new(env: Env, config: Rc<Config>) -> Self {
        Self {
            env,
            config,
            location: ByteRange::default(),
            depth: 0,
        }
    }

    /// Extends a context with a new binding.
    pub fn extend(&self, name: impl Into<String>, typ: Type) -> Self {
        Self {
            env: self.env.set(name, typ),
            ..self.clone()
        }
    }

    pub fn lookup(&self, name: &str) -> Option<Type> {
        self.env.get(name)
    }

    /// Sets the current location that we are type checking inside of the context.
    pub fn set_position(&mut self, location: ByteRange) {
        self.location = location;
    }

    /// Enters one more level of `synth`/`check` nesting.
    pub fn descend(&self) -> Result<Self> {
        if self.depth >= self.config.max_depth {
            return self.error(format!("expression nesting exceeds {}", self.config.max_depth));
        }

        Ok(Self {
            depth: self.depth + 1,
            ..self.clone()
        })
    }

    /// Fails unless `count` union branch combinations are within the configured budget.
    pub fn branches(&self, count: usize) -> Result<()> {
        if count > self.config.max_branches {
            self.error(format!(
                "too many union branches ({count} > {})",
                self.config.max_branches
            ))
        } else {
            Ok(())
        }
    }

    /// The type of a literal under the configured policy.
    pub fn literal(&self, value: impl Into<Literal>) -> Type {
        let value = value.into();

        match self.config.literals {
            LiteralPolicy::Singleton => Rc::new(MonoType::Singleton(value)),
            LiteralPolicy::Primitive => value.base(),
        }
    }

    /// Fails with a type error at the current position.
    pub fn error<T>(&self, msg: impl Into<String>) -> Result<T> {
        self.error_at(self.location, msg)
    }

    pub fn error_at<T>(&self, location: ByteRange, msg: impl Into<String>) -> Result<T> {
        Err(Error::new(msg, location))
    }

    /// Fails because the checker does not cover the form at the current position.
    pub fn bug<T>(&self, msg: impl Into<String>) -> Result<T> {
        self.bug_at(self.location, msg)
    }

    pub fn bug_at<T>(&self, location: ByteRange, msg: impl Into<String>) -> Result<T> {
        Err(Error::bug(msg, location))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setting_a_binding_leaves_the_old_env_untouched() {
        let env = Env::empty().set("x", MonoType::number());
        let extended = env.set("y", MonoType::string()).set("x", MonoType::boolean());

        assert_eq!(env.get("x"), Some(MonoType::number()));
        assert_eq!(env.get("y"), None);
        assert_eq!(extended.get("x"), Some(MonoType::boolean()));
        assert_eq!(extended.len(), 2);
    }

    #[test]
    fn depth_is_bounded() {
        let config = Rc::new(Config::default().with_max_depth(2));
        let ctx = Ctx::new(Env::empty(), config);

        let ctx = ctx.descend().and_then(|ctx| ctx.descend()).unwrap();
        let err = ctx.descend().err().unwrap();

        assert_eq!(err.message(), "expression nesting exceeds 2");
        assert!(!err.is_bug());
    }

    #[test]
    fn literals_follow_the_policy() {
        let singleton = Ctx::default();
        let primitive = Ctx::new(
            Env::empty(),
            Rc::new(Config::default().with_literals(LiteralPolicy::Primitive)),
        );

        assert_eq!(singleton.literal(1.0), MonoType::singleton(1.0));
        assert_eq!(primitive.literal(1.0), MonoType::number());
        assert_eq!(primitive.literal("a"), MonoType::string());
    }
}
