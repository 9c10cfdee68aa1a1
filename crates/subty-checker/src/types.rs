//! The type model. Every type is an immutable [MonoType] shared through [Type] handles, so the
//! same value can be reused by many environments and unions without copying.
//!
//! Unions and intersections are only built by the normalizing constructors in
//! [crate::algebra]; [TypeSet] cannot be created outside of this crate.

use std::{
    fmt::{self, Display},
    rc::Rc,
};

use indexmap::IndexMap;
use itertools::Itertools;

pub type Type = Rc<MonoType>;

/// The value of a singleton type.
#[derive(Debug, Clone)]
pub enum Literal {
    Boolean(bool),
    Number(f64),
    String(String),
}

impl Literal {
    /// The primitive type that contains this value.
    pub fn base(&self) -> Type {
        match self {
            Self::Boolean(_) => MonoType::boolean(),
            Self::Number(_) => MonoType::number(),
            Self::String(_) => MonoType::string(),
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Boolean(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::String(s) => !s.is_empty(),
        }
    }

    /// Runtime comparison of two values with `===`.
    pub fn strict_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Boolean(l), Self::Boolean(r)) => l == r,
            (Self::Number(l), Self::Number(r)) => l == r,
            (Self::String(l), Self::String(r)) => l == r,
            _ => false,
        }
    }
}

// Structural equality, so unlike `===` a NaN singleton is equal to itself.
impl PartialEq for Literal {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(l), Self::Number(r)) => l == r || (l.is_nan() && r.is_nan()),
            _ => self.strict_eq(other),
        }
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "'{s}'"),
        }
    }
}

/// Members of a union or an intersection. The order is the order in which the members were first
/// seen and only matters for display; equality ignores it.
#[derive(Debug, Clone)]
pub struct TypeSet(Vec<Type>);

impl TypeSet {
    pub(crate) fn new(types: Vec<Type>) -> Self {
        Self(types)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Type> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_vec(&self) -> Vec<Type> {
        self.0.clone()
    }
}

impl PartialEq for TypeSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.iter().all(|t| other.0.contains(t))
            && other.iter().all(|t| self.0.contains(t))
    }
}

impl<'a> IntoIterator for &'a TypeSet {
    type Item = &'a Type;
    type IntoIter = std::slice::Iter<'a, Type>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug)]
pub struct DuplicateProperty(pub String);

impl Display for DuplicateProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "duplicate property {}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MonoType {
    Never,
    Unknown,
    Null,
    Boolean,
    Number,
    String,
    Singleton(Literal),
    /// Property order is kept for display, equality ignores it.
    Object(IndexMap<String, Type>),
    Function(Vec<Type>, Type),
    Union(TypeSet),
    Intersection(TypeSet),
}

impl MonoType {
    pub fn never() -> Type {
        Rc::new(Self::Never)
    }

    pub fn unknown() -> Type {
        Rc::new(Self::Unknown)
    }

    pub fn null() -> Type {
        Rc::new(Self::Null)
    }

    pub fn boolean() -> Type {
        Rc::new(Self::Boolean)
    }

    pub fn number() -> Type {
        Rc::new(Self::Number)
    }

    pub fn string() -> Type {
        Rc::new(Self::String)
    }

    pub fn singleton(value: impl Into<Literal>) -> Type {
        Rc::new(Self::Singleton(value.into()))
    }

    /// Creates an object type, failing if two properties have the same name.
    pub fn object(
        properties: impl IntoIterator<Item = (String, Type)>,
    ) -> Result<Type, DuplicateProperty> {
        let mut map = IndexMap::new();

        for (name, typ) in properties {
            if map.contains_key(&name) {
                return Err(DuplicateProperty(name));
            }
            map.insert(name, typ);
        }

        Ok(Rc::new(Self::Object(map)))
    }

    pub fn function(args: Vec<Type>, ret: Type) -> Type {
        Rc::new(Self::Function(args, ret))
    }
}

impl MonoType {
    pub fn is_never(&self) -> bool {
        matches!(self, Self::Never)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, Self::Boolean)
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number)
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Self::String)
    }

    pub fn is_singleton(&self) -> bool {
        matches!(self, Self::Singleton(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Self::Function(..))
    }

    pub fn is_union(&self) -> bool {
        matches!(self, Self::Union(_))
    }

    pub fn is_intersection(&self) -> bool {
        matches!(self, Self::Intersection(_))
    }

    pub fn as_singleton(&self) -> Option<&Literal> {
        match self {
            Self::Singleton(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, Type>> {
        match self {
            Self::Object(properties) => Some(properties),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<(&[Type], &Type)> {
        match self {
            Self::Function(args, ret) => Some((args, ret)),
            _ => None,
        }
    }

    pub fn as_union(&self) -> Option<&TypeSet> {
        match self {
            Self::Union(types) => Some(types),
            _ => None,
        }
    }

    pub fn as_intersection(&self) -> Option<&TypeSet> {
        match self {
            Self::Intersection(types) => Some(types),
            _ => None,
        }
    }

    /// The type of a property of an object type. Absence is not an error here, callers decide.
    pub fn prop_type(&self, name: &str) -> Option<Type> {
        self.as_object()
            .and_then(|properties| properties.get(name))
            .cloned()
    }

    /// Every value of the type is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Singleton(value) => value.is_truthy(),
            Self::Union(types) => types.iter().all(|t| t.is_truthy()),
            Self::Intersection(types) => types.iter().any(|t| t.is_truthy()),
            _ => false,
        }
    }

    /// Every value of the type is falsy.
    pub fn is_falsy(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Singleton(value) => !value.is_truthy(),
            Self::Union(types) => types.iter().all(|t| t.is_falsy()),
            Self::Intersection(types) => types.iter().any(|t| t.is_falsy()),
            _ => false,
        }
    }
}

impl Display for MonoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Never => write!(f, "never"),
            Self::Unknown => write!(f, "unknown"),
            Self::Null => write!(f, "null"),
            Self::Boolean => write!(f, "boolean"),
            Self::Number => write!(f, "number"),
            Self::String => write!(f, "string"),
            Self::Singleton(value) => write!(f, "{value}"),
            Self::Object(properties) if properties.is_empty() => write!(f, "{{}}"),
            Self::Object(properties) => write!(
                f,
                "{{ {} }}",
                properties
                    .iter()
                    .map(|(name, typ)| format!("{name}: {typ}"))
                    .join(", ")
            ),
            Self::Function(args, ret) => write!(f, "({}) => {ret}", args.iter().join(", ")),
            Self::Union(types) => write!(
                f,
                "{}",
                types
                    .iter()
                    .map(|t| match &**t {
                        Self::Function(..) => format!("({t})"),
                        _ => t.to_string(),
                    })
                    .join(" | ")
            ),
            Self::Intersection(types) => write!(
                f,
                "{}",
                types
                    .iter()
                    .map(|t| match &**t {
                        Self::Function(..) | Self::Union(_) => format!("({t})"),
                        _ => t.to_string(),
                    })
                    .join(" & ")
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(props: &[(&str, Type)]) -> Type {
        MonoType::object(props.iter().map(|(n, t)| (n.to_string(), t.clone()))).unwrap()
    }

    #[test]
    fn object_equality_ignores_property_order() {
        let xy = object(&[("x", MonoType::number()), ("y", MonoType::string())]);
        let yx = object(&[("y", MonoType::string()), ("x", MonoType::number())]);
        assert_eq!(xy, yx);
        assert_eq!(xy.to_string(), "{ x: number, y: string }");
    }

    #[test]
    fn object_rejects_duplicate_properties() {
        let err = MonoType::object([
            ("x".to_string(), MonoType::number()),
            ("x".to_string(), MonoType::string()),
        ])
        .unwrap_err();
        assert_eq!(err.to_string(), "duplicate property x");
    }

    #[test]
    fn prop_type_signals_absence() {
        let typ = object(&[("x", MonoType::number())]);
        assert_eq!(typ.prop_type("x"), Some(MonoType::number()));
        assert_eq!(typ.prop_type("y"), None);
        assert_eq!(MonoType::number().prop_type("x"), None);
    }

    #[test]
    fn truthiness_of_singletons() {
        assert!(MonoType::singleton(true).is_truthy());
        assert!(MonoType::singleton("a").is_truthy());
        assert!(MonoType::singleton(0.0).is_falsy());
        assert!(MonoType::singleton("").is_falsy());
        assert!(MonoType::singleton(f64::NAN).is_falsy());
        assert!(MonoType::null().is_falsy());

        for typ in [MonoType::boolean(), MonoType::number(), MonoType::unknown()] {
            assert!(!typ.is_truthy() && !typ.is_falsy(), "{typ}");
        }
    }

    #[test]
    fn displays_like_source_types() {
        let fun = MonoType::function(vec![MonoType::number()], MonoType::singleton("a"));
        assert_eq!(fun.to_string(), "(number) => 'a'");
        assert_eq!(MonoType::singleton(1.5).to_string(), "1.5");
        assert_eq!(MonoType::singleton(2.0).to_string(), "2");
        assert_eq!(object(&[]).to_string(), "{}");
    }
}
