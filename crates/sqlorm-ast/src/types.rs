//! Type specifier AST nodes
//!
//! Declared types travel through the tree in syntactic form: a cast target,
//! the result type of a `CASE`, the return type of a function, the field type
//! behind a member pointer. The resolver turns them into semantic types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type specifier carried by expression nodes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeSpecifier {
    /// Named type (e.g., "i32", "INTEGER", "String", "Person")
    Named(NamedTypeSpecifier),
    /// Nullable type (e.g., "Option<i32>")
    Nullable(Box<TypeSpecifier>),
    /// Fixed-arity tuple of types
    Tuple(Vec<TypeSpecifier>),
}

impl TypeSpecifier {
    /// Create a named type specifier
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(NamedTypeSpecifier::new(name))
    }

    /// Create a nullable type specifier
    pub fn nullable(inner: TypeSpecifier) -> Self {
        Self::Nullable(Box::new(inner))
    }

    /// Create a tuple type specifier
    pub fn tuple(elements: Vec<TypeSpecifier>) -> Self {
        Self::Tuple(elements)
    }

    pub fn boolean() -> Self {
        Self::named("bool")
    }

    pub fn integer() -> Self {
        Self::named("i32")
    }

    pub fn int64() -> Self {
        Self::named("i64")
    }

    pub fn double() -> Self {
        Self::named("f64")
    }

    pub fn text() -> Self {
        Self::named("String")
    }
}

impl fmt::Display for TypeSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(named) => write!(f, "{}", named.name),
            Self::Nullable(inner) => write!(f, "Option<{}>", inner),
            Self::Tuple(elements) => {
                write!(f, "(")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", element)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Named type specifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamedTypeSpecifier {
    /// Type name
    pub name: String,
}

impl NamedTypeSpecifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl From<&str> for NamedTypeSpecifier {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<&str> for TypeSpecifier {
    fn from(s: &str) -> Self {
        Self::named(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_specifier_display() {
        assert_eq!(TypeSpecifier::integer().to_string(), "i32");
        assert_eq!(
            TypeSpecifier::nullable(TypeSpecifier::text()).to_string(),
            "Option<String>"
        );
        assert_eq!(
            TypeSpecifier::tuple(vec![TypeSpecifier::int64(), TypeSpecifier::double()]).to_string(),
            "(i64, f64)"
        );
    }
}
