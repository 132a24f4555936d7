//! sqlorm expression tree definitions
//!
//! This crate defines the immutable expression nodes a query builder produces
//! for one query: projection items, operators, function calls, references into
//! mapped objects and named relations, and compound selects. The nodes are
//! pure descriptions; they are read by the result-type resolver and by
//! renderers, never mutated.

mod column;
mod expression;
pub mod functions;
mod literal;
mod operator;
mod query;
mod types;

pub use column::*;
pub use expression::*;
pub use literal::*;
pub use operator::*;
pub use query::*;
pub use types::*;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type alias for boxed expressions
pub type BoxExpr = Box<Expression>;

/// Type alias for optional boxed expressions
pub type OptBoxExpr = Option<Box<Expression>>;

macro_rules! identity {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(name: impl Into<String>) -> Self {
                Self(name.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

identity! {
    /// Identity of a mapped object type (a table-backed struct)
    ObjectType
}

identity! {
    /// Identity of a column alias introduced with `AS`
    ColumnAlias
}

identity! {
    /// Identity of a table alias (`FROM users u`)
    TableAlias
}

identity! {
    /// Identity of a named relation: a common table expression or a view
    RelationName
}
