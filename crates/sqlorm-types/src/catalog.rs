//! Schema context consumed by the resolver
//!
//! The catalog that owns object mappings and named relations lives outside
//! this crate. The resolver only needs the three read-only lookups below.

use serde::{Deserialize, Serialize};
use sqlorm_ast::{Expression, ObjectType, RelationName, TableAlias};
use std::sync::Arc;

use crate::SemanticType;

/// One mapped column of an object type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column (field) name
    pub name: String,
    /// Mapped host type of the column
    #[serde(rename = "type")]
    pub column_type: SemanticType,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, column_type: SemanticType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }
}

/// Read-only catalog lookups used during resolution
///
/// Implementations must present a consistent, finalized schema for as long as
/// a borrow is held; the resolver never writes through this interface.
pub trait SchemaContext {
    /// Ordered mapped columns of an object type
    fn columns_of(&self, object: &ObjectType) -> Option<&[ColumnDescriptor]>;

    /// Ordered internal projection list of a named relation (CTE or view)
    fn relation_expressions(&self, relation: &RelationName) -> Option<&[Expression]>;

    /// Object type a table alias stands for
    fn underlying_object_type(&self, alias: &TableAlias) -> Option<&ObjectType>;
}

impl<T: SchemaContext + ?Sized> SchemaContext for &T {
    fn columns_of(&self, object: &ObjectType) -> Option<&[ColumnDescriptor]> {
        (**self).columns_of(object)
    }

    fn relation_expressions(&self, relation: &RelationName) -> Option<&[Expression]> {
        (**self).relation_expressions(relation)
    }

    fn underlying_object_type(&self, alias: &TableAlias) -> Option<&ObjectType> {
        (**self).underlying_object_type(alias)
    }
}

impl<T: SchemaContext + ?Sized> SchemaContext for Arc<T> {
    fn columns_of(&self, object: &ObjectType) -> Option<&[ColumnDescriptor]> {
        (**self).columns_of(object)
    }

    fn relation_expressions(&self, relation: &RelationName) -> Option<&[Expression]> {
        (**self).relation_expressions(relation)
    }

    fn underlying_object_type(&self, alias: &TableAlias) -> Option<&ObjectType> {
        (**self).underlying_object_type(alias)
    }
}

/// Schema context with no mapped objects and no relations
///
/// Enough for projections that never consult the catalog (literals,
/// operators, declared function results).
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptySchema;

impl SchemaContext for EmptySchema {
    fn columns_of(&self, _object: &ObjectType) -> Option<&[ColumnDescriptor]> {
        None
    }

    fn relation_expressions(&self, _relation: &RelationName) -> Option<&[Expression]> {
        None
    }

    fn underlying_object_type(&self, _alias: &TableAlias) -> Option<&ObjectType> {
        None
    }
}
