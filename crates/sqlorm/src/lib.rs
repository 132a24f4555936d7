//! Static result-type resolution for sqlorm query expressions
//!
//! This crate ties the sqlorm pieces together:
//! - Expression trees describing query projections
//! - The schema catalog consulted for object and relation lookups
//! - Result-type resolution, computed before any query runs
//! - The serialization context handed to SQL renderers
//!
//! # Example
//!
//! ```
//! use sqlorm::{resolve, Expression, SchemaInfo, SemanticType};
//!
//! let schema = SchemaInfo::new();
//! let ty = resolve(&schema, &Expression::literal(42))?;
//! assert_eq!(ty, SemanticType::Int32);
//! # Ok::<(), sqlorm::OrmError>(())
//! ```

// Re-export all public APIs from internal crates
pub use sqlorm_ast as ast;
pub use sqlorm_diagnostics as diagnostics;
pub use sqlorm_schema as schema;
pub use sqlorm_serialize as serialize;
pub use sqlorm_types as types;

// Convenience re-exports
pub use sqlorm_ast::{functions, Expression, MemberPointer, ObjectType, TypeSpecifier};
pub use sqlorm_diagnostics::{OrmError, Result};
pub use sqlorm_schema::{RelationInfo, SchemaInfo, SchemaRegistry, TableInfo};
pub use sqlorm_serialize::{SerializationContext, SerializationContextBuilder, SerializationFlags};
pub use sqlorm_types::{ColumnResolver, SchemaContext, SemanticType};

/// Resolve the result type of one expression, reporting failures as [`OrmError`]
pub fn resolve(schema: &dyn SchemaContext, expr: &Expression) -> Result<SemanticType> {
    Ok(sqlorm_types::resolve_type(schema, expr)?)
}

/// Resolve a projection list into a tuple, reporting failures as [`OrmError`]
pub fn resolve_projection(schema: &dyn SchemaContext, items: &[Expression]) -> Result<SemanticType> {
    Ok(sqlorm_types::resolve_projection(schema, items)?)
}
