//! Static result-type resolution
//!
//! This module computes, without executing anything, the host type a query
//! produces for each projection item. It provides:
//! - Literal, operator and function result rules
//! - Pass-through rules for aliases and wrappers
//! - Named-relation lookups through the schema context
//! - Cross-branch consistency for compound selects

use log::{debug, trace};
use smallvec::SmallVec;
use sqlorm_ast::{
    AsteriskTarget, ColumnPointer, ColumnPointerTarget, Expression, Literal, MemberKind,
    ObjectType, RelationName, ReturnType,
};
use sqlorm_diagnostics::{
    ErrorBuilder, ErrorCode, OrmError, ORM0100, ORM0101, ORM0102, ORM0103, ORM0104, ORM0105,
    ORM0106, ORM0107, ORM0108,
};
use thiserror::Error;

use crate::{SchemaContext, SemanticType};

/// Result-type resolution errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// No expression of a named relation matches the requested member or alias
    #[error("Unmapped member '{member}' in relation '{relation}'")]
    UnmappedMember {
        relation: String,
        member: String,
        node: String,
    },

    /// Compound select arms resolve to different types
    #[error("Incompatible branch types: {left} and {right}")]
    IncompatibleBranchTypes {
        left: String,
        right: String,
        node: String,
    },

    /// Member pointer designates a member function
    #[error("'{member}' is not a data field")]
    NotAField { member: String },

    /// Object type has no mapped columns in the schema
    #[error("Unknown object type: {object}")]
    UnknownObjectType { object: String, node: String },

    /// Named relation is not registered in the schema
    #[error("Unknown relation: {relation}")]
    UnknownRelation { relation: String, node: String },

    /// Table alias is not registered in the schema
    #[error("Unknown table alias: {alias}")]
    UnknownAlias { alias: String, node: String },

    /// Positional column pointer past the end of the relation
    #[error("Column index {index} out of range for relation '{relation}' with {len} columns")]
    ColumnIndexOutOfRange {
        relation: String,
        index: usize,
        len: usize,
        node: String,
    },

    /// Nullable-of-argument function called without arguments
    #[error("Function '{function}' requires an argument to determine its result type")]
    MissingArgument { function: String, node: String },

    /// Relation column refers back to itself
    #[error("Cyclic reference to column {index} of relation '{relation}'")]
    CyclicRelation {
        relation: String,
        index: usize,
        node: String,
    },
}

impl ResolveError {
    /// Get the diagnostic code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::UnmappedMember { .. } => ORM0100,
            Self::IncompatibleBranchTypes { .. } => ORM0101,
            Self::NotAField { .. } => ORM0102,
            Self::UnknownObjectType { .. } => ORM0103,
            Self::UnknownRelation { .. } => ORM0104,
            Self::UnknownAlias { .. } => ORM0105,
            Self::ColumnIndexOutOfRange { .. } => ORM0106,
            Self::MissingArgument { .. } => ORM0107,
            Self::CyclicRelation { .. } => ORM0108,
        }
    }

    /// Rendering of the offending node
    pub fn node(&self) -> &str {
        match self {
            Self::NotAField { member } => member,
            Self::UnmappedMember { node, .. }
            | Self::IncompatibleBranchTypes { node, .. }
            | Self::UnknownObjectType { node, .. }
            | Self::UnknownRelation { node, .. }
            | Self::UnknownAlias { node, .. }
            | Self::ColumnIndexOutOfRange { node, .. }
            | Self::MissingArgument { node, .. }
            | Self::CyclicRelation { node, .. } => node,
        }
    }
}

impl From<ResolveError> for OrmError {
    fn from(err: ResolveError) -> Self {
        ErrorBuilder::new(err.code(), err.to_string())
            .node(err.node())
            .resolution()
    }
}

/// Resolution result
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Relation columns currently being resolved, innermost last
type RelationStack = SmallVec<[(RelationName, usize); 4]>;

/// Result-type resolver bound to one schema context
///
/// The resolver holds no state between calls; every call to
/// [`ColumnResolver::resolve`] is an independent pass.
#[derive(Clone, Copy)]
pub struct ColumnResolver<'a> {
    schema: &'a dyn SchemaContext,
}

impl<'a> ColumnResolver<'a> {
    /// Create a resolver over a schema context
    pub fn new(schema: &'a dyn SchemaContext) -> Self {
        Self { schema }
    }

    /// Get the schema context
    pub fn schema(&self) -> &'a dyn SchemaContext {
        self.schema
    }

    /// Resolve the result type of one expression
    pub fn resolve(&self, expr: &Expression) -> ResolveResult<SemanticType> {
        let mut stack = RelationStack::new();
        self.resolve_in(expr, &mut stack)
    }

    /// Resolve a projection list into a tuple with one element per item
    pub fn resolve_projection(&self, items: &[Expression]) -> ResolveResult<SemanticType> {
        let mut stack = RelationStack::new();
        self.resolve_all(items, &mut stack).map(SemanticType::Tuple)
    }

    /// Type of a literal
    pub fn resolve_literal(literal: &Literal) -> SemanticType {
        match literal {
            Literal::Null => SemanticType::Null,
            Literal::Boolean(_) => SemanticType::Boolean,
            Literal::Char(_) => SemanticType::Char,
            Literal::Int8(_) => SemanticType::Int8,
            Literal::Int16(_) => SemanticType::Int16,
            Literal::Int32(_) => SemanticType::Int32,
            Literal::Int64(_) => SemanticType::Int64,
            Literal::UInt8(_) => SemanticType::UInt8,
            Literal::UInt16(_) => SemanticType::UInt16,
            Literal::UInt32(_) => SemanticType::UInt32,
            Literal::UInt64(_) => SemanticType::UInt64,
            Literal::Float(_) => SemanticType::Float,
            Literal::Double(_) => SemanticType::Double,
            Literal::Text(_) => SemanticType::Text,
            Literal::Blob(_) => SemanticType::Blob,
            Literal::Optional { value_type, .. } => {
                SemanticType::nullable(SemanticType::from_specifier(value_type))
            }
        }
    }

    fn resolve_all(
        &self,
        items: &[Expression],
        stack: &mut RelationStack,
    ) -> ResolveResult<Vec<SemanticType>> {
        items.iter().map(|item| self.resolve_in(item, stack)).collect()
    }

    fn resolve_in(&self, expr: &Expression, stack: &mut RelationStack) -> ResolveResult<SemanticType> {
        trace!("resolving {} node: {}", expr.kind(), expr);

        match expr {
            Expression::Literal(literal) => Ok(Self::resolve_literal(literal)),

            // === Column References ===
            Expression::Column(member) => match &member.kind {
                MemberKind::Field(field_type) => Ok(SemanticType::from_specifier(field_type)),
                MemberKind::Function { .. } => Err(ResolveError::NotAField {
                    member: member.to_string(),
                }),
            },

            Expression::Accessor(accessor) => Ok(SemanticType::from_specifier(&accessor.field_type)),

            Expression::AliasColumn(column) => self.resolve_in(&column.column, stack),

            Expression::ColumnPointer(pointer) => self.resolve_column_pointer(pointer, stack),

            Expression::RowId(_) => Ok(SemanticType::Int64),

            Expression::Object(object) => Ok(SemanticType::Object(object.clone())),

            Expression::Asterisk(AsteriskTarget::Object(object)) => self.resolve_asterisk(object, expr),

            Expression::Asterisk(AsteriskTarget::Alias(alias)) => {
                let object = self.schema.underlying_object_type(alias).ok_or_else(|| {
                    ResolveError::UnknownAlias {
                        alias: alias.to_string(),
                        node: expr.to_string(),
                    }
                })?;
                debug!("table alias '{}' stands for '{}'", alias, object);
                self.resolve_asterisk(object, expr)
            }

            // === Function Calls ===
            Expression::Function(call) => match &call.return_type {
                ReturnType::Declared(return_type) => Ok(SemanticType::from_specifier(return_type)),
                ReturnType::NullableOfArgument => {
                    let first = call.args.first().ok_or_else(|| ResolveError::MissingArgument {
                        function: call.name.clone(),
                        node: expr.to_string(),
                    })?;
                    Ok(SemanticType::nullable(self.resolve_in(first, stack)?))
                }
            },

            Expression::UserFunction(call) => Ok(SemanticType::from_specifier(&call.return_type)),

            Expression::CountAsterisk(_) => Ok(SemanticType::Int32),

            // === Operators ===
            // SQLite promotes arithmetic dynamically; the declared result is always real.
            Expression::Arithmetic(_) => Ok(SemanticType::Double),

            Expression::Bitwise(_) | Expression::BitwiseNot(_) => Ok(SemanticType::Int32),

            Expression::Concat(_) => Ok(SemanticType::Text),

            Expression::Condition(condition) => Ok(SemanticType::from_specifier(&condition.result_type)),

            Expression::Like(_) | Expression::Glob(_) | Expression::Not(_) | Expression::In(_) => {
                Ok(SemanticType::Boolean)
            }

            // === Type Operations ===
            Expression::Cast(cast) => Ok(SemanticType::from_specifier(&cast.as_type)),

            Expression::Case(case) => Ok(SemanticType::from_specifier(&case.result_type)),

            // === Wrappers ===
            Expression::Alias(alias) => self.resolve_in(&alias.expression, stack),

            Expression::Distinct(inner) | Expression::All(inner) => self.resolve_in(inner, stack),

            Expression::Shared(inner) => self.resolve_in(inner, stack),

            Expression::AsOptional(inner) => Ok(SemanticType::nullable(self.resolve_in(inner, stack)?)),

            // === Queries ===
            Expression::Select(select) => self.resolve_in(&select.columns, stack),

            Expression::Compound(compound) => {
                let left = self.resolve_in(&compound.left, stack)?;
                let right = self.resolve_in(&compound.right, stack)?;
                if left != right {
                    return Err(ResolveError::IncompatibleBranchTypes {
                        left: left.to_string(),
                        right: right.to_string(),
                        node: expr.to_string(),
                    });
                }
                Ok(left)
            }

            Expression::Columns(items) => self.resolve_all(items, stack).map(SemanticType::Tuple),
        }
    }

    fn resolve_asterisk(&self, object: &ObjectType, expr: &Expression) -> ResolveResult<SemanticType> {
        let columns = self.schema.columns_of(object).ok_or_else(|| ResolveError::UnknownObjectType {
            object: object.to_string(),
            node: expr.to_string(),
        })?;
        debug!("'{}' maps {} columns", object, columns.len());
        Ok(SemanticType::Tuple(
            columns.iter().map(|column| column.column_type.clone()).collect(),
        ))
    }

    fn resolve_column_pointer(
        &self,
        pointer: &ColumnPointer,
        stack: &mut RelationStack,
    ) -> ResolveResult<SemanticType> {
        let relation = &pointer.relation;
        let lookup = || {
            self.schema
                .relation_expressions(relation)
                .ok_or_else(|| ResolveError::UnknownRelation {
                    relation: relation.to_string(),
                    node: pointer.to_string(),
                })
        };

        let (expressions, index) = match &pointer.target {
            ColumnPointerTarget::Expression(inner) => return self.resolve_in(inner, stack),
            ColumnPointerTarget::Index(index) => {
                let expressions = lookup()?;
                if *index >= expressions.len() {
                    return Err(ResolveError::ColumnIndexOutOfRange {
                        relation: relation.to_string(),
                        index: *index,
                        len: expressions.len(),
                        node: pointer.to_string(),
                    });
                }
                (expressions, *index)
            }
            ColumnPointerTarget::Member(member) => {
                if member.is_function() {
                    return Err(ResolveError::NotAField {
                        member: member.to_string(),
                    });
                }
                let expressions = lookup()?;
                let index = expressions
                    .iter()
                    .position(|e| matches!(e, Expression::Column(column) if column.same_field(member)))
                    .ok_or_else(|| ResolveError::UnmappedMember {
                        relation: relation.to_string(),
                        member: member.to_string(),
                        node: pointer.to_string(),
                    })?;
                (expressions, index)
            }
            ColumnPointerTarget::Alias(alias) => {
                let expressions = lookup()?;
                let index = expressions
                    .iter()
                    .position(|e| matches!(e, Expression::Alias(aliased) if aliased.alias == *alias))
                    .ok_or_else(|| ResolveError::UnmappedMember {
                        relation: relation.to_string(),
                        member: alias.to_string(),
                        node: pointer.to_string(),
                    })?;
                (expressions, index)
            }
        };
        debug!("'{}' resolved to column {} of relation '{}'", pointer, index, relation);

        if stack.iter().any(|(name, i)| name == relation && *i == index) {
            return Err(ResolveError::CyclicRelation {
                relation: relation.to_string(),
                index,
                node: pointer.to_string(),
            });
        }

        stack.push((relation.clone(), index));
        let resolved = self.resolve_in(&expressions[index], stack);
        stack.pop();
        resolved
    }
}

/// Resolve the result type of one expression against a schema context
pub fn resolve_type(schema: &dyn SchemaContext, expr: &Expression) -> ResolveResult<SemanticType> {
    ColumnResolver::new(schema).resolve(expr)
}

/// Resolve a projection list into a tuple with one element per item
pub fn resolve_projection(schema: &dyn SchemaContext, items: &[Expression]) -> ResolveResult<SemanticType> {
    ColumnResolver::new(schema).resolve_projection(items)
}
