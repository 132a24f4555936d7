//! Column reference nodes: member pointers, accessors, column pointers into
//! named relations, row ids and asterisks

use std::fmt;

use crate::{BoxExpr, ColumnAlias, Expression, ObjectType, RelationName, RowIdKind, TableAlias, TypeSpecifier};

/// Pointer to a member of a mapped object type
#[derive(Debug, Clone, PartialEq)]
pub struct MemberPointer {
    /// Object type declaring the member
    pub owner: ObjectType,
    /// Member name
    pub name: String,
    /// Data field or member function
    pub kind: MemberKind,
}

impl MemberPointer {
    /// Pointer to a data field of the given declared type
    pub fn field(owner: impl Into<ObjectType>, name: impl Into<String>, field_type: TypeSpecifier) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            kind: MemberKind::Field(field_type),
        }
    }

    /// Pointer to a member function
    pub fn function(owner: impl Into<ObjectType>, name: impl Into<String>, return_type: TypeSpecifier) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            kind: MemberKind::Function { return_type },
        }
    }

    /// Check if this points to a member function
    pub fn is_function(&self) -> bool {
        matches!(self.kind, MemberKind::Function { .. })
    }

    /// Check if both pointers designate the same data field
    ///
    /// Only the owner and the member name identify a field; the declared
    /// type is not compared.
    pub fn same_field(&self, other: &MemberPointer) -> bool {
        !self.is_function() && !other.is_function() && self.owner == other.owner && self.name == other.name
    }
}

impl fmt::Display for MemberPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            MemberKind::Field(_) => write!(f, "{}.{}", self.owner, self.name),
            MemberKind::Function { .. } => write!(f, "{}.{}()", self.owner, self.name),
        }
    }
}

/// Kind of member a pointer designates
#[derive(Debug, Clone, PartialEq)]
pub enum MemberKind {
    /// Data field with its declared type
    Field(TypeSpecifier),
    /// Member function with its return type
    Function { return_type: TypeSpecifier },
}

/// Getter or setter mapped onto a column
#[derive(Debug, Clone, PartialEq)]
pub struct Accessor {
    /// Object type declaring the accessor
    pub owner: ObjectType,
    /// Accessor name
    pub name: String,
    /// Getter or setter
    pub kind: AccessorKind,
    /// Type of the field the accessor reads or writes
    pub field_type: TypeSpecifier,
}

impl Accessor {
    pub fn getter(owner: impl Into<ObjectType>, name: impl Into<String>, field_type: TypeSpecifier) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            kind: AccessorKind::Getter,
            field_type,
        }
    }

    pub fn setter(owner: impl Into<ObjectType>, name: impl Into<String>, field_type: TypeSpecifier) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            kind: AccessorKind::Setter,
            field_type,
        }
    }
}

/// Accessor flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessorKind {
    Getter,
    Setter,
}

/// Column qualified by a table alias (`u.name`)
#[derive(Debug, Clone, PartialEq)]
pub struct AliasColumnExpr {
    /// Table alias
    pub alias: TableAlias,
    /// Column expression
    pub column: BoxExpr,
}

/// Column pointer into a named relation (CTE or view)
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnPointer {
    /// Relation the column belongs to
    pub relation: RelationName,
    /// How the column is designated
    pub target: ColumnPointerTarget,
}

impl ColumnPointer {
    pub fn new(relation: impl Into<RelationName>, target: ColumnPointerTarget) -> Self {
        Self {
            relation: relation.into(),
            target,
        }
    }
}

/// Designation of a column inside a named relation
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnPointerTarget {
    /// Positional index into the relation's column list
    Index(usize),
    /// Member pointer constant mapped into the relation
    Member(MemberPointer),
    /// Column alias declared in the relation's column list
    Alias(ColumnAlias),
    /// Plain expression qualified by the relation; typed as the expression itself
    Expression(BoxExpr),
}

impl fmt::Display for ColumnPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.target {
            ColumnPointerTarget::Index(index) => write!(f, "{}.#{}", self.relation, index),
            ColumnPointerTarget::Member(member) => write!(f, "{}.{}", self.relation, member.name),
            ColumnPointerTarget::Alias(alias) => write!(f, "{}.{}", self.relation, alias),
            ColumnPointerTarget::Expression(expr) => write!(f, "{}.{}", self.relation, expr),
        }
    }
}

/// Implicit row id column, optionally qualified by its table
#[derive(Debug, Clone, PartialEq)]
pub struct RowIdExpr {
    /// Column spelling
    pub kind: RowIdKind,
    /// Owning table for the qualified forms
    pub table: Option<ObjectType>,
}

impl fmt::Display for RowIdExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.table {
            Some(table) => write!(f, "{}.{}", table, self.kind.column_name()),
            None => write!(f, "{}", self.kind.column_name()),
        }
    }
}

/// Target of an asterisk projection
#[derive(Debug, Clone, PartialEq)]
pub enum AsteriskTarget {
    /// All mapped columns of an object type
    Object(ObjectType),
    /// All mapped columns of the object type behind a table alias
    Alias(TableAlias),
}

impl fmt::Display for AsteriskTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Object(object) => write!(f, "{}.*", object),
            Self::Alias(alias) => write!(f, "{}.*", alias),
        }
    }
}
