//! Operators that appear in query expressions

use serde::{Deserialize, Serialize};

/// Arithmetic binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArithmeticOp {
    /// Addition
    Add,
    /// Subtraction
    Subtract,
    /// Multiplication
    Multiply,
    /// Division
    Divide,
    /// Modulo
    Modulo,
}

impl ArithmeticOp {
    /// Get the operator symbol
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
        }
    }
}

/// Bitwise binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BitwiseOp {
    /// Shift left
    ShiftLeft,
    /// Shift right
    ShiftRight,
    /// Bitwise and
    And,
    /// Bitwise or
    Or,
}

impl BitwiseOp {
    /// Get the operator symbol
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::ShiftLeft => "<<",
            Self::ShiftRight => ">>",
            Self::And => "&",
            Self::Or => "|",
        }
    }
}

/// Binary condition operators (logical connectives and comparisons)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionOp {
    /// Logical and
    And,
    /// Logical or
    Or,
    /// Equality
    Equal,
    /// Inequality
    NotEqual,
    /// Less than
    Less,
    /// Less than or equal
    LessOrEqual,
    /// Greater than
    Greater,
    /// Greater than or equal
    GreaterOrEqual,
    /// `IS`
    Is,
    /// `IS NOT`
    IsNot,
}

impl ConditionOp {
    /// Check if this is a logical connective
    pub const fn is_logical(&self) -> bool {
        matches!(self, Self::And | Self::Or)
    }

    /// Check if this is a comparison operator
    pub const fn is_comparison(&self) -> bool {
        !self.is_logical()
    }

    /// Get the operator symbol
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
            Self::Equal => "=",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::LessOrEqual => "<=",
            Self::Greater => ">",
            Self::GreaterOrEqual => ">=",
            Self::Is => "IS",
            Self::IsNot => "IS NOT",
        }
    }
}

/// Compound select operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompoundOp {
    /// `UNION`
    Union,
    /// `UNION ALL`
    UnionAll,
    /// `INTERSECT`
    Intersect,
    /// `EXCEPT`
    Except,
}

impl CompoundOp {
    /// Get the SQL keyword
    pub const fn keyword(&self) -> &'static str {
        match self {
            Self::Union => "UNION",
            Self::UnionAll => "UNION ALL",
            Self::Intersect => "INTERSECT",
            Self::Except => "EXCEPT",
        }
    }
}

/// Built-in function flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FunctionKind {
    /// Scalar function (`LENGTH`, `ABS`, ...)
    Scalar,
    /// Aggregate function (`SUM`, `MAX`, ...)
    Aggregate,
}

/// Implicit row id column spelling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RowIdKind {
    /// `rowid`
    RowId,
    /// `oid`
    Oid,
    /// `_rowid_`
    UnderscoreRowId,
}

impl RowIdKind {
    /// Get the column name
    pub const fn column_name(&self) -> &'static str {
        match self {
            Self::RowId => "rowid",
            Self::Oid => "oid",
            Self::UnderscoreRowId => "_rowid_",
        }
    }
}
