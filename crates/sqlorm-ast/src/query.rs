//! Select and compound select nodes

use std::fmt;

use crate::{BoxExpr, CompoundOp, Expression, ObjectType};

/// A select statement used as an expression (subquery or compound arm)
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    /// Projection: a single expression or `Expression::Columns`
    pub columns: Expression,
    /// `SELECT DISTINCT`
    pub distinct: bool,
    /// Explicit `FROM` objects
    pub from: Vec<ObjectType>,
    /// `WHERE` conditions, joined with `AND`
    pub conditions: Vec<Expression>,
}

impl Select {
    /// Create a select over the given projection
    pub fn new(columns: Expression) -> Self {
        Self {
            columns,
            distinct: false,
            from: Vec::new(),
            conditions: Vec::new(),
        }
    }

    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    pub fn from(mut self, object: impl Into<ObjectType>) -> Self {
        self.from.push(object.into());
        self
    }

    pub fn filter(mut self, condition: Expression) -> Self {
        self.conditions.push(condition);
        self
    }
}

impl fmt::Display for Select {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SELECT ")?;
        if self.distinct {
            write!(f, "DISTINCT ")?;
        }
        write!(f, "{}", self.columns)?;
        if !self.from.is_empty() {
            let from: Vec<String> = self.from.iter().map(|o| o.to_string()).collect();
            write!(f, " FROM {}", from.join(", "))?;
        }
        for (i, condition) in self.conditions.iter().enumerate() {
            let keyword = if i == 0 { "WHERE" } else { "AND" };
            write!(f, " {} {}", keyword, condition)?;
        }
        Ok(())
    }
}

/// Compound select (`UNION`, `UNION ALL`, `INTERSECT`, `EXCEPT`)
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundExpr {
    /// Operator
    pub op: CompoundOp,
    /// Left arm
    pub left: BoxExpr,
    /// Right arm
    pub right: BoxExpr,
}

impl fmt::Display for CompoundExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.op.keyword(), self.right)
    }
}
