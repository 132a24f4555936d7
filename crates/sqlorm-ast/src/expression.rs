//! Expression AST nodes
//!
//! `Expression` is the closed set of node shapes a query projection can be
//! built from. Every variant carries exactly the data its typing rule needs.

use std::fmt;
use std::sync::Arc;

use crate::{
    Accessor, AliasColumnExpr, ArithmeticOp, AsteriskTarget, BitwiseOp, BoxExpr, ColumnAlias,
    ColumnPointer, ColumnPointerTarget, CompoundExpr, CompoundOp, ConditionOp, FunctionKind,
    Literal, MemberPointer, ObjectType, OptBoxExpr, RelationName, RowIdExpr, RowIdKind, Select,
    TableAlias, TypeSpecifier,
};

/// All expression node shapes
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    // === Literals ===
    /// Literal value (null, arithmetic primitive, text, blob)
    Literal(Literal),

    // === Column References ===
    /// Member pointer into a mapped object (`&User::id`)
    Column(MemberPointer),
    /// Getter or setter mapped onto a column
    Accessor(Accessor),
    /// Column qualified by a table alias
    AliasColumn(AliasColumnExpr),
    /// Column pointer into a named relation
    ColumnPointer(ColumnPointer),
    /// `rowid`, `oid`, `_rowid_` and their table-qualified forms
    RowId(RowIdExpr),
    /// Whole mapped object
    Object(ObjectType),
    /// Asterisk projection
    Asterisk(AsteriskTarget),

    // === Function Calls ===
    /// Built-in scalar or aggregate function
    Function(FunctionCall),
    /// Application-defined function
    UserFunction(UserFunctionCall),
    /// `COUNT(*)`
    CountAsterisk(CountAsteriskExpr),

    // === Operators ===
    /// Arithmetic binary operation
    Arithmetic(ArithmeticExpr),
    /// Bitwise binary operation
    Bitwise(BitwiseExpr),
    /// Bitwise not (`~x`)
    BitwiseNot(BoxExpr),
    /// String concatenation (`||`)
    Concat(ConcatExpr),
    /// Binary logical or relational condition with a declared result type
    Condition(ConditionExpr),
    /// `LIKE`
    Like(LikeExpr),
    /// `GLOB`
    Glob(GlobExpr),
    /// Negated condition (`NOT x`)
    Not(BoxExpr),
    /// Set membership (`IN`)
    In(InExpr),

    // === Type Operations ===
    /// `CAST(expr AS T)`
    Cast(CastExpr),
    /// `CASE ... END`
    Case(CaseExpr),

    // === Wrappers ===
    /// Aliased expression (`expr AS alias`)
    Alias(AliasExpr),
    /// `DISTINCT(expr)`
    Distinct(BoxExpr),
    /// `ALL(expr)`
    All(BoxExpr),
    /// Reference to an expression owned elsewhere
    Shared(Arc<Expression>),
    /// Request the result as an optional value
    AsOptional(BoxExpr),

    // === Queries ===
    /// Select statement used as an expression
    Select(Box<Select>),
    /// Compound select
    Compound(CompoundExpr),
    /// Top-level projection list
    Columns(Vec<Expression>),
}

// === Expression Components ===

/// Declared return type of a built-in function
#[derive(Debug, Clone, PartialEq)]
pub enum ReturnType {
    /// Fixed declared type
    Declared(TypeSpecifier),
    /// Nullable wrapper of the first argument's type (`MAX(x)` over no rows is NULL)
    NullableOfArgument,
}

/// Built-in function call
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    /// SQL function name
    pub name: String,
    /// Scalar or aggregate
    pub kind: FunctionKind,
    /// Declared return type
    pub return_type: ReturnType,
    /// Arguments
    pub args: Vec<Expression>,
}

impl FunctionCall {
    pub fn scalar(name: impl Into<String>, return_type: ReturnType, args: Vec<Expression>) -> Self {
        Self {
            name: name.into(),
            kind: FunctionKind::Scalar,
            return_type,
            args,
        }
    }

    pub fn aggregate(name: impl Into<String>, return_type: ReturnType, args: Vec<Expression>) -> Self {
        Self {
            name: name.into(),
            kind: FunctionKind::Aggregate,
            return_type,
            args,
        }
    }
}

/// Application-defined function call
#[derive(Debug, Clone, PartialEq)]
pub struct UserFunctionCall {
    /// Registered function name
    pub name: String,
    /// Statically declared return type of the callable
    pub return_type: TypeSpecifier,
    /// Arguments
    pub args: Vec<Expression>,
}

/// `COUNT(*)`, optionally bound to an object type
#[derive(Debug, Clone, PartialEq)]
pub struct CountAsteriskExpr {
    pub object: Option<ObjectType>,
}

/// Arithmetic binary operation
#[derive(Debug, Clone, PartialEq)]
pub struct ArithmeticExpr {
    pub left: BoxExpr,
    pub op: ArithmeticOp,
    pub right: BoxExpr,
}

/// Bitwise binary operation
#[derive(Debug, Clone, PartialEq)]
pub struct BitwiseExpr {
    pub left: BoxExpr,
    pub op: BitwiseOp,
    pub right: BoxExpr,
}

/// String concatenation
#[derive(Debug, Clone, PartialEq)]
pub struct ConcatExpr {
    pub left: BoxExpr,
    pub right: BoxExpr,
}

/// Binary condition
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionExpr {
    /// Left operand
    pub left: BoxExpr,
    /// Operator
    pub op: ConditionOp,
    /// Right operand
    pub right: BoxExpr,
    /// Declared result type, `bool` unless stated otherwise
    pub result_type: TypeSpecifier,
}

impl ConditionExpr {
    pub fn new(op: ConditionOp, left: Expression, right: Expression) -> Self {
        Self {
            left: Box::new(left),
            op,
            right: Box::new(right),
            result_type: TypeSpecifier::boolean(),
        }
    }

    pub fn with_result_type(mut self, result_type: TypeSpecifier) -> Self {
        self.result_type = result_type;
        self
    }
}

/// `LIKE` with optional `ESCAPE`
#[derive(Debug, Clone, PartialEq)]
pub struct LikeExpr {
    pub operand: BoxExpr,
    pub pattern: BoxExpr,
    pub escape: OptBoxExpr,
}

/// `GLOB`
#[derive(Debug, Clone, PartialEq)]
pub struct GlobExpr {
    pub operand: BoxExpr,
    pub pattern: BoxExpr,
}

/// Set membership
#[derive(Debug, Clone, PartialEq)]
pub struct InExpr {
    /// Tested expression
    pub operand: BoxExpr,
    /// Candidate values
    pub values: InValues,
    /// `NOT IN`
    pub negated: bool,
}

/// Right-hand side of `IN`
#[derive(Debug, Clone, PartialEq)]
pub enum InValues {
    /// Fixed value list
    List(Vec<Expression>),
    /// Subquery or other dynamic set
    Dynamic(BoxExpr),
}

/// `CAST(expr AS T)`
#[derive(Debug, Clone, PartialEq)]
pub struct CastExpr {
    /// Expression to cast
    pub operand: BoxExpr,
    /// Target type
    pub as_type: TypeSpecifier,
}

/// `CASE` expression with a declared result type
#[derive(Debug, Clone, PartialEq)]
pub struct CaseExpr {
    /// Declared result type of every `THEN`/`ELSE` branch
    pub result_type: TypeSpecifier,
    /// Comparand (for simple case)
    pub operand: OptBoxExpr,
    /// When-then pairs
    pub branches: Vec<CaseBranch>,
    /// Else expression
    pub else_expr: OptBoxExpr,
}

/// Case branch (when-then pair)
#[derive(Debug, Clone, PartialEq)]
pub struct CaseBranch {
    pub when: Expression,
    pub then: Expression,
}

/// Aliased expression
#[derive(Debug, Clone, PartialEq)]
pub struct AliasExpr {
    /// Column alias
    pub alias: ColumnAlias,
    /// Aliased expression
    pub expression: BoxExpr,
}

// === Constructors ===

impl Expression {
    pub fn literal(value: impl Into<Literal>) -> Self {
        Self::Literal(value.into())
    }

    pub fn null() -> Self {
        Self::Literal(Literal::Null)
    }

    pub fn column(member: MemberPointer) -> Self {
        Self::Column(member)
    }

    pub fn accessor(accessor: Accessor) -> Self {
        Self::Accessor(accessor)
    }

    pub fn alias_column(alias: impl Into<TableAlias>, column: Expression) -> Self {
        Self::AliasColumn(AliasColumnExpr {
            alias: alias.into(),
            column: Box::new(column),
        })
    }

    /// Column of a named relation at a position
    pub fn relation_index(relation: impl Into<RelationName>, index: usize) -> Self {
        Self::ColumnPointer(ColumnPointer::new(relation, ColumnPointerTarget::Index(index)))
    }

    /// Column of a named relation designated by a mapped member pointer
    pub fn relation_member(relation: impl Into<RelationName>, member: MemberPointer) -> Self {
        Self::ColumnPointer(ColumnPointer::new(relation, ColumnPointerTarget::Member(member)))
    }

    /// Column of a named relation designated by a column alias
    pub fn relation_alias(relation: impl Into<RelationName>, alias: impl Into<ColumnAlias>) -> Self {
        Self::ColumnPointer(ColumnPointer::new(relation, ColumnPointerTarget::Alias(alias.into())))
    }

    pub fn rowid(kind: RowIdKind, table: Option<ObjectType>) -> Self {
        Self::RowId(RowIdExpr { kind, table })
    }

    pub fn object(object: impl Into<ObjectType>) -> Self {
        Self::Object(object.into())
    }

    pub fn asterisk(object: impl Into<ObjectType>) -> Self {
        Self::Asterisk(AsteriskTarget::Object(object.into()))
    }

    pub fn asterisk_of_alias(alias: impl Into<TableAlias>) -> Self {
        Self::Asterisk(AsteriskTarget::Alias(alias.into()))
    }

    pub fn function(call: FunctionCall) -> Self {
        Self::Function(call)
    }

    pub fn user_function(name: impl Into<String>, return_type: TypeSpecifier, args: Vec<Expression>) -> Self {
        Self::UserFunction(UserFunctionCall {
            name: name.into(),
            return_type,
            args,
        })
    }

    pub fn count_asterisk(object: Option<ObjectType>) -> Self {
        Self::CountAsterisk(CountAsteriskExpr { object })
    }

    pub fn arithmetic(op: ArithmeticOp, left: Expression, right: Expression) -> Self {
        Self::Arithmetic(ArithmeticExpr {
            left: Box::new(left),
            op,
            right: Box::new(right),
        })
    }

    pub fn bitwise(op: BitwiseOp, left: Expression, right: Expression) -> Self {
        Self::Bitwise(BitwiseExpr {
            left: Box::new(left),
            op,
            right: Box::new(right),
        })
    }

    pub fn bitwise_not(operand: Expression) -> Self {
        Self::BitwiseNot(Box::new(operand))
    }

    pub fn concat(left: Expression, right: Expression) -> Self {
        Self::Concat(ConcatExpr {
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn condition(op: ConditionOp, left: Expression, right: Expression) -> Self {
        Self::Condition(ConditionExpr::new(op, left, right))
    }

    pub fn eq(left: Expression, right: Expression) -> Self {
        Self::condition(ConditionOp::Equal, left, right)
    }

    pub fn and(left: Expression, right: Expression) -> Self {
        Self::condition(ConditionOp::And, left, right)
    }

    pub fn like(operand: Expression, pattern: Expression, escape: Option<Expression>) -> Self {
        Self::Like(LikeExpr {
            operand: Box::new(operand),
            pattern: Box::new(pattern),
            escape: escape.map(Box::new),
        })
    }

    pub fn glob(operand: Expression, pattern: Expression) -> Self {
        Self::Glob(GlobExpr {
            operand: Box::new(operand),
            pattern: Box::new(pattern),
        })
    }

    pub fn not(operand: Expression) -> Self {
        Self::Not(Box::new(operand))
    }

    pub fn in_list(operand: Expression, values: Vec<Expression>) -> Self {
        Self::In(InExpr {
            operand: Box::new(operand),
            values: InValues::List(values),
            negated: false,
        })
    }

    pub fn in_dynamic(operand: Expression, set: Expression) -> Self {
        Self::In(InExpr {
            operand: Box::new(operand),
            values: InValues::Dynamic(Box::new(set)),
            negated: false,
        })
    }

    pub fn cast(as_type: TypeSpecifier, operand: Expression) -> Self {
        Self::Cast(CastExpr {
            operand: Box::new(operand),
            as_type,
        })
    }

    pub fn alias(alias: impl Into<ColumnAlias>, expression: Expression) -> Self {
        Self::Alias(AliasExpr {
            alias: alias.into(),
            expression: Box::new(expression),
        })
    }

    pub fn distinct(operand: Expression) -> Self {
        Self::Distinct(Box::new(operand))
    }

    pub fn all(operand: Expression) -> Self {
        Self::All(Box::new(operand))
    }

    pub fn shared(expression: Arc<Expression>) -> Self {
        Self::Shared(expression)
    }

    pub fn as_optional(operand: Expression) -> Self {
        Self::AsOptional(Box::new(operand))
    }

    pub fn select(select: Select) -> Self {
        Self::Select(Box::new(select))
    }

    pub fn compound(op: CompoundOp, left: Expression, right: Expression) -> Self {
        Self::Compound(CompoundExpr {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn union(left: Expression, right: Expression) -> Self {
        Self::compound(CompoundOp::Union, left, right)
    }

    pub fn columns(items: Vec<Expression>) -> Self {
        Self::Columns(items)
    }

    /// Short name of the node shape, used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Literal(_) => "literal",
            Self::Column(_) => "column",
            Self::Accessor(_) => "accessor",
            Self::AliasColumn(_) => "alias_column",
            Self::ColumnPointer(_) => "column_pointer",
            Self::RowId(_) => "rowid",
            Self::Object(_) => "object",
            Self::Asterisk(_) => "asterisk",
            Self::Function(_) => "function",
            Self::UserFunction(_) => "user_function",
            Self::CountAsterisk(_) => "count_asterisk",
            Self::Arithmetic(_) => "arithmetic",
            Self::Bitwise(_) => "bitwise",
            Self::BitwiseNot(_) => "bitwise_not",
            Self::Concat(_) => "concat",
            Self::Condition(_) => "condition",
            Self::Like(_) => "like",
            Self::Glob(_) => "glob",
            Self::Not(_) => "not",
            Self::In(_) => "in",
            Self::Cast(_) => "cast",
            Self::Case(_) => "case",
            Self::Alias(_) => "alias",
            Self::Distinct(_) => "distinct",
            Self::All(_) => "all",
            Self::Shared(_) => "shared",
            Self::AsOptional(_) => "as_optional",
            Self::Select(_) => "select",
            Self::Compound(_) => "compound",
            Self::Columns(_) => "columns",
        }
    }
}

impl From<Literal> for Expression {
    fn from(literal: Literal) -> Self {
        Self::Literal(literal)
    }
}

impl From<MemberPointer> for Expression {
    fn from(member: MemberPointer) -> Self {
        Self::Column(member)
    }
}

impl From<Select> for Expression {
    fn from(select: Select) -> Self {
        Self::select(select)
    }
}

// === Rendering ===

fn write_list(f: &mut fmt::Formatter<'_>, items: &[Expression]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(literal) => write!(f, "{}", literal),
            Self::Column(member) => write!(f, "{}", member),
            Self::Accessor(accessor) => write!(f, "{}.{}", accessor.owner, accessor.name),
            Self::AliasColumn(column) => write!(f, "{}.{}", column.alias, column.column),
            Self::ColumnPointer(pointer) => write!(f, "{}", pointer),
            Self::RowId(rowid) => write!(f, "{}", rowid),
            Self::Object(object) => write!(f, "{}", object),
            Self::Asterisk(target) => write!(f, "{}", target),
            Self::Function(call) => {
                write!(f, "{}(", call.name.to_uppercase())?;
                write_list(f, &call.args)?;
                write!(f, ")")
            }
            Self::UserFunction(call) => {
                write!(f, "{}(", call.name)?;
                write_list(f, &call.args)?;
                write!(f, ")")
            }
            Self::CountAsterisk(_) => write!(f, "COUNT(*)"),
            Self::Arithmetic(e) => write!(f, "({} {} {})", e.left, e.op.symbol(), e.right),
            Self::Bitwise(e) => write!(f, "({} {} {})", e.left, e.op.symbol(), e.right),
            Self::BitwiseNot(operand) => write!(f, "~{}", operand),
            Self::Concat(e) => write!(f, "({} || {})", e.left, e.right),
            Self::Condition(e) => write!(f, "({} {} {})", e.left, e.op.symbol(), e.right),
            Self::Like(e) => {
                write!(f, "{} LIKE {}", e.operand, e.pattern)?;
                if let Some(escape) = &e.escape {
                    write!(f, " ESCAPE {}", escape)?;
                }
                Ok(())
            }
            Self::Glob(e) => write!(f, "{} GLOB {}", e.operand, e.pattern),
            Self::Not(operand) => write!(f, "NOT {}", operand),
            Self::In(e) => {
                let keyword = if e.negated { "NOT IN" } else { "IN" };
                write!(f, "{} {} (", e.operand, keyword)?;
                match &e.values {
                    InValues::List(values) => write_list(f, values)?,
                    InValues::Dynamic(set) => write!(f, "{}", set)?,
                }
                write!(f, ")")
            }
            Self::Cast(e) => write!(f, "CAST({} AS {})", e.operand, e.as_type),
            Self::Case(e) => {
                write!(f, "CASE")?;
                if let Some(operand) = &e.operand {
                    write!(f, " {}", operand)?;
                }
                for branch in &e.branches {
                    write!(f, " WHEN {} THEN {}", branch.when, branch.then)?;
                }
                if let Some(else_expr) = &e.else_expr {
                    write!(f, " ELSE {}", else_expr)?;
                }
                write!(f, " END")
            }
            Self::Alias(e) => write!(f, "{} AS {}", e.expression, e.alias),
            Self::Distinct(operand) => write!(f, "DISTINCT {}", operand),
            Self::All(operand) => write!(f, "ALL {}", operand),
            Self::Shared(inner) => write!(f, "{}", inner),
            Self::AsOptional(inner) => write!(f, "{}", inner),
            Self::Select(select) => write!(f, "{}", select),
            Self::Compound(compound) => write!(f, "{}", compound),
            Self::Columns(items) => write_list(f, items),
        }
    }
}
