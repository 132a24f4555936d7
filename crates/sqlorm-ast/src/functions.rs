//! Built-in SQLite function constructors
//!
//! Each constructor fixes the declared return type the builder attaches to
//! the call. Aggregates that yield NULL over an empty set (`MAX`, `MIN`,
//! `SUM`) declare the nullable form of their argument type.

use crate::{Expression, FunctionCall, ObjectType, ReturnType, TypeSpecifier};

fn aggregate(name: &str, return_type: ReturnType, args: Vec<Expression>) -> Expression {
    Expression::Function(FunctionCall::aggregate(name, return_type, args))
}

fn scalar(name: &str, return_type: ReturnType, args: Vec<Expression>) -> Expression {
    Expression::Function(FunctionCall::scalar(name, return_type, args))
}

/// `COUNT(x)`
pub fn count(arg: Expression) -> Expression {
    aggregate("count", ReturnType::Declared(TypeSpecifier::integer()), vec![arg])
}

/// `COUNT(*)`, optionally bound to the table of an object type
pub fn count_asterisk(object: Option<ObjectType>) -> Expression {
    Expression::count_asterisk(object)
}

/// `AVG(x)`
pub fn avg(arg: Expression) -> Expression {
    aggregate("avg", ReturnType::Declared(TypeSpecifier::double()), vec![arg])
}

/// `SUM(x)`
pub fn sum(arg: Expression) -> Expression {
    aggregate("sum", ReturnType::NullableOfArgument, vec![arg])
}

/// `TOTAL(x)`
pub fn total(arg: Expression) -> Expression {
    aggregate("total", ReturnType::Declared(TypeSpecifier::double()), vec![arg])
}

/// `MAX(x)`
pub fn max(arg: Expression) -> Expression {
    aggregate("max", ReturnType::NullableOfArgument, vec![arg])
}

/// `MIN(x)`
pub fn min(arg: Expression) -> Expression {
    aggregate("min", ReturnType::NullableOfArgument, vec![arg])
}

/// `GROUP_CONCAT(x)` or `GROUP_CONCAT(x, separator)`
pub fn group_concat(arg: Expression, separator: Option<Expression>) -> Expression {
    let mut args = vec![arg];
    args.extend(separator);
    aggregate("group_concat", ReturnType::Declared(TypeSpecifier::text()), args)
}

/// `LENGTH(x)`
pub fn length(arg: Expression) -> Expression {
    scalar("length", ReturnType::Declared(TypeSpecifier::integer()), vec![arg])
}

/// `ABS(x)`
pub fn abs(arg: Expression) -> Expression {
    scalar(
        "abs",
        ReturnType::Declared(TypeSpecifier::nullable(TypeSpecifier::double())),
        vec![arg],
    )
}

/// `LOWER(x)`
pub fn lower(arg: Expression) -> Expression {
    scalar("lower", ReturnType::Declared(TypeSpecifier::text()), vec![arg])
}

/// `UPPER(x)`
pub fn upper(arg: Expression) -> Expression {
    scalar("upper", ReturnType::Declared(TypeSpecifier::text()), vec![arg])
}

/// `COALESCE(x, y, ...)`, typed as the nullable form of its first argument
pub fn coalesce(args: Vec<Expression>) -> Expression {
    scalar("coalesce", ReturnType::NullableOfArgument, args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FunctionKind, MemberPointer};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_aggregate_return_types() {
        let id = Expression::column(MemberPointer::field("User", "id", TypeSpecifier::integer()));

        let Expression::Function(call) = max(id.clone()) else {
            panic!("expected function call");
        };
        assert_eq!(call.kind, FunctionKind::Aggregate);
        assert_eq!(call.return_type, ReturnType::NullableOfArgument);

        let Expression::Function(call) = count(id) else {
            panic!("expected function call");
        };
        assert_eq!(call.return_type, ReturnType::Declared(TypeSpecifier::integer()));
    }

    #[test]
    fn test_group_concat_separator() {
        let name = Expression::literal("a");
        assert_eq!(
            group_concat(name.clone(), Some(Expression::literal(";"))).to_string(),
            "GROUP_CONCAT('a', ';')"
        );
        assert_eq!(group_concat(name, None).to_string(), "GROUP_CONCAT('a')");
    }
}
