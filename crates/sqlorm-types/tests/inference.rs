//! Result-type resolution tests
//!
//! Covers:
//! - Fixed rules for literals, operators and functions
//! - Pass-through wrappers and nullable collapsing
//! - Asterisk projections through object types and table aliases
//! - Column pointers into named relations (index, member, alias)
//! - Compound select consistency
//! - Algebraic properties over generated expression trees

use std::collections::HashMap;
use std::sync::Arc;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::{fixture, rstest};
use sqlorm_ast::{
    functions, Accessor, ArithmeticOp, BitwiseOp, CaseBranch, CaseExpr, ConditionOp, Expression,
    Literal, MemberPointer, ObjectType, RelationName, RowIdKind, Select, TableAlias, TypeSpecifier,
};
use sqlorm_types::{
    resolve_projection, resolve_type, ColumnDescriptor, ColumnResolver, ResolveError, SchemaContext,
    SemanticType,
};

#[derive(Default)]
struct TestSchema {
    tables: HashMap<ObjectType, Vec<ColumnDescriptor>>,
    aliases: HashMap<TableAlias, ObjectType>,
    relations: HashMap<RelationName, Vec<Expression>>,
}

impl TestSchema {
    fn table(mut self, name: &str, columns: &[(&str, SemanticType)]) -> Self {
        let columns = columns
            .iter()
            .map(|(column, ty)| ColumnDescriptor::new(*column, ty.clone()))
            .collect();
        self.tables.insert(ObjectType::from(name), columns);
        self
    }

    fn alias(mut self, alias: &str, object: &str) -> Self {
        self.aliases.insert(TableAlias::from(alias), ObjectType::from(object));
        self
    }

    fn relation(mut self, name: &str, expressions: Vec<Expression>) -> Self {
        self.relations.insert(RelationName::from(name), expressions);
        self
    }
}

impl SchemaContext for TestSchema {
    fn columns_of(&self, object: &ObjectType) -> Option<&[ColumnDescriptor]> {
        self.tables.get(object).map(Vec::as_slice)
    }

    fn relation_expressions(&self, relation: &RelationName) -> Option<&[Expression]> {
        self.relations.get(relation).map(Vec::as_slice)
    }

    fn underlying_object_type(&self, alias: &TableAlias) -> Option<&ObjectType> {
        self.aliases.get(alias)
    }
}

fn person_id() -> MemberPointer {
    MemberPointer::field("Person", "id", TypeSpecifier::integer())
}

fn person_name() -> MemberPointer {
    MemberPointer::field("Person", "name", TypeSpecifier::text())
}

fn person_age() -> MemberPointer {
    MemberPointer::field("Person", "age", TypeSpecifier::integer())
}

fn employee_name() -> MemberPointer {
    MemberPointer::field("Employee", "name", TypeSpecifier::text())
}

fn employee_id() -> MemberPointer {
    MemberPointer::field("Employee", "id", TypeSpecifier::int64())
}

fn test_schema() -> TestSchema {
    TestSchema::default()
        .table(
            "Person",
            &[("id", SemanticType::Int32), ("name", SemanticType::Text)],
        )
        .table(
            "Employee",
            &[
                ("id", SemanticType::Int64),
                ("name", SemanticType::Text),
                ("salary", SemanticType::nullable(SemanticType::Double)),
            ],
        )
        .alias("e", "Employee")
        .relation(
            "cte1",
            vec![Expression::alias("total", functions::sum(Expression::column(person_age())))],
        )
        .relation(
            "people",
            vec![
                Expression::column(person_id()),
                Expression::column(person_name()),
                Expression::alias("upper_name", functions::upper(Expression::column(person_name()))),
            ],
        )
        .relation("nested", vec![Expression::relation_alias("cte1", "total")])
        .relation("selfish", vec![Expression::relation_index("selfish", 0)])
        .relation("ping", vec![Expression::relation_index("pong", 0)])
        .relation("pong", vec![Expression::relation_index("ping", 0)])
}

#[fixture]
fn schema() -> TestSchema {
    test_schema()
}

// === Scenarios ===

#[rstest]
fn test_integer_literal_resolves_to_integer(schema: TestSchema) {
    assert_eq!(resolve_type(&schema, &Expression::literal(42)), Ok(SemanticType::Int32));
}

#[rstest]
fn test_alias_of_integer_field(schema: TestSchema) {
    let expr = Expression::alias("x", Expression::column(person_age()));
    assert_eq!(resolve_type(&schema, &expr), Ok(SemanticType::Int32));
}

#[rstest]
fn test_compound_arms_must_agree(schema: TestSchema) {
    let union = Expression::union(
        Expression::column(person_name()),
        Expression::column(employee_name()),
    );
    assert_eq!(resolve_type(&schema, &union), Ok(SemanticType::Text));

    let mismatch = Expression::union(
        Expression::column(person_name()),
        Expression::column(employee_id()),
    );
    let err = resolve_type(&schema, &mismatch).unwrap_err();
    assert_eq!(
        err,
        ResolveError::IncompatibleBranchTypes {
            left: "String".to_string(),
            right: "i64".to_string(),
            node: "Person.name UNION Employee.id".to_string(),
        }
    );
}

#[rstest]
fn test_asterisk_of_object_type(schema: TestSchema) {
    assert_eq!(
        resolve_type(&schema, &Expression::asterisk("Person")),
        Ok(SemanticType::tuple(vec![SemanticType::Int32, SemanticType::Text]))
    );
}

#[rstest]
fn test_relation_alias_of_nullable_aggregate(schema: TestSchema) {
    assert_eq!(
        resolve_type(&schema, &Expression::relation_alias("cte1", "total")),
        Ok(SemanticType::nullable(SemanticType::Int32))
    );
}

// === Fixed Rules ===

#[rstest]
#[case::null(Expression::null(), SemanticType::Null)]
#[case::real(Expression::literal(2.5), SemanticType::Double)]
#[case::unsigned(Expression::literal(7u16), SemanticType::UInt16)]
#[case::character(Expression::literal('c'), SemanticType::Char)]
#[case::text(Expression::literal("ototo"), SemanticType::Text)]
#[case::blob(Expression::literal(vec![0u8, 1]), SemanticType::Blob)]
#[case::bound_optional(
    Expression::literal(Literal::optional(TypeSpecifier::int64(), Some(Literal::from(9i64)))),
    SemanticType::nullable(SemanticType::Int64)
)]
#[case::unbound_optional(
    Expression::literal(Literal::optional(TypeSpecifier::text(), None)),
    SemanticType::nullable(SemanticType::Text)
)]
#[case::arithmetic(
    Expression::arithmetic(ArithmeticOp::Divide, Expression::literal(4), Expression::literal(2)),
    SemanticType::Double
)]
#[case::bitwise(
    Expression::bitwise(BitwiseOp::ShiftLeft, Expression::literal(1), Expression::literal(3)),
    SemanticType::Int32
)]
#[case::bitwise_not(Expression::bitwise_not(Expression::literal(1)), SemanticType::Int32)]
#[case::concat(
    Expression::concat(Expression::column(person_name()), Expression::literal("!")),
    SemanticType::Text
)]
#[case::comparison(
    Expression::condition(ConditionOp::Less, Expression::column(person_id()), Expression::literal(3)),
    SemanticType::Boolean
)]
#[case::like(
    Expression::like(Expression::column(person_name()), Expression::literal("A%"), None),
    SemanticType::Boolean
)]
#[case::glob(
    Expression::glob(Expression::column(person_name()), Expression::literal("A*")),
    SemanticType::Boolean
)]
#[case::not(Expression::not(Expression::literal(true)), SemanticType::Boolean)]
#[case::in_list(
    Expression::in_list(Expression::column(person_id()), vec![Expression::literal(1), Expression::literal(2)]),
    SemanticType::Boolean
)]
#[case::in_subquery(
    Expression::in_dynamic(
        Expression::column(person_id()),
        Expression::select(Select::new(Expression::column(person_id())).from("Person"))
    ),
    SemanticType::Boolean
)]
#[case::count_asterisk(functions::count_asterisk(None), SemanticType::Int32)]
#[case::typed_count_asterisk(
    functions::count_asterisk(Some(ObjectType::from("Person"))),
    SemanticType::Int32
)]
#[case::count(functions::count(Expression::column(person_name())), SemanticType::Int32)]
#[case::avg(functions::avg(Expression::column(person_age())), SemanticType::Double)]
#[case::max(
    functions::max(Expression::column(employee_id())),
    SemanticType::nullable(SemanticType::Int64)
)]
#[case::abs(
    functions::abs(Expression::column(person_age())),
    SemanticType::nullable(SemanticType::Double)
)]
#[case::group_concat(
    functions::group_concat(Expression::column(person_name()), None),
    SemanticType::Text
)]
#[case::user_function(
    Expression::user_function("soundex", TypeSpecifier::text(), vec![Expression::column(person_name())]),
    SemanticType::Text
)]
#[case::cast(
    Expression::cast(TypeSpecifier::named("i32"), Expression::literal("12")),
    SemanticType::Int32
)]
#[case::cast_to_host_decimal(
    Expression::cast(TypeSpecifier::named("Decimal"), Expression::literal("12")),
    SemanticType::object("Decimal")
)]
#[case::host_text_field(
    Expression::column(MemberPointer::field("Order", "note", TypeSpecifier::named("Text"))),
    SemanticType::object("Text")
)]
#[case::rowid(Expression::rowid(RowIdKind::RowId, None), SemanticType::Int64)]
#[case::qualified_oid(
    Expression::rowid(RowIdKind::Oid, Some(ObjectType::from("Person"))),
    SemanticType::Int64
)]
#[case::object(Expression::object("Person"), SemanticType::object("Person"))]
#[case::getter(
    Expression::accessor(Accessor::getter("Person", "getName", TypeSpecifier::text())),
    SemanticType::Text
)]
#[case::setter(
    Expression::accessor(Accessor::setter("Person", "setAge", TypeSpecifier::integer())),
    SemanticType::Int32
)]
#[case::alias_column(
    Expression::alias_column("p", Expression::column(person_name())),
    SemanticType::Text
)]
fn test_fixed_rules(schema: TestSchema, #[case] expr: Expression, #[case] expected: SemanticType) {
    assert_eq!(resolve_type(&schema, &expr), Ok(expected));
}

#[rstest]
fn test_condition_with_declared_result_type(schema: TestSchema) {
    let condition = sqlorm_ast::ConditionExpr::new(
        ConditionOp::Equal,
        Expression::column(person_id()),
        Expression::literal(1),
    )
    .with_result_type(TypeSpecifier::integer());
    assert_eq!(
        resolve_type(&schema, &Expression::Condition(condition)),
        Ok(SemanticType::Int32)
    );
}

#[rstest]
fn test_case_uses_declared_result_type(schema: TestSchema) {
    let case = Expression::Case(CaseExpr {
        result_type: TypeSpecifier::nullable(TypeSpecifier::text()),
        operand: None,
        branches: vec![CaseBranch {
            when: Expression::condition(
                ConditionOp::Greater,
                Expression::column(person_age()),
                Expression::literal(18),
            ),
            then: Expression::literal("adult"),
        }],
        else_expr: None,
    });
    assert_eq!(
        resolve_type(&schema, &case),
        Ok(SemanticType::nullable(SemanticType::Text))
    );
}

// === Relations ===

#[rstest]
#[case::by_index(Expression::relation_index("people", 1), SemanticType::Text)]
#[case::by_member(Expression::relation_member("people", person_id()), SemanticType::Int32)]
#[case::by_alias(Expression::relation_alias("people", "upper_name"), SemanticType::Text)]
#[case::through_relation(
    Expression::relation_index("nested", 0),
    SemanticType::nullable(SemanticType::Int32)
)]
fn test_relation_lookups(schema: TestSchema, #[case] expr: Expression, #[case] expected: SemanticType) {
    assert_eq!(resolve_type(&schema, &expr), Ok(expected));
}

#[rstest]
fn test_unmapped_member_fails(schema: TestSchema) {
    let err = resolve_type(&schema, &Expression::relation_member("people", person_age())).unwrap_err();
    assert_eq!(
        err,
        ResolveError::UnmappedMember {
            relation: "people".to_string(),
            member: "Person.age".to_string(),
            node: "people.age".to_string(),
        }
    );

    let err = resolve_type(&schema, &Expression::relation_alias("people", "missing")).unwrap_err();
    assert!(matches!(err, ResolveError::UnmappedMember { ref member, .. } if member == "missing"));
    assert_eq!(err.node(), "people.missing");
}

#[rstest]
fn test_member_lookup_ignores_declared_type_spelling(schema: TestSchema) {
    // `people` maps `Person.id` declared as `i32`
    let respelled = MemberPointer::field("Person", "id", TypeSpecifier::named("INTEGER"));
    assert_eq!(
        resolve_type(&schema, &Expression::relation_member("people", respelled)),
        Ok(SemanticType::Int32)
    );
}

#[rstest]
fn test_member_function_target_is_not_a_field(schema: TestSchema) {
    let getter = MemberPointer::function("Person", "id", TypeSpecifier::integer());
    let err = resolve_type(&schema, &Expression::relation_member("people", getter)).unwrap_err();
    assert_eq!(
        err,
        ResolveError::NotAField {
            member: "Person.id()".to_string()
        }
    );
}

#[rstest]
fn test_member_lookup_ignores_aliased_columns(schema: TestSchema) {
    // `people` exposes `Person.name` once bare and once under `upper_name`
    assert_eq!(
        resolve_type(&schema, &Expression::relation_member("people", person_name())),
        Ok(SemanticType::Text)
    );
}

#[rstest]
fn test_index_out_of_range(schema: TestSchema) {
    let err = resolve_type(&schema, &Expression::relation_index("people", 3)).unwrap_err();
    assert_eq!(
        err,
        ResolveError::ColumnIndexOutOfRange {
            relation: "people".to_string(),
            index: 3,
            len: 3,
            node: "people.#3".to_string(),
        }
    );
}

#[rstest]
#[case::self_reference("selfish")]
#[case::mutual_reference("ping")]
fn test_cyclic_relations_fail(schema: TestSchema, #[case] relation: &str) {
    let err = resolve_type(&schema, &Expression::relation_index(relation, 0)).unwrap_err();
    assert_eq!(
        err,
        ResolveError::CyclicRelation {
            relation: relation.to_string(),
            index: 0,
            node: format!("{}.#0", relation),
        }
    );
}

#[rstest]
fn test_expression_target_skips_lookup(schema: TestSchema) {
    let pointer = Expression::ColumnPointer(sqlorm_ast::ColumnPointer::new(
        "unregistered",
        sqlorm_ast::ColumnPointerTarget::Expression(Box::new(Expression::literal(1i64))),
    ));
    assert_eq!(resolve_type(&schema, &pointer), Ok(SemanticType::Int64));
}

// === Asterisk ===

#[rstest]
fn test_asterisk_through_table_alias(schema: TestSchema) {
    assert_eq!(
        resolve_type(&schema, &Expression::asterisk_of_alias("e")),
        Ok(SemanticType::tuple(vec![
            SemanticType::Int64,
            SemanticType::Text,
            SemanticType::nullable(SemanticType::Double),
        ]))
    );
}

#[rstest]
fn test_asterisk_unknown_targets(schema: TestSchema) {
    assert_eq!(
        resolve_type(&schema, &Expression::asterisk("Ghost")),
        Err(ResolveError::UnknownObjectType {
            object: "Ghost".to_string(),
            node: "Ghost.*".to_string(),
        })
    );
    assert_eq!(
        resolve_type(&schema, &Expression::asterisk_of_alias("g")),
        Err(ResolveError::UnknownAlias {
            alias: "g".to_string(),
            node: "g.*".to_string(),
        })
    );
}

// === Projections ===

#[rstest]
fn test_projection_list(schema: TestSchema) {
    let items = vec![
        Expression::column(person_id()),
        Expression::as_optional(Expression::column(person_name())),
        functions::count_asterisk(None),
    ];
    let expected = SemanticType::tuple(vec![
        SemanticType::Int32,
        SemanticType::nullable(SemanticType::Text),
        SemanticType::Int32,
    ]);

    assert_eq!(resolve_projection(&schema, &items), Ok(expected.clone()));
    assert_eq!(resolve_type(&schema, &Expression::columns(items)), Ok(expected));
}

#[rstest]
fn test_select_subquery_uses_its_columns(schema: TestSchema) {
    let select = Select::new(Expression::columns(vec![
        Expression::column(person_name()),
        functions::max(Expression::column(person_age())),
    ]))
    .distinct()
    .from("Person");
    assert_eq!(
        resolve_type(&schema, &Expression::select(select)),
        Ok(SemanticType::tuple(vec![
            SemanticType::Text,
            SemanticType::nullable(SemanticType::Int32),
        ]))
    );
}

#[rstest]
fn test_resolver_is_reusable(schema: TestSchema) {
    let resolver = ColumnResolver::new(&schema);
    let expr = Expression::relation_alias("cte1", "total");
    assert_eq!(resolver.resolve(&expr), resolver.resolve(&expr));
}

// === Properties ===

fn arb_leaf() -> impl Strategy<Value = Expression> {
    prop_oneof![
        any::<i32>().prop_map(|v| Expression::literal(v)),
        any::<i64>().prop_map(|v| Expression::literal(v)),
        any::<bool>().prop_map(|v| Expression::literal(v)),
        "[a-z]{0,8}".prop_map(|s| Expression::literal(s)),
        Just(Expression::null()),
        Just(Expression::column(person_name())),
        Just(Expression::column(employee_id())),
        Just(Expression::asterisk("Person")),
        Just(Expression::relation_alias("cte1", "total")),
        Just(Expression::relation_member("people", person_id())),
        Just(functions::count_asterisk(None)),
    ]
}

fn arb_expression() -> impl Strategy<Value = Expression> {
    arb_leaf().prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            (inner.clone(), "[a-z]{1,6}").prop_map(|(e, a)| Expression::alias(a, e)),
            inner.clone().prop_map(Expression::distinct),
            inner.clone().prop_map(Expression::all),
            inner.clone().prop_map(|e| Expression::shared(Arc::new(e))),
            inner.clone().prop_map(Expression::as_optional),
            inner.clone().prop_map(functions::max),
            (inner.clone(), inner.clone())
                .prop_map(|(l, r)| Expression::arithmetic(ArithmeticOp::Add, l, r)),
            prop::collection::vec(inner, 0..4).prop_map(Expression::columns),
        ]
    })
}

proptest! {
    #[test]
    fn prop_resolution_is_deterministic(expr in arb_expression()) {
        let schema = test_schema();
        prop_assert_eq!(resolve_type(&schema, &expr), resolve_type(&schema, &expr));
    }

    #[test]
    fn prop_wrappers_pass_through(expr in arb_expression()) {
        let schema = test_schema();
        let expected = resolve_type(&schema, &expr);
        prop_assert_eq!(resolve_type(&schema, &Expression::alias("x", expr.clone())), expected.clone());
        prop_assert_eq!(resolve_type(&schema, &Expression::distinct(expr.clone())), expected.clone());
        prop_assert_eq!(resolve_type(&schema, &Expression::all(expr.clone())), expected.clone());
        prop_assert_eq!(resolve_type(&schema, &Expression::shared(Arc::new(expr))), expected);
    }

    #[test]
    fn prop_optional_collapses(expr in arb_expression()) {
        let schema = test_schema();
        let once = resolve_type(&schema, &Expression::as_optional(expr.clone()));
        let twice = resolve_type(&schema, &Expression::as_optional(Expression::as_optional(expr)));
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_projection_keeps_arity_and_order(items in prop::collection::vec(arb_expression(), 0..6)) {
        let schema = test_schema();
        let resolved = resolve_projection(&schema, &items).expect("generated trees resolve");
        let elements = resolved.tuple_elements().expect("projection is a tuple");
        prop_assert_eq!(elements.len(), items.len());
        for (item, element) in items.iter().zip(elements) {
            prop_assert_eq!(&resolve_type(&schema, item).expect("item resolves"), element);
        }
    }

    #[test]
    fn prop_compound_of_equal_arms(expr in arb_expression()) {
        let schema = test_schema();
        let expected = resolve_type(&schema, &expr);
        prop_assert_eq!(resolve_type(&schema, &Expression::union(expr.clone(), expr)), expected);
    }
}
