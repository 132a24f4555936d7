//! Serialized form of semantic types and column descriptors
//!
//! Covers: the `kind`/`of` tagging of every shape of `SemanticType`, the
//! `type` key of `ColumnDescriptor`, and reading both back

use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{json, Value};
use sqlorm_types::{ColumnDescriptor, SemanticType};

#[rstest]
#[case::primitive(SemanticType::Int32, json!({"kind": "Int32"}))]
#[case::null(SemanticType::Null, json!({"kind": "Null"}))]
#[case::nullable(
    SemanticType::nullable(SemanticType::Text),
    json!({"kind": "Nullable", "of": {"kind": "Text"}})
)]
#[case::object(SemanticType::object("Person"), json!({"kind": "Object", "of": "Person"}))]
#[case::tuple(
    SemanticType::tuple(vec![SemanticType::Int64, SemanticType::nullable(SemanticType::Double)]),
    json!({"kind": "Tuple", "of": [
        {"kind": "Int64"},
        {"kind": "Nullable", "of": {"kind": "Double"}}
    ]})
)]
fn test_semantic_type_json(#[case] ty: SemanticType, #[case] expected: Value) {
    assert_eq!(serde_json::to_value(&ty).unwrap(), expected);
    assert_eq!(serde_json::from_value::<SemanticType>(expected).unwrap(), ty);
}

#[test]
fn test_column_descriptor_uses_type_key() {
    let column = ColumnDescriptor::new("nickname", SemanticType::nullable(SemanticType::Text));
    let value = serde_json::to_value(&column).unwrap();
    assert_eq!(
        value,
        json!({"name": "nickname", "type": {"kind": "Nullable", "of": {"kind": "Text"}}})
    );

    let back: ColumnDescriptor = serde_json::from_value(value).unwrap();
    assert_eq!(back, column);
}

#[test]
fn test_unknown_kind_is_rejected() {
    let err = serde_json::from_value::<SemanticType>(json!({"kind": "Decimal"}));
    assert!(err.is_err());
}
