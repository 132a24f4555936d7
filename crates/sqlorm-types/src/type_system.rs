//! Semantic result types
//!
//! This module defines the host types a query projection resolves to:
//! - SemanticType enum covering primitives, nullable wrappers, whole mapped
//!   objects and fixed-arity tuples
//! - Conversion from syntactic type specifiers (Rust spellings) and from
//!   catalog column types (Rust or SQLite spellings)
//! - Type display and classification utilities

use serde::{Deserialize, Serialize};
use sqlorm_ast::{ObjectType, TypeSpecifier};
use std::fmt;

/// The resolved host type of one projection item
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "of")]
pub enum SemanticType {
    // === Special Types ===
    /// Type of the `NULL` literal
    Null,

    // === Primitive Types ===
    /// Boolean
    Boolean,
    /// Single character
    Char,
    /// 8-bit signed integer
    Int8,
    /// 16-bit signed integer
    Int16,
    /// 32-bit signed integer
    Int32,
    /// 64-bit signed integer
    Int64,
    /// 8-bit unsigned integer
    UInt8,
    /// 16-bit unsigned integer
    UInt16,
    /// 32-bit unsigned integer
    UInt32,
    /// 64-bit unsigned integer
    UInt64,
    /// Single precision real
    Float,
    /// Double precision real
    Double,
    /// Unicode text
    Text,
    /// Binary blob
    Blob,

    // === Composite Types ===
    /// Value that may be absent
    Nullable(Box<SemanticType>),
    /// Whole mapped object
    Object(ObjectType),
    /// Ordered, fixed-arity tuple
    Tuple(Vec<SemanticType>),
}

impl SemanticType {
    // === Constructors ===

    /// Wrap a type in a nullable layer
    ///
    /// Wrapping is idempotent: an already nullable type is returned unchanged.
    pub fn nullable(inner: SemanticType) -> Self {
        match inner {
            Self::Nullable(_) => inner,
            other => Self::Nullable(Box::new(other)),
        }
    }

    /// Create a tuple type
    pub fn tuple(elements: Vec<SemanticType>) -> Self {
        Self::Tuple(elements)
    }

    /// Create a whole-object type
    pub fn object(object: impl Into<ObjectType>) -> Self {
        Self::Object(object.into())
    }

    /// Convert a declared type specifier into a semantic type
    ///
    /// Named specifiers accept Rust primitive spellings (`i32`, `f64`,
    /// `String`, `Vec<u8>`). Any other name designates a mapped object type,
    /// so a host type called `Decimal` or `Text` stays an object.
    pub fn from_specifier(specifier: &TypeSpecifier) -> Self {
        match specifier {
            TypeSpecifier::Named(named) => Self::from_name(&named.name),
            TypeSpecifier::Nullable(inner) => Self::nullable(Self::from_specifier(inner)),
            TypeSpecifier::Tuple(elements) => {
                Self::Tuple(elements.iter().map(Self::from_specifier).collect())
            }
        }
    }

    /// Convert a single host type name into a semantic type
    pub fn from_name(name: &str) -> Self {
        Self::from_rust_name(name).unwrap_or_else(|| Self::Object(ObjectType::from(name)))
    }

    /// Convert a catalog column type into a semantic type
    ///
    /// Tries Rust spellings first, then case-insensitive SQLite column type
    /// names (`INTEGER`, `REAL`, `TEXT`, `BLOB`).
    pub fn from_column_type(name: &str) -> Self {
        Self::from_rust_name(name)
            .or_else(|| Self::from_sqlite_name(name))
            .unwrap_or_else(|| Self::Object(ObjectType::from(name)))
    }

    fn from_rust_name(name: &str) -> Option<Self> {
        let ty = match name {
            "()" => Self::Null,
            "bool" => Self::Boolean,
            "char" => Self::Char,
            "i8" => Self::Int8,
            "i16" => Self::Int16,
            "i32" => Self::Int32,
            "i64" => Self::Int64,
            "u8" => Self::UInt8,
            "u16" => Self::UInt16,
            "u32" => Self::UInt32,
            "u64" => Self::UInt64,
            "f32" => Self::Float,
            "f64" => Self::Double,
            "String" | "str" | "&str" => Self::Text,
            "Vec<u8>" | "[u8]" => Self::Blob,
            _ => return None,
        };
        Some(ty)
    }

    fn from_sqlite_name(name: &str) -> Option<Self> {
        let ty = match name.to_ascii_uppercase().as_str() {
            "NULL" => Self::Null,
            "BOOLEAN" | "BOOL" => Self::Boolean,
            "TINYINT" => Self::Int8,
            "SMALLINT" => Self::Int16,
            "INT" | "INTEGER" | "MEDIUMINT" => Self::Int32,
            "BIGINT" => Self::Int64,
            "FLOAT" => Self::Float,
            "REAL" | "DOUBLE" | "NUMERIC" | "DECIMAL" => Self::Double,
            "TEXT" | "VARCHAR" | "CHARACTER" | "CLOB" => Self::Text,
            "BLOB" => Self::Blob,
            _ => return None,
        };
        Some(ty)
    }

    // === Type Properties ===

    /// Check if this is the null type
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Check if this is a nullable wrapper
    pub fn is_nullable(&self) -> bool {
        matches!(self, Self::Nullable(_))
    }

    /// Check if this is an integral type (booleans and chars excluded)
    pub fn is_integral(&self) -> bool {
        matches!(
            self,
            Self::Int8
                | Self::Int16
                | Self::Int32
                | Self::Int64
                | Self::UInt8
                | Self::UInt16
                | Self::UInt32
                | Self::UInt64
        )
    }

    /// Check if this is a floating point type
    pub fn is_floating(&self) -> bool {
        matches!(self, Self::Float | Self::Double)
    }

    /// Check if this is an arithmetic primitive
    pub fn is_arithmetic(&self) -> bool {
        self.is_integral() || self.is_floating() || matches!(self, Self::Boolean | Self::Char)
    }

    /// Check if this is a tuple type
    pub fn is_tuple(&self) -> bool {
        matches!(self, Self::Tuple(_))
    }

    /// Get the wrapped type for nullable types
    pub fn inner(&self) -> Option<&SemanticType> {
        match self {
            Self::Nullable(inner) => Some(inner),
            _ => None,
        }
    }

    /// Strip a nullable layer if present
    pub fn non_null(&self) -> &SemanticType {
        self.inner().unwrap_or(self)
    }

    /// Get tuple elements for tuple types
    pub fn tuple_elements(&self) -> Option<&[SemanticType]> {
        match self {
            Self::Tuple(elements) => Some(elements),
            _ => None,
        }
    }

    /// Get the simple name of this type
    pub fn name(&self) -> &str {
        match self {
            Self::Null => "null",
            Self::Boolean => "bool",
            Self::Char => "char",
            Self::Int8 => "i8",
            Self::Int16 => "i16",
            Self::Int32 => "i32",
            Self::Int64 => "i64",
            Self::UInt8 => "u8",
            Self::UInt16 => "u16",
            Self::UInt32 => "u32",
            Self::UInt64 => "u64",
            Self::Float => "f32",
            Self::Double => "f64",
            Self::Text => "String",
            Self::Blob => "Vec<u8>",
            Self::Nullable(_) => "Option",
            Self::Object(object) => object.as_str(),
            Self::Tuple(_) => "Tuple",
        }
    }
}

impl From<&TypeSpecifier> for SemanticType {
    fn from(specifier: &TypeSpecifier) -> Self {
        Self::from_specifier(specifier)
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nullable(inner) => write!(f, "Option<{}>", inner),
            Self::Tuple(elements) => {
                let names: Vec<String> = elements.iter().map(|e| e.to_string()).collect();
                write!(f, "({})", names.join(", "))
            }
            _ => f.write_str(self.name()),
        }
    }
}
