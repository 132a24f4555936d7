//! Literal AST nodes

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::TypeSpecifier;

/// A literal value bound into a query (`SELECT 1`, `SELECT 'ototo'`, `SELECT NULL`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    /// Null literal
    Null,
    /// Boolean literal
    Boolean(bool),
    /// Character literal
    Char(char),
    /// 8-bit signed integer
    Int8(i8),
    /// 16-bit signed integer
    Int16(i16),
    /// 32-bit signed integer
    Int32(i32),
    /// 64-bit signed integer
    Int64(i64),
    /// 8-bit unsigned integer
    UInt8(u8),
    /// 16-bit unsigned integer
    UInt16(u16),
    /// 32-bit unsigned integer
    UInt32(u32),
    /// 64-bit unsigned integer
    UInt64(u64),
    /// Single precision real
    Float(f32),
    /// Double precision real
    Double(f64),
    /// Text literal
    Text(String),
    /// Blob literal
    Blob(Vec<u8>),
    /// Bound optional value of a declared type; `None` binds as `NULL`
    Optional {
        value_type: TypeSpecifier,
        value: Option<Box<Literal>>,
    },
}

impl Literal {
    /// Create an optional literal of the given value type
    pub fn optional(value_type: TypeSpecifier, value: Option<Literal>) -> Self {
        Self::Optional {
            value_type,
            value: value.map(Box::new),
        }
    }

    /// Check if this literal is an arithmetic primitive (booleans and chars included)
    pub fn is_arithmetic(&self) -> bool {
        !matches!(
            self,
            Self::Null | Self::Text(_) | Self::Blob(_) | Self::Optional { .. }
        )
    }

    /// Check if this literal is the null literal
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "NULL"),
            Self::Boolean(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            Self::Char(c) => write!(f, "'{}'", c),
            Self::Int8(v) => write!(f, "{}", v),
            Self::Int16(v) => write!(f, "{}", v),
            Self::Int32(v) => write!(f, "{}", v),
            Self::Int64(v) => write!(f, "{}", v),
            Self::UInt8(v) => write!(f, "{}", v),
            Self::UInt16(v) => write!(f, "{}", v),
            Self::UInt32(v) => write!(f, "{}", v),
            Self::UInt64(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
            Self::Double(v) => write!(f, "{}", v),
            Self::Text(s) => write!(f, "'{}'", s.replace('\'', "''")),
            Self::Blob(bytes) => {
                write!(f, "x'")?;
                for byte in bytes {
                    write!(f, "{:02X}", byte)?;
                }
                write!(f, "'")
            }
            Self::Optional { value: Some(value), .. } => write!(f, "{}", value),
            Self::Optional { value: None, .. } => write!(f, "NULL"),
        }
    }
}

macro_rules! literal_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Literal {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

literal_from! {
    bool => Boolean,
    char => Char,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => UInt8,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
    f32 => Float,
    f64 => Double,
    String => Text,
    Vec<u8> => Blob,
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}
