//! Schema catalog errors

use sqlorm_diagnostics::{ErrorBuilder, ErrorCode, OrmError, ORM0200, ORM0201, ORM0202, ORM0203, ORM0401};

/// Errors raised while building or loading a schema
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("Schema load failed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate column '{column}' in table '{table}'")]
    DuplicateColumn { table: String, column: String },

    #[error("Alias '{alias}' refers to unmapped object type '{object}'")]
    AliasTargetNotMapped { alias: String, object: String },

    #[error("Unsupported schema file: {0}")]
    UnsupportedFile(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SchemaError {
    /// Get the diagnostic code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Parse(_) => ORM0200,
            Self::DuplicateColumn { .. } => ORM0201,
            Self::AliasTargetNotMapped { .. } => ORM0202,
            Self::UnsupportedFile(_) => ORM0203,
            Self::Io(_) => ORM0401,
        }
    }
}

impl From<SchemaError> for OrmError {
    fn from(err: SchemaError) -> Self {
        let builder = ErrorBuilder::new(err.code(), err.to_string());
        match &err {
            SchemaError::DuplicateColumn { table, .. } => builder.node(table.as_str()).schema(),
            SchemaError::AliasTargetNotMapped { alias, .. } => builder.node(alias.as_str()).schema(),
            SchemaError::Io(_) => builder.system(),
            SchemaError::Parse(_) | SchemaError::UnsupportedFile(_) => builder.schema(),
        }
    }
}
