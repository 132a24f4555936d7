//! Configuration errors

use sqlorm_diagnostics::{ErrorBuilder, ErrorCode, OrmError, ORM0300, ORM0401};

/// Errors that can occur while loading serialization flags
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Flags document is not valid JSON or has unknown keys
    #[error("Invalid serialization flags: {0}")]
    Json(#[from] serde_json::Error),

    /// Flags file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    /// Get the diagnostic code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Json(_) => ORM0300,
            Self::Io(_) => ORM0401,
        }
    }
}

impl From<ConfigError> for OrmError {
    fn from(err: ConfigError) -> Self {
        let builder = ErrorBuilder::new(err.code(), err.to_string());
        match err {
            ConfigError::Json(_) => builder.config(),
            ConfigError::Io(_) => builder.system(),
        }
    }
}
